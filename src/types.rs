//! Common types and data structures

use eframe::egui;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One successfully measured gallery image. Created when a load settles
/// successfully; immutable afterwards. Failed loads never produce one.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    pub path: String,
    /// Position in the original input list, NOT load-completion order.
    pub index: usize,
    pub aspect_ratio: f32,
    /// Grid row units occupied: portraits take 2, everything else 1.
    pub row_span: u32,
    pub width: u32,
    pub height: u32,
}

impl ImageDescriptor {
    pub fn new(path: String, index: usize, width: u32, height: u32) -> Self {
        let aspect_ratio = width as f32 / height as f32;
        Self {
            path,
            index,
            aspect_ratio,
            row_span: crate::layout::row_span(aspect_ratio),
            width,
            height,
        }
    }
}

/// A descriptor with its resolved grid position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedImage {
    pub descriptor: ImageDescriptor,
    /// 0 = left column, 1 = right column.
    pub column: usize,
    /// 1-based start row unit.
    pub row_start: u32,
    pub row_span: u32,
    /// 3-way round-robin slot for the staggered entrance animation.
    pub entrance_slot: usize,
}

/// Output of one layout pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GalleryLayoutResult {
    pub cells: Vec<PlacedImage>,
    /// Accumulated row units per column after placement.
    pub col_heights: [u32; 2],
}

impl GalleryLayoutResult {
    pub fn total_rows(&self) -> u32 {
        self.col_heights[0].max(self.col_heights[1])
    }
}

/// Progress shared between the preload tasks and the UI thread.
#[derive(Default)]
pub struct PreloadState {
    pub total: usize,
    pub loaded: usize,
    pub failed: usize,
}

impl PreloadState {
    pub fn settled(&self) -> usize {
        self.loaded + self.failed
    }

    /// Fraction of requests settled, clamped to [0, 1].
    pub fn progress(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.settled() as f32 / self.total as f32).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.settled() == self.total
    }
}

/// Progress shared between the gallery measuring tasks and the UI thread.
#[derive(Default)]
pub struct GalleryProgress {
    pub descriptors: Vec<ImageDescriptor>,
    pub settled: usize,
}

/// Decoded pixels parked by background tasks until the UI thread uploads
/// them as textures (textures can only be created on the UI thread).
pub type PixelCache = Arc<Mutex<HashMap<String, egui::ColorImage>>>;
