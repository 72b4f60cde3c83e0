//! Two-column balanced masonry layout for the photo gallery.
//!
//! Each image occupies one grid column and one or two row units depending on
//! its aspect ratio. Images are placed in input order into whichever column
//! is currently shorter, so the columns stay within one row span of each
//! other. The pass is pure: column counters live on the stack and reset on
//! every call, and placement depends only on the descriptors' original
//! indices, never on load-completion order.

use crate::types::{GalleryLayoutResult, ImageDescriptor, PlacedImage};

/// Row units for an aspect ratio: portraits (ratio < 1) span 2, everything
/// else (including exactly square) spans 1.
pub fn row_span(aspect_ratio: f32) -> u32 {
    if aspect_ratio < 1.0 {
        2
    } else {
        1
    }
}

/// Arrange descriptors into the two-column grid.
///
/// Descriptors may arrive in any order; they are sorted by original index
/// before placement so the result is reproducible for the same input list.
/// An empty input yields an empty result.
pub fn arrange(mut descriptors: Vec<ImageDescriptor>) -> GalleryLayoutResult {
    descriptors.sort_by_key(|d| d.index);

    let mut col_heights = [0u32; 2];
    let mut cells = Vec::with_capacity(descriptors.len());

    for (position, descriptor) in descriptors.into_iter().enumerate() {
        // Shorter column wins; ties go to the left column.
        let column = if col_heights[0] <= col_heights[1] { 0 } else { 1 };
        let row_start = col_heights[column] + 1;
        let span = descriptor.row_span;
        col_heights[column] += span;

        cells.push(PlacedImage {
            descriptor,
            column,
            row_start,
            row_span: span,
            entrance_slot: position % 3,
        });
    }

    GalleryLayoutResult { cells, col_heights }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(index: usize, width: u32, height: u32) -> ImageDescriptor {
        ImageDescriptor::new(format!("{index:02}.webp"), index, width, height)
    }

    #[test]
    fn row_span_portrait_vs_landscape() {
        assert_eq!(row_span(0.5), 2);
        assert_eq!(row_span(0.999), 2);
        assert_eq!(row_span(1.5), 1);
        assert_eq!(row_span(2.0), 1);
    }

    #[test]
    fn row_span_square_boundary() {
        assert_eq!(row_span(1.0), 1);
    }

    #[test]
    fn landscape_portrait_square_scenario() {
        // 2:1 landscape, 1:2 portrait, 1:1 square
        let result = arrange(vec![desc(0, 200, 100), desc(1, 100, 200), desc(2, 100, 100)]);

        let spans: Vec<u32> = result.cells.iter().map(|c| c.row_span).collect();
        assert_eq!(spans, vec![1, 2, 1]);

        // item0 -> col1 row1 span1; item1 -> col2 row1 span2; item2 -> col1 row2 span1
        assert_eq!((result.cells[0].column, result.cells[0].row_start), (0, 1));
        assert_eq!((result.cells[1].column, result.cells[1].row_start), (1, 1));
        assert_eq!((result.cells[2].column, result.cells[2].row_start), (0, 2));
        assert_eq!(result.col_heights, [2, 2]);
    }

    #[test]
    fn placement_ignores_arrival_order() {
        let in_order = vec![desc(0, 300, 200), desc(1, 200, 300), desc(2, 100, 100), desc(3, 400, 100)];
        let mut shuffled = in_order.clone();
        shuffled.reverse();
        shuffled.swap(0, 2);

        assert_eq!(arrange(in_order), arrange(shuffled));
    }

    #[test]
    fn columns_stay_balanced() {
        // Mixed spans; after placement the columns may differ by at most the
        // largest span.
        let descriptors: Vec<ImageDescriptor> = (0..17)
            .map(|i| {
                if i % 3 == 0 {
                    desc(i, 100, 200)
                } else {
                    desc(i, 200, 100)
                }
            })
            .collect();
        let max_span = descriptors.iter().map(|d| d.row_span).max().unwrap();

        let result = arrange(descriptors);
        let diff = result.col_heights[0].abs_diff(result.col_heights[1]);
        assert!(diff <= max_span, "columns diverged by {diff}");
    }

    #[test]
    fn layout_is_idempotent() {
        let descriptors = vec![desc(0, 120, 200), desc(1, 200, 120), desc(2, 150, 150)];
        let first = arrange(descriptors.clone());
        let second = arrange(descriptors);
        assert_eq!(first, second);
    }

    #[test]
    fn empty_input_yields_empty_result() {
        let result = arrange(Vec::new());
        assert!(result.cells.is_empty());
        assert_eq!(result.col_heights, [0, 0]);
        assert_eq!(result.total_rows(), 0);
    }

    #[test]
    fn entrance_slots_cycle_by_position() {
        let result = arrange((0..7).map(|i| desc(i, 200, 100)).collect());
        let slots: Vec<usize> = result.cells.iter().map(|c| c.entrance_slot).collect();
        assert_eq!(slots, vec![0, 1, 2, 0, 1, 2, 0]);
    }
}
