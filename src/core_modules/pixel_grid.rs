// THEORY:
// The `PixelGrid` is the data-shaping step between the decoded image and the
// scanner. It copies the image into a flat, row-major buffer that is one cell larger
// on every side, and fills that one-cell frame with the inferred background color.
//
// Layout for a W x H image:
// - the grid is (W + 2) columns by (H + 2) rows
// - row 0, row H + 1, column 0 and column W + 1 hold the background color
// - image pixel (x, y) lives at grid cell (x + 1, y + 1), unchanged
//
// No classification happens here. Because the frame is exactly the background
// color, it is always background-like, and every real pixel has four in-bounds
// neighbors.

use crate::core_modules::decoded_image::DecodedImage;
use crate::core_modules::pixel::pixel::Pixel;
use crate::core_modules::silhouette::Point;
use tracing::debug;

/// Padded, read-only copy of a decoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    /// Grid width in cells, including both padding columns.
    width: u32,
    /// Grid height in cells, including both padding rows.
    height: u32,
    cells: Vec<Pixel>,
}

impl PixelGrid {
    /// Builds the padded grid for `image`, framing it with `background`.
    pub fn build<I: DecodedImage + ?Sized>(image: &I, background: Pixel) -> Self {
        let image_width = image.width();
        let image_height = image.height();
        let width = image_width + 2;
        let height = image_height + 2;

        let mut cells = vec![background; width as usize * height as usize];
        for y in 0..image_height {
            let row_start = (y as usize + 1) * width as usize + 1;
            for x in 0..image_width {
                cells[row_start + x as usize] = image.pixel(x, y);
            }
        }

        debug!(width, height, %background, "built padded pixel grid");
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn image_width(&self) -> u32 {
        self.width - 2
    }

    pub fn image_height(&self) -> u32 {
        self.height - 2
    }

    /// Total number of cells, padding included. Never zero.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn index_of(&self, point: Point) -> usize {
        point.y as usize * self.width as usize + point.x as usize
    }

    #[inline]
    pub fn point_at(&self, index: usize) -> Point {
        Point::new(
            (index % self.width as usize) as u32,
            (index / self.width as usize) as u32,
        )
    }

    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x < self.width && point.y < self.height
    }

    #[inline]
    pub fn get(&self, point: Point) -> Pixel {
        self.cells[self.index_of(point)]
    }

    /// Whether `point` lies on the synthetic padding frame.
    pub fn is_padding(&self, point: Point) -> bool {
        point.x == 0 || point.y == 0 || point.x == self.width - 1 || point.y == self.height - 1
    }

    /// Maps a grid cell back to image coordinates, `None` for padding.
    pub fn to_image_point(&self, point: Point) -> Option<Point> {
        if !self.contains(point) || self.is_padding(point) {
            return None;
        }
        Some(Point::new(point.x - 1, point.y - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 100, 255]))
    }

    #[test]
    fn adds_one_cell_of_padding_on_each_side() {
        let grid = PixelGrid::build(&gradient(5, 3), Pixel::opaque(9, 9, 9));
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.cell_count(), 35);
        assert_eq!(grid.image_width(), 5);
        assert_eq!(grid.image_height(), 3);
    }

    #[test]
    fn padding_holds_background_color() {
        let background = Pixel::opaque(9, 9, 9);
        let grid = PixelGrid::build(&gradient(5, 3), background);
        for index in 0..grid.cell_count() {
            let point = grid.point_at(index);
            if grid.is_padding(point) {
                assert_eq!(grid.get(point), background, "padding cell {point:?}");
            }
        }
    }

    #[test]
    fn image_pixels_are_copied_with_offset() {
        let image = gradient(5, 3);
        let grid = PixelGrid::build(&image, Pixel::opaque(9, 9, 9));
        for y in 0..3 {
            for x in 0..5 {
                let cell = Point::new(x + 1, y + 1);
                assert_eq!(grid.get(cell), Pixel::from(*image.get_pixel(x, y)));
                assert_eq!(grid.to_image_point(cell), Some(Point::new(x, y)));
            }
        }
        assert_eq!(grid.to_image_point(Point::new(0, 2)), None);
        assert_eq!(grid.to_image_point(Point::new(7, 2)), None);
    }

    #[test]
    fn index_and_point_round_trip() {
        let grid = PixelGrid::build(&gradient(4, 4), Pixel::default());
        let point = Point::new(3, 2);
        assert_eq!(grid.point_at(grid.index_of(point)), point);
        assert!(grid.contains(Point::new(5, 5)));
        assert!(!grid.contains(Point::new(6, 0)));
    }
}
