// THEORY:
// A `Silhouette` is one connected group of foreground pixels discovered by the
// `ComponentScanner`. It is created the moment the scanner meets an unvisited
// foreground seed, grows while the flood fill consumes its neighbors, and is never
// modified once that flood fill ends.
//
// Like `Pixel`, it is a "dumb" data container. Whether it is large enough to be
// reported is decided later by the size filter in the pipeline.
//
// The scanner works on the padded grid, so a fresh silhouette is in grid
// coordinates. The pipeline moves every retained silhouette into image coordinates
// before it lands in a report; image pixel (x, y) is grid cell (x + 1, y + 1).

use serde::Serialize;

/// A pixel coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A connected foreground region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Silhouette {
    /// Discovery order within one scan, starting at 0. Not persistent across scans.
    pub id: u64,
    /// The first pixel of the region met by the row-major scan.
    pub seed: Point,
    /// Number of pixels in the region.
    pub pixel_count: usize,
    /// Every pixel of the region, in the order the flood fill consumed them.
    #[serde(skip)]
    pub pixel_coords: Vec<Point>,
    /// Top-left and bottom-right corners enclosing the region.
    pub bounding_box: (Point, Point),
}

impl Silhouette {
    pub(crate) fn new(id: u64, seed: Point) -> Self {
        Self {
            id,
            seed,
            pixel_count: 0,
            pixel_coords: Vec::new(),
            bounding_box: (seed, seed),
        }
    }

    pub(crate) fn absorb(&mut self, point: Point) {
        let (min, max) = &mut self.bounding_box;
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
        self.pixel_coords.push(point);
        self.pixel_count += 1;
    }

    /// Shifts every coordinate by the padding offset, from grid into image space.
    pub(crate) fn into_image_space(mut self) -> Self {
        let (min, max) = self.bounding_box;
        assert!(
            min.x >= 1 && min.y >= 1,
            "silhouette {} reaches into the padding frame",
            self.id
        );
        let shift = |point: Point| Point::new(point.x - 1, point.y - 1);

        self.seed = shift(self.seed);
        self.bounding_box = (shift(min), shift(max));
        for point in &mut self.pixel_coords {
            *point = shift(*point);
        }
        self
    }

    pub fn bounding_box_size(&self) -> (u32, u32) {
        let (min, max) = self.bounding_box;
        (max.x - min.x + 1, max.y - min.y + 1)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.pixel_coords.contains(&point)
    }
}
