// THEORY:
// The `ComponentScanner` is the engine of the segmentation layer. It partitions the
// padded `PixelGrid` into connected foreground regions ("silhouettes") using a
// two-level traversal.
//
// Outer scan: every cell is inspected in row-major order. A cell that is already
// visited is skipped. A background-like cell is marked visited on its own and never
// expanded; background regions need no shape counting, so an isolated background
// pixel inside a silhouette is simply visited by itself. A foreground cell starts a
// new `Silhouette` and seeds a flood fill.
//
// Flood fill: a FIFO queue of `Point`s, breadth first over the 4-connected grid.
// For the point at the front of the queue:
// 1.  Every in-bounds orthogonal neighbor that is still `Unseen` and foreground is
//     marked `Queued` and pushed to the back.
// 2.  The point itself is marked `Visited`, counted into the silhouette, and popped.
//
// Each cell moves through `Unseen -> Queued -> Visited` at most once, so a cell can
// never be queued twice or counted twice, and the fill terminates on a finite grid.
// At the end of a scan every cell is `Visited` exactly once.
//
// All traversal state (cell states, queue) is owned by one scanner value that is
// consumed by `scan`; nothing is shared between images.

use crate::core_modules::color_classifier::color_classifier::{ColorClassifier, PixelClass};
use crate::core_modules::pixel_grid::PixelGrid;
use crate::core_modules::silhouette::{Point, Silhouette};
use std::collections::VecDeque;
use tracing::debug;

/// Traversal state of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    /// Not yet reached by either loop.
    Unseen,
    /// Waiting in the flood-fill queue.
    Queued,
    /// Assigned to a silhouette or visited as background. Final.
    Visited,
}

/// Everything one scan discovered, before size filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    /// All foreground components, in row-major order of their seed pixel.
    pub components: Vec<Silhouette>,
    /// Number of background-like cells visited one by one by the outer scan.
    pub background_visits: usize,
    /// Number of cells in the padded grid.
    pub total_cells: usize,
}

impl ScanOutcome {
    /// Minimum pixel count a component must exceed to be reported.
    pub fn size_threshold(&self, minimum_silhouette_fraction: f64) -> f64 {
        self.total_cells as f64 * minimum_silhouette_fraction
    }

    /// Components larger than the size threshold, in discovery order.
    pub fn retained(&self, minimum_silhouette_fraction: f64) -> impl Iterator<Item = &Silhouette> {
        let threshold = self.size_threshold(minimum_silhouette_fraction);
        self.components
            .iter()
            .filter(move |component| component.pixel_count as f64 > threshold)
    }

    /// Consumes the outcome, keeping only components above the size threshold.
    pub fn into_retained(self, minimum_silhouette_fraction: f64) -> Vec<Silhouette> {
        let threshold = self.size_threshold(minimum_silhouette_fraction);
        self.components
            .into_iter()
            .filter(|component| component.pixel_count as f64 > threshold)
            .collect()
    }

    /// Cells visited by the scan: background singletons plus every component pixel.
    pub fn visited_cells(&self) -> usize {
        self.background_visits
            + self
                .components
                .iter()
                .map(|component| component.pixel_count)
                .sum::<usize>()
    }
}

/// Single-use connected-component scanner over one `PixelGrid`.
pub struct ComponentScanner<'a> {
    grid: &'a PixelGrid,
    classifier: ColorClassifier,
    states: Vec<CellState>,
    queue: VecDeque<Point>,
}

impl<'a> ComponentScanner<'a> {
    pub fn new(grid: &'a PixelGrid, classifier: ColorClassifier) -> Self {
        Self {
            grid,
            classifier,
            states: vec![CellState::Unseen; grid.cell_count()],
            queue: VecDeque::new(),
        }
    }

    /// Runs the outer scan and every flood fill, consuming the scanner.
    pub fn scan(mut self) -> ScanOutcome {
        let grid = self.grid;
        assert_eq!(
            self.states.len(),
            grid.cell_count(),
            "cell state array does not match the pixel grid"
        );

        let mut components: Vec<Silhouette> = Vec::new();
        let mut background_visits = 0usize;

        for index in 0..grid.cell_count() {
            if self.states[index] == CellState::Visited {
                continue;
            }

            let point = grid.point_at(index);
            match self.classifier.classify(&grid.get(point)) {
                PixelClass::Background => {
                    self.states[index] = CellState::Visited;
                    background_visits += 1;
                }
                PixelClass::Foreground => {
                    let id = components.len() as u64;
                    components.push(self.flood_fill(point, id));
                }
            }
        }

        debug_assert!(self.states.iter().all(|state| *state == CellState::Visited));
        debug!(
            components = components.len(),
            background_visits,
            total_cells = grid.cell_count(),
            "component scan finished"
        );

        ScanOutcome {
            components,
            background_visits,
            total_cells: grid.cell_count(),
        }
    }

    /// Breadth-first expansion of one silhouette from `seed`.
    fn flood_fill(&mut self, seed: Point, id: u64) -> Silhouette {
        let grid = self.grid;
        let mut silhouette = Silhouette::new(id, seed);

        self.states[grid.index_of(seed)] = CellState::Queued;
        self.queue.push_back(seed);

        while let Some(&current) = self.queue.front() {
            for neighbor in Self::neighbors(current).into_iter().flatten() {
                if !grid.contains(neighbor) {
                    continue;
                }
                let index = grid.index_of(neighbor);
                if self.states[index] == CellState::Unseen
                    && self.classifier.is_foreground(&grid.get(neighbor))
                {
                    self.states[index] = CellState::Queued;
                    self.queue.push_back(neighbor);
                }
            }

            self.states[grid.index_of(current)] = CellState::Visited;
            silhouette.absorb(current);
            self.queue.pop_front();
        }

        silhouette
    }

    /// Orthogonal neighbors: below, above, right, left.
    fn neighbors(point: Point) -> [Option<Point>; 4] {
        [
            Some(Point::new(point.x, point.y + 1)),
            point.y.checked_sub(1).map(|y| Point::new(point.x, y)),
            Some(Point::new(point.x + 1, point.y)),
            point.x.checked_sub(1).map(|x| Point::new(x, point.y)),
        ]
    }
}
