//! In-memory R-tree over grid cells.
//!
//! Built once per grid and reused for every route planned against it.
//! Envelope queries narrow the candidates; the exact geometry test is left
//! to the caller.

use geo::BoundingRect;
use rstar::{AABB, RTree, RTreeObject};
use safe_route_grid_models::{Cell, Grid};

/// A cell's position in the grid together with its envelope.
struct CellEntry {
    position: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for CellEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Spatial index over the cells of one [`Grid`].
pub struct CellIndex<'a> {
    grid: &'a Grid,
    tree: RTree<CellEntry>,
}

impl<'a> CellIndex<'a> {
    /// Indexes every cell of `grid`. Cells without a bounding box are left
    /// out and can never be returned.
    #[must_use]
    pub fn new(grid: &'a Grid) -> Self {
        let entries: Vec<CellEntry> = grid
            .iter()
            .enumerate()
            .filter_map(|(position, cell)| {
                cell.polygon.bounding_rect().map(|rect| CellEntry {
                    position,
                    envelope: AABB::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                })
            })
            .collect();

        log::debug!("Indexed {} of {} grid cells", entries.len(), grid.len());

        Self {
            grid,
            tree: RTree::bulk_load(entries),
        }
    }

    /// The indexed grid.
    #[must_use]
    pub const fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Number of indexed cells.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// Cells whose envelope intersects the rectangle spanned by `a` and `b`
    /// (`[x, y]` corners, any order), in grid order. Touching envelopes
    /// count as intersecting.
    #[must_use]
    pub fn candidates(&self, a: [f64; 2], b: [f64; 2]) -> Vec<&'a Cell> {
        let query = AABB::from_corners(a, b);

        let mut positions: Vec<usize> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .map(|entry| entry.position)
            .collect();
        positions.sort_unstable();

        let grid: &'a Grid = self.grid;
        let cells = grid.cells();
        positions.into_iter().map(|p| &cells[p]).collect()
    }
}
