//! Cell safety scoring.
//!
//! Scores are assigned once, right after tessellation, and stay fixed for
//! the lifetime of the returned [`Grid`]. Re-scoring produces a new grid.
//!
//! [`RandomScorer`] is a stand-in until real incident data is wired up;
//! any [`SafetyScorer`] (including a plain closure) can replace it without
//! touching generation or route planning.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use safe_route_grid_models::{Cell, Grid, SafetyScore};

/// Assigns a score to a cell. Returning `None` leaves the cell unscored,
/// which route aggregation treats as [`SafetyScore::FALLBACK`].
pub trait SafetyScorer {
    /// Scores a single cell.
    fn score(&mut self, cell: &Cell) -> Option<SafetyScore>;
}

impl<F> SafetyScorer for F
where
    F: FnMut(&Cell) -> Option<SafetyScore>,
{
    fn score(&mut self, cell: &Cell) -> Option<SafetyScore> {
        self(cell)
    }
}

/// Uniformly random placeholder scores in `20..100`.
pub struct RandomScorer {
    rng: StdRng,
}

impl RandomScorer {
    /// Lowest score the placeholder produces.
    pub const MIN: u8 = 20;
    /// Exclusive upper bound of the placeholder scores.
    pub const MAX_EXCLUSIVE: u8 = 100;

    /// Creates a scorer seeded from OS entropy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible scorer.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl SafetyScorer for RandomScorer {
    fn score(&mut self, _cell: &Cell) -> Option<SafetyScore> {
        let value = self.rng.gen_range(Self::MIN..Self::MAX_EXCLUSIVE);
        SafetyScore::new(value).ok()
    }
}

/// Gives every cell the same score.
#[derive(Debug, Clone, Copy)]
pub struct FixedScorer(pub SafetyScore);

impl SafetyScorer for FixedScorer {
    fn score(&mut self, _cell: &Cell) -> Option<SafetyScore> {
        Some(self.0)
    }
}

/// Returns a copy of `grid` with every cell scored by `scorer`.
///
/// Cell geometry and order are unchanged. Existing scores are replaced.
#[must_use]
pub fn score_grid<S: SafetyScorer + ?Sized>(grid: &Grid, scorer: &mut S) -> Grid {
    let cells: Vec<Cell> = grid
        .iter()
        .map(|cell| cell.with_score(scorer.score(cell)))
        .collect();

    let unscored = cells.iter().filter(|c| c.safety_score.is_none()).count();
    if unscored > 0 {
        log::debug!("{unscored} of {} cells left without a score", cells.len());
    }
    log::info!("Scored {} grid cells", cells.len());

    Grid::new(grid.cell_size_km(), cells)
}

#[cfg(test)]
mod tests {
    use geo::polygon;
    use safe_route_grid_models::CellId;

    use super::*;

    fn grid_of(n: u32) -> Grid {
        let cells = (0..n)
            .map(|i| {
                let x = f64::from(i);
                Cell::new(
                    CellId { column: i, row: 0 },
                    polygon![
                        (x: x, y: 0.0),
                        (x: x + 1.0, y: 0.0),
                        (x: x + 1.0, y: 1.0),
                        (x: x, y: 1.0),
                        (x: x, y: 0.0),
                    ],
                )
            })
            .collect();
        Grid::new(0.5, cells)
    }

    #[test]
    fn random_scores_stay_in_range() {
        let grid = grid_of(500);
        let scored = score_grid(&grid, &mut RandomScorer::new());
        assert!(scored.is_scored());
        for cell in &scored {
            let value = cell.safety_score.unwrap().value();
            assert!((20..100).contains(&value), "score {value} out of range");
        }
    }

    #[test]
    fn seeded_scores_are_reproducible() {
        let grid = grid_of(50);
        let a = score_grid(&grid, &mut RandomScorer::seeded(7));
        let b = score_grid(&grid, &mut RandomScorer::seeded(7));
        assert_eq!(a, b);
    }

    #[test]
    fn scoring_keeps_geometry_and_input() {
        let grid = grid_of(10);
        let scored = score_grid(&grid, &mut FixedScorer(SafetyScore::MAX));

        assert!(!grid.is_scored());
        assert_eq!(scored.len(), grid.len());
        for (before, after) in grid.iter().zip(scored.iter()) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.polygon, after.polygon);
            assert_eq!(after.safety_score, Some(SafetyScore::MAX));
        }
    }

    #[test]
    fn closures_are_scorers() {
        let grid = grid_of(4);
        let scored = score_grid(&grid, &mut |cell: &Cell| {
            if cell.id.column % 2 == 0 {
                SafetyScore::new(90).ok()
            } else {
                None
            }
        });

        let scores: Vec<Option<u8>> = scored
            .iter()
            .map(|c| c.safety_score.map(SafetyScore::value))
            .collect();
        assert_eq!(scores, vec![Some(90), None, Some(90), None]);
    }

    #[test]
    fn rescoring_replaces_scores() {
        let grid = grid_of(3);
        let first = score_grid(&grid, &mut FixedScorer(SafetyScore::FALLBACK));
        let second = score_grid(&first, &mut FixedScorer(SafetyScore::MAX));
        assert!(second.iter().all(|c| c.safety_score == Some(SafetyScore::MAX)));
    }
}
