//! Route safety aggregation.

use safe_route_grid_models::Cell;
use safe_route_planner_models::{SafetyLevel, SafetySummary, ScoreBucket};

/// Reduces the cells a route crosses to a [`SafetySummary`].
///
/// Unscored cells count with the fallback score of 50. The average is the
/// mean score rounded to the nearest integer, halves rounding up. No cells
/// at all yield [`SafetySummary::UNKNOWN`].
#[must_use]
pub fn summarize<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> SafetySummary {
    let mut total: u64 = 0;
    let mut count: u64 = 0;
    let mut safe_cells_count = 0;
    let mut moderate_cells_count = 0;
    let mut unsafe_cells_count = 0;

    for cell in cells {
        let score = cell.effective_score();
        total += u64::from(score.value());
        count += 1;

        match ScoreBucket::from_score(score) {
            ScoreBucket::Safe => safe_cells_count += 1,
            ScoreBucket::Moderate => moderate_cells_count += 1,
            ScoreBucket::Unsafe => unsafe_cells_count += 1,
        }
    }

    if count == 0 {
        return SafetySummary::UNKNOWN;
    }

    let average = (2 * total + count) / (2 * count);
    let average_score = u8::try_from(average).unwrap_or(u8::MAX);

    SafetySummary {
        average_score,
        safe_cells_count,
        moderate_cells_count,
        unsafe_cells_count,
        safety_level: SafetyLevel::from_average(average_score),
    }
}

#[cfg(test)]
mod tests {
    use geo::polygon;
    use safe_route_grid_models::{CellId, SafetyScore};

    use super::*;

    fn cells(scores: &[Option<u8>]) -> Vec<Cell> {
        scores
            .iter()
            .zip(0..)
            .map(|(score, column)| {
                Cell::new(
                    CellId { column, row: 0 },
                    polygon![
                        (x: 0.0, y: 0.0),
                        (x: 1.0, y: 0.0),
                        (x: 1.0, y: 1.0),
                        (x: 0.0, y: 1.0),
                        (x: 0.0, y: 0.0),
                    ],
                )
                .with_score(score.and_then(|v| SafetyScore::new(v).ok()))
            })
            .collect()
    }

    #[test]
    fn no_cells_is_unknown() {
        let summary = summarize(&cells(&[]));
        assert_eq!(summary, SafetySummary::UNKNOWN);
        assert_eq!(summary.safety_level, SafetyLevel::Unknown);
        assert_eq!(summary.average_score, 0);
    }

    #[test]
    fn single_safe_cell() {
        let summary = summarize(&cells(&[Some(85)]));
        assert_eq!(summary.average_score, 85);
        assert_eq!(summary.safe_cells_count, 1);
        assert_eq!(summary.safety_level, SafetyLevel::HighSafety);
    }

    #[test]
    fn buckets_and_average() {
        let summary = summarize(&cells(&[
            Some(90),
            Some(70),
            Some(55),
            Some(40),
            Some(39),
            Some(10),
        ]));
        assert_eq!(summary.safe_cells_count, 2);
        assert_eq!(summary.moderate_cells_count, 2);
        assert_eq!(summary.unsafe_cells_count, 2);
        // (90 + 70 + 55 + 40 + 39 + 10) / 6 = 50.67
        assert_eq!(summary.average_score, 51);
        assert_eq!(summary.safety_level, SafetyLevel::ModerateSafety);
        assert_eq!(summary.total_cells(), 6);
    }

    #[test]
    fn half_rounds_up() {
        // 45 / 2 = 22.5
        assert_eq!(summarize(&cells(&[Some(20), Some(25)])).average_score, 23);
        // 149 / 2 = 74.5
        assert_eq!(summarize(&cells(&[Some(74), Some(75)])).average_score, 75);
    }

    #[test]
    fn rounds_down_below_half() {
        // 100 / 3 = 33.33
        assert_eq!(
            summarize(&cells(&[Some(30), Some(30), Some(40)])).average_score,
            33
        );
    }

    #[test]
    fn missing_scores_count_as_fifty() {
        let summary = summarize(&cells(&[None, Some(90)]));
        assert_eq!(summary.average_score, 70);
        assert_eq!(summary.moderate_cells_count, 1);
        assert_eq!(summary.safe_cells_count, 1);
    }

    #[test]
    fn zero_is_a_real_score() {
        let summary = summarize(&cells(&[Some(0), Some(0)]));
        assert_eq!(summary.average_score, 0);
        assert_eq!(summary.unsafe_cells_count, 2);
        assert_eq!(summary.safety_level, SafetyLevel::HighRisk);
    }

    #[test]
    fn levels_follow_average() {
        assert_eq!(
            summarize(&cells(&[Some(35)])).safety_level,
            SafetyLevel::LowSafety
        );
        assert_eq!(
            summarize(&cells(&[Some(29)])).safety_level,
            SafetyLevel::HighRisk
        );
    }
}
