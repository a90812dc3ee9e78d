//! Scoring of observing rows and selection of the best window.

use super::series::ObservingRow;

/// Pessimistic stand-in for a missing value; 100 is the worst possible
/// reading for both sky cover and precipitation probability, so a slot with
/// no data never beats a slot with any.
const MISSING_SENTINEL: f64 = 100.0;

/// The recommended observing slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub index: usize,
    pub score: f64,
}

/// Score one row. Lower is better.
pub fn score(row: &ObservingRow) -> f64 {
    let sky = row.sky_cover.unwrap_or(MISSING_SENTINEL);
    let precipitation = row.precipitation.unwrap_or(MISSING_SENTINEL);
    sky + 0.5 * precipitation
}

/// Pick the row with the lowest score; ties go to the earliest row.
pub fn best_window(rows: &[ObservingRow]) -> Option<Recommendation> {
    let mut best: Option<Recommendation> = None;
    for (index, row) in rows.iter().enumerate() {
        let score = score(row);
        match &best {
            Some(incumbent) if score >= incumbent.score => {}
            _ => best = Some(Recommendation { index, score }),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use crate::observing::interval::Interval;

    use super::*;

    fn row(sky: Option<f64>, precipitation: Option<f64>) -> ObservingRow {
        ObservingRow {
            interval: Interval::parse("2026-03-01T00:00:00+00:00/PT1H"),
            sky_cover: sky,
            precipitation,
            visibility: None,
        }
    }

    #[test]
    fn earliest_of_tied_scores_wins() {
        let rows = vec![
            row(Some(50.0), Some(0.0)),
            row(Some(30.0), Some(0.0)),
            row(Some(30.0), Some(0.0)),
            row(Some(40.0), Some(0.0)),
        ];
        let best = best_window(&rows).unwrap();
        assert_eq!(best.index, 1);
        assert_eq!(best.score, 30.0);
    }

    #[test]
    fn missing_values_score_as_worst_case() {
        let both_missing = row(None, None);
        assert_eq!(score(&both_missing), 150.0);

        let rows = vec![row(None, None), row(Some(90.0), Some(100.0))];
        assert_eq!(best_window(&rows).unwrap().index, 1);
    }

    #[test]
    fn empty_rows_have_no_window() {
        assert_eq!(best_window(&[]), None);
    }

    #[test]
    fn weighted_scoring() {
        let sky = [10.0, 20.0, 90.0, 15.0, 5.0, 100.0];
        let precip = [0.0, 0.0, 80.0, 10.0, 0.0, 5.0];
        let rows: Vec<ObservingRow> = sky
            .iter()
            .zip(precip.iter())
            .map(|(&s, &p)| row(Some(s), Some(p)))
            .collect();

        let best = best_window(&rows).unwrap();
        assert_eq!(best.index, 4);
        assert_eq!(best.score, 5.0);
    }
}
