use serde::Serialize;

/// Points for a single cleared row; each further simultaneous row doubles the award.
const SINGLE_ROW_SCORE: i64 = 50;

/// Returns the score for clearing `rows_cleared` rows with one placement.
///
/// 0 rows score 0; otherwise the score is `50 * 2^(rows_cleared - 1)`, saturating at
/// [`i64::MAX`].
///
/// ```
/// use tetrofit_engine::immediate_score;
///
/// let scores: Vec<i64> = (0..=4).map(immediate_score).collect();
/// assert_eq!(scores, [0, 50, 100, 200, 400]);
/// ```
#[must_use]
pub fn immediate_score(rows_cleared: usize) -> i64 {
    if rows_cleared == 0 {
        return 0;
    }
    u32::try_from(rows_cleared - 1)
        .ok()
        .and_then(|exp| 2_i64.checked_pow(exp))
        .and_then(|factor| factor.checked_mul(SINGLE_ROW_SCORE))
        .unwrap_or(i64::MAX)
}

/// Statistics of a sequence of committed placements.
///
/// - **Pieces placed**: number of committed placements
/// - **Score**: sum of the scores returned for each placement
/// - **Rows cleared**: total rows cleared, plus a histogram by rows cleared at once
///
/// # Example
///
/// ```
/// use tetrofit_engine::SessionStats;
///
/// let mut stats = SessionStats::new();
/// stats.record_placement(2, 95);
/// stats.record_placement(0, -12);
///
/// assert_eq!(stats.pieces_placed(), 2);
/// assert_eq!(stats.total_score(), 83);
/// assert_eq!(stats.total_rows_cleared(), 2);
/// assert_eq!(stats.clear_counts(), [1, 0, 1]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionStats {
    pieces_placed: usize,
    total_score: i64,
    total_rows_cleared: usize,
    clear_counts: Vec<usize>,
}

impl SessionStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pieces_placed: 0,
            total_score: 0,
            total_rows_cleared: 0,
            clear_counts: Vec::new(),
        }
    }

    #[must_use]
    pub const fn pieces_placed(&self) -> usize {
        self.pieces_placed
    }

    /// Sum of returned placement scores (immediate score minus penalty), saturating.
    #[must_use]
    pub const fn total_score(&self) -> i64 {
        self.total_score
    }

    #[must_use]
    pub const fn total_rows_cleared(&self) -> usize {
        self.total_rows_cleared
    }

    /// Returns a histogram of placements by rows cleared.
    ///
    /// Index `n` holds the number of placements that cleared exactly `n` rows. The
    /// histogram is as long as the largest clear seen so far plus one.
    #[must_use]
    pub fn clear_counts(&self) -> &[usize] {
        &self.clear_counts
    }

    /// Updates statistics after a placement is committed.
    pub fn record_placement(&mut self, rows_cleared: usize, score: i64) {
        self.pieces_placed += 1;
        self.total_score = self.total_score.saturating_add(score);
        self.total_rows_cleared += rows_cleared;
        if self.clear_counts.len() <= rows_cleared {
            self.clear_counts.resize(rows_cleared + 1, 0);
        }
        self.clear_counts[rows_cleared] += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_score_doubles() {
        assert_eq!(immediate_score(0), 0);
        assert_eq!(immediate_score(1), 50);
        assert_eq!(immediate_score(2), 100);
        assert_eq!(immediate_score(3), 200);
        assert_eq!(immediate_score(4), 400);
        assert_eq!(immediate_score(10), 50 * 512);
    }

    #[test]
    fn test_immediate_score_saturates() {
        assert_eq!(immediate_score(64), i64::MAX);
        assert_eq!(immediate_score(usize::MAX), i64::MAX);
    }

    #[test]
    fn test_new_stats_are_empty() {
        let stats = SessionStats::new();
        assert_eq!(stats, SessionStats::default());
        assert_eq!(stats.pieces_placed(), 0);
        assert_eq!(stats.total_score(), 0);
        assert!(stats.clear_counts().is_empty());
    }

    #[test]
    fn test_record_placement_grows_histogram() {
        let mut stats = SessionStats::new();
        stats.record_placement(0, -3);
        assert_eq!(stats.clear_counts(), [1]);
        stats.record_placement(4, 400);
        stats.record_placement(4, 390);
        assert_eq!(stats.clear_counts(), [1, 0, 0, 0, 2]);
        assert_eq!(stats.total_rows_cleared(), 8);
        assert_eq!(stats.total_score(), 787);
        assert_eq!(stats.pieces_placed(), 3);
    }
}
