//! Session layout.
//!
//! A session carries at most two values: the logged-in user snapshot under
//! [`SESSION_USER_KEY`] and the prediction history under
//! [`SESSION_HISTORY_KEY`]. A session counts as logged in exactly when the
//! user snapshot is present; logout flushes the whole session, dropping both.
//! Nothing here survives a server restart.

use crate::models::PredictionInfo;

/// Key for the logged-in user snapshot in the session.
pub const SESSION_USER_KEY: &str = "user";

/// Key for the prediction history in the session.
pub const SESSION_HISTORY_KEY: &str = "history";

/// Bound on the per-session history; oldest entries are dropped first.
pub const HISTORY_LIMIT: usize = 25;

/// Append a record, keeping the history within [`HISTORY_LIMIT`].
pub fn push_history(history: &mut Vec<PredictionInfo>, record: PredictionInfo) {
    history.push(record);
    if history.len() > HISTORY_LIMIT {
        let excess = history.len() - HISTORY_LIMIT;
        history.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tag: usize) -> PredictionInfo {
        PredictionInfo {
            disease: format!("disease-{tag}"),
            confidence: "90.00%".to_string(),
            datetime: "2026-01-01 00:00:00".to_string(),
            remedy: "none".to_string(),
            degraded: false,
        }
    }

    #[test]
    fn history_appends_in_order() {
        let mut history = Vec::new();
        for i in 0..3 {
            push_history(&mut history, record(i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].disease, "disease-0");
        assert_eq!(history[2].disease, "disease-2");
    }

    #[test]
    fn history_drops_oldest_beyond_the_limit() {
        let mut history = Vec::new();
        for i in 0..HISTORY_LIMIT + 5 {
            push_history(&mut history, record(i));
        }
        assert_eq!(history.len(), HISTORY_LIMIT);
        assert_eq!(history[0].disease, "disease-5");
        assert_eq!(
            history[HISTORY_LIMIT - 1].disease,
            format!("disease-{}", HISTORY_LIMIT + 4)
        );
    }
}
