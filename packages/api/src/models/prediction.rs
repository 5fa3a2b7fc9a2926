//! Detection results as shown to the user and kept in the session history.

use serde::{Deserialize, Serialize};

/// One detection result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionInfo {
    pub disease: String,
    /// Pre-formatted percentage, e.g. `"92.35%"`.
    pub confidence: String,
    pub datetime: String,
    pub remedy: String,
    /// True when the degraded fallback produced this result instead of the
    /// model.
    pub degraded: bool,
}

#[cfg(feature = "server")]
impl PredictionInfo {
    /// Stamp a raw classifier prediction with the current local time.
    pub fn from_prediction(p: &model::Prediction) -> Self {
        Self {
            disease: p.label.clone(),
            confidence: format!("{:.2}%", p.confidence * 100.0),
            datetime: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            remedy: p.remedy.clone(),
            degraded: p.source == model::PredictionSource::Fallback,
        }
    }
}
