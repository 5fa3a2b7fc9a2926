//! # The disease classifier
//!
//! [`Classifier::load`] tries the pre-trained ONNX artifacts in order — the
//! full-precision model first, then the quantized variant — and falls back to
//! [`Classifier::Fallback`] when neither loads. The fallback produces random
//! placeholder predictions with the same shape as real ones, tagged with
//! [`PredictionSource::Fallback`] so callers and tests can tell the two modes
//! apart.
//!
//! [`Classifier::predict`] never fails: preprocessing or inference errors
//! degrade into a `label = "Error"`, `confidence = 0.0` record carrying the
//! failure text in the remedy field. One image in, one synchronous
//! prediction out; no batching, no caching.

use std::path::Path;

use rand::Rng;
use tract_onnx::prelude::*;

use crate::labels::LabelTables;
use crate::preprocess::{self, INPUT_SIZE};

/// Labels the degraded mode draws from when no model is available.
pub const FALLBACK_LABELS: [&str; 4] = [
    "Healthy Leaf",
    "Powdery Mildew",
    "Leaf Spot",
    "Rust Disease",
];

const FALLBACK_REMEDY: &str = "Degraded mode - no remedy available";

type OnnxPlan = SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>;

/// Which path produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionSource {
    /// A forward pass through the loaded model.
    Model,
    /// The random placeholder path; no model was available.
    Fallback,
}

/// One classification result.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Maximum class score, always within `[0, 1]`.
    pub confidence: f32,
    pub remedy: String,
    pub source: PredictionSource,
}

pub enum Classifier {
    /// A pre-trained model loaded from disk.
    Model(OnnxPlan),
    /// No usable model artifact; predictions are random placeholders.
    Fallback,
}

impl Classifier {
    /// Artifact filenames tried in order: full precision, then quantized.
    const ARTIFACTS: [&'static str; 2] = ["model.onnx", "model.int8.onnx"];

    /// Load a classifier from `dir`. Load failures are an operator concern:
    /// they are logged and the classifier degrades to the fallback mode
    /// rather than failing startup.
    pub fn load(dir: &Path) -> Self {
        for name in Self::ARTIFACTS {
            let path = dir.join(name);
            if !path.exists() {
                continue;
            }
            match load_artifact(&path) {
                Ok(plan) => {
                    tracing::info!("loaded classifier from {}", path.display());
                    return Classifier::Model(plan);
                }
                Err(e) => {
                    tracing::warn!("classifier artifact {} failed to load: {e}", path.display());
                }
            }
        }
        tracing::warn!(
            "no usable classifier in {}, using random placeholder predictions",
            dir.display()
        );
        Classifier::Fallback
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Classifier::Fallback)
    }

    /// Classify one image. Every failure path degrades into the returned
    /// record; this never panics and never returns an error.
    pub fn predict(&self, bytes: &[u8], tables: &LabelTables) -> Prediction {
        match self {
            Classifier::Fallback => fallback_prediction(),
            Classifier::Model(plan) => run_model(plan, bytes, tables).unwrap_or_else(|e| {
                tracing::warn!("prediction failed: {e}");
                error_prediction(&e)
            }),
        }
    }
}

fn load_artifact(path: &Path) -> TractResult<OnnxPlan> {
    let side = INPUT_SIZE as usize;
    tract_onnx::onnx()
        .model_for_path(path)?
        .with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), tvec!(1, side, side, 3)))?
        .into_optimized()?
        .into_runnable()
}

fn run_model(plan: &OnnxPlan, bytes: &[u8], tables: &LabelTables) -> Result<Prediction, String> {
    let input = preprocess::image_to_tensor(bytes).map_err(|e| e.to_string())?;
    let outputs = plan
        .run(tvec!(input.into()))
        .map_err(|e| e.to_string())?;
    let view = outputs[0]
        .to_array_view::<f32>()
        .map_err(|e| e.to_string())?;
    let scores: Vec<f32> = view.iter().copied().collect();
    interpret(&scores, tables).ok_or_else(|| "model produced no usable scores".to_string())
}

/// The record a failed model-path prediction degrades into.
fn error_prediction(msg: &str) -> Prediction {
    Prediction {
        label: "Error".to_string(),
        confidence: 0.0,
        remedy: format!("Prediction failed: {msg}"),
        source: PredictionSource::Model,
    }
}

/// Turn one forward pass worth of scores into a labelled prediction: argmax
/// index selects the class, the maximum score (assumed softmax output,
/// clamped to `[0, 1]`) is the confidence.
fn interpret(scores: &[f32], tables: &LabelTables) -> Option<Prediction> {
    let (idx, &max) = scores
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    // NaN sorts above every finite score under total_cmp; a non-finite
    // winner means the output is unusable, not that some class won.
    if !max.is_finite() {
        return None;
    }
    Some(Prediction {
        label: tables.display_name(idx),
        confidence: max.clamp(0.0, 1.0),
        remedy: tables.remedy(idx),
        source: PredictionSource::Model,
    })
}

fn fallback_prediction() -> Prediction {
    let mut rng = rand::thread_rng();
    let label = FALLBACK_LABELS[rng.gen_range(0..FALLBACK_LABELS.len())];
    Prediction {
        label: label.to_string(),
        confidence: rng.gen_range(0.80..0.97),
        remedy: FALLBACK_REMEDY.to_string(),
        source: PredictionSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::DiseaseInfo;
    use std::collections::HashMap;

    fn sample_tables() -> LabelTables {
        let class_map = HashMap::from([("0".to_string(), "Tomato___healthy".to_string())]);
        let disease_info = HashMap::from([(
            "0".to_string(),
            DiseaseInfo {
                solution: Some("No action needed".to_string()),
                ..Default::default()
            },
        )]);
        LabelTables::new(class_map, disease_info)
    }

    #[test]
    fn interpret_maps_argmax_through_the_tables() {
        let p = interpret(&[0.92, 0.05, 0.03], &sample_tables()).unwrap();
        assert_eq!(p.label, "Tomato___healthy");
        assert!((p.confidence - 0.92).abs() < 1e-6);
        assert_eq!(p.remedy, "No action needed");
        assert_eq!(p.source, PredictionSource::Model);
    }

    #[test]
    fn interpret_uses_placeholders_for_unknown_indices() {
        let scores = [0.01, 0.02, 0.01, 0.02, 0.01, 0.93];
        let p = interpret(&scores, &LabelTables::default()).unwrap();
        assert_eq!(p.label, "Class_5");
        assert_eq!(p.remedy, "No remedy available");
    }

    #[test]
    fn interpret_clamps_confidence_and_rejects_empty_scores() {
        let p = interpret(&[1.4], &LabelTables::default()).unwrap();
        assert_eq!(p.confidence, 1.0);
        assert!(interpret(&[], &LabelTables::default()).is_none());
    }

    #[test]
    fn interpret_rejects_non_finite_winning_scores() {
        let tables = LabelTables::default();
        assert!(interpret(&[0.2, f32::NAN], &tables).is_none());
        assert!(interpret(&[f32::INFINITY, 0.1], &tables).is_none());
        // A NaN that loses the argmax does not poison the result.
        let p = interpret(&[0.9, f32::NEG_INFINITY], &tables).unwrap();
        assert!((p.confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn model_path_failures_degrade_into_an_error_record() {
        let p = error_prediction("could not decode image: bad magic");
        assert_eq!(p.label, "Error");
        assert_eq!(p.confidence, 0.0);
        assert_eq!(
            p.remedy,
            "Prediction failed: could not decode image: bad magic"
        );
        assert_eq!(p.source, PredictionSource::Model);
    }

    #[test]
    fn fallback_predictions_stay_within_the_contract() {
        let classifier = Classifier::Fallback;
        let tables = LabelTables::default();
        for _ in 0..50 {
            // The fallback does not look at the image, so undecodable bytes
            // are fine here.
            let p = classifier.predict(b"not an image", &tables);
            assert!(FALLBACK_LABELS.contains(&p.label.as_str()));
            assert!((0.0..=1.0).contains(&p.confidence));
            assert!(!p.remedy.is_empty());
            assert_eq!(p.source, PredictionSource::Fallback);
        }
    }

    #[test]
    fn load_from_empty_dir_degrades() {
        let dir = std::env::temp_dir().join(format!("cropsense_model_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let classifier = Classifier::load(&dir);
        assert!(classifier.is_degraded());

        // A garbage artifact is a load failure, not a panic.
        std::fs::write(dir.join("model.onnx"), b"not a model").unwrap();
        let classifier = Classifier::load(&dir);
        assert!(classifier.is_degraded());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
