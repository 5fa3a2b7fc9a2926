//! Disease classification: label tables, image preprocessing and the
//! classifier itself, including the degraded mode used when no model
//! artifact can be loaded.

mod classifier;
mod labels;
mod preprocess;

pub use classifier::{Classifier, Prediction, PredictionSource, FALLBACK_LABELS};
pub use labels::{DiseaseInfo, LabelTables};
pub use preprocess::{image_to_tensor, PreprocessError, INPUT_SIZE};
