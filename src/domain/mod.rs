pub mod email;
pub mod types;

pub use email::EmailInput;
pub use types::{AnalysisResult, ClassifierVerdict, ConfidenceBand, ModelUsed, NormalizedText};
