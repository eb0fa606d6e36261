pub mod heuristic;
pub mod normalizer;
pub mod policy;
pub mod warning_signs;

use thiserror::Error;

pub use policy::PhishingAnalyzer;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("الرجاء إدخال موضوع أو محتوى الإيميل")]
    InvalidInput,
    #[error("حدث خطأ في التحليل: {0}")]
    Internal(String),
}
