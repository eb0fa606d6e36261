use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use thiserror::Error;

use crate::domain::{ClassifierVerdict, NormalizedText};

pub const PHISHING_LABEL: i64 = 1;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("model artifact not found at {0}")]
    NotFound(String),
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed model artifact: {0}")]
    Malformed(String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("classifier panicked during inference")]
    Panicked,
}

pub trait Classifier: Send + Sync {
    fn predict(&self, text: &str) -> Result<i64, ClassifierError>;

    fn predict_proba(&self, text: &str) -> Result<Vec<f64>, ClassifierError>;

    fn name(&self) -> &str;
}

/// Turns raw model output into a [`ClassifierVerdict`]. Every failure, a
/// panic inside the model included, comes back as an error value.
#[derive(Clone)]
pub struct ClassifierAdapter {
    inner: Arc<dyn Classifier>,
}

impl ClassifierAdapter {
    pub fn new(inner: Arc<dyn Classifier>) -> Self {
        Self { inner }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn verdict(&self, text: &NormalizedText) -> Result<ClassifierVerdict, ClassifierError> {
        let classifier = self.inner.as_ref();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let label = classifier.predict(text.as_str())?;
            let proba = classifier.predict_proba(text.as_str())?;
            Ok::<_, ClassifierError>((label, proba))
        }));
        let (label, proba) = outcome.map_err(|_| ClassifierError::Panicked)??;

        let probability = max_probability(&proba)?;
        Ok(ClassifierVerdict {
            is_phishing: label == PHISHING_LABEL,
            probability,
        })
    }
}

fn max_probability(proba: &[f64]) -> Result<f64, ClassifierError> {
    if proba.is_empty() {
        return Err(ClassifierError::Inference(
            "model returned no class probabilities".into(),
        ));
    }
    if let Some(bad) = proba.iter().find(|p| !p.is_finite() || **p < 0.0 || **p > 1.0) {
        return Err(ClassifierError::Inference(format!(
            "class probability out of range: {bad}"
        )));
    }
    Ok(proba.iter().copied().fold(0.0, f64::max))
}
