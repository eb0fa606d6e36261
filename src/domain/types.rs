use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub(crate) fn new(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierVerdict {
    pub is_phishing: bool,
    /// Probability of the predicted class, whichever class that is.
    pub probability: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceBand {
    VeryHigh,
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 0.9 {
            ConfidenceBand::VeryHigh
        } else if probability >= 0.75 {
            ConfidenceBand::High
        } else if probability >= 0.6 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::VeryHigh => "عالية جداً",
            ConfidenceBand::High => "عالية",
            ConfidenceBand::Medium => "متوسطة",
            ConfidenceBand::Low => "منخفضة",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelUsed {
    MlModel,
    KeywordFallback,
}

impl ModelUsed {
    pub fn label(&self) -> &'static str {
        match self {
            ModelUsed::MlModel => "ML Model (Naive Bayes)",
            ModelUsed::KeywordFallback => "Keyword-based (Fallback)",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub is_phishing: bool,
    pub confidence_band: ConfidenceBand,
    pub reason: String,
    pub warning_signs: Vec<String>,
    pub model_used: ModelUsed,
    pub ml_probability: Option<f64>,
}

pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
