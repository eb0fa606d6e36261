use crate::{
    ai::ClassifierAdapter,
    domain::{
        types::format_percent, AnalysisResult, ClassifierVerdict, ConfidenceBand, EmailInput,
        ModelUsed,
    },
};

use super::{heuristic, normalizer, warning_signs, AnalysisError};

/// Chooses between the trained classifier and the keyword heuristic per request.
#[derive(Clone)]
pub struct PhishingAnalyzer {
    classifier: Option<ClassifierAdapter>,
}

impl PhishingAnalyzer {
    pub fn new(classifier: Option<ClassifierAdapter>) -> Self {
        Self { classifier }
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn model_name(&self) -> Option<&str> {
        self.classifier.as_ref().map(|c| c.name())
    }

    pub fn analyze(&self, input: &EmailInput) -> Result<AnalysisResult, AnalysisError> {
        if input.is_empty() {
            return Err(AnalysisError::InvalidInput);
        }
        let full_email = input.combined();

        if let Some(classifier) = &self.classifier {
            let normalized = normalizer::normalize(&full_email);
            match classifier.verdict(&normalized) {
                Ok(verdict) => return Ok(model_result(&full_email, verdict)),
                Err(err) => {
                    tracing::warn!(
                        target: "analysis",
                        error = %err,
                        model = classifier.name(),
                        "classifier failed; using keyword fallback"
                    );
                }
            }
        }

        Ok(keyword_result(&full_email))
    }
}

fn model_result(full_email: &str, verdict: ClassifierVerdict) -> AnalysisResult {
    let confidence = format_percent(verdict.probability);
    let reason = if verdict.is_phishing {
        format!("نموذج الذكاء الاصطناعي يتوقع أن هذا إيميل تصيد احتيالي بدرجة ثقة {confidence}")
    } else {
        format!("نموذج الذكاء الاصطناعي يتوقع أن هذا إيميل آمن بدرجة ثقة {confidence}")
    };

    AnalysisResult {
        is_phishing: verdict.is_phishing,
        confidence_band: ConfidenceBand::from_probability(verdict.probability),
        reason,
        warning_signs: warning_signs::extract(full_email),
        model_used: ModelUsed::MlModel,
        ml_probability: Some(verdict.probability),
    }
}

// The rule-based extractor is not run here; fallback results carry one fixed sign.
fn keyword_result(full_email: &str) -> AnalysisResult {
    let score = heuristic::score(full_email);
    AnalysisResult {
        is_phishing: score.is_phishing,
        confidence_band: score.confidence_band,
        reason: score.reason(),
        warning_signs: vec![heuristic::FALLBACK_WARNING.to_string()],
        model_used: ModelUsed::KeywordFallback,
        ml_probability: None,
    }
}
