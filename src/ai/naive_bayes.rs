use std::{collections::HashMap, fs, io::ErrorKind, path::Path};

use serde::Deserialize;

use super::classifier::{Classifier, ClassifierError};

#[derive(Debug, Clone, Deserialize)]
pub struct NaiveBayesModel {
    #[serde(default = "default_name")]
    name: String,
    classes: Vec<i64>,
    vocabulary: HashMap<String, usize>,
    class_log_prior: Vec<f64>,
    feature_log_prob: Vec<Vec<f64>>,
    #[serde(default = "default_ngram_range")]
    ngram_range: (usize, usize),
    /// Present when the vectorizer was TF-IDF rather than raw counts.
    #[serde(default)]
    idf: Option<Vec<f64>>,
}

fn default_name() -> String {
    "multinomial-nb".to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

impl NaiveBayesModel {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let raw = fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ClassifierError::NotFound(path.display().to_string()),
            _ => ClassifierError::Io(err),
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ClassifierError> {
        let model: Self =
            serde_json::from_str(raw).map_err(|err| ClassifierError::Malformed(err.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<(), ClassifierError> {
        let n_classes = self.classes.len();
        if n_classes < 2 {
            return Err(malformed(format!("expected at least 2 classes, got {n_classes}")));
        }
        if self.class_log_prior.len() != n_classes {
            return Err(malformed(format!(
                "class_log_prior has {} entries for {n_classes} classes",
                self.class_log_prior.len()
            )));
        }
        if self.feature_log_prob.len() != n_classes {
            return Err(malformed(format!(
                "feature_log_prob has {} rows for {n_classes} classes",
                self.feature_log_prob.len()
            )));
        }

        let n_features = self.feature_log_prob[0].len();
        if self.feature_log_prob.iter().any(|row| row.len() != n_features) {
            return Err(malformed("feature_log_prob rows differ in length".into()));
        }
        if let Some(index) = self.vocabulary.values().find(|index| **index >= n_features) {
            return Err(malformed(format!(
                "vocabulary index {index} exceeds {n_features} features"
            )));
        }
        if let Some(idf) = &self.idf {
            if idf.len() != n_features {
                return Err(malformed(format!(
                    "idf has {} entries for {n_features} features",
                    idf.len()
                )));
            }
        }

        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(malformed(format!("invalid ngram_range ({min_n}, {max_n})")));
        }

        let all_finite = self.class_log_prior.iter().all(|v| v.is_finite())
            && self.feature_log_prob.iter().flatten().all(|v| v.is_finite());
        if !all_finite {
            return Err(malformed("log probabilities must be finite".into()));
        }
        Ok(())
    }

    fn features(&self, text: &str) -> Vec<(usize, f64)> {
        let words: Vec<&str> = text.split_whitespace().filter(|w| w.len() >= 2).collect();
        let (min_n, max_n) = self.ngram_range;

        let mut counts: HashMap<usize, f64> = HashMap::new();
        for n in min_n..=max_n {
            for window in words.windows(n) {
                let term = window.join(" ");
                if let Some(&index) = self.vocabulary.get(&term) {
                    *counts.entry(index).or_insert(0.0) += 1.0;
                }
            }
        }

        let mut features: Vec<(usize, f64)> = counts.into_iter().collect();
        features.sort_unstable_by_key(|(index, _)| *index);

        if let Some(idf) = &self.idf {
            for (index, weight) in features.iter_mut() {
                *weight *= idf[*index];
            }
            let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, weight) in features.iter_mut() {
                    *weight /= norm;
                }
            }
        }
        features
    }

    fn joint_log_likelihood(&self, text: &str) -> Vec<f64> {
        let features = self.features(text);
        self.class_log_prior
            .iter()
            .zip(&self.feature_log_prob)
            .map(|(prior, row)| {
                prior
                    + features
                        .iter()
                        .map(|(index, weight)| weight * row[*index])
                        .sum::<f64>()
            })
            .collect()
    }
}

impl Classifier for NaiveBayesModel {
    fn predict(&self, text: &str) -> Result<i64, ClassifierError> {
        let proba = self.predict_proba(text)?;
        let best = proba
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (index, p)| {
                if *p > best.1 {
                    (index, *p)
                } else {
                    best
                }
            })
            .0;
        Ok(self.classes[best])
    }

    fn predict_proba(&self, text: &str) -> Result<Vec<f64>, ClassifierError> {
        let jll = self.joint_log_likelihood(text);
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if !max.is_finite() {
            return Err(ClassifierError::Inference(
                "joint log likelihood is not finite".into(),
            ));
        }
        let exp: Vec<f64> = jll.iter().map(|v| (v - max).exp()).collect();
        let total: f64 = exp.iter().sum();
        Ok(exp.into_iter().map(|v| v / total).collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn malformed(message: String) -> ClassifierError {
    ClassifierError::Malformed(message)
}
