pub mod classifier;
pub mod naive_bayes;

pub use classifier::{Classifier, ClassifierAdapter, ClassifierError};
pub use naive_bayes::NaiveBayesModel;
