use crate::domain::ConfidenceBand;

pub const FALLBACK_WARNING: &str = "تحليل بسيط باستخدام الكلمات المفتاحية";
const NO_INDICATORS_REASON: &str = "لا توجد مؤشرات واضحة للتصيد";

const PHISHING_PHRASES: [&str; 9] = [
    "verify account",
    "suspended account",
    "click here immediately",
    "confirm your password",
    "update payment",
    "urgent action",
    "verify your identity",
    "unusual activity",
    "limited time",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordScore {
    pub matches: usize,
    pub is_phishing: bool,
    pub confidence_band: ConfidenceBand,
}

impl KeywordScore {
    pub fn reason(&self) -> String {
        if self.is_phishing {
            format!("تم اكتشاف {} مؤشرات للتصيد", self.matches)
        } else {
            NO_INDICATORS_REASON.to_string()
        }
    }
}

pub fn score(text: &str) -> KeywordScore {
    let lower = text.to_lowercase();
    let matches = PHISHING_PHRASES
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .count();

    let confidence_band = if matches >= 3 {
        ConfidenceBand::High
    } else if matches >= 1 {
        ConfidenceBand::Medium
    } else {
        ConfidenceBand::Low
    };

    KeywordScore {
        matches,
        is_phishing: matches >= 2,
        confidence_band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_scores_low() {
        let result = score("Minutes from yesterday's planning meeting");
        assert_eq!(result.matches, 0);
        assert!(!result.is_phishing);
        assert_eq!(result.confidence_band, ConfidenceBand::Low);
        assert_eq!(result.reason(), NO_INDICATORS_REASON);
    }

    #[test]
    fn single_phrase_is_medium_but_not_phishing() {
        let result = score("Offer valid for a LIMITED TIME");
        assert_eq!(result.matches, 1);
        assert!(!result.is_phishing);
        assert_eq!(result.confidence_band, ConfidenceBand::Medium);
    }

    #[test]
    fn two_phrases_are_phishing() {
        let result = score("Unusual activity detected. Update payment details.");
        assert_eq!(result.matches, 2);
        assert!(result.is_phishing);
        assert_eq!(result.confidence_band, ConfidenceBand::Medium);
        assert_eq!(result.reason(), "تم اكتشاف 2 مؤشرات للتصيد");
    }

    #[test]
    fn three_phrases_are_high() {
        let result = score("urgent action needed: verify account, click here immediately");
        assert_eq!(result.matches, 3);
        assert!(result.is_phishing);
        assert_eq!(result.confidence_band, ConfidenceBand::High);
    }

    #[test]
    fn repeated_phrase_counts_once() {
        let result = score("limited time limited time limited time");
        assert_eq!(result.matches, 1);
        assert!(!result.is_phishing);
    }

    #[test]
    fn never_reaches_very_high() {
        let all = PHISHING_PHRASES.join(" ");
        let result = score(&all);
        assert_eq!(result.matches, PHISHING_PHRASES.len());
        assert_eq!(result.confidence_band, ConfidenceBand::High);
    }

    #[test]
    fn appending_phrases_keeps_verdict() {
        let mut text = String::from("verify account and urgent action");
        assert!(score(&text).is_phishing);
        for phrase in PHISHING_PHRASES {
            text.push(' ');
            text.push_str(phrase);
            assert!(score(&text).is_phishing);
        }
    }
}
