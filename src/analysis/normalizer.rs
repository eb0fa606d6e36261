use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::NormalizedText;

static URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+|www\S+|https\S+").expect("valid url regex"));
static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+").expect("valid email regex"));
static HTML_TAG_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<.*?>").expect("valid html tag regex"));
static NON_LETTER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z\s]").expect("valid letter regex"));

/// Maps raw email text to the token stream the classifier was trained on.
///
/// Non-Latin script (Arabic included) is dropped entirely. The pass repeats
/// until stable, because stripping characters can splice a fresh `http` or
/// `www` token together (`ht1tpx` becomes `httpx`).
pub fn normalize(raw: &str) -> NormalizedText {
    let mut current = normalize_once(raw);
    loop {
        let next = normalize_once(&current);
        if next == current {
            return NormalizedText::new(current);
        }
        current = next;
    }
}

fn normalize_once(raw: &str) -> String {
    // U+001C..U+001F separate words in the training tokenizer but are not `\s` here.
    let text: String = raw
        .to_lowercase()
        .chars()
        .map(|ch| if ('\u{1c}'..='\u{1f}').contains(&ch) { ' ' } else { ch })
        .collect();
    let text = URL_REGEX.replace_all(&text, "");
    let text = EMAIL_REGEX.replace_all(&text, "");
    let text = HTML_TAG_REGEX.replace_all(&text, "");
    let text = NON_LETTER_REGEX.replace_all(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(raw: &str) -> String {
        normalize(raw).as_str().to_string()
    }

    #[test]
    fn strips_digits_and_punctuation() {
        assert_eq!(norm("Verify123 now!!"), "verify now");
    }

    #[test]
    fn removes_urls_and_emails() {
        assert_eq!(norm("go to http://x.com or a@b.com"), "go to or");
        assert_eq!(norm("visit www.bank-login.com today"), "visit today");
        assert_eq!(norm("HTTPS://Secure.example/login now"), "now");
    }

    #[test]
    fn removes_html_tags() {
        assert_eq!(
            norm("<p>Your <b>account</b> is locked</p>"),
            "your account is locked"
        );
    }

    #[test]
    fn drops_arabic_script() {
        assert_eq!(norm("تحديث الحساب update now"), "update now");
        assert_eq!(norm("عاجل جداً"), "");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(norm("  hello \n\t  world  "), "hello world");
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(norm(""), "");
    }

    #[test]
    fn is_idempotent() {
        let samples = [
            "URGENT: verify your account at http://evil.example now!!!",
            "<div>Hello  Bob,</div> see you at 5pm - alice@example.com",
            "ht1tpx spliced token",
            "w.w.w-trick and more",
            "مرحبا Dear customer, your password expires",
            "",
        ];
        for sample in samples {
            let once = normalize(sample);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn spliced_url_token_is_removed() {
        assert_eq!(norm("ht1tpx spliced token"), "spliced token");
        assert_eq!(norm("ht1tp stays"), "http stays");
    }

    #[test]
    fn information_separators_split_words() {
        assert_eq!(norm("a\u{1f}b verify"), "a b verify");
        assert_eq!(norm("click\u{1c}here"), "click here");
    }
}
