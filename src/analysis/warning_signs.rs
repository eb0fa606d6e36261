use once_cell::sync::Lazy;
use regex::Regex;

pub const NO_CLEAR_SIGNS: &str = "لم يتم اكتشاف علامات تحذير واضحة";

static CLICK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"click\s+(here|link)").expect("valid click regex"));

enum LatinMatch {
    Keywords(&'static [&'static str]),
    // Case-sensitive, against the text as written.
    RawKeywords(&'static [&'static str]),
    Pattern(&'static Lazy<Regex>),
}

struct WarningRule {
    latin: LatinMatch,
    arabic: &'static [&'static str],
    message: &'static str,
}

impl WarningRule {
    fn matches(&self, raw: &str, lower: &str) -> bool {
        let latin = match &self.latin {
            LatinMatch::Keywords(words) => words.iter().any(|word| lower.contains(word)),
            LatinMatch::RawKeywords(words) => words.iter().any(|word| raw.contains(word)),
            LatinMatch::Pattern(pattern) => pattern.is_match(lower),
        };
        latin || self.arabic.iter().any(|phrase| raw.contains(phrase))
    }
}

// Display order is significant.
static RULES: [WarningRule; 7] = [
    WarningRule {
        latin: LatinMatch::Keywords(&["verify", "confirm"]),
        arabic: &["تأكيد", "تحديث"],
        message: "طلب التحقق من البيانات الشخصية",
    },
    WarningRule {
        latin: LatinMatch::Keywords(&["urgent", "immediately"]),
        arabic: &["عاجل", "فوري"],
        message: "استخدام لغة الاستعجال والضغط",
    },
    WarningRule {
        latin: LatinMatch::Pattern(&CLICK_REGEX),
        arabic: &["اضغط هنا"],
        message: "طلب النقر على روابط مشبوهة",
    },
    WarningRule {
        latin: LatinMatch::Keywords(&["password"]),
        arabic: &["كلمة المرور", "كلمة السر"],
        message: "طلب معلومات حساسة",
    },
    WarningRule {
        latin: LatinMatch::RawKeywords(&["http://", "https://"]),
        arabic: &[],
        message: "يحتوي على روابط خارجية",
    },
    WarningRule {
        latin: LatinMatch::Keywords(&["account"]),
        arabic: &["حساب"],
        message: "يتعلق بمعلومات الحساب",
    },
    WarningRule {
        latin: LatinMatch::Keywords(&["prize", "winner"]),
        arabic: &["جائزة"],
        message: "وعود بجوائز أو مكاسب",
    },
];

/// Explains which suspicious patterns appear in the raw (un-normalized) email text.
/// Never returns an empty list.
pub fn extract(raw: &str) -> Vec<String> {
    let lower = raw.to_lowercase();
    let signs: Vec<String> = RULES
        .iter()
        .filter(|rule| rule.matches(raw, &lower))
        .map(|rule| rule.message.to_string())
        .collect();

    if signs.is_empty() {
        vec![NO_CLEAR_SIGNS.to_string()]
    } else {
        signs
    }
}
