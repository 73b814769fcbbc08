//! CLDR cardinal plural selection for the formatter.
//!
//! This is a curated subset of CLDR rules covering common locales. Unknown
//! languages select [`PluralCategory::Other`] for every number.

use std::{collections::HashMap, fmt::Display, str::FromStr};

use lazy_static::lazy_static;
use unic_langid::LanguageIdentifier;

/// Standard CLDR plural forms.
#[derive(Ord, PartialOrd, Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum PluralCategory {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl FromStr for PluralCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ZERO" => Ok(PluralCategory::Zero),
            "ONE" => Ok(PluralCategory::One),
            "TWO" => Ok(PluralCategory::Two),
            "FEW" => Ok(PluralCategory::Few),
            "MANY" => Ok(PluralCategory::Many),
            "OTHER" => Ok(PluralCategory::Other),
            _ => Err(format!("Unknown plural category: {}", s)),
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PluralCategory::Zero => "zero",
            PluralCategory::One => "one",
            PluralCategory::Two => "two",
            PluralCategory::Few => "few",
            PluralCategory::Many => "many",
            PluralCategory::Other => "other",
        };
        f.write_str(name)
    }
}

/// Groups of languages sharing one cardinal rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RuleFamily {
    OneOther,
    French,
    OtherOnly,
    EastSlavic,
    SouthSlavic,
    Polish,
    CzechSlovak,
    Slovenian,
    Lithuanian,
    Latvian,
    Romanian,
    Irish,
    Arabic,
    Hebrew,
}

lazy_static! {
    /// Static mapping from base language subtag to its rule family.
    static ref RULE_TABLE: HashMap<&'static str, RuleFamily> = {
        use RuleFamily::*;
        let mut m = HashMap::new();

        for code in [
            "en","de","nl","sv","da","nb","nn","no","is","fi","et","fa","hi","bn","gu",
            "ta","te","kn","ml","mr","it","es","pt","mk","el","eu","gl","af","sw","ur",
            "fil","tl","tr","ms"
        ] {
            m.insert(code, OneOther);
        }

        for code in ["fr","hy","kab"] {
            m.insert(code, French);
        }

        for code in ["ja","zh","ko","th","vi","km","lo","my","yue","id"] {
            m.insert(code, OtherOnly);
        }

        for code in ["ru","uk","be"] {
            m.insert(code, EastSlavic);
        }

        for code in ["sr","hr","bs","sh"] {
            m.insert(code, SouthSlavic);
        }

        m.insert("pl", Polish);
        for code in ["cs","sk"] {
            m.insert(code, CzechSlovak);
        }
        m.insert("sl", Slovenian);
        m.insert("lt", Lithuanian);
        m.insert("lv", Latvian);
        m.insert("ro", Romanian);
        m.insert("ga", Irish);
        m.insert("ar", Arabic);
        for code in ["he","iw"] {
            m.insert(code, Hebrew);
        }

        m
    };
}

/// Returns the cardinal plural category of `n` for a language.
pub fn category_for(lang: &LanguageIdentifier, n: f64) -> PluralCategory {
    let family = RULE_TABLE
        .get(lang.language.as_str())
        .copied()
        .unwrap_or(RuleFamily::OtherOnly);
    select(family, n)
}

/// Helper for string locale codes (accepts underscores, normalizes to hyphen).
pub fn category_for_str(locale: &str, n: f64) -> PluralCategory {
    let normalized = locale.replace('_', "-");
    match normalized.parse::<LanguageIdentifier>() {
        Ok(lang) => category_for(&lang, n),
        Err(_) => PluralCategory::Other,
    }
}

fn select(family: RuleFamily, n: f64) -> PluralCategory {
    use PluralCategory::*;

    let n = n.abs();
    let is_int = n.fract() == 0.0;
    // Integer part; rules below only use it when `is_int` or per CLDR `i`.
    let i = n.trunc() as u64;
    let in_range = |v: u64, lo: u64, hi: u64| v >= lo && v <= hi;

    match family {
        RuleFamily::OtherOnly => Other,
        RuleFamily::OneOther => {
            if is_int && i == 1 {
                One
            } else {
                Other
            }
        }
        RuleFamily::French => {
            if i == 0 || i == 1 {
                One
            } else {
                Other
            }
        }
        RuleFamily::EastSlavic => {
            if !is_int {
                Other
            } else if i % 10 == 1 && i % 100 != 11 {
                One
            } else if in_range(i % 10, 2, 4) && !in_range(i % 100, 12, 14) {
                Few
            } else {
                Many
            }
        }
        RuleFamily::SouthSlavic => {
            if !is_int {
                Other
            } else if i % 10 == 1 && i % 100 != 11 {
                One
            } else if in_range(i % 10, 2, 4) && !in_range(i % 100, 12, 14) {
                Few
            } else {
                Other
            }
        }
        RuleFamily::Polish => {
            if !is_int {
                Other
            } else if i == 1 {
                One
            } else if in_range(i % 10, 2, 4) && !in_range(i % 100, 12, 14) {
                Few
            } else {
                Many
            }
        }
        RuleFamily::CzechSlovak => {
            if !is_int {
                Many
            } else if i == 1 {
                One
            } else if in_range(i, 2, 4) {
                Few
            } else {
                Other
            }
        }
        RuleFamily::Slovenian => {
            if !is_int {
                Few
            } else {
                match i % 100 {
                    1 => One,
                    2 => Two,
                    3 | 4 => Few,
                    _ => Other,
                }
            }
        }
        RuleFamily::Lithuanian => {
            if !is_int {
                Many
            } else if i % 10 == 1 && !in_range(i % 100, 11, 19) {
                One
            } else if in_range(i % 10, 2, 9) && !in_range(i % 100, 11, 19) {
                Few
            } else {
                Other
            }
        }
        RuleFamily::Latvian => {
            if is_int && (i % 10 == 0 || in_range(i % 100, 11, 19)) {
                Zero
            } else if is_int && i % 10 == 1 && i % 100 != 11 {
                One
            } else {
                Other
            }
        }
        RuleFamily::Romanian => {
            if is_int && i == 1 {
                One
            } else if !is_int || i == 0 || in_range(i % 100, 2, 19) {
                Few
            } else {
                Other
            }
        }
        RuleFamily::Irish => {
            if !is_int {
                Other
            } else {
                match i {
                    1 => One,
                    2 => Two,
                    3..=6 => Few,
                    7..=10 => Many,
                    _ => Other,
                }
            }
        }
        RuleFamily::Arabic => {
            if !is_int {
                Other
            } else if i == 0 {
                Zero
            } else if i == 1 {
                One
            } else if i == 2 {
                Two
            } else if in_range(i % 100, 3, 10) {
                Few
            } else if in_range(i % 100, 11, 99) {
                Many
            } else {
                Other
            }
        }
        RuleFamily::Hebrew => {
            if is_int && i == 1 {
                One
            } else if is_int && i == 2 {
                Two
            } else {
                Other
            }
        }
    }
}
