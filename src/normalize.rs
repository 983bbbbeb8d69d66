use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DISALLOWED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s&'\-:]").unwrap());

/// Known scraped-title typos, replaced verbatim before character filtering.
const TYPO_TABLE: &[(&str, &str)] = &[
    ("SEIRES", "Series"),
    ("EVERTYTHING", "Everything"),
    ("FREINDS", "Friends"),
];

/// Canonicalize a raw anchor title into a display title. Total and idempotent:
/// `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let mut text = WHITESPACE_RE.replace_all(raw.trim(), " ").into_owned();
    text = fold_stylized(&text);
    text = text.nfkc().collect();
    for (typo, fix) in TYPO_TABLE {
        text = text.replace(typo, fix);
    }
    text = text.replace(" And ", " and ").replace(" Of ", " of ");
    text = DISALLOWED_RE.replace_all(&text, "").into_owned();
    if is_all_upper(&text) && text.len() > 3 {
        // Title-casing resurrects "And"/"of" capitals, so the connector rule
        // runs again to keep re-application a no-op.
        text = title_case(&text);
        text = text.replace(" And ", " and ").replace(" Of ", " of ");
    }
    // Character filtering can leave doubled spaces behind; collapse once more
    // so re-application is a no-op.
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

/// Fold the Mathematical Alphanumeric Symbols Latin blocks (bold, italic,
/// script, fraktur, sans-serif, monospace) to plain ASCII letters of matching
/// case. Each styled alphabet is a contiguous run of 52 code points.
fn fold_stylized(text: &str) -> String {
    text.chars()
        .map(|c| {
            let cp = c as u32;
            if (0x1D400..0x1D400 + 13 * 52).contains(&cp) {
                let offset = (cp - 0x1D400) % 52;
                if offset < 26 {
                    char::from(b'A' + offset as u8)
                } else {
                    char::from(b'a' + (offset - 26) as u8)
                }
            } else {
                c
            }
        })
        .collect()
}

fn is_all_upper(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Capitalize the letter after every non-letter boundary and lower the rest,
/// so hyphenated names keep both capitals ("LAUREL-HARDY" -> "Laurel-Hardy").
/// Apostrophes count as boundaries too ("ROCKY'S" -> "Rocky'S").
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut boundary = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  Classic   Movies \t Hub "), "Classic Movies Hub");
    }

    #[test]
    fn folds_stylized_letters() {
        // Mathematical bold "Bold"
        assert_eq!(normalize("\u{1D401}\u{1D428}\u{1D425}\u{1D41D}"), "Bold");
    }

    #[test]
    fn fixes_known_typos() {
        assert_eq!(normalize("Comedy SEIRES"), "Comedy Series");
        assert_eq!(normalize("Best FREINDS Episodes"), "Best Friends Episodes");
    }

    #[test]
    fn lowercases_mid_title_connectors() {
        assert_eq!(normalize("Fall Of The Maya Kings"), "Fall of The Maya Kings");
        assert_eq!(normalize("Laurel And Hardy"), "Laurel and Hardy");
    }

    #[test]
    fn strips_disallowed_characters() {
        assert_eq!(normalize("Gunsmoke! (Colorized)"), "Gunsmoke Colorized");
        assert_eq!(normalize("Tom & Jerry's Best - 1950s:"), "Tom & Jerry's Best - 1950s:");
    }

    #[test]
    fn title_cases_shouting() {
        assert_eq!(normalize("WESTERN CLASSICS"), "Western Classics");
        assert_eq!(normalize("LAUREL AND HARDY"), "Laurel and Hardy");
        // Short acronyms stay as-is
        assert_eq!(normalize("TV"), "TV");
    }

    #[test]
    fn title_casing_restarts_after_separators() {
        assert_eq!(normalize("LAUREL-HARDY SHORTS"), "Laurel-Hardy Shorts");
        assert_eq!(normalize("ROCKY'S GREATEST"), "Rocky'S Greatest");
    }

    #[test]
    fn mixed_case_left_alone() {
        assert_eq!(normalize("LIVE NOW: Rumble News"), "LIVE NOW: Rumble News");
    }

    #[test]
    fn idempotent() {
        let inputs = [
            "  LIVE   NOW: Rumble News!! ",
            "WESTERN CLASSICS",
            "LAUREL-HARDY SHORTS",
            "ROCKY'S GREATEST",
            "A * B",
            "Fall Of The Maya Kings",
            "\u{1D401}\u{1D428}\u{1D425}\u{1D41D} SEIRES",
            "",
            "   ",
        ];
        for raw in inputs {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", raw);
        }
    }
}
