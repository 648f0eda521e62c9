use unicode_normalization::UnicodeNormalization;

/// Punctuation the remote service treats as an apostrophe:
/// ‘ ’ ‛ ʼ ′ ‵
const APOSTROPHE_LIKE: [char; 6] = [
    '\u{2018}', '\u{2019}', '\u{201B}', '\u{02BC}', '\u{2032}', '\u{2035}',
];

/// Space separators (`Zs`), tab, vertical tab, form feed, line terminators and
/// U+FEFF. Unlike `char::is_whitespace`, U+FEFF counts and U+0085 does not.
fn is_name_whitespace(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Canonical form of a roster name as sent to the validation service.
///
/// NFC composition runs first, then apostrophe-like marks become `'`, then
/// whitespace runs collapse to a single space with the ends trimmed.
pub fn normalize_name(raw: &str) -> String {
    let composed = raw.nfc().map(|ch| {
        if APOSTROPHE_LIKE.contains(&ch) {
            '\''
        } else {
            ch
        }
    });

    let mut normalized = String::with_capacity(raw.len());
    let mut pending_space = false;
    for ch in composed {
        if is_name_whitespace(ch) {
            pending_space = !normalized.is_empty();
            continue;
        }
        if pending_space {
            normalized.push(' ');
            pending_space = false;
        }
        normalized.push(ch);
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_curly_apostrophes_with_ascii() {
        assert_eq!(normalize_name("O\u{2019}Connor"), "O'Connor");
        assert_eq!(normalize_name("O\u{2018}Connor"), "O'Connor");
        assert_eq!(normalize_name("O\u{02BC}Connor"), "O'Connor");
    }

    #[test]
    fn replaces_every_apostrophe_like_mark() {
        for mark in APOSTROPHE_LIKE {
            let raw = format!("D{mark}Angelo");
            assert_eq!(normalize_name(&raw), "D'Angelo", "mark U+{:04X}", mark as u32);
        }
    }

    #[test]
    fn keeps_ascii_apostrophe() {
        assert_eq!(normalize_name("O'Connor"), "O'Connor");
        assert_eq!(normalize_name("T'Challa Udaku"), "T'Challa Udaku");
    }

    #[test]
    fn trims_and_collapses_internal_whitespace() {
        assert_eq!(normalize_name("  María   López  "), "María López");
        assert_eq!(normalize_name("Nguyễn\tVăn\n\n An"), "Nguyễn Văn An");
        assert_eq!(normalize_name(" \u{00A0}\t "), "");
    }

    #[test]
    fn strips_byte_order_marks_like_other_whitespace() {
        assert_eq!(normalize_name("\u{FEFF}Ada"), "Ada");
        assert_eq!(normalize_name("Ada\u{FEFF}\u{FEFF}Lovelace\u{FEFF}"), "Ada Lovelace");
    }

    #[test]
    fn keeps_next_line_control_character() {
        assert_eq!(normalize_name("Ada\u{0085}Lovelace"), "Ada\u{0085}Lovelace");
        assert_eq!(normalize_name(" \u{0085} "), "\u{0085}");
    }

    #[test]
    fn composes_decomposed_characters() {
        let decomposed = "Mari\u{0061}\u{0301} Lo\u{0301}pez";
        let normalized = normalize_name(decomposed);
        assert_eq!(normalized, "Mariá López");
        assert!(normalized.contains('\u{00E1}'));
        assert!(!normalized.contains('\u{0301}'));
    }

    #[test]
    fn is_idempotent() {
        for raw in [
            "  María   López  ",
            "O\u{2035}Connor\u{2032}s",
            "Zoe\u{0308}\u{3000}Saldan\u{0303}a",
            "T'Challa Udaku",
            "",
        ] {
            let once = normalize_name(raw);
            assert_eq!(normalize_name(&once), once);
        }
    }
}
