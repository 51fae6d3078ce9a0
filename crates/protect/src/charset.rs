use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Code emitted for any character the table does not cover.
const UNMAPPED_CODE: [u8; 2] = *b"C3";

/// Accented characters the legacy code page folds onto ASCII codes. Several
/// of these collide with the bracket/brace codes of the plain range; the
/// receiving system expects exactly these collisions.
const ALIASED: &[(char, u8)] = &[
    ('É', 0x40),
    ('Ä', 0x5B),
    ('Ö', 0x5C),
    ('Å', 0x5D),
    ('Ü', 0x5E),
    ('é', 0x60),
    ('ä', 0x7B),
    ('ö', 0x7C),
    ('å', 0x7D),
    ('ü', 0x7E),
];

static CODE_TABLE: Lazy<HashMap<char, [u8; 2]>> = Lazy::new(|| {
    let mut table = HashMap::new();
    // The ASCII printable range maps onto its own codepoint.
    for byte in 0x20u8..=0x7E {
        table.insert(byte as char, hex_pair(byte));
    }
    for &(c, code) in ALIASED {
        table.insert(c, hex_pair(code));
    }
    table
});

fn hex_pair(byte: u8) -> [u8; 2] {
    const DIGITS: &[u8; 16] = b"0123456789ABCDEF";
    [
        DIGITS[usize::from(byte >> 4)],
        DIGITS[usize::from(byte & 0x0F)],
    ]
}

/// Map a character to its two-digit uppercase hex code.
///
/// Total function: anything outside the table (control characters,
/// characters beyond the covered set) yields the fixed fallback code. The
/// table reproduces the receiving bank's legacy code page exactly and must
/// not be extended or corrected.
#[must_use]
pub fn code_for(c: char) -> [u8; 2] {
    CODE_TABLE.get(&c).copied().unwrap_or(UNMAPPED_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ascii_printables_map_to_their_own_codepoint() {
        assert_eq!(code_for(' '), *b"20");
        assert_eq!(code_for('0'), *b"30");
        assert_eq!(code_for('A'), *b"41");
        assert_eq!(code_for('Z'), *b"5A");
        assert_eq!(code_for('a'), *b"61");
        assert_eq!(code_for('~'), *b"7E");
    }

    #[test]
    fn accented_letters_alias_onto_legacy_codes() {
        assert_eq!(code_for('É'), *b"40");
        assert_eq!(code_for('Ä'), *b"5B");
        assert_eq!(code_for('Ö'), *b"5C");
        assert_eq!(code_for('Å'), *b"5D");
        assert_eq!(code_for('Ü'), *b"5E");
        assert_eq!(code_for('é'), *b"60");
        assert_eq!(code_for('ä'), *b"7B");
        assert_eq!(code_for('ö'), *b"7C");
        assert_eq!(code_for('å'), *b"7D");
        assert_eq!(code_for('ü'), *b"7E");
    }

    #[test]
    fn aliases_collide_with_their_ascii_counterparts() {
        assert_eq!(code_for('Ä'), code_for('['));
        assert_eq!(code_for('ö'), code_for('|'));
        assert_eq!(code_for('å'), code_for('}'));
    }

    #[test]
    fn unmapped_characters_yield_the_fallback_code() {
        assert_eq!(code_for('€'), *b"C3");
        assert_eq!(code_for('\t'), *b"C3");
        assert_eq!(code_for('ß'), *b"C3");
        assert_eq!(code_for('\u{0}'), *b"C3");
        // Deterministic: same answer every time.
        assert_eq!(code_for('€'), code_for('€'));
    }

    #[test]
    fn codes_are_always_two_uppercase_hex_digits() {
        for c in ('\u{0}'..='\u{FF}').chain("€あ".chars()) {
            let code = code_for(c);
            assert!(code
                .iter()
                .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(b)));
        }
    }
}
