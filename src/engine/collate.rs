//! Name ordering for the economy buckets.
//!
//! Names compare case-insensitively, letter by letter, against the alphabet
//! of the catalog language. Letters outside that alphabet fold to ASCII
//! first, so "Ölüm" sorts with "O" under English.

use deunicode::deunicode_char;

const LATIN: &[char] = &[
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v',
    'w', 'x', 'y', 'z',
];

// Q, W and X are not Turkish letters but show up in loanwords.
const TURKISH: &[char] = &[
    'a', 'b', 'c', 'ç', 'd', 'e', 'f', 'g', 'ğ', 'h', 'ı', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'ö', 'p', 'q', 'r',
    's', 'ş', 't', 'u', 'ü', 'v', 'w', 'x', 'y', 'z',
];

/// Letters weigh above every ASCII symbol and digit.
const LETTER_BASE: u32 = 0x100;
/// Characters with no ASCII folding go last, in code point order.
const UNFOLDED_BASE: u32 = 0x1_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Collation {
    alphabet: &'static [char],
    dotless_i: bool,
}

impl Collation {
    /// Collation for a catalog language tag such as `tr` or `tr-TR`.
    pub(crate) fn for_lang(lang: &str) -> Self {
        let primary = lang.split(['-', '_']).next().unwrap_or_default().to_ascii_lowercase();
        match primary.as_str() {
            "tr" | "az" => Collation { alphabet: TURKISH, dotless_i: true },
            _ => Collation { alphabet: LATIN, dotless_i: false },
        }
    }

    fn letter(&self, ch: char) -> Option<u32> {
        self.alphabet.iter().position(|&a| a == ch).map(|pos| LETTER_BASE + pos as u32)
    }

    fn push_lower(&self, ch: char, out: &mut String) {
        match ch {
            'I' if self.dotless_i => out.push('ı'),
            'İ' if self.dotless_i => out.push('i'),
            _ => out.extend(ch.to_lowercase()),
        }
    }

    /// Sort key for one name; compare keys with `Ord`.
    pub(crate) fn key(&self, name: &str) -> Vec<u32> {
        let mut lowered = String::with_capacity(name.len());
        for ch in name.chars() {
            self.push_lower(ch, &mut lowered);
        }

        let mut key = Vec::with_capacity(lowered.len());
        for ch in lowered.chars() {
            if let Some(weight) = self.letter(ch) {
                key.push(weight);
                continue;
            }
            match deunicode_char(ch) {
                Some(folded) => {
                    for c in folded.chars().map(|c| c.to_ascii_lowercase()) {
                        key.push(self.letter(c).unwrap_or(c as u32));
                    }
                }
                None => key.push(UNFOLDED_BASE + ch as u32),
            }
        }
        key
    }
}
