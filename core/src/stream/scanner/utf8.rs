//! Incremental UTF-8 character decoding.
//!
//! Unlike `std::str::from_utf8`, this tells a truncated-but-valid prefix
//! (more bytes may still arrive) apart from bytes that can never form a
//! character. The scanner relies on that distinction to carry partial
//! characters across reads.

/// Result of decoding the character at the front of a byte slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    /// A complete character and its encoded width in bytes.
    Char(char, usize),
    /// A valid prefix of a multi-byte character; more bytes are needed.
    Incomplete,
    /// Not valid UTF-8 regardless of what follows.
    Invalid,
}

/// Encoded width implied by a leading byte, or `None` if it cannot start a character.
#[inline]
pub fn char_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

/// Decode the first character of `bytes`.
///
/// Overlong forms, UTF-16 surrogates and code points above U+10FFFF are
/// rejected as soon as the second byte shows them, so a bad sequence is
/// reported at the same offset however the input is chunked.
pub fn decode_char(bytes: &[u8]) -> Decoded {
    let Some(&lead) = bytes.first() else {
        return Decoded::Incomplete;
    };
    let Some(width) = char_width(lead) else {
        return Decoded::Invalid;
    };
    if width == 1 {
        return Decoded::Char(lead as char, 1);
    }

    let mut cp = (lead as u32) & (0x7F >> width);
    for i in 1..width {
        let Some(&b) = bytes.get(i) else {
            return Decoded::Incomplete;
        };
        if b & 0xC0 != 0x80 {
            return Decoded::Invalid;
        }
        if i == 1 {
            match (lead, b) {
                (0xE0, 0x80..=0x9F)
                | (0xED, 0xA0..=0xBF)
                | (0xF0, 0x80..=0x8F)
                | (0xF4, 0x90..=0xBF) => return Decoded::Invalid,
                _ => {}
            }
        }
        cp = (cp << 6) | (b & 0x3F) as u32;
    }

    match char::from_u32(cp) {
        Some(ch) => Decoded::Char(ch, width),
        None => Decoded::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn agrees_with_std_on_valid_text() {
        let text = "a\u{7F}\u{80}é\u{7FF}\u{800}日\u{E001}\u{FFFF}\u{10000}😀\u{10FFFF}";
        let bytes = text.as_bytes();
        let mut pos = 0;
        for expected in text.chars() {
            assert_eq!(decode_char(&bytes[pos..]), Decoded::Char(expected, expected.len_utf8()));
            pos += expected.len_utf8();
        }
        assert_eq!(pos, bytes.len());
    }

    #[test]
    fn every_proper_prefix_is_incomplete() {
        for ch in ['é', '日', '😀'] {
            let mut buf = [0u8; 4];
            let enc = ch.encode_utf8(&mut buf).as_bytes();
            for cut in 0..enc.len() {
                assert_eq!(decode_char(&enc[..cut]), Decoded::Incomplete, "{ch} cut at {cut}");
            }
        }
    }

    #[test]
    fn rejects_bad_sequences() {
        let cases: &[&[u8]] = &[
            &[0x80],             // stray continuation
            &[0xC0, 0xAF],       // overlong '/'
            &[0xC1],             // overlong lead
            &[0xE0, 0x80],       // overlong 3-byte, caught at byte 2
            &[0xED, 0xA0, 0x80], // surrogate U+D800
            &[0xF4, 0x90],       // above U+10FFFF
            &[0xF5],             // invalid lead
            &[0xFF],
            &[0xE6, 0x41],       // continuation missing
        ];
        for case in cases {
            assert_eq!(decode_char(case), Decoded::Invalid, "{case:02X?}");
        }
    }
}
