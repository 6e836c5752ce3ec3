//! ASCII code decoding.
//!
//! This module turns the raw text typed by the user into ASCII codes and
//! maps each code to the strings used elsewhere:
//! - the display token shown in the panels (`ESPAÇO`, `¿?`, or the uppercase char)
//! - the board identity used to find the glyph the planchette visits
//!
//! ## Input format
//!
//! ```text
//! 72 101 108 108 111
//! ```
//!
//! Each token is read like a browser `parseInt`: the leading integer counts
//! and anything after it is ignored (`"72,"` is 72, `"0x41"` is 65).
//! Validation is all-or-nothing: a token with no leading integer, or one
//! outside [0, 127], rejects the whole input.

use std::fmt;

use thiserror::Error;

/// Highest valid ASCII code.
pub const MAX_ASCII_CODE: i64 = 127;

/// Display token for the space character.
pub const SPACE_TOKEN: &str = "ESPAÇO";
/// Display token (and board identity) for the question mark.
pub const QUESTION_TOKEN: &str = "¿?";

/// Errors that can occur while decoding user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Por favor, insira códigos ASCII válidos.")]
    EmptyInput,

    #[error("Códigos ASCII inválidos detectados. Use valores entre 0 e 127.")]
    InvalidCode {
        /// First token that failed to parse or fell outside [0, 127]
        token: String,
    },
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A validated ASCII code in [0, 127].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AsciiCode(u8);

impl AsciiCode {
    /// Creates a code, returning `None` outside [0, 127].
    pub fn new(value: i64) -> Option<Self> {
        if (0..=MAX_ASCII_CODE).contains(&value) {
            u8::try_from(value).ok().map(Self)
        } else {
            None
        }
    }

    /// Returns the numeric value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Returns the character this code stands for.
    pub fn as_char(self) -> char {
        char::from(self.0)
    }

    /// Returns the human-readable token for this code.
    pub fn display_token(self) -> String {
        match self.as_char() {
            ' ' => SPACE_TOKEN.to_string(),
            '?' => QUESTION_TOKEN.to_string(),
            c => c.to_uppercase().collect(),
        }
    }

    /// Returns the identity of the board glyph this code points at.
    ///
    /// Space and question mark have fixed identities; everything else is
    /// the uppercased character.
    pub fn board_identity(self) -> String {
        match self.as_char() {
            ' ' => " ".to_string(),
            '?' => QUESTION_TOKEN.to_string(),
            c => c.to_uppercase().collect(),
        }
    }
}

impl fmt::Display for AsciiCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads the integer at the start of `token`, ignoring whatever follows.
///
/// Accepts an optional sign, then either a `0x`/`0X` prefixed hex run or a
/// decimal digit run: `"12abc"` is 12, `"1.5"` is 1, `"0x41"` is 65.
/// Returns `None` when no digit follows the sign and prefix.
pub fn parse_leading_int(token: &str) -> Option<i64> {
    let (negative, rest) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let run: Vec<u32> = digits.chars().map_while(|c| c.to_digit(radix)).collect();
    if run.is_empty() {
        return None;
    }

    let magnitude = run.iter().fold(0_i64, |acc, d| {
        acc.saturating_mul(i64::from(radix))
            .saturating_add(i64::from(*d))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Parses raw user input into ASCII codes.
///
/// # Examples
///
/// ```
/// use planchette::decoder::decode;
///
/// let codes = decode("72 105").unwrap();
/// assert_eq!(codes.len(), 2);
/// assert_eq!(codes[0].as_char(), 'H');
/// ```
pub fn decode(raw: &str) -> DecodeResult<Vec<AsciiCode>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    trimmed
        .split_whitespace()
        .map(|token| {
            parse_leading_int(token)
                .and_then(AsciiCode::new)
                .ok_or_else(|| DecodeError::InvalidCode {
                    token: token.to_string(),
                })
        })
        .collect()
}

/// An ordered decoded message, one token per input code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedMessage {
    codes: Vec<AsciiCode>,
    tokens: Vec<String>,
}

impl DecodedMessage {
    /// Builds the message from validated codes.
    pub fn from_codes(codes: &[AsciiCode]) -> Self {
        Self {
            codes: codes.to_vec(),
            tokens: codes.iter().map(|c| c.display_token()).collect(),
        }
    }

    /// Returns the source codes.
    pub fn codes(&self) -> &[AsciiCode] {
        &self.codes
    }

    /// Returns the display tokens in input order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Returns the number of tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if the message has no tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the tokens joined the way the result panel shows them.
    pub fn joined(&self) -> String {
        self.tokens.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(raw: &str) -> Vec<String> {
        DecodedMessage::from_codes(&decode(raw).unwrap())
            .tokens()
            .to_vec()
    }

    #[test]
    fn test_decode_hello() {
        let message = DecodedMessage::from_codes(&decode("72 101 108 108 111").unwrap());
        assert_eq!(message.tokens(), ["H", "E", "L", "L", "O"]);
        assert_eq!(message.joined(), "H, E, L, L, O");
    }

    #[test]
    fn test_special_tokens() {
        assert_eq!(tokens("32 63"), ["ESPAÇO", "¿?"]);
    }

    #[test]
    fn test_whitespace_runs() {
        assert_eq!(tokens("  65\t\t66 \n 67  "), ["A", "B", "C"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode(""), Err(DecodeError::EmptyInput));
        assert_eq!(decode("   "), Err(DecodeError::EmptyInput));
        assert_eq!(decode("\t\n"), Err(DecodeError::EmptyInput));
    }

    #[test]
    fn test_invalid_codes() {
        let rejected = [
            "128",
            "-1",
            "abc",
            "65 66 300",
            "65 x",
            "-",
            "x1",
            "0x",
            "0x80",
            "999999999999999999999",
        ];
        for raw in rejected {
            assert!(
                matches!(decode(raw), Err(DecodeError::InvalidCode { .. })),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_leading_integer_is_read() {
        // Trailing garbage after the leading integer is ignored.
        assert_eq!(tokens("12abc 1.5 72,"), ["\u{c}", "\u{1}", "H"]);
        assert_eq!(tokens("0x41 0X61 +66 -0"), ["A", "A", "B", "\0"]);
    }

    #[test]
    fn test_parse_leading_int() {
        assert_eq!(parse_leading_int("12abc"), Some(12));
        assert_eq!(parse_leading_int("1.5"), Some(1));
        assert_eq!(parse_leading_int("72,"), Some(72));
        assert_eq!(parse_leading_int("0x41"), Some(65));
        assert_eq!(parse_leading_int("-0x41"), Some(-65));
        assert_eq!(parse_leading_int("-7"), Some(-7));
        assert_eq!(parse_leading_int("007"), Some(7));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("x1"), None);
        assert_eq!(parse_leading_int("0x"), None);
        assert_eq!(parse_leading_int("0xg"), None);
    }

    #[test]
    fn test_invalid_code_reports_first_bad_token() {
        assert_eq!(
            decode("65 999 abc"),
            Err(DecodeError::InvalidCode {
                token: "999".to_string()
            })
        );
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(decode("0 127").unwrap().len(), 2);
        assert!(AsciiCode::new(0).is_some());
        assert!(AsciiCode::new(127).is_some());
        assert!(AsciiCode::new(128).is_none());
        assert!(AsciiCode::new(-1).is_none());
    }

    #[test]
    fn test_display_token_is_total() {
        for value in 0..=MAX_ASCII_CODE {
            let code = AsciiCode::new(value).unwrap();
            let token = code.display_token();
            assert!(!token.is_empty());
            match value {
                32 => assert_eq!(token, "ESPAÇO"),
                63 => assert_eq!(token, "¿?"),
                _ => assert_eq!(token, code.as_char().to_uppercase().to_string()),
            }
        }
    }

    #[test]
    fn test_board_identity() {
        assert_eq!(AsciiCode::new(32).unwrap().board_identity(), " ");
        assert_eq!(AsciiCode::new(63).unwrap().board_identity(), "¿?");
        assert_eq!(AsciiCode::new(97).unwrap().board_identity(), "A");
        assert_eq!(AsciiCode::new(49).unwrap().board_identity(), "1");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            DecodeError::EmptyInput.to_string(),
            "Por favor, insira códigos ASCII válidos."
        );
        assert_eq!(
            DecodeError::InvalidCode { token: "x".into() }.to_string(),
            "Códigos ASCII inválidos detectados. Use valores entre 0 e 127."
        );
    }
}
