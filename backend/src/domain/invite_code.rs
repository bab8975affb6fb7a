//! # Invite Code Codec
//!
//! Derives the short, human-enterable code a parent shares with a child so
//! the child can link their own account to a child profile.
//!
//! A code is `<CHILD>-<PARENT>`: the first four characters of the child
//! profile id and of the parent account id, uppercased. It is stateless and
//! deterministic, so the same pair always yields the same code and nothing
//! needs to be stored. Only prefixes survive, so decoding never recovers the
//! full ids; the link resolver matches the prefixes against stored
//! relationships instead.
//!
//! Four characters per side is a transcription convenience, not a security
//! boundary. Two different pairs can share a code.

use std::fmt;

/// Number of leading identifier characters kept on each side of the code
pub const PREFIX_LENGTH: usize = 4;

/// Longest code input accepted from a user (`XXXX-XXXX`)
pub const MAX_CODE_LENGTH: usize = 2 * PREFIX_LENGTH + 1;

const SEPARATOR: char = '-';

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invite code must have exactly two non-empty parts separated by '-'")]
    MalformedCode,
}

/// Prefixes recovered from a submitted invite code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCode {
    pub child_prefix: String,
    pub parent_prefix: String,
}

impl InviteCode {
    /// Whether a relation's identifiers start with this code's prefixes
    pub fn matches(&self, child_id: &str, parent_id: &str) -> bool {
        child_id.to_uppercase().starts_with(&self.child_prefix)
            && parent_id.to_uppercase().starts_with(&self.parent_prefix)
    }
}

impl fmt::Display for InviteCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.child_prefix, SEPARATOR, self.parent_prefix)
    }
}

/// Build the invite code for a child profile and its parent account
pub fn encode(child_id: &str, parent_id: &str) -> String {
    format!("{}{}{}", prefix(child_id), SEPARATOR, prefix(parent_id))
}

/// Parse a user-entered code back into its two prefixes.
///
/// Only case is normalized. Segment length, character set and surrounding
/// whitespace are not checked; an odd segment simply fails to match any
/// relation later on.
pub fn decode(code: &str) -> Result<InviteCode, ParseError> {
    let normalized = code.to_uppercase();
    let mut parts = normalized.split(SEPARATOR);

    match (parts.next(), parts.next(), parts.next()) {
        (Some(child), Some(parent), None) if !child.is_empty() && !parent.is_empty() => {
            Ok(InviteCode {
                child_prefix: child.to_string(),
                parent_prefix: parent.to_string(),
            })
        }
        _ => Err(ParseError::MalformedCode),
    }
}

fn prefix(id: &str) -> String {
    id.chars().take(PREFIX_LENGTH).collect::<String>().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_takes_uppercased_prefixes() {
        let code = encode(
            "9f22c1d0-5b7e-4a53-9d1e-2f0c8a6b4e11",
            "7a1b03e9-1c44-4f0b-8a7d-6e5f4c3b2a10",
        );
        assert_eq!(code, "9F22-7A1B");
    }

    #[test]
    fn test_encode_short_ids() {
        assert_eq!(encode("ab", "c"), "AB-C");
    }

    #[test]
    fn test_encode_is_char_safe() {
        assert_eq!(encode("ééééé", "1234"), "ÉÉÉÉ-1234");
    }

    #[test]
    fn test_decode_uppercases() {
        let code = decode("9f22-7a1b").unwrap();
        assert_eq!(code.child_prefix, "9F22");
        assert_eq!(code.parent_prefix, "7A1B");
        assert_eq!(code.to_string(), "9F22-7A1B");
    }

    #[test]
    fn test_decode_keeps_whitespace() {
        let code = decode(" 9f22-7a1b").unwrap();
        assert_eq!(code.child_prefix, " 9F22");
        assert!(!code.matches("9f22c1d0", "7a1b0000"));
    }

    #[test]
    fn test_hyphen_in_prefix_does_not_round_trip() {
        let code = encode("9f22c1d0", "p-17abcd");
        assert_eq!(code, "9F22-P-17");
        assert_eq!(decode(&code), Err(ParseError::MalformedCode));
    }

    #[test]
    fn test_decode_passes_short_segments_through() {
        let code = decode("a-b").unwrap();
        assert_eq!(code.child_prefix, "A");
        assert_eq!(code.parent_prefix, "B");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        for input in ["", "ABCD", "AB-CD-EF", "-ABCD", "ABCD-", "-", "--"] {
            assert_eq!(
                decode(input),
                Err(ParseError::MalformedCode),
                "input {:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let code = decode("9f22-7a1b").unwrap();
        assert!(code.matches("9f22c1d0-aaaa", "7A1B0000"));
        assert!(!code.matches("9f23c1d0", "7a1b0000"));
        assert!(!code.matches("9f22c1d0", "7a1c0000"));
    }

    proptest! {
        #[test]
        fn encode_is_deterministic(child in "[0-9a-f]{8}", parent in "[0-9a-f]{8}") {
            prop_assert_eq!(encode(&child, &parent), encode(&child, &parent));
        }

        #[test]
        fn encoded_codes_decode_to_two_segments(
            child in "[0-9a-f]{1,12}",
            parent in "[0-9a-f]{1,12}",
        ) {
            let code = encode(&child, &parent);
            prop_assert!(code.chars().count() <= MAX_CODE_LENGTH);

            let decoded = decode(&code).unwrap();
            prop_assert!(!decoded.child_prefix.is_empty());
            prop_assert!(!decoded.parent_prefix.is_empty());
            prop_assert!(decoded.matches(&child, &parent));
        }

        #[test]
        fn inputs_without_exactly_one_separator_are_rejected(input in "[A-Z0-9]{0,9}") {
            prop_assert_eq!(decode(&input), Err(ParseError::MalformedCode));
        }
    }
}
