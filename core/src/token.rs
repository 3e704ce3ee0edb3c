//! Token classification.
//!
//! A raw argument is either the terminator `--`, an option token with one
//! or two leading dashes, or a positional value.

/// The token that ends option recognition.
pub const TERMINATOR: &str = "--";

/// Kind of a raw token, as seen while options are still recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Terminator,
    /// Option token with its dash count (1 or 2).
    Option { raw: &'a str, dashes: usize },
    Positional(&'a str),
}

impl<'a> Token<'a> {
    pub(crate) fn classify(raw: &'a str) -> Self {
        if raw == TERMINATOR {
            return Self::Terminator;
        }
        match dashes(raw) {
            0 => Self::Positional(raw),
            dashes => Self::Option { raw, dashes },
        }
    }
}

/// Counts the leading dashes of an option token.
///
/// Returns 0 for anything that is not an option: no leading dash, a lone
/// `-`, or a dash run followed by another dash or by `=`.
pub(crate) fn dashes(arg: &str) -> usize {
    let bytes = arg.as_bytes();

    if bytes.len() > 1 && bytes[0] == b'-' && bytes[1] != b'-' && bytes[1] != b'=' {
        return 1;
    }

    if bytes.len() > 2
        && bytes[0] == b'-'
        && bytes[1] == b'-'
        && bytes[2] != b'-'
        && bytes[2] != b'='
    {
        return 2;
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashes_counts_option_prefixes() {
        assert_eq!(dashes("-f"), 1);
        assert_eq!(dashes("-abc"), 1);
        assert_eq!(dashes("-f=v"), 1);
        assert_eq!(dashes("--flag"), 2);
        assert_eq!(dashes("--flag=v"), 2);
    }

    #[test]
    fn test_dashes_rejects_malformed_prefixes() {
        for arg in ["", "-", "--", "---x", "-=x", "--=x", "value", "x-y"] {
            assert_eq!(dashes(arg), 0, "{arg}");
        }
    }

    #[test]
    fn test_classify() {
        assert_eq!(Token::classify("--"), Token::Terminator);
        assert_eq!(Token::classify("-LA-"), Token::Option { raw: "-LA-", dashes: 1 });
        assert_eq!(Token::classify("-"), Token::Positional("-"));
        assert_eq!(Token::classify("mon ami"), Token::Positional("mon ami"));
    }
}
