//! Human-readable text round-trip for the kernel types.
//!
//! # Format
//! Components are separated by commas and/or whitespace. A single pair of
//! surrounding `()` or `{}` is tolerated, so all of these parse as a `Vec3`:
//!
//! ```text
//! 1, 2, 3
//! (1, 2, 3)
//! {1 2 3}
//! ```
//!
//! Every type implements [`std::str::FromStr`] with [`ParseError`]. Callers that
//! want a value no matter what use [`parse_or_default`], which logs and falls
//! back to the type's default (zero, or identity for matrices and quaternions).

use std::fmt;
use std::str::FromStr;

use tracing::warn;

/// Error type for text parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    ComponentCount { expected: usize, found: usize },
    InvalidNumber(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty input"),
            ParseError::ComponentCount { expected, found } => {
                write!(f, "expected {expected} components, found {found}")
            }
            ParseError::InvalidNumber(token) => write!(f, "invalid number `{token}`"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Splits `s` into numeric tokens, ignoring braces, commas and whitespace.
pub fn tokens(s: &str) -> Vec<&str> {
    s.trim()
        .trim_start_matches(['(', '{'])
        .trim_end_matches([')', '}'])
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Parses exactly `N` floats from `s`.
pub fn parse_components<const N: usize>(s: &str) -> Result<[f32; N], ParseError> {
    let toks = tokens(s);
    if toks.is_empty() {
        return Err(ParseError::Empty);
    }
    if toks.len() != N {
        return Err(ParseError::ComponentCount {
            expected: N,
            found: toks.len(),
        });
    }

    let mut out = [0.0; N];
    for (slot, tok) in out.iter_mut().zip(toks) {
        *slot = tok
            .parse::<f32>()
            .map_err(|_| ParseError::InvalidNumber(tok.to_string()))?;
    }
    Ok(out)
}

/// Writes `values` as `a, b, c` using the shortest round-trip float format.
pub(crate) fn write_components(f: &mut fmt::Formatter<'_>, values: &[f32]) -> fmt::Result {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}

/// Parses `s`, falling back to `T::default()` on malformed input.
pub fn parse_or_default<T>(s: &str) -> T
where
    T: FromStr<Err = ParseError> + Default,
{
    match s.parse::<T>() {
        Ok(v) => v,
        Err(err) => {
            warn!(input = s, %err, ty = std::any::type_name::<T>(), "falling back to default");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_tolerate_braces_and_mixed_separators() {
        assert_eq!(tokens("(1, 2, 3)"), vec!["1", "2", "3"]);
        assert_eq!(tokens("{1 2,3}"), vec!["1", "2", "3"]);
        assert_eq!(tokens("  4,5  "), vec!["4", "5"]);
        assert!(tokens("()").is_empty());
    }

    #[test]
    fn parse_components_counts_and_numbers() {
        assert_eq!(parse_components::<2>("1.5, -2").unwrap(), [1.5, -2.0]);
        assert_eq!(parse_components::<3>(""), Err(ParseError::Empty));
        assert_eq!(
            parse_components::<3>("1, 2"),
            Err(ParseError::ComponentCount {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            parse_components::<2>("1, x"),
            Err(ParseError::InvalidNumber("x".to_string()))
        );
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::ComponentCount {
            expected: 4,
            found: 1,
        };
        assert_eq!(err.to_string(), "expected 4 components, found 1");
    }

    #[test]
    fn parse_or_default_falls_back_on_bad_input() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("warn")
            .with_test_writer()
            .try_init();
        assert_eq!(parse_or_default::<crate::vec2::Vec2>("3 4"), crate::vec2::Vec2::new(3.0, 4.0));
        assert_eq!(parse_or_default::<crate::vec2::Vec2>("3 4 5"), crate::vec2::Vec2::ZERO);
    }
}
