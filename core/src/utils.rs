//! Helpers for keeping secrets out of logs.

use std::fmt::{Debug, Formatter};

/// Number of characters kept visible on each side of a long secret.
const VISIBLE_CHARS: usize = 3;
/// Secrets shorter than this are masked completely.
const MIN_PARTIAL_LEN: usize = 12;

/// `Debug` view of an account name or key that never prints the whole value.
///
/// Long values keep their first and last three characters so two keys can
/// still be told apart in a log line; short values show as `***` and an
/// empty value as `EMPTY`. Lengths are counted in characters, so keys pasted
/// with non-ASCII text never split a code point.
///
/// ```
/// use winazure_core::utils::Redact;
///
/// let key = "Eby8vdM02xNOcqFlqUwJPLlm";
/// assert_eq!(format!("{:?}", Redact::from(key)), "Eby***Llm");
/// ```
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let chars = self.0.chars().count();
        if chars == 0 {
            return f.write_str("EMPTY");
        }
        if chars < MIN_PARTIAL_LEN {
            return f.write_str("***");
        }

        let head_end = self
            .0
            .char_indices()
            .nth(VISIBLE_CHARS)
            .map_or(self.0.len(), |(idx, _)| idx);
        let tail_start = self
            .0
            .char_indices()
            .nth(chars - VISIBLE_CHARS)
            .map_or(self.0.len(), |(idx, _)| idx);

        write!(f, "{}***{}", &self.0[..head_end], &self.0[tail_start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("", "EMPTY"; "empty key")]
    #[test_case("bXlrZXk=", "***"; "short key")]
    #[test_case("devstoreacc", "***"; "one below partial")]
    #[test_case("devstoreaccount1", "dev***nt1"; "account name")]
    #[test_case(
        "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==",
        "Eby***w==";
        "emulator key"
    )]
    #[test_case("clé-de-compte-éé", "clé***-éé"; "multibyte edges")]
    fn test_redact(secret: &str, expected: &str) {
        assert_eq!(format!("{:?}", Redact::from(secret)), expected);
    }

    #[test]
    fn test_redact_owned_string() {
        let key = String::from("myaccountkey==");
        assert_eq!(format!("{:?}", Redact::from(&key)), "mya***y==");
    }
}
