//! Page identifier grammar shared by every route.

/// Returns true when `segment` is a legal page identifier: one or more
/// lowercase ASCII letters or underscores, and nothing else.
pub fn is_valid_identifier(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_and_underscore() {
        assert!(is_valid_identifier("ps_checker"));
        assert!(is_valid_identifier("raw_table"));
        assert!(is_valid_identifier("a"));
        assert!(is_valid_identifier("_"));
        assert!(is_valid_identifier("__init__"));
    }

    #[test]
    fn rejects_empty() {
        assert!(!is_valid_identifier(""));
    }

    #[test]
    fn rejects_digits() {
        assert!(!is_valid_identifier("page1"));
        assert!(!is_valid_identifier("2024"));
    }

    #[test]
    fn rejects_uppercase() {
        assert!(!is_valid_identifier("PS_checker"));
        assert!(!is_valid_identifier("psChecker"));
    }

    #[test]
    fn rejects_punctuation_and_slashes() {
        for candidate in [
            "ps-checker",
            "ps.checker",
            "ps_checker.json",
            "ps/checker",
            "/ps_checker",
            "ps checker",
            "..",
            "ps_checker\n",
        ] {
            assert!(!is_valid_identifier(candidate), "accepted {candidate:?}");
        }
    }

    #[test]
    fn rejects_non_ascii_letters() {
        assert!(!is_valid_identifier("café"));
        assert!(!is_valid_identifier("ſtats"));
    }
}
