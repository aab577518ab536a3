//! NetSuite realm normalization.
//!
//! NetSuite only accepts underscores in the OAuth realm (`1234567_SB1`), while
//! account IDs are often written with hyphens (`1234567-SB1`).

/// Replace every `-` in a realm with `_`.
#[must_use]
pub fn normalize(realm: &str) -> String {
    realm.replace('-', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_realm_unchanged() {
        assert_eq!(normalize("1234567"), "1234567");
    }

    #[test]
    fn test_sandbox_hyphen_converted() {
        assert_eq!(normalize("1234567-SB1"), "1234567_SB1");
        assert_eq!(normalize("1234567-SB2"), "1234567_SB2");
    }

    #[test]
    fn test_consecutive_hyphens() {
        assert_eq!(normalize("1234567--SB1"), "1234567__SB1");
    }

    #[test]
    fn test_multiple_hyphens() {
        assert_eq!(normalize("1234567-SB1-TEST"), "1234567_SB1_TEST");
    }

    #[test]
    fn test_leading_and_trailing_hyphens() {
        assert_eq!(normalize("-1234567"), "_1234567");
        assert_eq!(normalize("1234567-"), "1234567_");
        assert_eq!(normalize("-"), "_");
    }

    #[test]
    fn test_empty_realm() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(normalize("TSTDRV1234567-sb1"), "TSTDRV1234567_sb1");
    }

    #[test]
    fn test_already_normalized_unchanged() {
        assert_eq!(normalize("1234567_SB1"), "1234567_SB1");
    }

    #[test]
    fn test_idempotent_and_hyphen_free() {
        for realm in ["", "-", "1234567", "1234567-SB1", "a-b_c--d", "-x-"] {
            let once = normalize(realm);
            assert!(!once.contains('-'), "{once} still contains a hyphen");
            assert_eq!(normalize(&once), once);
        }
    }
}
