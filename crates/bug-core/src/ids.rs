//! Bug identifier format.
//!
//! Identifiers are 24 lowercase hex characters, generated by the database
//! from 12 random bytes. Lookups accept either case.

/// Length of a bug identifier in characters.
pub const ID_LEN: usize = 24;

/// Number of random bytes behind an identifier.
pub const ID_BYTES: usize = ID_LEN / 2;

/// Whether `id` has the shape of a bug identifier.
#[must_use]
pub fn is_well_formed(id: &str) -> bool {
    id.len() == ID_LEN && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Normalize a well-formed identifier for storage comparison.
///
/// Returns `None` when `id` is not well-formed.
#[must_use]
pub fn normalize(id: &str) -> Option<String> {
    is_well_formed(id).then(|| id.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_object_id_shape() {
        assert!(is_well_formed("507f1f77bcf86cd799439011"));
        assert!(is_well_formed("507F1F77BCF86CD799439011"));
    }

    #[test]
    fn rejects_wrong_length_or_charset() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("507f1f77bcf86cd79943901"));
        assert!(!is_well_formed("507f1f77bcf86cd7994390111"));
        assert!(!is_well_formed("507f1f77bcf86cd79943901z"));
        assert!(!is_well_formed("not-a-valid-identifier!!"));
    }

    #[test]
    fn normalize_lowercases() {
        assert_eq!(
            normalize("507F1F77BCF86CD799439011").as_deref(),
            Some("507f1f77bcf86cd799439011")
        );
        assert_eq!(normalize("nope"), None);
    }
}
