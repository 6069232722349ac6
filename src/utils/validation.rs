//! Centralized validation and helper functions.

/// Maximum number of records accepted from a single tool output (resource
/// exhaustion guard)
pub const MAX_RECORDS: usize = 100_000;

/// Check if adding another record would exceed the maximum allowed.
///
/// Call this with the current count BEFORE pushing a new record.
/// Returns an error message if adding would exceed the limit, None if safe.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count >= MAX_RECORDS {
        Some(format!(
            "Too many records: adding another would exceed maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Sanitize a sequence name for use in a GenBank LOCUS field.
///
/// The LOCUS field forbids whitespace, so runs of it are mapped to `_`.
/// Falls back to `sequence` when nothing usable remains.
#[must_use]
pub fn sanitize_locus_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    if sanitized.is_empty() {
        "sequence".to_string()
    } else {
        sanitized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_record_limit() {
        assert!(check_record_limit(100).is_none());
        assert!(check_record_limit(MAX_RECORDS - 1).is_none());
        assert!(check_record_limit(MAX_RECORDS).is_some());
        assert!(check_record_limit(MAX_RECORDS + 1).is_some());
    }

    #[test]
    fn test_sanitize_locus_name() {
        assert_eq!(sanitize_locus_name("phage_x"), "phage_x");
        assert_eq!(sanitize_locus_name("my phage draft"), "my_phage_draft");
        assert_eq!(sanitize_locus_name("  "), "sequence");
        assert_eq!(sanitize_locus_name(""), "sequence");
    }
}
