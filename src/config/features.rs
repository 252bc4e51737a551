//! Feature list parsing.

/// Parse a feature list given as `a,b`, `a, b`, `["a","b"]` or `['a','b']`.
///
/// Spaces, brackets and quotes are stripped before splitting on commas, so
/// feature names cannot contain any of them. Empty entries are dropped.
pub fn parse_feature_list(raw: &str) -> Vec<String> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ' ' | '[' | ']' | '"' | '\'')).collect();
    cleaned.split(',').filter(|f| !f.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_list() {
        assert_eq!(parse_feature_list("dxGroup,avgHGB"), vec!["dxGroup", "avgHGB"]);
    }

    #[test]
    fn test_spaces_and_brackets() {
        assert_eq!(parse_feature_list("[ 'dxGroup', \"avgHGB\" ]"), vec!["dxGroup", "avgHGB"]);
        assert_eq!(parse_feature_list("dxGroup, avgHGB"), vec!["dxGroup", "avgHGB"]);
    }

    #[test]
    fn test_empty_entries_dropped() {
        assert_eq!(parse_feature_list("a,,b,"), vec!["a", "b"]);
        assert!(parse_feature_list("").is_empty());
        assert!(parse_feature_list("[]").is_empty());
    }
}
