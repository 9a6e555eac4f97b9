//! Normalized query criteria shared by every record store backend

use crate::domain::DomainError;

use super::entity::LocationRecord;

/// Keyword match criteria
///
/// A record matches when its city contains the keyword, or its state or county
/// name equals it, or its postal code equals the keyword read as an integer.
/// All string comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordQuery {
    keyword: String,
    postal_code: Option<i32>,
}

impl KeywordQuery {
    /// Maximum records a keyword lookup returns
    pub const LIMIT: usize = 10;

    /// Trims and lower-cases the keyword; a blank keyword is rejected
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let keyword = raw.trim().to_lowercase();

        if keyword.is_empty() {
            return Err(DomainError::invalid_input("keyword must not be blank"));
        }

        // Non-numeric keywords simply contribute no postal code match
        let postal_code = keyword.parse::<i32>().ok();

        Ok(Self {
            keyword,
            postal_code,
        })
    }

    /// Normalized (trimmed, lower-case) keyword
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn postal_code(&self) -> Option<i32> {
        self.postal_code
    }

    pub fn matches(&self, record: &LocationRecord) -> bool {
        record.city().to_lowercase().contains(&self.keyword)
            || record.state_name().to_lowercase() == self.keyword
            || record
                .county_name()
                .is_some_and(|county| county.to_lowercase() == self.keyword)
            || self.postal_code == Some(record.zip())
    }
}

/// Trims and upper-cases a state code; a blank code is rejected
pub fn normalize_state_code(raw: &str) -> Result<String, DomainError> {
    let code = raw.trim().to_uppercase();

    if code.is_empty() {
        return Err(DomainError::invalid_input("state code must not be blank"));
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn springfield() -> LocationRecord {
        LocationRecord::new(1, 39.78, -89.65, "Springfield", "IL", "Illinois", 62701)
            .with_county("Sangamon")
    }

    #[test]
    fn test_parse_normalizes_keyword() {
        let query = KeywordQuery::parse("  SpringField ").unwrap();
        assert_eq!(query.keyword(), "springfield");
        assert_eq!(query.postal_code(), None);
    }

    #[test]
    fn test_parse_numeric_keyword() {
        let query = KeywordQuery::parse("62701").unwrap();
        assert_eq!(query.postal_code(), Some(62701));
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(matches!(
            KeywordQuery::parse("   "),
            Err(DomainError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_matches_city_substring() {
        let record = springfield();
        assert!(KeywordQuery::parse("spring").unwrap().matches(&record));
        assert!(KeywordQuery::parse("FIELD").unwrap().matches(&record));
    }

    #[test]
    fn test_matches_state_and_county_by_equality_only() {
        let record = springfield();
        assert!(KeywordQuery::parse("illinois").unwrap().matches(&record));
        assert!(KeywordQuery::parse("Sangamon").unwrap().matches(&record));
        assert!(!KeywordQuery::parse("Illin").unwrap().matches(&record));
        assert!(!KeywordQuery::parse("Sanga").unwrap().matches(&record));
    }

    #[test]
    fn test_matches_postal_code() {
        let record = springfield();
        assert!(KeywordQuery::parse("62701").unwrap().matches(&record));
        assert!(!KeywordQuery::parse("62702").unwrap().matches(&record));
    }

    #[test]
    fn test_record_without_county() {
        let record = springfield().narrow();
        assert!(!KeywordQuery::parse("sangamon").unwrap().matches(&record));
    }

    #[test]
    fn test_normalize_state_code() {
        assert_eq!(normalize_state_code(" il ").unwrap(), "IL");
        assert!(normalize_state_code("").is_err());
    }
}
