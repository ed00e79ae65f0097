//! Asset search query builder
//!
//! Freshservice's `/assets?search=` endpoint takes a small textual query
//! language: `"name:'Dell laptop' AND display_id:5"`. This module builds
//! that expression from the supported criteria, quoting string values and
//! escaping embedded single quotes.

/// Search criteria for the asset search endpoint. At least one criterion
/// must be set before a query can be issued.
#[derive(Debug, Clone, Default)]
pub struct AssetQuery {
    pub name: Option<String>,
    pub display_id: Option<u64>,
    pub asset_tag: Option<String>,
}

impl AssetQuery {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.display_id.is_none() && self.asset_tag.is_none()
    }

    /// Build the query expression, conjoining present criteria with `AND`.
    ///
    /// The whole expression is wrapped in double quotes, as the vendor API
    /// expects one quoted string. Callers must check [`is_empty`] first;
    /// building an empty query yields an expression the API rejects.
    ///
    /// [`is_empty`]: AssetQuery::is_empty
    pub fn build(&self) -> String {
        let mut parts = Vec::new();

        if let Some(name) = &self.name {
            parts.push(format!("name:'{}'", escape_value(name)));
        }
        if let Some(display_id) = self.display_id {
            parts.push(format!("display_id:{display_id}"));
        }
        if let Some(asset_tag) = &self.asset_tag {
            parts.push(format!("asset_tag:'{}'", escape_value(asset_tag)));
        }

        format!("\"{}\"", parts.join(" AND "))
    }
}

/// Backslash-escape single quotes inside a quoted search value.
fn escape_value(value: &str) -> String {
    value.replace('\'', "\\'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_name_criterion() {
        let query = AssetQuery {
            name: Some("Dell laptop".to_string()),
            ..Default::default()
        };
        assert_eq!(query.build(), "\"name:'Dell laptop'\"");
    }

    #[test]
    fn multiple_criteria_joined_with_and() {
        let query = AssetQuery {
            name: Some("X".to_string()),
            display_id: Some(5),
            ..Default::default()
        };
        assert_eq!(query.build(), "\"name:'X' AND display_id:5\"");
    }

    #[test]
    fn all_three_criteria() {
        let query = AssetQuery {
            name: Some("X".to_string()),
            display_id: Some(5),
            asset_tag: Some("TAG-1".to_string()),
        };
        assert_eq!(
            query.build(),
            "\"name:'X' AND display_id:5 AND asset_tag:'TAG-1'\""
        );
    }

    #[test]
    fn embedded_single_quotes_are_escaped() {
        let query = AssetQuery {
            name: Some("Bob's laptop".to_string()),
            ..Default::default()
        };
        assert_eq!(query.build(), "\"name:'Bob\\'s laptop'\"");
    }

    #[test]
    fn empty_query_is_reported_empty() {
        assert!(AssetQuery::default().is_empty());
        assert!(!AssetQuery {
            display_id: Some(1),
            ..Default::default()
        }
        .is_empty());
    }
}
