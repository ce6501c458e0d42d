//! Place keys derived from free-text queries.

use serde::{Deserialize, Serialize};

/// A free-text query and the short key its results are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceQuery {
    pub query: String,
    pub key: String,
}

impl PlaceQuery {
    /// "Kings county, NY, USA" → "Kings county"; "Boston, MA, USA" → "Boston"
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        let key = if query.contains("county") {
            let name = query.split(" county, ").next().unwrap_or(query);
            format!("{} county", name)
        } else {
            query.split(", ").next().unwrap_or(query).to_string()
        };

        Self {
            query: query.to_string(),
            key,
        }
    }

    pub fn parse_all<S: AsRef<str>>(queries: &[S]) -> Vec<Self> {
        queries.iter().map(|q| Self::parse(q.as_ref())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_key() {
        assert_eq!(PlaceQuery::parse("New York City, NY, USA").key, "New York City");
        assert_eq!(PlaceQuery::parse("Boston").key, "Boston");
    }

    #[test]
    fn test_county_key() {
        assert_eq!(PlaceQuery::parse("New York county, NY, USA").key, "New York county");
        assert_eq!(PlaceQuery::parse("Richmond county, NY, USA").key, "Richmond county");
    }

    #[test]
    fn test_landmark_key() {
        let q = PlaceQuery::parse("Cleopatra's needle, Central Park, New York, NY, USA");
        assert_eq!(q.key, "Cleopatra's needle");
        assert_eq!(q.query, "Cleopatra's needle, Central Park, New York, NY, USA");
    }
}
