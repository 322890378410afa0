use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct SearchQuery {
    pub search_term: Option<String>,
}

impl SearchQuery {
    /// A missing `search_term` field falls back to a single space, which
    /// matches every name. Stored rows were written against that contract,
    /// so an absent field and an empty string stay distinct.
    pub fn term(&self) -> String {
        self.search_term.clone().unwrap_or_else(|| " ".to_string())
    }
}

#[derive(Serialize)]
pub struct SearchEntry {
    pub id: i32,
    pub name: String,
    pub num_upcoming_shows: i64,
}

#[derive(Serialize)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_term_defaults_to_single_space() {
        let query = SearchQuery { search_term: None };
        assert_eq!(query.term(), " ");
    }

    #[test]
    fn empty_term_stays_empty() {
        let query = SearchQuery { search_term: Some(String::new()) };
        assert_eq!(query.term(), "");
    }

    #[test]
    fn results_serialize_with_count_and_data() {
        let results = SearchResults {
            count: 1,
            data: vec![SearchEntry {
                id: 7,
                name: "The Musical Hop".to_string(),
                num_upcoming_shows: 0,
            }],
        };
        let json = serde_json::to_value(&results).unwrap();
        assert_eq!(json["count"], 1);
        assert_eq!(json["data"][0]["id"], 7);
        assert_eq!(json["data"][0]["num_upcoming_shows"], 0);
    }
}
