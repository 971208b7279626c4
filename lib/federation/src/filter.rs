/// Selects the endpoints of a partner to query by substrings of their URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetFilter {
    substrings: Option<Vec<String>>,
}

impl DatasetFilter {
    /// Matches every endpoint.
    pub fn all() -> DatasetFilter {
        DatasetFilter { substrings: None }
    }

    /// Matches endpoints containing at least one of `substrings`.
    /// An empty list, or a list holding an empty string, matches every endpoint.
    pub fn new<I, S>(substrings: I) -> DatasetFilter
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DatasetFilter {
            substrings: Some(substrings.into_iter().map(|s| s.into()).collect()),
        }
    }

    pub fn matches(&self, endpoint: &str) -> bool {
        match &self.substrings {
            None => true,
            Some(substrings) if substrings.is_empty() => true,
            Some(substrings) => substrings.iter().any(|s| endpoint.contains(s.as_str())),
        }
    }
}

impl From<Option<Vec<String>>> for DatasetFilter {
    fn from(substrings: Option<Vec<String>>) -> Self {
        DatasetFilter { substrings }
    }
}

pub fn filter_endpoints(endpoints: &[String], filter: &DatasetFilter) -> Vec<String> {
    endpoints
        .iter()
        .filter(|ep| filter.matches(ep))
        .cloned()
        .collect()
}

/// Name of the dataset behind an endpoint, the second to last path segment of its URL:
/// `https://host/api/v1/jena/<dataset>/sparql`.
///
/// This is a heuristic that assumes the endpoint URL layout above, other layouts give
/// whatever segment happens to be in that position.
pub fn dataset_name(endpoint: &str) -> Option<&str> {
    let segments: Vec<&str> = endpoint.split('/').collect();
    if segments.len() < 2 {
        None
    } else {
        Some(segments[segments.len() - 2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn endpoints() -> Vec<String> {
        vec![
            "http://x/api/v1/jena/ds1/query".to_string(),
            "http://x/api/v1/jena/ds2/query".to_string(),
            "http://x/api/v1/jena/tensile_ds1_old/query".to_string(),
        ]
    }

    #[rstest]
    fn test_no_filter_keeps_all(endpoints: Vec<String>) {
        assert_eq!(filter_endpoints(&endpoints, &DatasetFilter::all()), endpoints);
        assert_eq!(
            filter_endpoints(&endpoints, &DatasetFilter::new(Vec::<String>::new())),
            endpoints
        );
        assert_eq!(
            filter_endpoints(&endpoints, &DatasetFilter::new([""])),
            endpoints
        );
        assert_eq!(filter_endpoints(&endpoints, &DatasetFilter::from(None)), endpoints);
    }

    #[rstest]
    fn test_substring_filter(endpoints: Vec<String>) {
        assert_eq!(
            filter_endpoints(&endpoints, &DatasetFilter::new(["ds1"])),
            vec![
                "http://x/api/v1/jena/ds1/query".to_string(),
                "http://x/api/v1/jena/tensile_ds1_old/query".to_string(),
            ]
        );
        assert_eq!(
            filter_endpoints(&endpoints, &DatasetFilter::new(["/ds2/", "nope"])),
            vec!["http://x/api/v1/jena/ds2/query".to_string()]
        );
        assert!(filter_endpoints(&endpoints, &DatasetFilter::new(["nope"])).is_empty());
    }

    #[rstest]
    fn test_filter_is_idempotent(endpoints: Vec<String>) {
        let filter = DatasetFilter::new(["ds1"]);
        let once = filter_endpoints(&endpoints, &filter);
        assert_eq!(filter_endpoints(&once, &filter), once);
    }

    #[rstest]
    #[case("http://x/api/v1/jena/ds1/query", Some("ds1"))]
    #[case("https://pmd.example.org/api/v1/jena/tensile-tests/sparql", Some("tensile-tests"))]
    #[case("http://x/api/v1/jena/ds1/", Some("ds1"))]
    #[case("ds1/query", Some("ds1"))]
    #[case("query", None)]
    fn test_dataset_name(#[case] endpoint: &str, #[case] expected: Option<&str>) {
        assert_eq!(dataset_name(endpoint), expected);
    }
}
