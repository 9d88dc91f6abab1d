//! Query parameters for list and enumerate calls
//!
//! Values are only forwarded; Bitbucket validates filter and sort
//! expressions itself.

use crate::models::PullRequestState;
use crate::types::QueryParams;

/// Legacy parameter shape for list calls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParameters {
    /// Maximum number of items returned; `0` returns everything
    pub max: usize,
    /// BBQL filter expression, sent as `q`
    pub filter: Option<String>,
    /// Sort field, prefixed with `-` for descending order
    pub sort: Option<String>,
}

impl ListParameters {
    pub fn to_query_params(&self) -> QueryParams {
        let mut query = QueryParams::new();
        push_filter_and_sort(&mut query, self.filter.as_deref(), self.sort.as_deref());
        query
    }
}

/// Parameters for [`list_pull_requests_with`](super::PullRequestsResource::list_pull_requests_with)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPullRequestsParameters {
    /// Maximum number of items returned; `0` returns everything
    pub max: usize,
    /// BBQL filter expression, sent as `q`
    pub filter: Option<String>,
    /// Sort field, prefixed with `-` for descending order
    pub sort: Option<String>,
    /// States to include; empty lets the server apply its default (`OPEN`)
    pub states: Vec<PullRequestState>,
}

impl ListPullRequestsParameters {
    /// Builder-style state filter
    #[must_use]
    pub fn with_states(mut self, states: impl IntoIterator<Item = PullRequestState>) -> Self {
        self.states = states.into_iter().collect();
        self
    }

    pub fn to_query_params(&self) -> QueryParams {
        let mut query = QueryParams::new();
        push_filter_and_sort(&mut query, self.filter.as_deref(), self.sort.as_deref());
        push_states(&mut query, &self.states);
        query
    }
}

impl From<&ListParameters> for ListPullRequestsParameters {
    fn from(params: &ListParameters) -> Self {
        Self {
            max: params.max,
            filter: params.filter.clone(),
            sort: params.sort.clone(),
            states: Vec::new(),
        }
    }
}

/// Parameters for [`enumerate_pull_requests_with`](super::PullRequestsResource::enumerate_pull_requests_with)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumeratePullRequestsParameters {
    /// Items per page; `None` uses the server default
    pub page_len: Option<u32>,
    /// BBQL filter expression, sent as `q`
    pub filter: Option<String>,
    /// Sort field, prefixed with `-` for descending order
    pub sort: Option<String>,
    /// States to include; empty lets the server apply its default (`OPEN`)
    pub states: Vec<PullRequestState>,
}

impl EnumeratePullRequestsParameters {
    #[must_use]
    pub fn with_page_len(mut self, page_len: u32) -> Self {
        self.page_len = Some(page_len);
        self
    }

    #[must_use]
    pub fn with_states(mut self, states: impl IntoIterator<Item = PullRequestState>) -> Self {
        self.states = states.into_iter().collect();
        self
    }

    pub fn to_query_params(&self) -> QueryParams {
        let mut query = EnumerateParameters {
            page_len: self.page_len,
        }
        .to_query_params();
        push_filter_and_sort(&mut query, self.filter.as_deref(), self.sort.as_deref());
        push_states(&mut query, &self.states);
        query
    }
}

/// Page length for activity and comment enumerations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerateParameters {
    /// Items per page; `None` uses the server default
    pub page_len: Option<u32>,
}

impl EnumerateParameters {
    pub fn to_query_params(&self) -> QueryParams {
        self.page_len
            .map(|len| vec![("pagelen".to_string(), len.to_string())])
            .unwrap_or_default()
    }
}

fn push_filter_and_sort(query: &mut QueryParams, filter: Option<&str>, sort: Option<&str>) {
    if let Some(filter) = filter.filter(|f| !f.is_empty()) {
        query.push(("q".to_string(), filter.to_string()));
    }
    if let Some(sort) = sort.filter(|s| !s.is_empty()) {
        query.push(("sort".to_string(), sort.to_string()));
    }
}

fn push_states(query: &mut QueryParams, states: &[PullRequestState]) {
    query.extend(
        states
            .iter()
            .map(|state| ("state".to_string(), state.as_str().to_string())),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(query: &QueryParams) -> Vec<(&str, &str)> {
        query.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    #[test]
    fn test_default_parameters_send_nothing() {
        assert!(ListParameters::default().to_query_params().is_empty());
        assert!(ListPullRequestsParameters::default().to_query_params().is_empty());
        assert!(EnumeratePullRequestsParameters::default().to_query_params().is_empty());
        assert!(EnumerateParameters::default().to_query_params().is_empty());
    }

    #[test]
    fn test_list_pull_requests_query() {
        let params = ListPullRequestsParameters {
            max: 5,
            filter: Some("author.nickname = \"sam\"".to_string()),
            sort: Some("-updated_on".to_string()),
            ..Default::default()
        }
        .with_states([PullRequestState::Open, PullRequestState::Merged]);

        assert_eq!(
            pairs(&params.to_query_params()),
            vec![
                ("q", "author.nickname = \"sam\""),
                ("sort", "-updated_on"),
                ("state", "OPEN"),
                ("state", "MERGED"),
            ]
        );
    }

    #[test]
    fn test_enumerate_pull_requests_query() {
        let params = EnumeratePullRequestsParameters::default()
            .with_page_len(50)
            .with_states([PullRequestState::Declined]);

        assert_eq!(
            pairs(&params.to_query_params()),
            vec![("pagelen", "50"), ("state", "DECLINED")]
        );
    }

    #[test]
    fn test_empty_filter_is_not_sent() {
        let params = ListParameters {
            filter: Some(String::new()),
            sort: Some("id".to_string()),
            ..Default::default()
        };
        assert_eq!(pairs(&params.to_query_params()), vec![("sort", "id")]);
    }

    #[test]
    fn test_list_parameters_conversion() {
        let legacy = ListParameters {
            max: 3,
            filter: Some("state = \"OPEN\"".to_string()),
            sort: None,
        };
        let converted = ListPullRequestsParameters::from(&legacy);
        assert_eq!(converted.max, 3);
        assert_eq!(converted.filter, legacy.filter);
        assert!(converted.states.is_empty());
        assert_eq!(converted.to_query_params(), legacy.to_query_params());
    }
}
