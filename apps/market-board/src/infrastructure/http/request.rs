//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::pagination::{NavigationAction, PageSize};

/// Request to run a pager action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigateRequest {
    /// `first`, `previous`, `next` or `last`.
    pub action: NavigationAction,
}

/// Request to jump to a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPageRequest {
    /// Zero-based page index. Not clamped.
    pub page: usize,
}

/// Request to change rows per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPageSizeRequest {
    /// Rows per page, or `"all"` (also `-1`).
    pub page_size: PageSize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(r#"{"action": "first"}"#, NavigationAction::First)]
    #[test_case(r#"{"action": "previous"}"#, NavigationAction::Previous)]
    #[test_case(r#"{"action": "next"}"#, NavigationAction::Next)]
    #[test_case(r#"{"action": "last"}"#, NavigationAction::Last)]
    fn navigate_request_parses(body: &str, expected: NavigationAction) {
        let request: NavigateRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.action, expected);
    }

    #[test]
    fn unknown_action_rejected() {
        assert!(serde_json::from_str::<NavigateRequest>(r#"{"action": "skip"}"#).is_err());
    }

    #[test]
    fn negative_page_rejected() {
        assert!(serde_json::from_str::<SetPageRequest>(r#"{"page": -1}"#).is_err());
    }

    #[test_case(r#"{"page_size": 25}"#, Some(25) ; "fixed")]
    #[test_case(r#"{"page_size": "all"}"#, None ; "all keyword")]
    #[test_case(r#"{"page_size": -1}"#, None ; "all sentinel")]
    fn page_size_request_parses(body: &str, rows: Option<usize>) {
        let request: SetPageSizeRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.page_size.rows(), rows);
    }
}
