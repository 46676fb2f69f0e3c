//! Response contract of the backend proxy.
//!
//! The HTTP client itself lives outside this workspace; these types only
//! describe the envelope every endpoint returns so callers can unwrap it
//! uniformly.  A failed call degrades to `None` -- "no data available now" --
//! never to a terminal error.

use serde::{Deserialize, Serialize};

/// Envelope returned by every backend endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Collapse the envelope into the payload, treating any failure as an
    /// absent result.
    pub fn into_option(self) -> Option<T> {
        if self.success {
            self.data
        } else {
            None
        }
    }
}

/// Endpoint paths served by the backend proxy.
pub mod endpoints {
    pub const LOGIN: &str = "/login";
    pub const PLANNING: &str = "/planning";
    pub const GRADES: &str = "/grades";
    pub const ABSENCES: &str = "/absences";
    pub const ASSOCIATIONS: &str = "/associations";
    pub const MESSAGES: &str = "/messages";
    pub const UPDATES: &str = "/updates";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_collapses_to_none_even_with_data() {
        let resp = ApiResponse {
            success: false,
            data: Some(42),
            error: Some("identifiants invalides".into()),
        };
        assert_eq!(resp.into_option(), None);
    }

    #[test]
    fn success_yields_the_payload() {
        let resp: ApiResponse<Vec<String>> =
            serde_json::from_str(r#"{"success":true,"data":["a","b"]}"#).unwrap();
        assert_eq!(resp.into_option().unwrap().len(), 2);
    }
}
