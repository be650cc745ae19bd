use serde::{Deserialize, Serialize};

/// One fragment injection: fetch `url`, replace the content of the
/// container whose id is `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentRequest {
    pub url: String,
    pub target: String,
}

impl FragmentRequest {
    pub fn new(url: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            target: target.into(),
        }
    }
}

/// A content fragment that failed during the non-fatal phase.
#[derive(Debug, Clone)]
pub struct ContentFailure {
    pub request: FragmentRequest,
    pub reason: String,
}
