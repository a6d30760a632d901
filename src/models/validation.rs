use serde::{Deserialize, Serialize};

/// Result of checking a query before it is submitted.
///
/// Errors block submission; warnings and suggestions are advisory.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub suggestions: Vec<String>,
}
