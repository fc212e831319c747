use serde::{Deserialize, Serialize};

/// Transport shape of a student. `id` is absent/null on creation requests and
/// always populated on responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
}
