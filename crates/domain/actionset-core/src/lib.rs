use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(ActionSetId);
id_newtype!(ActionId);

/// Projects are addressed by their slug (e.g. `default`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Free-form parameters handed to the action executor.
pub type ExecutionParams = serde_json::Map<String, serde_json::Value>;

fn enabled_by_default() -> bool {
    true
}

/// A stored action set as returned by the project's action set listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSet {
    pub id: ActionSetId,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "match")]
    pub trigger: ActionMatch,
    #[serde(default)]
    pub actor_id: i64,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Trigger definition: which source fires the set and which payload
/// parameters must match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionMatch {
    #[serde(default)]
    pub source_id: i64,
    #[serde(default)]
    pub payload: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: ActionId,
    pub action: String,
    pub sort_order: i32,
    #[serde(default)]
    pub execution_params: ExecutionParams,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by_user_id: Option<i64>,
}

/// Body submitted when creating or updating an action set. Carries no
/// server-assigned fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSetPayload {
    pub enabled: bool,
    pub name: String,
    #[serde(rename = "match")]
    pub trigger: ActionMatch,
    pub actor_id: i64,
    pub actions: Vec<ActionPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPayload {
    pub action: String,
    pub sort_order: i32,
    pub execution_params: ExecutionParams,
}
