//! Central constants for the action set form: sentinels, routing keys and
//! the user-facing validation messages.

/// Marker for an identifier field that has not been chosen yet.
pub const UNSET_ID: i64 = 0;

/// Path parameter carrying the project the form is scoped to.
pub const PROJECT_ID_PARAM: &str = "projectId";

/// Shown when the name field is empty.
pub const NAME_REQUIRED_MSG: &str = "Name is required.";

/// Shown when another action set in the project already uses the name.
pub const NAME_NOT_UNIQUE_MSG: &str = "Name must be unique.";

/// Shown when no trigger source has been selected.
pub const TRIGGER_REQUIRED_MSG: &str = "Incoming webhook is required.";

/// Shown when no actor has been selected.
pub const ACTOR_REQUIRED_MSG: &str = "Service account is required.";

/// Shown when the action list is empty.
pub const ACTIONS_REQUIRED_MSG: &str = "At least one action is required.";

/// True when `id` still holds the unset sentinel.
pub fn is_unset_id(id: i64) -> bool {
    id == UNSET_ID
}
