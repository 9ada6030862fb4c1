//! Per-field checks. Each one is independent of the others and of the
//! error map; the reducer decides where the outcome is published.

use actionset_config::is_unset_id;
use actionset_core::{ActionSet, ActionSetId};

use crate::domain::ActionEntry;
use crate::error::ValidationError;

/// A name must be non-empty and not used by any other action set. The
/// record being edited is excluded by id so it can keep its own name.
pub fn check_name(
    name: &str,
    editing: Option<ActionSetId>,
    siblings: &[ActionSet],
) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    let taken = siblings
        .iter()
        .any(|s| Some(s.id) != editing && s.name == name);
    if taken {
        return Err(ValidationError::NameNotUnique);
    }

    Ok(())
}

pub fn check_source_id(source_id: i64) -> Result<(), ValidationError> {
    if is_unset_id(source_id) {
        return Err(ValidationError::TriggerRequired);
    }
    Ok(())
}

pub fn check_actor_id(actor_id: i64) -> Result<(), ValidationError> {
    if is_unset_id(actor_id) {
        return Err(ValidationError::ActorRequired);
    }
    Ok(())
}

pub fn check_actions(actions: &[ActionEntry]) -> Result<(), ValidationError> {
    if actions.is_empty() {
        return Err(ValidationError::ActionsRequired);
    }
    Ok(())
}
