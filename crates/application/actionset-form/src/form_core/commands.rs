use actionset_core::ActionSet;

use crate::domain::{ActionEntry, ErrorMap, FieldUpdate};

#[derive(Debug, Clone)]
pub enum FormCommand {
    // Lifecycle
    Reload(Option<ActionSet>),
    BindSource(Option<ActionSet>),
    RefreshSiblings,

    // Editing
    SetField(FieldUpdate),
    SetErrors(ErrorMap),

    // Validation
    ValidateName(String),
    ValidateSourceId(i64),
    ValidateActorId(i64),
    ValidateActions(Vec<ActionEntry>),
    Validate,
}
