use actionset_core::{ActionSet, ActionSetId};

use crate::domain::{ActionEntry, ErrorMap, FieldUpdate, FormFields};

#[derive(Debug, Clone)]
pub enum FormEvent {
    // Lifecycle
    Reload {
        editing: Option<ActionSetId>,
        fields: FormFields,
    },
    /// `request` orders listings; one older than the last applied is dropped.
    SiblingsLoaded {
        request: u64,
        siblings: Vec<ActionSet>,
    },

    // Editing
    SetField(FieldUpdate),
    SetErrors(ErrorMap),

    // Single-field validation
    ValidateName(String),
    ValidateSourceId(i64),
    ValidateActorId(i64),
    ValidateActions(Vec<ActionEntry>),

    // Whole-form validation
    Validate,
}

impl FormEvent {
    pub fn label(&self) -> &'static str {
        match self {
            FormEvent::Reload { .. } => "reload",
            FormEvent::SiblingsLoaded { .. } => "siblings_loaded",
            FormEvent::SetField(_) => "set_field",
            FormEvent::SetErrors(_) => "set_errors",
            FormEvent::ValidateName(_) => "validate_name",
            FormEvent::ValidateSourceId(_) => "validate_source_id",
            FormEvent::ValidateActorId(_) => "validate_actor_id",
            FormEvent::ValidateActions(_) => "validate_actions",
            FormEvent::Validate => "validate",
        }
    }
}
