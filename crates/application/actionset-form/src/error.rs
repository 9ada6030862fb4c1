use actionset_config::{
    ACTIONS_REQUIRED_MSG, ACTOR_REQUIRED_MSG, NAME_NOT_UNIQUE_MSG, NAME_REQUIRED_MSG,
    TRIGGER_REQUIRED_MSG,
};

use crate::domain::ErrorField;

/// A failed field check. `Display` renders the message shown next to the
/// offending input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{}", NAME_REQUIRED_MSG)]
    NameRequired,
    #[error("{}", NAME_NOT_UNIQUE_MSG)]
    NameNotUnique,
    #[error("{}", TRIGGER_REQUIRED_MSG)]
    TriggerRequired,
    #[error("{}", ACTOR_REQUIRED_MSG)]
    ActorRequired,
    #[error("{}", ACTIONS_REQUIRED_MSG)]
    ActionsRequired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    MissingRequiredField,
    DuplicateName,
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::NameNotUnique => ValidationErrorKind::DuplicateName,
            ValidationError::NameRequired
            | ValidationError::TriggerRequired
            | ValidationError::ActorRequired
            | ValidationError::ActionsRequired => ValidationErrorKind::MissingRequiredField,
        }
    }

    /// The error slot this failure is published to.
    pub fn field(&self) -> ErrorField {
        match self {
            ValidationError::NameRequired | ValidationError::NameNotUnique => ErrorField::Name,
            ValidationError::TriggerRequired => ErrorField::Trigger,
            ValidationError::ActorRequired => ErrorField::Actor,
            ValidationError::ActionsRequired => ErrorField::Actions,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("missing required path parameter `{0}`")]
    MissingPathParam(String),
}
