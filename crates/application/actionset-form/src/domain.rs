use actionset_config::UNSET_ID;
use actionset_core::{ActionSet, ActionSetId, ExecutionParams};
use serde::{Deserialize, Serialize};

use crate::ports::EntryIdGenerator;

/// Synthetic key for list rows. Generated on load and never persisted.
pub type EntryId = uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub id: EntryId,
    pub parameter: String,
    pub value: String,
}

/// An action as edited in the form: the stored action minus its id,
/// creation timestamp and creator, keyed by a synthetic id instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry {
    pub id: EntryId,
    pub action: String,
    pub sort_order: i32,
    pub execution_params: ExecutionParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorField {
    Name,
    Trigger,
    Actor,
    Actions,
}

impl ErrorField {
    pub const ALL: [ErrorField; 4] = [
        ErrorField::Name,
        ErrorField::Trigger,
        ErrorField::Actor,
        ErrorField::Actions,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ErrorField::Name => "name",
            ErrorField::Trigger => "trigger",
            ErrorField::Actor => "actor",
            ErrorField::Actions => "actions",
        }
    }
}

/// One optional message per validated field. `None` means valid or not
/// checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMap {
    pub name: Option<String>,
    pub trigger: Option<String>,
    pub actor: Option<String>,
    pub actions: Option<String>,
}

impl ErrorMap {
    pub fn get(&self, field: ErrorField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: ErrorField, message: impl Into<String>) {
        *self.slot_mut(field) = Some(message.into());
    }

    pub fn clear(&mut self, field: ErrorField) {
        *self.slot_mut(field) = None;
    }

    pub fn is_clear(&self) -> bool {
        ErrorField::ALL.iter().all(|f| self.slot(*f).is_none())
    }

    /// Set messages in field order.
    pub fn messages(&self) -> impl Iterator<Item = (ErrorField, &str)> + '_ {
        ErrorField::ALL
            .into_iter()
            .filter_map(move |f| self.get(f).map(|m| (f, m)))
    }

    fn slot(&self, field: ErrorField) -> &Option<String> {
        match field {
            ErrorField::Name => &self.name,
            ErrorField::Trigger => &self.trigger,
            ErrorField::Actor => &self.actor,
            ErrorField::Actions => &self.actions,
        }
    }

    fn slot_mut(&mut self, field: ErrorField) -> &mut Option<String> {
        match field {
            ErrorField::Name => &mut self.name,
            ErrorField::Trigger => &mut self.trigger,
            ErrorField::Actor => &mut self.actor,
            ErrorField::Actions => &mut self.actions,
        }
    }
}

/// The editable values, as produced by a reload.
#[derive(Debug, Clone, PartialEq)]
pub struct FormFields {
    pub enabled: bool,
    pub name: String,
    pub source_id: i64,
    pub filters: Vec<FilterEntry>,
    pub actor_id: i64,
    pub actions: Vec<ActionEntry>,
}

impl Default for FormFields {
    fn default() -> Self {
        Self {
            enabled: true,
            name: String::new(),
            source_id: UNSET_ID,
            filters: Vec::new(),
            actor_id: UNSET_ID,
            actions: Vec::new(),
        }
    }
}

impl FormFields {
    /// Builds the field values for `source`, or the create-new defaults when
    /// there is none. Every filter and action gets a fresh key from `ids`.
    pub fn from_source(source: Option<&ActionSet>, ids: &dyn EntryIdGenerator) -> Self {
        let Some(set) = source else {
            return Self::default();
        };

        let filters = set
            .trigger
            .payload
            .iter()
            .map(|(parameter, value)| FilterEntry {
                id: ids.next_id(),
                parameter: parameter.clone(),
                value: value.clone(),
            })
            .collect();

        let actions = set
            .actions
            .iter()
            .map(|a| ActionEntry {
                id: ids.next_id(),
                action: a.action.clone(),
                sort_order: a.sort_order,
                execution_params: a.execution_params.clone(),
            })
            .collect();

        Self {
            enabled: set.enabled,
            name: set.name.clone(),
            source_id: set.trigger.source_id,
            filters,
            actor_id: set.actor_id,
            actions,
        }
    }
}

/// Replace-whole-value field mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Enabled(bool),
    Name(String),
    SourceId(i64),
    Filters(Vec<FilterEntry>),
    ActorId(i64),
    Actions(Vec<ActionEntry>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    /// Identity of the record being edited; `None` when creating.
    pub editing: Option<ActionSetId>,
    /// Other action sets in the project, used for the name uniqueness check.
    pub siblings: Vec<ActionSet>,
    /// Request number of the listing `siblings` came from.
    pub siblings_request: u64,

    pub enabled: bool,
    pub name: String,
    pub source_id: i64,
    pub filters: Vec<FilterEntry>,
    pub actor_id: i64,
    pub actions: Vec<ActionEntry>,

    pub errors: ErrorMap,
    pub validated: bool,
}

impl Default for FormState {
    fn default() -> Self {
        let fields = FormFields::default();
        Self {
            editing: None,
            siblings: Vec::new(),
            siblings_request: 0,
            enabled: fields.enabled,
            name: fields.name,
            source_id: fields.source_id,
            filters: fields.filters,
            actor_id: fields.actor_id,
            actions: fields.actions,
            errors: ErrorMap::default(),
            validated: false,
        }
    }
}

impl FormState {
    pub(crate) fn apply_fields(&mut self, fields: FormFields) {
        self.enabled = fields.enabled;
        self.name = fields.name;
        self.source_id = fields.source_id;
        self.filters = fields.filters;
        self.actor_id = fields.actor_id;
        self.actions = fields.actions;
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}
