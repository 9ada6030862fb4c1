use actionset_config::is_unset_id;
use actionset_core::ExecutionParams;
use serde::Serialize;

use crate::domain::{ErrorMap, FormState};

fn selected_id(id: i64) -> Option<i64> {
    if is_unset_id(id) {
        None
    } else {
        Some(id)
    }
}

fn summarize_params(params: &ExecutionParams) -> String {
    if params.is_empty() {
        return "No parameters".into();
    }
    params
        .iter()
        .map(|(k, v)| match v.as_str() {
            Some(s) => format!("{k}: {s}"),
            None => format!("{k}: {v}"),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterRowVm {
    pub key: String,
    pub parameter: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionRowVm {
    pub key: String,
    pub action: String,
    pub sort_order: i32,
    pub params_summary: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionSetFormVm {
    pub title: &'static str,
    pub is_editing: bool,
    pub enabled: bool,
    pub name: String,
    pub source_id: Option<i64>,
    pub actor_id: Option<i64>,
    pub filters: Vec<FilterRowVm>,
    pub actions: Vec<ActionRowVm>,
    /// Per-field messages, as published by the validators.
    pub errors: ErrorMap,
    pub validated: bool,
    /// All messages in field order, only once a full validation has run.
    pub error_summary: Vec<String>,
}

pub fn action_set_form_vm(state: &FormState) -> ActionSetFormVm {
    let mut actions: Vec<ActionRowVm> = state
        .actions
        .iter()
        .map(|a| ActionRowVm {
            key: a.id.to_string(),
            action: a.action.clone(),
            sort_order: a.sort_order,
            params_summary: summarize_params(&a.execution_params),
        })
        .collect();
    actions.sort_by_key(|a| a.sort_order);

    let error_summary = if state.validated {
        state
            .errors
            .messages()
            .map(|(_, m)| m.to_string())
            .collect()
    } else {
        Vec::new()
    };

    ActionSetFormVm {
        title: if state.is_editing() {
            "Edit action"
        } else {
            "Create action"
        },
        is_editing: state.is_editing(),
        enabled: state.enabled,
        name: state.name.clone(),
        source_id: selected_id(state.source_id),
        actor_id: selected_id(state.actor_id),
        filters: state
            .filters
            .iter()
            .map(|f| FilterRowVm {
                key: f.id.to_string(),
                parameter: f.parameter.clone(),
                value: f.value.clone(),
            })
            .collect(),
        actions,
        errors: state.errors.clone(),
        validated: state.validated,
        error_summary,
    }
}
