use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use tracing::info;

use actionset_config::PROJECT_ID_PARAM;
use actionset_core::{ActionSet, ActionSetId};
use actionset_form::{
    action_set_form_vm, ActionEntry, ActionSetsPort, EntryIdGenerator, FilterEntry, FormKernel,
    FormState, FormStore, SequentialIdGenerator, UuidV4Generator,
};

use crate::sources::{read_listing, read_record, JsonFileActionSets};
use crate::{FieldEdits, FormArgs};

/// Loads the form, applies the requested edits and runs a full validation.
pub fn evaluate(args: &FormArgs) -> Result<FormState> {
    if args.stable_ids {
        evaluate_with(args, SequentialIdGenerator::default())
    } else {
        evaluate_with(args, UuidV4Generator)
    }
}

fn evaluate_with<G: EntryIdGenerator>(args: &FormArgs, ids: G) -> Result<FormState> {
    let route = HashMap::from([(PROJECT_ID_PARAM.to_string(), args.project.clone())]);
    let mut kernel = FormKernel::new(
        FormStore::default(),
        &route,
        JsonFileActionSets::new(args.siblings.clone()),
        ids,
    )?;

    let source = resolve_source(args)?;
    kernel.reload(source);
    kernel.load_siblings_now();
    apply_edits(&mut kernel, &args.edits);

    let valid = kernel.validate();
    info!(project = %kernel.project_id(), valid, "validated action set form");
    Ok(kernel.store.state())
}

fn resolve_source(args: &FormArgs) -> Result<Option<ActionSet>> {
    if let Some(path) = &args.record {
        return Ok(Some(read_record(path)?));
    }

    match (args.edit, &args.siblings) {
        (Some(id), Some(path)) => {
            let found = read_listing(path)?
                .into_iter()
                .find(|s| s.id == ActionSetId(id))
                .ok_or_else(|| anyhow!("Action set {id} not found in {path}"))?;
            Ok(Some(found))
        }
        (Some(_), None) => bail!("--edit needs --siblings"),
        (None, _) => Ok(None),
    }
}

fn apply_edits<A, G>(kernel: &mut FormKernel<A, G>, edits: &FieldEdits)
where
    A: ActionSetsPort,
    G: EntryIdGenerator,
{
    if let Some(enabled) = edits.enabled {
        kernel.set_enabled(enabled);
    }
    if let Some(name) = &edits.name {
        kernel.set_name(name.clone());
    }
    if let Some(id) = edits.source_id {
        kernel.set_source_id(id);
    }
    if let Some(id) = edits.actor_id {
        kernel.set_actor_id(id);
    }

    if edits.clear_filters {
        kernel.set_filters(Vec::new());
    } else if !edits.filters.is_empty() {
        let filters = edits
            .filters
            .iter()
            .map(|(parameter, value)| FilterEntry {
                id: kernel.next_entry_id(),
                parameter: parameter.clone(),
                value: value.clone(),
            })
            .collect();
        kernel.set_filters(filters);
    }

    if edits.clear_actions {
        kernel.set_actions(Vec::new());
    } else if !edits.actions.is_empty() {
        let actions = edits
            .actions
            .iter()
            .zip(1..)
            .map(|(kind, sort_order)| ActionEntry {
                id: kernel.next_entry_id(),
                action: kind.clone(),
                sort_order,
                execution_params: Default::default(),
            })
            .collect();
        kernel.set_actions(actions);
    }
}

/// Prints the form view as JSON. Returns whether the form is valid.
pub fn cmd_check(args: &FormArgs) -> Result<bool> {
    let state = evaluate(args)?;
    let vm = action_set_form_vm(&state);
    println!("{}", serde_json::to_string_pretty(&vm)?);
    Ok(state.errors.is_clear())
}

/// Prints the submit body, or fails with the validation messages.
pub fn cmd_payload(args: &FormArgs) -> Result<()> {
    let state = evaluate(args)?;
    if !state.errors.is_clear() {
        let messages: Vec<String> = state
            .errors
            .messages()
            .map(|(field, msg)| format!("{}: {msg}", field.key()))
            .collect();
        bail!("Action set form is invalid:\n  {}", messages.join("\n  "));
    }
    println!("{}", serde_json::to_string_pretty(&state.to_payload())?);
    Ok(())
}
