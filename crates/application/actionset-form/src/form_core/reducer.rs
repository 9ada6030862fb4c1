use tracing::{debug, trace};

use crate::domain::{ErrorField, ErrorMap, FieldUpdate, FormState};
use crate::error::ValidationError;
use crate::validation::{check_actions, check_actor_id, check_name, check_source_id};

use super::events::FormEvent;

pub fn reduce(mut state: FormState, ev: FormEvent) -> FormState {
    trace!(event = ev.label(), "reducing form event");

    match ev {
        FormEvent::Reload { editing, fields } => {
            state.editing = editing;
            state.apply_fields(fields);
            state.errors = ErrorMap::default();
            state.validated = false;
        }

        FormEvent::SiblingsLoaded { request, siblings } => {
            if request < state.siblings_request {
                debug!(
                    request,
                    applied = state.siblings_request,
                    "dropping stale sibling listing"
                );
            } else {
                state.siblings_request = request;
                state.siblings = siblings;
            }
        }

        FormEvent::SetField(update) => apply_field(&mut state, update),

        FormEvent::SetErrors(errors) => state.errors = errors,

        FormEvent::ValidateName(name) => {
            let outcome = check_name(&name, state.editing, &state.siblings);
            publish(&mut state.errors, ErrorField::Name, outcome);
        }

        FormEvent::ValidateSourceId(id) => {
            publish(&mut state.errors, ErrorField::Trigger, check_source_id(id));
        }

        FormEvent::ValidateActorId(id) => {
            publish(&mut state.errors, ErrorField::Actor, check_actor_id(id));
        }

        FormEvent::ValidateActions(actions) => {
            publish(&mut state.errors, ErrorField::Actions, check_actions(&actions));
        }

        FormEvent::Validate => {
            // Every check runs so that all messages show up at once.
            let outcomes = [
                (
                    ErrorField::Name,
                    check_name(&state.name, state.editing, &state.siblings),
                ),
                (ErrorField::Trigger, check_source_id(state.source_id)),
                (ErrorField::Actor, check_actor_id(state.actor_id)),
                (ErrorField::Actions, check_actions(&state.actions)),
            ];
            for (field, outcome) in outcomes {
                publish(&mut state.errors, field, outcome);
            }
            state.validated = true;
        }
    }
    state
}

fn apply_field(state: &mut FormState, update: FieldUpdate) {
    match update {
        FieldUpdate::Enabled(v) => state.enabled = v,
        FieldUpdate::Name(v) => state.name = v,
        FieldUpdate::SourceId(v) => state.source_id = v,
        FieldUpdate::Filters(v) => state.filters = v,
        FieldUpdate::ActorId(v) => state.actor_id = v,
        FieldUpdate::Actions(v) => state.actions = v,
    }
}

fn publish(errors: &mut ErrorMap, field: ErrorField, outcome: Result<(), ValidationError>) {
    match outcome {
        Ok(()) => errors.clear(field),
        Err(e) => errors.set(field, e.to_string()),
    }
}
