use std::collections::BTreeMap;

use actionset_core::{ActionMatch, ActionPayload, ActionSetPayload};

use crate::domain::FormState;

impl FormState {
    /// The body a save would send. Synthetic row keys are dropped here; when
    /// two filters share a parameter name the later row wins.
    pub fn to_payload(&self) -> ActionSetPayload {
        let payload: BTreeMap<String, String> = self
            .filters
            .iter()
            .map(|f| (f.parameter.clone(), f.value.clone()))
            .collect();

        ActionSetPayload {
            enabled: self.enabled,
            name: self.name.clone(),
            trigger: ActionMatch {
                source_id: self.source_id,
                payload,
            },
            actor_id: self.actor_id,
            actions: self
                .actions
                .iter()
                .map(|a| ActionPayload {
                    action: a.action.clone(),
                    sort_order: a.sort_order,
                    execution_params: a.execution_params.clone(),
                })
                .collect(),
        }
    }
}
