use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use tracing::debug;

use actionset_core::{ActionSet, ProjectId};
use actionset_form::ActionSetsPort;

/// Accepts both a bare array and the `{ "actions": [...] }` envelope the
/// listing endpoint returns.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Envelope { actions: Vec<ActionSet> },
    Bare(Vec<ActionSet>),
}

pub fn read_listing(path: &Utf8Path) -> Result<Vec<ActionSet>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    let listing: Listing = serde_json::from_str(&content)
        .with_context(|| format!("Invalid action set listing in {path}"))?;
    Ok(match listing {
        Listing::Envelope { actions } => actions,
        Listing::Bare(actions) => actions,
    })
}

pub fn read_record(path: &Utf8Path) -> Result<ActionSet> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid action set in {path}"))
}

/// Serves a saved listing; the file is re-read on every call.
pub struct JsonFileActionSets {
    path: Option<Utf8PathBuf>,
}

impl JsonFileActionSets {
    pub fn new(path: Option<Utf8PathBuf>) -> Self {
        Self { path }
    }
}

impl ActionSetsPort for JsonFileActionSets {
    fn list(&self, project: &ProjectId) -> Result<Vec<ActionSet>> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };
        let sets = read_listing(path)?;
        debug!(project = %project, count = sets.len(), "loaded sibling listing from {path}");
        Ok(sets)
    }
}
