use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use actionset_core::{ActionSet, ProjectId};

use crate::domain::EntryId;

/// Lists the action sets that already exist in a project.
pub trait ActionSetsPort: Send + Sync + 'static {
    fn list(&self, project: &ProjectId) -> anyhow::Result<Vec<ActionSet>>;
}

/// Read access to the current route's path parameters.
pub trait PathParams {
    fn get(&self, name: &str) -> Option<String>;
}

impl PathParams for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// Source of synthetic row keys for filter and action entries.
pub trait EntryIdGenerator: Send + Sync + 'static {
    fn next_id(&self) -> EntryId;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl EntryIdGenerator for UuidV4Generator {
    fn next_id(&self) -> EntryId {
        uuid::Uuid::new_v4()
    }
}

/// Hands out `00000000-…-0001`, `…-0002`, … for reproducible output.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl EntryIdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> EntryId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        uuid::Uuid::from_u128(u128::from(n))
    }
}
