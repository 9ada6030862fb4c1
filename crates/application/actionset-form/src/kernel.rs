use std::sync::Arc;

use actionset_config::PROJECT_ID_PARAM;
use actionset_core::{ActionSet, ProjectId};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::{
    ActionEntry, EntryId, ErrorField, ErrorMap, FieldUpdate, FilterEntry, FormFields,
};
use crate::error::FormError;
use crate::form_core::{FormCommand, FormEvent, FormStore};
use crate::ports::{ActionSetsPort, EntryIdGenerator, PathParams};

/// Drives one action set form: turns commands into reducer events and
/// feeds the sibling listing back in as it arrives.
pub struct FormKernel<A, G> {
    pub store: FormStore,
    project_id: ProjectId,
    action_sets: Arc<A>,
    ids: G,
    source: Option<ActionSet>,
    sibling_requests: u64,

    tx: mpsc::Sender<FormEvent>,
    rx: mpsc::Receiver<FormEvent>,
}

impl<A, G> FormKernel<A, G>
where
    A: ActionSetsPort,
    G: EntryIdGenerator,
{
    /// Resolves the project from the route and resets the form to the
    /// create-new defaults.
    pub fn new(
        store: FormStore,
        params: &impl PathParams,
        action_sets: A,
        ids: G,
    ) -> Result<Self, FormError> {
        let project_id = params
            .get(PROJECT_ID_PARAM)
            .map(ProjectId::new)
            .ok_or_else(|| FormError::MissingPathParam(PROJECT_ID_PARAM.to_string()))?;

        let (tx, rx) = mpsc::channel(100);
        let kernel = Self {
            store,
            project_id,
            action_sets: Arc::new(action_sets),
            ids,
            source: None,
            sibling_requests: 0,
            tx,
            rx,
        };
        kernel.reload_from_source();
        Ok(kernel)
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// The record the form was last loaded from.
    pub fn source(&self) -> Option<&ActionSet> {
        self.source.as_ref()
    }

    pub fn dispatch(&mut self, cmd: FormCommand) {
        match cmd {
            FormCommand::Reload(source) => {
                self.source = source;
                self.reload_from_source();
            }

            FormCommand::BindSource(source) => {
                if self.source == source {
                    debug!("source record unchanged, keeping form state");
                    return;
                }
                self.source = source;
                self.reload_from_source();
            }

            FormCommand::RefreshSiblings => self.spawn_sibling_fetch(),

            FormCommand::SetField(update) => self.store.apply(FormEvent::SetField(update)),

            FormCommand::SetErrors(errors) => self.store.apply(FormEvent::SetErrors(errors)),

            FormCommand::ValidateName(name) => self.store.apply(FormEvent::ValidateName(name)),

            FormCommand::ValidateSourceId(id) => self.store.apply(FormEvent::ValidateSourceId(id)),

            FormCommand::ValidateActorId(id) => self.store.apply(FormEvent::ValidateActorId(id)),

            FormCommand::ValidateActions(actions) => {
                self.store.apply(FormEvent::ValidateActions(actions))
            }

            FormCommand::Validate => self.store.apply(FormEvent::Validate),
        }
    }

    /// Applies events delivered from worker threads.
    pub fn tick(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            self.store.apply(ev);
        }
    }

    pub fn sender(&self) -> mpsc::Sender<FormEvent> {
        self.tx.clone()
    }

    // --- Lifecycle ---

    /// Re-populates every field from `source` (or the defaults) and clears
    /// validation state.
    pub fn reload(&mut self, source: Option<ActionSet>) {
        self.dispatch(FormCommand::Reload(source));
    }

    /// Reloads only when `source` differs from the record currently loaded.
    pub fn bind_source(&mut self, source: Option<ActionSet>) {
        self.dispatch(FormCommand::BindSource(source));
    }

    pub fn refresh_siblings(&mut self) {
        self.dispatch(FormCommand::RefreshSiblings);
    }

    fn reload_from_source(&self) {
        let fields = FormFields::from_source(self.source.as_ref(), &self.ids);
        let editing = self.source.as_ref().map(|s| s.id);
        debug!(
            project = %self.project_id,
            editing = ?editing,
            filters = fields.filters.len(),
            actions = fields.actions.len(),
            "reloading action set form"
        );
        self.store.apply(FormEvent::Reload { editing, fields });
    }

    /// Lists siblings on the calling thread. For hosts without an event
    /// loop to drive `tick`.
    pub fn load_siblings_now(&mut self) {
        let request = self.next_sibling_request();
        if let Some(siblings) = list_siblings(self.action_sets.as_ref(), &self.project_id) {
            self.store.apply(FormEvent::SiblingsLoaded { request, siblings });
        }
    }

    fn spawn_sibling_fetch(&mut self) {
        let request = self.next_sibling_request();
        let action_sets = self.action_sets.clone();
        let project_id = self.project_id.clone();
        let tx = self.tx.clone();

        let spawn_res = std::thread::Builder::new()
            .name("actionset-list-siblings".into())
            .spawn(move || {
                if let Some(siblings) = list_siblings(action_sets.as_ref(), &project_id) {
                    let _ = tx.blocking_send(FormEvent::SiblingsLoaded { request, siblings });
                }
            });

        if let Err(e) = spawn_res {
            warn!("failed to start sibling fetch worker thread: {e}");
        }
    }

    fn next_sibling_request(&mut self) -> u64 {
        self.sibling_requests += 1;
        self.sibling_requests
    }

    /// Fresh key for a row the host adds to the filter or action list.
    pub fn next_entry_id(&self) -> EntryId {
        self.ids.next_id()
    }

    // --- Setters ---

    pub fn set_enabled(&mut self, enabled: bool) {
        self.dispatch(FormCommand::SetField(FieldUpdate::Enabled(enabled)));
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.dispatch(FormCommand::SetField(FieldUpdate::Name(name.into())));
    }

    pub fn set_source_id(&mut self, source_id: i64) {
        self.dispatch(FormCommand::SetField(FieldUpdate::SourceId(source_id)));
    }

    pub fn set_filters(&mut self, filters: Vec<FilterEntry>) {
        self.dispatch(FormCommand::SetField(FieldUpdate::Filters(filters)));
    }

    pub fn set_actor_id(&mut self, actor_id: i64) {
        self.dispatch(FormCommand::SetField(FieldUpdate::ActorId(actor_id)));
    }

    pub fn set_actions(&mut self, actions: Vec<ActionEntry>) {
        self.dispatch(FormCommand::SetField(FieldUpdate::Actions(actions)));
    }

    pub fn set_errors(&mut self, errors: ErrorMap) {
        self.dispatch(FormCommand::SetErrors(errors));
    }

    // --- Validation ---

    /// Runs every field check, marks the form validated and reports whether
    /// all of them passed.
    pub fn validate(&mut self) -> bool {
        self.dispatch(FormCommand::Validate);
        self.store.read(|s| s.errors.is_clear())
    }

    pub fn validate_name(&mut self, name: impl Into<String>) -> bool {
        self.dispatch(FormCommand::ValidateName(name.into()));
        self.field_is_valid(ErrorField::Name)
    }

    pub fn validate_source_id(&mut self, source_id: i64) -> bool {
        self.dispatch(FormCommand::ValidateSourceId(source_id));
        self.field_is_valid(ErrorField::Trigger)
    }

    pub fn validate_actor_id(&mut self, actor_id: i64) -> bool {
        self.dispatch(FormCommand::ValidateActorId(actor_id));
        self.field_is_valid(ErrorField::Actor)
    }

    pub fn validate_actions(&mut self, actions: Vec<ActionEntry>) -> bool {
        self.dispatch(FormCommand::ValidateActions(actions));
        self.field_is_valid(ErrorField::Actions)
    }

    fn field_is_valid(&self, field: ErrorField) -> bool {
        self.store.read(|s| s.errors.get(field).is_none())
    }
}

/// `None` on failure, so the last good listing stays in place.
fn list_siblings<A: ActionSetsPort>(
    action_sets: &A,
    project_id: &ProjectId,
) -> Option<Vec<ActionSet>> {
    debug!(project = %project_id, "fetching sibling action sets");
    match action_sets.list(project_id) {
        Ok(list) => Some(list),
        Err(e) => {
            warn!(project = %project_id, "failed to list action sets: {e:#}");
            None
        }
    }
}
