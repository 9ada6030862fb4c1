use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc as std_mpsc, Mutex};
use std::time::{Duration, Instant};

use actionset_core::{Action, ActionId, ActionMatch, ActionSet, ActionSetId, ProjectId};
use actionset_form::{
    action_set_form_vm, ActionSetsPort, FormCommand, FormError, FormEvent, FormKernel, FormStore,
    UuidV4Generator,
};
use chrono::{TimeZone, Utc};

struct StaticActionSets(Vec<ActionSet>);
impl ActionSetsPort for StaticActionSets {
    fn list(&self, project: &ProjectId) -> anyhow::Result<Vec<ActionSet>> {
        assert_eq!(project.as_str(), "default");
        Ok(self.0.clone())
    }
}

/// Lists one record on the first call and fails on every later one.
/// Signals `listed` after each call.
struct FlakyActionSets {
    calls: AtomicUsize,
    listed: Mutex<std_mpsc::Sender<()>>,
}

impl ActionSetsPort for FlakyActionSets {
    fn list(&self, _project: &ProjectId) -> anyhow::Result<Vec<ActionSet>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let res = if call == 0 {
            Ok(vec![record(1, "Deploy")])
        } else {
            Err(anyhow::anyhow!("listing unavailable"))
        };
        let _ = self.listed.lock().expect("listed lock").send(());
        res
    }
}

fn route() -> HashMap<String, String> {
    HashMap::from([("projectId".to_string(), "default".to_string())])
}

fn action(id: i64, kind: &str, order: i32, feature: &str) -> Action {
    let mut params = serde_json::Map::new();
    params.insert("project".into(), "default".into());
    params.insert("featureName".into(), feature.into());
    params.insert("environment".into(), "production".into());
    Action {
        id: ActionId(id),
        action: kind.into(),
        sort_order: order,
        execution_params: params,
        created_at: Utc.with_ymd_and_hms(2024, 2, 20, 10, 15, 0).unwrap(),
        created_by_user_id: Some(1),
    }
}

fn record(id: i64, name: &str) -> ActionSet {
    ActionSet {
        id: ActionSetId(id),
        enabled: false,
        name: name.into(),
        trigger: ActionMatch {
            source_id: 3,
            payload: BTreeMap::from([
                ("env".to_string(), "production".to_string()),
                ("service".to_string(), "checkout".to_string()),
            ]),
        },
        actor_id: 12,
        actions: vec![
            action(41, "TOGGLE_FEATURE_ON", 1, "new-checkout"),
            action(42, "TOGGLE_FEATURE_OFF", 2, "old-checkout"),
        ],
    }
}

fn kernel_with(
    siblings: Vec<ActionSet>,
) -> FormKernel<StaticActionSets, UuidV4Generator> {
    FormKernel::new(
        FormStore::default(),
        &route(),
        StaticActionSets(siblings),
        UuidV4Generator,
    )
    .expect("kernel")
}

fn wait_for_siblings<A, G>(kernel: &mut FormKernel<A, G>, expected: usize)
where
    A: ActionSetsPort,
    G: actionset_form::EntryIdGenerator,
{
    let deadline = Instant::now() + Duration::from_secs(3);
    while Instant::now() < deadline {
        kernel.tick();
        if kernel.store.state().siblings.len() == expected {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("sibling listing did not arrive");
}

#[test]
fn missing_project_param_is_an_error() {
    let res = FormKernel::new(
        FormStore::default(),
        &HashMap::new(),
        StaticActionSets(vec![]),
        UuidV4Generator,
    );
    match res {
        Err(FormError::MissingPathParam(name)) => assert_eq!(name, "projectId"),
        Ok(_) => panic!("expected missing path param"),
    }
}

#[test]
fn new_kernel_starts_from_create_defaults() {
    let kernel = kernel_with(vec![]);
    let state = kernel.store.state();

    assert_eq!(kernel.project_id().as_str(), "default");
    assert!(state.enabled);
    assert_eq!(state.name, "");
    assert_eq!(state.source_id, 0);
    assert_eq!(state.actor_id, 0);
    assert!(state.filters.is_empty());
    assert!(state.actions.is_empty());
    assert!(!state.validated);
    assert!(state.errors.is_clear());
}

#[test]
fn reload_copies_record_and_keys_rows_freshly() {
    let mut kernel = kernel_with(vec![]);
    let source = record(7, "Enable on deploy");
    kernel.reload(Some(source.clone()));

    let state = kernel.store.state();
    assert_eq!(state.editing, Some(ActionSetId(7)));
    assert!(!state.enabled);
    assert_eq!(state.name, "Enable on deploy");
    assert_eq!(state.source_id, 3);
    assert_eq!(state.actor_id, 12);

    let pairs: HashSet<(String, String)> = state
        .filters
        .iter()
        .map(|f| (f.parameter.clone(), f.value.clone()))
        .collect();
    let expected: HashSet<(String, String)> = source
        .trigger
        .payload
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    assert_eq!(pairs, expected);

    assert_eq!(state.actions.len(), 2);
    for (entry, original) in state.actions.iter().zip(&source.actions) {
        assert_eq!(entry.action, original.action);
        assert_eq!(entry.sort_order, original.sort_order);
        assert_eq!(entry.execution_params, original.execution_params);
    }

    let keys: HashSet<_> = state
        .filters
        .iter()
        .map(|f| f.id)
        .chain(state.actions.iter().map(|a| a.id))
        .collect();
    assert_eq!(keys.len(), 4);

    kernel.reload(Some(source));
    let again = kernel.store.state();
    assert!(again
        .actions
        .iter()
        .all(|a| !keys.contains(&a.id)));
}

#[test]
fn bind_source_only_reloads_when_the_record_changes() {
    let mut kernel = kernel_with(vec![]);
    let source = record(7, "Enable on deploy");
    kernel.bind_source(Some(source.clone()));
    assert_eq!(kernel.source(), Some(&source));

    kernel.set_name("Edited");
    assert!(!kernel.validate());

    kernel.bind_source(Some(source.clone()));
    let state = kernel.store.state();
    assert_eq!(state.name, "Edited");
    assert!(state.validated);

    let mut renamed = source;
    renamed.name = "Renamed upstream".into();
    kernel.bind_source(Some(renamed));
    let state = kernel.store.state();
    assert_eq!(state.name, "Renamed upstream");
    assert!(!state.validated);
    assert!(state.errors.is_clear());

    kernel.bind_source(None);
    let state = kernel.store.state();
    assert_eq!(state.editing, None);
    assert_eq!(state.name, "");
}

#[test]
fn validate_runs_every_check_and_reports_combined_result() {
    let mut kernel = kernel_with(vec![]);

    assert!(!kernel.validate());
    let state = kernel.store.state();
    assert!(state.validated);
    assert_eq!(state.errors.messages().count(), 4);

    kernel.reload(Some(record(7, "Enable on deploy")));
    kernel.set_name("Enable on release");
    assert!(kernel.validate());
    assert!(kernel.store.state().errors.is_clear());

    kernel.set_actor_id(0);
    kernel.set_actions(Vec::new());
    assert!(!kernel.validate());
    let state = kernel.store.state();
    assert_eq!(state.errors.name, None);
    assert_eq!(state.errors.trigger, None);
    assert!(state.errors.actor.is_some());
    assert!(state.errors.actions.is_some());
}

#[test]
fn single_field_validators_return_their_outcome() {
    let mut kernel = kernel_with(vec![]);

    assert!(!kernel.validate_name(""));
    assert!(kernel.validate_name("Anything"));
    assert!(!kernel.validate_source_id(0));
    assert!(kernel.validate_source_id(1));
    assert!(!kernel.validate_actor_id(0));
    assert!(kernel.validate_actor_id(1));
    assert!(!kernel.validate_actions(Vec::new()));

    let actions = {
        kernel.reload(Some(record(7, "Enable on deploy")));
        kernel.store.state().actions
    };
    assert!(kernel.validate_actions(actions[..1].to_vec()));
    assert!(!kernel.store.state().validated);
}

#[test]
fn siblings_delivered_through_sender_feed_the_uniqueness_check() {
    let mut kernel = kernel_with(vec![]);
    kernel.reload(Some(record(7, "Enable on deploy")));

    kernel
        .sender()
        .try_send(FormEvent::SiblingsLoaded {
            request: 1,
            siblings: vec![record(7, "Enable on deploy"), record(8, "Rollback")],
        })
        .expect("send");
    kernel.tick();

    assert!(kernel.validate_name("Enable on deploy"));
    assert!(!kernel.validate_name("Rollback"));
    assert_eq!(
        kernel.store.state().errors.name.as_deref(),
        Some("Name must be unique.")
    );
}

#[test]
fn refresh_siblings_loads_from_the_port() {
    let mut kernel = kernel_with(vec![record(1, "Deploy"), record(2, "Rollback")]);
    kernel.refresh_siblings();
    wait_for_siblings(&mut kernel, 2);

    kernel.set_name("Deploy");
    assert!(!kernel.validate());
    assert_eq!(
        kernel.store.state().errors.name.as_deref(),
        Some("Name must be unique.")
    );
}

#[test]
fn failed_refresh_keeps_the_last_listing() {
    let (listed_tx, listed_rx) = std_mpsc::channel();
    let mut kernel = FormKernel::new(
        FormStore::default(),
        &route(),
        FlakyActionSets {
            calls: AtomicUsize::new(0),
            listed: Mutex::new(listed_tx),
        },
        UuidV4Generator,
    )
    .expect("kernel");

    kernel.refresh_siblings();
    wait_for_siblings(&mut kernel, 1);
    listed_rx.recv_timeout(Duration::from_secs(3)).expect("first listing");

    kernel.refresh_siblings();
    listed_rx.recv_timeout(Duration::from_secs(3)).expect("failed listing");
    std::thread::sleep(Duration::from_millis(50));
    kernel.tick();
    assert_eq!(kernel.store.state().siblings.len(), 1);

    kernel.load_siblings_now();
    assert_eq!(kernel.store.state().siblings.len(), 1);

    assert!(!kernel.validate_name("Deploy"));
    assert_eq!(
        kernel.store.state().errors.name.as_deref(),
        Some("Name must be unique.")
    );
}

#[test]
fn stale_refresh_result_is_ignored_after_a_newer_one() {
    let mut kernel = kernel_with(vec![record(1, "Deploy")]);
    kernel.load_siblings_now();
    kernel.load_siblings_now();
    assert_eq!(kernel.store.state().siblings_request, 2);

    kernel
        .sender()
        .try_send(FormEvent::SiblingsLoaded {
            request: 1,
            siblings: Vec::new(),
        })
        .expect("send");
    kernel.tick();

    assert_eq!(kernel.store.state().siblings.len(), 1);
    assert!(!kernel.validate_name("Deploy"));
}

#[test]
fn single_field_commands_dispatch_through_the_kernel() {
    let mut kernel = kernel_with(vec![]);

    kernel.dispatch(FormCommand::ValidateSourceId(0));
    kernel.dispatch(FormCommand::ValidateActorId(0));
    kernel.dispatch(FormCommand::ValidateActions(Vec::new()));
    let errors = kernel.store.state().errors;
    assert_eq!(errors.name, None);
    assert_eq!(errors.trigger.as_deref(), Some("Incoming webhook is required."));
    assert_eq!(errors.actor.as_deref(), Some("Service account is required."));
    assert_eq!(errors.actions.as_deref(), Some("At least one action is required."));

    kernel.dispatch(FormCommand::ValidateSourceId(3));
    kernel.dispatch(FormCommand::ValidateActorId(12));
    let errors = kernel.store.state().errors;
    assert_eq!(errors.trigger, None);
    assert_eq!(errors.actor, None);
    assert!(!kernel.store.state().validated);
}

#[test]
fn viewmodel_hides_summary_until_validated() {
    let mut kernel = kernel_with(vec![]);
    kernel.validate_name("");

    let vm = action_set_form_vm(&kernel.store.state());
    assert_eq!(vm.title, "Create action");
    assert_eq!(vm.errors.name.as_deref(), Some("Name is required."));
    assert!(vm.error_summary.is_empty());

    kernel.validate();
    let vm = action_set_form_vm(&kernel.store.state());
    assert_eq!(vm.error_summary.len(), 4);
    assert_eq!(vm.source_id, None);

    kernel.reload(Some(record(7, "Enable on deploy")));
    let vm = action_set_form_vm(&kernel.store.state());
    assert_eq!(vm.title, "Edit action");
    assert_eq!(vm.source_id, Some(3));
    assert_eq!(vm.actions[0].sort_order, 1);
    assert!(vm.actions[0].params_summary.contains("featureName: new-checkout"));
}

#[test]
fn payload_carries_no_synthetic_keys() {
    let mut kernel = kernel_with(vec![]);
    let source = record(7, "Enable on deploy");
    kernel.reload(Some(source.clone()));

    let payload = kernel.store.state().to_payload();
    assert_eq!(payload.trigger, source.trigger);
    assert_eq!(payload.actions.len(), 2);

    let json = serde_json::to_string(&payload).expect("serialize");
    for entry in kernel.store.state().filters {
        assert!(!json.contains(&entry.id.to_string()));
    }
    assert!(!json.contains("createdAt"));
}
