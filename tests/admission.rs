//! End-to-end admission behavior: chain ordering, short-circuiting, and the
//! interaction between the dispatcher and a live job registry.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use jobgate::{
    BlockReason, BuildingCondition, Condition, ConditionChain, Dispatcher, JobRegistry,
    MemoryRegistry, QueuedItem, ResultCondition, RunInfo, Severity, Verdict,
};

/// Test probe: scripted verdicts plus per-call counters, to observe which
/// conditions a chain evaluation actually reaches.
struct Probe {
    unblock: bool,
    block: Option<&'static str>,
    calls: Arc<AtomicUsize>,
}

impl Probe {
    fn abstain(calls: &Arc<AtomicUsize>) -> Self {
        Self {
            unblock: false,
            block: None,
            calls: calls.clone(),
        }
    }

    fn unblocks(calls: &Arc<AtomicUsize>) -> Self {
        Self {
            unblock: true,
            block: None,
            calls: calls.clone(),
        }
    }

    fn blocks(detail: &'static str, calls: &Arc<AtomicUsize>) -> Self {
        Self {
            unblock: false,
            block: Some(detail),
            calls: calls.clone(),
        }
    }
}

impl Condition for Probe {
    fn kind(&self) -> &'static str {
        "probe"
    }

    fn is_unblocked(&self, _: &QueuedItem, _: &dyn JobRegistry) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.unblock
    }

    fn is_blocked(&self, _: &QueuedItem, _: &dyn JobRegistry) -> Option<BlockReason> {
        self.block.map(|detail| BlockReason::Other(detail.to_string()))
    }
}

fn gate_with(jobs: Arc<MemoryRegistry>, chain: ConditionChain) -> Dispatcher {
    jobs.add_job("build");
    jobs.attach_chain("build", chain);
    Dispatcher::new(jobs)
}

#[test]
fn empty_chain_allows() {
    let gate = gate_with(Arc::new(MemoryRegistry::new()), ConditionChain::new());
    assert_eq!(gate.can_run(&QueuedItem::new("build")), Verdict::Allow);
}

#[test]
fn first_unblock_wins_and_later_conditions_are_never_evaluated() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let chain = ConditionChain::new()
        .with(Probe::unblocks(&first))
        .with(Probe::blocks("would have blocked", &second));

    let gate = gate_with(Arc::new(MemoryRegistry::new()), chain);
    assert!(gate.can_run(&QueuedItem::new("build")).is_allowed());

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);
}

#[test]
fn abstaining_first_condition_passes_to_second_in_order() {
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    let chain = ConditionChain::new()
        .with(Probe::abstain(&first))
        .with(Probe::blocks("second says no", &second));

    let gate = gate_with(Arc::new(MemoryRegistry::new()), chain);
    let verdict = gate.can_run(&QueuedItem::new("build"));

    let reason = verdict.reason().expect("second condition blocks");
    assert!(reason.to_string().contains("second says no"));
    // First was consulted before the second decided.
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[test]
fn block_before_unblock_wins() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = ConditionChain::new()
        .with(Probe::blocks("first says no", &calls))
        .with(Probe::unblocks(&calls));

    let gate = gate_with(Arc::new(MemoryRegistry::new()), chain);
    assert!(gate.can_run(&QueuedItem::new("build")).is_blocked());
}

#[test]
fn verdicts_are_idempotent_under_unchanged_state() {
    let jobs = Arc::new(MemoryRegistry::new());
    jobs.add_job("deploy");
    jobs.start_run("deploy", "#1");

    let chain = ConditionChain::new().with(BuildingCondition::new("deploy"));
    let gate = gate_with(jobs, chain);
    let item = QueuedItem::new("build");

    let first = gate.can_run(&item);
    let second = gate.can_run(&item);
    assert_eq!(first, second);
    assert!(first.is_blocked());
}

#[test]
fn building_condition_blocks_only_while_target_executes() {
    let jobs = Arc::new(MemoryRegistry::new());
    jobs.add_job("deploy");

    let chain = ConditionChain::new().with(BuildingCondition::new("deploy"));
    let gate = gate_with(jobs.clone(), chain);
    let item = QueuedItem::new("build");

    // No runs yet: no opinion.
    assert!(gate.can_run(&item).is_allowed());

    jobs.start_run("deploy", "#7");
    let verdict = gate.can_run(&item);
    assert_eq!(
        verdict.reason().unwrap().to_string(),
        "deploy is building: #7"
    );

    jobs.finish_run("deploy", Severity::Success);
    assert!(gate.can_run(&item).is_allowed());
}

#[test]
fn result_condition_end_to_end() {
    // Job "build" gated on "deploy" with the default (UNSTABLE) threshold.
    let jobs = Arc::new(MemoryRegistry::new());
    jobs.add_job("deploy");

    let chain = ConditionChain::new().with(ResultCondition::with_default_threshold("deploy"));
    let gate = gate_with(jobs.clone(), chain);
    let mut item = QueuedItem::new("build");

    // deploy has never run: allowed.
    assert!(gate.poll(&mut item).is_allowed());
    assert!(!item.is_blocked());

    // deploy completes with FAILURE: blocked, reason names job and result.
    jobs.record_run("deploy", RunInfo::completed("#1", Severity::Failure));
    let verdict = gate.poll(&mut item);
    assert!(verdict.is_blocked());
    let reason = item.block_reason().unwrap().to_string();
    assert!(reason.contains("deploy"));
    assert!(reason.contains("FAILURE"));

    // deploy recovers: allowed again, reason cleared.
    jobs.record_run("deploy", RunInfo::completed("#2", Severity::Success));
    assert!(gate.poll(&mut item).is_allowed());
    assert_eq!(item.block_reason(), None);
}

#[test]
fn namespaced_targets_resolve_against_the_items_folder() {
    let jobs = Arc::new(MemoryRegistry::new());
    jobs.add_job("ci/build");
    jobs.add_job("ci/deploy");
    jobs.add_job("deploy"); // same short name at top level, must not be picked
    jobs.start_run("ci/deploy", "#3");
    jobs.attach_chain(
        "ci/build",
        ConditionChain::new().with(BuildingCondition::new("deploy")),
    );

    let gate = Dispatcher::new(jobs);
    let verdict = gate.can_run(&QueuedItem::new("ci/build"));
    assert_eq!(
        verdict.reason().unwrap().to_string(),
        "ci/deploy is building: #3"
    );
}

#[test]
fn misconfigured_chain_blocks_instead_of_failing() {
    let jobs = Arc::new(MemoryRegistry::new());
    let chain = ConditionChain::new()
        .with(ResultCondition::with_default_threshold("no-such-job"));
    let gate = gate_with(jobs, chain);

    let verdict = gate.can_run(&QueuedItem::new("build"));
    let reason = verdict.reason().unwrap();
    assert_eq!(reason.as_label(), "target_not_found");
    assert!(reason.to_string().contains("no-such-job"));
}
