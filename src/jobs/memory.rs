//! # In-process job registry.
//!
//! [`MemoryRegistry`] is a `Mutex<HashMap>`-backed [`JobRegistry`] for hosts
//! that keep job state in memory, and for tests. It models the minimum the
//! admission core consumes: jobs with a run history, folders (so wrong-type
//! resolution is exercisable), and a per-job attached chain whose presence
//! doubles as the "gating enabled" flag.
//!
//! ## Rules
//! - `record_run` / `start_run` append, `finish_run` completes the newest
//!   run; history order is submission order, newest last.
//! - Mutators on unknown jobs are no-ops: the registry is a read model for
//!   the gate, not the system of record.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::conditions::ConditionChain;
use crate::jobs::name::JobName;
use crate::jobs::registry::{JobRegistry, Resolved};
use crate::jobs::run::{RunInfo, Severity};

enum Entry {
    Job(JobState),
    Folder,
}

#[derive(Default)]
struct JobState {
    runs: Vec<RunInfo>,
    chain: Option<ConditionChain>,
}

/// In-memory [`JobRegistry`] implementation.
///
/// ## Example
/// ```rust
/// use jobgate::{JobName, JobRegistry, MemoryRegistry, RunInfo, Severity};
///
/// let jobs = MemoryRegistry::new();
/// jobs.add_job("ci/build");
/// jobs.start_run("ci/build", "#1");
/// jobs.finish_run("ci/build", Severity::Success);
///
/// let last = jobs.last_run(&JobName::new("ci/build")).unwrap();
/// assert_eq!(last.result, Some(Severity::Success));
/// ```
#[derive(Default)]
pub struct MemoryRegistry {
    entries: Mutex<HashMap<JobName, Entry>>,
}

impl MemoryRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a job with no runs and no attached chain.
    pub fn add_job(&self, name: impl Into<JobName>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(name.into(), Entry::Job(JobState::default()));
    }

    /// Registers a folder (a namespace node that is not runnable).
    pub fn add_folder(&self, name: impl Into<JobName>) {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(name.into(), Entry::Folder);
    }

    /// Attaches an admission chain to `job`, enabling gating for it.
    ///
    /// Replaces any previously attached chain wholesale.
    pub fn attach_chain(&self, job: impl Into<JobName>, chain: ConditionChain) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(Entry::Job(state)) = entries.get_mut(&job.into()) {
            state.chain = Some(chain);
        }
    }

    /// Detaches the admission chain from `job`, disabling gating for it.
    pub fn detach_chain(&self, job: impl Into<JobName>) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(Entry::Job(state)) = entries.get_mut(&job.into()) {
            state.chain = None;
        }
    }

    /// Appends a run snapshot to `job`'s history.
    pub fn record_run(&self, job: impl Into<JobName>, run: RunInfo) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(Entry::Job(state)) = entries.get_mut(&job.into()) {
            state.runs.push(run);
        }
    }

    /// Starts a new executing run for `job`.
    pub fn start_run(&self, job: impl Into<JobName>, display_name: impl Into<String>) {
        self.record_run(job, RunInfo::running(display_name));
    }

    /// Completes `job`'s newest run with `result`. No-op if the newest run
    /// already completed or the job never ran.
    pub fn finish_run(&self, job: impl Into<JobName>, result: Severity) {
        let mut entries = self.entries.lock().unwrap();
        if let Some(Entry::Job(state)) = entries.get_mut(&job.into()) {
            if let Some(run) = state.runs.last_mut() {
                if run.executing {
                    run.executing = false;
                    run.result = Some(result);
                }
            }
        }
    }
}

impl JobRegistry for MemoryRegistry {
    fn resolve(&self, target: &str, scope: &JobName) -> Resolved {
        let full = scope.sibling(target);
        let entries = self.entries.lock().unwrap();
        match entries.get(&full) {
            Some(Entry::Job(_)) => Resolved::Job(full),
            Some(Entry::Folder) => Resolved::WrongType("folder".to_string()),
            None => Resolved::NotFound,
        }
    }

    fn last_run(&self, job: &JobName) -> Option<RunInfo> {
        let entries = self.entries.lock().unwrap();
        match entries.get(job) {
            Some(Entry::Job(state)) => state.runs.last().cloned(),
            _ => None,
        }
    }

    fn current_run(&self, job: &JobName) -> Option<RunInfo> {
        let entries = self.entries.lock().unwrap();
        match entries.get(job) {
            Some(Entry::Job(state)) => state.runs.iter().rev().find(|r| r.executing).cloned(),
            _ => None,
        }
    }

    fn attached_chain(&self, job: &JobName) -> Option<ConditionChain> {
        let entries = self.entries.lock().unwrap();
        match entries.get(job) {
            Some(Entry::Job(state)) => state.chain.clone(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_distinguishes_missing_from_wrong_type() {
        let jobs = MemoryRegistry::new();
        jobs.add_job("ci/build");
        jobs.add_folder("ci/tools");

        let scope = JobName::new("ci/build");
        assert_eq!(jobs.resolve("build", &scope), Resolved::Job(JobName::new("ci/build")));
        assert_eq!(jobs.resolve("missing", &scope), Resolved::NotFound);
        assert_eq!(jobs.resolve("tools", &scope), Resolved::WrongType("folder".into()));
    }

    #[test]
    fn finish_run_completes_newest_only() {
        let jobs = MemoryRegistry::new();
        jobs.add_job("build");
        jobs.start_run("build", "#1");
        jobs.finish_run("build", Severity::Failure);
        jobs.finish_run("build", Severity::Success);

        let last = jobs.last_run(&JobName::new("build")).unwrap();
        assert_eq!(last.result, Some(Severity::Failure));
    }

    #[test]
    fn current_run_sees_only_executing() {
        let jobs = MemoryRegistry::new();
        jobs.add_job("build");
        let name = JobName::new("build");
        assert_eq!(jobs.current_run(&name), None);

        jobs.start_run("build", "#1");
        assert!(jobs.current_run(&name).unwrap().executing);

        jobs.finish_run("build", Severity::Success);
        assert_eq!(jobs.current_run(&name), None);
    }

    #[test]
    fn chain_presence_is_the_enabled_flag() {
        let jobs = MemoryRegistry::new();
        jobs.add_job("build");
        let name = JobName::new("build");
        assert!(jobs.attached_chain(&name).is_none());

        jobs.attach_chain("build", ConditionChain::new());
        assert!(jobs.attached_chain(&name).is_some());

        jobs.detach_chain("build");
        assert!(jobs.attached_chain(&name).is_none());
    }
}
