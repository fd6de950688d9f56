//! # Path-like job identifiers.
//!
//! Jobs live in a folder hierarchy; a full name is `/`-separated, e.g.
//! `"ci/linux/build"`. Conditions configure their target with a *relative*
//! name that is resolved against the namespace of the job under evaluation
//! (sibling lookup), so a chain attached to `"ci/linux/build"` with target
//! `"deploy"` watches `"ci/linux/deploy"`. A leading `/` escapes to an
//! absolute name.
//!
//! ## Rules
//! - Names are opaque to this crate beyond the `/` separator; the host
//!   decides what characters are legal.
//! - Resolution scoping is part of the configuration contract: the same
//!   target string means different jobs from different namespaces.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Full name of a job (or folder) in the host's hierarchy.
///
/// ## Example
/// ```rust
/// use jobgate::JobName;
///
/// let build = JobName::new("ci/linux/build");
/// assert_eq!(build.short_name(), "build");
/// assert_eq!(build.parent(), Some(JobName::new("ci/linux")));
///
/// // Sibling lookup: how condition targets are scoped.
/// assert_eq!(build.sibling("deploy"), JobName::new("ci/linux/deploy"));
/// assert_eq!(build.sibling("/ops/pager"), JobName::new("ops/pager"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobName(String);

impl JobName {
    /// Creates a name from its full `/`-separated form.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The full name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment (the name within its folder).
    pub fn short_name(&self) -> &str {
        match self.0.rsplit_once('/') {
            Some((_, short)) => short,
            None => &self.0,
        }
    }

    /// Enclosing folder, or `None` for top-level names.
    pub fn parent(&self) -> Option<JobName> {
        self.0.rsplit_once('/').map(|(parent, _)| JobName::new(parent))
    }

    /// Joins a child segment onto this name.
    pub fn join(&self, child: &str) -> JobName {
        if self.0.is_empty() {
            JobName::new(child)
        } else {
            JobName::new(format!("{}/{}", self.0, child))
        }
    }

    /// Resolves a configured target name relative to this job's namespace.
    ///
    /// - `"deploy"` → sibling in the same folder as `self`
    /// - `"/ops/pager"` → absolute (leading slash stripped)
    ///
    /// Namespace scoping only; whether the result names an existing job is
    /// the registry's call.
    pub fn sibling(&self, target: &str) -> JobName {
        if let Some(absolute) = target.strip_prefix('/') {
            return JobName::new(absolute);
        }
        match self.parent() {
            Some(parent) => parent.join(target),
            None => JobName::new(target),
        }
    }
}

impl fmt::Display for JobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobName {
    fn from(name: &str) -> Self {
        JobName::new(name)
    }
}

impl From<String> for JobName {
    fn from(name: String) -> Self {
        JobName::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_names_have_no_parent() {
        let name = JobName::new("build");
        assert_eq!(name.parent(), None);
        assert_eq!(name.short_name(), "build");
    }

    #[test]
    fn sibling_resolution_stays_in_namespace() {
        let item = JobName::new("ci/linux/build");
        assert_eq!(item.sibling("deploy"), JobName::new("ci/linux/deploy"));

        let top = JobName::new("build");
        assert_eq!(top.sibling("deploy"), JobName::new("deploy"));
    }

    #[test]
    fn leading_slash_escapes_to_absolute() {
        let item = JobName::new("ci/linux/build");
        assert_eq!(item.sibling("/ops/pager"), JobName::new("ops/pager"));
    }

    #[test]
    fn nested_relative_targets_join_under_namespace() {
        let item = JobName::new("ci/build");
        assert_eq!(item.sibling("linux/deploy"), JobName::new("ci/linux/deploy"));
    }
}
