//! Job identities, run snapshots, and the host-supplied registry view.

mod memory;
mod name;
mod registry;
mod run;

pub use memory::MemoryRegistry;
pub use name::JobName;
pub use registry::{JobRegistry, Resolved};
pub use run::{ParseSeverityError, RunInfo, Severity};
