//! Host capability layer
//!
//! Trait-based abstraction over the embedding CRM so the widget core can be
//! exercised without a live host. Each collaborator covers one concern:
//! record access, remote function execution, workflow control, the widget
//! shell, and the file picker. `RestHost` is the production implementation;
//! `mock` carries recording fakes for tests.

pub mod functions;
pub mod mock;
pub mod records;
pub mod rest;
pub mod shell;
pub mod source;
pub mod workflow;

pub use functions::FunctionRunner;
pub use mock::{
    CallLog, MockFileSource, MockFunctionRunner, MockRecordStore, MockShell, MockWorkflowEngine,
};
pub use records::{RecordData, RecordRef, RecordStore};
pub use rest::{RestBlueprint, RestHost};
pub use shell::{HostShell, NoopShell, ResizeRequest};
pub use source::{FileSource, FsFileSource};
pub use workflow::WorkflowEngine;
