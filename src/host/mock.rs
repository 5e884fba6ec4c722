//! Mock host collaborators
//!
//! In-memory implementations of the host capabilities for tests. All mocks
//! write into a shared `CallLog` so a test can assert the order of calls
//! across collaborators, not just per collaborator. Failure injection is
//! per operation, armed through `&self` so a test can keep its own handle
//! after the mock has been wrapped in an `Arc<dyn ...>`.

use crate::form::RecordPatch;
use crate::host::{
    FileSource, FunctionRunner, HostShell, RecordData, RecordStore, ResizeRequest, WorkflowEngine,
};
use crate::upload::{PendingFile, SelectedFile};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Ordered record of host calls, shared across mock collaborators.
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, entry: impl Into<String>) {
        self.calls.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// Mock `RecordStore` with per-operation failure injection.
pub struct MockRecordStore {
    log: CallLog,
    record: Mutex<RecordData>,
    patches: Mutex<Vec<RecordPatch>>,
    fail_get: AtomicBool,
    fail_update: AtomicBool,
    fail_attach: AtomicBool,
}

impl MockRecordStore {
    pub fn new(log: CallLog) -> Self {
        Self::with_record(log, RecordData::default())
    }

    /// Mock that answers `get_record` with the given record.
    pub fn with_record(log: CallLog, record: RecordData) -> Self {
        Self {
            log,
            record: Mutex::new(record),
            patches: Mutex::new(Vec::new()),
            fail_get: AtomicBool::new(false),
            fail_update: AtomicBool::new(false),
            fail_attach: AtomicBool::new(false),
        }
    }

    pub fn fail_get(&self) {
        self.fail_get.store(true, Ordering::SeqCst);
    }

    pub fn fail_update(&self) {
        self.fail_update.store(true, Ordering::SeqCst);
    }

    pub fn fail_attach(&self) {
        self.fail_attach.store(true, Ordering::SeqCst);
    }

    /// Patches received by `update_record`, in order.
    pub fn patches(&self) -> Vec<RecordPatch> {
        self.patches.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecordStore for MockRecordStore {
    async fn get_record(&self, module: &str, record_id: &str) -> Result<RecordData> {
        self.log.record(format!("get_record {}/{}", module, record_id));
        if self.fail_get.load(Ordering::SeqCst) {
            return Err(anyhow!("host refused record fetch"));
        }
        Ok(self.record.lock().unwrap().clone())
    }

    async fn update_record(&self, module: &str, patch: &RecordPatch) -> Result<()> {
        self.log.record(format!("update_record {}/{}", module, patch.id));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(anyhow!("host refused record update"));
        }
        self.patches.lock().unwrap().push(patch.clone());
        Ok(())
    }

    async fn attach_file(&self, _module: &str, _record_id: &str, file: &PendingFile) -> Result<()> {
        self.log.record(format!("attach_file {}", file.name));
        if self.fail_attach.load(Ordering::SeqCst) {
            return Err(anyhow!("host refused attachment"));
        }
        Ok(())
    }
}

/// Mock `FunctionRunner` capturing invocation arguments.
pub struct MockFunctionRunner {
    log: CallLog,
    invocations: Mutex<Vec<(String, Value)>>,
    fail: AtomicBool,
}

impl MockFunctionRunner {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            invocations: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail_invoke(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }

    /// Invocations received, in order, as (name, args) pairs.
    pub fn invocations(&self) -> Vec<(String, Value)> {
        self.invocations.lock().unwrap().clone()
    }
}

#[async_trait]
impl FunctionRunner for MockFunctionRunner {
    async fn invoke(&self, name: &str, args: &Value) -> Result<Value> {
        self.log.record(format!("invoke {}", name));
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("function execution failed"));
        }
        self.invocations
            .lock()
            .unwrap()
            .push((name.to_string(), args.clone()));
        Ok(Value::Null)
    }
}

/// Mock `WorkflowEngine`.
pub struct MockWorkflowEngine {
    log: CallLog,
    fail: AtomicBool,
}

impl MockWorkflowEngine {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail: AtomicBool::new(false),
        }
    }

    pub fn fail_advance(&self) {
        self.fail.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl WorkflowEngine for MockWorkflowEngine {
    async fn advance(&self) -> Result<()> {
        self.log.record("advance");
        if self.fail.load(Ordering::SeqCst) {
            return Err(anyhow!("workflow refused to advance"));
        }
        Ok(())
    }
}

/// Mock `HostShell`.
pub struct MockShell {
    log: CallLog,
    fail_resize: AtomicBool,
    fail_close: AtomicBool,
}

impl MockShell {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            fail_resize: AtomicBool::new(false),
            fail_close: AtomicBool::new(false),
        }
    }

    pub fn fail_resize(&self) {
        self.fail_resize.store(true, Ordering::SeqCst);
    }

    pub fn fail_close(&self) {
        self.fail_close.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl HostShell for MockShell {
    async fn resize(&self, request: ResizeRequest) -> Result<()> {
        self.log.record(format!("resize {}", request.height));
        if self.fail_resize.load(Ordering::SeqCst) {
            return Err(anyhow!("resize rejected"));
        }
        Ok(())
    }

    async fn close_and_reload(&self) -> Result<()> {
        self.log.record("close_and_reload");
        if self.fail_close.load(Ordering::SeqCst) {
            return Err(anyhow!("reload rejected"));
        }
        Ok(())
    }
}

/// Mock `FileSource` answering from a queue of prepared responses.
pub struct MockFileSource {
    responses: Mutex<VecDeque<Result<SelectedFile>>>,
}

impl MockFileSource {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
        }
    }

    pub fn add_response(&self, response: Result<SelectedFile>) {
        self.responses.lock().unwrap().push_back(response);
    }
}

impl Default for MockFileSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FileSource for MockFileSource {
    async fn fetch(&self) -> Result<SelectedFile> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow!("no file response configured")))
    }
}
