//! Widget facade
//!
//! Entry points the embedding page drives: page load, file selection, and
//! submit. Owns the collaborators, the upload cache, and the session for
//! the current visit, and enforces the single-submission rule.

use crate::config::WidgetConfig;
use crate::form::FormInput;
use crate::host::{FileSource, FunctionRunner, HostShell, RecordStore, WorkflowEngine};
use crate::pipeline::{SubmissionPipeline, SubmitError};
use crate::session::{SessionError, WidgetSession};
use crate::upload::{FileCache, FileError, PendingFile};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct Widget {
    pipeline: SubmissionPipeline,
    records: Arc<dyn RecordStore>,
    shell: Arc<dyn HostShell>,
    config: WidgetConfig,
    cache: FileCache,
    session: Option<WidgetSession>,
    submitting: AtomicBool,
}

impl Widget {
    /// Create a widget wired to the given host collaborators.
    pub fn new(
        records: Arc<dyn RecordStore>,
        functions: Arc<dyn FunctionRunner>,
        workflow: Arc<dyn WorkflowEngine>,
        shell: Arc<dyn HostShell>,
        config: WidgetConfig,
    ) -> Self {
        let cache = FileCache::new(config.max_upload_bytes);
        let pipeline = SubmissionPipeline::new(
            records.clone(),
            functions,
            workflow,
            shell.clone(),
            config.clone(),
        );
        Self {
            pipeline,
            records,
            shell,
            config,
            cache,
            session: None,
            submitting: AtomicBool::new(false),
        }
    }

    /// Host page-load hook: build the session for this visit.
    pub async fn on_page_load(&mut self, record_id: &str) -> Result<(), SessionError> {
        let session = WidgetSession::load(
            self.records.as_ref(),
            self.shell.as_ref(),
            &self.config,
            record_id,
        )
        .await?;
        self.session = Some(session);
        Ok(())
    }

    /// File picker hook: materialize the selection and cache it. Returns
    /// the cached file's display name. On any failure the cache ends up
    /// empty, never holding a file the user believes was replaced.
    pub async fn on_file_selected(&mut self, source: &dyn FileSource) -> Result<String, FileError> {
        let file = match source.fetch().await {
            Ok(file) => file,
            Err(err) => {
                self.cache.clear();
                return Err(FileError::Unreadable(err));
            }
        };
        let stored = self.cache.accept(file)?;
        Ok(stored.name.clone())
    }

    /// File removal hook.
    pub fn on_file_cleared(&mut self) {
        self.cache.clear();
    }

    pub fn pending_file(&self) -> Option<&PendingFile> {
        self.cache.current()
    }

    pub fn session(&self) -> Option<&WidgetSession> {
        self.session.as_ref()
    }

    /// Submit hook. Requires a loaded session, and rejects overlapping
    /// calls so at most one submission is in flight. The guard re-arms on
    /// every completed run, success or failure, so the user can retry.
    pub async fn submit(&self, input: &FormInput) -> Result<(), SubmitError> {
        let session = self.session.as_ref().ok_or(SubmitError::NoSession)?;

        if self.submitting.swap(true, Ordering::SeqCst) {
            return Err(SubmitError::InFlight);
        }
        let result = self
            .pipeline
            .submit(session, input, self.cache.current())
            .await;
        self.submitting.store(false, Ordering::SeqCst);
        result
    }
}
