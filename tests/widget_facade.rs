//! Integration tests for the widget facade: session lifecycle, the upload
//! journey, and the single-submission guard.

use regflow::config::WidgetConfig;
use regflow::form::FormInput;
use regflow::host::{
    CallLog, MockFileSource, MockFunctionRunner, MockRecordStore, MockShell, MockWorkflowEngine,
    RecordData, RecordRef, WorkflowEngine,
};
use regflow::pipeline::SubmitError;
use regflow::session::SessionError;
use regflow::upload::SelectedFile;
use regflow::widget::Widget;
use std::sync::Arc;
use tokio::sync::Semaphore;

fn linked_record() -> RecordData {
    RecordData {
        id: "4876".into(),
        account: Some(RecordRef {
            id: "9921".into(),
            name: Some("Acme Trading LLC".into()),
        }),
    }
}

fn valid_input() -> FormInput {
    FormInput {
        trn: "100000000000003".into(),
        tax_period: "Jan-Dec".into(),
        effective_date: "2024-06-01".into(),
        issue_date: "2025-02-01".into(),
        due_date: "2025-09-30".into(),
        financial_year_end: "2024-12-31".into(),
        pay_giban: "AE070331234567890123456".into(),
    }
}

fn widget_with_record(log: &CallLog, record: RecordData) -> Widget {
    let records = Arc::new(MockRecordStore::with_record(log.clone(), record));
    let functions = Arc::new(MockFunctionRunner::new(log.clone()));
    let workflow = Arc::new(MockWorkflowEngine::new(log.clone()));
    let shell = Arc::new(MockShell::new(log.clone()));
    Widget::new(records, functions, workflow, shell, WidgetConfig::default())
}

#[tokio::test]
async fn page_load_fails_distinctly_when_the_account_link_is_missing() {
    let log = CallLog::new();
    let unlinked = RecordData {
        id: "4876".into(),
        account: None,
    };
    let mut widget = widget_with_record(&log, unlinked);

    let err = widget.on_page_load("4876").await.unwrap_err();
    assert!(matches!(err, SessionError::MissingAccountLink { .. }));
    assert!(widget.session().is_none());

    // Without a session, submission is refused before any host call.
    let err = widget.submit(&valid_input()).await.unwrap_err();
    assert!(matches!(err, SubmitError::NoSession));
    assert_eq!(log.entries(), vec!["resize 90%", "get_record Applications1/4876"]);
}

#[tokio::test]
async fn an_oversized_pick_is_recoverable_within_one_visit() {
    let log = CallLog::new();
    let mut widget = widget_with_record(&log, linked_record());
    widget.on_page_load("4876").await.unwrap();

    let source = MockFileSource::new();
    source.add_response(Ok(SelectedFile {
        name: "scan.pdf".into(),
        size_bytes: 21 * 1024 * 1024,
        content: Vec::new(),
    }));
    source.add_response(Ok(SelectedFile::new("certificate.pdf", vec![1, 2, 3])));

    // Oversized pick rejected, and the submit that follows fails validation
    // without reaching the host.
    assert!(widget.on_file_selected(&source).await.is_err());
    let err = widget.submit(&valid_input()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Validation(_)));
    assert_eq!(log.entries(), vec!["resize 90%", "get_record Applications1/4876"]);

    // A conforming pick afterwards completes the submission.
    widget.on_file_selected(&source).await.unwrap();
    widget.submit(&valid_input()).await.unwrap();
    assert_eq!(
        log.entries(),
        vec![
            "resize 90%",
            "get_record Applications1/4876",
            "update_record Applications1/4876",
            "invoke ta_ctr_complete_the_process_update_account",
            "attach_file certificate.pdf",
            "advance",
            "close_and_reload",
        ]
    );
}

#[tokio::test]
async fn the_guard_rearms_after_a_failed_submission() {
    let log = CallLog::new();
    let records = Arc::new(MockRecordStore::with_record(log.clone(), linked_record()));
    let functions = Arc::new(MockFunctionRunner::new(log.clone()));
    let workflow = Arc::new(MockWorkflowEngine::new(log.clone()));
    workflow.fail_advance();
    let shell = Arc::new(MockShell::new(log.clone()));
    let mut widget = Widget::new(
        records,
        functions,
        workflow,
        shell,
        WidgetConfig::default(),
    );

    widget.on_page_load("4876").await.unwrap();
    let source = MockFileSource::new();
    source.add_response(Ok(SelectedFile::new("certificate.pdf", vec![1])));
    widget.on_file_selected(&source).await.unwrap();

    let first = widget.submit(&valid_input()).await.unwrap_err();
    assert!(matches!(first, SubmitError::Advance(_)));

    // The retry reaches the workflow again instead of being refused as
    // in flight.
    let second = widget.submit(&valid_input()).await.unwrap_err();
    assert!(matches!(second, SubmitError::Advance(_)));
}

/// Workflow double whose `advance` parks until the test releases it, to
/// hold a submission in flight.
struct GatedWorkflow {
    gate: Arc<Semaphore>,
}

#[async_trait::async_trait]
impl WorkflowEngine for GatedWorkflow {
    async fn advance(&self) -> anyhow::Result<()> {
        let permit = self.gate.acquire().await?;
        permit.forget();
        Ok(())
    }
}

#[tokio::test]
async fn an_overlapping_submission_is_rejected_while_one_is_in_flight() {
    let log = CallLog::new();
    let records = Arc::new(MockRecordStore::with_record(log.clone(), linked_record()));
    let functions = Arc::new(MockFunctionRunner::new(log.clone()));
    let gate = Arc::new(Semaphore::new(0));
    let workflow = Arc::new(GatedWorkflow { gate: gate.clone() });
    let shell = Arc::new(MockShell::new(log.clone()));
    let mut widget = Widget::new(
        records,
        functions,
        workflow,
        shell,
        WidgetConfig::default(),
    );

    widget.on_page_load("4876").await.unwrap();
    let source = MockFileSource::new();
    source.add_response(Ok(SelectedFile::new("certificate.pdf", vec![1])));
    widget.on_file_selected(&source).await.unwrap();

    let widget = &widget;
    let input = valid_input();
    let (first, second) = tokio::join!(widget.submit(&input), async {
        tokio::task::yield_now().await;
        let second = widget.submit(&input).await;
        gate.add_permits(1);
        second
    });

    assert!(first.is_ok());
    assert!(matches!(second.unwrap_err(), SubmitError::InFlight));
}
