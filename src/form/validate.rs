//! Presence validation
//!
//! The widget intentionally validates presence only: date and GIBAN formats
//! are the host form controls' problem, and anything stricter has been ruled
//! out of scope. Each missing value maps to the element id the page hangs
//! its error span on.

use super::{FieldId, FormInput};
use std::collections::BTreeMap;
use std::fmt;

pub const MSG_REQUIRED: &str = "Required";
pub const MSG_UPLOAD_REQUIRED: &str = "Upload required";

/// Field-scoped validation failures, ordered by page layout. Empty means the
/// submission may proceed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    missing: BTreeMap<FieldId, &'static str>,
}

impl ValidationErrors {
    pub fn insert(&mut self, field: FieldId, message: &'static str) {
        self.missing.insert(field, message);
    }

    pub fn get(&self, field: FieldId) -> Option<&'static str> {
        self.missing.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn len(&self) -> usize {
        self.missing.len()
    }

    /// Iterate (field, message) pairs in page order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &'static str)> + '_ {
        self.missing.iter().map(|(field, message)| (*field, *message))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.missing.keys().map(|field| field.as_str()).collect();
        write!(f, "{} required value(s) missing: {}", fields.len(), fields.join(", "))
    }
}

/// Check the seven form fields, the cached upload, and the account linkage
/// for presence. Values are trimmed before the check; a whitespace-only
/// entry counts as missing. Pure: rendering the result is the caller's job.
pub fn validate(input: &FormInput, account_id: &str, has_file: bool) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    let fields = [
        (FieldId::TaxRegistrationNumber, input.trn.as_str()),
        (FieldId::TaxPeriod, input.tax_period.as_str()),
        (FieldId::EffectiveDate, input.effective_date.as_str()),
        (FieldId::IssueDate, input.issue_date.as_str()),
        (FieldId::DueDate, input.due_date.as_str()),
        (FieldId::FinancialYearEnd, input.financial_year_end.as_str()),
        (FieldId::PayGiban, input.pay_giban.as_str()),
    ];
    for (field, value) in fields {
        if value.trim().is_empty() {
            errors.insert(field, MSG_REQUIRED);
        }
    }

    if !has_file {
        errors.insert(FieldId::Certificate, MSG_UPLOAD_REQUIRED);
    }
    if account_id.trim().is_empty() {
        errors.insert(FieldId::Account, MSG_REQUIRED);
    }

    errors
}
