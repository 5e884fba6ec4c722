//! Form field model
//!
//! The fixed field set the widget collects, the identifiers the embedding
//! page uses for its error spans, and the dated subform entries derived from
//! the input. Validation and wire payload assembly live in submodules.

pub mod dates;
pub mod payload;
pub mod validate;

pub use dates::{derive_financial_year_end, fiscal_year_end};
pub use payload::{CompletionArgs, RecordPatch};
pub use validate::{validate, ValidationErrors, MSG_REQUIRED, MSG_UPLOAD_REQUIRED};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one required input, including the file and the account
/// linkage. The string form is the element id the embedding page renders its
/// error span against, so it must stay in sync with the page markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    TaxRegistrationNumber,
    TaxPeriod,
    EffectiveDate,
    IssueDate,
    DueDate,
    FinancialYearEnd,
    PayGiban,
    Certificate,
    Account,
}

impl FieldId {
    /// All required inputs in the order the page lays them out.
    pub const ALL: [FieldId; 9] = [
        FieldId::TaxRegistrationNumber,
        FieldId::TaxPeriod,
        FieldId::EffectiveDate,
        FieldId::IssueDate,
        FieldId::DueDate,
        FieldId::FinancialYearEnd,
        FieldId::PayGiban,
        FieldId::Certificate,
        FieldId::Account,
    ];

    /// Element id on the embedding page.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::TaxRegistrationNumber => "tax-registration-number",
            FieldId::TaxPeriod => "tax-period-ct",
            FieldId::EffectiveDate => "effective-date",
            FieldId::IssueDate => "date-of-issue",
            FieldId::DueDate => "ctr-due-date",
            FieldId::FinancialYearEnd => "ctr-financial-year-end-date",
            FieldId::PayGiban => "pay-giban",
            FieldId::Certificate => "corporate-tax-certificate",
            FieldId::Account => "account",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One submission attempt's worth of form values, exactly as the page
/// collected them. Date fields are `YYYY-MM-DD` strings; presence is
/// validated, format is not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    /// Tax registration number (TRN).
    pub trn: String,
    /// Corporate-tax period.
    pub tax_period: String,
    /// Effective date of registration.
    pub effective_date: String,
    /// Date of issue.
    pub issue_date: String,
    /// CTR due date.
    pub due_date: String,
    /// CTR financial year-end date, usually derived from the due date.
    pub financial_year_end: String,
    /// Payment identifier (GIBAN).
    pub pay_giban: String,
}

impl FormInput {
    /// Recompute the financial year-end from the due date, mirroring the
    /// page's on-change behavior. A blank or unparseable due date leaves the
    /// derived field untouched.
    pub fn autofill_financial_year_end(&mut self) {
        if let Some(derived) = derive_financial_year_end(&self.due_date) {
            self.financial_year_end = derived;
        }
    }

    /// The four dated subform entries, in the fixed order the host stores
    /// them.
    pub fn dated_entries(&self) -> Vec<DatedEntry> {
        vec![
            DatedEntry::new(LABEL_ISSUE_DATE, &self.issue_date),
            DatedEntry::new(LABEL_EFFECTIVE_DATE, &self.effective_date),
            DatedEntry::new(LABEL_DUE_DATE, &self.due_date),
            DatedEntry::new(LABEL_FINANCIAL_YEAR_END, &self.financial_year_end),
        ]
    }
}

pub const LABEL_ISSUE_DATE: &str = "Date of Issue";
pub const LABEL_EFFECTIVE_DATE: &str = "Effective Date of Registration";
pub const LABEL_DUE_DATE: &str = "CTR Due Date";
pub const LABEL_FINANCIAL_YEAR_END: &str = "CTR Financial Year End Date";

/// One (label, date) pair of the subform the host stores next to the main
/// record fields. Serializes to the CRM's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedEntry {
    #[serde(rename = "Type_of_Dates")]
    pub label: &'static str,
    #[serde(rename = "Date")]
    pub date: String,
}

impl DatedEntry {
    fn new(label: &'static str, date: &str) -> Self {
        Self {
            label,
            date: date.to_string(),
        }
    }
}
