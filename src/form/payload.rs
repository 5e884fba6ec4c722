//! Wire payload assembly
//!
//! The host API is name-sensitive: the record patch carries the CRM's exact
//! field names and the completion function expects a fixed argument bundle.
//! Both shapes are pinned here (and by tests) so a rename on either side
//! shows up as a diff instead of a silent no-op update.

use super::{DatedEntry, FormInput};
use serde::Serialize;
use serde_json::{json, Value};

/// Structured update for the application record, keyed by the application
/// identifier. Field names match the CRM module definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPatch {
    pub id: String,
    #[serde(rename = "Tax_Registration_Number_TRN")]
    pub trn: String,
    #[serde(rename = "Tax_Period_CT")]
    pub tax_period: String,
    #[serde(rename = "Subform_2")]
    pub dated_entries: Vec<DatedEntry>,
    #[serde(rename = "Pay_GIBAN")]
    pub pay_giban: String,
    #[serde(rename = "Application_Issuance_Date")]
    pub issuance_date: String,
}

impl RecordPatch {
    /// Assemble the patch from validated input. The free-text fields are
    /// trimmed on the way out; date strings pass through untouched.
    pub fn new(application_id: &str, input: &FormInput) -> Self {
        Self {
            id: application_id.to_string(),
            trn: input.trn.trim().to_string(),
            tax_period: input.tax_period.clone(),
            dated_entries: input.dated_entries(),
            pay_giban: input.pay_giban.trim().to_string(),
            issuance_date: input.issue_date.clone(),
        }
    }
}

/// Argument bundle for the completion function, which mirrors the
/// registration data onto the linked account on the host side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionArgs {
    pub account_id: String,
    pub effective_date: String,
    pub ctr_due_date: String,
    pub tax_period_ct: String,
    pub pay_giban: String,
    pub corporate_tax_trn: String,
}

impl CompletionArgs {
    /// Assemble the bundle. `account_id` is the session's validated account
    /// linkage, never the raw lookup value.
    pub fn new(account_id: &str, input: &FormInput) -> Self {
        Self {
            account_id: account_id.to_string(),
            effective_date: input.effective_date.clone(),
            ctr_due_date: input.due_date.clone(),
            tax_period_ct: input.tax_period.clone(),
            pay_giban: input.pay_giban.trim().to_string(),
            corporate_tax_trn: input.trn.trim().to_string(),
        }
    }

    /// JSON form handed to the function runner. Built with `json!` so the
    /// conversion is infallible.
    pub fn to_value(&self) -> Value {
        json!({
            "account_id": self.account_id,
            "effective_date": self.effective_date,
            "ctr_due_date": self.ctr_due_date,
            "tax_period_ct": self.tax_period_ct,
            "pay_giban": self.pay_giban,
            "corporate_tax_trn": self.corporate_tax_trn,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{
        LABEL_DUE_DATE, LABEL_EFFECTIVE_DATE, LABEL_FINANCIAL_YEAR_END, LABEL_ISSUE_DATE,
    };

    fn input() -> FormInput {
        FormInput {
            trn: " 100000000000003 ".into(),
            tax_period: "Jan-Dec".into(),
            effective_date: "2024-06-01".into(),
            issue_date: "2025-02-01".into(),
            due_date: "2025-09-30".into(),
            financial_year_end: "2024-12-31".into(),
            pay_giban: " AE070331234567890123456 ".into(),
        }
    }

    #[test]
    fn record_patch_uses_crm_field_names() {
        let patch = RecordPatch::new("4876", &input());
        let value = serde_json::to_value(&patch).unwrap();
        assert_eq!(value["id"], "4876");
        assert_eq!(value["Tax_Registration_Number_TRN"], "100000000000003");
        assert_eq!(value["Tax_Period_CT"], "Jan-Dec");
        assert_eq!(value["Pay_GIBAN"], "AE070331234567890123456");
        assert_eq!(value["Application_Issuance_Date"], "2025-02-01");

        let subform = value["Subform_2"].as_array().unwrap();
        assert_eq!(subform.len(), 4);
        assert_eq!(subform[0]["Type_of_Dates"], LABEL_ISSUE_DATE);
        assert_eq!(subform[0]["Date"], "2025-02-01");
        assert_eq!(subform[1]["Type_of_Dates"], LABEL_EFFECTIVE_DATE);
        assert_eq!(subform[2]["Type_of_Dates"], LABEL_DUE_DATE);
        assert_eq!(subform[3]["Type_of_Dates"], LABEL_FINANCIAL_YEAR_END);
        assert_eq!(subform[3]["Date"], "2024-12-31");
    }

    #[test]
    fn completion_args_carry_the_session_account_id() {
        let args = CompletionArgs::new("ACC1", &input());
        let value = args.to_value();
        assert_eq!(value["account_id"], "ACC1");
        assert_eq!(value["effective_date"], "2024-06-01");
        assert_eq!(value["ctr_due_date"], "2025-09-30");
        assert_eq!(value["tax_period_ct"], "Jan-Dec");
        assert_eq!(value["pay_giban"], "AE070331234567890123456");
        assert_eq!(value["corporate_tax_trn"], "100000000000003");
        assert_eq!(value.as_object().unwrap().len(), 6);
    }
}
