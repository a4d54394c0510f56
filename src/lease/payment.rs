use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{LeaseError, Result},
    rpc::ProcessAutomaticPaymentParams,
    utils::datetime::format_timestamp,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Check,
    #[serde(rename = "Credit Card")]
    CreditCard,
    Other,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::BankTransfer,
        PaymentMethod::Check,
        PaymentMethod::CreditCard,
        PaymentMethod::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Check => "Check",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PaymentMethod {
    type Err = LeaseError;

    fn from_str(value: &str) -> Result<Self> {
        let wanted = value.trim();
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| LeaseError::InvalidInput(format!("unknown payment method `{wanted}`")))
    }
}

/// Form state for recording a bulk payment against a lease.
///
/// The backend spreads the amount over the oldest unpaid periods; this type only
/// validates and shapes the request.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDraft {
    pub lease_id: i64,
    pub amount: String,
    pub method: PaymentMethod,
    pub transaction_date: NaiveDateTime,
    pub notes: String,
}

impl PaymentDraft {
    /// Starts a draft, prefilling the amount when the lease has a positive balance.
    pub fn for_lease(
        lease_id: i64,
        suggested: Option<f64>,
        transaction_date: NaiveDateTime,
        method: PaymentMethod,
    ) -> Self {
        let amount = suggested
            .filter(|value| value.is_finite() && *value > 0.0)
            .map(|value| value.to_string())
            .unwrap_or_default();
        Self {
            lease_id,
            amount,
            method,
            transaction_date,
            notes: String::new(),
        }
    }

    /// Same as [`PaymentDraft::for_lease`] with the configured default method.
    pub fn with_config(
        lease_id: i64,
        suggested: Option<f64>,
        transaction_date: NaiveDateTime,
        config: &Config,
    ) -> Self {
        Self::for_lease(
            lease_id,
            suggested,
            transaction_date,
            config.default_payment_method,
        )
    }

    pub fn to_params(&self) -> Result<ProcessAutomaticPaymentParams> {
        let total_amount = self
            .amount
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value > 0.0)
            .ok_or_else(|| {
                LeaseError::InvalidInput(format!(
                    "payment amount `{}` must be a positive number",
                    self.amount
                ))
            })?;
        let notes = self.notes.trim();
        Ok(ProcessAutomaticPaymentParams {
            lease_id: self.lease_id,
            total_amount,
            payment_method: self.method,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            created_at: format_timestamp(self.transaction_date),
        })
    }
}
