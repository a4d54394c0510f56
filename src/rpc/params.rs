//! Argument and result shapes of the backend's lease functions.
//!
//! Field names on the wire carry the `p_` prefix the stored procedures declare.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    lease::{Frequency, LeaseStatusFilter, PaymentMethod},
    utils::datetime::format_timestamp,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateLeaseParams {
    #[serde(rename = "p_property_id")]
    pub property_id: i64,
    #[serde(rename = "p_tenant_id")]
    pub tenant_id: i64,
    #[serde(rename = "p_start_date")]
    pub start_date: String,
    #[serde(rename = "p_end_date")]
    pub end_date: String,
    #[serde(rename = "p_rent_amount")]
    pub rent_amount: f64,
    #[serde(rename = "p_frequency")]
    pub frequency: Frequency,
    #[serde(rename = "p_created_at")]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct GetLeasesListParams {
    #[serde(rename = "p_search")]
    pub search: Option<String>,
    #[serde(rename = "p_status")]
    pub status: Option<LeaseStatusFilter>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct LeaseScheduleParams {
    #[serde(rename = "p_lease_id")]
    pub lease_id: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProcessAutomaticPaymentParams {
    #[serde(rename = "p_lease_id")]
    pub lease_id: i64,
    #[serde(rename = "p_total_amount")]
    pub total_amount: f64,
    #[serde(rename = "p_payment_method")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "p_notes")]
    pub notes: Option<String>,
    #[serde(rename = "p_created_at")]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TerminateLeaseParams {
    #[serde(rename = "p_lease_id")]
    pub lease_id: i64,
    #[serde(rename = "p_reason")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExtendLeaseParams {
    #[serde(rename = "p_lease_id")]
    pub lease_id: i64,
    #[serde(rename = "p_new_end_date")]
    pub new_end_date: String,
}

impl ExtendLeaseParams {
    pub fn new(lease_id: i64, new_end_date: NaiveDateTime) -> Self {
        Self {
            lease_id,
            new_end_date: format_timestamp(new_end_date),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GetDashboardStatsParams {
    #[serde(rename = "p_start_date")]
    pub start_date: String,
    #[serde(rename = "p_end_date")]
    pub end_date: String,
}

impl GetDashboardStatsParams {
    pub fn for_range(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start_date: format_timestamp(start),
            end_date: format_timestamp(end),
        }
    }
}

/// Single aggregate row of `rt_get_dashboard_stats`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardStats {
    /// Gross revenue generated in the period.
    pub period_sales: f64,
    /// Money actually received in the period.
    pub period_cash_collected: f64,
    pub period_refunds: f64,
    /// Schedule amounts falling due in the period.
    pub period_installments_due: f64,
    /// Debt owed right now, across all leases.
    pub global_outstanding_debt: f64,
    pub global_overdue_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_params_send_explicit_nulls() {
        let value = serde_json::to_value(GetLeasesListParams::default()).unwrap();
        assert_eq!(value, json!({ "p_search": null, "p_status": null }));

        let value = serde_json::to_value(GetLeasesListParams {
            search: Some("Maple".into()),
            status: Some(LeaseStatusFilter::Expiring),
        })
        .unwrap();
        assert_eq!(value, json!({ "p_search": "Maple", "p_status": "expiring" }));
    }

    #[test]
    fn payment_params_use_backend_names() {
        let params = ProcessAutomaticPaymentParams {
            lease_id: 4,
            total_amount: 99.5,
            payment_method: PaymentMethod::BankTransfer,
            notes: None,
            created_at: "2024-03-01 10:00:00.000".into(),
        };
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({
                "p_lease_id": 4,
                "p_total_amount": 99.5,
                "p_payment_method": "Bank Transfer",
                "p_notes": null,
                "p_created_at": "2024-03-01 10:00:00.000"
            })
        );
    }
}
