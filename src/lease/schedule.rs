use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Frequency;
use crate::utils::datetime::wall_clock;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Pending,
    Paid,
    PartiallyPaid,
    Overdue,
    Voided,
}

impl ScheduleStatus {
    /// Still expecting money: pending, partially paid or overdue.
    pub fn is_open(&self) -> bool {
        matches!(
            self,
            ScheduleStatus::Pending | ScheduleStatus::PartiallyPaid | ScheduleStatus::Overdue
        )
    }
}

/// One billing period of a lease schedule, as returned by `rt_get_lease_schedule`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleItem {
    pub id: i64,
    #[serde(with = "wall_clock")]
    pub period_start: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub due_date: NaiveDateTime,
    pub amount_due: f64,
    pub total_paid: f64,
    pub balance: f64,
    pub status: ScheduleStatus,
}

impl ScheduleItem {
    /// Builds an item locally, deriving `balance` from the due and paid amounts.
    pub fn new(
        id: i64,
        period_start: NaiveDateTime,
        due_date: NaiveDateTime,
        amount_due: f64,
        total_paid: f64,
        status: ScheduleStatus,
    ) -> Self {
        Self {
            id,
            period_start,
            due_date,
            amount_due,
            total_paid,
            balance: amount_due - total_paid,
            status,
        }
    }
}

/// Sum of balances across the schedule, skipping voided periods.
///
/// Negative balances (overpaid periods) are included as-is.
pub fn sum_outstanding_balance(items: &[ScheduleItem]) -> f64 {
    items
        .iter()
        .filter(|item| item.status != ScheduleStatus::Voided)
        .map(|item| item.balance)
        .sum()
}

/// Aggregate view of a lease schedule for the lease detail screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScheduleSummary {
    pub item_count: usize,
    pub paid_count: usize,
    pub overdue_count: usize,
    pub voided_count: usize,
    pub total_due: f64,
    pub total_paid: f64,
    pub outstanding: f64,
    pub next_due: Option<NaiveDateTime>,
}

impl ScheduleSummary {
    pub fn from_items(items: &[ScheduleItem]) -> Self {
        let mut summary = ScheduleSummary {
            item_count: items.len(),
            outstanding: sum_outstanding_balance(items),
            ..ScheduleSummary::default()
        };
        for item in items {
            match item.status {
                ScheduleStatus::Voided => {
                    summary.voided_count += 1;
                    continue;
                }
                ScheduleStatus::Paid => summary.paid_count += 1,
                ScheduleStatus::Overdue => summary.overdue_count += 1,
                ScheduleStatus::Pending | ScheduleStatus::PartiallyPaid => {}
            }
            summary.total_due += item.amount_due;
            summary.total_paid += item.total_paid;
        }
        summary.next_due = items
            .iter()
            .filter(|item| item.status.is_open())
            .map(|item| item.due_date)
            .min();
        summary
    }

    /// Amount to prefill in a payment form, present only when something is owed.
    pub fn suggested_payment(&self) -> Option<f64> {
        (self.outstanding > 0.0).then_some(self.outstanding)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatusFilter {
    Active,
    Terminated,
    Expiring,
}

/// A row of `rt_get_leases_list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaseListItem {
    pub id: i64,
    pub property_name: String,
    pub tenant_name: String,
    #[serde(with = "wall_clock")]
    pub start_date: NaiveDateTime,
    #[serde(with = "wall_clock")]
    pub end_date: NaiveDateTime,
    pub rent_amount: f64,
    pub payment_frequency: Frequency,
    pub total_paid: f64,
    pub status_label: String,
}

impl LeaseListItem {
    pub fn is_terminated(&self) -> bool {
        self.status_label.to_lowercase().contains("terminated")
    }
}
