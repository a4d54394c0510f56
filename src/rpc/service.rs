use chrono::NaiveDateTime;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    CreateLeaseParams, DashboardStats, ExtendLeaseParams, GetDashboardStatsParams,
    GetLeasesListParams, LeaseScheduleParams, ProcessAutomaticPaymentParams, RpcClient,
    TerminateLeaseParams, CREATE_LEASE, EXTEND_LEASE, GET_DASHBOARD_STATS, GET_LEASES_LIST,
    GET_LEASE_SCHEDULE, PROCESS_AUTOMATIC_PAYMENT, TERMINATE_LEASE,
};
use crate::{
    config::{Config, DEFAULT_TERMINATION_REASON},
    errors::{LeaseError, Result},
    lease::{extend_end_date, LeaseListItem, ScheduleItem, ScheduleSummary},
};

/// Typed wrappers over the backend's lease functions.
pub struct LeaseService<C> {
    client: C,
    termination_reason: String,
}

impl<C: RpcClient> LeaseService<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            termination_reason: DEFAULT_TERMINATION_REASON.to_string(),
        }
    }

    pub fn with_config(client: C, config: &Config) -> Self {
        Self {
            client,
            termination_reason: config.termination_reason.clone(),
        }
    }

    /// Persists a new lease and returns its identifier.
    pub fn create_lease(&self, params: &CreateLeaseParams) -> Result<i64> {
        let data = self.invoke(
            CREATE_LEASE,
            params,
            "An unexpected error occurred while creating the lease.",
        )?;
        decode::<Option<i64>>(data)?
            .ok_or_else(|| LeaseError::EmptyResult("Lease creation returned no identifier.".into()))
    }

    pub fn leases_list(&self, params: &GetLeasesListParams) -> Result<Vec<LeaseListItem>> {
        let data = self.invoke(
            GET_LEASES_LIST,
            params,
            "An unexpected error occurred while fetching the leases list.",
        )?;
        Ok(decode::<Option<Vec<LeaseListItem>>>(data)?.unwrap_or_default())
    }

    pub fn lease_schedule(&self, lease_id: i64) -> Result<Vec<ScheduleItem>> {
        let data = self.invoke(
            GET_LEASE_SCHEDULE,
            &LeaseScheduleParams { lease_id },
            "An unexpected error occurred while fetching the lease schedule.",
        )?;
        Ok(decode::<Option<Vec<ScheduleItem>>>(data)?.unwrap_or_default())
    }

    /// Fetches the schedule and reduces it to the detail-view summary.
    pub fn lease_overview(&self, lease_id: i64) -> Result<ScheduleSummary> {
        let schedule = self.lease_schedule(lease_id)?;
        Ok(ScheduleSummary::from_items(&schedule))
    }

    /// Records a payment; the backend applies it to the oldest unpaid periods first.
    pub fn process_automatic_payment(&self, params: &ProcessAutomaticPaymentParams) -> Result<()> {
        self.invoke(
            PROCESS_AUTOMATIC_PAYMENT,
            params,
            "An unexpected error occurred while processing the automatic payment.",
        )?;
        Ok(())
    }

    /// Ends a lease early. A missing reason falls back to the configured one.
    pub fn terminate_lease(&self, params: &TerminateLeaseParams) -> Result<()> {
        let params = TerminateLeaseParams {
            lease_id: params.lease_id,
            reason: Some(
                params
                    .reason
                    .clone()
                    .unwrap_or_else(|| self.termination_reason.clone()),
            ),
        };
        self.invoke(
            TERMINATE_LEASE,
            &params,
            "An unexpected error occurred while terminating the lease.",
        )?;
        Ok(())
    }

    pub fn extend_lease(&self, params: &ExtendLeaseParams) -> Result<()> {
        self.invoke(
            EXTEND_LEASE,
            params,
            "An unexpected error occurred while extending the lease.",
        )?;
        Ok(())
    }

    /// Extends `lease` by `additional` billing periods and returns the new inclusive end.
    pub fn extend_lease_by(&self, lease: &LeaseListItem, additional: u32) -> Result<NaiveDateTime> {
        if lease.is_terminated() {
            return Err(LeaseError::InvalidInput(format!(
                "lease {} is terminated and cannot be extended",
                lease.id
            )));
        }
        let new_end = extend_end_date(lease.end_date, lease.payment_frequency, additional)?
            .ok_or_else(|| {
                LeaseError::InvalidInput("extension needs at least one period".into())
            })?;
        self.extend_lease(&ExtendLeaseParams::new(lease.id, new_end))?;
        Ok(new_end)
    }

    pub fn dashboard_stats(&self, params: &GetDashboardStatsParams) -> Result<DashboardStats> {
        let data = self.invoke(
            GET_DASHBOARD_STATS,
            params,
            "An unexpected error occurred while fetching dashboard stats.",
        )?;
        decode::<Option<Vec<DashboardStats>>>(data)?
            .and_then(|rows| rows.into_iter().next())
            .ok_or_else(|| LeaseError::EmptyResult("No dashboard data available.".into()))
    }

    fn invoke<P: Serialize>(&self, function: &str, params: &P, fallback: &str) -> Result<Value> {
        let args = serde_json::to_value(params)?;
        debug!(function, "calling backend function");
        self.client.call(function, args).map_err(|failure| {
            let message = if failure.message.trim().is_empty() {
                fallback.to_string()
            } else {
                failure.message
            };
            warn!(function, %message, "backend function failed");
            LeaseError::Rpc {
                function: function.to_string(),
                message,
            }
        })
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T> {
    Ok(serde_json::from_value(data)?)
}
