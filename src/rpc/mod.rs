//! Boundary to the remote lease backend.
//!
//! The backend exposes named functions that take a JSON object of arguments and answer
//! with data or an error message. [`RpcClient`] abstracts that transport; [`LeaseService`]
//! gives each function a typed signature.

pub mod params;
pub mod service;

use serde_json::Value;

pub use params::{
    CreateLeaseParams, DashboardStats, ExtendLeaseParams, GetDashboardStatsParams,
    GetLeasesListParams, LeaseScheduleParams, ProcessAutomaticPaymentParams,
    TerminateLeaseParams,
};
pub use service::LeaseService;

pub const CREATE_LEASE: &str = "rt_create_lease";
pub const GET_LEASES_LIST: &str = "rt_get_leases_list";
pub const GET_LEASE_SCHEDULE: &str = "rt_get_lease_schedule";
pub const PROCESS_AUTOMATIC_PAYMENT: &str = "rt_process_automatic_payment";
pub const TERMINATE_LEASE: &str = "rt_terminate_lease";
pub const EXTEND_LEASE: &str = "rt_extend_lease";
pub const GET_DASHBOARD_STATS: &str = "rt_get_dashboard_stats";

/// Error message returned by the backend for a failed call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RpcFailure {
    pub message: String,
}

impl RpcFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Transport for named remote procedures.
pub trait RpcClient {
    /// Invokes `function` with `params` and returns its `data` payload (`null` when the
    /// function returns nothing).
    fn call(&self, function: &str, params: Value) -> Result<Value, RpcFailure>;
}

impl<T: RpcClient + ?Sized> RpcClient for &T {
    fn call(&self, function: &str, params: Value) -> Result<Value, RpcFailure> {
        (**self).call(function, params)
    }
}
