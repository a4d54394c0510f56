#![doc(test(attr(deny(warnings))))]

//! Lease Core provides the lease term arithmetic, schedule aggregation and wizard state
//! that sit behind a property-management front end, plus typed access to the backend's
//! lease functions.

pub mod config;
pub mod errors;
pub mod lease;
pub mod rpc;
pub mod utils;

use std::sync::Once;

use serde::Serialize;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Lease Core tracing initialized.");
    });
}

/// Metadata captured by `build.rs` at compile time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("LEASE_CORE_BUILD_HASH"),
        git_status: env!("LEASE_CORE_BUILD_STATUS"),
        timestamp: env!("LEASE_CORE_BUILD_TIMESTAMP"),
        target: env!("LEASE_CORE_BUILD_TARGET"),
        profile: env!("LEASE_CORE_BUILD_PROFILE"),
        rustc: env!("LEASE_CORE_BUILD_RUSTC"),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }

    #[test]
    fn build_info_is_populated() {
        let info = super::build_info();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.git_hash.is_empty());
        assert!(!info.target.is_empty());
    }
}
