//! Integration tests for Skiff
//!
//! Router-level tests: requests are driven through the axum routers with
//! `tower::ServiceExt::oneshot`, with every upstream pointed at an
//! unroutable address so only the edge behavior (validation, error
//! taxonomy, response shapes) is exercised: no live collaborators.

#[path = "integration/proxy_allowlist.rs"]
mod proxy_allowlist;

#[path = "integration/web_api.rs"]
mod web_api;
