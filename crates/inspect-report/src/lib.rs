//! Domain library for the home-inspection report service.
//!
//! Inspectors register accounts, attach a company profile, and manage nested
//! inspection-report documents through token-authenticated HTTP routes. The
//! storage seams are expressed as repository traits so the service binary can
//! supply adapters without the domain caring where records live.

pub mod accounts;
pub mod config;
pub mod error;
pub mod reports;
pub mod telemetry;
