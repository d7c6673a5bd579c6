//! Core Kernel - Foundational types shared by the claims workflow crates
//!
//! This crate provides the building blocks used across the workspace:
//! - Integer identifiers issued by the claims store
//! - Money types with precise decimal arithmetic
//! - The claim period (month and year a claim is raised for)
//! - Port infrastructure for external collaborators

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{ClaimPeriod, TemporalError};
pub use identifiers::{ClaimId, ClaimLineId, DocumentId, LecturerId};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
