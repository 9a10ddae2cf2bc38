#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # fuelwatch-entities
//!
//! Reusable, agnostic domain entities for fuelwatch.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod email;
pub mod fuel;
pub mod geo;
pub mod outcome;
pub mod station;
pub mod subscription;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
