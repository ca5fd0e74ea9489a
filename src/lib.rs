//! Rota Scheduling Engine
//!
//! This crate assigns people to work roles across fixed daily segments,
//! tracks whether staffing needs are met and exports computed shift
//! windows, with time off carving holes out of otherwise continuous shifts.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod scheduling;
pub mod store;

#[cfg(test)]
mod test_support;
