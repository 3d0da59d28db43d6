//! Statutory payroll engine
//!
//! This crate calculates a monthly payroll record for an employee from their
//! salary structure and attendance: attendance pro-ration, overtime,
//! provident fund, employee state insurance, income tax withholding and
//! professional tax, with an audit trace of every stage.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
