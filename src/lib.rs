//! Integration-test client for a pickup & delivery VRP solver service.
//!
//! Sends one fixed 17-node problem to `POST /solve` and prints the plan.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod evaluation;
pub mod fixtures;
pub mod report;
