//! op-monitor - Library
//!
//! Typed client for the production-order activity tracker: session store,
//! API gateway, resource services, list-view controllers, pagination and
//! the dashboard aggregator. The binary in `main.rs` is a thin CLI on top.

pub mod cli;
pub mod clients;
pub mod config;
pub mod controller;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod guard;
pub mod notify;
pub mod pagination;
pub mod render;
pub mod services;
pub mod session;
pub mod tasks;
pub mod types;
