//! Hublink CLI - a terminal client for connecting a HubSpot CRM integration.
//!
//! This library exposes the core modules for testing and reuse.

pub mod app;
pub mod backend;
pub mod config;
pub mod input;
pub mod integration;
pub mod session;
pub mod ui;
