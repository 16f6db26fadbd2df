//! Outbound CRM Adapter
//!
//! This crate implements the intake domain's [`ContactSync`] port against
//! the GoHighLevel (LeadConnector) contact-creation API.
//!
//! The adapter is stateless: it maps a normalized submission into one
//! authenticated contact-creation request, classifies the response, and
//! returns the external contact identifier. It performs no retries and no
//! search-before-create; duplicate external contacts are an accepted
//! tradeoff of the create-only call.
//!
//! [`ContactSync`]: domain_intake::ports::ContactSync

pub mod client;

pub use client::{GhlClient, GhlConfig, GHL_API_VERSION};
