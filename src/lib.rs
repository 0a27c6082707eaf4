//! Conecta - Membership and Referral Management Backend
//!
//! This crate implements the membership lifecycle (intent -> invite token ->
//! registration) and the business-referral workflow for a professional
//! networking group.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
