//! Policy Gap Analyzer - compliance framework gap evaluation
//!
//! This crate evaluates an organization's policy documents against
//! cybersecurity frameworks (NIST CSF, ISO 27001, SOC 2) and reports a
//! met/gap/partial status with remediation guidance for every control.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
