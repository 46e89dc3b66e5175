//! Browser-driven end-to-end suite for the warehouse ERP.
//!
//! The suite drives a real Chromium instance over CDP against a running
//! ERP deployment and walks a fixed runbook: seed test fixtures, create a
//! shipment order, then verify that the order's number, date, product and
//! quantities render consistently across every view that shows them
//! (order list, edit page, order modal, deficit page, warehouse revision).
//! It finishes by archiving everything it created.
//!
//! Architecture:
//! - [`browser`] owns the CDP session and a thin `Tab` wrapper
//! - [`pages`] are per-view page objects built on typed [`selectors`]
//! - [`normalize`] canonicalizes order numbers, dates and quantities so
//!   views that format the same value differently still compare equal
//! - [`compare`] collects one reading per view and diffs them
//! - [`soft`] accumulates business-data mismatches without aborting
//! - [`scenarios`] is the ordered runbook, [`runner`] executes it and
//!   writes `suite-results.json`
//!
//! Scenarios communicate through [`context::ScenarioContext`]; a consumer
//! whose producer never ran is reported as skipped rather than failed.

pub mod browser;
pub mod compare;
pub mod config;
pub mod context;
pub mod error;
pub mod normalize;
pub mod pages;
pub mod poll;
pub mod runner;
pub mod scenarios;
pub mod selectors;
pub mod soft;
pub mod table;

pub use config::{RunnerConfig, TargetConfig};
pub use error::{E2eError, E2eResult};
pub use runner::{Status, SuiteResult, SuiteRunner};
