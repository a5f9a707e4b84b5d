//! goding-core — question bank, paging, and scoring for the highschool test.
//!
//! This crate defines the data model, the page-by-page session state machine,
//! and the three instrument calculators that the goding CLI (or any other UI
//! shell) drives.

pub mod bank;
pub mod error;
pub mod model;
pub mod paging;
pub mod parser;
pub mod recommend;
pub mod report;
pub mod scoring;
pub mod session;
