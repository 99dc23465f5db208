//! meta-reports - Monthly news digests for the wiki
//!
//! Reads published news posts from the website database, converts them to
//! wikitext, groups them by month and program tag, and publishes one report
//! page per closed month.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::ReportError;
