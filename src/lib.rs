//! # props-audit
//!
//! Audits consistency between a project's documentation and its code:
//! configuration-property keys referenced in documentation must exist in
//! code, and keys defined in code must be documented somewhere.
//!
//! The audit is a heuristic lexical scan, not a parser. Each corpus
//! (documentation, code) is scanned three times over the same files with
//! progressively stricter filtering, and set differences between the passes
//! classify every candidate key as missing, undocumented, automatically
//! skipped, manually skipped or documented.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use props_audit::{cross_reference, scan_corpus, AuditConfig, AuditReport};
//!
//! fn main() -> props_audit::Result<()> {
//!     let config = AuditConfig::builder()
//!         .docs_root("docs")
//!         .code_root("src")
//!         .key_prefixes(vec!["ogham.".to_string()])
//!         .build()?;
//!
//!     let docs = scan_corpus(&config.docs)?;
//!     let code = scan_corpus(&config.code)?;
//!     let cross = cross_reference(&docs, &code);
//!     let report = AuditReport::new(docs, code, cross);
//!
//!     println!("{} missing, {} undocumented", report.missing.len(), report.undocumented.len());
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! props-audit audit --docs-root docs --code-root src --prefix ogham.
//! props-audit usages --code-root src ogham.smtp.host
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod exclusions;
pub mod filter;
pub mod matcher;
pub mod reconcile;
pub mod report;
pub mod scanner;

// Re-export commonly used types
pub use config::{AuditConfig, AuditConfigBuilder};
pub use error::{AuditError, Result};
pub use filter::SearchFilter;
pub use matcher::RuleMatcher;
pub use reconcile::{
    cross_reference, find_usages, scan_corpus, CorpusConfig, CorpusScan, CrossReference,
};
pub use report::{render, AuditReport, ReportStyle};
pub use scanner::{Location, ScanResult, Searcher};

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the crate.
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
