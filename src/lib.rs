#![forbid(unsafe_code)]

//! @acp:module "iconsmith Library"
//! @acp:summary "Maintains generated icon component modules fed from an Iconify registry"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # iconsmith
//!
//! Keeps a generated module of icon components in sync with an icon registry.
//! The module is treated as a small structured document: existing entries are
//! discovered from its text, new icons are inserted in sorted order, replaced
//! icons are rewritten in place, and derived regions are regenerated.
//!
//! ## Features
//!
//! - **SVG pipeline**: optimization, accessibility attributes, provenance and titles
//! - **Dialects**: React, Preact and Solid, with or without TypeScript
//! - **Two shapes**: a single barrel module or one file per icon
//! - **Batches**: parallel fetch, ordered merge, partial success
//!
//! ## Example
//!
//! ```rust,no_run
//! use iconsmith::merge::{BarrelTarget, BatchRequest, Orchestrator};
//! use iconsmith::prompt::AssumeYes;
//! use iconsmith::registry::IconifyClient;
//! use iconsmith::Config;
//!
//! fn main() -> iconsmith::Result<()> {
//!     let config = Config::default();
//!     let client = IconifyClient::default();
//!     let text = std::fs::read_to_string("src/icons.tsx").unwrap_or_default();
//!     let mut target = BarrelTarget::new("src/icons.tsx", &text, config.dialect())?;
//!
//!     let request = BatchRequest {
//!         icons: vec!["lucide:check".to_string()],
//!         name: None,
//!     };
//!     let report = Orchestrator::new(&config, &client, &AssumeYes).run(&request, &mut target)?;
//!     println!("{}", report.summary);
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod component;
pub mod config;
pub mod document;
pub mod error;
pub mod folder;
pub mod icon;
pub mod listing;
pub mod merge;
pub mod prompt;
pub mod registry;
pub mod storage;
pub mod svg;

// Re-exports
pub use component::{synthesize, ComponentDefinition, Dialect, Framework};
pub use config::{Config, OutputShape};
pub use document::{EntryValue, ModuleDocument};
pub use error::{IconError, Result};
pub use icon::{ComponentName, IconIdentifier};
pub use listing::{ListingEntry, Provenance};
pub use merge::{BatchReport, BatchRequest, IconOutcome, IconStatus, Orchestrator};
pub use svg::{transform, A11yStrategy, SvgDocument, TransformOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
