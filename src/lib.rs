//! # Regflow
//!
//! Core logic for a CRM-embedded corporate tax registration widget: field
//! validation, fiscal date derivation, upload caching, and the fail-fast
//! submission sequence that commits a completed registration to the host.
//!
//! The embedding page owns all rendering and event wiring; this crate owns
//! what happens between those events and the host APIs.
//!
//! ## Modules
//!
//! - `config` - Widget configuration with production defaults
//! - `form` - Form input, presence validation, date derivation, wire payloads
//! - `host` - Capability traits over the embedding CRM plus REST and mock implementations
//! - `pipeline` - Sequenced, fail-fast submission of a completed registration
//! - `session` - Per-visit record and account identity
//! - `upload` - Single-slot cache for the certificate upload
//! - `widget` - Facade tying the page's hooks to the core
pub mod config;
pub mod form;
pub mod host;
pub mod pipeline;
pub mod session;
pub mod upload;
pub mod widget;
