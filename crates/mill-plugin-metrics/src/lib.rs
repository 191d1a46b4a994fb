//! Capability registration metrics for language plugins
//!
//! Records which plugin registered which language-feature capability, and under
//! which registry handle, by sitting in front of the host's
//! [`LanguageFeatureRegistry`]. A background [`InventoryReporter`] periodically
//! emits the collected inventory to an observability sink.
//!
//! # Example
//!
//! ```rust,ignore
//! use mill_plugin_metrics::{
//!     FeatureRegistrationTracker, InventoryReporter, MetricsConfig, TracingSink,
//! };
//! use std::sync::Arc;
//!
//! let config = MetricsConfig::load()?;
//! let tracker = FeatureRegistrationTracker::new(host_registry);
//! let reporter = InventoryReporter::from_config(
//!     tracker.inventory().clone(),
//!     Arc::new(TracingSink),
//!     &config,
//! )?;
//! let handle = reporter.spawn_if_enabled(&config)?;
//!
//! // Hand `tracker` to the plugin host in place of `host_registry`...
//!
//! if let Some(handle) = handle {
//!     handle.cancel().await;
//! }
//! ```

pub mod capability;
pub mod config;
pub mod error;
pub mod inventory;
pub mod logging;
pub mod registry;
pub mod reporter;
pub mod tracker;

pub use capability::{CapabilityKind, Handle, PluginId, PluginInfo, SignatureHelpMetadata};
pub use config::{
    LogFormat, LoggingConfig, MetricsConfig, DEFAULT_REPORT_INTERVAL, MAX_REPORT_INTERVAL,
};
pub use error::{MetricsError, MetricsResult, RegistrationError, RegistrationResult};
pub use inventory::{FeatureInventory, Inventory, InventorySummary};
pub use registry::LanguageFeatureRegistry;
pub use reporter::{InventoryReport, InventoryReporter, ReportSink, ReporterHandle, TracingSink};
pub use tracker::FeatureRegistrationTracker;

// Re-exported so registry implementors don't need a direct lsp-types dependency
pub use lsp_types::{CodeActionKind, DocumentFilter};
