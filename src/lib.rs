//! Coolify Provider
//!
//! The resource reconciliation core of an infrastructure-as-code provider for
//! self-hosted [Coolify](https://coolify.io). It turns the host's
//! create/read/update/delete/import/plan calls into Coolify REST calls and
//! maps the responses back into state records.
//!
//! # Overview
//!
//! - **Resources**: applications (six source types), eight standalone
//!   database engines, compose services, servers, projects and private keys.
//!   See [`resources`].
//! - **Data sources**: single-record lookups by `uuid` and filtered lists.
//!   See [`data_sources`] and [`filter`].
//! - **Values**: the null/unknown/known three-state model every attribute
//!   uses, and the base64 codec for file-content fields. See [`value`] and
//!   [`codec`].
//! - **Host contract**: [`ProviderService`], implemented by
//!   [`CoolifyProvider`] and driven in tests by [`testing::ProviderTester`].
//! - **Errors and logging**: [`ProviderError`] and `tracing` integration.
//!
//! # Quick Start
//!
//! ```ignore
//! use coolify_provider::{init_logging, CoolifyProvider, ProviderService};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     init_logging();
//!
//!     let provider = CoolifyProvider::new();
//!     provider
//!         .configure(json!({"endpoint": "https://coolify.example.com/api/v1", "token": "1|abc"}))
//!         .await?;
//!
//!     let plan = provider
//!         .plan("coolify_project", None, json!({"name": "web"}), json!({"name": "web"}))
//!         .await?;
//!     let state = provider.create("coolify_project", plan.planned_state).await?;
//!     println!("created project {}", state["uuid"]);
//!     Ok(())
//! }
//! ```
//!
//! # Unknown values
//!
//! Records cross the host boundary as JSON. A value that will only be known
//! after apply is the string [`value::UNKNOWN_SENTINEL`]; a null is JSON
//! `null` or an absent key.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod codec;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod filter;
pub mod host;
pub mod logging;
pub mod provider;
pub mod resources;
pub mod schema;
pub mod testing;
pub mod types;
pub mod validation;
pub mod value;

// Re-export main types at crate root
pub use client::CoolifyClient;
pub use config::{ProviderConfig, ResolvedConfig};
pub use error::ProviderError;
pub use host::ProviderService;
pub use logging::{init_logging, init_logging_with_default, try_init_logging};
pub use provider::CoolifyProvider;
pub use schema::ProviderSchema;
pub use types::{AttributeChange, ImportId, ImportedResource, PlanResult, ProviderMetadata};
pub use validation::{is_valid, validate, validate_result};
pub use value::Attr;

// Re-export async_trait for convenience
pub use async_trait::async_trait;

// Re-export commonly used external types
pub use serde_json;
pub use tracing;
