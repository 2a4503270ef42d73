//! # Project Context Shim
//!
//! Runtime side of the project context: loads the generated snapshot once and
//! answers the queries the chat integration needs.
//!
//! ## Example
//!
//! ```no_run
//! use project_context_shim::{ResourceShim, ShimConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ShimConfig::from_env();
//!     let shim = ResourceShim::new(config.source());
//!
//!     for listing in shim.list_resources(Some("src/")).await {
//!         println!("{} ({})", listing.uri, listing.mime_type);
//!     }
//!     println!("{}", shim.get_summary().await);
//! }
//! ```

mod config;
mod error;
mod shim;
mod source;

pub use config::{
    ShimConfig, DEFAULT_ORIGIN, ENV_API_KEY, ENV_BASE_PATH, ENV_FILE, ENV_ORIGIN,
    MISSING_API_KEY_WARNING,
};
pub use error::{Result, ShimError};
pub use shim::ResourceShim;
pub use source::{ConfiguredSource, ContextSource, FileContextSource, HttpContextSource};
