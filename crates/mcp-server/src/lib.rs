//! Project Context MCP Server
//!
//! Serves the generated project context snapshot to AI assistants over MCP.
//!
//! ## Surface
//!
//! - `resources/list` - every file in the snapshot (no contents)
//! - `resources/read` - full text of one file, or a not-found placeholder
//! - `project_summary` - short overview of the snapshot
//! - `search_resources` - listing filtered by a substring
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "project-context": {
//!       "command": "project-context-mcp",
//!       "env": { "PROJECT_CONTEXT_FILE": "public/project-context.json" }
//!     }
//!   }
//! }
//! ```

use anyhow::Result;
use project_context_shim::ShimConfig;
use rmcp::transport::stdio;
use rmcp::ServiceExt;

mod service;

pub use service::{ProjectContextService, SearchResourcesRequest};

pub async fn main_entry() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = ShimConfig::from_env();
    for warning in config.warnings() {
        log::warn!("{warning}");
    }

    log::info!("Starting Project Context MCP server");

    let service = ProjectContextService::new(&config);
    let server = service.serve(stdio()).await?;

    // Wait for shutdown
    server.waiting().await?;

    log::info!("Project Context MCP server stopped");
    Ok(())
}
