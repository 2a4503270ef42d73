use project_context_protocol::ResourceListing;
use project_context_shim::{ConfiguredSource, ResourceShim, ShimConfig};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, Implementation, ListResourcesResult,
    PaginatedRequestParam, RawResource, ReadResourceRequestParam, ReadResourceResult, Resource,
    ResourceContents, ServerCapabilities, ServerInfo,
};
use rmcp::schemars;
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::Deserialize;
use std::sync::Arc;

/// Project Context MCP Service
#[derive(Clone)]
pub struct ProjectContextService {
    shim: Arc<ResourceShim<ConfiguredSource>>,
    /// Configuration problems surfaced in the server instructions
    warnings: Vec<String>,
    tool_router: ToolRouter<Self>,
}

impl ProjectContextService {
    pub fn new(config: &ShimConfig) -> Self {
        Self::with_shim(ResourceShim::new(config.source()), config.warnings())
    }

    pub fn with_shim(shim: ResourceShim<ConfiguredSource>, warnings: Vec<String>) -> Self {
        Self {
            shim: Arc::new(shim),
            warnings,
            tool_router: Self::tool_router(),
        }
    }

    fn instructions(&self) -> String {
        let mut text = String::from(
            "Project Context exposes the files of the current project as resources. \
             Use resources/list to discover files, resources/read to fetch one, \
             'project_summary' for a short overview and 'search_resources' to filter by name or path.",
        );
        for warning in &self.warnings {
            text.push_str("\nWarning: ");
            text.push_str(warning);
        }
        text
    }
}

fn to_mcp_resource(listing: ResourceListing) -> Resource {
    let mut raw = RawResource::new(listing.uri, listing.name);
    raw.description = Some(listing.description);
    raw.mime_type = Some(listing.mime_type);
    raw.no_annotation()
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchResourcesRequest {
    /// Case-insensitive substring of a resource uri, path or name
    #[schemars(description = "Substring to match against uri, path or file name (empty lists everything)")]
    pub query: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl ProjectContextService {
    /// Short overview of the snapshot
    #[tool(description = "Summarize the local project context: how many files are available and how they split between source and config/docs.")]
    pub async fn project_summary(&self) -> Result<CallToolResult, McpError> {
        let summary = self.shim.get_summary().await;
        Ok(CallToolResult::success(vec![Content::text(summary)]))
    }

    /// Filtered resource listing
    #[tool(description = "List project files whose uri, path or name contains the query. Returns one line per file: uri, mime type and description.")]
    pub async fn search_resources(
        &self,
        Parameters(request): Parameters<SearchResourcesRequest>,
    ) -> Result<CallToolResult, McpError> {
        let listings = self.shim.list_resources(request.query.as_deref()).await;
        if listings.is_empty() {
            return Ok(CallToolResult::success(vec![Content::text(
                "No matching project files.",
            )]));
        }

        let lines: Vec<String> = listings
            .iter()
            .map(|l| format!("{} [{}] {}", l.uri, l.mime_type, l.description))
            .collect();
        Ok(CallToolResult::success(vec![Content::text(lines.join("\n"))]))
    }
}

#[tool_handler]
impl ServerHandler for ProjectContextService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = std::result::Result<ListResourcesResult, McpError>>
           + Send
           + '_ {
        async move {
            let resources = self
                .shim
                .list_resources(None)
                .await
                .into_iter()
                .map(to_mcp_resource)
                .collect();
            Ok(ListResourcesResult::with_all_items(resources))
        }
    }

    #[allow(clippy::manual_async_fn)]
    fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> impl std::future::Future<Output = std::result::Result<ReadResourceResult, McpError>>
           + Send
           + '_ {
        async move {
            // Misses come back as a placeholder text, never as a protocol error.
            let found = self.shim.get_resource(&request.uri).await;
            let contents = found
                .contents
                .into_iter()
                .map(|item| {
                    let mut contents = ResourceContents::text(item.text, item.uri);
                    if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents
                    {
                        *mime_type = Some(item.mime_type);
                    }
                    contents
                })
                .collect();
            Ok(ReadResourceResult { contents })
        }
    }
}
