use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    project_context_mcp::main_entry().await
}
