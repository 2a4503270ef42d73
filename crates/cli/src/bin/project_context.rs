use anyhow::Result;

fn main() -> Result<()> {
    project_context_cli::main_entry()
}
