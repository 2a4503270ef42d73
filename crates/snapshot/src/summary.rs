use crate::limits::SOURCE_DIRECTORY;
use project_context_protocol::paths::path_prefix_matches;
use project_context_protocol::Resource;

/// Human-readable overview handed to the assistant as context.
///
/// Files under `src/` count as source; everything else is config/docs. A tree
/// without `src/` simply reports zero source files.
pub fn summarize(resources: &[Resource]) -> String {
    let source = resources
        .iter()
        .filter(|r| path_prefix_matches(SOURCE_DIRECTORY, &r.path))
        .count();
    let other = resources.len() - source;
    format!(
        "{} project files available ({source} source, {other} config/docs).",
        resources.len()
    )
}
