use crate::source::ContextSource;
use project_context_protocol::{ProjectSnapshot, ResourceContents, ResourceListing};
use tokio::sync::OnceCell;

/// Resource lookups over a snapshot loaded at most once.
///
/// The first caller of any operation triggers the fetch; concurrent callers
/// wait on the same initialization and every later call reuses the cached
/// snapshot. Failures are cached as the empty fallback, so there is exactly
/// one fetch attempt per shim.
pub struct ResourceShim<S> {
    source: S,
    context: OnceCell<ProjectSnapshot>,
}

impl<S: ContextSource> ResourceShim<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            context: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.context.initialized()
    }

    /// Loaded snapshot, or [`ProjectSnapshot::fallback`] when the source
    /// failed. Never errors.
    pub async fn load_context(&self) -> &ProjectSnapshot {
        self.context
            .get_or_init(|| async {
                match self.source.fetch().await {
                    Ok(snapshot) => {
                        log::debug!(
                            "Loaded project context from {} ({} resources)",
                            self.source.describe(),
                            snapshot.resources.len()
                        );
                        snapshot
                    }
                    Err(err) => {
                        log::warn!(
                            "Project context unavailable from {}: {err}; using empty context",
                            self.source.describe()
                        );
                        ProjectSnapshot::fallback()
                    }
                }
            })
            .await
    }

    /// Listings in snapshot order, optionally filtered by a case-insensitive
    /// substring of `uri`, `path` or `name`.
    pub async fn list_resources(&self, search: Option<&str>) -> Vec<ResourceListing> {
        let context = self.load_context().await;
        let needle = search
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        context
            .resources
            .iter()
            .filter(|r| needle.as_deref().map_or(true, |n| r.matches(n)))
            .map(|r| r.listing())
            .collect()
    }

    /// Full text of the resource with exactly this `uri`, or a not-found
    /// placeholder naming it.
    pub async fn get_resource(&self, uri: &str) -> ResourceContents {
        let context = self.load_context().await;
        match context.find(uri) {
            Some(resource) => ResourceContents::found(resource),
            None => {
                log::debug!("Resource {uri} not in project context");
                ResourceContents::not_found(uri)
            }
        }
    }

    pub async fn get_summary(&self) -> String {
        self.load_context().await.summary.clone()
    }
}
