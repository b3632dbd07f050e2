//! Environment/runtime helpers
//!
//! Sanity checks run once at startup.

use tracing::warn;

/// Warn when the configured frontend directory is missing; the API keeps working without it.
pub async fn ensure_env(frontend_dir: Option<&str>) -> anyhow::Result<()> {
    if let Some(dir) = frontend_dir {
        if tokio::fs::metadata(dir).await.is_err() {
            warn!(frontend_dir = %dir, "frontend assets directory not found; static assets may 404");
        }
    }
    Ok(())
}
