use tracing::{info, warn};

use crate::commands::AppContext;

pub async fn execute(ctx: &AppContext) -> Result<String, String> {
    let message = ctx.backend.clear_history().await.map_err(|e| {
        warn!("Clearing history failed: {}", e);
        "⚠️ Unable to reach backend".to_string()
    })?;

    ctx.sync.invalidate();
    info!("History cleared: {}", message);
    Ok(format!("🗑️ {}", message))
}
