use std::path::Path;
use tracing::warn;

use crate::commands::{sync_failure, AppContext};
use crate::services::chart_service::{self, ChartError};
use crate::utils::cancel::CancelToken;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;

pub async fn execute(ctx: &AppContext, args: &[&str], token: &CancelToken) -> Result<String, String> {
    let Some(out) = args.first() else {
        return Err("Usage: `chart <output.png>`".to_string());
    };

    let summary = ctx
        .sync
        .summary(token, ctx.config.trend_window)
        .await
        .map_err(|e| sync_failure(&e))?;

    let path = Path::new(out);
    match chart_service::render_trend_chart(&summary.trend, path, WIDTH, HEIGHT) {
        Ok(()) => Ok(format!("📈 Trend chart of {} point(s) saved to {}", summary.trend.len(), path.display())),
        Err(ChartError::NotEnoughData) => Ok(ChartError::NotEnoughData.to_string()),
        Err(e) => {
            warn!("Chart rendering failed: {}", e);
            Err(e.to_string())
        }
    }
}
