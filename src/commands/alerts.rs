use crate::commands::history::render_records;
use crate::commands::{sync_failure, AppContext};
use crate::utils::cancel::CancelToken;

pub async fn execute(ctx: &AppContext, args: &[&str], token: &CancelToken) -> Result<String, String> {
    let from_server = args.first().map(|a| a.eq_ignore_ascii_case("server")).unwrap_or(false);

    let alerts = if from_server {
        ctx.sync.server_alerts(token).await.map(|a| a.as_ref().clone())
    } else {
        ctx.sync.alerts(token).await
    }
    .map_err(|e| sync_failure(&e))?;

    if alerts.is_empty() {
        return Ok("✅ No suspicious transactions".to_string());
    }

    Ok(format!("🚨 Suspicious Transactions ({})\n{}", alerts.len(), render_records(&alerts)))
}
