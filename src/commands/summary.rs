use crate::commands::{format_amount, sync_failure, AppContext};
use crate::utils::cancel::CancelToken;

pub async fn execute(ctx: &AppContext, args: &[&str], token: &CancelToken) -> Result<String, String> {
    if args.first().map(|a| a.eq_ignore_ascii_case("refresh")).unwrap_or(false) {
        ctx.sync.invalidate();
    }

    let summary = ctx
        .sync
        .summary(token, ctx.config.trend_window)
        .await
        .map_err(|e| sync_failure(&e))?;

    let trend = summary
        .trend
        .iter()
        .map(|v| format_amount(*v))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        "📊 Summary".to_string(),
        format!("Transactions:      {}", summary.transaction_count),
        format!("Total spent:       {}", format_amount(summary.total_spent)),
        format!(
            "Suspicious total:  {} ({} flagged)",
            format_amount(summary.suspicious_total),
            summary.suspicious_items.len()
        ),
        format!("Normal total:      {}", format_amount(summary.normal_total)),
    ];
    if !summary.unclassified_items.is_empty() {
        lines.push(format!("Unclassified:      {} record(s)", summary.unclassified_items.len()));
    }
    lines.push(format!("Trend:             [{}]", trend));

    Ok(lines.join("\n"))
}
