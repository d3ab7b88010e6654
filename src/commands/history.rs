use crate::commands::{format_amount, format_time, sync_failure, AppContext};
use crate::models::TransactionRecord;
use crate::utils::cancel::CancelToken;
use crate::utils::table::{Align, Table};

/// Render records as a text table, newest first
pub(crate) fn render_records(records: &[TransactionRecord]) -> String {
    let mut table = Table::new(&["ID", "Time", "Type", "Amount", "Status", "Score"])
        .align(0, Align::Right)
        .align(3, Align::Right)
        .align(5, Align::Right);

    for record in records {
        table.add_row(vec![
            record.id.to_string(),
            format_time(record.time),
            record.transaction_type.to_string(),
            format_amount(record.amount),
            record.status.as_str().to_string(),
            record.score.map(|s| format!("{:.4}", s)).unwrap_or_else(|| "-".to_string()),
        ]);
    }

    table.render()
}

pub async fn execute(ctx: &AppContext, args: &[&str], token: &CancelToken) -> Result<String, String> {
    let history = match args.first().map(|a| a.to_lowercase()) {
        Some(arg) if arg == "refresh" => ctx.sync.refresh(token).await,
        Some(arg) if arg == "latest" => {
            return match ctx.sync.latest(token).await.map_err(|e| sync_failure(&e))? {
                Some(record) => Ok(render_records(std::slice::from_ref(&record))),
                None => Ok("No transactions yet".to_string()),
            };
        }
        Some(other) => return Err(format!("Unknown option '{}'. Usage: `history [refresh|latest]`", other)),
        None => ctx.sync.history(token).await,
    }
    .map_err(|e| sync_failure(&e))?;

    if history.is_empty() {
        return Ok("No transactions yet".to_string());
    }

    Ok(format!("📋 Transaction History ({})\n{}", history.len(), render_records(&history)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::commands::test_support::context;
    use serde_json::json;

    #[tokio::test]
    async fn test_history_table() {
        let (ctx, _) = context(MockBackend::with_history(vec![
            json!({"id": 7, "status": "Normal", "amount": 12.5, "score": 0.25, "time": 1_700_000_000_000i64, "type": "PAYMENT"}),
            json!({"id": 8, "status": "Suspicious", "amount": "oops", "time": 1_700_000_100_000i64, "type": "TRANSFER"}),
        ]));

        let out = execute(&ctx, &[], &CancelToken::new()).await.unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "📋 Transaction History (2)");
        assert!(lines[1].starts_with("ID | Time"));
        // Newest first, unusable amount shown as a dash
        assert!(lines[3].starts_with(" 8 | "));
        assert!(lines[3].contains("TRANSFER"));
        assert!(lines[3].contains("|      - | Suspicious"));
        assert!(lines[4].contains("PAYMENT"));
        assert!(lines[4].contains("0.2500"));
    }

    #[tokio::test]
    async fn test_empty_history() {
        let (ctx, _) = context(MockBackend::with_history(vec![]));
        assert_eq!(execute(&ctx, &[], &CancelToken::new()).await.unwrap(), "No transactions yet");
        assert_eq!(execute(&ctx, &["latest"], &CancelToken::new()).await.unwrap(), "No transactions yet");
    }

    #[tokio::test]
    async fn test_latest() {
        let (ctx, _) = context(MockBackend::with_history(vec![
            json!({"id": 3, "status": "Normal", "amount": 9, "time": 1}),
        ]));
        let out = execute(&ctx, &["latest"], &CancelToken::new()).await.unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.lines().nth(2).unwrap().starts_with(" 3 | "));
    }
}
