use crate::commands::{check_failure, format_amount, AppContext};
use crate::models::FraudCheckOutcome;
use crate::utils::cancel::CancelToken;

pub(crate) fn describe(outcome: &FraudCheckOutcome) -> String {
    let score = outcome
        .result
        .anomaly_score
        .map(|s| format!("{:.4}", s))
        .unwrap_or_else(|| "n/a".to_string());

    if outcome.is_suspicious() {
        format!(
            "🚨 Suspicious: {} of {} flagged (status {}, score {})",
            outcome.request.transaction_type,
            format_amount(outcome.amount),
            outcome.result.status,
            score
        )
    } else {
        format!(
            "✅ Looks normal: {} of {} (status {}, score {})",
            outcome.request.transaction_type,
            format_amount(outcome.amount),
            outcome.result.status,
            score
        )
    }
}

pub async fn execute(ctx: &AppContext, token: &CancelToken) -> Result<String, String> {
    let outcome = ctx.fraud.run_check(token).await.map_err(|e| check_failure(&e))?;
    // The backend stores every scored transaction
    ctx.sync.invalidate();
    Ok(describe(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fraud_guardian::ApiError;
    use crate::api::mock::MockBackend;
    use crate::commands::test_support::context;
    use serde_json::json;

    #[tokio::test]
    async fn test_check_with_empty_history() {
        let (ctx, backend) = context(MockBackend::with_history(vec![]));

        let out = execute(&ctx, &CancelToken::new()).await.unwrap();
        assert_eq!(out, "✅ Looks normal: PAYMENT of 1000.00 (status Normal, score 0.1200)");
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_check_flags_latest() {
        let (ctx, _) = context(MockBackend::with_history(vec![
            json!({"id": 1, "status": "Normal", "amount": 25000, "time": 5, "type": "CASH_OUT",
                   "oldbalanceOrg": 25000, "newbalanceOrig": 0, "oldbalanceDest": 0, "newbalanceDest": 25000}),
        ]));

        let out = execute(&ctx, &CancelToken::new()).await.unwrap();
        assert!(out.starts_with("🚨 Suspicious: CASH_OUT of 25000.00"));
    }

    #[tokio::test]
    async fn test_check_invalidates_history() {
        let (ctx, backend) = context(MockBackend::with_history(vec![]));
        let token = CancelToken::new();

        ctx.sync.history(&token).await.unwrap();
        execute(&ctx, &token).await.unwrap();
        ctx.sync.history(&token).await.unwrap();

        // One for the first view, one for the check, one after invalidation
        assert_eq!(backend.history_calls(), 3);
    }

    #[tokio::test]
    async fn test_check_failure_status_line() {
        let (ctx, _) = context(MockBackend::failing_history(ApiError::Request("refused".into())));
        assert_eq!(execute(&ctx, &CancelToken::new()).await.unwrap_err(), "⚠️ Unable to reach backend");
    }
}
