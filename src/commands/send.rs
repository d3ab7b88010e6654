use crate::commands::{check_failure, format_amount, AppContext};
use crate::services::TransferForm;
use crate::utils::cancel::CancelToken;
use crate::utils::errors::SubmitError;

const USAGE: &str = "Usage: `send <sender balance> <receiver balance> <amount> <payment type>`";

pub async fn execute(ctx: &AppContext, args: &[&str], token: &CancelToken) -> Result<String, String> {
    let arg = |i: usize| args.get(i).copied().unwrap_or("");
    let payment_type = args.get(3..).map(|rest| rest.join(" ")).unwrap_or_default();
    let form = TransferForm::new(arg(0), arg(1), arg(2), &payment_type);

    let outcome = match ctx.fraud.submit_transfer(&form, token).await {
        Ok(outcome) => outcome,
        Err(SubmitError::Validation(e)) => return Err(format!("{}. {}", e, USAGE)),
        Err(SubmitError::Remote(e)) => return Err(check_failure(&e)),
    };
    ctx.sync.invalidate();

    let verdict = if outcome.is_suspicious() {
        "🚨 Flagged as suspicious"
    } else {
        "✅ Accepted as normal"
    };
    Ok(format!(
        "{} ({} sent, status {})",
        verdict,
        format_amount(outcome.amount),
        outcome.result.status
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockBackend;
    use crate::commands::test_support::context;
    use crate::models::TransactionType;

    #[tokio::test]
    async fn test_send_builds_request_from_args() {
        let (ctx, backend) = context(MockBackend::with_history(vec![]));

        let out = execute(&ctx, &["5000", "100", "250", "bank", "transfer"], &CancelToken::new())
            .await
            .unwrap();
        assert_eq!(out, "✅ Accepted as normal (250.00 sent, status Normal)");

        let sent = &backend.requests()[0];
        assert_eq!(sent.transaction_type, TransactionType::Transfer);
        assert_eq!(sent.new_balance_orig, 4750.0);
        assert_eq!(sent.new_balance_dest, 350.0);
    }

    #[tokio::test]
    async fn test_reported_amount_is_the_scored_amount() {
        let (ctx, backend) = context(MockBackend::with_history(vec![]));

        let out = execute(&ctx, &["5000", "100", " 1e3 ", "upi"], &CancelToken::new())
            .await
            .unwrap();
        assert_eq!(out, "✅ Accepted as normal (1000.00 sent, status Normal)");
        assert_eq!(backend.requests()[0].amount, 1000.0);
    }

    #[tokio::test]
    async fn test_missing_type_is_reported() {
        let (ctx, backend) = context(MockBackend::with_history(vec![]));

        let err = execute(&ctx, &["5000", "100", "250"], &CancelToken::new()).await.unwrap_err();
        assert!(err.starts_with("payment type is required"));
        assert!(backend.requests().is_empty());
    }

    #[tokio::test]
    async fn test_bad_number_is_reported() {
        let (ctx, _) = context(MockBackend::with_history(vec![]));

        let err = execute(&ctx, &["5000", "lots", "250", "upi"], &CancelToken::new()).await.unwrap_err();
        assert!(err.starts_with("receiver balance must be a number"));
    }
}
