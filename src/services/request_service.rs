use crate::models::ScoringRequest;
use crate::services::type_service::normalize_type;
use crate::utils::clock::Clock;
use crate::utils::errors::ValidationError;

/// Raw values from the send-money form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferForm {
    pub sender_balance: String,
    pub receiver_balance: String,
    pub amount: String,
    pub payment_type: String,
}

impl TransferForm {
    pub fn new(sender_balance: &str, receiver_balance: &str, amount: &str, payment_type: &str) -> Self {
        Self {
            sender_balance: sender_balance.to_string(),
            receiver_balance: receiver_balance.to_string(),
            amount: amount.to_string(),
            payment_type: payment_type.to_string(),
        }
    }

    /// All four fields must be filled in before anything is built or sent
    pub fn ensure_complete(&self) -> Result<(), ValidationError> {
        let fields: [(&'static str, &String); 4] = [
            ("sender balance", &self.sender_balance),
            ("receiver balance", &self.receiver_balance),
            ("amount", &self.amount),
            ("payment type", &self.payment_type),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(ValidationError::MissingField(*name)),
            None => Ok(()),
        }
    }

    pub fn to_request(&self, clock: &dyn Clock) -> Result<ScoringRequest, ValidationError> {
        self.ensure_complete()?;
        build_request(
            &self.sender_balance,
            &self.receiver_balance,
            &self.amount,
            &self.payment_type,
            clock,
        )
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::NotANumber(field))
}

/// Build a scoring request from form values.
///
/// Post-transaction balances follow fund conservation: the sender loses
/// `amount`, the receiver gains it. Negative results are passed through;
/// the backend decides what is plausible.
pub fn build_request(
    sender_balance: &str,
    receiver_balance: &str,
    amount: &str,
    raw_type: &str,
    clock: &dyn Clock,
) -> Result<ScoringRequest, ValidationError> {
    let old_balance_org = parse_number("sender balance", sender_balance)?;
    let old_balance_dest = parse_number("receiver balance", receiver_balance)?;
    let amount = parse_number("amount", amount)?;

    Ok(ScoringRequest {
        step: clock.now_seconds(),
        transaction_type: normalize_type(raw_type),
        amount,
        old_balance_org,
        new_balance_orig: old_balance_org - amount,
        old_balance_dest,
        new_balance_dest: old_balance_dest + amount,
    })
}
