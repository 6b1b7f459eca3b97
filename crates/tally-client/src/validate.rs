use crate::model::{Category, MAX_AMOUNT_UNITS, Money, NewTransaction, TransactionType};
use crate::{ClientError, ClientResult};

/// Raw user input for a new transaction, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct TransactionInput {
    pub description: String,
    pub amount: String,
    pub kind: String,
    pub category: String,
}

/// Checks user input at the boundary so the ledger can assume validity.
pub fn validate_new_transaction(input: &TransactionInput) -> ClientResult<NewTransaction> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(ClientError::empty_description());
    }

    let amount = validate_amount(&input.amount)?;
    let kind = input.kind.parse::<TransactionType>()?;
    let category = input.category.parse::<Category>()?;

    Ok(NewTransaction {
        description: description.to_string(),
        amount,
        kind,
        category,
    })
}

fn validate_amount(raw: &str) -> ClientResult<Money> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return Err(ClientError::invalid_amount(
            candidate,
            "amount must be present and non-empty.",
        ));
    }

    let Ok(units) = candidate.parse::<f64>() else {
        return Err(ClientError::invalid_amount(
            candidate,
            &format!("amount must be numeric; got \"{candidate}\"."),
        ));
    };
    if !units.is_finite() {
        return Err(ClientError::invalid_amount(
            candidate,
            &format!("amount must be numeric; got \"{candidate}\"."),
        ));
    }

    match Money::from_units(units) {
        Some(amount) if amount.exceeds_limit() => Err(ClientError::invalid_amount(
            candidate,
            &format!("amount must not exceed {MAX_AMOUNT_UNITS}."),
        )),
        Some(amount) if amount.is_positive() => Ok(amount),
        Some(_) => Err(ClientError::invalid_amount(
            candidate,
            "amount must be greater than zero.",
        )),
        None => Err(ClientError::invalid_amount(
            candidate,
            &format!("amount is out of range; got \"{candidate}\"."),
        )),
    }
}
