use api_types::{
    Amount,
    transaction::{RepeatInterval, Transaction, TransactionEdit, TransactionKind},
};
use thiserror::Error;

/// The five editable fields of a transaction row, in focus order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    Method,
    Kind,
    Amount,
    Category,
    Repeat,
}

impl EditField {
    pub fn next(self) -> Self {
        match self {
            Self::Method => Self::Kind,
            Self::Kind => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Repeat,
            Self::Repeat => Self::Method,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Method => "Method",
            Self::Kind => "Type",
            Self::Amount => "Amount",
            Self::Category => "Category",
            Self::Repeat => "Repetition",
        }
    }

    /// Fields edited by typing rather than by cycling a fixed option list.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Amount)
    }
}

/// Validation failure of a draft or form at submit time.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Form must have content")]
    MissingContent,
    #[error("Amount must be a positive number")]
    InvalidAmount,
    #[error("Choose a payment method")]
    InvalidMethod,
    #[error("Choose a transaction type")]
    InvalidKind,
    #[error("Choose a repetition")]
    InvalidRepeat,
    #[error("Choose a value for every field")]
    InvalidSelection,
}

/// Parses a draft amount string, enforcing the strictly-positive invariant.
pub fn parse_positive_amount(raw: &str) -> Result<Amount, DraftError> {
    let amount: Amount = raw.parse().map_err(|_| DraftError::InvalidAmount)?;
    if amount.is_negative() || amount.is_zero() {
        return Err(DraftError::InvalidAmount);
    }
    Ok(amount)
}

/// Working copy of a row's editable fields.
///
/// Values are the raw form strings the user manipulates; nothing is
/// validated until submit, and the canonical transaction is untouched until
/// the store accepts the payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditDraft {
    pub method_id: String,
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub repeat_interval: String,
}

impl EditDraft {
    /// Seeds a draft from the canonical transaction.
    pub fn seed(tx: &Transaction) -> Self {
        Self {
            method_id: tx.method_id.to_string(),
            kind: tx.kind.as_str().to_string(),
            amount: tx.amount.to_string(),
            category: tx.category.clone(),
            repeat_interval: tx.repeat_interval.as_str().to_string(),
        }
    }

    pub fn field(&self, field: EditField) -> &str {
        match field {
            EditField::Method => &self.method_id,
            EditField::Kind => &self.kind,
            EditField::Amount => &self.amount,
            EditField::Category => &self.category,
            EditField::Repeat => &self.repeat_interval,
        }
    }

    pub fn field_mut(&mut self, field: EditField) -> &mut String {
        match field {
            EditField::Method => &mut self.method_id,
            EditField::Kind => &mut self.kind,
            EditField::Amount => &mut self.amount,
            EditField::Category => &mut self.category,
            EditField::Repeat => &mut self.repeat_interval,
        }
    }

    /// Replaces one field's value. No validation happens here.
    pub fn set(&mut self, field: EditField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn has_empty_field(&self) -> bool {
        [
            self.method_id.as_str(),
            self.kind.as_str(),
            self.amount.as_str(),
            self.category.as_str(),
            self.repeat_interval.as_str(),
        ]
        .iter()
        .any(|value| value.trim().is_empty())
    }

    /// Validates the draft and converts it into the edit payload.
    pub fn to_payload(&self) -> Result<TransactionEdit, DraftError> {
        if self.has_empty_field() {
            return Err(DraftError::MissingContent);
        }

        let method_id = self
            .method_id
            .trim()
            .parse()
            .map_err(|_| DraftError::InvalidMethod)?;
        let kind = TransactionKind::parse(self.kind.trim()).ok_or(DraftError::InvalidKind)?;
        let repeat_interval =
            RepeatInterval::parse(self.repeat_interval.trim()).ok_or(DraftError::InvalidRepeat)?;
        let amount = parse_positive_amount(&self.amount)?;

        Ok(TransactionEdit {
            method_id,
            kind,
            repeat_interval,
            category: self.category.trim().to_string(),
            amount,
        })
    }
}

/// One row's in-flight edit.
///
/// Rows in Viewing have no session; rows in Editing have exactly one,
/// keyed by transaction id in the controller's session map.
#[derive(Clone, Debug)]
pub struct EditSession {
    pub draft: EditDraft,
    pub focus: EditField,
    pub error: Option<String>,
}

impl EditSession {
    pub fn begin(tx: &Transaction) -> Self {
        Self {
            draft: EditDraft::seed(tx),
            focus: EditField::Method,
            error: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }
}
