//! The two single-submit forms: add transaction and add payment method.
//!
//! Both are plain value state with an empty-field guard; submission and the
//! follow-up refreshes are driven by the app. Failed submissions never clear
//! what the user typed.

use api_types::{
    method::{MethodNew, MethodProcessor, MethodType},
    transaction::{RepeatInterval, TransactionKind, TransactionNew},
};

use crate::controller::{DraftError, parse_positive_amount};

/// Outcome line shown under a form after a submit attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMessage {
    Info(String),
    Error(String),
}

/// Focusable fields of the add-transaction form, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionField {
    Kind,
    Category,
    Method,
    Amount,
    Repeating,
    Repetition,
}

impl TransactionField {
    /// Tab order; the repetition select is reachable only while the
    /// "repeating" toggle is on, mirroring the hidden select of the source
    /// form.
    pub fn next(self, repeating: bool) -> Self {
        match self {
            Self::Kind => Self::Category,
            Self::Category => Self::Method,
            Self::Method => Self::Amount,
            Self::Amount => Self::Repeating,
            Self::Repeating if repeating => Self::Repetition,
            Self::Repeating => Self::Kind,
            Self::Repetition => Self::Kind,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Kind => "Transaction Type",
            Self::Category => "Category",
            Self::Method => "Payment method",
            Self::Amount => "Amount",
            Self::Repeating => "Repeating",
            Self::Repetition => "Repetition",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Amount)
    }
}

/// State of the "Add transaction" form.
#[derive(Clone, Debug)]
pub struct TransactionForm {
    pub kind: String,
    pub category: String,
    pub payment_method: String,
    pub amount: String,
    pub repeating: bool,
    pub repetition: String,
    pub focus: TransactionField,
    pub message: Option<FormMessage>,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            kind: String::new(),
            category: String::new(),
            payment_method: String::new(),
            amount: String::new(),
            repeating: false,
            repetition: RepeatInterval::None.as_str().to_string(),
            focus: TransactionField::Kind,
            message: None,
        }
    }
}

impl TransactionForm {
    /// Resets every field after a successful submit.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The kind currently chosen, if any; drives the category options.
    pub fn chosen_kind(&self) -> Option<TransactionKind> {
        TransactionKind::parse(self.kind.trim())
    }

    pub fn has_empty_field(&self) -> bool {
        [
            self.kind.as_str(),
            self.category.as_str(),
            self.payment_method.as_str(),
            self.amount.as_str(),
            self.repetition.as_str(),
        ]
        .iter()
        .any(|value| value.trim().is_empty())
    }

    /// Validates the form and builds the registration payload.
    pub fn payload(&self) -> Result<TransactionNew, DraftError> {
        if self.has_empty_field() {
            return Err(DraftError::MissingContent);
        }

        let kind = self.chosen_kind().ok_or(DraftError::InvalidKind)?;
        let payment_method = self
            .payment_method
            .trim()
            .parse()
            .map_err(|_| DraftError::InvalidMethod)?;
        let repetition = if self.repeating {
            RepeatInterval::parse(self.repetition.trim()).ok_or(DraftError::InvalidRepeat)?
        } else {
            RepeatInterval::None
        };
        let amount = parse_positive_amount(&self.amount)?;

        Ok(TransactionNew {
            kind,
            category: self.category.trim().to_string(),
            payment_method,
            amount,
            repetition,
        })
    }
}

/// Focusable fields of the add-method form, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodField {
    Name,
    Kind,
    Processor,
}

impl MethodField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Kind,
            Self::Kind => Self::Processor,
            Self::Processor => Self::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Card Name",
            Self::Kind => "Type",
            Self::Processor => "Card Processor",
        }
    }

    pub fn is_text(self) -> bool {
        matches!(self, Self::Name)
    }
}

/// State of the "Add Payment Method" form.
#[derive(Clone, Debug)]
pub struct MethodForm {
    pub name: String,
    pub kind: String,
    pub processor: String,
    pub focus: MethodField,
    pub message: Option<FormMessage>,
}

impl Default for MethodForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            kind: String::new(),
            processor: String::new(),
            focus: MethodField::Name,
            message: None,
        }
    }
}

impl MethodForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn has_empty_field(&self) -> bool {
        [self.name.as_str(), self.kind.as_str(), self.processor.as_str()]
            .iter()
            .any(|value| value.trim().is_empty())
    }

    /// Validates the form and builds the creation payload.
    pub fn payload(&self) -> Result<MethodNew, DraftError> {
        if self.has_empty_field() {
            return Err(DraftError::MissingContent);
        }

        let kind = MethodType::parse(self.kind.trim()).ok_or(DraftError::InvalidSelection)?;
        let processor =
            MethodProcessor::parse(self.processor.trim()).ok_or(DraftError::InvalidSelection)?;

        Ok(MethodNew {
            name: self.name.trim().to_string(),
            kind,
            processor,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_transaction_form() -> TransactionForm {
        TransactionForm {
            kind: "expense".to_string(),
            category: "groceries".to_string(),
            payment_method: "3".to_string(),
            amount: "42.50".to_string(),
            repeating: false,
            repetition: "none".to_string(),
            focus: TransactionField::Kind,
            message: None,
        }
    }

    #[test]
    fn empty_fields_reject_with_missing_content() {
        let mut form = filled_transaction_form();
        form.amount.clear();
        assert_eq!(form.payload(), Err(DraftError::MissingContent));

        let mut form = filled_transaction_form();
        form.kind.clear();
        assert_eq!(form.payload(), Err(DraftError::MissingContent));
    }

    #[test]
    fn payload_carries_the_typed_values() {
        let payload = filled_transaction_form().payload().expect("valid form");
        assert_eq!(payload.kind, TransactionKind::Expense);
        assert_eq!(payload.category, "groceries");
        assert_eq!(payload.payment_method, 3);
        assert_eq!(payload.amount.cents(), 4250);
        assert_eq!(payload.repetition, RepeatInterval::None);
    }

    #[test]
    fn repetition_applies_only_when_the_toggle_is_on() {
        let mut form = filled_transaction_form();
        form.repetition = "monthly".to_string();
        assert_eq!(
            form.payload().expect("valid").repetition,
            RepeatInterval::None
        );

        form.repeating = true;
        assert_eq!(
            form.payload().expect("valid").repetition,
            RepeatInterval::Monthly
        );
    }

    #[test]
    fn repetition_is_skipped_in_tab_order_unless_repeating() {
        assert_eq!(
            TransactionField::Repeating.next(false),
            TransactionField::Kind
        );
        assert_eq!(
            TransactionField::Repeating.next(true),
            TransactionField::Repetition
        );
    }

    #[test]
    fn method_form_guards_and_builds() {
        let mut form = MethodForm {
            name: "everyday card".to_string(),
            kind: "credit".to_string(),
            processor: "am".to_string(),
            ..Default::default()
        };

        let payload = form.payload().expect("valid form");
        assert_eq!(payload.name, "everyday card");
        assert_eq!(payload.kind, MethodType::Credit);
        assert_eq!(payload.processor, MethodProcessor::AmericanExpress);

        form.processor.clear();
        assert_eq!(form.payload(), Err(DraftError::MissingContent));
        // The typed name survives the rejection.
        assert_eq!(form.name, "everyday card");
    }
}
