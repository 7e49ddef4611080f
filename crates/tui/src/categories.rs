use api_types::transaction::TransactionKind;

/// Category options offered for income transactions: wire value and label.
const INCOME_CATEGORIES: &[(&str, &str)] = &[
    ("earned", "Earned income"),
    ("passive", "Passive income"),
    ("portfolio", "Portfolio income"),
    ("other", "Other"),
];

const EXPENSE_CATEGORIES: &[(&str, &str)] = &[
    ("entertainment", "Entertainment"),
    ("vehicle", "Vehicle"),
    ("housing", "Housing"),
    ("transportation", "Transportation"),
    ("shopping", "Shopping"),
    ("financial", "Financial Expenses"),
    ("food", "Food and Drinks"),
    ("groceries", "Groceries"),
    ("gas", "Gas"),
    ("other", "Other"),
];

/// Until a kind is chosen, "other" is the only category on offer.
const UNSET_CATEGORIES: &[(&str, &str)] = &[("other", "Other")];

/// The category options for a (possibly not yet chosen) transaction kind.
pub fn options(kind: Option<TransactionKind>) -> &'static [(&'static str, &'static str)] {
    match kind {
        Some(TransactionKind::Income) => INCOME_CATEGORIES,
        Some(TransactionKind::Expense) => EXPENSE_CATEGORIES,
        None => UNSET_CATEGORIES,
    }
}

/// Display label for a stored category value. Unrecognized values (the
/// field is free-form at the store) fall back to the raw value.
pub fn label(value: &str) -> &str {
    INCOME_CATEGORIES
        .iter()
        .chain(EXPENSE_CATEGORIES)
        .find(|(wire, _)| *wire == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_the_chosen_kind() {
        assert_eq!(options(Some(TransactionKind::Income)).len(), 4);
        assert_eq!(options(Some(TransactionKind::Expense)).len(), 10);
        assert_eq!(options(None), &[("other", "Other")]);
    }

    #[test]
    fn labels_fall_back_to_the_raw_value() {
        assert_eq!(label("groceries"), "Groceries");
        assert_eq!(label("homebrew"), "homebrew");
    }
}
