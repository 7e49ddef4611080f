use api_types::transaction::{Transaction, TransactionKind};
use chrono::Datelike;
use chrono_tz::Tz;

/// A calendar month in a specific year. `month` is 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthYear {
    pub month: u32,
    pub year: i32,
}

/// Active constraints on the transaction list.
///
/// A `None` field means no constraint on that field; present fields apply
/// conjunctively.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub month: Option<MonthYear>,
    pub kind: Option<TransactionKind>,
    pub method_id: Option<i64>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.kind.is_none() && self.method_id.is_none()
    }
}

/// Applies `criteria` to `transactions`, preserving input order.
///
/// The month constraint compares the transaction's creation timestamp in the
/// given timezone, so a late-night UTC transaction lands in the month the
/// user saw it happen.
pub fn filter<'a>(
    transactions: &'a [Transaction],
    criteria: &FilterCriteria,
    tz: Tz,
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|tx| matches(tx, criteria, tz))
        .collect()
}

fn matches(tx: &Transaction, criteria: &FilterCriteria, tz: Tz) -> bool {
    if let Some(MonthYear { month, year }) = criteria.month {
        let local = tx.date.with_timezone(&tz);
        if local.month() != month || local.year() != year {
            return false;
        }
    }
    if let Some(kind) = criteria.kind {
        if tx.kind != kind {
            return false;
        }
    }
    if let Some(method_id) = criteria.method_id {
        if tx.method_id != method_id {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use api_types::transaction::RepeatInterval;
    use chrono::NaiveDateTime;

    use super::*;

    fn tx(id: i64, date: &str, kind: TransactionKind, method_id: i64, cents: i64) -> Transaction {
        Transaction {
            id,
            user_id: 1,
            method_id,
            method_name: format!("card {method_id}"),
            kind,
            category: "other".to_string(),
            amount: api_types::Amount::new(cents),
            repeat_interval: RepeatInterval::None,
            date: NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S")
                .expect("test date")
                .and_utc(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx(1, "2024-03-05 10:00:00", TransactionKind::Expense, 7, 2000),
            tx(2, "2024-04-01 09:00:00", TransactionKind::Income, 3, 50000),
            tx(3, "2024-03-20 18:30:00", TransactionKind::Income, 7, 10000),
        ]
    }

    fn ids(rows: &[&Transaction]) -> Vec<i64> {
        rows.iter().map(|tx| tx.id).collect()
    }

    #[test]
    fn empty_criteria_is_identity() {
        let transactions = sample();
        let rows = filter(&transactions, &FilterCriteria::default(), chrono_tz::UTC);
        assert_eq!(ids(&rows), vec![1, 2, 3]);
    }

    #[test]
    fn month_filter_matches_calendar_month_and_year() {
        let transactions = sample();
        let criteria = FilterCriteria {
            month: Some(MonthYear { month: 3, year: 2024 }),
            ..Default::default()
        };
        let rows = filter(&transactions, &criteria, chrono_tz::UTC);
        assert_eq!(ids(&rows), vec![1, 3]);
    }

    #[test]
    fn march_filter_returns_only_march_rows() {
        let transactions = vec![
            tx(1, "2024-03-05 00:00:00", TransactionKind::Expense, 7, 2000),
            tx(2, "2024-04-01 00:00:00", TransactionKind::Income, 3, 50000),
        ];
        let criteria = FilterCriteria {
            month: Some(MonthYear { month: 3, year: 2024 }),
            ..Default::default()
        };
        let rows = filter(&transactions, &criteria, chrono_tz::UTC);
        assert_eq!(ids(&rows), vec![1]);
    }

    #[test]
    fn criteria_apply_conjunctively() {
        let transactions = sample();
        let both = FilterCriteria {
            month: Some(MonthYear { month: 3, year: 2024 }),
            kind: Some(TransactionKind::Income),
            ..Default::default()
        };
        let combined = filter(&transactions, &both, chrono_tz::UTC);

        // Equals the intersection of filtering by each field independently.
        let by_month = filter(
            &transactions,
            &FilterCriteria {
                month: both.month,
                ..Default::default()
            },
            chrono_tz::UTC,
        );
        let by_kind = filter(
            &transactions,
            &FilterCriteria {
                kind: both.kind,
                ..Default::default()
            },
            chrono_tz::UTC,
        );
        let intersection: Vec<i64> = by_month
            .iter()
            .map(|tx| tx.id)
            .filter(|id| by_kind.iter().any(|tx| tx.id == *id))
            .collect();

        assert_eq!(ids(&combined), intersection);
        assert_eq!(ids(&combined), vec![3]);
    }

    #[test]
    fn method_filter_compares_identifiers() {
        let transactions = sample();
        let criteria = FilterCriteria {
            method_id: Some(7),
            ..Default::default()
        };
        let rows = filter(&transactions, &criteria, chrono_tz::UTC);
        assert_eq!(ids(&rows), vec![1, 3]);
    }

    #[test]
    fn month_boundary_respects_timezone() {
        // 2024-04-01T02:00 UTC is still March 31st in New York.
        let transactions = vec![tx(
            1,
            "2024-04-01 02:00:00",
            TransactionKind::Expense,
            1,
            500,
        )];
        let march = FilterCriteria {
            month: Some(MonthYear { month: 3, year: 2024 }),
            ..Default::default()
        };

        let ny: Tz = "America/New_York".parse().expect("tz");
        assert_eq!(filter(&transactions, &march, ny).len(), 1);
        assert!(filter(&transactions, &march, chrono_tz::UTC).is_empty());
    }
}
