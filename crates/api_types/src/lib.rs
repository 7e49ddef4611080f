use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

mod amount;
pub mod timestamp;

pub use amount::{Amount, ParseAmountError};

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    impl TransactionKind {
        /// Returns the canonical kind string used on the wire.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Income => "Income",
                Self::Expense => "Expense",
            }
        }

        /// Parses the wire form back into the enum.
        pub fn parse(s: &str) -> Option<Self> {
            match s {
                "income" => Some(Self::Income),
                "expense" => Some(Self::Expense),
                _ => None,
            }
        }
    }

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum RepeatInterval {
        #[default]
        None,
        Weekly,
        Monthly,
        Yearly,
    }

    impl RepeatInterval {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::None => "none",
                Self::Weekly => "weekly",
                Self::Monthly => "monthly",
                Self::Yearly => "yearly",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::None => "One time",
                Self::Weekly => "Weekly",
                Self::Monthly => "Monthly",
                Self::Yearly => "Yearly",
            }
        }

        pub fn parse(s: &str) -> Option<Self> {
            match s {
                "none" => Some(Self::None),
                "weekly" => Some(Self::Weekly),
                "monthly" => Some(Self::Monthly),
                "yearly" => Some(Self::Yearly),
                _ => None,
            }
        }
    }

    /// A recorded income or expense event.
    ///
    /// `amount` is always a non-negative magnitude; the direction is carried
    /// by `kind`, never by the amount's sign.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Transaction {
        pub id: i64,
        #[serde(rename = "userID")]
        pub user_id: i64,
        #[serde(rename = "methodID")]
        pub method_id: i64,
        /// Display name of the payment method, denormalized by the store.
        #[serde(rename = "methodName", default)]
        pub method_name: String,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category: String,
        pub amount: Amount,
        #[serde(default)]
        pub repeat_interval: RepeatInterval,
        /// Creation timestamp; epoch milliseconds or an ISO-8601 string on
        /// the wire depending on the store version.
        #[serde(with = "crate::timestamp")]
        pub date: DateTime<Utc>,
    }

    /// Body of `POST /edit_transaction/{id}`: the five editable fields.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionEdit {
        #[serde(rename = "methodID")]
        pub method_id: i64,
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub repeat_interval: RepeatInterval,
        pub category: String,
        pub amount: Amount,
    }

    /// Body of `POST /register_transaction`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct TransactionNew {
        #[serde(rename = "type")]
        pub kind: TransactionKind,
        pub category: String,
        #[serde(rename = "paymentMethod")]
        pub payment_method: i64,
        pub amount: Amount,
        pub repetition: RepeatInterval,
    }
}

pub mod method {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum MethodType {
        Credit,
        Debit,
    }

    impl MethodType {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Credit => "credit",
                Self::Debit => "debit",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Credit => "Credit",
                Self::Debit => "Debit",
            }
        }

        pub fn parse(s: &str) -> Option<Self> {
            match s {
                "credit" => Some(Self::Credit),
                "debit" => Some(Self::Debit),
                _ => None,
            }
        }
    }

    /// Card network behind a payment method.
    ///
    /// American Express is serialized as `am` by the store.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum MethodProcessor {
        Mastercard,
        Visa,
        Discovery,
        #[serde(rename = "am")]
        AmericanExpress,
    }

    impl MethodProcessor {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Mastercard => "mastercard",
                Self::Visa => "visa",
                Self::Discovery => "discovery",
                Self::AmericanExpress => "am",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Mastercard => "Mastercard",
                Self::Visa => "Visa",
                Self::Discovery => "Discovery",
                Self::AmericanExpress => "American Express",
            }
        }

        pub fn parse(s: &str) -> Option<Self> {
            match s {
                "mastercard" => Some(Self::Mastercard),
                "visa" => Some(Self::Visa),
                "discovery" => Some(Self::Discovery),
                "am" => Some(Self::AmericanExpress),
                _ => None,
            }
        }
    }

    /// A payment method. Immutable once created.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Method {
        pub id: i64,
        pub name: String,
        #[serde(rename = "type")]
        pub kind: MethodType,
        pub processor: MethodProcessor,
    }

    /// Body of `POST /method`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MethodNew {
        #[serde(rename = "methodName")]
        pub name: String,
        #[serde(rename = "methodType")]
        pub kind: MethodType,
        #[serde(rename = "methodProcessor")]
        pub processor: MethodProcessor,
    }
}

pub mod month {
    use super::*;

    /// One distinct (month, year) present in the store, from `/list_months`.
    ///
    /// `month` is an English month name; clients must map it to an index
    /// through an explicit lookup, never by date parsing.
    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct MonthOption {
        pub month: String,
        pub year: i32,
    }
}

pub mod summary {
    use super::*;

    /// Server-side aggregates from `GET /summary`.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Summary {
        pub expense_amount: Amount,
        pub income_amount: Amount,
        pub variable_expense_amount: Amount,
        pub fixed_expense_amount: Amount,
        pub balance: Amount,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub payment_method_balances: Option<Vec<MethodBalance>>,
    }

    /// Lifetime balance of a single payment method.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct MethodBalance {
        #[serde(rename = "methodID")]
        pub method_id: i64,
        pub name: String,
        pub balance: Amount,
    }
}
