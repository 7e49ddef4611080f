//! The transaction list controller and its engines.
//!
//! Everything stateful about the Details screen lives here: the canonical
//! transaction set, the active filter, the current page, and the per-row
//! edit sessions. Nothing in this module touches the terminal; the UI only
//! reads the derived views.

mod edit;
mod filter;
mod months;
mod paginate;

pub use edit::{DraftError, EditDraft, EditField, EditSession, parse_positive_amount};
pub use filter::{FilterCriteria, MonthYear, filter};
pub use months::{MonthEntry, UnknownMonth, month_index, resolve_catalog};
pub use paginate::{controls_visible, page_count, paginate};

use std::collections::HashMap;

use api_types::transaction::Transaction;
use chrono_tz::Tz;

use crate::client::{RequestContext, Store};

/// Rows shown per page of the transactions table.
pub const PAGE_SIZE: usize = 10;

/// Result of submitting a row's draft.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft accepted by the store; the canonical set has been reloaded.
    /// The caller should refresh externally owned summary data.
    Saved,
    /// Rejected locally or by the store; the session stays in Editing with
    /// the user's input intact.
    Rejected,
}

/// Owns the canonical transaction set and every piece of list state derived
/// from it.
///
/// The canonical set is replaced wholesale on every load; there is no
/// incremental patching. Filter criteria and the current page survive
/// reloads.
#[derive(Debug)]
pub struct ListController {
    transactions: Vec<Transaction>,
    criteria: FilterCriteria,
    page: usize,
    sessions: HashMap<i64, EditSession>,
    months: Option<Vec<MonthEntry>>,
    tz: Tz,
    /// Monotonic sequence for list loads; responses from requests that are
    /// no longer the newest are discarded instead of clobbering state.
    load_seq: u64,
    pub error: Option<String>,
}

impl ListController {
    pub fn new(tz: Tz) -> Self {
        Self {
            transactions: Vec::new(),
            criteria: FilterCriteria::default(),
            page: 1,
            sessions: HashMap::new(),
            months: None,
            tz,
            load_seq: 0,
            error: None,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// The cached month catalog; empty until [`ensure_months`] succeeds.
    ///
    /// [`ensure_months`]: Self::ensure_months
    pub fn months(&self) -> &[MonthEntry] {
        self.months.as_deref().unwrap_or(&[])
    }

    /// Replaces the canonical set from the store.
    ///
    /// Filter criteria and the current page are deliberately kept; a page
    /// past the new count degrades to an empty page through clipping. On
    /// failure the previous set stays untouched and the error is surfaced
    /// on `self.error`.
    pub async fn load(&mut self, store: &impl Store) {
        self.load_seq = self.load_seq.wrapping_add(1);
        let seq = self.load_seq;

        let res = store.list_all_transactions().await;
        if seq != self.load_seq {
            tracing::debug!(seq, "discarding superseded transaction list response");
            return;
        }

        match res {
            Ok(transactions) => {
                tracing::info!(count = transactions.len(), "transaction list loaded");
                self.transactions = transactions;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("transaction list load failed: {}", err.message());
                self.error = Some(err.message());
            }
        }
    }

    /// Fetches and caches the month catalog. Cached for the session; calls
    /// after the first successful fetch are no-ops.
    pub async fn ensure_months(&mut self, store: &impl Store) {
        if self.months.is_some() {
            return;
        }
        match store.list_months().await {
            Ok(options) => match resolve_catalog(&options) {
                Ok(entries) => self.months = Some(entries),
                Err(err) => self.error = Some(err.to_string()),
            },
            Err(err) => self.error = Some(err.message()),
        }
    }

    /// Replaces the criteria wholesale; unset fields mean "no constraint".
    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Moves to `page` (1-indexed). No bounds check here: the pagination
    /// engine clips, and callers clamp when they care.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn filtered(&self) -> Vec<&Transaction> {
        filter(&self.transactions, &self.criteria, self.tz)
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered().len(), PAGE_SIZE)
    }

    /// The rows visible on the current page of the filtered view.
    pub fn visible_rows(&self) -> Vec<&Transaction> {
        let filtered = self.filtered();
        paginate(&filtered, self.page, PAGE_SIZE).to_vec()
    }

    pub fn is_editing(&self, id: i64) -> bool {
        self.sessions.contains_key(&id)
    }

    pub fn session(&self, id: i64) -> Option<&EditSession> {
        self.sessions.get(&id)
    }

    pub fn session_mut(&mut self, id: i64) -> Option<&mut EditSession> {
        self.sessions.get_mut(&id)
    }

    /// Viewing → Editing: seeds a draft from the canonical row.
    ///
    /// A row already in Editing keeps its current draft; other rows'
    /// sessions are unaffected.
    pub fn begin_edit(&mut self, id: i64) {
        if self.sessions.contains_key(&id) {
            return;
        }
        if let Some(tx) = self.transactions.iter().find(|tx| tx.id == id) {
            self.sessions.insert(id, EditSession::begin(tx));
        }
    }

    /// Editing → Viewing without saving; the draft is discarded and the
    /// canonical transaction is untouched.
    pub fn cancel_edit(&mut self, id: i64) {
        self.sessions.remove(&id);
    }

    /// Replaces one draft field. Ignored unless the row is Editing.
    pub fn update_field(&mut self, id: i64, field: EditField, value: impl Into<String>) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.draft.set(field, value);
        }
    }

    /// Submits a row's draft.
    ///
    /// Empty or unparsable fields reject locally with no network call.
    /// Store failures keep the session (and the user's input) alive. On
    /// success the draft is discarded and the canonical set is reloaded
    /// exactly once; the row shows the stored values only after that reload.
    pub async fn submit(
        &mut self,
        store: &impl Store,
        ctx: &RequestContext,
        id: i64,
    ) -> SubmitOutcome {
        let payload = {
            let Some(session) = self.sessions.get_mut(&id) else {
                return SubmitOutcome::Rejected;
            };
            match session.draft.to_payload() {
                Ok(payload) => {
                    session.error = None;
                    payload
                }
                Err(err) => {
                    session.error = Some(err.to_string());
                    return SubmitOutcome::Rejected;
                }
            }
        };

        match store.edit_transaction(id, &payload, ctx).await {
            Ok(()) => {
                tracing::info!(id, "transaction updated");
                self.sessions.remove(&id);
                self.load(store).await;
                SubmitOutcome::Saved
            }
            Err(err) => {
                tracing::warn!(id, "transaction update failed: {}", err.message());
                if let Some(session) = self.sessions.get_mut(&id) {
                    session.error = Some(err.message());
                }
                SubmitOutcome::Rejected
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use api_types::{
        Amount,
        method::{Method, MethodNew},
        month::MonthOption,
        summary::Summary,
        transaction::{
            RepeatInterval, Transaction, TransactionEdit, TransactionKind, TransactionNew,
        },
    };
    use chrono::NaiveDateTime;

    use super::*;
    use crate::client::ClientError;

    fn tx(id: i64, date: &str, kind: TransactionKind, method_id: i64, cents: i64) -> Transaction {
        Transaction {
            id,
            user_id: 1,
            method_id,
            method_name: format!("card {method_id}"),
            kind,
            category: "food".to_string(),
            amount: Amount::new(cents),
            repeat_interval: RepeatInterval::None,
            date: NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S")
                .expect("test date")
                .and_utc(),
        }
    }

    #[derive(Default)]
    struct FakeStore {
        transactions: RefCell<Vec<Transaction>>,
        months: Vec<MonthOption>,
        list_calls: Cell<usize>,
        edits: RefCell<Vec<(i64, TransactionEdit)>>,
        fail_edit: Cell<bool>,
    }

    impl FakeStore {
        fn with_transactions(transactions: Vec<Transaction>) -> Self {
            Self {
                transactions: RefCell::new(transactions),
                ..Default::default()
            }
        }
    }

    impl Store for FakeStore {
        async fn list_all_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
            self.list_calls.set(self.list_calls.get() + 1);
            Ok(self.transactions.borrow().clone())
        }

        async fn list_months(&self) -> Result<Vec<MonthOption>, ClientError> {
            Ok(self.months.clone())
        }

        async fn list_methods(&self) -> Result<Vec<Method>, ClientError> {
            Ok(Vec::new())
        }

        async fn summary(&self) -> Result<Summary, ClientError> {
            Ok(Summary {
                expense_amount: Amount::ZERO,
                income_amount: Amount::ZERO,
                variable_expense_amount: Amount::ZERO,
                fixed_expense_amount: Amount::ZERO,
                balance: Amount::ZERO,
                payment_method_balances: None,
            })
        }

        async fn edit_transaction(
            &self,
            id: i64,
            payload: &TransactionEdit,
            _ctx: &RequestContext,
        ) -> Result<(), ClientError> {
            if self.fail_edit.get() {
                return Err(ClientError::Server("boom".to_string()));
            }
            self.edits.borrow_mut().push((id, payload.clone()));
            Ok(())
        }

        async fn register_transaction(
            &self,
            _payload: &TransactionNew,
            _ctx: &RequestContext,
        ) -> Result<(), ClientError> {
            Ok(())
        }

        async fn create_method(
            &self,
            _payload: &MethodNew,
            _ctx: &RequestContext,
        ) -> Result<(), ClientError> {
            Ok(())
        }
    }

    fn ctx() -> RequestContext {
        RequestContext {
            csrf_token: "token".to_string(),
        }
    }

    async fn controller_with(store: &FakeStore) -> ListController {
        let mut controller = ListController::new(chrono_tz::UTC);
        controller.load(store).await;
        controller
    }

    #[tokio::test]
    async fn load_replaces_the_canonical_set_wholesale() {
        let store = FakeStore::with_transactions(vec![tx(
            1,
            "2024-03-05 10:00:00",
            TransactionKind::Expense,
            7,
            2000,
        )]);
        let mut controller = controller_with(&store).await;
        assert_eq!(controller.transactions().len(), 1);

        store.transactions.borrow_mut().clear();
        controller.load(&store).await;
        assert!(controller.transactions().is_empty());
        assert!(controller.error.is_none());
    }

    #[tokio::test]
    async fn failed_load_keeps_the_previous_set() {
        struct FailingStore;
        impl Store for FailingStore {
            async fn list_all_transactions(&self) -> Result<Vec<Transaction>, ClientError> {
                Err(ClientError::Server("down".to_string()))
            }
            async fn list_months(&self) -> Result<Vec<MonthOption>, ClientError> {
                Err(ClientError::Server("down".to_string()))
            }
            async fn list_methods(&self) -> Result<Vec<Method>, ClientError> {
                Ok(Vec::new())
            }
            async fn summary(&self) -> Result<Summary, ClientError> {
                Err(ClientError::Server("down".to_string()))
            }
            async fn edit_transaction(
                &self,
                _id: i64,
                _payload: &TransactionEdit,
                _ctx: &RequestContext,
            ) -> Result<(), ClientError> {
                Err(ClientError::Server("down".to_string()))
            }
            async fn register_transaction(
                &self,
                _payload: &TransactionNew,
                _ctx: &RequestContext,
            ) -> Result<(), ClientError> {
                Err(ClientError::Server("down".to_string()))
            }
            async fn create_method(
                &self,
                _payload: &MethodNew,
                _ctx: &RequestContext,
            ) -> Result<(), ClientError> {
                Err(ClientError::Server("down".to_string()))
            }
        }

        let store = FakeStore::with_transactions(vec![tx(
            1,
            "2024-03-05 10:00:00",
            TransactionKind::Expense,
            7,
            2000,
        )]);
        let mut controller = controller_with(&store).await;

        controller.load(&FailingStore).await;
        assert_eq!(controller.transactions().len(), 1);
        assert!(controller.error.is_some());
    }

    #[tokio::test]
    async fn changing_filter_keeps_the_page() {
        let transactions: Vec<Transaction> = (1..=25)
            .map(|id| tx(id, "2024-03-05 10:00:00", TransactionKind::Expense, 7, 100))
            .collect();
        let store = FakeStore::with_transactions(transactions);
        let mut controller = controller_with(&store).await;

        controller.set_page(3);
        assert_eq!(controller.visible_rows().len(), 5);

        // Filtering down to nothing leaves the page at 3; the engine clips
        // to an empty page rather than erroring.
        controller.set_filter(FilterCriteria {
            kind: Some(TransactionKind::Income),
            ..Default::default()
        });
        assert_eq!(controller.page(), 3);
        assert!(controller.visible_rows().is_empty());
        assert_eq!(controller.page_count(), 0);
    }

    #[tokio::test]
    async fn begin_then_cancel_leaves_the_row_untouched() {
        let store = FakeStore::with_transactions(vec![tx(
            9,
            "2024-03-05 10:00:00",
            TransactionKind::Expense,
            1,
            1200,
        )]);
        let mut controller = controller_with(&store).await;
        let before = controller.transactions().to_vec();

        controller.begin_edit(9);
        assert!(controller.is_editing(9));
        controller.update_field(9, EditField::Amount, "999");
        controller.cancel_edit(9);

        assert!(!controller.is_editing(9));
        assert_eq!(controller.transactions(), before.as_slice());
        assert!(store.edits.borrow().is_empty());
    }

    #[tokio::test]
    async fn empty_draft_field_rejects_without_a_network_call() {
        let store = FakeStore::with_transactions(vec![tx(
            9,
            "2024-03-05 10:00:00",
            TransactionKind::Expense,
            1,
            1200,
        )]);
        let mut controller = controller_with(&store).await;
        let loads_before = store.list_calls.get();

        controller.begin_edit(9);
        controller.update_field(9, EditField::Category, "");
        let outcome = controller.submit(&store, &ctx(), 9).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert!(controller.is_editing(9));
        assert!(store.edits.borrow().is_empty());
        assert_eq!(store.list_calls.get(), loads_before);
        let session = controller.session(9).expect("still editing");
        assert_eq!(session.error.as_deref(), Some("Form must have content"));
    }

    #[tokio::test]
    async fn successful_submit_posts_once_and_reloads_once() {
        let store = FakeStore::with_transactions(vec![tx(
            9,
            "2024-03-05 10:00:00",
            TransactionKind::Expense,
            1,
            1200,
        )]);
        let mut controller = controller_with(&store).await;
        let loads_before = store.list_calls.get();

        controller.begin_edit(9);
        controller.update_field(9, EditField::Amount, "15");
        let outcome = controller.submit(&store, &ctx(), 9).await;

        assert_eq!(outcome, SubmitOutcome::Saved);
        assert!(!controller.is_editing(9));
        assert_eq!(store.list_calls.get(), loads_before + 1);

        let edits = store.edits.borrow();
        assert_eq!(edits.len(), 1);
        let (id, payload) = &edits[0];
        assert_eq!(*id, 9);
        assert_eq!(payload.amount.cents(), 1500);
        // Untouched fields carry the original values.
        assert_eq!(payload.method_id, 1);
        assert_eq!(payload.kind, TransactionKind::Expense);
        assert_eq!(payload.category, "food");
        assert_eq!(payload.repeat_interval, RepeatInterval::None);
    }

    #[tokio::test]
    async fn store_failure_preserves_the_draft() {
        let store = FakeStore::with_transactions(vec![tx(
            9,
            "2024-03-05 10:00:00",
            TransactionKind::Expense,
            1,
            1200,
        )]);
        store.fail_edit.set(true);
        let mut controller = controller_with(&store).await;

        controller.begin_edit(9);
        controller.update_field(9, EditField::Amount, "15");
        let outcome = controller.submit(&store, &ctx(), 9).await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        let session = controller.session(9).expect("still editing");
        assert_eq!(session.draft.amount, "15");
        assert!(session.error.as_deref().unwrap_or("").contains("boom"));
    }

    #[tokio::test]
    async fn edit_sessions_are_independent_across_rows() {
        let store = FakeStore::with_transactions(vec![
            tx(1, "2024-03-05 10:00:00", TransactionKind::Expense, 1, 1000),
            tx(2, "2024-03-06 10:00:00", TransactionKind::Income, 2, 2000),
        ]);
        let mut controller = controller_with(&store).await;

        controller.begin_edit(1);
        controller.begin_edit(2);
        controller.update_field(1, EditField::Amount, "42");

        assert!(controller.is_editing(1));
        assert!(controller.is_editing(2));
        assert_eq!(controller.session(1).expect("row 1").draft.amount, "42");
        assert_eq!(controller.session(2).expect("row 2").draft.amount, "20.00");
    }

    #[tokio::test]
    async fn month_catalog_is_fetched_once_and_cached() {
        let mut store = FakeStore::with_transactions(Vec::new());
        store.months = vec![MonthOption {
            month: "March".to_string(),
            year: 2024,
        }];
        let mut controller = ListController::new(chrono_tz::UTC);

        controller.ensure_months(&store).await;
        assert_eq!(controller.months().len(), 1);
        assert_eq!(
            controller.months()[0].month,
            MonthYear { month: 3, year: 2024 }
        );

        // A second call keeps the cache even if the store changes.
        store.months.clear();
        controller.ensure_months(&store).await;
        assert_eq!(controller.months().len(), 1);
    }

    #[tokio::test]
    async fn bad_month_labels_surface_an_error() {
        let mut store = FakeStore::with_transactions(Vec::new());
        store.months = vec![MonthOption {
            month: "Smarch".to_string(),
            year: 2024,
        }];
        let mut controller = ListController::new(chrono_tz::UTC);

        controller.ensure_months(&store).await;
        assert!(controller.months().is_empty());
        assert!(
            controller
                .error
                .as_deref()
                .unwrap_or("")
                .contains("Smarch")
        );
    }
}
