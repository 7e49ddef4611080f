use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyEvent};

use api_types::{method::Method, summary::Summary, transaction::TransactionKind};

use crate::{
    categories,
    client::{Client, RequestContext},
    config::AppConfig,
    controller::{EditField, FilterCriteria, ListController, MonthYear, SubmitOutcome},
    error::{AppError, Result},
    ui,
    ui::keymap::AppAction,
};

pub mod forms;

use forms::{FormMessage, MethodField, MethodForm, TransactionField, TransactionForm};

const KIND_VALUES: [&str; 2] = ["income", "expense"];
const REPEAT_VALUES: [&str; 4] = ["none", "weekly", "monthly", "yearly"];
const METHOD_TYPE_VALUES: [&str; 2] = ["credit", "debit"];
const PROCESSOR_VALUES: [&str; 4] = ["mastercard", "visa", "discovery", "am"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Details,
    AddTransaction,
    AddMethod,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::Details => "Details",
            Self::AddTransaction => "Add Transaction",
            Self::AddMethod => "Add Method",
        }
    }
}

#[derive(Debug, Default)]
pub struct SummaryState {
    pub data: Option<Summary>,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct DetailsState {
    /// Cursor within the visible page.
    pub selected: usize,
}

pub struct AppState {
    pub section: Section,
    pub summary: SummaryState,
    pub methods: Vec<Method>,
    pub list: ListController,
    pub details: DetailsState,
    pub transaction_form: TransactionForm,
    pub method_form: MethodForm,
    pub status: Option<String>,
    pub last_refresh: Option<DateTime<Local>>,
    pub base_url: String,
}

pub struct App {
    client: Client,
    ctx: RequestContext,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let tz = config.tz()?;
        let ctx = RequestContext {
            csrf_token: config.csrf_token.clone(),
        };
        let state = AppState {
            section: Section::Summary,
            summary: SummaryState::default(),
            methods: Vec::new(),
            list: ListController::new(tz),
            details: DetailsState::default(),
            transaction_form: TransactionForm::default(),
            method_form: MethodForm::default(),
            status: None,
            last_refresh: None,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            client,
            ctx,
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        self.refresh_all().await;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        match ui::keymap::map_key(key) {
            AppAction::Quit => self.should_quit = true,
            AppAction::Cancel => self.handle_cancel(),
            AppAction::NextField => self.handle_next_field(),
            AppAction::Submit => self.handle_submit().await?,
            AppAction::Backspace => self.handle_backspace(),
            AppAction::Up => self.handle_vertical(false),
            AppAction::Down => self.handle_vertical(true),
            AppAction::Input(ch) => self.handle_char(ch).await?,
            AppAction::None => {}
        }

        Ok(())
    }

    async fn handle_char(&mut self, ch: char) -> Result<()> {
        // Typed input wins over commands whenever a text field has focus.
        if self.try_type_char(ch) {
            return Ok(());
        }

        match ch {
            'q' | 'Q' => self.should_quit = true,
            's' | 'S' => self.state.section = Section::Summary,
            'd' | 'D' => self.state.section = Section::Details,
            't' | 'T' => self.state.section = Section::AddTransaction,
            'm' | 'M' => self.state.section = Section::AddMethod,
            'r' | 'R' => self.refresh_section().await,
            ' ' => {
                if self.state.section == Section::AddTransaction
                    && self.state.transaction_form.focus == TransactionField::Repeating
                {
                    self.state.transaction_form.repeating = !self.state.transaction_form.repeating;
                }
            }
            _ => {
                if self.state.section == Section::Details {
                    self.handle_details_char(ch);
                }
            }
        }

        Ok(())
    }

    fn handle_details_char(&mut self, ch: char) {
        match ch {
            'j' | 'J' => self.select_next(),
            'k' | 'K' => self.select_prev(),
            'n' | 'N' => self.next_page(),
            'p' | 'P' => self.prev_page(),
            'f' | 'F' => self.cycle_month_filter(),
            'i' | 'I' => self.cycle_kind_filter(),
            'o' | 'O' => self.cycle_method_filter(),
            'c' | 'C' => self.clear_filters(),
            'e' | 'E' => {
                if let Some(id) = self.selected_row_id() {
                    self.state.list.begin_edit(id);
                }
            }
            _ => {}
        }
    }

    fn try_type_char(&mut self, ch: char) -> bool {
        match self.state.section {
            Section::Details => {
                let Some(id) = self.selected_row_id() else {
                    return false;
                };
                let Some(session) = self.state.list.session_mut(id) else {
                    return false;
                };
                if session.focus.is_text() && is_amount_char(ch) {
                    session.draft.field_mut(session.focus).push(ch);
                    return true;
                }
                false
            }
            Section::AddTransaction => {
                let form = &mut self.state.transaction_form;
                if form.focus.is_text() && is_amount_char(ch) {
                    form.amount.push(ch);
                    return true;
                }
                false
            }
            Section::AddMethod => {
                let form = &mut self.state.method_form;
                if form.focus.is_text() && !ch.is_control() {
                    form.name.push(ch);
                    return true;
                }
                false
            }
            Section::Summary => false,
        }
    }

    fn handle_backspace(&mut self) {
        match self.state.section {
            Section::Details => {
                if let Some(id) = self.selected_row_id() {
                    if let Some(session) = self.state.list.session_mut(id) {
                        if session.focus.is_text() {
                            session.draft.field_mut(session.focus).pop();
                        }
                    }
                }
            }
            Section::AddTransaction => {
                let form = &mut self.state.transaction_form;
                if form.focus.is_text() {
                    form.amount.pop();
                }
            }
            Section::AddMethod => {
                let form = &mut self.state.method_form;
                if form.focus.is_text() {
                    form.name.pop();
                }
            }
            Section::Summary => {}
        }
    }

    fn handle_next_field(&mut self) {
        match self.state.section {
            Section::Details => {
                if let Some(id) = self.selected_row_id() {
                    if let Some(session) = self.state.list.session_mut(id) {
                        session.focus_next();
                    }
                }
            }
            Section::AddTransaction => {
                let repeating = self.state.transaction_form.repeating;
                let form = &mut self.state.transaction_form;
                form.focus = form.focus.next(repeating);
            }
            Section::AddMethod => {
                let form = &mut self.state.method_form;
                form.focus = form.focus.next();
            }
            Section::Summary => {}
        }
    }

    fn handle_cancel(&mut self) {
        match self.state.section {
            Section::Details => {
                if let Some(id) = self.selected_row_id() {
                    self.state.list.cancel_edit(id);
                }
            }
            Section::AddTransaction => self.state.transaction_form.message = None,
            Section::AddMethod => self.state.method_form.message = None,
            Section::Summary => {}
        }
        self.state.status = None;
    }

    async fn handle_submit(&mut self) -> Result<()> {
        match self.state.section {
            Section::Details => self.submit_selected_row().await,
            Section::AddTransaction => self.submit_transaction_form().await,
            Section::AddMethod => self.submit_method_form().await,
            Section::Summary => {}
        }
        Ok(())
    }

    fn handle_vertical(&mut self, forward: bool) {
        match self.state.section {
            Section::Details => {
                if self.selected_row_editing() {
                    self.cycle_edit_option(forward);
                } else if forward {
                    self.select_next();
                } else {
                    self.select_prev();
                }
            }
            Section::AddTransaction => self.cycle_transaction_form_option(forward),
            Section::AddMethod => self.cycle_method_form_option(forward),
            Section::Summary => {}
        }
    }

    fn selected_row_id(&self) -> Option<i64> {
        self.state
            .list
            .visible_rows()
            .get(self.state.details.selected)
            .map(|tx| tx.id)
    }

    fn selected_row_editing(&self) -> bool {
        self.selected_row_id()
            .map(|id| self.state.list.is_editing(id))
            .unwrap_or(false)
    }

    fn select_next(&mut self) {
        let len = self.state.list.visible_rows().len();
        if len == 0 {
            return;
        }
        self.state.details.selected = (self.state.details.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.state.details.selected = self.state.details.selected.saturating_sub(1);
    }

    fn next_page(&mut self) {
        let pages = self.state.list.page_count();
        let page = self.state.list.page();
        if page < pages {
            self.state.list.set_page(page + 1);
            self.state.details.selected = 0;
        }
    }

    fn prev_page(&mut self) {
        let page = self.state.list.page();
        if page > 1 {
            self.state.list.set_page(page - 1);
            self.state.details.selected = 0;
        }
    }

    /// Advances the month filter: All time → each catalog entry → All time.
    fn cycle_month_filter(&mut self) {
        let months: Vec<MonthYear> = self
            .state
            .list
            .months()
            .iter()
            .map(|entry| entry.month)
            .collect();
        if months.is_empty() {
            self.state.status = Some("No months available yet.".to_string());
            return;
        }

        let current = self.state.list.criteria().month;
        let next = match current.and_then(|m| months.iter().position(|&entry| entry == m)) {
            None => Some(months[0]),
            Some(idx) if idx + 1 < months.len() => Some(months[idx + 1]),
            Some(_) => None,
        };

        let mut criteria = self.state.list.criteria().clone();
        criteria.month = next;
        self.state.list.set_filter(criteria);
        self.state.details.selected = 0;
    }

    fn cycle_kind_filter(&mut self) {
        let mut criteria = self.state.list.criteria().clone();
        criteria.kind = match criteria.kind {
            None => Some(TransactionKind::Income),
            Some(TransactionKind::Income) => Some(TransactionKind::Expense),
            Some(TransactionKind::Expense) => None,
        };
        self.state.list.set_filter(criteria);
        self.state.details.selected = 0;
    }

    fn cycle_method_filter(&mut self) {
        if self.state.methods.is_empty() {
            self.state.status = Some("No payment methods yet.".to_string());
            return;
        }

        let mut criteria = self.state.list.criteria().clone();
        criteria.method_id = match criteria.method_id {
            None => Some(self.state.methods[0].id),
            Some(current) => {
                let idx = self.state.methods.iter().position(|m| m.id == current);
                match idx {
                    Some(idx) if idx + 1 < self.state.methods.len() => {
                        Some(self.state.methods[idx + 1].id)
                    }
                    _ => None,
                }
            }
        };
        self.state.list.set_filter(criteria);
        self.state.details.selected = 0;
    }

    fn clear_filters(&mut self) {
        self.state.list.set_filter(FilterCriteria::default());
        self.state.details.selected = 0;
    }

    fn cycle_edit_option(&mut self, forward: bool) {
        let Some(id) = self.selected_row_id() else {
            return;
        };
        let method_ids: Vec<String> = self
            .state
            .methods
            .iter()
            .map(|m| m.id.to_string())
            .collect();
        let Some(session) = self.state.list.session_mut(id) else {
            return;
        };

        match session.focus {
            EditField::Method => {
                let refs: Vec<&str> = method_ids.iter().map(String::as_str).collect();
                session.draft.method_id = next_value(&refs, &session.draft.method_id, forward);
            }
            EditField::Kind => {
                session.draft.kind = next_value(&KIND_VALUES, &session.draft.kind, forward);
            }
            EditField::Category => {
                let kind = TransactionKind::parse(session.draft.kind.trim());
                let values: Vec<&str> = categories::options(kind).iter().map(|(v, _)| *v).collect();
                session.draft.category = next_value(&values, &session.draft.category, forward);
            }
            EditField::Repeat => {
                session.draft.repeat_interval =
                    next_value(&REPEAT_VALUES, &session.draft.repeat_interval, forward);
            }
            EditField::Amount => {}
        }
    }

    fn cycle_transaction_form_option(&mut self, forward: bool) {
        let method_ids: Vec<String> = self
            .state
            .methods
            .iter()
            .map(|m| m.id.to_string())
            .collect();
        let form = &mut self.state.transaction_form;

        match form.focus {
            TransactionField::Kind => {
                form.kind = next_value(&KIND_VALUES, &form.kind, forward);
            }
            TransactionField::Category => {
                let kind = form.chosen_kind();
                let values: Vec<&str> = categories::options(kind).iter().map(|(v, _)| *v).collect();
                form.category = next_value(&values, &form.category, forward);
            }
            TransactionField::Method => {
                let refs: Vec<&str> = method_ids.iter().map(String::as_str).collect();
                form.payment_method = next_value(&refs, &form.payment_method, forward);
            }
            TransactionField::Repeating => form.repeating = !form.repeating,
            TransactionField::Repetition => {
                form.repetition = next_value(&REPEAT_VALUES, &form.repetition, forward);
            }
            TransactionField::Amount => {}
        }
    }

    fn cycle_method_form_option(&mut self, forward: bool) {
        let form = &mut self.state.method_form;
        match form.focus {
            MethodField::Kind => {
                form.kind = next_value(&METHOD_TYPE_VALUES, &form.kind, forward);
            }
            MethodField::Processor => {
                form.processor = next_value(&PROCESSOR_VALUES, &form.processor, forward);
            }
            MethodField::Name => {}
        }
    }

    async fn submit_selected_row(&mut self) {
        let Some(id) = self.selected_row_id() else {
            return;
        };
        if !self.state.list.is_editing(id) {
            self.state.list.begin_edit(id);
            return;
        }

        let outcome = self.state.list.submit(&self.client, &self.ctx, id).await;
        if outcome == SubmitOutcome::Saved {
            // The list already reloaded itself; the summary is owned by the
            // summary screen and refreshed here.
            self.refresh_summary().await;
            self.state.last_refresh = Some(Local::now());
        }
    }

    async fn submit_transaction_form(&mut self) {
        match self.state.transaction_form.payload() {
            Ok(payload) => match self.client.register_transaction(&payload, &self.ctx).await {
                Ok(()) => {
                    tracing::info!("transaction registered");
                    self.state.transaction_form.clear();
                    self.state.transaction_form.message =
                        Some(FormMessage::Info("Transaction saved.".to_string()));
                    self.state.list.load(&self.client).await;
                    self.refresh_summary().await;
                    self.state.last_refresh = Some(Local::now());
                }
                Err(err) => {
                    self.state.transaction_form.message =
                        Some(FormMessage::Error(err.message()));
                }
            },
            Err(err) => {
                self.state.transaction_form.message =
                    Some(FormMessage::Error(err.to_string()));
            }
        }
    }

    async fn submit_method_form(&mut self) {
        match self.state.method_form.payload() {
            Ok(payload) => match self.client.create_method(&payload, &self.ctx).await {
                Ok(()) => {
                    tracing::info!(name = %payload.name, "payment method created");
                    self.state.method_form.clear();
                    self.state.method_form.message =
                        Some(FormMessage::Info("Payment method saved.".to_string()));
                    self.refresh_methods().await;
                }
                Err(err) => {
                    self.state.method_form.message = Some(FormMessage::Error(err.message()));
                }
            },
            Err(err) => {
                self.state.method_form.message = Some(FormMessage::Error(err.to_string()));
            }
        }
    }

    async fn refresh_section(&mut self) {
        match self.state.section {
            Section::Summary => self.refresh_summary().await,
            Section::Details => {
                self.state.list.load(&self.client).await;
                self.state.list.ensure_months(&self.client).await;
            }
            Section::AddTransaction | Section::AddMethod => self.refresh_methods().await,
        }
        self.state.last_refresh = Some(Local::now());
    }

    async fn refresh_all(&mut self) {
        self.refresh_summary().await;
        self.refresh_methods().await;
        self.state.list.load(&self.client).await;
        self.state.list.ensure_months(&self.client).await;
        self.state.last_refresh = Some(Local::now());
    }

    async fn refresh_summary(&mut self) {
        match self.client.summary().await {
            Ok(summary) => {
                self.state.summary.data = Some(summary);
                self.state.summary.error = None;
            }
            Err(err) => {
                tracing::warn!("summary refresh failed: {}", err.message());
                self.state.summary.error = Some(err.message());
            }
        }
    }

    async fn refresh_methods(&mut self) {
        match self.client.list_methods().await {
            Ok(methods) => self.state.methods = methods,
            Err(err) => {
                tracing::warn!("method list refresh failed: {}", err.message());
                self.state.status = Some(err.message());
            }
        }
    }
}

fn is_amount_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.' || ch == ','
}

/// Steps through `values` from `current`; unknown current values land on the
/// first option.
fn next_value(values: &[&str], current: &str, forward: bool) -> String {
    if values.is_empty() {
        return current.to_string();
    }
    let next = match (values.iter().position(|v| *v == current), forward) {
        (None, _) => 0,
        (Some(idx), true) => (idx + 1) % values.len(),
        (Some(idx), false) => (idx + values.len() - 1) % values.len(),
    };
    values[next].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_value_cycles_in_both_directions() {
        assert_eq!(next_value(&KIND_VALUES, "income", true), "expense");
        assert_eq!(next_value(&KIND_VALUES, "expense", true), "income");
        assert_eq!(next_value(&KIND_VALUES, "income", false), "expense");
        assert_eq!(next_value(&KIND_VALUES, "", true), "income");
        assert_eq!(next_value(&[], "anything", true), "anything");
    }
}
