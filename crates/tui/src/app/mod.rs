mod date_picker;

use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use crossterm::event::{self, Event, KeyEvent};
use engine::{Currency, Ledger, PageSize, SortKey, Transaction};
use tokio::sync::mpsc;

use crate::{
    client::{Client, ClientError, error_message},
    config::AppConfig,
    error::{AppError, Result},
    ui::{self, keymap::AppAction},
};

pub use date_picker::{DatePickerState, PickerField};

pub type FetchOutcome = std::result::Result<Vec<Transaction>, ClientError>;

/// What the event loop has to do after a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    None,
    Fetch,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

impl FetchStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading…",
            Self::Loaded => "OK",
            Self::Failed => "ERR",
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub ledger: Ledger,
    /// Set exactly when the last fetch failed and the user has not dismissed it.
    pub show_error: bool,
    pub date_picker: DatePickerState,
    pub fetch: FetchStatus,
    pub last_refresh: Option<DateTime<Utc>>,
    /// Highlighted row within the current page window.
    pub selected: usize,
    pub source: String,
    pub timezone: Tz,
    pub currency: Currency,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        source: impl Into<String>,
        timezone: Tz,
        page_size: PageSize,
    ) -> Self {
        Self {
            ledger: Ledger::new(page_size),
            show_error: false,
            date_picker: DatePickerState::default(),
            fetch: FetchStatus::Idle,
            last_refresh: None,
            selected: 0,
            source: source.into(),
            timezone,
            currency: config.currency,
        }
    }

    pub fn handle_action(&mut self, action: AppAction) -> Command {
        if action == AppAction::Quit {
            return Command::Quit;
        }
        if self.show_error {
            self.handle_error_overlay(action);
            return Command::None;
        }
        if self.date_picker.open {
            self.handle_date_picker(action);
            return Command::None;
        }
        self.handle_table(action)
    }

    fn handle_error_overlay(&mut self, action: AppAction) {
        // Dismissing does not retry; the ledger stays empty.
        if matches!(action, AppAction::Submit | AppAction::Cancel) {
            self.show_error = false;
        }
    }

    fn handle_date_picker(&mut self, action: AppAction) {
        match action {
            AppAction::Cancel | AppAction::Input('/') => self.date_picker.close(),
            AppAction::NextField => self.date_picker.next_field(),
            AppAction::Backspace => self.date_picker.backspace(),
            AppAction::Input(ch) => self.date_picker.push(ch),
            AppAction::Submit => match self.date_picker.range(self.timezone) {
                Ok(range) => {
                    tracing::info!(range = %range.label(self.timezone), "date range applied");
                    self.ledger.set_range(Some(range));
                    self.selected = 0;
                    self.date_picker.close();
                }
                Err(message) => self.date_picker.message = Some(message),
            },
            _ => {}
        }
    }

    fn handle_table(&mut self, action: AppAction) -> Command {
        match action {
            AppAction::Input('r' | 'R') => return Command::Fetch,
            AppAction::Input('d' | 'D') => {
                self.ledger.toggle_sort(SortKey::Date);
                self.selected = 0;
            }
            AppAction::Input('a' | 'A') => {
                self.ledger.toggle_sort(SortKey::Amount);
                self.selected = 0;
            }
            AppAction::Input('n' | 'N') | AppAction::Right => {
                if self.ledger.next_page() {
                    self.selected = 0;
                }
            }
            AppAction::Input('p' | 'P') | AppAction::Left => {
                if self.ledger.prev_page() {
                    self.selected = 0;
                }
            }
            AppAction::Input('s' | 'S') => {
                self.ledger.cycle_page_size();
                self.selected = 0;
            }
            AppAction::Input('/') => {
                self.date_picker.open(self.ledger.range(), self.timezone);
            }
            AppAction::Input('c' | 'C') => {
                if self.ledger.range().is_some() {
                    self.ledger.set_range(None);
                    self.selected = 0;
                }
            }
            AppAction::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            AppAction::Down => {
                let rows = self.ledger.view().rows.len();
                if rows > 0 {
                    self.selected = (self.selected + 1).min(rows - 1);
                }
            }
            _ => {}
        }
        Command::None
    }

    /// Marks a fetch as outstanding. Returns `false` if one already is.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch == FetchStatus::Loading {
            return false;
        }
        self.fetch = FetchStatus::Loading;
        true
    }

    pub fn finish_fetch(&mut self, outcome: FetchOutcome, at: DateTime<Utc>) {
        self.last_refresh = Some(at);
        self.selected = 0;
        match outcome {
            Ok(transactions) => {
                tracing::info!(count = transactions.len(), "transactions fetched");
                self.ledger.replace(transactions);
                self.fetch = FetchStatus::Loaded;
                self.show_error = false;
            }
            Err(err) => {
                tracing::warn!(error = %error_message(&err), "transaction fetch failed");
                self.ledger.clear();
                self.fetch = FetchStatus::Failed;
                self.show_error = true;
            }
        }
    }
}

pub struct App {
    client: Client,
    fetch_on_start: bool,
    pub state: AppState,
    fetch_tx: mpsc::UnboundedSender<FetchOutcome>,
    fetch_rx: mpsc::UnboundedReceiver<FetchOutcome>,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let timezone = config.tz()?;
        let page_size = config.page_size()?;
        let client = Client::new(&config.endpoint, config.timeout())?;
        let source = client
            .endpoint()
            .host_str()
            .unwrap_or(config.endpoint.as_str())
            .to_string();
        let state = AppState::new(&config, source, timezone, page_size);
        let (fetch_tx, fetch_rx) = mpsc::unbounded_channel();

        Ok(Self {
            client,
            fetch_on_start: config.fetch_on_start,
            state,
            fetch_tx,
            fetch_rx,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        if self.fetch_on_start {
            self.execute(Command::Fetch);
        }

        while !self.should_quit {
            while let Ok(outcome) = self.fetch_rx.try_recv() {
                self.state.finish_fetch(outcome, Utc::now());
            }

            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            // Blocking poll; yield afterwards so the fetch task gets to run.
            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key),
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let action = ui::keymap::map_key(key);
        let command = self.state.handle_action(action);
        self.execute(command);
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::None => {}
            Command::Quit => self.should_quit = true,
            Command::Fetch => {
                if !self.state.begin_fetch() {
                    tracing::debug!("fetch already in flight, ignoring");
                    return;
                }
                let client = self.client.clone();
                let tx = self.fetch_tx.clone();
                tokio::spawn(async move {
                    let outcome = client.fetch_transactions().await;
                    // The receiver is gone only when the app is shutting down.
                    let _ = tx.send(outcome);
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use engine::{MoneyCents, SortDirection};

    use super::*;

    fn state() -> AppState {
        AppState::new(&AppConfig::default(), "mockapi.io", Tz::UTC, PageSize::default())
    }

    fn twelve() -> Vec<Transaction> {
        (0..12)
            .map(|i| {
                Transaction::new(
                    format!("{i}"),
                    Utc.with_ymd_and_hms(2024, 11, 5 + i / 4, 8, i, 0).unwrap(),
                    "coffee",
                    MoneyCents::new(i as i64 * 100),
                )
            })
            .collect()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 11, 10, 12, 0, 0).unwrap()
    }

    fn type_str(state: &mut AppState, text: &str) {
        for ch in text.chars() {
            state.handle_action(AppAction::Input(ch));
        }
    }

    #[test]
    fn failed_fetch_raises_overlay_until_understood() {
        let mut state = state();
        assert!(state.begin_fetch());
        state.finish_fetch(Err(ClientError::Status(500)), now());

        assert!(state.show_error);
        assert_eq!(state.fetch, FetchStatus::Failed);
        assert!(state.ledger.transactions().is_empty());

        // Table keys are swallowed while the overlay is up.
        assert_eq!(state.handle_action(AppAction::Input('r')), Command::None);
        assert!(state.show_error);

        assert_eq!(state.handle_action(AppAction::Submit), Command::None);
        assert!(!state.show_error);
        assert!(state.ledger.transactions().is_empty());
        assert_eq!(state.fetch, FetchStatus::Failed);
    }

    #[test]
    fn refresh_key_requests_a_single_fetch() {
        let mut state = state();
        assert_eq!(state.handle_action(AppAction::Input('r')), Command::Fetch);
        assert!(state.begin_fetch());
        assert!(!state.begin_fetch());

        state.finish_fetch(Ok(twelve()), now());
        assert_eq!(state.fetch, FetchStatus::Loaded);
        assert!(state.begin_fetch());
    }

    #[test]
    fn next_twice_reaches_the_last_page() {
        let mut state = state();
        state.finish_fetch(Ok(twelve()), now());

        state.handle_action(AppAction::Input('n'));
        state.handle_action(AppAction::Right);
        let view = state.ledger.view();
        assert_eq!((view.page, view.page_count, view.rows.len()), (3, 3, 2));

        state.handle_action(AppAction::Input('n'));
        assert_eq!(state.ledger.view().page, 3);
    }

    #[test]
    fn sort_keys_toggle_direction() {
        let mut state = state();
        state.handle_action(AppAction::Input('a'));
        state.handle_action(AppAction::Input('a'));
        let sort = state.ledger.sort().unwrap();
        assert_eq!(sort.key, SortKey::Amount);
        assert_eq!(sort.direction, SortDirection::Desc);

        state.handle_action(AppAction::Input('d'));
        let sort = state.ledger.sort().unwrap();
        assert_eq!((sort.key, sort.direction), (SortKey::Date, SortDirection::Asc));
    }

    #[test]
    fn page_size_key_cycles_and_resets_page() {
        let mut state = state();
        state.finish_fetch(Ok(twelve()), now());
        state.handle_action(AppAction::Input('n'));

        state.handle_action(AppAction::Input('s'));
        assert_eq!(state.ledger.page_size(), PageSize::Ten);
        assert_eq!(state.ledger.view().page, 1);
    }

    #[test]
    fn date_picker_applies_a_single_day() {
        let mut state = state();
        state.finish_fetch(Ok(twelve()), now());
        state.handle_action(AppAction::Input('n'));

        state.handle_action(AppAction::Input('/'));
        assert!(state.date_picker.open);
        type_str(&mut state, "2024-11-06");
        state.handle_action(AppAction::Submit);

        assert!(!state.date_picker.open);
        let view = state.ledger.view();
        assert_eq!(view.summary.count, 4);
        assert_eq!(view.page, 1);

        state.handle_action(AppAction::Input('c'));
        assert_eq!(state.ledger.view().summary.count, 12);
    }

    #[test]
    fn invalid_picker_input_keeps_it_open() {
        let mut state = state();
        state.handle_action(AppAction::Input('/'));
        type_str(&mut state, "2024-11-07");
        state.handle_action(AppAction::NextField);
        type_str(&mut state, "2024-11-01");
        state.handle_action(AppAction::Submit);

        assert!(state.date_picker.open);
        assert!(state.date_picker.message.is_some());
        assert!(state.ledger.range().is_none());

        state.handle_action(AppAction::Cancel);
        assert!(!state.date_picker.open);
        assert!(state.ledger.range().is_none());
    }

    #[test]
    fn row_highlight_stays_inside_the_page() {
        let mut state = state();
        state.finish_fetch(Ok(twelve()), now());
        for _ in 0..10 {
            state.handle_action(AppAction::Down);
        }
        assert_eq!(state.selected, 4);
        state.handle_action(AppAction::Up);
        assert_eq!(state.selected, 3);
        state.handle_action(AppAction::Input('n'));
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn quit_works_from_every_mode() {
        let mut state = state();
        state.show_error = true;
        assert_eq!(state.handle_action(AppAction::Quit), Command::Quit);
    }
}
