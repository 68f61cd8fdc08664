//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to child components.
//! Fetch state lives in `CauseListState`; App wires it to the job runner
//! and routes actions between components.

use crate::action::Action;
use crate::component::Component;
use crate::components::case_search_dialog::CaseSearch;
use crate::components::{
    calculate_main_layout, CaseSearchDialog, CauseListView, DateControl, HelpDialog, QuitDialog,
    SelectionPanel,
};
use crate::config::{Config, LoadedConfig};
use crate::model::date::INPUT_FORMAT;
use crate::model::selection::MISSING_SELECTION_MESSAGE;
use crate::model::{DomainState, Focus, Level, LookupStatus, Modal, ModalStack};
use crate::services::{write_json_export, CourtService, JobMessage, JobRunner, UrlOpener};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Main application state - coordinates between components
pub struct App {
    /// Domain state (business data)
    pub domain: DomainState,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Background job runner
    pub runner: JobRunner,

    /// Opens the PDF link outside the terminal
    opener: Box<dyn UrlOpener>,

    /// Settings in effect for this run
    pub config: Config,

    /// Config file contents to write back; environment overrides never
    /// reach it
    stored_config: Option<Config>,

    pub focus: Focus,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub selection_panel: SelectionPanel,
    pub date_control: DateControl,
    pub cause_list_view: CauseListView,
    pub case_search_dialog: CaseSearchDialog,
    pub help_dialog: HelpDialog,
    pub quit_dialog: QuitDialog,
}

impl App {
    pub fn new(
        config: LoadedConfig,
        service: Arc<dyn CourtService>,
        opener: Box<dyn UrlOpener>,
    ) -> App {
        let LoadedConfig { stored, active } = config;
        let selection = active.last_selection.clone();
        App {
            domain: DomainState::new(selection),
            modals: ModalStack::new(),
            runner: JobRunner::new(service),
            opener,
            config: active,
            stored_config: stored,
            focus: Focus::Selection,
            should_quit: false,
            error: None,
            status_message: None,
            selection_panel: SelectionPanel::new(),
            date_control: DateControl::new(),
            cause_list_view: CauseListView::new(),
            case_search_dialog: CaseSearchDialog::new(),
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
        }
    }

    /// Config to persist on exit, carrying the current court selection
    ///
    /// `None` when the file on disk could not be read at startup.
    pub fn session_config(&self) -> Option<Config> {
        self.stored_config.as_ref().map(|stored| Config {
            last_selection: self.domain.selection.clone(),
            ..stored.clone()
        })
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.error = None;
        self.status_message = Some(message.into());
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = None;
        self.error = Some(message.into());
    }

    /// Start loading the options for `level` from the current selection
    fn load_level(&mut self, level: Level) {
        self.domain.locations.mark_loading(level);
        if !self.runner.fetch_locations(level, &self.domain.selection) {
            self.domain.locations.finish_loading(level);
        }
    }

    fn choose_location(&mut self, level: Level, index: usize) {
        let Some(location) = self.domain.locations.options(level).get(index).cloned() else {
            return;
        };
        if self.domain.selection.get(level) == Some(location.code.as_str()) {
            return;
        }

        info!(level = level.name(), code = %location.code, name = %location.name, "Selected");
        self.domain.selection.set(level, Some(location.code));
        if let Some(child) = level.next() {
            self.load_level(child);
            self.selection_panel.focused_level = child;
        }
    }

    fn clear_location(&mut self, level: Level) {
        if self.domain.selection.get(level).is_none() {
            return;
        }
        debug!(level = level.name(), "Cleared");
        self.domain.selection.set(level, None);
        if let Some(child) = level.next() {
            self.domain.locations.clear_from(child);
        }
    }

    fn commit_date(&mut self) {
        let input = self.date_control.take_input();
        match NaiveDate::parse_from_str(&input, INPUT_FORMAT) {
            Ok(date) => {
                self.domain.date.set(date.format(INPUT_FORMAT).to_string());
                self.error = None;
            }
            Err(_) => self.set_error(format!("Invalid date '{}', expected YYYY-MM-DD", input)),
        }
    }

    fn fetch_cause_list(&mut self) {
        if let Some(request) = self
            .domain
            .cause_list
            .begin(&self.domain.selection, &self.domain.date)
        {
            self.cause_list_view.reset_scroll();
            self.runner.fetch_cause_list(request);
        }
    }

    /// Open the printable list; silently does nothing without a full selection
    fn open_pdf(&mut self) {
        let Some(query) = self.domain.selection.query() else {
            return;
        };
        let url = self
            .runner
            .service()
            .build_pdf_url(&query, &self.domain.date.api_format());
        info!(%url, "Opening PDF");
        match self.opener.open(&url) {
            Ok(()) => self.set_status("Opened PDF in browser"),
            Err(e) => {
                warn!(error = %e, "Could not open PDF");
                self.set_error(e.to_string());
            }
        }
    }

    fn save_pdf(&mut self) {
        let Some(query) = self.domain.selection.query() else {
            return;
        };
        self.runner
            .save_pdf(query, self.domain.date.api_format(), self.config.export_dir());
        self.set_status("Downloading PDF...");
    }

    /// Write the current result as JSON; silently does nothing without one
    fn export_json(&mut self) {
        let Some(list) = self.domain.cause_list.result() else {
            return;
        };
        let dir = self.config.export_dir();
        match write_json_export(list, &dir, &self.domain.date.export_file_name()) {
            Ok(path) => self.set_status(format!("Saved {}", path.display())),
            Err(e) => {
                warn!(error = %e, "JSON export failed");
                self.set_error(format!("{:#}", e));
            }
        }
    }

    fn submit_case_search(&mut self) {
        if matches!(self.domain.lookup, LookupStatus::Searching) {
            return;
        }
        let Some(search) = self.case_search_dialog.request() else {
            return;
        };
        match search {
            CaseSearch::Cnr(cnr) => {
                info!(%cnr, "Searching case by CNR");
                let selection = &self.domain.selection;
                self.runner.lookup_case(
                    cnr,
                    selection.get(Level::State).map(str::to_string),
                    selection.get(Level::District).map(str::to_string),
                );
            }
            CaseSearch::Details(details) => {
                let Some(query) = self.domain.selection.query() else {
                    self.domain.lookup =
                        LookupStatus::Failed(MISSING_SELECTION_MESSAGE.to_string());
                    return;
                };
                info!(case = %details.case_id(), "Searching case by details");
                self.runner.lookup_case_details(query, details);
            }
        }
        self.domain.lookup = LookupStatus::Searching;
    }

    fn apply_job_message(&mut self, message: JobMessage) {
        match message {
            JobMessage::CauseList { request_id, result } => {
                if self.domain.cause_list.complete(request_id, result) {
                    self.cause_list_view.reset_scroll();
                }
            }
            JobMessage::Locations {
                level,
                parent,
                result,
            } => {
                if parent != self.domain.selection.ancestors_of(level) {
                    debug!(level = level.name(), "Discarding stale option list");
                    return;
                }
                match result {
                    Ok(options) => {
                        debug!(level = level.name(), count = options.len(), "Options loaded");
                        self.domain.locations.set_options(level, options);
                        self.selection_panel.highlight_selected(
                            level,
                            &self.domain.locations,
                            &self.domain.selection,
                        );
                    }
                    Err(e) => {
                        warn!(level = level.name(), error = %e, "Could not load options");
                        self.domain.locations.finish_loading(level);
                        self.set_error(format!("Could not load {} list: {}", level.name(), e));
                    }
                }
            }
            JobMessage::PdfSaved(result) => match result {
                Ok(Some(path)) => self.set_status(format!("Saved {}", path.display())),
                Ok(None) => self.set_status("No PDF is published for this court and date"),
                Err(e) => {
                    warn!(error = %e, "PDF download failed");
                    self.set_error(e.to_string());
                }
            },
            JobMessage::CaseLookup(result) => {
                self.domain.lookup = match result {
                    Ok(lookup) => LookupStatus::Found(lookup),
                    Err(e) => LookupStatus::Failed(e.to_string()),
                };
            }
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        self.selection_panel.has_focus = focus == Focus::Selection;
        self.cause_list_view.has_focus = focus == Focus::Results;
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    /// Load the state list plus any lists the restored selection needs
    fn init(&mut self) -> Result<()> {
        self.set_focus(Focus::Selection);
        self.load_level(Level::State);
        for level in [Level::District, Level::CourtComplex, Level::Court] {
            let parent_chosen = level
                .prev()
                .and_then(|p| self.domain.selection.get(p))
                .is_some();
            if !parent_chosen {
                break;
            }
            self.load_level(level);
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        if self.date_control.editing {
            return self.date_control.handle_key_event(key);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return self.handle_focused_key_event(key);
        }

        let action = match key.code {
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Tab | KeyCode::BackTab => Some(Action::ToggleFocus),
            KeyCode::Char('c') => Some(Action::OpenCaseSearch),
            KeyCode::Char('t') => Some(Action::SetToday),
            KeyCode::Char('m') => Some(Action::SetTomorrow),
            KeyCode::Char('d') => Some(Action::BeginDateEdit),
            KeyCode::Char('f') => Some(Action::FetchCauseList),
            KeyCode::Char('x') => Some(Action::ExportJson),
            KeyCode::Char('p') => Some(Action::OpenPdf),
            KeyCode::Char('s') => Some(Action::SavePdf),
            _ => return self.handle_focused_key_event(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            debug!(%action, "Action");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                for message in self.runner.poll() {
                    self.apply_job_message(message);
                }
            }
            Action::ForceQuit => {
                info!("Quitting");
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}
            Action::ToggleFocus => self.set_focus(self.focus.toggle()),

            // ─────────────────────────────────────────────────────────────────
            // Scrolling
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                if self.modals.top() == Some(&Modal::Help) {
                    self.help_dialog.update(action)?;
                } else {
                    self.cause_list_view.update(action)?;
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenCaseSearch => {
                self.case_search_dialog.reset();
                if !matches!(self.domain.lookup, LookupStatus::Searching) {
                    self.domain.lookup = LookupStatus::Idle;
                }
                self.modals.push(Modal::CaseSearch);
            }
            Action::CloseModal => {
                if self.modals.top() == Some(&Modal::Help) {
                    self.help_dialog.update(Action::CloseModal)?;
                }
                self.modals.pop();
            }

            // ─────────────────────────────────────────────────────────────────
            // Court Selection
            // ─────────────────────────────────────────────────────────────────
            Action::ChooseLocation(level, index) => self.choose_location(level, index),
            Action::ClearLocation(level) => self.clear_location(level),

            // ─────────────────────────────────────────────────────────────────
            // Date
            // ─────────────────────────────────────────────────────────────────
            Action::SetToday => self.domain.date.set_today(),
            Action::SetTomorrow => self.domain.date.set_tomorrow(),
            Action::BeginDateEdit => self.date_control.begin_edit(&self.domain.date),
            Action::DateInput(_) | Action::DateBackspace => {
                self.date_control.update(action)?;
            }
            Action::CommitDate => self.commit_date(),
            Action::CancelDateEdit => self.date_control.cancel(),

            // ─────────────────────────────────────────────────────────────────
            // Cause List
            // ─────────────────────────────────────────────────────────────────
            Action::FetchCauseList => self.fetch_cause_list(),
            Action::OpenPdf => self.open_pdf(),
            Action::SavePdf => self.save_pdf(),
            Action::ExportJson => self.export_json(),

            // ─────────────────────────────────────────────────────────────────
            // Case Search
            // ─────────────────────────────────────────────────────────────────
            Action::CaseSearchInput(_)
            | Action::CaseSearchBackspace
            | Action::CaseSearchNextField => {
                self.case_search_dialog.update(action)?;
            }
            Action::SubmitCaseSearch => self.submit_case_search(),
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let has_status = self.error.is_some() || self.status_message.is_some();
        let layout = calculate_main_layout(area, has_status);

        self.selection_panel.draw_with(
            frame,
            layout.selection,
            &self.domain.locations,
            &self.domain.selection,
        );
        self.date_control
            .draw_with(frame, layout.date, &self.domain.date);
        CauseListView::draw_trigger(
            frame,
            layout.trigger,
            self.domain.cause_list.is_loading(),
            self.domain.cause_list.can_trigger(&self.domain.selection),
        );
        self.cause_list_view
            .draw_with(frame, layout.results, self.domain.cause_list.status());

        if let Some(status_area) = layout.status {
            self.draw_status_line(frame, status_area);
        }
        self.draw_help_bar(frame, layout.help);

        // Draw modal overlay if active
        if let Some(modal) = self.modals.top().cloned() {
            self.draw_modal(frame, area, &modal)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::CaseSearch => self.case_search_dialog.handle_key_event(key),
        }
    }

    fn handle_focused_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match self.focus {
            Focus::Selection => self.selection_panel.handle_key_event(key),
            Focus::Results => self.cause_list_view.handle_key_event(key),
        }
    }

    fn draw_modal(&mut self, frame: &mut Frame, area: Rect, modal: &Modal) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area)?,
            Modal::Help => self.help_dialog.draw(frame, area)?,
            Modal::CaseSearch => {
                self.case_search_dialog
                    .draw_with(frame, area, &self.domain.lookup);
            }
        }
        Ok(())
    }

    fn draw_status_line(&self, frame: &mut Frame, area: Rect) {
        let span = if let Some(error) = &self.error {
            Span::styled(format!(" Error: {} ", error), Style::default().fg(Color::Red))
        } else if let Some(status) = &self.status_message {
            Span::styled(format!(" {} ", status), Style::default().fg(Color::Yellow))
        } else {
            Span::raw("")
        };
        frame.render_widget(Paragraph::new(Line::from(span)), area);
    }

    fn draw_help_bar(&self, frame: &mut Frame, area: Rect) {
        let key = |k: &'static str, color: Color| {
            Span::styled(
                k,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )
        };

        let spans = if self.date_control.editing {
            vec![
                key(" Enter ", Color::Green),
                Span::raw("Apply  "),
                key(" Esc ", Color::Yellow),
                Span::raw("Cancel  "),
                Span::styled("YYYY-MM-DD", Style::default().fg(Color::DarkGray)),
            ]
        } else {
            vec![
                key(" q ", Color::Yellow),
                Span::raw("Quit "),
                key(" f ", Color::Green),
                Span::raw("Fetch "),
                key(" t/m/d ", Color::Cyan),
                Span::raw("Date "),
                key(" x ", Color::Cyan),
                Span::raw("JSON "),
                key(" p/s ", Color::Cyan),
                Span::raw("PDF "),
                key(" c ", Color::Cyan),
                Span::raw("CNR "),
                key(" Tab ", Color::Cyan),
                Span::raw("Focus "),
                key(" ? ", Color::Cyan),
                Span::raw("Help"),
            ]
        };
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
