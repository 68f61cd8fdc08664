//! Fetch state machine for the cause list
//!
//! Replaces separate loading/error/result flags with a single enum so
//! impossible combinations (loading while showing an error) cannot occur.

use super::cause_list::CauseList;
use super::date::QueryDate;
use super::selection::{CourtQuery, Selection, MISSING_SELECTION_MESSAGE};
use crate::error::ServiceError;
use tracing::{debug, info, warn};

/// Shown when a failure carries no message of its own
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch cause list";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
    Success(CauseList),
}

/// Everything a worker needs to perform one fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: u64,
    pub query: CourtQuery,
    /// `DD-MM-YYYY`
    pub date: String,
}

/// Owns the fetch status and tracks which request is in flight
#[derive(Debug, Default)]
pub struct CauseListState {
    status: FetchStatus,
    last_request_id: u64,
    in_flight: Option<u64>,
}

impl CauseListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading)
    }

    pub fn result(&self) -> Option<&CauseList> {
        match &self.status {
            FetchStatus::Success(list) => Some(list),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Whether the fetch trigger should be enabled
    pub fn can_trigger(&self, selection: &Selection) -> bool {
        !self.is_loading() && selection.is_complete()
    }

    /// Start a fetch attempt
    ///
    /// Prior error and result are cleared before the selection is
    /// validated, so a failed validation also removes a stale list.
    /// Returns the request to hand to a worker, or `None` when nothing
    /// should be sent (already loading, or validation failed).
    pub fn begin(&mut self, selection: &Selection, date: &QueryDate) -> Option<FetchRequest> {
        if self.is_loading() {
            debug!("Fetch already in flight, ignoring trigger");
            return None;
        }

        self.status = FetchStatus::Loading;

        let Some(query) = selection.query() else {
            self.status = FetchStatus::Error(MISSING_SELECTION_MESSAGE.to_string());
            return None;
        };

        self.last_request_id += 1;
        let id = self.last_request_id;
        self.in_flight = Some(id);

        let request = FetchRequest {
            id,
            query,
            date: date.api_format(),
        };
        info!(
            request_id = id,
            state = %request.query.state_code,
            district = %request.query.district_code,
            complex = %request.query.court_complex_code,
            court = ?request.query.court_code,
            date = %request.date,
            "Fetching cause list"
        );
        Some(request)
    }

    /// Apply the outcome of a request
    ///
    /// Returns false when the outcome belongs to a request that is no
    /// longer current and was discarded.
    pub fn complete(&mut self, id: u64, outcome: Result<CauseList, ServiceError>) -> bool {
        if self.in_flight != Some(id) {
            debug!(request_id = id, "Discarding stale cause list response");
            return false;
        }
        self.in_flight = None;

        self.status = match outcome {
            Ok(list) => {
                info!(request_id = id, total = list.total_cases, "Cause list loaded");
                FetchStatus::Success(list)
            }
            Err(err) => {
                warn!(request_id = id, error = %err, "Cause list fetch failed");
                FetchStatus::Error(failure_message(&err))
            }
        };
        true
    }
}

fn failure_message(err: &ServiceError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        FETCH_FALLBACK_MESSAGE.to_string()
    } else {
        message
    }
}

/// Caption for the fetch trigger
pub fn trigger_caption(loading: bool) -> &'static str {
    if loading {
        "Fetching..."
    } else {
        "Get Cause List"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::cause_list::CaseEntry;
    use chrono::NaiveDate;

    fn complete_selection() -> Selection {
        Selection {
            state: Some("7".to_string()),
            district: Some("12".to_string()),
            court_complex: Some("1070012".to_string()),
            court: None,
        }
    }

    fn date() -> QueryDate {
        QueryDate::from_date(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
    }

    fn two_cases() -> CauseList {
        CauseList::from_cases(vec![
            CaseEntry {
                serial_number: "1".to_string(),
                ..Default::default()
            },
            CaseEntry {
                serial_number: "2".to_string(),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_begin_builds_request_with_api_date() {
        let mut state = CauseListState::new();
        let request = state.begin(&complete_selection(), &date()).unwrap();

        assert_eq!(request.date, "07-03-2024");
        assert_eq!(request.query.court_complex_code, "1070012");
        assert!(state.is_loading());
    }

    #[test]
    fn test_missing_selection_sets_message_without_request() {
        let mut selection = complete_selection();
        selection.court_complex = None;

        let mut state = CauseListState::new();
        assert!(state.begin(&selection, &date()).is_none());
        assert_eq!(state.error(), Some(MISSING_SELECTION_MESSAGE));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failed_validation_clears_previous_result() {
        let mut state = CauseListState::new();
        let request = state.begin(&complete_selection(), &date()).unwrap();
        state.complete(request.id, Ok(two_cases()));
        assert!(state.result().is_some());

        state.begin(&Selection::default(), &date());
        assert!(state.result().is_none());
        assert_eq!(state.error(), Some(MISSING_SELECTION_MESSAGE));
    }

    #[test]
    fn test_success_stores_result() {
        let mut state = CauseListState::new();
        let request = state.begin(&complete_selection(), &date()).unwrap();

        assert!(state.complete(request.id, Ok(two_cases())));
        assert_eq!(state.result().unwrap().total_cases, 2);
        assert!(state.error().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_failure_uses_error_message_and_clears_result() {
        let mut state = CauseListState::new();
        let first = state.begin(&complete_selection(), &date()).unwrap();
        state.complete(first.id, Ok(two_cases()));

        let second = state.begin(&complete_selection(), &date()).unwrap();
        state.complete(
            second.id,
            Err(ServiceError::Upstream("Server unreachable".to_string())),
        );

        assert_eq!(state.error(), Some("Server unreachable"));
        assert!(state.result().is_none());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_blank_failure_falls_back_to_generic_message() {
        let mut state = CauseListState::new();
        let request = state.begin(&complete_selection(), &date()).unwrap();
        state.complete(request.id, Err(ServiceError::Upstream("  ".to_string())));
        assert_eq!(state.error(), Some(FETCH_FALLBACK_MESSAGE));
    }

    #[test]
    fn test_trigger_ignored_while_loading() {
        let mut state = CauseListState::new();
        let first = state.begin(&complete_selection(), &date()).unwrap();
        assert!(state.begin(&complete_selection(), &date()).is_none());

        assert!(state.complete(first.id, Ok(two_cases())));
        assert!(state.result().is_some());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = CauseListState::new();
        let first = state.begin(&complete_selection(), &date()).unwrap();
        state.complete(first.id, Err(ServiceError::Status(500)));

        let second = state.begin(&complete_selection(), &date()).unwrap();
        assert!(!state.complete(first.id, Ok(CauseList::default())));
        assert!(state.is_loading());

        assert!(state.complete(second.id, Ok(two_cases())));
        assert_eq!(state.result().unwrap().cases.len(), 2);
    }

    #[test]
    fn test_can_trigger_iff_idle_and_complete() {
        let mut state = CauseListState::new();
        assert!(state.can_trigger(&complete_selection()));
        assert!(!state.can_trigger(&Selection::default()));

        state.begin(&complete_selection(), &date());
        assert!(!state.can_trigger(&complete_selection()));
    }

    #[test]
    fn test_trigger_caption() {
        assert_eq!(trigger_caption(false), "Get Cause List");
        assert_eq!(trigger_caption(true), "Fetching...");
    }
}
