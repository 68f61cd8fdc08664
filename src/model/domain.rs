//! Domain state - court data separate from UI concerns

use super::date::QueryDate;
use super::fetch::CauseListState;
use super::location::LocationLists;
use super::lookup::CaseLookup;
use super::selection::Selection;

/// State of the CNR search
#[derive(Debug, Default)]
pub enum LookupStatus {
    #[default]
    Idle,
    Searching,
    Found(CaseLookup),
    Failed(String),
}

/// Domain state containing all business data
#[derive(Debug, Default)]
pub struct DomainState {
    /// Current court choice
    pub selection: Selection,

    /// Options for each level of the hierarchy
    pub locations: LocationLists,

    /// Date the list is requested for
    pub date: QueryDate,

    /// Fetch status and current result
    pub cause_list: CauseListState,

    /// Last CNR search
    pub lookup: LookupStatus,
}

impl DomainState {
    pub fn new(selection: Selection) -> Self {
        Self {
            selection,
            ..Default::default()
        }
    }
}
