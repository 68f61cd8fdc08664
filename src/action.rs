//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use crate::model::Level;
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick; drains finished background jobs
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,
    /// Move focus between the selection panel and the results
    ToggleFocus,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    /// Open the case search
    OpenCaseSearch,
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Court Selection
    // ─────────────────────────────────────────────────────────────────────────
    /// Choose the option at the given index for a level
    ChooseLocation(Level, usize),
    /// Clear a level (and everything below it)
    ClearLocation(Level),

    // ─────────────────────────────────────────────────────────────────────────
    // Date
    // ─────────────────────────────────────────────────────────────────────────
    SetToday,
    SetTomorrow,
    BeginDateEdit,
    DateInput(char),
    DateBackspace,
    CommitDate,
    CancelDateEdit,

    // ─────────────────────────────────────────────────────────────────────────
    // Cause List
    // ─────────────────────────────────────────────────────────────────────────
    FetchCauseList,
    /// Open the printable list in the browser
    OpenPdf,
    /// Download the printable list to the export directory
    SavePdf,
    /// Write the current result as JSON
    ExportJson,

    // ─────────────────────────────────────────────────────────────────────────
    // Case Search
    // ─────────────────────────────────────────────────────────────────────────
    CaseSearchInput(char),
    CaseSearchBackspace,
    /// Move to the next search field; CNR or case details
    CaseSearchNextField,
    SubmitCaseSearch,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::ToggleFocus => write!(f, "ToggleFocus"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenCaseSearch => write!(f, "OpenCaseSearch"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ChooseLocation(level, i) => {
                write!(f, "ChooseLocation({}, {})", level.name(), i)
            }
            Action::ClearLocation(level) => write!(f, "ClearLocation({})", level.name()),
            Action::SetToday => write!(f, "SetToday"),
            Action::SetTomorrow => write!(f, "SetTomorrow"),
            Action::BeginDateEdit => write!(f, "BeginDateEdit"),
            Action::DateInput(c) => write!(f, "DateInput('{}')", c),
            Action::DateBackspace => write!(f, "DateBackspace"),
            Action::CommitDate => write!(f, "CommitDate"),
            Action::CancelDateEdit => write!(f, "CancelDateEdit"),
            Action::FetchCauseList => write!(f, "FetchCauseList"),
            Action::OpenPdf => write!(f, "OpenPdf"),
            Action::SavePdf => write!(f, "SavePdf"),
            Action::ExportJson => write!(f, "ExportJson"),
            Action::CaseSearchInput(c) => write!(f, "CaseSearchInput('{}')", c),
            Action::CaseSearchBackspace => write!(f, "CaseSearchBackspace"),
            Action::CaseSearchNextField => write!(f, "CaseSearchNextField"),
            Action::SubmitCaseSearch => write!(f, "SubmitCaseSearch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_uses_level_names() {
        assert_eq!(
            Action::ChooseLocation(Level::CourtComplex, 2).to_string(),
            "ChooseLocation(Court Complex, 2)"
        );
        assert_eq!(Action::DateInput('7').to_string(), "DateInput('7')");
    }
}
