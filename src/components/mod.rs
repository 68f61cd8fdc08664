//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod case_search_dialog;
pub mod cause_list_view;
pub mod date_control;
pub mod help_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod selection_panel;

pub use case_search_dialog::CaseSearchDialog;
pub use cause_list_view::CauseListView;
pub use date_control::DateControl;
pub use help_dialog::HelpDialog;
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use selection_panel::SelectionPanel;
