//! Model layer - centralized state management
//!
//! - `DomainState` - selection, date, fetch status, lookup
//! - `ModalStack` - modal overlay management
//! - `Focus` - which panel takes navigation keys

pub mod cause_list;
pub mod date;
pub mod domain;
pub mod fetch;
pub mod location;
pub mod lookup;
pub mod modal;
pub mod selection;
pub mod ui;

// Re-export commonly used types
pub use cause_list::{CaseEntry, CauseList};
pub use date::QueryDate;
pub use domain::{DomainState, LookupStatus};
pub use fetch::{CauseListState, FetchRequest, FetchStatus};
pub use location::{Location, LocationLists};
pub use lookup::{CaseDetails, CaseLookup};
pub use modal::{Modal, ModalStack};
pub use selection::{CourtQuery, Level, Selection};
pub use ui::Focus;
