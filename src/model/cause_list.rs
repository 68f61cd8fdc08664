//! Cause list data as returned by the portal and written by the JSON export

use serde::{Deserialize, Serialize};

/// One listed case. All fields are display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseEntry {
    pub serial_number: String,
    pub case_number: String,
    pub parties: String,
    pub advocate: String,
    pub purpose: String,
}

impl CaseEntry {
    /// Cells in table column order
    pub fn cells(&self) -> [&str; 5] {
        [
            &self.serial_number,
            &self.case_number,
            &self.parties,
            &self.advocate,
            &self.purpose,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseList {
    pub total_cases: usize,
    pub cases: Vec<CaseEntry>,
}

impl CauseList {
    pub fn from_cases(cases: Vec<CaseEntry>) -> Self {
        Self {
            total_cases: cases.len(),
            cases,
        }
    }

    /// Pretty JSON with 2-space indentation
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
