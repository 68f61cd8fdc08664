//! Court selection: state, district, court complex and an optional court

use serde::{Deserialize, Serialize};

/// Shown when a fetch is attempted without the mandatory selections
pub const MISSING_SELECTION_MESSAGE: &str = "Please select State, District, and Court Complex";

/// One tier of the court hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    State,
    District,
    CourtComplex,
    Court,
}

impl Level {
    pub fn all() -> [Level; 4] {
        [Level::State, Level::District, Level::CourtComplex, Level::Court]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Level::State => "State",
            Level::District => "District",
            Level::CourtComplex => "Court Complex",
            Level::Court => "Court",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Level::State => 0,
            Level::District => 1,
            Level::CourtComplex => 2,
            Level::Court => 3,
        }
    }

    pub fn next(&self) -> Option<Level> {
        match self {
            Level::State => Some(Level::District),
            Level::District => Some(Level::CourtComplex),
            Level::CourtComplex => Some(Level::Court),
            Level::Court => None,
        }
    }

    pub fn prev(&self) -> Option<Level> {
        match self {
            Level::State => None,
            Level::District => Some(Level::State),
            Level::CourtComplex => Some(Level::District),
            Level::Court => Some(Level::CourtComplex),
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, Level::Court)
    }
}

/// A fully validated court scope, ready to be sent to the portal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourtQuery {
    pub state_code: String,
    pub district_code: String,
    pub court_complex_code: String,
    pub court_code: Option<String>,
}

/// The user's current choice at each level
///
/// Codes are kept as entered; an empty string counts as not selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub state: Option<String>,
    pub district: Option<String>,
    pub court_complex: Option<String>,
    pub court: Option<String>,
}

impl Selection {
    pub fn get(&self, level: Level) -> Option<&str> {
        let code = match level {
            Level::State => &self.state,
            Level::District => &self.district,
            Level::CourtComplex => &self.court_complex,
            Level::Court => &self.court,
        };
        code.as_deref().filter(|c| !c.is_empty())
    }

    /// Set a level; everything below it is cleared
    pub fn set(&mut self, level: Level, code: Option<String>) {
        match level {
            Level::State => self.state = code,
            Level::District => self.district = code,
            Level::CourtComplex => self.court_complex = code,
            Level::Court => self.court = code,
        }
        let mut below = level.next();
        while let Some(l) = below {
            match l {
                Level::State => self.state = None,
                Level::District => self.district = None,
                Level::CourtComplex => self.court_complex = None,
                Level::Court => self.court = None,
            }
            below = l.next();
        }
    }

    /// Copy of this selection keeping only the levels above `level`
    pub fn ancestors_of(&self, level: Level) -> Selection {
        let mut out = self.clone();
        out.set(level, None);
        out
    }

    /// Validate the mandatory levels
    pub fn query(&self) -> Option<CourtQuery> {
        Some(CourtQuery {
            state_code: self.get(Level::State)?.to_string(),
            district_code: self.get(Level::District)?.to_string(),
            court_complex_code: self.get(Level::CourtComplex)?.to_string(),
            court_code: self.get(Level::Court).map(str::to_string),
        })
    }

    pub fn is_complete(&self) -> bool {
        self.query().is_some()
    }
}
