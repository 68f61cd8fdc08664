//! Option lists for the court hierarchy

use super::selection::Level;

/// A selectable state, district, complex or court
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub code: String,
    pub name: String,
}

impl Location {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// States offered when the portal's state list cannot be read
pub fn default_states() -> Vec<Location> {
    [
        ("1", "Delhi"),
        ("2", "Maharashtra"),
        ("3", "Karnataka"),
        ("4", "Tamil Nadu"),
        ("5", "Gujarat"),
        ("6", "Rajasthan"),
        ("7", "West Bengal"),
        ("8", "Uttar Pradesh"),
        ("9", "Madhya Pradesh"),
        ("10", "Punjab"),
    ]
    .into_iter()
    .map(|(code, name)| Location::new(code, name))
    .collect()
}

/// Options and loading flags for all four levels
#[derive(Debug, Default)]
pub struct LocationLists {
    options: [Vec<Location>; 4],
    loading: [bool; 4],
}

impl LocationLists {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self, level: Level) -> &[Location] {
        &self.options[level.index()]
    }

    pub fn is_loading(&self, level: Level) -> bool {
        self.loading[level.index()]
    }

    /// Mark a level as loading; its list and every deeper list are emptied
    pub fn mark_loading(&mut self, level: Level) {
        self.clear_from(level);
        self.loading[level.index()] = true;
    }

    /// Replace a level's options and mark it loaded
    ///
    /// Deeper levels are left alone; choosing a new parent clears them
    /// through `mark_loading`.
    pub fn set_options(&mut self, level: Level, options: Vec<Location>) {
        self.options[level.index()] = options;
        self.loading[level.index()] = false;
    }

    pub fn finish_loading(&mut self, level: Level) {
        self.loading[level.index()] = false;
    }

    /// Empty `level` and everything below it
    pub fn clear_from(&mut self, level: Level) {
        let mut current = Some(level);
        while let Some(l) = current {
            self.options[l.index()].clear();
            self.loading[l.index()] = false;
            current = l.next();
        }
    }
}
