//! Single-case search, by CNR number or by case type, number and year

/// What the portal reported about one case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseLookup {
    pub case_id: String,
    pub found: bool,
    pub listed_today: bool,
    pub listed_tomorrow: bool,
    pub serial_number: Option<String>,
    pub court_name: Option<String>,
    pub next_hearing_date: Option<String>,
    pub case_status: Option<String>,
    /// Every label/value row in page order; labels are lower-cased
    pub details: Vec<(String, String)>,
}

impl CaseLookup {
    pub fn new(case_id: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            ..Default::default()
        }
    }

    /// Short listing summary for the search dialog
    pub fn listing_summary(&self) -> &'static str {
        if self.listed_today {
            "Listed today"
        } else if self.listed_tomorrow {
            "Listed tomorrow"
        } else {
            "Not listed today or tomorrow"
        }
    }
}

/// A case named by its register entry rather than its CNR
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDetails {
    pub case_type: String,
    pub case_number: String,
    pub case_year: String,
}

impl CaseDetails {
    /// `type/number/year`, the id reported for a details search
    pub fn case_id(&self) -> String {
        format!("{}/{}/{}", self.case_type, self.case_number, self.case_year)
    }
}
