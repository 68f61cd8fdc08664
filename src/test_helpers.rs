//! Fakes for driving the app without a network or browser

use crate::error::ServiceError;
use crate::model::{
    CaseDetails, CaseEntry, CaseLookup, CauseList, CourtQuery, Location, Selection,
};
use crate::services::{CourtService, UrlOpener};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory court service with a configurable cause list outcome
#[derive(Default)]
pub struct FakeService {
    cases: usize,
    failure: Option<String>,
    cause_list_calls: AtomicUsize,
}

impl FakeService {
    pub fn with_cases(cases: usize) -> Self {
        Self {
            cases,
            ..Default::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn cause_list_calls(&self) -> usize {
        self.cause_list_calls.load(Ordering::SeqCst)
    }

    pub fn complete_selection() -> Selection {
        Selection {
            state: Some("7".to_string()),
            district: Some("12".to_string()),
            court_complex: Some("1070012".to_string()),
            court: None,
        }
    }

    pub fn case(n: usize) -> CaseEntry {
        CaseEntry {
            serial_number: n.to_string(),
            case_number: format!("CS/{}/2024", n),
            parties: format!("Party {} vs State", n),
            advocate: format!("Adv {}", n),
            purpose: "Hearing".to_string(),
        }
    }
}

impl CourtService for FakeService {
    fn fetch_states(&self) -> Vec<Location> {
        vec![Location::new("7", "West Bengal"), Location::new("1", "Delhi")]
    }

    fn fetch_districts(&self, state: &str) -> Result<Vec<Location>, ServiceError> {
        Ok(vec![Location::new("12", format!("District of {}", state))])
    }

    fn fetch_court_complexes(
        &self,
        _state: &str,
        district: &str,
    ) -> Result<Vec<Location>, ServiceError> {
        Ok(vec![Location::new("1070012", format!("Complex of {}", district))])
    }

    fn fetch_courts(
        &self,
        _state: &str,
        _district: &str,
        _complex: &str,
    ) -> Result<Vec<Location>, ServiceError> {
        Ok(vec![Location::new("3", "Court 3")])
    }

    fn fetch_cause_list(&self, _query: &CourtQuery, _date: &str) -> Result<CauseList, ServiceError> {
        self.cause_list_calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(message) => Err(ServiceError::Upstream(message.clone())),
            None => Ok(CauseList::from_cases((1..=self.cases).map(Self::case).collect())),
        }
    }

    fn build_pdf_url(&self, query: &CourtQuery, date: &str) -> String {
        format!(
            "https://example.test/pdf?state_code={}&dist_code={}&court_complex_code={}&date={}",
            query.state_code, query.district_code, query.court_complex_code, date
        )
    }

    fn download_pdf(
        &self,
        _query: &CourtQuery,
        _date: &str,
        dir: &Path,
    ) -> Result<Option<PathBuf>, ServiceError> {
        Ok(Some(dir.join("fake.pdf")))
    }

    fn search_case_by_cnr(
        &self,
        cnr: &str,
        _state: Option<&str>,
        _district: Option<&str>,
    ) -> Result<CaseLookup, ServiceError> {
        let mut lookup = CaseLookup::new(cnr);
        lookup.case_status = Some("Pending".to_string());
        Ok(lookup)
    }

    fn search_case_by_details(
        &self,
        query: &CourtQuery,
        details: &CaseDetails,
    ) -> Result<CaseLookup, ServiceError> {
        let mut lookup = CaseLookup::new(details.case_id());
        lookup.case_status = Some("Disposed".to_string());
        lookup.court_name = Some(format!("Complex {}", query.court_complex_code));
        lookup
            .details
            .push(("case type".to_string(), details.case_type.clone()));
        Ok(lookup)
    }
}

/// Records every URL it is asked to open
#[derive(Clone, Default)]
pub struct RecordingOpener {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    pub fn urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UrlOpener for RecordingOpener {
    fn open(&self, url: &str) -> anyhow::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}
