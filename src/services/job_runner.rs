//! Background job runner service
//!
//! Every portal call runs on its own thread and reports back through a
//! channel that the UI drains on each tick, so rendering never waits on
//! the network.

use super::ecourts::CourtService;
use crate::error::ServiceError;
use crate::model::{
    CaseDetails, CaseLookup, CauseList, CourtQuery, FetchRequest, Level, Location, Selection,
};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::debug;

/// Outcome of a background job
#[derive(Debug)]
pub enum JobMessage {
    CauseList {
        request_id: u64,
        result: Result<CauseList, ServiceError>,
    },
    Locations {
        level: Level,
        /// Selection above `level` at the time of the request
        parent: Selection,
        result: Result<Vec<Location>, ServiceError>,
    },
    PdfSaved(Result<Option<PathBuf>, ServiceError>),
    CaseLookup(Result<CaseLookup, ServiceError>),
}

/// Job runner for portal requests
pub struct JobRunner {
    service: Arc<dyn CourtService>,
    sender: Sender<JobMessage>,
    receiver: Receiver<JobMessage>,
}

impl JobRunner {
    pub fn new(service: Arc<dyn CourtService>) -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            service,
            sender,
            receiver,
        }
    }

    pub fn service(&self) -> &dyn CourtService {
        self.service.as_ref()
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&dyn CourtService) -> JobMessage + Send + 'static,
    {
        let service = Arc::clone(&self.service);
        let tx = self.sender.clone();
        thread::spawn(move || {
            let message = job(service.as_ref());
            // Receiver is gone only when the app is shutting down
            let _ = tx.send(message);
        });
    }

    pub fn fetch_cause_list(&self, request: FetchRequest) {
        self.spawn(move |service| JobMessage::CauseList {
            request_id: request.id,
            result: service.fetch_cause_list(&request.query, &request.date),
        });
    }

    /// Load the options for `level` given the choices above it
    ///
    /// Returns false when a parent code is missing and nothing was started.
    pub fn fetch_locations(&self, level: Level, selection: &Selection) -> bool {
        let parent = selection.ancestors_of(level);
        let state = parent.get(Level::State).map(str::to_string);
        let district = parent.get(Level::District).map(str::to_string);
        let complex = parent.get(Level::CourtComplex).map(str::to_string);

        let ready = match level {
            Level::State => true,
            Level::District => state.is_some(),
            Level::CourtComplex => state.is_some() && district.is_some(),
            Level::Court => state.is_some() && district.is_some() && complex.is_some(),
        };
        if !ready {
            return false;
        }

        debug!(level = level.name(), "Loading options");
        self.spawn(move |service| {
            let state = state.unwrap_or_default();
            let district = district.unwrap_or_default();
            let complex = complex.unwrap_or_default();
            let result = match level {
                Level::State => Ok(service.fetch_states()),
                Level::District => service.fetch_districts(&state),
                Level::CourtComplex => service.fetch_court_complexes(&state, &district),
                Level::Court => service.fetch_courts(&state, &district, &complex),
            };
            JobMessage::Locations {
                level,
                parent,
                result,
            }
        });
        true
    }

    pub fn save_pdf(&self, query: CourtQuery, date: String, dir: PathBuf) {
        self.spawn(move |service| JobMessage::PdfSaved(service.download_pdf(&query, &date, &dir)));
    }

    pub fn lookup_case(&self, cnr: String, state: Option<String>, district: Option<String>) {
        self.spawn(move |service| {
            JobMessage::CaseLookup(service.search_case_by_cnr(
                &cnr,
                state.as_deref(),
                district.as_deref(),
            ))
        });
    }

    pub fn lookup_case_details(&self, query: CourtQuery, details: CaseDetails) {
        self.spawn(move |service| {
            JobMessage::CaseLookup(service.search_case_by_details(&query, &details))
        });
    }

    /// Drain all finished jobs without blocking
    pub fn poll(&self) -> Vec<JobMessage> {
        self.receiver.try_iter().collect()
    }
}
