//! eCourts portal client
//!
//! Wraps the AJAX endpoints of the eCourts services site behind the
//! `CourtService` trait so the UI can be driven by a fake in tests.

use super::html::{parse_case_result, parse_cause_list, parse_options, parse_select_options};
use crate::config::Config;
use crate::error::ServiceError;
use crate::model::location::default_states;
use crate::model::{CaseDetails, CaseLookup, CauseList, CourtQuery, Location};
use chrono::Local;
use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Url;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://services.ecourts.gov.in/ecourtindia_v6";

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const PDF_ENDPOINT: &str = "ajax/download_cause_list_pdf.php";

/// Everything the application asks of the court data source
pub trait CourtService: Send + Sync {
    /// States with a built-in fallback; never fails
    fn fetch_states(&self) -> Vec<Location>;

    fn fetch_districts(&self, state: &str) -> Result<Vec<Location>, ServiceError>;

    fn fetch_court_complexes(
        &self,
        state: &str,
        district: &str,
    ) -> Result<Vec<Location>, ServiceError>;

    fn fetch_courts(
        &self,
        state: &str,
        district: &str,
        complex: &str,
    ) -> Result<Vec<Location>, ServiceError>;

    /// `date` is `DD-MM-YYYY`
    fn fetch_cause_list(&self, query: &CourtQuery, date: &str) -> Result<CauseList, ServiceError>;

    /// URL of the printable list; no network access
    fn build_pdf_url(&self, query: &CourtQuery, date: &str) -> String;

    /// Save the printable list into `dir`
    ///
    /// `Ok(None)` means the portal answered without a PDF.
    fn download_pdf(
        &self,
        query: &CourtQuery,
        date: &str,
        dir: &Path,
    ) -> Result<Option<PathBuf>, ServiceError>;

    fn search_case_by_cnr(
        &self,
        cnr: &str,
        state: Option<&str>,
        district: Option<&str>,
    ) -> Result<CaseLookup, ServiceError>;

    /// Search the selected court's register by case type, number and year
    fn search_case_by_details(
        &self,
        query: &CourtQuery,
        details: &CaseDetails,
    ) -> Result<CaseLookup, ServiceError>;
}

/// Form fields shared by the cause list and PDF endpoints
fn cause_list_params(query: &CourtQuery, date: &str) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("state_code", query.state_code.clone()),
        ("dist_code", query.district_code.clone()),
        ("court_complex_code", query.court_complex_code.clone()),
        ("date", date.to_string()),
    ];
    if let Some(court) = query.court_code.as_deref().filter(|c| !c.is_empty()) {
        params.push(("court_code", court.to_string()));
    }
    params
}

/// Form fields for a details search; the court falls back to the complex
fn case_details_params(query: &CourtQuery, details: &CaseDetails) -> Vec<(&'static str, String)> {
    let court = query
        .court_code
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(&query.court_complex_code);
    vec![
        ("state_code", query.state_code.clone()),
        ("dist_code", query.district_code.clone()),
        ("court_code", court.to_string()),
        ("case_type", details.case_type.clone()),
        ("case_no", details.case_number.clone()),
        ("case_year", details.case_year.clone()),
    ]
}

/// File name the portal's PDF is stored under
pub fn pdf_file_name(query: &CourtQuery, date: &str) -> String {
    format!(
        "cause_list_{}_{}_{}_{}.pdf",
        query.state_code,
        query.district_code,
        query.court_complex_code,
        date.replace('-', "")
    )
}

/// HTTP client for the eCourts services site
pub struct ECourtsClient {
    client: Client,
    base_url: Url,
}

impl ECourtsClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/json, text/javascript, */*; q=0.01"),
        );
        headers.insert(
            header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("en-US,en;q=0.9"),
        );
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|e| ServiceError::Upstream(format!("Invalid endpoint {}: {}", path, e)))
    }

    fn post_form(&self, path: &str, params: &[(&str, String)]) -> Result<String, ServiceError> {
        let url = self.endpoint(path)?;
        debug!(url = %url, "POST");
        let body = self
            .client
            .post(url)
            .form(params)
            .send()?
            .error_for_status()?
            .text()?;
        Ok(body)
    }

    fn fetch_option_list(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<Location>, ServiceError> {
        let html = self.post_form(path, params)?;
        let options = parse_options(&html);
        debug!(endpoint = path, count = options.len(), "Parsed options");
        Ok(options)
    }
}

/// Base URL with a trailing slash so relative joins keep the last segment
fn parse_base_url(base: &str) -> anyhow::Result<Url> {
    let normalized = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{}/", base)
    };
    Url::parse(&normalized).map_err(|e| anyhow::anyhow!("Invalid base URL '{}': {}", base, e))
}

impl CourtService for ECourtsClient {
    fn fetch_states(&self) -> Vec<Location> {
        let fetched = self.endpoint("?p=cause_list/").and_then(|url| {
            let html = self.client.get(url).send()?.error_for_status()?.text()?;
            Ok(parse_select_options(&html, "state_code"))
        });

        match fetched {
            Ok(states) if !states.is_empty() => {
                info!(count = states.len(), "Loaded states from portal");
                states
            }
            Ok(_) => {
                warn!("Portal returned no states, using built-in list");
                default_states()
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch states, using built-in list");
                default_states()
            }
        }
    }

    fn fetch_districts(&self, state: &str) -> Result<Vec<Location>, ServiceError> {
        self.fetch_option_list("ajax/get_district.php", &[("state_code", state.to_string())])
    }

    fn fetch_court_complexes(
        &self,
        state: &str,
        district: &str,
    ) -> Result<Vec<Location>, ServiceError> {
        self.fetch_option_list(
            "ajax/get_court_complex.php",
            &[
                ("state_code", state.to_string()),
                ("dist_code", district.to_string()),
            ],
        )
    }

    fn fetch_courts(
        &self,
        state: &str,
        district: &str,
        complex: &str,
    ) -> Result<Vec<Location>, ServiceError> {
        self.fetch_option_list(
            "ajax/get_court.php",
            &[
                ("state_code", state.to_string()),
                ("dist_code", district.to_string()),
                ("court_complex_code", complex.to_string()),
            ],
        )
    }

    fn fetch_cause_list(&self, query: &CourtQuery, date: &str) -> Result<CauseList, ServiceError> {
        let html = self.post_form("ajax/get_cause_list.php", &cause_list_params(query, date))?;
        let list = parse_cause_list(&html);
        info!(
            state = %query.state_code,
            district = %query.district_code,
            complex = %query.court_complex_code,
            date,
            total = list.total_cases,
            fetched_at = %Local::now().to_rfc3339(),
            "Parsed cause list"
        );
        Ok(list)
    }

    fn build_pdf_url(&self, query: &CourtQuery, date: &str) -> String {
        let mut url = self.base_url.clone();
        url.set_path(&format!("{}{}", self.base_url.path(), PDF_ENDPOINT));
        url.set_query(None);
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in cause_list_params(query, date) {
                pairs.append_pair(key, &value);
            }
        }
        url.to_string()
    }

    fn download_pdf(
        &self,
        query: &CourtQuery,
        date: &str,
        dir: &Path,
    ) -> Result<Option<PathBuf>, ServiceError> {
        let url = self.endpoint(PDF_ENDPOINT)?;
        let response = self
            .client
            .post(url)
            .form(&cause_list_params(query, date))
            .send()?;

        let is_pdf = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/pdf"));

        if !response.status().is_success() || !is_pdf {
            warn!(status = %response.status(), is_pdf, "Portal did not return a PDF");
            return Ok(None);
        }

        let bytes = response.bytes()?;
        fs::create_dir_all(dir)?;
        let path = dir.join(pdf_file_name(query, date));
        fs::write(&path, &bytes)?;
        info!(path = %path.display(), size = bytes.len(), "Saved cause list PDF");
        Ok(Some(path))
    }

    fn search_case_by_cnr(
        &self,
        cnr: &str,
        state: Option<&str>,
        district: Option<&str>,
    ) -> Result<CaseLookup, ServiceError> {
        let mut params = vec![("cnr", cnr.to_string())];
        if let Some(state) = state {
            params.push(("state_code", state.to_string()));
        }
        if let Some(district) = district {
            params.push(("dist_code", district.to_string()));
        }

        let html = self.post_form("ajax/search_case_cnr.php", &params)?;
        Ok(parse_case_result(&html, cnr, Local::now().date_naive()))
    }

    fn search_case_by_details(
        &self,
        query: &CourtQuery,
        details: &CaseDetails,
    ) -> Result<CaseLookup, ServiceError> {
        let html = self.post_form(
            "ajax/search_case_details.php",
            &case_details_params(query, details),
        )?;
        let case_id = details.case_id();
        info!(%case_id, "Searched case by details");
        Ok(parse_case_result(&html, &case_id, Local::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::{self, JoinHandle};
    use tempfile::TempDir;

    fn http_response(status: &str, content_type: &str, body: &[u8]) -> Vec<u8> {
        let mut response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status,
            content_type,
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);
        response
    }

    /// Answer one request with `response`; the join handle yields the request
    fn serve_once(response: Vec<u8>) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}/ecourtindia_v6", listener.local_addr().unwrap());
        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);
            let mut request = String::new();
            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
                request.push_str(&line);
                if line == "\r\n" || line.is_empty() {
                    break;
                }
            }
            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();
            request.push_str(&String::from_utf8_lossy(&body));

            let mut stream = reader.into_inner();
            stream.write_all(&response).unwrap();
            stream.flush().unwrap();
            request
        });
        (base_url, handle)
    }

    fn details() -> CaseDetails {
        CaseDetails {
            case_type: "CS".to_string(),
            case_number: "12".to_string(),
            case_year: "2024".to_string(),
        }
    }

    fn client(base_url: &str) -> ECourtsClient {
        let config = Config {
            base_url: base_url.to_string(),
            ..Config::default()
        };
        ECourtsClient::new(&config).unwrap()
    }

    fn query(court: Option<&str>) -> CourtQuery {
        CourtQuery {
            state_code: "7".to_string(),
            district_code: "12".to_string(),
            court_complex_code: "1070012".to_string(),
            court_code: court.map(str::to_string),
        }
    }

    #[test]
    fn test_build_pdf_url_contains_formatted_date() {
        let url = client(DEFAULT_BASE_URL).build_pdf_url(&query(None), "07-03-2024");
        assert_eq!(
            url,
            "https://services.ecourts.gov.in/ecourtindia_v6/ajax/download_cause_list_pdf.php\
             ?state_code=7&dist_code=12&court_complex_code=1070012&date=07-03-2024"
        );
    }

    #[test]
    fn test_build_pdf_url_includes_court_when_present() {
        let url = client("http://localhost:8080/base/").build_pdf_url(&query(Some("3")), "01-01-2025");
        assert!(url.starts_with("http://localhost:8080/base/ajax/download_cause_list_pdf.php?"));
        assert!(url.ends_with("&court_code=3"));
    }

    #[test]
    fn test_cause_list_params_skip_empty_court() {
        let params = cause_list_params(&query(Some("")), "07-03-2024");
        assert_eq!(params.len(), 4);
        assert!(params.iter().all(|(k, _)| *k != "court_code"));
    }

    #[test]
    fn test_pdf_file_name() {
        assert_eq!(
            pdf_file_name(&query(None), "07-03-2024"),
            "cause_list_7_12_1070012_07032024.pdf"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let c = client(DEFAULT_BASE_URL);
        assert_eq!(
            c.endpoint("ajax/get_district.php").unwrap().as_str(),
            "https://services.ecourts.gov.in/ecourtindia_v6/ajax/get_district.php"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(ECourtsClient::new(&config).is_err());
    }

    #[test]
    fn test_download_pdf_saves_pdf_response() {
        let (base_url, server) = serve_once(http_response(
            "200 OK",
            "application/pdf",
            b"%PDF-1.4 cause list",
        ));
        let dir = TempDir::new().unwrap();

        let saved = client(&base_url)
            .download_pdf(&query(None), "07-03-2024", dir.path())
            .unwrap()
            .unwrap();

        assert_eq!(saved, dir.path().join("cause_list_7_12_1070012_07032024.pdf"));
        assert_eq!(fs::read(&saved).unwrap(), b"%PDF-1.4 cause list");
        let request = server.join().unwrap();
        assert!(request.starts_with("POST /ecourtindia_v6/ajax/download_cause_list_pdf.php"));
        assert!(request.contains("date=07-03-2024"));
    }

    #[test]
    fn test_download_pdf_ignores_html_response() {
        let (base_url, server) = serve_once(http_response(
            "200 OK",
            "text/html; charset=UTF-8",
            b"<p>No cause list published</p>",
        ));
        let dir = TempDir::new().unwrap();

        let saved = client(&base_url)
            .download_pdf(&query(None), "07-03-2024", dir.path())
            .unwrap();

        assert!(saved.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        server.join().unwrap();
    }

    #[test]
    fn test_server_error_becomes_status_error() {
        let (base_url, server) =
            serve_once(http_response("503 Service Unavailable", "text/html", b"busy"));

        let err = client(&base_url).fetch_districts("7").unwrap_err();

        assert!(matches!(err, ServiceError::Status(503)), "got {:?}", err);
        assert_eq!(err.to_string(), "eCourts responded with HTTP 503");
        assert!(server.join().unwrap().contains("state_code=7"));
    }

    #[test]
    fn test_fetch_states_falls_back_when_unreachable() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let states = client(&format!("http://127.0.0.1:{}/", port)).fetch_states();
        assert_eq!(states, default_states());
    }

    #[test]
    fn test_fetch_states_reads_portal_select() {
        let page = br#"<select id="sess_state_code" name="state_code">
            <option value="0">Select State</option>
            <option value="16">Odisha</option>
        </select>"#;
        let (base_url, server) = serve_once(http_response("200 OK", "text/html", page));

        let states = client(&base_url).fetch_states();

        assert_eq!(states, vec![Location::new("16", "Odisha")]);
        assert!(server.join().unwrap().starts_with("GET /ecourtindia_v6/?p=cause_list/"));
    }

    #[test]
    fn test_search_case_by_details_posts_register_fields() {
        let page = br#"<table>
            <tr><td>Case Status</td><td>Disposed</td></tr>
            <tr><td>Petitioner</td><td>D&#039;Souza</td></tr>
        </table>"#;
        let (base_url, server) = serve_once(http_response("200 OK", "text/html", page));

        let lookup = client(&base_url)
            .search_case_by_details(&query(None), &details())
            .unwrap();

        assert_eq!(lookup.case_id, "CS/12/2024");
        assert_eq!(lookup.case_status.as_deref(), Some("Disposed"));
        assert_eq!(lookup.details[1], ("petitioner".to_string(), "D'Souza".to_string()));

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /ecourtindia_v6/ajax/search_case_details.php"));
        assert!(request.ends_with(
            "state_code=7&dist_code=12&court_code=1070012&case_type=CS&case_no=12&case_year=2024"
        ));
    }

    #[test]
    fn test_case_details_params_prefer_court() {
        let params = case_details_params(&query(Some("3")), &details());
        assert!(params.contains(&("court_code", "3".to_string())));
    }
}
