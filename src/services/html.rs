//! Extraction of data from eCourts HTML fragments
//!
//! The portal answers with loose HTML snippets (`<option>` lists, a single
//! result table), so a handful of regexes is enough to pull values out.

use crate::model::date::API_FORMAT;
use crate::model::{CaseEntry, CaseLookup, CauseList, Location};
use chrono::{Days, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static OPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<option\b([^>]*)>(.*?)</option>").unwrap());

static VALUE_ATTR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\bvalue\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>]+))"#).unwrap());

static TABLE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b[^>]*>(.*?)</table>").unwrap());

static ROW_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").unwrap());

static CELL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td>").unwrap());

static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static NUMERIC_ENTITY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d+);|&#[xX]([0-9a-fA-F]+);").unwrap());

/// Character for a numeric reference; unknown code points stay as written
fn decode_numeric_entities(text: &str) -> String {
    NUMERIC_ENTITY_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(dec), _) => dec.as_str().parse::<u32>().ok(),
                (None, Some(hex)) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, None) => None,
            };
            code.and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Plain text of an HTML fragment
pub fn text_content(fragment: &str) -> String {
    let stripped = TAG_REGEX.replace_all(fragment, " ");
    // &amp; goes last so "&amp;lt;" stays literal
    let decoded = decode_numeric_entities(&stripped)
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&");
    WHITESPACE_REGEX.replace_all(decoded.trim(), " ").to_string()
}

/// All `<option>` entries, skipping placeholders (empty or `0` values)
pub fn parse_options(html: &str) -> Vec<Location> {
    OPTION_REGEX
        .captures_iter(html)
        .filter_map(|caps| {
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            let value = VALUE_ATTR_REGEX.captures(attrs).and_then(|v| {
                v.get(1)
                    .or_else(|| v.get(2))
                    .or_else(|| v.get(3))
                    .map(|m| m.as_str().trim().to_string())
            })?;
            if value.is_empty() || value == "0" {
                return None;
            }
            let name = text_content(caps.get(2).map_or("", |m| m.as_str()));
            Some(Location { code: value, name })
        })
        .collect()
}

/// Options inside the `<select>` whose id or name is `key`
pub fn parse_select_options(html: &str, key: &str) -> Vec<Location> {
    let pattern = format!(
        r#"(?is)<select\b[^>]*\b(?:id|name)\s*=\s*["']{}["'][^>]*>(.*?)</select>"#,
        regex::escape(key)
    );
    let Ok(select_regex) = Regex::new(&pattern) else {
        return Vec::new();
    };
    select_regex
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|body| parse_options(body.as_str()))
        .unwrap_or_default()
}

fn row_cells(row: &str) -> Vec<String> {
    CELL_REGEX
        .captures_iter(row)
        .map(|c| text_content(c.get(1).map_or("", |m| m.as_str())))
        .collect()
}

/// Cases from the first table in a cause list response
///
/// The first row is the header. Rows with fewer than four cells are
/// section captions and are skipped.
///
/// The table body ends at the first `</table>`, so a table nested inside
/// the list cuts it short.
pub fn parse_cause_list(html: &str) -> CauseList {
    let Some(table) = TABLE_REGEX.captures(html).and_then(|c| c.get(1)) else {
        return CauseList::default();
    };

    let cases = ROW_REGEX
        .captures_iter(table.as_str())
        .skip(1)
        .filter_map(|row| {
            let cells = row_cells(row.get(1).map_or("", |m| m.as_str()));
            if cells.len() < 4 {
                return None;
            }
            Some(CaseEntry {
                serial_number: cells[0].clone(),
                case_number: cells[1].clone(),
                parties: cells[2].clone(),
                advocate: cells[3].clone(),
                purpose: cells.get(4).cloned().unwrap_or_default(),
            })
        })
        .collect();

    CauseList::from_cases(cases)
}

/// Interpret a case status page as label/value rows
pub fn parse_case_result(html: &str, case_id: &str, today: NaiveDate) -> CaseLookup {
    let mut result = CaseLookup::new(case_id);
    let tomorrow = today.checked_add_days(Days::new(1));

    for row in ROW_REGEX.captures_iter(html) {
        let cells = row_cells(row.get(1).map_or("", |m| m.as_str()));
        if cells.len() < 2 {
            continue;
        }
        let label = cells[0].to_lowercase();
        let value = cells[1].clone();

        if label.contains("hearing date") || label.contains("next date") {
            result.next_hearing_date = Some(value.clone());
            if let Ok(hearing) = NaiveDate::parse_from_str(&value, API_FORMAT) {
                if hearing == today {
                    result.listed_today = true;
                    result.found = true;
                } else if Some(hearing) == tomorrow {
                    result.listed_tomorrow = true;
                    result.found = true;
                }
            }
        }
        if label.contains("court") {
            result.court_name = Some(value.clone());
        }
        if label.contains("serial") || label.contains("sr.") {
            result.serial_number = Some(value.clone());
        }
        if label.contains("status") {
            result.case_status = Some(value.clone());
        }

        result.details.push((label, value));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_strips_tags_and_entities() {
        assert_eq!(
            text_content("  <b>Ram &amp; Co.</b>\n  <br/>vs&nbsp;State "),
            "Ram & Co. vs State"
        );
    }

    #[test]
    fn test_text_content_decodes_numeric_references() {
        assert_eq!(
            text_content("D&#039;Souza vs State &#8211; Kolkata"),
            "D'Souza vs State \u{2013} Kolkata"
        );
        assert_eq!(text_content("R. O&#x27;Brien &#X41;"), "R. O'Brien A");
        assert_eq!(text_content("&#1114112; &amp;#39;"), "&#1114112; &#39;");
    }

    #[test]
    fn test_parse_cause_list_decodes_party_names() {
        let html = r#"<table>
            <tr><th>Sr</th><th>Case</th><th>Parties</th><th>Advocate</th></tr>
            <tr><td>1</td><td>CS/1/2024</td><td>D&#039;Souza vs State &#8211; Kolkata</td><td>R. O&#x27;Brien</td></tr>
        </table>"#;
        let list = parse_cause_list(html);
        assert_eq!(list.cases[0].parties, "D'Souza vs State \u{2013} Kolkata");
        assert_eq!(list.cases[0].advocate, "R. O'Brien");
    }

    #[test]
    fn test_parse_options_skips_placeholders() {
        let html = r#"
            <option value="0">Select District</option>
            <option value="">--</option>
            <option value="12">Kolkata</option>
            <option value='13' selected>Howrah </option>
        "#;
        let options = parse_options(html);
        assert_eq!(
            options,
            vec![Location::new("12", "Kolkata"), Location::new("13", "Howrah")]
        );
    }

    #[test]
    fn test_parse_select_options_by_id_or_name() {
        let html = r#"
            <select id="lang"><option value="en">English</option></select>
            <select class="form" name="state_code">
                <option value="0">Select State</option>
                <option value="7">West Bengal</option>
            </select>
        "#;
        assert_eq!(
            parse_select_options(html, "state_code"),
            vec![Location::new("7", "West Bengal")]
        );
        assert!(parse_select_options(html, "missing").is_empty());
    }

    #[test]
    fn test_parse_cause_list_rows() {
        let html = r#"
            <div>Cause list for 07-03-2024</div>
            <table class="table">
              <tr><th>Sr No</th><th>Case</th><th>Party</th><th>Advocate</th><th>Purpose</th></tr>
              <tr><td>1</td><td>CS/12/2024</td><td>A <br>vs B</td><td>C. Das</td><td>Hearing</td></tr>
              <tr><td colspan="5">Miscellaneous</td></tr>
              <tr><td>2</td><td>CR/4/2023</td><td>State vs D</td><td>E. Roy</td></tr>
            </table>
        "#;
        let list = parse_cause_list(html);

        assert_eq!(list.total_cases, 2);
        assert_eq!(list.cases[0].parties, "A vs B");
        assert_eq!(list.cases[0].purpose, "Hearing");
        assert_eq!(list.cases[1].case_number, "CR/4/2023");
        assert_eq!(list.cases[1].purpose, "");
    }

    #[test]
    fn test_parse_cause_list_stops_at_first_table_end() {
        let html = r#"<table>
            <tr><th>Sr</th><th>Case</th><th>Parties</th><th>Advocate</th></tr>
            <tr><td>1</td><td>CS/1/2024</td><td>A vs B</td><td>C</td></tr>
            <tr><td colspan="4"><table><tr><td>note</td></tr></table></td></tr>
            <tr><td>2</td><td>CS/2/2024</td><td>D vs E</td><td>F</td></tr>
        </table>"#;
        let list = parse_cause_list(html);
        assert_eq!(list.total_cases, 1);
        assert_eq!(list.cases[0].case_number, "CS/1/2024");
    }

    #[test]
    fn test_parse_cause_list_without_table() {
        let list = parse_cause_list("<p>No cases listed</p>");
        assert_eq!(list.total_cases, 0);
        assert!(list.cases.is_empty());
    }

    #[test]
    fn test_parse_case_result_flags_tomorrow() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let html = r#"
            <table>
              <tr><td>Case Status</td><td>Pending</td></tr>
              <tr><td>Next Hearing Date</td><td>08-03-2024</td></tr>
              <tr><td>Court Number and Judge</td><td>Court 4</td></tr>
              <tr><td>Sr. No</td><td>17</td></tr>
            </table>
        "#;
        let result = parse_case_result(html, "WBKO010012342024", today);

        assert!(result.found);
        assert!(result.listed_tomorrow);
        assert!(!result.listed_today);
        assert_eq!(result.next_hearing_date.as_deref(), Some("08-03-2024"));
        assert_eq!(result.case_status.as_deref(), Some("Pending"));
        assert_eq!(result.court_name.as_deref(), Some("Court 4"));
        assert_eq!(result.serial_number.as_deref(), Some("17"));
        assert_eq!(result.details.len(), 4);
        assert_eq!(result.details[0].0, "case status");
    }

    #[test]
    fn test_parse_case_result_unparseable_date() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let html = "<tr><td>Next Date</td><td>Not fixed</td></tr>";
        let result = parse_case_result(html, "X", today);

        assert!(!result.found);
        assert_eq!(result.next_hearing_date.as_deref(), Some("Not fixed"));
    }
}
