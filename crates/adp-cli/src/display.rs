//! Display utilities for CLI output formatting
//!
//! Provides one-line summaries, detail views and JSON lines for workers

use anyhow::Result;
use colored::Colorize;

use adp_common::Worker;

const NO_TITLE: &str = "-";

/// One line per worker: associate OID, name, primary job title, status.
pub fn summary_line(worker: &Worker) -> String {
    let status = if worker.is_active() {
        "active".green()
    } else {
        "inactive".dimmed()
    };

    format!(
        "{}  {}  {}  {}",
        worker.associate_oid().bold(),
        worker.full_name(),
        worker.job_title().unwrap_or(NO_TITLE).cyan(),
        status
    )
}

/// Compact JSON for one worker, suitable for line-oriented tools.
///
/// # Errors
///
/// Returns an error if the worker cannot be serialized.
pub fn json_line(worker: &Worker) -> Result<String> {
    Ok(serde_json::to_string(worker)?)
}

/// Print either a summary line or a JSON line.
///
/// # Errors
///
/// Returns an error if JSON output was requested and serialization fails.
pub fn print_worker_line(worker: &Worker, json: bool) -> Result<()> {
    if json {
        println!("{}", json_line(worker)?);
    } else {
        println!("{}", summary_line(worker));
    }
    Ok(())
}

/// Labeled fields for the single-worker view.
pub fn detail_fields(worker: &Worker) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("Associate OID", worker.associate_oid().to_string()),
        ("Name", worker.full_name()),
        (
            "Job title",
            worker.job_title().unwrap_or(NO_TITLE).to_string(),
        ),
        (
            "Status",
            if worker.is_active() { "Active" } else { "Inactive" }.to_string(),
        ),
    ];

    if let Some(date) = worker.original_hire_date() {
        fields.push(("Hired", date.to_string()));
    }
    if let Some(date) = worker.birth_date() {
        fields.push(("Born", date.to_string()));
    }
    if let Some(gender) = worker.gender() {
        fields.push(("Gender", gender.to_string()));
    }

    let business = worker.business_emails();
    if !business.is_empty() {
        fields.push(("Work email", business.join(", ")));
    }
    let personal = worker.personal_emails();
    if !personal.is_empty() {
        fields.push(("Personal email", personal.join(", ")));
    }

    if let Some(assignment) = worker.primary_work_assignment() {
        let managers = assignment.reports_to_associate_oids();
        if !managers.is_empty() {
            fields.push(("Reports to", managers.join(", ")));
        }
    }

    fields
}

/// Print the single-worker view
pub fn print_worker_detail(worker: &Worker) {
    for (label, value) in detail_fields(worker) {
        println!("{:>15}  {value}", label.bold());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    fn sample_worker() -> Worker {
        serde_json::from_value(serde_json::json!({
            "associateOID": "G3ABC",
            "person": {
                "legalName": { "givenName": "Ada", "familyName1": "Lovelace" },
                "communication": { "emails": [{ "emailUri": "ada@home.example" }] }
            },
            "workerDates": { "originalHireDate": "2019-04-01" },
            "workerStatus": { "statusCode": { "codeValue": "Active" } },
            "businessCommunication": { "emails": [{ "emailUri": "ada@corp.example" }] },
            "workAssignments": [{
                "primaryIndicator": true,
                "jobTitle": "Engineer",
                "reportsTo": [{ "associateOID": "G3MGR" }]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_line() {
        colored::control::set_override(false);

        let line = summary_line(&sample_worker());
        assert_eq!(line, "G3ABC  Ada Lovelace  Engineer  active");
    }

    #[test]
    fn test_summary_line_without_assignment() {
        colored::control::set_override(false);

        let worker: Worker =
            serde_json::from_value(serde_json::json!({ "associateOID": "X" })).unwrap();
        let line = summary_line(&worker);
        assert!(line.starts_with("X  "));
        assert!(line.ends_with("-  inactive"));
    }

    #[test]
    fn test_json_line_is_single_line() {
        let line = json_line(&sample_worker()).unwrap();
        assert!(!line.contains('\n'));

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["associateOID"], "G3ABC");
    }

    #[test]
    fn test_detail_fields() {
        let fields = detail_fields(&sample_worker());
        let get = |label: &str| {
            fields
                .iter()
                .find(|(l, _)| *l == label)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("Name"), Some("Ada Lovelace"));
        assert_eq!(get("Status"), Some("Active"));
        assert_eq!(get("Hired"), Some("2019-04-01"));
        assert_eq!(get("Work email"), Some("ada@corp.example"));
        assert_eq!(get("Personal email"), Some("ada@home.example"));
        assert_eq!(get("Reports to"), Some("G3MGR"));
        assert_eq!(get("Born"), None);
    }
}
