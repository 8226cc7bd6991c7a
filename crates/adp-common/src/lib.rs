//! # adp-common
//!
//! Shared types for talking to the ADP Workforce Now API.
//!
//! This crate holds everything that does not perform I/O:
//! - Client configuration (`Config`) and the OAuth `Token`
//! - The worker record model with its derived accessors
//! - Structured code values and `YYYY-MM-DD` date handling
//!
//! ## Example
//!
//! ```
//! use adp_common::{Worker, WorkerPage};
//!
//! let page: WorkerPage = serde_json::from_str(r#"{
//!     "workers": [{
//!         "associateOID": "G3ABC",
//!         "person": { "legalName": { "givenName": "Ada", "familyName1": "Lovelace" } },
//!         "workerStatus": { "statusCode": { "codeValue": "Active" } },
//!         "workAssignments": [
//!             { "itemID": "a", "primaryIndicator": false, "jobTitle": "Analyst" },
//!             { "itemID": "b", "primaryIndicator": true, "jobTitle": "Engineer" }
//!         ]
//!     }]
//! }"#).unwrap();
//!
//! let worker: &Worker = &page.workers[0];
//! assert_eq!(worker.first_name(), "Ada");
//! assert!(worker.is_active());
//! assert_eq!(worker.job_title(), Some("Engineer"));
//! ```

/// Structured `{codeValue, shortName, longName}` records.
pub mod codes;
/// Client configuration shared by the library and the CLI.
pub mod config;
/// `YYYY-MM-DD` date strings split into components.
pub mod date;
/// OAuth access token returned by the token endpoint.
pub mod token;
/// Worker records and their accessors.
pub mod worker;

pub use codes::CodeValue;
pub use config::{Config, ConfigError, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE, DEFAULT_TOKEN_URL};
pub use date::{DateError, WorkerDate};
pub use token::Token;
pub use worker::{
    ACTIVE_STATUS, Address, AssignedWorkLocation, AssignmentStatus, Classification,
    Communication, Email, GovernmentId, LegalName, MaritalStatus, PersonInformation, ReportsTo,
    ReportsToWorkerName, SocialInsuranceProgram, WageLawCoverage, WorkAssignment, Worker,
    WorkerDates, WorkerId, WorkerPage, WorkerStatus,
};
