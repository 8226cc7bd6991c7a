//! Worker records as returned by `hr/v2/workers`.
//!
//! The structs mirror the JSON shape of the API one to one. Enumerated values
//! are [`CodeValue`] records and dates are [`WorkerDate`]s; both are checked
//! while decoding, so a response that deviates from this shape fails to
//! decode instead of producing a half-filled record.

use serde::{Deserialize, Deserializer, Serialize};

use crate::codes::CodeValue;
use crate::date::{self, WorkerDate};

/// Status code value marking an active worker.
pub const ACTIVE_STATUS: &str = "Active";

/// Decodes an explicit `null` the same as a missing member.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Response envelope shared by the list and single-worker endpoints.
///
/// A missing `workers` member decodes as an empty page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkerPage {
    /// Workers in server order.
    #[serde(default)]
    pub workers: Vec<Worker>,
}

impl WorkerPage {
    /// An empty page marks the end of a listing.
    pub const fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Number of workers on this page.
    pub const fn len(&self) -> usize {
        self.workers.len()
    }
}

impl IntoIterator for WorkerPage {
    type Item = Worker;
    type IntoIter = std::vec::IntoIter<Worker>;

    fn into_iter(self) -> Self::IntoIter {
        self.workers.into_iter()
    }
}

/// A worker and everything the API reports about them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    /// Stable unique identifier of the worker.
    #[serde(rename = "associateOID")]
    pub associate_oid: String,
    /// Customer-facing worker ID.
    #[serde(rename = "workerID", default)]
    pub worker_id: WorkerId,
    /// Demographic and contact details.
    #[serde(default)]
    pub person: PersonInformation,
    /// Employment milestone dates.
    #[serde(default)]
    pub worker_dates: WorkerDates,
    /// Current worker status.
    #[serde(default)]
    pub worker_status: WorkerStatus,
    /// Work email addresses.
    #[serde(default)]
    pub business_communication: Communication,
    /// Job and position records.
    #[serde(default)]
    pub work_assignments: Vec<WorkAssignment>,
}

impl Worker {
    /// The associate OID.
    pub fn associate_oid(&self) -> &str {
        &self.associate_oid
    }

    /// Legal given name.
    pub fn first_name(&self) -> &str {
        &self.person.legal_name.given_name
    }

    /// Legal middle name.
    pub fn middle_name(&self) -> &str {
        &self.person.legal_name.middle_name
    }

    /// Legal family name.
    pub fn last_name(&self) -> &str {
        &self.person.legal_name.family_name
    }

    /// Formatted full name, falling back to `given family` when the API did
    /// not send one.
    pub fn full_name(&self) -> String {
        let name = &self.person.legal_name;
        if !name.formatted_name.is_empty() {
            return name.formatted_name.clone();
        }
        [name.given_name.as_str(), name.family_name.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Date of birth.
    pub const fn birth_date(&self) -> Option<&WorkerDate> {
        self.person.birth_date.as_ref()
    }

    /// Gender label, long form preferred.
    pub fn gender(&self) -> Option<&str> {
        self.person.gender_code.label()
    }

    /// Ethnicity label, long form preferred.
    pub fn ethnicity(&self) -> Option<&str> {
        self.person.ethnicity_code.label()
    }

    /// Whether the worker is flagged as disabled.
    pub const fn is_disabled(&self) -> bool {
        self.person.disabled_indicator
    }

    /// Government issued identifiers.
    pub fn government_ids(&self) -> &[GovernmentId] {
        &self.person.government_ids
    }

    /// Legal home address.
    pub const fn address(&self) -> &Address {
        &self.person.legal_address
    }

    /// Original hire date.
    pub const fn original_hire_date(&self) -> Option<&WorkerDate> {
        self.worker_dates.original_hire_date.as_ref()
    }

    /// Job title of the primary assignment, if there is one.
    pub fn job_title(&self) -> Option<&str> {
        self.primary_work_assignment().map(WorkAssignment::job_title)
    }

    /// All work assignments in API order.
    pub fn work_assignments(&self) -> &[WorkAssignment] {
        &self.work_assignments
    }

    /// The first assignment flagged primary. `None` when no assignment is.
    pub fn primary_work_assignment(&self) -> Option<&WorkAssignment> {
        self.work_assignments.iter().find(|a| a.primary_indicator)
    }

    /// `true` when the worker status code is exactly `Active`.
    pub fn is_active(&self) -> bool {
        self.worker_status.status_code.is(ACTIVE_STATUS)
    }

    /// Business email addresses.
    pub fn business_emails(&self) -> Vec<&str> {
        self.business_communication.email_addresses()
    }

    /// Personal email addresses.
    pub fn personal_emails(&self) -> Vec<&str> {
        self.person.communication.email_addresses()
    }
}

/// Worker identifier with an optional scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerId {
    /// Identifier value.
    #[serde(deserialize_with = "null_as_default")]
    pub id_value: String,
    /// Identifier scheme, when the API sends one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_code: Option<CodeValue>,
}

/// Personal details of a worker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonInformation {
    /// Date of birth.
    #[serde(with = "date::optional")]
    pub birth_date: Option<WorkerDate>,
    /// Gender.
    pub gender_code: CodeValue,
    /// Marital status.
    #[serde(alias = "maritalStatus")]
    pub marital_status_code: MaritalStatus,
    /// Social insurance enrolments.
    pub social_insurance_programs: Vec<SocialInsuranceProgram>,
    /// Tobacco use flag.
    #[serde(alias = "tobacooUserIndicator")]
    #[serde(deserialize_with = "null_as_default")]
    pub tobacco_user_indicator: bool,
    /// Disability flag.
    #[serde(deserialize_with = "null_as_default")]
    pub disabled_indicator: bool,
    /// Ethnicity.
    pub ethnicity_code: CodeValue,
    /// Military status.
    pub military_status_code: CodeValue,
    /// Military discharge date.
    #[serde(with = "date::optional")]
    pub military_discharge_date: Option<WorkerDate>,
    /// Military classifications.
    pub military_classification_codes: Vec<CodeValue>,
    /// Government issued identifiers.
    #[serde(rename = "governmentIDs")]
    pub government_ids: Vec<GovernmentId>,
    /// Legal name.
    pub legal_name: LegalName,
    /// Legal home address.
    pub legal_address: Address,
    /// Personal email addresses.
    pub communication: Communication,
}

/// Marital status with the date it took effect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaritalStatus {
    /// The status code itself.
    #[serde(flatten)]
    pub code: CodeValue,
    /// When the status took effect.
    #[serde(default, with = "date::optional")]
    pub effective_date: Option<WorkerDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SocialInsuranceProgram {
    pub name_code: CodeValue,
    #[serde(deserialize_with = "null_as_default")]
    pub covered_indicator: bool,
}

/// A government issued identifier such as an SSN.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GovernmentId {
    /// API item identifier.
    #[serde(rename = "itemID")]
    #[serde(deserialize_with = "null_as_default")]
    pub item_id: String,
    /// Identifier value, usually masked by the API.
    #[serde(deserialize_with = "null_as_default")]
    pub id_value: String,
    /// Kind of identifier.
    pub name_code: CodeValue,
    /// Issuing country.
    #[serde(deserialize_with = "null_as_default")]
    pub country_code: String,
}

/// Legal name parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalName {
    /// Suffix such as `Jr.`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_affix_code: Option<CodeValue>,
    /// Qualification such as `PhD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualification_affix_code: Option<CodeValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub given_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub middle_name: String,
    #[serde(rename = "familyName1")]
    #[serde(deserialize_with = "null_as_default")]
    pub family_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub formatted_name: String,
}

/// Postal address, used both for homes and work locations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_code: Option<CodeValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub line_one: String,
    #[serde(deserialize_with = "null_as_default")]
    pub line_two: String,
    #[serde(deserialize_with = "null_as_default")]
    pub line_three: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city_name: String,
    /// State or province.
    #[serde(alias = "countrySubdivision1", skip_serializing_if = "Option::is_none")]
    pub country_subdivision_level1: Option<CodeValue>,
    /// County or district.
    #[serde(alias = "countrySubdivision2", skip_serializing_if = "Option::is_none")]
    pub country_subdivision_level2: Option<CodeValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub country_code: String,
    #[serde(deserialize_with = "null_as_default")]
    pub postal_code: String,
}

/// Communication channels of a worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Communication {
    /// Email channels.
    pub emails: Vec<Email>,
}

impl Communication {
    /// Flattens the email channels to their addresses.
    pub fn email_addresses(&self) -> Vec<&str> {
        self.emails.iter().map(|e| e.email_uri.as_str()).collect()
    }
}

/// One email channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Email {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_code: Option<CodeValue>,
    /// The address itself.
    #[serde(deserialize_with = "null_as_default")]
    pub email_uri: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerDates {
    #[serde(with = "date::optional")]
    pub original_hire_date: Option<WorkerDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkerStatus {
    pub status_code: CodeValue,
}

/// A job or position held by the worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkAssignment {
    /// API item identifier.
    #[serde(rename = "itemID")]
    #[serde(deserialize_with = "null_as_default")]
    pub item_id: String,
    /// Marks the worker's primary assignment.
    #[serde(deserialize_with = "null_as_default")]
    pub primary_indicator: bool,
    /// Hire date for this assignment.
    #[serde(with = "date::optional")]
    pub hire_date: Option<WorkerDate>,
    /// Date the worker actually started.
    #[serde(with = "date::optional")]
    pub actual_start_date: Option<WorkerDate>,
    pub assignment_status: AssignmentStatus,
    pub job_code: CodeValue,
    #[serde(deserialize_with = "null_as_default")]
    pub job_title: String,
    pub occupational_classifications: Vec<Classification>,
    pub industry_classifications: Vec<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wage_law_coverage: Option<WageLawCoverage>,
    #[serde(rename = "positionID")]
    #[serde(deserialize_with = "null_as_default")]
    pub position_id: String,
    /// Where the work is performed.
    #[serde(alias = "assignedWorkLocation")]
    pub assigned_work_locations: Vec<AssignedWorkLocation>,
    /// Managers this assignment reports to.
    pub reports_to: Vec<ReportsTo>,
}

impl WorkAssignment {
    /// The job title.
    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    /// Whether this is the primary assignment.
    pub const fn is_primary(&self) -> bool {
        self.primary_indicator
    }

    /// Hire date for this assignment.
    pub const fn hire_date(&self) -> Option<&WorkerDate> {
        self.hire_date.as_ref()
    }

    /// Actual start date for this assignment.
    pub const fn actual_start_date(&self) -> Option<&WorkerDate> {
        self.actual_start_date.as_ref()
    }

    /// Associate OIDs of everyone this assignment reports to, in API order.
    pub fn reports_to_associate_oids(&self) -> Vec<&str> {
        self.reports_to
            .iter()
            .map(|r| r.associate_oid.as_str())
            .collect()
    }
}

/// Status of an assignment, with the reason and effective date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentStatus {
    pub status_code: CodeValue,
    pub reason_code: CodeValue,
    #[serde(with = "date::optional")]
    pub effective_date: Option<WorkerDate>,
}

/// Occupational or industry classification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Classification {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_code: Option<CodeValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification_code: Option<CodeValue>,
}

/// Wage law (e.g. FLSA) coverage of an assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WageLawCoverage {
    pub wage_law_name_code: CodeValue,
    pub coverage_code: CodeValue,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignedWorkLocation {
    pub address: Address,
}

/// Reference from an assignment to a manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportsTo {
    #[serde(rename = "positionID")]
    #[serde(deserialize_with = "null_as_default")]
    pub position_id: String,
    /// The manager's associate OID.
    #[serde(rename = "associateOID")]
    #[serde(deserialize_with = "null_as_default")]
    pub associate_oid: String,
    #[serde(rename = "workerID")]
    pub worker_id: WorkerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_to_worker_name: Option<ReportsToWorkerName>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportsToWorkerName {
    #[serde(deserialize_with = "null_as_default")]
    pub formatted_name: String,
}
