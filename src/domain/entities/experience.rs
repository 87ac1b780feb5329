use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::entities::{
    listing::SortDirection,
    option_fields::{OptionField, PatchString, PatchVec},
};

// ───── Records ───────────────────────────────────────────────────────

/// A work experience record as served by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_current_job: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current_job: bool,
    pub location: Option<String>,
    pub company_logo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated, client-controlled content of an experience record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceFields {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub description: String,
    pub achievements: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current_job: bool,
    pub location: Option<String>,
    pub company_logo: Option<String>,
}

// ───── Input & Validation ───────────────────────────────────────────

/// Body of create and update requests. Every key is optional so that the
/// same type carries partial updates; required fields are enforced on the
/// merged draft.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperiencePayload {
    #[serde(default)]
    pub company: PatchString,
    #[serde(default)]
    pub position: PatchString,
    #[serde(default)]
    pub duration: PatchString,
    #[serde(default)]
    pub description: PatchString,
    #[serde(default)]
    pub achievements: PatchVec<String>,
    #[serde(default)]
    pub start_date: PatchString,
    #[serde(default)]
    pub end_date: PatchString,
    #[serde(default)]
    pub is_current_job: OptionField<bool>,
    #[serde(default)]
    pub location: PatchString,
    #[serde(default)]
    pub company_logo: PatchString,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct ExperienceDraft {
    #[validate(
        required(message = "Company is required"),
        length(min = 1, message = "Company cannot be empty")
    )]
    pub company: Option<String>,

    #[validate(
        required(message = "Position is required"),
        length(min = 1, message = "Position cannot be empty")
    )]
    pub position: Option<String>,

    #[validate(
        required(message = "Duration is required"),
        length(min = 1, message = "Duration cannot be empty")
    )]
    pub duration: Option<String>,

    #[validate(
        required(message = "Description is required"),
        length(min = 1, message = "Description cannot be empty")
    )]
    pub description: Option<String>,

    #[validate(custom(function = "validate_achievements"))]
    pub achievements: Vec<String>,

    #[validate(
        required(message = "Start date is required"),
        custom(function = "validate_calendar_date")
    )]
    pub start_date: Option<String>,

    pub end_date: Option<String>,

    pub is_current_job: bool,
    pub location: Option<String>,
    pub company_logo: Option<String>,
}

impl ExperienceDraft {
    /// Merges a (possibly partial) payload over this draft.
    pub fn merge(self, payload: ExperiencePayload) -> Self {
        ExperienceDraft {
            company: payload.company.map_value(trimmed).apply_to(self.company),
            position: payload.position.map_value(trimmed).apply_to(self.position),
            duration: payload.duration.map_value(trimmed).apply_to(self.duration),
            description: payload.description.map_value(trimmed).apply_to(self.description),
            achievements: payload
                .achievements
                .apply_to(Some(self.achievements))
                .unwrap_or_default(),
            start_date: payload.start_date.apply_to(self.start_date),
            end_date: payload.end_date.apply_to(self.end_date),
            is_current_job: payload
                .is_current_job
                .apply_to(Some(self.is_current_job))
                .unwrap_or(false),
            location: non_blank(payload.location.map_value(trimmed).apply_to(self.location)),
            company_logo: non_blank(payload.company_logo.map_value(trimmed).apply_to(self.company_logo)),
        }
    }
}

impl TryFrom<ExperienceDraft> for ExperienceFields {
    type Error = ValidationErrors;

    fn try_from(draft: ExperienceDraft) -> Result<Self, Self::Error> {
        let mut errors = match draft.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        // A current position drops its end date, so only past positions check it
        if !draft.is_current_job {
            match draft.end_date.as_deref() {
                None => errors.add(
                    "end_date",
                    new_validation_error("end_date_required", "End date is required unless this is the current job"),
                ),
                Some(raw) => {
                    if let Err(err) = validate_calendar_date(raw) {
                        errors.add("end_date", err);
                    }
                }
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let start_date = required_date("start_date", draft.start_date.as_deref())?;
        let end_date = if draft.is_current_job {
            None
        } else {
            draft.end_date.as_deref().and_then(parse_calendar_date)
        };

        if let Some(end) = end_date {
            if end < start_date {
                tracing::warn!(
                    %start_date, end_date = %end,
                    "Experience ends before it starts; accepting as submitted"
                );
            }
        }

        Ok(ExperienceFields {
            company: draft.company.unwrap_or_default(),
            position: draft.position.unwrap_or_default(),
            duration: draft.duration.unwrap_or_default(),
            description: draft.description.unwrap_or_default(),
            achievements: draft.achievements,
            start_date,
            end_date,
            is_current_job: draft.is_current_job,
            location: draft.location,
            company_logo: draft.company_logo,
        })
    }
}

impl TryFrom<ExperiencePayload> for ExperienceFields {
    type Error = ValidationErrors;

    fn try_from(payload: ExperiencePayload) -> Result<Self, Self::Error> {
        ExperienceFields::try_from(ExperienceDraft::default().merge(payload))
    }
}

pub fn validate_achievements(achievements: &[String]) -> Result<(), ValidationError> {
    if achievements.iter().any(|a| a.trim().is_empty()) {
        return Err(new_validation_error("empty_achievement", "Achievements cannot contain empty entries"));
    }
    Ok(())
}

pub fn validate_calendar_date(value: &str) -> Result<(), ValidationError> {
    match parse_calendar_date(value) {
        Some(_) => Ok(()),
        None => Err(new_validation_error("invalid_date", "Dates must be YYYY-MM-DD or RFC 3339 timestamps")),
    }
}

/// Accepts a plain calendar date or a full RFC 3339 timestamp.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

fn required_date(field: &'static str, raw: Option<&str>) -> Result<NaiveDate, ValidationErrors> {
    raw.and_then(parse_calendar_date).ok_or_else(|| {
        let mut errors = ValidationErrors::new();
        errors.add(field, new_validation_error("invalid_date", "A valid date is required"));
        errors
    })
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

pub(crate) fn trimmed(value: String) -> String {
    value.trim().to_string()
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ───── Conversions ──────────────────────────────────────────────────

impl From<ExperienceRow> for Experience {
    fn from(row: ExperienceRow) -> Self {
        Experience {
            id: row.id.to_string(),
            company: row.company,
            position: row.position,
            duration: row.duration,
            description: row.description,
            achievements: row.achievements,
            start_date: row.start_date,
            end_date: row.end_date,
            is_current_job: row.is_current_job,
            location: row.location,
            company_logo: row.company_logo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl Experience {
    pub fn from_fields(
        id: String,
        fields: ExperienceFields,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Experience {
            id,
            company: fields.company,
            position: fields.position,
            duration: fields.duration,
            description: fields.description,
            achievements: fields.achievements,
            start_date: fields.start_date,
            end_date: fields.end_date,
            is_current_job: fields.is_current_job,
            location: fields.location,
            company_logo: fields.company_logo,
            created_at,
            updated_at,
        }
    }

    /// The stored record as a draft, ready to have an update merged over it.
    pub fn to_draft(&self) -> ExperienceDraft {
        ExperienceDraft {
            company: Some(self.company.clone()),
            position: Some(self.position.clone()),
            duration: Some(self.duration.clone()),
            description: Some(self.description.clone()),
            achievements: self.achievements.clone(),
            start_date: Some(self.start_date.to_string()),
            end_date: self.end_date.map(|d| d.to_string()),
            is_current_job: self.is_current_job,
            location: self.location.clone(),
            company_logo: self.company_logo.clone(),
        }
    }

    pub fn company_matches(&self, needle: &str) -> bool {
        self.company.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// Orders records by start date, newest first for `SortDirection::Desc`.
pub fn sort_experiences(records: &mut [Experience], order: SortDirection) {
    records.sort_by(|a, b| order.apply(a.start_date.cmp(&b.start_date)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(json: serde_json::Value) -> ExperiencePayload {
        serde_json::from_value(json).expect("payload should deserialize")
    }

    fn valid_json() -> serde_json::Value {
        serde_json::json!({
            "company": "  Baidu Inc. ",
            "position": "AI/ML Intern",
            "duration": "Dec 2024 - Mar 2025",
            "description": "Machine learning and data analysis.",
            "achievements": ["Automated 40% of annotation tasks"],
            "startDate": "2024-12-01",
            "endDate": "2025-03-31T00:00:00.000Z",
            "location": "Beijing, China"
        })
    }

    fn fields_of(errors: &ValidationErrors) -> Vec<String> {
        let mut fields: Vec<String> = errors.errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        fields
    }

    #[test]
    fn valid_payload_is_trimmed_and_parsed() {
        let fields = ExperienceFields::try_from(payload(valid_json())).unwrap();

        assert_eq!(fields.company, "Baidu Inc.");
        assert_eq!(fields.start_date, NaiveDate::from_ymd_opt(2024, 12, 1).unwrap());
        assert_eq!(fields.end_date, NaiveDate::from_ymd_opt(2025, 3, 31));
        assert!(!fields.is_current_job);
    }

    #[test]
    fn end_date_is_required_unless_current_job() {
        let mut json = valid_json();
        json.as_object_mut().unwrap().remove("endDate");

        let errors = ExperienceFields::try_from(payload(json.clone())).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["end_date"]);

        json["isCurrentJob"] = serde_json::Value::Bool(true);
        assert!(ExperienceFields::try_from(payload(json)).is_ok());
    }

    #[test]
    fn current_job_drops_end_date() {
        let mut json = valid_json();
        json["isCurrentJob"] = serde_json::Value::Bool(true);

        let fields = ExperienceFields::try_from(payload(json)).unwrap();
        assert_eq!(fields.end_date, None);
    }

    #[test]
    fn current_job_ignores_unparseable_end_date() {
        let mut json = valid_json();
        json["isCurrentJob"] = serde_json::Value::Bool(true);
        json["endDate"] = serde_json::Value::String("someday".into());
        let fields = ExperienceFields::try_from(payload(json.clone())).unwrap();
        assert_eq!(fields.end_date, None);

        json["isCurrentJob"] = serde_json::Value::Bool(false);
        let errors = ExperienceFields::try_from(payload(json)).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["end_date"]);
    }

    #[test]
    fn blank_duration_and_description_are_rejected() {
        let mut json = valid_json();
        json["duration"] = serde_json::Value::String("  ".into());
        json["description"] = serde_json::Value::String("   ".into());

        let errors = ExperienceFields::try_from(payload(json)).unwrap_err();
        assert_eq!(fields_of(&errors), vec!["description", "duration"]);
    }

    #[test]
    fn all_violations_are_reported_together() {
        let errors = ExperienceFields::try_from(payload(serde_json::json!({
            "company": "   ",
            "achievements": ["ok", ""],
            "startDate": "not a date"
        })))
        .unwrap_err();

        assert_eq!(
            fields_of(&errors),
            vec!["achievements", "company", "description", "duration", "end_date", "position", "start_date"]
        );
    }

    #[test]
    fn merge_keeps_absent_fields_and_clears_nulls() {
        let existing = Experience::from_fields(
            "1".into(),
            ExperienceFields::try_from(payload(valid_json())).unwrap(),
            Utc::now(),
            Utc::now(),
        );

        let draft = existing.to_draft().merge(payload(serde_json::json!({
            "position": "Senior Intern",
            "location": null
        })));
        let fields = ExperienceFields::try_from(draft).unwrap();

        assert_eq!(fields.position, "Senior Intern");
        assert_eq!(fields.company, "Baidu Inc.");
        assert_eq!(fields.location, None);
        assert_eq!(fields.end_date, existing.end_date);
    }

    #[test]
    fn sorting_is_newest_first_by_default() {
        let make = |id: &str, start: &str| {
            let mut json = valid_json();
            json["startDate"] = serde_json::Value::String(start.into());
            json["endDate"] = serde_json::Value::Null;
            json["isCurrentJob"] = serde_json::Value::Bool(true);
            Experience::from_fields(
                id.into(),
                ExperienceFields::try_from(payload(json)).unwrap(),
                Utc::now(),
                Utc::now(),
            )
        };
        let mut records = vec![make("a", "2024-06-01"), make("b", "2025-04-01"), make("c", "2024-12-01")];

        sort_experiences(&mut records, SortDirection::default());
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        sort_experiences(&mut records, SortDirection::Asc);
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }

    #[test]
    fn company_match_is_case_insensitive() {
        let record = Experience::from_fields(
            "1".into(),
            ExperienceFields::try_from(payload(valid_json())).unwrap(),
            Utc::now(),
            Utc::now(),
        );
        assert!(record.company_matches("baidu"));
        assert!(record.company_matches("INC"));
        assert!(!record.company_matches("apple"));
    }
}
