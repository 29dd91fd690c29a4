//! # Course
//!
//! A course belongs to exactly one bootcamp. The owning bootcamp is fixed at
//! creation and cannot be changed by an update.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::bootcamp::{Bootcamp, BootcampSummary};
use super::validation::{trimmed, ValidationResult, Violations};

/// Minimum skill level expected from students
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// A course record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Duration in weeks
    #[serde(deserialize_with = "weeks_text")]
    pub weeks: String,
    pub tuition: f64,
    pub minimum_skill: SkillLevel,
    #[serde(default)]
    pub scholarship_available: bool,
    pub created_at: DateTime<Utc>,
    /// Owning bootcamp
    pub bootcamp: Uuid,
}

/// Authorable course fields, used for creation and partial updates
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFields {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "optional_weeks_text")]
    pub weeks: Option<String>,
    pub tuition: Option<f64>,
    pub minimum_skill: Option<SkillLevel>,
    pub scholarship_available: Option<bool>,
}

/// `weeks` arrives as text or as a bare number; numbers are kept as their
/// decimal text
#[derive(Deserialize)]
#[serde(untagged)]
enum WeeksValue {
    Text(String),
    Whole(i64),
    Fractional(f64),
}

impl From<WeeksValue> for String {
    fn from(value: WeeksValue) -> Self {
        match value {
            WeeksValue::Text(text) => text,
            WeeksValue::Whole(n) => n.to_string(),
            WeeksValue::Fractional(n) => n.to_string(),
        }
    }
}

fn weeks_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    WeeksValue::deserialize(deserializer).map(String::from)
}

fn optional_weeks_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Option::<WeeksValue>::deserialize(deserializer).map(|weeks| weeks.map(String::from))
}

/// Course with its owner's name and description expanded inline.
///
/// `bootcamp` is `None` when the owner no longer exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub weeks: String,
    pub tuition: f64,
    pub minimum_skill: SkillLevel,
    pub scholarship_available: bool,
    pub created_at: DateTime<Utc>,
    pub bootcamp: Option<BootcampSummary>,
}

impl Course {
    /// Build and validate a course owned by `bootcamp`
    pub fn new(bootcamp: Uuid, fields: CourseFields) -> ValidationResult<Self> {
        let mut v = Violations::new();
        v.check(fields.tuition.is_some(), "Please add tuition cost");
        v.check(fields.minimum_skill.is_some(), "Please add minimum skill");

        let course = Self {
            id: Uuid::new_v4(),
            title: trimmed(fields.title).unwrap_or_default(),
            description: trimmed(fields.description).unwrap_or_default(),
            weeks: trimmed(fields.weeks).unwrap_or_default(),
            tuition: fields.tuition.unwrap_or_default(),
            minimum_skill: fields.minimum_skill.unwrap_or(SkillLevel::Beginner),
            scholarship_available: fields.scholarship_available.unwrap_or(false),
            created_at: Utc::now(),
            bootcamp,
        };

        match (v.into_result(), course.validate()) {
            (Ok(()), Ok(())) => Ok(course),
            (Err(mut missing), Err(rules)) => {
                missing.messages.extend(rules.messages);
                Err(missing)
            }
            (Err(e), Ok(())) | (Ok(()), Err(e)) => Err(e),
        }
    }

    /// Merge a partial update into a copy of this course and validate the result
    pub fn merged(&self, fields: CourseFields) -> ValidationResult<Self> {
        let mut next = self.clone();

        if let Some(title) = fields.title {
            next.title = title.trim().to_string();
        }
        if let Some(description) = fields.description {
            next.description = description.trim().to_string();
        }
        if let Some(weeks) = fields.weeks {
            next.weeks = weeks.trim().to_string();
        }
        if let Some(tuition) = fields.tuition {
            next.tuition = tuition;
        }
        if let Some(skill) = fields.minimum_skill {
            next.minimum_skill = skill;
        }
        if let Some(scholarship) = fields.scholarship_available {
            next.scholarship_available = scholarship;
        }

        next.validate()?;
        Ok(next)
    }

    /// Check every field rule
    pub fn validate(&self) -> ValidationResult<()> {
        let mut v = Violations::new();

        v.check(!self.title.is_empty(), "Please add a course title");
        v.check(!self.description.is_empty(), "Please add a description");
        v.check(!self.weeks.is_empty(), "Please add number of weeks");
        v.check(
            self.tuition.is_finite() && self.tuition >= 0.0,
            "Tuition must be a non-negative number",
        );

        v.into_result()
    }

    /// Expand the owning bootcamp's name and description
    pub fn with_owner(self, owner: Option<&Bootcamp>) -> CourseDetail {
        CourseDetail {
            id: self.id,
            title: self.title,
            description: self.description,
            weeks: self.weeks,
            tuition: self.tuition,
            minimum_skill: self.minimum_skill,
            scholarship_available: self.scholarship_available,
            created_at: self.created_at,
            bootcamp: owner.map(BootcampSummary::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(tuition: f64) -> CourseFields {
        CourseFields {
            title: Some("Front End Web Development".to_string()),
            description: Some("HTML, CSS and JavaScript".to_string()),
            weeks: Some("8".to_string()),
            tuition: Some(tuition),
            minimum_skill: Some(SkillLevel::Beginner),
            scholarship_available: None,
        }
    }

    #[test]
    fn test_new_sets_owner_and_defaults() {
        let owner = Uuid::new_v4();
        let course = Course::new(owner, fields(8000.0)).unwrap();
        assert_eq!(course.bootcamp, owner);
        assert!(!course.scholarship_available);
    }

    #[test]
    fn test_weeks_accepts_text_or_number() {
        let parse = |weeks: serde_json::Value| -> Option<String> {
            serde_json::from_value::<CourseFields>(serde_json::json!({ "weeks": weeks }))
                .unwrap()
                .weeks
        };

        assert_eq!(parse(serde_json::json!("8")), Some("8".to_string()));
        assert_eq!(parse(serde_json::json!(12)), Some("12".to_string()));
        assert_eq!(parse(serde_json::json!(2.5)), Some("2.5".to_string()));
        assert_eq!(parse(serde_json::Value::Null), None);

        let absent: CourseFields = serde_json::from_str("{}").unwrap();
        assert!(absent.weeks.is_none());
        assert!(serde_json::from_str::<CourseFields>(r#"{"weeks": [8]}"#).is_err());
    }

    #[test]
    fn test_missing_fields_are_reported_together() {
        let err = Course::new(Uuid::new_v4(), CourseFields::default()).unwrap_err();
        assert!(err.messages.contains(&"Please add tuition cost".to_string()));
        assert!(err.messages.contains(&"Please add minimum skill".to_string()));
        assert!(err.messages.contains(&"Please add a course title".to_string()));
    }

    #[test]
    fn test_negative_tuition_rejected() {
        assert!(Course::new(Uuid::new_v4(), fields(-1.0)).is_err());
    }

    #[test]
    fn test_merged_keeps_owner() {
        let course = Course::new(Uuid::new_v4(), fields(8000.0)).unwrap();
        let updated = course
            .merged(CourseFields {
                tuition: Some(9000.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(updated.bootcamp, course.bootcamp);
        assert_eq!(updated.tuition, 9000.0);
        assert_eq!(updated.title, course.title);
    }

    #[test]
    fn test_skill_level_wire_format() {
        let skill: SkillLevel = serde_json::from_str("\"intermediate\"").unwrap();
        assert_eq!(skill, SkillLevel::Intermediate);
        assert!(serde_json::from_str::<SkillLevel>("\"expert\"").is_err());
    }

    #[test]
    fn test_detail_without_owner_serializes_null() {
        let course = Course::new(Uuid::new_v4(), fields(100.0)).unwrap();
        let json = serde_json::to_value(course.with_owner(None)).unwrap();
        assert!(json["bootcamp"].is_null());
        assert_eq!(json["minimumSkill"], "beginner");
    }
}
