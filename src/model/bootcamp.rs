//! # Bootcamp
//!
//! The primary listed entity. `average_cost` and `photo` are never taken from a
//! request payload: the former is maintained from course tuition, the latter is
//! set by the photo upload.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{trimmed, ValidationResult, Violations};
use crate::geocoding::{Coordinates, Location};

/// Photo assigned until one is uploaded
pub const DEFAULT_PHOTO: &str = "no-photo.jpg";

const MAX_NAME_LEN: usize = 50;
const MAX_DESCRIPTION_LEN: usize = 500;
const MAX_PHONE_LEN: usize = 20;

/// Career tracks a bootcamp can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Career {
    #[serde(rename = "Web Development")]
    WebDevelopment,
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    #[serde(rename = "UI/UX")]
    UiUx,
    #[serde(rename = "Data Science")]
    DataScience,
    #[serde(rename = "Business")]
    Business,
    #[serde(rename = "Other")]
    Other,
}

/// GeoJSON-style point with the geocoder's address breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Always `"Point"`
    #[serde(rename = "type")]
    pub kind: String,

    /// `[longitude, latitude]`
    pub coordinates: [f64; 2],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl GeoPoint {
    pub fn position(&self) -> Coordinates {
        Coordinates::new(self.coordinates[1], self.coordinates[0])
    }
}

impl From<Location> for GeoPoint {
    fn from(loc: Location) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [loc.coordinates.longitude, loc.coordinates.latitude],
            formatted_address: loc.formatted_address,
            street: loc.street,
            city: loc.city,
            state: loc.state,
            zipcode: loc.zipcode,
            country: loc.country,
        }
    }
}

/// A bootcamp record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bootcamp {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub address: String,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    pub careers: Vec<Career>,
    #[serde(default)]
    pub average_rating: Option<f64>,
    /// Derived from course tuition
    #[serde(default)]
    pub average_cost: Option<f64>,
    pub photo: String,
    #[serde(default)]
    pub housing: bool,
    #[serde(default)]
    pub job_assistance: bool,
    #[serde(default)]
    pub job_guarantee: bool,
    #[serde(default)]
    pub accept_gi: bool,
    pub created_at: DateTime<Utc>,
}

/// Authorable bootcamp fields, used for both creation and partial updates.
///
/// Absent fields are left untouched on update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BootcampFields {
    pub name: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub careers: Option<Vec<Career>>,
    pub average_rating: Option<f64>,
    pub housing: Option<bool>,
    pub job_assistance: Option<bool>,
    pub job_guarantee: Option<bool>,
    pub accept_gi: Option<bool>,
}

/// Owner fields expanded into a course response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootcampSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

impl From<&Bootcamp> for BootcampSummary {
    fn from(bootcamp: &Bootcamp) -> Self {
        Self {
            id: bootcamp.id,
            name: bootcamp.name.clone(),
            description: bootcamp.description.clone(),
        }
    }
}

impl Bootcamp {
    /// Build and validate a new bootcamp from a creation payload
    pub fn new(fields: BootcampFields) -> ValidationResult<Self> {
        let name = trimmed(fields.name).unwrap_or_default();
        let bootcamp = Self {
            id: Uuid::new_v4(),
            slug: slugify(&name),
            name,
            description: trimmed(fields.description).unwrap_or_default(),
            website: trimmed(fields.website),
            phone: trimmed(fields.phone),
            email: trimmed(fields.email),
            address: trimmed(fields.address).unwrap_or_default(),
            location: None,
            careers: fields.careers.unwrap_or_default(),
            average_rating: fields.average_rating,
            average_cost: None,
            photo: DEFAULT_PHOTO.to_string(),
            housing: fields.housing.unwrap_or(false),
            job_assistance: fields.job_assistance.unwrap_or(false),
            job_guarantee: fields.job_guarantee.unwrap_or(false),
            accept_gi: fields.accept_gi.unwrap_or(false),
            created_at: Utc::now(),
        };

        bootcamp.validate()?;
        Ok(bootcamp)
    }

    /// Merge a partial update into a copy of this bootcamp and validate the result
    pub fn merged(&self, fields: BootcampFields) -> ValidationResult<Self> {
        let mut next = self.clone();

        if let Some(name) = fields.name {
            next.name = name.trim().to_string();
            next.slug = slugify(&next.name);
        }
        if let Some(description) = fields.description {
            next.description = description.trim().to_string();
        }
        if fields.website.is_some() {
            next.website = trimmed(fields.website);
        }
        if fields.phone.is_some() {
            next.phone = trimmed(fields.phone);
        }
        if fields.email.is_some() {
            next.email = trimmed(fields.email);
        }
        if let Some(address) = fields.address {
            let address = address.trim().to_string();
            if address != next.address {
                next.location = None;
            }
            next.address = address;
        }
        if let Some(careers) = fields.careers {
            next.careers = careers;
        }
        if fields.average_rating.is_some() {
            next.average_rating = fields.average_rating;
        }
        if let Some(housing) = fields.housing {
            next.housing = housing;
        }
        if let Some(job_assistance) = fields.job_assistance {
            next.job_assistance = job_assistance;
        }
        if let Some(job_guarantee) = fields.job_guarantee {
            next.job_guarantee = job_guarantee;
        }
        if let Some(accept_gi) = fields.accept_gi {
            next.accept_gi = accept_gi;
        }

        next.validate()?;
        Ok(next)
    }

    /// Check every field rule
    pub fn validate(&self) -> ValidationResult<()> {
        let mut v = Violations::new();

        v.check(!self.name.is_empty(), "Please add a name");
        v.check(
            self.name.chars().count() <= MAX_NAME_LEN,
            format!("Name can not be more than {} characters", MAX_NAME_LEN),
        );
        v.check(!self.description.is_empty(), "Please add a description");
        v.check(
            self.description.chars().count() <= MAX_DESCRIPTION_LEN,
            format!(
                "Description can not be more than {} characters",
                MAX_DESCRIPTION_LEN
            ),
        );
        if let Some(website) = &self.website {
            v.check(
                url_pattern().is_match(website),
                "Please use a valid URL with HTTP or HTTPS",
            );
        }
        if let Some(phone) = &self.phone {
            v.check(
                phone.chars().count() <= MAX_PHONE_LEN,
                format!("Phone number can not be longer than {} characters", MAX_PHONE_LEN),
            );
        }
        if let Some(email) = &self.email {
            v.check(email_pattern().is_match(email), "Please add a valid email");
        }
        v.check(!self.address.is_empty(), "Please add an address");
        v.check(!self.careers.is_empty(), "Please add at least one career");
        if let Some(rating) = self.average_rating {
            v.check(rating >= 1.0, "Rating must be at least 1");
            v.check(rating <= 10.0, "Rating can not be more than 10");
        }

        v.into_result()
    }
}

/// URL-safe slug: lowercase ASCII alphanumerics separated by single dashes
pub fn slugify(name: &str) -> String {
    static SEPARATORS: OnceLock<Regex> = OnceLock::new();
    let separators =
        SEPARATORS.get_or_init(|| Regex::new(r"[^a-z0-9]+").expect("valid slug pattern"));

    separators
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

fn url_pattern() -> &'static Regex {
    static URL: OnceLock<Regex> = OnceLock::new();
    URL.get_or_init(|| {
        Regex::new(r"^https?://[A-Za-z0-9][A-Za-z0-9.-]*\.[A-Za-z]{2,}(:\d+)?(/\S*)?$")
            .expect("valid url pattern")
    })
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").expect("valid email pattern")
    })
}
