use crate::models::{AnimalRecord, Attributes, Address, Compatibility, Environment, Photo, Shelter};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{header, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

/// Value shipped in sample `.env` files; treated as "no key"
pub const PLACEHOLDER_API_KEY: &str = "your_rescuegroups_api_key_here";

const SEARCH_PATH: &str = "/public/animals/search/available/dogs";

static COLOR_MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)color[:\s]+(\w+)").expect("color pattern is valid")
});

/// Errors that can occur when interacting with RescueGroups
#[derive(Debug, Error)]
pub enum RescueGroupsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(StatusCode),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Whether an API key is usable
pub fn is_configured(api_key: Option<&str>) -> bool {
    api_key.is_some_and(|key| !key.trim().is_empty() && key != PLACEHOLDER_API_KEY)
}

/// RescueGroups.org v5 API client
///
/// Searches adoptable dogs around a postal code and maps them onto
/// [`AnimalRecord`].
pub struct RescueGroupsClient {
    base_url: String,
    api_key: String,
    radius_miles: u32,
    postal_code: String,
    client: Client,
}

impl RescueGroupsClient {
    pub fn new(
        base_url: String,
        api_key: String,
        radius_miles: u32,
        postal_code: String,
        timeout: Duration,
    ) -> Result<Self, RescueGroupsError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            radius_miles,
            postal_code,
            client,
        })
    }

    /// Fetch available dogs within the configured radius
    pub async fn fetch_available_dogs(&self) -> Result<Vec<AnimalRecord>, RescueGroupsError> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), SEARCH_PATH);

        let body = json!({
            "data": {
                "filters": [
                    { "fieldName": "statuses.name", "operation": "equals", "criteria": "Available" },
                    { "fieldName": "species.singular", "operation": "equals", "criteria": "Dog" }
                ],
                "filterRadius": {
                    "miles": self.radius_miles,
                    "postalcode": self.postal_code
                }
            }
        });

        tracing::debug!("Searching RescueGroups: {} ({} miles of {})", url, self.radius_miles, self.postal_code);

        let response = self
            .client
            .post(&url)
            .header(header::CONTENT_TYPE, "application/vnd.api+json")
            .header(header::AUTHORIZATION, &self.api_key)
            .body(body.to_string())
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(RescueGroupsError::Unauthorized);
        }
        if !status.is_success() {
            return Err(RescueGroupsError::ApiError(status));
        }

        let text = response.text().await?;
        let search: SearchResponse = serde_json::from_str(&text)
            .map_err(|e| RescueGroupsError::InvalidResponse(format!("Failed to parse search results: {}", e)))?;

        let dogs: Vec<AnimalRecord> = search
            .data
            .unwrap_or_default()
            .into_iter()
            .map(transform_animal)
            .collect();

        tracing::debug!("RescueGroups returned {} dogs", dogs.len());

        Ok(dogs)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<RgAnimal>>,
}

#[derive(Debug, Deserialize)]
struct RgAnimal {
    id: String,
    #[serde(default)]
    attributes: RgAttributes,
    #[serde(default)]
    relationships: RgRelationships,
}

#[derive(Debug, Default, Deserialize)]
struct RgRelationships {
    #[serde(default)]
    orgs: Option<RgRelationship>,
}

#[derive(Debug, Default, Deserialize)]
struct RgRelationship {
    #[serde(default)]
    data: Vec<RgResourceId>,
}

#[derive(Debug, Deserialize)]
struct RgResourceId {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RgAttributes {
    name: Option<String>,
    breed_primary: Option<String>,
    breed_secondary: Option<String>,
    is_mixed_breed: Option<bool>,
    age_group: Option<String>,
    sex: Option<String>,
    color_details: Option<String>,
    coat_length: Option<String>,
    description_text: Option<String>,
    is_courteous_ok: Option<bool>,
    is_playful: Option<bool>,
    is_obedient: Option<bool>,
    is_gentle: Option<bool>,
    is_agility_trained: Option<bool>,
    is_kids_ok: Option<bool>,
    is_dogs_ok: Option<bool>,
    is_cats_ok: Option<bool>,
    is_altered: Option<bool>,
    is_housetrained: Option<bool>,
    is_special_needs: Option<bool>,
    is_current_vaccinations: Option<bool>,
    is_declawed: Option<bool>,
    picture_thumbnail_url: Option<String>,
    adoption_fee_string: Option<String>,
    created_date: Option<String>,
    updated_date: Option<String>,
    org_name: Option<String>,
    org_email: Option<String>,
    org_phone: Option<String>,
    org_address: Option<String>,
    org_city: Option<String>,
    org_state: Option<String>,
    org_postalcode: Option<String>,
    url: Option<String>,
}

/// Map a RescueGroups animal onto our record
fn transform_animal(animal: RgAnimal) -> AnimalRecord {
    let org_id = animal
        .relationships
        .orgs
        .and_then(|orgs| orgs.data.into_iter().next())
        .map(|org| org.id);
    let a = animal.attributes;
    let flag = |value: Option<bool>| value.unwrap_or(false);

    let color = a
        .color_details
        .clone()
        .filter(|c| !c.trim().is_empty())
        .or_else(|| color_from_description(a.description_text.as_deref()))
        .unwrap_or_else(|| "Unknown".to_string());

    let gender = match a.sex.as_deref() {
        Some("Male") => "Male",
        Some("Female") => "Female",
        _ => "Unknown",
    };

    let now = Utc::now();

    AnimalRecord {
        id: format!("rg_{}", animal.id),
        name: Some(a.name.clone().unwrap_or_else(|| "Unknown".to_string())),
        breed: Some(a.breed_primary.clone().unwrap_or_else(|| "Mixed Breed".to_string())),
        breed_secondary: a.breed_secondary.clone().filter(|b| !b.trim().is_empty()),
        is_mixed: flag(a.is_mixed_breed),
        size: Some(size_from_age_group(a.age_group.as_deref()).to_string()),
        color: Some(color),
        color_secondary: None,
        color_tertiary: None,
        age: Some(age_label(a.age_group.as_deref()).into()),
        gender: Some(gender.to_string()),
        coat: a.coat_length.clone().filter(|c| !c.trim().is_empty()),
        temperament: temperament_from(&a),
        attributes: Attributes {
            spayed_neutered: flag(a.is_altered),
            house_trained: flag(a.is_housetrained),
            declawed: false,
            special_needs: flag(a.is_special_needs),
            shots_current: flag(a.is_current_vaccinations),
        },
        tags: tags_from(&a),
        environment: Environment {
            children: Compatibility::from(a.is_kids_ok),
            dogs: Compatibility::from(a.is_dogs_ok),
            cats: Compatibility::from(a.is_cats_ok),
        },
        description: Some(
            a.description_text
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "No description available".to_string()),
        ),
        photos: a
            .picture_thumbnail_url
            .iter()
            .map(|url| Photo {
                small: Some(url.clone()),
                medium: Some(url.clone()),
                large: Some(url.clone()),
                full: Some(url.clone()),
            })
            .collect(),
        primary_photo: a.picture_thumbnail_url.clone(),
        adoption_fee: Some(
            a.adoption_fee_string
                .clone()
                .unwrap_or_else(|| "Contact shelter for details".to_string()),
        ),
        published_at: Some(parse_date(a.created_date.as_deref()).unwrap_or(now)),
        status_changed_at: Some(parse_date(a.updated_date.as_deref()).unwrap_or(now)),
        distance: None,
        shelter: Some(Shelter {
            id: org_id.unwrap_or_else(|| "unknown".to_string()),
            name: a.org_name.clone().unwrap_or_else(|| "Local Animal Shelter".to_string()),
            email: a.org_email.clone(),
            phone: a.org_phone.clone(),
            address: Address {
                address1: a.org_address.clone(),
                address2: None,
                city: Some(a.org_city.clone().unwrap_or_else(|| "Atlanta".to_string())),
                state: Some(a.org_state.clone().unwrap_or_else(|| "GA".to_string())),
                postcode: a.org_postalcode.clone(),
                country: Some("US".to_string()),
            },
        }),
        url: a.url.clone(),
    }
}

/// RescueGroups has no size field on search results; approximate from age group
fn size_from_age_group(age_group: Option<&str>) -> &'static str {
    let Some(age) = age_group.map(str::to_lowercase) else {
        return "Medium";
    };
    if age.contains("baby") || age.contains("young") {
        "Small"
    } else if age.contains("senior") {
        "Medium"
    } else {
        "Large"
    }
}

fn age_label(age_group: Option<&str>) -> &'static str {
    let Some(age) = age_group.map(str::to_lowercase) else {
        return "Adult";
    };
    if age.contains("baby") {
        "Baby"
    } else if age.contains("young") {
        "Young"
    } else if age.contains("senior") {
        "Senior"
    } else {
        "Adult"
    }
}

fn temperament_from(a: &RgAttributes) -> Vec<String> {
    let traits: Vec<String> = [
        (a.is_courteous_ok, "Friendly"),
        (a.is_playful, "Playful"),
        (a.is_obedient, "Obedient"),
        (a.is_gentle, "Gentle"),
        (a.is_agility_trained, "Active"),
        (a.is_kids_ok, "Good with kids"),
        (a.is_dogs_ok, "Good with dogs"),
        (a.is_cats_ok, "Good with cats"),
    ]
    .into_iter()
    .filter(|(flag, _)| flag.unwrap_or(false))
    .map(|(_, name)| name.to_string())
    .collect();

    if traits.is_empty() {
        vec!["Friendly".to_string()]
    } else {
        traits
    }
}

fn tags_from(a: &RgAttributes) -> Vec<String> {
    [
        (a.is_housetrained, "House-trained"),
        (a.is_special_needs, "Special needs"),
        (a.is_current_vaccinations, "Vaccinated"),
        (a.is_altered, "Spayed/Neutered"),
        (a.is_declawed, "Declawed"),
    ]
    .into_iter()
    .filter(|(flag, _)| flag.unwrap_or(false))
    .map(|(_, name)| name.to_string())
    .collect()
}

fn color_from_description(description: Option<&str>) -> Option<String> {
    COLOR_MENTION
        .captures(description?)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn parse_date(value: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value?)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
