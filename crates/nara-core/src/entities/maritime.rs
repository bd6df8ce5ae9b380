use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Text in English, Sinhala, and Tamil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Localized {
    pub en: String,
    pub si: String,
    pub ta: String,
}

impl Localized {
    #[must_use]
    pub fn new(en: &str, si: &str, ta: &str) -> Self {
        Self {
            en: en.to_string(),
            si: si.to_string(),
            ta: ta.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vessel {
    pub id: String,
    pub name: Localized,
    #[serde(rename = "type")]
    pub vessel_type: String,
    pub status: String,
    pub speed: f64,
    pub heading: u16,
    pub position: GeoPoint,
    pub crew: u32,
    pub mission: Localized,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PortWeather {
    pub condition: String,
    pub temp: i32,
    pub wind: u32,
    pub humidity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    pub id: String,
    pub name: Localized,
    pub code: String,
    pub vessels: u32,
    pub capacity: u32,
    pub weather: PortWeather,
    pub status: String,
    pub location: GeoPoint,
    pub facilities: Vec<String>,
    pub last_update: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaritimeService {
    pub id: String,
    pub title: Localized,
    pub description: Localized,
    pub category: String,
    /// Fee in LKR.
    pub price: u32,
    pub duration: String,
    pub requirements: Vec<String>,
    pub icon: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub severity: String,
    #[serde(rename = "type")]
    pub alert_type: String,
    pub title: Localized,
    pub description: Localized,
    pub affected_areas: Vec<String>,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
