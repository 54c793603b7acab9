//! Per-town documents merged into a single bundle.
//!
//! Each town directory holds an information sheet plus lists of activities,
//! beaches and food-and-drink venues. The bundle keeps the typed fields the
//! guide renders and preserves everything else verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A place referred to by name, such as a visitor centre or hospital.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedPlace {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Remaining fields.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// A recurring event in a town's calendar.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TownEvent {
    /// Event name.
    #[serde(default)]
    pub name: String,
    /// Month the event usually takes place.
    #[serde(default)]
    pub month: String,
}

/// Visitor-facing information for a town.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TouristInformation {
    /// Main visitor centre.
    #[serde(default)]
    pub visitor_center: Option<NamedPlace>,
    /// Recommended season.
    #[serde(default)]
    pub best_time_to_visit: Option<String>,
    /// Annual events.
    #[serde(default)]
    pub popular_events: Option<Vec<TownEvent>>,
}

/// Emergency contacts for a town.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EmergencyServices {
    /// Police contact, usually a phone number.
    #[serde(default)]
    pub police: Option<Value>,
    /// Nearest hospital.
    #[serde(default)]
    pub hospital: Option<NamedPlace>,
}

/// Seasonal temperature averages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Climate {
    /// Mean summer high in °C.
    #[serde(default)]
    pub summer_avg_high_celsius: Option<f64>,
    /// Mean winter low in °C.
    #[serde(default)]
    pub winter_avg_low_celsius: Option<f64>,
}

/// The `info.json` sheet for a town.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TownInfo {
    /// Town name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Overview paragraph.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Resident population, as authored (number or text).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<Value>,
    /// Land area in square kilometres, as authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_sq_km: Option<Value>,
    /// Villages within the town.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub villages: Option<Vec<String>>,
    /// Transport modes keyed by kind (ferry, bus, airport...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transportation: Option<Map<String, Value>>,
    /// Visitor information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tourist_information: Option<TouristInformation>,
    /// Emergency contacts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_services: Option<EmergencyServices>,
    /// Seasonal averages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climate: Option<Climate>,
    /// Remaining fields.
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

/// An entry in one of a town's lists.
///
/// Entries are loosely structured; accessors apply the same fallbacks the
/// guide uses when rendering them.
///
/// # Examples
/// ```
/// use capecod_core::Listing;
///
/// let entry: Listing = serde_json::from_str(r#"{"title": "Whale watch", "type": "tour"}"#).unwrap();
/// assert_eq!(entry.display_name(), "Whale watch");
/// assert_eq!(entry.summary(), "tour");
/// assert_eq!(entry.website(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Listing {
    fields: Map<String, Value>,
}

impl Listing {
    /// Build a listing from raw fields.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Name, then title, then id, then `Unnamed`.
    pub fn display_name(&self) -> String {
        self.first_text(&["name", "title", "id"])
            .unwrap_or_else(|| "Unnamed".to_owned())
    }

    /// Description, then type, then a placeholder.
    pub fn summary(&self) -> String {
        self.first_text(&["description", "type"])
            .unwrap_or_else(|| "No description available".to_owned())
    }

    /// Website URL, when present.
    pub fn website(&self) -> Option<String> {
        self.first_text(&["website"])
    }

    /// Raw field access.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    fn first_text(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .find_map(|value| match value {
                Value::String(text) if !text.is_empty() => Some(text.clone()),
                Value::Number(number) => Some(number.to_string()),
                _ => None,
            })
    }
}

/// Everything known about one town.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TownBundle {
    /// Information sheet.
    #[serde(flatten)]
    pub info: TownInfo,
    /// Things to do.
    #[serde(default)]
    pub activities: Vec<Listing>,
    /// Beaches in the town.
    #[serde(default)]
    pub beaches: Vec<Listing>,
    /// Restaurants, bars and cafés.
    #[serde(default)]
    pub food_and_drink: Vec<Listing>,
}
