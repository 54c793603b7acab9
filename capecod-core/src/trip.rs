//! A visitor's trip request.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

#[derive(Deserialize)]
#[serde(untagged)]
enum TownRef {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
    },
}

/// Dates, tastes and towns for a requested itinerary.
///
/// Field names follow the web client's camelCase payload.
///
/// # Examples
/// ```
/// use capecod_core::TripRequest;
///
/// let request: TripRequest = serde_json::from_str(
///     r#"{"startDate": "2024-07-01", "endDate": "2024-07-03",
///         "preferences": ["quiet"], "activities": ["kayaking"], "towns": ["Chatham"]}"#,
/// ).unwrap();
/// assert_eq!(request.nights(), 2);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// First day of the trip.
    pub start_date: NaiveDate,
    /// Last day of the trip.
    pub end_date: NaiveDate,
    /// Free-form preferences such as "family friendly".
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Activities the visitor wants to include.
    #[serde(default)]
    pub activities: Vec<String>,
    /// Towns to visit, in the order given.
    ///
    /// Entries may be plain names or objects with a `name` field.
    #[serde(default, deserialize_with = "deserialize_towns")]
    pub towns: Vec<String>,
}

/// Errors returned by [`TripRequest::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TripRequestError {
    /// The trip ends before it starts.
    #[error("trip ends on {end} before it starts on {start}")]
    EndBeforeStart {
        /// Requested start date.
        start: NaiveDate,
        /// Requested end date.
        end: NaiveDate,
    },
}

impl TripRequest {
    /// Construct a request with no preferences, activities or towns.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            preferences: Vec::new(),
            activities: Vec::new(),
            towns: Vec::new(),
        }
    }

    /// Number of nights between the start and end dates.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Check the dates are ordered and return `self`.
    ///
    /// A single-day trip (equal dates) is accepted.
    ///
    /// # Errors
    /// Returns [`TripRequestError::EndBeforeStart`] when `end_date` precedes
    /// `start_date`.
    pub fn validate(self) -> Result<Self, TripRequestError> {
        if self.end_date < self.start_date {
            return Err(TripRequestError::EndBeforeStart {
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(self)
    }
}

fn deserialize_towns<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let refs = Vec::<TownRef>::deserialize(deserializer)?;
    Ok(refs
        .into_iter()
        .map(|town| match town {
            TownRef::Name(name) => name,
            TownRef::Object { name } => name.unwrap_or_else(|| "Unknown".to_owned()),
        })
        .collect())
}
