//! Generated itineraries and their day-by-day breakdown.

use serde::{Deserialize, Serialize};

/// Free text returned by the completion service.
///
/// # Examples
/// ```
/// use capecod_core::Itinerary;
///
/// let itinerary = Itinerary::new("DAY 1: ARRIVAL\n• Check in\n-----\nDAY 2: BEACHES\n• Nauset");
/// let days = itinerary.days();
/// assert_eq!(days.len(), 2);
/// assert_eq!(days[1].label, "Day 2");
/// assert_eq!(days[1].lines, vec!["BEACHES", "• Nauset"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    /// The itinerary as returned, trimmed.
    #[serde(rename = "itinerary")]
    pub text: String,
}

/// One day of an itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// `Day 1`, `Day 2`, ... in order of appearance.
    #[serde(rename = "day")]
    pub label: String,
    /// Trimmed, non-empty lines for the day.
    #[serde(rename = "activities")]
    pub lines: Vec<String>,
}

impl Itinerary {
    /// Wrap `text`, trimming surrounding whitespace.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into().trim().to_owned(),
        }
    }

    /// Split the text on `Day N:` markers.
    ///
    /// Markers match case-insensitively. Text before the first marker is an
    /// introduction and is dropped unless there are no markers at all, in
    /// which case the whole text is a single day. Chunks that are blank once
    /// separator lines are removed do not produce a day, and days are
    /// relabelled consecutively.
    pub fn days(&self) -> Vec<ItineraryDay> {
        let markers = day_markers(&self.text);
        let chunks: Vec<&str> = if markers.is_empty() {
            vec![self.text.as_str()]
        } else {
            markers
                .iter()
                .enumerate()
                .filter_map(|(index, &(_, body_start))| {
                    let end = markers
                        .get(index + 1)
                        .map_or(self.text.len(), |&(next, _)| next);
                    self.text.get(body_start..end)
                })
                .collect()
        };
        chunks
            .into_iter()
            .map(day_lines)
            .filter(|lines| !lines.is_empty())
            .enumerate()
            .map(|(index, lines)| ItineraryDay {
                label: format!("Day {}", index + 1),
                lines,
            })
            .collect()
    }
}

/// `(marker_start, body_start)` for every `Day <digits>:` occurrence.
fn day_markers(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut markers = Vec::new();
    let mut cursor = 0;
    while let Some(window) = bytes.get(cursor..) {
        let Some(offset) = window
            .windows(4)
            .position(|candidate| candidate.eq_ignore_ascii_case(b"day "))
        else {
            break;
        };
        let start = cursor + offset;
        let digits_start = start + 4;
        let digits = bytes
            .get(digits_start..)
            .unwrap_or_default()
            .iter()
            .take_while(|byte| byte.is_ascii_digit())
            .count();
        let colon = digits_start + digits;
        if digits > 0 && bytes.get(colon) == Some(&b':') {
            markers.push((start, colon + 1));
            cursor = colon + 1;
        } else {
            cursor = start + 1;
        }
    }
    markers
}

fn day_lines(chunk: &str) -> Vec<String> {
    chunk
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_separator(line))
        .map(str::to_owned)
        .collect()
}

fn is_separator(line: &str) -> bool {
    line.len() >= 3 && line.chars().all(|c| c == '-' || c == '—' || c == '_')
}
