//! Text rendering of town bundles and the itinerary prompt.

use std::fmt::Write as _;

use capecod_core::{ChatPrompt, Listing, TownBundle, TripRequest};
use serde_json::Value;

const NOT_AVAILABLE: &str = "N/A";

/// Role instructions sent as the system message.
pub const SYSTEM_PROMPT: &str = "You are an expert travel planner specializing in Cape Cod \
vacations. Your task is to create detailed, engaging, and personalized itineraries based on the \
provided information. Format your response in plain text, using ALL CAPS for day headers, bullet \
points (•) for list items, and detailed descriptions for each recommendation. Separate days with \
dashed lines and activities with blank lines. Make the output easy to read, informative, and \
professional-looking.";

const ITINERARY_REQUIREMENTS: &str = "\
Please provide a day-by-day itinerary that includes:
1. A balanced mix of activities based on the user's preferences and the towns' offerings
2. Specific attractions, beaches, or locations to visit each day
3. Dining recommendations, including local specialties and notable food/drink establishments
4. Insider tips or local insights to enhance the experience
5. Suggested timings for activities to help with planning
6. A logical order for visiting the selected towns
7. Recommendations for transportation options within and between towns

Format the itinerary as follows:
• Use \"DAY X: [THEME FOR THE DAY]\" as headers for each day, in ALL CAPS
• Separate each day with a line of dashes (-------------------)
• For each activity or recommendation:
  - Use a bullet point (•)
  - Provide the name of the activity or place in bold
  - Include a detailed description (2-3 sentences) explaining why it's interesting, what to expect, or any special features
  - If applicable, include practical information like operating hours, costs, or reservation requirements
  - Include website links when available
• Separate each activity within a day with a blank line

Remember to:
• Tailor the itinerary to the specified preferences and activities
• Balance popular attractions with hidden gems
• Consider the time of year and any seasonal activities or events
• Incorporate downtime and flexibility into the schedule
• Plan efficient routes between the selected towns
• Include recommendations for using local transportation options
• Provide website links for easy access to more information about recommended places

Create an itinerary that captures the essence of Cape Cod and provides a memorable experience \
for the visitors, taking into account the unique characteristics and offerings of each selected \
town. Focus on providing rich, detailed descriptions that give the reader a clear sense of what \
to expect and why each recommendation is worthwhile.";

/// Render a bullet list of listings, or a placeholder when there are none.
///
/// # Examples
/// ```
/// use capecod_core::Listing;
/// use capecod_data::itinerary::format_listings;
///
/// assert_eq!(format_listings(&[]), "No items available");
/// let entry: Listing = serde_json::from_str(r#"{"name": "Nauset Light", "website": "https://example.org"}"#).unwrap();
/// assert_eq!(
///     format_listings(&[entry]),
///     "• Nauset Light:\n   No description available\n   Website: https://example.org\n"
/// );
/// ```
pub fn format_listings(listings: &[Listing]) -> String {
    if listings.is_empty() {
        return "No items available".to_owned();
    }
    listings
        .iter()
        .map(|listing| {
            let website = listing
                .website()
                .map(|url| format!("\n   Website: {url}"))
                .unwrap_or_default();
            format!(
                "• {}:\n   {}{website}\n",
                listing.display_name(),
                listing.summary()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a JSON scalar as plain text, or `N/A` for null, empty, zero or
/// absent values.
fn text_or_na(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Number(number)) if number.as_f64() != Some(0.0) => number.to_string(),
        Some(Value::Bool(true)) => "true".to_owned(),
        Some(Value::Array(_) | Value::Object(_)) => value.map(Value::to_string).unwrap_or_default(),
        _ => NOT_AVAILABLE.to_owned(),
    }
}

fn named(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Object(object) => object
            .get("name")
            .map_or_else(|| value.to_string(), |name| text_or_na(Some(name))),
        other => other.to_string(),
    }
}

fn capitalise(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn transportation_lines(bundle: &TownBundle) -> String {
    let Some(modes) = bundle.info.transportation.as_ref().filter(|modes| !modes.is_empty()) else {
        return NOT_AVAILABLE.to_owned();
    };
    modes
        .iter()
        .map(|(mode, value)| {
            let rendered = match value {
                Value::Array(entries) => entries.iter().map(named).collect::<Vec<_>>().join(", "),
                other => named(other),
            };
            format!("• {}: {rendered}", capitalise(mode))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn celsius(value: Option<f64>) -> String {
    value
        .filter(|degrees| *degrees != 0.0)
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |degrees| degrees.to_string())
}

/// Render the overview of one town embedded in the itinerary prompt.
///
/// Sections appear in a fixed order: the town header and description, key
/// information, transportation, activities, beaches, food and drink, tourist
/// information, emergency services and climate. Missing values render as
/// `N/A`.
pub fn town_overview(name: &str, bundle: &TownBundle) -> String {
    let info = &bundle.info;
    let title = info.name.as_deref().filter(|n| !n.is_empty()).unwrap_or(name);
    let villages = info
        .villages
        .as_ref()
        .map_or_else(|| NOT_AVAILABLE.to_owned(), |villages| villages.join(", "));
    let tourist = info.tourist_information.clone().unwrap_or_default();
    let events = tourist.popular_events.as_ref().map_or_else(
        || NOT_AVAILABLE.to_owned(),
        |events| {
            events
                .iter()
                .map(|event| format!("{} ({})", event.name, event.month))
                .collect::<Vec<_>>()
                .join(", ")
        },
    );
    let emergency = info.emergency_services.clone().unwrap_or_default();
    let climate = info.climate.clone().unwrap_or_default();

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "TOWN: {title}");
    let _ = writeln!(out, "{}", info.description.as_deref().unwrap_or_default());
    let _ = writeln!(out);
    let _ = writeln!(out, "KEY INFORMATION:");
    let _ = writeln!(out, "• Population: {}", text_or_na(info.population.as_ref()));
    let _ = writeln!(out, "• Area: {} sq km", text_or_na(info.area_sq_km.as_ref()));
    let _ = writeln!(out, "• Notable Villages: {villages}");
    let _ = writeln!(out);
    let _ = writeln!(out, "TRANSPORTATION:");
    let _ = writeln!(out, "{}", transportation_lines(bundle));
    let _ = writeln!(out);
    let _ = writeln!(out, "AVAILABLE ACTIVITIES:");
    let _ = writeln!(out, "{}", format_listings(&bundle.activities));
    let _ = writeln!(out);
    let _ = writeln!(out, "BEACHES:");
    let _ = writeln!(out, "{}", format_listings(&bundle.beaches));
    let _ = writeln!(out);
    let _ = writeln!(out, "NOTABLE FOOD AND DRINK:");
    let _ = writeln!(out, "{}", format_listings(&bundle.food_and_drink));
    let _ = writeln!(out);
    let _ = writeln!(out, "TOURIST INFORMATION:");
    let _ = writeln!(
        out,
        "• Visitor Center: {}",
        tourist
            .visitor_center
            .and_then(|center| center.name)
            .filter(|center| !center.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
    );
    let _ = writeln!(
        out,
        "• Best Time to Visit: {}",
        tourist
            .best_time_to_visit
            .filter(|season| !season.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
    );
    let _ = writeln!(out, "• Popular Events: {events}");
    let _ = writeln!(out);
    let _ = writeln!(out, "EMERGENCY SERVICES:");
    let _ = writeln!(out, "• Police: {}", text_or_na(emergency.police.as_ref()));
    let _ = writeln!(
        out,
        "• Hospital: {}",
        emergency
            .hospital
            .and_then(|hospital| hospital.name)
            .filter(|hospital| !hospital.is_empty())
            .unwrap_or_else(|| NOT_AVAILABLE.to_owned())
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "CLIMATE:");
    let _ = writeln!(
        out,
        "• Summer Average High: {}°C",
        celsius(climate.summer_avg_high_celsius)
    );
    let _ = write!(
        out,
        "• Winter Average Low: {}°C",
        celsius(climate.winter_avg_low_celsius)
    );
    out
}

/// Build the chat prompt for `request` from pre-rendered town overviews.
pub fn build_prompt(request: &TripRequest, overviews: &[String]) -> ChatPrompt {
    let user = format!(
        "Create a detailed and engaging itinerary for a Cape Cod vacation with the following \
         parameters:\n\n\
         Dates: {} to {}\n\
         Preferences: {}\n\
         Desired Activities: {}\n\n\
         Towns to Visit:\n{}\n\n\
         {ITINERARY_REQUIREMENTS}",
        request.start_date,
        request.end_date,
        request.preferences.join(", "),
        request.activities.join(", "),
        overviews.join("\n\n"),
    );
    ChatPrompt::new(SYSTEM_PROMPT, user)
}
