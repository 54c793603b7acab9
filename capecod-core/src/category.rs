//! The seven fixed rating categories used to score beaches.
//!
//! The enum offers compile-time safety for weight lookups while the string
//! form matches the keys found in beach rating documents.
//!
//! # Examples
//! ```
//! use capecod_core::Category;
//!
//! assert_eq!(Category::EnvironmentalFactors.as_str(), "environmental_factors");
//! assert_eq!(Category::CrowdingAndAtmosphere.to_string(), "crowding_and_atmosphere");
//! ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Water quality, sand, weather exposure and similar conditions.
    EnvironmentalFactors,
    /// Restrooms, parking, concessions and lifeguards.
    FacilitiesAndServices,
    /// Physical access and safety provisions.
    AccessibilityAndSafety,
    /// Swimming, surfing, fishing and other activities.
    RecreationalOpportunities,
    /// Scenery and wildlife viewing.
    NaturalBeautyAndWildlife,
    /// Crowd levels and family friendliness.
    CrowdingAndAtmosphere,
    /// Conservation measures in place at the beach.
    EnvironmentalProtection,
}

impl Category {
    /// Every category in weight order.
    pub const ALL: [Self; 7] = [
        Self::EnvironmentalFactors,
        Self::FacilitiesAndServices,
        Self::AccessibilityAndSafety,
        Self::RecreationalOpportunities,
        Self::NaturalBeautyAndWildlife,
        Self::CrowdingAndAtmosphere,
        Self::EnvironmentalProtection,
    ];

    /// Return the category as the snake-case key used in rating documents.
    ///
    /// # Examples
    /// ```
    /// use capecod_core::Category;
    ///
    /// assert_eq!(Category::EnvironmentalProtection.as_str(), "environmental_protection");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EnvironmentalFactors => "environmental_factors",
            Self::FacilitiesAndServices => "facilities_and_services",
            Self::AccessibilityAndSafety => "accessibility_and_safety",
            Self::RecreationalOpportunities => "recreational_opportunities",
            Self::NaturalBeautyAndWildlife => "natural_beauty_and_wildlife",
            Self::CrowdingAndAtmosphere => "crowding_and_atmosphere",
            Self::EnvironmentalProtection => "environmental_protection",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == key)
            .ok_or_else(|| format!("unknown rating category '{s}'"))
    }
}
