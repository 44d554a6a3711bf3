use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Outfit slot a garment fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Top,
    Bottom,
    Footwear,
    Accessory,
}

impl Category {
    /// Every slot of a complete outfit, in outfit order
    pub const ALL: [Category; 4] = [
        Category::Top,
        Category::Bottom,
        Category::Footwear,
        Category::Accessory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Footwear => "footwear",
            Category::Accessory => "accessory",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Style {
    Formal,
    SmartCasual,
    Casual,
    Sporty,
}

impl Style {
    pub const ALL: [Style; 4] = [Style::Formal, Style::SmartCasual, Style::Casual, Style::Sporty];

    /// Styles that pair with a garment of this style
    ///
    /// The relation is directional: callers always key it by the base (or
    /// reference) garment's style, never by the candidate's.
    pub fn compatible_styles(&self) -> &'static [Style] {
        match self {
            Style::Formal => &[Style::Formal, Style::SmartCasual],
            Style::SmartCasual => &[Style::Formal, Style::SmartCasual, Style::Casual],
            Style::Casual => &[Style::SmartCasual, Style::Casual, Style::Sporty],
            Style::Sporty => &[Style::Casual, Style::Sporty],
        }
    }

    pub fn accepts(&self, other: Style) -> bool {
        self.compatible_styles().contains(&other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Formal => "formal",
            Style::SmartCasual => "smart_casual",
            Style::Casual => "casual",
            Style::Sporty => "sporty",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    Unisex,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unisex => "unisex",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        [Gender::Male, Gender::Female, Gender::Unisex]
            .into_iter()
            .find(|g| g.as_str() == value)
    }

    /// Genders a candidate may have to be worn with a base of this gender
    pub fn compatible_genders(&self) -> Vec<Gender> {
        match self {
            Gender::Unisex => vec![Gender::Male, Gender::Female, Gender::Unisex],
            g => vec![*g, Gender::Unisex],
        }
    }
}

/// Price tier, ordered budget < mid < premium < luxury
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceRange {
    Budget,
    Mid,
    Premium,
    Luxury,
}

impl PriceRange {
    pub const ALL: [PriceRange; 4] = [
        PriceRange::Budget,
        PriceRange::Mid,
        PriceRange::Premium,
        PriceRange::Luxury,
    ];

    pub fn tier(&self) -> u8 {
        match self {
            PriceRange::Budget => 0,
            PriceRange::Mid => 1,
            PriceRange::Premium => 2,
            PriceRange::Luxury => 3,
        }
    }

    /// Ordinal distance between two tiers
    pub fn distance(&self, other: PriceRange) -> u8 {
        self.tier().abs_diff(other.tier())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceRange::Budget => "budget",
            PriceRange::Mid => "mid",
            PriceRange::Premium => "premium",
            PriceRange::Luxury => "luxury",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    Office,
    Casual,
    Party,
    Wedding,
    Date,
    Interview,
    Beach,
    Vacation,
    Weekend,
    Outdoor,
    Formal,
    Brunch,
}

impl Occasion {
    pub const ALL: [Occasion; 12] = [
        Occasion::Office,
        Occasion::Casual,
        Occasion::Party,
        Occasion::Wedding,
        Occasion::Date,
        Occasion::Interview,
        Occasion::Beach,
        Occasion::Vacation,
        Occasion::Weekend,
        Occasion::Outdoor,
        Occasion::Formal,
        Occasion::Brunch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Occasion::Office => "office",
            Occasion::Casual => "casual",
            Occasion::Party => "party",
            Occasion::Wedding => "wedding",
            Occasion::Date => "date",
            Occasion::Interview => "interview",
            Occasion::Beach => "beach",
            Occasion::Vacation => "vacation",
            Occasion::Weekend => "weekend",
            Occasion::Outdoor => "outdoor",
            Occasion::Formal => "formal",
            Occasion::Brunch => "brunch",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Summer,
    Winter,
    Spring,
    Fall,
    All,
}

impl Season {
    pub const ALL: [Season; 5] = [
        Season::Summer,
        Season::Winter,
        Season::Spring,
        Season::Fall,
        Season::All,
    ];

    /// Season matching is reflexive and `all` matches every season in both directions
    pub fn matches(&self, other: Season) -> bool {
        *self == other || *self == Season::All || other == Season::All
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Fall => "fall",
            Season::All => "all",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

/// A catalog item as seen by the recommendation engine
///
/// The engine only ever reads garments; the catalog owns and mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Garment {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub sub_category: String,
    /// Lower-cased color name
    pub color: String,
    pub style: Style,
    pub gender: Gender,
    pub price: f64,
    pub price_range: PriceRange,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub occasions: Vec<Occasion>,
    #[serde(default)]
    pub seasons: Vec<Season>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Read from the catalog but never part of a response
    #[serde(default = "default_active", rename = "is_active", skip_serializing)]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Garment {
    pub fn has_occasion(&self, occasion: Occasion) -> bool {
        self.occasions.contains(&occasion)
    }

    /// True if any of the garment's seasons matches `season`
    pub fn fits_season(&self, season: Season) -> bool {
        self.seasons.iter().any(|s| s.matches(season))
    }
}
