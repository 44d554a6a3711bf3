//! Weighted multi-factor outfit scoring.
//!
//! | factor           | weight |
//! |------------------|--------|
//! | color harmony    | 0.30   |
//! | style match      | 0.25   |
//! | occasion fit     | 0.20   |
//! | season match     | 0.15   |
//! | budget alignment | 0.10   |

use crate::models::{
    round2, Explanation, Garment, Occasion, Outfit, Preferences, PriceRange, ScoreBreakdown,
    ScoredOutfit, Season,
};

use super::color::ColorHarmony;

/// Factor score used when the caller expressed no preference
const NEUTRAL_FACTOR: f64 = 0.8;
/// Credit for a style that is compatible but not identical
const COMPATIBLE_STYLE_CREDIT: f64 = 0.7;
const ADJACENT_TIER_CREDIT: f64 = 0.7;
const DISTANT_TIER_CREDIT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub color_harmony: f64,
    pub style_match: f64,
    pub occasion_fit: f64,
    pub season_match: f64,
    pub budget_alignment: f64,
}

impl ScoringWeights {
    pub const STANDARD: ScoringWeights = ScoringWeights {
        color_harmony: 0.30,
        style_match: 0.25,
        occasion_fit: 0.20,
        season_match: 0.15,
        budget_alignment: 0.10,
    };

    pub fn total(&self) -> f64 {
        self.color_harmony
            + self.style_match
            + self.occasion_fit
            + self.season_match
            + self.budget_alignment
    }
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Overall score plus the rounded per-factor breakdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutfitScore {
    pub overall: f64,
    pub breakdown: ScoreBreakdown,
}

pub struct ScoringEngine<'a> {
    colors: &'a ColorHarmony,
    weights: ScoringWeights,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(colors: &'a ColorHarmony) -> Self {
        Self {
            colors,
            weights: ScoringWeights::STANDARD,
        }
    }

    /// Scores the outfit's items in order top, bottom, footwear, accessories
    pub fn score(&self, outfit: &Outfit, preferences: &Preferences) -> OutfitScore {
        self.score_items(&outfit.items(), preferences)
    }

    pub fn score_items(&self, items: &[&Garment], preferences: &Preferences) -> OutfitScore {
        let color_harmony = self.colors.outfit_color_score(items);
        let style_match = style_score(items);
        let occasion_fit = occasion_score(items, preferences.occasion);
        let season_match = season_score(items, preferences.season);
        let budget_alignment = budget_score(items, preferences.budget);

        let w = &self.weights;
        let overall = color_harmony * w.color_harmony
            + style_match * w.style_match
            + occasion_fit * w.occasion_fit
            + season_match * w.season_match
            + budget_alignment * w.budget_alignment;

        OutfitScore {
            overall: round2(overall),
            breakdown: ScoreBreakdown {
                color_harmony: round2(color_harmony),
                style_match: round2(style_match),
                occasion_fit: round2(occasion_fit),
                season_match: round2(season_match),
                budget_alignment: round2(budget_alignment),
            },
        }
    }

    /// Scores and explains one outfit
    pub fn score_outfit(&self, outfit: Outfit, preferences: &Preferences) -> ScoredOutfit {
        let score = self.score(&outfit, preferences);
        ScoredOutfit {
            outfit,
            score: score.overall,
            breakdown: score.breakdown,
            explanation: explain(&score),
        }
    }
}

/// Agreement of every item's style with the first item's style
fn style_score(items: &[&Garment]) -> f64 {
    let Some((reference, rest)) = items.split_first() else {
        return 1.0;
    };
    if rest.is_empty() {
        return 1.0;
    }

    let matched: f64 = rest
        .iter()
        .map(|item| {
            if item.style == reference.style {
                1.0
            } else if reference.style.accepts(item.style) {
                COMPATIBLE_STYLE_CREDIT
            } else {
                0.0
            }
        })
        .sum();

    matched / rest.len() as f64
}

fn fraction_matching(items: &[&Garment], predicate: impl Fn(&Garment) -> bool) -> f64 {
    if items.is_empty() {
        return 0.0;
    }
    let matched = items.iter().filter(|g| predicate(g)).count();
    matched as f64 / items.len() as f64
}

fn occasion_score(items: &[&Garment], target: Option<Occasion>) -> f64 {
    match target {
        None => NEUTRAL_FACTOR,
        Some(occasion) => fraction_matching(items, |g| g.has_occasion(occasion)),
    }
}

fn season_score(items: &[&Garment], target: Option<Season>) -> f64 {
    match target {
        None => NEUTRAL_FACTOR,
        Some(season) => fraction_matching(items, |g| g.fits_season(season)),
    }
}

fn budget_score(items: &[&Garment], target: Option<PriceRange>) -> f64 {
    let Some(target) = target else {
        return NEUTRAL_FACTOR;
    };
    if items.is_empty() {
        return NEUTRAL_FACTOR;
    }

    let total: f64 = items
        .iter()
        .map(|item| match item.price_range.distance(target) {
            0 => 1.0,
            1 => ADJACENT_TIER_CREDIT,
            _ => DISTANT_TIER_CREDIT,
        })
        .sum();

    total / items.len() as f64
}

/// Rating label and remarks for a score
pub fn explain(score: &OutfitScore) -> Explanation {
    let b = &score.breakdown;
    let mut details = Vec::new();

    if b.color_harmony >= 0.8 {
        details.push("Excellent color coordination");
    } else if b.color_harmony >= 0.6 {
        details.push("Good color matching");
    } else {
        details.push("Colors could be better coordinated");
    }

    if b.style_match >= 0.8 {
        details.push("Consistent style throughout");
    } else if b.style_match >= 0.6 {
        details.push("Styles work well together");
    }

    if b.occasion_fit >= 0.8 {
        details.push("Perfect for the occasion");
    }

    if b.season_match >= 0.8 {
        details.push("Season-appropriate choices");
    }

    let rating = if score.overall >= 0.85 {
        "Excellent"
    } else if score.overall >= 0.70 {
        "Good"
    } else if score.overall >= 0.55 {
        "Fair"
    } else {
        "Needs Improvement"
    };

    Explanation {
        rating: rating.to_string(),
        details: details.into_iter().map(String::from).collect(),
    }
}
