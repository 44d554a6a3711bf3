use serde::{Deserialize, Serialize};

use super::Garment;

/// A candidate outfit assembled around a base garment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outfit {
    pub id: String,
    pub top: Garment,
    pub bottom: Garment,
    pub footwear: Garment,
    /// Zero to two accessories with distinct sub-categories
    pub accessories: Vec<Garment>,
    pub total_price: f64,
}

impl Outfit {
    /// Items in scoring order: top, bottom, footwear, then accessories
    pub fn items(&self) -> Vec<&Garment> {
        let mut items = vec![&self.top, &self.bottom, &self.footwear];
        items.extend(self.accessories.iter());
        items
    }

    /// Sorted item ids, identifying the combination regardless of slot order
    pub fn signature(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.items().iter().map(|g| g.id).collect();
        ids.sort_unstable();
        ids
    }
}

/// Per-factor scores, each rounded to two decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub color_harmony: f64,
    pub style_match: f64,
    pub occasion_fit: f64,
    pub season_match: f64,
    pub budget_alignment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub rating: String,
    /// Remarks in fixed factor order
    pub details: Vec<String>,
}

/// An outfit with its overall score and the reasoning behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredOutfit {
    #[serde(flatten)]
    pub outfit: Outfit,
    pub score: f64,
    #[serde(rename = "score_breakdown")]
    pub breakdown: ScoreBreakdown,
    pub explanation: Explanation,
}

/// Rounds to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
