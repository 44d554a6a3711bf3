//! Color compatibility and harmony scoring.
//!
//! Two related but distinct contracts live here: [`ColorHarmony::are_compatible`]
//! is a hard filter, while [`ColorHarmony::harmony_score`] is a continuous
//! ranking signal that can be non-zero for colors that are not compatible.

use std::collections::HashMap;

use crate::models::Garment;

/// Adjacency-list entry meaning "pairs with every color"
const UNIVERSAL: &str = "all";

const NEUTRALS: &str = "neutrals";

const COLOR_GROUPS: &[(&str, &[&str])] = &[
    (
        NEUTRALS,
        &["white", "black", "gray", "grey", "beige", "cream", "ivory", "charcoal"],
    ),
    (
        "blues",
        &["blue", "navy", "light_blue", "royal_blue", "sky_blue", "teal", "turquoise"],
    ),
    (
        "earthy",
        &["brown", "tan", "khaki", "olive", "camel", "burgundy", "maroon", "rust"],
    ),
    ("warm", &["red", "orange", "yellow", "coral", "peach", "gold"]),
    ("cool", &["green", "purple", "pink", "lavender", "mint"]),
];

const COLOR_ADJACENCY: &[(&str, &[&str])] = &[
    // Neutrals go with everything
    ("white", &[UNIVERSAL]),
    ("black", &[UNIVERSAL]),
    ("gray", &[UNIVERSAL]),
    ("grey", &[UNIVERSAL]),
    ("beige", &[UNIVERSAL]),
    ("cream", &[UNIVERSAL]),
    // Blues
    (
        "navy",
        &["white", "gray", "beige", "khaki", "brown", "tan", "light_blue", "pink", "burgundy", "cream"],
    ),
    (
        "blue",
        &["white", "gray", "beige", "khaki", "brown", "navy", "tan", "cream"],
    ),
    (
        "light_blue",
        &["white", "navy", "gray", "beige", "khaki", "brown", "tan", "pink", "cream"],
    ),
    // Earth tones
    (
        "brown",
        &["white", "beige", "navy", "blue", "green", "olive", "tan", "cream", "khaki"],
    ),
    (
        "tan",
        &["white", "navy", "blue", "brown", "olive", "burgundy", "green", "cream"],
    ),
    (
        "khaki",
        &["white", "navy", "blue", "brown", "olive", "burgundy", "black", "cream"],
    ),
    (
        "olive",
        &["white", "beige", "khaki", "tan", "brown", "navy", "cream", "gray"],
    ),
    (
        "burgundy",
        &["white", "gray", "beige", "navy", "tan", "khaki", "cream", "black"],
    ),
    // Warm
    ("red", &["white", "black", "gray", "navy", "beige", "blue"]),
    ("pink", &["white", "gray", "navy", "blue", "beige", "black"]),
    // Cool
    (
        "green",
        &["white", "beige", "khaki", "brown", "tan", "navy", "gray"],
    ),
    // Metallics, mostly accessories
    ("silver", &[UNIVERSAL]),
    (
        "gold",
        &["navy", "black", "brown", "white", "burgundy", "olive"],
    ),
];

/// Immutable color rule tables, built once at startup and shared by reference
#[derive(Debug, Clone)]
pub struct ColorHarmony {
    adjacency: HashMap<&'static str, &'static [&'static str]>,
    groups: Vec<(&'static str, &'static [&'static str])>,
}

impl Default for ColorHarmony {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorHarmony {
    /// Builds the standard color tables
    pub fn new() -> Self {
        Self {
            adjacency: COLOR_ADJACENCY.iter().copied().collect(),
            groups: COLOR_GROUPS.to_vec(),
        }
    }

    fn harmony_of(&self, color: &str) -> &'static [&'static str] {
        self.adjacency.get(color).copied().unwrap_or(&[])
    }

    fn is_universal(&self, color: &str) -> bool {
        self.harmony_of(color).contains(&UNIVERSAL)
    }

    fn directly_paired(&self, c1: &str, c2: &str) -> bool {
        self.harmony_of(c1).contains(&c2) || self.harmony_of(c2).contains(&c1)
    }

    fn both_neutral(&self, c1: &str, c2: &str) -> bool {
        self.groups
            .iter()
            .find(|(name, _)| *name == NEUTRALS)
            .is_some_and(|(_, colors)| colors.contains(&c1) && colors.contains(&c2))
    }

    fn same_group(&self, c1: &str, c2: &str) -> bool {
        self.groups
            .iter()
            .any(|(_, colors)| colors.contains(&c1) && colors.contains(&c2))
    }

    /// Whether two colors may be worn together at all
    pub fn are_compatible(&self, color1: &str, color2: &str) -> bool {
        let c1 = color1.to_lowercase();
        let c2 = color2.to_lowercase();

        c1 == c2
            || self.is_universal(&c1)
            || self.is_universal(&c2)
            || self.directly_paired(&c1, &c2)
            || self.both_neutral(&c1, &c2)
    }

    /// How well two colors go together, in `[0, 1]`
    ///
    /// An exact match scores below a complementary pair to reward variety.
    pub fn harmony_score(&self, color1: &str, color2: &str) -> f64 {
        let c1 = color1.to_lowercase();
        let c2 = color2.to_lowercase();

        if c1 == c2 {
            0.7
        } else if self.is_universal(&c1) || self.is_universal(&c2) {
            0.9
        } else if self.directly_paired(&c1, &c2) {
            1.0
        } else if self.both_neutral(&c1, &c2) {
            0.85
        } else if self.same_group(&c1, &c2) {
            0.75
        } else {
            0.3
        }
    }

    /// Mean pairwise harmony across an outfit; 1.0 for fewer than two items
    pub fn outfit_color_score(&self, items: &[&Garment]) -> f64 {
        if items.len() < 2 {
            return 1.0;
        }

        let mut total = 0.0;
        let mut comparisons = 0usize;
        for (i, first) in items.iter().enumerate() {
            for second in &items[i + 1..] {
                total += self.harmony_score(&first.color, &second.color);
                comparisons += 1;
            }
        }

        total / comparisons as f64
    }

    /// Every color named in the tables
    pub fn known_colors(&self) -> Vec<&'static str> {
        let mut colors: Vec<&'static str> = self
            .groups
            .iter()
            .flat_map(|(_, colors)| colors.iter().copied())
            .chain(self.adjacency.keys().copied())
            .collect();
        colors.sort_unstable();
        colors.dedup();
        colors
    }
}
