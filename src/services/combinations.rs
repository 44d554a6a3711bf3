//! Bounded outfit enumeration.
//!
//! Outfits are produced lazily from the Cartesian product
//! top × bottom × footwear × accessory-combination, in exactly that nesting
//! order (top outermost). The order decides which outfits survive the cap, so
//! it must not change.

use crate::models::{round2, Category, Garment, Outfit};

use super::compatibility::MAX_PER_CATEGORY;

/// Outfits produced per request before scoring
pub const MAX_COMBINATIONS: usize = 30;
/// Accessory combinations considered per outfit
pub const MAX_ACCESSORY_COMBINATIONS: usize = 4;
/// Single accessories are drawn from this many leading candidates
const SINGLE_ACCESSORY_POOL: usize = 3;
/// Accessory pairs are drawn from this many leading candidates
const PAIR_ACCESSORY_POOL: usize = 4;

/// Candidate garments for each outfit slot
#[derive(Debug, Clone, Default)]
pub struct SlotCandidates {
    pub tops: Vec<Garment>,
    pub bottoms: Vec<Garment>,
    pub footwear: Vec<Garment>,
    pub accessories: Vec<Garment>,
}

impl SlotCandidates {
    /// Slot lists where the base garment's own slot holds only the base
    pub fn around(base: &Garment) -> Self {
        let mut slots = Self::default();
        *slots.slot_mut(base.category) = vec![base.clone()];
        slots
    }

    pub fn slot_mut(&mut self, category: Category) -> &mut Vec<Garment> {
        match category {
            Category::Top => &mut self.tops,
            Category::Bottom => &mut self.bottoms,
            Category::Footwear => &mut self.footwear,
            Category::Accessory => &mut self.accessories,
        }
    }
}

/// Accessory sets to try with each top/bottom/footwear triple
///
/// Singles come from the first three candidates, distinct-sub-category pairs
/// from the first four, and the result is cut to four sets. An empty list
/// yields one empty set.
pub fn accessory_combinations(accessories: &[Garment]) -> Vec<Vec<&Garment>> {
    if accessories.is_empty() {
        return vec![Vec::new()];
    }

    let mut combos: Vec<Vec<&Garment>> = accessories
        .iter()
        .take(SINGLE_ACCESSORY_POOL)
        .map(|a| vec![a])
        .collect();

    let pool = &accessories[..accessories.len().min(PAIR_ACCESSORY_POOL)];
    for (i, first) in pool.iter().enumerate() {
        for second in &pool[i + 1..] {
            if first.sub_category != second.sub_category {
                combos.push(vec![first, second]);
            }
        }
    }

    combos.truncate(MAX_ACCESSORY_COMBINATIONS);
    combos
}

/// Lazy, capped iterator over outfit candidates
pub struct OutfitCombinations<'a> {
    tops: &'a [Garment],
    bottoms: &'a [Garment],
    footwear: &'a [Garment],
    accessory_sets: Vec<Vec<&'a Garment>>,
    id_prefix: String,
    // Odometer over (top, bottom, footwear, accessory set); last index moves fastest.
    cursor: [usize; 4],
    emitted: usize,
    limit: usize,
}

impl<'a> OutfitCombinations<'a> {
    /// Enumerates outfits from `slots`, naming them `{id_prefix}_{n}`
    pub fn new(slots: &'a SlotCandidates, id_prefix: impl Into<String>) -> Self {
        Self::with_limit(slots, id_prefix, MAX_COMBINATIONS)
    }

    pub fn with_limit(slots: &'a SlotCandidates, id_prefix: impl Into<String>, limit: usize) -> Self {
        let capped = |list: &'a [Garment]| &list[..list.len().min(MAX_PER_CATEGORY)];
        Self {
            tops: capped(slots.tops.as_slice()),
            bottoms: capped(slots.bottoms.as_slice()),
            footwear: capped(slots.footwear.as_slice()),
            accessory_sets: accessory_combinations(&slots.accessories),
            id_prefix: id_prefix.into(),
            cursor: [0; 4],
            emitted: 0,
            limit,
        }
    }

    fn dimensions(&self) -> [usize; 4] {
        [
            self.tops.len(),
            self.bottoms.len(),
            self.footwear.len(),
            self.accessory_sets.len(),
        ]
    }

    fn exhausted(&self) -> bool {
        let dims = self.dimensions();
        dims.iter().any(|d| *d == 0) || self.cursor[0] >= dims[0]
    }

    fn advance(&mut self) {
        let dims = self.dimensions();
        for level in (0..4).rev() {
            self.cursor[level] += 1;
            if level == 0 || self.cursor[level] < dims[level] {
                return;
            }
            self.cursor[level] = 0;
        }
    }
}

impl Iterator for OutfitCombinations<'_> {
    type Item = Outfit;

    fn next(&mut self) -> Option<Outfit> {
        if self.emitted >= self.limit || self.exhausted() {
            return None;
        }

        let [t, b, f, a] = self.cursor;
        let top = &self.tops[t];
        let bottom = &self.bottoms[b];
        let footwear = &self.footwear[f];
        let accessories: Vec<Garment> = self.accessory_sets[a].iter().map(|g| (*g).clone()).collect();

        let total = top.price
            + bottom.price
            + footwear.price
            + accessories.iter().map(|g| g.price).sum::<f64>();

        let outfit = Outfit {
            id: format!("{}_{}", self.id_prefix, self.emitted),
            top: top.clone(),
            bottom: bottom.clone(),
            footwear: footwear.clone(),
            accessories,
            total_price: round2(total),
        };

        self.emitted += 1;
        self.advance();
        Some(outfit)
    }
}
