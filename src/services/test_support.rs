//! Garment fixtures shared by the service tests.

use crate::models::{Category, Garment, Gender, Occasion, PriceRange, Season, Style};

/// An active unisex casual garment with the given slot and color
pub fn garment(id: i64, category: Category, color: &str) -> Garment {
    Garment {
        id,
        name: format!("{} {} #{}", color, category, id),
        category,
        sub_category: category.as_str().to_string(),
        color: color.to_string(),
        style: Style::Casual,
        gender: Gender::Unisex,
        price: 50.0,
        price_range: PriceRange::Mid,
        image_url: None,
        occasions: vec![Occasion::Casual],
        seasons: vec![Season::All],
        tags: Vec::new(),
        active: true,
    }
}

pub fn styled(mut garment: Garment, style: Style) -> Garment {
    garment.style = style;
    garment
}

pub fn priced(mut garment: Garment, price: f64, range: PriceRange) -> Garment {
    garment.price = price;
    garment.price_range = range;
    garment
}

pub fn with_sub_category(mut garment: Garment, sub_category: &str) -> Garment {
    garment.sub_category = sub_category.to_string();
    garment
}

pub fn with_gender(mut garment: Garment, gender: Gender) -> Garment {
    garment.gender = gender;
    garment
}

pub fn with_occasions(mut garment: Garment, occasions: &[Occasion]) -> Garment {
    garment.occasions = occasions.to_vec();
    garment
}

pub fn with_seasons(mut garment: Garment, seasons: &[Season]) -> Garment {
    garment.seasons = seasons.to_vec();
    garment
}

pub fn inactive(mut garment: Garment) -> Garment {
    garment.active = false;
    garment
}
