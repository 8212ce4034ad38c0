//! Product catalog.
//!
//! The shop sells a small, fixed range of mirrors. The catalog is built once
//! at startup and shared read-only through [`crate::state::AppState`].

use serde::Serialize;

use mirror_core::{CurrencyCode, Price, ProductId, ProductRef};

/// A product offered in the shop.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub category: String,
    pub price: Price,
    pub image_url: String,
    pub description: String,
}

impl Product {
    /// The fields a cart row takes from this product.
    #[must_use]
    pub fn line_source(&self) -> ProductRef<'_> {
        ProductRef {
            id: self.id,
            title: &self.title,
            price: self.price,
            image_url: Some(&self.image_url),
        }
    }
}

/// Read-only product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
}

/// Seed rows: (id, title, category, price in minor units, image, description).
const SEED: &[(i32, &str, &str, u64, &str, &str)] = &[
    (
        1,
        "Oval Wall Mirror",
        "wall",
        2000,
        "/static/img/oval-wall.jpg",
        "Frameless oval mirror, 60 x 45 cm.",
    ),
    (
        2,
        "Sunburst Mirror",
        "wall",
        4500,
        "/static/img/sunburst.jpg",
        "Gold-finish sunburst frame, 80 cm.",
    ),
    (
        3,
        "Arched Floor Mirror",
        "floor",
        12_500,
        "/static/img/arched-floor.jpg",
        "Full-length arched mirror with black metal frame.",
    ),
    (
        4,
        "Leaning Floor Mirror",
        "floor",
        9900,
        "/static/img/leaning-floor.jpg",
        "Oak frame, leans against the wall.",
    ),
    (
        5,
        "LED Vanity Mirror",
        "vanity",
        6800,
        "/static/img/led-vanity.jpg",
        "Touch-dimmable LED ring, tabletop.",
    ),
    (
        6,
        "Magnifying Vanity Mirror",
        "vanity",
        3200,
        "/static/img/magnifying.jpg",
        "Double-sided, 1x and 5x magnification.",
    ),
    (
        7,
        "Pocket Compact Mirror",
        "travel",
        850,
        "/static/img/compact.jpg",
        "Folding compact with leather case.",
    ),
    (
        8,
        "Round Bathroom Mirror",
        "bathroom",
        5400,
        "/static/img/round-bath.jpg",
        "Moisture-resistant backing, 50 cm.",
    ),
    (
        9,
        "Medicine Cabinet Mirror",
        "bathroom",
        14_900,
        "/static/img/cabinet.jpg",
        "Mirrored cabinet with two shelves.",
    ),
    (
        10,
        "Hexagon Mirror Set",
        "wall",
        3900,
        "/static/img/hexagon-set.jpg",
        "Set of six hexagon tiles.",
    ),
];

impl Catalog {
    /// Build the shop's catalog with prices in `currency`.
    #[must_use]
    pub fn seeded(currency: CurrencyCode) -> Self {
        let products = SEED
            .iter()
            .map(|&(id, title, category, minor, image_url, description)| Product {
                id: ProductId::new(id),
                title: title.to_string(),
                category: category.to_string(),
                price: Price::from_minor(minor, currency),
                image_url: image_url.to_string(),
                description: description.to_string(),
            })
            .collect();
        Self { products }
    }

    /// Every product in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Distinct categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Products in `category`, compared case-insensitively.
    ///
    /// `None` and `"all"` return the whole catalog.
    #[must_use]
    pub fn by_category(&self, category: Option<&str>) -> Vec<&Product> {
        match category.map(str::trim) {
            None | Some("") => self.products.iter().collect(),
            Some(c) if c.eq_ignore_ascii_case("all") => self.products.iter().collect(),
            Some(c) => self
                .products
                .iter()
                .filter(|product| product.category.eq_ignore_ascii_case(c))
                .collect(),
        }
    }
}
