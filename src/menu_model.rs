//! # Menu Item Data Model
//!
//! This module defines the records produced when a restaurant's admin price list
//! is parsed. A record is one orderable dish at one price; multi-priced lines are
//! either split into several records or grouped into one record with parallel
//! variant arrays, depending on the parser configuration.
//!
//! ## Usage
//!
//! ```rust
//! use menus::menu_model::MenuItemRecord;
//!
//! let item = MenuItemRecord::new("panache-soup-manchow-soup", "MANCHOW SOUP", "SOUP", 295)
//!     .with_veg(true, 0.7)
//!     .with_variant("Veg");
//!
//! assert_eq!(item.price, 295);
//! assert_eq!(item.variant.as_deref(), Some("Veg"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Description stored on records whose source line carried no fixed price
pub const MRP_DESCRIPTION: &str = "MRP";

/// A single menu item as emitted by the parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRecord {
    /// Deterministic slug id, unique within one restaurant's parse pass
    pub id: String,

    /// Display name; split variants carry their label in parentheses
    pub name: String,

    /// Usually empty at parse time, `"MRP"` for unpriced lines
    pub description: String,

    /// Price in whole rupees
    pub price: u32,

    /// Category heading the item was found under
    pub category: String,

    /// Inferred vegetarian flag
    pub is_veg: bool,

    /// Strength of the signal behind `is_veg` (0.0 to 1.0)
    pub veg_confidence: f32,

    pub rating: f32,

    /// Preparation time in minutes
    pub preparation_time: u32,

    pub image: String,

    pub is_available: bool,

    /// Label of this record's variant when a multi-priced line was split
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    /// Variant labels when a multi-priced line was kept as one record
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<String>,

    /// Prices parallel to `variants`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub variant_prices: Vec<u32>,
}

impl MenuItemRecord {
    /// Create a record with the given identity and price and neutral defaults
    pub fn new(id: &str, name: &str, category: &str, price: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price,
            category: category.to_string(),
            is_veg: true,
            veg_confidence: 0.0,
            rating: 0.0,
            preparation_time: 0,
            image: String::new(),
            is_available: true,
            variant: None,
            variants: Vec::new(),
            variant_prices: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Set the vegetarian flag along with the confidence of that inference
    pub fn with_veg(mut self, is_veg: bool, confidence: f32) -> Self {
        self.is_veg = is_veg;
        self.veg_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_variant(mut self, label: &str) -> Self {
        self.variant = Some(label.to_string());
        self
    }

    /// Attach parallel variant arrays (grouped layout)
    pub fn with_variants(mut self, labels: Vec<String>, prices: Vec<u32>) -> Self {
        self.variants = labels;
        self.variant_prices = prices;
        self
    }

    /// Apply the seeding defaults that admins edit afterwards
    pub fn with_defaults(mut self, defaults: &ItemDefaults) -> Self {
        self.rating = defaults.rating;
        self.preparation_time = defaults.preparation_time;
        self.image = defaults.image.clone();
        self.is_available = defaults.is_available;
        self
    }

    /// Whether the source line had no fixed price
    pub fn is_mrp(&self) -> bool {
        self.price == 0 && self.description == MRP_DESCRIPTION
    }

    /// Whether this record holds grouped variants rather than a single price
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Whether the vegetarian flag is weak enough that an admin should look at it
    pub fn needs_review(&self, threshold: f32) -> bool {
        self.veg_confidence < threshold
    }
}

/// Constant field values applied to every freshly parsed record
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDefaults {
    pub rating: f32,
    /// Minutes
    pub preparation_time: u32,
    pub image: String,
    pub is_available: bool,
}

impl Default for ItemDefaults {
    fn default() -> Self {
        Self {
            rating: 4.0,
            preparation_time: 20,
            image: "/images/menu-placeholder.jpg".to_string(),
            is_available: true,
        }
    }
}

impl fmt::Display for MenuItemRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mrp() {
            write!(f, "{} - MRP", self.name)?;
        } else if self.has_variants() {
            let prices: Vec<String> = self
                .variants
                .iter()
                .zip(&self.variant_prices)
                .map(|(label, price)| format!("{label} ₹{price}"))
                .collect();
            write!(f, "{} - {}", self.name, prices.join(" / "))?;
        } else {
            write!(f, "{} - ₹{}", self.name, self.price)?;
        }

        write!(f, " [{}]", if self.is_veg { "veg" } else { "non-veg" })
    }
}
