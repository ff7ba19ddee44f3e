//! # Seed Documents
//!
//! Maps parsed menu records to the documents inserted when a restaurant's menu
//! table is empty, and checks id uniqueness before menus of several restaurants
//! are merged into one table.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::MenuError;
use crate::menu_model::MenuItemRecord;
use crate::restaurants::Restaurant;

/// A menu record as written to the database on first seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedDocument {
    #[serde(flatten)]
    pub item: MenuItemRecord,
    pub restaurant_id: String,
    /// Set once an admin edits the row; seeding never overwrites customised rows
    pub is_admin_customized: bool,
    pub seeded_at: DateTime<Utc>,
}

impl SeedDocument {
    pub fn new(restaurant_id: &str, item: MenuItemRecord, seeded_at: DateTime<Utc>) -> Self {
        Self {
            item,
            restaurant_id: restaurant_id.to_string(),
            is_admin_customized: false,
            seeded_at,
        }
    }
}

/// Build the insertion documents for one restaurant's records
pub fn seed_documents(restaurant: Restaurant, items: &[MenuItemRecord]) -> Vec<SeedDocument> {
    let seeded_at = Utc::now();
    debug!(
        "Preparing {} seed documents for {}",
        items.len(),
        restaurant.slug()
    );

    items
        .iter()
        .cloned()
        .map(|item| SeedDocument::new(restaurant.slug(), item, seeded_at))
        .collect()
}

/// Check that no two records share an id, within or across menus
///
/// Each menu is labelled by the name used in the error (usually the restaurant
/// slug).
///
/// # Examples
///
/// ```rust
/// use menus::menu_model::MenuItemRecord;
/// use menus::seed::verify_unique_ids;
///
/// let a = vec![MenuItemRecord::new("soup-1", "SOUP", "SOUPS", 100)];
/// let b = vec![MenuItemRecord::new("soup-1", "SOUP", "SOUPS", 120)];
///
/// assert!(verify_unique_ids([("a", a.as_slice())]).is_ok());
/// assert!(verify_unique_ids([("a", a.as_slice()), ("b", b.as_slice())]).is_err());
/// ```
pub fn verify_unique_ids<'a, I>(menus: I) -> Result<(), MenuError>
where
    I: IntoIterator<Item = (&'a str, &'a [MenuItemRecord])>,
{
    let mut owners: HashMap<&'a str, &'a str> = HashMap::new();

    for (label, items) in menus {
        for item in items {
            if let Some(first) = owners.insert(item.id.as_str(), label) {
                return Err(MenuError::DuplicateId {
                    id: item.id.clone(),
                    first: first.to_string(),
                    second: label.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Check id uniqueness across every built-in restaurant
pub fn verify_builtin_menus() -> Result<(), MenuError> {
    verify_unique_ids(
        Restaurant::ALL
            .into_iter()
            .map(|restaurant| (restaurant.slug(), restaurant.admin_menu())),
    )
}
