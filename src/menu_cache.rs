//! # Menu Cache
//!
//! Parsed admin menus are computed at most once per process. Each restaurant
//! has a [`CachedMenu`] in a `static`; the first caller parses the embedded
//! text and every later caller gets the same slice back. The source text is
//! compiled in, so there is nothing to invalidate.

use std::sync::OnceLock;

use log::info;

use crate::config::MenuParserConfig;
use crate::menu_model::MenuItemRecord;
use crate::restaurants::Restaurant;

static PANACHE: CachedMenu = CachedMenu::new(Restaurant::Panache);
static CAFE_AFTER_HOURS: CachedMenu = CachedMenu::new(Restaurant::CafeAfterHours);
static SYMPOSIUM: CachedMenu = CachedMenu::new(Restaurant::Symposium);

/// A restaurant's admin menu, parsed on first access
#[derive(Debug)]
pub struct CachedMenu {
    restaurant: Restaurant,
    items: OnceLock<Vec<MenuItemRecord>>,
}

impl CachedMenu {
    pub const fn new(restaurant: Restaurant) -> Self {
        Self {
            restaurant,
            items: OnceLock::new(),
        }
    }

    /// The parsed records, computing them if this is the first call
    ///
    /// Two threads racing on the first call may both parse; only one result is
    /// kept and both get it.
    pub fn get(&self) -> &[MenuItemRecord] {
        self.items.get_or_init(|| {
            let items = self
                .restaurant
                .parser(MenuParserConfig::default())
                .parse_items(self.restaurant.menu_text());
            info!(
                "Cached {} admin menu items for {}",
                items.len(),
                self.restaurant
            );
            items
        })
    }

    /// Whether the menu has already been parsed
    pub fn is_computed(&self) -> bool {
        self.items.get().is_some()
    }

    pub fn restaurant(&self) -> Restaurant {
        self.restaurant
    }
}

fn cache_for(restaurant: Restaurant) -> &'static CachedMenu {
    match restaurant {
        Restaurant::Panache => &PANACHE,
        Restaurant::CafeAfterHours => &CAFE_AFTER_HOURS,
        Restaurant::Symposium => &SYMPOSIUM,
    }
}

/// The cached admin menu of a built-in restaurant
pub fn admin_menu(restaurant: Restaurant) -> &'static [MenuItemRecord] {
    cache_for(restaurant).get()
}

pub fn panache_admin_menu() -> &'static [MenuItemRecord] {
    admin_menu(Restaurant::Panache)
}

pub fn cafe_after_hours_admin_menu() -> &'static [MenuItemRecord] {
    admin_menu(Restaurant::CafeAfterHours)
}

pub fn symposium_admin_menu() -> &'static [MenuItemRecord] {
    admin_menu(Restaurant::Symposium)
}
