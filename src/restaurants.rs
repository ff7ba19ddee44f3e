//! # Restaurants Module
//!
//! The built-in restaurants, their closed category lists and their embedded
//! admin price lists. All three lists are written in the same format, see
//! [`crate::menu_parser`].

use std::fmt;
use std::str::FromStr;

use crate::config::MenuParserConfig;
use crate::errors::MenuError;
use crate::menu_cache;
use crate::menu_model::MenuItemRecord;
use crate::menu_parser::MenuParser;

const PANACHE_CATEGORIES: &[&str] = &[
    "SOUP",
    "SALADS",
    "STARTERS (VEG)",
    "STARTERS (NON-VEG)",
    "CHINESE",
    "MAIN COURSE",
    "BREADS",
    "DESSERTS",
    "BEVERAGES",
];

const CAFE_AFTER_HOURS_CATEGORIES: &[&str] = &[
    "ALL DAY BREAKFAST",
    "SOUPS",
    "SANDWICHES",
    "PIZZA",
    "PASTA",
    "BURGERS",
    "SHAKES",
    "HOT BEVERAGES",
    "DESSERTS",
];

const SYMPOSIUM_CATEGORIES: &[&str] = &[
    "SOUPS",
    "APPETIZERS",
    "TANDOOR",
    "BIRYANI",
    "MAIN COURSE",
    "BREADS",
    "BEVERAGES",
];

const PANACHE_MENU: &str = include_str!("../menus/panache.txt");
const CAFE_AFTER_HOURS_MENU: &str = include_str!("../menus/cafe_after_hours.txt");
const SYMPOSIUM_MENU: &str = include_str!("../menus/symposium.txt");

/// A restaurant with a built-in admin menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Restaurant {
    Panache,
    CafeAfterHours,
    Symposium,
}

impl Restaurant {
    pub const ALL: [Restaurant; 3] = [
        Restaurant::Panache,
        Restaurant::CafeAfterHours,
        Restaurant::Symposium,
    ];

    /// Identifier used as id prefix and as `restaurant_id` when seeding
    pub fn slug(self) -> &'static str {
        match self {
            Restaurant::Panache => "panache",
            Restaurant::CafeAfterHours => "cafe-after-hours",
            Restaurant::Symposium => "symposium",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Restaurant::Panache => "Panache",
            Restaurant::CafeAfterHours => "Cafe After Hours",
            Restaurant::Symposium => "Symposium",
        }
    }

    /// The ordered, closed list of category headings for this restaurant
    pub fn categories(self) -> &'static [&'static str] {
        match self {
            Restaurant::Panache => PANACHE_CATEGORIES,
            Restaurant::CafeAfterHours => CAFE_AFTER_HOURS_CATEGORIES,
            Restaurant::Symposium => SYMPOSIUM_CATEGORIES,
        }
    }

    /// The raw admin price list
    pub fn menu_text(self) -> &'static str {
        match self {
            Restaurant::Panache => PANACHE_MENU,
            Restaurant::CafeAfterHours => CAFE_AFTER_HOURS_MENU,
            Restaurant::Symposium => SYMPOSIUM_MENU,
        }
    }

    pub fn parser(self, config: MenuParserConfig) -> MenuParser {
        MenuParser::with_config(self.slug(), self.categories(), config)
    }

    /// Parsed admin menu, computed on first use and cached for the process
    pub fn admin_menu(self) -> &'static [MenuItemRecord] {
        menu_cache::admin_menu(self)
    }
}

impl fmt::Display for Restaurant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Restaurant {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '_'], "-");
        Restaurant::ALL
            .into_iter()
            .find(|restaurant| restaurant.slug() == wanted)
            .ok_or_else(|| MenuError::UnknownRestaurant(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("panache".parse::<Restaurant>().unwrap(), Restaurant::Panache);
        assert_eq!("Cafe After Hours".parse::<Restaurant>().unwrap(), Restaurant::CafeAfterHours);
        assert_eq!("cafe_after_hours".parse::<Restaurant>().unwrap(), Restaurant::CafeAfterHours);
        assert_eq!(
            "dominos".parse::<Restaurant>(),
            Err(MenuError::UnknownRestaurant("dominos".to_string()))
        );
    }

    #[test]
    fn test_every_menu_starts_with_a_known_category() {
        for restaurant in Restaurant::ALL {
            let parser = restaurant.parser(MenuParserConfig::default());
            let first_line = restaurant
                .menu_text()
                .lines()
                .find(|line| !line.trim().is_empty())
                .unwrap();
            assert!(
                parser.match_category(first_line).is_some(),
                "{} menu starts with '{}'",
                restaurant,
                first_line
            );
        }
    }

    #[test]
    fn test_menus_have_no_unreadable_lines() {
        for restaurant in Restaurant::ALL {
            let menu = restaurant.parser(MenuParserConfig::default()).parse(restaurant.menu_text());
            assert!(
                menu.skipped_lines.is_empty(),
                "{} has skipped lines: {:?}",
                restaurant,
                menu.skipped_lines
            );
        }
    }
}
