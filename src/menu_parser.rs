//! # Menu Parser
//!
//! This module walks a restaurant's hand-written price list from top to bottom
//! and assembles the full, ordered list of menu item records.
//!
//! ## Format
//!
//! ```text
//! SOUP
//!
//! MANCHOW SOUP - 295/325
//! LEMON CORIANDER - 260
//!
//! BEVERAGES
//! RED BULL - MRP
//! ```
//!
//! - A line equal (ignoring case and surrounding whitespace) to one of the
//!   restaurant's known categories starts that category
//! - Any other line under a category is handed to the [`ItemBuilder`]
//! - Lines before the first category heading are dropped
//!
//! Nothing here fails: lines that cannot be read are skipped and reported in
//! [`ParsedMenu::skipped_lines`] for whoever reviews the seed data.

use log::{debug, info, trace};

use crate::config::MenuParserConfig;
use crate::line_builder::ItemBuilder;
use crate::menu_model::MenuItemRecord;

/// Why a non-blank line produced no records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The line came before any recognised category heading
    BeforeFirstCategory,
    /// The line had no `NAME - PRICE` separator
    NotAnItem,
}

/// A non-blank source line that produced no records
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedLine {
    /// Zero-based line number in the source text
    pub line_number: usize,
    pub text: String,
    pub reason: SkipReason,
}

/// Result of parsing one price list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedMenu {
    /// Records in source order
    pub items: Vec<MenuItemRecord>,
    pub skipped_lines: Vec<SkippedLine>,
}

impl ParsedMenu {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Records under the given category, in source order
    pub fn items_in<'a>(
        &'a self,
        category: &'a str,
    ) -> impl Iterator<Item = &'a MenuItemRecord> + 'a {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Records whose veg flag is weaker than `threshold`
    pub fn needing_review(&self, threshold: f32) -> Vec<&MenuItemRecord> {
        self.items
            .iter()
            .filter(|item| item.needs_review(threshold))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssemblyState<'a> {
    NoCategory,
    InCategory(&'a str),
}

/// Parser for one restaurant's price list
pub struct MenuParser {
    restaurant_tag: String,
    categories: Vec<String>,
    config: MenuParserConfig,
}

impl MenuParser {
    /// Create a parser for the given restaurant tag and closed category list
    ///
    /// # Examples
    ///
    /// ```rust
    /// use menus::menu_parser::MenuParser;
    ///
    /// let parser = MenuParser::new("panache", &["SOUP"]);
    /// let menu = parser.parse("SOUP\n\nMANCHOW SOUP - 295/325\n");
    ///
    /// assert_eq!(menu.items.len(), 2);
    /// assert_eq!(menu.items[0].name, "MANCHOW SOUP (Veg)");
    /// assert_eq!(menu.items[1].name, "MANCHOW SOUP (Chicken)");
    /// ```
    pub fn new(restaurant_tag: &str, categories: &[&str]) -> Self {
        Self::with_config(restaurant_tag, categories, MenuParserConfig::default())
    }

    pub fn with_config(
        restaurant_tag: &str,
        categories: &[&str],
        config: MenuParserConfig,
    ) -> Self {
        debug!(
            "Creating MenuParser for '{}' with {} categories, layout={:?}",
            restaurant_tag,
            categories.len(),
            config.variant_layout
        );
        Self {
            restaurant_tag: restaurant_tag.to_string(),
            categories: categories.iter().map(|c| c.trim().to_string()).collect(),
            config,
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// The canonical category name if `line` is a category heading
    pub fn match_category(&self, line: &str) -> Option<&str> {
        let line = line.trim().to_lowercase();
        self.categories
            .iter()
            .find(|category| category.to_lowercase() == line)
            .map(String::as_str)
    }

    /// Parse a full price list
    pub fn parse(&self, text: &str) -> ParsedMenu {
        let mut builder = ItemBuilder::new(&self.restaurant_tag, &self.config);
        let mut menu = ParsedMenu::default();
        let mut state = AssemblyState::NoCategory;

        for (line_number, raw_line) in text.lines().enumerate() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(category) = self.match_category(line) {
                trace!("Line {}: entering category '{}'", line_number, category);
                state = AssemblyState::InCategory(category);
                continue;
            }

            let reason = match state {
                AssemblyState::NoCategory => SkipReason::BeforeFirstCategory,
                AssemblyState::InCategory(category) => {
                    let records = builder.build(category, line);
                    if !records.is_empty() {
                        trace!("Line {}: {} record(s)", line_number, records.len());
                        menu.items.extend(records);
                        continue;
                    }
                    SkipReason::NotAnItem
                }
            };

            debug!("Skipping line {} ({:?}): '{}'", line_number, reason, line);
            menu.skipped_lines.push(SkippedLine {
                line_number,
                text: line.to_string(),
                reason,
            });
        }

        info!(
            "Parsed {} menu items for '{}', skipped {} lines",
            menu.items.len(),
            self.restaurant_tag,
            menu.skipped_lines.len()
        );
        menu
    }

    /// Parse a full price list and keep only the records
    pub fn parse_items(&self, text: &str) -> Vec<MenuItemRecord> {
        self.parse(text).items
    }
}
