//! # Line-to-Item Builder
//!
//! Turns one price-list line (`"CHILLI PANEER/CHICKEN - 280/320"`) into menu item
//! records, combining the price parser, the variant label extractor and the
//! vegetarian classifier. Lines without a `NAME - PRICE` separator are not item
//! lines and produce nothing.

use std::collections::HashMap;

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

use crate::config::{MenuParserConfig, VariantLayout};
use crate::menu_model::{MenuItemRecord, MRP_DESCRIPTION};
use crate::price_parser::{is_mrp, parse_prices};
use crate::variant_labels::{extract_variant_labels, VariantLabels};
use crate::veg_classifier::classify;

// "NAME - 295/345", "NAME - ₹295", "NAME- ₹295" or "NAME - MRP". The separator alone
// decides; whatever follows it goes to the price parser.
const ITEM_LINE_PATTERN: &str = r"^(?P<name>.+?)(?:\s+-\s*₹?|\s*-\s*₹)\s*(?P<prices>\S.*)$";

lazy_static! {
    static ref ITEM_LINE: Regex =
        Regex::new(ITEM_LINE_PATTERN).expect("Item line pattern should be valid");
}

/// Split an item line into its name and trailing price segment
///
/// # Examples
///
/// ```rust
/// use menus::line_builder::split_item_line;
///
/// assert_eq!(split_item_line("MANCHOW SOUP - 295/325"), Some(("MANCHOW SOUP", "295/325")));
/// assert_eq!(
///     split_item_line("FRIED RICE VEG/NON-VEG - 220/260"),
///     Some(("FRIED RICE VEG/NON-VEG", "220/260"))
/// );
/// assert_eq!(split_item_line("SOUP"), None);
/// ```
pub fn split_item_line(line: &str) -> Option<(&str, &str)> {
    let captures = ITEM_LINE.captures(line.trim())?;
    let name = captures.name("name")?.as_str().trim();
    let prices = captures.name("prices")?.as_str().trim();
    Some((name, prices))
}

/// Lowercase ASCII slug with single dashes between words
pub fn slugify(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("-")
}

/// Builds records for one restaurant's parse pass
///
/// The builder remembers every id it handed out so that two lines producing the
/// same slug get `-2`, `-3`, ... suffixes instead of colliding. Use one builder
/// per pass so that ids stay stable between passes.
pub struct ItemBuilder<'a> {
    restaurant_tag: String,
    config: &'a MenuParserConfig,
    seen_ids: HashMap<String, usize>,
}

impl<'a> ItemBuilder<'a> {
    pub fn new(restaurant_tag: &str, config: &'a MenuParserConfig) -> Self {
        Self {
            restaurant_tag: restaurant_tag.to_string(),
            config,
            seen_ids: HashMap::new(),
        }
    }

    /// Build the records for one line under `category`
    ///
    /// Returns an empty vector for lines that are not item lines.
    pub fn build(&mut self, category: &str, line: &str) -> Vec<MenuItemRecord> {
        let Some((raw_name, price_segment)) = split_item_line(line) else {
            trace!("Not an item line: '{}'", line);
            return Vec::new();
        };

        let prices = parse_prices(price_segment);
        let variants = extract_variant_labels(raw_name, category, prices.len());

        let records = match prices.len() {
            0 => {
                // Only a segment that says MRP or has no amount at all is a variable price
                let has_digits = price_segment.chars().any(|c| c.is_ascii_digit());
                let mrp = is_mrp(price_segment) || !has_digits;
                if !mrp {
                    debug!(
                        "Unreadable price '{}' for '{}', recorded as 0",
                        price_segment, raw_name
                    );
                }
                vec![self.single(category, &variants.base_name, 0, mrp)]
            }
            1 => vec![self.single(category, &variants.base_name, prices[0], false)],
            _ => match self.config.variant_layout {
                VariantLayout::Split => self.split(category, &variants, &prices),
                VariantLayout::Grouped => vec![self.grouped(category, variants, prices)],
            },
        };

        for record in &records {
            if record.needs_review(self.config.review_threshold) {
                debug!(
                    "Veg flag for '{}' is a weak guess ({:.2}), review after seeding",
                    record.name, record.veg_confidence
                );
            }
        }
        records
    }

    fn single(&mut self, category: &str, name: &str, price: u32, mrp: bool) -> MenuItemRecord {
        let veg = classify(name, category, None);
        let record = MenuItemRecord::new(&self.next_id(category, name), name, category, price)
            .with_veg(veg.is_veg, veg.confidence())
            .with_defaults(&self.config.defaults);

        if mrp {
            record.with_description(MRP_DESCRIPTION)
        } else {
            record
        }
    }

    fn split(
        &mut self,
        category: &str,
        variants: &VariantLabels,
        prices: &[u32],
    ) -> Vec<MenuItemRecord> {
        variants
            .labels
            .iter()
            .zip(prices)
            .map(|(label, price)| {
                let name = if variants.base_name.is_empty() {
                    label.clone()
                } else {
                    format!("{} ({})", variants.base_name, label)
                };
                let veg = classify(&variants.base_name, category, Some(label));

                MenuItemRecord::new(&self.next_id(category, &name), &name, category, *price)
                    .with_veg(veg.is_veg, veg.confidence())
                    .with_defaults(&self.config.defaults)
                    .with_variant(label)
            })
            .collect()
    }

    fn grouped(
        &mut self,
        category: &str,
        variants: VariantLabels,
        prices: Vec<u32>,
    ) -> MenuItemRecord {
        // The first price is the base variant
        let first_label = variants.labels.first().map(String::as_str);
        let veg = classify(&variants.base_name, category, first_label);

        MenuItemRecord::new(
            &self.next_id(category, &variants.base_name),
            &variants.base_name,
            category,
            prices[0],
        )
        .with_veg(veg.is_veg, veg.confidence())
        .with_defaults(&self.config.defaults)
        .with_variants(variants.labels, prices)
    }

    fn next_id(&mut self, category: &str, name: &str) -> String {
        let slug = slugify(&format!("{} {} {}", self.restaurant_tag, category, name));
        let count = self.seen_ids.entry(slug.clone()).or_insert(0);
        *count += 1;

        if *count == 1 {
            slug
        } else {
            debug!("Id '{}' already used, suffixing with {}", slug, count);
            format!("{slug}-{count}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_line(category: &str, line: &str) -> Vec<MenuItemRecord> {
        let config = MenuParserConfig::default();
        let mut builder = ItemBuilder::new("panache", &config);
        builder.build(category, line)
    }

    #[test]
    fn test_split_item_line_separators() {
        assert_eq!(split_item_line("PANEER TIKKA - 320"), Some(("PANEER TIKKA", "320")));
        assert_eq!(split_item_line("PANEER TIKKA- ₹320"), Some(("PANEER TIKKA", "320")));
        assert_eq!(
            split_item_line("PANEER TIKKA - ₹320/₹380"),
            Some(("PANEER TIKKA", "320/₹380"))
        );
        assert_eq!(split_item_line("RED BULL - MRP"), Some(("RED BULL", "MRP")));
        assert_eq!(split_item_line("7-UP - 60"), Some(("7-UP", "60")));
    }

    #[test]
    fn test_split_item_line_rejects_non_items() {
        assert_eq!(split_item_line("STARTERS"), None);
        assert_eq!(split_item_line(""), None);
        assert_eq!(split_item_line("- 200"), None);
        assert_eq!(split_item_line("CHICKEN 65 -"), None);
    }

    #[test]
    fn test_split_item_line_keeps_free_form_prices() {
        assert_eq!(split_item_line("COKE - As per MRP"), Some(("COKE", "As per MRP")));
        assert_eq!(split_item_line("SODA - Rs. 60"), Some(("SODA", "Rs. 60")));
        assert_eq!(split_item_line("TEA - 60 per cup"), Some(("TEA", "60 per cup")));
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("panache SOUP MANCHOW SOUP (Veg)"), "panache-soup-manchow-soup-veg");
        assert_eq!(slugify("  Café -- Hot & Sour  "), "caf-hot-sour");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_single_price_line() {
        let records = build_line("STARTERS", "PANEER TIKKA - 320");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "PANEER TIKKA");
        assert_eq!(records[0].price, 320);
        assert_eq!(records[0].category, "STARTERS");
        assert_eq!(records[0].id, "panache-starters-paneer-tikka");
        assert!(records[0].is_veg);
        assert!(records[0].variant.is_none());
    }

    #[test]
    fn test_mrp_line() {
        let records = build_line("BEVERAGES", "SOME DRINK - MRP");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 0);
        assert_eq!(records[0].description, "MRP");
        assert!(records[0].is_mrp());
    }

    #[test]
    fn test_free_form_price_segments() {
        let coke = build_line("BEVERAGES", "COKE - As per MRP");
        assert_eq!(coke.len(), 1);
        assert_eq!(coke[0].name, "COKE");
        assert_eq!(coke[0].price, 0);
        assert_eq!(coke[0].description, "MRP");

        let soda = build_line("BEVERAGES", "SODA - Rs. 60");
        assert_eq!(soda.len(), 1);
        assert_eq!(soda[0].price, 60);
        assert!(!soda[0].is_mrp());

        let tea = build_line("BEVERAGES", "TEA - 60 per cup");
        assert_eq!(tea[0].price, 60);
    }

    #[test]
    fn test_overflowing_price_is_zero_but_not_mrp() {
        let records = build_line("BEVERAGES", "JUICE - 99999999999");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 0);
        assert!(records[0].description.is_empty());
        assert!(!records[0].is_mrp());
    }

    #[test]
    fn test_no_digit_segment_is_unpriced() {
        let records = build_line("DESSERTS", "CHEF'S SPECIAL - ask staff");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].price, 0);
        assert!(records[0].is_mrp());
    }

    #[test]
    fn test_variant_line_is_split() {
        let records = build_line("STARTERS", "ITEM (Veg/Chicken) - 295/345");
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].name, "ITEM (Veg)");
        assert_eq!(records[0].price, 295);
        assert!(records[0].is_veg);
        assert_eq!(records[0].variant.as_deref(), Some("Veg"));

        assert_eq!(records[1].name, "ITEM (Chicken)");
        assert_eq!(records[1].price, 345);
        assert!(!records[1].is_veg);
        assert_ne!(records[0].id, records[1].id);
    }

    #[test]
    fn test_grouped_layout() {
        let config = MenuParserConfig {
            variant_layout: VariantLayout::Grouped,
            ..Default::default()
        };
        let mut builder = ItemBuilder::new("symposium", &config);
        let records = builder.build("MAIN COURSE", "DAL MAKHANI HALF/FULL - 220/360");

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "DAL MAKHANI");
        assert_eq!(records[0].price, 220);
        assert_eq!(records[0].variants, vec!["Half", "Full"]);
        assert_eq!(records[0].variant_prices, vec![220, 360]);
        assert!(records[0].variant.is_none());
    }

    #[test]
    fn test_duplicate_slugs_get_suffixes() {
        let config = MenuParserConfig::default();
        let mut builder = ItemBuilder::new("panache", &config);

        let first = builder.build("STARTERS", "PANEER TIKKA - 320");
        let second = builder.build("STARTERS", "Paneer Tikka - 340");
        let third = builder.build("STARTERS", "PANEER  TIKKA - 360");

        assert_eq!(first[0].id, "panache-starters-paneer-tikka");
        assert_eq!(second[0].id, "panache-starters-paneer-tikka-2");
        assert_eq!(third[0].id, "panache-starters-paneer-tikka-3");
    }

    #[test]
    fn test_defaults_are_applied() {
        let records = build_line("STARTERS", "CRISPY CORN - 240");
        let defaults = MenuParserConfig::default().defaults;

        assert_eq!(records[0].rating, defaults.rating);
        assert_eq!(records[0].preparation_time, defaults.preparation_time);
        assert_eq!(records[0].image, defaults.image);
        assert!(records[0].is_available);
        assert!(records[0].description.is_empty());
    }

    #[test]
    fn test_non_item_line_builds_nothing() {
        assert!(build_line("STARTERS", "All prices are inclusive of taxes").is_empty());
    }
}
