//! # Variant Label Extractor
//!
//! A single price-list line often carries several prices, one per option of the
//! dish (`"CHILLI PANEER/CHICKEN - 280/320"`, `"DAL MAKHANI HALF/FULL - 220/360"`).
//! This module derives a human readable label for each price.
//!
//! The extraction is a heuristic chain tuned to how the restaurants write their
//! lists. Rules are tried from the most to the least reliable:
//!
//! 1. a parenthesised list split on `,` or `&` with one element per price
//! 2. the `VEG/NON-VEG` marker
//! 3. the `HALF/FULL` and `HALF/AFGANI` markers
//! 4. two prices under a soup category mean veg and chicken
//! 5. a `word/word` pair near the end of the name
//! 6. `Option 1`, `Option 2`, ...
//!
//! Rules 2 to 5 only produce two labels, so they only apply to two-price lines.
//! A line written in a style none of these rules anticipate will get wrong or
//! generic labels; the admin dashboard is where those get fixed.

use lazy_static::lazy_static;
use log::{debug, trace};
use regex::Regex;

lazy_static! {
    static ref PARENTHETICAL: Regex =
        Regex::new(r"\(([^()]*)\)").expect("Parenthetical pattern should be valid");
    static ref VEG_NON_VEG: Regex = Regex::new(r"(?i)\(?\s*\bVEG\s*/\s*NON[\s-]?VEG\b\s*\)?")
        .expect("Veg/non-veg pattern should be valid");
    static ref HALF_FULL: Regex = Regex::new(r"(?i)\(?\s*\bHALF\s*/\s*FULL\b\s*\)?")
        .expect("Half/full pattern should be valid");
    static ref HALF_AFGANI: Regex = Regex::new(r"(?i)\(?\s*\bHALF\s*/\s*AFG(?:H)?ANI\b\s*\)?")
        .expect("Half/afgani pattern should be valid");
}

/// Which rule of the chain produced the labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantRule {
    /// Zero or one price, nothing to label
    Single,
    Parenthetical,
    VegNonVeg,
    HalfFull,
    HalfAfgani,
    SoupDefault,
    SlashPair,
    Positional,
}

/// Labels for each price of a line, plus the dish name with the variant markup removed
#[derive(Debug, Clone, PartialEq)]
pub struct VariantLabels {
    pub labels: Vec<String>,
    pub base_name: String,
    pub rule: VariantRule,
}

/// Derive one label per price for a menu line
///
/// Returns an empty label list when `price_count` is 0 or 1. Otherwise the list
/// has exactly `price_count` entries.
///
/// # Examples
///
/// ```rust
/// use menus::variant_labels::{extract_variant_labels, VariantRule};
///
/// let result = extract_variant_labels("MANCHOW SOUP", "SOUP", 2);
/// assert_eq!(result.labels, vec!["Veg", "Chicken"]);
/// assert_eq!(result.rule, VariantRule::SoupDefault);
///
/// let result = extract_variant_labels("ITEM (Veg/Chicken)", "STARTERS", 2);
/// assert_eq!(result.labels, vec!["Veg", "Chicken"]);
/// assert_eq!(result.base_name, "ITEM");
/// ```
pub fn extract_variant_labels(name: &str, category: &str, price_count: usize) -> VariantLabels {
    let name = collapse_whitespace(name);

    if price_count <= 1 {
        return VariantLabels {
            labels: Vec::new(),
            base_name: name,
            rule: VariantRule::Single,
        };
    }

    if let Some(result) = from_parenthetical(&name, price_count) {
        return result;
    }

    if price_count == 2 {
        if let Some(result) = from_marker(&name) {
            return result;
        }

        if category.to_uppercase().contains("SOUP") {
            trace!("Soup category '{}' defaults '{}' to Veg/Chicken", category, name);
            return VariantLabels {
                labels: vec!["Veg".to_string(), "Chicken".to_string()],
                base_name: name,
                rule: VariantRule::SoupDefault,
            };
        }

        if let Some(result) = from_slash_pair(&name) {
            return result;
        }
    }

    debug!(
        "No variant convention matched '{}' with {} prices, using positional labels",
        name, price_count
    );
    VariantLabels {
        labels: (1..=price_count).map(|i| format!("Option {i}")).collect(),
        base_name: name,
        rule: VariantRule::Positional,
    }
}

fn from_parenthetical(name: &str, price_count: usize) -> Option<VariantLabels> {
    for captures in PARENTHETICAL.captures_iter(name) {
        let inner = &captures[1];
        if !inner.contains(',') && !inner.contains('&') {
            continue;
        }

        let labels: Vec<String> = inner
            .split([',', '&'])
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect();

        if labels.len() != price_count {
            trace!(
                "Parenthetical '({})' has {} elements, expected {}",
                inner,
                labels.len(),
                price_count
            );
            continue;
        }

        let whole = captures.get(0)?;
        let base_name = format!("{}{}", &name[..whole.start()], &name[whole.end()..]);
        return Some(VariantLabels {
            labels,
            base_name: clean_base_name(&base_name),
            rule: VariantRule::Parenthetical,
        });
    }

    None
}

fn from_marker(name: &str) -> Option<VariantLabels> {
    let markers: [(&Regex, [&str; 2], VariantRule); 3] = [
        (&*VEG_NON_VEG, ["Veg", "Non-Veg"], VariantRule::VegNonVeg),
        (&*HALF_FULL, ["Half", "Full"], VariantRule::HalfFull),
        (&*HALF_AFGANI, ["Half", "Afgani"], VariantRule::HalfAfgani),
    ];

    markers.iter().find_map(|(pattern, labels, rule)| {
        pattern.find(name).map(|found| VariantLabels {
            labels: labels.iter().map(|label| label.to_string()).collect(),
            base_name: clean_base_name(&format!(
                "{} {}",
                &name[..found.start()],
                &name[found.end()..]
            )),
            rule: *rule,
        })
    })
}

fn from_slash_pair(name: &str) -> Option<VariantLabels> {
    let slash = name.rfind('/')?;
    let before = name[..slash].trim_end();
    let after = name[slash + 1..].trim_start();

    let left_token = before.split_whitespace().next_back()?;
    let right_token = after.split_whitespace().next()?;

    let prefix = &before[..before.len() - left_token.len()];
    let suffix = &after[right_token.len()..];

    // Only a pair among the last words of the name counts as a variant split
    if suffix.split_whitespace().count() > 1 {
        trace!("Slash in '{}' is not near the end of the name", name);
        return None;
    }

    let left = capitalize(strip_brackets(left_token));
    let right = capitalize(strip_brackets(right_token));
    if left.is_empty() || right.is_empty() {
        return None;
    }

    Some(VariantLabels {
        labels: vec![left, right],
        base_name: clean_base_name(&format!("{prefix} {suffix}")),
        rule: VariantRule::SlashPair,
    })
}

fn strip_brackets(token: &str) -> &str {
    token.trim_matches(|c: char| matches!(c, '(' | ')' | '[' | ']'))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Tidy a name after variant markup has been cut out of it
fn clean_base_name(name: &str) -> String {
    let mut name = collapse_whitespace(&name.replace("()", " "));

    let opens = name.matches('(').count();
    let closes = name.matches(')').count();
    if opens != closes {
        name = collapse_whitespace(&name.replace(['(', ')'], " "));
    }

    name.trim_matches(|c: char| c == '-' || c == ',' || c.is_whitespace())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_price_has_no_labels() {
        let result = extract_variant_labels("PANEER  TIKKA", "STARTERS", 1);
        assert!(result.labels.is_empty());
        assert_eq!(result.base_name, "PANEER TIKKA");
        assert_eq!(result.rule, VariantRule::Single);

        let result = extract_variant_labels("RED BULL", "BEVERAGES", 0);
        assert!(result.labels.is_empty());
    }

    #[test]
    fn test_parenthetical_list() {
        let result = extract_variant_labels("SOYA CHAP (Tandoori, Malai & Achari)", "STARTERS", 3);
        assert_eq!(result.labels, vec!["Tandoori", "Malai", "Achari"]);
        assert_eq!(result.base_name, "SOYA CHAP");
        assert_eq!(result.rule, VariantRule::Parenthetical);
    }

    #[test]
    fn test_parenthetical_count_mismatch_falls_through() {
        let result = extract_variant_labels("FRIES (Salted, Peri Peri)", "SIDES", 3);
        assert_eq!(result.rule, VariantRule::Positional);
        assert_eq!(result.labels, vec!["Option 1", "Option 2", "Option 3"]);
        assert_eq!(result.base_name, "FRIES (Salted, Peri Peri)");
    }

    #[test]
    fn test_veg_non_veg_marker() {
        let result = extract_variant_labels("FRIED RICE VEG/NON-VEG", "RICE", 2);
        assert_eq!(result.labels, vec!["Veg", "Non-Veg"]);
        assert_eq!(result.base_name, "FRIED RICE");
        assert_eq!(result.rule, VariantRule::VegNonVeg);

        let result = extract_variant_labels("HAKKA NOODLES (veg/non veg)", "NOODLES", 2);
        assert_eq!(result.labels, vec!["Veg", "Non-Veg"]);
        assert_eq!(result.base_name, "HAKKA NOODLES");
    }

    #[test]
    fn test_half_full_markers() {
        let result = extract_variant_labels("DAL MAKHANI HALF/FULL", "MAIN COURSE", 2);
        assert_eq!(result.labels, vec!["Half", "Full"]);
        assert_eq!(result.base_name, "DAL MAKHANI");

        let result = extract_variant_labels("CHICKEN (HALF/AFGANI)", "TANDOOR", 2);
        assert_eq!(result.labels, vec!["Half", "Afgani"]);
        assert_eq!(result.base_name, "CHICKEN");
        assert_eq!(result.rule, VariantRule::HalfAfgani);
    }

    #[test]
    fn test_soup_default() {
        let result = extract_variant_labels("MANCHOW SOUP", "SOUP", 2);
        assert_eq!(result.labels, vec!["Veg", "Chicken"]);
        assert_eq!(result.base_name, "MANCHOW SOUP");

        let result = extract_variant_labels("HOT & SOUR", "SOUPS & SALADS", 2);
        assert_eq!(result.rule, VariantRule::SoupDefault);
    }

    #[test]
    fn test_soup_with_three_prices_is_positional() {
        let result = extract_variant_labels("MANCHOW SOUP", "SOUP", 3);
        assert_eq!(result.rule, VariantRule::Positional);
    }

    #[test]
    fn test_slash_pair() {
        let result = extract_variant_labels("CHILLI PANEER/CHICKEN", "CHINESE", 2);
        assert_eq!(result.labels, vec!["Paneer", "Chicken"]);
        assert_eq!(result.base_name, "CHILLI");
        assert_eq!(result.rule, VariantRule::SlashPair);
    }

    #[test]
    fn test_slash_pair_inside_brackets() {
        let result = extract_variant_labels("ITEM (Veg/Chicken)", "STARTERS", 2);
        assert_eq!(result.labels, vec!["Veg", "Chicken"]);
        assert_eq!(result.base_name, "ITEM");

        let result = extract_variant_labels("MOMOS (STEAMED / FRIED)", "STARTERS", 2);
        assert_eq!(result.labels, vec!["Steamed", "Fried"]);
        assert_eq!(result.base_name, "MOMOS");
    }

    #[test]
    fn test_slash_far_from_end_is_positional() {
        let result =
            extract_variant_labels("PANEER/MUSHROOM TIKKA WITH MINT CHUTNEY", "STARTERS", 2);
        assert_eq!(result.rule, VariantRule::Positional);
        assert_eq!(result.labels, vec!["Option 1", "Option 2"]);
    }

    #[test]
    fn test_positional_fallback() {
        let result = extract_variant_labels("COLD COFFEE", "BEVERAGES", 2);
        assert_eq!(result.labels, vec!["Option 1", "Option 2"]);
        assert_eq!(result.base_name, "COLD COFFEE");
    }

    #[test]
    fn test_label_count_matches_price_count() {
        for count in 2..6 {
            let result = extract_variant_labels("SHAKE", "BEVERAGES", count);
            assert_eq!(result.labels.len(), count);
        }
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("CHICKEN"), "Chicken");
        assert_eq!(capitalize("veg"), "Veg");
        assert_eq!(capitalize(""), "");
    }
}
