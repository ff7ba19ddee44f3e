//! # Price Token Parser
//!
//! Turns the trailing price expression of a menu line (`"295/345"`, `"₹180"`,
//! `"MRP"`) into an ordered list of rupee amounts. The first amount belongs to
//! the first variant.

use log::trace;

/// Sentinel used on price lists for items sold at printed retail price
pub const MRP_TOKEN: &str = "MRP";

/// Whether the price segment marks the item as sold at a variable price
pub fn is_mrp(segment: &str) -> bool {
    segment.to_uppercase().contains(MRP_TOKEN)
}

/// Parse a price segment into whole-rupee amounts
///
/// Every character other than an ASCII digit or `/` is discarded, the rest is
/// split on `/` and each piece is parsed as a base-10 integer. Pieces that do
/// not parse (empty, or too large for `u32`) are dropped. An `MRP` segment
/// yields an empty list, as does a segment with no digits at all.
///
/// # Examples
///
/// ```rust
/// use menus::price_parser::parse_prices;
///
/// assert_eq!(parse_prices("295/345"), vec![295, 345]);
/// assert_eq!(parse_prices("₹ 1,250"), vec![1250]);
/// assert!(parse_prices("MRP").is_empty());
/// ```
pub fn parse_prices(segment: &str) -> Vec<u32> {
    if is_mrp(segment) {
        trace!("Price segment '{}' is MRP", segment);
        return Vec::new();
    }

    let cleaned: String = segment
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '/')
        .collect();

    let prices: Vec<u32> = cleaned
        .split('/')
        .filter_map(|token| token.parse::<u32>().ok())
        .collect();

    trace!("Parsed price segment '{}' -> {:?}", segment, prices);
    prices
}
