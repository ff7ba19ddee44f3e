//! # Vegetarian Classifier
//!
//! Infers whether a dish is vegetarian from its category heading and name.
//! Every dish gets a definite answer; the attached [`VegSignal`] records how
//! that answer was reached so an admin can review the weak ones.

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

lazy_static! {
    static ref NON_VEG_CATEGORY: Regex = Regex::new(r"(?i)\(\s*NON[\s-]?VEG\s*\)")
        .expect("Non-veg category pattern should be valid");
    static ref VEG_CATEGORY: Regex =
        Regex::new(r"(?i)\(\s*VEG\s*\)").expect("Veg category pattern should be valid");
    static ref NON_VEG_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(?:non[\s-]?veg|chicken|mutton|lamb|fish|prawns?|eggs?|beef|pork|keema|shrimps?|crabs?|bacon|ham|salami|sausages?|pepperoni|tuna|salmon|basa|pomfret|surmai|rawas|murgh|gosht)\b"
    )
    .expect("Non-veg keyword pattern should be valid");
    static ref VEG_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(?:veg|veggie|vegetables?|vegetarian|paneer|corn|broccoli|mushrooms?|aloo|palak)\b"
    )
    .expect("Veg keyword pattern should be valid");
    static ref VEG_CATEGORIES: Regex = Regex::new(
        r"(?i)\b(?:salads?|soups?|breads?|roti|naan|desserts?|beverages?|drinks?|shakes?|mocktails?|coffee|tea)\b"
    )
    .expect("Veg category pattern should be valid");
}

/// What the classification was based on, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VegSignal {
    /// The category heading says `(VEG)` or `(NON-VEG)`
    CategoryQualifier,
    NonVegKeyword,
    VegKeyword,
    /// The category is one where dishes are vegetarian unless named otherwise
    CategoryDefault,
    /// Nothing matched
    DefaultBias,
}

impl VegSignal {
    pub fn confidence(self) -> f32 {
        match self {
            VegSignal::CategoryQualifier => 1.0,
            VegSignal::NonVegKeyword => 0.9,
            VegSignal::VegKeyword => 0.85,
            VegSignal::CategoryDefault => 0.7,
            VegSignal::DefaultBias => 0.5,
        }
    }

    /// Whether the flag came from keyword heuristics rather than the menu's own markup
    pub fn is_inferred(self) -> bool {
        self != VegSignal::CategoryQualifier
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VegClassification {
    pub is_veg: bool,
    pub signal: VegSignal,
}

impl VegClassification {
    fn new(is_veg: bool, signal: VegSignal) -> Self {
        Self { is_veg, signal }
    }

    pub fn confidence(&self) -> f32 {
        self.signal.confidence()
    }
}

/// Classify a dish as vegetarian or not
///
/// `variant` is the label of the option being classified, if any, so that
/// `"MANCHOW SOUP"` with label `"Chicken"` comes out non-veg.
///
/// # Examples
///
/// ```rust
/// use menus::veg_classifier::{classify, VegSignal};
///
/// let result = classify("MANCHOW SOUP", "SOUP", Some("Chicken"));
/// assert!(!result.is_veg);
/// assert_eq!(result.signal, VegSignal::NonVegKeyword);
///
/// let result = classify("GREEK SALAD", "SALADS", None);
/// assert!(result.is_veg);
/// ```
pub fn classify(name: &str, category: &str, variant: Option<&str>) -> VegClassification {
    if NON_VEG_CATEGORY.is_match(category) {
        return VegClassification::new(false, VegSignal::CategoryQualifier);
    }
    if VEG_CATEGORY.is_match(category) {
        return VegClassification::new(true, VegSignal::CategoryQualifier);
    }

    let text = match variant {
        Some(label) => format!("{name} {label}"),
        None => name.to_string(),
    };

    let result = if NON_VEG_KEYWORDS.is_match(&text) {
        VegClassification::new(false, VegSignal::NonVegKeyword)
    } else if VEG_KEYWORDS.is_match(&text) {
        VegClassification::new(true, VegSignal::VegKeyword)
    } else if VEG_CATEGORIES.is_match(category) {
        VegClassification::new(true, VegSignal::CategoryDefault)
    } else {
        VegClassification::new(true, VegSignal::DefaultBias)
    };

    trace!(
        "Classified '{}' in '{}' as {} ({:?})",
        text,
        category,
        if result.is_veg { "veg" } else { "non-veg" },
        result.signal
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_qualifier_wins() {
        let result = classify("CHICKEN TIKKA", "STARTERS (VEG)", None);
        assert!(result.is_veg);
        assert_eq!(result.signal, VegSignal::CategoryQualifier);
        assert_eq!(result.confidence(), 1.0);

        let result = classify("PANEER TIKKA", "STARTERS (NON-VEG)", None);
        assert!(!result.is_veg);
        assert!(!result.signal.is_inferred());

        let result = classify("SEEKH KEBAB", "TANDOOR (non veg)", None);
        assert!(!result.is_veg);
    }

    #[test]
    fn test_non_veg_keywords() {
        for name in [
            "BUTTER CHICKEN",
            "MUTTON ROGAN JOSH",
            "AMRITSARI FISH",
            "GARLIC PRAWNS",
            "EGG CURRY",
            "MASALA OMELETTE WITH EGGS",
            "PORK RIBS",
            "KEEMA PAV",
            "TAWA SURMAI",
        ] {
            let result = classify(name, "MAIN COURSE", None);
            assert!(!result.is_veg, "expected non-veg for '{}'", name);
            assert_eq!(result.signal, VegSignal::NonVegKeyword);
        }
    }

    #[test]
    fn test_keywords_need_word_boundaries() {
        // "ham" inside "champignon" and "egg" inside "eggplant" are not meat
        let result = classify("CHAMPIGNON TOAST", "SNACKS", None);
        assert!(result.is_veg);

        let result = classify("EGGPLANT PARMIGIANA", "MAIN COURSE", None);
        assert!(result.is_veg);
    }

    #[test]
    fn test_variant_label_is_considered() {
        assert!(classify("MANCHOW SOUP", "SOUP", Some("Veg")).is_veg);
        assert!(!classify("MANCHOW SOUP", "SOUP", Some("Chicken")).is_veg);
        assert!(!classify("FRIED RICE", "RICE", Some("Non-Veg")).is_veg);
    }

    #[test]
    fn test_veg_keywords() {
        let names = [
            "PANEER TIKKA",
            "CRISPY CORN",
            "MUSHROOM DUPLEX",
            "ALOO GOBI",
            "VEG MANCHURIAN",
        ];
        for name in names {
            let result = classify(name, "STARTERS", None);
            assert!(result.is_veg, "expected veg for '{}'", name);
            assert_eq!(result.signal, VegSignal::VegKeyword);
        }
    }

    #[test]
    fn test_category_defaults() {
        let result = classify("GREEK", "SALADS", None);
        assert!(result.is_veg);
        assert_eq!(result.signal, VegSignal::CategoryDefault);

        let result = classify("COLD COFFEE", "BEVERAGES", None);
        assert_eq!(result.signal, VegSignal::CategoryDefault);

        let result = classify("CHICKEN CLEAR SOUP", "SOUPS", None);
        assert!(!result.is_veg);
    }

    #[test]
    fn test_default_bias_is_vegetarian() {
        let result = classify("DRAGON ROLL", "SPECIALS", None);
        assert!(result.is_veg);
        assert_eq!(result.signal, VegSignal::DefaultBias);
        assert!(result.signal.is_inferred());
        assert_eq!(result.confidence(), 0.5);
    }
}
