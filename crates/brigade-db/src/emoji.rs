//! Presentation emoji for inventory products.
//!
//! Keyword matching over the lowercased product name. Unknown products
//! fall back to a generic plate.

/// Emoji shown next to unrecognized products.
const DEFAULT_EMOJI: &str = "🍽️";

/// Keyword-to-emoji table, checked in order; first match wins.
const KEYWORDS: &[(&str, &str)] = &[
    ("cucumber", "🥒"),
    ("tomato", "🍅"),
    ("rice", "🍚"),
    ("sushi", "🍣"),
    ("salmon", "🐟"),
    ("tuna", "🐟"),
    ("fish", "🐟"),
    ("shrimp", "🦐"),
    ("sauce", "🥣"),
    ("cheese", "🧀"),
    ("avocado", "🥑"),
    ("carrot", "🥕"),
    ("nori", "🌿"),
    ("seaweed", "🌿"),
    ("egg", "🥚"),
];

/// Pick an emoji for a product name.
pub fn for_product(product_name: &str) -> &'static str {
    let name = product_name.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(keyword, _)| name.contains(keyword))
        .map_or(DEFAULT_EMOJI, |(_, emoji)| emoji)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_are_case_insensitive() {
        assert_eq!(for_product("Smoked SALMON fillet"), "🐟");
    }

    #[test]
    fn first_keyword_wins() {
        // "cucumber" precedes "sauce" in the table.
        assert_eq!(for_product("cucumber sauce"), "🥒");
    }

    #[test]
    fn unknown_products_get_the_default_plate() {
        assert_eq!(for_product("wasabi"), DEFAULT_EMOJI);
    }
}
