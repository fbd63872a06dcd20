//! Category identifiers and their mapping to provider search types.
//!
//! This table is the single source of truth for both the geocode/search
//! request path and the display-labeling reverse path. Category ids arrive
//! from clients as raw strings; unrecognized ids simply contribute no
//! provider types rather than failing the request.

use serde::{Deserialize, Serialize};

/// The fixed set of user-facing categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryId {
    #[serde(rename = "food")]
    Food,
    #[serde(rename = "budget")]
    Budget,
    #[serde(rename = "self-care")]
    SelfCare,
    #[serde(rename = "shopping")]
    Shopping,
    #[serde(rename = "banks")]
    Banks,
}

impl CategoryId {
    /// Parses a raw category identifier. Unknown ids return `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "food" => Some(Self::Food),
            "budget" => Some(Self::Budget),
            "self-care" => Some(Self::SelfCare),
            "shopping" => Some(Self::Shopping),
            "banks" => Some(Self::Banks),
            _ => None,
        }
    }
}

/// Category → provider search-type tokens.
///
/// A provider type may serve multiple categories (`cafe` is both food and
/// budget); the reverse lookup resolves such overlaps first-seen in table
/// order.
pub const CATEGORY_TYPE_MAP: &[(CategoryId, &[&str])] = &[
    (
        CategoryId::Food,
        &["restaurant", "cafe", "bakery", "meal_takeaway", "meal_delivery"],
    ),
    (CategoryId::Budget, &["food_court", "meal_takeaway", "cafe"]),
    (
        CategoryId::SelfCare,
        &["spa", "beauty_salon", "hair_care", "physiotherapist"],
    ),
    (
        CategoryId::Shopping,
        &[
            "shopping_mall",
            "department_store",
            "clothing_store",
            "store",
            "supermarket",
        ],
    ),
    (CategoryId::Banks, &["bank", "atm"]),
];

/// Provider types that are never returned, regardless of what was
/// requested. Nearby search likes to pad results with hotels.
pub const EXCLUDED_TYPES: &[&str] = &["lodging"];

/// Resolves raw category ids into a first-seen-deduplicated list of
/// provider types, preserving input order. Unknown ids contribute nothing;
/// an empty input yields an empty list.
#[must_use]
pub fn resolve_types<S: AsRef<str>>(categories: &[S]) -> Vec<&'static str> {
    let mut types: Vec<&'static str> = Vec::new();
    for category in categories {
        let Some(id) = CategoryId::parse(category.as_ref()) else {
            continue;
        };
        for &(mapped, tokens) in CATEGORY_TYPE_MAP {
            if mapped == id {
                for &token in tokens {
                    if !types.contains(&token) {
                        types.push(token);
                    }
                }
            }
        }
    }
    types
}

/// Picks the first of the place's types that belongs to the allowed set.
#[must_use]
pub fn matched_type<'a>(place_types: &'a [String], allowed: &[&str]) -> Option<&'a str> {
    place_types
        .iter()
        .map(String::as_str)
        .find(|t| allowed.contains(t))
}

/// Display label for a place: its matched provider type title-cased
/// (`meal_takeaway` → `Meal Takeaway`), or `"Place"` when none of its
/// types were requested.
#[must_use]
pub fn display_label(place_types: &[String], allowed: &[&str]) -> String {
    matched_type(place_types, allowed).map_or_else(|| "Place".to_string(), title_case_token)
}

/// Reverse lookup: the category a provider type belongs to, first-seen in
/// table order.
#[must_use]
pub fn category_for_type(token: &str) -> Option<CategoryId> {
    CATEGORY_TYPE_MAP
        .iter()
        .find(|(_, tokens)| tokens.contains(&token))
        .map(|&(id, _)| id)
}

/// Placeholder photo for places the provider has no photos for, themed by
/// category so a bank does not get a latte shot.
#[must_use]
pub fn placeholder_photo(category: Option<CategoryId>) -> &'static str {
    match category {
        Some(CategoryId::Budget) => {
            "https://images.unsplash.com/photo-1649301795137-6d3631815772?w=800"
        }
        Some(CategoryId::SelfCare) => {
            "https://images.unsplash.com/photo-1642647916334-82e513d9cc48?w=800"
        }
        Some(CategoryId::Shopping) => {
            "https://images.unsplash.com/photo-1580793241553-e9f1cce181af?w=800"
        }
        Some(CategoryId::Banks) => {
            "https://images.unsplash.com/photo-1634608874538-443b84f7b06b?w=800"
        }
        // Food and unmatched places share the generic storefront shot.
        _ => "https://images.unsplash.com/photo-1555396273-367ea4eb4db5?w=800",
    }
}

/// `meal_takeaway` → `Meal Takeaway`.
fn title_case_token(token: &str) -> String {
    token
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
