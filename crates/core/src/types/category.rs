//! Product categories.
//!
//! The category list is fixed; every product must name one of these.

use serde::Serialize;

/// A catalog category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    /// Display name, also the value stored on products.
    pub name: &'static str,
    /// URL slug (see [`slugify`]).
    pub slug: &'static str,
    /// Icon identifier used by the rendering layer.
    pub icon: &'static str,
}

/// The fixed category table, in menu order.
pub const CATEGORIES: &[Category] = &[
    Category { name: "Electronics", slug: "electronics", icon: "smartphone" },
    Category { name: "Fashion", slug: "fashion", icon: "shirt" },
    Category { name: "Home & Garden", slug: "home-garden", icon: "home" },
    Category { name: "Beauty & Health", slug: "beauty-health", icon: "sparkles" },
    Category { name: "Sports & Outdoors", slug: "sports-outdoors", icon: "bike" },
    Category { name: "Toys & Games", slug: "toys-games", icon: "gamepad-2" },
    Category { name: "Jewelry & Watches", slug: "jewelry-watches", icon: "watch" },
    Category { name: "Automotive", slug: "automotive", icon: "car" },
    Category {
        name: "Home Improvement & Lighting",
        slug: "home-improvement-lighting",
        icon: "lamp",
    },
    Category { name: "Tools & Industrial", slug: "tools-industrial", icon: "wrench" },
];

impl Category {
    /// Look up a category by its display name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Self> {
        CATEGORIES.iter().find(|c| c.name == name)
    }

    /// Look up a category by its slug.
    #[must_use]
    pub fn by_slug(slug: &str) -> Option<&'static Self> {
        CATEGORIES.iter().find(|c| c.slug == slug)
    }
}

/// What a `/categories/{slug}` page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryListing {
    /// Published products of one category.
    Category(&'static Category),
    /// Published products that carry an original (pre-discount) price.
    SuperDeals,
}

impl CategoryListing {
    /// Slug of the discounted-products listing.
    pub const SUPER_DEALS_SLUG: &'static str = "superdeals";

    /// Resolve a listing slug.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        if slug == Self::SUPER_DEALS_SLUG {
            return Some(Self::SuperDeals);
        }
        Category::by_slug(slug).map(Self::Category)
    }

    /// Heading shown for the listing.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Category(category) => category.name,
            Self::SuperDeals => "SuperDeals",
        }
    }
}

/// Turn a display name into a URL slug.
///
/// Lowercases, keeps ASCII alphanumerics, collapses every other run of
/// characters into a single `-`, and trims leading/trailing dashes.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
