//! Catalog inspection commands.
//!
//! # Usage
//!
//! ```bash
//! # Published products
//! ownshop catalog
//!
//! # One category, or discounted products only
//! ownshop catalog --category electronics
//! ownshop catalog --deals
//!
//! # Include unpublished products
//! ownshop catalog --all --json
//! ```

use ownshop_core::{CATEGORIES, COUNTRIES, Category, LANGUAGES, Product};
use ownshop_storefront::store::{CatalogFilter, SharedCatalog};

use super::{CommandError, print_json};

/// Options for `ownshop catalog`.
#[derive(Debug, Default)]
pub struct ListOptions {
    pub category: Option<String>,
    pub deals: bool,
    pub search: Option<String>,
    pub all: bool,
    pub json: bool,
}

/// Resolve a category by display name or slug.
fn resolve_category(value: &str) -> Result<&'static Category, CommandError> {
    Category::by_name(value)
        .or_else(|| Category::by_slug(value))
        .ok_or_else(|| CommandError::UnknownCategory(value.to_string()))
}

/// Products of the seed catalog matching `options`.
///
/// # Errors
///
/// Returns `UnknownCategory` if the category does not resolve.
pub fn select(options: &ListOptions) -> Result<Vec<Product>, CommandError> {
    let filter = CatalogFilter {
        category: options
            .category
            .as_deref()
            .map(resolve_category)
            .transpose()?
            .map(|c| c.name.to_string()),
        discounted: options.deals,
        search: options.search.clone(),
    };

    let catalog = SharedCatalog::seeded();
    let catalog = catalog.read();
    if !options.all {
        return Ok(catalog.visible_products(&filter));
    }

    // Unpublished products too; only the category and deals filters apply.
    Ok(catalog
        .iter()
        .filter(|p| filter.category.as_ref().is_none_or(|c| &p.category == c))
        .filter(|p| !filter.discounted || p.has_discount())
        .filter(|p| filter.search.as_deref().is_none_or(|term| p.matches(term)))
        .cloned()
        .collect())
}

/// Print the seed catalog.
///
/// # Errors
///
/// Returns an error for an unknown category or a serialization failure.
#[allow(clippy::print_stdout)]
pub fn list(options: &ListOptions) -> Result<(), CommandError> {
    let products = select(options)?;
    if options.json {
        return print_json(&products);
    }

    for product in &products {
        let status = if product.published { "" } else { "  (unpublished)" };
        println!(
            "{:>4}  {:<32} {:>10}  {:<16} {}{}",
            product.id.as_str(),
            product.name,
            product.price.display(),
            product.category,
            product.store.name,
            status
        );
    }
    println!("{} products", products.len());
    Ok(())
}

/// Print the category table.
///
/// # Errors
///
/// Returns an error if JSON output fails.
#[allow(clippy::print_stdout)]
pub fn categories(json: bool) -> Result<(), CommandError> {
    if json {
        return print_json(CATEGORIES);
    }
    for category in CATEGORIES {
        println!("{:<24} /categories/{}", category.name, category.slug);
    }
    Ok(())
}

/// Print the language and country tables.
///
/// # Errors
///
/// Returns an error if JSON output fails.
#[allow(clippy::print_stdout)]
pub fn locales(json: bool) -> Result<(), CommandError> {
    if json {
        return print_json(&serde_json::json!({
            "languages": LANGUAGES,
            "countries": COUNTRIES,
        }));
    }
    for language in LANGUAGES {
        println!("{:<6} {}", language.code, language.name);
    }
    println!();
    for country in COUNTRIES {
        println!(
            "{} {:<4} {:<24} {}",
            country.flag, country.code, country.name, country.currency
        );
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_listing_hides_unpublished() {
        let products = select(&ListOptions::default()).unwrap();
        assert!(products.iter().all(|p| p.published));
        assert!(!products.iter().any(|p| p.id.as_str() == "14"));
    }

    #[test]
    fn test_all_includes_unpublished() {
        let options = ListOptions {
            all: true,
            ..ListOptions::default()
        };
        let products = select(&options).unwrap();
        assert!(products.iter().any(|p| p.id.as_str() == "14"));
    }

    #[test]
    fn test_category_by_slug() {
        let options = ListOptions {
            category: Some("electronics".to_string()),
            ..ListOptions::default()
        };
        let products = select(&options).unwrap();
        assert!(!products.is_empty());
        assert!(products.iter().all(|p| p.category == "Electronics"));
    }

    #[test]
    fn test_unknown_category() {
        let options = ListOptions {
            category: Some("garden".to_string()),
            ..ListOptions::default()
        };
        assert!(matches!(
            select(&options),
            Err(CommandError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_deals_have_original_price() {
        let options = ListOptions {
            deals: true,
            ..ListOptions::default()
        };
        let products = select(&options).unwrap();
        assert!(!products.is_empty());
        assert!(products.iter().all(Product::has_discount));
    }
}
