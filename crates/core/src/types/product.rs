//! Catalog products.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Category, Price, ProductId};

/// The store a product belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreRef {
    /// Store display name; sellers own products whose store name matches theirs.
    pub name: String,
}

impl StoreRef {
    /// Create a store reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A product in the catalog.
///
/// Only `published` products are visible to customers and can be added to a
/// cart. Products created by sellers start unpublished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Pre-discount price, if the product is discounted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Price>,
    /// Average rating, 0 to 5.
    pub rating: f32,
    pub reviews: u32,
    pub sold: u32,
    pub category: String,
    pub image_url: String,
    pub store: StoreRef,
    pub published: bool,
}

impl Product {
    /// Build a fresh, unpublished product from a seller draft.
    ///
    /// Rating, review and sales counters start at zero.
    #[must_use]
    pub fn from_draft(id: ProductId, draft: NewProduct, store: StoreRef) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            original_price: draft.original_price,
            rating: 0.0,
            reviews: 0,
            sold: 0,
            category: draft.category,
            image_url: draft.image_url,
            store,
            published: false,
        }
    }

    /// True when an original price is present (the "SuperDeals" filter).
    #[must_use]
    pub const fn has_discount(&self) -> bool {
        self.original_price.is_some()
    }

    /// True when the original price is higher than the current price.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|original| original > self.price)
    }

    /// Case-insensitive match of a search term against name, description,
    /// category and store name.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        [
            self.name.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            self.store.name.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Validation failures for a seller's product draft.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductDraftError {
    #[error("product name is required")]
    MissingName,
    #[error("description is required")]
    MissingDescription,
    #[error("image is required")]
    MissingImage,
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// Seller input for a new product.
///
/// The id, counters, publication flag and owning store are assigned by the
/// store when the draft is added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub original_price: Option<Price>,
    pub category: String,
    pub image_url: String,
}

impl NewProduct {
    /// Check required fields and the category against the fixed table.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn validate(&self) -> Result<&'static Category, ProductDraftError> {
        if self.name.trim().is_empty() {
            return Err(ProductDraftError::MissingName);
        }
        if self.description.trim().is_empty() {
            return Err(ProductDraftError::MissingDescription);
        }
        if self.image_url.trim().is_empty() {
            return Err(ProductDraftError::MissingImage);
        }
        Category::by_name(&self.category)
            .ok_or_else(|| ProductDraftError::UnknownCategory(self.category.clone()))
    }
}
