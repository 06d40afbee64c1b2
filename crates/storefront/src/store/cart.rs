//! The shopping cart.

use indexmap::IndexMap;
use ownshop_core::{CartItem, Product, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Cart lines keyed by product id.
///
/// Holds at most one line per product; lines keep first-added order, and
/// removal does not reorder the rest. Persisted as a JSON array of lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: IndexMap<ProductId, CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` of `product`.
    ///
    /// An existing line keeps its snapshot and accumulates the quantity
    /// (saturating). Returns the line's new quantity.
    pub fn add(&mut self, product: &Product, quantity: u32) -> u32 {
        let line = self
            .items
            .entry(product.id.clone())
            .and_modify(|item| item.quantity = item.quantity.saturating_add(quantity))
            .or_insert_with(|| CartItem {
                product: product.clone(),
                quantity,
            });
        line.quantity
    }

    /// Remove a line, returning it if present.
    pub fn remove(&mut self, id: &ProductId) -> Option<CartItem> {
        self.items.shift_remove(id)
    }

    /// Set a line's quantity exactly. Returns false if the product is not in
    /// the cart.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) -> bool {
        self.items.get_mut(id).is_some_and(|item| {
            item.quantity = quantity;
            true
        })
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Look up a line.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.get(id)
    }

    /// Lines in first-added order.
    pub fn items(&self) -> impl Iterator<Item = &CartItem> {
        self.items.values()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.values().map(CartItem::line_total).sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .values()
            .fold(0_u32, |total, item| total.saturating_add(item.quantity))
    }
}

impl From<Vec<CartItem>> for Cart {
    /// Rebuild a cart, merging duplicate lines and dropping zero quantities.
    fn from(lines: Vec<CartItem>) -> Self {
        let mut cart = Self::new();
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            cart.add(&line.product, line.quantity);
        }
        cart
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items.into_values().collect()
    }
}
