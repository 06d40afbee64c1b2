//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Product;

/// One cart line: a product snapshot taken when it was added, and a quantity.
///
/// Quantity is always at least one; a line whose quantity would drop to zero
/// is removed from the cart instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    /// `price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.amount() * Decimal::from(self.quantity)
    }
}
