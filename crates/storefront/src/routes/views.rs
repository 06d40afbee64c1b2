//! JSON view models shared by the route handlers.

use ownshop_core::{CartItem, CurrencyCode, Product, Role, User};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::store::{Cart, Identity};

/// A product with display helpers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub on_sale: bool,
    pub display_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_original_price: Option<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            on_sale: product.is_on_sale(),
            display_price: product.price.display(),
            display_original_price: product.original_price.map(|price| price.display()),
            product,
        }
    }
}

/// Convert a list of products.
pub fn product_views(products: Vec<Product>) -> Vec<ProductView> {
    products.into_iter().map(ProductView::from).collect()
}

/// A cart line.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub product: ProductView,
    pub quantity: u32,
    pub line_total: Decimal,
    pub display_line_total: String,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        let line_total = item.line_total();
        Self {
            product: ProductView::from(item.product.clone()),
            quantity: item.quantity,
            line_total,
            display_line_total: format_amount(line_total),
        }
    }
}

/// The cart with its derived totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: Decimal,
    pub display_subtotal: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        Self {
            items: cart.items().map(CartItemView::from).collect(),
            subtotal,
            display_subtotal: format_amount(subtotal),
            item_count: cart.item_count(),
        }
    }
}

/// Who is signed in, if anyone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    pub cart_count: u32,
}

impl SessionView {
    #[must_use]
    pub fn new(identity: Option<&Identity>, cart_count: u32) -> Self {
        Self {
            signed_in: identity.is_some(),
            role: identity.map(|identity| identity.role),
            user: identity.map(|identity| identity.user.clone()),
            cart_count,
        }
    }
}

fn format_amount(amount: Decimal) -> String {
    CurrencyCode::default().format(amount)
}
