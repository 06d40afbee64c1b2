//! Cart simulation against the seed catalog.
//!
//! Signs a customer in on an in-memory session, adds the given lines and
//! prints the resulting cart. Useful for checking prices and totals without
//! running the server.
//!
//! ```bash
//! ownshop cart --email shopper@example.com 1:2 3
//! ```

use ownshop_core::{CurrencyCode, ProductId, Role};
use ownshop_storefront::store::{
    MemorySessionStorage, Notifier, SharedCatalog, Store, StoreError,
};
use serde::Serialize;

use super::{CommandError, print_json};

/// One requested cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl std::str::FromStr for Line {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CommandError::InvalidLine(s.to_string());
        let (id, quantity) = match s.split_once(':') {
            Some((id, qty)) => (id, qty.trim().parse().map_err(|_| invalid())?),
            None => (s, 1),
        };
        let id = id.trim();
        if id.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            product_id: ProductId::new(id),
            quantity,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CartSummary {
    email: String,
    lines: Vec<SummaryLine>,
    subtotal: String,
    item_count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryLine {
    product_id: String,
    name: String,
    quantity: u32,
    line_total: String,
}

async fn build(email: &str, lines: &[Line]) -> Result<CartSummary, CommandError> {
    let mut store = Store::new(
        SharedCatalog::seeded(),
        Notifier::new(),
        MemorySessionStorage::new(),
    );
    store.sign_in(email, Role::Customer, None).await?;

    for line in lines {
        let product = store
            .product(&line.product_id)
            .ok_or_else(|| StoreError::NotFound(line.product_id.to_string()))?;
        store.add_to_cart(&product, line.quantity).await?;
    }

    let currency = CurrencyCode::default();
    Ok(CartSummary {
        email: email.to_string(),
        lines: store
            .cart()
            .items()
            .map(|item| SummaryLine {
                product_id: item.product.id.to_string(),
                name: item.product.name.clone(),
                quantity: item.quantity,
                line_total: currency.format(item.line_total()),
            })
            .collect(),
        subtotal: currency.format(store.subtotal()),
        item_count: store.item_count(),
    })
}

/// Simulate a cart and print it as JSON.
///
/// # Errors
///
/// Returns an error for an invalid email, an unknown or unpublished product,
/// or a zero quantity.
pub async fn simulate(email: &str, lines: &[Line]) -> Result<(), CommandError> {
    let summary = build(email, lines).await?;
    print_json(&summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let line: Line = "3:2".parse().unwrap();
        assert_eq!(line.product_id.as_str(), "3");
        assert_eq!(line.quantity, 2);

        let line: Line = "7".parse().unwrap();
        assert_eq!(line.quantity, 1);

        assert!("".parse::<Line>().is_err());
        assert!("3:x".parse::<Line>().is_err());
    }

    #[tokio::test]
    async fn test_build_merges_lines() {
        let lines = ["1:1".parse().unwrap(), "1:2".parse().unwrap()];
        let summary = build("shopper@example.com", &lines).await.unwrap();
        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.lines[0].quantity, 3);
        assert_eq!(summary.item_count, 3);
    }

    #[tokio::test]
    async fn test_build_rejects_unpublished() {
        let lines = ["14".parse().unwrap()];
        let err = build("shopper@example.com", &lines).await.unwrap_err();
        assert!(matches!(
            err,
            CommandError::Store(StoreError::ProductUnavailable)
        ));
    }
}
