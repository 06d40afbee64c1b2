//! Store notifications.
//!
//! Every successful mutation, and every user-facing refusal, is published as
//! a [`StoreEvent`] so a rendering layer can show a toast or redirect.

use ownshop_core::{ProductId, Role};
use serde::Serialize;
use tokio::sync::broadcast;

/// Capacity of the notification channel. Slow subscribers skip old events.
const CHANNEL_CAPACITY: usize = 256;

/// A change or user-facing condition reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StoreEvent {
    #[serde(rename_all = "camelCase")]
    SignedIn { email: String, role: Role },
    SignedOut,
    #[serde(rename_all = "camelCase")]
    CartChanged {
        product_id: ProductId,
        product_name: String,
        quantity: u32,
        item_count: u32,
    },
    #[serde(rename_all = "camelCase")]
    ProductAdded { product_id: ProductId, name: String },
    #[serde(rename_all = "camelCase")]
    ProductRemoved { product_id: ProductId },
    #[serde(rename_all = "camelCase")]
    PublicationToggled {
        product_id: ProductId,
        name: String,
        published: bool,
    },
    BannerChanged { title: String },
    /// A guest tried to add to the cart.
    SignInRequired,
    /// Someone tried to add an unpublished product to the cart.
    #[serde(rename_all = "camelCase")]
    ProductUnavailable { product_id: ProductId },
}

impl StoreEvent {
    /// Short heading for a notification.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::SignedIn { .. } => "Signed in",
            Self::SignedOut => "Signed out",
            Self::CartChanged { .. } => "Cart updated",
            Self::ProductAdded { .. } => "Product Added",
            Self::ProductRemoved { .. } => "Product Removed",
            Self::PublicationToggled { published: true, .. } => "Product Published",
            Self::PublicationToggled { published: false, .. } => "Product Unpublished",
            Self::BannerChanged { .. } => "Banner updated",
            Self::SignInRequired => "Please sign in",
            Self::ProductUnavailable { .. } => "Product Not Available",
        }
    }

    /// Human readable detail line.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::SignedIn { email, role } => format!("Welcome back, {email} ({role})."),
            Self::SignedOut => "You have been signed out and your cart was cleared.".to_string(),
            Self::CartChanged {
                product_name,
                quantity,
                ..
            } => {
                if *quantity == 0 {
                    format!("{product_name} has been removed from your cart.")
                } else {
                    format!("{product_name} is in your cart (quantity {quantity}).")
                }
            }
            Self::ProductAdded { name, .. } => format!("{name} has been added as a draft."),
            Self::ProductRemoved { .. } => "The product has been successfully removed.".to_string(),
            Self::PublicationToggled {
                name, published, ..
            } => {
                let place = if *published { "visible on" } else { "hidden from" };
                format!("{name} is now {place} the main site.")
            }
            Self::BannerChanged { title } => format!("The homepage banner now reads \"{title}\"."),
            Self::SignInRequired => "You need to be signed in to add items to your cart.".to_string(),
            Self::ProductUnavailable { .. } => {
                "This product is currently not available for purchase.".to_string()
            }
        }
    }

    /// True for refusals the rendering layer should show as warnings.
    #[must_use]
    pub const fn is_destructive(&self) -> bool {
        matches!(self, Self::SignInRequired | Self::ProductUnavailable { .. })
    }
}

/// Broadcast publisher for [`StoreEvent`]s.
///
/// Cloning shares the channel. Publishing with no subscribers is fine.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<StoreEvent>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Publish an event, returning how many subscribers received it.
    pub fn publish(&self, event: StoreEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe to events published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.sender.subscribe()
    }
}
