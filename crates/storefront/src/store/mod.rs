//! Store state manager.
//!
//! [`Store`] is the single owner of one session's identity and cart, with a
//! handle to the process-wide [`SharedCatalog`] (products and banner). All
//! mutation goes through its operations, which check the caller's role,
//! persist the session entries and publish a [`StoreEvent`].
//!
//! In the server a `Store` is rebuilt from the session for every request with
//! [`Store::restore`].

mod cart;
mod catalog;
mod error;
mod events;
pub mod seed;
pub mod session;

pub use cart::Cart;
pub use catalog::{
    Catalog, CatalogFilter, MORE_TO_LOVE_PAGE_SIZE, RELATED_PRODUCTS_LIMIT, SharedCatalog,
    TODAYS_DEALS_LIMIT,
};
pub use error::StoreError;
pub use events::{Notifier, StoreEvent};
pub use session::{MemorySessionStorage, SessionError, SessionStorage};

use ownshop_core::{Banner, CartItem, Email, NewProduct, Product, ProductId, Role, StoreRef, User};
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::services::auth::{AuthError, CredentialDirectory};
use session::{keys, read_json, write_json};

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The signed-in identity and its role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user: User,
    pub role: Role,
}

/// Identity, cart and catalog access for one session.
#[derive(Debug)]
pub struct Store<S> {
    catalog: SharedCatalog,
    notifier: Notifier,
    session: S,
    identity: Option<Identity>,
    cart: Cart,
}

impl<S: SessionStorage> Store<S> {
    /// A guest store. Nothing is read from `session`.
    #[must_use]
    pub fn new(catalog: SharedCatalog, notifier: Notifier, session: S) -> Self {
        Self {
            catalog,
            notifier,
            session,
            identity: None,
            cart: Cart::new(),
        }
    }

    /// Rebuild a store from its session entries.
    ///
    /// Runs [`Store::check_auth`] for whichever role marker is persisted.
    /// Unreadable entries leave the store as a guest.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` if the storage backend fails.
    pub async fn restore(catalog: SharedCatalog, notifier: Notifier, session: S) -> Result<Self> {
        let mut store = Self::new(catalog, notifier, session);
        if let Some(role) = store.read_lenient::<Role>(keys::AUTH_ROLE).await? {
            store.check_auth(role).await?;
        }
        Ok(store)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.identity.as_ref().map(|identity| &identity.user)
    }

    /// Current role; `None` for a guest.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.identity.as_ref().map(|identity| identity.role)
    }

    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &SharedCatalog {
        &self.catalog
    }

    #[must_use]
    pub const fn session(&self) -> &S {
        &self.session
    }

    // =========================================================================
    // Identity
    // =========================================================================

    /// Rehydrate the identity if the session holds a `role` marker.
    ///
    /// Returns whether the store is now signed in with `role`. Calling it
    /// again is harmless.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` if the storage backend fails.
    #[instrument(skip(self))]
    pub async fn check_auth(&mut self, role: Role) -> Result<bool> {
        if self.role() == Some(role) {
            return Ok(true);
        }
        if self.read_lenient::<Role>(keys::AUTH_ROLE).await? != Some(role) {
            return Ok(false);
        }
        let Some(user) = self.read_lenient::<User>(keys::USER).await? else {
            return Ok(false);
        };

        self.cart = self
            .read_lenient::<Cart>(keys::CART)
            .await?
            .unwrap_or_default();
        self.identity = Some(Identity { user, role });
        Ok(true)
    }

    /// Sign in as a customer or seller, replacing any current identity.
    ///
    /// Sellers without a store name get `"<email>'s Store"`. The admin role
    /// is only reachable through [`Store::admin_sign_in`]. The cart is kept.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidEmail` for a malformed address,
    /// `StoreError::Unauthorized` for `Role::Admin`, or a session error.
    #[instrument(skip(self))]
    pub async fn sign_in(
        &mut self,
        email: &str,
        role: Role,
        store_name: Option<String>,
    ) -> Result<User> {
        let email = Email::parse(email)?;
        let user = match role {
            Role::Customer => User::customer(email),
            Role::Seller => User::seller(email, store_name),
            Role::Admin => return Err(StoreError::Unauthorized),
        };
        self.establish(user.clone(), role).await?;
        Ok(user)
    }

    /// Check admin credentials and sign in on success.
    ///
    /// Returns `false`, leaving the store unchanged, when the check fails.
    ///
    /// # Errors
    ///
    /// Only session storage failures are errors.
    pub async fn admin_sign_in(
        &mut self,
        directory: &CredentialDirectory,
        email: &str,
        password: &str,
    ) -> Result<bool> {
        match directory.verify_admin(email, password).await {
            Ok(email) => {
                self.establish(User::admin(email), Role::Admin).await?;
                Ok(true)
            }
            Err(err) => {
                log_rejected(&err, Role::Admin);
                Ok(false)
            }
        }
    }

    /// Check seller credentials and sign in on success.
    ///
    /// Returns `false`, leaving the store unchanged, when the check fails.
    ///
    /// # Errors
    ///
    /// Only session storage failures are errors.
    pub async fn seller_sign_in(
        &mut self,
        directory: &CredentialDirectory,
        email: &str,
        password: &str,
    ) -> Result<bool> {
        match directory.verify_seller(email, password).await {
            Ok(seller) => {
                let user = User::seller(seller.email, seller.store_name);
                self.establish(user, Role::Seller).await?;
                Ok(true)
            }
            Err(err) => {
                log_rejected(&err, Role::Seller);
                Ok(false)
            }
        }
    }

    /// Clear identity and cart, and remove every persisted entry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` if the storage backend fails. The
    /// in-memory state is cleared regardless.
    #[instrument(skip(self))]
    pub async fn sign_out(&mut self) -> Result<()> {
        self.identity = None;
        self.cart.clear();

        for key in [keys::AUTH_ROLE, keys::USER, keys::CART] {
            self.session.remove_item(key).await?;
        }

        clear_sentry_user();
        self.notifier.publish(StoreEvent::SignedOut);
        Ok(())
    }

    async fn establish(&mut self, user: User, role: Role) -> Result<()> {
        write_json(&self.session, keys::AUTH_ROLE, &role).await?;
        write_json(&self.session, keys::USER, &user).await?;

        set_sentry_user(&user.uid, Some(user.email.as_str()));
        tracing::info!(uid = %user.uid, role = %role, "Signed in");
        self.notifier.publish(StoreEvent::SignedIn {
            email: user.email.to_string(),
            role,
        });
        self.identity = Some(Identity { user, role });
        Ok(())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add `quantity` of `product` to the cart and return the line quantity.
    ///
    /// # Errors
    ///
    /// - `StoreError::Unauthenticated` for a guest (a `SignInRequired` event
    ///   is published)
    /// - `StoreError::ProductUnavailable` for an unpublished product (a
    ///   `ProductUnavailable` event is published)
    /// - `StoreError::InvalidQuantity` for a zero quantity
    ///
    /// The cart is unchanged on every error.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<u32> {
        if self.identity.is_none() {
            self.notifier.publish(StoreEvent::SignInRequired);
            return Err(StoreError::Unauthenticated);
        }
        if !product.published {
            self.notifier.publish(StoreEvent::ProductUnavailable {
                product_id: product.id.clone(),
            });
            return Err(StoreError::ProductUnavailable);
        }
        if quantity == 0 {
            return Err(StoreError::InvalidQuantity);
        }

        let mut cart = self.cart.clone();
        let line_quantity = cart.add(product, quantity);
        self.commit_cart(cart).await?;

        self.publish_cart_change(&product.id, &product.name, line_quantity);
        Ok(line_quantity)
    }

    /// Remove a line. Absent ids are a no-op returning `None`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` if persisting the cart fails.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&mut self, id: &ProductId) -> Result<Option<CartItem>> {
        if self.cart.get(id).is_none() {
            return Ok(None);
        }

        let mut cart = self.cart.clone();
        let removed = cart.remove(id);
        self.commit_cart(cart).await?;

        if let Some(item) = &removed {
            self.publish_cart_change(id, &item.product.name, 0);
        }
        Ok(removed)
    }

    /// Set a line's quantity exactly; zero or less removes it.
    ///
    /// Returns whether the product was in the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Session` if persisting the cart fails.
    #[instrument(skip(self))]
    pub async fn update_cart_quantity(&mut self, id: &ProductId, quantity: i64) -> Result<bool> {
        if quantity <= 0 {
            return Ok(self.remove_from_cart(id).await?.is_some());
        }
        let Some(item) = self.cart.get(id) else {
            return Ok(false);
        };
        let name = item.product.name.clone();
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        let mut cart = self.cart.clone();
        cart.set_quantity(id, quantity);
        self.commit_cart(cart).await?;

        self.publish_cart_change(id, &name, quantity);
        Ok(true)
    }

    async fn commit_cart(&mut self, cart: Cart) -> Result<()> {
        write_json(&self.session, keys::CART, &cart).await?;
        self.cart = cart;
        Ok(())
    }

    fn publish_cart_change(&self, id: &ProductId, name: &str, quantity: u32) {
        self.notifier.publish(StoreEvent::CartChanged {
            product_id: id.clone(),
            product_name: name.to_string(),
            quantity,
            item_count: self.cart.item_count(),
        });
    }

    // =========================================================================
    // Catalog (seller and admin)
    // =========================================================================

    /// Add a draft to the catalog under the seller's store.
    ///
    /// The product gets a fresh id, zeroed counters and `published = false`.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`/`Unauthorized` unless signed in as a seller,
    /// `MissingStoreName` if the seller has none, or `InvalidProduct`.
    #[instrument(skip(self, draft), fields(name = %draft.name))]
    pub fn add_product(&self, draft: NewProduct) -> Result<Product> {
        let store_name = self.seller_store()?.to_string();
        draft.validate()?;

        let product = self
            .catalog
            .write()
            .insert_draft(draft, StoreRef::new(store_name));

        tracing::info!(product_id = %product.id, "Product added");
        self.notifier.publish(StoreEvent::ProductAdded {
            product_id: product.id.clone(),
            name: product.name.clone(),
        });
        Ok(product)
    }

    /// Delete one of the seller's products. Absent ids return `None`.
    ///
    /// Carts holding the product keep their snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`/`Unauthorized` unless signed in as the
    /// seller owning the product.
    #[instrument(skip(self))]
    pub fn remove_product(&self, id: &ProductId) -> Result<Option<Product>> {
        let store_name = self.seller_store()?;
        let removed = {
            let mut catalog = self.catalog.write();
            match catalog.get(id).map(|product| product.store.name.as_str()) {
                None => None,
                Some(owner) if owner != store_name => return Err(StoreError::Unauthorized),
                Some(_) => catalog.remove(id),
            }
        };

        if removed.is_some() {
            self.notifier.publish(StoreEvent::ProductRemoved {
                product_id: id.clone(),
            });
        }
        Ok(removed)
    }

    /// Flip `published` on one of the seller's products. Absent ids return
    /// `None`.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`/`Unauthorized` unless signed in as the
    /// seller owning the product.
    #[instrument(skip(self))]
    pub fn toggle_product_publication(&self, id: &ProductId) -> Result<Option<Product>> {
        let store_name = self.seller_store()?;
        let toggled = {
            let mut catalog = self.catalog.write();
            match catalog.get(id).map(|product| product.store.name.as_str()) {
                None => None,
                Some(owner) if owner != store_name => return Err(StoreError::Unauthorized),
                Some(_) => catalog.toggle_published(id).cloned(),
            }
        };

        if let Some(product) = &toggled {
            self.notifier.publish(StoreEvent::PublicationToggled {
                product_id: product.id.clone(),
                name: product.name.clone(),
                published: product.published,
            });
        }
        Ok(toggled)
    }

    /// Replace the homepage banner. Both fields change together.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`/`Unauthorized` unless signed in as admin, or
    /// `InvalidBanner` for an empty title or a non-absolute image URL.
    #[instrument(skip(self))]
    pub fn set_banner(&self, title: &str, image_url: &str) -> Result<Banner> {
        self.require_role(Role::Admin)?;

        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidBanner("title is required".to_string()));
        }
        let image_url = Url::parse(image_url.trim())
            .map_err(|e| StoreError::InvalidBanner(format!("image URL: {e}")))?;

        let banner = Banner {
            title: title.to_string(),
            image_url: image_url.to_string(),
        };
        self.catalog.write().set_banner(banner.clone());

        self.notifier.publish(StoreEvent::BannerChanged {
            title: banner.title.clone(),
        });
        Ok(banner)
    }

    // =========================================================================
    // Derived views
    // =========================================================================

    /// Sum of `price * quantity` over the cart.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    /// Units in the cart.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// The current seller's products, published or not.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`/`Unauthorized` unless signed in as a seller.
    pub fn seller_products(&self) -> Result<Vec<Product>> {
        let store_name = self.seller_store()?;
        Ok(self.catalog.read().seller_products(store_name))
    }

    /// Every catalog product, published or not.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated`/`Unauthorized` unless signed in as an admin.
    pub fn all_products(&self) -> Result<Vec<Product>> {
        self.require_role(Role::Admin)?;
        Ok(self.catalog.read().iter().cloned().collect())
    }

    /// Published products matching `filter`.
    #[must_use]
    pub fn visible_products(&self, filter: &CatalogFilter) -> Vec<Product> {
        self.catalog.read().visible_products(filter)
    }

    /// Any product by id, published or not.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<Product> {
        self.catalog.read().get(id).cloned()
    }

    #[must_use]
    pub fn banner(&self) -> Banner {
        self.catalog.read().banner().clone()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn require_role(&self, role: Role) -> Result<&User> {
        match &self.identity {
            None => Err(StoreError::Unauthenticated),
            Some(identity) if identity.role == role => Ok(&identity.user),
            Some(_) => Err(StoreError::Unauthorized),
        }
    }

    fn seller_store(&self) -> Result<&str> {
        self.require_role(Role::Seller)?
            .store_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .ok_or(StoreError::MissingStoreName)
    }

    /// Read a session entry, treating an unreadable value as absent.
    async fn read_lenient<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>> {
        match read_json(&self.session, key).await {
            Ok(value) => Ok(value),
            Err(SessionError::Corrupt { key, source }) => {
                tracing::warn!(key, error = %source, "Ignoring unreadable session entry");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn log_rejected(err: &AuthError, role: Role) {
    tracing::info!(error = %err, role = %role, "Sign-in rejected");
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use ownshop_core::Price;
    use serde_json::Value;

    use super::*;
    use crate::config::AuthConfig;

    fn product(id: &str, price: &str, published: bool, store: &str) -> Product {
        let mut product = Product::from_draft(
            ProductId::new(id),
            NewProduct {
                name: format!("Product {id}"),
                description: "A product".to_string(),
                price: Price::parse(price).unwrap(),
                original_price: None,
                category: "Electronics".to_string(),
                image_url: "https://img.example/p.jpg".to_string(),
            },
            StoreRef::new(store),
        );
        product.published = published;
        product
    }

    fn catalog() -> SharedCatalog {
        SharedCatalog::new(Catalog::new([
            product("1", "10", true, "Tech Wonders"),
            product("2", "4.50", true, "SoundScape"),
            product("3", "99", false, "Tech Wonders"),
        ]))
    }

    fn store() -> Store<MemorySessionStorage> {
        Store::new(catalog(), Notifier::new(), MemorySessionStorage::new())
    }

    fn directory() -> CredentialDirectory {
        CredentialDirectory::demo(&AuthConfig {
            latency: Duration::ZERO,
            open_seller_signup: true,
        })
    }

    fn draft(name: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "Brand new".to_string(),
            price: Price::parse("5").unwrap(),
            original_price: None,
            category: "Electronics".to_string(),
            image_url: "https://img.example/x.jpg".to_string(),
        }
    }

    async fn signed_in() -> Store<MemorySessionStorage> {
        let mut store = store();
        store.sign_in("a@b.com", Role::Customer, None).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_sign_in_and_add_to_cart() {
        let mut store = signed_in().await;
        let p1 = store.product(&ProductId::new("1")).unwrap();

        assert_eq!(store.add_to_cart(&p1, 2).await.unwrap(), 2);
        let items: Vec<_> = store.cart().items().cloned().collect();
        assert_eq!(items, vec![CartItem { product: p1, quantity: 2 }]);
        assert_eq!(store.subtotal(), Decimal::from(20));
    }

    #[tokio::test]
    async fn test_add_to_cart_requires_identity() {
        let mut store = store();
        let mut events = store.notifier.subscribe();
        let p1 = store.product(&ProductId::new("1")).unwrap();

        assert!(matches!(
            store.add_to_cart(&p1, 1).await,
            Err(StoreError::Unauthenticated)
        ));
        assert!(store.cart().is_empty());
        assert_eq!(events.try_recv().unwrap(), StoreEvent::SignInRequired);
    }

    #[tokio::test]
    async fn test_unpublished_product_never_enters_cart() {
        let mut store = signed_in().await;
        let p1 = store.product(&ProductId::new("1")).unwrap();
        store.add_to_cart(&p1, 1).await.unwrap();
        let before = store.cart().clone();

        let hidden = store.product(&ProductId::new("3")).unwrap();
        for quantity in [1, 5] {
            assert!(matches!(
                store.add_to_cart(&hidden, quantity).await,
                Err(StoreError::ProductUnavailable)
            ));
        }
        assert_eq!(store.cart(), &before);
    }

    #[tokio::test]
    async fn test_repeated_adds_accumulate() {
        let mut store = signed_in().await;
        let p2 = store.product(&ProductId::new("2")).unwrap();
        let p1 = store.product(&ProductId::new("1")).unwrap();

        for quantity in [1, 3, 2] {
            store.add_to_cart(&p2, quantity).await.unwrap();
        }
        store.add_to_cart(&p1, 1).await.unwrap();

        let items: Vec<_> = store.cart().items().collect();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].product.id.as_str(), "2");
        assert_eq!(items[0].quantity, 6);
        assert!(matches!(
            store.add_to_cart(&p1, 0).await,
            Err(StoreError::InvalidQuantity)
        ));
    }

    #[tokio::test]
    async fn test_update_quantity() {
        let mut store = signed_in().await;
        let p1 = store.product(&ProductId::new("1")).unwrap();
        store.add_to_cart(&p1, 2).await.unwrap();

        assert!(store.update_cart_quantity(&p1.id, 7).await.unwrap());
        assert_eq!(store.item_count(), 7);

        assert!(!store.update_cart_quantity(&ProductId::new("2"), 3).await.unwrap());
        assert_eq!(store.cart().len(), 1);

        assert!(store.update_cart_quantity(&p1.id, -1).await.unwrap());
        assert!(store.cart().get(&p1.id).is_none());
    }

    #[tokio::test]
    async fn test_remove_missing_is_noop() {
        let mut store = signed_in().await;
        let p1 = store.product(&ProductId::new("1")).unwrap();
        store.add_to_cart(&p1, 1).await.unwrap();
        let before = store.cart().clone();

        assert!(store.remove_from_cart(&ProductId::new("404")).await.unwrap().is_none());
        assert_eq!(store.cart(), &before);
    }

    #[tokio::test]
    async fn test_sign_out_clears_everything() {
        let mut store = signed_in().await;
        let p1 = store.product(&ProductId::new("1")).unwrap();
        store.add_to_cart(&p1, 3).await.unwrap();
        assert!(!store.session().is_empty());

        store.sign_out().await.unwrap();
        assert!(store.cart().is_empty());
        assert_eq!(store.role(), None);
        assert!(store.session().is_empty());

        let mut guest = self::store();
        guest.sign_out().await.unwrap();
        assert!(guest.session().is_empty());
    }

    #[tokio::test]
    async fn test_sign_in_persists_session_shape() {
        let mut store = store();
        let user = store
            .sign_in("new@vendor.io", Role::Seller, None)
            .await
            .unwrap();
        assert_eq!(user.store_name.as_deref(), Some("new@vendor.io's Store"));

        let session = store.session();
        assert_eq!(
            session.get_item(keys::AUTH_ROLE).await.unwrap(),
            Some(Value::String("seller".to_string()))
        );
        let stored = session.get_item(keys::USER).await.unwrap().unwrap();
        assert_eq!(stored["storeName"], "new@vendor.io's Store");

        assert!(matches!(
            store.sign_in("a@b.com", Role::Admin, None).await,
            Err(StoreError::Unauthorized)
        ));
        assert_eq!(store.role(), Some(Role::Seller));
    }

    #[tokio::test]
    async fn test_restore_rehydrates_identity_and_cart() {
        let catalog = catalog();
        let notifier = Notifier::new();
        let session = MemorySessionStorage::new();

        let mut first = Store::new(catalog.clone(), notifier.clone(), session.clone());
        first.sign_in("a@b.com", Role::Customer, None).await.unwrap();
        let p1 = first.product(&ProductId::new("1")).unwrap();
        first.add_to_cart(&p1, 2).await.unwrap();

        let mut second = Store::restore(catalog, notifier, session).await.unwrap();
        assert_eq!(second.role(), Some(Role::Customer));
        assert_eq!(second.item_count(), 2);

        assert!(second.check_auth(Role::Customer).await.unwrap());
        assert!(!second.check_auth(Role::Admin).await.unwrap());
        assert_eq!(second.role(), Some(Role::Customer));
    }

    #[tokio::test]
    async fn test_restore_ignores_corrupt_entries() {
        let session = MemorySessionStorage::new();
        session
            .set_item(keys::AUTH_ROLE, Value::String("root".to_string()))
            .await
            .unwrap();
        let store = Store::restore(catalog(), Notifier::new(), session.clone())
            .await
            .unwrap();
        assert!(!store.is_signed_in());

        session
            .set_item(keys::AUTH_ROLE, Value::String("user".to_string()))
            .await
            .unwrap();
        session.set_item(keys::USER, Value::Bool(true)).await.unwrap();
        let store = Store::restore(catalog(), Notifier::new(), session).await.unwrap();
        assert!(!store.is_signed_in());
    }

    #[tokio::test]
    async fn test_admin_sign_in() {
        let directory = directory();
        let mut store = store();

        assert!(store
            .admin_sign_in(&directory, "admin@example.com", "password")
            .await
            .unwrap());
        assert_eq!(store.role(), Some(Role::Admin));
        assert_eq!(store.user().unwrap().uid.as_str(), "local-admin");

        assert!(!store.admin_sign_in(&directory, "x@x.com", "wrong").await.unwrap());
        assert_eq!(store.role(), Some(Role::Admin));

        let mut guest = self::store();
        assert!(!guest.admin_sign_in(&directory, "x@x.com", "wrong").await.unwrap());
        assert_eq!(guest.role(), None);
    }

    #[tokio::test]
    async fn test_seller_sign_in_resolves_store_name() {
        let directory = directory();
        let mut store = store();
        assert!(store
            .seller_sign_in(&directory, "seller@techwonders.com", "password")
            .await
            .unwrap());
        assert_eq!(
            store.user().unwrap().store_name.as_deref(),
            Some("Tech Wonders")
        );

        let ids: Vec<_> = store
            .seller_products()
            .unwrap()
            .into_iter()
            .map(|p| p.id.into_inner())
            .collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[tokio::test]
    async fn test_add_product_as_seller() {
        let mut store = store();
        store
            .sign_in("s@s.com", Role::Seller, Some("S".to_string()))
            .await
            .unwrap();
        let before: Vec<ProductId> = store.catalog().read().iter().map(|p| p.id.clone()).collect();

        let product = store.add_product(draft("X")).unwrap();
        assert!(!product.published);
        assert_eq!(product.sold, 0);
        assert!(product.rating.abs() < f32::EPSILON);
        assert_eq!(product.store.name, "S");
        assert!(!before.contains(&product.id));
        assert_eq!(store.catalog().read().len(), before.len() + 1);

        let mut bad = draft("Y");
        bad.category = "Groceries".to_string();
        assert!(matches!(
            store.add_product(bad),
            Err(StoreError::InvalidProduct(_))
        ));
    }

    #[tokio::test]
    async fn test_catalog_mutations_check_role() {
        let customer = signed_in().await;
        assert!(matches!(
            customer.add_product(draft("X")),
            Err(StoreError::Unauthorized)
        ));
        assert!(matches!(
            customer.set_banner("T", "https://img.example/b.jpg"),
            Err(StoreError::Unauthorized)
        ));
        assert!(matches!(
            store().toggle_product_publication(&ProductId::new("1")),
            Err(StoreError::Unauthenticated)
        ));

        let mut seller = store();
        seller
            .sign_in("seller@soundscape.com", Role::Seller, Some("SoundScape".to_string()))
            .await
            .unwrap();
        assert!(matches!(
            seller.remove_product(&ProductId::new("1")),
            Err(StoreError::Unauthorized)
        ));
        assert!(seller.catalog().read().contains(&ProductId::new("1")));
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_flag() {
        let mut store = store();
        store
            .sign_in("t@t.com", Role::Seller, Some("Tech Wonders".to_string()))
            .await
            .unwrap();
        let id = ProductId::new("3");

        let once = store.toggle_product_publication(&id).unwrap().unwrap();
        assert!(once.published);
        let twice = store.toggle_product_publication(&id).unwrap().unwrap();
        assert!(!twice.published);

        assert!(store
            .toggle_product_publication(&ProductId::new("nope"))
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_remove_product_keeps_cart_snapshot() {
        let catalog = catalog();
        let session = MemorySessionStorage::new();
        let mut shopper = Store::new(catalog.clone(), Notifier::new(), session);
        shopper.sign_in("a@b.com", Role::Customer, None).await.unwrap();
        let p1 = shopper.product(&ProductId::new("1")).unwrap();
        shopper.add_to_cart(&p1, 1).await.unwrap();

        let mut seller = Store::new(catalog, Notifier::new(), MemorySessionStorage::new());
        seller
            .sign_in("t@t.com", Role::Seller, Some("Tech Wonders".to_string()))
            .await
            .unwrap();
        assert!(seller.remove_product(&p1.id).unwrap().is_some());
        assert!(seller.remove_product(&p1.id).unwrap().is_none());

        assert!(shopper.product(&p1.id).is_none());
        assert_eq!(shopper.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_new_seller_gets_default_store_name() {
        let directory = directory();
        let mut store = store();
        assert!(store
            .seller_sign_in(&directory, "newbie@example.com", "password")
            .await
            .unwrap());
        assert_eq!(
            store.user().unwrap().store_name.as_deref(),
            Some("newbie@example.com's Store")
        );
        assert!(store.seller_products().unwrap().is_empty());

        let product = store.add_product(draft("Fresh")).unwrap();
        assert_eq!(product.store.name, "newbie@example.com's Store");
        assert_eq!(store.seller_products().unwrap(), vec![product]);
    }

    #[tokio::test]
    async fn test_all_products_includes_unpublished_for_admin() {
        let directory = directory();
        let mut admin = store();
        admin
            .admin_sign_in(&directory, "admin@example.com", "password")
            .await
            .unwrap();

        let all = admin.all_products().unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|p| p.id.as_str() == "3" && !p.published));

        assert!(matches!(store().all_products(), Err(StoreError::Unauthenticated)));

        let mut shopper = store();
        shopper.sign_in("a@b.com", Role::Customer, None).await.unwrap();
        assert!(matches!(shopper.all_products(), Err(StoreError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_set_banner() {
        let directory = directory();
        let mut store = store();
        store
            .admin_sign_in(&directory, "admin@example.com", "password")
            .await
            .unwrap();

        let banner = store
            .set_banner(" Winter sale ", "https://img.example/winter.jpg")
            .unwrap();
        assert_eq!(banner.title, "Winter sale");
        assert_eq!(store.banner(), banner);

        assert!(matches!(
            store.set_banner("", "https://img.example/x.jpg"),
            Err(StoreError::InvalidBanner(_))
        ));
        assert!(matches!(
            store.set_banner("Title", "not a url"),
            Err(StoreError::InvalidBanner(_))
        ));
        assert_eq!(store.banner(), banner);
    }
}
