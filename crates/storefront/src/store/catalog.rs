//! The product catalog and homepage banner.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use ownshop_core::{Banner, CategoryListing, NewProduct, Product, ProductId, StoreRef};
use serde::Deserialize;
use uuid::Uuid;

/// Related products shown on a product page.
pub const RELATED_PRODUCTS_LIMIT: usize = 10;

/// Products in the homepage "Today's deals" strip.
pub const TODAYS_DEALS_LIMIT: usize = 4;

/// Page size of the "More to love" feed.
pub const MORE_TO_LOVE_PAGE_SIZE: usize = 12;

/// Narrows the published catalog.
///
/// Unset fields do not filter. All set fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFilter {
    /// Category display name.
    pub category: Option<String>,
    /// Only products with an original price.
    #[serde(default)]
    pub discounted: bool,
    /// Free-text search term.
    pub search: Option<String>,
}

impl CatalogFilter {
    /// Filter for a `/categories/{slug}` listing.
    #[must_use]
    pub fn for_listing(listing: CategoryListing) -> Self {
        match listing {
            CategoryListing::Category(category) => Self {
                category: Some(category.name.to_string()),
                ..Self::default()
            },
            CategoryListing::SuperDeals => Self {
                discounted: true,
                ..Self::default()
            },
        }
    }

    /// Filter for a search term.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    fn accepts(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
            && (!self.discounted || product.has_discount())
            && self.search.as_deref().is_none_or(|term| product.matches(term))
    }
}

/// All products, published or not, plus the singleton banner.
///
/// Product ids are unique by construction; iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: IndexMap<ProductId, Product>,
    banner: Banner,
}

impl Catalog {
    /// Build a catalog from seed products. Later duplicates of an id replace
    /// earlier ones.
    #[must_use]
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        Self {
            products: products
                .into_iter()
                .map(|product| (product.id.clone(), product))
                .collect(),
            banner: Banner::default(),
        }
    }

    /// Look up any product, published or not.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.get(id)
    }

    /// Every product in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.contains_key(id)
    }

    /// Add a seller draft under a fresh id and return the stored product.
    pub fn insert_draft(&mut self, draft: NewProduct, store: StoreRef) -> Product {
        let id = self.fresh_id();
        let product = Product::from_draft(id.clone(), draft, store);
        self.products.insert(id, product.clone());
        product
    }

    fn fresh_id(&self) -> ProductId {
        loop {
            let id = ProductId::new(Uuid::new_v4().to_string());
            if !self.products.contains_key(&id) {
                return id;
            }
        }
    }

    /// Delete a product, keeping the order of the rest.
    pub fn remove(&mut self, id: &ProductId) -> Option<Product> {
        self.products.shift_remove(id)
    }

    /// Flip a product's `published` flag and return the updated product.
    pub fn toggle_published(&mut self, id: &ProductId) -> Option<&Product> {
        let product = self.products.get_mut(id)?;
        product.published = !product.published;
        Some(product)
    }

    #[must_use]
    pub const fn banner(&self) -> &Banner {
        &self.banner
    }

    /// Replace the banner as a whole.
    pub fn set_banner(&mut self, banner: Banner) {
        self.banner = banner;
    }

    /// Published products in catalog order.
    pub fn published(&self) -> impl Iterator<Item = &Product> {
        self.products.values().filter(|product| product.published)
    }

    /// Published products accepted by `filter`.
    #[must_use]
    pub fn visible_products(&self, filter: &CatalogFilter) -> Vec<Product> {
        self.published()
            .filter(|product| filter.accepts(product))
            .cloned()
            .collect()
    }

    /// A published product by id. Unpublished products are hidden.
    #[must_use]
    pub fn visible_product(&self, id: &ProductId) -> Option<&Product> {
        self.get(id).filter(|product| product.published)
    }

    /// Published products of the same category, excluding the product itself.
    #[must_use]
    pub fn related_products(&self, id: &ProductId, limit: usize) -> Vec<Product> {
        let Some(product) = self.get(id) else {
            return Vec::new();
        };
        self.published()
            .filter(|other| other.category == product.category && other.id != product.id)
            .take(limit)
            .cloned()
            .collect()
    }

    /// The first published products, for the homepage.
    #[must_use]
    pub fn todays_deals(&self, limit: usize) -> Vec<Product> {
        self.published().take(limit).cloned().collect()
    }

    /// One page of the published catalog.
    #[must_use]
    pub fn more_to_love(&self, offset: usize, limit: usize) -> Vec<Product> {
        self.published().skip(offset).take(limit).cloned().collect()
    }

    /// Every product, published or not, belonging to `store_name`.
    #[must_use]
    pub fn seller_products(&self, store_name: &str) -> Vec<Product> {
        self.products
            .values()
            .filter(|product| product.store.name == store_name)
            .cloned()
            .collect()
    }
}

/// Process-wide catalog handle.
///
/// Cloning shares the catalog. Lock poisoning is recovered from, since every
/// catalog mutation leaves it consistent before any point that could panic.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Catalog>>,
}

impl SharedCatalog {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Catalog seeded with the demo products.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(Catalog::new(super::seed::products()))
    }

    /// Acquire a read guard.
    pub fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire a write guard.
    pub fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use ownshop_core::{Category, Price};

    fn product(id: &str, category: &str, published: bool, original: Option<&str>) -> Product {
        let mut product = Product::from_draft(
            ProductId::new(id),
            NewProduct {
                name: format!("Item {id}"),
                description: "desc".to_string(),
                price: Price::parse("10").unwrap(),
                original_price: original.map(|p| Price::parse(p).unwrap()),
                category: category.to_string(),
                image_url: "i.jpg".to_string(),
            },
            StoreRef::new(if id.starts_with('s') { "SoundScape" } else { "Tech Wonders" }),
        );
        product.published = published;
        product
    }

    fn catalog() -> Catalog {
        Catalog::new([
            product("1", "Electronics", true, Some("12")),
            product("2", "Electronics", true, None),
            product("3", "Electronics", false, Some("15")),
            product("s4", "Fashion", true, None),
            product("s5", "Electronics", true, None),
        ])
    }

    #[test]
    fn test_visible_products_filters() {
        let catalog = catalog();
        assert_eq!(catalog.visible_products(&CatalogFilter::default()).len(), 4);

        let deals = catalog.visible_products(&CatalogFilter {
            discounted: true,
            ..CatalogFilter::default()
        });
        assert_eq!(deals.len(), 1);
        assert_eq!(deals[0].id.as_str(), "1");

        let fashion = catalog.visible_products(&CatalogFilter::for_listing(
            CategoryListing::Category(Category::by_name("Fashion").unwrap()),
        ));
        assert_eq!(fashion.len(), 1);

        let search = catalog.visible_products(&CatalogFilter::search("soundscape"));
        let ids: Vec<_> = search.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["s4", "s5"]);
    }

    #[test]
    fn test_related_products() {
        let catalog = catalog();
        let related = catalog.related_products(&ProductId::new("1"), RELATED_PRODUCTS_LIMIT);
        let ids: Vec<_> = related.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["2", "s5"]);
        assert!(catalog.related_products(&ProductId::new("nope"), 10).is_empty());
        assert_eq!(catalog.related_products(&ProductId::new("1"), 1).len(), 1);
    }

    #[test]
    fn test_paging() {
        let catalog = catalog();
        assert_eq!(catalog.todays_deals(2).len(), 2);
        let page = catalog.more_to_love(3, MORE_TO_LOVE_PAGE_SIZE);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id.as_str(), "s5");
        assert!(catalog.more_to_love(40, 12).is_empty());
    }

    #[test]
    fn test_insert_draft_assigns_unique_id() {
        let mut catalog = catalog();
        let before = catalog.len();
        let draft = NewProduct {
            name: "X".to_string(),
            description: "x".to_string(),
            price: Price::parse("5").unwrap(),
            original_price: None,
            category: "Electronics".to_string(),
            image_url: "x.jpg".to_string(),
        };
        let a = catalog.insert_draft(draft.clone(), StoreRef::new("S"));
        let b = catalog.insert_draft(draft, StoreRef::new("S"));
        assert_ne!(a.id, b.id);
        assert_eq!(catalog.len(), before + 2);
        assert!(!catalog.get(&a.id).unwrap().published);
        assert_eq!(catalog.seller_products("S").len(), 2);
    }

    #[test]
    fn test_toggle_and_remove() {
        let mut catalog = catalog();
        let id = ProductId::new("3");
        assert!(catalog.visible_product(&id).is_none());
        assert!(catalog.toggle_published(&id).unwrap().published);
        assert!(catalog.visible_product(&id).is_some());
        assert!(catalog.toggle_published(&ProductId::new("zz")).is_none());

        catalog.remove(&ProductId::new("2"));
        let order: Vec<_> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(order, ["1", "3", "s4", "s5"]);
    }

    #[test]
    fn test_shared_catalog_clones_share_state() {
        let shared = SharedCatalog::new(catalog());
        let other = shared.clone();
        other.write().set_banner(Banner {
            title: "Sale".to_string(),
            image_url: "https://img.example/b.jpg".to_string(),
        });
        assert_eq!(shared.read().banner().title, "Sale");
    }
}
