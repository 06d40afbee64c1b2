//! Core types for OwnShop.
//!
//! This module provides type-safe wrappers for the storefront domain.

pub mod cart;
pub mod category;
pub mod email;
pub mod id;
pub mod locale;
pub mod price;
pub mod product;
pub mod role;
pub mod user;

pub use cart::CartItem;
pub use category::{CATEGORIES, Category, CategoryListing, slugify};
pub use email::{Email, EmailError};
pub use id::*;
pub use locale::{COUNTRIES, Country, LANGUAGES, Language, country_by_code, language_by_code};
pub use price::{CurrencyCode, Price, PriceError};
pub use product::{NewProduct, Product, ProductDraftError, StoreRef};
pub use role::Role;
pub use user::{Banner, User};
