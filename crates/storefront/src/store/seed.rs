//! Demo catalog loaded at start-up.

use ownshop_core::{Price, Product, ProductId, StoreRef};
use rust_decimal::Decimal;

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    /// Price in cents.
    price: i64,
    original_price: Option<i64>,
    rating: f32,
    reviews: u32,
    sold: u32,
    category: &'static str,
    image: &'static str,
    store: &'static str,
    published: bool,
}

const SEED: &[SeedProduct] = &[
    SeedProduct {
        id: "1",
        name: "Wireless Noise-Cancelling Headphones",
        description: "Over-ear headphones with active noise cancelling and 30-hour battery life.",
        price: 7999,
        original_price: Some(12999),
        rating: 4.7,
        reviews: 1243,
        sold: 5210,
        category: "Electronics",
        image: "photo-1505740420928-5e560c06d30e",
        store: "SoundScape",
        published: true,
    },
    SeedProduct {
        id: "2",
        name: "Smart Fitness Watch",
        description: "Heart-rate, sleep and GPS tracking in a water-resistant aluminium case.",
        price: 4999,
        original_price: Some(8999),
        rating: 4.5,
        reviews: 867,
        sold: 3104,
        category: "Electronics",
        image: "photo-1523275335684-37898b6baf30",
        store: "Tech Wonders",
        published: true,
    },
    SeedProduct {
        id: "3",
        name: "Portable Bluetooth Speaker",
        description: "Pocket-sized speaker with deep bass and 12 hours of playback.",
        price: 2599,
        original_price: None,
        rating: 4.3,
        reviews: 412,
        sold: 1890,
        category: "Electronics",
        image: "photo-1608043152269-423dbba4e7e1",
        store: "SoundScape",
        published: true,
    },
    SeedProduct {
        id: "4",
        name: "Men's Classic Denim Jacket",
        description: "Stonewashed cotton denim with a relaxed fit and button front.",
        price: 3999,
        original_price: Some(5999),
        rating: 4.4,
        reviews: 295,
        sold: 980,
        category: "Fashion",
        image: "photo-1551537482-f2075a1d41f2",
        store: "Urban Threads",
        published: true,
    },
    SeedProduct {
        id: "5",
        name: "Ceramic Plant Pot Set",
        description: "Three matte ceramic pots with drainage holes and bamboo trays.",
        price: 2299,
        original_price: None,
        rating: 4.6,
        reviews: 178,
        sold: 640,
        category: "Home & Garden",
        image: "photo-1485955900006-10f4d324d411",
        store: "Green Corner",
        published: true,
    },
    SeedProduct {
        id: "6",
        name: "Vitamin C Serum",
        description: "Brightening facial serum with hyaluronic acid, 30 ml.",
        price: 1599,
        original_price: Some(2499),
        rating: 4.2,
        reviews: 530,
        sold: 2210,
        category: "Beauty & Health",
        image: "photo-1620916566398-39f1143ab7be",
        store: "Glow Lab",
        published: true,
    },
    SeedProduct {
        id: "7",
        name: "Yoga Mat with Carry Strap",
        description: "Non-slip 6 mm mat for yoga and floor workouts.",
        price: 2999,
        original_price: None,
        rating: 4.5,
        reviews: 321,
        sold: 1402,
        category: "Sports & Outdoors",
        image: "photo-1601925260368-ae2f83cf8b7f",
        store: "Active Life",
        published: true,
    },
    SeedProduct {
        id: "8",
        name: "Wooden Building Blocks",
        description: "100-piece set of painted beech blocks for ages 3 and up.",
        price: 3499,
        original_price: None,
        rating: 4.8,
        reviews: 143,
        sold: 530,
        category: "Toys & Games",
        image: "photo-1587654780291-39c9404d746b",
        store: "Play Time",
        published: true,
    },
    SeedProduct {
        id: "9",
        name: "Minimalist Leather Watch",
        description: "Quartz movement, sapphire glass and a genuine leather strap.",
        price: 8999,
        original_price: Some(11999),
        rating: 4.6,
        reviews: 210,
        sold: 720,
        category: "Jewelry & Watches",
        image: "photo-1524592094714-0f0654e20314",
        store: "Timeless",
        published: true,
    },
    SeedProduct {
        id: "10",
        name: "Car Phone Mount",
        description: "Magnetic dashboard mount with 360 degree rotation.",
        price: 1299,
        original_price: None,
        rating: 4.1,
        reviews: 389,
        sold: 2890,
        category: "Automotive",
        image: "photo-1449965408869-eaa3f722e40d",
        store: "Tech Wonders",
        published: true,
    },
    SeedProduct {
        id: "11",
        name: "LED Desk Lamp",
        description: "Dimmable desk lamp with USB charging port and three colour modes.",
        price: 3299,
        original_price: Some(3999),
        rating: 4.4,
        reviews: 256,
        sold: 1130,
        category: "Home Improvement & Lighting",
        image: "photo-1507473885765-e6ed057f782c",
        store: "Bright Home",
        published: true,
    },
    SeedProduct {
        id: "12",
        name: "Cordless Drill Kit",
        description: "20 V drill driver with two batteries, charger and 30-piece bit set.",
        price: 6999,
        original_price: None,
        rating: 4.7,
        reviews: 198,
        sold: 610,
        category: "Tools & Industrial",
        image: "photo-1504148455328-c376907d081c",
        store: "Pro Tools",
        published: true,
    },
    SeedProduct {
        id: "13",
        name: "True Wireless Earbuds",
        description: "Compact earbuds with charging case and touch controls.",
        price: 3999,
        original_price: Some(5999),
        rating: 4.3,
        reviews: 744,
        sold: 4020,
        category: "Electronics",
        image: "photo-1590658268037-6bf12165a8df",
        store: "SoundScape",
        published: true,
    },
    SeedProduct {
        id: "14",
        name: "4K Action Camera",
        description: "Waterproof action camera with image stabilisation. Coming soon.",
        price: 14999,
        original_price: None,
        rating: 0.0,
        reviews: 0,
        sold: 0,
        category: "Electronics",
        image: "photo-1526170375885-4d8ecf77b99f",
        store: "Tech Wonders",
        published: false,
    },
];

fn image_url(photo: &str) -> String {
    format!("https://images.unsplash.com/{photo}?auto=format&fit=crop&w=800&q=80")
}

fn price(cents: i64) -> Option<Price> {
    Price::new(Decimal::new(cents, 2)).ok()
}

/// The demo products, in catalog order.
///
/// Entries with a non-positive price are skipped.
#[must_use]
pub fn products() -> Vec<Product> {
    SEED.iter()
        .filter_map(|seed| {
            Some(Product {
                id: ProductId::new(seed.id),
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                price: price(seed.price)?,
                original_price: seed.original_price.and_then(price),
                rating: seed.rating,
                reviews: seed.reviews,
                sold: seed.sold,
                category: seed.category.to_string(),
                image_url: image_url(seed.image),
                store: StoreRef::new(seed.store),
                published: seed.published,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use ownshop_core::Category;

    use super::*;

    #[test]
    fn test_seed_is_consistent() {
        let products = products();
        assert_eq!(products.len(), SEED.len());

        let ids: HashSet<_> = products.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), products.len());

        for product in &products {
            assert!(Category::by_name(&product.category).is_some(), "{}", product.name);
            assert!((0.0..=5.0).contains(&product.rating));
        }
        assert!(products.iter().any(|p| !p.published));
        assert!(products.iter().any(|p| p.store.name == "Tech Wonders"));
        assert!(products.iter().any(|p| p.store.name == "SoundScape"));
    }
}
