use chrono::{Duration, TimeZone, Utc};
use marketplace_search::Product;
use uuid::Uuid;

/// Product created `minutes` after a fixed epoch.
pub fn product(name: &str, description: &str, price: f64, stock: i64, category: &str, minutes: i64) -> Product {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes);
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        stock,
        category: category.to_string(),
        seller: None,
        product_image: None,
        created_at: created,
        updated_at: created,
    }
}

pub fn owned_by(mut product: Product, seller: Uuid) -> Product {
    product.seller = Some(seller);
    product
}

/// Five products; three mention "phone" in name or description.
pub fn phone_catalog() -> Vec<Product> {
    vec![
        product("Smartphone X", "Flagship device", 899.0, 5, "phones", 1),
        product("Phone case", "Silicone cover", 19.0, 0, "accessories", 2),
        product("Charger", "Works with any PHONE", 150.0, 12, "accessories", 3),
        product("Laptop", "14 inch", 1499.0, 3, "computers", 4),
        product("Desk", "Oak top", 6200.0, 1, "furniture", 5),
    ]
}

/// `count` products in one category, one minute apart.
pub fn numbered(count: usize, category: &str) -> Vec<Product> {
    (0..count)
        .map(|i| product(&format!("Item {i:02}"), "numbered", (i * 10) as f64, 1, category, i as i64))
        .collect()
}

/// Names with LIKE meta-characters next to near misses, plus prices on the
/// bucket boundaries.
pub fn wildcard_catalog() -> Vec<Product> {
    vec![
        product("Sale 50% off", "Clearance", 40.0, 2, "deals", 10),
        product("Pack of 500 pens", "Office", 100.0, 9, "office", 11),
        product("a_c adapter", "Power", 500.0, 0, "accessories", 12),
        product("abc blocks", "Toys", 5000.0, 4, "toys", 13),
        product("Back\\slash art", "Print", 999.99, 1, "deals", 14),
    ]
}
