//! Product catalog service
//!
//! [`MockCatalog`] serves a fixed inventory with artificial latency, standing in
//! for a remote storefront API.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use strum::{Display, EnumIter, EnumString};

#[cfg(test)]
use mockall::automock;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub category: String,
    pub stock: u32,
    pub rating: f64,
    pub review_count: u32,
    pub tags: Vec<String>,
    pub specifications: BTreeMap<String, String>,
    pub is_on_sale: bool,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Percent saved against the original price, if discounted.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        (original > self.price).then(|| ((original - self.price) / original * 100.0).round() as u32)
    }

    fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub product_count: u32,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum SortBy {
    /// Catalog order.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    /// Highest rated first.
    Rating,
    Newest,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilters {
    /// Case-insensitive category name.
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Minimum rating.
    pub rating: Option<f64>,
    pub in_stock: bool,
    /// Keep products carrying any of these tags.
    pub tags: Vec<String>,
    pub sort_by: SortBy,
}

impl ProductFilters {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| product.price > max) {
            return false;
        }
        if self.rating.is_some_and(|r| product.rating < r) {
            return false;
        }
        if self.in_stock && !product.in_stock() {
            return false;
        }
        self.tags.is_empty() || self.tags.iter().any(|t| product.tags.contains(t))
    }

    /// Filter and sort `products`.
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut selected: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();
        match self.sort_by {
            SortBy::Relevance => {}
            SortBy::PriceAsc => selected.sort_by(|a, b| a.price.total_cmp(&b.price)),
            SortBy::PriceDesc => selected.sort_by(|a, b| b.price.total_cmp(&a.price)),
            SortBy::Rating => selected.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortBy::Newest => selected.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        }
        selected
    }
}

#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ProductCatalog: Send + Sync {
    async fn products(&self, filters: ProductFilters) -> Vec<Product>;

    /// `None` when no product has this id.
    async fn product(&self, id: &str) -> Option<Product>;

    async fn categories(&self) -> Vec<Category>;

    /// Case-insensitive substring match over name, description and tags.
    async fn search(&self, query: &str) -> Vec<Product>;
}

/// Per-call latencies of the mock service.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Latency {
    pub products: Duration,
    pub product: Duration,
    pub categories: Duration,
    pub search: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            products: Duration::from_millis(500),
            product: Duration::from_millis(300),
            categories: Duration::from_millis(200),
            search: Duration::from_millis(400),
        }
    }
}

impl Latency {
    /// Every latency multiplied by `factor` (0 disables them).
    pub fn scaled(self, factor: f64) -> Self {
        let factor = factor.max(0.0);
        Self {
            products: self.products.mul_f64(factor),
            product: self.product.mul_f64(factor),
            categories: self.categories.mul_f64(factor),
            search: self.search.mul_f64(factor),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MockCatalog {
    products: Vec<Product>,
    categories: Vec<Category>,
    latency: Latency,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new(Latency::default())
    }
}

impl MockCatalog {
    pub fn new(latency: Latency) -> Self {
        Self {
            products: mock_products(),
            categories: mock_categories(),
            latency,
        }
    }

    /// The catalog without any simulated latency.
    pub fn instant() -> Self {
        Self::new(Latency::default().scaled(0.0))
    }

    pub fn inventory(&self) -> &[Product] {
        &self.products
    }
}

#[async_trait::async_trait]
impl ProductCatalog for MockCatalog {
    async fn products(&self, filters: ProductFilters) -> Vec<Product> {
        tokio::time::sleep(self.latency.products).await;
        filters.apply(&self.products)
    }

    async fn product(&self, id: &str) -> Option<Product> {
        tokio::time::sleep(self.latency.product).await;
        self.products.iter().find(|p| p.id == id).cloned()
    }

    async fn categories(&self) -> Vec<Category> {
        tokio::time::sleep(self.latency.categories).await;
        self.categories.clone()
    }

    async fn search(&self, query: &str) -> Vec<Product> {
        tokio::time::sleep(self.latency.search).await;
        self.products
            .iter()
            .filter(|p| p.matches_query(query))
            .cloned()
            .collect()
    }
}

struct ProductSeed {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: f64,
    original_price: Option<f64>,
    category: &'static str,
    stock: u32,
    rating: f64,
    review_count: u32,
    tags: &'static [&'static str],
    specifications: &'static [(&'static str, &'static str)],
    day: u32,
}

const PRODUCTS: &[ProductSeed] = &[
    ProductSeed {
        id: "1",
        name: "Premium Wireless Headphones",
        description: "Experience premium sound quality with these state-of-the-art wireless headphones featuring active noise cancellation and 30-hour battery life.",
        price: 299.99,
        original_price: Some(399.99),
        category: "Electronics",
        stock: 25,
        rating: 4.8,
        review_count: 124,
        tags: &["wireless", "noise-cancelling", "premium", "bluetooth"],
        specifications: &[
            ("Battery Life", "30 hours"),
            ("Connectivity", "Bluetooth 5.0"),
            ("Driver Size", "40mm"),
            ("Frequency Response", "20Hz - 20kHz"),
        ],
        day: 1,
    },
    ProductSeed {
        id: "2",
        name: "Smart Fitness Watch",
        description: "Advanced fitness tracking smartwatch with heart rate monitoring, GPS, and comprehensive health insights.",
        price: 199.99,
        original_price: None,
        category: "Electronics",
        stock: 15,
        rating: 4.6,
        review_count: 89,
        tags: &["fitness", "smartwatch", "health", "gps"],
        specifications: &[
            ("Battery Life", "7 days"),
            ("Water Resistance", "50m"),
            ("Display", "1.4\" AMOLED"),
            ("GPS", "Built-in"),
        ],
        day: 2,
    },
    ProductSeed {
        id: "3",
        name: "Professional Camera Lens",
        description: "Professional-grade 85mm portrait lens with exceptional optical quality and beautiful bokeh effects.",
        price: 1299.99,
        original_price: None,
        category: "Electronics",
        stock: 8,
        rating: 4.9,
        review_count: 45,
        tags: &["camera", "lens", "professional", "portrait"],
        specifications: &[
            ("Focal Length", "85mm"),
            ("Max Aperture", "f/1.4"),
            ("Mount", "Canon EF"),
            ("Weight", "950g"),
        ],
        day: 3,
    },
    ProductSeed {
        id: "4",
        name: "Ergonomic Office Chair",
        description: "Premium ergonomic office chair designed for all-day comfort with lumbar support and adjustable features.",
        price: 459.99,
        original_price: Some(599.99),
        category: "Furniture",
        stock: 12,
        rating: 4.7,
        review_count: 156,
        tags: &["office", "ergonomic", "furniture", "comfort"],
        specifications: &[
            ("Material", "Mesh & Fabric"),
            ("Weight Capacity", "150kg"),
            ("Adjustability", "Height, Armrests, Lumbar"),
            ("Warranty", "5 years"),
        ],
        day: 4,
    },
    ProductSeed {
        id: "5",
        name: "Minimalist Desk Lamp",
        description: "Modern LED desk lamp with touch controls, adjustable brightness, and sleek minimalist design.",
        price: 89.99,
        original_price: None,
        category: "Home & Garden",
        stock: 20,
        rating: 4.4,
        review_count: 67,
        tags: &["lamp", "led", "minimalist", "desk"],
        specifications: &[
            ("Light Source", "LED"),
            ("Color Temperature", "3000K-6500K"),
            ("Power", "12W"),
            ("Dimming", "Touch Control"),
        ],
        day: 5,
    },
    ProductSeed {
        id: "6",
        name: "Wireless Charging Pad",
        description: "Fast wireless charging pad compatible with all Qi-enabled devices. Sleek design with LED indicator.",
        price: 39.99,
        original_price: None,
        category: "Electronics",
        stock: 35,
        rating: 4.3,
        review_count: 203,
        tags: &["wireless", "charging", "qi", "fast-charge"],
        specifications: &[
            ("Output", "15W Fast Charging"),
            ("Compatibility", "Qi-enabled devices"),
            ("Indicator", "LED"),
            ("Dimensions", "100 x 100 x 8mm"),
        ],
        day: 6,
    },
];

/// The fixed storefront inventory.
pub fn mock_products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|seed| Product {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price: seed.price,
            original_price: seed.original_price,
            category: seed.category.to_string(),
            stock: seed.stock,
            rating: seed.rating,
            review_count: seed.review_count,
            tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            specifications: seed
                .specifications
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            is_on_sale: seed.original_price.is_some(),
            created_at: DateTime::from_timestamp(1_704_067_200 + i64::from(seed.day - 1) * 86_400, 0)
                .unwrap_or_default(),
        })
        .collect()
}

pub fn mock_categories() -> Vec<Category> {
    [
        ("1", "Electronics", "electronics", "Latest electronics and gadgets", 156),
        ("2", "Furniture", "furniture", "Modern furniture for home and office", 89),
        ("3", "Home & Garden", "home-garden", "Everything for your home and garden", 134),
        ("4", "Clothing", "clothing", "Fashion and apparel for all occasions", 245),
    ]
    .into_iter()
    .map(|(id, name, slug, description, product_count)| Category {
        id: id.to_string(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: description.to_string(),
        product_count,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn unfiltered_keeps_catalog_order() {
        let catalog = MockCatalog::instant();
        let products = catalog.products(ProductFilters::default()).await;
        assert_eq!(ids(&products), vec!["1", "2", "3", "4", "5", "6"]);
    }

    #[tokio::test]
    async fn category_filter_is_case_insensitive() {
        let catalog = MockCatalog::instant();
        let filters = ProductFilters {
            category: Some("electronics".to_string()),
            sort_by: SortBy::PriceAsc,
            ..ProductFilters::default()
        };
        let products = catalog.products(filters).await;
        assert_eq!(ids(&products), vec!["6", "2", "1", "3"]);
    }

    #[tokio::test]
    async fn price_rating_and_tag_filters_combine() {
        let catalog = MockCatalog::instant();
        let filters = ProductFilters {
            min_price: Some(50.0),
            max_price: Some(500.0),
            rating: Some(4.5),
            in_stock: true,
            tags: vec!["wireless".to_string(), "office".to_string()],
            ..ProductFilters::default()
        };
        assert_eq!(ids(&catalog.products(filters).await), vec!["1", "4"]);
    }

    #[test]
    fn sort_orders() {
        let products = mock_products();
        let sorted = |sort_by| {
            let filters = ProductFilters {
                sort_by,
                ..ProductFilters::default()
            };
            filters
                .apply(&products)
                .into_iter()
                .map(|p| p.id)
                .collect::<Vec<_>>()
        };
        assert_eq!(sorted(SortBy::PriceDesc), vec!["3", "4", "1", "2", "5", "6"]);
        assert_eq!(sorted(SortBy::Rating), vec!["3", "1", "4", "2", "5", "6"]);
        assert_eq!(sorted(SortBy::Newest), vec!["6", "5", "4", "3", "2", "1"]);
    }

    #[test]
    fn sort_names_parse() {
        assert_eq!(SortBy::from_str("price_asc").unwrap(), SortBy::PriceAsc);
        assert_eq!(SortBy::from_str("newest").unwrap(), SortBy::Newest);
        assert_eq!(SortBy::Relevance.to_string(), "relevance");
    }

    #[tokio::test]
    async fn search_matches_name_description_and_tags() {
        let catalog = MockCatalog::instant();
        assert_eq!(ids(&catalog.search("WIRELESS").await), vec!["1", "6"]);
        assert_eq!(ids(&catalog.search("bokeh").await), vec!["3"]);
        assert_eq!(ids(&catalog.search("fast-ch").await), vec!["6"]);
        assert!(catalog.search("submarine").await.is_empty());
    }

    #[tokio::test]
    async fn unknown_product_is_none() {
        let catalog = MockCatalog::instant();
        assert_eq!(catalog.product("4").await.unwrap().name, "Ergonomic Office Chair");
        assert!(catalog.product("999").await.is_none());
    }

    #[tokio::test]
    async fn categories_are_listed() {
        let catalog = MockCatalog::instant();
        let names: Vec<_> = catalog
            .categories()
            .await
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Electronics", "Furniture", "Home & Garden", "Clothing"]);
    }

    #[test]
    fn discounts() {
        let products = mock_products();
        assert_eq!(products[0].discount_percent(), Some(25));
        assert_eq!(products[1].discount_percent(), None);
        assert!(products[3].is_on_sale);
    }

    #[tokio::test]
    async fn catalog_trait_can_be_mocked() {
        let mut catalog = MockProductCatalog::new();
        catalog.expect_product().returning(|_| None);
        assert!(catalog.product("1").await.is_none());
    }
}
