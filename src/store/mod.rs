//! Storefront catalog and cart

pub mod cart;
pub mod catalog;

pub use cart::{CartError, CartItem, CartStore, MAX_CART_ITEMS};
pub use catalog::{
    Category, Latency, MockCatalog, Product, ProductCatalog, ProductFilters, SortBy,
    mock_products,
};
