//! Storefront commands
//!
//! Headless access to the product catalog and cart totals.

use super::messages::SessionMessage;
use crate::events::{Event, EventType, Source};
use crate::logging::LogLevel;
use crate::pretty::print_cmd_error;
use crate::store::{CartStore, Product, ProductCatalog, ProductFilters};
use std::error::Error;

fn print_product_line(product: &Product) {
    let sale = match product.discount_percent() {
        Some(percent) => format!(" (-{}%)", percent),
        None => String::new(),
    };
    println!(
        "{:>3}  {:<30} ${:>8.2}{:<7}  {:<14} ★ {:.1}  stock {}",
        product.id, product.name, product.price, sale, product.category, product.rating, product.stock
    );
}

fn log_catalog(msg: String) {
    let event = Event::new(Source::Catalog, msg, EventType::Refresh, LogLevel::Debug);
    if event.should_display() {
        println!("{}", event);
    }
}

pub async fn run_products(
    catalog: &dyn ProductCatalog,
    filters: ProductFilters,
) -> Result<(), Box<dyn Error>> {
    let products = catalog.products(filters).await;
    log_catalog(format!("Fetched {} products", products.len()));
    if products.is_empty() {
        SessionMessage::info("No products match these filters").print();
    }
    for product in &products {
        print_product_line(product);
    }
    Ok(())
}

pub async fn run_product(catalog: &dyn ProductCatalog, id: &str) -> Result<(), Box<dyn Error>> {
    let Some(product) = catalog.product(id).await else {
        println!("Product {} not found", id);
        return Ok(());
    };
    println!("{}", product.name);
    println!("{}", product.description);
    match product.original_price {
        Some(original) if product.is_on_sale => {
            println!("Price: ${:.2} (was ${:.2})", product.price, original)
        }
        _ => println!("Price: ${:.2}", product.price),
    }
    println!("Category: {}", product.category);
    println!(
        "Rating: {:.1} ({} reviews)",
        product.rating, product.review_count
    );
    if product.in_stock() {
        println!("In stock: {}", product.stock);
    } else {
        println!("Out of stock");
    }
    println!("Tags: {}", product.tags.join(", "));
    for (name, value) in &product.specifications {
        println!("  {}: {}", name, value);
    }
    Ok(())
}

pub async fn run_categories(catalog: &dyn ProductCatalog) -> Result<(), Box<dyn Error>> {
    for category in catalog.categories().await {
        println!(
            "{:<14} {:<14} {:>4} products  {}",
            category.slug, category.name, category.product_count, category.description
        );
    }
    Ok(())
}

pub async fn run_search(catalog: &dyn ProductCatalog, query: &str) -> Result<(), Box<dyn Error>> {
    let products = catalog.search(query).await;
    log_catalog(format!("Search \"{}\" matched {}", query, products.len()));
    if products.is_empty() {
        println!("No products match \"{}\"", query);
    }
    for product in &products {
        print_product_line(product);
    }
    Ok(())
}

/// Parse a cart line of the form `ID:QTY`.
pub fn parse_cart_item(s: &str) -> Result<(String, u32), String> {
    let (id, qty) = s
        .split_once(':')
        .ok_or_else(|| format!("expected ID:QTY, got {}", s))?;
    if id.is_empty() {
        return Err(format!("missing product id in {}", s));
    }
    let qty = qty
        .parse::<u32>()
        .map_err(|e| format!("invalid quantity in {}: {}", s, e))?;
    Ok((id.to_string(), qty))
}

pub async fn run_quote(
    catalog: &dyn ProductCatalog,
    items: &[(String, u32)],
) -> Result<(), Box<dyn Error>> {
    let products = catalog.products(ProductFilters::default()).await;
    let mut cart = CartStore::new(&products);
    for (id, qty) in items {
        if let Err(e) = cart.add_item(id, *qty) {
            print_cmd_error!("Cart rejected item", "{}", e);
            return Err(e.into());
        }
    }

    for item in cart.items() {
        match products.iter().find(|p| p.id == item.product_id) {
            Some(product) => println!(
                "{:>3} x {:<30} ${:>9.2}",
                item.quantity,
                product.name,
                product.price * f64::from(item.quantity)
            ),
            None => println!(
                "{:>3} x {:<30} (not found)",
                item.quantity, item.product_id
            ),
        }
    }
    println!("Items: {}", cart.item_count());
    println!("Total: ${:.2}", cart.total());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cart_items_parse() {
        assert_eq!(parse_cart_item("4:2"), Ok(("4".to_string(), 2)));
        assert!(parse_cart_item("4").is_err());
        assert!(parse_cart_item(":2").is_err());
        assert!(parse_cart_item("4:-1").is_err());
    }
}
