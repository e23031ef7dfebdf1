//! Shopping cart state

use super::catalog::Product;
use std::collections::HashMap;
use thiserror::Error;

/// Upper bound on the summed quantity of all lines.
pub const MAX_CART_ITEMS: u32 = 99;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("Cart can hold at most {max} items, requested {requested}")]
    TooManyItems { requested: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub product_id: String,
    pub quantity: u32,
}

/// Cart lines plus derived totals, recomputed after every mutation.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    prices: HashMap<String, f64>,
    items: Vec<CartItem>,
    total_cents: u64,
    item_count: u32,
}

impl CartStore {
    /// An empty cart pricing lines against `products`.
    pub fn new(products: &[Product]) -> Self {
        Self {
            prices: products.iter().map(|p| (p.id.clone(), p.price)).collect(),
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of price × quantity over known products, rounded to cents.
    pub fn total(&self) -> f64 {
        self.total_cents as f64 / 100.0
    }

    pub fn total_cents(&self) -> u64 {
        self.total_cents
    }

    pub fn item_count(&self) -> u32 {
        self.item_count
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the product has a price in this cart.
    pub fn knows(&self, product_id: &str) -> bool {
        self.prices.contains_key(product_id)
    }

    pub fn item_quantity(&self, product_id: &str) -> u32 {
        self.position(product_id)
            .map(|i| self.items[i].quantity)
            .unwrap_or(0)
    }

    /// Add `quantity` of a product, merging into an existing line.
    pub fn add_item(&mut self, product_id: &str, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Ok(());
        }
        self.check_capacity(self.item_count.saturating_add(quantity))?;
        match self.position(product_id) {
            Some(i) => self.items[i].quantity += quantity,
            None => self.items.push(CartItem {
                product_id: product_id.to_string(),
                quantity,
            }),
        }
        self.recompute();
        Ok(())
    }

    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|item| item.product_id != product_id);
        self.recompute();
    }

    /// Set a line's quantity; zero or less removes it. Unknown lines are ignored.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> Result<(), CartError> {
        let Some(i) = self.position(product_id) else {
            return Ok(());
        };
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let others = self.item_count - self.items[i].quantity;
        self.check_capacity(others.saturating_add(quantity))?;
        self.items[i].quantity = quantity;
        self.recompute();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.product_id == product_id)
    }

    fn check_capacity(&self, requested: u32) -> Result<(), CartError> {
        if requested > MAX_CART_ITEMS {
            return Err(CartError::TooManyItems {
                requested,
                max: MAX_CART_ITEMS,
            });
        }
        Ok(())
    }

    fn recompute(&mut self) {
        let total: f64 = self
            .items
            .iter()
            .filter_map(|item| {
                self.prices
                    .get(&item.product_id)
                    .map(|price| price * f64::from(item.quantity))
            })
            .sum();
        self.total_cents = (total * 100.0).round() as u64;
        self.item_count = self.items.iter().map(|item| item.quantity).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::catalog::mock_products;

    fn cart() -> CartStore {
        CartStore::new(&mock_products())
    }

    #[test]
    fn adding_merges_lines() {
        let mut cart = cart();
        cart.add_item("1", 1).unwrap();
        cart.add_item("2", 2).unwrap();
        cart.add_item("1", 2).unwrap();
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.item_quantity("1"), 3);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn totals_round_to_cents() {
        let mut cart = cart();
        cart.add_item("6", 3).unwrap();
        cart.add_item("5", 1).unwrap();
        // 3 × 39.99 + 89.99
        assert_eq!(cart.total_cents(), 20996);
        assert_eq!(cart.total(), 209.96);
    }

    #[test]
    fn unknown_products_count_but_cost_nothing() {
        let mut cart = cart();
        cart.add_item("999", 2).unwrap();
        cart.add_item("2", 1).unwrap();
        assert!(!cart.knows("999"));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), 199.99);
    }

    #[test]
    fn update_to_zero_removes() {
        let mut cart = cart();
        cart.add_item("3", 2).unwrap();
        cart.update_quantity("3", 0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.total_cents(), 0);

        cart.add_item("4", 1).unwrap();
        cart.update_quantity("4", -3).unwrap();
        assert_eq!(cart.item_quantity("4"), 0);
    }

    #[test]
    fn update_sets_quantity() {
        let mut cart = cart();
        cart.add_item("1", 1).unwrap();
        cart.update_quantity("1", 4).unwrap();
        assert_eq!(cart.item_quantity("1"), 4);
        assert_eq!(cart.total(), 1199.96);
    }

    #[test]
    fn quantity_is_capped() {
        let mut cart = cart();
        cart.add_item("6", 90).unwrap();
        assert_eq!(
            cart.add_item("5", 10),
            Err(CartError::TooManyItems {
                requested: 100,
                max: MAX_CART_ITEMS
            })
        );
        assert_eq!(cart.item_count(), 90);
        assert!(cart.update_quantity("6", 100).is_err());
        cart.update_quantity("6", 99).unwrap();
        assert_eq!(cart.item_count(), 99);
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = cart();
        cart.add_item("1", 1).unwrap();
        cart.add_item("2", 1).unwrap();
        cart.remove_item("1");
        assert_eq!(cart.items().len(), 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }
}
