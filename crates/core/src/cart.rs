//! Shopping cart store.
//!
//! A cart is an ordered, id-keyed list of lines. The storefront keeps it on
//! the device and submits it with an order; the server rebuilds it with
//! [`Cart::from_lines`] so duplicate ids are merged and totals are computed
//! from the same code.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Cents, DbId};

/// Upper bound on the quantity of a single line.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// A product as it is added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: DbId,
    pub title: String,
    pub price_cents: Cents,
    pub image: Option<String>,
}

/// One cart line: a product plus its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: DbId,
    pub title: String,
    pub price_cents: Cents,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity; fails instead of overflowing.
    pub fn line_total_cents(&self) -> Result<Cents, CoreError> {
        self.price_cents
            .checked_mul(Cents::from(self.quantity))
            .ok_or_else(|| total_overflow(&self.title))
    }
}

fn total_overflow(title: &str) -> CoreError {
    CoreError::Validation(format!("Order total for '{title}' is out of range"))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw lines, merging repeated ids into one line.
    ///
    /// Lines with a zero quantity are dropped; merged quantities are capped
    /// at [`MAX_LINE_QUANTITY`].
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Cart::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.position(line.id) {
                Some(idx) => {
                    let existing = &mut cart.lines[idx];
                    existing.quantity = existing
                        .quantity
                        .saturating_add(line.quantity)
                        .min(MAX_LINE_QUANTITY);
                }
                None => cart.lines.push(CartLine {
                    quantity: line.quantity.min(MAX_LINE_QUANTITY),
                    ..line
                }),
            }
        }
        cart
    }

    /// Add one unit of `item`. An id already in the cart has its quantity
    /// incremented instead of getting a second line.
    pub fn add(&mut self, item: CartItem) {
        match self.position(item.id) {
            Some(idx) => self.bump(idx),
            None => self.lines.push(CartLine {
                id: item.id,
                title: item.title,
                price_cents: item.price_cents,
                image: item.image,
                quantity: 1,
            }),
        }
    }

    /// Increment the quantity of an existing line.
    pub fn increment(&mut self, id: DbId) -> Result<(), CoreError> {
        let idx = self.require(id)?;
        self.bump(idx);
        Ok(())
    }

    /// Decrement the quantity of a line, removing it when it reaches zero.
    pub fn decrement(&mut self, id: DbId) -> Result<(), CoreError> {
        let idx = self.require(id)?;
        if self.lines[idx].quantity <= 1 {
            self.lines.remove(idx);
        } else {
            self.lines[idx].quantity -= 1;
        }
        Ok(())
    }

    /// Set an absolute quantity; zero removes the line.
    pub fn set_quantity(&mut self, id: DbId, quantity: u32) -> Result<(), CoreError> {
        let idx = self.require(id)?;
        if quantity == 0 {
            self.lines.remove(idx);
        } else {
            self.lines[idx].quantity = quantity.min(MAX_LINE_QUANTITY);
        }
        Ok(())
    }

    /// Remove a line. Returns `true` if it was present.
    pub fn remove(&mut self, id: DbId) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.lines.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of all line totals; fails instead of overflowing.
    pub fn subtotal_cents(&self) -> Result<Cents, CoreError> {
        self.lines.iter().try_fold(0, |acc: Cents, line| {
            acc.checked_add(line.line_total_cents()?)
                .ok_or_else(|| total_overflow(&line.title))
        })
    }

    fn position(&self, id: DbId) -> Option<usize> {
        self.lines.iter().position(|l| l.id == id)
    }

    fn require(&self, id: DbId) -> Result<usize, CoreError> {
        self.position(id).ok_or(CoreError::NotFound {
            entity: "CartLine",
            id,
        })
    }

    fn bump(&mut self, idx: usize) {
        let line = &mut self.lines[idx];
        line.quantity = (line.quantity + 1).min(MAX_LINE_QUANTITY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_not_found(result: Result<(), CoreError>) {
        assert!(
            matches!(result, Err(CoreError::NotFound { entity: "CartLine", .. })),
            "expected CartLine not found, got {result:?}"
        );
    }

    fn helmet() -> CartItem {
        CartItem {
            id: 1,
            title: "Helmet".into(),
            price_cents: 19_990,
            image: Some("/img/helmet.webp".into()),
        }
    }

    fn gloves() -> CartItem {
        CartItem {
            id: 2,
            title: "Gloves".into(),
            price_cents: 4_950,
            image: None,
        }
    }

    #[test]
    fn adding_same_product_twice_increments_quantity() {
        let mut cart = Cart::new();
        cart.add(helmet());
        cart.add(helmet());

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.subtotal_cents().unwrap(), 39_980);
    }

    #[test]
    fn subtotal_sums_all_lines() {
        let mut cart = Cart::new();
        cart.add(helmet());
        cart.add(gloves());
        cart.increment(2).unwrap();

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal_cents().unwrap(), 19_990 + 2 * 4_950);
    }

    #[test]
    fn decrement_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(gloves());
        cart.decrement(2).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal_cents().unwrap(), 0);
    }

    #[test]
    fn operations_on_missing_line_fail() {
        let mut cart = Cart::new();
        assert_not_found(cart.increment(42));
        assert_not_found(cart.decrement(42));
        assert_not_found(cart.set_quantity(42, 3));
        assert!(!cart.remove(42));
    }

    #[test]
    fn set_quantity_caps_and_zero_removes() {
        let mut cart = Cart::new();
        cart.add(helmet());
        cart.set_quantity(1, 500).unwrap();
        assert_eq!(cart.lines()[0].quantity, MAX_LINE_QUANTITY);

        cart.set_quantity(1, 0).unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn increment_stops_at_cap() {
        let mut cart = Cart::new();
        cart.add(helmet());
        cart.set_quantity(1, MAX_LINE_QUANTITY).unwrap();
        cart.increment(1).unwrap();
        assert_eq!(cart.lines()[0].quantity, MAX_LINE_QUANTITY);
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(helmet());
        cart.add(gloves());
        assert!(cart.remove(1));
        assert_eq!(cart.lines().len(), 1);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn from_lines_merges_duplicates_and_drops_zero() {
        let line = |id, quantity| CartLine {
            id,
            title: format!("item {id}"),
            price_cents: 1_000,
            image: None,
            quantity,
        };
        let cart = Cart::from_lines(vec![line(1, 2), line(2, 0), line(1, 3)]);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.subtotal_cents().unwrap(), 5_000);
    }

    #[test]
    fn totals_fail_instead_of_overflowing() {
        let line = |id, price_cents, quantity| CartLine {
            id,
            title: format!("item {id}"),
            price_cents,
            image: None,
            quantity,
        };

        let huge = line(1, Cents::MAX / 2 + 1, 2);
        assert!(matches!(huge.line_total_cents(), Err(CoreError::Validation(_))));

        let at_edge = line(1, Cents::MAX / 2, 2);
        assert_eq!(at_edge.line_total_cents().unwrap(), Cents::MAX - 1);

        let cart = Cart::from_lines(vec![line(1, Cents::MAX / 2, 1), line(2, Cents::MAX / 2, 1)]);
        assert_eq!(cart.subtotal_cents().unwrap(), Cents::MAX - 1);

        let cart = Cart::from_lines(vec![line(1, Cents::MAX / 2, 2), line(2, 2, 1)]);
        assert!(matches!(cart.subtotal_cents(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn cart_round_trips_through_json() {
        let mut cart = Cart::new();
        cart.add(helmet());
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
