//! # Line Items
//!
//! The single total used by sales and quotations: `Σ quantity × unit_price`.
//! No discounts, taxes or rounding are applied. Drafts only accept items
//! whose running total stays within [`crate::MAX_AMOUNT`].
//!
//! ```rust
//! use campo_core::{line_items_total, Money, SaleItem};
//!
//! let items = vec![
//!     SaleItem { product_name: "Glifosato".into(), quantity: 2, price: "25.5".parse().unwrap() },
//!     SaleItem { product_name: "Guantes".into(), quantity: 1, price: Money::from_major(45) },
//! ];
//! assert_eq!(line_items_total(&items), Money::from_major(96));
//! ```

use crate::money::Money;
use crate::types::{QuotationItem, SaleItem};

/// Anything that prices as `quantity × unit_price`.
pub trait LineItem {
    fn quantity(&self) -> u32;
    fn unit_price(&self) -> Money;

    fn subtotal(&self) -> Money {
        self.unit_price() * self.quantity()
    }
}

impl LineItem for SaleItem {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn unit_price(&self) -> Money {
        self.price
    }
}

impl LineItem for QuotationItem {
    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn unit_price(&self) -> Money {
        self.price
    }
}

/// Total of a list of line items. Empty lists total zero.
pub fn line_items_total<T: LineItem>(items: &[T]) -> Money {
    items.iter().map(LineItem::subtotal).sum()
}
