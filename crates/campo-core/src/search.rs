//! # Search
//!
//! Case-insensitive substring filters for the list pages.
//!
//! | Record          | Matched fields                                     |
//! |-----------------|----------------------------------------------------|
//! | CashAuditRecord | employee name, id                                  |
//! | Sale            | customer name, id                                  |
//! | Quotation       | customer name, number                              |
//! | Product         | name, category, barcode (barcode case-sensitive)   |
//! | Customer        | name, email, phone                                 |
//!
//! An empty query matches everything.

use crate::types::{CashAuditRecord, Customer, Product, Quotation, Sale};

/// A prepared query: trimmed text plus its lowercase form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    raw: String,
    folded: String,
}

impl SearchQuery {
    pub fn new(query: &str) -> Self {
        let raw = query.trim().to_string();
        let folded = raw.to_lowercase();
        SearchQuery { raw, folded }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Case-insensitive containment.
    pub fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.folded)
    }

    /// Exact-case containment.
    pub fn found_in_exact(&self, haystack: &str) -> bool {
        haystack.contains(&self.raw)
    }
}

/// A record that can be matched by a [`SearchQuery`].
pub trait Searchable {
    fn matches(&self, query: &SearchQuery) -> bool;
}

/// Items matching `query`, in their original order.
///
/// ## Example
/// ```rust
/// use campo_core::search::filter;
/// use campo_core::Customer;
///
/// let customers = vec![Customer {
///     id: "1".into(),
///     name: "Don Julio".into(),
///     email: "julio@finca.co".into(),
///     phone: "3001234567".into(),
///     address: String::new(),
///     total_purchases: 0,
///     last_purchase: None,
/// }];
/// assert_eq!(filter(&customers, "JULIO").len(), 1);
/// assert!(filter(&customers, "maria").is_empty());
/// ```
pub fn filter<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let query = SearchQuery::new(query);
    if query.is_empty() {
        return items.iter().collect();
    }
    items.iter().filter(|item| item.matches(&query)).collect()
}

impl Searchable for CashAuditRecord {
    fn matches(&self, query: &SearchQuery) -> bool {
        query.found_in(&self.employee_name) || query.found_in(&self.id)
    }
}

impl Searchable for Sale {
    fn matches(&self, query: &SearchQuery) -> bool {
        query.found_in(&self.customer_name) || query.found_in(&self.id)
    }
}

impl Searchable for Quotation {
    fn matches(&self, query: &SearchQuery) -> bool {
        query.found_in(&self.customer_name) || query.found_in(&self.number)
    }
}

impl Searchable for Product {
    fn matches(&self, query: &SearchQuery) -> bool {
        query.found_in(&self.name)
            || query.found_in(&self.category)
            || query.found_in_exact(&self.barcode)
    }
}

impl Searchable for Customer {
    fn matches(&self, query: &SearchQuery) -> bool {
        query.found_in(&self.name) || query.found_in(&self.email) || query.found_in(&self.phone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(name: &str, category: &str, barcode: &str) -> Product {
        Product {
            id: "1".into(),
            name: name.into(),
            category: category.into(),
            price: Money::from_major(1_000),
            stock: 1,
            unit: "unidad".into(),
            barcode: barcode.into(),
        }
    }

    #[test]
    fn test_empty_query_matches_all() {
        let products = vec![product("Urea", "Fertilizantes", "1"), product("Pala", "Herramientas", "2")];
        assert_eq!(filter(&products, "   ").len(), 2);
    }

    #[test]
    fn test_product_matching() {
        let products = vec![
            product("Urea 46%", "Fertilizantes", "7701234567890"),
            product("Pala", "Herramientas", "ABC123"),
        ];

        assert_eq!(filter(&products, "urea").len(), 1);
        assert_eq!(filter(&products, "HERRAMIENTAS")[0].name, "Pala");
        assert_eq!(filter(&products, "770123").len(), 1);
        // barcode comparison keeps case
        assert_eq!(filter(&products, "ABC").len(), 1);
        assert!(filter(&products, "abc").is_empty());
    }

    #[test]
    fn test_filter_keeps_order() {
        let products = vec![
            product("Abono A", "x", "1"),
            product("Pala", "x", "2"),
            product("Abono B", "x", "3"),
        ];
        let names: Vec<&str> = filter(&products, "abono").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Abono A", "Abono B"]);
    }
}
