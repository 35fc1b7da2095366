use std::collections::HashSet;
use std::path::Path;

use agrismart_core::{DomainError, DomainResult};

use crate::product::Product;

/// Ordered, read-only product list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products in display order.
    ///
    /// Fails if the list is empty or two products share a name.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        if products.is_empty() {
            return Err(DomainError::validation("catalog must list at least one product"));
        }

        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.name()) {
                return Err(DomainError::validation(format!(
                    "duplicate product name '{}'",
                    product.name()
                )));
            }
        }

        Ok(Self { products })
    }

    /// The marketplace's built-in produce list.
    pub fn agrismart() -> Self {
        const PRODUCE: [(&str, u64); 5] = [
            ("Maize (90kg bag)", 3000),
            ("Beans (90kg bag)", 6000),
            ("Potatoes (50kg bag)", 2500),
            ("Tomatoes (crate)", 1500),
            ("Avocados (crate)", 2000),
        ];

        let products = PRODUCE
            .iter()
            .map(|&(name, price)| Product::built_in(name, price))
            .collect();
        Self { products }
    }

    /// Parse a JSON array of `{ "name": ..., "unit_price": ... }` objects.
    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("invalid catalog JSON: {e}")))?;
        Self::new(products)
    }

    /// Read and parse a JSON catalog file.
    pub fn from_json_file(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomainError::not_found(format!("catalog file {}: {e}", path.display()))
        })?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    /// All products, in display order.
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    /// Exact-name lookup.
    pub fn find(&self, name: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.name() == name)
    }

    /// 1-based position lookup, matching how the storefront numbers products.
    pub fn get(&self, position: usize) -> Option<&Product> {
        position.checked_sub(1).and_then(|i| self.products.get(i))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::agrismart()
    }
}
