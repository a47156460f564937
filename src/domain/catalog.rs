use std::collections::BTreeSet;

use super::product::{Product, TimeOfDay};

/// Products shown per "load more" step.
pub const CATALOG_PAGE_SIZE: usize = 9;

/// The product list customers browse: the admin override when one is
/// persisted, the built-in seed list otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: seed_products(),
        }
    }
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn categories(&self) -> Vec<String> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    pub fn brands(&self) -> Vec<String> {
        distinct(self.products.iter().map(|p| p.brand.as_str()))
    }

    pub fn search(&self, filter: &ProductFilter) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }

    /// The first `filter.limit` matches and how many matched in total.
    pub fn page(&self, filter: &ProductFilter) -> SearchPage {
        let mut products = self.search(filter);
        let total = products.len();
        products.truncate(filter.limit);
        SearchPage { products, total }
    }

    /// In-stock products flagged as relevant for `time`.
    pub fn suggestions(&self, time: TimeOfDay) -> Vec<Product> {
        self.products
            .iter()
            .filter(|p| p.is_relevant_at(time) && !p.is_out_of_stock())
            .cloned()
            .collect()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// One "load more" step of search results.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchPage {
    pub products: Vec<Product>,
    pub total: usize,
}

impl SearchPage {
    pub fn has_more(&self) -> bool {
        self.products.len() < self.total
    }
}

/// Browse filters. `None` for category or brand means "All".
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFilter {
    pub search: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price_range: (u64, u64),
    pub dietary: Vec<String>,
    pub limit: usize,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            brand: None,
            price_range: (0, 500),
            dietary: Vec::new(),
            limit: CATALOG_PAGE_SIZE,
        }
    }
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        let term = self.search.trim().to_lowercase();
        if !term.is_empty()
            && ![&product.name, &product.description, &product.category]
                .iter()
                .any(|field| field.to_lowercase().contains(&term))
        {
            return false;
        }
        if self.category.as_ref().is_some_and(|c| c != &product.category) {
            return false;
        }
        if self.brand.as_ref().is_some_and(|b| b != &product.brand) {
            return false;
        }
        let (min, max) = self.price_range;
        if product.price < min || product.price > max {
            return false;
        }
        self.dietary.is_empty() || self.dietary.iter().any(|d| product.dietary.contains(d))
    }

    pub fn load_more(&mut self) {
        self.limit += CATALOG_PAGE_SIZE;
    }

    /// Adds the tag if absent, removes it otherwise.
    pub fn toggle_dietary(&mut self, tag: &str) {
        match self.dietary.iter().position(|d| d == tag) {
            Some(index) => {
                self.dietary.remove(index);
            }
            None => self.dietary.push(tag.to_string()),
        }
    }
}

fn seed(
    id: &str,
    name: &str,
    price: u64,
    category: &str,
    brand: &str,
    stock: u32,
    description: &str,
    dietary: &[&str],
    relevant_times: &[TimeOfDay],
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price,
        image: format!("https://images.quickcommerce.example/{}.jpg", id),
        category: category.to_string(),
        brand: brand.to_string(),
        stock,
        description: description.to_string(),
        dietary: dietary.iter().map(|d| d.to_string()).collect(),
        is_time_relevant: !relevant_times.is_empty(),
        relevant_times: relevant_times.to_vec(),
    }
}

/// Built-in catalog used until an admin saves an override.
pub fn seed_products() -> Vec<Product> {
    use TimeOfDay::*;
    vec![
        seed("1", "Fresh Milk 1L", 60, "Dairy", "Amul", 40, "Farm fresh toned milk", &["vegetarian"], &[Morning]),
        seed("2", "Whole Wheat Bread", 45, "Bakery", "Harvest Gold", 25, "Soft whole wheat sandwich bread", &["vegetarian", "vegan"], &[Morning]),
        seed("3", "Masala Chai Tea", 180, "Beverages", "Tata Tea", 30, "Assam tea blended with spices", &["vegan"], &[Morning, Evening]),
        seed("4", "Cold Coffee", 90, "Beverages", "Nescafe", 18, "Ready to drink iced coffee", &["vegetarian"], &[Afternoon]),
        seed("5", "Salted Potato Chips", 20, "Snacks", "Lay's", 60, "Classic salted crisps", &["vegan"], &[Evening, Night]),
        seed("6", "Instant Noodles", 14, "Snacks", "Maggi", 4, "Two-minute masala noodles", &["vegetarian"], &[Night]),
        seed("7", "Greek Yogurt", 75, "Dairy", "Epigamia", 12, "High protein plain yogurt", &["vegetarian", "gluten-free"], &[]),
        seed("8", "Basmati Rice 1kg", 160, "Staples", "India Gate", 20, "Aged long grain basmati", &["vegan", "gluten-free"], &[]),
        seed("9", "Dark Chocolate", 120, "Snacks", "Amul", 0, "55% cocoa dark chocolate bar", &["vegetarian"], &[Night]),
        seed("10", "Bananas (6 pcs)", 50, "Fruits", "Fresh", 35, "Ripe robusta bananas", &["vegan", "gluten-free"], &[Morning]),
        seed("11", "Paneer 200g", 95, "Dairy", "Mother Dairy", 10, "Fresh cottage cheese", &["vegetarian", "gluten-free"], &[Evening]),
        seed("12", "Orange Juice 1L", 130, "Beverages", "Real", 22, "No added sugar orange juice", &["vegan"], &[Morning, Afternoon]),
    ]
}
