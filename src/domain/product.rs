use std::fmt;

use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

/// Stock level at or below which a product is flagged as running low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Represents a product in the catalog.
///
/// Prices are whole currency units. The JSON layout matches what the web
/// client keeps in local storage, so records written by either side load in
/// the other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u64,
    pub image: String,
    pub category: String,
    pub brand: String,
    pub stock: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub is_time_relevant: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relevant_times: Vec<TimeOfDay>,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: u64,
        stock: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: String::new(),
            category: String::new(),
            brand: String::new(),
            stock,
            description: String::new(),
            dietary: Vec::new(),
            is_time_relevant: false,
            relevant_times: Vec::new(),
        }
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock > 0 && self.stock <= LOW_STOCK_THRESHOLD
    }

    pub fn is_relevant_at(&self, time: TimeOfDay) -> bool {
        self.is_time_relevant && self.relevant_times.contains(&time)
    }
}

/// Payload for adding a product through the admin editor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub price: u64,
    pub image: String,
    pub category: String,
    pub brand: String,
    pub stock: u32,
    pub description: String,
    pub dietary: Vec<String>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: 0,
            image: String::new(),
            category: "Beverages".to_string(),
            brand: String::new(),
            stock: 0,
            description: String::new(),
            dietary: Vec::new(),
        }
    }
}

impl ProductDraft {
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            price: self.price,
            image: self.image,
            category: self.category,
            brand: self.brand,
            stock: self.stock,
            description: self.description,
            dietary: self.dietary,
            is_time_relevant: false,
            relevant_times: Vec::new(),
        }
    }
}

/// Coarse bucket of the local clock used for time-relevant suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            17..=21 => TimeOfDay::Evening,
            _ => TimeOfDay::Night,
        }
    }

    pub fn now() -> Self {
        Self::from_hour(Local::now().hour())
    }

    pub fn greeting(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "🌅 Good Morning! Start your day right",
            TimeOfDay::Afternoon => "☀️ Good Afternoon! Get what you need",
            TimeOfDay::Evening => "🌆 Good Evening! Quick delivery awaits",
            TimeOfDay::Night => "🌙 Late Night? We deliver in 10 minutes",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
            TimeOfDay::Night => "night",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hour_buckets() {
        assert_eq!(TimeOfDay::from_hour(5), TimeOfDay::Night);
        assert_eq!(TimeOfDay::from_hour(6), TimeOfDay::Morning);
        assert_eq!(TimeOfDay::from_hour(12), TimeOfDay::Afternoon);
        assert_eq!(TimeOfDay::from_hour(17), TimeOfDay::Evening);
        assert_eq!(TimeOfDay::from_hour(22), TimeOfDay::Night);
    }

    #[test]
    fn stock_flags() {
        let mut product = Product::new("p", "Milk", 30, 0);
        assert!(product.is_out_of_stock());
        assert!(!product.is_low_stock());

        product.stock = 5;
        assert!(product.is_low_stock());

        product.stock = 6;
        assert!(!product.is_low_stock());
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let json = r#"{"id":"1","name":"Tea","price":120,"image":"tea.jpg","category":"Beverages",
                       "brand":"Tata","stock":10,"description":"Assam tea"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.dietary.is_empty());
        assert!(!product.is_time_relevant);
        assert!(!product.is_relevant_at(TimeOfDay::Morning));
    }
}
