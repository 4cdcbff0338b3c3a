use serde::Deserialize;
use serde_json::Value;

use super::{reject_system_fields, require_fields, ModelError};
use crate::database::document::Document;

pub const REQUIRED_FIELDS: &[&str] = &[
    "name",
    "email",
    "image",
    "description",
    "price",
    "quantity",
    "minimum",
];

/// Checks a product submitted for listing
pub fn validate_new(product: &Document) -> Result<(), ModelError> {
    reject_system_fields(product)?;
    require_fields(product, REQUIRED_FIELDS)
}

/// Body of `PUT /product/:id`
#[derive(Debug, Default, Deserialize)]
pub struct StockUpdate {
    #[serde(rename = "updatedQuantity")]
    pub updated_quantity: Option<Value>,
    pub price: Option<Value>,
}

impl StockUpdate {
    /// Fields to `$set`; at least one of quantity or price is required
    pub fn into_set(self) -> Result<Document, ModelError> {
        let mut set = Document::new();
        if let Some(quantity) = self.updated_quantity.filter(|v| !v.is_null()) {
            set.insert("quantity".to_string(), quantity);
        }
        if let Some(price) = self.price.filter(|v| !v.is_null()) {
            set.insert("price".to_string(), price);
        }
        if set.is_empty() {
            return Err(ModelError::MissingRequiredFields(vec!["updatedQuantity", "price"]));
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product() -> Document {
        json!({
            "name": "Impact Driver",
            "email": "seller@tools.com",
            "image": "https://img/driver.png",
            "description": "18V brushless",
            "price": 129,
            "quantity": 40,
            "minimum": 5
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn complete_products_pass() {
        assert!(validate_new(&product()).is_ok());
    }

    #[test]
    fn missing_price_is_reported() {
        let mut incomplete = product();
        incomplete.remove("price");
        match validate_new(&incomplete) {
            Err(ModelError::MissingRequiredFields(fields)) => assert_eq!(fields, vec!["price"]),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn stock_update_maps_quantity_field() {
        let update: StockUpdate = serde_json::from_value(json!({ "updatedQuantity": 12 })).unwrap();
        let set = update.into_set().unwrap();
        assert_eq!(set.get("quantity"), Some(&json!(12)));
        assert!(!set.contains_key("price"));

        assert!(StockUpdate::default().into_set().is_err());
    }
}
