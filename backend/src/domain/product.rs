//! Catalogue products.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Validation failures for product payloads.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductValidationError {
    /// The name is empty once trimmed.
    #[error("nome must not be blank")]
    BlankName,
    /// The price is negative, infinite or NaN.
    #[error("preco must be a finite, non-negative number")]
    InvalidPrice,
}

impl ProductValidationError {
    /// Wire name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankName => "nome",
            Self::InvalidPrice => "preco",
        }
    }
}

/// Everything about a product except its id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDetails {
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Free-text description.
    #[serde(rename = "descricao")]
    pub description: String,
    /// Unit price.
    #[serde(rename = "preco")]
    pub price: f64,
    /// Category label used for grouping.
    #[serde(rename = "categoria")]
    pub category: String,
    /// Search tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ProductDetails {
    /// Validate raw product fields.
    ///
    /// # Errors
    ///
    /// Returns [`ProductValidationError`] when the name is blank or the price
    /// is not a finite non-negative number.
    pub fn try_new(
        name: String,
        description: String,
        price: f64,
        category: String,
        tags: Vec<String>,
    ) -> Result<Self, ProductValidationError> {
        if name.trim().is_empty() {
            return Err(ProductValidationError::BlankName);
        }
        if !price.is_finite() || price < 0.0 {
            return Err(ProductValidationError::InvalidPrice);
        }
        Ok(Self {
            name,
            description,
            price,
            category,
            tags,
        })
    }
}

/// A stored product.
///
/// ```
/// use storefront::domain::Product;
///
/// let json = r#"{"id":1,"nome":"Samsung Galaxy S23","descricao":"","preco":4999.0,"categoria":"Smartphones","tags":[]}"#;
/// let product: Product = serde_json::from_str(json).expect("deserialise");
/// assert_eq!(product.details.category, "Smartphones");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: u64,
    /// Remaining product fields.
    #[serde(flatten)]
    pub details: ProductDetails,
}
