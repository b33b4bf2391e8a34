// core/src/model/product.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry (`productos`) with its purchasable variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
  pub id: Uuid,
  pub name: String,
  pub description: Option<String>,
  pub images: Vec<String>,
  pub variants: Vec<ProductVariant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
  pub id: Uuid,
  pub name: String,
  pub price_cents: Option<i64>,
}

/// Product data nested under an order item's variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
  pub id: Uuid,
  pub name: String,
  pub images: Vec<String>,
}

/// Variant data nested under an order item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRef {
  pub id: Uuid,
  pub name: String,
  pub product: ProductRef,
}
