// core/src/model/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::model::product::VariantRef;

/// Status values stored in `pedidos.estado`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pendiente,
  Pagado,
  Enviado,
  Entregado,
  Cancelado,
}

impl OrderStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      OrderStatus::Pendiente => "pendiente",
      OrderStatus::Pagado => "pagado",
      OrderStatus::Enviado => "enviado",
      OrderStatus::Entregado => "entregado",
      OrderStatus::Cancelado => "cancelado",
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for OrderStatus {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "pendiente" => Ok(OrderStatus::Pendiente),
      "pagado" => Ok(OrderStatus::Pagado),
      "enviado" => Ok(OrderStatus::Enviado),
      "entregado" => Ok(OrderStatus::Entregado),
      "cancelado" => Ok(OrderStatus::Cancelado),
      other => Err(other.to_string()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub created_at: DateTime<Utc>,
  pub status: OrderStatus,
  pub total_cents: i64,
  pub shipping_address: Option<String>,
  pub owner_id: Uuid,
}

/// Line item of an order, with the variant (and its product) it refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
  pub id: Uuid,
  pub quantity: i32,
  pub unit_price_cents: i64,
  pub variant: VariantRef,
}

impl OrderItem {
  pub fn line_total_cents(&self) -> i64 {
    self.unit_price_cents * i64::from(self.quantity)
  }
}

/// The joined read: order → items → variant → catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
  #[serde(flatten)]
  pub order: Order,
  pub items: Vec<OrderItem>,
}

/// Row shape for order listings (no items).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
  pub id: Uuid,
  pub created_at: DateTime<Utc>,
  pub status: OrderStatus,
  pub total_cents: i64,
  pub item_count: i64,
}

impl From<&OrderDetail> for OrderSummary {
  fn from(detail: &OrderDetail) -> Self {
    OrderSummary {
      id: detail.order.id,
      created_at: detail.order.created_at,
      status: detail.order.status,
      total_cents: detail.order.total_cents,
      item_count: detail.items.len() as i64,
    }
  }
}
