// storefront/src/db/rows.rs

//! Flat rows returned by the joined queries, and their assembly into the
//! nested vetclinic records.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;
use vetclinic::{
  BackendError, BackendResult, CatalogProduct, Order, OrderDetail, OrderItem, OrderStatus, OrderSummary, ProductRef,
  ProductVariant, Session, SessionToken, VariantRef,
};

#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
  pub token: String,
  pub user_id: Uuid,
  pub email: Option<String>,
  pub expires_at: DateTime<Utc>,
}

impl From<SessionRow> for Session {
  fn from(row: SessionRow) -> Self {
    Session {
      token: SessionToken::new(row.token),
      user_id: row.user_id,
      email: row.email,
      expires_at: row.expires_at,
    }
  }
}

#[derive(Debug, Clone, FromRow)]
pub struct CredentialRow {
  pub id: Uuid,
  pub email: String,
  pub password_hash: Option<String>,
}

/// One row per order item; item, variant and product columns are NULL for an
/// order without items (LEFT JOIN).
#[derive(Debug, Clone, FromRow)]
pub struct OrderDetailRow {
  pub order_id: Uuid,
  pub created_at: DateTime<Utc>,
  pub status: String,
  pub total_cents: i64,
  pub shipping_address: Option<String>,
  pub owner_id: Uuid,
  pub item_id: Option<Uuid>,
  pub quantity: Option<i32>,
  pub unit_price_cents: Option<i64>,
  pub variant_id: Option<Uuid>,
  pub variant_name: Option<String>,
  pub product_id: Option<Uuid>,
  pub product_name: Option<String>,
  pub product_images: Option<Vec<String>>,
}

#[derive(Debug, Clone, FromRow)]
pub struct OrderSummaryRow {
  pub id: Uuid,
  pub created_at: DateTime<Utc>,
  pub status: String,
  pub total_cents: i64,
  pub item_count: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct CatalogRow {
  pub product_id: Uuid,
  pub product_name: String,
  pub description: Option<String>,
  pub images: Option<Vec<String>>,
  pub variant_id: Option<Uuid>,
  pub variant_name: Option<String>,
  pub variant_price_cents: Option<i64>,
}

fn parse_status(raw: &str) -> BackendResult<OrderStatus> {
  OrderStatus::from_str(raw).map_err(|value| BackendError::Decode { column: "pedidos.estado", value })
}

fn missing(column: &'static str) -> BackendError {
  BackendError::Decode {
    column,
    value: "NULL".to_string(),
  }
}

/// Folds the joined rows of one order. No rows means no visible order.
pub fn assemble_order(rows: Vec<OrderDetailRow>) -> BackendResult<Option<OrderDetail>> {
  let Some(first) = rows.first() else {
    return Ok(None);
  };
  let order = Order {
    id: first.order_id,
    created_at: first.created_at,
    status: parse_status(&first.status)?,
    total_cents: first.total_cents,
    shipping_address: first.shipping_address.clone(),
    owner_id: first.owner_id,
  };

  let mut items = Vec::with_capacity(rows.len());
  for row in rows {
    let Some(item_id) = row.item_id else {
      continue;
    };
    items.push(OrderItem {
      id: item_id,
      quantity: row.quantity.ok_or_else(|| missing("items_pedido.cantidad"))?,
      unit_price_cents: row.unit_price_cents.ok_or_else(|| missing("items_pedido.precio_unitario"))?,
      variant: VariantRef {
        id: row.variant_id.ok_or_else(|| missing("producto_variantes.id"))?,
        name: row.variant_name.ok_or_else(|| missing("producto_variantes.nombre"))?,
        product: ProductRef {
          id: row.product_id.ok_or_else(|| missing("productos.id"))?,
          name: row.product_name.ok_or_else(|| missing("productos.nombre"))?,
          images: row.product_images.unwrap_or_default(),
        },
      },
    });
  }
  Ok(Some(OrderDetail { order, items }))
}

pub fn summary_from_row(row: OrderSummaryRow) -> BackendResult<OrderSummary> {
  Ok(OrderSummary {
    id: row.id,
    created_at: row.created_at,
    status: parse_status(&row.status)?,
    total_cents: row.total_cents,
    item_count: row.item_count,
  })
}

/// Groups product/variant rows (ordered by product) into catalog entries.
pub fn assemble_catalog(rows: Vec<CatalogRow>) -> Vec<CatalogProduct> {
  let mut products: Vec<CatalogProduct> = Vec::new();
  for row in rows {
    let variant = match (row.variant_id, row.variant_name) {
      (Some(id), Some(name)) => Some(ProductVariant {
        id,
        name,
        price_cents: row.variant_price_cents,
      }),
      _ => None,
    };
    match products.last_mut() {
      Some(product) if product.id == row.product_id => product.variants.extend(variant),
      _ => products.push(CatalogProduct {
        id: row.product_id,
        name: row.product_name,
        description: row.description,
        images: row.images.unwrap_or_default(),
        variants: variant.into_iter().collect(),
      }),
    }
  }
  products
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn detail_row(order_id: Uuid, item: Option<(Uuid, &str)>) -> OrderDetailRow {
    OrderDetailRow {
      order_id,
      created_at: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
      status: "Pagado".to_string(),
      total_cents: 1_000_000,
      shipping_address: None,
      owner_id: Uuid::nil(),
      item_id: item.map(|(id, _)| id),
      quantity: item.map(|_| 1),
      unit_price_cents: item.map(|_| 500_000),
      variant_id: item.map(|_| Uuid::new_v4()),
      variant_name: item.map(|(_, name)| name.to_string()),
      product_id: item.map(|_| Uuid::new_v4()),
      product_name: item.map(|_| "Alimento".to_string()),
      product_images: item.map(|_| vec!["https://cdn.example.com/a.png".to_string()]),
    }
  }

  #[test]
  fn no_rows_means_no_order() {
    assert_eq!(assemble_order(Vec::new()).unwrap(), None);
  }

  #[test]
  fn order_without_items_has_empty_item_list() {
    let id = Uuid::new_v4();
    let detail = assemble_order(vec![detail_row(id, None)]).unwrap().unwrap();
    assert_eq!(detail.order.id, id);
    assert_eq!(detail.order.status, OrderStatus::Pagado);
    assert!(detail.items.is_empty());
  }

  #[test]
  fn rows_fold_into_one_order_with_items() {
    let id = Uuid::new_v4();
    let rows = vec![
      detail_row(id, Some((Uuid::new_v4(), "Saco 3kg"))),
      detail_row(id, Some((Uuid::new_v4(), "Saco 15kg"))),
    ];
    let detail = assemble_order(rows).unwrap().unwrap();
    let names: Vec<&str> = detail.items.iter().map(|i| i.variant.name.as_str()).collect();
    assert_eq!(names, vec!["Saco 3kg", "Saco 15kg"]);
    assert_eq!(detail.items[0].variant.product.images.len(), 1);
  }

  #[test]
  fn unknown_status_is_a_decode_error() {
    let mut row = detail_row(Uuid::new_v4(), None);
    row.status = "perdido".to_string();
    assert!(matches!(
      assemble_order(vec![row]),
      Err(BackendError::Decode { column: "pedidos.estado", .. })
    ));
  }

  #[test]
  fn item_without_variant_is_a_decode_error() {
    let mut row = detail_row(Uuid::new_v4(), Some((Uuid::new_v4(), "x")));
    row.variant_id = None;
    assert!(matches!(assemble_order(vec![row]), Err(BackendError::Decode { .. })));
  }

  #[test]
  fn catalog_rows_group_by_product() {
    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let row = |product_id, name: &str, variant: Option<&str>| CatalogRow {
      product_id,
      product_name: name.to_string(),
      description: None,
      images: None,
      variant_id: variant.map(|_| Uuid::new_v4()),
      variant_name: variant.map(str::to_string),
      variant_price_cents: variant.map(|_| 99_000),
    };
    let products = assemble_catalog(vec![
      row(a, "Arnés", Some("S")),
      row(a, "Arnés", Some("M")),
      row(b, "Collar", None),
    ]);
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].variants.len(), 2);
    assert!(products[1].variants.is_empty());
    assert!(products[1].images.is_empty());
  }
}
