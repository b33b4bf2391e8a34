// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;
use uuid::Uuid;
use vetclinic::{
  BackendError, BackendResult, CatalogProduct, DataClient, InMemoryBackend, Order, OrderDetail, OrderItem, OrderStatus,
  OrderSummary, Owner, ProductRef, ProductVariant, Session, VariantRef,
};

// --- Fixture identities ---
pub struct Clinic {
  pub backend: Arc<InMemoryBackend>,
  pub customer: Owner,
  pub other_customer: Owner,
  pub admin: Owner,
  /// Owned by `customer`.
  pub own_order: Uuid,
  /// Owned by `other_customer`.
  pub foreign_order: Uuid,
}

pub const CUSTOMER_PASSWORD: &str = "perro-feliz";

pub fn owner(email: &str, role: &str) -> Owner {
  Owner {
    id: Uuid::new_v4(),
    email: email.to_string(),
    role: role.to_string(),
  }
}

pub fn order_detail(owner_id: Uuid, day: u32, items: Vec<OrderItem>) -> OrderDetail {
  let total_cents = items.iter().map(OrderItem::line_total_cents).sum();
  OrderDetail {
    order: Order {
      id: Uuid::new_v4(),
      created_at: Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap(),
      status: OrderStatus::Pagado,
      total_cents,
      shipping_address: Some("Av. Siempre Viva 742".to_string()),
      owner_id,
    },
    items,
  }
}

pub fn item(variant_name: &str, product_name: &str, quantity: i32, unit_price_cents: i64) -> OrderItem {
  OrderItem {
    id: Uuid::new_v4(),
    quantity,
    unit_price_cents,
    variant: VariantRef {
      id: Uuid::new_v4(),
      name: variant_name.to_string(),
      product: ProductRef {
        id: Uuid::new_v4(),
        name: product_name.to_string(),
        images: vec![format!("https://cdn.vet.example/{}.png", product_name.to_lowercase())],
      },
    },
  }
}

pub fn product(name: &str, images: &[&str]) -> CatalogProduct {
  CatalogProduct {
    id: Uuid::new_v4(),
    name: name.to_string(),
    description: None,
    images: images.iter().map(|s| s.to_string()).collect(),
    variants: vec![ProductVariant {
      id: Uuid::new_v4(),
      name: "Estándar".to_string(),
      price_cents: Some(199_000),
    }],
  }
}

pub fn seeded_clinic() -> Clinic {
  let backend = Arc::new(InMemoryBackend::new());
  let customer = owner("ana@example.com", "cliente");
  let other_customer = owner("bruno@example.com", "cliente");
  let admin = owner("vet@example.com", " Administrador ");
  backend.add_owner(customer.clone(), CUSTOMER_PASSWORD);
  backend.add_owner(other_customer.clone(), "gato-feliz");
  backend.add_owner(admin.clone(), "bisturí");

  let own = order_detail(
    customer.id,
    3,
    vec![item("Saco 15kg", "Alimento", 2, 4_599_000), item("Talla M", "Collar", 1, 850_000)],
  );
  let foreign = order_detail(other_customer.id, 4, vec![item("Pipeta", "Antipulgas", 3, 1_200_000)]);
  let own_order = own.order.id;
  let foreign_order = foreign.order.id;
  backend.add_order(own);
  backend.add_order(foreign);

  Clinic {
    backend,
    customer,
    other_customer,
    admin,
    own_order,
    foreign_order,
  }
}

pub fn session_for(clinic: &Clinic, owner: &Owner) -> Session {
  clinic.backend.issue_session(owner.id).expect("owner is seeded")
}

// --- Data client whose every call fails, counting calls ---
#[derive(Default)]
pub struct BrokenDataClient {
  pub calls: AtomicUsize,
}

impl BrokenDataClient {
  fn fail<T>(&self) -> BackendResult<T> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    Err(BackendError::query(anyhow::anyhow!("connection reset by peer")))
  }
}

#[async_trait]
impl DataClient for BrokenDataClient {
  async fn owner_role(&self, _owner_id: Uuid) -> BackendResult<Option<String>> {
    self.fail()
  }
  async fn customer_order(&self, _order_id: Uuid, _owner_id: Uuid) -> BackendResult<Option<OrderDetail>> {
    self.fail()
  }
  async fn customer_orders(&self, _owner_id: Uuid) -> BackendResult<Vec<OrderSummary>> {
    self.fail()
  }
  async fn order(&self, _order_id: Uuid) -> BackendResult<Option<OrderDetail>> {
    self.fail()
  }
  async fn recent_orders(&self, _limit: i64) -> BackendResult<Vec<OrderSummary>> {
    self.fail()
  }
  async fn catalog(&self) -> BackendResult<Vec<CatalogProduct>> {
    self.fail()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
