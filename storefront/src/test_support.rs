// storefront/src/test_support.rs

//! Fixtures shared by the handler and middleware tests.

use actix_web::cookie::Cookie;
use chrono::{TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;
use vetclinic::{
  AuthClient, CatalogProduct, DataClient, InMemoryBackend, Order, OrderDetail, OrderItem, OrderStatus, Owner,
  ProductRef, ProductVariant, Session, VariantRef,
};

use crate::config::AppConfig;
use crate::state::AppState;

pub const PASSWORD: &str = "gato-tranquilo";
pub const WEBHOOK_SECRET: &str = "s3cret";

pub struct TestClinic {
  pub backend: Arc<InMemoryBackend>,
  pub state: AppState,
  pub customer: Owner,
  pub admin: Owner,
  pub own_order: Uuid,
  pub foreign_order: Uuid,
}

pub fn test_config() -> AppConfig {
  AppConfig::from_lookup(|name| {
    let value = match name {
      "DATABASE_URL" => "postgres://localhost/vet_test",
      "SITE_URL" => "https://clinica.example",
      "WEBHOOK_SECRET" => WEBHOOK_SECRET,
      "REMOTE_IMAGE_HOSTS" => "cdn.vet.example",
      _ => return None,
    };
    Some(value.to_string())
  })
  .expect("test configuration is valid")
}

pub fn state_with(auth: Arc<dyn AuthClient>, data: Arc<dyn DataClient>) -> AppState {
  AppState::new(auth, data, Arc::new(test_config()))
}

fn owner(email: &str, role: &str) -> Owner {
  Owner {
    id: Uuid::new_v4(),
    email: email.to_string(),
    role: role.to_string(),
  }
}

fn order_for(owner_id: Uuid, day: u32, product: &str, quantity: i32, unit_price_cents: i64) -> OrderDetail {
  let item = OrderItem {
    id: Uuid::new_v4(),
    quantity,
    unit_price_cents,
    variant: VariantRef {
      id: Uuid::new_v4(),
      name: "Estándar".to_string(),
      product: ProductRef {
        id: Uuid::new_v4(),
        name: product.to_string(),
        images: vec![format!("https://cdn.vet.example/{}.png", product.to_lowercase())],
      },
    },
  };
  OrderDetail {
    order: Order {
      id: Uuid::new_v4(),
      created_at: Utc.with_ymd_and_hms(2024, 3, day, 10, 0, 0).unwrap(),
      status: OrderStatus::Pagado,
      total_cents: item.line_total_cents(),
      shipping_address: Some("Av. Siempre Viva 742".to_string()),
      owner_id,
    },
    items: vec![item],
  }
}

/// A customer with one order, another customer with one order, an
/// administrator, and a two-product catalog.
pub fn clinic() -> TestClinic {
  let backend = Arc::new(InMemoryBackend::new());
  let customer = owner("ana@example.com", "cliente");
  let other = owner("bruno@example.com", "cliente");
  let admin = owner("staff@example.com", " Administrador ");
  for o in [&customer, &other, &admin] {
    backend.add_owner(o.clone(), PASSWORD);
  }

  let own = order_for(customer.id, 4, "Antipulgas", 2, 850_000);
  let foreign = order_for(other.id, 5, "Shampoo", 1, 1_200_000);
  let (own_order, foreign_order) = (own.order.id, foreign.order.id);
  backend.add_order(own);
  backend.add_order(foreign);

  backend.add_product(CatalogProduct {
    id: Uuid::new_v4(),
    name: "Antipulgas".to_string(),
    description: Some("Pipeta mensual".to_string()),
    images: vec![
      "https://cdn.vet.example/antipulgas.png".to_string(),
      "https://tracker.elsewhere.example/pixel.png".to_string(),
    ],
    variants: vec![ProductVariant {
      id: Uuid::new_v4(),
      name: "Perro mediano".to_string(),
      price_cents: Some(850_000),
    }],
  });

  let state = state_with(backend.clone(), backend.clone());
  TestClinic {
    backend,
    state,
    customer,
    admin,
    own_order,
    foreign_order,
  }
}

pub fn session_cookie(session: &Session) -> Cookie<'static> {
  Cookie::new("vet_session", session.token.as_str().to_string())
}
