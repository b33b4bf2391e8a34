// core/src/model/mod.rs

//! Records read from the clinic backend.
//!
//! These mirror the backend tables (`pedidos`, `items_pedido`,
//! `producto_variantes`, `productos`, `propietarios`) but use English field
//! names; the data clients do the column mapping.

pub mod order;
pub mod owner;
pub mod product;
pub mod session;

pub use order::{Order, OrderDetail, OrderItem, OrderStatus, OrderSummary};
pub use owner::{Owner, Role};
pub use product::{CatalogProduct, ProductRef, ProductVariant, VariantRef};
pub use session::{Session, SessionToken};
