// src/lib.rs

//! vetclinic: the domain layer of a veterinary clinic storefront.
//!
//! The crate holds everything the storefront does that is not HTTP plumbing:
//!  - Records read from the clinic backend (orders, items, variants, catalog, owners).
//!  - The `AuthClient` / `DataClient` seams a backend implements, plus an in-process backend.
//!  - The owner-scoped order lookup used by the customer account pages.
//!  - The admin access policy applied to the dashboard prefix.
//!  - Session-aware navigation links with lifetime-scoped auth subscriptions.
//!  - The loading overlay flag, coalesced to frame boundaries.
//!  - The new-order notification email.

pub mod access;
pub mod catalog;
pub mod client;
pub mod email;
pub mod error;
pub mod loading;
pub mod memory;
pub mod model;
pub mod orders;
pub mod routes;
pub mod widgets;

// --- Re-exports for the Public API ---

pub use crate::access::{normalize_role, Access, AccessPolicy, DenyReason, ADMIN_ROLE};
pub use crate::catalog::ImageHosts;
pub use crate::client::{sign_in_with_password, sign_out, AuthClient, AuthEvent, ClientSession, DataClient};
pub use crate::email::{format_total, NewOrderEmail, RenderedEmail};
pub use crate::error::{BackendError, BackendResult, VetError, VetResult};
pub use crate::loading::{FrameScheduler, LoadingContext, LoadingOverlay, ManualFrames, TokioFrames};
pub use crate::memory::InMemoryBackend;
pub use crate::model::{
  CatalogProduct, Order, OrderDetail, OrderItem, OrderStatus, OrderSummary, Owner, ProductRef, ProductVariant,
  Role, Session, SessionToken, VariantRef,
};
pub use crate::orders::{get_customer_order_by_id, list_customer_orders};
pub use crate::routes::SiteRoutes;
pub use crate::widgets::{resolve_link, LinkKind, LinkStyle, LinkTarget, LinkView, SessionLink};
