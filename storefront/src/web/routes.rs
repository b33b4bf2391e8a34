// storefront/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{auth_handlers, catalog_handlers, dashboard_handlers, order_handlers, webhook_handlers};

// The `/dashboard` scope must stay behind `admin_gate`; see main.rs.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .service(
      web::scope("/api/v1") // Base path for API version 1
        .route("/health", web::get().to(catalog_handlers::health_check_handler))
        .route("/nav", web::get().to(catalog_handlers::nav_handler))
        .route("/catalog", web::get().to(catalog_handlers::catalog_handler))
        // Authentication Routes
        .service(
          web::scope("/auth")
            .route("/signin", web::post().to(auth_handlers::signin_handler))
            .route("/signout", web::post().to(auth_handlers::signout_handler))
            .route("/session", web::get().to(auth_handlers::session_handler)),
        )
        // Database webhooks
        .service(
          web::scope("/webhooks").route("/new-order", web::post().to(webhook_handlers::new_order_webhook_handler)),
        ),
    )
    // Customer account
    .service(
      web::scope("/cuenta")
        .route("/pedidos", web::get().to(order_handlers::list_orders_handler))
        .route("/pedidos/{order_id}", web::get().to(order_handlers::get_order_handler)),
    )
    // Staff area
    .service(
      web::scope("/dashboard")
        .route("/pedidos", web::get().to(dashboard_handlers::recent_orders_handler))
        .route("/pedidos/{order_id}", web::get().to(dashboard_handlers::order_detail_handler)),
    );
}
