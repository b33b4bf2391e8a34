// core/src/email.rs

//! New-order notification email.

use uuid::Uuid;

use crate::routes::SiteRoutes;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
  pub subject: String,
  pub html: String,
  pub text: String,
}

/// Everything the notification needs: no lookups happen while rendering.
#[derive(Debug, Clone)]
pub struct NewOrderEmail<'a> {
  pub order_id: Uuid,
  pub total_display: &'a str,
  pub site_url: &'a str,
  pub routes: &'a SiteRoutes,
}

impl NewOrderEmail<'_> {
  pub fn dashboard_link(&self) -> String {
    format!(
      "{}{}",
      self.site_url.trim_end_matches('/'),
      self.routes.admin_order(self.order_id)
    )
  }

  pub fn render(&self) -> RenderedEmail {
    let link = self.dashboard_link();
    let subject = format!("Nuevo pedido #{}", self.order_id);
    let html = format!(
      concat!(
        "<!DOCTYPE html>",
        "<html lang=\"es\"><head><meta charset=\"utf-8\"><title>{subject}</title></head>",
        "<body>",
        "<h1>¡Nuevo pedido recibido!</h1>",
        "<p>Se ha registrado el pedido <strong>#{order_id}</strong>.</p>",
        "<p>Total: <strong>{total}</strong></p>",
        "<p><a href=\"{link}\">Ver pedido en el panel</a></p>",
        "</body></html>"
      ),
      subject = escape_html(&subject),
      order_id = self.order_id,
      total = escape_html(self.total_display),
      link = escape_html(&link),
    );
    let text = format!(
      "¡Nuevo pedido recibido!\n\nPedido: #{}\nTotal: {}\n\nVer pedido en el panel: {}\n",
      self.order_id, self.total_display, link
    );
    RenderedEmail { subject, html, text }
  }
}

/// Formats an amount in cents as `$12.345,50` (`.` thousands, `,` decimals).
pub fn format_total(cents: i64) -> String {
  let sign = if cents < 0 { "-" } else { "" };
  let abs = cents.unsigned_abs();
  let units = (abs / 100).to_string();
  let decimals = abs % 100;

  let mut grouped = String::with_capacity(units.len() + units.len() / 3);
  for (i, ch) in units.chars().enumerate() {
    if i > 0 && (units.len() - i) % 3 == 0 {
      grouped.push('.');
    }
    grouped.push(ch);
  }
  format!("{sign}${grouped},{decimals:02}")
}

fn escape_html(input: &str) -> String {
  let mut out = String::with_capacity(input.len());
  for ch in input.chars() {
    match ch {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      c => out.push(c),
    }
  }
  out
}
