// core/src/catalog.rs

//! Remote image host allow-list for catalog images.

use url::Url;

use crate::model::CatalogProduct;

/// Hosts catalog images may be served from. Entries are exact hostnames or
/// `*.suffix` wildcards; only `http`/`https` URLs are considered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageHosts {
  patterns: Vec<String>,
}

impl ImageHosts {
  pub fn new<I, S>(patterns: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let patterns = patterns
      .into_iter()
      .map(|p| p.as_ref().trim().to_lowercase())
      .filter(|p| !p.is_empty())
      .collect();
    ImageHosts { patterns }
  }

  /// Parses a comma separated list, as found in configuration.
  pub fn parse(list: &str) -> Self {
    Self::new(list.split(','))
  }

  pub fn is_empty(&self) -> bool {
    self.patterns.is_empty()
  }

  pub fn allows(&self, url: &str) -> bool {
    let Some(host) = url_host(url) else {
      return false;
    };
    self.patterns.iter().any(|pattern| match pattern.strip_prefix("*.") {
      Some(suffix) => host.len() > suffix.len() + 1 && host.ends_with(suffix) && host[..host.len() - suffix.len()].ends_with('.'),
      None => host == *pattern,
    })
  }

  /// Drops images whose host is not allowed. Products themselves are kept.
  pub fn filter_catalog(&self, products: Vec<CatalogProduct>) -> Vec<CatalogProduct> {
    products
      .into_iter()
      .map(|mut product| {
        let before = product.images.len();
        product.images.retain(|url| self.allows(url));
        if product.images.len() != before {
          tracing::debug!(product_id = %product.id, dropped = before - product.images.len(), "Dropped images from disallowed hosts.");
        }
        product
      })
      .collect()
  }
}

/// Lowercased host of an absolute http(s) URL, as a browser would resolve it.
fn url_host(url: &str) -> Option<String> {
  let parsed = Url::parse(url).ok()?;
  if !matches!(parsed.scheme(), "http" | "https") {
    return None;
  }
  parsed.host_str().filter(|host| !host.is_empty()).map(str::to_lowercase)
}
