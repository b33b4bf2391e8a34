// core/src/widgets.rs

//! Session-aware navigation links.
//!
//! A `SessionLink` follows one `ClientSession`: it subscribes to auth events,
//! fetches the current session once, and re-resolves its target whenever the
//! auth state changes. The subscription lives exactly as long as the widget.

use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::client::{AuthEvent, ClientSession};
use crate::model::Session;
use crate::routes::SiteRoutes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
  /// Header link: login for visitors, account area for signed-in users.
  Account,
  /// Appointment button: public request form or in-account booking.
  Appointment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkStyle {
  Public,
  Account,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTarget {
  pub href: String,
  pub label: &'static str,
  pub style: LinkStyle,
}

/// What the widget renders right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LinkView {
  /// Disabled placeholder while the first session fetch is outstanding.
  Pending,
  Ready(LinkTarget),
}

pub fn resolve_link(kind: LinkKind, session: Option<&Session>, routes: &SiteRoutes) -> LinkTarget {
  match (kind, session.is_some()) {
    (LinkKind::Account, false) => LinkTarget {
      href: routes.login.clone(),
      label: "Iniciar sesión",
      style: LinkStyle::Public,
    },
    (LinkKind::Account, true) => LinkTarget {
      href: routes.account.clone(),
      label: "Mi cuenta",
      style: LinkStyle::Account,
    },
    (LinkKind::Appointment, false) => LinkTarget {
      href: routes.appointment_request.clone(),
      label: "Solicitar cita",
      style: LinkStyle::Public,
    },
    (LinkKind::Appointment, true) => LinkTarget {
      href: routes.appointment_booking.clone(),
      label: "Agendar cita",
      style: LinkStyle::Account,
    },
  }
}

struct LinkCell {
  view: LinkView,
  torn_down: bool,
}

impl LinkCell {
  /// Writes are dropped once the widget is torn down.
  fn set(&mut self, view: LinkView) -> bool {
    if self.torn_down {
      return false;
    }
    self.view = view;
    true
  }
}

pub struct SessionLink {
  kind: LinkKind,
  cell: Arc<Mutex<LinkCell>>,
  listener: Option<JoinHandle<()>>,
}

impl SessionLink {
  /// Mounts the widget and starts following `client`. Must be called inside a
  /// tokio runtime.
  pub fn mount(kind: LinkKind, client: Arc<ClientSession>, routes: Arc<SiteRoutes>) -> Self {
    let initial = match kind {
      LinkKind::Account => LinkView::Ready(resolve_link(kind, None, &routes)),
      LinkKind::Appointment => LinkView::Pending,
    };
    let cell = Arc::new(Mutex::new(LinkCell {
      view: initial,
      torn_down: false,
    }));

    // Subscribe first so no event between the fetch and the subscription is lost.
    let events = client.subscribe();
    let listener = tokio::spawn(follow_session(kind, client, routes, Arc::clone(&cell), events));

    SessionLink {
      kind,
      cell,
      listener: Some(listener),
    }
  }

  pub fn kind(&self) -> LinkKind {
    self.kind
  }

  pub fn view(&self) -> LinkView {
    self.cell.lock().view.clone()
  }

  /// Ends the subscription. After this returns the view never changes again.
  pub fn teardown(mut self) -> LinkView {
    self.stop();
    self.view()
  }

  fn stop(&mut self) {
    self.cell.lock().torn_down = true;
    if let Some(listener) = self.listener.take() {
      listener.abort();
    }
  }
}

impl Drop for SessionLink {
  fn drop(&mut self) {
    self.stop();
  }
}

async fn follow_session(
  kind: LinkKind,
  client: Arc<ClientSession>,
  routes: Arc<SiteRoutes>,
  cell: Arc<Mutex<LinkCell>>,
  mut events: broadcast::Receiver<AuthEvent>,
) {
  let session = client.current_session().await;
  if !cell.lock().set(LinkView::Ready(resolve_link(kind, session.as_ref(), &routes))) {
    return;
  }

  loop {
    let session = match events.recv().await {
      Ok(AuthEvent::SignedIn(session)) => Some(session),
      Ok(AuthEvent::SignedOut) => None,
      Err(RecvError::Lagged(skipped)) => {
        // Missed events: fall back to asking for the current state.
        warn!(skipped, ?kind, "Link widget lagged behind auth events; refetching session.");
        client.current_session().await
      }
      Err(RecvError::Closed) => {
        debug!(?kind, "Auth event channel closed; link widget stops following.");
        return;
      }
    };
    if !cell.lock().set(LinkView::Ready(resolve_link(kind, session.as_ref(), &routes))) {
      return;
    }
  }
}
