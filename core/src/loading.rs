// core/src/loading.rs

//! Global loading overlay state, as an explicit context object.
//!
//! `show()` and `hide()` never flip the flag directly: they record the wanted
//! value and ask the frame scheduler for a callback. Toggles issued before that
//! frame coalesce into the last one, so a navigation that starts and ends
//! within one frame never flashes the overlay.

use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;

pub type FrameCallback = Box<dyn FnOnce() + Send + 'static>;

/// Source of "next frame" callbacks.
pub trait FrameScheduler: Send + Sync {
  fn request_frame(&self, callback: FrameCallback);
}

/// Frames that only advance when `tick()` is called.
#[derive(Default)]
pub struct ManualFrames {
  queue: Mutex<Vec<FrameCallback>>,
}

impl ManualFrames {
  pub fn new() -> Self {
    Self::default()
  }

  /// Runs every callback queued before this call. Returns how many ran.
  pub fn tick(&self) -> usize {
    let due = std::mem::take(&mut *self.queue.lock());
    let count = due.len();
    for callback in due {
      callback();
    }
    count
  }

  pub fn pending(&self) -> usize {
    self.queue.lock().len()
  }
}

impl FrameScheduler for ManualFrames {
  fn request_frame(&self, callback: FrameCallback) {
    self.queue.lock().push(callback);
  }
}

/// Frames driven by the tokio timer. Must be used inside a runtime.
#[derive(Debug, Clone)]
pub struct TokioFrames {
  interval: Duration,
}

impl TokioFrames {
  pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(16);

  pub fn new(interval: Duration) -> Self {
    TokioFrames { interval }
  }
}

impl Default for TokioFrames {
  fn default() -> Self {
    Self::new(Self::DEFAULT_INTERVAL)
  }
}

impl FrameScheduler for TokioFrames {
  fn request_frame(&self, callback: FrameCallback) {
    let interval = self.interval;
    tokio::spawn(async move {
      tokio::time::sleep(interval).await;
      callback();
    });
  }
}

#[derive(Debug, Default)]
struct LoadingFlag {
  visible: bool,
  pending: Option<bool>,
  frame_requested: bool,
}

struct LoadingInner {
  flag: Mutex<LoadingFlag>,
  frames: Arc<dyn FrameScheduler>,
}

impl LoadingInner {
  fn apply_pending(&self) {
    let mut flag = self.flag.lock();
    flag.frame_requested = false;
    if let Some(value) = flag.pending.take() {
      flag.visible = value;
      tracing::trace!(visible = value, "Loading flag applied on frame.");
    }
  }
}

/// Shared handle to the loading flag. Clones observe the same flag.
#[derive(Clone)]
pub struct LoadingContext {
  inner: Arc<LoadingInner>,
}

impl LoadingContext {
  pub fn new(frames: Arc<dyn FrameScheduler>) -> Self {
    LoadingContext {
      inner: Arc::new(LoadingInner {
        flag: Mutex::new(LoadingFlag::default()),
        frames,
      }),
    }
  }

  pub fn is_loading(&self) -> bool {
    self.inner.flag.lock().visible
  }

  /// Navigation started: show the overlay from the next frame on.
  pub fn show(&self) {
    self.schedule(true);
  }

  /// Navigation finished: hide the overlay from the next frame on.
  pub fn hide(&self) {
    self.schedule(false);
  }

  fn schedule(&self, value: bool) {
    {
      let mut flag = self.inner.flag.lock();
      flag.pending = Some(value);
      if flag.frame_requested {
        return;
      }
      flag.frame_requested = true;
    }
    // Callback holds a weak ref so a dropped context does not outlive its provider.
    let weak: Weak<LoadingInner> = Arc::downgrade(&self.inner);
    self.inner.frames.request_frame(Box::new(move || {
      if let Some(inner) = weak.upgrade() {
        inner.apply_pending();
      }
    }));
  }

  /// Immediate hide that also drops any toggle still waiting for a frame.
  pub(crate) fn reset(&self) {
    let mut flag = self.inner.flag.lock();
    flag.pending = None;
    flag.visible = false;
  }
}

/// The overlay consumer. Tracks the current route and hides the overlay
/// whenever it changes, even if no `hide()` was issued.
pub struct LoadingOverlay {
  context: LoadingContext,
  route: Mutex<Option<String>>,
}

impl LoadingOverlay {
  pub fn new(context: LoadingContext) -> Self {
    LoadingOverlay {
      context,
      route: Mutex::new(None),
    }
  }

  pub fn context(&self) -> &LoadingContext {
    &self.context
  }

  pub fn is_visible(&self) -> bool {
    self.context.is_loading()
  }

  /// Reports the route currently displayed. Returns whether it changed.
  pub fn route_changed(&self, route: &str) -> bool {
    let mut current = self.route.lock();
    if current.as_deref() == Some(route) {
      return false;
    }
    *current = Some(route.to_string());
    drop(current);
    self.context.reset();
    true
  }
}
