// core/src/controller/busy.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// "Request in flight" marker shared between a controller and its renderer.
///
/// Controllers hold `&mut self` across the request, so the renderer keeps a
/// clone of this flag instead and reads it while the call is pending.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
  pub fn is_busy(&self) -> bool {
    self.0.load(Ordering::Acquire)
  }

  /// Raises the flag until the returned guard is dropped, including when the
  /// pending future is cancelled.
  pub(crate) fn hold(&self) -> BusyGuard {
    self.0.store(true, Ordering::Release);
    BusyGuard(self.clone())
  }
}

pub(crate) struct BusyGuard(BusyFlag);

impl Drop for BusyGuard {
  fn drop(&mut self) {
    (self.0).0.store(false, Ordering::Release);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clones_see_the_guard() {
    let flag = BusyFlag::default();
    let renderer = flag.clone();
    assert!(!renderer.is_busy());
    {
      let _guard = flag.hold();
      assert!(renderer.is_busy());
    }
    assert!(!renderer.is_busy());
  }
}
