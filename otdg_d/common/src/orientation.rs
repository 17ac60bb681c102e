use api::Orientation;
use std::sync::{Arc, RwLock};

/// The latest wrist orientation, shared between the inbound-message task
/// (writer) and the sampling loop (reader). The whole triple is replaced
/// or read under the lock, so a read never observes a half-written value.
/// The value stays at the last write when the peer goes quiet; starts as
/// `Orientation::UNKNOWN`.
#[derive(Debug, Clone, Default)]
pub struct OrientationCell {
    inner: Arc<RwLock<Orientation>>,
}

impl OrientationCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, value: Orientation) {
        *self.inner.write().unwrap() = value;
    }

    pub fn get(&self) -> Orientation {
        *self.inner.read().unwrap()
    }
}
