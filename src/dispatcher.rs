//! Routes inbound frames to registered handlers.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use crate::registry::EventRegistry;
use crate::types::EventFrame;

/// Fans one inbound frame out to the handlers registered for its name.
///
/// Dispatch operates on a snapshot taken at the start of each frame, so
/// handlers added or removed during a pass only affect subsequent frames.
pub struct Dispatcher {
    registry: Arc<EventRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<EventRegistry>) -> Self {
        Self { registry }
    }

    /// Invokes every handler for `frame.event` synchronously, in insertion
    /// order. A panicking handler is logged and does not stop the pass.
    pub fn dispatch(&self, frame: &EventFrame) {
        let handlers = self.registry.snapshot(&frame.event);
        if handlers.is_empty() {
            tracing::trace!("no handlers registered for event {}", frame.event);
            return;
        }

        tracing::debug!(
            "dispatching {} to {} handler(s)",
            frame.event,
            handlers.len()
        );

        for handler in handlers {
            if catch_unwind(AssertUnwindSafe(|| (*handler)(&frame.payload))).is_err() {
                tracing::error!(
                    "handler for event {} panicked, continuing with remaining handlers",
                    frame.event
                );
            }
        }
    }
}
