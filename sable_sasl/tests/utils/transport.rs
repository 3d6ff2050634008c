use parking_lot::Mutex;
use sable_sasl::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Records the parameters of every message sent over the link. Starts out
/// reachable.
pub struct RecordingTransport {
    unreachable: AtomicBool,
    sent: Mutex<Vec<Vec<String>>>,
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self {
            unreachable: AtomicBool::new(false),
            sent: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingTransport {
    pub fn set_reachable(&self, reachable: bool) {
        self.unreachable.store(!reachable, Ordering::SeqCst);
    }

    pub fn take_sent(&self) -> Vec<Vec<String>> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl RelayTransport for RecordingTransport {
    fn send_encapsulated(&self, message: &RelayMessage) -> Result<(), RelayError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(RelayError::Unreachable(message.target.clone()));
        }
        self.sent.lock().push(message.to_params());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingFallback {
    handled: Mutex<Vec<Vec<String>>>,
}

impl RecordingFallback {
    pub fn take_handled(&self) -> Vec<Vec<String>> {
        std::mem::take(&mut *self.handled.lock())
    }
}

impl SaslFallback for RecordingFallback {
    fn handle(&self, message: &RelayMessage) {
        self.handled.lock().push(message.to_params());
    }
}
