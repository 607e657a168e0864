// src/loader/callbacks.rs
use std::panic::{self, AssertUnwindSafe};

pub type Callback = Box<dyn FnOnce() + Send + 'static>;

/// Completion callbacks waiting for the loader to reach a terminal state.
#[derive(Default)]
pub struct PendingCallbacks {
    queue: Vec<Callback>,
}

impl PendingCallbacks {
    pub fn push(&mut self, callback: Callback) {
        self.queue.push(callback);
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Empties the queue. The caller fires the result once its lock is released.
    pub fn take(&mut self) -> DrainedCallbacks {
        DrainedCallbacks(std::mem::take(&mut self.queue))
    }
}

#[must_use = "drained callbacks do nothing until fired"]
pub struct DrainedCallbacks(Vec<Callback>);

impl DrainedCallbacks {
    /// Runs every callback once, in registration order. A panicking callback
    /// is logged and does not stop the rest.
    pub fn fire(self) {
        for (index, callback) in self.0.into_iter().enumerate() {
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(callback)) {
                log::error!(
                    "Build info callback #{} panicked: {}",
                    index,
                    panic_message(payload.as_ref())
                );
            }
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder(log: &Arc<Mutex<Vec<usize>>>, value: usize) -> Callback {
        let log = Arc::clone(log);
        Box::new(move || log.lock().push(value))
    }

    #[test]
    fn fires_in_registration_order_and_empties() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pending = PendingCallbacks::default();
        for i in 0..4 {
            pending.push(recorder(&log, i));
        }
        assert_eq!(pending.len(), 4);

        let drained = pending.take();
        assert!(pending.is_empty());
        drained.fire();

        assert_eq!(*log.lock(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn panicking_callback_does_not_stop_the_rest() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut pending = PendingCallbacks::default();
        pending.push(recorder(&log, 1));
        pending.push(Box::new(|| panic!("boom")));
        pending.push(recorder(&log, 3));

        pending.take().fire();
        assert_eq!(*log.lock(), vec![1, 3]);
    }

    #[test]
    fn panic_messages_are_extracted() {
        let payload: Box<dyn std::any::Any + Send> = Box::new("static");
        assert_eq!(panic_message(payload.as_ref()), "static");
        let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(payload.as_ref()), "owned");
        let payload: Box<dyn std::any::Any + Send> = Box::new(7u8);
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
