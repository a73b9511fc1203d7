use std::cell::{Cell, RefCell};

use futures::future::{AbortHandle, AbortRegistration};

/// At most one run of a cancellable job. Starting a run aborts the one
/// before it, and the page-level listener that cancels it is registered
/// only once.
#[derive(Debug, Default)]
pub struct SingleRun {
    current: RefCell<Option<AbortHandle>>,
    listener_registered: Cell<bool>,
}

impl SingleRun {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registration for a new run; the previous run is aborted.
    pub fn begin(&self) -> AbortRegistration {
        let (handle, registration) = AbortHandle::new_pair();
        if let Some(previous) = self.current.replace(Some(handle)) {
            log::info!("🔁 [RUN] Restarting, previous run aborted");
            previous.abort();
        }
        registration
    }

    /// `true` if there was a run to abort.
    pub fn cancel(&self) -> bool {
        match self.current.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// `true` for the first caller only.
    pub fn claim_listener(&self) -> bool {
        !self.listener_registered.replace(true)
    }
}
