//! Response status hooks
//!
//! A table of callbacks keyed by HTTP status code. The client runs the
//! matching hook for every response it receives, regardless of which
//! endpoint produced it.

use reqwest::StatusCode;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Callback invoked when a response arrives with the registered status
pub type StatusHook = Arc<dyn Fn() + Send + Sync>;

/// Hooks keyed by response status code
#[derive(Clone, Default)]
pub struct StatusHooks {
    hooks: HashMap<StatusCode, StatusHook>,
}

impl StatusHooks {
    pub fn new() -> Self {
        Self {
            hooks: HashMap::new(),
        }
    }

    /// Register a hook for a status code, replacing any previous one
    pub fn on(mut self, status: StatusCode, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.hooks.insert(status, Arc::new(hook));
        self
    }

    /// Run the hook registered for `status`, if any
    ///
    /// Returns whether a hook ran. Each response triggers at most one
    /// hook invocation.
    pub fn dispatch(&self, status: StatusCode) -> bool {
        match self.hooks.get(&status) {
            Some(hook) => {
                tracing::debug!("Running status hook for {}", status);
                hook();
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for StatusHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut codes: Vec<u16> = self.hooks.keys().map(|s| s.as_u16()).collect();
        codes.sort_unstable();
        f.debug_struct("StatusHooks").field("codes", &codes).finish()
    }
}
