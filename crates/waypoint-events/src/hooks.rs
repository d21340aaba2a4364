//! Generic event hooks keyed by event kind.

use std::collections::HashMap;

use crate::subscriber::run_isolated;
use crate::{DomainEvent, EventError, EventKind, Subscriber};

/// A hook callback.
pub type Hook = Box<dyn Fn(&DomainEvent) -> Result<(), EventError> + Send + Sync>;

/// Hooks registered per [`EventKind`], run in registration order.
///
/// Each hook is isolated like a subscriber: one failing hook doesn't stop
/// the next. The registry as a whole reports success to the dispatcher
/// and logs individual failures itself.
#[derive(Default)]
pub struct HookRegistry {
    hooks: HashMap<EventKind, Vec<(String, Hook)>>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `hook` for events of `kind`.
    pub fn register<F>(&mut self, kind: EventKind, name: impl Into<String>, hook: F)
    where
        F: Fn(&DomainEvent) -> Result<(), EventError> + Send + Sync + 'static,
    {
        self.hooks
            .entry(kind)
            .or_default()
            .push((name.into(), Box::new(hook)));
    }

    /// Number of hooks registered for `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.hooks.get(&kind).map_or(0, Vec::len)
    }
}

impl Subscriber for HookRegistry {
    fn name(&self) -> &str {
        "hooks"
    }

    fn on_event(&self, event: &DomainEvent) -> Result<(), EventError> {
        let Some(hooks) = self.hooks.get(&event.kind()) else {
            return Ok(());
        };
        for (name, hook) in hooks {
            run_isolated(name, event, || hook(event));
        }
        Ok(())
    }
}
