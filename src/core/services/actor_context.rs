use std::sync::{Mutex, PoisonError};

use crate::core::errors::{AuditrailError, Result};

/// Single-slot holder of "who is performing this change" for one unit of
/// work.
///
/// Hosts allocate one context per unit of work (one inbound request, one
/// job run) and never share it across concurrent units, so concurrent
/// requests cannot observe or overwrite each other's actor. The interior
/// mutex only covers the host handing the same unit of work between
/// threads; it is not a sharing mechanism.
///
/// States are `INACTIVE -> ACTIVE -> INACTIVE`: [`begin`](Self::begin)
/// activates, [`end`](Self::end) deactivates and is safe from either state.
#[derive(Debug, Default)]
pub struct ActorContext {
    slot: Mutex<Option<String>>,
}

impl ActorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current actor for the active unit of work.
    ///
    /// Fails with [`ContextActive`](AuditrailError::ContextActive) if an
    /// actor is already set, leaving the existing actor unchanged. An
    /// intervening [`end`](Self::end) is required before a new `begin`.
    pub fn begin(&self, actor: impl Into<String>) -> Result<()> {
        let mut slot = self.lock();
        if let Some(current) = slot.as_ref() {
            return Err(AuditrailError::ContextActive {
                actor: current.clone(),
            });
        }
        *slot = Some(actor.into());
        Ok(())
    }

    /// The current actor, if any. No side effects.
    pub fn current(&self) -> Option<String> {
        self.lock().clone()
    }

    /// Clear the actor. Idempotent: safe to call with no prior `begin`,
    /// so host failure paths can always tear down.
    pub fn end(&self) {
        self.lock().take();
    }

    /// Begin a context that ends itself when the guard drops, including
    /// on unwind.
    pub fn scope(&self, actor: impl Into<String>) -> Result<ActorScope<'_>> {
        self.begin(actor)?;
        Ok(ActorScope { context: self })
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// RAII guard returned by [`ActorContext::scope`].
pub struct ActorScope<'a> {
    context: &'a ActorContext,
}

impl Drop for ActorScope<'_> {
    fn drop(&mut self) {
        self.context.end();
    }
}
