//! Phase registry and the dispatch fault boundary.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{Instrument, error, info_span, warn};

/// A handler for one named phase, generic over the host context bundle.
#[async_trait]
pub trait PhaseHandler<C: Send>: Send + Sync {
    /// Run the handler against the in-progress action's context.
    async fn handle(&self, ctx: &mut C) -> anyhow::Result<()>;
}

/// Receives user-facing notices when a handler faults.
///
/// The dispatcher always logs the fault; this hook is for surfacing it to
/// the operator (a toast, a chat message) in whatever way the host offers.
pub trait FaultNotifier: Send + Sync {
    /// Report a swallowed handler fault.
    fn notify(&self, macro_name: &str, phase: &str, error: &anyhow::Error);
}

/// A [`FaultNotifier`] that relies on the diagnostic log alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl FaultNotifier for SilentNotifier {
    fn notify(&self, _: &str, _: &str, _: &anyhow::Error) {}
}

/// How a dispatch call concluded. Never an `Err`: faults are part of the
/// normal result surface here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The phase was registered and its handler completed.
    Handled,
    /// No handler is registered for this phase. Not an error — most phases
    /// are irrelevant to most macros.
    Unregistered,
    /// The handler failed; the fault was reported and swallowed.
    Faulted {
        /// Rendered description of the swallowed fault.
        message: String,
    },
}

/// A macro's static mapping from phase names to handlers.
pub struct PhaseRegistry<C> {
    macro_name: String,
    handlers: HashMap<String, Box<dyn PhaseHandler<C>>>,
}

impl<C: Send> PhaseRegistry<C> {
    /// Create an empty registry labeled with the macro's display name.
    pub fn new(macro_name: impl Into<String>) -> Self {
        Self {
            macro_name: macro_name.into(),
            handlers: HashMap::new(),
        }
    }

    /// Register a handler for a phase name, replacing any previous one.
    pub fn register(
        mut self,
        phase: impl Into<String>,
        handler: impl PhaseHandler<C> + 'static,
    ) -> Self {
        self.handlers.insert(phase.into(), Box::new(handler));
        self
    }

    /// The macro display name this registry was built for.
    pub fn macro_name(&self) -> &str {
        &self.macro_name
    }

    /// Dispatch an announced phase.
    ///
    /// The whole call runs inside a diagnostic span labeled with the macro
    /// and phase names; the span closes on every exit path, including the
    /// fault path. Handler errors never propagate: they are logged, handed
    /// to `notifier`, and folded into [`DispatchOutcome::Faulted`].
    pub async fn dispatch(
        &self,
        phase: &str,
        ctx: &mut C,
        notifier: &dyn FaultNotifier,
    ) -> DispatchOutcome {
        let span = info_span!("macro_phase", name = %self.macro_name, phase);
        async {
            let Some(handler) = self.handlers.get(phase) else {
                warn!("phase not handled by this macro");
                return DispatchOutcome::Unregistered;
            };
            match handler.handle(ctx).await {
                Ok(()) => DispatchOutcome::Handled,
                Err(err) => {
                    error!(error = %err, "phase handler failed, suppressing");
                    notifier.notify(&self.macro_name, phase, &err);
                    DispatchOutcome::Faulted {
                        message: err.to_string(),
                    }
                }
            }
        }
        .instrument(span)
        .await
    }
}
