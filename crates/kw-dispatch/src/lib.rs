//! Named-phase dispatcher for Kettenwurf macros.
//!
//! A host engine announces phases of an in-progress action by name. Each
//! macro builds a [`PhaseRegistry`] once, mapping the phase names it cares
//! about to handlers; every other phase is ignored. Handler failures are
//! caught at the dispatch boundary, reported, and swallowed — an exception
//! escaping here would abort the host's entire in-progress action, which is
//! worse than skipping the automation for that one action.

pub mod registry;

pub use registry::{DispatchOutcome, FaultNotifier, PhaseHandler, PhaseRegistry, SilentNotifier};
