//! Application layer: the client-side workflow.
//!
//! `Workflow` owns the form slots, output regions and controls, and runs the
//! operations against a `BankingApi` port. Each operation validates locally,
//! holds its control disabled for the single suspension point of the remote
//! call, and renders one deterministic outcome.

pub mod control;
pub mod render;
pub mod workflow;
