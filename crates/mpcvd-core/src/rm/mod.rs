//! Report Management (RM) state machine.
//!
//! This module implements the lifecycle of a single vulnerability report,
//! from receipt by a vendor through validation, prioritization, and closure.
//! Transitions are driven by activities; the [`crate::validator`] module
//! performs the authorization and bookkeeping around the pure transition
//! table defined here.
//!
//! # State Machine
//!
//! ```text
//!                 Create
//!     ┌──────┐  (finder)   ┌──────────┐
//!     │(none)│────────────►│ Received │◄─┐ Read / Offer
//!     └──────┘             └────┬─────┘──┘ (no state change)
//!                               │
//!              Reject           │          Accept
//!         ┌─────────────────────┼───────────────────┐
//!         ▼                     ▼                   │
//!    ┌─────────┐           ┌───────┐   Accept   ┌──────────┐
//!    │ Invalid │           │ Valid │──────────► │ Accepted │
//!    └────┬────┘           └───┬───┘            └────┬─────┘
//!         │                    │       Leave         │
//!         └────────────────────┴─────────┬───────────┘
//!                                        ▼
//!                                   ┌────────┐
//!                                   │ Closed │
//!                                   └────────┘
//! ```
//!
//! # Valid Transitions
//!
//! | From | Activity | Role | To |
//! |------|----------|------|----|
//! | (none) | `Create` | finder/reporter | Received |
//! | Received | `Offer` | finder/reporter | Received (submission recorded) |
//! | Received | `Read` | vendor | Received (acknowledgment recorded) |
//! | Received | `Accept` | vendor | Valid |
//! | Received | `Reject` | vendor | Invalid |
//! | Valid | `Accept` | vendor | Accepted |
//! | Valid, Invalid, Accepted | `Leave` | vendor | Closed |
//!
//! `Closed` is terminal. The only way out is an `Undo` wrapping the closing
//! `Leave`, issued by the closing actor, which restores the last state the
//! report held before closure; the validator resolves that state from the
//! report's transition log.

mod state;


pub use state::{RmLogEntry, RmState, next, required_role};
