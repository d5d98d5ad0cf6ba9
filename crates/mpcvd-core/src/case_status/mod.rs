//! Per-participant case engagement (VFD axis) and the derived case status.
//!
//! Each case participant tracks two independent axes: an RM axis mirroring
//! the report lifecycle from the participant's point of view, and the VFD
//! (Vulnerability/Fix/Disclosure) engagement axis implemented here.
//! Participants enter a case at the `Vfd` baseline, engage by joining,
//! defer, may re-engage by undoing a deferral, and eventually close out.
//!
//! # State Machine (per participant)
//!
//! ```text
//!            Join                    Ignore
//!   ┌─────┐ ──────► ┌─────────┐ ──────────► ┌──────────┐
//!   │ Vfd │         │ Engaged │             │ Deferred │
//!   └──┬──┘ ◄────── └────┬────┘ ◄────────── └────┬─────┘
//!      │    (never)      │     Join / Undo(Ignore)│
//!      │                 │ Leave                  │ Leave
//!      │ Leave           ▼                        │
//!      └───────────► ┌────────┐ ◄─────────────────┘
//!                    │ Closed │
//!                    └────────┘
//! ```
//!
//! # Valid Transitions
//!
//! | From | Activity | To |
//! |------|----------|----|
//! | Vfd, Deferred | `Join` | Engaged |
//! | Engaged | `Ignore` | Deferred |
//! | Deferred | `Undo` wrapping the `Ignore`, same actor | Engaged |
//! | Vfd, Engaged, Deferred | `Leave` | Closed |
//!
//! Only a participant's own actor moves its engagement; `Closed` is terminal
//! per participant. An `Undo` is usable once per deferral: after it fires the
//! participant is `Engaged` again, and a second `Undo` of the same wrapped
//! activity finds no deferral to reverse.
//!
//! # Aggregate Status
//!
//! The case-level status is a function over the latest status snapshot of
//! every participant, recomputed on read and never stored. See
//! [`aggregate_status`].

mod aggregate;
mod state;


pub use aggregate::{AggregateStatus, aggregate_status};
pub use state::{VfdState, next};
