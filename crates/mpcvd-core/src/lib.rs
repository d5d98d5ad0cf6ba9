//! Protocol core for Multi-Party Coordinated Vulnerability Disclosure.
//!
//! This crate encodes the MPCVD protocol as social-web activities performed
//! by actors (finders, vendors, coordinators) on protocol entities
//! (vulnerability reports, vulnerability cases, case participants). Its job
//! is to guarantee that every emitted or received activity is a *legal*
//! transition in two interacting state machines: the per-report Report
//! Management (RM) lifecycle and the per-participant
//! Vulnerability/Fix/Disclosure (VFD) lifecycle.
//!
//! # Architecture
//!
//! ```text
//! transport ──► Activity ──► validator ──► TransitionResult ──► store
//!                  │             │              (mutations)
//!              vocab (nouns)     │
//!                  │         rm / case_status
//!                  └──── (transition tables)
//! ```
//!
//! The core is a pure state-transition function: given an activity and a
//! read snapshot of its target entity, [`validator::validate`] returns the
//! mutations to apply or a typed rejection. It performs no I/O and owns no
//! shared state; hosts serialize application per entity identifier.
//!
//! # Modules
//!
//! - [`config`] — protocol configuration and deterministic id derivation
//! - [`vocab`] — actors, objects, activities, and their field contracts
//! - [`rm`] — the Report Management state machine
//! - [`case_status`] — the per-participant VFD axis and the derived case
//!   aggregate
//! - [`validator`] — the single validation entry point
//! - [`store`] — collaborator traits and the in-memory reference store
//!
//! # Example
//!
//! ```rust
//! use mpcvd_core::store::MemoryStore;
//! use mpcvd_core::vocab::{
//!     Activity, ActivityKind, ParticipantRole, ProtocolObject, VulnerabilityReport,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let finder = "https://mpcvd.example/users/finn";
//! let vendor = "https://mpcvd.example/organizations/vendor";
//! let report_id = "https://mpcvd.example/reports/FDR-8675309";
//!
//! let mut store = MemoryStore::new();
//! store.register_role(finder, report_id, ParticipantRole::FinderReporter);
//! store.register_role(vendor, report_id, ParticipantRole::Vendor);
//!
//! // The finder originates a report; the vendor validates it.
//! let report = VulnerabilityReport::new("FDR-8675309", "I found a vulnerability!", report_id)?;
//! store.admit(&Activity::new(
//!     ActivityKind::Create,
//!     finder,
//!     ProtocolObject::from(report),
//! ))?;
//! store.admit(&Activity::new(ActivityKind::Accept, vendor, report_id))?;
//!
//! assert_eq!(
//!     store.report(report_id).unwrap().rm_state,
//!     mpcvd_core::rm::RmState::Valid
//! );
//! # Ok(())
//! # }
//! ```

pub mod case_status;
pub mod config;
pub mod rm;
pub mod store;
pub mod validator;
pub mod vocab;
