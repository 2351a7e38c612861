//! `ct-report`: contact-location reports for the rust_ct framework.
//!
//! Two reports are provided.  Both implement `ct_sim::SimListener` and write
//! through any [`ct_output::LineWriter`].
//!
//! | Report                      | Emits                                             |
//! |-----------------------------|---------------------------------------------------|
//! | [`ContactsPositionsReport`] | One line per live contact per sampling tick, when |
//! |                             | either endpoint moved since its last line         |
//! | [`ContactEnvelopeReport`]   | One WKT polygon per finished contact              |
//!
//! # Line formats
//!
//! ```text
//! ContactsPositionsReport:  simTime;addr1;addr2;startTime;x1;y1;x2;y2
//! ContactEnvelopeReport:    startTime;endTime;duration;addr1;addr2;POLYGON((…))
//! ```
//!
//! Times are truncated to whole seconds; coordinates use the shortest
//! round-trip decimal form (`5`, `2.5`).
//!
//! # Cargo features
//!
//! | Feature   | Effect                                               |
//! |-----------|------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the live-contacts map. |

pub mod base;
pub mod envelope;
pub mod error;
pub mod index;
pub mod positions;
pub mod record;

#[cfg(test)]
mod tests;

pub use base::ReportBase;
pub use envelope::ContactEnvelopeReport;
pub use error::{ReportError, ReportResult};
pub use index::{ContactIndex, ContactRecord};
pub use positions::ContactsPositionsReport;
pub use record::{EnvelopeContact, PositionsContact};
