//! receipt-core: translation of fiscal receipts from the source vendor schema
//! into the target vendor schema.
//!
//! The crate is pure: no I/O, no shared mutable state. The HTTP boundary and
//! the vendor collaborators live in `receipt-service`.
pub mod codes;
pub mod models;
pub mod prune;
pub mod translate;

pub use codes::{CodeTable, UNKNOWN};
pub use models::source::SourceReceipt;
pub use models::target::TargetReceipt;
pub use prune::prune;
pub use translate::{translate, translate_and_prune};
