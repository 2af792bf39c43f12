//! Repository abstractions for data access.
//!
//! Repositories own the transaction boundaries: every multi-step mutation
//! (invariant checks + write + audit entry) happens inside one database
//! transaction, so no partially-applied state is ever visible.

pub mod audit;
pub mod request;
pub mod status;

pub use audit::AuditSink;
pub use request::RequestRepository;
pub use status::StatusRepository;
