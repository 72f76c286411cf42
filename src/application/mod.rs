// Application layer - use cases and orchestration.
// The service owns validation of writes; all derived figures come from the
// pure functions in `domain`.

pub mod error;
pub mod reporting;
pub mod service;

pub use error::*;
pub use reporting::*;
pub use service::*;
