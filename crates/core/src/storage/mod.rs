mod error;
mod traits;
mod types;

pub use error::{RepositoryError, Result};
pub use traits::{EmpleadoRepository, LogRepository};
pub use types::BatchDeleteOutcome;
