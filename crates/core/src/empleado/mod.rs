mod search;
mod types;

pub use search::{matches, searchable_text, tokenize};
pub use types::{
    Empleado, EntidadRef, LogAction, LogRecord, RecordKey, RecordKind, EMPLEADO_MARKER, LOG_MARKER,
};
