use async_trait::async_trait;
use uuid::Uuid;

use crate::empleado::{Empleado, LogRecord};

use super::{BatchDeleteOutcome, Result};

/// Repository for employee records.
#[async_trait]
pub trait EmpleadoRepository: Send + Sync {
    /// Lists every employee, in store order.
    async fn find_all(&self) -> Result<Vec<Empleado>>;

    /// Gets an employee by identifier.
    async fn find_by_id(&self, codigo: Uuid) -> Result<Option<Empleado>>;

    /// Creates or overwrites an employee and hands it back.
    async fn save(&self, empleado: Empleado) -> Result<Empleado>;

    /// Deletes an employee. Missing identifiers are not an error.
    async fn delete_by_id(&self, codigo: Uuid) -> Result<()>;

    /// Gets the employees with the given national identity number.
    ///
    /// Served from an eventually consistent index; a just-saved employee may
    /// not be visible yet. The index must project every attribute (`ALL`),
    /// otherwise each match fails with `InvalidData`.
    async fn find_by_cedula(&self, cedula: &str) -> Result<Vec<Empleado>>;

    /// Free-text search over `busqueda`, see [`crate::empleado::tokenize`].
    ///
    /// A query without terms returns every employee.
    async fn search(&self, query: &str) -> Result<Vec<Empleado>>;
}

/// Repository for audit log records.
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Gets the logs whose owner reference equals `codigo`.
    async fn find_logs_by_codigo(&self, codigo: Uuid) -> Result<Vec<LogRecord>>;

    /// Writes a log entry.
    async fn append_log(&self, log: &LogRecord) -> Result<()>;

    /// Deletes the given logs on a best-effort basis.
    ///
    /// Keys the store keeps rejecting are handed back in
    /// [`BatchDeleteOutcome::unprocessed`]. Any other store failure aborts
    /// with an error, and logs already deleted stay deleted.
    async fn delete_all_logs(&self, logs: &[LogRecord]) -> Result<BatchDeleteOutcome>;
}
