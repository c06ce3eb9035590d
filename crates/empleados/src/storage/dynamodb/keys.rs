//! DynamoDB attribute names and key generation functions.
//!
//! Pure functions for the single-table layout. Employees and logs share one
//! table: the partition key holds a type marker, the sort key the record
//! identifier. All functions are sync and have no side effects.

use empleados_core::empleado::{RecordKey, EMPLEADO_MARKER, LOG_MARKER};

// ============================================================================
// Attribute names
// ============================================================================

/// Partition key attribute (record type marker).
pub const PARTITION_KEY: &str = "hk";
/// Sort key attribute (record identifier).
pub const SORT_KEY: &str = "sk";

pub const CEDULA: &str = "cedula";
pub const NOMBRES: &str = "nombres";
pub const APELLIDOS: &str = "apellidos";
pub const CARGO: &str = "cargo";
pub const CORREO: &str = "correo";
pub const BUSQUEDA: &str = "busqueda";

pub const ENTIDAD: &str = "entidad";
/// Field of the `entidad` map holding the owner identifier.
pub const ENTIDAD_CODIGO: &str = "codigo";
pub const ACCION: &str = "accion";
pub const FECHA: &str = "fecha";
pub const DETALLE: &str = "detalle";

/// Default name of the global secondary index on `cedula`.
pub const CEDULA_INDEX: &str = "cedula-index";

// ============================================================================
// Keys
// ============================================================================

/// Partition key for employees.
pub fn empleado_pk() -> &'static str {
    EMPLEADO_MARKER
}

/// Partition key for audit logs.
pub fn log_pk() -> &'static str {
    LOG_MARKER
}

/// Partition and sort key values for any record key.
pub fn record_keys(key: &RecordKey) -> (&'static str, String) {
    (key.partition_key(), key.sort_key())
}

/// Document path of the owner reference inside a log item.
///
/// Pattern: `entidad.codigo`
pub fn entidad_codigo_path() -> String {
    format!("{ENTIDAD}.{ENTIDAD_CODIGO}")
}
