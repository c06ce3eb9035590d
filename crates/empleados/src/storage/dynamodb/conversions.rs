//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use empleados_core::empleado::{Empleado, EntidadRef, LogAction, LogRecord, RecordKey, RecordKind};
use empleados_core::storage::RepositoryError;
use uuid::Uuid;

use super::keys;

type Item = HashMap<String, AttributeValue>;

// ============================================================================
// Key conversions
// ============================================================================

/// Convert a RecordKey to a key-only DynamoDB attribute map.
pub fn key_to_item(key: &RecordKey) -> Item {
    let (pk, sk) = keys::record_keys(key);

    let mut item = HashMap::new();
    item.insert(
        keys::PARTITION_KEY.to_string(),
        AttributeValue::S(pk.to_string()),
    );
    item.insert(keys::SORT_KEY.to_string(), AttributeValue::S(sk));
    item
}

/// Read the RecordKey of any stored item.
pub fn item_to_key(item: &Item) -> Result<RecordKey, RepositoryError> {
    let kind = get_kind(item)?;
    let codigo = get_uuid(item, keys::SORT_KEY)?;
    Ok(RecordKey { kind, codigo })
}

// ============================================================================
// Empleado conversions
// ============================================================================

/// Convert an Empleado to DynamoDB item.
pub fn empleado_to_item(empleado: &Empleado) -> Item {
    let mut item = key_to_item(&empleado.key());

    item.insert(
        keys::CEDULA.to_string(),
        AttributeValue::S(empleado.cedula.clone()),
    );
    item.insert(
        keys::NOMBRES.to_string(),
        AttributeValue::S(empleado.nombres.clone()),
    );
    item.insert(
        keys::APELLIDOS.to_string(),
        AttributeValue::S(empleado.apellidos.clone()),
    );
    if let Some(cargo) = &empleado.cargo {
        item.insert(keys::CARGO.to_string(), AttributeValue::S(cargo.clone()));
    }
    if let Some(correo) = &empleado.correo {
        item.insert(keys::CORREO.to_string(), AttributeValue::S(correo.clone()));
    }
    item.insert(
        keys::BUSQUEDA.to_string(),
        AttributeValue::S(empleado.busqueda.clone()),
    );

    item
}

/// Convert a DynamoDB item to Empleado.
///
/// Items stored under any other partition marker are rejected.
pub fn item_to_empleado(item: &Item) -> Result<Empleado, RepositoryError> {
    expect_kind(item, RecordKind::Empleado)?;

    Ok(Empleado {
        codigo: get_uuid(item, keys::SORT_KEY)?,
        cedula: get_string(item, keys::CEDULA)?,
        nombres: get_string(item, keys::NOMBRES)?,
        apellidos: get_string(item, keys::APELLIDOS)?,
        cargo: get_optional_string(item, keys::CARGO),
        correo: get_optional_string(item, keys::CORREO),
        busqueda: get_optional_string(item, keys::BUSQUEDA).unwrap_or_default(),
    })
}

// ============================================================================
// Log conversions
// ============================================================================

/// Convert a LogRecord to DynamoDB item.
///
/// The owner reference is stored as a map so filters can address
/// `entidad.codigo`.
pub fn log_to_item(log: &LogRecord) -> Item {
    let mut item = key_to_item(&log.key());

    let mut entidad = HashMap::new();
    entidad.insert(
        keys::ENTIDAD_CODIGO.to_string(),
        AttributeValue::S(log.entidad.codigo.to_string()),
    );
    item.insert(keys::ENTIDAD.to_string(), AttributeValue::M(entidad));

    item.insert(
        keys::ACCION.to_string(),
        AttributeValue::S(log.accion.as_str().to_string()),
    );
    item.insert(
        keys::FECHA.to_string(),
        AttributeValue::S(log.fecha.to_rfc3339()),
    );
    if let Some(detalle) = &log.detalle {
        item.insert(keys::DETALLE.to_string(), AttributeValue::S(detalle.clone()));
    }

    item
}

/// Convert a DynamoDB item to LogRecord.
pub fn item_to_log(item: &Item) -> Result<LogRecord, RepositoryError> {
    expect_kind(item, RecordKind::Log)?;

    let entidad = item
        .get(keys::ENTIDAD)
        .and_then(|v| v.as_m().ok())
        .ok_or_else(|| {
            RepositoryError::InvalidData(format!("Missing or invalid field: {}", keys::ENTIDAD))
        })?;

    Ok(LogRecord {
        codigo: get_uuid(item, keys::SORT_KEY)?,
        entidad: EntidadRef {
            codigo: get_uuid(entidad, keys::ENTIDAD_CODIGO)?,
        },
        accion: parse_accion(&get_string(item, keys::ACCION)?)?,
        fecha: get_datetime(item, keys::FECHA)?,
        detalle: get_optional_string(item, keys::DETALLE),
    })
}

// ============================================================================
// Action conversions
// ============================================================================

/// Parse LogAction from string.
pub fn parse_accion(s: &str) -> Result<LogAction, RepositoryError> {
    match s.to_uppercase().as_str() {
        "CREAR" => Ok(LogAction::Crear),
        "ACTUALIZAR" => Ok(LogAction::Actualizar),
        "ELIMINAR" => Ok(LogAction::Eliminar),
        _ => Err(RepositoryError::InvalidData(format!(
            "Unknown log action: {}",
            s
        ))),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Read the record kind from the partition key.
fn get_kind(item: &Item) -> Result<RecordKind, RepositoryError> {
    let marker = get_string(item, keys::PARTITION_KEY)?;
    RecordKind::from_marker(&marker).ok_or_else(|| {
        RepositoryError::InvalidData(format!("Unknown partition marker: {}", marker))
    })
}

/// Fail unless the item belongs to the `expected` partition.
fn expect_kind(item: &Item, expected: RecordKind) -> Result<(), RepositoryError> {
    let kind = get_kind(item)?;
    if kind != expected {
        return Err(RepositoryError::InvalidData(format!(
            "Expected {} record, found {}",
            expected.marker(),
            kind.marker()
        )));
    }
    Ok(())
}

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get an optional string attribute.
fn get_optional_string(item: &Item, key: &str) -> Option<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
}

/// Get a required UUID attribute.
fn get_uuid(item: &Item, key: &str) -> Result<Uuid, RepositoryError> {
    let s = get_string(item, key)?;
    Uuid::parse_str(&s)
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid UUID {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(item: &Item, key: &str) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}
