use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::search::searchable_text;

/// Partition key marker shared by every employee record.
pub const EMPLEADO_MARKER: &str = "EMPLEADO";

/// Partition key marker shared by every audit log record.
pub const LOG_MARKER: &str = "LOG";

/// The record category encoded in the partition key.
///
/// Employees and logs live in the same physical table; the marker alone
/// decides which one a stored item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordKind {
    Empleado,
    Log,
}

impl RecordKind {
    /// Returns the partition key value for this kind.
    pub fn marker(&self) -> &'static str {
        match self {
            RecordKind::Empleado => EMPLEADO_MARKER,
            RecordKind::Log => LOG_MARKER,
        }
    }

    /// Parses a partition key value back into a kind.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            EMPLEADO_MARKER => Some(RecordKind::Empleado),
            LOG_MARKER => Some(RecordKind::Log),
            _ => None,
        }
    }
}

/// Key-only reference to a stored record.
///
/// Deletion targets are described with this type instead of a half-filled
/// record, so a key can never be written back as an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub kind: RecordKind,
    pub codigo: Uuid,
}

impl RecordKey {
    /// Key of an employee record.
    pub fn empleado(codigo: Uuid) -> Self {
        Self {
            kind: RecordKind::Empleado,
            codigo,
        }
    }

    /// Key of a log record.
    pub fn log(codigo: Uuid) -> Self {
        Self {
            kind: RecordKind::Log,
            codigo,
        }
    }

    /// Partition key value.
    pub fn partition_key(&self) -> &'static str {
        self.kind.marker()
    }

    /// Sort key value (the identifier as text).
    pub fn sort_key(&self) -> String {
        self.codigo.to_string()
    }
}

/// An employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empleado {
    pub codigo: Uuid,
    /// National identity number. Indexed, assumed unique.
    pub cedula: String,
    pub nombres: String,
    pub apellidos: String,
    pub cargo: Option<String>,
    pub correo: Option<String>,
    /// Lowercase blob used by free-text search.
    pub busqueda: String,
}

impl Empleado {
    /// Creates a new employee with a random identifier.
    pub fn new(
        cedula: impl Into<String>,
        nombres: impl Into<String>,
        apellidos: impl Into<String>,
    ) -> Self {
        let mut empleado = Self {
            codigo: Uuid::new_v4(),
            cedula: cedula.into(),
            nombres: nombres.into(),
            apellidos: apellidos.into(),
            cargo: None,
            correo: None,
            busqueda: String::new(),
        };
        empleado.refresh_busqueda();
        empleado
    }

    /// Sets a specific identifier (useful for updates and tests).
    pub fn with_id(mut self, codigo: Uuid) -> Self {
        self.codigo = codigo;
        self
    }

    /// Sets the job title.
    pub fn with_cargo(mut self, cargo: impl Into<String>) -> Self {
        self.cargo = Some(cargo.into());
        self.refresh_busqueda();
        self
    }

    /// Sets the email address.
    pub fn with_correo(mut self, correo: impl Into<String>) -> Self {
        self.correo = Some(correo.into());
        self.refresh_busqueda();
        self
    }

    /// Recomputes `busqueda` from the current field values.
    ///
    /// Call after mutating fields directly; `save` stores `busqueda` as is.
    pub fn refresh_busqueda(&mut self) {
        self.busqueda = searchable_text([
            Some(self.cedula.as_str()),
            Some(self.nombres.as_str()),
            Some(self.apellidos.as_str()),
            self.cargo.as_deref(),
            self.correo.as_deref(),
        ]);
    }

    /// Storage key of this employee.
    pub fn key(&self) -> RecordKey {
        RecordKey::empleado(self.codigo)
    }
}

/// Reference from a log record to the entity it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntidadRef {
    pub codigo: Uuid,
}

/// What happened to the referenced entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogAction {
    Crear,
    Actualizar,
    Eliminar,
}

impl LogAction {
    /// Stored representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogAction::Crear => "CREAR",
            LogAction::Actualizar => "ACTUALIZAR",
            LogAction::Eliminar => "ELIMINAR",
        }
    }
}

/// An audit log entry. Immutable once written; only deletion is supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub codigo: Uuid,
    pub entidad: EntidadRef,
    pub accion: LogAction,
    pub fecha: DateTime<Utc>,
    pub detalle: Option<String>,
}

impl LogRecord {
    /// Creates a log entry for the entity `owner`, stamped now.
    pub fn new(owner: Uuid, accion: LogAction) -> Self {
        Self {
            codigo: Uuid::new_v4(),
            entidad: EntidadRef { codigo: owner },
            accion,
            fecha: Utc::now(),
            detalle: None,
        }
    }

    /// Creates a log entry describing a change to `empleado`.
    pub fn for_empleado(empleado: &Empleado, accion: LogAction) -> Self {
        Self::new(empleado.codigo, accion)
    }

    /// Attaches free-form detail text.
    pub fn with_detalle(mut self, detalle: impl Into<String>) -> Self {
        self.detalle = Some(detalle.into());
        self
    }

    /// Identifier of the owning entity.
    pub fn owner(&self) -> Uuid {
        self.entidad.codigo
    }

    /// Storage key of this log entry.
    pub fn key(&self) -> RecordKey {
        RecordKey::log(self.codigo)
    }
}
