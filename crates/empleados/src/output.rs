//! Output formatting functions.

use empleados_core::empleado::{Empleado, LogRecord};
use empleados_core::storage::BatchDeleteOutcome;

use crate::cli::OutputFormat;

/// Format a value for output.
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

/// Format an employee for display.
pub fn format_empleado(empleado: &Empleado) -> String {
    let mut output = format!(
        "{} {}\n  ID: {}\n  Cedula: {}",
        empleado.nombres, empleado.apellidos, empleado.codigo, empleado.cedula
    );
    if let Some(cargo) = &empleado.cargo {
        output.push_str(&format!("\n  Cargo: {}", cargo));
    }
    if let Some(correo) = &empleado.correo {
        output.push_str(&format!("\n  Correo: {}", correo));
    }
    output
}

/// Format employees for display.
pub fn format_empleados(empleados: &[Empleado]) -> String {
    if empleados.is_empty() {
        return "No employees found.".to_string();
    }
    let mut output = format!("EMPLEADOS ({})\n", empleados.len());
    output.push_str(&"-".repeat(40));
    for empleado in empleados {
        output.push_str(&format!("\n{}", format_empleado(empleado)));
        output.push('\n');
    }
    output
}

/// Format a log entry for display.
pub fn format_log(log: &LogRecord) -> String {
    let mut output = format!(
        "{} {}\n  ID: {}",
        log.fecha.format("%Y-%m-%d %H:%M:%S"),
        log.accion.as_str(),
        log.codigo
    );
    if let Some(detalle) = &log.detalle {
        output.push_str(&format!("\n  Detalle: {}", detalle));
    }
    output
}

/// Format log entries for display.
pub fn format_logs(logs: &[LogRecord]) -> String {
    if logs.is_empty() {
        return "No logs found.".to_string();
    }
    let mut output = format!("LOGS ({})\n", logs.len());
    output.push_str(&"-".repeat(40));
    for log in logs {
        output.push_str(&format!("\n{}", format_log(log)));
        output.push('\n');
    }
    output
}

/// Format a batch delete result for display.
pub fn format_batch_delete(outcome: &BatchDeleteOutcome) -> String {
    let mut output = format!("Deleted {} log(s)", outcome.deleted);
    if !outcome.is_complete() {
        output.push_str(&format!(
            "\n{} log(s) could not be deleted:",
            outcome.unprocessed.len()
        ));
        for key in &outcome.unprocessed {
            output.push_str(&format!("\n  {}", key.sort_key()));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use empleados_core::empleado::{EntidadRef, LogAction, RecordKey};
    use uuid::Uuid;

    fn sample_empleado() -> Empleado {
        Empleado::new("1020", "Ana", "Lopez")
            .with_id(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
            .with_cargo("Analista")
    }

    #[test]
    fn test_format_empleado() {
        assert_eq!(
            format_empleado(&sample_empleado()),
            "Ana Lopez\n  ID: 550e8400-e29b-41d4-a716-446655440001\n  Cedula: 1020\n  Cargo: Analista"
        );
    }

    #[test]
    fn test_format_empty_lists() {
        assert_eq!(format_empleados(&[]), "No employees found.");
        assert_eq!(format_logs(&[]), "No logs found.");
    }

    #[test]
    fn test_format_log() {
        let log = LogRecord {
            codigo: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440009").unwrap(),
            entidad: EntidadRef {
                codigo: Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap(),
            },
            accion: LogAction::Crear,
            fecha: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            detalle: None,
        };

        assert_eq!(
            format_log(&log),
            "2024-01-15 10:30:00 CREAR\n  ID: 550e8400-e29b-41d4-a716-446655440009"
        );
    }

    #[test]
    fn test_format_batch_delete_lists_leftovers() {
        let outcome = BatchDeleteOutcome {
            deleted: 2,
            unprocessed: vec![RecordKey::log(
                Uuid::parse_str("550e8400-e29b-41d4-a716-446655440009").unwrap(),
            )],
        };

        assert_eq!(
            format_batch_delete(&outcome),
            "Deleted 2 log(s)\n1 log(s) could not be deleted:\n  550e8400-e29b-41d4-a716-446655440009"
        );
    }

    #[test]
    fn test_format_output_json() {
        let json = format_output(&sample_empleado(), OutputFormat::Json);
        assert!(json.contains("\"cedula\":\"1020\""));
    }
}
