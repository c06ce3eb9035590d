//! In-memory repository implementation.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use empleados_core::empleado::{matches, tokenize, Empleado, LogRecord};
use empleados_core::storage::{BatchDeleteOutcome, EmpleadoRepository, LogRepository, Result};

/// In-memory storage backend for testing.
///
/// Uses BTreeMaps wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    empleados: Arc<RwLock<BTreeMap<Uuid, Empleado>>>,
    logs: Arc<RwLock<BTreeMap<Uuid, LogRecord>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            empleados: Arc::new(RwLock::new(BTreeMap::new())),
            logs: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

#[async_trait]
impl EmpleadoRepository for InMemoryRepository {
    async fn find_all(&self) -> Result<Vec<Empleado>> {
        let empleados = self.empleados.read().await;
        Ok(empleados.values().cloned().collect())
    }

    async fn find_by_id(&self, codigo: Uuid) -> Result<Option<Empleado>> {
        let empleados = self.empleados.read().await;
        Ok(empleados.get(&codigo).cloned())
    }

    async fn save(&self, empleado: Empleado) -> Result<Empleado> {
        let mut empleados = self.empleados.write().await;
        empleados.insert(empleado.codigo, empleado.clone());
        Ok(empleado)
    }

    async fn delete_by_id(&self, codigo: Uuid) -> Result<()> {
        let mut empleados = self.empleados.write().await;
        empleados.remove(&codigo);
        Ok(())
    }

    async fn find_by_cedula(&self, cedula: &str) -> Result<Vec<Empleado>> {
        let empleados = self.empleados.read().await;
        Ok(empleados
            .values()
            .filter(|e| e.cedula == cedula)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &str) -> Result<Vec<Empleado>> {
        let terms = tokenize(query);
        let empleados = self.empleados.read().await;
        Ok(empleados
            .values()
            .filter(|e| matches(&e.busqueda, &terms))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LogRepository for InMemoryRepository {
    async fn find_logs_by_codigo(&self, codigo: Uuid) -> Result<Vec<LogRecord>> {
        let logs = self.logs.read().await;
        Ok(logs
            .values()
            .filter(|log| log.owner() == codigo)
            .cloned()
            .collect())
    }

    async fn append_log(&self, log: &LogRecord) -> Result<()> {
        let mut logs = self.logs.write().await;
        logs.insert(log.codigo, log.clone());
        Ok(())
    }

    async fn delete_all_logs(&self, logs: &[LogRecord]) -> Result<BatchDeleteOutcome> {
        let mut stored = self.logs.write().await;
        let mut seen = HashSet::new();
        let mut outcome = BatchDeleteOutcome::default();

        for log in logs {
            if seen.insert(log.codigo) {
                stored.remove(&log.codigo);
                outcome.deleted += 1;
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use empleados_core::empleado::LogAction;

    fn ana() -> Empleado {
        Empleado::new("1020", "Ana", "Lopez").with_cargo("Analista")
    }

    fn luis() -> Empleado {
        Empleado::new("3040", "Luis", "Gomez").with_cargo("Contador")
    }

    // ========================================================================
    // EmpleadoRepository tests
    // ========================================================================

    #[tokio::test]
    async fn test_save_and_find_by_id() {
        let repo = InMemoryRepository::new();
        let empleado = ana();

        let saved = repo.save(empleado.clone()).await.unwrap();
        assert_eq!(saved, empleado);

        let retrieved = repo.find_by_id(empleado.codigo).await.unwrap();
        assert_eq!(retrieved, Some(empleado));
    }

    #[tokio::test]
    async fn test_find_by_id_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo.find_by_id(Uuid::new_v4()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_existing() {
        let repo = InMemoryRepository::new();
        let mut empleado = ana();
        repo.save(empleado.clone()).await.unwrap();

        empleado.apellidos = "Martinez".to_string();
        empleado.refresh_busqueda();
        repo.save(empleado.clone()).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].apellidos, "Martinez");
    }

    #[tokio::test]
    async fn test_find_all_excludes_logs() {
        let repo = InMemoryRepository::new();
        let empleado = repo.save(ana()).await.unwrap();
        repo.append_log(&LogRecord::for_empleado(&empleado, LogAction::Crear))
            .await
            .unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all, vec![empleado]);
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let repo = InMemoryRepository::new();
        let empleado = repo.save(ana()).await.unwrap();

        repo.delete_by_id(empleado.codigo).await.unwrap();

        assert!(repo.find_by_id(empleado.codigo).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_by_id_nonexistent() {
        let repo = InMemoryRepository::new();
        let result = repo.delete_by_id(Uuid::new_v4()).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_find_by_cedula_exact_match() {
        let repo = InMemoryRepository::new();
        let empleado = repo.save(Empleado::new("123", "Ana", "Lopez")).await.unwrap();
        repo.save(Empleado::new("1234", "Luis", "Gomez")).await.unwrap();

        let found = repo.find_by_cedula("123").await.unwrap();
        assert_eq!(found, vec![empleado]);
    }

    #[tokio::test]
    async fn test_find_by_cedula_is_case_sensitive() {
        let repo = InMemoryRepository::new();
        repo.save(Empleado::new("AB123", "Ana", "Lopez")).await.unwrap();

        assert!(repo.find_by_cedula("ab123").await.unwrap().is_empty());
        assert_eq!(repo.find_by_cedula("AB123").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_cedula_returns_duplicates() {
        let repo = InMemoryRepository::new();
        repo.save(Empleado::new("123", "Ana", "Lopez")).await.unwrap();
        repo.save(Empleado::new("123", "Ana", "Lopez")).await.unwrap();

        assert_eq!(repo.find_by_cedula("123").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_search_requires_every_term() {
        let repo = InMemoryRepository::new();
        let ana = repo.save(ana()).await.unwrap();
        repo.save(Empleado::new("5060", "Ana", "Gomez")).await.unwrap();
        repo.save(luis()).await.unwrap();

        let found = repo.search("Ana + Lopez").await.unwrap();
        assert_eq!(found, vec![ana]);
    }

    #[tokio::test]
    async fn test_search_matches_substrings_case_insensitively() {
        let repo = InMemoryRepository::new();
        let luis = repo.save(luis()).await.unwrap();
        repo.save(ana()).await.unwrap();

        let found = repo.search("CONTA").await.unwrap();
        assert_eq!(found, vec![luis]);
    }

    #[tokio::test]
    async fn test_search_empty_query_returns_all() {
        let repo = InMemoryRepository::new();
        repo.save(ana()).await.unwrap();
        repo.save(luis()).await.unwrap();

        assert_eq!(repo.search("").await.unwrap().len(), 2);
        assert_eq!(repo.search("  +  ").await.unwrap().len(), 2);
        assert_eq!(
            repo.search("").await.unwrap(),
            repo.find_all().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_search_no_matches() {
        let repo = InMemoryRepository::new();
        repo.save(ana()).await.unwrap();

        assert!(repo.search("zapata").await.unwrap().is_empty());
    }

    // ========================================================================
    // LogRepository tests
    // ========================================================================

    #[tokio::test]
    async fn test_find_logs_by_codigo_filters_owner() {
        let repo = InMemoryRepository::new();
        let ana = ana();
        let luis = luis();

        let created = LogRecord::for_empleado(&ana, LogAction::Crear);
        let updated = LogRecord::for_empleado(&ana, LogAction::Actualizar);
        let other = LogRecord::for_empleado(&luis, LogAction::Crear);
        for log in [&created, &updated, &other] {
            repo.append_log(log).await.unwrap();
        }

        let logs = repo.find_logs_by_codigo(ana.codigo).await.unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|log| log.owner() == ana.codigo));
        assert!(logs.contains(&created));
        assert!(logs.contains(&updated));
    }

    #[tokio::test]
    async fn test_find_logs_by_codigo_unknown_owner() {
        let repo = InMemoryRepository::new();
        let logs = repo.find_logs_by_codigo(Uuid::new_v4()).await.unwrap();
        assert!(logs.is_empty());
    }

    #[tokio::test]
    async fn test_delete_all_logs() {
        let repo = InMemoryRepository::new();
        let ana = ana();
        let luis = luis();

        let first = LogRecord::for_empleado(&ana, LogAction::Crear);
        let second = LogRecord::for_empleado(&ana, LogAction::Eliminar);
        let other = LogRecord::for_empleado(&luis, LogAction::Crear);
        for log in [&first, &second, &other] {
            repo.append_log(log).await.unwrap();
        }

        let owned = repo.find_logs_by_codigo(ana.codigo).await.unwrap();
        let outcome = repo.delete_all_logs(&owned).await.unwrap();

        assert_eq!(outcome.deleted, 2);
        assert!(outcome.is_complete());
        assert!(repo.find_logs_by_codigo(ana.codigo).await.unwrap().is_empty());
        assert_eq!(
            repo.find_logs_by_codigo(luis.codigo).await.unwrap(),
            vec![other]
        );
    }

    #[tokio::test]
    async fn test_delete_all_logs_deduplicates_keys() {
        let repo = InMemoryRepository::new();
        let log = LogRecord::new(Uuid::new_v4(), LogAction::Crear);
        repo.append_log(&log).await.unwrap();

        let outcome = repo
            .delete_all_logs(&[log.clone(), log.clone()])
            .await
            .unwrap();

        assert_eq!(outcome.deleted, 1);
    }

    #[tokio::test]
    async fn test_delete_all_logs_empty_input() {
        let repo = InMemoryRepository::new();
        let outcome = repo.delete_all_logs(&[]).await.unwrap();
        assert_eq!(outcome, BatchDeleteOutcome::default());
    }
}
