//! DynamoDB repository implementation.
//!
//! Implements the repository traits from `empleados_core::storage` using DynamoDB.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::operation::query::builders::QueryFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, WriteRequest};
use aws_sdk_dynamodb::Client;
use uuid::Uuid;

use empleados_core::empleado::{tokenize, Empleado, LogRecord, RecordKey};
use empleados_core::storage::{
    BatchDeleteOutcome, EmpleadoRepository, LogRepository, RepositoryError, Result,
};

use crate::config::Config;

use super::conversions::{
    empleado_to_item, item_to_empleado, item_to_key, item_to_log, key_to_item, log_to_item,
};
use super::error::{
    is_batch_write_throttled, map_batch_write_item_error, map_delete_item_error,
    map_get_item_error, map_put_item_error, map_query_error,
};
use super::expressions::{
    find_all_plan, find_by_cedula_plan, logs_by_owner_plan, search_plan, QueryPlan,
};
use super::keys;

/// Maximum number of requests in a single BatchWriteItem call.
const BATCH_WRITE_LIMIT: usize = 25;

/// DynamoDB-based repository implementation.
///
/// Provides async access to the single table holding employees and logs.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    cedula_index: String,
    batch_delete_max_retries: u32,
    batch_delete_backoff: Duration,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            cedula_index: keys::CEDULA_INDEX.to_string(),
            batch_delete_max_retries: 3,
            batch_delete_backoff: Duration::from_millis(50),
        }
    }

    /// Creates a new repository from configuration.
    ///
    /// Uses the AWS SDK default credential chain. `endpoint_url`, when set,
    /// points the client at a local DynamoDB.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), config.table_name.clone())
            .with_cedula_index(config.cedula_index.clone())
            .with_batch_delete_retries(
                config.batch_delete_max_retries,
                config.batch_delete_backoff(),
            )
    }

    /// Overrides the name of the `cedula` index.
    pub fn with_cedula_index(mut self, index_name: impl Into<String>) -> Self {
        self.cedula_index = index_name.into();
        self
    }

    /// Overrides the retry policy for unprocessed batch-delete keys.
    pub fn with_batch_delete_retries(mut self, max_retries: u32, backoff: Duration) -> Self {
        self.batch_delete_max_retries = max_retries;
        self.batch_delete_backoff = backoff;
        self
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Builds a Query request from a plan.
    fn query_request(&self, plan: &QueryPlan) -> QueryFluentBuilder {
        let mut request = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(&plan.key_condition);

        if let Some(index_name) = &plan.index_name {
            request = request.index_name(index_name);
        }
        if let Some(filter) = &plan.filter {
            request = request.filter_expression(filter);
        }
        if let Some(consistent_read) = plan.consistent_read {
            request = request.consistent_read(consistent_read);
        }
        for (placeholder, value) in &plan.values {
            request = request.expression_attribute_values(
                placeholder,
                AttributeValue::S(value.clone()),
            );
        }

        request
    }

    /// Runs a plan and collects the items of every result page.
    ///
    /// Filters apply after each page is read, so a page may come back empty
    /// while later pages still hold matches.
    async fn query_all(&self, plan: &QueryPlan) -> Result<Vec<HashMap<String, AttributeValue>>> {
        let request = self.query_request(plan);
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let output = request
                .clone()
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            items.extend(output.items.unwrap_or_default());

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Deletes up to [`BATCH_WRITE_LIMIT`] keys, resubmitting unprocessed
    /// requests with exponential backoff. Returns the keys left over.
    ///
    /// A throttled call leaves the whole pending set unprocessed and goes
    /// through the same retry loop.
    async fn delete_chunk(&self, chunk: &[RecordKey]) -> Result<Vec<RecordKey>> {
        let mut pending = chunk
            .iter()
            .map(delete_request)
            .collect::<Result<Vec<_>>>()?;
        let mut attempt = 0;

        loop {
            let result = self
                .client
                .batch_write_item()
                .request_items(&self.table_name, pending.clone())
                .send()
                .await;

            let leftover = match result {
                Ok(output) => output
                    .unprocessed_items
                    .and_then(|mut unprocessed| unprocessed.remove(&self.table_name))
                    .unwrap_or_default(),
                Err(err) if is_batch_write_throttled(&err) => {
                    tracing::debug!(pending = pending.len(), "Batch delete throttled");
                    pending
                }
                Err(err) => return Err(map_batch_write_item_error(err)),
            };

            if leftover.is_empty() {
                return Ok(Vec::new());
            }

            if attempt >= self.batch_delete_max_retries {
                return Ok(leftover
                    .iter()
                    .filter_map(|request| request.delete_request())
                    .filter_map(|delete| item_to_key(delete.key()).ok())
                    .collect());
            }

            let delay = self.batch_delete_backoff * 2u32.saturating_pow(attempt);
            tracing::debug!(
                unprocessed = leftover.len(),
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "Resubmitting unprocessed batch deletes"
            );
            tokio::time::sleep(delay).await;

            attempt += 1;
            pending = leftover;
        }
    }
}

/// Build a BatchWriteItem delete request for a key.
fn delete_request(key: &RecordKey) -> Result<WriteRequest> {
    let delete = DeleteRequest::builder()
        .set_key(Some(key_to_item(key)))
        .build()
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid delete request: {}", e)))?;

    Ok(WriteRequest::builder().delete_request(delete).build())
}

// ============================================================================
// EmpleadoRepository implementation
// ============================================================================

#[async_trait]
impl EmpleadoRepository for DynamoDbRepository {
    async fn find_all(&self) -> Result<Vec<Empleado>> {
        let items = self.query_all(&find_all_plan()).await?;
        items.iter().map(item_to_empleado).collect()
    }

    async fn find_by_id(&self, codigo: Uuid) -> Result<Option<Empleado>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_item(&RecordKey::empleado(codigo))))
            .send()
            .await
            .map_err(|e| map_get_item_error(e, "Empleado", codigo.to_string()))?;

        match result.item {
            Some(item) => Ok(Some(item_to_empleado(&item)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, empleado: Empleado) -> Result<Empleado> {
        let item = empleado_to_item(&empleado);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "Empleado", empleado.codigo.to_string()))?;

        tracing::debug!(codigo = %empleado.codigo, "Empleado saved");
        Ok(empleado)
    }

    async fn delete_by_id(&self, codigo: Uuid) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(key_to_item(&RecordKey::empleado(codigo))))
            .send()
            .await
            .map_err(|e| map_delete_item_error(e, "Empleado", codigo.to_string()))?;

        tracing::debug!(%codigo, "Empleado deleted");
        Ok(())
    }

    async fn find_by_cedula(&self, cedula: &str) -> Result<Vec<Empleado>> {
        let plan = find_by_cedula_plan(&self.cedula_index, cedula);
        let items = self.query_all(&plan).await?;
        items.iter().map(item_to_empleado).collect()
    }

    async fn search(&self, query: &str) -> Result<Vec<Empleado>> {
        let terms = tokenize(query);
        tracing::trace!(?terms, "Searching empleados");

        let items = self.query_all(&search_plan(&terms)).await?;
        items.iter().map(item_to_empleado).collect()
    }
}

// ============================================================================
// LogRepository implementation
// ============================================================================

#[async_trait]
impl LogRepository for DynamoDbRepository {
    async fn find_logs_by_codigo(&self, codigo: Uuid) -> Result<Vec<LogRecord>> {
        let items = self.query_all(&logs_by_owner_plan(codigo)).await?;
        items.iter().map(item_to_log).collect()
    }

    async fn append_log(&self, log: &LogRecord) -> Result<()> {
        let item = log_to_item(log);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| map_put_item_error(e, "Log", log.codigo.to_string()))?;

        Ok(())
    }

    async fn delete_all_logs(&self, logs: &[LogRecord]) -> Result<BatchDeleteOutcome> {
        // BatchWriteItem rejects duplicate keys within one request
        let mut seen = HashSet::new();
        let keys: Vec<RecordKey> = logs
            .iter()
            .map(LogRecord::key)
            .filter(|key| seen.insert(*key))
            .collect();

        let mut outcome = BatchDeleteOutcome::default();
        for chunk in keys.chunks(BATCH_WRITE_LIMIT) {
            let leftover = self.delete_chunk(chunk).await?;
            outcome.deleted += chunk.len() - leftover.len();
            outcome.unprocessed.extend(leftover);
        }

        if outcome.is_complete() {
            tracing::debug!(deleted = outcome.deleted, "Logs deleted");
        } else {
            tracing::warn!(
                deleted = outcome.deleted,
                unprocessed = outcome.unprocessed.len(),
                "Batch delete left unprocessed logs"
            );
        }

        Ok(outcome)
    }
}
