//! CRUD facade over the store client.
//!
//! Thin orchestration: every operation resolves the record into
//! [`TableMeta`](crate::TableMeta), issues one store call (or one per batch
//! chunk) and decodes the response. No retries, no caching; store failures
//! propagate untranslated.

use aws_sdk_dynamodb::types::{DeleteRequest, KeysAndAttributes, PutRequest, WriteRequest};
use aws_sdk_dynamodb::Client;

use dynamap_core::{Error, Record, Result};

use crate::batch::{send_in_chunks, BATCH_GET_LIMIT, BATCH_WRITE_LIMIT};
use crate::codec::decode_item;
use crate::config::StoreConfig;
use crate::error::map_store_error;
use crate::resolver::{resolve, ResolveMode};

/// DynamoDB-backed repository for [`Record`] types.
///
/// Holds only the SDK client; table names and key layout come from each
/// record type's schema. Operations taking `&mut` mutate the record only to
/// write generated keys back in write mode.
#[derive(Debug, Clone)]
pub struct DynamoRepository {
    client: Client,
}

impl DynamoRepository {
    /// Creates a repository with the given store client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a repository from environment configuration.
    ///
    /// Uses the SDK default credential chain, honoring `AWS_ENDPOINT_URL`
    /// and `AWS_REGION` (see [`StoreConfig`]).
    pub async fn from_env() -> Self {
        Self::new(StoreConfig::default().connect().await)
    }

    /// The underlying store client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Gets one item by the template's primary key.
    pub async fn get<R: Record>(&self, template: &mut R) -> Result<Option<R>> {
        let meta = resolve(template, ResolveMode::Read)?;
        tracing::debug!(table = meta.table_name, "getting item");

        let output = self
            .client
            .get_item()
            .table_name(meta.table_name)
            .set_key(Some(meta.key()))
            .send()
            .await
            .map_err(|e| map_store_error("GetItem", e))?;

        match output.item {
            Some(item) if !item.is_empty() => Ok(Some(decode_item(&item)?)),
            _ => Ok(None),
        }
    }

    /// Queries items matching the template's hash key exactly, narrowed to
    /// range keys starting with the template's range value when one
    /// resolves.
    pub async fn query<R: Record>(&self, template: &mut R) -> Result<Vec<R>> {
        let meta = resolve(template, ResolveMode::Read)?;
        tracing::debug!(
            table = meta.table_name,
            range_prefix = meta.range_key.is_some(),
            "querying items"
        );

        let mut request = self
            .client
            .query()
            .table_name(meta.table_name)
            .expression_attribute_names("#hk", meta.hash_key.name)
            .expression_attribute_values(":hv", meta.hash_key.value.clone());
        let condition = match &meta.range_key {
            Some(range) => {
                request = request
                    .expression_attribute_names("#rk", range.name)
                    .expression_attribute_values(":rv", range.value.clone());
                "#hk = :hv AND begins_with(#rk, :rv)"
            }
            None => "#hk = :hv",
        };

        let output = request
            .key_condition_expression(condition)
            .send()
            .await
            .map_err(|e| map_store_error("Query", e))?;

        let items = output.items.unwrap_or_default();
        items.iter().map(|item| decode_item(item)).collect()
    }

    /// Writes the full item, replacing any stored version.
    ///
    /// Empty key fields with a generation strategy are assigned here and
    /// visible on the record afterwards. An ordinary field that encodes to
    /// nothing is omitted from the payload, so the put clears that
    /// attribute on the stored item.
    pub async fn put<R: Record>(&self, record: &mut R) -> Result<()> {
        let meta = resolve(record, ResolveMode::Write)?;
        tracing::debug!(table = meta.table_name, "putting item");

        self.client
            .put_item()
            .table_name(meta.table_name)
            .set_item(Some(meta.attributes))
            .send()
            .await
            .map_err(|e| map_store_error("PutItem", e))?;

        Ok(())
    }

    /// Replaces the updateable attributes of the stored item.
    pub async fn update<R: Record>(&self, record: &mut R) -> Result<()> {
        let meta = resolve(record, ResolveMode::Update)?;
        tracing::debug!(
            table = meta.table_name,
            updates = meta.updates.len(),
            "updating item"
        );

        self.client
            .update_item()
            .table_name(meta.table_name)
            .set_key(Some(meta.key()))
            .set_attribute_updates(Some(meta.updates))
            .send()
            .await
            .map_err(|e| map_store_error("UpdateItem", e))?;

        Ok(())
    }

    /// Deletes the item with the record's primary key.
    pub async fn delete<R: Record>(&self, record: &mut R) -> Result<()> {
        let meta = resolve(record, ResolveMode::Update)?;
        tracing::debug!(table = meta.table_name, "deleting item");

        self.client
            .delete_item()
            .table_name(meta.table_name)
            .set_key(Some(meta.key()))
            .send()
            .await
            .map_err(|e| map_store_error("DeleteItem", e))?;

        Ok(())
    }

    /// Gets many items by the templates' primary keys, batched in chunks of
    /// at most 100 keys.
    ///
    /// Result order is whatever the store returns per chunk, concatenated
    /// in chunk order; it does not necessarily match request order.
    pub async fn batch_get<R: Record>(&self, mut templates: Vec<R>) -> Result<Vec<R>> {
        let mut table_name = None;
        let mut keys = Vec::with_capacity(templates.len());
        for template in &mut templates {
            let meta = resolve(template, ResolveMode::Read)?;
            table_name = Some(meta.table_name);
            keys.push(meta.key());
        }
        let Some(table_name) = table_name else {
            return Ok(Vec::new());
        };
        tracing::debug!(table = table_name, keys = keys.len(), "batch getting items");

        let items = send_in_chunks(&keys, BATCH_GET_LIMIT, |chunk| {
            let client = self.client.clone();
            async move {
                let request_keys = KeysAndAttributes::builder()
                    .set_keys(Some(chunk))
                    .build()
                    .map_err(|e| Error::store("BatchGetItem", e))?;
                let output = client
                    .batch_get_item()
                    .request_items(table_name, request_keys)
                    .send()
                    .await
                    .map_err(|e| map_store_error("BatchGetItem", e))?;
                let mut responses = output.responses.unwrap_or_default();
                Ok(responses.remove(table_name).unwrap_or_default())
            }
        })
        .await?;

        items.iter().map(|item| decode_item(item)).collect()
    }

    /// Writes many items, batched in chunks of at most 25 operations.
    ///
    /// Write acknowledgement is fire-and-forget at this layer; unprocessed
    /// items are not retried here.
    pub async fn batch_put<R: Record>(&self, records: &mut [R]) -> Result<()> {
        let mut table_name = None;
        let mut requests = Vec::with_capacity(records.len());
        for record in records.iter_mut() {
            let meta = resolve(record, ResolveMode::Write)?;
            table_name = Some(meta.table_name);
            let put = PutRequest::builder()
                .set_item(Some(meta.attributes))
                .build()
                .map_err(|e| Error::store("BatchWriteItem", e))?;
            requests.push(WriteRequest::builder().put_request(put).build());
        }
        let Some(table_name) = table_name else {
            return Ok(());
        };
        self.batch_write(table_name, requests).await
    }

    /// Deletes many items by primary key, batched in chunks of at most 25
    /// operations.
    pub async fn batch_delete<R: Record>(&self, templates: &mut [R]) -> Result<()> {
        let mut table_name = None;
        let mut requests = Vec::with_capacity(templates.len());
        for template in templates.iter_mut() {
            let meta = resolve(template, ResolveMode::Update)?;
            table_name = Some(meta.table_name);
            let delete = DeleteRequest::builder()
                .set_key(Some(meta.key()))
                .build()
                .map_err(|e| Error::store("BatchWriteItem", e))?;
            requests.push(WriteRequest::builder().delete_request(delete).build());
        }
        let Some(table_name) = table_name else {
            return Ok(());
        };
        self.batch_write(table_name, requests).await
    }

    async fn batch_write(
        &self,
        table_name: &'static str,
        requests: Vec<WriteRequest>,
    ) -> Result<()> {
        tracing::debug!(
            table = table_name,
            writes = requests.len(),
            "batch writing items"
        );

        send_in_chunks(&requests, BATCH_WRITE_LIMIT, |chunk| {
            let client = self.client.clone();
            async move {
                client
                    .batch_write_item()
                    .request_items(table_name, chunk)
                    .send()
                    .await
                    .map_err(|e| map_store_error("BatchWriteItem", e))?;
                Ok(Vec::<()>::new())
            }
        })
        .await?;

        Ok(())
    }
}
