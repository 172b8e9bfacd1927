use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, warn};

use super::{OrderFilter, OrderStore};
use crate::analytics::Order;
use crate::errors::{AnalyticsError, Result};

/// JSON 文件订单存储
///
/// 文件内容为订单数组（数据库导出格式，`_id` 与 `id` 均可）。
/// 每次查询都重新读取文件，保证看到最新导出。
pub struct JsonFileOrderStore {
    file_path: PathBuf,
}

impl JsonFileOrderStore {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn load_from_file(&self) -> Result<Vec<Order>> {
        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| {
                AnalyticsError::file_operation(format!(
                    "Failed to read orders file '{}': {}",
                    self.file_path.display(),
                    e
                ))
            })?;

        let records: Vec<Value> = serde_json::from_str(&content).inspect_err(|e| {
            error!(
                "Failed to parse orders file '{}': {}",
                self.file_path.display(),
                e
            );
        })?;

        // 单条坏记录只跳过自身
        let mut orders = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if !record.is_object() {
                warn!(
                    "Skipping order #{} in '{}': not a JSON object",
                    index,
                    self.file_path.display()
                );
                continue;
            }
            match serde_json::from_value::<Order>(record) {
                Ok(order) => orders.push(order),
                Err(e) => warn!(
                    "Skipping order #{} in '{}': {}",
                    index,
                    self.file_path.display(),
                    e
                ),
            }
        }
        Ok(orders)
    }
}

#[async_trait]
impl OrderStore for JsonFileOrderStore {
    async fn find(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let orders = self.load_from_file().await?;
        let total = orders.len();

        let matched: Vec<Order> = orders
            .into_iter()
            .filter(|order| filter.matches(order))
            .collect();

        debug!(
            "JsonFileOrderStore: loaded {} orders from {}, {} matched",
            total,
            self.file_path.display(),
            matched.len()
        );
        Ok(matched)
    }

    fn backend_name(&self) -> &'static str {
        "file"
    }
}
