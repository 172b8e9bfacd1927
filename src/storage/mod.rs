//! 订单存储接口
//!
//! 分析模块只通过 [`OrderStore::find`] 读取订单，存储后端负责按时间、
//! 支付状态和订单状态预先过滤。

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::analytics::{Order, OrderStatus};
use crate::errors::{AnalyticsError, Result};

pub mod file;
pub mod memory;

pub use file::JsonFileOrderStore;
pub use memory::MemoryOrderStore;

/// 订单查询条件，所有字段为 `None` 时不过滤
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderFilter {
    /// `createdAt` 闭区间
    pub created_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
    pub paid: Option<bool>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    pub fn created_between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.created_between = Some((start, end));
        self
    }

    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = Some(paid);
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// 判断订单是否满足条件
    ///
    /// 指定了时间区间时，缺少 `createdAt` 的订单不匹配。
    pub fn matches(&self, order: &Order) -> bool {
        if let Some((start, end)) = self.created_between {
            match order.created_at {
                Some(ts) if ts >= start && ts <= end => {}
                _ => return false,
            }
        }
        if let Some(paid) = self.paid
            && order.paid != paid
        {
            return false;
        }
        if let Some(status) = self.status
            && order.effective_status() != status
        {
            return false;
        }
        true
    }
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find(&self, filter: &OrderFilter) -> Result<Vec<Order>>;

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    /// 根据配置创建订单存储
    pub fn create() -> Result<Arc<dyn OrderStore>> {
        let config = crate::config::get_config();
        Self::create_with(&config.store.backend, &config.store.orders_file)
    }

    pub fn create_with(backend: &str, orders_file: &str) -> Result<Arc<dyn OrderStore>> {
        match backend {
            "file" | "json" => Ok(Arc::new(JsonFileOrderStore::new(orders_file))),
            "memory" => Ok(Arc::new(MemoryOrderStore::default())),
            other => Err(AnalyticsError::config(format!(
                "Unknown order store backend: '{}'. Valid: file, memory",
                other
            ))),
        }
    }
}
