use std::sync::RwLock;

use async_trait::async_trait;
use tracing::debug;

use super::{OrderFilter, OrderStore};
use crate::analytics::Order;
use crate::errors::{AnalyticsError, Result};

/// 内存订单存储
#[derive(Default)]
pub struct MemoryOrderStore {
    orders: RwLock<Vec<Order>>,
}

impl MemoryOrderStore {
    pub fn new(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    pub fn insert(&self, order: Order) -> Result<()> {
        self.orders
            .write()
            .map_err(|_| AnalyticsError::store_query("Order store lock poisoned"))?
            .push(order);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.orders.read().map(|orders| orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn find(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let orders = self
            .orders
            .read()
            .map_err(|_| AnalyticsError::store_query("Order store lock poisoned"))?;

        let matched: Vec<Order> = orders
            .iter()
            .filter(|order| filter.matches(order))
            .cloned()
            .collect();

        debug!(
            "MemoryOrderStore: {} of {} orders matched",
            matched.len(),
            orders.len()
        );
        Ok(matched)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
