//! 排行榜聚合：消费最多的顾客、最畅销的菜品
//!
//! 两个排行榜都包含未支付订单，与营收口径不同。

use std::collections::HashMap;

use serde::Serialize;

use super::order::Order;
use super::total::{compute_order_total, line_item_total};

/// 排行榜条目
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    /// 顾客邮箱或菜品名称
    pub key: String,
    pub total_value: f64,
    pub count_value: u64,
}

/// 按 key 累加，保留首次出现的顺序，便于稳定排序时打破并列
#[derive(Default)]
struct RankingBuilder {
    index: HashMap<String, usize>,
    entries: Vec<RankingEntry>,
}

impl RankingBuilder {
    fn add(&mut self, key: &str, total_value: f64, count_value: u64) {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push(RankingEntry {
                    key: key.to_string(),
                    total_value: 0.0,
                    count_value: 0,
                });
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };

        let entry = &mut self.entries[idx];
        entry.total_value += total_value;
        entry.count_value += count_value;
    }
}

/// 顾客消费排行，按消费总额降序
///
/// 没有邮箱的游客订单不参与排名。
pub fn rank_customers(orders: &[Order]) -> Vec<RankingEntry> {
    let mut builder = RankingBuilder::default();
    for order in orders {
        let Some(email) = order.user_email.as_deref().map(str::trim) else {
            continue;
        };
        if email.is_empty() {
            continue;
        }
        builder.add(email, compute_order_total(order), 1);
    }

    let mut entries = builder.entries;
    entries.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
    entries
}

/// 畅销菜品排行，按售出数量降序，`total_value` 为该菜品营收
pub fn rank_products(orders: &[Order]) -> Vec<RankingEntry> {
    let mut builder = RankingBuilder::default();
    for item in orders.iter().flat_map(|order| order.cart_products.iter()) {
        builder.add(
            &item.name,
            line_item_total(item),
            u64::from(item.effective_quantity()),
        );
    }

    let mut entries = builder.entries;
    entries.sort_by(|a, b| b.count_value.cmp(&a.count_value));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::order::LineItem;
    use chrono::{TimeZone, Utc};

    fn order(email: Option<&str>, items: Vec<LineItem>) -> Order {
        let mut order = Order::new("o", Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        order.user_email = email.map(str::to_string);
        order.cart_products = items;
        order
    }

    #[test]
    fn test_rank_customers_by_spend() {
        let orders = vec![
            order(Some("a@x.io"), vec![LineItem::new("Soup", 50.0)]),
            order(Some("b@x.io"), vec![LineItem::new("Steak", 300.0)]),
            order(Some("a@x.io"), vec![LineItem::new("Soup", 50.0).with_quantity(2)]),
        ];

        let ranking = rank_customers(&orders);
        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking[0].key, "b@x.io");
        assert_eq!(ranking[0].total_value, 300.0);
        assert_eq!(ranking[1].key, "a@x.io");
        assert_eq!(ranking[1].total_value, 150.0);
        assert_eq!(ranking[1].count_value, 2);
    }

    #[test]
    fn test_guest_orders_excluded_from_customers() {
        let orders = vec![
            order(None, vec![LineItem::new("Soup", 50.0)]),
            order(Some("  "), vec![LineItem::new("Soup", 50.0)]),
        ];
        assert!(rank_customers(&orders).is_empty());
    }

    #[test]
    fn test_unpaid_orders_count_towards_customers() {
        let orders = vec![order(Some("a@x.io"), vec![LineItem::new("Soup", 50.0)]).paid(false)];
        let ranking = rank_customers(&orders);
        assert_eq!(ranking[0].total_value, 50.0);
    }

    #[test]
    fn test_customer_ties_keep_input_order() {
        let orders = vec![
            order(Some("first@x.io"), vec![LineItem::new("Soup", 50.0)]),
            order(Some("second@x.io"), vec![LineItem::new("Soup", 50.0)]),
        ];
        let ranking = rank_customers(&orders);
        assert_eq!(ranking[0].key, "first@x.io");
        assert_eq!(ranking[1].key, "second@x.io");
    }

    #[test]
    fn test_rank_products_by_quantity() {
        let orders = vec![
            order(
                None,
                vec![
                    LineItem::new("Margherita", 120.0).with_quantity(2),
                    LineItem::new("Cola", 30.0).with_quantity(5),
                ],
            ),
            order(
                Some("a@x.io"),
                vec![LineItem::new("Margherita", 120.0).with_size("Large", 30.0)],
            ),
        ];

        let ranking = rank_products(&orders);
        assert_eq!(ranking[0].key, "Cola");
        assert_eq!(ranking[0].count_value, 5);
        assert_eq!(ranking[0].total_value, 150.0);
        assert_eq!(ranking[1].key, "Margherita");
        assert_eq!(ranking[1].count_value, 3);
        assert_eq!(ranking[1].total_value, 240.0 + 150.0);
    }

    #[test]
    fn test_product_ties_keep_input_order() {
        let orders = vec![order(
            None,
            vec![LineItem::new("Tea", 10.0), LineItem::new("Coffee", 20.0)],
        )];
        let ranking = rank_products(&orders);
        assert_eq!(ranking[0].key, "Tea");
        assert_eq!(ranking[1].key, "Coffee");
    }

    #[test]
    fn test_empty_input() {
        assert!(rank_customers(&[]).is_empty());
        assert!(rank_products(&[]).is_empty());
    }
}
