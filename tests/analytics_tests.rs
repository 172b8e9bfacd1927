//! Analytics 模块测试
//!
//! 覆盖订单金额、分桶粒度、营收序列、高峰时段直方图、排行榜和概览指标。

use chrono::{DateTime, Duration, TimeZone, Utc};

use order_analytics::analytics::{
    BucketingOptions, Granularity, LineItem, Order, OrderStatus, aggregate_revenue,
    aggregate_revenue_with, bucket_key_for, build_hourly_histogram, choose_bucket_granularity,
    compute_order_total, fixed_offset_hours, line_item_total, peak_hour, rank_customers,
    rank_products, summarize_orders, week_number,
};

// =============================================================================
// 测试数据
// =============================================================================

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn margherita(quantity: u32) -> LineItem {
    LineItem::new("Margherita", 120.0).with_quantity(quantity)
}

/// 两笔已支付的 Margherita 订单，10:00 两份、14:00 一份
fn scenario_orders() -> Vec<Order> {
    serde_json::from_str(
        r#"[
            {"paid": true, "createdAt": "2024-01-01T10:00:00Z",
             "cartProducts": [{"name": "Margherita", "basePrice": 120, "quantity": 2}]},
            {"paid": true, "createdAt": "2024-01-01T14:00:00Z",
             "cartProducts": [{"name": "Margherita", "basePrice": 120, "quantity": 1}]}
        ]"#,
    )
    .unwrap()
}

/// 一周内混合支付状态、尺寸和加料的订单
fn mixed_week() -> Vec<Order> {
    vec![
        Order::new("1", utc(2024, 3, 4, 11, 30))
            .paid(true)
            .with_email("ana@example.com")
            .with_status(OrderStatus::Done)
            .with_item(
                LineItem::new("Quattro Formaggi", 10.5)
                    .with_size("Large", 2.5)
                    .with_extra("Olives", 0.75)
                    .with_quantity(2),
            ),
        Order::new("2", utc(2024, 3, 4, 19, 5))
            .paid(false)
            .with_email("bo@example.com")
            .with_item(LineItem::new("Margherita", 8.0).with_quantity(3)),
        Order::new("3", utc(2024, 3, 6, 12, 45))
            .paid(true)
            .with_email("ana@example.com")
            .with_item(LineItem::new("Margherita", 8.0))
            .with_item(LineItem::new("Tiramisu", 4.25).with_extra("Cream", 0.5)),
        Order::new("4", utc(2024, 3, 7, 19, 50))
            .paid(true)
            .with_item(LineItem::new("Diavola", 9.5).with_quantity(4)),
        Order::new("5", utc(2024, 3, 9, 20, 10))
            .paid(true)
            .with_email("cy@example.com")
            .with_status(OrderStatus::Done)
            .with_item(LineItem::new("Margherita", 8.0).with_size("Small", -1.0)),
    ]
}

// =============================================================================
// 金额计算
// =============================================================================

#[cfg(test)]
mod total_tests {
    use super::*;

    #[test]
    fn test_total_matches_line_item_formula() {
        for order in mixed_week() {
            let expected: f64 = order
                .cart_products
                .iter()
                .map(|item| {
                    let size = item
                        .selected_size
                        .as_ref()
                        .and_then(|s| s.price)
                        .unwrap_or(0.0);
                    let extras: f64 = item.selected_extras.iter().filter_map(|e| e.price).sum();
                    (item.base_price.unwrap_or(0.0) + size + extras)
                        * f64::from(item.quantity.unwrap_or(1))
                })
                .sum();
            assert_eq!(compute_order_total(&order), expected, "order {}", order.id);
        }
    }

    #[test]
    fn test_missing_fields_count_as_zero() {
        let order: Order = serde_json::from_str(
            r#"{"cartProducts": [{"name": "Mystery", "selectedSize": {"name": "L"},
                "selectedExtras": [{"name": "Basil"}, {"name": "Oil", "price": 0.5}]}]}"#,
        )
        .unwrap();
        assert_eq!(compute_order_total(&order), 0.5);
        assert_eq!(line_item_total(&order.cart_products[0]), 0.5);
    }

    #[test]
    fn test_order_without_items_is_zero() {
        assert_eq!(compute_order_total(&Order::default()), 0.0);
    }
}

// =============================================================================
// 分桶粒度
// =============================================================================

#[cfg(test)]
mod granularity_tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        let d = utc(2024, 1, 1, 0, 0);
        assert_eq!(choose_bucket_granularity(d, d), Granularity::Hourly);
        assert_eq!(
            choose_bucket_granularity(d, d + Duration::days(7)),
            Granularity::Daily
        );
        assert_eq!(
            choose_bucket_granularity(d, d + Duration::days(8)),
            Granularity::EveryTwoDays
        );
        assert_eq!(
            choose_bucket_granularity(d, d + Duration::days(31)),
            Granularity::Weekly
        );
    }

    #[test]
    fn test_single_calendar_day_is_hourly() {
        let start = utc(2024, 1, 1, 0, 0);
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        assert_eq!(choose_bucket_granularity(start, end), Granularity::Hourly);
    }

    #[test]
    fn test_key_formats() {
        let ts = utc(2024, 1, 1, 10, 42);
        assert_eq!(
            bucket_key_for(ts, Granularity::Hourly, &Utc),
            "2024-01-01T10:00:00"
        );
        assert_eq!(bucket_key_for(ts, Granularity::Daily, &Utc), "2024-01-01");
        assert_eq!(
            bucket_key_for(ts, Granularity::EveryTwoDays, &Utc),
            "2024-01-01"
        );
        assert_eq!(bucket_key_for(ts, Granularity::Weekly, &Utc), "2024-01-01");
    }

    #[test]
    fn test_key_uses_zone() {
        let cet = fixed_offset_hours(1).unwrap();
        let ts = utc(2024, 1, 1, 23, 30);
        assert_eq!(bucket_key_for(ts, Granularity::Daily, &cet), "2024-01-02");
        assert_eq!(
            bucket_key_for(ts, Granularity::Hourly, &cet),
            "2024-01-02T00:00:00"
        );
    }

    #[test]
    fn test_week_number() {
        use chrono::NaiveDate;
        assert_eq!(week_number(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), 1);
        assert_eq!(week_number(NaiveDate::from_ymd_opt(2024, 12, 30).unwrap()), 1);
        assert_eq!(week_number(NaiveDate::from_ymd_opt(2021, 1, 3).unwrap()), 53);
    }
}

// =============================================================================
// 营收序列
// =============================================================================

#[cfg(test)]
mod revenue_tests {
    use super::*;

    #[test]
    fn test_concrete_single_day_scenario() {
        let start = utc(2024, 1, 1, 0, 0);
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();

        let buckets = aggregate_revenue(&scenario_orders(), start, end, &Utc);
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].bucket_key, "2024-01-01T10:00:00");
        assert_eq!(buckets[0].revenue, 240.0);
        assert_eq!(buckets[0].order_count, 1);
        assert_eq!(buckets[1].bucket_key, "2024-01-01T14:00:00");
        assert_eq!(buckets[1].revenue, 120.0);
        assert_eq!(buckets[1].order_count, 1);
    }

    #[test]
    fn test_revenue_conservation() {
        let orders = mixed_week();
        let start = utc(2024, 3, 4, 0, 0);
        let end = utc(2024, 3, 8, 0, 0);

        let bucketed: f64 = aggregate_revenue(&orders, start, end, &Utc)
            .iter()
            .map(|b| b.revenue)
            .sum();
        let expected: f64 = orders
            .iter()
            .filter(|o| o.paid)
            .filter(|o| o.created_at.is_some_and(|ts| ts >= start && ts <= end))
            .map(compute_order_total)
            .sum();
        assert_eq!(bucketed, expected);
        assert!(expected > 0.0);
    }

    #[test]
    fn test_daily_buckets_skip_empty_days() {
        let buckets = aggregate_revenue(
            &mixed_week(),
            utc(2024, 3, 4, 0, 0),
            utc(2024, 3, 10, 0, 0),
            &Utc,
        );
        let keys: Vec<&str> = buckets.iter().map(|b| b.bucket_key.as_str()).collect();
        assert_eq!(keys, vec!["2024-03-04", "2024-03-06", "2024-03-07", "2024-03-09"]);
    }

    #[test]
    fn test_fill_empty_buckets() {
        let options = BucketingOptions {
            fill_empty_buckets: true,
            ..Default::default()
        };
        let buckets = aggregate_revenue_with(
            &mixed_week(),
            utc(2024, 3, 4, 0, 0),
            utc(2024, 3, 10, 0, 0),
            &Utc,
            &options,
        );
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[1].bucket_key, "2024-03-05");
        assert_eq!(buckets[1].revenue, 0.0);
        assert_eq!(buckets[1].order_count, 0);
    }

    #[test]
    fn test_weekly_merge_uses_iso_week_labels() {
        let options = BucketingOptions {
            merge_multi_day_buckets: true,
            ..Default::default()
        };
        let orders = vec![
            Order::new("a", utc(2024, 1, 2, 12, 0))
                .paid(true)
                .with_item(margherita(1)),
            Order::new("b", utc(2024, 1, 5, 12, 0))
                .paid(true)
                .with_item(margherita(1)),
            Order::new("c", utc(2024, 1, 9, 12, 0))
                .paid(true)
                .with_item(margherita(1)),
        ];
        let buckets = aggregate_revenue_with(
            &orders,
            utc(2024, 1, 1, 0, 0),
            utc(2024, 2, 15, 0, 0),
            &Utc,
            &options,
        );
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].bucket_key, "2024-W01");
        assert_eq!(buckets[0].revenue, 240.0);
        assert_eq!(buckets[0].order_count, 2);
        assert_eq!(buckets[1].bucket_key, "2024-W02");
    }

    #[test]
    fn test_orders_outside_range_are_ignored() {
        let start = utc(2024, 1, 1, 0, 0);
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        let mut orders = scenario_orders();
        orders.push(
            Order::new("late", utc(2024, 1, 2, 0, 0))
                .paid(true)
                .with_item(margherita(5)),
        );
        let total: f64 = aggregate_revenue(&orders, start, end, &Utc)
            .iter()
            .map(|b| b.revenue)
            .sum();
        assert_eq!(total, 360.0);
    }
}

// =============================================================================
// 高峰时段
// =============================================================================

#[cfg(test)]
mod histogram_tests {
    use super::*;

    #[test]
    fn test_every_order_counted_once() {
        let orders = mixed_week();
        let histogram = build_hourly_histogram(&orders, &Utc);
        assert_eq!(histogram.len(), 24);
        let total: u64 = histogram.iter().map(|slot| slot.order_count).sum();
        assert_eq!(total, orders.len() as u64);
    }

    #[test]
    fn test_default_offset_shifts_hours() {
        let cet = fixed_offset_hours(1).unwrap();
        let histogram = build_hourly_histogram(&mixed_week(), &cet);
        // 19:05 和 19:50 UTC 都落在本地 20 点
        assert_eq!(histogram[20].order_count, 2);
        assert_eq!(histogram[19].order_count, 0);
        // 20:10 UTC -> 21 点
        assert_eq!(histogram[21].order_count, 1);
        assert_eq!(peak_hour(&histogram).map(|slot| slot.hour), Some(20));
    }

    #[test]
    fn test_wraps_past_midnight() {
        let cet = fixed_offset_hours(1).unwrap();
        let orders = vec![Order::new("late", utc(2024, 1, 1, 23, 30))];
        let histogram = build_hourly_histogram(&orders, &cet);
        assert_eq!(histogram[0].order_count, 1);
    }
}

// =============================================================================
// 排行榜
// =============================================================================

#[cfg(test)]
mod ranking_tests {
    use super::*;

    #[test]
    fn test_concrete_best_seller() {
        let ranking = rank_products(&scenario_orders());
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking[0].key, "Margherita");
        assert_eq!(ranking[0].count_value, 3);
        assert_eq!(ranking[0].total_value, 360.0);
    }

    #[test]
    fn test_product_quantity_conservation() {
        let orders = mixed_week();
        let sold: u64 = rank_products(&orders).iter().map(|e| e.count_value).sum();
        let expected: u64 = orders
            .iter()
            .flat_map(|o| o.cart_products.iter())
            .map(|item| u64::from(item.quantity.unwrap_or(1)))
            .sum();
        assert_eq!(sold, expected);
    }

    #[test]
    fn test_products_include_unpaid_orders() {
        let ranking = rank_products(&mixed_week());
        // 未支付订单 2 贡献 3 份 Margherita
        assert_eq!(ranking[0].key, "Margherita");
        assert_eq!(ranking[0].count_value, 5);
    }

    #[test]
    fn test_customers_ranked_by_spend() {
        let ranking = rank_customers(&mixed_week());
        let keys: Vec<&str> = ranking.iter().map(|e| e.key.as_str()).collect();
        // 游客订单 4 不参与排名
        assert_eq!(keys, vec!["ana@example.com", "bo@example.com", "cy@example.com"]);
        assert_eq!(ranking[0].count_value, 2);
        assert_eq!(ranking[0].total_value, 27.5 + 12.75);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let orders = vec![
            Order::default()
                .with_email("first@example.com")
                .with_item(LineItem::new("Calzone", 10.0)),
            Order::default()
                .with_email("second@example.com")
                .with_item(LineItem::new("Marinara", 10.0)),
        ];
        let customers = rank_customers(&orders);
        assert_eq!(customers[0].key, "first@example.com");
        assert_eq!(customers[1].key, "second@example.com");

        let products = rank_products(&orders);
        assert_eq!(products[0].key, "Calzone");
        assert_eq!(products[1].key, "Marinara");
    }
}

// =============================================================================
// 空输入
// =============================================================================

#[cfg(test)]
mod empty_input_tests {
    use super::*;

    #[test]
    fn test_all_aggregators_accept_empty_input() {
        let start = utc(2024, 1, 1, 0, 0);
        let end = start + Duration::days(3);

        assert_eq!(compute_order_total(&Order::default()), 0.0);
        assert!(aggregate_revenue(&[], start, end, &Utc).is_empty());

        let histogram = build_hourly_histogram(&[], &Utc);
        assert_eq!(histogram.len(), 24);
        assert!(histogram.iter().all(|slot| slot.order_count == 0));
        assert!(
            histogram
                .iter()
                .enumerate()
                .all(|(i, slot)| slot.hour as usize == i)
        );
        assert!(peak_hour(&histogram).is_none());

        assert!(rank_customers(&[]).is_empty());
        assert!(rank_products(&[]).is_empty());

        let summary = summarize_orders(&[]);
        assert_eq!(summary.total_orders(), 0);
        assert_eq!(summary.average_order_value, 0.0);
    }
}

// =============================================================================
// 概览指标
// =============================================================================

#[cfg(test)]
mod summary_tests {
    use super::*;

    #[test]
    fn test_summary_over_mixed_week() {
        let orders = mixed_week();
        let summary = summarize_orders(&orders);

        assert_eq!(summary.paid_orders, 4);
        assert_eq!(summary.unpaid_orders, 1);
        assert_eq!(summary.done_orders, 2);
        assert_eq!(summary.pending_orders, 3);

        let paid_total: f64 = orders
            .iter()
            .filter(|o| o.paid)
            .map(compute_order_total)
            .sum();
        assert_eq!(summary.total_revenue, paid_total);
        assert_eq!(summary.average_order_value, paid_total / 4.0);
    }
}
