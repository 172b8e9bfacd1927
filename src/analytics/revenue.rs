//! 营收时间序列聚合

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use super::bucketing::{BucketLayout, LocalZone, choose_bucket_granularity};
use super::order::Order;
use super::total::compute_order_total;

/// 营收桶
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBucket {
    pub bucket_key: String,
    pub revenue: f64,
    pub order_count: u64,
}

/// 分桶增强选项，默认全部关闭
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BucketingOptions {
    /// 为区间内没有订单的桶补零
    pub fill_empty_buckets: bool,
    /// 多日粒度下真正合并相邻自然日
    pub merge_multi_day_buckets: bool,
}

#[derive(Debug, Default)]
struct BucketAccumulator {
    revenue: f64,
    order_count: u64,
}

/// 按时间桶聚合已支付订单的营收，结果按时间升序
///
/// 只统计 `paid == true` 且 `createdAt` 落在 `[start, end]` 内的订单，
/// 只输出至少有一笔订单的桶。
pub fn aggregate_revenue(
    orders: &[Order],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    zone: &dyn LocalZone,
) -> Vec<RevenueBucket> {
    aggregate_revenue_with(orders, start, end, zone, &BucketingOptions::default())
}

/// [`aggregate_revenue`] 的可配置版本
pub fn aggregate_revenue_with(
    orders: &[Order],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    zone: &dyn LocalZone,
    options: &BucketingOptions,
) -> Vec<RevenueBucket> {
    let granularity = choose_bucket_granularity(start, end);
    let local_start = zone.local_datetime(&start);
    let layout = BucketLayout::new(
        granularity,
        options.merge_multi_day_buckets,
        local_start.date(),
    );

    let mut buckets: BTreeMap<NaiveDateTime, BucketAccumulator> = BTreeMap::new();

    if options.fill_empty_buckets && start <= end {
        let local_end = zone.local_datetime(&end);
        let mut cursor = layout.bucket_start(local_start);
        while cursor <= local_end {
            buckets.entry(cursor).or_default();
            cursor += layout.step();
        }
    }

    for order in orders.iter().filter(|o| o.paid) {
        // 缺少创建时间的订单无法分桶
        let Some(created_at) = order.created_at else {
            continue;
        };
        if created_at < start || created_at > end {
            continue;
        }

        let bucket = buckets
            .entry(layout.bucket_start(zone.local_datetime(&created_at)))
            .or_default();
        bucket.revenue += compute_order_total(order);
        bucket.order_count += 1;
    }

    buckets
        .into_iter()
        .map(|(bucket_start, acc)| RevenueBucket {
            bucket_key: layout.label(bucket_start),
            revenue: acc.revenue,
            order_count: acc.order_count,
        })
        .collect()
}
