//! Order analytics engine
//!
//! 纯函数聚合：输入一批已取回的订单，输出仪表盘需要的统计结果。
//! 各组件之间没有共享状态，都以同一份订单列表为输入独立计算。
//!
//! - `total`: 订单金额（唯一的金额公式）
//! - `bucketing`: 分桶粒度与桶 key
//! - `revenue`: 营收时间序列
//! - `histogram`: 24 小时高峰时段分布
//! - `ranking`: 顾客 / 菜品排行榜
//! - `summary`: 概览页头部指标

pub mod bucketing;
pub mod histogram;
mod lenient;
pub mod order;
pub mod ranking;
pub mod revenue;
pub mod summary;
pub mod total;

pub use bucketing::{
    Granularity, LocalZone, bucket_key_for, choose_bucket_granularity, days_between,
    fixed_offset_hours, week_number,
};
pub use histogram::{HOURS_PER_DAY, HourSlot, build_hourly_histogram, peak_hour};
pub use order::{LineItem, Order, OrderStatus, PriceModifier};
pub use ranking::{RankingEntry, rank_customers, rank_products};
pub use revenue::{BucketingOptions, RevenueBucket, aggregate_revenue, aggregate_revenue_with};
pub use summary::{OrderSummary, summarize_orders};
pub use total::{compute_order_total, line_item_total};
