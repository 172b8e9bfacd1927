//! Analytics service layer
//!
//! Fetches orders from the order store once per request and feeds the same
//! list to every aggregator. Shared between the CLI report, CSV export and
//! any embedding application.
//!
//! 订单存储查询失败时按"无数据"处理（记录 warn 日志），不会让报表请求失败。

use std::sync::Arc;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::analytics::{
    BucketingOptions, Granularity, HOURS_PER_DAY, HourSlot, Order, OrderSummary, RankingEntry,
    RevenueBucket, aggregate_revenue_with, build_hourly_histogram, choose_bucket_granularity,
    fixed_offset_hours, rank_customers, rank_products, summarize_orders,
};
use crate::config::AnalyticsConfig;
use crate::errors::{AnalyticsError, Result};
use crate::storage::{OrderFilter, OrderStore};

/// 排行榜条数上限
pub const MAX_TOP_LIMIT: u32 = 100;

// ============ 公共类型定义 ============

/// 统计口径（由 `[analytics]` 配置生成）
#[derive(Debug, Clone)]
pub struct AnalyticsSettings {
    /// 高峰时段直方图使用的时区
    pub histogram_zone: FixedOffset,
    /// 营收分桶 key 使用的时区
    pub bucket_zone: FixedOffset,
    pub bucketing: BucketingOptions,
    pub default_range_days: i64,
    pub default_top_limit: u32,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            histogram_zone: fixed_offset_hours(1).unwrap_or_else(|| Utc.fix()),
            bucket_zone: Utc.fix(),
            bucketing: BucketingOptions::default(),
            default_range_days: 30,
            default_top_limit: 10,
        }
    }
}

impl AnalyticsSettings {
    pub fn from_config(config: &AnalyticsConfig) -> Result<Self> {
        config.validate()?;

        let zone = |hours: i32| {
            fixed_offset_hours(hours).ok_or_else(|| {
                AnalyticsError::config(format!("Unsupported UTC offset: {} hours", hours))
            })
        };

        Ok(Self {
            histogram_zone: zone(config.assumed_utc_offset_hours)?,
            bucket_zone: zone(config.bucket_utc_offset_hours)?,
            bucketing: BucketingOptions {
                fill_empty_buckets: config.fill_empty_buckets,
                merge_multi_day_buckets: config.merge_multi_day_buckets,
            },
            default_range_days: config.default_range_days,
            default_top_limit: config.default_top_limit,
        })
    }
}

/// 仪表盘报表
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub granularity: Granularity,
    pub summary: OrderSummary,
    pub revenue: Vec<RevenueBucket>,
    pub peak_hours: [HourSlot; HOURS_PER_DAY],
    pub top_customers: Vec<RankingEntry>,
    pub best_sellers: Vec<RankingEntry>,
}

impl DashboardReport {
    /// 在同一份订单列表上运行全部聚合
    pub fn build(
        orders: &[Order],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u32,
        settings: &AnalyticsSettings,
    ) -> Self {
        let limit = limit.min(MAX_TOP_LIMIT) as usize;

        let mut top_customers = rank_customers(orders);
        top_customers.truncate(limit);
        let mut best_sellers = rank_products(orders);
        best_sellers.truncate(limit);

        Self {
            start,
            end,
            granularity: choose_bucket_granularity(start, end),
            summary: summarize_orders(orders),
            revenue: aggregate_revenue_with(
                orders,
                start,
                end,
                &settings.bucket_zone,
                &settings.bucketing,
            ),
            peak_hours: build_hourly_histogram(orders, &settings.histogram_zone),
            top_customers,
            best_sellers,
        }
    }
}

/// 日期字符串只含日期时，解析为当天开始还是结束
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    StartOfDay,
    EndOfDay,
}

// ============ AnalyticsService ============

/// Analytics 服务
pub struct AnalyticsService {
    store: Arc<dyn OrderStore>,
    settings: AnalyticsSettings,
}

impl AnalyticsService {
    /// 创建 AnalyticsService 实例
    pub fn new(store: Arc<dyn OrderStore>, settings: AnalyticsSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// 解析日期范围，支持 RFC3339 和 YYYY-MM-DD 格式
    ///
    /// 解析失败或只提供一端时回退到默认范围
    pub fn parse_date_range(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        match (start_date, end_date) {
            (Some(s), Some(e)) => {
                let (default_start, default_end) = self.default_date_range();
                let start = Self::parse_date(s, DateBound::StartOfDay).unwrap_or(default_start);
                let end = Self::parse_date(e, DateBound::EndOfDay).unwrap_or(default_end);
                (start, end)
            }
            _ => self.default_date_range(),
        }
    }

    /// 严格解析日期范围，解析失败时返回错误
    ///
    /// 与 `parse_date_range` 不同，此方法不会静默回退到默认值
    pub fn parse_date_range_strict(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
        match (start_date, end_date) {
            (Some(s), Some(e)) => {
                let start = Self::parse_date(s, DateBound::StartOfDay).ok_or_else(|| {
                    AnalyticsError::date_parse(format!(
                        "Invalid start date format: '{}'. Supported formats: RFC3339 or YYYY-MM-DD",
                        s
                    ))
                })?;
                let end = Self::parse_date(e, DateBound::EndOfDay).ok_or_else(|| {
                    AnalyticsError::date_parse(format!(
                        "Invalid end date format: '{}'. Supported formats: RFC3339 or YYYY-MM-DD",
                        e
                    ))
                })?;
                if start > end {
                    return Err(AnalyticsError::invalid_date_range(
                        "Start date must not be later than end date",
                    ));
                }
                Ok((start, end))
            }
            (Some(_), None) => Err(AnalyticsError::invalid_date_range(
                "Start date is provided but end date is missing",
            )),
            (None, Some(_)) => Err(AnalyticsError::invalid_date_range(
                "End date is provided but start date is missing",
            )),
            (None, None) => Ok(self.default_date_range()),
        }
    }

    /// 解析单个日期，纯日期按 UTC 的当天开始或结束处理
    pub fn parse_date(s: &str, bound: DateBound) -> Option<DateTime<Utc>> {
        let s = s.trim();
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(|d| {
                    let time = match bound {
                        DateBound::StartOfDay => NaiveTime::MIN,
                        DateBound::EndOfDay => {
                            NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
                        }
                    };
                    d.and_time(time).and_utc()
                })
            })
    }

    /// 最近 `default_range_days` 天
    pub fn default_date_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let end = Utc::now();
        let start = end - Duration::days(self.settings.default_range_days);
        (start, end)
    }

    /// 拉取区间内的全部订单（不过滤支付状态）
    ///
    /// 查询失败按空列表处理
    pub async fn load_orders(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Order> {
        let filter = OrderFilter::default().created_between(start, end);
        match self.store.find(&filter).await {
            Ok(orders) => {
                debug!(
                    "Analytics: loaded {} orders from {} backend",
                    orders.len(),
                    self.store.backend_name()
                );
                orders
            }
            Err(e) => {
                warn!(
                    "Analytics: order fetch from {} backend failed, treating as no data: {}",
                    self.store.backend_name(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// 获取营收时间序列
    pub async fn get_revenue_series(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<RevenueBucket> {
        info!("Analytics: get_revenue_series from {} to {}", start, end);

        let orders = self.load_orders(start, end).await;
        let buckets = aggregate_revenue_with(
            &orders,
            start,
            end,
            &self.settings.bucket_zone,
            &self.settings.bucketing,
        );

        debug!(
            "Analytics: get_revenue_series returned {} buckets",
            buckets.len()
        );
        buckets
    }

    /// 获取高峰时段分布
    pub async fn get_peak_hours(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> [HourSlot; HOURS_PER_DAY] {
        info!("Analytics: get_peak_hours from {} to {}", start, end);

        let orders = self.load_orders(start, end).await;
        build_hourly_histogram(&orders, &self.settings.histogram_zone)
    }

    /// 获取消费最多的顾客
    pub async fn get_top_customers(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u32,
    ) -> Vec<RankingEntry> {
        info!(
            "Analytics: get_top_customers from {} to {}, limit={}",
            start, end, limit
        );

        let orders = self.load_orders(start, end).await;
        let mut ranking = rank_customers(&orders);
        ranking.truncate(limit.min(MAX_TOP_LIMIT) as usize);

        debug!(
            "Analytics: get_top_customers returned {} customers",
            ranking.len()
        );
        ranking
    }

    /// 获取畅销菜品
    pub async fn get_best_sellers(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u32,
    ) -> Vec<RankingEntry> {
        info!(
            "Analytics: get_best_sellers from {} to {}, limit={}",
            start, end, limit
        );

        let orders = self.load_orders(start, end).await;
        let mut ranking = rank_products(&orders);
        ranking.truncate(limit.min(MAX_TOP_LIMIT) as usize);

        debug!(
            "Analytics: get_best_sellers returned {} products",
            ranking.len()
        );
        ranking
    }

    /// 获取概览指标
    pub async fn get_summary(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> OrderSummary {
        info!("Analytics: get_summary from {} to {}", start, end);

        let orders = self.load_orders(start, end).await;
        summarize_orders(&orders)
    }

    /// 获取完整仪表盘数据
    ///
    /// 只查询一次订单存储，所有聚合共享同一份订单列表
    pub async fn get_dashboard(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u32,
    ) -> DashboardReport {
        info!(
            "Analytics: get_dashboard from {} to {}, limit={}",
            start, end, limit
        );

        let orders = self.load_orders(start, end).await;
        let report = DashboardReport::build(&orders, start, end, limit, &self.settings);

        debug!(
            "Analytics: get_dashboard over {} orders: {} revenue buckets, granularity={}",
            orders.len(),
            report.revenue.len(),
            report.granularity.as_ref()
        );
        report
    }
}
