//! 时间分桶策略
//!
//! 根据查询的日期跨度选择分桶粒度，并把时间戳映射为桶的 key。
//! 时区不写死在这里：调用方传入 [`LocalZone`]，默认实现是固定偏移。

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
};
use serde::Serialize;
use strum::AsRefStr;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// 把 UTC 时间换算为本地墙上时间
///
/// 固定偏移（不处理夏令时）是默认策略；接入时区数据库时只需实现该 trait。
pub trait LocalZone: Send + Sync {
    fn local_datetime(&self, ts: &DateTime<Utc>) -> NaiveDateTime;
}

impl LocalZone for FixedOffset {
    fn local_datetime(&self, ts: &DateTime<Utc>) -> NaiveDateTime {
        ts.with_timezone(self).naive_local()
    }
}

impl LocalZone for Utc {
    fn local_datetime(&self, ts: &DateTime<Utc>) -> NaiveDateTime {
        ts.naive_utc()
    }
}

/// 以小时为单位构造固定偏移，超出 chrono 支持范围时返回 `None`
pub fn fixed_offset_hours(hours: i32) -> Option<FixedOffset> {
    hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
}

/// 分桶粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Granularity {
    /// 跨度不超过 1 天
    Hourly,
    /// 2..=7 天
    Daily,
    /// 8..=30 天
    EveryTwoDays,
    /// 超过 30 天
    Weekly,
}

/// `ceil((end - start) / 1 day)`，反向或零长度区间返回 0
pub fn days_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY
    }
}

/// 根据日期跨度选择分桶粒度
pub fn choose_bucket_granularity(start: DateTime<Utc>, end: DateTime<Utc>) -> Granularity {
    match days_between(start, end) {
        ..=1 => Granularity::Hourly,
        2..=7 => Granularity::Daily,
        8..=30 => Granularity::EveryTwoDays,
        _ => Granularity::Weekly,
    }
}

/// 计算时间戳所在桶的 key
///
/// - `Hourly`: `YYYY-MM-DDTHH:00:00`
/// - 其它粒度: `YYYY-MM-DD`（多日粒度仍按自然日分桶）
pub fn bucket_key_for(ts: DateTime<Utc>, granularity: Granularity, zone: &dyn LocalZone) -> String {
    let local = zone.local_datetime(&ts);
    match granularity {
        Granularity::Hourly => local.format("%Y-%m-%dT%H:00:00").to_string(),
        _ => local.format("%Y-%m-%d").to_string(),
    }
}

/// ISO-8601 周序号（周一为一周开始）
pub fn week_number(date: NaiveDate) -> u32 {
    date.iso_week().week()
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// 桶布局：决定桶的起点、标签和步长
///
/// `merge_multi_day` 关闭时，多日粒度仍按自然日分桶；
/// 打开时 `EveryTwoDays` 以区间起始日为锚点两天一桶，`Weekly` 按 ISO 周合并。
#[derive(Debug, Clone, Copy)]
pub(crate) struct BucketLayout {
    granularity: Granularity,
    merge_multi_day: bool,
    anchor: NaiveDate,
}

impl BucketLayout {
    pub(crate) fn new(granularity: Granularity, merge_multi_day: bool, anchor: NaiveDate) -> Self {
        Self {
            granularity,
            merge_multi_day,
            anchor,
        }
    }

    /// 本地时间所在桶的起点
    pub(crate) fn bucket_start(&self, local: NaiveDateTime) -> NaiveDateTime {
        let date = local.date();
        match (self.granularity, self.merge_multi_day) {
            (Granularity::Hourly, _) => day_start(date) + Duration::hours(i64::from(local.hour())),
            (Granularity::EveryTwoDays, true) => {
                let offset = (date - self.anchor).num_days();
                day_start(self.anchor + Duration::days(offset.div_euclid(2) * 2))
            }
            (Granularity::Weekly, true) => {
                let from_monday = i64::from(date.weekday().num_days_from_monday());
                day_start(date - Duration::days(from_monday))
            }
            _ => day_start(date),
        }
    }

    pub(crate) fn label(&self, start: NaiveDateTime) -> String {
        match (self.granularity, self.merge_multi_day) {
            (Granularity::Hourly, _) => start.format("%Y-%m-%dT%H:00:00").to_string(),
            (Granularity::Weekly, true) => {
                let date = start.date();
                format!("{}-W{:02}", date.iso_week().year(), week_number(date))
            }
            _ => start.format("%Y-%m-%d").to_string(),
        }
    }

    pub(crate) fn step(&self) -> Duration {
        match (self.granularity, self.merge_multi_day) {
            (Granularity::Hourly, _) => Duration::hours(1),
            (Granularity::EveryTwoDays, true) => Duration::days(2),
            (Granularity::Weekly, true) => Duration::weeks(1),
            _ => Duration::days(1),
        }
    }
}
