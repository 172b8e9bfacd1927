//! 高峰时段直方图
//!
//! 统计订单到达的时段分布，不区分是否支付。

use chrono::Timelike;
use serde::Serialize;

use super::bucketing::LocalZone;
use super::order::Order;

pub const HOURS_PER_DAY: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourSlot {
    pub hour: u32,
    pub order_count: u64,
}

/// 构建 24 小时直方图，每个小时都会出现（无订单时计数为 0）
///
/// 小时按 `zone` 换算后的本地时间计算；缺少 `createdAt` 的订单被跳过。
pub fn build_hourly_histogram(orders: &[Order], zone: &dyn LocalZone) -> [HourSlot; HOURS_PER_DAY] {
    let mut counts = [0u64; HOURS_PER_DAY];
    for created_at in orders.iter().filter_map(|order| order.created_at) {
        let hour = zone.local_datetime(&created_at).hour() as usize;
        counts[hour] += 1;
    }

    std::array::from_fn(|hour| HourSlot {
        hour: hour as u32,
        order_count: counts[hour],
    })
}

/// 订单最多的时段，并列时取较早的小时；没有订单时返回 `None`
pub fn peak_hour(histogram: &[HourSlot]) -> Option<HourSlot> {
    histogram
        .iter()
        .filter(|slot| slot.order_count > 0)
        .fold(None, |best: Option<HourSlot>, slot| match best {
            Some(b) if b.order_count >= slot.order_count => Some(b),
            _ => Some(*slot),
        })
}
