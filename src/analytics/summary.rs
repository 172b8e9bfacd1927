//! 概览页头部指标

use serde::Serialize;

use super::order::{Order, OrderStatus};
use super::total::compute_order_total;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// 已支付订单的总营收（"Total Earned"）
    pub total_revenue: f64,
    pub paid_orders: u64,
    pub unpaid_orders: u64,
    pub pending_orders: u64,
    pub done_orders: u64,
    /// 已支付订单的客单价，没有已支付订单时为 0
    pub average_order_value: f64,
}

impl OrderSummary {
    pub fn total_orders(&self) -> u64 {
        self.paid_orders + self.unpaid_orders
    }
}

pub fn summarize_orders(orders: &[Order]) -> OrderSummary {
    let mut summary = OrderSummary::default();

    for order in orders {
        if order.paid {
            summary.paid_orders += 1;
            summary.total_revenue += compute_order_total(order);
        } else {
            summary.unpaid_orders += 1;
        }

        match order.effective_status() {
            OrderStatus::Pending => summary.pending_orders += 1,
            OrderStatus::Done => summary.done_orders += 1,
        }
    }

    if summary.paid_orders > 0 {
        summary.average_order_value = summary.total_revenue / summary.paid_orders as f64;
    }

    summary
}
