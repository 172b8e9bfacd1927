//! 订单金额计算
//!
//! 所有需要订单金额的地方（营收、单品营收、顾客消费）都必须走这里，
//! 不允许在调用处重新推导公式。

use super::order::{LineItem, Order};

/// 单个条目的金额：`(basePrice + size.price + Σ extras.price) * quantity`
///
/// 缺失的价格字段按 0 处理，缺失的数量按 1 处理。
pub fn line_item_total(item: &LineItem) -> f64 {
    let size_price = item
        .selected_size
        .as_ref()
        .and_then(|size| size.price)
        .unwrap_or(0.0);
    let extras_price: f64 = item
        .selected_extras
        .iter()
        .map(|extra| extra.price.unwrap_or(0.0))
        .sum();

    let unit_price = item.base_price.unwrap_or(0.0) + size_price + extras_price;
    unit_price * f64::from(item.effective_quantity())
}

/// 订单总金额，不关心是否已支付
pub fn compute_order_total(order: &Order) -> f64 {
    order.cart_products.iter().map(line_item_total).sum()
}
