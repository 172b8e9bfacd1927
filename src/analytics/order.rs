//! 订单数据模型
//!
//! 由订单存储（Order Store）拥有，分析模块只读使用。
//! 序列化格式与前端/数据库导出保持一致（camelCase）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use super::lenient;

/// 订单状态
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    EnumIter,
    AsRefStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Done,
}

impl std::str::FromStr for OrderStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "done" => Ok(Self::Done),
            _ => {
                let valid: Vec<String> = Self::iter().map(|v| v.as_ref().to_string()).collect();
                Err(format!(
                    "Invalid order status: '{}'. Valid: {}",
                    s,
                    valid.join(", ")
                ))
            }
        }
    }
}

/// 尺寸或加料的价格修正（在基础价格上累加）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceModifier {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_price")]
    pub price: Option<f64>,
}

impl PriceModifier {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            price: Some(price),
        }
    }
}

/// 购物车中的一个商品条目
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::opt_price")]
    pub base_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::opt_object")]
    pub selected_size: Option<PriceModifier>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub selected_extras: Vec<PriceModifier>,
    #[serde(default, deserialize_with = "lenient::opt_quantity")]
    pub quantity: Option<u32>,
}

impl LineItem {
    pub fn new(name: impl Into<String>, base_price: f64) -> Self {
        Self {
            name: name.into(),
            base_price: Some(base_price),
            ..Default::default()
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_size(mut self, name: impl Into<String>, price: f64) -> Self {
        self.selected_size = Some(PriceModifier::new(name, price));
        self
    }

    pub fn with_extra(mut self, name: impl Into<String>, price: f64) -> Self {
        self.selected_extras.push(PriceModifier::new(name, price));
        self
    }

    /// 购买数量，缺失时视为 1
    pub fn effective_quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }
}

/// 订单
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, alias = "_id", deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub created_at: Option<DateTime<Utc>>,
    /// 顾客预约的出餐时间，仅用于展示分组，不参与统计分桶
    #[serde(default, deserialize_with = "lenient::opt_datetime")]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub paid: bool,
    #[serde(default, deserialize_with = "lenient::opt_status")]
    pub status: Option<OrderStatus>,
    /// 游客订单没有邮箱
    #[serde(default, deserialize_with = "lenient::opt_text")]
    pub user_email: Option<String>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub cart_products: Vec<LineItem>,
}

impl Order {
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at: Some(created_at),
            ..Default::default()
        }
    }

    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = paid;
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_item(mut self, item: LineItem) -> Self {
        self.cart_products.push(item);
        self
    }

    /// 状态缺失的订单按 pending 处理
    pub fn effective_status(&self) -> OrderStatus {
        self.status.unwrap_or_default()
    }
}
