//! 详情页上的购买相关状态
//!
//! 原价、数量与配送检查都是纯前端展示逻辑，不访问后端。

use rust_decimal::Decimal;

/// 固定展示的折扣
pub const DISCOUNT_PERCENT: u32 = 23;

/// 展示用“原价”：售价上浮 30%，保留两位小数
///
/// 溢出时返回 `None`，不展示原价。
pub fn original_price(price: Decimal) -> Option<Decimal> {
    price
        .checked_mul(Decimal::new(13, 1))
        .map(|p| p.round_dp(2))
}

/// 购买数量，最小为 1，没有上限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(u32);

impl Quantity {
    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn increment(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn decrement(self) -> Self {
        Self(self.0.saturating_sub(1).max(1))
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self(1)
    }
}

/// 配送地区码检查结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PincodeCheck {
    Available,
    Invalid,
}

impl PincodeCheck {
    /// 6 位数字即视为可配送
    pub fn check(pincode: &str) -> Self {
        let pincode = pincode.trim();
        if pincode.len() == 6 && pincode.bytes().all(|b| b.is_ascii_digit()) {
            Self::Available
        } else {
            Self::Invalid
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Available => "Delivery available to this pincode.",
            Self::Invalid => "Please enter a valid 6-digit pincode.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Description,
    Specifications,
}

impl DetailTab {
    pub const ALL: [DetailTab; 2] = [DetailTab::Description, DetailTab::Specifications];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Specifications => "Specifications",
        }
    }
}
