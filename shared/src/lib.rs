//! Atelier 共享类型
//!
//! 前端与后端 API 之间按原样交换的记录类型。
//! 客户端不持有权威状态，所有不变量由后端保证。

pub mod account;
pub mod content;
pub mod date;
pub mod order;
pub mod protocol;

pub use account::{
    Gender, MeasurementField, MeasurementsUpdate, ProfileUpdate, RegisterForm, UserMeasurements,
    UserProfile,
};
pub use content::{
    BusinessAbout, CompletedOrderDetail, ContactMessage, Faq, FeedbackRate, FeedbackUser,
    ServiceOffered, ShallowCompletedOrder, UserFeedback,
};
pub use date::Timestamp;
pub use order::{MaterialType, OrderDetails, OrderStatus, ShallowOrder, Urgency};
pub use protocol::{Detail, Endpoint, ErrorBody, ErrorDetail, HttpMethod, Surface, TokenResponse};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 保存 Bearer Token 的 LocalStorage 键
pub const STORAGE_TOKEN_KEY: &str = "token";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 后端 `/about` 不提供营业时间，前端统一补上
pub const DEFAULT_BUSINESS_HOURS: &str = "Monday to Saturday: 8:00 AM - 5:00 PM\nSunday: Closed";

/// 价格格式化：`Ksh 12,500`
///
/// 整数不带小数位，其余保留最多两位并去掉末尾的 0。
pub fn format_ksh(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let mut out = String::from("Ksh ");
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if frac != 0 {
        let frac = format!("{:02}", frac);
        out.push('.');
        out.push_str(frac.trim_end_matches('0'));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ksh_groups_thousands() {
        assert_eq!(format_ksh(0.0), "Ksh 0");
        assert_eq!(format_ksh(950.0), "Ksh 950");
        assert_eq!(format_ksh(12500.0), "Ksh 12,500");
        assert_eq!(format_ksh(1234567.0), "Ksh 1,234,567");
    }

    #[test]
    fn test_format_ksh_keeps_fraction() {
        assert_eq!(format_ksh(1500.5), "Ksh 1,500.5");
        assert_eq!(format_ksh(99.99), "Ksh 99.99");
    }
}
