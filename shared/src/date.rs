//! 时间类型模块
//!
//! 后端返回的时间字段格式并不统一：Django 侧带时区偏移，
//! FastAPI 侧常常是无时区的 ISO 8601。这里统一按原始字符串传输，
//! 只在展示时解析。

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// =========================================================
// Timestamp - 可传输的时间戳类型
// =========================================================

/// 后端时间戳，原样保存以便无损回传
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 解析为本地无时区时间
    ///
    /// 依次尝试 RFC 3339、带小数秒的 ISO 8601 以及纯日期。
    pub fn parse(&self) -> Option<NaiveDateTime> {
        let raw = self.0.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(dt);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// 展示用日期，如 `Mar 4, 2024`；无法解析时返回原始字符串
    pub fn display_date(&self) -> String {
        match self.parse() {
            Some(dt) => dt.format("%b %-d, %Y").to_string(),
            None => self.0.clone(),
        }
    }
}

impl From<&str> for Timestamp {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_date())
    }
}
