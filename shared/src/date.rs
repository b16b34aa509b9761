//! 日期类型模块
//!
//! 后端对 `releaseDate` 的序列化格式并不固定：
//! - 毫秒时间戳 (Jackson 默认)
//! - `YYYY-MM-DD`
//! - 带时区或不带时区的 ISO 8601 时间
//!
//! `ReleaseDate` 统一将它们规整为日历日期。

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 日期解析错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReleaseDateError {
    #[error("unrecognised date format: {0}")]
    Format(String),
    #[error("timestamp out of range: {0}")]
    OutOfRange(i64),
}

/// 商品发布日期（仅保留日历日期部分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseDate(NaiveDate);

impl ReleaseDate {
    #[inline]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// 从毫秒时间戳创建（按 UTC 取日期）
    pub fn from_millis(ms: i64) -> Result<Self, ReleaseDateError> {
        DateTime::from_timestamp_millis(ms)
            .map(|dt| Self(dt.date_naive()))
            .ok_or(ReleaseDateError::OutOfRange(ms))
    }

    /// 用于界面展示的本地化格式，如 `15 Jan 2024`
    pub fn display(&self) -> String {
        self.0.format("%d %b %Y").to_string()
    }
}

impl FromStr for ReleaseDate {
    type Err = ReleaseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.date_naive()));
        }
        // Java 风格的 `+0000` 时区后缀
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Ok(Self(dt.date_naive()));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self(dt.date()));
        }

        Err(ReleaseDateError::Format(s.to_string()))
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for ReleaseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReleaseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Millis(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Millis(ms) => ReleaseDate::from_millis(ms).map_err(serde::de::Error::custom),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
