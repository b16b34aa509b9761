//! 运行时配置
//!
//! API 源地址在构建时通过 `UBUY_API_BASE` 注入，未设置时使用本地开发后端。

/// 默认的后端地址
const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// 不带结尾斜杠的 API 源地址
    pub api_base: String,
}

impl ClientConfig {
    pub fn new(api_base: &str) -> Self {
        Self {
            api_base: api_base.trim().trim_end_matches('/').to_string(),
        }
    }

    /// 读取构建时环境变量 `UBUY_API_BASE`
    pub fn from_build_env() -> Self {
        Self::new(option_env!("UBUY_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slashes() {
        assert_eq!(
            ClientConfig::new(" https://shop.example/// ").api_base,
            "https://shop.example"
        );
        assert_eq!(ClientConfig::default().api_base, "http://localhost:8080");
    }
}
