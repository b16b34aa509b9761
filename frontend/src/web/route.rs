//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其属性。

use std::fmt::Display;

use ubuy_shared::ProductId;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 商品列表 (默认路由)
    #[default]
    Home,
    /// 新增商品
    AddProduct,
    /// 商品详情
    ProductDetail(ProductId),
    Login,
    Signup,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/add_product" => Self::AddProduct,
            "/login" => Self::Login,
            "/signup" => Self::Signup,
            _ => trimmed
                .strip_prefix("/product/")
                .and_then(|id| id.parse().ok())
                .map(Self::ProductDetail)
                .unwrap_or(Self::NotFound),
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::AddProduct => "/add_product".to_string(),
            Self::ProductDetail(id) => format!("/product/{id}"),
            Self::Login => "/login".to_string(),
            Self::Signup => "/signup".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// 已登录用户是否应该离开此路由（登录页、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Signup)
    }

    /// 登录成功后的落地页
    pub fn auth_success_redirect() -> Self {
        Self::Home
    }

    /// 会话失效时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
