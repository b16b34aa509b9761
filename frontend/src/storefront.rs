//! 会话感知的顶层控制器
//!
//! 所有组件的后端调用都经过 `Storefront`：
//! - 从 `SessionStore` 取 token 交给 `StorefrontApi`
//! - 带会话的请求收到 401 时清空会话并跳转登录页（只在这里处理一次）
//! - 登录 / 注册成功后写入会话并导航

use ubuy_shared::protocol::{ApiRequest, GetProduct, ListProducts, Login, SearchProducts, Signup};
use ubuy_shared::{AuthResponse, Credentials, NewProduct, Product, ProductId};

use crate::api::StorefrontApi;
use crate::error::{ApiError, ApiResult};
use crate::session::{Session, SessionStore};
use crate::web::route::AppRoute;
use crate::web::{HttpClient, KeyValueStore};

/// 导航能力，由路由服务实现
pub trait Navigator {
    fn navigate(&self, route: AppRoute);
}

/// 认证方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

/// 认证成功的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    /// 拿到 token，已写入会话
    SignedIn(Session),
    /// 注册成功但服务端未下发 token，需要再登录一次
    AccountCreated,
}

#[derive(Debug, Clone)]
pub struct Storefront<C, S, N> {
    api: StorefrontApi<C>,
    session: SessionStore<S>,
    navigator: N,
}

impl<C, S, N> Storefront<C, S, N>
where
    C: HttpClient,
    S: KeyValueStore,
    N: Navigator,
{
    pub fn new(api: StorefrontApi<C>, session: SessionStore<S>, navigator: N) -> Self {
        Self {
            api,
            session,
            navigator,
        }
    }

    /// 当前会话（每次都从存储读取）
    pub fn session(&self) -> Option<Session> {
        self.session.load()
    }

    /// 统一的请求入口
    ///
    /// 会话失效时清空会话、跳转登录页，然后把原错误交还调用方。
    async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let token = if R::AUTHENTICATED {
            self.session.token()
        } else {
            None
        };

        let result = self.api.send(req, token.as_deref()).await;
        if let Err(ApiError::Unauthorized) = &result {
            tracing::warn!(path = %req.path(), "session rejected, signing out");
            self.session.clear();
            self.navigator.navigate(AppRoute::auth_failure_redirect());
        }
        result
    }

    pub async fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.call(&ListProducts).await
    }

    pub async fn search_products(&self, keyword: &str) -> ApiResult<Vec<Product>> {
        self.call(&SearchProducts {
            keyword: keyword.to_string(),
        })
        .await
    }

    /// 获取单个商品，服务端返回空响应时视为不存在
    pub async fn product(&self, id: ProductId) -> ApiResult<Product> {
        self.call(&GetProduct { id }).await?.ok_or(ApiError::NotFound)
    }

    pub async fn add_product(&self, product: NewProduct) -> ApiResult<Product> {
        self.call(&product).await
    }

    /// 登录或注册
    ///
    /// 拿到 token 时写入会话并回到首页；注册未下发 token 时转到登录页。
    pub async fn authenticate(
        &self,
        mode: AuthMode,
        credentials: Credentials,
    ) -> ApiResult<AuthOutcome> {
        let username = credentials.username.clone();
        let response = match mode {
            AuthMode::Login => self.call(&Login(credentials)).await?,
            AuthMode::Signup => self.call(&Signup(credentials)).await?,
        };

        match (response, mode) {
            (
                AuthResponse {
                    token: Some(token),
                    username: returned,
                    ..
                },
                _,
            ) if !token.is_empty() => {
                let session = Session {
                    token,
                    username: returned.unwrap_or(username),
                };
                self.session.save(&session);
                tracing::info!(username = %session.username, "signed in");
                self.navigator.navigate(AppRoute::auth_success_redirect());
                Ok(AuthOutcome::SignedIn(session))
            }
            (_, AuthMode::Signup) => {
                tracing::info!(%username, "account created");
                self.navigator.navigate(AppRoute::Login);
                Ok(AuthOutcome::AccountCreated)
            }
            (_, AuthMode::Login) => Err(ApiError::MissingToken),
        }
    }

    pub fn logout(&self) {
        self.session.clear();
        self.navigator.navigate(AppRoute::Home);
    }
}

#[cfg(test)]
pub(crate) mod tests;
