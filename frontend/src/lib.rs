//! UBUY 商城前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `storefront`: 会话感知的后端调用入口
//! - `components`: UI 组件层

mod api;
mod config;
mod error;
mod search;
mod session;
mod storefront;
mod theme;
mod components {
    pub mod add_product;
    pub mod auth_form;
    pub mod footer;
    pub mod home;
    pub mod navbar;
    pub mod product_details;
}

use crate::api::StorefrontApi;
use crate::components::add_product::AddProductPage;
use crate::components::auth_form::AuthPage;
use crate::components::footer::Footer;
use crate::components::home::HomePage;
use crate::components::navbar::Navbar;
use crate::components::product_details::ProductDetailsPage;
use crate::config::ClientConfig;
use crate::search::provide_search;
use crate::session::SessionStore;
use crate::storefront::{AuthMode, Storefront};

use leptos::prelude::*;

// 原生 Web API 封装模块
// 浏览器相关能力都在 trait 之后，业务代码可以在原生测试中运行。
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::{FetchClient, HttpClient, HttpRequest, HttpResponse, TransportError};
    #[cfg(test)]
    pub use storage::MemoryStorage;
    pub use storage::{KeyValueStore, LocalStorage};
}

use web::route::AppRoute;
use web::router::{RouterOutlet, RouterService, provide_router};
use web::{FetchClient, LocalStorage};

/// 应用使用的具体 Storefront
pub(crate) type AppStorefront = Storefront<FetchClient, LocalStorage, RouterService>;

/// 从 Context 获取 Storefront
pub(crate) fn use_storefront() -> AppStorefront {
    use_context::<AppStorefront>().expect("Storefront should be provided")
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::AddProduct => view! { <AddProductPage /> }.into_any(),
        AppRoute::ProductDetail(id) => view! { <ProductDetailsPage id=id /> }.into_any(),
        AppRoute::Login => view! { <AuthPage mode=AuthMode::Login /> }.into_any(),
        AppRoute::Signup => view! { <AuthPage mode=AuthMode::Signup /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 认证检查信号，注入路由服务实现守卫
    let is_authenticated =
        Signal::derive(|| SessionStore::new(LocalStorage).load().is_some());
    let router = provide_router(is_authenticated);

    // 2. Storefront 依赖路由服务完成会话失效后的跳转
    let config = ClientConfig::from_build_env();
    tracing::info!(api_base = %config.api_base, "starting storefront");
    let storefront = Storefront::new(
        StorefrontApi::new(FetchClient, &config),
        SessionStore::new(LocalStorage),
        router,
    );
    provide_context(storefront);

    // 3. 导航栏写入、首页读取的搜索状态
    provide_search();

    view! {
        <div class="min-h-screen flex flex-col bg-base-200">
            <Navbar />
            <main class="flex-1 w-full max-w-7xl mx-auto p-4 md:p-8">
                <RouterOutlet matcher=route_matcher />
            </main>
            <Footer />
        </div>
    }
}
