//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现了"监听 -> 验证 -> 处理 -> 加载"的导航流程。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::storefront::Navigator;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 导航时对 History 的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryAction {
    Push,
    Replace,
    /// 地址栏已是目标地址（首次加载、前进后退）
    Keep,
}

/// 守卫重定向时替换地址；否则只在主动导航时压栈，
/// 未知路径保持用户输入的地址，不改写为 /404
fn history_action(target: AppRoute, resolved: AppRoute, use_push: bool) -> HistoryAction {
    if resolved != target {
        HistoryAction::Replace
    } else if use_push {
        HistoryAction::Push
    } else {
        HistoryAction::Keep
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 通过注入认证检查信号实现与会话存储的解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号）
    is_authenticated: Signal<bool>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        let router = Self {
            current_route,
            set_route,
            is_authenticated,
        };
        // 首次加载时也要经过守卫，例如已登录用户直接打开 /login
        router.navigate_to_route(initial_route, false);
        router
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 守卫：返回实际应落地的路由
    fn resolve(&self, target: AppRoute) -> AppRoute {
        if target.should_redirect_when_authenticated() && self.is_authenticated.get_untracked() {
            tracing::debug!(%target, "already authenticated, redirecting");
            AppRoute::auth_success_redirect()
        } else {
            target
        }
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 为主动导航（pushState），false 表示地址栏已指向目标
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let route = self.resolve(target_route);

        match history_action(target_route, route, use_push) {
            HistoryAction::Push => push_history_state(&route.to_path()),
            HistoryAction::Replace => replace_history_state(&route.to_path()),
            HistoryAction::Keep => {}
        }
        tracing::debug!(%route, "navigate");
        self.set_route.set(route);
    }

    /// 浏览器后退
    pub fn back(&self) {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                let _ = history.back();
                return;
            }
        }
        self.navigate_to_route(AppRoute::Home, true);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let target_route = AppRoute::from_path(&current_path());
            router.navigate_to_route(target_route, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

impl Navigator for RouterService {
    fn navigate(&self, route: AppRoute) {
        self.navigate_to_route(route, true);
    }
}

/// 提供路由服务到 Context 并初始化
pub fn provide_router(is_authenticated: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated);
    router.init_popstate_listener();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure provide_router was called.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 站内链接，拦截点击改走 History API
#[component]
pub fn Link(
    to: AppRoute,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(to);
    };

    view! {
        <a href=to.to_path() class=class on:click=on_click>
            {children()}
        </a>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ubuy_shared::ProductId;

    #[test]
    fn unknown_path_keeps_typed_address() {
        assert_eq!(
            history_action(AppRoute::NotFound, AppRoute::NotFound, false),
            HistoryAction::Keep
        );
        let detail = AppRoute::ProductDetail(ProductId::new(5));
        assert_eq!(history_action(detail, detail, false), HistoryAction::Keep);
    }

    #[test]
    fn guard_redirect_replaces_address() {
        assert_eq!(
            history_action(AppRoute::Login, AppRoute::Home, false),
            HistoryAction::Replace
        );
        assert_eq!(
            history_action(AppRoute::Signup, AppRoute::Home, true),
            HistoryAction::Replace
        );
    }

    #[test]
    fn link_navigation_pushes() {
        assert_eq!(
            history_action(AppRoute::AddProduct, AppRoute::AddProduct, true),
            HistoryAction::Push
        );
    }
}
