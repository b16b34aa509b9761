//! 搜索状态与过期响应保护
//!
//! 每次输入都会分配一个递增序号，只有最新一次查询的结果能被发布。
//! 较早发出、较晚返回的响应直接丢弃。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;
use ubuy_shared::Product;

use crate::storefront::{Navigator, Storefront};
use crate::web::{HttpClient, KeyValueStore};

/// 搜索状态
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    /// 没有进行中的搜索，显示完整商品列表
    #[default]
    Inactive,
    /// 搜索结果（可能为空）
    Active(Vec<Product>),
}

impl SearchState {
    pub fn results(&self) -> Option<&[Product]> {
        match self {
            SearchState::Inactive => None,
            SearchState::Active(products) => Some(products),
        }
    }
}

/// 查询序号分配器
#[derive(Debug, Clone, Default)]
pub struct SearchController {
    latest: Arc<AtomicU64>,
}

impl SearchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一次新的查询，之前的查询随之作废
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    /// 处理一次输入
    ///
    /// 返回 `None` 表示结果已过期，调用方不应发布。
    /// 空白输入立即回到 `Inactive`；请求失败同样回到 `Inactive`。
    /// 非空输入不做裁剪。
    pub async fn query<C, S, N>(
        &self,
        storefront: &Storefront<C, S, N>,
        input: &str,
    ) -> Option<SearchState>
    where
        C: HttpClient,
        S: KeyValueStore,
        N: Navigator,
    {
        let seq = self.issue();
        if input.trim().is_empty() {
            return Some(SearchState::Inactive);
        }

        let keyword = input;
        let state = match storefront.search_products(keyword).await {
            Ok(products) => SearchState::Active(products),
            Err(e) => {
                tracing::warn!(%keyword, error = %e, "search failed");
                SearchState::Inactive
            }
        };

        if self.is_current(seq) {
            Some(state)
        } else {
            tracing::debug!(%keyword, seq, "dropping stale search response");
            None
        }
    }
}

/// 全局共享的搜索结果，由导航栏写入、首页读取
#[derive(Clone, Copy)]
pub struct SearchResults {
    pub state: RwSignal<SearchState>,
    pub controller: StoredValue<SearchController>,
}

impl SearchResults {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(SearchState::Inactive),
            controller: StoredValue::new(SearchController::new()),
        }
    }
}

impl Default for SearchResults {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_search() -> SearchResults {
    let results = SearchResults::new();
    provide_context(results);
    results
}

pub fn use_search() -> SearchResults {
    use_context::<SearchResults>().expect("SearchResults should be provided")
}
