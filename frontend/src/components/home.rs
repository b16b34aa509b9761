use leptos::prelude::*;
use leptos::task::spawn_local;
use rust_decimal::Decimal;
use ubuy_shared::{Product, ProductId};

use crate::search::{SearchState, use_search};
use crate::storefront::Navigator;
use crate::use_storefront;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x200?text=No+Image";

/// 商品列表加载状态
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    Loading,
    Loaded(Vec<Product>),
    Failed,
}

/// 决定首页展示的内容：有搜索时展示搜索结果，否则展示加载状态
pub fn displayed(search: &SearchState, fetched: &ListState) -> ListState {
    match search {
        SearchState::Active(products) => ListState::Loaded(products.clone()),
        SearchState::Inactive => fetched.clone(),
    }
}

/// 商品卡片的列表键
fn card_key(product: &Product) -> ProductId {
    product.id
}

/// 价格展示，带卢比符号
pub(crate) fn rupees(price: &Decimal) -> String {
    format!("₹{}", price.normalize())
}

#[component]
pub fn HomePage() -> impl IntoView {
    let storefront = use_storefront();
    let search = use_search();
    let (fetched, set_fetched) = signal(ListState::Loading);

    // 挂载时加载一次，失败不重试
    spawn_local(async move {
        match storefront.list_products().await {
            Ok(products) => {
                tracing::debug!(count = products.len(), "products loaded");
                set_fetched.set(ListState::Loaded(products));
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load products");
                set_fetched.set(ListState::Failed);
            }
        }
    });

    move || match displayed(&search.state.get(), &fetched.get()) {
        ListState::Loading => view! {
            <div class="flex justify-center py-24">
                <span class="loading loading-spinner loading-lg text-primary"></span>
            </div>
        }
        .into_any(),
        ListState::Failed => view! {
            <h2 class="text-center text-2xl py-40">"Something went wrong..."</h2>
        }
        .into_any(),
        ListState::Loaded(products) if products.is_empty() => view! {
            <p class="text-center py-24 text-base-content/60">"No products found."</p>
        }
        .into_any(),
        ListState::Loaded(products) => view! {
            <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-6">
                <For
                    each=move || products.clone()
                    key=card_key
                    children=|product| view! { <ProductCard product=product /> }
                />
            </div>
        }
        .into_any(),
    }
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    let router = use_router();
    let id = product.id;
    let image = product.image().unwrap_or(PLACEHOLDER_IMAGE).to_string();

    view! {
        <div
            class="card bg-base-100 shadow-md hover:shadow-xl cursor-pointer transition-shadow"
            on:click=move |_| router.navigate(AppRoute::ProductDetail(id))
        >
            <figure class="h-48 overflow-hidden">
                <img src=image alt=product.name.clone() class="object-cover w-full h-full" />
            </figure>
            <div class="card-body p-4">
                <div class="flex items-start justify-between gap-2">
                    <h5 class="card-title text-base">{product.name.clone()}</h5>
                    <span class="badge badge-ghost">{product.brand.clone()}</span>
                </div>
                <div class="card-actions items-center justify-between mt-2">
                    <span class="text-lg font-bold">{rupees(&product.price)}</span>
                    // 购物车尚未实现，只阻止冒泡避免进入详情页
                    <button
                        class="btn btn-primary btn-sm"
                        on:click=|ev: web_sys::MouseEvent| ev.stop_propagation()
                    >
                        "Add"
                    </button>
                </div>
            </div>
        </div>
    }
}
