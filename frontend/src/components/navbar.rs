use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::search::use_search;
use crate::theme::ThemeToggle;
use crate::use_storefront;
use crate::web::route::AppRoute;
use crate::web::router::{Link, use_router};

#[component]
pub fn Navbar() -> impl IntoView {
    let storefront = use_storefront();
    let router = use_router();
    let search = use_search();
    let keyword = RwSignal::new(String::new());

    // 每次路由变化都重新读取会话
    let session = Memo::new({
        let storefront = storefront.clone();
        move |_| {
            router.current_route().track();
            storefront.session()
        }
    });

    let on_search = {
        let storefront = storefront.clone();
        move |ev: leptos::web_sys::Event| {
            let input = event_target_value(&ev);
            keyword.set(input.clone());

            let storefront = storefront.clone();
            let controller = search.controller.get_value();
            spawn_local(async move {
                if let Some(state) = controller.query(&storefront, &input).await {
                    search.state.set(state);
                }
            });
        }
    };

    let on_logout = move |_| storefront.logout();

    view! {
        <header class="navbar bg-base-100 shadow-md sticky top-0 z-40 px-4">
            <div class="flex-1 gap-2">
                <Link to=AppRoute::Home class="btn btn-ghost text-xl font-bold">"UBUY"</Link>
                <ul class="menu menu-horizontal px-1 hidden md:flex">
                    <li><Link to=AppRoute::Home>"Home"</Link></li>
                    <li><Link to=AppRoute::AddProduct>"Add Product"</Link></li>
                </ul>
            </div>
            <div class="flex-none gap-2">
                <input
                    type="search"
                    class="input input-bordered input-sm w-40 md:w-64"
                    placeholder="Search products..."
                    aria-label="Search"
                    prop:value=keyword
                    on:input=on_search
                />
                <ThemeToggle />
                {move || match session.get() {
                    Some(current) => view! {
                        <span class="text-sm font-semibold">{current.username}</span>
                        <button class="btn btn-outline btn-sm" on:click=on_logout.clone()>
                            "Logout"
                        </button>
                    }
                    .into_any(),
                    None => view! {
                        <Link to=AppRoute::Login class="btn btn-ghost btn-sm">"Login"</Link>
                        <Link to=AppRoute::Signup class="btn btn-primary btn-sm">"Signup"</Link>
                    }
                    .into_any(),
                }}
            </div>
        </header>
    }
}
