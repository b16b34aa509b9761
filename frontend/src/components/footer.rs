use chrono::Datelike;
use leptos::prelude::*;

use crate::web::route::AppRoute;
use crate::web::router::Link;

#[component]
pub fn Footer() -> impl IntoView {
    let year = chrono::Utc::now().year();

    view! {
        <footer class="footer footer-center p-8 mt-12 bg-base-200 text-base-content">
            <aside>
                <p class="text-2xl font-bold">"UBUY"</p>
                <p>"Your one-stop destination for quality products at the best prices."</p>
            </aside>
            <nav class="grid grid-flow-col gap-4">
                <Link to=AppRoute::Home class="link link-hover">"Home"</Link>
                <Link to=AppRoute::AddProduct class="link link-hover">"Add Product"</Link>
            </nav>
            <p class="text-sm opacity-70">{format!("© {year} UBUY. All rights reserved.")}</p>
        </footer>
    }
}
