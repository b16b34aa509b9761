use leptos::prelude::*;
use leptos::task::spawn_local;
use ubuy_shared::{Product, ProductId};

use crate::components::home::rupees;
use crate::error::ApiResult;
use crate::use_storefront;
use crate::web::router::use_router;

mod purchase;

use purchase::{DISCOUNT_PERCENT, DetailTab, PincodeCheck, Quantity, original_price};

const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/500x400?text=No+Image";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Failed,
    Loaded(Product),
}

impl DetailState {
    /// 不存在与其他错误展示同一提示
    pub fn from_result(result: ApiResult<Product>) -> Self {
        match result {
            Ok(product) => Self::Loaded(product),
            Err(_) => Self::Failed,
        }
    }
}

#[component]
pub fn ProductDetailsPage(id: ProductId) -> impl IntoView {
    let storefront = use_storefront();
    let (state, set_state) = signal(DetailState::Loading);

    spawn_local(async move {
        let result = storefront.product(id).await;
        if let Err(e) = &result {
            tracing::error!(%id, error = %e, "failed to load product");
        }
        set_state.set(DetailState::from_result(result));
    });

    move || match state.get() {
        DetailState::Loading => view! {
            <div class="flex justify-center py-24">
                <span class="loading loading-spinner loading-lg" role="status"></span>
            </div>
        }
        .into_any(),
        DetailState::Failed => view! {
            <div class="max-w-xl mx-auto mt-8 space-y-4">
                <div role="alert" class="alert alert-error justify-center">
                    "Product not found or error loading product details."
                </div>
                <BackButton />
            </div>
        }
        .into_any(),
        DetailState::Loaded(product) => view! { <ProductView product=product /> }.into_any(),
    }
}

#[component]
fn BackButton() -> impl IntoView {
    let router = use_router();
    view! {
        <button class="btn btn-outline btn-sm" on:click=move |_| router.back()>
            "← Back"
        </button>
    }
}

#[component]
fn ProductView(product: Product) -> impl IntoView {
    let image = product.image().unwrap_or(PLACEHOLDER_IMAGE).to_string();
    let original = original_price(product.price);

    view! {
        <div class="max-w-6xl mx-auto mt-4 space-y-8">
            <BackButton />

            <div class="grid md:grid-cols-2 gap-8">
                <figure class="rounded-box overflow-hidden shadow">
                    <img src=image alt=product.name.clone() class="w-full max-h-[400px] object-cover" />
                </figure>

                <div class="space-y-4">
                    <h1 class="text-3xl font-bold">{product.name.clone()}</h1>
                    <p class="text-base-content/60">"by " {product.brand.clone()}</p>

                    <div class="flex items-baseline gap-3">
                        <span class="text-3xl font-bold text-success">{rupees(&product.price)}</span>
                        {original.map(|price| view! {
                            <span class="line-through text-base-content/50">{rupees(&price)}</span>
                        })}
                        <span class="badge badge-success">{format!("{DISCOUNT_PERCENT}% off")}</span>
                    </div>

                    <QuantityStepper />
                    <DeliveryCheck />

                    <ul class="list-disc list-inside text-sm text-base-content/70">
                        <li>"Bank Offer: 10% instant discount on select cards"</li>
                        <li>"No cost EMI available"</li>
                        <li>"7 days replacement policy"</li>
                    </ul>

                    <div class="flex gap-3">
                        <button class="btn btn-primary btn-lg">"Add to Cart"</button>
                        <button class="btn btn-outline btn-error btn-lg">"Wishlist"</button>
                    </div>
                </div>
            </div>

            <DetailTabs product=product />
        </div>
    }
}

#[component]
fn QuantityStepper() -> impl IntoView {
    let quantity = RwSignal::new(Quantity::default());

    view! {
        <div class="flex items-center gap-3">
            <span class="font-semibold">"Quantity:"</span>
            <div class="join">
                <button
                    class="btn btn-sm join-item"
                    disabled=move || quantity.get().get() <= 1
                    on:click=move |_| quantity.update(|q| *q = q.decrement())
                >
                    "−"
                </button>
                <span class="btn btn-sm join-item no-animation">{move || quantity.get().get()}</span>
                <button
                    class="btn btn-sm join-item"
                    on:click=move |_| quantity.update(|q| *q = q.increment())
                >
                    "+"
                </button>
            </div>
        </div>
    }
}

#[component]
fn DeliveryCheck() -> impl IntoView {
    let pincode = RwSignal::new(String::new());
    let result = RwSignal::new(Option::<PincodeCheck>::None);

    view! {
        <div class="space-y-1">
            <div class="join">
                <input
                    class="input input-bordered input-sm join-item"
                    placeholder="Enter pincode"
                    maxlength="6"
                    prop:value=pincode
                    on:input=move |ev| {
                        pincode.set(event_target_value(&ev));
                        result.set(None);
                    }
                />
                <button
                    class="btn btn-sm join-item"
                    on:click=move |_| result.set(Some(PincodeCheck::check(&pincode.get())))
                >
                    "Check"
                </button>
            </div>
            {move || {
                result
                    .get()
                    .map(|check| {
                        let class = match check {
                            PincodeCheck::Available => "text-sm text-success",
                            PincodeCheck::Invalid => "text-sm text-error",
                        };
                        view! { <p class=class>{check.message()}</p> }
                    })
            }}
        </div>
    }
}

#[component]
fn DetailTabs(product: Product) -> impl IntoView {
    let active = RwSignal::new(DetailTab::default());
    let description = product
        .description()
        .unwrap_or("No description available.")
        .to_string();

    let specs: Vec<(&'static str, String)> = [
        ("Product ID", Some(product.id.to_string())),
        ("Brand", Some(product.brand.clone())),
        ("Category", Some(product.category.clone())),
        ("Price", Some(rupees(&product.price))),
        ("Release Date", product.release_date.map(|d| d.display())),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| (label, v)))
    .collect();

    view! {
        <div class="card bg-base-100 shadow">
            <div role="tablist" class="tabs tabs-bordered px-4 pt-2">
                {DetailTab::ALL
                    .into_iter()
                    .map(|tab| {
                        view! {
                            <a
                                role="tab"
                                class=move || if active.get() == tab { "tab tab-active" } else { "tab" }
                                on:click=move |_| active.set(tab)
                            >
                                {tab.label()}
                            </a>
                        }
                    })
                    .collect_view()}
            </div>
            <div class="card-body">
                {move || match active.get() {
                    DetailTab::Description => view! {
                        <p class="text-base-content/70">{description.clone()}</p>
                    }
                    .into_any(),
                    DetailTab::Specifications => view! {
                        <table class="table">
                            <tbody>
                                {specs
                                    .iter()
                                    .map(|(label, value)| view! {
                                        <tr>
                                            <td class="font-semibold">{*label}</td>
                                            <td>{value.clone()}</td>
                                        </tr>
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any(),
                }}
            </div>
        </div>
    }
}
