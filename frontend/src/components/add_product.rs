use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::use_storefront;

mod form_state;

use form_state::{Banner, FormState, settle};

#[component]
pub fn AddProductPage() -> impl IntoView {
    let storefront = use_storefront();
    let form = FormState::new();
    let (submitting, set_submitting) = signal(false);
    let (banner, set_banner) = signal(Option::<Banner>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        set_banner.set(None);

        let request = form.snapshot();
        let storefront = storefront.clone();
        spawn_local(async move {
            let result = storefront.add_product(request).await;
            match &result {
                Ok(product) => tracing::info!(id = %product.id, "product added"),
                Err(e) => tracing::error!(error = %e, "failed to add product"),
            }
            set_banner.set(Some(settle(&form, &result)));
            set_submitting.set(false);
        });
    };

    let on_reset = move |_| {
        form.reset();
        set_banner.set(None);
    };

    view! {
        <div class="max-w-3xl mx-auto mt-4">
            <div class="card bg-base-100 shadow-xl">
                <div class="card-body">
                    <h2 class="card-title text-2xl">"Add New Product"</h2>

                    {move || {
                        banner
                            .get()
                            .map(|b| view! {
                                <div role="alert" class=b.class()>
                                    <span>{b.message()}</span>
                                </div>
                            })
                    }}

                    <form on:submit=on_submit class="space-y-4">
                        <div class="grid md:grid-cols-2 gap-4">
                            <TextField id="prodName" label="Product Name" value=form.name required=true />
                            <TextField
                                id="prodPrice"
                                label="Price"
                                value=form.price
                                input_type="number"
                                required=true
                            />
                            <TextField id="brand" label="Brand" value=form.brand required=true />
                            <TextField id="category" label="Category" value=form.category required=true />
                        </div>

                        <div class="form-control">
                            <label for="description" class="label">
                                <span class="label-text">"Description"</span>
                            </label>
                            <textarea
                                id="description"
                                rows="4"
                                class="textarea textarea-bordered"
                                prop:value=form.description
                                on:input=move |ev| form.description.set(event_target_value(&ev))
                            ></textarea>
                        </div>

                        <TextField id="imageUrl" label="Image URL" value=form.image_url input_type="url" />

                        {move || {
                            form.preview()
                                .map(|url| view! {
                                    <img src=url alt="Preview" class="rounded-box max-h-48 object-contain" />
                                })
                        }}

                        <div class="flex gap-3 justify-end">
                            <button type="button" class="btn btn-ghost" on:click=on_reset>
                                "Reset Form"
                            </button>
                            <button type="submit" class="btn btn-primary" disabled=move || submitting.get()>
                                {move || if submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Adding..." }.into_any()
                                } else {
                                    "Add Product".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}

/// 单行输入框，直接绑定到表单字段
#[component]
fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label for=id class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                name=id
                type=input_type
                step=(input_type == "number").then_some("0.01")
                class="input input-bordered"
                required=required
                prop:value=value
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}
