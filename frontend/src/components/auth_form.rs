use leptos::prelude::*;
use leptos::task::spawn_local;
use ubuy_shared::Credentials;

use crate::error::ApiError;
use crate::storefront::AuthMode;
use crate::use_storefront;
use crate::web::route::AppRoute;
use crate::web::router::Link;

#[derive(Clone, Copy)]
struct AuthCopy {
    title: &'static str,
    submit: &'static str,
    fallback_error: &'static str,
    switch_prompt: &'static str,
    switch_label: &'static str,
    switch_to: AppRoute,
}

fn copy(mode: AuthMode) -> AuthCopy {
    match mode {
        AuthMode::Login => AuthCopy {
            title: "Login",
            submit: "Login",
            fallback_error: "Login failed. Please try again.",
            switch_prompt: "Don't have an account? ",
            switch_label: "Sign up",
            switch_to: AppRoute::Signup,
        },
        AuthMode::Signup => AuthCopy {
            title: "Create Account",
            submit: "Sign Up",
            fallback_error: "Signup failed. Please try again.",
            switch_prompt: "Already have an account? ",
            switch_label: "Login",
            switch_to: AppRoute::Login,
        },
    }
}

/// 失败时展示的提示：优先使用服务端消息
pub fn error_message(mode: AuthMode, error: &ApiError) -> String {
    error
        .server_message()
        .unwrap_or(copy(mode).fallback_error)
        .to_string()
}

#[component]
pub fn AuthPage(mode: AuthMode) -> impl IntoView {
    let storefront = use_storefront();
    let text = copy(mode);

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (submitting, set_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_submitting.set(true);
        set_error_msg.set(None);

        let credentials = Credentials {
            username: username.get_untracked(),
            password: password.get_untracked(),
        };
        let storefront = storefront.clone();
        spawn_local(async move {
            // 成功时的导航由 Storefront 完成
            if let Err(e) = storefront.authenticate(mode, credentials).await {
                tracing::warn!(?mode, error = %e, "authentication failed");
                set_error_msg.set(Some(error_message(mode, &e)));
            }
            set_submitting.set(false);
        });
    };

    // 编辑任一字段都会清除错误提示
    let bind = move |field: RwSignal<String>| {
        move |ev: leptos::web_sys::Event| {
            field.set(event_target_value(&ev));
            set_error_msg.set(None);
        }
    };

    view! {
        <div class="hero min-h-[70vh]">
            <div class="hero-content flex-col w-full max-w-md">
                <h1 class="text-3xl font-bold">{text.title}</h1>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || {
                            error_msg
                                .get()
                                .map(|msg| view! {
                                    <div role="alert" class="alert alert-error text-sm py-2">
                                        <span>{msg}</span>
                                    </div>
                                })
                        }}

                        <div class="form-control">
                            <label class="label" for="username">
                                <span class="label-text">"Username"</span>
                            </label>
                            <input
                                id="username"
                                type="text"
                                autocomplete="username"
                                class="input input-bordered"
                                required
                                prop:value=username
                                on:input=bind(username)
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                class="input input-bordered"
                                required
                                prop:value=password
                                on:input=bind(password)
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || submitting.get()>
                                {move || if submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    text.submit.into_any()
                                }}
                            </button>
                        </div>
                        <p class="text-sm text-center mt-2">
                            {text.switch_prompt}
                            <Link to=text.switch_to class="link link-primary">{text.switch_label}</Link>
                        </p>
                    </form>
                </div>
            </div>
        </div>
    }
}
