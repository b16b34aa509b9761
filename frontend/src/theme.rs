//! 明暗主题
//!
//! 主题偏好存于本地存储的 `theme` 键，值为 body 上使用的类名。

use leptos::prelude::*;

use crate::web::{KeyValueStore, LocalStorage};

const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_class(&self) -> &'static str {
        match self {
            Theme::Light => "light-theme",
            Theme::Dark => "dark-theme",
        }
    }

    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "light-theme" => Some(Theme::Light),
            "dark-theme" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(&self) -> bool {
        *self == Theme::Dark
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThemeStore<S> {
    storage: S,
}

impl<S: KeyValueStore> ThemeStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// 读取已保存的主题，缺失或无法识别时为浅色
    pub fn load(&self) -> Theme {
        self.storage
            .get(THEME_KEY)
            .and_then(|class| Theme::from_class(&class))
            .unwrap_or_default()
    }

    pub fn save(&self, theme: Theme) {
        if !self.storage.set(THEME_KEY, theme.as_class()) {
            tracing::warn!(theme = theme.as_class(), "failed to persist theme");
        }
    }

    /// 切换并保存，返回新主题
    pub fn toggle(&self) -> Theme {
        let next = self.load().toggled();
        self.save(next);
        next
    }
}

/// 把主题类名写到 body 上
pub fn apply_theme(theme: Theme) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        body.set_class_name(theme.as_class());
    }
}

/// 主题切换按钮
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let store = ThemeStore::new(LocalStorage);
    let (theme, set_theme) = signal(store.load());

    Effect::new(move |_| apply_theme(theme.get()));

    let on_click = move |_| set_theme.set(store.toggle());

    view! {
        <button
            class="btn btn-ghost btn-circle"
            aria-label="Toggle theme"
            on:click=on_click
        >
            {move || if theme.get().is_dark() { "☀" } else { "☾" }}
        </button>
    }
}
