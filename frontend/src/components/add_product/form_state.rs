//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换

use leptos::prelude::*;
use ubuy_shared::NewProduct;

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub name: RwSignal<String>,
    pub price: RwSignal<String>,
    pub brand: RwSignal<String>,
    pub category: RwSignal<String>,
    pub description: RwSignal<String>,
    pub image_url: RwSignal<String>,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            brand: RwSignal::new(String::new()),
            category: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            image_url: RwSignal::new(String::new()),
        }
    }

    /// 清空所有字段
    pub fn reset(&self) {
        for field in self.fields() {
            field.set(String::new());
        }
    }

    /// 当前表单内容，原样提交
    pub fn snapshot(&self) -> NewProduct {
        NewProduct {
            name: self.name.get_untracked(),
            price: self.price.get_untracked(),
            description: self.description.get_untracked(),
            brand: self.brand.get_untracked(),
            category: self.category.get_untracked(),
            image_url: self.image_url.get_untracked(),
        }
    }

    /// 图片预览地址，空白时不预览
    pub fn preview(&self) -> Option<String> {
        let url = self.image_url.get();
        (!url.trim().is_empty()).then_some(url)
    }

    fn fields(&self) -> [RwSignal<String>; 6] {
        [
            self.name,
            self.price,
            self.brand,
            self.category,
            self.description,
            self.image_url,
        ]
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// 提交结果提示
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    Success,
    Failure,
}

impl Banner {
    pub fn message(&self) -> &'static str {
        match self {
            Banner::Success => "Product added successfully!",
            Banner::Failure => "Error adding product. Please try again.",
        }
    }

    pub fn class(&self) -> &'static str {
        match self {
            Banner::Success => "alert alert-success",
            Banner::Failure => "alert alert-error",
        }
    }
}

/// 根据提交结果更新表单，成功时清空
pub fn settle<T, E>(form: &FormState, result: &Result<T, E>) -> Banner {
    match result {
        Ok(_) => {
            form.reset();
            Banner::Success
        }
        Err(_) => Banner::Failure,
    }
}
