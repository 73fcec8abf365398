//! 数据页面的加载与错误视图

use leptos::prelude::*;

/// 页面首次加载的进度
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    /// 失败请求的错误信息
    Failed(String),
    Ready(T),
}

#[component]
pub fn LoadingPage() -> impl IntoView {
    view! {
        <div id="loading" data-testid="loading" class="flex items-center justify-center min-h-[50vh]">
            <span class="loading loading-spinner loading-lg text-primary"></span>
            <span class="ml-2">"Loading..."</span>
        </div>
    }
}

#[component]
pub fn ErrorPage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[50vh] gap-2">
            <h1 class="text-2xl font-bold text-error">"Erreur"</h1>
            <div data-testid="error-message" class="text-base-content/70">{message}</div>
        </div>
    }
}
