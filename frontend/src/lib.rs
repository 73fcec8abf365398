//! Billed 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session`: 会话与共享服务
//! - `store`: REST 客户端
//! - `containers`: 页面逻辑，不依赖 DOM
//! - `components`: UI 组件层

pub mod config;
pub mod containers;
mod log;
pub mod session;
pub mod store;
#[cfg(test)]
mod test_support;
pub mod web;

mod components {
    pub mod bills;
    pub mod dashboard;
    mod icons;
    mod layout;
    mod loading;
    pub mod login;
    mod modal;
    pub mod new_bill;
}

use crate::components::bills::BillsPage;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::new_bill::NewBillPage;
use crate::config::AppConfig;
use crate::session::{AppServices, provide_session};
use crate::store::Store;
use crate::web::http::FetchTransport;
use crate::web::storage::{KeyValueStorage, LocalStorage as BrowserStorage};

use leptos::prelude::*;
use std::rc::Rc;

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Bills => view! { <BillsPage /> }.into_any(),
        AppRoute::NewBill => view! { <NewBillPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建共享服务
    let config = AppConfig::from_build_env();
    let storage: Rc<dyn KeyValueStorage> = Rc::new(BrowserStorage);
    let store = Store::from_config(&config, Rc::new(FetchTransport), storage.clone());

    // 2. 会话上下文（从 LocalStorage 恢复用户）
    let session = provide_session(AppServices {
        config,
        store: Some(store),
        storage,
    });

    // 3. 会话信号注入路由服务
    let has_session = session.has_session_signal();

    view! {
        <Router has_session=has_session>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
