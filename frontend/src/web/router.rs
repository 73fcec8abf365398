//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 导航只接受四个已知路由；未知路径在导航时不做任何事，
//! 只有首次加载时才回退到登录页。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;
use crate::containers::Navigator;
use crate::log::log_info;

/// 登录页的背景色
pub const LOGIN_BACKGROUND: &str = "#0E5AE5";
pub const DEFAULT_BACKGROUND: &str = "#fff";

/// 获取当前浏览器位置 (pathname, hash)
fn current_location() -> (String, String) {
    let location = web_sys::window().map(|w| w.location());
    let pathname = location
        .as_ref()
        .and_then(|l| l.pathname().ok())
        .unwrap_or_else(|| "/".to_string());
    let hash = location.and_then(|l| l.hash().ok()).unwrap_or_default();
    (pathname, hash)
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

fn set_body_background(color: &str) {
    if let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    {
        let _ = body.style().set_property("background-color", color);
    }
}

pub fn background_for(route: AppRoute) -> &'static str {
    match route {
        AppRoute::Login => LOGIN_BACKGROUND,
        _ => DEFAULT_BACKGROUND,
    }
}

/// 浏览器后退/前进后应显示的路由
///
/// 回到根路径且无用户时为登录页；有用户时回到记录的上一个位置；
/// 其余情况不做任何事。
pub fn popstate_target(pathname: &str, has_session: bool, previous: AppRoute) -> Option<AppRoute> {
    if has_session {
        Some(previous)
    } else if pathname == AppRoute::Login.to_path() {
        Some(AppRoute::Login)
    } else {
        None
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 会话状态以注入的信号提供，与存储层解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 浏览器后退/前进时返回的位置
    previous_location: RwSignal<AppRoute>,
    /// 是否存在已登录用户（注入的信号）
    has_session: Signal<bool>,
}

impl RouterService {
    fn new(has_session: Signal<bool>) -> Self {
        let (pathname, hash) = current_location();
        let initial_route = AppRoute::from_location(&pathname, &hash);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            previous_location: RwSignal::new(AppRoute::Login),
            has_session,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 推入 History 并渲染目标页面
    pub fn navigate(&self, route: AppRoute) {
        push_history_state(route.to_path());
        self.set_route.set(route);
    }

    pub fn set_previous_location(&self, route: AppRoute) {
        self.previous_location.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let router = *self;

        let closure = Closure::<dyn Fn()>::new(move || {
            let (pathname, _) = current_location();
            let has_session = router.has_session.get_untracked();
            let previous = router.previous_location.get_untracked();

            match popstate_target(&pathname, has_session, previous) {
                Some(route) if has_session => {
                    log_info!("[Router] History navigation, returning to {}.", route);
                    router.navigate(route);
                }
                // 浏览器已经回到根路径，无需再推入 History
                Some(route) => router.set_route.set(route),
                None => {}
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 登录页使用蓝色背景，其他页面为白色
    fn setup_background(&self) {
        let current_route = self.current_route;
        Effect::new(move |_| {
            set_body_background(background_for(current_route.get()));
        });
    }
}

impl Navigator for RouterService {
    fn navigate(&self, route: AppRoute) {
        RouterService::navigate(self, route);
    }

    fn set_previous_location(&self, route: AppRoute) {
        RouterService::set_previous_location(self, route);
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(has_session: Signal<bool>) -> RouterService {
    let router = RouterService::new(has_session);

    router.init_popstate_listener();
    router.setup_background();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 会话状态信号
    has_session: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(has_session);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。每次导航都会整体替换页面。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_per_route() {
        assert_eq!(background_for(AppRoute::Login), "#0E5AE5");
        assert_eq!(background_for(AppRoute::Bills), "#fff");
        assert_eq!(background_for(AppRoute::Dashboard), "#fff");
    }

    #[test]
    fn test_popstate_root_without_session_shows_login() {
        assert_eq!(popstate_target("/", false, AppRoute::Bills), Some(AppRoute::Login));
    }

    #[test]
    fn test_popstate_with_session_returns_to_previous() {
        assert_eq!(popstate_target("/", true, AppRoute::Bills), Some(AppRoute::Bills));
        assert_eq!(
            popstate_target("/other", true, AppRoute::Dashboard),
            Some(AppRoute::Dashboard)
        );
    }

    #[test]
    fn test_popstate_elsewhere_without_session_does_nothing() {
        assert_eq!(popstate_target("/other", false, AppRoute::Bills), None);
        assert_eq!(popstate_target("", false, AppRoute::Login), None);
    }
}
