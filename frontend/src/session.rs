//! 会话模块
//!
//! 管理已登录用户与共享服务（配置、REST 客户端、本地存储），与路由系统解耦。
//! 路由服务通过注入的会话信号判断是否存在用户。

use billed_shared::SessionUser;
use leptos::prelude::*;
use std::rc::Rc;

use crate::config::AppConfig;
use crate::store::Store;
use crate::web::storage::{KeyValueStorage, read_user};

/// 所有页面共享的服务
#[derive(Clone)]
pub struct AppServices {
    pub config: AppConfig,
    /// 为 `None` 时页面不访问后端
    pub store: Option<Store>,
    pub storage: Rc<dyn KeyValueStorage>,
}

/// 会话上下文
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// 当前用户（只读）
    pub user: ReadSignal<Option<SessionUser>>,
    set_user: WriteSignal<Option<SessionUser>>,
}

impl SessionContext {
    /// 从本地存储恢复用户
    pub fn new(storage: &dyn KeyValueStorage) -> Self {
        let (user, set_user) = signal(read_user(storage));
        Self { user, set_user }
    }

    /// 登录或登出后重新读取存储
    pub fn refresh(&self, storage: &dyn KeyValueStorage) {
        self.set_user.set(read_user(storage));
    }

    /// 会话状态信号（用于路由服务注入）
    pub fn has_session_signal(&self) -> Signal<bool> {
        let user = self.user;
        Signal::derive(move || user.get().is_some())
    }
}

/// 提供会话与服务到 Context
pub fn provide_session(services: AppServices) -> SessionContext {
    let session = SessionContext::new(services.storage.as_ref());
    provide_context(session);
    provide_context(StoredValue::new_local(services));
    session
}

/// 从 Context 获取会话上下文
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}

/// 从 Context 获取共享服务
pub fn use_services() -> AppServices {
    use_context::<StoredValue<AppServices, LocalStorage>>()
        .expect("AppServices should be provided")
        .get_value()
}
