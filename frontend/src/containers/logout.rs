use std::rc::Rc;

use super::Navigator;
use crate::web::route::AppRoute;
use crate::web::storage::KeyValueStorage;

/// 侧边栏的登出按钮
pub struct LogoutContainer {
    navigator: Rc<dyn Navigator>,
    storage: Rc<dyn KeyValueStorage>,
}

impl LogoutContainer {
    pub fn new(navigator: Rc<dyn Navigator>, storage: Rc<dyn KeyValueStorage>) -> Self {
        Self { navigator, storage }
    }

    /// 清除会话并返回登录页
    pub fn handle_click(&self) {
        self.storage.clear();
        self.navigator.navigate(AppRoute::Login);
    }
}
