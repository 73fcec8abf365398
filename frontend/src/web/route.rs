//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖于 DOM。路由以 hash 表示（`#employee/bills`），
//! 登录页为根路径 `/`。

use billed_shared::UserType;
use std::fmt::Display;

pub const PATH_LOGIN: &str = "/";
pub const PATH_BILLS: &str = "#employee/bills";
pub const PATH_NEW_BILL: &str = "#employee/bill/new";
pub const PATH_DASHBOARD: &str = "#admin/dashboard";

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    Bills,
    NewBill,
    Dashboard,
}

/// 员工侧边栏图标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutIcon {
    /// `layout-icon1`，账单列表
    Window,
    /// `layout-icon2`，新建账单表单
    Mail,
}

impl LayoutIcon {
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::Window => "layout-icon1",
            Self::Mail => "layout-icon2",
        }
    }

    pub fn test_id(&self) -> &'static str {
        match self {
            Self::Window => "icon-window",
            Self::Mail => "icon-mail",
        }
    }

    /// 点击图标时导航到的路径
    pub fn href(&self) -> &'static str {
        match self {
            Self::Window => PATH_BILLS,
            Self::Mail => PATH_NEW_BILL,
        }
    }
}

impl AppRoute {
    pub const ALL: [AppRoute; 4] = [Self::Login, Self::Bills, Self::NewBill, Self::Dashboard];

    /// 与四个已知路径精确匹配，供导航使用
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.to_path() == path)
    }

    /// 解析首次加载或刷新时显示的页面
    ///
    /// 非空 hash 优先于 pathname；无法识别时显示登录页。
    pub fn from_location(pathname: &str, hash: &str) -> Self {
        if hash.is_empty() {
            return Self::from_path(pathname).unwrap_or_default();
        }
        Self::from_path(hash).unwrap_or_default()
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => PATH_LOGIN,
            Self::Bills => PATH_BILLS,
            Self::NewBill => PATH_NEW_BILL,
            Self::Dashboard => PATH_DASHBOARD,
        }
    }

    /// 当前路由下高亮的侧边栏图标
    pub fn active_icon(&self) -> Option<LayoutIcon> {
        match self {
            Self::Bills => Some(LayoutIcon::Window),
            Self::NewBill => Some(LayoutIcon::Mail),
            Self::Login | Self::Dashboard => None,
        }
    }

    /// 登录成功后的落地页
    pub fn landing_for(user_type: UserType) -> Self {
        match user_type {
            UserType::Employee => Self::Bills,
            UserType::Admin => Self::Dashboard,
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}
