//! 容器层
//!
//! 容器把界面事件转换为存储调用和导航，从不直接操作 DOM；
//! 页面组件负责标记并把事件交给容器。

pub mod bills;
pub mod dashboard;
pub mod login;
pub mod logout;
pub mod new_bill;

use crate::log::log_info;
use crate::web::route::AppRoute;

/// 注入每个容器的导航服务
pub trait Navigator {
    fn navigate(&self, route: AppRoute);

    /// 记录浏览器后退/前进时要返回的位置
    fn set_previous_location(&self, route: AppRoute);

    /// 按路径导航，只有四个已知路径会生效
    fn navigate_path(&self, path: &str) {
        match AppRoute::from_path(path) {
            Some(route) => self.navigate(route),
            None => log_info!("[Router] Unknown path {:?}, ignoring navigation.", path),
        }
    }
}

/// 在弹窗中显示的收据图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptPreview {
    pub url: String,
    /// 渲染宽度（像素）
    pub width: u32,
}

impl ReceiptPreview {
    /// 图片宽度取弹窗当前宽度的 `ratio`
    pub fn sized(url: &str, modal_width: f64, ratio: f64) -> Self {
        Self {
            url: url.to_string(),
            width: (modal_width * ratio).floor().max(0.0) as u32,
        }
    }
}

/// 显示收据图片的弹窗
pub trait ReceiptModal {
    fn width(&self) -> f64;
    fn set_content(&self, preview: ReceiptPreview);
    fn show(&self);
}
