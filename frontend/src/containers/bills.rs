//! 员工账单列表

use billed_shared::date::parse_bill_date;
use billed_shared::error::StoreResult;
use billed_shared::format::{format_date, format_status};
use billed_shared::Bill;
use std::rc::Rc;

use super::{Navigator, ReceiptModal, ReceiptPreview};
use crate::config::EMPLOYEE_RECEIPT_RATIO;
use crate::log::log_error;
use crate::store::Store;
use crate::web::route::AppRoute;

/// 员工表格中的一行账单
#[derive(Debug, Clone, PartialEq)]
pub struct BillRow {
    pub bill: Bill,
    /// 显示日期；无法格式化时为原始日期
    pub date_label: String,
    pub status_label: &'static str,
}

impl BillRow {
    fn from_bill(bill: Bill) -> Self {
        let date_label = match format_date(&bill.date) {
            Ok(label) => label,
            Err(e) => {
                log_error!("{} for bill {:?}", e, bill.id);
                bill.date.clone()
            }
        };
        Self {
            status_label: format_status(bill.status),
            date_label,
            bill,
        }
    }
}

/// 按日期倒序；无法解析的日期排在最后并保持原有顺序
pub fn sort_newest_first(bills: &mut [Bill]) {
    bills.sort_by_cached_key(|b| std::cmp::Reverse(parse_bill_date(&b.date)));
}

pub struct BillsContainer {
    navigator: Rc<dyn Navigator>,
    store: Option<Store>,
    modal: Rc<dyn ReceiptModal>,
}

impl BillsContainer {
    pub fn new(
        navigator: Rc<dyn Navigator>,
        store: Option<Store>,
        modal: Rc<dyn ReceiptModal>,
    ) -> Self {
        Self {
            navigator,
            store,
            modal,
        }
    }

    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(AppRoute::NewBill);
    }

    pub fn handle_click_icon_eye(&self, bill_url: &str) {
        let preview = ReceiptPreview::sized(bill_url, self.modal.width(), EMPLOYEE_RECEIPT_RATIO);
        self.modal.set_content(preview);
        self.modal.show();
    }

    /// 获取并格式化当前员工的账单
    ///
    /// `None` 表示未配置存储，既不是错误也不是空列表。
    pub async fn get_bills(&self) -> Option<StoreResult<Vec<BillRow>>> {
        let store = self.store.as_ref()?;
        let result = store.bills().list::<Bill>().await.map(|mut bills| {
            sort_newest_first(&mut bills);
            bills.into_iter().map(BillRow::from_bill).collect()
        });
        Some(result)
    }
}
