//! 员工新建账单：上传收据并提交

use billed_shared::error::StoreResult;
use billed_shared::{Bill, BillStatus, DEFAULT_PCT, UploadResponse};
use std::cell::RefCell;
use std::rc::Rc;

use super::Navigator;
use crate::log::{log_error, log_info};
use crate::store::{HeaderOptions, Store, json_body};
use crate::web::http::{FormValue, RequestBody, UploadFile};
use crate::web::route::AppRoute;
use crate::web::storage::{KeyValueStorage, read_user};

const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

pub const REJECTED_FILE_MESSAGE: &str = "The image must be of type jpg, jpeg or png";
pub const ACCEPTED_FILE_MESSAGE: &str = "File accepted";

/// 文件输入框下方的提示信息，任何时候最多显示一条
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFeedback {
    Accepted,
    Rejected,
}

impl FileFeedback {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Accepted => ACCEPTED_FILE_MESSAGE,
            Self::Rejected => REJECTED_FILE_MESSAGE,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Accepted => "green",
            Self::Rejected => "red",
        }
    }

    /// 被拒绝的文件会从输入框中清除
    pub fn clears_input(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// 检查文件扩展名（不区分大小写）
pub fn validate_file_name(file_name: &str) -> FileFeedback {
    let accepted = file_name
        .rsplit_once('.')
        .map(|(stem, ext)| {
            !stem.is_empty()
                && ALLOWED_EXTENSIONS
                    .iter()
                    .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false);

    if accepted {
        FileFeedback::Accepted
    } else {
        FileFeedback::Rejected
    }
}

/// `input` 开头的整数，没有时为 `None`
///
/// `" 42.5€"` 得到 42，`"abc"` 得到 `None`。
pub fn parse_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// 新建账单表单的原始输入值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub amount: String,
    pub date: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

/// 后端为已上传收据返回的信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedReceipt {
    pub bill_id: String,
    pub file_url: Option<String>,
    pub file_name: Option<String>,
}

pub struct NewBillContainer {
    navigator: Rc<dyn Navigator>,
    store: Option<Store>,
    storage: Rc<dyn KeyValueStorage>,
    uploaded: RefCell<Option<UploadedReceipt>>,
}

impl NewBillContainer {
    pub fn new(
        navigator: Rc<dyn Navigator>,
        store: Option<Store>,
        storage: Rc<dyn KeyValueStorage>,
    ) -> Self {
        Self {
            navigator,
            store,
            storage,
            uploaded: RefCell::new(None),
        }
    }

    pub fn uploaded(&self) -> Option<UploadedReceipt> {
        self.uploaded.borrow().clone()
    }

    fn user_email(&self) -> String {
        read_user(self.storage.as_ref())
            .and_then(|u| u.email)
            .unwrap_or_default()
    }

    /// 校验所选文件，通过 `show` 反馈结果，然后上传
    ///
    /// 上传失败只记录日志。
    pub async fn handle_change_file(&self, file: UploadFile, show: impl Fn(FileFeedback)) {
        let feedback = validate_file_name(&file.name);
        show(feedback);
        if feedback == FileFeedback::Rejected {
            return;
        }

        let Some(store) = &self.store else {
            return;
        };

        let picked_name = file.name.clone();
        let body = RequestBody::Multipart(vec![
            ("file".to_string(), FormValue::File(file)),
            ("email".to_string(), FormValue::Text(self.user_email())),
        ]);

        match store
            .bills()
            .create::<UploadResponse>(body, HeaderOptions::multipart())
            .await
        {
            Ok(res) => {
                log_info!("receipt uploaded as bill {}", res.key);
                *self.uploaded.borrow_mut() = Some(UploadedReceipt {
                    bill_id: res.key,
                    file_url: res.file_url,
                    file_name: res.file_name.or(Some(picked_name)),
                });
            }
            Err(e) => log_error!("{}", e),
        }
    }

    /// 由表单字段构建待审批账单
    pub fn build_bill(&self, form: &NewBillForm) -> Bill {
        let uploaded = self.uploaded();
        Bill {
            email: self.user_email(),
            expense_type: form.expense_type.clone(),
            name: form.name.clone(),
            amount: parse_int(&form.amount).unwrap_or(0) as f64,
            date: form.date.clone(),
            vat: form.vat.clone(),
            pct: parse_int(&form.pct)
                .filter(|pct| *pct != 0)
                .unwrap_or(DEFAULT_PCT),
            commentary: form.commentary.clone(),
            file_url: uploaded.as_ref().and_then(|u| u.file_url.clone()),
            file_name: uploaded.and_then(|u| u.file_name),
            status: BillStatus::Pending,
            ..Bill::default()
        }
    }

    /// 不等待更新完成即导航到账单列表
    pub async fn handle_submit(&self, form: &NewBillForm) -> Bill {
        let bill = self.build_bill(form);
        let pending = self.update_bill(bill.clone());
        self.navigator.navigate(AppRoute::Bills);
        pending.await;
        bill
    }

    /// PATCH 已上传的账单，错误只记录日志
    pub async fn update_bill(&self, bill: Bill) {
        let Some(store) = &self.store else {
            return;
        };
        let Some(bill_id) = self.uploaded().map(|u| u.bill_id) else {
            log_error!("no uploaded receipt, bill {:?} not saved", bill.name);
            return;
        };

        let result: StoreResult<serde_json::Value> = match json_body(&bill) {
            Ok(body) => {
                store
                    .bills()
                    .update(&bill_id, body, HeaderOptions::default())
                    .await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            log_error!("{}", e);
        }
    }
}
