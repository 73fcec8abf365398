//! 管理面板：状态分组、账单卡片与审批表单

pub mod state;

use billed_shared::error::StoreResult;
use billed_shared::format::format_date;
use billed_shared::{Bill, BillStatus};
use std::rc::Rc;

use super::{Navigator, ReceiptModal, ReceiptPreview};
use crate::config::{ADMIN_RECEIPT_RATIO, AppConfig};
use crate::log::log_error;
use crate::store::{HeaderOptions, Store, json_body};
use crate::web::route::AppRoute;
use crate::web::storage::{KeyValueStorage, read_user};

pub use state::{Bucket, DashboardEvent, DashboardState, Panel};

/// 状态为 `status` 的账单，排除被排除账户提交的账单
pub fn filtered_bills(bills: &[Bill], status: BillStatus, excluded: &[String]) -> Vec<Bill> {
    bills
        .iter()
        .filter(|b| b.status == status && !excluded.contains(&b.email))
        .cloned()
        .collect()
}

/// 配置的测试账户加上当前登录的管理员
pub fn excluded_emails(config: &AppConfig, storage: &dyn KeyValueStorage) -> Vec<String> {
    let mut excluded = config.excluded_emails.clone();
    if let Some(email) = read_user(storage).and_then(|u| u.email) {
        excluded.push(email);
    }
    excluded
}

/// `first.last@domain` 得到 `("first", "last")`；
/// 没有点号时整个本地部分作为姓。
pub fn split_name(email: &str) -> (String, String) {
    let local = email.split('@').next().unwrap_or_default();
    match local.split_once('.') {
        Some((first, rest)) => {
            let last = rest.split('.').next().unwrap_or_default();
            (first.to_string(), last.to_string())
        }
        None => (String::new(), local.to_string()),
    }
}

/// 状态分组中的一张卡片
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub bill_id: String,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub amount_label: String,
    pub date_label: String,
    pub expense_type: String,
}

impl CardView {
    pub fn test_id(&self) -> String {
        format!("open-bill{}", self.bill_id)
    }
}

pub fn card(bill: &Bill) -> CardView {
    let (first_name, last_name) = split_name(&bill.email);
    CardView {
        bill_id: bill.id.clone(),
        first_name,
        last_name,
        name: bill.name.clone(),
        amount_label: format!("{} €", bill.amount),
        date_label: format_date(&bill.date).unwrap_or_else(|_| bill.date.clone()),
        expense_type: bill.expense_type.clone(),
    }
}

pub fn cards(bills: &[Bill]) -> Vec<CardView> {
    bills.iter().map(card).collect()
}

pub struct DashboardContainer {
    navigator: Rc<dyn Navigator>,
    store: Option<Store>,
    modal: Rc<dyn ReceiptModal>,
}

impl DashboardContainer {
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

    /// 所有账单，原样返回；无存储时为 `None`
    pub async fn get_bills_all_users(&self) -> Option<StoreResult<Vec<Bill>>> {
        let store = self.store.as_ref()?;
        Some(store.bills().list::<Bill>().await)
    }

    pub fn handle_click_icon_eye(&self, bill_url: &str) {
        let preview = ReceiptPreview::sized(bill_url, self.modal.width(), ADMIN_RECEIPT_RATIO);
        self.modal.set_content(preview);
        self.modal.show();
    }

    pub async fn handle_accept_submit(&self, bill: &Bill, comment: &str) -> Bill {
        self.decide(bill, BillStatus::Accepted, comment).await
    }

    pub async fn handle_refuse_submit(&self, bill: &Bill, comment: &str) -> Bill {
        self.decide(bill, BillStatus::Refused, comment).await
    }

    async fn decide(&self, bill: &Bill, status: BillStatus, comment: &str) -> Bill {
        let decided = bill.with_decision(status, comment);
        let pending = self.update_bill(decided.clone());
        self.navigator.navigate(AppRoute::Dashboard);
        pending.await;
        decided
    }

    /// 按 id PATCH 账单，错误只记录日志
    pub async fn update_bill(&self, bill: Bill) {
        let Some(store) = &self.store else {
            return;
        };

        let result: StoreResult<serde_json::Value> = match json_body(&bill) {
            Ok(body) => {
                store
                    .bills()
                    .update(&bill.id, body, HeaderOptions::default())
                    .await
            }
            Err(e) => Err(e),
        };
        if let Err(e) = result {
            log_error!("{}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        BILLS_URL, RecordingModal, RecordingNavigator, bills, bills_json, sign_in, store_harness,
    };
    use crate::web::storage::MemoryStorage;
    use billed_shared::UserType;
    use billed_shared::error::StoreErrorKind;
    use billed_shared::protocol::HttpMethod;
    use serde_json::json;

    fn container(store: Option<Store>) -> (Rc<RecordingNavigator>, Rc<RecordingModal>, DashboardContainer) {
        let navigator = RecordingNavigator::new();
        let modal = RecordingModal::with_width(500.0);
        let container = DashboardContainer::new(navigator.clone(), store, modal.clone());
        (navigator, modal, container)
    }

    #[test]
    fn test_filtered_bills_by_status() {
        let data = bills();
        assert_eq!(filtered_bills(&data, BillStatus::Pending, &[]).len(), 1);
        assert_eq!(filtered_bills(&data, BillStatus::Accepted, &[]).len(), 1);
        assert_eq!(filtered_bills(&data, BillStatus::Refused, &[]).len(), 2);
        assert!(filtered_bills(&[], BillStatus::Pending, &[]).is_empty());
    }

    #[test]
    fn test_filtered_bills_excludes_accounts() {
        let data = bills();
        let excluded = vec!["a@a".to_string()];
        assert!(filtered_bills(&data, BillStatus::Refused, &excluded).is_empty());
    }

    #[test]
    fn test_excluded_emails_include_admin() {
        let storage = MemoryStorage::new();
        sign_in(&storage, UserType::Admin, "boss@billed.tld");
        let config = AppConfig {
            api_url: "http://localhost:5678".to_string(),
            excluded_emails: vec!["test@test.tld".to_string()],
        };
        assert_eq!(
            excluded_emails(&config, &storage),
            vec!["test@test.tld".to_string(), "boss@billed.tld".to_string()]
        );
        assert_eq!(excluded_emails(&config, &MemoryStorage::new()).len(), 1);
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("jane.doe@billed.tld"), ("jane".to_string(), "doe".to_string()));
        assert_eq!(split_name("cedric@billed.tld"), (String::new(), "cedric".to_string()));
        assert_eq!(split_name("a.b.c@x"), ("a".to_string(), "b".to_string()));
    }

    #[test]
    fn test_card_view() {
        let mut bill = bills().remove(0);
        bill.email = "jane.doe@billed.tld".to_string();
        let view = card(&bill);
        assert_eq!(view.test_id(), "open-bill47qAXb6fIm2zOKkLzMro");
        assert_eq!(view.first_name, "jane");
        assert_eq!(view.last_name, "doe");
        assert_eq!(view.amount_label, "400 €");
        assert_eq!(view.date_label, "4 Avr. 04");
        assert_eq!(view.expense_type, "Hôtel et logement");
        assert_eq!(cards(&bills()).len(), 4);
    }

    #[tokio::test]
    async fn test_get_bills_all_users() {
        let (_, _, without_store) = container(None);
        assert!(without_store.get_bills_all_users().await.is_none());

        let harness = store_harness();
        harness
            .transport
            .mock_json(HttpMethod::Get, BILLS_URL, 200, bills_json());
        let (_, _, container) = container(Some(harness.store.clone()));
        let all = container.get_bills_all_users().await.unwrap().unwrap();
        assert_eq!(all, bills());
    }

    #[tokio::test]
    async fn test_get_bills_all_users_error() {
        let harness = store_harness();
        harness.transport.mock_json(
            HttpMethod::Get,
            BILLS_URL,
            404,
            json!({"message": "Erreur 404"}),
        );
        let (_, _, container) = container(Some(harness.store.clone()));
        let err = container.get_bills_all_users().await.unwrap().unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::Http(404));
        assert_eq!(err.message(), "Erreur 404");
    }

    #[tokio::test]
    async fn test_accept_patches_and_navigates() {
        let harness = store_harness();
        let url = format!("{}/47qAXb6fIm2zOKkLzMro", BILLS_URL);
        harness
            .transport
            .mock_json(HttpMethod::Patch, &url, 200, json!({}));
        let (navigator, _, container) = container(Some(harness.store.clone()));

        let decided = container
            .handle_accept_submit(&bills()[0], "bon bah d'accord")
            .await;

        assert_eq!(decided.status, BillStatus::Accepted);
        assert_eq!(decided.comment_admin.as_deref(), Some("bon bah d'accord"));
        assert_eq!(navigator.visited(), vec![AppRoute::Dashboard]);

        let sent = harness.transport.requests_to(HttpMethod::Patch, &url);
        assert_eq!(sent.len(), 1);
        let body: serde_json::Value = serde_json::from_str(sent[0].json.as_deref().unwrap()).unwrap();
        assert_eq!(body["status"], "accepted");
        assert_eq!(body["commentAdmin"], "bon bah d'accord");
    }

    #[tokio::test]
    async fn test_refuse_navigates_even_when_patch_fails() {
        let harness = store_harness();
        harness.transport.go_offline();
        let (navigator, _, container) = container(Some(harness.store.clone()));

        let decided = container.handle_refuse_submit(&bills()[0], "non").await;

        assert_eq!(decided.status, BillStatus::Refused);
        assert_eq!(navigator.visited(), vec![AppRoute::Dashboard]);
    }

    #[test]
    fn test_icon_eye_uses_wider_ratio() {
        let (_, modal, container) = container(None);
        container.handle_click_icon_eye("https://storage.billed.test/r.png");
        assert_eq!(modal.contents.borrow()[0].width, 400);
        assert_eq!(modal.shown.get(), 1);
    }
}
