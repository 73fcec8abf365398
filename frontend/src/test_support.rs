//! 容器测试共用的替身与测试数据

use billed_shared::{Bill, BillStatus, SessionUser, UserType};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::containers::{Navigator, ReceiptModal, ReceiptPreview};
use crate::store::{Api, Store};
use crate::web::http::MockTransport;
use crate::web::route::AppRoute;
use crate::web::storage::{MemoryStorage, write_user};

pub const BASE: &str = "http://localhost:5678";
pub const BILLS_URL: &str = "http://localhost:5678/bills";

#[derive(Default)]
pub struct RecordingNavigator {
    pub visited: RefCell<Vec<AppRoute>>,
    pub previous: Cell<Option<AppRoute>>,
}

impl RecordingNavigator {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn visited(&self) -> Vec<AppRoute> {
        self.visited.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: AppRoute) {
        self.visited.borrow_mut().push(route);
    }

    fn set_previous_location(&self, route: AppRoute) {
        self.previous.set(Some(route));
    }
}

pub struct RecordingModal {
    pub modal_width: f64,
    pub contents: RefCell<Vec<ReceiptPreview>>,
    pub shown: Cell<usize>,
}

impl RecordingModal {
    pub fn with_width(modal_width: f64) -> Rc<Self> {
        Rc::new(Self {
            modal_width,
            contents: RefCell::new(Vec::new()),
            shown: Cell::new(0),
        })
    }
}

impl ReceiptModal for RecordingModal {
    fn width(&self) -> f64 {
        self.modal_width
    }

    fn set_content(&self, preview: ReceiptPreview) {
        self.contents.borrow_mut().push(preview);
    }

    fn show(&self) {
        self.shown.set(self.shown.get() + 1);
    }
}

pub struct StoreHarness {
    pub transport: Rc<MockTransport>,
    pub storage: Rc<MemoryStorage>,
    pub store: Store,
}

pub fn store_harness() -> StoreHarness {
    let transport = Rc::new(MockTransport::new());
    let storage = Rc::new(MemoryStorage::new());
    let store = Store::new(Api::new(BASE, transport.clone()), storage.clone());
    StoreHarness {
        transport,
        storage,
        store,
    }
}

pub fn sign_in(storage: &MemoryStorage, user_type: UserType, email: &str) {
    write_user(
        storage,
        &SessionUser::connected(user_type, email.to_string(), "secret".to_string()),
    );
}

fn fixture(
    id: &str,
    name: &str,
    expense_type: &str,
    amount: f64,
    date: &str,
    status: BillStatus,
    comment_admin: &str,
) -> Bill {
    Bill {
        id: id.to_string(),
        email: "a@a".to_string(),
        expense_type: expense_type.to_string(),
        name: name.to_string(),
        amount,
        date: date.to_string(),
        vat: "20".to_string(),
        pct: 20,
        commentary: String::new(),
        file_url: Some(format!("https://storage.billed.test/justificatifs/{}.jpg", id)),
        file_name: Some(format!("{}.jpg", id)),
        status,
        comment_admin: Some(comment_admin.to_string()),
    }
}

/// 容器测试使用的四条账单
pub fn bills() -> Vec<Bill> {
    vec![
        fixture(
            "47qAXb6fIm2zOKkLzMro",
            "encore",
            "Hôtel et logement",
            400.0,
            "2004-04-04",
            BillStatus::Pending,
            "ok",
        ),
        fixture(
            "BeKy5Mo4jkmdfPGYpTxZ",
            "test1",
            "Transports",
            100.0,
            "2001-01-01",
            BillStatus::Refused,
            "en fait non",
        ),
        fixture(
            "UIUZtnPQvnbFnB0ozvJh",
            "test3",
            "Services en ligne",
            300.0,
            "2003-03-03",
            BillStatus::Accepted,
            "bon bah d'accord",
        ),
        fixture(
            "qcCK3SzECmaZAGRrHjaC",
            "test2",
            "Restaurants et bars",
            200.0,
            "2002-02-02",
            BillStatus::Refused,
            "pas la bonne facture",
        ),
    ]
}

pub fn bills_json() -> serde_json::Value {
    serde_json::to_value(bills()).unwrap_or_default()
}
