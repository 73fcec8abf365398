//! 看板状态机
//!
//! 三个状态分组（pending / accepted / refused）各自展开或收起，右侧面板
//! 显示当前选中的票据或占位图标。所有变化都经过 `apply`，面板状态在每个
//! 事件之后统一校正：
//! - 没有展开的分组时，取消选择
//! - 选中的票据不再显示时，取消选择

use billed_shared::{Bill, BillStatus};

use super::filtered_bills;

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub status: BillStatus,
    pub open: bool,
    /// 该状态下已过滤的账单
    pub bills: Vec<Bill>,
}

impl Bucket {
    /// 当前在该分组中渲染的账单
    pub fn displayed(&self) -> &[Bill] {
        if self.open { &self.bills[..] } else { &[] }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    ToggleBucket(BillStatus),
    SelectBill(String),
}

/// 右侧面板内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Panel {
    /// 大号 Billed 图标
    Placeholder,
    Edit(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    buckets: Vec<Bucket>,
    selection: Option<String>,
}

impl DashboardState {
    /// 所有分组初始为关闭且无选中项；
    /// `excluded` 账户提交的账单永远不显示。
    pub fn new(bills: &[Bill], excluded: &[String]) -> Self {
        let buckets = BillStatus::ALL
            .into_iter()
            .map(|status| Bucket {
                status,
                open: false,
                bills: filtered_bills(bills, status, excluded),
            })
            .collect();
        Self {
            buckets,
            selection: None,
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn bucket(&self, status: BillStatus) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.status == status)
    }

    pub fn is_open(&self, status: BillStatus) -> bool {
        self.bucket(status).is_some_and(|b| b.open)
    }

    pub fn selection(&self) -> Option<&str> {
        self.selection.as_deref()
    }

    pub fn is_displayed(&self, bill_id: &str) -> bool {
        self.buckets
            .iter()
            .flat_map(Bucket::displayed)
            .any(|b| b.id == bill_id)
    }

    pub fn selected_bill(&self) -> Option<&Bill> {
        let id = self.selection.as_deref()?;
        self.buckets
            .iter()
            .flat_map(Bucket::displayed)
            .find(|b| b.id == id)
    }

    pub fn panel(&self) -> Panel {
        match &self.selection {
            Some(id) => Panel::Edit(id.clone()),
            None => Panel::Placeholder,
        }
    }

    pub fn apply(&mut self, event: DashboardEvent) {
        match event {
            DashboardEvent::ToggleBucket(status) => {
                if let Some(bucket) = self.buckets.iter_mut().find(|b| b.status == status) {
                    bucket.open = !bucket.open;
                }
            }
            DashboardEvent::SelectBill(id) => {
                if self.selection.as_deref() == Some(id.as_str()) {
                    self.selection = None;
                } else if self.is_displayed(&id) {
                    self.selection = Some(id);
                }
            }
        }
        self.reconcile();
    }

    fn reconcile(&mut self) {
        let keep = match self.selection.as_deref() {
            Some(id) => self.buckets.iter().any(|b| b.open) && self.is_displayed(id),
            None => return,
        };
        if !keep {
            self.selection = None;
        }
    }
}
