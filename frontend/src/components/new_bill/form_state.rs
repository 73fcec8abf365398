//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据到 `NewBillForm` 的转换

use leptos::prelude::*;

use crate::containers::new_bill::NewBillForm;

/// 表单提供的费用类型
pub const EXPENSE_TYPES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Equipement et matériel",
    "Fournitures de bureau",
];

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub expense_type: RwSignal<String>,
    pub name: RwSignal<String>,
    pub amount: RwSignal<String>,
    pub date: RwSignal<String>,
    pub vat: RwSignal<String>,
    pub pct: RwSignal<String>,
    pub commentary: RwSignal<String>,
}

impl FormState {
    /// 创建新的表单状态，所有字段使用默认值
    pub fn new() -> Self {
        Self {
            expense_type: RwSignal::new(EXPENSE_TYPES[0].to_string()),
            name: RwSignal::new(String::new()),
            amount: RwSignal::new(String::new()),
            date: RwSignal::new(String::new()),
            vat: RwSignal::new(String::new()),
            pct: RwSignal::new(String::new()),
            commentary: RwSignal::new(String::new()),
        }
    }

    /// 读取当前字段值
    pub fn to_form(&self) -> NewBillForm {
        NewBillForm {
            expense_type: self.expense_type.get_untracked(),
            name: self.name.get_untracked(),
            amount: self.amount.get_untracked(),
            date: self.date.get_untracked(),
            vat: self.vat.get_untracked(),
            pct: self.pct.get_untracked(),
            commentary: self.commentary.get_untracked(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}
