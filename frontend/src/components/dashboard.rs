use billed_shared::format::{format_date, format_status};
use billed_shared::{Bill, BillStatus};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use crate::components::icons::{ArrowIcon, BigBilledIcon, EyeIcon};
use crate::components::layout::VerticalLayout;
use crate::components::loading::{ErrorPage, LoadState, LoadingPage};
use crate::components::modal::{DialogModal, ReceiptDialog};
use crate::containers::dashboard::{
    DashboardContainer, DashboardEvent, DashboardState, card, cards, excluded_emails,
};
use crate::log::log_error;
use crate::session::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

fn bucket_title(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "En attente",
        BillStatus::Accepted => "Validé",
        BillStatus::Refused => "Refusé",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let router = use_router();
    let services = use_services();
    let modal = DialogModal::new();
    let excluded = excluded_emails(&services.config, services.storage.as_ref());
    let container = Rc::new(DashboardContainer::new(
        Rc::new(router),
        services.store,
        Rc::new(modal),
    ));

    let (load, set_load) = signal(LoadState::<()>::Loading);
    let board = RwSignal::new(DashboardState::new(&[], &[]));

    // 初始加载
    {
        let container = container.clone();
        spawn_local(async move {
            match container.get_bills_all_users().await {
                Some(Ok(bills)) => {
                    board.set(DashboardState::new(&bills, &excluded));
                    set_load.set(LoadState::Ready(()));
                }
                Some(Err(e)) => {
                    log_error!("{}", e);
                    set_load.set(LoadState::Failed(e.message().to_string()));
                }
                None => set_load.set(LoadState::Ready(())),
            }
        });
    }

    let container = StoredValue::new_local(container);

    let bucket_view = move |status: BillStatus| {
        let index = status.index();
        let count = move || board.with(|s| s.bucket(status).map(|b| b.bills.len()).unwrap_or(0));
        let is_open = move || board.with(|s| s.is_open(status));
        view! {
            <div class="status-bills-header flex items-center justify-between p-3 bg-base-100 rounded-box shadow cursor-pointer"
                on:click=move |_| board.update(|s| s.apply(DashboardEvent::ToggleBucket(status)))
            >
                <h3 class="font-semibold">{bucket_title(status)} " (" {count} ")"</h3>
                <span
                    id=format!("arrow-icon{}", index)
                    data-testid=format!("arrow-icon{}", index)
                    style=move || if is_open() { "transform: rotate(0deg)" } else { "transform: rotate(90deg)" }
                >
                    <ArrowIcon />
                </span>
            </div>
            <div
                id=format!("status-bills-container{}", index)
                class="status-bills-container flex flex-col gap-2 my-2"
                data-open=move || is_open().to_string()
            >
                {move || {
                    let shown = board.with(|s| {
                        s.bucket(status).map(|b| cards(b.displayed())).unwrap_or_default()
                    });
                    shown
                        .into_iter()
                        .map(|c| {
                            let id = c.bill_id.clone();
                            let test_id = c.test_id();
                            let selected = {
                                let id = id.clone();
                                Memo::new(move |_| board.with(|s| s.selection() == Some(id.as_str())))
                            };
                            view! {
                                <div
                                    class="bill-card p-3 rounded-box text-white cursor-pointer"
                                    id=test_id.clone()
                                    data-testid=test_id
                                    data-selected=move || selected.get().to_string()
                                    style=move || if selected.get() { "background-color: #2A2B35" } else { "background-color: #0D5AE5" }
                                    on:click=move |_| board.update(|s| s.apply(DashboardEvent::SelectBill(id.clone())))
                                >
                                    <div class="bill-card-name-container flex justify-between">
                                        <div class="bill-card-name">{c.first_name} " " {c.last_name}</div>
                                        <span class="bill-card-grey">" ... "</span>
                                    </div>
                                    <div class="name-price-container flex justify-between">
                                        <span>{c.name}</span>
                                        <span>{c.amount_label}</span>
                                    </div>
                                    <div class="date-type-container flex justify-between">
                                        <span>{c.date_label}</span>
                                        <span>{c.expense_type}</span>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>
        }
    };

    let right_panel = move || match board.with(|s| s.selected_bill().cloned()) {
        Some(bill) => view! { <DashboardForm bill=bill container=container /> }.into_any(),
        None => view! {
            <div id="big-billed-icon" data-testid="big-billed-icon" class="flex items-center justify-center h-full">
                <BigBilledIcon />
            </div>
        }
        .into_any(),
    };

    view! {
        <VerticalLayout route=AppRoute::Dashboard>
            {move || match load.get() {
                LoadState::Loading => view! { <LoadingPage /> }.into_any(),
                LoadState::Failed(message) => view! { <ErrorPage message=message /> }.into_any(),
                LoadState::Ready(()) => view! {
                    <div class="dashboard-content grid grid-cols-1 lg:grid-cols-2 gap-8">
                        <div class="dashboard-left-container">
                            {BillStatus::ALL.into_iter().map(bucket_view).collect_view()}
                        </div>
                        <div class="dashboard-right-container">
                            {right_panel}
                        </div>
                    </div>
                }
                .into_any(),
            }}
            <ReceiptDialog modal=modal id="modaleFileAdmin1" />
        </VerticalLayout>
    }
}

/// 选中账单的编辑表单
#[component]
fn DashboardForm(
    bill: Bill,
    container: StoredValue<Rc<DashboardContainer>, LocalStorage>,
) -> impl IntoView {
    let comment = RwSignal::new(bill.comment_admin.clone().unwrap_or_default());
    let view_card = card(&bill);
    let url = bill.file_url.clone().unwrap_or_default();
    let is_pending = bill.status == BillStatus::Pending;
    let bill = StoredValue::new(bill);

    let on_eye = {
        let url = url.clone();
        move |_| container.with_value(|c| c.handle_click_icon_eye(&url))
    };

    let decide = move |status: BillStatus| {
        let c = container.get_value();
        let current = bill.get_value();
        let text = comment.get_untracked();
        spawn_local(async move {
            match status {
                BillStatus::Accepted => c.handle_accept_submit(&current, &text).await,
                _ => c.handle_refuse_submit(&current, &text).await,
            };
        });
    };

    view! {
        <div class="dashboard-form flex flex-col gap-4 p-4 bg-base-100 rounded-box shadow" data-testid="dashboard-form">
            <div class="grid grid-cols-2 gap-4">
                <div>
                    <label class="label"><span class="label-text">"Type de dépense"</span></label>
                    <div class="input input-bordered flex items-center">{bill.with_value(|b| b.expense_type.clone())}</div>
                </div>
                <div>
                    <label class="label"><span class="label-text">"Nom de la dépense"</span></label>
                    <div class="input input-bordered flex items-center">{view_card.name}</div>
                </div>
                <div>
                    <label class="label"><span class="label-text">"Date"</span></label>
                    <div class="input input-bordered flex items-center">
                        {bill.with_value(|b| format_date(&b.date).unwrap_or_else(|_| b.date.clone()))}
                    </div>
                </div>
                <div>
                    <label class="label"><span class="label-text">"Montant TTC"</span></label>
                    <div class="input input-bordered flex items-center">{view_card.amount_label}</div>
                </div>
                <div>
                    <label class="label"><span class="label-text">"TVA"</span></label>
                    <div class="input input-bordered flex items-center">
                        {bill.with_value(|b| format!("{} € ({} %)", b.vat, b.pct))}
                    </div>
                </div>
                <div>
                    <label class="label"><span class="label-text">"Statut"</span></label>
                    <div class="input input-bordered flex items-center">{bill.with_value(|b| format_status(b.status))}</div>
                </div>
            </div>
            <div>
                <label class="label"><span class="label-text">"Commentaire"</span></label>
                <div class="textarea textarea-bordered min-h-12">{bill.with_value(|b| b.commentary.clone())}</div>
            </div>
            <div class="flex items-center gap-2">
                <span>{bill.with_value(|b| b.file_name.clone().unwrap_or_default())}</span>
                <div id="icon-eye-d" data-testid="icon-eye-d" data-bill-url=url class="cursor-pointer" on:click=on_eye>
                    <EyeIcon />
                </div>
            </div>
            {if is_pending {
                view! {
                    <div class="flex flex-col gap-2">
                        <label for="commentary2" class="label"><span class="label-text">"Ajouter un commentaire"</span></label>
                        <textarea
                            id="commentary2"
                            data-testid="commentary2"
                            class="textarea textarea-bordered"
                            prop:value=comment
                            on:input=move |ev| comment.set(event_target_value(&ev))
                        ></textarea>
                        <div class="flex gap-4">
                            <button id="btn-refuse-bill" data-testid="btn-refuse-bill" class="btn btn-error" on:click=move |_| decide(BillStatus::Refused)>
                                "Refuser"
                            </button>
                            <button id="btn-accept-bill" data-testid="btn-accept-bill" class="btn btn-success" on:click=move |_| decide(BillStatus::Accepted)>
                                "Accepter"
                            </button>
                        </div>
                    </div>
                }
                .into_any()
            } else {
                view! {
                    <div>
                        <label class="label"><span class="label-text">"Commentaire administration"</span></label>
                        <div class="textarea textarea-bordered min-h-12">{move || comment.get()}</div>
                    </div>
                }
                .into_any()
            }}
        </div>
    }
}
