use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use crate::components::icons::EyeIcon;
use crate::components::layout::VerticalLayout;
use crate::components::loading::{ErrorPage, LoadState, LoadingPage};
use crate::components::modal::{DialogModal, ReceiptDialog};
use crate::containers::bills::{BillRow, BillsContainer};
use crate::log::log_error;
use crate::session::use_services;
use crate::web::route::AppRoute;
use crate::web::router::use_router;

#[component]
pub fn BillsPage() -> impl IntoView {
    let router = use_router();
    let services = use_services();
    let modal = DialogModal::new();
    let container = Rc::new(BillsContainer::new(
        Rc::new(router),
        services.store,
        Rc::new(modal),
    ));

    let (state, set_state) = signal(LoadState::<Vec<BillRow>>::Loading);

    // 初始加载
    {
        let container = container.clone();
        spawn_local(async move {
            let next = match container.get_bills().await {
                Some(Ok(rows)) => LoadState::Ready(rows),
                Some(Err(e)) => {
                    log_error!("{}", e);
                    LoadState::Failed(e.message().to_string())
                }
                None => LoadState::Ready(Vec::new()),
            };
            set_state.set(next);
        });
    }

    let container = StoredValue::new_local(container);
    let on_new_bill = move |_| container.with_value(|c| c.handle_click_new_bill());

    let bill_row = move |row: BillRow| {
        let url = row.bill.file_url.clone().unwrap_or_default();
        let on_eye = {
            let url = url.clone();
            move |_| container.with_value(|c| c.handle_click_icon_eye(&url))
        };
        view! {
            <tr>
                <td>{row.bill.expense_type}</td>
                <td>{row.bill.name}</td>
                <td>{row.date_label}</td>
                <td>{format!("{} €", row.bill.amount)}</td>
                <td>{row.status_label}</td>
                <td>
                    <div data-testid="icon-eye" data-bill-url=url class="cursor-pointer" on:click=on_eye>
                        <EyeIcon />
                    </div>
                </td>
            </tr>
        }
    };

    view! {
        <VerticalLayout route=AppRoute::Bills>
            <div class="content-header flex items-center justify-between mb-6">
                <div class="content-title text-2xl font-bold">"Mes notes de frais"</div>
                <button type="button" data-testid="btn-new-bill" class="btn btn-primary" on:click=on_new_bill>
                    "Nouvelle note de frais"
                </button>
            </div>
            {move || match state.get() {
                LoadState::Loading => view! { <LoadingPage /> }.into_any(),
                LoadState::Failed(message) => view! { <ErrorPage message=message /> }.into_any(),
                LoadState::Ready(rows) => view! {
                    <div id="data-table" class="overflow-x-auto">
                        <table id="example" class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Type"</th>
                                    <th>"Nom"</th>
                                    <th>"Date"</th>
                                    <th>"Montant"</th>
                                    <th>"Statut"</th>
                                    <th>"Actions"</th>
                                </tr>
                            </thead>
                            <tbody data-testid="tbody">
                                {rows.into_iter().map(bill_row).collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
                .into_any(),
            }}
            <ReceiptDialog modal=modal id="modaleFile" />
        </VerticalLayout>
    }
}
