mod form_state;

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use crate::components::layout::VerticalLayout;
use crate::containers::new_bill::{FileFeedback, NewBillContainer};
use crate::session::use_services;
use crate::web::http::{FileData, UploadFile};
use crate::web::route::AppRoute;
use crate::web::router::use_router;
use form_state::{EXPENSE_TYPES, FormState};

#[component]
pub fn NewBillPage() -> impl IntoView {
    let router = use_router();
    let services = use_services();
    let container = StoredValue::new_local(Rc::new(NewBillContainer::new(
        Rc::new(router),
        services.store,
        services.storage,
    )));

    let form = FormState::new();
    let (feedback, set_feedback) = signal(Option::<FileFeedback>::None);

    let on_file_change = move |ev: leptos::web_sys::Event| {
        let input: web_sys::HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let upload = UploadFile {
            name: file.name(),
            data: FileData::Browser(file),
        };

        let container = container.get_value();
        spawn_local(async move {
            container
                .handle_change_file(upload, move |result| {
                    set_feedback.set(Some(result));
                    if result.clears_input() {
                        input.set_value("");
                    }
                })
                .await;
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let values = form.to_form();
        let container = container.get_value();
        spawn_local(async move {
            container.handle_submit(&values).await;
        });
    };

    view! {
        <VerticalLayout route=AppRoute::NewBill>
            <div class="content-title text-2xl font-bold mb-6">"Envoyer une note de frais"</div>
            <form data-testid="form-new-bill" class="grid grid-cols-1 md:grid-cols-2 gap-6" on:submit=on_submit>
                <div class="flex flex-col gap-4">
                    <div class="form-control">
                        <label for="expense-type" class="label"><span class="label-text">"Type de dépense"</span></label>
                        <select
                            id="expense-type"
                            required
                            class="select select-bordered"
                            data-testid="expense-type"
                            on:change=move |ev| form.expense_type.set(event_target_value(&ev))
                        >
                            {EXPENSE_TYPES
                                .into_iter()
                                .map(|t| view! { <option value=t>{t}</option> })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-control">
                        <label for="expense-name" class="label"><span class="label-text">"Nom de la dépense"</span></label>
                        <input
                            id="expense-name"
                            type="text"
                            class="input input-bordered"
                            data-testid="expense-name"
                            placeholder="Vol Paris Londres"
                            prop:value=form.name
                            on:input=move |ev| form.name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label for="datepicker" class="label"><span class="label-text">"Date"</span></label>
                        <input
                            id="datepicker"
                            required
                            type="date"
                            class="input input-bordered"
                            data-testid="datepicker"
                            prop:value=form.date
                            on:input=move |ev| form.date.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-control">
                        <label for="amount" class="label"><span class="label-text">"Montant TTC"</span></label>
                        <input
                            id="amount"
                            required
                            type="number"
                            class="input input-bordered"
                            data-testid="amount"
                            placeholder="348"
                            prop:value=form.amount
                            on:input=move |ev| form.amount.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="grid grid-cols-2 gap-4">
                        <div class="form-control">
                            <label for="vat" class="label"><span class="label-text">"TVA"</span></label>
                            <input
                                id="vat"
                                type="number"
                                class="input input-bordered"
                                data-testid="vat"
                                placeholder="70"
                                prop:value=form.vat
                                on:input=move |ev| form.vat.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-control">
                            <label for="pct" class="label"><span class="label-text">"%"</span></label>
                            <input
                                id="pct"
                                required
                                type="number"
                                class="input input-bordered"
                                data-testid="pct"
                                placeholder="20"
                                prop:value=form.pct
                                on:input=move |ev| form.pct.set(event_target_value(&ev))
                            />
                        </div>
                    </div>
                </div>
                <div class="flex flex-col gap-4">
                    <div class="form-control">
                        <label for="commentary" class="label"><span class="label-text">"Commentaire"</span></label>
                        <textarea
                            id="commentary"
                            rows="3"
                            class="textarea textarea-bordered"
                            data-testid="commentary"
                            prop:value=form.commentary
                            on:input=move |ev| form.commentary.set(event_target_value(&ev))
                        ></textarea>
                    </div>
                    <div class="form-control">
                        <label for="file" class="label"><span class="label-text">"Justificatif"</span></label>
                        <input
                            id="file"
                            required
                            type="file"
                            accept=".jpg,.jpeg,.png"
                            class="file-input file-input-bordered"
                            data-testid="file"
                            on:change=on_file_change
                        />
                        {move || feedback.get().map(|f| view! {
                            <div class="feedback-user" data-testid="textElement">
                                <p style=format!("font-size: 12px; color:{}", f.color())>{f.message()}</p>
                            </div>
                        })}
                    </div>
                </div>
                <div class="md:col-span-2">
                    <button type="submit" id="btn-send-bill" class="btn btn-primary">"Envoyer"</button>
                </div>
            </form>
        </VerticalLayout>
    }
}
