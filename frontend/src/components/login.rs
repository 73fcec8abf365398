use billed_shared::UserType;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

use crate::containers::login::{LoginContainer, LoginForm};
use crate::session::{use_services, use_session};
use crate::web::router::use_router;

fn form_prefix(user_type: UserType) -> &'static str {
    match user_type {
        UserType::Employee => "employee",
        UserType::Admin => "admin",
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let router = use_router();
    let session = use_session();
    let services = use_services();
    let storage = StoredValue::new_local(services.storage.clone());
    let container = StoredValue::new_local(Rc::new(LoginContainer::new(
        Rc::new(router),
        services.store,
        services.storage,
    )));

    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let submit = move |form: LoginForm| {
        set_is_submitting.set(true);
        set_error_msg.set(None);

        let c = container.get_value();
        let storage = storage.get_value();
        spawn_local(async move {
            match c.handle_submit(&form).await {
                Ok(_) => session.refresh(storage.as_ref()),
                Err(e) => set_error_msg.set(Some(e.message().to_string())),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen">
            <div class="hero-content flex-col w-full max-w-4xl">
                <h1 class="text-4xl font-bold text-white mb-4">"Billed"</h1>
                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-error text-sm py-2">
                        <span>{move || error_msg.get().unwrap_or_default()}</span>
                    </div>
                </Show>
                <div class="grid grid-cols-1 md:grid-cols-2 gap-8 w-full">
                    <LoginCard
                        user_type=UserType::Employee
                        title="Employé"
                        is_submitting=is_submitting
                        on_submit=Callback::new(submit)
                    />
                    <LoginCard
                        user_type=UserType::Admin
                        title="Administration"
                        is_submitting=is_submitting
                        on_submit=Callback::new(submit)
                    />
                </div>
            </div>
        </div>
    }
}

#[component]
fn LoginCard(
    user_type: UserType,
    title: &'static str,
    is_submitting: ReadSignal<bool>,
    #[prop(into)] on_submit: Callback<LoginForm>,
) -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let prefix = form_prefix(user_type);

    let handle_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_submit.run(LoginForm {
            user_type,
            email: email.get(),
            password: password.get(),
        });
    };

    view! {
        <div class="card shrink-0 w-full shadow-2xl bg-base-100">
            <form class="card-body" data-testid=format!("form-{}", prefix) on:submit=handle_submit>
                <h2 class="card-title">{title}</h2>
                <div class="form-control">
                    <label class="label"><span class="label-text">"Votre email"</span></label>
                    <input
                        type="email"
                        placeholder="johndoe@email.com"
                        data-testid=format!("{}-email-input", prefix)
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        class="input input-bordered"
                        required
                    />
                </div>
                <div class="form-control">
                    <label class="label"><span class="label-text">"Mot de passe"</span></label>
                    <input
                        type="password"
                        placeholder="******"
                        data-testid=format!("{}-password-input", prefix)
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        class="input input-bordered"
                        required
                    />
                </div>
                <div class="form-control mt-6">
                    <button
                        type="submit"
                        class="btn btn-primary"
                        data-testid=format!("{}-login-button", prefix)
                        disabled=move || is_submitting.get()
                    >
                        {move || if is_submitting.get() {
                            view! { <span class="loading loading-spinner"></span> "Connexion..." }.into_any()
                        } else {
                            "Se connecter".into_any()
                        }}
                    </button>
                </div>
            </form>
        </div>
    }
}
