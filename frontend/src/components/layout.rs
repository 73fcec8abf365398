use leptos::prelude::*;
use std::rc::Rc;

use crate::components::icons::{DisconnectIcon, MailIcon, WindowIcon};
use crate::containers::Navigator;
use crate::containers::logout::LogoutContainer;
use crate::session::{use_services, use_session};
use crate::web::route::{AppRoute, LayoutIcon};
use crate::web::router::use_router;

fn icon_class(route: AppRoute, icon: LayoutIcon) -> &'static str {
    if route.active_icon() == Some(icon) {
        "layout-icon active-icon"
    } else {
        "layout-icon"
    }
}

/// 员工页与管理员页共用的侧边栏
#[component]
pub fn VerticalLayout(route: AppRoute, children: Children) -> impl IntoView {
    let router = use_router();
    let session = use_session();
    let services = use_services();
    let logout = StoredValue::new_local(LogoutContainer::new(
        Rc::new(router),
        services.storage.clone(),
    ));
    let storage = StoredValue::new_local(services.storage);

    let on_logout = move |_| {
        let storage = storage.get_value();
        logout.with_value(|l| l.handle_click());
        session.refresh(storage.as_ref());
    };

    let is_admin = route == AppRoute::Dashboard;

    view! {
        <div class="layout flex min-h-screen">
            <div class="vertical-navbar flex flex-col items-center gap-8 py-8 w-24 bg-[#0E5AE5] text-white">
                <div class="layout-title font-bold text-xl">"Billed"</div>
                <Show when=move || !is_admin>
                    <div
                        id=LayoutIcon::Window.element_id()
                        data-testid=LayoutIcon::Window.test_id()
                        class=icon_class(route, LayoutIcon::Window)
                        on:click=move |_| router.navigate_path(LayoutIcon::Window.href())
                    >
                        <WindowIcon />
                    </div>
                    <div
                        id=LayoutIcon::Mail.element_id()
                        data-testid=LayoutIcon::Mail.test_id()
                        class=icon_class(route, LayoutIcon::Mail)
                        on:click=move |_| router.navigate_path(LayoutIcon::Mail.href())
                    >
                        <MailIcon />
                    </div>
                </Show>
                <div id="layout-disconnect" data-testid="layout-disconnect" class="layout-icon cursor-pointer mt-auto" on:click=on_logout>
                    <DisconnectIcon />
                </div>
            </div>
            <div class="content flex-1 p-8">
                {children()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_icon_class() {
        assert_eq!(icon_class(AppRoute::Bills, LayoutIcon::Window), "layout-icon active-icon");
        assert_eq!(icon_class(AppRoute::Bills, LayoutIcon::Mail), "layout-icon");
        assert_eq!(icon_class(AppRoute::NewBill, LayoutIcon::Mail), "layout-icon active-icon");
    }
}
