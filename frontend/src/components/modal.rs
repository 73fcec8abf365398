//! 收据预览对话框

use leptos::prelude::*;

use crate::containers::{ReceiptModal, ReceiptPreview};

/// 基于 `<dialog>` 的 [`ReceiptModal`] 实现
#[derive(Clone, Copy)]
pub struct DialogModal {
    dialog_ref: NodeRef<leptos::html::Dialog>,
    content: RwSignal<Option<ReceiptPreview>>,
}

impl DialogModal {
    pub fn new() -> Self {
        Self {
            dialog_ref: NodeRef::new(),
            content: RwSignal::new(None),
        }
    }
}

impl Default for DialogModal {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptModal for DialogModal {
    /// 关闭的对话框没有布局宽度，此时使用视口宽度
    fn width(&self) -> f64 {
        let dialog_width = self
            .dialog_ref
            .get_untracked()
            .map(|d| d.client_width())
            .unwrap_or(0);
        if dialog_width > 0 {
            return dialog_width as f64;
        }
        web_sys::window()
            .and_then(|w| w.inner_width().ok())
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn set_content(&self, preview: ReceiptPreview) {
        self.content.set(Some(preview));
    }

    fn show(&self) {
        if let Some(dialog) = self.dialog_ref.get_untracked() {
            if !dialog.open() {
                let _ = dialog.show_modal();
            }
        }
    }
}

#[component]
pub fn ReceiptDialog(
    modal: DialogModal,
    /// 元素 id，例如 `modaleFile`
    #[prop(into)]
    id: String,
) -> impl IntoView {
    let content = modal.content;

    view! {
        <dialog id=id class="modal" node_ref=modal.dialog_ref>
            <div class="modal-box max-w-3xl">
                <h3 class="font-bold text-lg">"Justificatif"</h3>
                <div class="modal-body">
                    {move || content.get().map(|preview| view! {
                        <div style="text-align: center;">
                            <img crossorigin="anonymous" width=preview.width.to_string() src=preview.url alt="Bill" />
                        </div>
                    })}
                </div>
                <div class="modal-action">
                    <form method="dialog">
                        <button class="btn">"Fermer"</button>
                    </form>
                </div>
            </div>
        </dialog>
    }
}
