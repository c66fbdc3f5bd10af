//! Modal confirmation for destructive actions

use leptos::prelude::*;

#[component]
pub fn ConfirmDialog<FC, FX>(
    /// Prompt text; the dialog is hidden while this is `None`
    message: Signal<Option<String>>,
    busy: Signal<bool>,
    on_confirm: FC,
    on_cancel: FX,
) -> impl IntoView
where
    FC: Fn() + 'static + Clone + Send + Sync,
    FX: Fn() + 'static + Clone + Send + Sync,
{
    view! {
        {move || {
            let on_confirm = on_confirm.clone();
            let on_cancel = on_cancel.clone();
            message.get().map(|message| view! {
                <div class="modal-backdrop">
                    <div class="modal" role="dialog" aria-modal="true">
                        <h3>"¿Está seguro?"</h3>
                        <p>{message}</p>
                        <p class="text-muted">"Esta acción no se puede deshacer."</p>
                        <div class="modal-actions">
                            <button
                                class="btn btn-danger"
                                disabled=move || busy.get()
                                on:click=move |_| on_confirm()
                            >
                                "Sí, eliminar"
                            </button>
                            <button class="btn btn-secondary" on:click=move |_| on_cancel()>
                                "Cancelar"
                            </button>
                        </div>
                    </div>
                </div>
            })
        }}
    }
}
