//! Backend URL settings

use leptos::prelude::*;

use crate::settings;

#[component]
pub fn SettingsPanel(
    base_url: ReadSignal<String>,
    set_base_url: WriteSignal<String>,
) -> impl IntoView {
    let (draft, set_draft) = signal(base_url.get_untracked());
    let (status, set_status) = signal(String::new());

    let on_save = move |_| match settings::save_base_url(&draft.get_untracked()) {
        Ok(url) => {
            set_draft.set(url.clone());
            set_base_url.set(url);
            set_status.set("Servidor guardado.".to_string());
        }
        Err(message) => set_status.set(message),
    };

    let on_reset = move |_| {
        let url = settings::clear_base_url();
        set_draft.set(url.clone());
        set_base_url.set(url);
        set_status.set("Se restauró el servidor por defecto.".to_string());
    };

    view! {
        <div class="settings-panel">
            <div class="form-group">
                <label for="api-url">"Servidor de la API"</label>
                <input
                    type="url"
                    id="api-url"
                    placeholder="https://..."
                    prop:value=move || draft.get()
                    on:input=move |ev| {
                        set_draft.set(event_target_value(&ev));
                    }
                />
                <div class="api-actions">
                    <button class="btn btn-primary btn-small" on:click=on_save>
                        "Guardar"
                    </button>
                    <button class="btn btn-tertiary btn-small" on:click=on_reset>
                        "Restaurar"
                    </button>
                </div>
                <div class="api-url-status">
                    {move || status.get()}
                </div>
            </div>
        </div>
    }
}
