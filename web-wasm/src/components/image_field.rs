//! Image picker with drag and drop and a preview

use gloo::console;
use leptos::html;
use leptos::prelude::*;
use sonrisas_common::Upload;
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, File, FileList, FileReader, HtmlInputElement};

use crate::upload::upload_from_data_url;

/// Picked image and its data URL, or the reason it could not be read
pub type PickedImage = Result<(Upload, String), String>;

#[component]
pub fn ImageField<F>(
    name: &'static str,
    label: &'static str,
    /// Data URL of the current selection
    preview: Signal<Option<String>>,
    on_image: F,
) -> impl IntoView
where
    F: Fn(PickedImage) + 'static + Clone + Send + Sync,
{
    let (is_dragover, set_is_dragover) = signal(false);
    let input_ref: NodeRef<html::Input> = NodeRef::new();

    let handle_files = {
        let on_image = on_image.clone();
        move |files: FileList| {
            if let Some(file) = files.get(0) {
                read_file(file, on_image.clone());
            }
        }
    };

    let on_drop = {
        let handle_files = handle_files.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);
            if let Some(files) = ev.data_transfer().and_then(|dt| dt.files()) {
                handle_files(files);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        set_is_dragover.set(true);
    };

    let on_change = move |ev: web_sys::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        if let Some(files) = input.files() {
            handle_files(files);
        }
        // picking the same file again must fire `change`
        input.set_value("");
    };

    let on_click = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div class="form-group">
            <label for=name>{label}</label>
            <div
                class=move || if is_dragover.get() { "upload-area dragover" } else { "upload-area" }
                on:drop=on_drop
                on:dragover=on_dragover
                on:dragleave=move |_: DragEvent| set_is_dragover.set(false)
                on:click=on_click
            >
                <Show
                    when=move || preview.get().is_some()
                    fallback=|| view! {
                        <div class="upload-icon">"🦷"</div>
                        <p>"Arrastre una imagen o haga clic para seleccionarla"</p>
                        <p class="text-muted">"Formatos: JPG, JPEG, PNG (máx. 5MB)"</p>
                    }
                >
                    <img class="upload-preview" src=move || preview.get().unwrap_or_default() alt="Vista previa" />
                </Show>
            </div>
            <input
                type="file"
                id=name
                class="hidden"
                accept=".jpg,.jpeg,.png,image/jpeg,image/png"
                node_ref=input_ref
                on:change=on_change
            />
        </div>
    }
}

fn read_file<F>(file: File, on_image: F)
where
    F: Fn(PickedImage) + 'static,
{
    let file_name = file.name();
    let file_type = file.type_();
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            console::error!(format!("FileReader: {:?}", e));
            on_image(Err(format!("{}: no se pudo leer el archivo", file_name)));
            return;
        }
    };

    let reader_clone = reader.clone();
    let name_clone = file_name.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let picked = match reader_clone.result().ok().and_then(|r| r.as_string()) {
            Some(data_url) => upload_from_data_url(&name_clone, &file_type, &data_url)
                .map(|upload| (upload, data_url)),
            None => Err(format!("{}: no se pudo leer el archivo", name_clone)),
        };
        on_image(picked);
    }) as Box<dyn FnMut(_)>);

    reader.set_onload(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        console::error!(format!("{}: {:?}", file_name, e));
    }
}
