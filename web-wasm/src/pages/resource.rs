//! Generic CRUD page
//!
//! One page per entity, built from its column and field descriptors. The
//! collection state lives in a single signal; every handler applies its
//! outcome through [`CollectionState`] so the rules match the CLI.

use gloo::console;
use leptos::ev::{Event, SubmitEvent};
use leptos::prelude::*;
use leptos::task::spawn_local;
use sonrisas_common::api::resolve_asset_url;
use sonrisas_common::{Choice, CollectionState, Entity, FieldKind, FieldSpec, FormState, ListQuery};

use crate::api;
use crate::components::{
    confirm_dialog::ConfirmDialog,
    image_field::{ImageField, PickedImage},
    notice_banner::NoticeBanner,
    pagination::Pagination,
};

/// Options of reference fields, keyed by endpoint
type Choices = Vec<(&'static str, Vec<Choice>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormTarget {
    Create,
    Edit,
}

fn form_ref<E: Entity>(state: &CollectionState<E>, target: FormTarget) -> &E::Form {
    match target {
        FormTarget::Create => &state.form,
        FormTarget::Edit => &state.edit_form,
    }
}

fn form_mut<E: Entity>(state: &mut CollectionState<E>, target: FormTarget) -> &mut E::Form {
    match target {
        FormTarget::Create => &mut state.form,
        FormTarget::Edit => &mut state.edit_form,
    }
}

fn list_query<E: Entity>(state: &CollectionState<E>) -> ListQuery {
    state.query(ListQuery::default().recent)
}

/// Owned copy of the visible page, so the table only re-renders when it changes
#[derive(Debug, Clone, PartialEq)]
struct PageRows<E> {
    rows: Vec<E>,
    page: usize,
    page_count: usize,
    filtered_len: usize,
}

pub fn resource_page<E: Entity + PartialEq>(base_url: ReadSignal<String>) -> impl IntoView {
    let state = RwSignal::new(CollectionState::<E>::new());
    let choices = RwSignal::new(Choices::new());
    let preview = RwSignal::new(None::<String>);

    // initial load, and again whenever the backend changes
    Effect::new(move |_| {
        let base = base_url.get();
        load(base.clone(), state);
        load_choices::<E>(base, state, choices);
    });

    let loading = Memo::new(move |_| state.with(|s| s.loading));
    let busy = Memo::new(move |_| state.with(|s| s.busy));
    let editing = Memo::new(move |_| state.with(|s| s.editing));
    let page_rows = Memo::new(move |_| {
        state.with(|s| {
            let slice = s.visible();
            PageRows {
                rows: slice.rows.into_iter().cloned().collect::<Vec<E>>(),
                page: slice.page,
                page_count: slice.page_count,
                filtered_len: slice.filtered_len,
            }
        })
    });

    let on_search = move |ev: Event| {
        let term = event_target_value(&ev);
        let changed = state.try_update(|s| s.view.set_search(&term)).unwrap_or(false);
        if changed && E::SERVER_SEARCH {
            load(base_url.get_untracked(), state);
        }
    };

    let on_create = move |ev: SubmitEvent| {
        ev.prevent_default();
        if !state.try_update(|s| s.begin()).unwrap_or(false) {
            return;
        }
        let (form, query) = state.with_untracked(|s| (s.form.clone(), list_query(s)));
        let base = base_url.get_untracked();
        spawn_local(async move {
            let result = api::client(&base).create::<E>(&form, &query).await;
            let committed = state
                .try_update(|s| {
                    let committed = s.finish_mutation(result, E::LABELS.created);
                    if committed {
                        s.form.reset();
                    }
                    committed
                })
                .unwrap_or(false);
            if committed {
                preview.try_set(None);
            }
        });
    };

    let on_update = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(id) = state.with_untracked(|s| s.editing) else {
            return;
        };
        if !state.try_update(|s| s.begin()).unwrap_or(false) {
            return;
        }
        let (form, query) = state.with_untracked(|s| (s.edit_form.clone(), list_query(s)));
        let base = base_url.get_untracked();
        spawn_local(async move {
            let result = api::client(&base).update::<E>(id, &form, &query).await;
            state.try_update(|s| {
                if s.finish_mutation(result, E::LABELS.updated) {
                    s.cancel_edit();
                }
            });
        });
    };

    let on_confirm_delete = move || {
        let target = state
            .try_update(|s| {
                let id = s.delete_dialog.confirm()?;
                if s.begin() {
                    Some(id)
                } else {
                    s.delete_dialog.reset();
                    None
                }
            })
            .flatten();
        let Some(id) = target else {
            return;
        };
        let query = state.with_untracked(list_query);
        let base = base_url.get_untracked();
        spawn_local(async move {
            let result = api::client(&base).delete::<E>(id, &query).await;
            state.try_update(|s| {
                s.delete_dialog.reset();
                s.finish_mutation(result, E::LABELS.deleted);
            });
        });
    };

    let delete_prompt = Signal::derive(move || {
        state.with(|s| s.delete_dialog.pending().map(|id| match s.find(*id) {
            Some(item) => format!("{} ({})", E::LABELS.delete_prompt(), item.display_name()),
            None => E::LABELS.delete_prompt(),
        }))
    });

    let has_images = E::Form::fields().iter().any(|f| f.kind == FieldKind::Image);

    view! {
        <section class="resource-page">
            <h2>{E::LABELS.title}</h2>

            <NoticeBanner
                notice=Signal::derive(move || state.with(|s| s.notice.current().cloned()))
                on_dismiss=move || state.update(|s| s.notice.dismiss())
            />

            <form class="resource-form" on:submit=on_create>
                <h3>"Agregar"</h3>
                {form_fields::<E>(state, FormTarget::Create, choices, preview)}
                <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                    "Guardar"
                </button>
            </form>

            {move || editing.get().map(|id| view! {
                <form class="resource-form edit-form" on:submit=on_update>
                    <h3>{format!("Editar registro #{}", id)}</h3>
                    {form_fields::<E>(state, FormTarget::Edit, choices, preview)}
                    <div class="form-actions">
                        <button type="submit" class="btn btn-primary" disabled=move || busy.get()>
                            "Actualizar"
                        </button>
                        <button
                            type="button"
                            class="btn btn-secondary"
                            on:click=move |_| state.update(|s| s.cancel_edit())
                        >
                            "Cancelar"
                        </button>
                    </div>
                </form>
            })}

            <div class="toolbar">
                <input
                    type="search"
                    class="search-input"
                    placeholder="Buscar..."
                    prop:value=move || state.with(|s| s.view.search.clone())
                    on:input=on_search
                />
            </div>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-muted">"Cargando..."</p> }
            >
                <Show
                    when=move || page_rows.with(|p| p.filtered_len > 0)
                    fallback=|| view! {
                        <p class="text-muted">
                            {format!("No hay {} para mostrar.", E::LABELS.title.to_lowercase())}
                        </p>
                    }
                >
                    <table class="data-table">
                        <thead>
                            <tr>
                                {has_images.then(|| view! { <th>"Imagen"</th> })}
                                {E::columns().iter().map(|c| view! { <th>{*c}</th> }).collect_view()}
                                <th>"Acciones"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || page_rows.with(|p| {
                                p.rows
                                    .iter()
                                    .map(|item| row_view(item, has_images, state, base_url))
                                    .collect_view()
                            })}
                        </tbody>
                    </table>
                    <Pagination
                        page=Signal::derive(move || page_rows.with(|p| p.page))
                        page_count=Signal::derive(move || page_rows.with(|p| p.page_count))
                        on_prev=move || {
                            let count = page_rows.with_untracked(|p| p.page_count);
                            state.update(|s| s.view.prev_page(count));
                        }
                        on_next=move || {
                            let count = page_rows.with_untracked(|p| p.page_count);
                            state.update(|s| s.view.next_page(count));
                        }
                    />
                </Show>
            </Show>

            <ConfirmDialog
                message=delete_prompt
                busy=Signal::derive(move || busy.get())
                on_confirm=on_confirm_delete
                on_cancel=move || state.update(|s| s.delete_dialog.cancel())
            />
        </section>
    }
}

fn load<E: Entity>(base_url: String, state: RwSignal<CollectionState<E>>) {
    let query = state.with_untracked(list_query);
    let Some(generation) = state.try_update(|s| s.begin_load()) else {
        return;
    };
    spawn_local(async move {
        let result = api::client(&base_url).list::<E>(&query).await;
        if let Err(err) = &result {
            console::warn!(format!("{}: {}", E::ENDPOINT, err.message));
        }
        state.try_update(|s| s.finish_load(generation, result));
    });
}

/// Fetch the options of every reference field of the form
fn load_choices<E: Entity>(
    base_url: String,
    state: RwSignal<CollectionState<E>>,
    choices: RwSignal<Choices>,
) {
    let endpoints: Vec<&'static str> = E::Form::fields()
        .iter()
        .filter_map(|f| match f.kind {
            FieldKind::Reference(endpoint) => Some(endpoint),
            _ => None,
        })
        .collect();
    if endpoints.is_empty() {
        return;
    }
    spawn_local(async move {
        let client = api::client(&base_url);
        let mut loaded = Choices::new();
        for endpoint in endpoints {
            match client.choices(endpoint).await {
                Ok(options) => loaded.push((endpoint, options)),
                Err(err) => {
                    state.try_update(|s| s.notice.error(err.message));
                }
            }
        }
        choices.try_set(loaded);
    });
}

fn row_view<E: Entity>(
    item: &E,
    has_images: bool,
    state: RwSignal<CollectionState<E>>,
    base_url: ReadSignal<String>,
) -> impl IntoView {
    let id = item.id();
    let image = has_images.then(|| {
        let src = item
            .thumbnail()
            .and_then(|path| resolve_asset_url(&base_url.get_untracked(), path));
        view! {
            <td class="thumbnail">
                {src.map(|src| view! { <img src=src alt="" /> })}
            </td>
        }
    });

    view! {
        <tr>
            {image}
            {item.cells().into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
            <td class="actions">
                {E::EDITABLE.then(|| view! {
                    <button
                        class="btn btn-secondary btn-small"
                        on:click=move |_| {
                            state.update(|s| {
                                s.start_edit(id);
                            });
                        }
                    >
                        "Editar"
                    </button>
                })}
                <button
                    class="btn btn-danger btn-small"
                    on:click=move |_| {
                        state.update(|s| {
                            s.delete_dialog.request(id);
                        });
                    }
                >
                    "Eliminar"
                </button>
            </td>
        </tr>
    }
}

fn form_fields<E: Entity>(
    state: RwSignal<CollectionState<E>>,
    target: FormTarget,
    choices: RwSignal<Choices>,
    preview: RwSignal<Option<String>>,
) -> impl IntoView {
    E::Form::fields()
        .iter()
        // images are only sent on create
        .filter(|spec| target == FormTarget::Create || spec.kind != FieldKind::Image)
        .map(|spec| field_input(spec, state, target, choices, preview))
        .collect_view()
}

fn field_input<E: Entity>(
    spec: &'static FieldSpec,
    state: RwSignal<CollectionState<E>>,
    target: FormTarget,
    choices: RwSignal<Choices>,
    preview: RwSignal<Option<String>>,
) -> AnyView {
    let name = spec.name;
    let id = match target {
        FormTarget::Create => format!("new-{}", name),
        FormTarget::Edit => format!("edit-{}", name),
    };
    let label_for = id.clone();
    let kind = spec.kind;
    let value = move || {
        state.with(|s| display_value(kind, form_ref(s, target).value(name).unwrap_or_default()))
    };
    let on_input = move |ev: Event| {
        let input = event_target_value(&ev);
        state.update(|s| {
            if let Err(e) = form_mut(s, target).set_field(name, &input) {
                s.notice.error(e.to_string());
            }
        });
    };

    let control = match spec.kind {
        FieldKind::Image => {
            let on_image = move |picked: PickedImage| match picked {
                Ok((upload, data_url)) => {
                    let attached = state.try_update(|s| {
                        form_mut(s, target)
                            .set_upload(name, upload)
                            .map_err(|e| s.notice.error(e.to_string()))
                            .is_ok()
                    });
                    if attached == Some(true) {
                        preview.set(Some(data_url));
                    }
                }
                Err(message) => state.update(|s| s.notice.error(message)),
            };
            return view! {
                <ImageField
                    name=name
                    label=spec.label
                    preview=Signal::derive(move || preview.get())
                    on_image=on_image
                />
            }
            .into_any();
        }
        FieldKind::TextArea => view! {
            <textarea id=id required=spec.required prop:value=value on:input=on_input />
        }
        .into_any(),
        FieldKind::Choice(options) => view! {
            <select id=id required=spec.required on:change=on_input>
                <option value="">"Seleccione..."</option>
                {options
                    .iter()
                    .map(|option| {
                        let option = *option;
                        view! {
                            <option value=option prop:selected=move || value() == option>
                                {option}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_any(),
        FieldKind::Reference(endpoint) => view! {
            <select id=id required=spec.required on:change=on_input>
                <option value="">"Seleccione..."</option>
                {move || {
                    choices.with(|all| {
                        all.iter()
                            .find(|(e, _)| *e == endpoint)
                            .map(|(_, options)| options.clone())
                            .unwrap_or_default()
                    })
                    .into_iter()
                    .map(|choice| {
                        let key = choice.id.to_string();
                        let selected_key = key.clone();
                        view! {
                            <option value=key prop:selected=move || value() == selected_key>
                                {choice.label()}
                            </option>
                        }
                    })
                    .collect_view()
                }}
            </select>
        }
        .into_any(),
        kind => view! {
            <input
                type=input_type(kind)
                id=id
                required=spec.required
                prop:value=value
                on:input=on_input
            />
        }
        .into_any(),
    };

    view! {
        <div class="form-group">
            <label for=label_for>{spec.label}</label>
            {control}
        </div>
    }
    .into_any()
}

fn input_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Email => "email",
        FieldKind::Tel => "tel",
        FieldKind::Number => "number",
        FieldKind::Date => "date",
        FieldKind::DateTime => "datetime-local",
        _ => "text",
    }
}

/// Numbers at zero show as an empty box so a cleared field stays cleared
fn display_value(kind: FieldKind, value: String) -> String {
    if kind == FieldKind::Number && value == "0" {
        String::new()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_type_per_kind() {
        assert_eq!(input_type(FieldKind::Email), "email");
        assert_eq!(input_type(FieldKind::DateTime), "datetime-local");
        assert_eq!(input_type(FieldKind::Text), "text");
        assert_eq!(input_type(FieldKind::Reference("paciente")), "text");
    }

    #[test]
    fn test_zero_number_shows_blank() {
        assert_eq!(display_value(FieldKind::Number, "0".into()), "");
        assert_eq!(display_value(FieldKind::Number, "34".into()), "34");
        assert_eq!(display_value(FieldKind::Text, "0".into()), "0");
        assert_eq!(display_value(FieldKind::Reference("consultorio"), "0".into()), "0");
    }
}
