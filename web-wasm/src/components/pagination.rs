use leptos::prelude::*;

#[component]
pub fn Pagination<FP, FN>(
    page: Signal<usize>,
    page_count: Signal<usize>,
    on_prev: FP,
    on_next: FN,
) -> impl IntoView
where
    FP: Fn() + 'static + Send + Sync,
    FN: Fn() + 'static + Send + Sync,
{
    view! {
        <div class="pagination">
            <button
                class="btn btn-secondary btn-small"
                disabled=move || page.get() <= 1
                on:click=move |_| on_prev()
            >
                "Anterior"
            </button>
            <span class="page-indicator">
                {move || format!("Página {} de {}", page.get(), page_count.get().max(1))}
            </span>
            <button
                class="btn btn-secondary btn-small"
                disabled=move || page.get() >= page_count.get()
                on:click=move |_| on_next()
            >
                "Siguiente"
            </button>
        </div>
    }
}
