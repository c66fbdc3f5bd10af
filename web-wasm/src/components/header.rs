//! Header and navigation bar

use leptos::prelude::*;

use crate::app::Page;

#[component]
pub fn Header(page: ReadSignal<Page>, set_page: WriteSignal<Page>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Sonrisas - Administración"</h1>
            <nav class="nav">
                {Page::ALL
                    .into_iter()
                    .map(|target| {
                        view! {
                            <button
                                class=move || {
                                    if page.get() == target { "nav-link active" } else { "nav-link" }
                                }
                                on:click=move |_| set_page.set(target)
                            >
                                {target.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>
        </header>
    }
}
