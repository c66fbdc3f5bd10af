use leptos::prelude::*;
use sonrisas_common::Notice;

#[component]
pub fn NoticeBanner<F>(notice: Signal<Option<Notice>>, on_dismiss: F) -> impl IntoView
where
    F: Fn() + 'static + Clone + Send + Sync,
{
    view! {
        {move || {
            let on_dismiss = on_dismiss.clone();
            notice.get().map(|notice| {
                let class = if notice.is_error() { "notice notice-error" } else { "notice notice-success" };
                view! {
                    <div class=class role="alert">
                        <span class="notice-message">{notice.message}</span>
                        <button class="notice-close" on:click=move |_| on_dismiss()>
                            "×"
                        </button>
                    </div>
                }
            })
        }}
    }
}
