//! Clinic-wide counters, shown above the settings

use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use sonrisas_common::dashboard::load_overview;
use sonrisas_common::ClinicOverview;

use super::LoadState;
use crate::api;

#[component]
pub fn OverviewPage(base_url: ReadSignal<String>) -> impl IntoView {
    let (overview, set_overview) = signal(LoadState::<ClinicOverview>::Loading);

    Effect::new(move |_| {
        let base = base_url.get();
        set_overview.set(LoadState::Loading);
        spawn_local(async move {
            let result = match load_overview(&api::client(&base)).await {
                Ok(overview) => LoadState::Ready(overview),
                Err(err) => {
                    console::warn!(format!("overview: {}", err.message));
                    LoadState::Failed(err.message)
                }
            };
            set_overview.try_set(result);
        });
    });

    view! {
        <section class="overview">
            <h2>"Configuración"</h2>
            {move || match overview.get() {
                LoadState::Loading => view! { <p class="text-muted">"Cargando..."</p> }.into_any(),
                LoadState::Failed(message) => view! {
                    <div class="notice notice-error" role="alert">{message}</div>
                }
                .into_any(),
                LoadState::Ready(overview) => view! {
                    <div class="stat-grid">
                        <Stat value=overview.patients label="Pacientes" />
                        <Stat value=overview.dentists label="Odontólogos" />
                        <Stat value=overview.appointments label="Citas" />
                        <Stat value=overview.pending_appointments label="Citas pendientes" />
                    </div>
                }
                .into_any(),
            }}
        </section>
    }
}

#[component]
fn Stat(value: usize, label: &'static str) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-value">{value}</span>
            <span class="stat-label">{label}</span>
        </div>
    }
}
