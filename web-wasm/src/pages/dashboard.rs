//! Home page: totals and the next appointments of the week

use chrono::Local;
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;
use sonrisas_common::api::resolve_asset_url;
use sonrisas_common::dashboard::load_dashboard;
use sonrisas_common::Dashboard;

use super::LoadState;
use crate::api;

#[component]
pub fn DashboardPage(base_url: ReadSignal<String>) -> impl IntoView {
    let (dashboard, set_dashboard) = signal(LoadState::<Dashboard>::Loading);

    Effect::new(move |_| {
        let base = base_url.get();
        set_dashboard.set(LoadState::Loading);
        spawn_local(async move {
            let now = Local::now().naive_local();
            let result = match load_dashboard(&api::client(&base), now).await {
                Ok(dashboard) => LoadState::Ready(dashboard),
                Err(err) => {
                    console::warn!(format!("dashboard: {}", err.message));
                    LoadState::Failed(err.message)
                }
            };
            set_dashboard.try_set(result);
        });
    });

    view! {
        <section class="dashboard">
            <h2>"Panel principal"</h2>
            {move || match dashboard.get() {
                LoadState::Loading => view! { <p class="text-muted">"Cargando..."</p> }.into_any(),
                LoadState::Failed(message) => view! {
                    <div class="notice notice-error" role="alert">{message}</div>
                }
                .into_any(),
                LoadState::Ready(dashboard) => dashboard_view(dashboard, &base_url.get_untracked()).into_any(),
            }}
        </section>
    }
}

fn dashboard_view(dashboard: Dashboard, base_url: &str) -> impl IntoView {
    let upcoming = if dashboard.upcoming.is_empty() {
        view! { <p class="text-muted">"No hay citas en los próximos 7 días."</p> }.into_any()
    } else {
        let items = dashboard
            .upcoming
            .into_iter()
            .map(|upcoming| {
                let image = upcoming
                    .patient_image
                    .as_deref()
                    .and_then(|path| resolve_asset_url(base_url, path));
                let when = upcoming.scheduled_at.format("%d/%m/%Y %H:%M").to_string();
                let appointment = upcoming.appointment;
                view! {
                    <li class="upcoming-item">
                        {image.map(|src| view! { <img class="avatar" src=src alt="" /> })}
                        <div>
                            <strong>{appointment.patient_name}</strong>
                            <span class="text-muted">
                                {format!(" {} · {}", when, appointment.dentist_name)}
                            </span>
                            <p>{appointment.reason}</p>
                        </div>
                    </li>
                }
            })
            .collect_view();
        view! { <ul class="upcoming-list">{items}</ul> }.into_any()
    };

    view! {
        <div class="stat-grid">
            <div class="stat-card">
                <span class="stat-value">{dashboard.total_patients}</span>
                <span class="stat-label">"Pacientes"</span>
            </div>
            <div class="stat-card">
                <span class="stat-value">{dashboard.total_appointments}</span>
                <span class="stat-label">"Citas"</span>
            </div>
        </div>
        <h3>"Próximas citas"</h3>
        {upcoming}
    }
}
