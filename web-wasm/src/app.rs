//! Main application component

use leptos::prelude::*;
use sonrisas_common::{Appointment, Dentist, Office, Patient, Radiograph};

use crate::components::{header::Header, settings_panel::SettingsPanel};
use crate::pages::{dashboard::DashboardPage, overview::OverviewPage, resource::resource_page};
use crate::settings;

/// Sections reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Patients,
    Appointments,
    Dentists,
    Offices,
    Radiographs,
    Overview,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Dashboard,
        Page::Patients,
        Page::Appointments,
        Page::Dentists,
        Page::Offices,
        Page::Radiographs,
        Page::Overview,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Dashboard => "Inicio",
            Page::Patients => "Pacientes",
            Page::Appointments => "Citas",
            Page::Dentists => "Odontólogos",
            Page::Offices => "Consultorios",
            Page::Radiographs => "Radiografías",
            Page::Overview => "Configuración",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::Dashboard);
    let (base_url, set_base_url) = signal(settings::load_base_url());

    view! {
        <div class="container">
            <Header page=page set_page=set_page />

            <main class="content">
                {move || match page.get() {
                    Page::Dashboard => view! { <DashboardPage base_url=base_url /> }.into_any(),
                    Page::Patients => resource_page::<Patient>(base_url).into_any(),
                    Page::Appointments => resource_page::<Appointment>(base_url).into_any(),
                    Page::Dentists => resource_page::<Dentist>(base_url).into_any(),
                    Page::Offices => resource_page::<Office>(base_url).into_any(),
                    Page::Radiographs => resource_page::<Radiograph>(base_url).into_any(),
                    Page::Overview => view! {
                        <OverviewPage base_url=base_url />
                        <SettingsPanel base_url=base_url set_base_url=set_base_url />
                    }.into_any(),
                }}
            </main>
        </div>
    }
}
