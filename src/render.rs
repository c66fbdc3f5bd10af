//! Plain-text rendering for the terminal

use sonrisas_common::api::resolve_asset_url;
use sonrisas_common::models::display_datetime;
use sonrisas_common::{
    ClinicOverview, Dashboard, Entity, FieldKind, FieldSpec, FormState, Notice, NoticeKind,
    PageSlice,
};

const MAX_CELL_WIDTH: usize = 40;

fn truncate(text: &str, max: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max {
        single_line
    } else {
        let cut: String = single_line.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

fn line(cells: &[&str], widths: &[usize]) -> String {
    let joined = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", joined.trim_end())
}

/// Left-aligned table with a header rule
pub fn table(columns: &[&str], rows: &[Vec<String>]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| truncate(cell, MAX_CELL_WIDTH)).collect())
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let mut out = String::new();
    out.push_str(&line(columns, &widths));
    out.push_str(&line(&rule.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
    for row in &rows {
        out.push_str(&line(&row.iter().map(String::as_str).collect::<Vec<_>>(), &widths));
    }
    out
}

pub fn page<E: Entity>(slice: &PageSlice<'_, E>) -> String {
    if slice.is_empty() {
        return format!("No hay {} para mostrar.\n", E::LABELS.title.to_lowercase());
    }
    let rows: Vec<Vec<String>> = slice.rows.iter().map(|item| item.cells()).collect();
    let mut out = table(E::columns(), &rows);
    out.push_str(&format!(
        "Página {} de {} ({} registros)\n",
        slice.page, slice.page_count, slice.filtered_len
    ));
    out
}

/// One record, a line per column
pub fn record<E: Entity>(item: &E, base_url: &str) -> String {
    let cells = item.cells();
    let width = E::columns().iter().map(|c| c.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for (column, value) in E::columns().iter().zip(cells) {
        let pad = width - column.chars().count();
        out.push_str(&format!("{}{}  {}\n", column, " ".repeat(pad), value));
    }
    if let Some(url) = item.thumbnail().and_then(|path| resolve_asset_url(base_url, path)) {
        out.push_str(&format!("Imagen: {}\n", url));
    }
    out
}

fn kind_label(kind: &FieldKind) -> String {
    match kind {
        FieldKind::Text | FieldKind::TextArea => "texto".into(),
        FieldKind::Email => "correo".into(),
        FieldKind::Tel => "teléfono".into(),
        FieldKind::Number => "número".into(),
        FieldKind::Date => "fecha AAAA-MM-DD".into(),
        FieldKind::DateTime => "fecha y hora AAAA-MM-DDTHH:MM".into(),
        FieldKind::Choice(options) => options.join("|"),
        FieldKind::Reference(endpoint) => format!("id de /api/{}", endpoint),
        FieldKind::Image => "--image RUTA".into(),
    }
}

pub fn fields<F: FormState>() -> String {
    let specs: &[FieldSpec] = F::fields();
    let rows: Vec<Vec<String>> = specs
        .iter()
        .map(|spec| {
            vec![
                spec.name.to_string(),
                spec.label.to_string(),
                kind_label(&spec.kind),
                if spec.required { "sí" } else { "no" }.to_string(),
            ]
        })
        .collect();
    table(&["Campo", "Etiqueta", "Tipo", "Obligatorio"], &rows)
}

pub fn notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("✔ {}", notice.message),
        NoticeKind::Error => format!("✖ {}", notice.message),
    }
}

pub fn dashboard(dashboard: &Dashboard, base_url: &str) -> String {
    let mut out = format!(
        "Pacientes: {}\nCitas: {}\n\nPróximas citas (7 días):\n",
        dashboard.total_patients, dashboard.total_appointments
    );
    if dashboard.upcoming.is_empty() {
        out.push_str("No hay citas próximas.\n");
        return out;
    }
    let rows: Vec<Vec<String>> = dashboard
        .upcoming
        .iter()
        .map(|u| {
            vec![
                display_datetime(&u.appointment.date),
                u.appointment.patient_name.clone(),
                u.appointment.dentist_name.clone(),
                u.appointment.status.clone(),
                u.patient_image
                    .as_deref()
                    .and_then(|path| resolve_asset_url(base_url, path))
                    .unwrap_or_default(),
            ]
        })
        .collect();
    out.push_str(&table(&["Fecha", "Paciente", "Odontólogo", "Estado", "Imagen"], &rows));
    out
}

pub fn overview(overview: &ClinicOverview) -> String {
    format!(
        "Pacientes: {}\nOdontólogos: {}\nCitas: {}\nCitas pendientes: {}\n",
        overview.patients, overview.dentists, overview.appointments, overview.pending_appointments
    )
}
