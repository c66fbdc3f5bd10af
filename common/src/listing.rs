//! Client-side search and pagination over an already fetched collection

use crate::entity::Entity;

/// Search term and page position of one list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub search: String,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl ListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn for_entity<E: Entity>() -> Self {
        Self::new(E::PAGE_SIZE)
    }

    /// Returns whether the term changed; a changed term goes back to page 1
    pub fn set_search(&mut self, term: &str) -> bool {
        if self.search == term {
            return false;
        }
        self.search = term.to_string();
        self.page = 1;
        true
    }

    /// Move to `page`, clamped into `[1, max(1, page_count)]`
    pub fn set_page(&mut self, page: usize, page_count: usize) {
        self.page = page.clamp(1, page_count.max(1));
    }

    pub fn next_page(&mut self, page_count: usize) {
        self.set_page(self.page + 1, page_count);
    }

    pub fn prev_page(&mut self, page_count: usize) {
        self.set_page(self.page.saturating_sub(1), page_count);
    }

    /// Pull the stored page back into range after the collection changed
    pub fn clamp_to<E: Entity>(&mut self, items: &[E]) {
        let count = page_count(self.matching(items).len(), self.page_size);
        self.set_page(self.page, count);
    }

    fn matching<'a, E: Entity>(&self, items: &'a [E]) -> Vec<&'a E> {
        if E::SERVER_SEARCH {
            items.iter().collect()
        } else {
            filter(items, &self.search)
        }
    }

    /// Filter and cut out the current page
    pub fn render<'a, E: Entity>(&self, items: &'a [E]) -> PageSlice<'a, E> {
        let filtered = self.matching(items);
        let page_count = page_count(filtered.len(), self.page_size);
        let page = self.page.clamp(1, page_count.max(1));
        let filtered_len = filtered.len();
        let rows = filtered
            .into_iter()
            .skip((page - 1) * self.page_size)
            .take(self.page_size)
            .collect();
        PageSlice {
            rows,
            page,
            page_count,
            filtered_len,
        }
    }
}

/// One rendered page
#[derive(Debug, Clone, PartialEq)]
pub struct PageSlice<'a, E> {
    pub rows: Vec<&'a E>,
    pub page: usize,
    pub page_count: usize,
    pub filtered_len: usize,
}

impl<E> PageSlice<'_, E> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }
}

/// Case-insensitive substring match on any search field; accents must match.
/// Surrounding whitespace in the term is ignored.
pub fn matches<E: Entity>(item: &E, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

pub fn filter<'a, E: Entity>(items: &'a [E], term: &str) -> Vec<&'a E> {
    items.iter().filter(|item| matches(*item, term)).collect()
}

/// `ceil(len / page_size)`; an empty list has zero pages
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, Dentist, Office, Patient, Radiograph};

    fn patients(names: &[&str]) -> Vec<Patient> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Patient {
                id: i as u64 + 1,
                name: name.to_string(),
                ..Default::default()
            })
            .collect()
    }

    fn names(slice: &PageSlice<'_, Patient>) -> Vec<String> {
        slice.rows.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_accent_sensitive_search() {
        let items = patients(&["Juan Pérez", "María González", "Sergio Contreras", "Pepito Pérez"]);
        let mut view = ListView::for_entity::<Patient>();

        let slice = view.render(&items);
        assert_eq!(slice.page_count, 1);
        assert_eq!(slice.rows.len(), 4);

        view.set_search("pérez");
        assert_eq!(names(&view.render(&items)), vec!["Juan Pérez", "Pepito Pérez"]);

        view.set_search("perez");
        let slice = view.render(&items);
        assert!(slice.is_empty());
        assert_eq!(slice.page_count, 0);
    }

    #[test]
    fn test_search_term_is_trimmed() {
        let items = patients(&["Juan Pérez", "Ana"]);
        assert_eq!(filter(&items, "  pérez ").len(), 1);
        assert_eq!(filter(&items, "   ").len(), 2);
    }

    #[test]
    fn test_case_insensitive_unicode() {
        let items = patients(&["ÁNGELA RÍOS", "Ana"]);
        let filtered = filter(&items, "ángela");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_search_matches_dentist_name() {
        let mut items = patients(&["Ana", "Luis"]);
        items[1].dentist_name = "Laura Ruiz".into();
        let filtered = filter(&items, "ruiz");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Luis");
    }

    #[test]
    fn test_filter_keeps_only_matching() {
        let items = patients(&["Ana Rojas", "Luis Rojas", "Marta Vera", "Rosa Rojas", "Iván Paz"]);
        let filtered = filter(&items, "rojas");
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|p| p.name.contains("Rojas")));
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 4), 0);
        assert_eq!(page_count(4, 4), 1);
        assert_eq!(page_count(5, 4), 2);
        assert_eq!(page_count(9, 5), 2);
        assert_eq!(page_count(3, 0), 3);
    }

    #[test]
    fn test_search_change_resets_page() {
        let items = patients(&["A1", "A2", "A3", "A4", "A5", "A6", "B1"]);
        let mut view = ListView::for_entity::<Patient>();
        view.set_page(2, view.render(&items).page_count);
        assert_eq!(view.page, 2);
        assert_eq!(names(&view.render(&items)), vec!["A5", "A6", "B1"]);

        assert!(!view.set_search(""));
        assert_eq!(view.page, 2);

        assert!(view.set_search("a"));
        assert_eq!(view.page, 1);
        let slice = view.render(&items);
        assert_eq!(slice.filtered_len, 6);
        assert_eq!(slice.page_count, 2);
        assert_eq!(names(&slice), vec!["A1", "A2", "A3", "A4"]);
    }

    #[test]
    fn test_render_clamps_page_after_shrink() {
        let mut items = patients(&["A", "B", "C", "D", "E"]);
        let mut view = ListView::for_entity::<Patient>();
        view.set_page(2, 2);
        items.truncate(4);
        let slice = view.render(&items);
        assert_eq!(slice.page, 1);
        assert_eq!(slice.rows.len(), 4);
        assert!(!slice.has_next());
    }

    #[test]
    fn test_clamp_to_moves_stored_page_back() {
        let mut items = patients(&["A", "B", "C", "D", "E", "F", "G", "H", "I"]);
        let mut view = ListView::new(4);
        view.set_page(3, view.render(&items).page_count);
        assert_eq!(view.page, 3);

        items.pop();
        view.clamp_to(&items);
        assert_eq!(view.page, 2);
        view.prev_page(view.render(&items).page_count);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_clamp_to_respects_search() {
        let items = patients(&["Ana", "Alba", "Bea", "Berta", "Bruno"]);
        let mut view = ListView::new(2);
        view.set_search("b");
        view.set_page(2, 2);
        view.clamp_to(&items[..3]);
        assert_eq!(view.page, 1);
    }

    #[test]
    fn test_appointment_search_fields() {
        let appointment = |id, status: &str, reason: &str| Appointment {
            id,
            patient_name: format!("Paciente {}", id),
            status: status.into(),
            reason: reason.into(),
            date: format!("2024-11-{:02}T09:00:00", id),
            ..Default::default()
        };
        let items = vec![
            appointment(1, "Pendiente", "Limpieza"),
            appointment(2, "Completada", "Ortodoncia"),
            appointment(3, "Pendiente", "Extracción"),
            appointment(4, "Cancelada", "Limpieza dental"),
        ];

        let pending = filter(&items, "pendiente");
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|a| a.status == "Pendiente"));

        let cleaning = filter(&items, "LIMPIEZA");
        assert_eq!(cleaning.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1, 4]);

        let by_date = filter(&items, "2024-11-02");
        assert_eq!(by_date.len(), 1);
        assert_eq!(by_date[0].id, 2);
    }

    #[test]
    fn test_dentist_search_fields() {
        let dentist = |id, license: &str, email: &str, office_id| Dentist {
            id,
            name: "Laura".into(),
            surname: format!("Apellido{}", id),
            license_number: license.into(),
            email: email.into(),
            office_id,
            ..Default::default()
        };
        let items = vec![
            dentist(1, "MSP-1001", "laura@norte.ec", 1),
            dentist(2, "MSP-2002", "laura@sur.ec", 2),
            dentist(3, "MSP-1003", "otra@norte.ec", 7),
        ];

        let by_license = filter(&items, "msp-100");
        assert_eq!(by_license.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 3]);

        let by_email = filter(&items, "@sur");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, 2);

        let by_office = filter(&items, "7");
        assert_eq!(by_office.len(), 1);
        assert_eq!(by_office[0].office_id, 7);
    }

    #[test]
    fn test_office_search_fields() {
        let office = |id, name: &str, address: &str, phone: &str| Office {
            id,
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            ..Default::default()
        };
        let items = vec![
            office(1, "Norte", "Av. Amazonas 120", "022345678"),
            office(2, "Sur", "Calle Maldonado 45", "022987654"),
            office(3, "Valle", "Av. Amazonas 900", "023111222"),
        ];

        let by_address = filter(&items, "amazonas");
        assert_eq!(by_address.len(), 2);
        assert!(by_address.iter().all(|o| o.address.contains("Amazonas")));

        let by_phone = filter(&items, "0229");
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Sur");
    }

    #[test]
    fn test_set_page_clamps() {
        let mut view = ListView::new(5);
        view.set_page(0, 3);
        assert_eq!(view.page, 1);
        view.set_page(10, 3);
        assert_eq!(view.page, 3);
        view.set_page(2, 0);
        assert_eq!(view.page, 1);
        view.prev_page(3);
        assert_eq!(view.page, 1);
        view.next_page(3);
        assert_eq!(view.page, 2);
    }

    #[test]
    fn test_server_search_is_not_filtered_locally() {
        let items = vec![Radiograph {
            id: 1,
            description: "Panorámica".into(),
            ..Default::default()
        }];
        let mut view = ListView::for_entity::<Radiograph>();
        view.set_search("molar");
        assert_eq!(view.render(&items).rows.len(), 1);
    }
}
