//! Entity descriptors
//!
//! One [`Entity`] impl per backend resource replaces the near-duplicate page
//! components: endpoint, labels, list columns, search fields and request
//! shapes all live here.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::ApiRequest;
use crate::error::Result;
use crate::form::FormState;

/// User-facing wording for one resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    /// "Pacientes"
    pub title: &'static str,
    /// "el paciente"
    pub singular: &'static str,
    /// "los pacientes"
    pub plural: &'static str,
    pub created: &'static str,
    pub updated: &'static str,
    pub deleted: &'static str,
}

impl Labels {
    pub fn load_failed(&self) -> String {
        format!("No se pudo cargar {}. Intente nuevamente.", self.plural)
    }

    pub fn create_failed(&self) -> String {
        format!("No se pudo guardar {}. Intente nuevamente.", self.singular)
    }

    pub fn update_failed(&self) -> String {
        format!("No se pudo actualizar {}. Intente nuevamente.", self.singular)
    }

    pub fn delete_failed(&self) -> String {
        format!("No se pudo eliminar {}. Intente nuevamente.", self.singular)
    }

    pub fn delete_prompt(&self) -> String {
        format!("¿Está seguro de que desea eliminar {}?", self.singular)
    }
}

/// Parameters of a collection read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Only used by endpoints that search server-side
    pub search: String,
    /// How many recent records to ask for, where the endpoint is capped
    pub recent: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            recent: 10,
        }
    }
}

pub trait Entity: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    type Form: FormState;

    /// Path segment under `/api/`
    const ENDPOINT: &'static str;
    const LABELS: Labels;
    const PAGE_SIZE: usize;
    /// Search goes to the server instead of filtering locally
    const SERVER_SEARCH: bool = false;
    /// Records can be changed after creation
    const EDITABLE: bool = true;

    fn id(&self) -> u64;

    /// Short human label, used in confirmation prompts
    fn display_name(&self) -> String;

    fn columns() -> &'static [&'static str];

    fn cells(&self) -> Vec<String>;

    /// Fields the local search matches against
    fn search_fields(&self) -> Vec<String>;

    /// Edit form pre-filled from this record
    fn to_form(&self) -> Self::Form;

    /// Image path or URL, if the record carries one
    fn thumbnail(&self) -> Option<&str> {
        None
    }

    fn list_request(_query: &ListQuery) -> ApiRequest {
        ApiRequest::get(Self::ENDPOINT)
    }

    fn create_request(form: &Self::Form) -> Result<ApiRequest> {
        Ok(ApiRequest::post_json(Self::ENDPOINT, form.payload()?))
    }

    fn update_request(id: u64, form: &Self::Form) -> Result<ApiRequest> {
        Ok(ApiRequest::put_json(
            format!("{}/{}", Self::ENDPOINT, id),
            form.payload()?,
        ))
    }

    fn delete_request(id: u64) -> ApiRequest {
        ApiRequest::delete(format!("{}/{}", Self::ENDPOINT, id))
    }
}
