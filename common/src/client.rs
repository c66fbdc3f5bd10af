//! Remote resource client
//!
//! Every mutation is validated, sent once and, when the server accepted it,
//! followed by a refetch of the collection with the same [`ListQuery`].

use crate::api::{check_response, parse_response, ApiError, ApiRequest};
use crate::entity::{Entity, ListQuery};
use crate::form::{Choice, FormState};
use crate::transport::Transport;

/// Outcome of a mutation.
///
/// The outer `Err` means the server did not commit the change. `Ok(Err(_))`
/// means it did, but the refetch afterwards failed.
pub type MutationResult<E> = Result<Result<Vec<E>, ApiError>, ApiError>;

pub struct ResourceClient<T> {
    transport: T,
}

impl<T: Transport> ResourceClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn list<E: Entity>(&self, query: &ListQuery) -> Result<Vec<E>, ApiError> {
        let request = E::list_request(query);
        tracing::debug!(path = %request.path, "GET");
        let response = self.transport.send(request).await?;
        let items: Vec<E> = parse_response(&response, &E::LABELS.load_failed())?;
        tracing::debug!(endpoint = E::ENDPOINT, count = items.len(), "collection loaded");
        Ok(items)
    }

    /// Look one record up in the collection
    pub async fn find<E: Entity>(&self, id: u64, query: &ListQuery) -> Result<Option<E>, ApiError> {
        let items = self.list::<E>(query).await?;
        Ok(items.into_iter().find(|item| item.id() == id))
    }

    pub async fn create<E: Entity>(&self, form: &E::Form, query: &ListQuery) -> MutationResult<E> {
        form.validate()?;
        let request = E::create_request(form)?;
        self.mutate::<E>(request, &E::LABELS.create_failed(), query)
            .await
    }

    pub async fn update<E: Entity>(
        &self,
        id: u64,
        form: &E::Form,
        query: &ListQuery,
    ) -> MutationResult<E> {
        validate_for_update(form)?;
        let request = E::update_request(id, form)?;
        self.mutate::<E>(request, &E::LABELS.update_failed(), query)
            .await
    }

    pub async fn delete<E: Entity>(&self, id: u64, query: &ListQuery) -> MutationResult<E> {
        self.mutate::<E>(E::delete_request(id), &E::LABELS.delete_failed(), query)
            .await
    }

    /// Options for a reference field, e.g. `choices("odontologo")`
    pub async fn choices(&self, endpoint: &str) -> Result<Vec<Choice>, ApiError> {
        let response = self.transport.send(ApiRequest::get(endpoint)).await?;
        parse_response(
            &response,
            "No se pudieron cargar las opciones. Intente nuevamente.",
        )
    }

    async fn mutate<E: Entity>(
        &self,
        request: ApiRequest,
        fallback: &str,
        query: &ListQuery,
    ) -> MutationResult<E> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.transport.send(request).await?;
        check_response(&response, fallback)?;
        tracing::info!(method = method.as_str(), path = %path, status = response.status, "committed");
        Ok(self.list::<E>(query).await)
    }
}

/// Editing keeps the stored image, so image fields are never required on update
fn validate_for_update<F: FormState>(form: &F) -> crate::error::Result<()> {
    use crate::error::Error;
    use crate::form::FieldKind;

    for field in F::fields()
        .iter()
        .filter(|f| f.required && f.kind != FieldKind::Image)
    {
        if form.value(field.name).unwrap_or_default().trim().is_empty() {
            return Err(Error::MissingField(field.label.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ErrorKind, Method, RawResponse};
    use crate::models::{Dentist, DentistForm, Office, Radiograph};
    use crate::transport::mock::ScriptedTransport;
    use futures::executor::block_on;

    const OFFICES: &str = r#"[{"id": 1, "nombre": "Norte", "direccion": "Calle 1", "telefono": "022"}]"#;

    fn filled_dentist() -> DentistForm {
        let mut form = DentistForm::default();
        for (name, value) in [
            ("nombre", "Laura"),
            ("apellido", "Ruiz"),
            ("numeroLicencia", "L-100"),
            ("telefono", "0991"),
            ("email", "laura@example.com"),
            ("consultorioId", "1"),
        ] {
            form.set_field(name, value).unwrap();
        }
        form
    }

    #[test]
    fn test_list_decodes_collection() {
        let client = ResourceClient::new(ScriptedTransport::new().respond(RawResponse::json(200, OFFICES)));
        let offices: Vec<Office> = block_on(client.list(&ListQuery::default())).unwrap();
        assert_eq!(offices.len(), 1);
        assert_eq!(client.transport().requests()[0].path, "consultorio");
    }

    #[test]
    fn test_list_network_failure() {
        let client = ResourceClient::new(ScriptedTransport::new().fail(ApiError::network()));
        let err = block_on(client.list::<Office>(&ListQuery::default())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
    }

    #[test]
    fn test_create_posts_then_refetches() {
        let transport = ScriptedTransport::new()
            .respond(RawResponse::json(201, r#"{"id": 9}"#))
            .respond(RawResponse::json(
                200,
                r#"[{"id": 9, "nombre": "Laura", "apellido": "Ruiz", "consultorioId": 1}]"#,
            ));
        let client = ResourceClient::new(transport);
        let items: Vec<Dentist> =
            block_on(client.create::<Dentist>(&filled_dentist(), &ListQuery::default()))
                .unwrap()
                .unwrap();
        assert_eq!(items[0].id, 9);

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[1].method, Method::Get);
    }

    #[test]
    fn test_create_rejects_invalid_form_without_request() {
        let client = ResourceClient::new(ScriptedTransport::new());
        let err = block_on(client.create::<Dentist>(&DentistForm::default(), &ListQuery::default()))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Invalid);
        assert_eq!(err.message, "Por favor, complete el campo: Nombre");
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_create_server_error_message() {
        let transport = ScriptedTransport::new()
            .respond(RawResponse::json(409, r#"{"message": "La licencia ya existe"}"#));
        let client = ResourceClient::new(transport);
        let err = block_on(client.create::<Dentist>(&filled_dentist(), &ListQuery::default()))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Status(409));
        assert_eq!(err.message, "La licencia ya existe");
        assert_eq!(client.transport().requests().len(), 1);
    }

    #[test]
    fn test_committed_mutation_with_failed_refetch() {
        let transport = ScriptedTransport::new()
            .respond(RawResponse::text(204, ""))
            .fail(ApiError::network());
        let client = ResourceClient::new(transport);
        let outcome = block_on(client.delete::<Dentist>(3, &ListQuery::default())).unwrap();
        assert_eq!(outcome.unwrap_err().kind, ErrorKind::Network);
        assert_eq!(client.transport().requests()[0].path, "odontologo/3");
    }

    #[test]
    fn test_delete_fallback_message() {
        let transport = ScriptedTransport::new().respond(RawResponse::text(500, ""));
        let client = ResourceClient::new(transport);
        let err = block_on(client.delete::<Office>(1, &ListQuery::default())).unwrap_err();
        assert_eq!(err.message, "No se pudo eliminar el consultorio. Intente nuevamente.");
    }

    #[test]
    fn test_radiograph_update_is_rejected_before_sending() {
        let client = ResourceClient::new(ScriptedTransport::new());
        let form = Radiograph {
            id: 1,
            description: "Panorámica".into(),
            date: "2024-11-20".into(),
            patient_id: 4,
            ..Default::default()
        }
        .to_form();
        let err = block_on(client.update::<Radiograph>(1, &form, &ListQuery::default())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Invalid);
        assert!(err.message.starts_with("Operación no soportada"));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn test_update_puts_to_record_path() {
        let transport = ScriptedTransport::new()
            .respond(RawResponse::text(204, ""))
            .respond(RawResponse::json(200, OFFICES));
        let client = ResourceClient::new(transport);
        let form = crate::models::OfficeForm {
            name: "Norte".into(),
            address: "Calle 1".into(),
            phone: "022".into(),
        };
        let items: Vec<Office> = block_on(client.update::<Office>(1, &form, &ListQuery::default()))
            .unwrap()
            .unwrap();
        assert_eq!(items.len(), 1);
        let requests = client.transport().requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].path, "consultorio/1");
    }

    #[test]
    fn test_choices() {
        let transport = ScriptedTransport::new().respond(RawResponse::json(
            200,
            r#"[{"id": 1, "nombre": "Laura", "apellido": "Ruiz", "telefono": "0991"}]"#,
        ));
        let client = ResourceClient::new(transport);
        let choices = block_on(client.choices("odontologo")).unwrap();
        assert_eq!(choices[0].label(), "Laura Ruiz");
    }
}
