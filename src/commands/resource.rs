//! The generic list/show/fields/create/update/delete actions

use super::{report, spinner, Context};
use crate::cli::ResourceAction;
use crate::error::{AdminError, Result};
use crate::render;
use crate::transport::HttpTransport;
use crate::upload::read_image;
use dialoguer::Confirm;
use sonrisas_common::{Entity, FieldKind, FormState, ListQuery, ResourcePage};
use std::path::Path;

pub async fn run<E: Entity>(ctx: &Context, action: ResourceAction) -> Result<()> {
    match action {
        ResourceAction::List { search, page, all } => list::<E>(ctx, search, page, all).await,
        ResourceAction::Show { id } => show::<E>(ctx, id).await,
        ResourceAction::Fields => {
            print!("{}", render::fields::<E::Form>());
            Ok(())
        }
        ResourceAction::Create { fields, image } => {
            create::<E>(ctx, &fields, image.as_deref()).await
        }
        ResourceAction::Update { id, fields, image } => {
            update::<E>(ctx, id, &fields, image.as_deref()).await
        }
        ResourceAction::Delete { id, yes } => delete::<E>(ctx, id, yes).await,
    }
}

fn new_page<E: Entity>(ctx: &Context) -> ResourcePage<'_, HttpTransport, E> {
    ResourcePage::new(&ctx.client).with_recent(ctx.recent)
}

async fn load<E: Entity>(page: &mut ResourcePage<'_, HttpTransport, E>) -> Result<()> {
    let pb = spinner(&format!("Cargando {}...", E::LABELS.plural));
    page.load().await;
    pb.finish_and_clear();
    report(page.state.notice.current())
}

async fn list<E: Entity>(
    ctx: &Context,
    search: Option<String>,
    page_number: usize,
    all: bool,
) -> Result<()> {
    let mut page = new_page::<E>(ctx);
    if let Some(term) = search.as_deref() {
        page.state.view.set_search(term);
    }
    load(&mut page).await?;

    if all {
        page.state.view.page_size = usize::MAX;
    }
    let page_count = page.state.visible().page_count;
    page.state.view.set_page(page_number, page_count);
    if page_number > page_count.max(1) {
        tracing::warn!(requested = page_number, page_count, "page out of range, showing the last one");
    }

    print!("{}", render::page(&page.state.visible()));
    Ok(())
}

async fn show<E: Entity>(ctx: &Context, id: u64) -> Result<()> {
    let pb = spinner(&format!("Cargando {}...", E::LABELS.plural));
    let found = ctx
        .client
        .find::<E>(id, &ListQuery { recent: ctx.recent, ..Default::default() })
        .await;
    pb.finish_and_clear();

    let item = found?.ok_or_else(|| {
        if E::SERVER_SEARCH {
            AdminError::NotFound(format!(
                "{} {} (entre las {} más recientes)",
                E::LABELS.singular,
                id,
                ctx.recent
            ))
        } else {
            AdminError::NotFound(format!("{} {}", E::LABELS.singular, id))
        }
    })?;
    print!("{}", render::record(&item, &ctx.base_url));
    Ok(())
}

/// Apply `name=value` pairs and an optional image to a form
fn fill_form<F: FormState>(form: &mut F, fields: &[(String, String)], image: Option<&Path>) -> Result<()> {
    for (name, value) in fields {
        form.set_field(name, value)?;
    }
    if let Some(path) = image {
        let field = F::fields()
            .iter()
            .find(|f| f.kind == FieldKind::Image)
            .ok_or_else(|| AdminError::InvalidArgument("este recurso no admite imágenes".into()))?;
        form.set_upload(field.name, read_image(path)?)?;
    }
    Ok(())
}

async fn create<E: Entity>(ctx: &Context, fields: &[(String, String)], image: Option<&Path>) -> Result<()> {
    let mut page = new_page::<E>(ctx);
    fill_form(&mut page.state.form, fields, image)?;

    let pb = spinner(&format!("Guardando {}...", E::LABELS.singular));
    let committed = page.submit_create().await;
    pb.finish_and_clear();

    report(page.state.notice.current())?;
    if committed {
        print!("{}", render::page(&page.state.visible()));
    }
    Ok(())
}

async fn update<E: Entity>(
    ctx: &Context,
    id: u64,
    fields: &[(String, String)],
    image: Option<&Path>,
) -> Result<()> {
    if !E::EDITABLE {
        return Err(sonrisas_common::Error::Unsupported(format!(
            "{} no se pueden editar",
            E::LABELS.plural
        ))
        .into());
    }
    let mut page = new_page::<E>(ctx);
    load(&mut page).await?;
    if !page.state.start_edit(id) {
        return Err(AdminError::NotFound(format!("{} {}", E::LABELS.singular, id)));
    }
    if image.is_some() {
        tracing::warn!("la imagen solo se envía al crear; se conserva la imagen actual");
    }
    fill_form(&mut page.state.edit_form, fields, None)?;

    let pb = spinner(&format!("Actualizando {}...", E::LABELS.singular));
    page.submit_update().await;
    pb.finish_and_clear();

    report(page.state.notice.current())?;
    if let Some(item) = page.state.find(id) {
        print!("{}", render::record(item, &ctx.base_url));
    }
    Ok(())
}

async fn delete<E: Entity>(ctx: &Context, id: u64, yes: bool) -> Result<()> {
    let mut page = new_page::<E>(ctx);
    // server-searched lists only hold a window of records; the backend checks the id
    let name = if E::SERVER_SEARCH {
        format!("{} #{}", E::LABELS.singular, id)
    } else {
        load(&mut page).await?;
        page.state
            .find(id)
            .map(Entity::display_name)
            .ok_or_else(|| AdminError::NotFound(format!("{} {}", E::LABELS.singular, id)))?
    };

    page.request_delete(id);
    let confirmed = yes
        || Confirm::new()
            .with_prompt(format!("{} ({})", E::LABELS.delete_prompt(), name))
            .default(false)
            .interact()
            .map_err(|e| AdminError::Prompt(e.to_string()))?;
    if !confirmed {
        page.cancel_delete();
        println!("Eliminación cancelada.");
        return Ok(());
    }

    let pb = spinner(&format!("Eliminando {}...", E::LABELS.singular));
    page.confirm_delete().await;
    pb.finish_and_clear();

    report(page.state.notice.current())
}
