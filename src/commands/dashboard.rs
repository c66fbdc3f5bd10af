use super::{spinner, Context};
use crate::error::Result;
use crate::render;
use chrono::Local;
use sonrisas_common::dashboard::{load_dashboard, load_overview};

pub async fn run_dashboard(ctx: &Context) -> Result<()> {
    let pb = spinner("Cargando panel...");
    let dashboard = load_dashboard(&ctx.client, Local::now().naive_local()).await;
    pb.finish_and_clear();

    print!("{}", render::dashboard(&dashboard?, &ctx.base_url));
    Ok(())
}

pub async fn run_overview(ctx: &Context) -> Result<()> {
    let pb = spinner("Cargando resumen...");
    let overview = load_overview(&ctx.client).await;
    pb.finish_and_clear();

    print!("{}", render::overview(&overview?));
    Ok(())
}
