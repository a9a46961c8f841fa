use anyhow::Context;
use cavity_core::CavityParams;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = CavityParams::default();
    log::info!(
        "starting {} (L = {} m, R = {})",
        cavity_render::TITLE,
        params.length,
        params.reflectivity
    );

    cavity_render::run().context("could not open a display window")?;
    Ok(())
}
