use anyhow::Context;
use dotenv::dotenv;
use plan2html::{
    CalendarRenderer, RequestClient, ScrapeConfig, SessionExtractor, TimeAxis, group_by_week,
};
use std::fs;

extern crate env_logger;
extern crate log;

use log::LevelFilter;

use log::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .init();

    let config = ScrapeConfig::from_env();

    let client = RequestClient::new()?;
    let html = client.fetch_page(&config.plan_url).await?;
    info!("Downloaded successfully from web.");

    let sessions = SessionExtractor::new().extract(&html);
    info!("Extracted {} class sessions.", sessions.len());

    let weeks = group_by_week(&sessions);
    let axis = TimeAxis::from_sessions(&sessions);

    let renderer = CalendarRenderer::new()?;
    let document = renderer.render_document(&weeks, &axis);

    fs::write(&config.output_path, document)
        .with_context(|| format!("failed to write {}", config.output_path))?;
    info!("{} generated.", config.output_path);

    Ok(())
}
