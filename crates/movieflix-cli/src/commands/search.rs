use super::format_year;
use super::spinner::with_spinner;
use crate::context::AppContext;
use crate::output::{new_table, truncate, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use movieflix_core::{LoadStatus, SearchAdapter};
use movieflix_sources::create_search_provider;

pub async fn run_search(ctx: &AppContext, query: &str, output: &Output) -> Result<()> {
    let provider = create_search_provider(&ctx.config, &ctx.credentials, &ctx.backend)
        .map_err(|e| eyre!("{}", e.user_message()))?;
    let adapter = SearchAdapter::new(provider);

    let message = format!("Searching {} for \"{}\"...", adapter.provider_name(), query.trim());
    let view = with_spinner(&message, output, adapter.submit(query)).await;

    if let LoadStatus::Failed(message) = &view.status {
        return Err(eyre!("{}", message));
    }

    if !output.is_human() {
        output.json(&view);
        return Ok(());
    }

    let Some(query) = view.query.as_deref() else {
        output.warn("Enter a search term");
        return Ok(());
    };

    if view.results.is_empty() {
        output.warn(format!("No results for \"{}\"", query));
        return Ok(());
    }

    output.heading(&format!("Results for \"{}\"", query));
    let mut table = new_table();
    table.set_header(vec!["ID", "Title", "Year", "Image"]);
    for hit in &view.results {
        table.add_row(vec![
            Cell::new(&hit.external_id),
            Cell::new(truncate(&hit.title, 48)),
            Cell::new(format_year(hit.year)),
            Cell::new(hit.image_url.as_deref().unwrap_or("")),
        ]);
    }
    output.table(&table);
    Ok(())
}
