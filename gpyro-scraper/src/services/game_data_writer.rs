//! Persist the cached result set and the Rolimons catalog

use crate::error::ScraperResult;
use crate::models::RolimonsCatalog;
use crate::services::result_cache::{CachedResults, ResultCache};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

/// Write the cached results to `path` as a JSON array
///
/// Returns `false` without touching the file system when the cache is empty.
pub async fn save_game_data(cache: &ResultCache, path: &Path) -> ScraperResult<bool> {
    let results = match cache.retrieve().await {
        CachedResults::Empty => {
            warn!("Nothing to be saved!");
            return Ok(false);
        }
        CachedResults::Populated(results) => results,
    };

    info!(records = results.len(), path = %path.display(), "Saving all Roblox game data");

    write_json(path, results.as_ref())?;

    info!("Saved all Roblox game data successfully");
    Ok(true)
}

/// Write the full Rolimons catalog to `path`
///
/// Same shape as the upstream game list:
/// `{"game_count": n, "games": {"<place_id>": [name, active_players, thumbnail_url]}}`
pub fn save_catalog(catalog: &RolimonsCatalog, path: &Path) -> ScraperResult<()> {
    info!(entries = catalog.games().len(), path = %path.display(), "Saving all Rolimons game data");

    let games: Map<String, Value> = catalog
        .games()
        .iter()
        .map(|(place_id, game)| {
            (
                place_id.to_string(),
                json!([game.name, game.active_players, game.thumbnail_download_url]),
            )
        })
        .collect();

    write_json(
        path,
        &json!({ "game_count": catalog.game_count(), "games": games }),
    )?;

    info!("Saved all Rolimons game data successfully");
    Ok(())
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> ScraperResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}
