//! Rolimons game list types

use super::PlaceId;
use crate::config::validate_amount;
use crate::error::ScraperResult;
use rand::seq::SliceRandom;
use serde::Serialize;

/// One Rolimons game list entry: `[name, active_players, thumbnail_url]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RolimonsGameMetadata {
    pub name: String,
    pub active_players: u64,
    pub thumbnail_download_url: String,
}

/// How entries are picked from the game list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
    /// First `amount` entries in list order
    Sequential,
    /// Uniform random sample of `amount` entries
    Random,
}

/// Full Rolimons game list, in upstream order
#[derive(Debug, Clone, Default)]
pub struct RolimonsCatalog {
    pub(crate) game_count: u64,
    pub(crate) games: Vec<(PlaceId, RolimonsGameMetadata)>,
}

impl RolimonsCatalog {
    pub fn new(game_count: u64, games: Vec<(PlaceId, RolimonsGameMetadata)>) -> Self {
        Self { game_count, games }
    }

    /// Game count reported upstream
    pub fn game_count(&self) -> u64 {
        self.game_count
    }

    /// All place ids in list order
    pub fn place_ids(&self) -> Vec<PlaceId> {
        self.games.iter().map(|(id, _)| *id).collect()
    }

    pub fn games(&self) -> &[(PlaceId, RolimonsGameMetadata)] {
        &self.games
    }

    /// Pick `amount` entries, `amount` must be in `1..=games().len()`
    pub fn select(
        &self,
        amount: usize,
        access_type: AccessType,
    ) -> ScraperResult<Vec<(PlaceId, RolimonsGameMetadata)>> {
        let amount = validate_amount(Some(amount), self.games.len())?;

        let selected = match access_type {
            AccessType::Sequential => self.games[..amount].to_vec(),
            AccessType::Random => self
                .games
                .choose_multiple(&mut rand::thread_rng(), amount)
                .cloned()
                .collect(),
        };

        Ok(selected)
    }

    /// Place ids to feed the pipeline
    ///
    /// `amount` of `None` takes every entry; an empty catalog yields no ids.
    pub fn select_place_ids(
        &self,
        amount: Option<usize>,
        access_type: AccessType,
    ) -> ScraperResult<Vec<PlaceId>> {
        let amount = validate_amount(amount, self.games.len())?;
        if amount == 0 {
            return Ok(Vec::new());
        }

        Ok(self
            .select(amount, access_type)?
            .into_iter()
            .map(|(id, _)| id)
            .collect())
    }
}
