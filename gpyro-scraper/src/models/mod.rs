//! Data models for the scraper

pub mod game;
pub mod rolimons;

pub use game::{
    Fields, GameRecord, JoinedGameRecord, PlaceId, ResolutionOutcome, ResultSet, UniverseId,
    VoteRecord,
};
pub use rolimons::{AccessType, RolimonsCatalog, RolimonsGameMetadata};
