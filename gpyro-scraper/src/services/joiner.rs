//! Game/vote merge
//!
//! Keyed join on the `id` field when every entry on both sides carries one,
//! positional join otherwise. Vote fields overwrite game fields on collision.
//! Every game entry yields exactly one record; vote data is optional.

use crate::models::{Fields, GameRecord, JoinedGameRecord, ResultSet, VoteRecord};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{info, warn};

const ID_FIELD: &str = "id";

/// How game and vote entries were matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStrategy {
    /// Matched on the `id` field
    Keyed,
    /// Matched by position in the two batches
    Positional,
}

/// Merge two batches into one record per game entry
pub fn join(games: Vec<GameRecord>, votes: Vec<VoteRecord>) -> (ResultSet, JoinStrategy) {
    let keyed = games.iter().chain(votes.iter()).all(|entry| entry_key(entry).is_some());

    let (records, strategy) = if keyed {
        (join_keyed(games, votes), JoinStrategy::Keyed)
    } else {
        (join_positional(games, votes), JoinStrategy::Positional)
    };

    info!(records = records.len(), strategy = ?strategy, "Joined game and vote data");
    (records, strategy)
}

fn entry_key(entry: &Fields) -> Option<String> {
    match entry.get(ID_FIELD)? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn join_keyed(games: Vec<GameRecord>, votes: Vec<VoteRecord>) -> ResultSet {
    let mut votes_by_id: HashMap<String, VoteRecord> = votes
        .into_iter()
        .filter_map(|vote| entry_key(&vote).map(|key| (key, vote)))
        .collect();

    games
        .into_iter()
        .map(|game| {
            let vote = entry_key(&game).and_then(|key| votes_by_id.remove(&key));
            if vote.is_none() {
                warn!(id = ?game.get(ID_FIELD), "No vote data for game");
            }
            merge(game, vote)
        })
        .collect()
}

fn join_positional(games: Vec<GameRecord>, votes: Vec<VoteRecord>) -> ResultSet {
    let mut votes = votes.into_iter();
    games
        .into_iter()
        .map(|game| merge(game, votes.next()))
        .collect()
}

fn merge(mut game: GameRecord, vote: Option<VoteRecord>) -> JoinedGameRecord {
    if let Some(vote) = vote {
        for (field, value) in vote {
            game.insert(field, value);
        }
    }
    JoinedGameRecord { fields: game }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> Fields {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_vote_side_wins_on_collision() {
        let (records, strategy) = join(
            vec![fields(json!({"a": 1, "b": 2}))],
            vec![fields(json!({"b": 9, "c": 3}))],
        );

        assert_eq!(strategy, JoinStrategy::Positional);
        assert_eq!(records.len(), 1);
        assert_eq!(
            Value::Object(records[0].fields.clone()),
            json!({"a": 1, "b": 9, "c": 3})
        );
    }

    #[test]
    fn test_keyed_join_ignores_order() {
        let games = vec![
            fields(json!({"id": 1, "name": "Adopt Me"})),
            fields(json!({"id": 2, "name": "Brookhaven"})),
        ];
        let votes = vec![
            fields(json!({"id": 2, "upVotes": 20})),
            fields(json!({"id": 1, "upVotes": 10})),
        ];

        let (records, strategy) = join(games, votes);

        assert_eq!(strategy, JoinStrategy::Keyed);
        assert_eq!(records[0].get("upVotes"), Some(&json!(10)));
        assert_eq!(records[1].get("upVotes"), Some(&json!(20)));
    }

    #[test]
    fn test_keyed_join_keeps_games_without_votes() {
        let games = vec![
            fields(json!({"id": 1, "name": "A"})),
            fields(json!({"id": 2, "name": "B"})),
        ];
        let votes = vec![
            fields(json!({"id": 2, "upVotes": 5})),
            fields(json!({"id": 3, "upVotes": 7})),
        ];

        let (records, _) = join(games, votes);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("upVotes"), None);
        assert_eq!(records[1].get("upVotes"), Some(&json!(5)));
        assert!(records.iter().all(|r| r.get("id") != Some(&json!(3))));
    }

    #[test]
    fn test_positional_join_with_short_vote_batch() {
        let games = vec![fields(json!({"name": "A"})), fields(json!({"name": "B"}))];
        let votes = vec![fields(json!({"upVotes": 1}))];

        let (records, strategy) = join(games, votes);

        assert_eq!(strategy, JoinStrategy::Positional);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("upVotes"), Some(&json!(1)));
        assert_eq!(records[1].get("upVotes"), None);
    }

    #[test]
    fn test_empty_batches() {
        let (records, _) = join(Vec::new(), Vec::new());
        assert!(records.is_empty());
    }
}
