//! Field extraction from decoded detail records.
//!
//! Nothing in here fails: a field that cannot be read degrades to `None` (or
//! `"N/A"` for the name) so one sloppy record never sinks a whole search.

use crate::domain::catalog::{GameResult, GameType};
use crate::infra::bgg::schema::{NameEntry, RankEntry, ThingItem};

pub const MISSING_NAME: &str = "N/A";

/// Ranking category holding the overall popularity rank.
const OVERALL_RANK: &str = "boardgame";

/// Builds a `GameResult` from one detail record.
///
/// Returns `None` only for records that cannot be identified: no id, or an
/// item kind outside board games and expansions.
pub fn normalize_item(item: &ThingItem) -> Option<GameResult> {
    let id = non_empty(item.id.as_deref())?;

    let raw_type = item.kind.as_deref().unwrap_or_default();
    let Some(game_type) = GameType::from_provider(raw_type) else {
        log::warn!("Skipping catalog item {} with unexpected type '{}'", id, raw_type);
        return None;
    };

    Some(GameResult {
        id: id.to_string(),
        name: primary_name(&item.names).unwrap_or(MISSING_NAME).to_string(),
        game_type,
        yearpublished: item
            .yearpublished
            .as_ref()
            .and_then(|y| non_empty(y.value.as_deref()))
            .map(str::to_string),
        image: non_empty(item.image.as_deref()).map(str::to_string),
        rank: overall_rank(item.rank_entries()),
    })
}

/// Value of the name entry marked `primary`, if any.
pub fn primary_name(names: &[NameEntry]) -> Option<&str> {
    names
        .iter()
        .find(|n| n.role.as_deref() == Some("primary"))
        .and_then(|n| non_empty(n.value.as_deref()))
}

/// Position in the overall "boardgame" ranking.
///
/// Category ranks (strategygames, familygames, ...) are ignored. A missing
/// entry, `"Not Ranked"`, or anything that is not a positive integer yields `None`.
pub fn overall_rank(ranks: &[RankEntry]) -> Option<u32> {
    let entry = ranks
        .iter()
        .find(|r| r.name.as_deref() == Some(OVERALL_RANK))?;
    let raw = non_empty(entry.value.as_deref())?;
    match raw.parse::<u32>() {
        Ok(rank) if rank > 0 => Some(rank),
        _ => {
            log::debug!("Unranked or malformed rank value '{}'", raw);
            None
        }
    }
}

/// Stable sort by ascending rank with unranked records last.
///
/// Records sharing a rank, and all unranked records, keep their relative order.
pub fn sort_by_rank(results: &mut [GameResult]) {
    results.sort_by_key(|r| (r.rank.is_none(), r.rank));
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
