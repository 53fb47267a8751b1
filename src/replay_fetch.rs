use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::http_client::{API_BASE_URL, ApiClient};

/// Maximum page size the listing endpoint supports.
const LIST_PAGE_SIZE: &str = "200";

#[derive(Debug, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub list: Vec<ReplayStub>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReplayStub {
    pub id: String,
}

/// Subset of the replay detail payload this tool consumes. Everything else
/// in the (much larger) response is ignored; the raw body is archived
/// verbatim before parsing, so nothing is lost.
#[derive(Debug, Clone, Deserialize)]
pub struct Replay {
    pub id: String,
    pub created: DateTime<Utc>,
    pub blue: TeamSide,
    pub orange: TeamSide,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamSide {
    pub players: Vec<PlayerEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerEntry {
    pub name: String,
    pub stats: PlayerStats,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerStats {
    pub core: CoreStats,
    pub boost: BoostStats,
    pub movement: MovementStats,
    pub demo: DemoStats,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoreStats {
    pub shots: u32,
    pub goals: u32,
    pub saves: u32,
    pub assists: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoostStats {
    pub bpm: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovementStats {
    pub avg_speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DemoStats {
    pub inflicted: u32,
}

/// Return every replay id in the group, in listing order across all pages.
pub fn list_group_replays(client: &ApiClient, group_id: &str) -> Result<Vec<String>> {
    collect_replay_ids(|next| {
        let body = match next {
            // Follow the cursor verbatim; it carries its own query string.
            Some(url) => client.get(url, &[])?,
            None => client.get(
                &format!("{API_BASE_URL}/replays"),
                &[("group", group_id), ("count", LIST_PAGE_SIZE)],
            )?,
        };
        parse_listing_json(&body)
    })
}

/// Walk pages through `fetch_page` (`None` = first page, `Some(url)` = the
/// cursor from the previous page) until a page has no cursor, accumulating
/// stub ids in response order.
pub fn collect_replay_ids(
    mut fetch_page: impl FnMut(Option<&str>) -> Result<ListingPage>,
) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    let mut next: Option<String> = None;

    loop {
        let page = fetch_page(next.as_deref())?;
        ids.extend(page.list.into_iter().map(|stub| stub.id));
        match page.next {
            Some(url) => next = Some(url),
            None => break,
        }
    }

    Ok(ids)
}

/// Fetch the full detail body for one replay, verbatim.
pub fn fetch_replay(client: &ApiClient, replay_id: &str) -> Result<String> {
    client.get(&format!("{API_BASE_URL}/replays/{replay_id}"), &[])
}

pub fn parse_listing_json(raw: &str) -> Result<ListingPage> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(ListingPage {
            list: Vec::new(),
            next: None,
        });
    }
    serde_json::from_str(trimmed).context("invalid listing json")
}

pub fn parse_replay_json(raw: &str) -> Result<Replay> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow!("empty replay response"));
    }
    serde_json::from_str(trimmed).context("invalid replay json")
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use anyhow::anyhow;

    use super::{ListingPage, ReplayStub, collect_replay_ids};

    fn page(ids: &[&str], next: Option<&str>) -> ListingPage {
        ListingPage {
            list: ids
                .iter()
                .map(|id| ReplayStub {
                    id: (*id).to_string(),
                })
                .collect(),
            next: next.map(str::to_string),
        }
    }

    #[test]
    fn single_page_collects_in_order() {
        let ids = collect_replay_ids(|next| {
            assert!(next.is_none());
            Ok(page(&["a", "b", "c"], None))
        })
        .expect("walk should succeed");
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn follows_cursor_across_pages_and_stops_at_last() {
        let calls = Cell::new(0u32);
        let ids = collect_replay_ids(|next| {
            calls.set(calls.get() + 1);
            match next {
                None => Ok(page(&["a", "b"], Some("page-2"))),
                Some("page-2") => Ok(page(&["c"], None)),
                Some(other) => panic!("unexpected cursor {other:?}"),
            }
        })
        .expect("walk should succeed");
        assert_eq!(ids, ["a", "b", "c"]);
        // Exactly one fetch per page, never an extra probe past the end.
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn empty_group_yields_no_ids() {
        let ids = collect_replay_ids(|_| Ok(page(&[], None))).expect("walk should succeed");
        assert!(ids.is_empty());
    }

    #[test]
    fn page_error_aborts_with_no_partial_result() {
        let result = collect_replay_ids(|next| match next {
            None => Ok(page(&["a"], Some("page-2"))),
            Some(_) => Err(anyhow!("boom")),
        });
        assert!(result.is_err());
    }
}
