//! Decoded shape of the BoardGameGeek XML API v2 responses.
//!
//! Only the attributes and elements the search pipeline reads are modelled;
//! everything else in the documents is skipped by the deserializer.
//!
//! Repeated elements (`<item>`, `<name>`, `<rank>`) are always decoded into a
//! `Vec`, whether the provider sent zero, one or many of them. A response with
//! a single match therefore has exactly the same shape as one with several,
//! and no caller ever has to tell a lone element apart from a list.

use crate::domain::catalog::CatalogSearchHit;
use quick_xml::DeError;
use serde::Deserialize;

/// Root of `/search`: `<items total="N"> <item id=".." type=".."/>* </items>`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "@total", default)]
    pub total: Option<String>,
    #[serde(rename = "item", default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchItem {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(rename = "@type", default)]
    pub kind: Option<String>,
}

impl SearchResponse {
    /// True when the provider reported no matches, either through `total="0"`
    /// or by sending no `<item>` elements at all.
    pub fn is_empty(&self) -> bool {
        self.total.as_deref().map(str::trim) == Some("0") || self.items.is_empty()
    }

    /// Search hits in provider order. Items without an id cannot be looked up
    /// and are dropped here.
    pub fn hits(&self) -> Vec<CatalogSearchHit> {
        self.items
            .iter()
            .filter_map(|item| {
                let id = item.id.as_deref().map(str::trim).filter(|id| !id.is_empty())?;
                Some(CatalogSearchHit {
                    id: id.to_string(),
                    raw_type: item.kind.clone().unwrap_or_default(),
                })
            })
            .collect()
    }
}

/// Root of `/thing`: `<items> <item ...>...</item>* </items>`.
#[derive(Debug, Default, Deserialize)]
pub struct ThingResponse {
    #[serde(rename = "item", default)]
    pub items: Vec<ThingItem>,
}

/// One detail record, as sent by the provider.
#[derive(Debug, Default, Deserialize)]
pub struct ThingItem {
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    #[serde(rename = "@type", default)]
    pub kind: Option<String>,
    #[serde(rename = "name", default)]
    pub names: Vec<NameEntry>,
    #[serde(default)]
    pub yearpublished: Option<ValueAttr>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

/// `<name type="primary|alternate" value="..."/>`
#[derive(Debug, Default, Deserialize)]
pub struct NameEntry {
    #[serde(rename = "@type", default)]
    pub role: Option<String>,
    #[serde(rename = "@value", default)]
    pub value: Option<String>,
}

/// Elements whose payload is a single `value` attribute, e.g. `<yearpublished value="1995"/>`.
#[derive(Debug, Default, Deserialize)]
pub struct ValueAttr {
    #[serde(rename = "@value", default)]
    pub value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub ratings: Option<Ratings>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Ratings {
    #[serde(default)]
    pub ranks: Option<Ranks>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Ranks {
    #[serde(rename = "rank", default)]
    pub entries: Vec<RankEntry>,
}

/// `<rank type="subtype|family" name="boardgame" value="5|Not Ranked" .../>`
#[derive(Debug, Default, Deserialize)]
pub struct RankEntry {
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "@value", default)]
    pub value: Option<String>,
}

impl ThingItem {
    /// Rank entries under `statistics/ratings/ranks`, empty when any level is missing.
    pub fn rank_entries(&self) -> &[RankEntry] {
        self.statistics
            .as_ref()
            .and_then(|s| s.ratings.as_ref())
            .and_then(|r| r.ranks.as_ref())
            .map(|r| r.entries.as_slice())
            .unwrap_or(&[])
    }
}

pub fn decode_search(xml: &str) -> Result<SearchResponse, DeError> {
    quick_xml::de::from_str(xml)
}

pub fn decode_things(xml: &str) -> Result<ThingResponse, DeError> {
    quick_xml::de::from_str(xml)
}
