use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display};

/// Identifier of a recommended movie (the catalog's TMDB id)
pub type ItemId = i64;

/// Which of the two parallel result lists an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// Personalized: preferred genres and subscribed platforms
    A,
    /// Diversity: genre-expanded picks
    B,
}

impl Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackKind::A => write!(f, "a"),
            TrackKind::B => write!(f, "b"),
        }
    }
}

/// A movie as presented to the user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub id: ItemId,
    pub tmdb_id: i64,
    pub title: String,
    pub genres: Vec<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub poster_url: String,
    pub description: String,
    pub runtime_minutes: u32,
    pub watched: bool,
}

impl RecommendationItem {
    /// Copy of this item flagged as watched
    pub fn into_watched(self) -> Self {
        Self {
            watched: true,
            ..self
        }
    }
}

/// Ordered list of recommendations with its cached total runtime.
///
/// The total is recomputed from the items after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Track {
    items: Vec<RecommendationItem>,
    total_runtime_minutes: u32,
    label: String,
}

impl Track {
    pub fn new(label: impl Into<String>, items: Vec<RecommendationItem>) -> Self {
        let mut track = Self {
            items,
            total_runtime_minutes: 0,
            label: label.into(),
        };
        track.recompute_runtime();
        track
    }

    pub fn items(&self) -> &[RecommendationItem] {
        &self.items
    }

    pub fn total_runtime_minutes(&self) -> u32 {
        self.total_runtime_minutes
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.iter().map(|item| item.id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Removes the item at `index`, keeping the others in order
    pub fn remove_at(&mut self, index: usize) -> RecommendationItem {
        let removed = self.items.remove(index);
        self.recompute_runtime();
        removed
    }

    /// Inserts at `index`, clamped to the current length
    pub fn insert_at(&mut self, index: usize, item: RecommendationItem) -> usize {
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        self.recompute_runtime();
        index
    }

    /// Replaces every item with the given id by `f(item)`. Returns how many matched.
    pub fn replace_matching<F>(&mut self, id: ItemId, f: F) -> usize
    where
        F: Fn(RecommendationItem) -> RecommendationItem,
    {
        let mut replaced = 0;
        self.items = std::mem::take(&mut self.items)
            .into_iter()
            .map(|item| {
                if item.id == id {
                    replaced += 1;
                    f(item)
                } else {
                    item
                }
            })
            .collect();
        self.recompute_runtime();
        replaced
    }

    fn recompute_runtime(&mut self) {
        self.total_runtime_minutes = self
            .items
            .iter()
            .fold(0u32, |total, item| total.saturating_add(item.runtime_minutes));
    }
}

/// Ids already shown during the current filter session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExclusionSet(BTreeSet<ItemId>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ItemId) -> bool {
        self.0.insert(id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Ids in ascending order, as sent to the backend
    pub fn to_vec(&self) -> Vec<ItemId> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<ItemId> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
