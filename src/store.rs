//! Client-side recommendation session state
//!
//! [`RecommendationStore`] owns one [`RecommendationState`] and is the only
//! writer to it. Mutations are whole-value updates published through a
//! `tokio::sync::watch` channel; network round trips happen between updates,
//! never while the state is borrowed.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use serde::Serialize;
use tokio::sync::watch;

use crate::{
    error::{AppResult, LoadError},
    models::{
        ExclusionSet, FilterSelection, ItemId, RecommendRequest, RecommendationItem,
        ReplaceRequest, Track, TrackKind,
    },
    services::{RecommendationService, ResultMapper},
};

/// Everything the UI observes about the current recommendation session
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct RecommendationState {
    pub filters: FilterSelection,
    pub track_a: Track,
    pub track_b: Track,
    pub excluded_ids: ExclusionSet,
    pub detail_item_id: Option<ItemId>,
    pub is_loading: bool,
    pub error: Option<LoadError>,
    /// Bumped whenever both tracks are replaced wholesale
    #[serde(skip)]
    track_generation: u64,
}

impl RecommendationState {
    pub fn track(&self, kind: TrackKind) -> &Track {
        match kind {
            TrackKind::A => &self.track_a,
            TrackKind::B => &self.track_b,
        }
    }

    fn track_mut(&mut self, kind: TrackKind) -> &mut Track {
        match kind {
            TrackKind::A => &mut self.track_a,
            TrackKind::B => &mut self.track_b,
        }
    }

    fn replace_tracks(&mut self, track_a: Track, track_b: Track) {
        self.track_a = track_a;
        self.track_b = track_b;
        self.track_generation += 1;
    }
}

/// Result of a load call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded,
    Failed { error: LoadError },
    /// A newer load or a reset was issued before this response arrived
    Superseded,
}

/// Result of a single-item replacement
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReplaceOutcome {
    Replaced {
        index: usize,
        item: RecommendationItem,
    },
    /// The backend had no candidate; the slot stays empty
    NoCandidate { message: String },
    /// The item was not in the track; nothing changed
    NotFound,
    /// Transport or server failure; the slot stays empty
    Failed { reason: String },
    /// The tracks were reloaded or reset while the call was in flight
    Stale,
}

struct ReplacePlan {
    index: usize,
    request: ReplaceRequest,
    generation: u64,
}

/// Recommendation session state container
pub struct RecommendationStore {
    service: Arc<dyn RecommendationService>,
    mapper: ResultMapper,
    state: watch::Sender<RecommendationState>,
    /// Token of the most recently issued load
    load_seq: AtomicU64,
}

impl RecommendationStore {
    /// Creates a store with default filters and empty tracks
    pub fn new(service: Arc<dyn RecommendationService>, mapper: ResultMapper) -> Self {
        let (state, _) = watch::channel(RecommendationState::default());

        Self {
            service,
            mapper,
            state,
            load_seq: AtomicU64::new(0),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> RecommendationState {
        self.state.borrow().clone()
    }

    /// Receiver notified after every state change
    pub fn subscribe(&self) -> watch::Receiver<RecommendationState> {
        self.state.subscribe()
    }

    pub fn set_time(&self, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|state| {
            state.filters.time = value;
            state.excluded_ids.clear();
        });
    }

    pub fn toggle_genre(&self, name: &str) {
        self.state.send_modify(|state| {
            state.filters.toggle_genre(name);
            state.excluded_ids.clear();
        });
    }

    pub fn toggle_exclude_adult(&self) {
        self.state.send_modify(|state| {
            state.filters.exclude_adult = !state.filters.exclude_adult;
            state.excluded_ids.clear();
        });
    }

    /// Fetches both tracks for the current filters.
    ///
    /// Callers must not start another load while `is_loading` is set; if they
    /// do, only the most recently issued load is applied.
    pub async fn load_recommendations(&self) -> LoadOutcome {
        let (token, request) = self.modify(|state| self.begin_load(state));
        self.run_load(token, request).await
    }

    /// Like [`Self::load_recommendations`], but returns `None` without
    /// touching the state if a load is already in flight.
    ///
    /// The check and the switch to loading happen in one state update, so of
    /// two concurrent callers only one starts a load. A reset clears
    /// `is_loading` and lets the next call through.
    pub async fn try_load_recommendations(&self) -> Option<LoadOutcome> {
        let mut started = None;
        self.state.send_if_modified(|state| {
            if state.is_loading {
                return false;
            }
            started = Some(self.begin_load(state));
            true
        });

        let (token, request) = started?;
        Some(self.run_load(token, request).await)
    }

    /// Marks the state as loading and issues a new load token
    fn begin_load(&self, state: &mut RecommendationState) -> (u64, RecommendRequest) {
        let token = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        state.is_loading = true;
        state.error = None;
        let request = RecommendRequest {
            runtime_limit: state.filters.runtime_budget_minutes(),
            genres: state.filters.genres.clone(),
            exclude_adult: state.filters.exclude_adult,
        };
        (token, request)
    }

    async fn run_load(&self, token: u64, request: RecommendRequest) -> LoadOutcome {
        tracing::info!(
            token,
            runtime_limit = request.runtime_limit,
            genres = ?request.genres,
            exclude_adult = request.exclude_adult,
            "Loading recommendations"
        );

        let result = self
            .service
            .recommend(&request)
            .await
            .map(|response| {
                (
                    self.mapper.map_track(response.track_a),
                    self.mapper.map_track(response.track_b),
                )
            });

        let mut outcome = LoadOutcome::Superseded;
        self.state.send_if_modified(|state| {
            if self.load_seq.load(Ordering::SeqCst) != token {
                return false;
            }

            state.is_loading = false;
            match result {
                Ok((track_a, track_b)) => {
                    state.excluded_ids = track_a.ids().chain(track_b.ids()).collect();
                    state.error = None;
                    tracing::info!(
                        token,
                        track_a = track_a.len(),
                        track_a_runtime = track_a.total_runtime_minutes(),
                        track_b = track_b.len(),
                        track_b_runtime = track_b.total_runtime_minutes(),
                        "Recommendations loaded"
                    );
                    state.replace_tracks(track_a, track_b);
                    outcome = LoadOutcome::Loaded;
                }
                Err(e) => {
                    let error = LoadError::from(&e);
                    tracing::warn!(token, error = %e, kind = ?error.kind, "Recommendation load failed");
                    state.replace_tracks(Track::default(), Track::default());
                    state.error = Some(error.clone());
                    outcome = LoadOutcome::Failed { error };
                }
            }
            true
        });

        if outcome == LoadOutcome::Superseded {
            tracing::warn!(token, "Discarding superseded recommendation response");
        }

        outcome
    }

    /// Swaps one item for a fresh recommendation at the same position.
    ///
    /// The replacement is asked to fill the gap between the user's time budget
    /// and the runtime of the items left in the track.
    pub async fn replace_item(&self, track: TrackKind, item_id: ItemId) -> ReplaceOutcome {
        let mut plan = None;
        self.state.send_if_modified(|state| {
            plan = Self::take_for_replacement(state, track, item_id);
            plan.is_some()
        });

        let Some(plan) = plan else {
            tracing::warn!(%track, item_id, "Replace requested for item not in track");
            return ReplaceOutcome::NotFound;
        };

        tracing::info!(
            %track,
            item_id,
            index = plan.index,
            target_runtime = plan.request.target_runtime,
            "Requesting replacement"
        );

        let response = match self.service.recommend_single(&plan.request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(%track, item_id, error = %e, "Replacement request failed");
                return ReplaceOutcome::Failed {
                    reason: e.to_string(),
                };
            }
        };

        let movie = match response.movie {
            Some(movie) if response.success => movie,
            _ => {
                tracing::info!(%track, item_id, message = %response.message, "No replacement available");
                return ReplaceOutcome::NoCandidate {
                    message: response.message,
                };
            }
        };

        let item = self.mapper.map_item(movie);
        let mut outcome = ReplaceOutcome::Stale;
        self.state.send_if_modified(|state| {
            if state.track_generation != plan.generation {
                return false;
            }

            state.excluded_ids.insert(item.id);
            let index = state.track_mut(track).insert_at(plan.index, item.clone());
            outcome = ReplaceOutcome::Replaced {
                index,
                item: item.clone(),
            };
            true
        });

        match &outcome {
            ReplaceOutcome::Replaced { index, item } => tracing::info!(
                %track,
                removed = item_id,
                added = item.id,
                index,
                "Item replaced"
            ),
            _ => tracing::warn!(%track, item_id, "Discarding replacement for reloaded tracks"),
        }

        outcome
    }

    /// Removes the item and builds the request for its replacement
    fn take_for_replacement(
        state: &mut RecommendationState,
        track: TrackKind,
        item_id: ItemId,
    ) -> Option<ReplacePlan> {
        let index = state.track(track).position(item_id)?;
        let removed = state.track_mut(track).remove_at(index);

        let remaining = state.track(track).total_runtime_minutes();
        let target_runtime = state
            .filters
            .runtime_budget_minutes()
            .saturating_sub(remaining);

        state.excluded_ids.insert(removed.id);

        Some(ReplacePlan {
            index,
            request: ReplaceRequest {
                target_runtime,
                excluded_ids: state.excluded_ids.to_vec(),
                track,
                genres: state.filters.genres.clone(),
                exclude_adult: state.filters.exclude_adult,
            },
            generation: state.track_generation,
        })
    }

    /// Selects the item under inspection. Any id is accepted.
    pub fn set_detail_item(&self, item_id: Option<ItemId>) {
        self.state.send_modify(|state| state.detail_item_id = item_id);
    }

    /// Records the movie as watched and flags matching items in both tracks.
    ///
    /// Returns how many track entries were flagged.
    pub async fn mark_watched(&self, item_id: ItemId) -> AppResult<usize> {
        self.service.mark_watched(item_id).await?;

        let mut flagged = 0;
        self.state.send_if_modified(|state| {
            flagged = state
                .track_a
                .replace_matching(item_id, RecommendationItem::into_watched)
                + state
                    .track_b
                    .replace_matching(item_id, RecommendationItem::into_watched);
            flagged > 0
        });

        Ok(flagged)
    }

    /// Restores defaults and drops any in-flight load or replacement result
    pub fn reset(&self) {
        self.state.send_modify(|state| {
            self.load_seq.fetch_add(1, Ordering::SeqCst);
            *state = RecommendationState {
                track_generation: state.track_generation + 1,
                ..RecommendationState::default()
            };
        });
        tracing::info!("Recommendation session reset");
    }

    /// Hook for the authentication layer when the user's session ends
    pub fn on_session_end(&self) {
        tracing::info!("Session ended, clearing recommendation state");
        self.reset();
    }

    fn modify<R>(&self, f: impl FnOnce(&mut RecommendationState) -> R) -> R
    where
        R: Default,
    {
        let mut output = R::default();
        self.state.send_modify(|state| output = f(state));
        output
    }
}
