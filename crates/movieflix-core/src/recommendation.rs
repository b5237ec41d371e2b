//! Per-user recommendation fetching with last-request-wins semantics
//!
//! Every `load` takes a request number before it awaits the source. A response
//! is committed only if no later `load` was issued in the meantime, whichever
//! user that later request was for.

use movieflix_models::RecommendationItem;
use movieflix_sources::RecommendationSource;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

pub const FETCH_ERROR_PREFIX: &str = "Failed to fetch recommendation";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl LoadStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Snapshot of what the recommendation screen shows
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RecommendationView {
    /// Id of the most recently requested user
    pub user_id: Option<u64>,
    /// Index echoed by the server for the committed response
    pub user_index: Option<u64>,
    pub status: LoadStatus,
    pub watched_items: Vec<RecommendationItem>,
    pub top_recommendations: Vec<RecommendationItem>,
}

impl RecommendationView {
    pub fn is_empty(&self) -> bool {
        self.watched_items.is_empty() && self.top_recommendations.is_empty()
    }

    fn reset_collections(&mut self) {
        self.user_index = None;
        self.watched_items.clear();
        self.top_recommendations.clear();
    }
}

#[derive(Default)]
struct RecommendationState {
    view: RecommendationView,
    /// Bumped by every `load`; only the holder of the latest number commits
    generation: u64,
}

pub struct RecommendationAdapter<S: ?Sized> {
    source: Arc<S>,
    top_k: Option<u32>,
    state: Arc<Mutex<RecommendationState>>,
}

impl<S: ?Sized> Clone for RecommendationAdapter<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            top_k: self.top_k,
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: RecommendationSource + ?Sized> RecommendationAdapter<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            top_k: None,
            state: Arc::new(Mutex::new(RecommendationState::default())),
        }
    }

    /// Result-size hint sent with every request
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub async fn view(&self) -> RecommendationView {
        self.state.lock().await.view.clone()
    }

    pub async fn current_user(&self) -> Option<u64> {
        self.state.lock().await.view.user_id
    }

    /// Request recommendations for `user_id` and return the view afterwards
    ///
    /// The returned snapshot reflects whatever is current once this request
    /// settles; if a newer request superseded it, this response was dropped.
    #[instrument(skip(self))]
    pub async fn load(&self, user_id: u64) -> RecommendationView {
        let generation = {
            let mut guard = self.state.lock().await;
            guard.generation += 1;
            let state = &mut guard.view;
            if state.user_id != Some(user_id) {
                // Never show the previous user's lists under a new selection
                state.reset_collections();
            }
            state.user_id = Some(user_id);
            state.status = LoadStatus::Loading;
            guard.generation
        };

        let result = self.source.fetch_recommendation(user_id, self.top_k).await;

        let mut guard = self.state.lock().await;
        if guard.generation != generation {
            debug!(
                user_id,
                current = ?guard.view.user_id,
                "Discarding superseded recommendation response"
            );
            return guard.view.clone();
        }
        let state = &mut guard.view;

        match result {
            Ok(recommendation) => {
                debug!(
                    user_id,
                    watched = recommendation.watched_items.len(),
                    recommended = recommendation.top_recommendations.len(),
                    "Committed recommendation"
                );
                state.user_index = Some(recommendation.user_index);
                state.watched_items = recommendation.watched_items;
                state.top_recommendations = recommendation.top_recommendations;
                state.status = LoadStatus::Ready;
            }
            Err(e) => {
                warn!(user_id, error = %e, "Recommendation request failed");
                state.reset_collections();
                state.status = LoadStatus::Failed(format!("{}: {}", FETCH_ERROR_PREFIX, e.user_message()));
            }
        }

        state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::poll;
    use movieflix_models::Recommendation;
    use movieflix_sources::{SourceError, SourceResult, StatusCode};
    use std::collections::{HashMap, VecDeque};
    use tokio::sync::oneshot;

    fn item(index: u64, title: &str) -> RecommendationItem {
        RecommendationItem {
            item_index: index,
            asin: format!("B{:04}", index),
            title: title.to_string(),
            score: Some(0.9),
        }
    }

    fn recommendation_for(user: u64) -> Recommendation {
        Recommendation {
            user_index: user,
            watched_items: vec![item(user * 100, &format!("Watched by {}", user))],
            top_recommendations: vec![
                item(user * 100 + 1, &format!("Pick A for {}", user)),
                item(user * 100 + 2, &format!("Pick B for {}", user)),
            ],
        }
    }

    /// Each request blocks until the test sends its response; gates for the
    /// same user are handed out in request order
    #[derive(Default)]
    struct GatedSource {
        gates: std::sync::Mutex<HashMap<u64, VecDeque<oneshot::Receiver<SourceResult<Recommendation>>>>>,
    }

    impl GatedSource {
        fn gate(&self, user_id: u64) -> oneshot::Sender<SourceResult<Recommendation>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().entry(user_id).or_default().push_back(rx);
            tx
        }
    }

    #[async_trait]
    impl RecommendationSource for GatedSource {
        async fn fetch_recommendation(&self, user_id: u64, _top_k: Option<u32>) -> SourceResult<Recommendation> {
            let rx = self
                .gates
                .lock()
                .unwrap()
                .get_mut(&user_id)
                .and_then(VecDeque::pop_front)
                .expect("no gate for user");
            rx.await.expect("gate dropped")
        }
    }

    /// Replays queued responses and records the requested ids
    #[derive(Default)]
    struct ScriptedSource {
        responses: std::sync::Mutex<VecDeque<SourceResult<Recommendation>>>,
        requests: std::sync::Mutex<Vec<(u64, Option<u32>)>>,
    }

    impl ScriptedSource {
        fn with(responses: Vec<SourceResult<Recommendation>>) -> Self {
            Self {
                responses: std::sync::Mutex::new(responses.into()),
                requests: Default::default(),
            }
        }
    }

    #[async_trait]
    impl RecommendationSource for ScriptedSource {
        async fn fetch_recommendation(&self, user_id: u64, top_k: Option<u32>) -> SourceResult<Recommendation> {
            self.requests.lock().unwrap().push((user_id, top_k));
            self.responses.lock().unwrap().pop_front().expect("unexpected request")
        }
    }

    fn server_error() -> SourceError {
        SourceError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn test_late_response_for_earlier_user_is_discarded() {
        let source = Arc::new(GatedSource::default());
        let gate_1 = source.gate(1);
        let gate_2 = source.gate(2);
        let adapter = RecommendationAdapter::new(Arc::clone(&source));

        let first = adapter.load(1);
        tokio::pin!(first);
        assert!(poll!(&mut first).is_pending());
        assert_eq!(adapter.current_user().await, Some(1));

        let second = adapter.load(2);
        tokio::pin!(second);
        assert!(poll!(&mut second).is_pending());

        // User 2 resolves first, then the stale user 1 response lands
        gate_2.send(Ok(recommendation_for(2))).unwrap();
        let after_second = second.await;
        assert_eq!(after_second.user_index, Some(2));

        gate_1.send(Ok(recommendation_for(1))).unwrap();
        let after_first = first.await;
        assert_eq!(after_first.user_index, Some(2));

        let view = adapter.view().await;
        assert_eq!(view.user_id, Some(2));
        assert_eq!(view.status, LoadStatus::Ready);
        assert_eq!(view.top_recommendations, recommendation_for(2).top_recommendations);
        assert_eq!(view.watched_items, recommendation_for(2).watched_items);
    }

    #[tokio::test]
    async fn test_earlier_user_resolving_first_is_also_discarded() {
        let source = Arc::new(GatedSource::default());
        let gate_1 = source.gate(1);
        let gate_2 = source.gate(2);
        let adapter = RecommendationAdapter::new(Arc::clone(&source));

        let first = adapter.load(1);
        tokio::pin!(first);
        assert!(poll!(&mut first).is_pending());
        let second = adapter.load(2);
        tokio::pin!(second);
        assert!(poll!(&mut second).is_pending());

        gate_1.send(Ok(recommendation_for(1))).unwrap();
        let after_first = first.await;
        assert!(after_first.status.is_loading());
        assert!(after_first.is_empty());

        gate_2.send(Ok(recommendation_for(2))).unwrap();
        second.await;
        assert_eq!(adapter.view().await.user_index, Some(2));
    }

    #[tokio::test]
    async fn test_switching_away_and_back_ignores_pre_switch_response() {
        let source = Arc::new(GatedSource::default());
        let gate_1_old = source.gate(1);
        let gate_2 = source.gate(2);
        let gate_1_new = source.gate(1);
        let adapter = RecommendationAdapter::new(Arc::clone(&source));

        let old_1 = adapter.load(1);
        tokio::pin!(old_1);
        assert!(poll!(&mut old_1).is_pending());
        let load_2 = adapter.load(2);
        tokio::pin!(load_2);
        assert!(poll!(&mut load_2).is_pending());
        let new_1 = adapter.load(1);
        tokio::pin!(new_1);
        assert!(poll!(&mut new_1).is_pending());

        gate_1_new.send(Ok(recommendation_for(1))).unwrap();
        let fresh = new_1.await;
        assert_eq!(fresh.status, LoadStatus::Ready);

        gate_2.send(Ok(recommendation_for(2))).unwrap();
        load_2.await;

        // The first user-1 request was issued before the switch to user 2
        gate_1_old.send(Err(server_error())).unwrap();
        old_1.await;

        let view = adapter.view().await;
        assert_eq!(view.user_id, Some(1));
        assert_eq!(view.status, LoadStatus::Ready);
        assert_eq!(view.top_recommendations, recommendation_for(1).top_recommendations);
    }

    #[tokio::test]
    async fn test_older_reload_of_same_user_does_not_overwrite_newer() {
        let source = Arc::new(GatedSource::default());
        let gate_old = source.gate(3);
        let gate_new = source.gate(3);
        let adapter = RecommendationAdapter::new(Arc::clone(&source));

        let older = adapter.load(3);
        tokio::pin!(older);
        assert!(poll!(&mut older).is_pending());
        let newer = adapter.load(3);
        tokio::pin!(newer);
        assert!(poll!(&mut newer).is_pending());

        gate_new.send(Ok(recommendation_for(3))).unwrap();
        newer.await;
        gate_old.send(Err(server_error())).unwrap();
        let after_older = older.await;

        assert_eq!(after_older.status, LoadStatus::Ready);
        assert_eq!(after_older.user_index, Some(3));
    }

    #[tokio::test]
    async fn test_failure_empties_both_collections() {
        let source = Arc::new(ScriptedSource::with(vec![Ok(recommendation_for(3)), Err(server_error())]));
        let adapter = RecommendationAdapter::new(source);

        let ready = adapter.load(3).await;
        assert_eq!(ready.status, LoadStatus::Ready);
        assert!(!ready.is_empty());

        // Reload of the same user fails: nothing stale survives
        let failed = adapter.load(3).await;
        assert!(failed.is_empty());
        assert_eq!(failed.user_index, None);
        let message = failed.status.error().expect("failed status");
        assert!(message.starts_with(FETCH_ERROR_PREFIX));
    }

    #[tokio::test]
    async fn test_switching_user_hides_previous_lists_while_loading() {
        let source = Arc::new(GatedSource::default());
        let gate_5 = source.gate(5);
        let adapter = RecommendationAdapter::new(Arc::clone(&source));

        let load_5 = adapter.load(5);
        gate_5.send(Ok(recommendation_for(5))).unwrap();
        load_5.await;

        let gate_6 = source.gate(6);
        let load_6 = adapter.load(6);
        tokio::pin!(load_6);
        assert!(poll!(&mut load_6).is_pending());

        let loading = adapter.view().await;
        assert!(loading.status.is_loading());
        assert!(loading.is_empty());

        gate_6.send(Err(SourceError::Unauthorized)).unwrap();
        let failed = load_6.await;
        assert!(failed.status.error().is_some());
    }

    #[tokio::test]
    async fn test_top_k_hint_is_forwarded() {
        let source = Arc::new(ScriptedSource::with(vec![Ok(recommendation_for(1))]));
        let adapter = RecommendationAdapter::new(Arc::clone(&source)).with_top_k(25);
        adapter.load(1).await;
        assert_eq!(*source.requests.lock().unwrap(), vec![(1, Some(25))]);
    }
}
