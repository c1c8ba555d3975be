use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use category_feed::index::memory_store::{MemoryCategoryTree, MemorySortedSetStore};
use category_feed::{
    CategoryTree, Cid, Direction, FeedError, FeedResult, RankWindow, SortedSetStore, Tid,
    TopicFeed, UnionQuery,
};

/// Memory store that records every candidate-set query it serves.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemorySortedSetStore,
    pub candidate_queries: AtomicUsize,
    pub windows: Mutex<Vec<RankWindow>>,
}

impl RecordingStore {
    pub fn candidate_query_count(&self) -> usize {
        self.candidate_queries.load(Ordering::SeqCst)
    }

    pub fn recorded_windows(&self) -> Vec<RankWindow> {
        self.windows.lock().unwrap().clone()
    }

    fn record(&self, window: RankWindow) {
        self.candidate_queries.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().unwrap().push(window);
    }
}

#[async_trait]
impl SortedSetStore for RecordingStore {
    async fn range_by_rank(
        &self,
        key: &str,
        window: RankWindow,
        direction: Direction,
    ) -> FeedResult<Vec<Tid>> {
        if !key.ends_with(":pinned") {
            self.record(window);
        }
        self.inner.range_by_rank(key, window, direction).await
    }

    async fn weighted_union(
        &self,
        query: &UnionQuery,
        direction: Direction,
    ) -> FeedResult<Vec<Tid>> {
        self.record(query.window);
        self.inner.weighted_union(query, direction).await
    }

    async fn union_cardinality(&self, keys: &[String]) -> FeedResult<u64> {
        self.inner.union_cardinality(keys).await
    }
}

/// Store whose candidate queries always fail.
pub struct BrokenStore;

#[async_trait]
impl SortedSetStore for BrokenStore {
    async fn range_by_rank(
        &self,
        _key: &str,
        _window: RankWindow,
        _direction: Direction,
    ) -> FeedResult<Vec<Tid>> {
        Err(FeedError::Store("connection reset".to_string()))
    }

    async fn weighted_union(
        &self,
        _query: &UnionQuery,
        _direction: Direction,
    ) -> FeedResult<Vec<Tid>> {
        Err(FeedError::Store("connection reset".to_string()))
    }

    async fn union_cardinality(&self, _keys: &[String]) -> FeedResult<u64> {
        Err(FeedError::Store("connection reset".to_string()))
    }
}

/// Tree that fails for one category and is empty elsewhere.
pub struct BrokenTree {
    pub failing_cid: Cid,
    pub children: MemoryCategoryTree,
}

#[async_trait]
impl CategoryTree for BrokenTree {
    async fn children_of(&self, cid: Cid) -> FeedResult<Vec<Cid>> {
        if cid == self.failing_cid {
            return Err(FeedError::Tree(format!("category {} unavailable", cid)));
        }
        self.children.children_of(cid).await
    }
}

pub fn feed_over(store: &Arc<RecordingStore>, tree: &Arc<MemoryCategoryTree>) -> TopicFeed {
    TopicFeed::new(store.clone(), tree.clone())
}

/// Adds `tids` to `key`, each scored by its own id.
pub fn seed(store: &MemorySortedSetStore, key: &str, tids: &[Tid]) {
    for tid in tids {
        store.add(key, *tid as f64, *tid).unwrap();
    }
}

/// Adds `tids` to the pinned set of `cid`, earliest pin first.
pub fn pin(store: &MemorySortedSetStore, cid: Cid, tids: &[Tid]) {
    let key = format!("cid:{}:tids:pinned", cid);
    for (order, tid) in tids.iter().enumerate() {
        store.add(&key, (order + 1) as f64, *tid).unwrap();
    }
}
