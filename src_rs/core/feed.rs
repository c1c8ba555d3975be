// 목적:
// - 카테고리 토픽 피드의 한 페이지를 조립하고 토픽 수를 센다.
//
// 설명:
// - 하위 트리 전체의 고정(pinned) 토픽이 항상 페이지 앞에 온다.
// - 일반 토픽 구간은 이전 페이지에서 소비된 고정 토픽 수만큼 당겨진다.
// - 고정 토픽만으로 채워지는 유한 페이지는 후보 집합을 조회하지 않는다.
// - 고정 토픽 수집과 집합 선택은 동시에 실행되며, 첫 실패가 호출 전체를 중단한다.
// - 읽기 방향은 요청 정렬만으로 정한다(`TopicQuery::read_direction`).
//
// 디자인 패턴:
// - 주입된 협력자 위의 파이프라인(Pipeline).
//
// 참조:
// - src_rs/core/set_selector.rs
// - src_rs/core/pinned.rs

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::core::descriptor::{
    FeedConfig, RankWindow, Tid, TopicQuery, UNBOUNDED,
};
use crate::core::errors::FeedResult;
use crate::core::pinned::collect_pinned_tids;
use crate::core::set_selector::select_topic_sets;
use crate::index::store::{CategoryTree, SortedSetStore, UnionQuery};

/// 조립된 페이지와 다음 페이지의 시작 순위.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPage {
    pub tids: Vec<Tid>,
    pub next_start: Option<i64>,
}

#[derive(Clone)]
pub struct TopicFeed {
    store: Arc<dyn SortedSetStore>,
    tree: Arc<dyn CategoryTree>,
    config: FeedConfig,
}

impl TopicFeed {
    pub fn new(store: Arc<dyn SortedSetStore>, tree: Arc<dyn CategoryTree>) -> Self {
        Self::with_config(store, tree, FeedConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn SortedSetStore>,
        tree: Arc<dyn CategoryTree>,
        config: FeedConfig,
    ) -> Self {
        Self {
            store,
            tree,
            config,
        }
    }

    /// `[query.start, query.stop]` 구간의 토픽 id. 고정 토픽이 먼저 온다.
    #[instrument(skip(self), fields(cid = query.cid, start = query.start, stop = query.stop))]
    pub async fn list_topic_ids(&self, query: &TopicQuery) -> FeedResult<Vec<Tid>> {
        let pinned_query = query.with_window(RankWindow::all());
        let sort = query.effective_sort(self.config.default_sort);
        let direction = query.read_direction();

        let (pinned_tids, sets) = tokio::try_join!(
            collect_pinned_tids(self.store.as_ref(), self.tree.as_ref(), &pinned_query),
            select_topic_sets(self.tree.as_ref(), query, self.config.default_sort),
        )?;

        let total_pinned = pinned_tids.len() as i64;
        let pinned_on_page = query.window().slice(&pinned_tids).to_vec();
        let pinned_count_on_page = pinned_on_page.len() as i64;
        let per_page = query.stop - query.start + 1;
        let normal_to_fetch = (per_page - pinned_count_on_page).max(0);

        if normal_to_fetch == 0 && query.stop != UNBOUNDED {
            debug!(total_pinned, pinned_count_on_page, "고정 토픽으로 페이지가 채워짐");
            return Ok(pinned_on_page);
        }

        let mut start = query.start;
        if start > 0 && total_pinned > 0 {
            start -= total_pinned - pinned_count_on_page;
        }
        let stop = if query.stop == UNBOUNDED {
            UNBOUNDED
        } else {
            start + normal_to_fetch - 1
        };
        let window = RankWindow::new(start, stop);

        debug!(
            total_pinned,
            pinned_count_on_page,
            normal_start = window.start,
            normal_stop = window.stop,
            set_count = sets.len(),
            sort = sort.as_str(),
            "후보 집합 조회"
        );

        let normal_tids = if sets.len() == 1 {
            self.store.range_by_rank(&sets[0], window, direction).await?
        } else {
            let union = UnionQuery::uniform(sets, window);
            self.store.weighted_union(&union, direction).await?
        };

        let pinned_lookup = pinned_tids.iter().copied().collect::<HashSet<_>>();
        let mut tids = pinned_on_page;
        tids.extend(
            normal_tids
                .into_iter()
                .filter(|tid| !pinned_lookup.contains(tid)),
        );
        Ok(tids)
    }

    /// `list_topic_ids`와 같고, 다음 페이지의 시작 순위를 함께 돌려준다.
    pub async fn list_topic_page(&self, query: &TopicQuery) -> FeedResult<TopicPage> {
        let tids = self.list_topic_ids(query).await?;
        let next_start = if tids.is_empty() || query.stop == UNBOUNDED {
            None
        } else {
            Some(query.stop + 1)
        };
        Ok(TopicPage { tids, next_start })
    }

    /// 하위 트리 후보 집합 전체의 고유 토픽 수.
    #[instrument(skip(self), fields(cid = query.cid))]
    pub async fn count_topics(&self, query: &TopicQuery) -> FeedResult<u64> {
        let sets = select_topic_sets(self.tree.as_ref(), query, self.config.default_sort).await?;
        let count = self.store.union_cardinality(&sets).await?;
        debug!(set_count = sets.len(), count, "토픽 수 집계");
        Ok(count)
    }
}
