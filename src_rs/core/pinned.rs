// 목적:
// - 카테고리 하위 트리의 고정(pinned) 토픽 id를 수집한다.
//
// 설명:
// - 카테고리마다 고정 집합을 최근 고정 순으로 읽는다.
// - 호출자의 구간은 카테고리별 고정 집합에 각각 적용되고, 결과는 부모 먼저,
//   자식은 자식 순서대로 이어 붙인다. 구간이 합쳐진 전체 개수를 제한하지는 않는다.
// - 카테고리 간 중복은 제거하지 않는다.
//
// 디자인 패턴:
// - 박싱된 future 위의 재귀 팬아웃(Recursive Fan-out).
//
// 참조:
// - src_rs/core/feed.rs

use futures::future::{try_join_all, BoxFuture, FutureExt};

use crate::core::descriptor::{Direction, Tid, TopicQuery};
use crate::core::errors::FeedResult;
use crate::index::set_keys;
use crate::index::store::{CategoryTree, SortedSetStore};

pub fn collect_pinned_tids<'a>(
    store: &'a dyn SortedSetStore,
    tree: &'a dyn CategoryTree,
    query: &'a TopicQuery,
) -> BoxFuture<'a, FeedResult<Vec<Tid>>> {
    async move {
        let key = set_keys::category_pinned(query.cid);
        let (mut pinned, child_cids) = tokio::try_join!(
            store.range_by_rank(&key, query.window(), Direction::HighestToLowest),
            tree.children_of(query.cid),
        )?;

        let child_queries = child_cids
            .into_iter()
            .map(|child| query.for_category(child))
            .collect::<Vec<_>>();

        let child_pinned = try_join_all(
            child_queries
                .iter()
                .map(|child| collect_pinned_tids(store, tree, child)),
        )
        .await?;

        for mut child in child_pinned {
            pinned.append(&mut child);
        }
        Ok(pinned)
    }
    .boxed()
}
