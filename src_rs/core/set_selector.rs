// 목적:
// - 카테고리 하위 트리의 일반(비고정) 후보 집합을 이루는 정렬 집합 키를 도출한다.
//
// 설명:
// - 정렬에 따라 기본 집합을 고르고, 사용자 필터가 있으면 사용자별 집합으로
//   바꾼 뒤 태그마다 집합을 하나씩 덧붙인다.
// - 자식 카테고리는 재귀적으로 동시에 선택하며, 부모 키 뒤에 자식 순서대로 붙는다.
// - 이름만 도출하며 페이지 처리는 하지 않는다.
//
// 디자인 패턴:
// - 박싱된 future 위의 재귀 팬아웃(Recursive Fan-out).
//
// 참조:
// - src_rs/core/feed.rs
// - src_rs/index/set_keys.rs

use futures::future::{try_join_all, BoxFuture, FutureExt};

use crate::core::descriptor::{Cid, SortMode, TopicQuery};
use crate::core::errors::FeedResult;
use crate::index::set_keys;
use crate::index::store::CategoryTree;

/// 하위 카테고리를 제외한 `query.cid` 자체의 키.
pub fn category_sets(query: &TopicQuery, default_sort: SortMode) -> Vec<String> {
    let cid = query.cid;
    let base = match query.user_filter() {
        Some(uid) => set_keys::category_by_user(cid, uid),
        None => match query.effective_sort(default_sort) {
            SortMode::MostPosts => set_keys::category_by_posts(cid),
            SortMode::MostVotes => set_keys::category_by_votes(cid),
            SortMode::NewestToOldest | SortMode::OldestToNewest => set_keys::category_main(cid),
        },
    };

    let mut keys = vec![base];
    keys.extend(query.tag_names().into_iter().map(set_keys::tag_topics));
    keys
}

/// `query.cid`를 루트로 하는 하위 트리 전체의 평탄화된 키.
pub fn select_topic_sets<'a>(
    tree: &'a dyn CategoryTree,
    query: &'a TopicQuery,
    default_sort: SortMode,
) -> BoxFuture<'a, FeedResult<Vec<String>>> {
    async move {
        let mut keys = category_sets(query, default_sort);

        let child_cids: Vec<Cid> = tree.children_of(query.cid).await?;
        let child_queries = child_cids
            .into_iter()
            .map(|child| query.for_category(child))
            .collect::<Vec<_>>();

        let child_keys = try_join_all(
            child_queries
                .iter()
                .map(|child| select_topic_sets(tree, child, default_sort)),
        )
        .await?;

        for mut child in child_keys {
            keys.append(&mut child);
        }
        Ok(keys)
    }
    .boxed()
}
