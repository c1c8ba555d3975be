use rstest::rstest;
use std::sync::Arc;

use category_feed::core::set_selector::{category_sets, select_topic_sets};
use category_feed::index::memory_store::{MemoryCategoryTree, MemorySortedSetStore};
use category_feed::{CategorySettings, SortMode, TagFilter, TopicFeed, TopicQuery};

use crate::support::seed;

fn keys(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[rstest]
#[case(TopicQuery::new(7, 0, 9), keys(&["cid:7:tids"]))]
#[case(TopicQuery::new(7, 0, 9).sorted_by(SortMode::OldestToNewest), keys(&["cid:7:tids"]))]
#[case(TopicQuery::new(7, 0, 9).sorted_by(SortMode::MostPosts), keys(&["cid:7:tids:posts"]))]
#[case(TopicQuery::new(7, 0, 9).sorted_by(SortMode::MostVotes), keys(&["cid:7:tids:votes"]))]
#[case(
    TopicQuery::new(7, 0, 9).sorted_by(SortMode::MostVotes).by_user(42),
    keys(&["cid:7:uid:42:tids"])
)]
#[case(TopicQuery::new(7, 0, 9).by_user(0), keys(&["cid:7:tids"]))]
#[case(
    TopicQuery::new(7, 0, 9).tagged(TagFilter::One("rust".to_string())),
    keys(&["cid:7:tids", "tag:rust:topics"])
)]
#[case(
    TopicQuery::new(7, 0, 9).tagged(TagFilter::One(String::new())),
    keys(&["cid:7:tids"])
)]
#[case(
    TopicQuery::new(7, 0, 9)
        .sorted_by(SortMode::MostPosts)
        .tagged(TagFilter::Many(vec!["a".to_string(), "b".to_string()])),
    keys(&["cid:7:tids:posts", "tag:a:topics", "tag:b:topics"])
)]
#[case(TopicQuery::new(7, 0, 9).tagged(TagFilter::Many(Vec::new())), keys(&["cid:7:tids"]))]
fn category_sets_follow_sort_user_and_tags(#[case] query: TopicQuery, #[case] expected: Vec<String>) {
    assert_eq!(category_sets(&query, SortMode::NewestToOldest), expected);
}

#[rstest]
#[case(None, None, SortMode::NewestToOldest, "cid:3:tids")]
#[case(None, None, SortMode::MostVotes, "cid:3:tids:votes")]
#[case(None, Some(SortMode::MostPosts), SortMode::MostVotes, "cid:3:tids:posts")]
#[case(Some(SortMode::NewestToOldest), Some(SortMode::MostPosts), SortMode::MostVotes, "cid:3:tids")]
fn sort_resolves_query_then_settings_then_default(
    #[case] sort: Option<SortMode>,
    #[case] user_sort: Option<SortMode>,
    #[case] default_sort: SortMode,
    #[case] expected: &str,
) {
    let mut query = TopicQuery::new(3, 0, 19).with_settings(CategorySettings {
        category_topic_sort: user_sort,
    });
    query.sort = sort;

    assert_eq!(category_sets(&query, default_sort), keys(&[expected]));
}

#[tokio::test]
async fn subtree_sets_are_parent_first_in_child_order() {
    let tree = MemoryCategoryTree::new();
    tree.add_child(1, 2).unwrap();
    tree.add_child(1, 3).unwrap();
    tree.add_child(2, 4).unwrap();

    let query = TopicQuery::new(1, 0, 9)
        .sorted_by(SortMode::MostPosts)
        .tagged(TagFilter::One("news".to_string()));
    let sets = select_topic_sets(&tree, &query, SortMode::NewestToOldest)
        .await
        .unwrap();

    assert_eq!(
        sets,
        keys(&[
            "cid:1:tids:posts",
            "tag:news:topics",
            "cid:2:tids:posts",
            "tag:news:topics",
            "cid:4:tids:posts",
            "tag:news:topics",
            "cid:3:tids:posts",
            "tag:news:topics",
        ])
    );
    assert_eq!(query.cid, 1);
}

#[tokio::test]
async fn count_covers_the_subtree_without_adding_pins() {
    let store = Arc::new(MemorySortedSetStore::new());
    let tree = Arc::new(MemoryCategoryTree::new());
    tree.add_child(1, 2).unwrap();
    seed(&store, "cid:1:tids", &[1, 2, 3, 4, 5]);
    seed(&store, "cid:2:tids", &[6, 7]);
    let feed = TopicFeed::new(store.clone(), tree.clone());
    let query = TopicQuery::new(1, 0, 9);

    assert_eq!(feed.count_topics(&query).await.unwrap(), 7);

    store.add("cid:1:tids:pinned", 1.0, 3).unwrap();
    store.add("cid:2:tids:pinned", 1.0, 6).unwrap();
    assert_eq!(feed.count_topics(&query).await.unwrap(), 7);
}

#[tokio::test]
async fn count_of_tagged_listing_is_the_union_size() {
    let store = Arc::new(MemorySortedSetStore::new());
    let tree = Arc::new(MemoryCategoryTree::new());
    seed(&store, "cid:1:tids", &[1, 2, 3]);
    seed(&store, "tag:rust:topics", &[3, 4]);
    let feed = TopicFeed::new(store, tree);

    let query = TopicQuery::new(1, 0, -1).tagged(TagFilter::One("rust".to_string()));
    assert_eq!(feed.count_topics(&query).await.unwrap(), 4);
}
