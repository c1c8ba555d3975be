#![cfg_attr(feature = "python", allow(non_local_definitions))]

// 목적:
// - 카테고리 피드 엔진의 진입점을 제공한다.
//
// 설명:
// - `core`는 고정/정렬 토픽 id를 페이지로 조립하고 개수를 센다.
// - `index`는 협력자 트레이트와 메모리/Postgres 어댑터를 담는다.
// - `api`는 `python` 기능이 켜졌을 때 엔진을 Python에 노출한다.
//
// 디자인 패턴:
// - 계층형 모듈 구조(api/core/index).
//
// 참조:
// - src_rs/core/feed.rs
// - src_rs/api/feed_bridge.rs

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyModule;

#[cfg(feature = "python")]
pub mod api;
pub mod core;
pub mod index;

pub use crate::core::descriptor::{
    CategorySettings, Cid, Direction, FeedConfig, RankWindow, SortMode, TagFilter, Tid,
    TopicQuery, Uid,
};
pub use crate::core::errors::{FeedError, FeedResult};
pub use crate::core::feed::{TopicFeed, TopicPage};
pub use crate::index::store::{CategoryTree, SortedSetStore, UnionQuery};

#[cfg(feature = "python")]
use api::feed_bridge::PyFeedBridge;

#[cfg(feature = "python")]
#[pymodule]
fn category_feed(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyFeedBridge>()?;
    Ok(())
}
