// 목적:
// - 피드 코어가 읽는 두 협력자 인터페이스를 선언한다.
//
// 설명:
// - `SortedSetStore`: 이름 붙은 점수 정렬 토픽 id 집합.
// - `CategoryTree`: 카테고리의 직계 자식(표시 순서).
// - 둘 다 트레이트 객체로 주입되어 테스트에서 메모리 구현으로 교체할 수 있다.
//   코어 안에서는 재시도나 타임아웃을 걸지 않는다.
//
// 디자인 패턴:
// - 저장소 패턴(Repository Pattern).
//
// 참조:
// - src_rs/index/memory_store.rs
// - src_rs/index/postgres_store.rs

use async_trait::async_trait;

use crate::core::descriptor::{Cid, Direction, RankWindow, Tid};
use crate::core::errors::FeedResult;

/// 여러 집합에 대한 가중 합집합 요청.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionQuery {
    pub keys: Vec<String>,
    pub weights: Vec<f64>,
    pub window: RankWindow,
}

impl UnionQuery {
    /// 모든 집합의 가중치가 1인 합집합.
    pub fn uniform(keys: Vec<String>, window: RankWindow) -> Self {
        let weights = vec![1.0; keys.len()];
        Self {
            keys,
            weights,
            window,
        }
    }

    /// `index` 위치 집합의 가중치. 없으면 1로 본다.
    pub fn weight_at(&self, index: usize) -> f64 {
        self.weights.get(index).copied().unwrap_or(1.0)
    }
}

#[async_trait]
pub trait SortedSetStore: Send + Sync {
    /// `key` 집합을 `direction` 방향 점수 순으로 정렬해 `window` 구간만 반환한다.
    async fn range_by_rank(
        &self,
        key: &str,
        window: RankWindow,
        direction: Direction,
    ) -> FeedResult<Vec<Tid>>;

    /// 가중 합집합을 합산 점수 순으로 정렬해 반환한다.
    async fn weighted_union(&self, query: &UnionQuery, direction: Direction)
        -> FeedResult<Vec<Tid>>;

    /// `keys` 전체에서 서로 다른 멤버 수.
    async fn union_cardinality(&self, keys: &[String]) -> FeedResult<u64>;
}

#[async_trait]
pub trait CategoryTree: Send + Sync {
    async fn children_of(&self, cid: Cid) -> FeedResult<Vec<Cid>>;
}
