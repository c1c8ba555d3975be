// 목적:
// - 정렬 집합 저장소와 카테고리 트리의 프로세스 내 구현을 제공한다.
//
// 설명:
// - 집합마다 멤버->점수 맵과 (점수, 멤버) 순 인덱스를 함께 유지한다.
// - 순위 조회는 점수 인덱스를 그대로 순회하고, 가중 합집합은 멤버 순 맵을
//   k-way 병합해 점수를 합산한다.
// - 순위 구간은 Redis 규칙을 따른다: 음수 경계는 끝에서부터 센다.
// - 점수가 같으면 멤버 오름차순(역순 조회 시 내림차순)으로 정렬한다.
// - 없는 집합은 빈 집합으로 취급한다.
//
// 디자인 패턴:
// - 저장소 패턴(Repository Pattern) 메모리 어댑터.
//
// 참조:
// - src_rs/index/store.rs

use async_trait::async_trait;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{btree_map, BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet};
use std::sync::{RwLock, RwLockReadGuard};

use crate::core::descriptor::{Cid, Direction, RankWindow, Tid};
use crate::core::errors::{FeedError, FeedResult};
use crate::index::store::{CategoryTree, SortedSetStore, UnionQuery};

#[derive(Debug, Default)]
struct ScoredMembers {
    scores: BTreeMap<Tid, f64>,
    by_score: BTreeSet<(OrderedFloat<f64>, Tid)>,
}

impl ScoredMembers {
    fn insert(&mut self, tid: Tid, score: f64) {
        if let Some(previous) = self.scores.insert(tid, score) {
            self.by_score.remove(&(OrderedFloat(previous), tid));
        }
        self.by_score.insert((OrderedFloat(score), tid));
    }

    fn range(&self, window: RankWindow, direction: Direction) -> Vec<Tid> {
        let (from, to) = match normalize_window(window, self.by_score.len()) {
            Some(bounds) => bounds,
            None => return Vec::new(),
        };
        let count = to - from + 1;
        if direction.is_reverse() {
            self.by_score
                .iter()
                .rev()
                .skip(from)
                .take(count)
                .map(|(_, tid)| *tid)
                .collect()
        } else {
            self.by_score
                .iter()
                .skip(from)
                .take(count)
                .map(|(_, tid)| *tid)
                .collect()
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySortedSetStore {
    sets: RwLock<HashMap<String, ScoredMembers>>,
}

impl MemorySortedSetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// `key`에 `tid`를 `score`로 넣는다. 이미 있으면 점수를 바꾼다.
    pub fn add(&self, key: &str, score: f64, tid: Tid) -> FeedResult<()> {
        let mut sets = self
            .sets
            .write()
            .map_err(|_| FeedError::Runtime("정렬 집합 잠금을 획득할 수 없습니다".to_string()))?;
        sets.entry(key.to_string()).or_default().insert(tid, score);
        Ok(())
    }

    pub fn add_all(&self, key: &str, entries: &[(f64, Tid)]) -> FeedResult<()> {
        for (score, tid) in entries {
            self.add(key, *score, *tid)?;
        }
        Ok(())
    }

    fn read_sets(&self) -> FeedResult<RwLockReadGuard<'_, HashMap<String, ScoredMembers>>> {
        self.sets
            .read()
            .map_err(|_| FeedError::Runtime("정렬 집합 잠금을 획득할 수 없습니다".to_string()))
    }
}

#[async_trait]
impl SortedSetStore for MemorySortedSetStore {
    async fn range_by_rank(
        &self,
        key: &str,
        window: RankWindow,
        direction: Direction,
    ) -> FeedResult<Vec<Tid>> {
        let sets = self.read_sets()?;
        Ok(sets
            .get(key)
            .map(|members| members.range(window, direction))
            .unwrap_or_default())
    }

    async fn weighted_union(
        &self,
        query: &UnionQuery,
        direction: Direction,
    ) -> FeedResult<Vec<Tid>> {
        let sets = self.read_sets()?;
        let empty = BTreeMap::new();
        let inputs = query
            .keys
            .iter()
            .enumerate()
            .map(|(index, key)| {
                let scores = sets.get(key).map(|members| &members.scores).unwrap_or(&empty);
                (scores, query.weight_at(index))
            })
            .collect::<Vec<_>>();

        let mut merged = merge_weighted(&inputs);
        merged.sort_by_key(|(tid, score)| (OrderedFloat(*score), *tid));
        if direction.is_reverse() {
            merged.reverse();
        }

        Ok(match normalize_window(query.window, merged.len()) {
            Some((from, to)) => merged[from..=to].iter().map(|(tid, _)| *tid).collect(),
            None => Vec::new(),
        })
    }

    async fn union_cardinality(&self, keys: &[String]) -> FeedResult<u64> {
        let sets = self.read_sets()?;
        let mut distinct = HashSet::new();
        for members in keys.iter().filter_map(|key| sets.get(key)) {
            distinct.extend(members.scores.keys().copied());
        }
        Ok(distinct.len() as u64)
    }
}

/// 멤버 순 입력들을 k-way 병합한다. 여러 입력에 있는 멤버는
/// `weight * score`의 합을 점수로 갖는다.
fn merge_weighted(inputs: &[(&BTreeMap<Tid, f64>, f64)]) -> Vec<(Tid, f64)> {
    let mut cursors = inputs
        .iter()
        .map(|(members, _)| members.iter())
        .collect::<Vec<_>>();
    let mut heads = vec![0.0; inputs.len()];
    let mut heap = BinaryHeap::new();

    for index in 0..cursors.len() {
        advance(&mut cursors, &mut heads, &mut heap, index);
    }

    let mut merged = Vec::new();
    while let Some(Reverse((tid, index))) = heap.pop() {
        let mut combined = heads[index] * inputs[index].1;
        advance(&mut cursors, &mut heads, &mut heap, index);

        while let Some(Reverse((next_tid, other))) = heap.peek().copied() {
            if next_tid != tid {
                break;
            }
            heap.pop();
            combined += heads[other] * inputs[other].1;
            advance(&mut cursors, &mut heads, &mut heap, other);
        }
        merged.push((tid, combined));
    }
    merged
}

fn advance(
    cursors: &mut [btree_map::Iter<'_, Tid, f64>],
    heads: &mut [f64],
    heap: &mut BinaryHeap<Reverse<(Tid, usize)>>,
    index: usize,
) {
    if let Some((tid, score)) = cursors[index].next() {
        heads[index] = *score;
        heap.push(Reverse((*tid, index)));
    }
}

/// Redis 방식 순위 구간을 멤버 수 `len`에 맞춰 해석한다.
fn normalize_window(window: RankWindow, len: usize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as i64;
    let start = if window.start < 0 {
        window.start + len
    } else {
        window.start
    }
    .max(0);
    let stop = if window.stop < 0 {
        window.stop + len
    } else {
        window.stop
    }
    .min(len - 1);
    if start > stop {
        return None;
    }
    Some((start as usize, stop as usize))
}

#[derive(Debug, Default)]
pub struct MemoryCategoryTree {
    children: RwLock<HashMap<Cid, Vec<Cid>>>,
}

impl MemoryCategoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// `parent`의 자식 목록 끝에 `child`를 붙인다.
    pub fn add_child(&self, parent: Cid, child: Cid) -> FeedResult<()> {
        let mut children = self
            .children
            .write()
            .map_err(|_| FeedError::Runtime("카테고리 트리 잠금을 획득할 수 없습니다".to_string()))?;
        children.entry(parent).or_default().push(child);
        Ok(())
    }
}

#[async_trait]
impl CategoryTree for MemoryCategoryTree {
    async fn children_of(&self, cid: Cid) -> FeedResult<Vec<Cid>> {
        let children = self
            .children
            .read()
            .map_err(|_| FeedError::Runtime("카테고리 트리 잠금을 획득할 수 없습니다".to_string()))?;
        Ok(children.get(&cid).cloned().unwrap_or_default())
    }
}
