// 목적:
// - 피드 요청을 표현하는 조회 기술자(descriptor)를 정의한다.
//
// 설명:
// - 기술자는 불변 값이다. 재귀 분기는 원본을 고치지 않고
//   `for_category` / `with_window`로 새 복사본을 만든다.
// - `stop = -1`은 "집합의 끝까지"를 뜻한다.
// - 집합 선택용 정렬: 요청 정렬 -> 사용자 설정 -> 엔진 기본값.
// - 읽기 방향은 요청 정렬만 보며, 없으면 newest_to_oldest로 본다.
//
// 디자인 패턴:
// - 값 객체(Value Object).
//
// 참조:
// - src_rs/core/set_selector.rs
// - src_rs/core/pinned.rs

use serde::{Deserialize, Serialize};

pub type Cid = u64;
pub type Tid = u64;
pub type Uid = u64;

/// "마지막 멤버까지"를 뜻하는 순위 경계.
pub const UNBOUNDED: i64 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    #[default]
    NewestToOldest,
    OldestToNewest,
    MostPosts,
    MostVotes,
}

impl SortMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::NewestToOldest => "newest_to_oldest",
            SortMode::OldestToNewest => "oldest_to_newest",
            SortMode::MostPosts => "most_posts",
            SortMode::MostVotes => "most_votes",
        }
    }
}

/// 점수 정렬 집합을 읽는 순서.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    HighestToLowest,
    LowestToHighest,
}

impl Direction {
    pub fn is_reverse(&self) -> bool {
        matches!(self, Direction::HighestToLowest)
    }
}

/// 태그 필터: 단일 태그 또는 태그 목록.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagFilter {
    One(String),
    Many(Vec<String>),
}

/// 요청과 함께 전달되는 사용자별 목록 설정.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySettings {
    #[serde(default)]
    pub category_topic_sort: Option<SortMode>,
}

/// 0부터 시작하는 양끝 포함 순위 구간. `stop = -1`이면 끝까지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RankWindow {
    pub start: i64,
    pub stop: i64,
}

impl RankWindow {
    pub fn new(start: i64, stop: i64) -> Self {
        Self { start, stop }
    }

    /// 집합 전체, `[0, -1]`.
    pub fn all() -> Self {
        Self::new(0, UNBOUNDED)
    }

    pub fn is_unbounded(&self) -> bool {
        self.stop == UNBOUNDED
    }

    /// 메모리 슬라이스에 구간을 적용한다.
    /// `start`는 슬라이스 범위로 잘리고, `stop = -1`은 끝까지 읽는다.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let len = items.len();
        let from = clamp_index(self.start, len);
        let to = if self.is_unbounded() {
            len
        } else {
            clamp_index(self.stop.saturating_add(1), len)
        };
        if from >= to {
            &[]
        } else {
            &items[from..to]
        }
    }
}

fn clamp_index(index: i64, len: usize) -> usize {
    if index <= 0 {
        0
    } else {
        (index as u64).min(len as u64) as usize
    }
}

/// 카테고리 목록 요청 하나의 기술자.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicQuery {
    pub cid: Cid,
    pub start: i64,
    pub stop: i64,
    #[serde(default)]
    pub sort: Option<SortMode>,
    #[serde(default)]
    pub tag: Option<TagFilter>,
    #[serde(default)]
    pub target_uid: Option<Uid>,
    #[serde(default)]
    pub settings: Option<CategorySettings>,
}

impl TopicQuery {
    pub fn new(cid: Cid, start: i64, stop: i64) -> Self {
        Self {
            cid,
            start,
            stop,
            sort: None,
            tag: None,
            target_uid: None,
            settings: None,
        }
    }

    pub fn sorted_by(mut self, sort: SortMode) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn tagged(mut self, tag: TagFilter) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn by_user(mut self, uid: Uid) -> Self {
        self.target_uid = Some(uid);
        self
    }

    pub fn with_settings(mut self, settings: CategorySettings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// 다른 카테고리를 가리키는 복사본.
    pub fn for_category(&self, cid: Cid) -> Self {
        Self {
            cid,
            ..self.clone()
        }
    }

    /// 순위 구간만 바꾼 복사본.
    pub fn with_window(&self, window: RankWindow) -> Self {
        Self {
            start: window.start,
            stop: window.stop,
            ..self.clone()
        }
    }

    pub fn window(&self) -> RankWindow {
        RankWindow::new(self.start, self.stop)
    }

    /// 집합 선택에 쓰는 정렬: 요청 정렬, 사용자 설정, `fallback` 순.
    pub fn effective_sort(&self, fallback: SortMode) -> SortMode {
        self.sort
            .or_else(|| {
                self.settings
                    .as_ref()
                    .and_then(|settings| settings.category_topic_sort)
            })
            .unwrap_or(fallback)
    }

    /// 후보 집합을 읽는 방향. 사용자 설정과 엔진 기본값은 반영하지 않는다.
    pub fn read_direction(&self) -> Direction {
        resolve_direction(self.sort.unwrap_or_default())
    }

    /// 사용자 필터. uid 0은 없는 것으로 본다.
    pub fn user_filter(&self) -> Option<Uid> {
        self.target_uid.filter(|uid| *uid != 0)
    }

    /// 합집합에 넣을 태그 이름. 빈 단일 태그는 필터 없음으로 본다.
    pub fn tag_names(&self) -> Vec<&str> {
        match &self.tag {
            None => Vec::new(),
            Some(TagFilter::One(tag)) if tag.is_empty() => Vec::new(),
            Some(TagFilter::One(tag)) => vec![tag.as_str()],
            Some(TagFilter::Many(tags)) => tags.iter().map(String::as_str).collect(),
        }
    }
}

/// 엔진 수준 기본값.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub default_sort: SortMode,
}

/// 정렬 모드별 읽기 방향.
pub fn resolve_direction(sort: SortMode) -> Direction {
    match sort {
        SortMode::NewestToOldest | SortMode::MostPosts | SortMode::MostVotes => {
            Direction::HighestToLowest
        }
        SortMode::OldestToNewest => Direction::LowestToHighest,
    }
}
