// 목적:
// - Postgres 저장소가 공유하는 SQL 유틸리티를 제공한다.
//
// 설명:
// - 동적 테이블명 검증, 순위 구간 -> LIMIT/OFFSET 변환을 담당한다.
//
// 디자인 패턴:
// - 가드 함수(Guard Function).
//
// 참조:
// - src_rs/index/postgres_store.rs

use crate::core::descriptor::{Direction, RankWindow};
use crate::core::errors::{FeedError, FeedResult};

/// 테이블 식별자의 허용 문자를 검증한다.
pub fn validate_identifier(value: &str, field_name: &str) -> FeedResult<()> {
    if value.trim().is_empty() {
        return Err(FeedError::InvalidConfig(format!(
            "{}는 비어 있을 수 없습니다",
            field_name
        )));
    }

    let valid = value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_');

    if !valid {
        return Err(FeedError::InvalidConfig(format!(
            "{}에는 영문/숫자/밑줄만 사용할 수 있습니다: {}",
            field_name, value
        )));
    }

    Ok(())
}

/// 순위 구간을 `(limit, offset)`으로 바꾼다. limit이 `None`이면 `LIMIT ALL`이다.
/// 아무것도 고르지 않는 구간은 `Some(0)`이 된다.
pub fn window_to_limit_offset(window: RankWindow) -> (Option<i64>, i64) {
    let offset = window.start.max(0);
    if window.is_unbounded() {
        return (None, offset);
    }
    let limit = (window.stop - offset + 1).max(0);
    (Some(limit), offset)
}

pub fn order_keyword(direction: Direction) -> &'static str {
    if direction.is_reverse() {
        "DESC"
    } else {
        "ASC"
    }
}
