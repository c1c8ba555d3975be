// 목적:
// - 피드 코어 계층의 표준 오류 타입을 정의한다.
//
// 설명:
// - 입력/설정/정렬 집합 저장소/카테고리 트리/DB 연결 오류를 구분해 Python에 전달한다.
// - 협력자 오류는 그대로 전파하며, 코어는 재시도하거나 삼키지 않는다.
//
// 디자인 패턴:
// - 도메인 오류 열거형(Domain Error Enum).
//
// 참조:
// - src_rs/core/feed.rs
// - src_rs/core/feed_pipeline.rs

use thiserror::Error;

/// 피드 코어 전 계층에서 공통으로 사용하는 오류 열거형이다.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("입력값이 유효하지 않습니다: {0}")]
    InvalidInput(String),
    #[error("설정값이 유효하지 않습니다: {0}")]
    InvalidConfig(String),
    #[error("정렬 집합 저장소 호출에 실패했습니다: {0}")]
    Store(String),
    #[error("카테고리 트리 조회에 실패했습니다: {0}")]
    Tree(String),
    #[error("데이터베이스 연결에 실패했습니다: {0}")]
    Db(String),
    #[error("런타임 처리 중 오류가 발생했습니다: {0}")]
    Runtime(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
