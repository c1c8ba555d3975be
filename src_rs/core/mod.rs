// 목적:
// - 피드 코어 계층 모듈을 선언한다.
//
// 설명:
// - 기술자/집합 선택/고정 토픽 수집/페이지 조립을 JSON 파이프라인 및
//   공통 오류 모델과 분리해 유지보수성을 높인다.
//
// 디자인 패턴:
// - 명시적 오류 모델(Explicit Error Model).
//
// 참조:
// - src_rs/core/errors.rs
// - src_rs/core/feed.rs
// - src_rs/core/feed_pipeline.rs

pub mod descriptor;
pub mod errors;
pub mod feed;
pub mod feed_pipeline;
pub mod pinned;
pub mod set_selector;
pub mod telemetry;
