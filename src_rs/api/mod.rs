// 목적:
// - Python FFI 경계 모듈을 선언한다.
//
// 참조:
// - src_rs/api/feed_bridge.rs

pub mod feed_bridge;
