// 목적:
// - 저장소 계층 모듈을 선언한다.
//
// 설명:
// - 협력자 트레이트, 키 명명, 메모리/Postgres 어댑터를 분리해 유지보수성을 확보한다.
//
// 디자인 패턴:
// - 저장소 패턴(Repository Pattern).
//
// 참조:
// - src_rs/index/store.rs
// - src_rs/index/postgres_store.rs

pub mod memory_store;
pub mod postgres_store;
pub mod set_keys;
pub mod sql;
pub mod store;
