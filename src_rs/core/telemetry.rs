// 목적:
// - 프로세스 전역 tracing 구독자를 설치한다.
//
// 설명:
// - 필터는 RUST_LOG를 따르며 기본값은 `category_feed=info`이다.
// - 여러 번 호출해도 되며, 첫 호출만 설치한다.

use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "category_feed=info".into()),
        )
        .try_init();
}
