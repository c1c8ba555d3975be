// 목적:
// - Python에서 호출 가능한 피드 브릿지 클래스를 제공한다.
//
// 설명:
// - JSON 페이로드를 입력받아 Rust 피드 파이프라인을 실행하고,
//   결과를 JSON 문자열로 반환한다.
//
// 디자인 패턴:
// - 파사드(Facade) + 실패 빠르게(Fail Fast).
//
// 참조:
// - src_rs/core/feed_pipeline.rs

use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use tokio::runtime::{Builder, Runtime};

use crate::core::feed_pipeline::{execute_feed, FeedRequestPayload};
use crate::core::telemetry::init_tracing;

/// Python에 노출되는 피드 브릿지 클래스다.
#[pyclass(name = "FeedBridge")]
pub struct PyFeedBridge {
    phase: String,
}

#[pymethods]
impl PyFeedBridge {
    #[new]
    pub fn new() -> Self {
        init_tracing();
        Self {
            phase: "category-feed-postgres".to_string(),
        }
    }

    /// 현재 피드 브릿지 단계 정보를 반환한다.
    pub fn status(&self) -> String {
        self.phase.clone()
    }

    /// 피드 요청 페이로드(JSON)를 실행하고 결과 JSON을 반환한다.
    pub fn execute(&self, payload_json: &str) -> PyResult<String> {
        let payload: FeedRequestPayload = serde_json::from_str(payload_json).map_err(|error| {
            PyRuntimeError::new_err(format!("피드 페이로드 JSON 파싱에 실패했습니다: {}", error))
        })?;

        let runtime = create_runtime().map_err(PyRuntimeError::new_err)?;
        let result = runtime
            .block_on(execute_feed(payload))
            .map_err(|error| PyRuntimeError::new_err(error.to_string()))?;

        serde_json::to_string(&result).map_err(|error| {
            PyRuntimeError::new_err(format!("피드 결과 직렬화 실패: {}", error))
        })
    }
}

impl Default for PyFeedBridge {
    fn default() -> Self {
        Self::new()
    }
}

fn create_runtime() -> Result<Runtime, String> {
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|error| format!("Tokio 런타임 생성 실패: {}", error))
}
