// 목적:
// - JSON 페이로드로 기술된 피드 요청 하나를 실행한다.
//
// 설명:
// - 페이로드는 경계에서 검증한다(엔진 자체는 검증하지 않는다).
// - Postgres 저장소에 연결하며, 같은 저장소가 카테고리 트리 역할도 한다.
// - 지원 operation: list_topic_ids, list_topic_page, count_topics.
//
// 디자인 패턴:
// - 파이프라인(Pipeline) + 명령 패턴(Command) 기반 분기.
//
// 참조:
// - src_rs/index/postgres_store.rs
// - src_rs/core/feed.rs

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::core::descriptor::{FeedConfig, SortMode, Tid, TopicQuery, UNBOUNDED};
use crate::core::errors::{FeedError, FeedResult};
use crate::core::feed::TopicFeed;
use crate::index::postgres_store::PostgresStore;
use crate::index::sql::validate_identifier;

fn default_table() -> String {
    "legacy_zset".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfigPayload {
    pub dsn: String,
    #[serde(default = "default_table")]
    pub table: String,
    pub pool_min: u32,
    pub pool_max: u32,
    pub connect_timeout_ms: u64,
    pub statement_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedRequestPayload {
    pub operation: String,
    pub query: TopicQuery,
    #[serde(default)]
    pub default_sort: Option<SortMode>,
    pub postgres: PostgresConfigPayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedResultPayload {
    pub operation: String,
    pub tids: Vec<Tid>,
    pub next_start: Option<i64>,
    pub count: Option<u64>,
    pub elapsed_ms: u128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeedOperation {
    ListTopicIds,
    ListTopicPage,
    CountTopics,
}

impl FeedOperation {
    fn parse(value: &str) -> FeedResult<Self> {
        match value {
            "list_topic_ids" => Ok(FeedOperation::ListTopicIds),
            "list_topic_page" => Ok(FeedOperation::ListTopicPage),
            "count_topics" => Ok(FeedOperation::CountTopics),
            other => Err(FeedError::InvalidInput(format!(
                "지원하지 않는 operation입니다: {}",
                other
            ))),
        }
    }
}

/// Postgres 대상으로 피드 파이프라인을 실행한다.
pub async fn execute_feed(payload: FeedRequestPayload) -> FeedResult<FeedResultPayload> {
    validate_payload(&payload)?;
    let operation = FeedOperation::parse(payload.operation.trim())?;

    let started = Instant::now();
    let store = Arc::new(
        PostgresStore::new(
            &payload.postgres.dsn,
            &payload.postgres.table,
            payload.postgres.pool_min,
            payload.postgres.pool_max,
            payload.postgres.connect_timeout_ms,
            payload.postgres.statement_timeout_ms,
        )
        .await?,
    );

    let config = FeedConfig {
        default_sort: payload.default_sort.unwrap_or_default(),
    };
    let feed = TopicFeed::with_config(store.clone(), store, config);

    let mut result = run_operation(&feed, operation, &payload.query).await?;
    result.operation = payload.operation;
    result.elapsed_ms = started.elapsed().as_millis();

    info!(
        operation = result.operation.as_str(),
        cid = payload.query.cid,
        tid_count = result.tids.len(),
        elapsed_ms = result.elapsed_ms as u64,
        "피드 요청 처리 완료"
    );
    Ok(result)
}

async fn run_operation(
    feed: &TopicFeed,
    operation: FeedOperation,
    query: &TopicQuery,
) -> FeedResult<FeedResultPayload> {
    match operation {
        FeedOperation::ListTopicIds => Ok(FeedResultPayload {
            tids: feed.list_topic_ids(query).await?,
            ..FeedResultPayload::default()
        }),
        FeedOperation::ListTopicPage => {
            let page = feed.list_topic_page(query).await?;
            Ok(FeedResultPayload {
                tids: page.tids,
                next_start: page.next_start,
                ..FeedResultPayload::default()
            })
        }
        FeedOperation::CountTopics => Ok(FeedResultPayload {
            count: Some(feed.count_topics(query).await?),
            ..FeedResultPayload::default()
        }),
    }
}

pub fn validate_payload(payload: &FeedRequestPayload) -> FeedResult<()> {
    if payload.operation.trim().is_empty() {
        return Err(FeedError::InvalidInput(
            "operation은 비어 있을 수 없습니다".to_string(),
        ));
    }

    let query = &payload.query;
    if query.cid == 0 {
        return Err(FeedError::InvalidInput(
            "query.cid는 1 이상의 카테고리 id여야 합니다".to_string(),
        ));
    }

    if query.start < 0 {
        return Err(FeedError::InvalidInput(
            "query.start는 0 이상이어야 합니다".to_string(),
        ));
    }

    if query.stop < UNBOUNDED {
        return Err(FeedError::InvalidInput(
            "query.stop은 -1 또는 순위여야 합니다".to_string(),
        ));
    }

    if query.stop != UNBOUNDED && query.stop < query.start {
        return Err(FeedError::InvalidInput(format!(
            "query.stop({})은 query.start({})보다 작을 수 없습니다",
            query.stop, query.start
        )));
    }

    if payload.postgres.dsn.trim().is_empty() {
        return Err(FeedError::InvalidConfig(
            "postgres.dsn은 비어 있을 수 없습니다".to_string(),
        ));
    }

    validate_identifier(&payload.postgres.table, "postgres.table")?;

    Ok(())
}
