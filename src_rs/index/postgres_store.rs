// 목적:
// - PostgreSQL 기반 정렬 집합 저장소와 카테고리 트리를 제공한다.
//
// 설명:
// - 모든 정렬 집합은 `_key`, `value`, `score` 컬럼을 가진 테이블 하나에 있다.
// - 카테고리 자식은 `cid:<cid>:children` 집합을 점수 순으로 읽는다.
// - 멤버는 문자열로 저장되며 읽을 때 id로 파싱한다.
// - 정렬 집합 조회 실패는 `Store`, 자식 조회 실패는 `Tree`, 연결 실패는 `Db`로 보고한다.
// - 테이블명은 SQL에 넣기 전에 검증한다.
//
// 디자인 패턴:
// - 저장소 패턴(Repository Pattern).
//
// 참조:
// - src_rs/index/sql.rs
// - src_rs/core/feed_pipeline.rs

use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::str::FromStr;

use crate::core::descriptor::{Cid, Direction, RankWindow, Tid};
use crate::core::errors::{FeedError, FeedResult};
use crate::index::set_keys;
use crate::index::sql::{order_keyword, validate_identifier, window_to_limit_offset};
use crate::index::store::{CategoryTree, SortedSetStore, UnionQuery};

pub struct PostgresStore {
    pool: PgPool,
    table: String,
}

impl PostgresStore {
    pub async fn new(
        dsn: &str,
        table: &str,
        pool_min: u32,
        pool_max: u32,
        connect_timeout_ms: u64,
        statement_timeout_ms: u64,
    ) -> FeedResult<Self> {
        if dsn.trim().is_empty() {
            return Err(FeedError::InvalidConfig(
                "postgres.dsn은 비어 있을 수 없습니다".to_string(),
            ));
        }

        validate_identifier(table, "postgres.table")?;

        let connect_options = PgConnectOptions::from_str(dsn)
            .map_err(|error| {
                FeedError::InvalidConfig(format!("postgres.dsn 형식 오류: {}", error))
            })?
            .options([("statement_timeout", statement_timeout_ms.max(1).to_string())]);

        let pool = PgPoolOptions::new()
            .min_connections(pool_min)
            .max_connections(pool_max.max(pool_min).max(1))
            .acquire_timeout(std::time::Duration::from_millis(connect_timeout_ms.max(1)))
            .connect_with(connect_options)
            .await
            .map_err(|error| FeedError::Db(format!("Postgres 연결 실패: {}", error)))?;

        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }

    async fn fetch_members(
        &self,
        key: &str,
        window: RankWindow,
        direction: Direction,
    ) -> FeedResult<Vec<Tid>> {
        let order = order_keyword(direction);
        let sql = format!(
            "SELECT value FROM {} WHERE _key = $1 \
             ORDER BY score {}, value {} LIMIT $2 OFFSET $3",
            self.table, order, order
        );
        let (limit, offset) = window_to_limit_offset(window);

        let rows = sqlx::query(&sql)
            .bind(key)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| FeedError::Store(format!("{} 범위 조회 실패: {}", key, error)))?;

        rows.into_iter()
            .map(map_member_row)
            .collect::<FeedResult<Vec<_>>>()
    }
}

#[async_trait]
impl SortedSetStore for PostgresStore {
    async fn range_by_rank(
        &self,
        key: &str,
        window: RankWindow,
        direction: Direction,
    ) -> FeedResult<Vec<Tid>> {
        self.fetch_members(key, window, direction).await
    }

    async fn weighted_union(
        &self,
        query: &UnionQuery,
        direction: Direction,
    ) -> FeedResult<Vec<Tid>> {
        if query.keys.is_empty() {
            return Ok(Vec::new());
        }

        let order = order_keyword(direction);
        let sql = format!(
            "SELECT z.value AS value FROM {} z \
             INNER JOIN UNNEST($1::TEXT[], $2::FLOAT8[]) AS k(key, weight) ON z._key = k.key \
             GROUP BY z.value \
             ORDER BY SUM(z.score::FLOAT8 * k.weight) {}, z.value {} \
             LIMIT $3 OFFSET $4",
            self.table, order, order
        );
        let weights = (0..query.keys.len())
            .map(|index| query.weight_at(index))
            .collect::<Vec<_>>();
        let (limit, offset) = window_to_limit_offset(query.window);

        let rows = sqlx::query(&sql)
            .bind(&query.keys)
            .bind(&weights)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|error| FeedError::Store(format!("가중 합집합 조회 실패: {}", error)))?;

        rows.into_iter()
            .map(map_member_row)
            .collect::<FeedResult<Vec<_>>>()
    }

    async fn union_cardinality(&self, keys: &[String]) -> FeedResult<u64> {
        if keys.is_empty() {
            return Ok(0);
        }

        let sql = format!(
            "SELECT COUNT(DISTINCT value) AS count FROM {} WHERE _key = ANY($1::TEXT[])",
            self.table
        );

        let row = sqlx::query(&sql)
            .bind(keys)
            .fetch_one(&self.pool)
            .await
            .map_err(|error| FeedError::Store(format!("합집합 크기 조회 실패: {}", error)))?;

        let count = row
            .try_get::<i64, _>("count")
            .map_err(|error| FeedError::Store(format!("count 파싱 실패: {}", error)))?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl CategoryTree for PostgresStore {
    async fn children_of(&self, cid: Cid) -> FeedResult<Vec<Cid>> {
        let key = set_keys::category_children(cid);
        self.fetch_members(&key, RankWindow::all(), Direction::LowestToHighest)
            .await
            .map_err(|error| FeedError::Tree(format!("{} 자식 조회 실패: {}", cid, error)))
    }
}

fn map_member_row(row: PgRow) -> FeedResult<Tid> {
    let value = row
        .try_get::<String, _>("value")
        .map_err(|error| FeedError::Store(format!("value 컬럼 읽기 실패: {}", error)))?;
    parse_member(&value)
}

/// 문자열 멤버를 id로 파싱한다.
pub fn parse_member(value: &str) -> FeedResult<Tid> {
    value
        .trim()
        .parse::<Tid>()
        .map_err(|error| FeedError::Store(format!("멤버 {:?}는 id가 아닙니다: {}", value, error)))
}
