//! # 예약 저장소 쿼리 모듈
//!
//! 토큰으로 예약 창을 찾고, 예약 고객의 이름을 조회하는 읽기 전용 쿼리들입니다.
//! 이 계층은 예약 상태를 절대 수정하지 않습니다 (토큰 소모 없음).
//!
//! ## 저장소 주입
//! `ReservationStore` 트레이트로 저장소를 추상화합니다.
//! 판정기(`SessionResolver`)는 전역 싱글턴 연결 대신 이 트레이트를 구현한 핸들을
//! 명시적으로 넘겨받으며, 테스트에서는 메모리 구현으로 갈아끼울 수 있습니다.

use crate::error::AppError;
use crate::models::{AccessToken, ReservationRow};
use sqlx::SqlitePool;
use std::future::Future;

/// 예약 저장소 인터페이스
///
/// `-> impl Future + Send` 형태로 선언하여,
/// 구현체에서는 평범한 `async fn`으로 작성하면서도 Axum 핸들러에서 요구하는
/// `Send` 보장을 유지합니다.
pub trait ReservationStore {
    /// 토큰과 정확히 일치하는 예약 중 가장 최근 행을 찾습니다. 없으면 None.
    fn find_window_by_token(
        &self,
        token: &AccessToken,
    ) -> impl Future<Output = Result<Option<ReservationRow>, AppError>> + Send;

    /// 고객 ID로 고객 이름을 찾습니다. 없으면 None.
    fn find_guest_name(
        &self,
        client_id: i64,
    ) -> impl Future<Output = Result<Option<String>, AppError>> + Send;
}

impl ReservationStore for SqlitePool {
    async fn find_window_by_token(
        &self,
        token: &AccessToken,
    ) -> Result<Option<ReservationRow>, AppError> {
        // 같은 토큰이 여러 번 저장되어 있어도 id가 가장 큰(가장 최근) 한 행만 사용합니다.
        // 중복 정리는 저장소/발급자의 책임이므로 여기서는 하지 않습니다.
        let row = sqlx::query_as::<_, ReservationRow>(
            r#"
            SELECT id, token, client_id, starts_at, ends_at
            FROM reservations
            WHERE token = ?
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(self) // 0행이면 None, 1행이면 Some
        .await?;

        Ok(row)
    }

    async fn find_guest_name(&self, client_id: i64) -> Result<Option<String>, AppError> {
        let name: Option<(String,)> = sqlx::query_as("SELECT name FROM clients WHERE id = ?")
            .bind(client_id)
            .fetch_optional(self)
            .await?;

        Ok(name.map(|(name,)| name))
    }
}
