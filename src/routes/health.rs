//! # 헬스체크(Health Check) 핸들러
//!
//! 서버와 예약 저장소가 정상적으로 동작하는지 확인하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /api/v1/health` → `{ "status": "ok" }`
//!
//! 주로 다음 용도로 사용됩니다:
//! - 리버스 프록시의 서버 상태 확인
//! - 컨테이너 오케스트레이터(Docker)의 헬스체크

use super::AppState;
use crate::error::AppError;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// `GET /health` — 서버 상태를 확인합니다.
///
/// `SELECT 1`로 저장소 연결까지 확인합니다.
/// 풀에서 연결을 얻지 못하면 `AppError::Database` → HTTP 500이 됩니다.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1")
        .execute(state.resolver.store())
        .await?;

    Ok(Json(json!({
        "status": "ok"
    })))
}
