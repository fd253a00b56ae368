//! # 에러 처리 모듈
//!
//! 서버 쪽에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 세션 판정 과정의 모든 실패를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답(JSON)으로 자동 변환
//!
//! ## 방문객에게 보이는 메시지
//! 잘못된 토큰(400)과 존재하지 않거나 만료된 예약(403)은 **같은 문구**를 돌려줍니다.
//! 토큰을 추측하는 사람이 예약의 존재 여부를 알아낼 수 없어야 하기 때문입니다.

use axum::{
    http::StatusCode,                   // HTTP 상태 코드 (400, 403, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error; // thiserror: 커스텀 에러 타입을 쉽게 만들어주는 매크로 크레이트

/// 방문객에게 보여주는 중립적인 안내 문구
///
/// 400과 403 모두 이 문구를 사용합니다.
pub const NO_ACTIVE_SESSION: &str = "There is no active session for this link";

/// 세션 판정 과정에서 발생할 수 있는 모든 에러 종류
///
/// 각 에러 variant는 적절한 HTTP 상태 코드와 메시지로 변환됩니다.
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 토큰 형식이 잘못됨 (HTTP 400)
    /// 저장소를 조회하기 전에 걸러지므로 DB 에러가 새어 나갈 일이 없습니다.
    #[error("Invalid token: {0}")]
    Validation(String),

    /// 활성 예약이 없음 (HTTP 403)
    /// "존재하지 않음"과 "만료됨"을 구분하지 않습니다.
    #[error("No active session")]
    NotFound,

    /// 저장소가 해석할 수 없는 데이터를 돌려줌 (HTTP 500)
    /// 시스템 결함이므로 "아직 시작 전" 같은 정상 상태로 위장하지 않습니다.
    #[error("Malformed reservation data: {0}")]
    MalformedData(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error → AppError::Database 자동 변환
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// 에러에 대응하는 HTTP 상태 코드
    ///
    /// JSON 응답과 HTML 안내 페이지가 같은 매핑을 공유합니다.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::FORBIDDEN,
            AppError::MalformedData(_) | AppError::Internal(_) | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 내부 에러는 로그에 기록하고, 클라이언트용 (code, message) 쌍을 돌려줍니다.
    pub fn public_parts(&self) -> (&'static str, &'static str) {
        match self {
            AppError::Validation(_) => ("invalid_token", NO_ACTIVE_SESSION),
            AppError::NotFound => ("no_active_session", NO_ACTIVE_SESSION),
            AppError::MalformedData(msg) => {
                tracing::error!("Malformed reservation data: {}", msg);
                ("malformed_data", "An internal error occurred")
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("internal_error", "An internal error occurred")
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("database_error", "A database error occurred")
            }
        }
    }
}

// impl IntoResponse for AppError:
// 핸들러가 Err(AppError)를 반환하면 Axum이 이 메서드를 호출하여 HTTP 응답을 만듭니다.
impl IntoResponse for AppError {
    /// AppError를 JSON HTTP 응답으로 변환합니다.
    ///
    /// 결과: `{ "error": { "code": "no_active_session", "message": "..." } }`
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = self.public_parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
