//! # 시청 페이지 핸들러
//!
//! 방문객이 토큰이 담긴 링크를 열면 도착하는 페이지입니다.
//!
//! ## 응답
//! | 상황 | 상태 코드 | 본문 |
//! |------|-----------|------|
//! | 활성 예약 | 200 | 시청 페이지 (뷰 모델 JSON 포함) |
//! | 토큰 형식 오류 | 400 | 중립 안내 페이지 |
//! | 예약 없음 / 만료 / 시작 전 | 403 | 중립 안내 페이지 (같은 본문) |
//! | 저장소 데이터 손상 | 500 | 일반 오류 안내 페이지 |

use super::AppState;
use crate::{error::AppError, services::page};
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;

/// HTML 페이지용 에러 래퍼
///
/// `AppError`와 상태 코드 매핑은 같고, 본문만 JSON 대신 안내 페이지입니다.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.0.status();
        let (_, message) = self.0.public_parts();
        (status, Html(page::render_notice_page(message))).into_response()
    }
}

/// `GET /watch/{token}` — 시청 페이지를 렌더링합니다.
pub async fn watch_page(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Html<String>, PageError> {
    let view = state
        .resolver
        .load_view(&token, Utc::now(), &state.view)
        .await?;
    Ok(Html(page::render_watch_page(&view)?))
}
