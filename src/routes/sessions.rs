//! # 접근 판정 API 라우트 핸들러
//!
//! 페이지 없이 뷰 모델만 JSON으로 돌려주는 엔드포인트입니다.
//! 카운트다운 재동기화를 켠 경우, 클라이언트가 이 엔드포인트를 주기적으로 불러
//! `SessionEvent::Resync`로 컨트롤러에 넘깁니다.
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/v1/sessions/{token} | `get_session` | 현재 시점의 뷰 모델 |
//!
//! 비활성·미존재 토큰은 모두 403 `no_active_session`입니다.

use super::AppState;
use crate::{error::AppError, models::WatchView};
use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

/// `GET /api/v1/sessions/{token}` → `WatchView` JSON
pub async fn get_session(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<WatchView>, AppError> {
    let view = state
        .resolver
        .load_view(&token, Utc::now(), &state.view)
        .await?;
    Ok(Json(view))
}
