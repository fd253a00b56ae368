//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들과, 이들을 묶은 라우터를 정의합니다.
//!
//! 각 하위 모듈:
//! - `watch`: 시청 페이지 (HTML)
//! - `sessions`: 접근 판정 JSON API (재동기화용)
//! - `health`: 서버 상태 확인 (헬스체크)
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 |
//! |--------|------|--------|
//! | GET | /watch/{token} | `watch_page` |
//! | GET | /api/v1/sessions/{token} | `get_session` |
//! | GET | /api/v1/health | `health_check` |

pub mod health;
pub mod sessions;
pub mod watch;

pub use health::*;
pub use sessions::*;
pub use watch::*;

use crate::services::{SessionResolver, ViewSettings};
use axum::{routing::get, Router};
use sqlx::SqlitePool;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 판정기는 풀 핸들을 들고 있으므로 clone해도 같은 풀을 공유합니다.
#[derive(Clone)]
pub struct AppState {
    /// 예약 저장소가 주입된 세션 판정기
    pub resolver: SessionResolver<SqlitePool>,
    /// 뷰 모델에 함께 실리는 정적 설정 (스트림 경로 등)
    pub view: ViewSettings,
}

/// 미들웨어를 붙이기 전의 라우터를 만듭니다.
///
/// main.rs는 여기에 CORS, 트레이싱, 정적 파일 서빙을 덧붙이고,
/// 테스트는 이 라우터를 그대로 `oneshot()`으로 호출합니다.
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/sessions/{token}", get(get_session))
        .route("/health", get(health_check));

    Router::new()
        .route("/watch/{token}", get(watch_page))
        .nest("/api/v1", api_routes)
        .with_state(state)
}
