//! # 세션 판정기 (SessionResolver)
//!
//! 토큰 하나를 받아 "지금 이 방문객이 영상을 볼 수 있는가"를 판정합니다.
//!
//! ## 처리 순서
//! ```text
//! 1. 토큰 형식 검증      실패 → AppError::Validation (400)   ※ 저장소 접근 전
//! 2. 저장소 조회         없음 → AppError::NotFound (403)
//! 3. 시각 파싱/필드 검증  실패 → AppError::MalformedData (500)
//! 4. SessionDecision::compute(start, end, now)
//! ```
//!
//! 판정 외의 부수 효과는 읽기 쿼리뿐입니다. 재시도도 하지 않습니다.

use crate::config::Config;
use crate::db::ReservationStore;
use crate::error::AppError;
use crate::models::{AccessToken, ReservationWindow, SessionDecision, WatchView};
use chrono::{DateTime, FixedOffset, Utc};

/// 저장소 핸들과 설치 시간대를 들고 있는 판정기
///
/// 저장소는 생성 시 명시적으로 주입됩니다. `SqlitePool`은 내부적으로 Arc이므로
/// 판정기를 clone해도 같은 풀을 공유합니다.
#[derive(Debug, Clone)]
pub struct SessionResolver<S> {
    store: S,
    zone: FixedOffset,
}

impl<S: ReservationStore> SessionResolver<S> {
    pub fn new(store: S, zone: FixedOffset) -> Self {
        Self { store, zone }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 현재 시각 기준으로 판정합니다.
    pub async fn resolve(&self, token: &str) -> Result<SessionDecision, AppError> {
        self.resolve_at(token, Utc::now()).await
    }

    /// 주어진 시각 기준으로 판정합니다. 테스트는 이 함수로 시계를 고정합니다.
    pub async fn resolve_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionDecision, AppError> {
        let (_, decision) = self.resolve_window(token, now).await?;
        Ok(decision)
    }

    async fn resolve_window(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<(ReservationWindow, SessionDecision), AppError> {
        let token = AccessToken::parse(token)?;

        let row = self
            .store
            .find_window_by_token(&token)
            .await?
            .ok_or_else(|| {
                tracing::debug!(token = %token.fingerprint(), "no reservation for token");
                AppError::NotFound
            })?;

        let window = ReservationWindow::from_row(row, self.zone)?;
        let decision =
            SessionDecision::compute(window.start, window.end, now.with_timezone(&self.zone));

        tracing::debug!(
            token = %token.fingerprint(),
            active = decision.active,
            remaining = decision.remaining_seconds,
            "resolved session"
        );

        Ok((window, decision))
    }

    /// 페이지에 넘길 뷰 모델을 만듭니다.
    ///
    /// 비활성 판정(만료, 시작 전)은 이 경계에서 `NotFound`로 바뀝니다.
    /// 방문객은 "없는 토큰"과 "지난 예약"을 구분할 수 없습니다.
    /// 고객 이름 조회 실패는 환영 문구만 빠질 뿐 세션을 막지 않습니다.
    pub async fn load_view(
        &self,
        token: &str,
        now: DateTime<Utc>,
        settings: &ViewSettings,
    ) -> Result<WatchView, AppError> {
        let (window, decision) = self.resolve_window(token, now).await?;
        if !decision.active {
            return Err(AppError::NotFound);
        }

        let guest_name = match window.client_id {
            Some(id) => match self.store.find_guest_name(id).await {
                Ok(name) => name,
                Err(e) => {
                    tracing::warn!("guest lookup failed for client {}: {}", id, e);
                    None
                }
            },
            None => None,
        };

        Ok(WatchView {
            decision,
            stream_path: settings.stream_path.clone(),
            low_latency: settings.low_latency,
            resync_interval_secs: settings.resync_interval_secs,
            guest_name,
        })
    }
}

/// 뷰 모델에 함께 실리는 정적 설정
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSettings {
    pub stream_path: String,
    pub low_latency: bool,
    pub resync_interval_secs: Option<u64>,
}

impl From<&Config> for ViewSettings {
    fn from(config: &Config) -> Self {
        Self {
            stream_path: config.stream_path.clone(),
            low_latency: config.low_latency,
            resync_interval_secs: config.resync_interval_secs,
        }
    }
}
