//! # 예약(Reservation) 모델 정의
//!
//! 방문객에게 발급된 접근 토큰과, 그 토큰이 가리키는 예약 창(시작~종료)을 다룹니다.
//!
//! ## 데이터 흐름
//! ```text
//! 요청 경로의 토큰 ─ AccessToken::parse() ─→ 저장소 조회 ─→ ReservationRow
//!                                                            │
//!                               ReservationWindow::from_row() (시각 파싱, 필드 검증)
//! ```

use crate::error::AppError;
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use sha2::{Digest, Sha256};

/// 토큰 길이 제한 (포함 범위)
pub const TOKEN_MIN_LEN: usize = 4;
pub const TOKEN_MAX_LEN: usize = 64;

/// 형식 검증을 통과한 접근 토큰
///
/// `^[A-Za-z0-9_-]{4,64}$`를 만족하는 문자열만 이 타입으로 만들 수 있습니다.
/// 저장소 조회 함수들은 `&str` 대신 이 타입을 받으므로,
/// 검증 전의 입력이 DB까지 내려가는 일이 타입 수준에서 막힙니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// 토큰 형식을 검증합니다.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let len = raw.len();
        if !(TOKEN_MIN_LEN..=TOKEN_MAX_LEN).contains(&len) {
            return Err(AppError::Validation(format!(
                "token length {len} outside {TOKEN_MIN_LEN}..={TOKEN_MAX_LEN}"
            )));
        }
        if !raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            return Err(AppError::Validation(
                "token contains characters outside [A-Za-z0-9_-]".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 로그용 지문: SHA-256 앞 12자리 16진수
    ///
    /// 토큰 자체가 접근 권한이므로 원문은 로그에 남기지 않습니다.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..12].to_string()
    }
}

/// 예약 테이블의 한 행 — 저장소가 돌려주는 그대로의 모양입니다.
///
/// 시각 컬럼은 NULL일 수 있으므로 `Option`입니다.
/// 빠진 값을 발견하면 `ReservationWindow::from_row`가 MalformedData로 실패시킵니다.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReservationRow {
    pub id: i64,
    pub token: String,
    /// 예약한 고객 ID (선택)
    pub client_id: Option<i64>,
    /// 설치 지역 로컬 시각 문자열 (예: "2024-01-01 10:00:00")
    pub starts_at: Option<String>,
    pub ends_at: Option<String>,
}

/// 검증과 파싱을 마친 예약 창
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationWindow {
    pub token: String,
    pub client_id: Option<i64>,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

impl ReservationWindow {
    /// 저장소 행을 타입이 있는 예약 창으로 변환합니다.
    ///
    /// ## 에러 (모두 `AppError::MalformedData`)
    /// - `starts_at` / `ends_at`이 NULL
    /// - 시각 문자열을 해석할 수 없음
    /// - 종료가 시작보다 앞섬
    pub fn from_row(row: ReservationRow, zone: FixedOffset) -> Result<Self, AppError> {
        let starts_at = row.starts_at.as_deref().ok_or_else(|| {
            AppError::MalformedData(format!("reservation {} has no starts_at", row.id))
        })?;
        let ends_at = row.ends_at.as_deref().ok_or_else(|| {
            AppError::MalformedData(format!("reservation {} has no ends_at", row.id))
        })?;

        let start = parse_store_timestamp(starts_at, zone).ok_or_else(|| {
            AppError::MalformedData(format!(
                "reservation {} has unparseable starts_at {:?}",
                row.id, starts_at
            ))
        })?;
        let end = parse_store_timestamp(ends_at, zone).ok_or_else(|| {
            AppError::MalformedData(format!(
                "reservation {} has unparseable ends_at {:?}",
                row.id, ends_at
            ))
        })?;

        if end < start {
            return Err(AppError::MalformedData(format!(
                "reservation {} ends before it starts",
                row.id
            )));
        }

        Ok(Self {
            token: row.token,
            client_id: row.client_id,
            start,
            end,
        })
    }
}

/// 저장소의 시각 문자열을 절대 시각으로 해석합니다.
///
/// 지원 형식:
/// - `"2024-01-01 10:00:00"` (DATETIME 스타일, 설치 지역 로컬 시각)
/// - `"2024-01-01 10:00:00.250"` (소수 초)
/// - `"2024-01-01T10:00:00"` (`T` 구분자)
/// - `"2024-01-01T10:00:00-03:00"` (RFC 3339, 오프셋 포함 — 설치 시간대로 변환)
pub fn parse_store_timestamp(raw: &str, zone: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&zone));
    }

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| zone.from_local_datetime(&naive).single())
}
