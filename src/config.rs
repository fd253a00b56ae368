//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: 예약 저장소(SQLite) 경로
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `SITE_UTC_OFFSET`: 설치 지역의 시간대 오프셋 (예약 시각과 "현재"에 모두 적용)
//! - `STREAM_PATH`: 미디어 서버가 제공하는 HLS 매니페스트 경로
//! - `HLS_LOW_LATENCY`: 플레이어에 저지연 모드를 권장할지 여부
//! - `COUNTDOWN_RESYNC_SECS`: 클라이언트 카운트다운 재동기화 주기 (없으면 재동기화 안 함)
//! - `STATIC_DIR`: 배포 환경이 채우는 정적 파일 디렉토리 (있을 때만 /static으로 서빙)

use chrono::FixedOffset;
use std::env;
use thiserror::Error;

/// 설정을 읽는 도중 발생하는 에러
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 필수 환경변수가 없음
    #[error("missing environment variable: {0}")]
    Missing(#[from] env::VarError),

    /// 값은 있지만 해석할 수 없음
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 파일 경로 (예: "sqlite:data/camview.db")
    pub database_url: String,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 3000)
    pub port: u16,
    /// 설치 지역의 고정 시간대 (기본값: -03:00, 부에노스아이레스)
    ///
    /// 저장된 예약 시각과 "현재" 모두 이 시간대로 해석합니다.
    pub site_offset: FixedOffset,
    /// HLS 매니페스트 경로 (기본값: "/hls/cam1.m3u8")
    pub stream_path: String,
    /// 플레이어 저지연 모드 권장 여부 (기본값: true)
    pub low_latency: bool,
    /// 카운트다운 재동기화 주기(초). None이면 페이지 로드 시점의 스냅샷만 사용합니다.
    pub resync_interval_secs: Option<u64>,
    /// 정적 파일 디렉토리 (기본값: "public")
    pub static_dir: String,
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// # 에러
    /// `DATABASE_URL`은 필수이며, 없으면 에러가 발생합니다.
    /// 시간대 오프셋이나 재동기화 주기처럼 잘못 읽으면 동작이 달라지는 값은
    /// 기본값으로 조용히 대체하지 않고 에러를 반환합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        let offset_raw = env::var("SITE_UTC_OFFSET").unwrap_or_else(|_| "-03:00".to_string());
        let site_offset = parse_utc_offset(&offset_raw).ok_or(ConfigError::Invalid {
            name: "SITE_UTC_OFFSET",
            value: offset_raw.clone(),
        })?;

        // 빈 문자열이나 0은 "재동기화 없음"으로 취급합니다.
        let resync_interval_secs = match env::var("COUNTDOWN_RESYNC_SECS") {
            Ok(raw) if raw.trim().is_empty() => None,
            Ok(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: "COUNTDOWN_RESYNC_SECS",
                    value: raw.clone(),
                })?;
                (secs > 0).then_some(secs)
            }
            Err(_) => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL")?, // 필수: 없으면 에러
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            site_offset,
            stream_path: env::var("STREAM_PATH").unwrap_or_else(|_| "/hls/cam1.m3u8".to_string()),
            low_latency: env::var("HLS_LOW_LATENCY")
                .map(|v| !matches!(v.trim(), "0" | "false" | "no" | "off"))
                .unwrap_or(true),
            resync_interval_secs,
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "public".to_string()),
        })
    }
}

/// `"+HH:MM"`, `"-HH:MM"`, `"Z"` 형식의 오프셋을 해석합니다.
///
/// `"-03:00"` → UTC-3. 범위를 벗어나면 None.
pub fn parse_utc_offset(raw: &str) -> Option<FixedOffset> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
