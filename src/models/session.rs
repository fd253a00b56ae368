//! # 시청 세션 모델 정의
//!
//! 예약 창과 "현재 시각"으로부터 접근 판정(`SessionDecision`)을 계산하고,
//! 그 판정을 페이지로 넘기는 뷰 모델(`WatchView`)을 정의합니다.
//!
//! ## 세션 흐름
//! 1. 서버가 요청 시점에 한 번 `SessionDecision::compute()`로 판정
//! 2. 판정을 `WatchView`에 담아 JSON으로 페이지에 직렬화
//! 3. 클라이언트 엔진(`live` 모듈)이 이 스냅샷에서 카운트다운을 시작
//!
//! 판정은 만들어진 뒤 절대 바뀌지 않습니다. 클라이언트는 값을 읽어 상태를 파생할 뿐
//! 서버로 되돌려 쓰지 않습니다.

use chrono::{DateTime, FixedOffset, SubsecRound};
use serde::{Deserialize, Serialize};

/// 경과/전체 비율을 0~100 사이 정수 퍼센트로 반올림합니다.
///
/// `total`이 0 이하로 들어와도 1로 취급하므로 0으로 나누는 일이 없습니다.
pub fn progress_percent(elapsed: i64, total: i64) -> u8 {
    let total = total.max(1) as f64;
    let ratio = (elapsed as f64 / total * 100.0).clamp(0.0, 100.0);
    ratio.round() as u8
}

/// 한 요청에 대한 접근 판정 — 생성 후 불변입니다.
///
/// | 필드 | 계산 |
/// |------|------|
/// | `active` | `start ≤ now ≤ end` |
/// | `total_seconds` | `max(1, end − start)` |
/// | `remaining_seconds` | 활성이면 `max(0, end − now)`, 아니면 0 |
/// | `elapsed_seconds` | 활성이면 `max(0, now − start)`, 아니면 `total_seconds` |
/// | `initial_progress_percent` | `round(clamp(elapsed / total × 100, 0, 100))` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDecision {
    pub active: bool,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub total_seconds: i64,
    pub remaining_seconds: i64,
    pub elapsed_seconds: i64,
    pub initial_progress_percent: u8,
}

impl SessionDecision {
    /// `(start, end, now)`만으로 판정을 계산하는 순수 함수입니다.
    ///
    /// 저장소나 시계에 의존하지 않으므로 어떤 시각 조합이든 단위 테스트할 수 있습니다.
    ///
    /// 세 시각 모두 먼저 초 단위로 잘라냅니다.
    /// 차이를 구한 뒤에 따로따로 자르면 `elapsed + remaining`이 `total`보다 1 작아질 수 있습니다.
    pub fn compute(
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let start = start.trunc_subsecs(0);
        let end = end.trunc_subsecs(0);
        let now = now.trunc_subsecs(0);

        let active = start <= now && now <= end;
        let total_seconds = (end - start).num_seconds().max(1);

        let (remaining_seconds, elapsed_seconds) = if active {
            (
                (end - now).num_seconds().max(0),
                (now - start).num_seconds().max(0),
            )
        } else {
            (0, total_seconds)
        };

        Self {
            active,
            start,
            end,
            total_seconds,
            remaining_seconds,
            elapsed_seconds,
            initial_progress_percent: progress_percent(elapsed_seconds, total_seconds),
        }
    }
}

/// 페이지 경계를 넘는 뷰 모델
///
/// 서버가 페이지 로드 시 딱 한 번 JSON으로 직렬화하고,
/// 클라이언트 엔진은 마크업을 긁는 대신 이 구조체를 역직렬화해서 사용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchView {
    pub decision: SessionDecision,
    /// HLS 매니페스트 경로 (예: "/hls/cam1.m3u8")
    pub stream_path: String,
    /// 적응형 플레이어에 저지연 모드를 권장할지 여부
    pub low_latency: bool,
    /// 카운트다운 재동기화 주기(초). None이면 재동기화하지 않습니다.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resync_interval_secs: Option<u64>,
    /// 예약 고객 이름 — 환영 문구용 (선택)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
}
