//! # 플레이어·화면·타이머 경계
//!
//! 컨트롤러가 바깥 세계와 만나는 세 개의 트레이트와 재생 오류 분류를 정의합니다.
//!
//! - `Player`: HLS 스트리밍 플레이어 (적응형 또는 네이티브 재생)
//! - `SessionView`: 카운트다운 텍스트, 진행 막대, 안내 메시지를 그리는 화면
//! - `TickSource`: 1초 간격 반복 타이머
//!
//! 실제 런타임에서는 브라우저/플레이어 바인딩이 이 트레이트들을 구현하고,
//! 테스트에서는 호출을 기록하는 가짜 구현을 주입합니다.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// 카운트다운 틱 주기
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// 런타임이 매니페스트를 재생할 수 있는 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackSupport {
    /// 적응형 스트리밍 라이브러리 사용 가능
    Adaptive,
    /// 런타임이 HLS 매니페스트를 직접 재생
    Native,
    /// 둘 다 불가 — 재생을 시도하지 않습니다
    Unsupported,
}

/// 플레이어가 보고하는 오류 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Network,
    Media,
    Other,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorClass::Network => "network",
            ErrorClass::Media => "media",
            ErrorClass::Other => "other",
        })
    }
}

/// 플레이어가 보고한 재생 오류
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{class} playback error (fatal: {fatal}): {detail}")]
pub struct PlaybackError {
    pub class: ErrorClass,
    /// 플레이어 스스로 계속할 수 없는지 여부
    pub fatal: bool,
    pub detail: String,
}

/// 오류 하나에 대해 컨트롤러가 취할 조치
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// 비치명적 — 로그만 남김
    Ignore,
    /// 같은 소스 경로에서 다시 로드
    ReloadSource,
    /// 플레이어 내부 미디어 오류 복구
    RecoverMedia,
    /// 복구 불가 — 세션 종료
    Terminate,
}

impl PlaybackError {
    pub fn new(class: ErrorClass, fatal: bool, detail: impl Into<String>) -> Self {
        Self {
            class,
            fatal,
            detail: detail.into(),
        }
    }

    /// | 종류 | 치명적 | 조치 |
    /// |------|--------|------|
    /// | Network | 예 | ReloadSource |
    /// | Media | 예 | RecoverMedia |
    /// | Other | 예 | Terminate |
    /// | 모든 종류 | 아니오 | Ignore |
    pub fn recovery(&self) -> Recovery {
        match (self.fatal, self.class) {
            (false, _) => Recovery::Ignore,
            (true, ErrorClass::Network) => Recovery::ReloadSource,
            (true, ErrorClass::Media) => Recovery::RecoverMedia,
            (true, ErrorClass::Other) => Recovery::Terminate,
        }
    }
}

/// 스트리밍 플레이어
///
/// 복구 동작(`reload_source`, `recover_media_error`)이 즉시 실패하면
/// 컨트롤러는 그 오류를 치명적 오류로 보고 세션을 종료합니다.
pub trait Player {
    fn support(&self) -> PlaybackSupport;
    fn load(&mut self, source: &str) -> Result<(), PlaybackError>;
    fn reload_source(&mut self, source: &str) -> Result<(), PlaybackError>;
    fn recover_media_error(&mut self) -> Result<(), PlaybackError>;
    /// 재생을 멈추고 소스를 비우고 자원을 해제합니다.
    fn release(&mut self);
}

/// 화면에 표시되는 안내 메시지
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// 런타임이 HLS를 재생할 수 없음
    FormatUnsupported,
    /// 예약 시간이 끝남 (정상 종료, 취소 포함)
    SessionFinished,
    /// 세션 도중 복구할 수 없는 재생 오류
    PlaybackEnded,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::FormatUnsupported => "Your browser cannot play this live stream.",
            Notice::SessionFinished => "Your viewing session has finished.",
            Notice::PlaybackEnded => "Playback ended unexpectedly.",
        }
    }
}

pub trait SessionView {
    fn render_countdown(&mut self, text: &str);
    fn render_progress(&mut self, percent: u8);
    fn render_notice(&mut self, notice: Notice);
}

/// 반복 타이머
pub trait TickSource {
    fn start(&mut self, period: Duration);
    fn cancel(&mut self);
}
