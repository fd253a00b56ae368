//! # 라이브 세션 엔진
//!
//! 페이지가 로드된 뒤 방문객 쪽에서 동작하는 부분입니다.
//! 서버가 넘겨준 `SessionDecision` 스냅샷만을 입력으로 받으며,
//! 세션 도중에는 서버에 다시 묻지 않습니다 (재동기화를 켠 경우 제외).
//!
//! 각 하위 모듈:
//! - `countdown`: 남은 시간 표시 형식과 카운트다운 상태
//! - `player`: 플레이어·화면·타이머 트레이트와 재생 오류 분류
//! - `controller`: 상태 기계 (`Idle` / `Playing` / `Recovering` / `Ended`)
//! - `runner`: 타이머와 이벤트 채널로 컨트롤러를 구동하는 이벤트 루프

pub mod controller;
pub mod countdown;
pub mod player;
pub mod runner;

pub use controller::{EndReason, LiveSessionController};
pub use countdown::{format_countdown, CountdownState, Phase};
pub use player::{
    ErrorClass, Notice, PlaybackError, PlaybackSupport, Player, Recovery, SessionView, TickSource,
};
pub use runner::{drive, IntervalTicks, SessionEvent};
