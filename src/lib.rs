//! # camview
//!
//! 접근 토큰 하나로 예약된 시간 동안만 라이브 카메라 영상을 볼 수 있게 해 주는 서버와,
//! 방문객 쪽에서 카운트다운과 플레이어 수명을 관리하는 라이브 세션 엔진입니다.
//!
//! ```text
//! 요청 → SessionResolver(token) → SessionDecision → 페이지에 JSON으로 직렬화
//!      → LiveSessionController(decision) → 1초 틱 → {카운트다운, 진행 막대, 플레이어}
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod live;
pub mod models;
pub mod routes;
pub mod services;
