//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `reservation`: 접근 토큰, 저장소 행, 예약 창
//! - `session`: 접근 판정과 페이지 뷰 모델
//!
//! `pub use X::*;`로 재공개하여 `crate::models::SessionDecision`처럼 짧게 접근합니다.

pub mod reservation;
pub mod session;

pub use reservation::*;
pub use session::*;
