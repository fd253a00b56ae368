//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 예약 저장소와 직접 상호작용하는 함수들을 모아둔 모듈입니다.
//! 서비스 계층(services/)은 `ReservationStore` 트레이트를 통해서만 이 모듈을 사용합니다.
//!
//! 각 하위 모듈:
//! - `reservations`: 토큰 → 예약 창 조회, 고객 이름 조회

pub mod reservations;

pub use reservations::*;
