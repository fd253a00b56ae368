//! # 서비스 계층
//!
//! 라우트 핸들러와 저장소 사이의 도메인 로직입니다.
//! - `resolver`: 토큰 → 접근 판정(SessionResolver)과 뷰 모델 조립
//! - `page`: 뷰 모델을 HTML 페이지로 직렬화

pub mod page;
pub mod resolver;

pub use resolver::{SessionResolver, ViewSettings};
