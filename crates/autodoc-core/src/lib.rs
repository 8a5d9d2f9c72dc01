//! # autodoc-core
//!
//! AutoDoc 도메인 모델, 포트(trait) 정의, 에러 타입, 설정.
//! 비교 엔진(`autodoc-vision`)과 탐색 엔진(`autodoc-explorer`)이 공유하는
//! 핵심 타입과 협력자 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 도메인 데이터 구조체 (변경 영역, 요소 식별, 캡처 결과)
//! - [`ports`]: 브라우저/캡처 협력자 포트 인터페이스 (async_trait)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 생성 시점에 주입되는 설정 구조체

pub mod config;
pub mod error;
pub mod models;
pub mod ports;
