//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 브라우저 자동화/캡처 협력자가 이 trait들을 구현하며,
//! 탐색 제어기는 `Arc<dyn T>`로 주입받는다.
//!
//! 모든 async trait은 `async_trait` 매크로를 사용하여
//! object safety를 보장한다.

pub mod dom_driver;
pub mod page_capture;
