//! # autodoc-explorer
//!
//! 결정적 UI 탐색 크레이트.
//! 페이지의 상호작용 요소를 재현 가능한 순서로 골라 클릭하고, 각 상태를 캡처한다.
//! 파괴적 동작은 피하고, 같은 요소는 한 세션에서 두 번 누르지 않는다.
//!
//! 브라우저와 캡처는 `autodoc-core`의 포트([`DomDriver`], [`PageCapturer`])로만 다룬다.
//!
//! [`DomDriver`]: autodoc_core::ports::dom_driver::DomDriver
//! [`PageCapturer`]: autodoc_core::ports::page_capture::PageCapturer

pub mod candidate;
pub mod capture;
pub mod controller;
pub mod launcher;
pub mod probe;
pub mod safety;
#[cfg(any(test, feature = "test-util"))]
pub mod scripted;
pub mod session;
pub mod signature;

pub use controller::{
    explore, ExplorationController, ExplorationReport, ExplorationState, StopReason,
};
pub use launcher::{launch_first_available, ChainedLauncher};
