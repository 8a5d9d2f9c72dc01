//! 페이지 캡처 포트.
//!
//! 현재 화면 상태의 스크린샷을 인코딩된 바이트로 반환하는 협력자.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::capture::CaptureMode;

/// 페이지 캡처기: 스크린샷 협력자 인터페이스
#[async_trait]
pub trait PageCapturer: Send + Sync {
    /// 지정 방식으로 현재 화면 캡처 (PNG 등 인코딩된 바이트)
    async fn capture(&self, mode: CaptureMode) -> Result<Vec<u8>, CoreError>;
}
