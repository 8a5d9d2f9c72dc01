//! 캡처 전략 체인.
//!
//! 전략이 정한 캡처 방식을 순서대로 시도해 첫 성공 결과를 쓴다.
//! 예: Smart = 전체 페이지 → 뷰포트

use std::sync::Arc;

use tracing::{debug, warn};

use autodoc_core::error::CoreError;
use autodoc_core::models::capture::{CaptureStrategy, CapturedImage};
use autodoc_core::ports::page_capture::PageCapturer;

/// 전략 기반 캡처기
pub struct ChainedCapturer {
    capturer: Arc<dyn PageCapturer>,
    strategy: CaptureStrategy,
}

impl ChainedCapturer {
    pub fn new(capturer: Arc<dyn PageCapturer>, strategy: CaptureStrategy) -> Self {
        Self { capturer, strategy }
    }

    /// 체인 순서대로 캡처 시도
    ///
    /// 모든 방식이 실패하면 마지막 에러를 담은 `CoreError::Capture`.
    pub async fn capture(&self) -> Result<CapturedImage, CoreError> {
        let mut last_error = None;

        for &mode in self.strategy.chain() {
            match self.capturer.capture(mode).await {
                Ok(bytes) => {
                    debug!(mode = ?mode, size = bytes.len(), "캡처 성공");
                    return Ok(CapturedImage { bytes, mode });
                }
                Err(e) => {
                    warn!(mode = ?mode, error = %e, "캡처 실패, 다음 방식 시도");
                    last_error = Some(e);
                }
            }
        }

        Err(CoreError::Capture(match last_error {
            Some(e) => format!("{:?} 전략의 모든 캡처 방식 실패: {e}", self.strategy),
            None => format!("{:?} 전략에 캡처 방식 없음", self.strategy),
        }))
    }
}
