//! 스크린샷 캡처 모델.
//!
//! 캡처 방식(전체 페이지/뷰포트), 폴백 전략, 탐색 결과 항목을 정의한다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::element::ElementSignature;

/// 단일 캡처 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureMode {
    /// 스크롤 영역을 포함한 전체 페이지
    FullPage,
    /// 현재 뷰포트만
    Viewport,
}

/// 캡처 전략: 시도할 캡처 방식의 폴백 체인
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureStrategy {
    /// 전체 페이지만 시도
    FullPage,
    /// 뷰포트만 시도
    Viewport,
    /// 전체 페이지 → 실패 시 뷰포트
    #[default]
    Smart,
}

impl CaptureStrategy {
    /// 순서대로 시도할 캡처 방식
    pub fn chain(&self) -> &'static [CaptureMode] {
        match self {
            Self::FullPage => &[CaptureMode::FullPage],
            Self::Viewport => &[CaptureMode::Viewport],
            Self::Smart => &[CaptureMode::FullPage, CaptureMode::Viewport],
        }
    }
}

/// 캡처된 이미지 (인코딩된 바이트 + 실제 사용된 방식)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    /// 인코딩된 이미지 바이트 (협력자가 반환한 그대로)
    pub bytes: Vec<u8>,
    /// 성공한 캡처 방식
    pub mode: CaptureMode,
}

/// 세션 로그 항목: 선택 시점에 기록된 상호작용
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRecord {
    /// 선택 시각
    pub timestamp: DateTime<Utc>,
    /// 요소 시그니처
    pub signature: ElementSignature,
    /// 사람이 읽는 요소 라벨
    pub label: String,
}

/// 탐색 결과 항목: 캡처 이미지와 직전 상호작용의 쌍
#[derive(Debug, Clone)]
pub struct CaptureResult {
    /// 세션 내 캡처 순번 (0부터)
    pub index: u32,
    /// 캡처 이미지
    pub image: CapturedImage,
    /// 직전 상호작용 (기준 캡처는 None)
    pub interaction: Option<InteractionRecord>,
    /// 캡처 완료 시각
    pub captured_at: DateTime<Utc>,
}

impl CaptureResult {
    /// 기준(초기) 캡처 여부
    pub fn is_baseline(&self) -> bool {
        self.interaction.is_none()
    }

    /// 저장 시 사용할 파일 이름
    ///
    /// - 기준 캡처: `screen_000_initial_full.png`
    /// - 상호작용 캡처: `screen_{index:03}_action_{unix_ts}_full.png`
    pub fn file_name(&self) -> String {
        if self.is_baseline() {
            format!("screen_{:03}_initial_full.png", self.index)
        } else {
            format!(
                "screen_{:03}_action_{}_full.png",
                self.index,
                self.captured_at.timestamp()
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn smart_strategy_falls_back_to_viewport() {
        assert_eq!(
            CaptureStrategy::Smart.chain(),
            &[CaptureMode::FullPage, CaptureMode::Viewport]
        );
        assert_eq!(CaptureStrategy::FullPage.chain(), &[CaptureMode::FullPage]);
        assert_eq!(CaptureStrategy::Viewport.chain(), &[CaptureMode::Viewport]);
    }

    #[test]
    fn file_names_follow_capture_kind() {
        let at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let image = CapturedImage {
            bytes: vec![1, 2, 3],
            mode: CaptureMode::FullPage,
        };
        let baseline = CaptureResult {
            index: 0,
            image: image.clone(),
            interaction: None,
            captured_at: at,
        };
        assert_eq!(baseline.file_name(), "screen_000_initial_full.png");

        let action = CaptureResult {
            index: 7,
            image,
            interaction: Some(InteractionRecord {
                timestamp: at,
                signature: ElementSignature::new("a_Home_0_0"),
                label: "Home".to_string(),
            }),
            captured_at: at,
        };
        assert_eq!(
            action.file_name(),
            format!("screen_007_action_{}_full.png", at.timestamp())
        );
    }
}
