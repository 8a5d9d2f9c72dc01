//! 변경 영역 모델.
//!
//! SSIM 비유사도 맵에서 추출한 변경 영역. 리포트/AI 주석 협력자가 소비한다.

use serde::{Deserialize, Serialize};

/// 변경 영역 심각도 (면적 기준)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionSeverity {
    Minor,
    Major,
}

/// 변경 영역 (축 정렬 바운딩 박스)
///
/// 불변식: `area >= area_floor`. 그보다 작으면 추출 단계에서 버려진다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// 바운딩 박스 면적 (width × height)
    pub area: u64,
    pub severity: RegionSeverity,
}

impl Region {
    /// 리포트용 한 줄 설명
    pub fn description(&self) -> String {
        format!("Detected change in region area {}", self.area)
    }
}
