//! 허용 오차 기반 판정.
//!
//! 비교 점수를 프로젝트별 허용 오차(%)와 대조하는 정책 계층.
//! 영역 추출의 면적 기반 심각도(`Region.severity`)와는 별개이며 그것을 바꾸지 않는다.

use serde::{Deserialize, Serialize};

use autodoc_core::config::VerdictConfig;

/// 비교 판정 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    /// 허용 오차 이내
    Matched,
    /// 허용 오차 초과
    Changed,
}

/// 변경 심각도 (유사도 % 기준)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeSeverity {
    Minor,
    Major,
}

/// 판정 결과
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// 유사도 (0.0 ~ 100.0)
    pub similarity_percent: f64,
    pub status: ComparisonStatus,
    pub change_severity: Option<ChangeSeverity>,
}

impl Verdict {
    /// SSIM 점수(0~1)를 허용 오차 설정으로 판정
    pub fn evaluate(score: f64, config: &VerdictConfig) -> Self {
        let similarity_percent = score * 100.0;

        let status = if similarity_percent >= config.tolerance_percent {
            ComparisonStatus::Matched
        } else {
            ComparisonStatus::Changed
        };

        let change_severity = if similarity_percent < config.major_below_percent {
            Some(ChangeSeverity::Major)
        } else if similarity_percent < config.tolerance_percent {
            Some(ChangeSeverity::Minor)
        } else {
            None
        };

        Self {
            similarity_percent,
            status,
            change_severity,
        }
    }

    pub fn is_match(&self) -> bool {
        self.status == ComparisonStatus::Matched
    }
}
