//! 애플리케이션 설정 구조체.
//!
//! 비교 임계값, 안전 필터 금지어, 탐색 예산, 허용 오차 판정 등
//! 모듈 전역 상수 대신 생성 시점에 주입되는 설정값을 정의한다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::CoreError;
use crate::models::capture::CaptureStrategy;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// 이미지 비교(SSIM/영역 추출) 설정
    #[serde(default)]
    pub comparison: ComparisonConfig,
    /// 요소 안전 필터 설정
    #[serde(default)]
    pub safety: SafetyConfig,
    /// UI 탐색 설정
    #[serde(default)]
    pub exploration: ExplorationConfig,
    /// 허용 오차 판정 설정 (외부 정책 레이어)
    #[serde(default)]
    pub verdict: VerdictConfig,
}

// ============================================================
// 비교 설정
// ============================================================

/// 비교 설정: SSIM 윈도우와 변경 영역 추출 임계값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    /// 영역 최소 면적 (미만이면 노이즈로 버림)
    #[serde(default = "default_area_floor")]
    pub area_floor: u32,
    /// 이 면적을 초과하면 major
    #[serde(default = "default_major_area_cutoff")]
    pub major_area_cutoff: u32,
    /// 8비트 비유사도 이진화 임계값 (초과 시 전경)
    #[serde(default = "default_dissimilarity_threshold")]
    pub dissimilarity_threshold: u8,
    /// 가우시안 윈도우 크기 (홀수)
    #[serde(default = "default_gaussian_window")]
    pub gaussian_window: usize,
    /// 가우시안 표준편차
    #[serde(default = "default_gaussian_sigma")]
    pub gaussian_sigma: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            area_floor: default_area_floor(),
            major_area_cutoff: default_major_area_cutoff(),
            dissimilarity_threshold: default_dissimilarity_threshold(),
            gaussian_window: default_gaussian_window(),
            gaussian_sigma: default_gaussian_sigma(),
        }
    }
}

// ============================================================
// 안전 필터 설정
// ============================================================

/// 안전 필터 설정: 파괴적 액션 금지어와 위험 역할
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyConfig {
    /// 텍스트에 포함되면 unsafe인 단어 (대소문자 무시)
    #[serde(default = "default_denylist_words")]
    pub denylist_words: Vec<String>,
    /// unsafe로 간주하는 접근성 역할
    #[serde(default = "default_unsafe_roles")]
    pub unsafe_roles: Vec<String>,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            denylist_words: default_denylist_words(),
            unsafe_roles: default_unsafe_roles(),
        }
    }
}

// ============================================================
// 탐색 설정
// ============================================================

/// 탐색 설정: 캡처 예산, 캡처 전략, 대기 시간, 정렬/시그니처 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationConfig {
    /// 세션당 최대 캡처 수 (기준 캡처 포함)
    #[serde(default = "default_max_captures")]
    pub max_captures: u32,
    /// 캡처 폴백 전략
    #[serde(default)]
    pub capture_strategy: CaptureStrategy,
    /// scroll-into-view 후 대기 (밀리초)
    #[serde(default = "default_scroll_settle_ms")]
    pub scroll_settle_ms: u64,
    /// 클릭 후 화면 안정화 대기 (밀리초)
    #[serde(default = "default_action_settle_ms")]
    pub action_settle_ms: u64,
    /// 정렬용 행 버킷 크기 (픽셀)
    #[serde(default = "default_row_bucket_px")]
    pub row_bucket_px: i32,
    /// 시그니처에 포함할 텍스트 길이 (문자 수)
    #[serde(default = "default_signature_text_len")]
    pub signature_text_len: usize,
    /// 로그 라벨 텍스트 길이 (문자 수)
    #[serde(default = "default_label_text_len")]
    pub label_text_len: usize,
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            max_captures: default_max_captures(),
            capture_strategy: CaptureStrategy::default(),
            scroll_settle_ms: default_scroll_settle_ms(),
            action_settle_ms: default_action_settle_ms(),
            row_bucket_px: default_row_bucket_px(),
            signature_text_len: default_signature_text_len(),
            label_text_len: default_label_text_len(),
        }
    }
}

impl ExplorationConfig {
    /// 스크롤 대기 시간을 Duration으로 반환
    pub fn scroll_settle(&self) -> Duration {
        Duration::from_millis(self.scroll_settle_ms)
    }

    /// 클릭 후 대기 시간을 Duration으로 반환
    pub fn action_settle(&self) -> Duration {
        Duration::from_millis(self.action_settle_ms)
    }
}

// ============================================================
// 허용 오차 판정 설정
// ============================================================

/// 허용 오차 판정 설정: 프로젝트별 유사도 허용치
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictConfig {
    /// 이 유사도(%) 이상이면 matched
    #[serde(default = "default_tolerance_percent")]
    pub tolerance_percent: f64,
    /// 이 유사도(%) 미만이면 major 변경
    #[serde(default = "default_major_below_percent")]
    pub major_below_percent: f64,
}

impl Default for VerdictConfig {
    fn default() -> Self {
        Self {
            tolerance_percent: default_tolerance_percent(),
            major_below_percent: default_major_below_percent(),
        }
    }
}

// ============================================================
// AppConfig impl
// ============================================================

impl AppConfig {
    /// 기본 설정값 반환
    pub fn default_config() -> Self {
        Self::default()
    }

    /// JSON 설정 파일 읽기 (읽기 전용, 유효성 검증 포함)
    ///
    /// 빠진 필드는 기본값으로 채운다. 파일이 없으면 에러이며 새로 만들지 않는다.
    pub fn from_json_path(path: &Path) -> Result<Self, CoreError> {
        let content = fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("설정 파일 읽기 실패 ({}): {}", path.display(), e))
        })?;
        let config: AppConfig = serde_json::from_str(&content).map_err(|e| {
            CoreError::Config(format!("설정 파일 파싱 실패 ({}): {}", path.display(), e))
        })?;
        config.validate()?;

        debug!("설정 파일 로드 완료: {}", path.display());
        Ok(config)
    }

    /// 설정값 유효성 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        let cmp = &self.comparison;
        if cmp.gaussian_window == 0 || cmp.gaussian_window % 2 == 0 {
            return Err(invalid(
                "comparison.gaussian_window",
                format!("홀수 양수여야 함 (현재 {})", cmp.gaussian_window),
            ));
        }
        if cmp.gaussian_sigma.is_nan() || cmp.gaussian_sigma <= 0.0 {
            return Err(invalid(
                "comparison.gaussian_sigma",
                format!("양수여야 함 (현재 {})", cmp.gaussian_sigma),
            ));
        }
        if cmp.major_area_cutoff < cmp.area_floor {
            return Err(invalid(
                "comparison.major_area_cutoff",
                format!(
                    "area_floor({}) 이상이어야 함 (현재 {})",
                    cmp.area_floor, cmp.major_area_cutoff
                ),
            ));
        }

        let exp = &self.exploration;
        if exp.row_bucket_px <= 0 {
            return Err(invalid(
                "exploration.row_bucket_px",
                format!("양수여야 함 (현재 {})", exp.row_bucket_px),
            ));
        }

        let verdict = &self.verdict;
        if !(0.0..=100.0).contains(&verdict.tolerance_percent) {
            return Err(invalid(
                "verdict.tolerance_percent",
                format!("0~100 범위여야 함 (현재 {})", verdict.tolerance_percent),
            ));
        }
        if !(0.0..=100.0).contains(&verdict.major_below_percent) {
            return Err(invalid(
                "verdict.major_below_percent",
                format!("0~100 범위여야 함 (현재 {})", verdict.major_below_percent),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &str, message: String) -> CoreError {
    CoreError::Validation {
        field: field.to_string(),
        message,
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_area_floor() -> u32 {
    50
}
fn default_major_area_cutoff() -> u32 {
    1_000
}
fn default_dissimilarity_threshold() -> u8 {
    30
}
fn default_gaussian_window() -> usize {
    11
}
fn default_gaussian_sigma() -> f64 {
    1.5
}
fn default_denylist_words() -> Vec<String> {
    [
        "logout", "sign out", "delete", "remove", "exit", "cancel", "close", "back",
    ]
    .iter()
    .map(|w| w.to_string())
    .collect()
}
fn default_unsafe_roles() -> Vec<String> {
    vec!["alertdialog".to_string(), "dialog".to_string()]
}
fn default_max_captures() -> u32 {
    5
}
fn default_scroll_settle_ms() -> u64 {
    500
}
fn default_action_settle_ms() -> u64 {
    3_000
}
fn default_row_bucket_px() -> i32 {
    100
}
fn default_signature_text_len() -> usize {
    30
}
fn default_label_text_len() -> usize {
    50
}
fn default_tolerance_percent() -> f64 {
    98.0
}
fn default_major_below_percent() -> f64 {
    90.0
}
