//! UI 요소 모델.
//!
//! 브라우저 자동화 협력자가 소유하는 DOM 요소를 코어가 참조하는 방식을 정의한다.
//! 코어는 요소 자체를 소유하지 않고 불투명 핸들과 파생 시그니처만 다룬다.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================
// ElementHandle: 불투명 요소 참조
// ============================================================

/// DOM 요소에 대한 불투명 참조 (WebDriver element reference 등)
///
/// 요소의 수명은 브라우저 협력자에 속한다. 코어는 핸들을 통해서만
/// 협력자에게 질의하며, 액션이 끝나면 핸들을 보관하지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(String);

impl ElementHandle {
    /// 협력자가 발급한 참조 ID로 핸들 생성
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// 협력자 측 참조 ID
    pub fn reference(&self) -> &str {
        &self.0
    }
}

// ============================================================
// ElementBounds: 화면상 위치/크기
// ============================================================

/// UI 요소의 경계 영역 (페이지 좌표)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementBounds {
    /// 좌상단 X 좌표
    pub x: i32,
    /// 좌상단 Y 좌표
    pub y: i32,
    /// 너비
    pub width: u32,
    /// 높이
    pub height: u32,
}

impl ElementBounds {
    /// 면적 (너비 × 높이)
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

// ============================================================
// ElementSignature: 방문 여부 판단용 식별자
// ============================================================

/// 요소의 안정적 식별 문자열
///
/// 동일성 비교에만 사용하며, 요소를 다시 찾는 데 쓰지 않는다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementSignature(String);

impl ElementSignature {
    /// 문자열로부터 시그니처 생성
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// 시그니처 문자열
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================
// InteractivePredicate: "상호작용 가능" 판정 규칙
// ============================================================

/// 상호작용 가능한 요소를 고르는 고정 규칙 집합
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractivePredicate {
    /// 대상이 있는 링크
    LinkWithHref,
    /// 비활성화되지 않은 버튼
    EnabledButton,
    /// submit 타입 input
    SubmitInput,
    /// button 타입 input
    ButtonInput,
    /// 명시적 button 역할
    ButtonRole,
    /// 클릭 핸들러가 있는 요소
    ClickHandler,
}

impl InteractivePredicate {
    /// 질의 순서대로 나열한 전체 규칙
    pub const ALL: [InteractivePredicate; 6] = [
        Self::LinkWithHref,
        Self::EnabledButton,
        Self::SubmitInput,
        Self::ButtonInput,
        Self::ButtonRole,
        Self::ClickHandler,
    ];

    /// 규칙에 대응하는 XPath 셀렉터
    pub fn xpath(&self) -> &'static str {
        match self {
            Self::LinkWithHref => "//a[@href]",
            Self::EnabledButton => "//button[not(@disabled)]",
            Self::SubmitInput => "//input[@type='submit']",
            Self::ButtonInput => "//input[@type='button']",
            Self::ButtonRole => "//*[@role='button']",
            Self::ClickHandler => "//*[@onclick]",
        }
    }
}
