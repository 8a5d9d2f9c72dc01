//! DOM 자동화 드라이버 포트.
//!
//! 브라우저 자동화 협력자(WebDriver, CDP 등)가 구현하는 인터페이스.
//! 모든 호출은 협력자가 정한 타임아웃을 갖는 블로킹 지점으로 취급된다.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::CoreError;
use crate::models::element::{ElementBounds, ElementHandle, InteractivePredicate};

/// DOM 드라이버: 요소 열거/질의/조작 인터페이스
///
/// 구현체: 외부 브라우저 어댑터, `ScriptedDom` (테스트/시뮬레이션용)
#[async_trait]
pub trait DomDriver: Send + Sync {
    /// 규칙 하나에 해당하는 요소 핸들 조회
    async fn find_elements(
        &self,
        predicate: InteractivePredicate,
    ) -> Result<Vec<ElementHandle>, CoreError>;

    /// 전체 상호작용 규칙으로 요소 열거
    ///
    /// 규칙 순서대로 질의하여 이어 붙인다. 질의가 실패한 규칙은 건너뛴다.
    async fn enumerate_interactive(&self) -> Vec<ElementHandle> {
        let mut handles = Vec::new();
        for predicate in InteractivePredicate::ALL {
            match self.find_elements(predicate).await {
                Ok(found) => handles.extend(found),
                Err(e) => {
                    debug!(selector = predicate.xpath(), error = %e, "셀렉터 질의 실패, 건너뜀");
                }
            }
        }
        handles
    }

    /// 화면에 표시 중인지
    async fn is_displayed(&self, handle: &ElementHandle) -> Result<bool, CoreError>;

    /// 활성화 상태인지
    async fn is_enabled(&self, handle: &ElementHandle) -> Result<bool, CoreError>;

    /// 태그 이름 (예: "button", "a")
    async fn tag_name(&self, handle: &ElementHandle) -> Result<String, CoreError>;

    /// 보이는 텍스트 (없으면 None)
    async fn text(&self, handle: &ElementHandle) -> Result<Option<String>, CoreError>;

    /// 속성값 (없으면 None)
    async fn attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, CoreError>;

    /// 화면상 경계 영역
    async fn bounding_box(&self, handle: &ElementHandle) -> Result<ElementBounds, CoreError>;

    /// 요소가 보이도록 스크롤
    async fn scroll_into_view(&self, handle: &ElementHandle) -> Result<(), CoreError>;

    /// 요소 클릭
    async fn click(&self, handle: &ElementHandle) -> Result<(), CoreError>;

    /// 페이지 최상단으로 스크롤 (기본: 아무것도 하지 않음)
    async fn scroll_to_top(&self) -> Result<(), CoreError> {
        Ok(())
    }

    /// 드라이버 이름 (예: "edge", "chrome")
    fn name(&self) -> &str;
}

/// 드라이버 기동기: 브라우저 세션을 시작하여 드라이버를 반환
#[async_trait]
pub trait DriverLauncher: Send + Sync {
    /// 드라이버 기동
    async fn launch(&self) -> Result<Arc<dyn DomDriver>, CoreError>;

    /// 기동기 이름 (예: "edge", "chrome")
    fn name(&self) -> &str;
}
