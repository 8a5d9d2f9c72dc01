//! 스크립트 기반 협력자 (테스트/시뮬레이션용).
//!
//! 실제 브라우저 없이 탐색 엔진을 돌릴 수 있도록 메모리 내 DOM과
//! 캡처기를 제공한다. 요소 핸들은 `e{인덱스}` 형식이다.
//! 크레이트 자체 테스트와 `test-util` 기능에서만 컴파일된다.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use autodoc_core::error::CoreError;
use autodoc_core::models::capture::CaptureMode;
use autodoc_core::models::element::{ElementBounds, ElementHandle, InteractivePredicate};
use autodoc_core::ports::dom_driver::DomDriver;
use autodoc_core::ports::page_capture::PageCapturer;

// ============================================================
// ScriptedElement
// ============================================================

/// 메모리 내 DOM 요소
#[derive(Debug, Clone)]
pub struct ScriptedElement {
    pub tag: String,
    pub text: Option<String>,
    pub attributes: HashMap<String, String>,
    pub bounds: ElementBounds,
    pub displayed: bool,
    pub enabled: bool,
    /// 이 요소를 찾아내는 상호작용 규칙
    pub predicates: Vec<InteractivePredicate>,
    /// 모든 속성 조회 실패
    pub fail_attributes: bool,
    /// 클릭 실패
    pub fail_click: bool,
    /// 클릭 시 DOM에 추가되는 요소
    pub reveals: Vec<ScriptedElement>,
}

impl ScriptedElement {
    /// 버튼 (`//button[not(@disabled)]`로 찾힘), 기본 크기 100x30
    pub fn button(text: &str, x: i32, y: i32) -> Self {
        Self {
            tag: "button".to_string(),
            text: Some(text.to_string()),
            attributes: HashMap::new(),
            bounds: ElementBounds {
                x,
                y,
                width: 100,
                height: 30,
            },
            displayed: true,
            enabled: true,
            predicates: vec![InteractivePredicate::EnabledButton],
            fail_attributes: false,
            fail_click: false,
            reveals: Vec::new(),
        }
    }

    /// 링크 (`//a[@href]`로 찾힘)
    pub fn link(text: &str, href: &str, x: i32, y: i32) -> Self {
        let mut element = Self::button(text, x, y).with_attribute("href", href);
        element.tag = "a".to_string();
        element.predicates = vec![InteractivePredicate::LinkWithHref];
        element
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.bounds.width = width;
        self.bounds.height = height;
        self
    }

    pub fn with_predicates(mut self, predicates: Vec<InteractivePredicate>) -> Self {
        self.predicates = predicates;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_failing_attributes(mut self) -> Self {
        self.fail_attributes = true;
        self
    }

    pub fn with_failing_click(mut self) -> Self {
        self.fail_click = true;
        self
    }

    pub fn revealing(mut self, elements: Vec<ScriptedElement>) -> Self {
        self.reveals = elements;
        self
    }
}

// ============================================================
// ScriptedDom
// ============================================================

/// 메모리 내 DOM 드라이버
pub struct ScriptedDom {
    name: String,
    elements: Mutex<Vec<ScriptedElement>>,
    clicks: Mutex<Vec<String>>,
    failing_queries: HashSet<InteractivePredicate>,
    reads: AtomicUsize,
    scroll_to_top_calls: AtomicUsize,
}

impl ScriptedDom {
    pub fn new(elements: Vec<ScriptedElement>) -> Self {
        Self {
            name: "scripted".to_string(),
            elements: Mutex::new(elements),
            clicks: Mutex::new(Vec::new()),
            failing_queries: HashSet::new(),
            reads: AtomicUsize::new(0),
            scroll_to_top_calls: AtomicUsize::new(0),
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// 지정 규칙의 질의를 실패시킴
    pub fn failing_query(mut self, predicate: InteractivePredicate) -> Self {
        self.failing_queries.insert(predicate);
        self
    }

    /// 클릭된 요소의 텍스트 (클릭 순서)
    pub async fn clicked_texts(&self) -> Vec<String> {
        self.clicks.lock().await.clone()
    }

    /// 텍스트/속성/태그/경계 조회 횟수
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn scroll_to_top_calls(&self) -> usize {
        self.scroll_to_top_calls.load(Ordering::SeqCst)
    }

    async fn element(&self, handle: &ElementHandle) -> Result<ScriptedElement, CoreError> {
        let index = handle
            .reference()
            .strip_prefix('e')
            .and_then(|i| i.parse::<usize>().ok())
            .ok_or_else(|| CoreError::Internal(format!("잘못된 핸들: {}", handle.reference())))?;
        self.elements
            .lock()
            .await
            .get(index)
            .cloned()
            .ok_or_else(|| CoreError::Internal(format!("사라진 요소: {}", handle.reference())))
    }

    async fn readable(
        &self,
        handle: &ElementHandle,
        what: &str,
    ) -> Result<ScriptedElement, CoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let element = self.element(handle).await?;
        if element.fail_attributes {
            return Err(CoreError::attribute(what, "stale element reference"));
        }
        Ok(element)
    }
}

#[async_trait]
impl DomDriver for ScriptedDom {
    async fn find_elements(
        &self,
        predicate: InteractivePredicate,
    ) -> Result<Vec<ElementHandle>, CoreError> {
        if self.failing_queries.contains(&predicate) {
            return Err(CoreError::Internal(format!(
                "질의 실패: {}",
                predicate.xpath()
            )));
        }
        let elements = self.elements.lock().await;
        Ok(elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.predicates.contains(&predicate))
            .map(|(i, _)| ElementHandle::new(format!("e{i}")))
            .collect())
    }

    async fn is_displayed(&self, handle: &ElementHandle) -> Result<bool, CoreError> {
        Ok(self.element(handle).await?.displayed)
    }

    async fn is_enabled(&self, handle: &ElementHandle) -> Result<bool, CoreError> {
        Ok(self.element(handle).await?.enabled)
    }

    async fn tag_name(&self, handle: &ElementHandle) -> Result<String, CoreError> {
        Ok(self.readable(handle, "tagName").await?.tag)
    }

    async fn text(&self, handle: &ElementHandle) -> Result<Option<String>, CoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.element(handle).await?.text)
    }

    async fn attribute(
        &self,
        handle: &ElementHandle,
        name: &str,
    ) -> Result<Option<String>, CoreError> {
        Ok(self
            .readable(handle, name)
            .await?
            .attributes
            .get(name)
            .cloned())
    }

    async fn bounding_box(&self, handle: &ElementHandle) -> Result<ElementBounds, CoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.element(handle).await?.bounds)
    }

    async fn scroll_into_view(&self, handle: &ElementHandle) -> Result<(), CoreError> {
        self.element(handle).await.map(|_| ())
    }

    async fn click(&self, handle: &ElementHandle) -> Result<(), CoreError> {
        let element = self.element(handle).await?;
        if element.fail_click {
            return Err(CoreError::Action(format!(
                "요소가 클릭을 가로막힘: {}",
                handle.reference()
            )));
        }

        self.clicks
            .lock()
            .await
            .push(element.text.clone().unwrap_or_default());

        if !element.reveals.is_empty() {
            let mut elements = self.elements.lock().await;
            elements.extend(element.reveals);
            // 한 번만 추가
            if let Some(index) = handle
                .reference()
                .strip_prefix('e')
                .and_then(|i| i.parse::<usize>().ok())
            {
                if let Some(clicked) = elements.get_mut(index) {
                    clicked.reveals.clear();
                }
            }
        }
        Ok(())
    }

    async fn scroll_to_top(&self) -> Result<(), CoreError> {
        self.scroll_to_top_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================
// ScriptedCapturer
// ============================================================

/// 메모리 내 캡처기: 호출마다 서로 다른 바이트를 돌려준다
#[derive(Default)]
pub struct ScriptedCapturer {
    failing_modes: HashSet<CaptureMode>,
    failing_calls: HashSet<usize>,
    calls: AtomicUsize,
    requests: Mutex<Vec<CaptureMode>>,
}

impl ScriptedCapturer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 지정 방식은 항상 실패
    pub fn failing_mode(mut self, mode: CaptureMode) -> Self {
        self.failing_modes.insert(mode);
        self
    }

    /// n번째(0부터) 호출은 방식과 무관하게 실패
    pub fn failing_call(mut self, call: usize) -> Self {
        self.failing_calls.insert(call);
        self
    }

    /// 요청된 캡처 방식 기록 (호출 순서)
    pub async fn requests(&self) -> Vec<CaptureMode> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl PageCapturer for ScriptedCapturer {
    async fn capture(&self, mode: CaptureMode) -> Result<Vec<u8>, CoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(mode);

        if self.failing_calls.contains(&call) || self.failing_modes.contains(&mode) {
            return Err(CoreError::Capture(format!("{mode:?} 캡처 실패 (호출 {call})")));
        }
        Ok(format!("capture-{call}").into_bytes())
    }
}
