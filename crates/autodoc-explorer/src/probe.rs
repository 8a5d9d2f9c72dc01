//! 요소 속성 지연 조회.
//!
//! 한 번의 스캔 동안 요소 하나에 대해 협력자 호출을 최소화한다.
//! 값은 처음 필요할 때 읽고 캐시하며, 우선순위 체인은 앞에서 값을 찾으면
//! 뒤의 속성을 읽지 않는다. 빈 문자열은 값 없음으로 취급한다.

use std::collections::HashMap;

use autodoc_core::error::CoreError;
use autodoc_core::models::element::{ElementBounds, ElementHandle};
use autodoc_core::ports::dom_driver::DomDriver;

/// 시그니처 계산에 필요한 요소 사실
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementFacts {
    /// 태그 이름
    pub tag: String,
    /// 텍스트 → aria-label → name → id → "element" 순으로 고른 텍스트
    pub chosen_text: String,
    /// 접근성 역할 (없으면 None)
    pub role: Option<String>,
    /// 화면상 경계 영역
    pub bounds: ElementBounds,
}

/// 요소 하나에 대한 지연 조회기
pub struct ElementProbe<'a> {
    driver: &'a dyn DomDriver,
    handle: &'a ElementHandle,
    text: Option<Option<String>>,
    attributes: HashMap<&'static str, Option<String>>,
    tag: Option<String>,
    bounds: Option<ElementBounds>,
}

impl<'a> ElementProbe<'a> {
    pub fn new(driver: &'a dyn DomDriver, handle: &'a ElementHandle) -> Self {
        Self {
            driver,
            handle,
            text: None,
            attributes: HashMap::new(),
            tag: None,
            bounds: None,
        }
    }

    pub fn handle(&self) -> &ElementHandle {
        self.handle
    }

    /// 앞뒤 공백을 제거한 보이는 텍스트 (비어 있으면 None)
    pub async fn text(&mut self) -> Result<Option<String>, CoreError> {
        if let Some(cached) = &self.text {
            return Ok(cached.clone());
        }
        let raw = self
            .driver
            .text(self.handle)
            .await
            .map_err(|e| CoreError::attribute("text", e.to_string()))?;
        let value = non_empty(raw.map(|t| t.trim().to_string()));
        self.text = Some(value.clone());
        Ok(value)
    }

    /// 속성값 (비어 있으면 None)
    pub async fn attribute(&mut self, name: &'static str) -> Result<Option<String>, CoreError> {
        if let Some(cached) = self.attributes.get(name) {
            return Ok(cached.clone());
        }
        let raw = self
            .driver
            .attribute(self.handle, name)
            .await
            .map_err(|e| CoreError::attribute(name, e.to_string()))?;
        let value = non_empty(raw);
        self.attributes.insert(name, value.clone());
        Ok(value)
    }

    pub async fn tag(&mut self) -> Result<String, CoreError> {
        if let Some(tag) = &self.tag {
            return Ok(tag.clone());
        }
        let tag = self
            .driver
            .tag_name(self.handle)
            .await
            .map_err(|e| CoreError::attribute("tagName", e.to_string()))?;
        self.tag = Some(tag.clone());
        Ok(tag)
    }

    pub async fn bounds(&mut self) -> Result<ElementBounds, CoreError> {
        if let Some(bounds) = self.bounds {
            return Ok(bounds);
        }
        let bounds = self
            .driver
            .bounding_box(self.handle)
            .await
            .map_err(|e| CoreError::attribute("boundingBox", e.to_string()))?;
        self.bounds = Some(bounds);
        Ok(bounds)
    }

    /// 안전 판정용 텍스트: 텍스트 → aria-label → name → ""
    pub async fn safety_text(&mut self) -> Result<String, CoreError> {
        if let Some(text) = self.text().await? {
            return Ok(text);
        }
        if let Some(label) = self.attribute("aria-label").await? {
            return Ok(label);
        }
        Ok(self.attribute("name").await?.unwrap_or_default())
    }

    /// 시그니처용 텍스트: 텍스트 → aria-label → name → id → "element"
    pub async fn identity_text(&mut self) -> Result<String, CoreError> {
        if let Some(text) = self.text().await? {
            return Ok(text);
        }
        for name in ["aria-label", "name", "id"] {
            if let Some(value) = self.attribute(name).await? {
                return Ok(value);
            }
        }
        Ok("element".to_string())
    }

    /// 사람이 읽는 라벨: 텍스트(최대 `max_chars`자) → aria-label → "unlabeled"
    pub async fn label(&mut self, max_chars: usize) -> Result<String, CoreError> {
        if let Some(text) = self.text().await? {
            return Ok(text.chars().take(max_chars).collect());
        }
        Ok(self
            .attribute("aria-label")
            .await?
            .unwrap_or_else(|| "unlabeled".to_string()))
    }

    /// 시그니처 계산용 사실 수집 (하나라도 실패하면 에러)
    pub async fn facts(&mut self) -> Result<ElementFacts, CoreError> {
        let chosen_text = self.identity_text().await?;
        let bounds = self.bounds().await?;
        let tag = self.tag().await?;
        let role = self.attribute("role").await?;
        Ok(ElementFacts {
            tag,
            chosen_text,
            role,
            bounds,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
