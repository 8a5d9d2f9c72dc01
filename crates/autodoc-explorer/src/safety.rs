//! 요소 안전 판정.
//!
//! 파괴적 동작(로그아웃, 삭제 등)으로 보이는 요소와 모달 대화상자 요소를
//! 클릭 대상에서 제외한다. 속성 조회에 실패하면 안전하지 않은 것으로 본다.

use tracing::debug;

use autodoc_core::config::SafetyConfig;
use autodoc_core::error::CoreError;

use crate::probe::ElementProbe;

/// 안전 필터
#[derive(Debug, Clone)]
pub struct SafetyFilter {
    /// 소문자로 정규화된 금지어
    denylist: Vec<String>,
    /// 제외할 접근성 역할 (정확히 일치)
    unsafe_roles: Vec<String>,
}

impl Default for SafetyFilter {
    fn default() -> Self {
        Self::new(&SafetyConfig::default())
    }
}

impl SafetyFilter {
    pub fn new(config: &SafetyConfig) -> Self {
        Self {
            denylist: config
                .denylist_words
                .iter()
                .map(|w| w.to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
            unsafe_roles: config.unsafe_roles.clone(),
        }
    }

    /// 텍스트가 금지어를 포함하는지 (대소문자 무시)
    pub fn is_denied_text(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.denylist.iter().any(|word| lowered.contains(word))
    }

    /// 역할이 모달/경고 대화상자인지
    pub fn is_unsafe_role(&self, role: Option<&str>) -> bool {
        role.is_some_and(|r| self.unsafe_roles.iter().any(|u| u == r))
    }

    /// 요소 안전 여부 (조회 실패 시 false)
    pub async fn is_safe(&self, probe: &mut ElementProbe<'_>) -> bool {
        match self.check(probe).await {
            Ok(safe) => safe,
            Err(e) => {
                debug!(element = probe.handle().reference(), error = %e, "안전 판정 실패, 제외");
                false
            }
        }
    }

    async fn check(&self, probe: &mut ElementProbe<'_>) -> Result<bool, CoreError> {
        let text = probe.safety_text().await?;
        if self.is_denied_text(&text) {
            debug!(element = probe.handle().reference(), text = %text, "금지어 포함, 제외");
            return Ok(false);
        }

        let role = probe.attribute("role").await?;
        if self.is_unsafe_role(role.as_deref()) {
            debug!(element = probe.handle().reference(), role = ?role, "대화상자 역할, 제외");
            return Ok(false);
        }

        Ok(true)
    }
}
