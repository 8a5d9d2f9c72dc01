//! 요소 시그니처 전략.
//!
//! 기본은 위치 기반 시그니처(`tag_텍스트30자_x_y`)다. 비슷한 라벨의 인접 요소끼리
//! 충돌할 수 있으며, 필요하면 내용 해시 전략으로 바꿀 수 있다.

use sha2::{Digest, Sha256};

use autodoc_core::models::element::ElementSignature;

use crate::probe::ElementFacts;

/// 요소 사실 → 시그니처
pub trait SignatureStrategy: Send + Sync {
    fn signature(&self, facts: &ElementFacts) -> ElementSignature;

    /// 전략 이름 (로그용)
    fn name(&self) -> &str;
}

/// 위치 기반 시그니처: `{tag}_{text 앞 N자}_{x}_{y}`
#[derive(Debug, Clone, Copy)]
pub struct PositionalSignature {
    text_len: usize,
}

impl PositionalSignature {
    pub fn new(text_len: usize) -> Self {
        Self { text_len }
    }
}

impl Default for PositionalSignature {
    fn default() -> Self {
        Self::new(30)
    }
}

impl SignatureStrategy for PositionalSignature {
    fn signature(&self, facts: &ElementFacts) -> ElementSignature {
        let text: String = facts.chosen_text.chars().take(self.text_len).collect();
        ElementSignature::new(format!(
            "{}_{}_{}_{}",
            facts.tag, text, facts.bounds.x, facts.bounds.y
        ))
    }

    fn name(&self) -> &str {
        "positional"
    }
}

/// 내용 해시 시그니처: SHA-256(tag, role, text) 앞 16바이트
///
/// 위치가 바뀌어도 같은 요소로 본다. 같은 라벨의 요소가 여러 개면 하나만 방문된다.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentHashSignature;

impl SignatureStrategy for ContentHashSignature {
    fn signature(&self, facts: &ElementFacts) -> ElementSignature {
        let mut hasher = Sha256::new();
        hasher.update(facts.tag.as_bytes());
        hasher.update([0u8]);
        hasher.update(facts.role.as_deref().unwrap_or("").as_bytes());
        hasher.update([0u8]);
        hasher.update(facts.chosen_text.as_bytes());
        let digest = hasher.finalize();

        let hex: String = digest[..16].iter().map(|b| format!("{b:02x}")).collect();
        ElementSignature::new(format!("{}_{hex}", facts.tag))
    }

    fn name(&self) -> &str {
        "content-hash"
    }
}
