//! 탐색 세션 상태.
//!
//! 방문한 시그니처 집합과 상호작용 로그. 한 번의 탐색 실행에만 속하며
//! 방문 집합은 줄어들지 않는다.

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use autodoc_core::models::capture::InteractionRecord;
use autodoc_core::models::element::ElementSignature;

/// 탐색 세션: 방문 집합 + 상호작용 로그
#[derive(Debug)]
pub struct ExplorationSession {
    session_id: String,
    visited: HashSet<ElementSignature>,
    log: Vec<InteractionRecord>,
}

impl Default for ExplorationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorationSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            visited: HashSet::new(),
            log: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn is_visited(&self, signature: &ElementSignature) -> bool {
        self.visited.contains(signature)
    }

    /// 선택 시점 기록
    ///
    /// 이미 방문한 시그니처면 `None`을 돌려주고 아무것도 기록하지 않는다.
    pub fn mark_visited(
        &mut self,
        signature: ElementSignature,
        label: impl Into<String>,
    ) -> Option<InteractionRecord> {
        if !self.visited.insert(signature.clone()) {
            return None;
        }
        let record = InteractionRecord {
            timestamp: Utc::now(),
            signature,
            label: label.into(),
        };
        self.log.push(record.clone());
        Some(record)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// 선택 순서대로의 상호작용 로그
    pub fn log(&self) -> &[InteractionRecord] {
        &self.log
    }

    pub fn into_log(self) -> Vec<InteractionRecord> {
        self.log
    }
}
