//! 탐색 제어기.
//!
//! 캡처 → 다음 후보 선택 → 액션 → 캡처를 반복한다.
//! 후보는 결정적 순위로 고르며, 선택된 시그니처는 세션 안에서 다시 고르지 않는다.
//! 액션/캡처 실패는 기록만 하고 다음 주기로 넘어간다. 세션을 중단시키는 것은
//! 드라이버가 없는 경우뿐이다.
//!
//! ```text
//! Idle ─▶ Capturing(기준) ─▶ Scanning ─▶ Acting ─▶ Capturing ─┐
//!                              ▲  │                           │
//!                              │  └─(후보 없음)─▶ Stopped     │
//!                              └──────────────────────────────┘ (예산 소진 시 Stopped)
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use autodoc_core::config::{AppConfig, ExplorationConfig};
use autodoc_core::error::CoreError;
use autodoc_core::models::capture::{CaptureResult, InteractionRecord};
use autodoc_core::models::element::ElementHandle;
use autodoc_core::ports::dom_driver::DomDriver;
use autodoc_core::ports::page_capture::PageCapturer;

use crate::candidate::{rank_candidates, ElementCandidate};
use crate::capture::ChainedCapturer;
use crate::probe::ElementProbe;
use crate::safety::SafetyFilter;
use crate::session::ExplorationSession;
use crate::signature::{PositionalSignature, SignatureStrategy};

/// 제어기 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplorationState {
    Idle,
    Scanning,
    Acting,
    Capturing,
    Stopped,
}

/// 탐색 종료 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// 필터를 통과한 후보가 없음
    NoCandidates,
    /// 캡처 예산(반복 횟수) 소진
    BudgetExhausted,
}

/// 탐색 실행 결과
#[derive(Debug, Clone)]
pub struct ExplorationReport {
    pub session_id: String,
    /// 캡처 순서대로의 결과 (기준 캡처 포함)
    pub captures: Vec<CaptureResult>,
    /// 선택 순서대로의 상호작용 로그
    pub log: Vec<InteractionRecord>,
    pub stop_reason: StopReason,
}

// ============================================================
// ExplorationController
// ============================================================

/// 탐색 제어기: 후보 선택 + 액션 + 캡처 루프
pub struct ExplorationController {
    driver: Option<Arc<dyn DomDriver>>,
    capturer: ChainedCapturer,
    safety: SafetyFilter,
    signature: Box<dyn SignatureStrategy>,
    config: ExplorationConfig,
    state: ExplorationState,
}

impl ExplorationController {
    /// 설정으로 제어기 생성 (드라이버는 별도 주입)
    pub fn new(capturer: Arc<dyn PageCapturer>, config: &AppConfig) -> Self {
        let exploration = config.exploration.clone();
        Self {
            driver: None,
            capturer: ChainedCapturer::new(capturer, exploration.capture_strategy),
            safety: SafetyFilter::new(&config.safety),
            signature: Box::new(PositionalSignature::new(exploration.signature_text_len)),
            config: exploration,
            state: ExplorationState::Idle,
        }
    }

    pub fn with_driver(mut self, driver: Arc<dyn DomDriver>) -> Self {
        self.driver = Some(driver);
        self
    }

    /// 시그니처 전략 교체
    pub fn with_signature_strategy(mut self, strategy: Box<dyn SignatureStrategy>) -> Self {
        self.signature = strategy;
        self
    }

    pub fn state(&self) -> ExplorationState {
        self.state
    }

    /// 탐색 실행
    ///
    /// 드라이버가 없으면 `CoreError::DriverUnavailable`. 그 외 실패는 모두 흡수하고
    /// 그때까지 캡처한 결과를 돌려준다.
    pub async fn run(&mut self) -> Result<ExplorationReport, CoreError> {
        let driver = self.driver.clone().ok_or_else(|| {
            CoreError::DriverUnavailable("자동화 드라이버가 설정되지 않았습니다".to_string())
        })?;

        let mut session = ExplorationSession::new();
        let max_captures = self.config.max_captures as usize;
        let mut captures = Vec::new();

        info!(
            session_id = session.session_id(),
            driver = driver.name(),
            signature = self.signature.name(),
            max_captures,
            "탐색 시작"
        );

        if max_captures == 0 {
            return Ok(self.finish(session, captures, StopReason::BudgetExhausted));
        }

        // 기준 캡처
        self.transition(ExplorationState::Capturing);
        self.capture_into(&mut captures, None).await;

        if let Err(e) = driver.scroll_to_top().await {
            debug!(error = %e, "최상단 스크롤 실패, 무시");
        }

        let mut stop_reason = StopReason::BudgetExhausted;
        for _ in 0..max_captures.saturating_sub(captures.len()) {
            self.transition(ExplorationState::Scanning);
            let Some((candidate, record)) = self.select_next(driver.as_ref(), &mut session).await
            else {
                stop_reason = StopReason::NoCandidates;
                break;
            };

            info!(
                signature = %candidate.signature,
                label = %candidate.label,
                "요소 선택"
            );

            self.transition(ExplorationState::Acting);
            if let Err(e) = self.act(driver.as_ref(), &candidate.handle).await {
                warn!(label = %candidate.label, error = %e, "요소 조작 실패, 다음 주기로 진행");
                continue;
            }
            // 액션이 끝나면 핸들은 더 이상 쓰지 않는다
            drop(candidate);

            self.transition(ExplorationState::Capturing);
            self.capture_into(&mut captures, Some(record)).await;
        }

        Ok(self.finish(session, captures, stop_reason))
    }

    /// 현재 DOM에서 필터를 통과한 후보를 순위대로 수집
    pub async fn scan(
        &self,
        driver: &dyn DomDriver,
        session: &ExplorationSession,
    ) -> Vec<ElementCandidate> {
        let handles = driver.enumerate_interactive().await;
        let total = handles.len();

        let mut candidates = Vec::new();
        for handle in &handles {
            match self.evaluate(driver, handle, session).await {
                Ok(Some(candidate)) => candidates.push(candidate),
                Ok(None) => {}
                Err(e) => {
                    debug!(element = handle.reference(), error = %e, "후보 제외");
                }
            }
        }

        rank_candidates(&mut candidates, self.config.row_bucket_px);
        debug!(total, survived = candidates.len(), "후보 스캔 완료");
        candidates
    }

    /// 다음 후보 선택 + 선택 시점에 방문 기록
    pub async fn select_next(
        &self,
        driver: &dyn DomDriver,
        session: &mut ExplorationSession,
    ) -> Option<(ElementCandidate, InteractionRecord)> {
        for candidate in self.scan(driver, session).await {
            if let Some(record) =
                session.mark_visited(candidate.signature.clone(), candidate.label.clone())
            {
                return Some((candidate, record));
            }
        }
        None
    }

    /// 후보 필터: 표시/활성 → 안전 → 시그니처 → 미방문
    async fn evaluate(
        &self,
        driver: &dyn DomDriver,
        handle: &ElementHandle,
        session: &ExplorationSession,
    ) -> Result<Option<ElementCandidate>, CoreError> {
        if !driver.is_displayed(handle).await? || !driver.is_enabled(handle).await? {
            return Ok(None);
        }

        let mut probe = ElementProbe::new(driver, handle);
        if !self.safety.is_safe(&mut probe).await {
            return Ok(None);
        }

        let facts = probe.facts().await?;
        let signature = self.signature.signature(&facts);
        if session.is_visited(&signature) {
            return Ok(None);
        }

        let label = probe.label(self.config.label_text_len).await?;

        Ok(Some(ElementCandidate {
            handle: handle.clone(),
            signature,
            label,
            x: facts.bounds.x,
            y: facts.bounds.y,
            area: facts.bounds.area(),
        }))
    }

    async fn act(&self, driver: &dyn DomDriver, handle: &ElementHandle) -> Result<(), CoreError> {
        driver.scroll_into_view(handle).await?;
        settle(self.config.scroll_settle()).await;
        driver.click(handle).await?;
        settle(self.config.action_settle()).await;
        Ok(())
    }

    /// 캡처 성공 시에만 결과에 추가
    async fn capture_into(
        &self,
        captures: &mut Vec<CaptureResult>,
        interaction: Option<InteractionRecord>,
    ) {
        match self.capturer.capture().await {
            Ok(image) => {
                let index = captures.len() as u32;
                debug!(index, mode = ?image.mode, "캡처 추가");
                captures.push(CaptureResult {
                    index,
                    image,
                    interaction,
                    captured_at: Utc::now(),
                });
            }
            Err(e) => {
                warn!(error = %e, "캡처 실패, 이번 주기는 건너뜀");
            }
        }
    }

    fn transition(&mut self, next: ExplorationState) {
        debug!(from = ?self.state, to = ?next, "상태 전이");
        self.state = next;
    }

    fn finish(
        &mut self,
        session: ExplorationSession,
        captures: Vec<CaptureResult>,
        stop_reason: StopReason,
    ) -> ExplorationReport {
        self.transition(ExplorationState::Stopped);
        info!(
            session_id = session.session_id(),
            captures = captures.len(),
            visited = session.visited_count(),
            reason = ?stop_reason,
            "탐색 종료"
        );
        ExplorationReport {
            session_id: session.session_id().to_string(),
            captures,
            log: session.into_log(),
            stop_reason,
        }
    }
}

async fn settle(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// 기본 설정으로 탐색 실행 (최대 캡처 수만 지정)
pub async fn explore(
    dom: Arc<dyn DomDriver>,
    capturer: Arc<dyn PageCapturer>,
    max_captures: u32,
) -> Result<Vec<CaptureResult>, CoreError> {
    let mut config = AppConfig::default();
    config.exploration.max_captures = max_captures;

    let mut controller = ExplorationController::new(capturer, &config).with_driver(dom);
    Ok(controller.run().await?.captures)
}
