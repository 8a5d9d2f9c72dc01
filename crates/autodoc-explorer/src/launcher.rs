//! 드라이버 기동 체인.
//!
//! 여러 브라우저 기동기를 순서대로 시도하여 처음 성공한 드라이버를 쓴다.
//! 예: Edge → Chrome

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use autodoc_core::error::CoreError;
use autodoc_core::ports::dom_driver::{DomDriver, DriverLauncher};

/// 기동기 체인
pub struct ChainedLauncher {
    launchers: Vec<Arc<dyn DriverLauncher>>,
}

impl ChainedLauncher {
    pub fn new(launchers: Vec<Arc<dyn DriverLauncher>>) -> Self {
        Self { launchers }
    }
}

#[async_trait]
impl DriverLauncher for ChainedLauncher {
    async fn launch(&self) -> Result<Arc<dyn DomDriver>, CoreError> {
        launch_first_available(&self.launchers).await
    }

    fn name(&self) -> &str {
        "chained"
    }
}

/// 순서대로 기동 시도, 모두 실패하면 `CoreError::DriverUnavailable`
pub async fn launch_first_available(
    launchers: &[Arc<dyn DriverLauncher>],
) -> Result<Arc<dyn DomDriver>, CoreError> {
    let mut failures = Vec::new();

    for launcher in launchers {
        debug!(launcher = launcher.name(), "드라이버 기동 시도");
        match launcher.launch().await {
            Ok(driver) => {
                info!(
                    launcher = launcher.name(),
                    driver = driver.name(),
                    "드라이버 기동 성공"
                );
                return Ok(driver);
            }
            Err(e) => {
                warn!(launcher = launcher.name(), error = %e, "드라이버 기동 실패");
                failures.push(format!("{}: {e}", launcher.name()));
            }
        }
    }

    Err(CoreError::DriverUnavailable(if failures.is_empty() {
        "등록된 드라이버 기동기 없음".to_string()
    } else {
        failures.join("; ")
    }))
}
