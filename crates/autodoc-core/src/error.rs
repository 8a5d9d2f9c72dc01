//! AutoDoc 핵심 에러 타입.
//!
//! 비교(compare)와 탐색(explore) 양쪽이 공유하는 에러 분류.
//! 요소/액션 단위 에러는 가장 좁은 범위에서 흡수되고,
//! 호출자에게 전파되는 것은 `Decode`와 `DriverUnavailable`뿐이다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 이미지 바이트 디코딩 실패 (해당 비교 호출에만 치명적)
    #[error("이미지 디코딩 실패 ({image}): {message}")]
    Decode {
        /// 어느 입력인지 ("a", "b" 등)
        image: String,
        /// 실패 사유
        message: String,
    },

    /// 요소 속성 읽기 실패: 후보 제외 또는 unsafe 처리
    #[error("요소 속성 읽기 실패 ({attribute}): {message}")]
    AttributeRead {
        /// 읽으려던 속성 이름 (text, tag, bounds 포함)
        attribute: String,
        /// 실패 사유
        message: String,
    },

    /// 클릭/스크롤 실패: 로그 후 다음 사이클 진행
    #[error("액션 실패: {0}")]
    Action(String),

    /// 스크린샷 캡처 실패: 해당 반복은 miss로 처리
    #[error("캡처 실패: {0}")]
    Capture(String),

    /// 자동화 드라이버가 없음: 세션 시작 불가
    #[error("자동화 드라이버 없음: {0}")]
    DriverUnavailable(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// 속성 읽기 에러 생성 헬퍼
    pub fn attribute(attribute: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AttributeRead {
            attribute: attribute.into(),
            message: message.into(),
        }
    }

    /// 디코딩 에러 생성 헬퍼
    pub fn decode(image: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            image: image.into(),
            message: message.into(),
        }
    }
}
