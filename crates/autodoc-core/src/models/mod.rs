//! AutoDoc 도메인 모델.
//!
//! 비교 결과(변경 영역)와 탐색 결과(캡처, 상호작용 로그)가 공유하는
//! 데이터 구조체를 정의한다.

pub mod capture;
pub mod element;
pub mod region;
