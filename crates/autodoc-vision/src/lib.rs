//! # autodoc-vision
//!
//! 시각적 회귀 비교 엔진.
//! 인코딩된 이미지 두 개를 같은 크기의 그레이스케일 그리드로 정규화하고,
//! SSIM 유사도 맵에서 변경 영역을 추출한다.
//!
//! ```text
//! bytes ─▶ normalizer ─▶ ssim ─▶ regions ─▶ SimilarityResult
//!                                               └─▶ verdict (허용 오차 정책)
//! ```

pub mod compare;
pub mod grid;
pub mod normalizer;
pub mod regions;
pub mod ssim;
pub mod verdict;

pub use compare::{compare, SimilarityComparer, SimilarityResult};
pub use grid::PixelGrid;
pub use verdict::{ChangeSeverity, ComparisonStatus, Verdict};
