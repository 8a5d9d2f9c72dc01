//! 이미지 비교 파이프라인.
//!
//! 바이트 → [`ImageNormalizer`] → [`SsimComputer`] → [`DiffRegionExtractor`] → [`SimilarityResult`]

use std::io::Cursor;

use image::{GrayImage, ImageFormat};
use tracing::debug;

use autodoc_core::config::ComparisonConfig;
use autodoc_core::error::CoreError;
use autodoc_core::models::region::Region;

use crate::grid::PixelGrid;
use crate::normalizer::ImageNormalizer;
use crate::regions::{dissimilarity, DiffRegionExtractor, DissimilarityMap};
use crate::ssim::SsimComputer;

/// 비교 결과 (호출자 소유)
#[derive(Debug, Clone)]
pub struct SimilarityResult {
    /// SSIM 평균 점수 (0.0 ~ 1.0)
    pub score: f64,
    /// 픽셀별 비유사도 `clamp(1 − s, 0, 1)`
    pub dissimilarity_map: PixelGrid,
    /// 면적 하한을 통과한 변경 영역 (래스터 발견 순서)
    pub regions: Vec<Region>,
}

impl SimilarityResult {
    /// 변경 영역 존재 여부
    pub fn has_changes(&self) -> bool {
        !self.regions.is_empty()
    }

    /// 8비트 비유사도 맵을 그레이스케일 이미지로 렌더링 (밝을수록 다름)
    pub fn diff_image(&self) -> Result<GrayImage, CoreError> {
        let (w, h) = self.dissimilarity_map.dimensions();
        let raw = DissimilarityMap::from_dissimilarity(&self.dissimilarity_map).into_raw();
        GrayImage::from_raw(w as u32, h as u32, raw)
            .ok_or_else(|| CoreError::Internal(format!("diff 이미지 생성 실패: {w}x{h}")))
    }

    /// diff 이미지를 PNG 바이트로 인코딩
    pub fn diff_image_png(&self) -> Result<Vec<u8>, CoreError> {
        let image = self.diff_image()?;
        let mut buf = Cursor::new(Vec::new());
        image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| CoreError::Internal(format!("PNG 인코딩 실패: {e}")))?;
        Ok(buf.into_inner())
    }
}

/// 설정 기반 비교기
#[derive(Debug, Clone)]
pub struct SimilarityComparer {
    normalizer: ImageNormalizer,
    ssim: SsimComputer,
    extractor: DiffRegionExtractor,
}

impl SimilarityComparer {
    pub fn new(config: &ComparisonConfig) -> Result<Self, CoreError> {
        Ok(Self {
            normalizer: ImageNormalizer::new(),
            ssim: SsimComputer::new(config)?,
            extractor: DiffRegionExtractor::new(config),
        })
    }

    /// 인코딩된 이미지 두 개 비교
    ///
    /// 디코딩 실패만 에러(`CoreError::Decode`)로 돌려준다.
    pub fn compare(&self, bytes_a: &[u8], bytes_b: &[u8]) -> Result<SimilarityResult, CoreError> {
        let (grid_a, grid_b) = self.normalizer.normalize_pair(bytes_a, bytes_b)?;
        self.compare_grids(&grid_a, &grid_b)
    }

    /// 이미 정렬된 그레이스케일 그리드 비교
    pub fn compare_grids(
        &self,
        grid_a: &PixelGrid,
        grid_b: &PixelGrid,
    ) -> Result<SimilarityResult, CoreError> {
        let ssim = self.ssim.compute(grid_a, grid_b)?;
        let dissimilarity_map = dissimilarity(&ssim.map);
        let regions = self
            .extractor
            .extract(&DissimilarityMap::from_dissimilarity(&dissimilarity_map));

        debug!(
            score = ssim.score,
            regions = regions.len(),
            "이미지 비교 완료"
        );

        Ok(SimilarityResult {
            score: ssim.score,
            dissimilarity_map,
            regions,
        })
    }
}

/// 기본 설정으로 두 이미지 비교
pub fn compare(bytes_a: &[u8], bytes_b: &[u8]) -> Result<SimilarityResult, CoreError> {
    SimilarityComparer::new(&ComparisonConfig::default())?.compare(bytes_a, bytes_b)
}
