//! 변경 영역 추출.
//!
//! SSIM 유사도 맵 → 8비트 비유사도 맵 → 임계값 이진화 → 8-연결 성분 라벨링.
//! 성분마다 바운딩 박스를 만들고, 작은 성분은 노이즈로 버린다.

use tracing::debug;

use autodoc_core::config::ComparisonConfig;
use autodoc_core::models::region::{Region, RegionSeverity};

use crate::grid::PixelGrid;

/// 8-이웃 오프셋
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// 8비트 비유사도 맵 (0 = 동일, 255 = 완전히 다름)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DissimilarityMap {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// 유사도 맵 → [0, 1] 비유사도 맵 (`clamp(1 − s, 0, 1)`)
pub fn dissimilarity(similarity: &PixelGrid) -> PixelGrid {
    similarity.map(|s| (1.0 - s).clamp(0.0, 1.0))
}

impl DissimilarityMap {
    /// 유사도 맵 → `trunc(clamp(1 − s, 0, 1) · 255)`
    pub fn from_similarity(similarity: &PixelGrid) -> Self {
        Self::from_dissimilarity(&dissimilarity(similarity))
    }

    /// [0, 1] 비유사도 맵을 8비트로 절삭 변환
    pub fn from_dissimilarity(dissimilarity: &PixelGrid) -> Self {
        let data = dissimilarity
            .as_slice()
            .iter()
            .map(|&d| (d.clamp(0.0, 1.0) * 255.0) as u8)
            .collect();
        Self {
            width: dissimilarity.width(),
            height: dissimilarity.height(),
            data,
        }
    }

    /// 원시 8비트 데이터 (행 우선)
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data[y * self.width + x]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
}

/// 변경 영역 추출기
#[derive(Debug, Clone)]
pub struct DiffRegionExtractor {
    /// 이 값을 초과하는 비유사도 픽셀이 전경
    threshold: u8,
    /// 이보다 작은 면적의 영역은 버림
    area_floor: u64,
    /// 이 면적을 초과하면 Major
    major_cutoff: u64,
}

impl Default for DiffRegionExtractor {
    fn default() -> Self {
        Self::new(&ComparisonConfig::default())
    }
}

impl DiffRegionExtractor {
    pub fn new(config: &ComparisonConfig) -> Self {
        Self {
            threshold: config.dissimilarity_threshold,
            area_floor: config.area_floor as u64,
            major_cutoff: config.major_area_cutoff as u64,
        }
    }

    /// 비유사도 맵에서 영역 추출 (래스터 순서로 발견된 순서 유지)
    pub fn extract(&self, map: &DissimilarityMap) -> Vec<Region> {
        let (w, h) = (map.width(), map.height());
        let foreground: Vec<bool> = map
            .as_slice()
            .iter()
            .map(|&d| d > self.threshold)
            .collect();
        let mut visited = vec![false; w * h];
        let mut regions = Vec::new();
        let mut stack = Vec::new();
        let mut discarded = 0usize;

        for start in 0..w * h {
            if !foreground[start] || visited[start] {
                continue;
            }

            // 반복형 flood fill (재귀 없음)
            visited[start] = true;
            stack.push(start);
            let (mut min_x, mut min_y) = (w, h);
            let (mut max_x, mut max_y) = (0usize, 0usize);

            while let Some(idx) = stack.pop() {
                let (x, y) = (idx % w, idx / w);
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);

                for (dx, dy) in NEIGHBORS {
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                        continue;
                    }
                    let n = ny as usize * w + nx as usize;
                    if foreground[n] && !visited[n] {
                        visited[n] = true;
                        stack.push(n);
                    }
                }
            }

            let width = (max_x - min_x + 1) as u32;
            let height = (max_y - min_y + 1) as u32;
            let area = width as u64 * height as u64;

            if area < self.area_floor {
                discarded += 1;
                continue;
            }

            regions.push(Region {
                x: min_x as u32,
                y: min_y as u32,
                width,
                height,
                area,
                severity: self.classify(area),
            });
        }

        debug!(regions = regions.len(), discarded, "변경 영역 추출 완료");

        regions
    }

    /// 유사도 맵에서 바로 추출
    pub fn extract_from_similarity(&self, similarity: &PixelGrid) -> Vec<Region> {
        self.extract(&DissimilarityMap::from_similarity(similarity))
    }

    fn classify(&self, area: u64) -> RegionSeverity {
        if area > self.major_cutoff {
            RegionSeverity::Major
        } else {
            RegionSeverity::Minor
        }
    }
}
