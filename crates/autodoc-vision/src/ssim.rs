//! SSIM(구조적 유사도) 계산.
//!
//! 11x11 가우시안 가중 윈도우(σ=1.5)로 국소 평균/분산/공분산을 구해
//! 픽셀별 유사도 맵과 평균 점수를 만든다.
//!
//! - `σ1² = blur(x²) − blur(x)²`, `σ12 = blur(x·y) − μ1·μ2`
//! - `C1 = (0.01·255)²`, `C2 = (0.03·255)²`
//! - 분모가 정확히 0인 픽셀은 유사도 0
//!
//! 가우시안 블러는 분리형(행 → 열)이며 경계는 reflect-101로 확장한다.

use tracing::debug;

use autodoc_core::config::ComparisonConfig;
use autodoc_core::error::CoreError;

use crate::grid::PixelGrid;

/// 8비트 동적 범위
const DYNAMIC_RANGE: f64 = 255.0;

/// 휘도 안정화 상수 C1 = (0.01·L)²
pub const C1: f64 = (0.01 * DYNAMIC_RANGE) * (0.01 * DYNAMIC_RANGE);

/// 대비 안정화 상수 C2 = (0.03·L)²
pub const C2: f64 = (0.03 * DYNAMIC_RANGE) * (0.03 * DYNAMIC_RANGE);

/// SSIM 계산 결과 (유사도 맵 + 평균 점수)
#[derive(Debug, Clone)]
pub struct SsimMap {
    /// 픽셀별 유사도 (클램프하지 않은 원값)
    pub map: PixelGrid,
    /// 평균 점수, [0, 1]로 클램프
    pub score: f64,
}

// ============================================================
// GaussianKernel
// ============================================================

/// 정규화된 1차원 가우시안 커널
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    weights: Vec<f64>,
}

impl GaussianKernel {
    /// 크기 `size`(홀수), 표준편차 `sigma`의 커널 생성
    pub fn new(size: usize, sigma: f64) -> Result<Self, CoreError> {
        if size == 0 || size % 2 == 0 {
            return Err(CoreError::Validation {
                field: "gaussian_window".to_string(),
                message: format!("홀수 양수여야 함 (현재 {size})"),
            });
        }
        if sigma.is_nan() || sigma <= 0.0 {
            return Err(CoreError::Validation {
                field: "gaussian_sigma".to_string(),
                message: format!("양수여야 함 (현재 {sigma})"),
            });
        }

        let radius = (size / 2) as f64;
        let denom = 2.0 * sigma * sigma;
        let raw: Vec<f64> = (0..size)
            .map(|i| {
                let d = i as f64 - radius;
                (-(d * d) / denom).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();

        Ok(Self {
            weights: raw.into_iter().map(|w| w / sum).collect(),
        })
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn radius(&self) -> isize {
        (self.weights.len() / 2) as isize
    }

    /// 분리형 2차원 블러 (행 방향 → 열 방향)
    pub fn blur(&self, grid: &PixelGrid) -> PixelGrid {
        self.blur_in_place(grid.clone())
    }

    /// 입력 버퍼를 결과로 재사용하는 블러 (추가 버퍼는 행 방향 결과 하나)
    fn blur_in_place(&self, mut grid: PixelGrid) -> PixelGrid {
        let (w, h) = grid.dimensions();
        let r = self.radius();

        let mut horizontal = vec![0.0; w * h];
        {
            let src = grid.as_slice();
            for y in 0..h {
                let row = &src[y * w..(y + 1) * w];
                for x in 0..w {
                    let mut acc = 0.0;
                    for (k, weight) in self.weights.iter().enumerate() {
                        let sx = reflect_101(x as isize + k as isize - r, w);
                        acc += weight * row[sx];
                    }
                    horizontal[y * w + x] = acc;
                }
            }
        }

        let out = grid.as_mut_slice();
        for y in 0..h {
            for x in 0..w {
                let mut acc = 0.0;
                for (k, weight) in self.weights.iter().enumerate() {
                    let sy = reflect_101(y as isize + k as isize - r, h);
                    acc += weight * horizontal[sy * w + x];
                }
                out[y * w + x] = acc;
            }
        }

        grid
    }
}

/// reflect-101 경계 인덱스 (`dcb|abcd|cba`)
#[inline]
fn reflect_101(i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let m = i.rem_euclid(period);
    if m >= n as isize {
        (period - m) as usize
    } else {
        m as usize
    }
}

// ============================================================
// SsimComputer
// ============================================================

/// SSIM 계산기
#[derive(Debug, Clone)]
pub struct SsimComputer {
    kernel: GaussianKernel,
}

impl SsimComputer {
    /// 설정의 윈도우 크기/σ로 계산기 생성
    pub fn new(config: &ComparisonConfig) -> Result<Self, CoreError> {
        Ok(Self {
            kernel: GaussianKernel::new(config.gaussian_window, config.gaussian_sigma)?,
        })
    }

    /// 같은 크기의 두 그레이스케일 그리드 비교
    ///
    /// 입력 외에 w×h 크기의 `f64` 버퍼를 최대 5개 동시에 잡는다
    /// (평균 2, 분산 합 1, 블러 입력/출력 1, 행 방향 중간 결과 1).
    /// 1920×20000 전체 페이지 캡처라면 약 1.5GB.
    pub fn compute(&self, a: &PixelGrid, b: &PixelGrid) -> Result<SsimMap, CoreError> {
        if a.dimensions() != b.dimensions() {
            return Err(CoreError::Internal(format!(
                "SSIM 입력 크기 불일치: {:?} vs {:?}",
                a.dimensions(),
                b.dimensions()
            )));
        }

        let mu1 = self.kernel.blur(a);
        let mu2 = self.kernel.blur(b);
        // blur(x²) + blur(y²)는 블러의 선형성으로 한 번에 구한다
        let sum_sq = self
            .kernel
            .blur_in_place(a.zip_map(b, |x, y| x * x + y * y)?);
        let cross = self.kernel.blur_in_place(a.zip_map(b, |x, y| x * y)?);

        let (m1, m2, ss) = (mu1.as_slice(), mu2.as_slice(), sum_sq.as_slice());

        // 공분산 블러 버퍼를 유사도 맵으로 덮어쓴다
        let mut data = cross.into_vec();
        for (i, value) in data.iter_mut().enumerate() {
            let mu1_sq = m1[i] * m1[i];
            let mu2_sq = m2[i] * m2[i];
            let mu1_mu2 = m1[i] * m2[i];

            let sigma_sum = ss[i] - mu1_sq - mu2_sq;
            let sigma12 = *value - mu1_mu2;

            let num = (2.0 * mu1_mu2 + C1) * (2.0 * sigma12 + C2);
            let den = (mu1_sq + mu2_sq + C1) * (sigma_sum + C2);

            *value = if den == 0.0 { 0.0 } else { num / den };
        }

        let map = a.with_same_shape(data);
        let score = map.mean().clamp(0.0, 1.0);

        debug!(
            width = a.width(),
            height = a.height(),
            score,
            "SSIM 계산 완료"
        );

        Ok(SsimMap { map, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computer() -> SsimComputer {
        SsimComputer::new(&ComparisonConfig::default()).unwrap()
    }

    /// 결정적 의사 난수 패턴
    fn textured(w: usize, h: usize, seed: u64) -> PixelGrid {
        let mut state = seed;
        let data = (0..w * h)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 33) % 256) as f64
            })
            .collect();
        PixelGrid::from_vec(w, h, data).unwrap()
    }

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let kernel = GaussianKernel::new(11, 1.5).unwrap();
        let w = kernel.weights();
        assert_eq!(w.len(), 11);
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        for i in 0..5 {
            assert!((w[i] - w[10 - i]).abs() < 1e-15);
        }
        assert!(w[5] > w[4]);
    }

    #[test]
    fn kernel_rejects_even_size() {
        assert!(GaussianKernel::new(10, 1.5).is_err());
        assert!(GaussianKernel::new(11, 0.0).is_err());
    }

    #[test]
    fn reflect_101_mirrors_without_edge_repeat() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(3, 1), 0);
    }

    #[test]
    fn blur_preserves_constant_grid() {
        let kernel = GaussianKernel::new(11, 1.5).unwrap();
        let grid = PixelGrid::filled(7, 3, 42.0).unwrap();
        let blurred = kernel.blur(&grid);
        assert!(blurred.as_slice().iter().all(|v| (v - 42.0).abs() < 1e-9));
    }

    #[test]
    fn identical_textured_images_score_one() {
        let img = textured(32, 24, 7);
        let result = computer().compute(&img, &img).unwrap();
        assert!((result.score - 1.0).abs() < 1e-6);
        assert!(result.map.as_slice().iter().all(|&v| (v - 1.0).abs() < 1e-9));
    }

    #[test]
    fn score_is_symmetric() {
        let a = textured(30, 20, 1);
        let b = textured(30, 20, 2);
        let ab = computer().compute(&a, &b).unwrap();
        let ba = computer().compute(&b, &a).unwrap();
        assert!((ab.score - ba.score).abs() < 1e-12);
        assert!(ab.score < 0.5);
    }

    #[test]
    fn uniform_black_vs_white_is_near_zero() {
        let black = PixelGrid::filled(16, 16, 0.0).unwrap();
        let white = PixelGrid::filled(16, 16, 255.0).unwrap();
        let result = computer().compute(&black, &white).unwrap();
        assert!(result.score < 0.01);
        assert!(result.score >= 0.0);
    }

    #[test]
    fn single_pixel_image_is_supported() {
        let a = PixelGrid::filled(1, 1, 10.0).unwrap();
        let result = computer().compute(&a, &a).unwrap();
        assert!((result.score - 1.0).abs() < 1e-9);
    }

    /// 블러 5회로 σ1², σ2², σ12를 각각 구하는 직접 계산
    fn five_blur_ssim(kernel: &GaussianKernel, a: &PixelGrid, b: &PixelGrid) -> Vec<f64> {
        let mu1 = kernel.blur(a);
        let mu2 = kernel.blur(b);
        let saa = kernel.blur(&a.map(|v| v * v));
        let sbb = kernel.blur(&b.map(|v| v * v));
        let sab = kernel.blur(&a.zip_map(b, |x, y| x * y).unwrap());
        (0..a.len())
            .map(|i| {
                let (m1, m2) = (mu1.as_slice()[i], mu2.as_slice()[i]);
                let s1 = saa.as_slice()[i] - m1 * m1;
                let s2 = sbb.as_slice()[i] - m2 * m2;
                let s12 = sab.as_slice()[i] - m1 * m2;
                let num = (2.0 * m1 * m2 + C1) * (2.0 * s12 + C2);
                let den = (m1 * m1 + m2 * m2 + C1) * (s1 + s2 + C2);
                if den == 0.0 {
                    0.0
                } else {
                    num / den
                }
            })
            .collect()
    }

    #[test]
    fn shared_buffers_match_direct_formula() {
        let a = textured(37, 23, 3);
        let b = textured(37, 23, 11).map(|v| (v * 0.5 + 40.0).min(255.0));
        let kernel = GaussianKernel::new(11, 1.5).unwrap();

        let result = computer().compute(&a, &b).unwrap();
        let expected = five_blur_ssim(&kernel, &a, &b);
        for (got, want) in result.map.as_slice().iter().zip(&expected) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
    }

    #[test]
    fn blur_leaves_input_untouched() {
        let a = textured(9, 7, 5);
        let before = a.clone();
        let _ = GaussianKernel::new(5, 1.0).unwrap().blur(&a);
        assert_eq!(a, before);
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let a = PixelGrid::filled(4, 4, 0.0).unwrap();
        let b = PixelGrid::filled(4, 5, 0.0).unwrap();
        assert!(computer().compute(&a, &b).is_err());
    }
}
