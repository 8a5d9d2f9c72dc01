//! 단일 채널 부동소수점 픽셀 그리드.

use autodoc_core::error::CoreError;

/// 2차원 강도 그리드 (행 우선, 단일 채널, f64)
///
/// 생성 후 불변. 정규화/SSIM/비유사도 맵이 모두 이 타입을 쓴다.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl PixelGrid {
    /// 행 우선 데이터로 그리드 생성 (길이 = width × height)
    pub fn from_vec(width: usize, height: usize, data: Vec<f64>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::Internal(format!(
                "빈 그리드: {width}x{height}"
            )));
        }
        if data.len() != width * height {
            return Err(CoreError::Internal(format!(
                "그리드 데이터 길이 불일치: {} != {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// 모든 픽셀이 같은 값인 그리드
    pub fn filled(width: usize, height: usize, value: f64) -> Result<Self, CoreError> {
        Self::from_vec(width, height, vec![value; width * height])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// 픽셀 수
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// (x, y) 픽셀 값
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    /// 행 우선 원시 데이터
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub(crate) fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// 같은 크기의 새 데이터로 그리드 생성 (crate 내부 연산 결과용)
    pub(crate) fn with_same_shape(&self, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// 픽셀별 변환
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// 같은 크기의 두 그리드를 픽셀별로 결합
    pub fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Result<Self, CoreError> {
        if self.dimensions() != other.dimensions() {
            return Err(CoreError::Internal(format!(
                "그리드 크기 불일치: {:?} vs {:?}",
                self.dimensions(),
                other.dimensions()
            )));
        }
        Ok(Self {
            width: self.width,
            height: self.height,
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
        })
    }

    /// 산술 평균
    pub fn mean(&self) -> f64 {
        self.data.iter().sum::<f64>() / self.data.len() as f64
    }
}
