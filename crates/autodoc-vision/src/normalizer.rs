//! 이미지 정규화.
//!
//! 원시 이미지 바이트 두 개를 디코딩하여 같은 크기의 그레이스케일 그리드로 맞춘다.
//! 정렬 규칙: `w = min(w1, w2)`, `h = min(h1, h2)`로 면적 평균(box) 축소만 수행한다.
//! 업샘플링은 하지 않는다.

use fast_image_resize::{
    images::Image as FirImage, FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
};
use image::RgbImage;
use tracing::debug;

use autodoc_core::error::CoreError;

use crate::grid::PixelGrid;

/// BT.601 휘도 가중치 (R, G, B)
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// 이미지 정규화기
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageNormalizer;

impl ImageNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// 두 이미지를 디코딩 → 공통 크기로 축소 → 그레이스케일 변환
    ///
    /// 어느 한쪽이라도 래스터 이미지로 디코딩되지 않으면 `CoreError::Decode`.
    pub fn normalize_pair(
        &self,
        bytes_a: &[u8],
        bytes_b: &[u8],
    ) -> Result<(PixelGrid, PixelGrid), CoreError> {
        let rgb_a = decode_rgb(bytes_a, "a")?;
        let rgb_b = decode_rgb(bytes_b, "b")?;

        let width = rgb_a.width().min(rgb_b.width());
        let height = rgb_a.height().min(rgb_b.height());

        debug!(
            a = ?rgb_a.dimensions(),
            b = ?rgb_b.dimensions(),
            target = ?(width, height),
            "이미지 정렬"
        );

        let aligned_a = shrink_to(rgb_a, width, height)?;
        let aligned_b = shrink_to(rgb_b, width, height)?;

        Ok((to_grayscale(&aligned_a)?, to_grayscale(&aligned_b)?))
    }
}

/// 바이트 → RGB8 (알파 채널 제거)
fn decode_rgb(bytes: &[u8], label: &str) -> Result<RgbImage, CoreError> {
    let decoded =
        image::load_from_memory(bytes).map_err(|e| CoreError::decode(label, e.to_string()))?;
    let rgb = decoded.to_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(CoreError::decode(
            label,
            format!("빈 이미지: {}x{}", rgb.width(), rgb.height()),
        ));
    }
    Ok(rgb)
}

/// 면적 평균 축소 (같은 크기면 그대로 반환)
fn shrink_to(image: RgbImage, width: u32, height: u32) -> Result<RgbImage, CoreError> {
    let (src_w, src_h) = image.dimensions();
    if src_w == width && src_h == height {
        return Ok(image);
    }

    let src_image = FirImage::from_vec_u8(src_w, src_h, image.into_raw(), PixelType::U8x3)
        .map_err(|e| CoreError::Internal(format!("소스 이미지 생성 실패: {e}")))?;

    let mut dst_image = FirImage::new(width, height, PixelType::U8x3);

    let mut resizer = Resizer::new();
    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Box));

    resizer
        .resize(&src_image, &mut dst_image, &options)
        .map_err(|e| CoreError::Internal(format!("리사이즈 실패: {e}")))?;

    debug!("면적 평균 축소: {src_w}x{src_h} → {width}x{height}");

    RgbImage::from_raw(width, height, dst_image.into_vec())
        .ok_or_else(|| CoreError::Internal("리사이즈 결과 복원 실패".to_string()))
}

/// RGB8 → 8비트 반올림 휘도 → f64 그리드
fn to_grayscale(image: &RgbImage) -> Result<PixelGrid, CoreError> {
    let data = image
        .pixels()
        .map(|p| {
            let luma = LUMA_WEIGHTS[0] * p[0] as f64
                + LUMA_WEIGHTS[1] * p[1] as f64
                + LUMA_WEIGHTS[2] * p[2] as f64;
            luma.round().clamp(0.0, 255.0)
        })
        .collect();
    PixelGrid::from_vec(image.width() as usize, image.height() as usize, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn solid_png(w: u32, h: u32, color: [u8; 3]) -> Vec<u8> {
        png_bytes(DynamicImage::ImageRgb8(RgbImage::from_pixel(w, h, Rgb(color))))
    }

    #[test]
    fn undecodable_bytes_fail_with_decode_error() {
        let good = solid_png(4, 4, [0, 0, 0]);
        let result = ImageNormalizer::new().normalize_pair(&good, b"not an image");
        match result {
            Err(CoreError::Decode { image, .. }) => assert_eq!(image, "b"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn aligns_to_smaller_dimensions_per_axis() {
        let a = solid_png(40, 10, [0, 0, 0]);
        let b = solid_png(20, 30, [0, 0, 0]);
        let (ga, gb) = ImageNormalizer::new().normalize_pair(&a, &b).unwrap();
        assert_eq!(ga.dimensions(), (20, 10));
        assert_eq!(gb.dimensions(), (20, 10));
    }

    #[test]
    fn grayscale_uses_bt601_weights() {
        let red = solid_png(2, 2, [255, 0, 0]);
        let white = solid_png(2, 2, [255, 255, 255]);
        let (gr, gw) = ImageNormalizer::new().normalize_pair(&red, &white).unwrap();
        assert_eq!(gr.get(0, 0), 76.0);
        assert_eq!(gw.get(1, 1), 255.0);
    }

    #[test]
    fn alpha_channel_is_dropped() {
        let transparent = png_bytes(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            3,
            3,
            Rgba([200, 200, 200, 0]),
        )));
        let opaque = solid_png(3, 3, [200, 200, 200]);
        let (ga, gb) = ImageNormalizer::new()
            .normalize_pair(&transparent, &opaque)
            .unwrap();
        assert_eq!(ga, gb);
    }

    #[test]
    fn uniform_image_stays_uniform_after_shrink() {
        let big = solid_png(64, 64, [120, 120, 120]);
        let small = solid_png(16, 16, [0, 0, 0]);
        let (g_big, _) = ImageNormalizer::new().normalize_pair(&big, &small).unwrap();
        assert_eq!(g_big.dimensions(), (16, 16));
        assert!(g_big.as_slice().iter().all(|&v| v == 120.0));
    }
}
