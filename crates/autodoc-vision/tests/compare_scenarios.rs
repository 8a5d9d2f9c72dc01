//! PNG 인코딩된 이미지로 비교 엔진 전체 경로 검증

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma, Rgb, RgbImage};

use autodoc_core::config::{ComparisonConfig, VerdictConfig};
use autodoc_core::error::CoreError;
use autodoc_core::models::region::RegionSeverity;
use autodoc_vision::{compare, ComparisonStatus, SimilarityComparer, Verdict};

fn encode(img: DynamicImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn gray(w: u32, h: u32, value: u8) -> Vec<u8> {
    encode(DynamicImage::ImageLuma8(image::GrayImage::from_pixel(
        w,
        h,
        Luma([value]),
    )))
}

/// 결정적 노이즈 이미지
fn noisy(w: u32, h: u32, seed: u32) -> Vec<u8> {
    let mut state = seed;
    let img = RgbImage::from_fn(w, h, |_, _| {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let v = (state >> 16) as u8;
        Rgb([v, v.wrapping_mul(3), v.wrapping_add(77)])
    });
    encode(DynamicImage::ImageRgb8(img))
}

/// 검정 바탕에 흰 사각형
fn black_with_white_block(w: u32, h: u32, bx: u32, by: u32, size: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(w, h, |x, y| {
        if (bx..bx + size).contains(&x) && (by..by + size).contains(&y) {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    });
    encode(DynamicImage::ImageRgb8(img))
}

#[test]
fn identical_uniform_gray_images() {
    let a = gray(100, 100, 128);
    let result = compare(&a, &a).unwrap();
    assert!((result.score - 1.0).abs() < 1e-6);
    assert!(result.regions.is_empty());
}

#[test]
fn identical_textured_images_score_one() {
    let a = noisy(64, 48, 9);
    let result = compare(&a, &a).unwrap();
    assert!((result.score - 1.0).abs() < 1e-6);
    assert!(result.regions.is_empty());
}

#[test]
fn white_block_on_black_is_one_major_region() {
    let a = black_with_white_block(100, 100, 0, 0, 0);
    let b = black_with_white_block(100, 100, 10, 10, 60);
    let result = compare(&a, &b).unwrap();

    assert_eq!(result.regions.len(), 1);
    let region = result.regions[0];
    // 가우시안 윈도우 반경만큼 경계가 번진다
    assert!((5..=10).contains(&region.x), "x = {}", region.x);
    assert!((5..=10).contains(&region.y), "y = {}", region.y);
    assert!((60..=70).contains(&region.width), "width = {}", region.width);
    assert!((60..=70).contains(&region.height), "height = {}", region.height);
    assert_eq!(region.area, region.width as u64 * region.height as u64);
    assert_eq!(region.severity, RegionSeverity::Major);
    assert!(result.score < 1.0);
}

#[test]
fn score_is_symmetric() {
    let a = noisy(50, 40, 1);
    let b = noisy(50, 40, 2);
    let ab = compare(&a, &b).unwrap();
    let ba = compare(&b, &a).unwrap();
    assert!((ab.score - ba.score).abs() < 1e-12);
    assert_eq!(ab.regions, ba.regions);
}

#[test]
fn symmetric_across_different_sizes() {
    let a = noisy(80, 30, 3);
    let b = noisy(40, 60, 4);
    let ab = compare(&a, &b).unwrap();
    let ba = compare(&b, &a).unwrap();
    assert_eq!(ab.dissimilarity_map.dimensions(), (40, 30));
    assert!((ab.score - ba.score).abs() < 1e-12);
}

#[test]
fn every_region_respects_area_floor() {
    for seed in 0..4 {
        let a = noisy(60, 60, seed);
        let b = noisy(60, 60, seed + 100);
        let result = compare(&a, &b).unwrap();
        assert!((0.0..=1.0).contains(&result.score));
        for region in &result.regions {
            assert!(region.area >= 50, "region {region:?}");
            assert!(region.width > 0 && region.height > 0);
        }
    }
}

#[test]
fn repeated_runs_are_stable() {
    let a = black_with_white_block(80, 80, 5, 5, 20);
    let b = black_with_white_block(80, 80, 40, 40, 30);
    let first = compare(&a, &b).unwrap();
    let second = compare(&a, &b).unwrap();
    assert_eq!(first.regions, second.regions);
    assert_eq!(first.score, second.score);
    assert!(first.regions.len() >= 2);
}

#[test]
fn undecodable_input_is_decode_error() {
    let a = gray(10, 10, 0);
    assert!(matches!(
        compare(&a, &[0u8, 1, 2, 3]),
        Err(CoreError::Decode { .. })
    ));
}

#[test]
fn custom_area_floor_drops_small_regions() {
    let a = black_with_white_block(100, 100, 0, 0, 0);
    let b = black_with_white_block(100, 100, 10, 10, 60);
    let config = ComparisonConfig {
        area_floor: 10_000,
        major_area_cutoff: 20_000,
        ..ComparisonConfig::default()
    };
    let result = SimilarityComparer::new(&config)
        .unwrap()
        .compare(&a, &b)
        .unwrap();
    assert!(result.regions.is_empty());
}

#[test]
fn verdict_layers_on_top_of_score() {
    let a = gray(40, 40, 0);
    let b = gray(40, 40, 255);
    let result = compare(&a, &b).unwrap();
    let verdict = Verdict::evaluate(result.score, &VerdictConfig::default());
    assert_eq!(verdict.status, ComparisonStatus::Changed);

    let same = compare(&a, &a).unwrap();
    assert!(Verdict::evaluate(same.score, &VerdictConfig::default()).is_match());
}
