//! 클릭 후보와 결정적 순위.

use autodoc_core::models::element::{ElementHandle, ElementSignature};

/// 필터를 통과한 클릭 후보
///
/// `handle`은 협력자 소유 요소에 대한 참조이며, 해당 액션이 끝나면 버린다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementCandidate {
    pub handle: ElementHandle,
    pub signature: ElementSignature,
    pub label: String,
    pub x: i32,
    pub y: i32,
    pub area: u64,
}

impl ElementCandidate {
    /// 순위 키: (행 버킷, 열 버킷, 면적 내림차순)
    ///
    /// 음수 좌표도 내림(floor) 버킷으로 묶는다. 버킷 크기는 최소 1.
    pub fn rank_key(&self, bucket_px: i32) -> (i32, i32, std::cmp::Reverse<u64>) {
        let bucket_px = bucket_px.max(1);
        (
            self.y.div_euclid(bucket_px),
            self.x.div_euclid(bucket_px),
            std::cmp::Reverse(self.area),
        )
    }
}

/// 안정 정렬로 후보 순위 매기기
///
/// 버킷과 면적이 모두 같은 후보끼리는 입력(드라이버 열거) 순서를 그대로 따른다.
/// 따라서 같은 DOM에 대해 열거 순서가 매번 같은 드라이버여야 선택 순서도 재현된다.
pub fn rank_candidates(candidates: &mut [ElementCandidate], bucket_px: i32) {
    candidates.sort_by_key(|c| c.rank_key(bucket_px));
}
