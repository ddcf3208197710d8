#![doc = include_str!("../README.md")]
//!
//! # 모듈 구성
//!
//! - [`pattern`]: 패턴과 패턴 세트, 구성 시점 검증
//! - [`extract`]: 아이템 분할과 레코드 추출, 필수 필드 검증
//! - [`merge`]: 키 필드 기반 소스 간 레코드 병합
//! - [`device`]: PCI 장치 모델과 대체 정책
//! - [`filter`]: PCI class 기반 분류
//! - [`catalog`]: 내장 패턴 세트
//!
//! 추출 엔진은 동기식이며 부수 효과가 없습니다. 같은 [`PatternSet`]을
//! 여러 스레드에서 동시에 사용해도 안전합니다.

pub mod catalog;
pub mod device;
pub mod extract;
pub mod filter;
pub mod merge;
pub mod pattern;

// --- 주요 타입 re-export ---

pub use catalog::PatternCatalog;
pub use device::{DeviceSummary, FallbackPolicy, PciDevice};
pub use extract::{
    extract_all, extract_all_validated, extract_item, extract_one, extract_one_validated,
};
pub use filter::{filter_by_category, filter_by_class};
pub use merge::merge_by_key;
pub use pattern::{Pattern, PatternSet, PatternSetBuilder, RecordMode};
