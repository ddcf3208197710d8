//! 메트릭 상수 및 설명 등록
//!
//! 모든 메트릭의 이름과 설명을 중앙에서 정의합니다.
//! 각 크레이트는 이 상수를 사용하여 `metrics::counter!()`,
//! `metrics::histogram!()` 매크로를 호출합니다.
//! 레코더가 설치되지 않은 경우 매크로 호출은 아무 일도 하지 않습니다.
//!
//! # 네이밍 컨벤션
//!
//! - 접두어: `hwinfo_`
//! - 모듈명: `parser_`, `collector_`
//! - 접미어: `_total` (counter), `_seconds` (histogram/latency)
//!
//! # 사용 예시
//!
//! ```ignore
//! use metrics::counter;
//!
//! counter!(hwinfo_core::metrics::PARSER_RECORDS_EXTRACTED_TOTAL,
//!          hwinfo_core::metrics::LABEL_PATTERN_SET => "cpuinfo").increment(4);
//! ```

// ─── 레이블 키 상수 ────────────────────────────────────────────────

/// 패턴 세트 이름 레이블 키 (cpuinfo, dmidecode, lspci_nnmm, ...)
pub const LABEL_PATTERN_SET: &str = "pattern_set";

/// 수집 소스 종류 레이블 키 (local, ssh, logs, tarball, static)
pub const LABEL_SOURCE: &str = "source";

/// 결과 레이블 키 (success, failure)
pub const LABEL_RESULT: &str = "result";

// ─── Parser 메트릭 ──────────────────────────────────────────────────

/// Parser: 추출된 레코드 수 (counter, label: pattern_set)
pub const PARSER_RECORDS_EXTRACTED_TOTAL: &str = "hwinfo_parser_records_extracted_total";

/// Parser: 필수 필드 검증 실패 수 (counter, label: pattern_set)
pub const PARSER_VALIDATION_FAILURES_TOTAL: &str = "hwinfo_parser_validation_failures_total";

// ─── Collector 메트릭 ───────────────────────────────────────────────

/// Collector: 원본 텍스트 조회 수 (counter, labels: source, result)
pub const COLLECTOR_FETCHES_TOTAL: &str = "hwinfo_collector_fetches_total";

/// Collector: 원본 텍스트 조회 소요 시간 (histogram, 초, label: source)
pub const COLLECTOR_FETCH_DURATION_SECONDS: &str = "hwinfo_collector_fetch_duration_seconds";

// ─── 설명 등록 함수 ─────────────────────────────────────────────────

/// 모든 메트릭의 설명(description)을 등록합니다.
///
/// `hwinfo` CLI는 레코더를 설치하지 않으므로 이 함수를 호출하지 않습니다.
/// 수집기를 내장하는 애플리케이션이 자체 레코더(예: Prometheus exporter)를
/// 설치한 직후 한 번 호출하면 `hwinfo_*` 메트릭에 설명이 붙습니다.
pub fn describe_all() {
    use metrics::{describe_counter, describe_histogram};

    // Parser
    describe_counter!(
        PARSER_RECORDS_EXTRACTED_TOTAL,
        "Total number of records produced by the extraction engine"
    );
    describe_counter!(
        PARSER_VALIDATION_FAILURES_TOTAL,
        "Total number of extracted items missing mandatory fields"
    );

    // Collector
    describe_counter!(
        COLLECTOR_FETCHES_TOTAL,
        "Total number of raw text fetches from data sources"
    );
    describe_histogram!(
        COLLECTOR_FETCH_DURATION_SECONDS,
        "Time to fetch raw text from a data source in seconds"
    );
}
