//! `/proc/cpuinfo` 패턴 세트
//!
//! 논리 프로세서마다 빈 줄로 구분된 블록 하나가 레코드 하나가 됩니다.
//! 각 줄은 `<label><공백/탭>: <value>` 형식이며, 값이 없는 줄
//! (`power management:`)은 빈 문자열로 추출됩니다.

use hwinfo_core::error::ExtractError;

use crate::pattern::PatternSet;

pub const NAME: &str = "cpuinfo";

/// (cpuinfo 라벨, 필드 이름)
const LABELS: &[(&str, &str)] = &[
    ("processor", "processor"),
    ("vendor_id", "vendor_id"),
    ("cpu family", "cpu_family"),
    ("model", "model"),
    ("model name", "model_name"),
    ("stepping", "stepping"),
    ("microcode", "microcode"),
    ("cpu MHz", "cpu_mhz"),
    ("cache size", "cache_size"),
    ("fpu", "fpu"),
    ("fpu_exception", "fpu_exception"),
    ("cpuid level", "cpuid_level"),
    ("wp", "wp"),
    ("flags", "flags"),
    ("bogomips", "bogomips"),
    ("clflush size", "clflush_size"),
    ("cache_alignment", "cache_alignment"),
    ("address sizes", "address_sizes"),
    ("power management", "power_management"),
];

/// 라벨은 줄 시작에 고정되고 바로 뒤에 공백/탭과 `:`가 와야 하므로
/// `model`이 `model name` 줄에, `fpu`가 `fpu_exception` 줄에 매칭되지 않습니다.
fn line_pattern(label: &str, field: &str) -> String {
    format!(r"(?m)^{}[ \t]*: ?(?P<{field}>.*)$", regex::escape(label))
}

pub fn pattern_set() -> Result<PatternSet, ExtractError> {
    PatternSet::builder(NAME)
        .patterns(LABELS.iter().map(|(label, field)| line_pattern(label, field)))
        .separator("\n\n")
        .mandatory(["processor"])
        .build()
}
