//! `lspci` 출력 패턴 세트
//!
//! - `lspci -nnmm`: 한 줄에 장치 하나, 이름과 숫자 ID가 모두 있는 기계 판독 형식
//! - `lspci -vv`: 빈 줄로 구분된 상세 블록 (숫자 ID 없음)
//! - `lspci -n`: 한 줄에 장치 하나, 숫자 ID만 있음
//!
//! `-nnmm` 출력을 얻을 수 없을 때는 `-vv`와 `-n` 레코드를 bus id로 병합해 대신합니다.

use hwinfo_core::error::ExtractError;

use crate::device::fields;
use crate::pattern::PatternSet;

pub const NNMM_NAME: &str = "lspci_nnmm";
pub const VERBOSE_NAME: &str = "lspci_vv";
pub const NUMERIC_NAME: &str = "lspci_n";

/// `[dddd:]bb:dd.f`
const BUS_ID: &str = r"(?:[0-9a-fA-F]{4}:)?[0-9a-fA-F]{2}:[0-9a-fA-F]{2}\.[0-9a-fA-F]";

/// 4자리 16진수 ID
const CODE: &str = r"[0-9a-fA-F]{4}";

/// 따옴표 안의 `<label> [<code>]`. 라벨에는 쉼표나 대괄호가 들어갈 수 있습니다
/// (예: `SAS-2 [Spitfire] [0070]`), 그래서 마지막 ` [code]` 앞까지를 라벨로 봅니다.
fn labelled(name: &str, id: &str) -> String {
    format!(r#"(?P<{name}>[^"\n]+?) \[(?P<{id}>{CODE})\]"#)
}

/// `02:00.0 "Ethernet controller [0200]" "Broadcom Corporation [14e4]" "NetXtreme II BCM5716 Gigabit Ethernet [163b]" -r20 "Dell [1028]" "Device [02a3]"`
///
/// subsystem 칸은 비어 있을 수 있습니다 (`""`).
fn nnmm_pattern() -> String {
    format!(
        r#"(?m)^(?P<{bus}>{BUS_ID}) "{class}" "{vendor}" "{device}"(?: -\S+)* "(?:{subvendor})?" "(?:{subdevice})?"#,
        bus = fields::BUS_ID,
        class = labelled(fields::CLASS_NAME, fields::CLASS),
        vendor = labelled(fields::VENDOR_NAME, fields::VENDOR_ID),
        device = labelled(fields::DEVICE_NAME, fields::DEVICE_ID),
        subvendor = labelled(fields::SUBVENDOR_NAME, fields::SUBVENDOR_ID),
        subdevice = labelled(fields::SUBDEVICE_NAME, fields::SUBDEVICE_ID),
    )
}

pub fn nnmm_pattern_set() -> Result<PatternSet, ExtractError> {
    PatternSet::builder(NNMM_NAME)
        .pattern(nnmm_pattern())
        .separator("\n")
        .mandatory([
            fields::BUS_ID,
            fields::CLASS,
            fields::VENDOR_ID,
            fields::DEVICE_ID,
        ])
        .build()
}

pub fn verbose_pattern_set() -> Result<PatternSet, ExtractError> {
    PatternSet::builder(VERBOSE_NAME)
        .pattern(format!(
            r"(?m)^(?P<{bus}>{BUS_ID}) (?P<{class_name}>[^:\n]+): (?P<{string}>.*)$",
            bus = fields::BUS_ID,
            class_name = fields::CLASS_NAME,
            string = fields::DEVICE_STRING,
        ))
        .pattern(format!(
            r"Product Name: (?P<{}>.*)",
            fields::VPD_PRODUCT_NAME
        ))
        .pattern(format!(
            r"(?m)^\tSubsystem: (?P<{}>.*)$",
            fields::DEVICE_SUB_STRING
        ))
        .separator("\n\n")
        .mandatory([fields::BUS_ID, fields::CLASS_NAME, fields::DEVICE_STRING])
        .build()
}

/// `ff:0d.1 0880: 8086:0ee3 (rev 04)`
pub fn numeric_pattern_set() -> Result<PatternSet, ExtractError> {
    PatternSet::builder(NUMERIC_NAME)
        .pattern(format!(
            r"(?m)^(?P<{bus}>{BUS_ID}) (?P<{class}>{CODE}): (?P<{vendor}>{CODE}):(?P<{device}>{CODE})",
            bus = fields::BUS_ID,
            class = fields::CLASS,
            vendor = fields::VENDOR_ID,
            device = fields::DEVICE_ID,
        ))
        .separator("\n")
        .mandatory([
            fields::BUS_ID,
            fields::CLASS,
            fields::VENDOR_ID,
            fields::DEVICE_ID,
        ])
        .build()
}
