//! 레코드 추출 -- 아이템 분할, 패턴 매칭, 다중 매칭 결합
//!
//! # 병합 규칙
//!
//! 한 아이템 안에서 패턴은 선언 순서대로 적용됩니다.
//! - 한 패턴의 모든 비중첩 매칭을 찾고, 매칭이 여러 개이면 필드별 값을 매칭 순서대로 `", "`로 잇습니다.
//! - 특정 매칭에 참여하지 않은 그룹은 그 매칭에서 아무 값도 내지 않습니다.
//! - 패턴 간에는 나중 패턴이 같은 이름의 필드를 덮어씁니다.
//!
//! 매칭 실패나 필드 누락은 에러가 아닙니다. 필수 필드 검사는
//! [`extract_all_validated`] / [`extract_one_validated`]로 명시적으로 요청합니다.

use tracing::debug;

use hwinfo_core::error::ExtractError;
use hwinfo_core::metrics as m;
use hwinfo_core::types::Record;

use crate::pattern::{Pattern, PatternSet};

/// 다중 매칭 값 결합 구분자
pub const MULTI_MATCH_JOINER: &str = ", ";

/// 아이템 하나에서 레코드를 추출합니다.
///
/// 매칭되는 패턴이 없으면 빈 레코드를 반환합니다.
pub fn extract_item(set: &PatternSet, item: &str) -> Record {
    let mut record = Record::new();
    for pattern in set.patterns() {
        apply_pattern(pattern, item, &mut record);
    }
    record
}

/// 패턴 하나의 모든 매칭을 결합해 레코드에 기록합니다.
fn apply_pattern(pattern: &Pattern, item: &str, record: &mut Record) {
    let fields = pattern.fields();
    let mut values: Vec<Vec<&str>> = vec![Vec::new(); fields.len()];

    for caps in pattern.regex().captures_iter(item) {
        for (slot, name) in values.iter_mut().zip(fields) {
            if let Some(group) = caps.name(name) {
                slot.push(group.as_str());
            }
        }
    }

    for (name, matched) in fields.iter().zip(values) {
        if !matched.is_empty() {
            record.insert(name.as_str(), matched.join(MULTI_MATCH_JOINER));
        }
    }
}

/// 입력 전체에서 아이템마다 레코드 하나씩 추출합니다.
///
/// - 구분자가 없으면 앞뒤 공백을 제거한 입력 전체가 아이템 하나입니다.
/// - 구분자가 있으면 구분자 문자열 그대로 순서대로 자릅니다. 빈 아이템도 유지합니다.
/// - 빈 입력은 빈 레코드 하나를 반환합니다.
pub fn extract_all(set: &PatternSet, raw: &str) -> Vec<Record> {
    let text = raw.trim();
    let records: Vec<Record> = match set.separator() {
        None => vec![extract_item(set, text)],
        Some(sep) => text.split(sep).map(|item| extract_item(set, item)).collect(),
    };

    debug!(
        pattern_set = set.name(),
        records = records.len(),
        "extracted records"
    );
    metrics::counter!(m::PARSER_RECORDS_EXTRACTED_TOTAL, m::LABEL_PATTERN_SET => set.name().to_owned())
        .increment(records.len() as u64);

    records
}

/// 반복되지 않는 세트에서 레코드 하나를 추출합니다.
///
/// 구분자가 선언된 세트에는 [`ExtractError::Configuration`]을 반환합니다.
pub fn extract_one(set: &PatternSet, raw: &str) -> Result<Record, ExtractError> {
    if let Some(sep) = set.separator() {
        return Err(ExtractError::Configuration {
            set: set.name().to_owned(),
            separator: sep.to_owned(),
        });
    }

    let record = extract_item(set, raw.trim());
    debug!(
        pattern_set = set.name(),
        fields = record.len(),
        "extracted single record"
    );
    metrics::counter!(m::PARSER_RECORDS_EXTRACTED_TOTAL, m::LABEL_PATTERN_SET => set.name().to_owned())
        .increment(1);

    Ok(record)
}

/// [`extract_all`] 후 모든 레코드의 필수 필드를 검사합니다.
///
/// 첫 번째로 실패한 아이템의 위치와 누락 필드를 담은 [`ExtractError::Validation`]을 반환합니다.
pub fn extract_all_validated(set: &PatternSet, raw: &str) -> Result<Vec<Record>, ExtractError> {
    let records = extract_all(set, raw);
    for (item, record) in records.iter().enumerate() {
        validate_counted(set, record, item)?;
    }
    Ok(records)
}

/// [`extract_one`] 후 필수 필드를 검사합니다.
pub fn extract_one_validated(set: &PatternSet, raw: &str) -> Result<Record, ExtractError> {
    let record = extract_one(set, raw)?;
    validate_counted(set, &record, 0)?;
    Ok(record)
}

fn validate_counted(set: &PatternSet, record: &Record, item: usize) -> Result<(), ExtractError> {
    set.validate(record, item).inspect_err(|_| {
        metrics::counter!(m::PARSER_VALIDATION_FAILURES_TOTAL, m::LABEL_PATTERN_SET => set.name().to_owned())
            .increment(1);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag_set() -> PatternSet {
        PatternSet::builder("flags")
            .pattern(r"flag: (?P<f>\w+)")
            .build()
            .unwrap()
    }

    #[test]
    fn multi_match_values_are_joined_in_order() {
        let rec = extract_item(&flag_set(), "flag: a\nflag: b\nflag: c");
        assert_eq!(rec.get("f"), Some("a, b, c"));
    }

    #[test]
    fn single_match_is_used_as_is() {
        let rec = extract_item(&flag_set(), "flag: only");
        assert_eq!(rec.get("f"), Some("only"));
    }

    #[test]
    fn no_match_yields_empty_record() {
        let rec = extract_item(&flag_set(), "nothing here");
        assert!(rec.is_empty());
    }

    #[test]
    fn later_pattern_overwrites_earlier_field() {
        let set = PatternSet::builder("t")
            .pattern(r"first=(?P<v>\w+)")
            .pattern(r"second=(?P<v>\w+)")
            .build()
            .unwrap();
        let rec = extract_item(&set, "first=1 second=2");
        assert_eq!(rec.get("v"), Some("2"));
    }

    #[test]
    fn later_pattern_without_match_keeps_earlier_field() {
        let set = PatternSet::builder("t")
            .pattern(r"first=(?P<v>\w+)")
            .pattern(r"second=(?P<v>\w+)")
            .build()
            .unwrap();
        let rec = extract_item(&set, "first=1");
        assert_eq!(rec.get("v"), Some("1"));
    }

    #[test]
    fn non_participating_group_contributes_nothing() {
        let set = PatternSet::builder("t")
            .pattern(r"(?m)^(?P<key>\w+)(?: = (?P<value>\w+))?$")
            .build()
            .unwrap();
        let rec = extract_item(&set, "a = 1\nb\nc = 3");
        assert_eq!(rec.get("key"), Some("a, b, c"));
        assert_eq!(rec.get("value"), Some("1, 3"));
    }

    #[test]
    fn group_that_never_participates_is_absent() {
        let set = PatternSet::builder("t")
            .pattern(r"(?P<key>\w+)(?: = (?P<value>\d+))?")
            .build()
            .unwrap();
        let rec = extract_item(&set, "alone");
        assert_eq!(rec.get("key"), Some("alone"));
        assert!(!rec.contains("value"));
    }

    #[test]
    fn empty_capture_is_kept_as_empty_string() {
        let set = PatternSet::builder("t")
            .pattern(r"(?m)^power management:(?P<pm>.*)$")
            .build()
            .unwrap();
        let rec = extract_item(&set, "power management:");
        assert_eq!(rec.get("pm"), Some(""));
    }

    #[test]
    fn split_on_blank_line_yields_each_item() {
        let set = PatternSet::builder("blocks")
            .pattern(r"(?s)(?P<all>.+)")
            .separator("\n\n")
            .build()
            .unwrap();
        let recs = extract_all(&set, "A\n\nB\n\nC");
        let values: Vec<_> = recs.iter().map(|r| r.get("all").unwrap()).collect();
        assert_eq!(values, vec!["A", "B", "C"]);
    }

    #[test]
    fn extract_all_trims_input_before_splitting() {
        let set = PatternSet::builder("lines")
            .pattern(r"(?P<line>\S+)")
            .separator("\n")
            .build()
            .unwrap();
        let recs = extract_all(&set, "\n\none\ntwo\n\n");
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].get("line"), Some("two"));
    }

    #[test]
    fn empty_items_are_retained() {
        let set = PatternSet::builder("lines")
            .pattern(r"(?P<line>\S+)")
            .separator("\n")
            .build()
            .unwrap();
        let recs = extract_all(&set, "one\n\nthree");
        assert_eq!(recs.len(), 3);
        assert!(recs[1].is_empty());
    }

    #[test]
    fn empty_input_yields_one_empty_record() {
        let multi = PatternSet::builder("m")
            .pattern(r"(?P<x>\w+)")
            .separator("\n")
            .build()
            .unwrap();
        assert_eq!(extract_all(&multi, "   \n "), vec![Record::new()]);
        assert_eq!(extract_all(&flag_set(), ""), vec![Record::new()]);
    }

    #[test]
    fn extract_one_rejects_multi_record_set() {
        let set = PatternSet::builder("cpuinfo")
            .pattern(r"(?P<x>\w+)")
            .separator("\n\n")
            .build()
            .unwrap();
        let err = extract_one(&set, "x").unwrap_err();
        assert_eq!(
            err,
            ExtractError::Configuration {
                set: "cpuinfo".to_owned(),
                separator: "\n\n".to_owned(),
            }
        );
    }

    #[test]
    fn extract_one_matches_single_element_of_extract_all() {
        let set = flag_set();
        let text = "  flag: x\nflag: y  ";
        let one = extract_one(&set, text).unwrap();
        let all = extract_all(&set, text);
        assert_eq!(all, vec![one]);
    }

    #[test]
    fn validated_reports_failing_item_index() {
        let set = PatternSet::builder("pairs")
            .pattern(r"(?P<k>[a-z]+)(?:=(?P<v>\d+))?")
            .separator(";")
            .mandatory(["k", "v"])
            .build()
            .unwrap();
        let err = extract_all_validated(&set, "a=1;b;c=3").unwrap_err();
        match err {
            ExtractError::Validation { item, missing, .. } => {
                assert_eq!(item, 1);
                assert_eq!(missing, vec!["v"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validated_passes_complete_records() {
        let set = PatternSet::builder("pairs")
            .pattern(r"(?P<k>[a-z]+)=(?P<v>\d+)")
            .separator(";")
            .mandatory(["k", "v"])
            .build()
            .unwrap();
        let recs = extract_all_validated(&set, "a=1;b=2").unwrap();
        assert_eq!(recs.len(), 2);
    }

    #[test]
    fn extract_one_validated_reports_missing_field() {
        let set = PatternSet::builder("single")
            .pattern(r"name: (?P<name>\w+)")
            .mandatory(["name"])
            .build()
            .unwrap();
        let err = extract_one_validated(&set, "nothing").unwrap_err();
        assert!(err.to_string().contains("missing mandatory fields: name"));
    }
}
