//! 패턴과 패턴 세트
//!
//! [`Pattern`]은 이름 있는 캡처 그룹을 하나 이상 가진 컴파일된 정규식입니다.
//! [`PatternSet`]은 순서 있는 패턴 목록과 파서 설정(아이템 구분자, 필수 필드)을 묶습니다.
//!
//! 패턴 세트는 [`PatternSet::builder`]로 구성하며, 구성 시점에 다음을 검증합니다:
//! - 정규식 문법
//! - 패턴마다 이름 있는 캡처 그룹이 하나 이상 존재
//! - 구분자가 빈 문자열이 아님
//! - 모든 필수 필드가 어떤 패턴에서든 생성 가능

use std::collections::BTreeSet;

use regex::Regex;

use hwinfo_core::error::ExtractError;
use hwinfo_core::types::Record;

/// 컴파일된 추출 패턴
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    /// 이름 있는 캡처 그룹 (선언 순서)
    fields: Vec<String>,
}

impl Pattern {
    /// 패턴 문자열을 컴파일합니다.
    ///
    /// `set`은 에러 메시지에 사용할 패턴 세트 이름입니다.
    pub fn new(set: &str, source: &str) -> Result<Self, ExtractError> {
        let regex = Regex::new(source).map_err(|e| ExtractError::Pattern {
            set: set.to_owned(),
            pattern: source.to_owned(),
            reason: e.to_string(),
        })?;

        let fields: Vec<String> = regex
            .capture_names()
            .flatten()
            .map(str::to_owned)
            .collect();

        if fields.is_empty() {
            return Err(ExtractError::Pattern {
                set: set.to_owned(),
                pattern: source.to_owned(),
                reason: "pattern declares no named capture groups".to_owned(),
            });
        }

        Ok(Self { regex, fields })
    }

    /// 원본 패턴 문자열
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// 이 패턴이 생성할 수 있는 필드 이름
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// 레코드 모드
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordMode {
    /// 입력 전체가 하나의 아이템
    Single,
    /// 구분자로 잘린 아이템마다 레코드 하나
    Multi,
}

/// 순서 있는 패턴 목록 + 파서 설정
///
/// 구성 후에는 불변이며 `Send + Sync`입니다.
#[derive(Debug, Clone)]
pub struct PatternSet {
    name: String,
    patterns: Vec<Pattern>,
    separator: Option<String>,
    mandatory: Vec<String>,
}

impl PatternSet {
    /// 새 빌더를 생성합니다.
    pub fn builder(name: impl Into<String>) -> PatternSetBuilder {
        PatternSetBuilder {
            name: name.into(),
            patterns: Vec::new(),
            separator: None,
            mandatory: Vec::new(),
        }
    }

    /// 패턴 세트 이름 (로그와 에러 메시지용)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 선언 순서의 패턴 목록
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// 아이템 구분자
    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }

    /// 필수 필드 목록
    pub fn mandatory(&self) -> &[String] {
        &self.mandatory
    }

    /// 구분자 유무로 결정되는 레코드 모드
    pub fn mode(&self) -> RecordMode {
        if self.separator.is_some() {
            RecordMode::Multi
        } else {
            RecordMode::Single
        }
    }

    /// 다중 레코드 세트인지 여부
    pub fn is_multi_record(&self) -> bool {
        self.mode() == RecordMode::Multi
    }

    /// 모든 패턴이 생성할 수 있는 필드 이름의 합집합
    pub fn produced_fields(&self) -> BTreeSet<&str> {
        self.patterns
            .iter()
            .flat_map(|p| p.fields().iter().map(String::as_str))
            .collect()
    }

    /// 레코드에 필수 필드가 모두 있는지 검사합니다.
    ///
    /// `item`은 에러 메시지에 들어갈 아이템 위치입니다.
    pub fn validate(&self, record: &Record, item: usize) -> Result<(), ExtractError> {
        let missing: Vec<String> = self
            .mandatory
            .iter()
            .filter(|field| !record.contains(field.as_str()))
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ExtractError::Validation {
                set: self.name.clone(),
                item,
                missing,
            })
        }
    }
}

/// [`PatternSet`] 빌더
#[derive(Debug)]
pub struct PatternSetBuilder {
    name: String,
    patterns: Vec<String>,
    separator: Option<String>,
    mandatory: Vec<String>,
}

impl PatternSetBuilder {
    /// 패턴을 추가합니다. 선언 순서가 병합 우선순위입니다 (나중 패턴이 이김).
    pub fn pattern(mut self, source: impl Into<String>) -> Self {
        self.patterns.push(source.into());
        self
    }

    /// 여러 패턴을 순서대로 추가합니다.
    pub fn patterns<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(sources.into_iter().map(Into::into));
        self
    }

    /// 아이템 구분자를 설정합니다. 설정하면 다중 레코드 세트가 됩니다.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// 필수 필드를 설정합니다.
    pub fn mandatory<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mandatory.extend(fields.into_iter().map(Into::into));
        self
    }

    /// 패턴을 컴파일하고 설정을 검증합니다.
    pub fn build(self) -> Result<PatternSet, ExtractError> {
        if let Some(sep) = &self.separator {
            if sep.is_empty() {
                return Err(ExtractError::Pattern {
                    set: self.name,
                    pattern: String::new(),
                    reason: "item separator must not be empty".to_owned(),
                });
            }
        }

        let patterns = self
            .patterns
            .iter()
            .map(|source| Pattern::new(&self.name, source))
            .collect::<Result<Vec<_>, _>>()?;

        let set = PatternSet {
            name: self.name,
            patterns,
            separator: self.separator,
            mandatory: self.mandatory,
        };

        let produced = set.produced_fields();
        if let Some(field) = set
            .mandatory
            .iter()
            .find(|field| !produced.contains(field.as_str()))
        {
            return Err(ExtractError::Pattern {
                set: set.name.clone(),
                pattern: field.clone(),
                reason: format!("mandatory field '{field}' is not produced by any pattern"),
            });
        }

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_collects_group_names_in_order() {
        let p = Pattern::new("t", r"(?P<vendor>\w+):(?P<device>\w+)").unwrap();
        assert_eq!(p.fields(), ["vendor", "device"]);
    }

    #[test]
    fn pattern_rejects_bad_syntax() {
        let err = Pattern::new("t", r"(?P<broken>[a-z").unwrap_err();
        assert!(matches!(err, ExtractError::Pattern { .. }));
    }

    #[test]
    fn pattern_rejects_no_named_groups() {
        let err = Pattern::new("t", r"(\d+)").unwrap_err();
        assert!(err.to_string().contains("no named capture groups"));
    }

    #[test]
    fn builder_derives_mode_from_separator() {
        let single = PatternSet::builder("single")
            .pattern(r"(?P<a>\w+)")
            .build()
            .unwrap();
        assert_eq!(single.mode(), RecordMode::Single);
        assert!(!single.is_multi_record());

        let multi = PatternSet::builder("multi")
            .pattern(r"(?P<a>\w+)")
            .separator("\n\n")
            .build()
            .unwrap();
        assert_eq!(multi.mode(), RecordMode::Multi);
        assert_eq!(multi.separator(), Some("\n\n"));
    }

    #[test]
    fn builder_rejects_empty_separator() {
        let err = PatternSet::builder("t")
            .pattern(r"(?P<a>\w+)")
            .separator("")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("separator"));
    }

    #[test]
    fn builder_rejects_unsatisfiable_mandatory_field() {
        let err = PatternSet::builder("t")
            .pattern(r"(?P<a>\w+)")
            .mandatory(["a", "b"])
            .build()
            .unwrap_err();
        match err {
            ExtractError::Pattern { set, pattern, .. } => {
                assert_eq!(set, "t");
                assert_eq!(pattern, "b");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn builder_reports_first_bad_pattern() {
        let err = PatternSet::builder("t")
            .patterns([r"(?P<ok>\w+)", r"(?P<bad>"])
            .build()
            .unwrap_err();
        match err {
            ExtractError::Pattern { pattern, .. } => assert_eq!(pattern, r"(?P<bad>"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn produced_fields_is_union() {
        let set = PatternSet::builder("t")
            .patterns([r"(?P<a>x)(?P<b>y)", r"(?P<b>z)(?P<c>w)"])
            .build()
            .unwrap();
        let fields: Vec<_> = set.produced_fields().into_iter().collect();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn validate_lists_all_missing_fields() {
        let set = PatternSet::builder("t")
            .pattern(r"(?P<a>x)(?P<b>y)(?P<c>z)")
            .mandatory(["a", "b", "c"])
            .build()
            .unwrap();
        let rec: Record = [("b", "y")].into_iter().collect();
        match set.validate(&rec, 4).unwrap_err() {
            ExtractError::Validation { item, missing, .. } => {
                assert_eq!(item, 4);
                assert_eq!(missing, vec!["a", "c"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_accepts_empty_string_value() {
        let set = PatternSet::builder("t")
            .pattern(r"(?P<a>x*)")
            .mandatory(["a"])
            .build()
            .unwrap();
        let rec: Record = [("a", "")].into_iter().collect();
        set.validate(&rec, 0).unwrap();
    }

    #[test]
    fn pattern_set_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PatternSet>();
    }
}
