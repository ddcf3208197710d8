//! 도메인 타입 -- 추출 레코드와 인벤토리 분류

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 추출 레코드 -- 필드 이름에서 필드 값으로의 매핑
///
/// 한 아이템(구분자로 잘린 텍스트 조각)에서 새로 만들어집니다.
/// 매칭되지 않은 필드는 `None`이 아니라 아예 키가 없습니다.
/// 키는 정렬된 순서로 유지되어 렌더링과 JSON 출력이 결정적입니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, String>,
}

impl Record {
    /// 빈 레코드를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 필드 값을 조회합니다.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// 필드 존재 여부
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// 필드를 설정하고 이전 값을 반환합니다.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.fields.insert(field.into(), value.into())
    }

    /// 필드를 제거합니다.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    /// 필드 개수
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 필드 이름 순서로 (이름, 값) 쌍을 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 필드 이름 목록
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Record {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.fields.insert(k.into(), v.into());
        }
    }
}

impl IntoIterator for Record {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// 인벤토리 조회 분류
///
/// CLI의 `--filter` 값과 설정의 `output.default_filters` 값에 사용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// BIOS / 시스템 정보 (dmidecode)
    Bios,
    /// CPU 정보 (/proc/cpuinfo)
    Cpu,
    /// 네트워크 컨트롤러 (PCI class 02)
    Nic,
    /// 스토리지 컨트롤러 (PCI class 00, 01, 0c04, 0c06)
    Storage,
    /// 디스플레이 컨트롤러 (PCI class 03)
    Gpu,
}

impl Category {
    /// 전체 분류 (출력 순서)
    pub const ALL: [Category; 5] = [
        Category::Bios,
        Category::Cpu,
        Category::Nic,
        Category::Storage,
        Category::Gpu,
    ];

    /// 소문자 이름
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bios => "bios",
            Self::Cpu => "cpu",
            Self::Nic => "nic",
            Self::Storage => "storage",
            Self::Gpu => "gpu",
        }
    }

    /// PCI 장치 분류인지 여부
    pub fn is_pci(&self) -> bool {
        matches!(self, Self::Nic | Self::Storage | Self::Gpu)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bios" => Ok(Self::Bios),
            "cpu" => Ok(Self::Cpu),
            "nic" => Ok(Self::Nic),
            "storage" => Ok(Self::Storage),
            "gpu" => Ok(Self::Gpu),
            other => Err(ConfigError::InvalidValue {
                field: "filter".to_owned(),
                reason: format!(
                    "unknown category '{other}' (expected: bios, cpu, nic, storage, gpu)"
                ),
            }),
        }
    }
}
