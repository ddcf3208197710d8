//! PCI 장치 모델
//!
//! [`PciDevice`]는 추출된 PCI 레코드 하나를 감싸고 의미 있는 접근자를 제공합니다.
//! 값이 없을 때의 대체 규칙은 생성 시점에 [`FallbackPolicy`]로 고릅니다.
//!
//! | 정책 | 이름 대체 | 누락 값 표시 | `is_subdevice` |
//! |------|-----------|--------------|----------------|
//! | `Lenient` (기본) | `pci_device_string` / `pci_device_sub_string` (`-`로 감쌈) | `unknown` | subsystem ID 쌍 또는 sub string |
//! | `Strict` | 없음 | 빈 문자열 | subsystem ID 쌍 |

use serde::Serialize;

use hwinfo_core::types::Record;

/// PCI 레코드 필드 이름
pub mod fields {
    pub const BUS_ID: &str = "pci_device_bus_id";
    pub const CLASS: &str = "pci_device_class";
    pub const CLASS_NAME: &str = "pci_device_class_name";
    pub const VENDOR_NAME: &str = "pci_vendor_name";
    pub const VENDOR_ID: &str = "pci_vendor_id";
    pub const DEVICE_NAME: &str = "pci_device_name";
    pub const DEVICE_ID: &str = "pci_device_id";
    pub const SUBVENDOR_NAME: &str = "pci_subvendor_name";
    pub const SUBVENDOR_ID: &str = "pci_subvendor_id";
    pub const SUBDEVICE_NAME: &str = "pci_subdevice_name";
    pub const SUBDEVICE_ID: &str = "pci_subdevice_id";
    /// `lspci -vv` 첫 줄의 장치 설명 전체
    pub const DEVICE_STRING: &str = "pci_device_string";
    /// `lspci -vv`의 `Subsystem:` 줄
    pub const DEVICE_SUB_STRING: &str = "pci_device_sub_string";
    /// VPD의 `Product Name:`
    pub const VPD_PRODUCT_NAME: &str = "pci_device_vpd_product_name";
}

/// pci.ids 데이터베이스에 이름이 없을 때 lspci가 출력하는 값
const UNNAMED_SENTINEL: &str = "Device";

/// `Lenient` 정책의 누락 값 표시
const UNKNOWN: &str = "unknown";

/// 대체 문자열을 감싸는 표시
const FALLBACK_MARKER: &str = "-";

/// 누락 값 대체 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// 설명 문자열로 이름을 대체하고 누락 값을 `unknown`으로 표시
    #[default]
    Lenient,
    /// 레코드에 직접 있는 필드만 사용하고 누락 값은 빈 문자열
    Strict,
}

/// 추출된 PCI 레코드 위의 읽기 전용 장치 모델
#[derive(Debug, Clone, PartialEq)]
pub struct PciDevice {
    record: Record,
    policy: FallbackPolicy,
}

impl PciDevice {
    /// 기본 정책(`Lenient`)으로 생성합니다.
    pub fn new(record: Record) -> Self {
        Self::with_policy(record, FallbackPolicy::default())
    }

    pub fn with_policy(record: Record, policy: FallbackPolicy) -> Self {
        Self { record, policy }
    }

    /// 원본 레코드
    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn policy(&self) -> FallbackPolicy {
        self.policy
    }

    /// 비어 있지 않은 필드 값
    fn lookup(&self, field: &str) -> Option<&str> {
        self.record.get(field).filter(|v| !v.is_empty())
    }

    fn missing(&self) -> String {
        match self.policy {
            FallbackPolicy::Lenient => UNKNOWN.to_owned(),
            FallbackPolicy::Strict => String::new(),
        }
    }

    fn direct(&self, field: &str) -> String {
        self.lookup(field)
            .map(str::to_owned)
            .unwrap_or_else(|| self.missing())
    }

    /// 이름 필드 해석: 직접 필드 → (Lenient) 대체 필드 → 누락 표시
    fn resolve_name(&self, field: &str, fallback: &str, id: String) -> String {
        let (name, wrapped) = match self.lookup(field) {
            Some(name) => (Some(name), false),
            None if self.policy == FallbackPolicy::Lenient => (self.lookup(fallback), true),
            None => (None, false),
        };

        match name {
            Some(UNNAMED_SENTINEL) => format!("{UNKNOWN} [{id}]"),
            Some(name) if wrapped => format!("{FALLBACK_MARKER}{name}{FALLBACK_MARKER}"),
            Some(name) => name.to_owned(),
            None => self.missing(),
        }
    }

    pub fn get_device_name(&self) -> String {
        self.resolve_name(
            fields::DEVICE_NAME,
            fields::DEVICE_STRING,
            self.get_device_id(),
        )
    }

    pub fn get_device_id(&self) -> String {
        self.direct(fields::DEVICE_ID)
    }

    pub fn get_device_bus_id(&self) -> String {
        self.direct(fields::BUS_ID)
    }

    pub fn get_vendor_name(&self) -> String {
        self.direct(fields::VENDOR_NAME)
    }

    pub fn get_vendor_id(&self) -> String {
        self.direct(fields::VENDOR_ID)
    }

    pub fn get_subdevice_name(&self) -> String {
        self.resolve_name(
            fields::SUBDEVICE_NAME,
            fields::DEVICE_SUB_STRING,
            self.get_subdevice_id(),
        )
    }

    pub fn get_subdevice_id(&self) -> String {
        self.direct(fields::SUBDEVICE_ID)
    }

    pub fn get_subvendor_name(&self) -> String {
        self.direct(fields::SUBVENDOR_NAME)
    }

    pub fn get_subvendor_id(&self) -> String {
        self.direct(fields::SUBVENDOR_ID)
    }

    /// 숫자 class 코드 (예: `0200`)
    pub fn get_pci_class(&self) -> String {
        self.direct(fields::CLASS)
    }

    /// class 이름 (예: `Ethernet controller`)
    pub fn get_pci_class_name(&self) -> String {
        self.direct(fields::CLASS_NAME)
    }

    /// `vendor:device subvendor:subdevice`
    pub fn get_pci_id(&self) -> String {
        format!(
            "{}:{} {}:{}",
            self.get_vendor_id(),
            self.get_device_id(),
            self.get_subvendor_id(),
            self.get_subdevice_id()
        )
    }

    /// subsystem 정보가 있는 장치인지 여부
    pub fn is_subdevice(&self) -> bool {
        let has_ids = self.lookup(fields::SUBVENDOR_ID).is_some()
            && self.lookup(fields::SUBDEVICE_ID).is_some();
        match self.policy {
            FallbackPolicy::Lenient => {
                has_ids || self.lookup(fields::DEVICE_SUB_STRING).is_some()
            }
            FallbackPolicy::Strict => has_ids,
        }
    }

    /// 사람이 읽는 한 줄 설명
    ///
    /// subsystem이 있으면 `<subvendor> <subdevice> (<vendor> <device>)`,
    /// 없으면 `<vendor> <device>`.
    pub fn get_info(&self) -> String {
        if self.is_subdevice() {
            format!(
                "{} {} ({} {})",
                self.get_subvendor_name(),
                self.get_subdevice_name(),
                self.get_vendor_name(),
                self.get_device_name()
            )
        } else {
            format!("{} {}", self.get_vendor_name(), self.get_device_name())
        }
    }

    /// 내보내기용 요약
    pub fn summary(&self) -> DeviceSummary {
        DeviceSummary {
            device_bus_id: self.get_device_bus_id(),
            vendor_name: self.get_vendor_name(),
            vendor_id: self.get_vendor_id(),
            device_name: self.get_device_name(),
            device_id: self.get_device_id(),
            class: self.get_pci_class(),
            subvendor_name: self.get_subvendor_name(),
            subvendor_id: self.get_subvendor_id(),
            subdevice_name: self.get_subdevice_name(),
            subdevice_id: self.get_subdevice_id(),
        }
    }
}

impl From<Record> for PciDevice {
    fn from(record: Record) -> Self {
        Self::new(record)
    }
}

/// 장치 내보내기 열 (표 / JSON)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceSummary {
    pub device_bus_id: String,
    pub vendor_name: String,
    pub vendor_id: String,
    pub device_name: String,
    pub device_id: String,
    pub class: String,
    pub subvendor_name: String,
    pub subvendor_id: String,
    pub subdevice_name: String,
    pub subdevice_id: String,
}

impl DeviceSummary {
    /// 표 머리글 (열 순서)
    pub const COLUMNS: [&'static str; 10] = [
        "device_bus_id",
        "vendor_name",
        "vendor_id",
        "device_name",
        "device_id",
        "class",
        "subvendor_name",
        "subvendor_id",
        "subdevice_name",
        "subdevice_id",
    ];

    /// [`Self::COLUMNS`] 순서의 값
    pub fn values(&self) -> [&str; 10] {
        [
            self.device_bus_id.as_str(),
            self.vendor_name.as_str(),
            self.vendor_id.as_str(),
            self.device_name.as_str(),
            self.device_id.as_str(),
            self.class.as_str(),
            self.subvendor_name.as_str(),
            self.subvendor_id.as_str(),
            self.subdevice_name.as_str(),
            self.subdevice_id.as_str(),
        ]
    }
}
