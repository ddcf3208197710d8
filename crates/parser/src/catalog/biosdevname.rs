//! `biosdevname -d` 패턴 세트 (네트워크 인터페이스 보고서)

use hwinfo_core::error::ExtractError;

use crate::pattern::PatternSet;

pub const NAME: &str = "biosdevname";

/// (라벨, 필드 이름). 일부 라벨은 콜론 앞에 정렬용 공백이 붙습니다.
const LABELS: &[(&str, &str)] = &[
    ("BIOS device", "bios_device"),
    ("Kernel name", "kernel_name"),
    ("Permanent MAC", "permanent_mac"),
    ("Assigned MAC", "assigned_mac"),
    ("Driver", "driver"),
    ("Driver version", "driver_version"),
    ("Firmware version", "firmware_version"),
    ("Bus Info", "bus_info"),
    ("PCI name", "pci_name"),
    ("PCI Slot", "pci_slot"),
    ("SMBIOS Device Type", "smbios_device_type"),
    ("SMBIOS Instance", "smbios_instance"),
    ("SMBIOS Label", "smbios_label"),
];

pub fn pattern_set() -> Result<PatternSet, ExtractError> {
    PatternSet::builder(NAME)
        .patterns(LABELS.iter().map(|(label, field)| {
            format!(
                r"(?m)^{}[ \t]*: (?P<{field}>.*)$",
                regex::escape(label)
            )
        }))
        .separator("\n\n")
        .mandatory(["bios_device", "kernel_name"])
        .build()
}
