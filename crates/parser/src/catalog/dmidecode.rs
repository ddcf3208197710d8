//! `dmidecode` 패턴 세트 (BIOS / 시스템 / 섀시 / 프로세서 소켓)
//!
//! dmidecode 출력의 섹션은 제목 줄과 탭으로 들여쓴 속성 줄로 이루어집니다.
//! 각 패턴은 제목 줄에서 시작해 같은 섹션의 들여쓴 줄만 건너뛰며 속성을 찾습니다.
//! `Processor Information` 섹션은 소켓마다 반복되므로 소켓 이름이 `", "`로 결합됩니다.

use hwinfo_core::error::ExtractError;

use crate::pattern::PatternSet;

pub const NAME: &str = "dmidecode";

/// 다중 소켓 시스템에서 결합되는 필드
pub const SOCKET_DESIGNATION: &str = "socket_designation";

/// (섹션 제목, 속성 라벨, 필드 이름)
const ATTRIBUTES: &[(&str, &str, &str)] = &[
    ("BIOS Information", "Vendor", "bios_vendor_name"),
    ("BIOS Information", "Version", "bios_version"),
    ("BIOS Information", "Release Date", "bios_release_date"),
    ("System Information", "Manufacturer", "system_manufacturer"),
    ("System Information", "Product Name", "system_product_name"),
    ("System Information", "Serial Number", "system_serial_number"),
    ("System Information", "UUID", "system_uuid"),
    ("Chassis Information", "Type", "chassis_type"),
    ("Processor Information", "Socket Designation", SOCKET_DESIGNATION),
];

fn section_pattern(section: &str, label: &str, field: &str) -> String {
    format!(
        r"{}\n(?:\t.*\n)*?\t{}: (?P<{field}>.*)",
        regex::escape(section),
        regex::escape(label)
    )
}

pub fn pattern_set() -> Result<PatternSet, ExtractError> {
    PatternSet::builder(NAME)
        .patterns(
            ATTRIBUTES
                .iter()
                .map(|(section, label, field)| section_pattern(section, label, field)),
        )
        .build()
}
