//! PCI class 코드 기반 장치 분류
//!
//! class 코드 (`pci_device_class`, 예: `0200`)의 접두어로 장치를 고릅니다.

use hwinfo_core::types::Category;

use crate::device::{PciDevice, fields};

/// 네트워크 컨트롤러
pub const NIC_CLASSES: &[&str] = &["02"];

/// 대용량 저장장치 컨트롤러 (미분류, 스토리지, Fibre Channel, SMBus 계열 HBA)
pub const STORAGE_CLASSES: &[&str] = &["00", "01", "0c04", "0c06"];

/// 디스플레이 컨트롤러
pub const GPU_CLASSES: &[&str] = &["03"];

/// 분류별 class 접두어. PCI 분류가 아니면 빈 목록입니다.
pub fn class_prefixes(category: Category) -> &'static [&'static str] {
    match category {
        Category::Nic => NIC_CLASSES,
        Category::Storage => STORAGE_CLASSES,
        Category::Gpu => GPU_CLASSES,
        Category::Bios | Category::Cpu => &[],
    }
}

/// class 코드가 접두어 중 하나로 시작하는지 확인합니다.
///
/// class 코드가 없는 장치는 어떤 접두어와도 맞지 않습니다.
pub fn matches_class(device: &PciDevice, prefixes: &[&str]) -> bool {
    device
        .record()
        .get(fields::CLASS)
        .is_some_and(|class| prefixes.iter().any(|p| class.starts_with(p)))
}

/// class 접두어로 장치를 고릅니다 (입력 순서 유지).
pub fn filter_by_class<'a>(devices: &'a [PciDevice], prefixes: &[&str]) -> Vec<&'a PciDevice> {
    devices
        .iter()
        .filter(|device| matches_class(device, prefixes))
        .collect()
}

/// 분류에 속하는 장치를 고릅니다.
pub fn filter_by_category(devices: &[PciDevice], category: Category) -> Vec<&PciDevice> {
    filter_by_class(devices, class_prefixes(category))
}
