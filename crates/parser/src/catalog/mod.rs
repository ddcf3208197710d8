//! 내장 패턴 카탈로그
//!
//! 지원하는 명령 출력마다 패턴 세트 하나를 정의합니다.
//! [`PatternCatalog::builtin`]은 모든 세트를 한 번에 컴파일하며,
//! 결과는 불변 값으로 수집기에 명시적으로 전달됩니다.
//!
//! | 세트 | 원본 | 구분자 | 필수 필드 |
//! |------|------|--------|-----------|
//! | `cpuinfo` | `/proc/cpuinfo` | 빈 줄 | `processor` |
//! | `dmidecode` | `dmidecode` | 없음 | - |
//! | `lspci_nnmm` | `lspci -nnmm` | 줄바꿈 | bus id, class, vendor id, device id |
//! | `lspci_vv` | `lspci -vv` | 빈 줄 | bus id, class name, device string |
//! | `lspci_n` | `lspci -n` | 줄바꿈 | bus id, class, vendor id, device id |
//! | `biosdevname` | `biosdevname -d` | 빈 줄 | `bios_device`, `kernel_name` |
//! | `os_inventory` | `/etc/xensource-inventory` | 없음 | - |

pub mod biosdevname;
pub mod cpuinfo;
pub mod dmidecode;
pub mod inventory;
pub mod lspci;

use tracing::debug;

use hwinfo_core::error::ExtractError;

use crate::pattern::PatternSet;

/// 컴파일된 내장 패턴 세트 모음
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    cpuinfo: PatternSet,
    dmidecode: PatternSet,
    lspci_nnmm: PatternSet,
    lspci_vv: PatternSet,
    lspci_n: PatternSet,
    biosdevname: PatternSet,
    os_inventory: PatternSet,
}

impl PatternCatalog {
    /// 모든 내장 패턴 세트를 컴파일합니다.
    pub fn builtin() -> Result<Self, ExtractError> {
        let catalog = Self {
            cpuinfo: cpuinfo::pattern_set()?,
            dmidecode: dmidecode::pattern_set()?,
            lspci_nnmm: lspci::nnmm_pattern_set()?,
            lspci_vv: lspci::verbose_pattern_set()?,
            lspci_n: lspci::numeric_pattern_set()?,
            biosdevname: biosdevname::pattern_set()?,
            os_inventory: inventory::pattern_set()?,
        };
        debug!(sets = catalog.iter().count(), "compiled built-in pattern catalog");
        Ok(catalog)
    }

    pub fn cpuinfo(&self) -> &PatternSet {
        &self.cpuinfo
    }

    pub fn dmidecode(&self) -> &PatternSet {
        &self.dmidecode
    }

    pub fn lspci_nnmm(&self) -> &PatternSet {
        &self.lspci_nnmm
    }

    pub fn lspci_vv(&self) -> &PatternSet {
        &self.lspci_vv
    }

    pub fn lspci_n(&self) -> &PatternSet {
        &self.lspci_n
    }

    pub fn biosdevname(&self) -> &PatternSet {
        &self.biosdevname
    }

    pub fn os_inventory(&self) -> &PatternSet {
        &self.os_inventory
    }

    /// 이름으로 패턴 세트를 찾습니다.
    pub fn get(&self, name: &str) -> Option<&PatternSet> {
        self.iter().find(|set| set.name() == name)
    }

    /// 모든 패턴 세트 (고정 순서)
    pub fn iter(&self) -> impl Iterator<Item = &PatternSet> {
        [
            &self.cpuinfo,
            &self.dmidecode,
            &self.lspci_nnmm,
            &self.lspci_vv,
            &self.lspci_n,
            &self.biosdevname,
            &self.os_inventory,
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_compiles() {
        let catalog = PatternCatalog::builtin().unwrap();
        assert_eq!(catalog.iter().count(), 7);
    }

    #[test]
    fn lookup_by_name() {
        let catalog = PatternCatalog::builtin().unwrap();
        for name in [
            cpuinfo::NAME,
            dmidecode::NAME,
            lspci::NNMM_NAME,
            lspci::VERBOSE_NAME,
            lspci::NUMERIC_NAME,
            biosdevname::NAME,
            inventory::NAME,
        ] {
            assert_eq!(catalog.get(name).map(PatternSet::name), Some(name));
        }
        assert!(catalog.get("meminfo").is_none());
    }

    #[test]
    fn record_modes_match_source_layout() {
        let catalog = PatternCatalog::builtin().unwrap();
        assert!(catalog.cpuinfo().is_multi_record());
        assert!(!catalog.dmidecode().is_multi_record());
        assert!(catalog.lspci_nnmm().is_multi_record());
        assert!(catalog.lspci_vv().is_multi_record());
        assert!(catalog.lspci_n().is_multi_record());
        assert!(catalog.biosdevname().is_multi_record());
        assert!(!catalog.os_inventory().is_multi_record());
    }
}
