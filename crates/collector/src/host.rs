//! 호스트 인벤토리 -- 원본 텍스트 조회와 내장 패턴 세트 해석
//!
//! [`Host`]는 [`DataSource`]에서 정보 종류별 텍스트를 가져와
//! [`PatternCatalog`]의 패턴 세트로 레코드를 만듭니다.
//!
//! # 내부 흐름
//! ```text
//! Host::get_pci_devices()
//!      |
//!      |-- fetch(Lspci) ──> extract_all_validated(lspci_nnmm)
//!      |        |
//!      |    FileNotFound
//!      |        v
//!      |-- fetch(LspciVerbose) + fetch(LspciNumeric)
//!      |        └──> merge_by_key(pci_device_bus_id)
//!      v
//!  Vec<PciDevice>
//! ```

use std::time::Instant;

use tracing::{debug, info, warn};

use hwinfo_core::error::HwinfoError;
use hwinfo_core::metrics as m;
use hwinfo_core::types::Record;
use hwinfo_parser::catalog::dmidecode::SOCKET_DESIGNATION;
use hwinfo_parser::device::fields;
use hwinfo_parser::{
    FallbackPolicy, PatternCatalog, PatternSet, PciDevice, extract_all_validated, extract_one,
    merge_by_key,
};

use crate::source::{DataSource, InfoSource};

/// 소켓 수 필드 (dmidecode 레코드에 추가됨)
pub const SOCKET_COUNT: &str = "socket_count";

/// 호스트 인벤토리 조회기
///
/// 소스 종류(로컬, SSH, 로그 디렉토리, 아카이브, 메모리)와 관계없이
/// 같은 조회 연산을 제공합니다.
///
/// # 사용 예시
/// ```ignore
/// use hwinfo_collector::{Host, LocalSource};
/// use hwinfo_parser::PatternCatalog;
///
/// let source = LocalSource::from_config(config.commands.clone());
/// let host = Host::new(source, PatternCatalog::builtin()?);
/// let cpus = host.get_cpu_info().await?;
/// ```
#[derive(Debug)]
pub struct Host<S: DataSource> {
    /// 원본 텍스트 소스
    source: S,
    /// 내장 패턴 세트
    catalog: PatternCatalog,
    /// PCI 장치 이름 대체 정책
    policy: FallbackPolicy,
}

impl<S: DataSource> Host<S> {
    /// 기본 대체 정책(`Lenient`)으로 생성합니다.
    pub fn new(source: S, catalog: PatternCatalog) -> Self {
        Self {
            source,
            catalog,
            policy: FallbackPolicy::default(),
        }
    }

    /// PCI 장치 이름 대체 정책을 지정합니다.
    pub fn with_policy(mut self, policy: FallbackPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    /// PCI 장치 목록
    ///
    /// `lspci -nnmm` 출력을 우선 사용하고, 소스에 해당 파일이 없으면
    /// `lspci -vv`와 `lspci -n` 출력을 bus id로 병합해 대신 사용합니다.
    pub async fn get_pci_devices(&self) -> Result<Vec<PciDevice>, HwinfoError> {
        let records = match self.fetch(InfoSource::Lspci).await {
            Ok(text) => listing(self.catalog.lspci_nnmm(), &text)?,
            Err(e) if e.is_not_found() => {
                warn!(
                    error = %e,
                    "lspci -nnmm output not found, falling back to lspci -vv and lspci -n"
                );
                self.verbose_numeric_records().await?
            }
            Err(e) => return Err(e),
        };

        info!(devices = records.len(), "collected pci devices");
        Ok(records
            .into_iter()
            .map(|record| PciDevice::with_policy(record, self.policy))
            .collect())
    }

    async fn verbose_numeric_records(&self) -> Result<Vec<Record>, HwinfoError> {
        let verbose = self.fetch(InfoSource::LspciVerbose).await?;
        let numeric = self.fetch(InfoSource::LspciNumeric).await?;

        let verbose = listing(self.catalog.lspci_vv(), &verbose)?;
        let numeric = listing(self.catalog.lspci_n(), &numeric)?;
        Ok(merge_by_key(
            verbose.into_iter().chain(numeric),
            fields::BUS_ID,
        )?)
    }

    /// BIOS / 시스템 정보
    ///
    /// dmidecode 레코드에 `socket_count`를 더하고, OS 인벤토리를 읽을 수 있으면
    /// `os`, `version`, `build` 필드도 더합니다. OS 인벤토리 실패는 무시합니다.
    pub async fn get_info(&self) -> Result<Record, HwinfoError> {
        let text = self.fetch(InfoSource::Dmidecode).await?;
        let mut record = extract_one(self.catalog.dmidecode(), &text)?;

        if let Some(sockets) = record.get(SOCKET_DESIGNATION) {
            let count = sockets.split(',').count();
            record.insert(SOCKET_COUNT, count.to_string());
        }

        match self.get_os_info().await {
            Ok(os) => record.extend(os),
            Err(e) => warn!(error = %e, "skipping os inventory"),
        }

        info!(fields = record.len(), "collected bios info");
        Ok(record)
    }

    /// OS 인벤토리 (`os`, `version`, `build`)
    pub async fn get_os_info(&self) -> Result<Record, HwinfoError> {
        let text = self.fetch(InfoSource::OsInventory).await?;
        Ok(extract_one(self.catalog.os_inventory(), &text)?)
    }

    /// 논리 프로세서별 CPU 레코드
    pub async fn get_cpu_info(&self) -> Result<Vec<Record>, HwinfoError> {
        let text = self.fetch(InfoSource::Cpuinfo).await?;
        let records = listing(self.catalog.cpuinfo(), &text)?;
        info!(processors = records.len(), "collected cpu info");
        Ok(records)
    }

    /// `biosdevname -d`가 보고하는 네트워크 인터페이스 레코드
    pub async fn get_network_interfaces(&self) -> Result<Vec<Record>, HwinfoError> {
        let text = self.fetch(InfoSource::Biosdevname).await?;
        let records = listing(self.catalog.biosdevname(), &text)?;
        info!(interfaces = records.len(), "collected network interfaces");
        Ok(records)
    }

    /// 소스에서 텍스트를 가져오며 조회 메트릭을 기록합니다.
    async fn fetch(&self, source: InfoSource) -> Result<String, HwinfoError> {
        let kind = self.source.kind();
        let started = Instant::now();
        let result = self.source.fetch(source).await;
        let elapsed = started.elapsed();

        let outcome = if result.is_ok() { "success" } else { "failure" };
        metrics::counter!(m::COLLECTOR_FETCHES_TOTAL, m::LABEL_SOURCE => kind, m::LABEL_RESULT => outcome)
            .increment(1);
        metrics::histogram!(m::COLLECTOR_FETCH_DURATION_SECONDS, m::LABEL_SOURCE => kind)
            .record(elapsed.as_secs_f64());

        debug!(
            %source,
            source_kind = kind,
            elapsed_ms = elapsed.as_millis() as u64,
            outcome,
            "fetched raw text"
        );
        result
    }
}

/// 다중 레코드 목록을 검증하며 추출합니다. 빈 출력은 빈 목록입니다.
fn listing(set: &PatternSet, text: &str) -> Result<Vec<Record>, HwinfoError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(extract_all_validated(set, text)?)
}
