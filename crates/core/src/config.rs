//! 설정 관리 -- hwinfo.toml 파싱 및 런타임 설정
//!
//! [`HwinfoConfig`]는 모든 크레이트의 설정을 담는 최상위 구조체입니다.
//!
//! # 설정 로딩 우선순위
//! 1. CLI 인자 (최고 우선)
//! 2. 환경변수 (`HWINFO_REMOTE_PORT=2222` 형식)
//! 3. 설정 파일 (`hwinfo.toml`)
//! 4. 기본값 (`Default` 구현)
//!
//! # 사용 예시
//! ```no_run
//! # async fn example() -> Result<(), hwinfo_core::error::HwinfoError> {
//! use hwinfo_core::config::HwinfoConfig;
//!
//! // 파일에서 로드 + 환경변수 오버라이드
//! let config = HwinfoConfig::load("hwinfo.toml").await?;
//!
//! // TOML 문자열에서 직접 파싱
//! let config = HwinfoConfig::parse("[general]\nlog_level = \"debug\"")?;
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, HwinfoError};
use crate::types::Category;

/// hwinfo 통합 설정
///
/// `hwinfo.toml` 파일의 최상위 구조를 나타냅니다.
/// 모든 섹션은 생략 가능하며, 생략된 섹션은 기본값을 사용합니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HwinfoConfig {
    /// 일반 설정
    #[serde(default)]
    pub general: GeneralConfig,
    /// 원격 (SSH) 수집 설정
    #[serde(default)]
    pub remote: RemoteConfig,
    /// 정보 분류별 실행 명령
    #[serde(default)]
    pub commands: CommandsConfig,
    /// 로그 디렉토리 / tarball 수집 설정
    #[serde(default)]
    pub logs: LogsConfig,
    /// 출력 설정
    #[serde(default)]
    pub output: OutputConfig,
}

impl HwinfoConfig {
    /// TOML 파일에서 설정을 로드하고 환경변수 오버라이드를 적용합니다.
    ///
    /// 설정 로딩 순서:
    /// 1. TOML 파일 파싱
    /// 2. 환경변수 오버라이드 적용
    /// 3. 유효성 검증
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, HwinfoError> {
        let mut config = Self::from_file(path).await?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// 설정 파일이 없으면 기본값으로 대신합니다.
    ///
    /// `inspect` 명령처럼 설정 파일 없이도 동작해야 하는 경우에 사용합니다.
    /// 파일이 존재하지만 잘못된 경우에는 에러를 반환합니다.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, HwinfoError> {
        let path = path.as_ref();
        let mut config = match Self::from_file(path).await {
            Ok(config) => config,
            Err(HwinfoError::Config(ConfigError::FileNotFound { .. })) => {
                debug!(path = %path.display(), "config file not found, using defaults");
                Self::default()
            }
            Err(e) => return Err(e),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// TOML 파일에서 설정을 로드합니다 (환경변수 오버라이드 없음).
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, HwinfoError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HwinfoError::Config(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                })
            } else {
                HwinfoError::Io(e)
            }
        })?;
        let config = Self::parse(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML 문자열에서 설정을 파싱합니다.
    pub fn parse(toml_str: &str) -> Result<Self, HwinfoError> {
        toml::from_str(toml_str).map_err(|e| {
            HwinfoError::Config(ConfigError::ParseFailed {
                reason: e.to_string(),
            })
        })
    }

    /// 환경변수로 설정값을 오버라이드합니다.
    ///
    /// 환경변수 네이밍 규칙: `HWINFO_{SECTION}_{FIELD}`
    /// 예: `HWINFO_REMOTE_CONNECT_TIMEOUT_SECS=5`
    pub fn apply_env_overrides(&mut self) {
        // General
        override_string(&mut self.general.log_level, "HWINFO_GENERAL_LOG_LEVEL");
        override_string(&mut self.general.log_format, "HWINFO_GENERAL_LOG_FORMAT");

        // Remote
        override_string(&mut self.remote.ssh_program, "HWINFO_REMOTE_SSH_PROGRAM");
        override_u16(&mut self.remote.port, "HWINFO_REMOTE_PORT");
        override_u64(
            &mut self.remote.connect_timeout_secs,
            "HWINFO_REMOTE_CONNECT_TIMEOUT_SECS",
        );
        override_u64(
            &mut self.remote.command_timeout_secs,
            "HWINFO_REMOTE_COMMAND_TIMEOUT_SECS",
        );
        override_bool(
            &mut self.remote.strict_host_key_checking,
            "HWINFO_REMOTE_STRICT_HOST_KEY_CHECKING",
        );

        // Commands
        override_string(&mut self.commands.lspci, "HWINFO_COMMANDS_LSPCI");
        override_string(&mut self.commands.lspci_verbose, "HWINFO_COMMANDS_LSPCI_VERBOSE");
        override_string(&mut self.commands.lspci_numeric, "HWINFO_COMMANDS_LSPCI_NUMERIC");
        override_string(&mut self.commands.dmidecode, "HWINFO_COMMANDS_DMIDECODE");
        override_string(&mut self.commands.cpuinfo, "HWINFO_COMMANDS_CPUINFO");
        override_string(&mut self.commands.biosdevname, "HWINFO_COMMANDS_BIOSDEVNAME");
        override_string(&mut self.commands.os_inventory, "HWINFO_COMMANDS_OS_INVENTORY");
        override_u64(&mut self.commands.timeout_secs, "HWINFO_COMMANDS_TIMEOUT_SECS");

        // Logs
        override_string(&mut self.logs.lspci, "HWINFO_LOGS_LSPCI");
        override_string(&mut self.logs.lspci_verbose, "HWINFO_LOGS_LSPCI_VERBOSE");
        override_string(&mut self.logs.lspci_numeric, "HWINFO_LOGS_LSPCI_NUMERIC");
        override_string(&mut self.logs.dmidecode, "HWINFO_LOGS_DMIDECODE");
        override_string(&mut self.logs.cpuinfo, "HWINFO_LOGS_CPUINFO");
        override_string(&mut self.logs.biosdevname, "HWINFO_LOGS_BIOSDEVNAME");
        override_string(&mut self.logs.os_inventory, "HWINFO_LOGS_OS_INVENTORY");
        override_string(&mut self.logs.exclude_marker, "HWINFO_LOGS_EXCLUDE_MARKER");
        override_bool(&mut self.logs.preload, "HWINFO_LOGS_PRELOAD");

        // Output
        override_csv(
            &mut self.output.default_filters,
            "HWINFO_OUTPUT_DEFAULT_FILTERS",
        );
    }

    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), HwinfoError> {
        // log_level 검증
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.general.log_level.as_str()) {
            return Err(invalid(
                "general.log_level",
                format!("must be one of: {}", valid_levels.join(", ")),
            ));
        }

        // log_format 검증
        let valid_formats = ["json", "pretty"];
        if !valid_formats.contains(&self.general.log_format.as_str()) {
            return Err(invalid(
                "general.log_format",
                format!("must be one of: {}", valid_formats.join(", ")),
            ));
        }

        // remote 검증
        if self.remote.ssh_program.trim().is_empty() {
            return Err(invalid("remote.ssh_program", "must not be empty".to_owned()));
        }
        if self.remote.port == 0 {
            return Err(invalid("remote.port", "must be greater than 0".to_owned()));
        }
        if self.remote.connect_timeout_secs == 0 {
            return Err(invalid(
                "remote.connect_timeout_secs",
                "must be greater than 0".to_owned(),
            ));
        }
        if self.remote.command_timeout_secs == 0 {
            return Err(invalid(
                "remote.command_timeout_secs",
                "must be greater than 0".to_owned(),
            ));
        }

        if self.commands.timeout_secs == 0 {
            return Err(invalid(
                "commands.timeout_secs",
                "must be greater than 0".to_owned(),
            ));
        }

        // 명령 / 파일 이름은 비어 있으면 안 됨
        for (field, value) in self.commands.entries() {
            if value.trim().is_empty() {
                return Err(invalid(
                    &format!("commands.{field}"),
                    "command must not be empty".to_owned(),
                ));
            }
        }
        for (field, value) in self.logs.entries() {
            if value.trim().is_empty() || value.contains('/') {
                return Err(invalid(
                    &format!("logs.{field}"),
                    "must be a bare, non-empty file name".to_owned(),
                ));
            }
        }

        // default_filters 검증
        for name in &self.output.default_filters {
            name.parse::<Category>().map_err(|e| match e {
                ConfigError::InvalidValue { reason, .. } => ConfigError::InvalidValue {
                    field: "output.default_filters".to_owned(),
                    reason,
                },
                other => other,
            })?;
        }

        Ok(())
    }

    /// `output.default_filters`를 분류 목록으로 변환합니다.
    ///
    /// 목록이 비어 있으면 전체 분류를 반환합니다.
    pub fn default_categories(&self) -> Result<Vec<Category>, ConfigError> {
        if self.output.default_filters.is_empty() {
            return Ok(Category::ALL.to_vec());
        }
        self.output
            .default_filters
            .iter()
            .map(|name| name.parse())
            .collect()
    }
}

fn invalid(field: &str, reason: String) -> HwinfoError {
    ConfigError::InvalidValue {
        field: field.to_owned(),
        reason,
    }
    .into()
}

/// 일반 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    pub log_level: String,
    /// 로그 형식 (json, pretty)
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_owned(),
            log_format: "pretty".to_owned(),
        }
    }
}

/// 원격 (SSH) 수집 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// OpenSSH 클라이언트 실행 파일
    pub ssh_program: String,
    /// SSH 포트
    pub port: u16,
    /// 연결 제한 시간 (초)
    pub connect_timeout_secs: u64,
    /// 명령 하나의 전체 제한 시간 (초)
    pub command_timeout_secs: u64,
    /// 호스트 키 엄격 검사 여부
    pub strict_host_key_checking: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            ssh_program: "ssh".to_owned(),
            port: 22,
            connect_timeout_secs: 10,
            command_timeout_secs: 60,
            strict_host_key_checking: false,
        }
    }
}

/// 정보 분류별 실행 명령 (로컬 / 원격 공통)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// PCI 목록 (기계 판독 형식, 숫자 ID 포함)
    pub lspci: String,
    /// PCI 상세 목록
    pub lspci_verbose: String,
    /// PCI 숫자 목록
    pub lspci_numeric: String,
    /// BIOS / 시스템 정보
    pub dmidecode: String,
    /// CPU 정보
    pub cpuinfo: String,
    /// 네트워크 인터페이스 보고서
    pub biosdevname: String,
    /// OS 인벤토리 (KEY='value' 형식)
    pub os_inventory: String,
    /// 로컬 명령 하나의 제한 시간 (초). 원격 명령은 `remote.command_timeout_secs`를 사용
    pub timeout_secs: u64,
}

impl CommandsConfig {
    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("lspci", &self.lspci),
            ("lspci_verbose", &self.lspci_verbose),
            ("lspci_numeric", &self.lspci_numeric),
            ("dmidecode", &self.dmidecode),
            ("cpuinfo", &self.cpuinfo),
            ("biosdevname", &self.biosdevname),
            ("os_inventory", &self.os_inventory),
        ]
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            lspci: "lspci -nnmm".to_owned(),
            lspci_verbose: "lspci -vv".to_owned(),
            lspci_numeric: "lspci -n".to_owned(),
            dmidecode: "dmidecode".to_owned(),
            cpuinfo: "cat /proc/cpuinfo".to_owned(),
            biosdevname: "biosdevname -d".to_owned(),
            os_inventory: "cat /etc/xensource-inventory".to_owned(),
            timeout_secs: 30,
        }
    }
}

/// 로그 디렉토리 / tarball 수집 설정
///
/// 각 값은 캡처된 명령 출력이 저장된 파일 이름입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogsConfig {
    pub lspci: String,
    pub lspci_verbose: String,
    pub lspci_numeric: String,
    pub dmidecode: String,
    pub cpuinfo: String,
    pub biosdevname: String,
    pub os_inventory: String,
    /// 이 문자열을 경로에 포함한 아카이브 항목은 무시 (크래시 덤프 등)
    pub exclude_marker: String,
    /// tarball을 열 때 알려진 파일을 한 번에 미리 읽을지 여부
    pub preload: bool,
}

impl LogsConfig {
    fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("lspci", &self.lspci),
            ("lspci_verbose", &self.lspci_verbose),
            ("lspci_numeric", &self.lspci_numeric),
            ("dmidecode", &self.dmidecode),
            ("cpuinfo", &self.cpuinfo),
            ("biosdevname", &self.biosdevname),
            ("os_inventory", &self.os_inventory),
        ]
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            lspci: "lspci-nnm.out".to_owned(),
            lspci_verbose: "lspci-vv.out".to_owned(),
            lspci_numeric: "lspci-n.out".to_owned(),
            dmidecode: "dmidecode.out".to_owned(),
            cpuinfo: "cpuinfo".to_owned(),
            biosdevname: "biosdevname-d.out".to_owned(),
            os_inventory: "xensource-inventory".to_owned(),
            exclude_marker: "/crash/".to_owned(),
            preload: true,
        }
    }
}

/// 출력 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// `--filter`가 없을 때 조회할 분류 (비어 있으면 전체)
    pub default_filters: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_filters: Category::ALL.iter().map(|c| c.as_str().to_owned()).collect(),
        }
    }
}

// --- 환경변수 오버라이드 헬퍼 ---

fn override_string(target: &mut String, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val;
    }
}

fn override_bool(target: &mut bool, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<bool>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse bool from env var, ignoring"
            ),
        }
    }
}

fn override_u16(target: &mut u16, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u16>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u16 from env var, ignoring"
            ),
        }
    }
}

fn override_u64(target: &mut u64, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        match val.parse::<u64>() {
            Ok(parsed) => *target = parsed,
            Err(_) => warn!(
                env_key,
                value = val.as_str(),
                "failed to parse u64 from env var, ignoring"
            ),
        }
    }
}

fn override_csv(target: &mut Vec<String>, env_key: &str) {
    if let Ok(val) = std::env::var(env_key) {
        *target = val
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect();
    }
}
