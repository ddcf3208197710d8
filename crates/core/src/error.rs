//! 에러 타입 -- 도메인별 에러 정의

/// hwinfo 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum HwinfoError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 레코드 추출 엔진 에러
    #[error("extract error: {0}")]
    Extract(#[from] ExtractError),

    /// 데이터 수집 (명령 실행, 원격 세션, 로그 파일) 에러
    #[error("collect error: {0}")]
    Collect(#[from] CollectError),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// 레코드 추출 엔진 에러
///
/// 매칭 실패나 필드 누락은 에러가 아닙니다. 필드가 없으면 레코드에서 빠질 뿐이며,
/// 필수 필드 검사는 호출자가 명시적으로 요청할 때만 수행됩니다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// 패턴 세트 구성 시점의 잘못된 패턴 (정규식 문법 오류, 충족 불가능한 필수 필드 등)
    #[error("invalid pattern in set '{set}': {pattern}: {reason}")]
    Pattern {
        /// 패턴 세트 이름
        set: String,
        /// 문제가 된 패턴 문자열
        pattern: String,
        /// 실패 사유
        reason: String,
    },

    /// 구분자가 선언된 (다중 레코드) 패턴 세트에 단일 레코드 추출을 요청함
    #[error("pattern set '{set}' declares separator {separator:?}: use extract_all instead")]
    Configuration {
        /// 패턴 세트 이름
        set: String,
        /// 선언된 구분자
        separator: String,
    },

    /// 같은 키를 가진 두 부분 레코드가 한 필드에 대해 서로 다른 값을 가짐
    #[error("mismatch for field '{field}' under key '{key}': '{existing}' != '{incoming}'")]
    MergeConflict {
        /// 병합 키 값 (예: PCI bus id)
        key: String,
        /// 충돌한 필드 이름
        field: String,
        /// 먼저 들어온 값
        existing: String,
        /// 나중에 들어온 값
        incoming: String,
    },

    /// 병합 대상 레코드에 키 필드가 없음
    #[error("record {index} has no '{key_field}' field to merge on")]
    MergeKeyMissing {
        /// 병합 키 필드 이름
        key_field: String,
        /// 입력 목록에서의 레코드 위치
        index: usize,
    },

    /// 필수 필드 누락
    #[error("pattern set '{set}' item {item}: missing mandatory fields: {}", missing.join(", "))]
    Validation {
        /// 패턴 세트 이름
        set: String,
        /// 아이템 위치 (0부터)
        item: usize,
        /// 누락된 필드 목록
        missing: Vec<String>,
    },
}

/// 데이터 수집 에러
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// 명령이 0이 아닌 종료 코드로 끝남
    #[error("command '{command}' exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: i32,
        stderr: String,
    },

    /// 프로세스 실행 자체가 실패함
    #[error("failed to spawn '{command}': {reason}")]
    Spawn { command: String, reason: String },

    /// 제한 시간 초과
    #[error("timed out after {secs}s waiting for {target}")]
    Timeout { target: String, secs: u64 },

    /// 원격 명령이 stderr로 출력함
    #[error("remote command on '{host}' wrote to stderr: {stderr}")]
    RemoteStderr { host: String, stderr: String },

    /// 로그 디렉토리 / 아카이브에서 파일을 찾지 못함
    #[error("could not find '{name}' in {location}")]
    FileNotFound { name: String, location: String },

    /// 같은 이름의 파일이 여러 개 발견됨
    #[error("more than one match for '{name}': {}", matches.join(", "))]
    AmbiguousMatch { name: String, matches: Vec<String> },

    /// 아카이브 읽기 실패
    #[error("archive error: {path}: {reason}")]
    Archive { path: String, reason: String },
}

impl CollectError {
    /// 파일 조회 실패 여부 (대체 소스로 넘어갈 수 있는 경우)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

impl HwinfoError {
    /// 수집 단계의 파일 조회 실패인지 확인합니다.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Collect(e) if e.is_not_found())
    }
}
