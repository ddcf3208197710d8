//! In-memory source
//!
//! 캡처해 둔 텍스트를 그대로 돌려줍니다. 다른 프로그램에 임베드하거나
//! 실제 장비 없이 [`Host`](crate::Host)를 테스트할 때 사용합니다.

use std::collections::{BTreeMap, BTreeSet};

use hwinfo_core::error::{CollectError, HwinfoError};

use crate::source::{DataSource, InfoSource};

/// 정보 종류별 캡처 텍스트를 보관하는 소스
///
/// 등록되지 않은 종류는 `CollectError::FileNotFound`를 반환합니다.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    texts: BTreeMap<InfoSource, String>,
    failing: BTreeSet<InfoSource>,
}

impl StaticSource {
    /// 빈 소스를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 한 종류의 캡처 텍스트를 등록합니다.
    pub fn with_text(mut self, source: InfoSource, text: impl Into<String>) -> Self {
        self.texts.insert(source, text.into());
        self
    }

    /// 해당 종류 조회 시 명령 실패를 흉내 내도록 설정합니다.
    pub fn with_failure(mut self, source: InfoSource) -> Self {
        self.failing.insert(source);
        self
    }

    /// 등록된 종류 목록
    pub fn sources(&self) -> impl Iterator<Item = InfoSource> + '_ {
        self.texts.keys().copied()
    }
}

impl DataSource for StaticSource {
    fn kind(&self) -> &'static str {
        "static"
    }

    fn location(&self) -> String {
        "memory".to_owned()
    }

    async fn fetch(&self, source: InfoSource) -> Result<String, HwinfoError> {
        if self.failing.contains(&source) {
            return Err(CollectError::CommandFailed {
                command: source.to_string(),
                status: 1,
                stderr: "simulated failure".to_owned(),
            }
            .into());
        }
        self.texts.get(&source).cloned().ok_or_else(|| {
            CollectError::FileNotFound {
                name: source.to_string(),
                location: self.location(),
            }
            .into()
        })
    }
}
