//! OS 인벤토리 (`KEY='value'` 형식) 패턴 세트

use hwinfo_core::error::ExtractError;

use crate::pattern::PatternSet;

pub const NAME: &str = "os_inventory";

/// (인벤토리 키, 필드 이름)
const KEYS: &[(&str, &str)] = &[
    ("PRODUCT_BRAND", "os"),
    ("PRODUCT_VERSION", "version"),
    ("BUILD_NUMBER", "build"),
];

pub fn pattern_set() -> Result<PatternSet, ExtractError> {
    PatternSet::builder(NAME)
        .patterns(
            KEYS.iter()
                .map(|(key, field)| format!(r"(?m)^{key}='?(?P<{field}>[^'\n]*)'?$")),
        )
        .build()
}
