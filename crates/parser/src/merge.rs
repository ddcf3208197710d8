//! 소스 간 레코드 병합
//!
//! 서로 다른 명령 출력에서 얻은 부분 레코드를 공통 키 필드로 합칩니다.
//! 예: `lspci -vv`의 이름 정보와 `lspci -n`의 숫자 ID를 `pci_device_bus_id`로 병합.

use std::collections::HashMap;

use hwinfo_core::error::ExtractError;
use hwinfo_core::types::Record;

/// 키 필드 값으로 레코드를 묶어 병합합니다.
///
/// - 키를 처음 본 순서를 유지합니다.
/// - 한쪽에만 있는 필드는 그대로 옮기고, 같은 값은 하나만 남깁니다.
/// - 같은 키의 같은 필드가 다른 값을 가지면 [`ExtractError::MergeConflict`]를 반환합니다.
/// - 키 필드가 없는 레코드는 [`ExtractError::MergeKeyMissing`]을 반환합니다.
pub fn merge_by_key<I>(records: I, key_field: &str) -> Result<Vec<Record>, ExtractError>
where
    I: IntoIterator<Item = Record>,
{
    let mut merged: Vec<Record> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (position, record) in records.into_iter().enumerate() {
        let key = record
            .get(key_field)
            .ok_or_else(|| ExtractError::MergeKeyMissing {
                key_field: key_field.to_owned(),
                index: position,
            })?
            .to_owned();

        match index.get(&key) {
            Some(&slot) => merge_into(&mut merged[slot], record, &key)?,
            None => {
                index.insert(key, merged.len());
                merged.push(record);
            }
        }
    }

    Ok(merged)
}

fn merge_into(target: &mut Record, incoming: Record, key: &str) -> Result<(), ExtractError> {
    for (field, value) in incoming {
        match target.get(&field) {
            Some(existing) if existing != value => {
                return Err(ExtractError::MergeConflict {
                    key: key.to_owned(),
                    field,
                    existing: existing.to_owned(),
                    incoming: value,
                });
            }
            Some(_) => {}
            None => {
                target.insert(field, value);
            }
        }
    }
    Ok(())
}
