//! 추출 엔진 속성 테스트 (proptest)

use proptest::prelude::*;

use hwinfo_core::error::ExtractError;
use hwinfo_core::types::Record;
use hwinfo_parser::{PatternSet, extract_all, extract_item, extract_one, merge_by_key};

fn kv_set(separator: Option<&str>) -> PatternSet {
    let builder = PatternSet::builder("kv")
        .pattern(r"(?m)^key: (?P<key>\w+)$")
        .pattern(r"(?m)^value: (?P<value>\w+)$");
    let builder = match separator {
        Some(sep) => builder.separator(sep),
        None => builder,
    };
    builder.build().expect("valid pattern set")
}

fn record_strategy() -> impl Strategy<Value = Record> {
    prop::collection::btree_map("[a-d]", "[xy]", 0..4)
        .prop_map(|fields| fields.into_iter().collect())
}

proptest! {
    #[test]
    fn extract_one_equals_sole_extract_all_element(text in "[a-z: \n]{0,200}") {
        let set = kv_set(None);
        let one = extract_one(&set, &text).unwrap();
        let all = extract_all(&set, &text);
        prop_assert_eq!(all, vec![one]);
    }

    #[test]
    fn extract_all_is_idempotent(text in "(key: [a-z]{1,5}\nvalue: [a-z]{1,5}\n\n){0,6}") {
        let set = kv_set(Some("\n\n"));
        prop_assert_eq!(extract_all(&set, &text), extract_all(&set, &text));
    }

    #[test]
    fn splitting_matches_per_item_extraction(
        items in prop::collection::vec("key: [a-z]{1,5}\nvalue: [a-z]{1,5}", 1..6)
    ) {
        let set = kv_set(Some("\n\n"));
        let joined = items.join("\n\n");
        let split = extract_all(&set, &joined);
        let single = kv_set(None);
        let per_item: Vec<Record> = items.iter().map(|item| extract_item(&single, item)).collect();
        prop_assert_eq!(split, per_item);
    }

    #[test]
    fn multi_match_joins_every_value(values in prop::collection::vec("[a-z]{1,8}", 1..10)) {
        let set = PatternSet::builder("flags")
            .pattern(r"flag: (?P<f>\w+)")
            .build()
            .unwrap();
        let text: String = values.iter().map(|v| format!("flag: {v}\n")).collect();
        let rec = extract_item(&set, &text);
        let expected = values.join(", ");
        prop_assert_eq!(rec.get("f"), Some(expected.as_str()));
    }

    #[test]
    fn merge_is_order_independent_without_conflicts(
        a in record_strategy(),
        b in record_strategy(),
    ) {
        // 같은 필드는 같은 값을 갖도록 맞춤
        let mut b = b;
        for (field, value) in a.iter() {
            if b.contains(field) {
                b.insert(field, value);
            }
        }
        let mut a = a;
        a.insert("id", "k");
        b.insert("id", "k");

        let ab = merge_by_key(vec![a.clone(), b.clone()], "id").unwrap();
        let ba = merge_by_key(vec![b, a], "id").unwrap();
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn merge_conflicts_iff_shared_field_differs(x in "[a-z]{1,4}", y in "[a-z]{1,4}") {
        let a: Record = [("id", "k"), ("f", x.as_str())].into_iter().collect();
        let b: Record = [("id", "k"), ("f", y.as_str())].into_iter().collect();
        let result = merge_by_key(vec![a, b], "id");
        if x == y {
            prop_assert!(result.is_ok());
        } else {
            let is_conflict = matches!(result, Err(ExtractError::MergeConflict { .. }));
            prop_assert!(is_conflict);
        }
    }

    #[test]
    fn extraction_never_panics_on_arbitrary_text(text in "\\PC{0,500}") {
        let set = kv_set(Some("\n"));
        let _ = extract_all(&set, &text);
    }
}
