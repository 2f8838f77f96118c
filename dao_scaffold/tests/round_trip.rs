//! Property-based tests for schema literal round-tripping
//!
//! Any valid `TableInfo` encoded with every view must decode back to an
//! equal value, both as bare literal text and when embedded in a model file.

use proptest::prelude::*;

use dao_scaffold::schema::NOW_SENTINEL;
use dao_scaffold::template::model_file_text;
use dao_scaffold::{
    extract_table_info, table_info_to_code_text, text_to_table_info, FieldSpec, FieldType,
    TableInfo, View,
};

/// Free text with quotes, backslashes, control characters and non-ASCII
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<String>(),
        "[a-zA-Z0-9 \"'\\\\\\n\\t\\r\\x00\\x7féß漢字😀]{0,24}",
        Just("Date.now".to_string()),
        Just("export".to_string()),
    ]
}

fn number_text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "-?[0-9]{1,6}",
        "-?[0-9]{1,4}\\.[0-9]{0,3}",
        "-?\\.[0-9]{1,3}",
        "[0-9]{1,3}[eE][+-]?[0-9]{1,2}",
    ]
}

fn field_strategy() -> impl Strategy<Value = FieldSpec> {
    let string = prop::option::of(text_strategy()).prop_map(|default| {
        let spec = FieldSpec::new(FieldType::String);
        match default {
            Some(default) => spec.default_value(&default),
            None => spec,
        }
    });
    let number = prop::option::of(number_text_strategy()).prop_map(|default| {
        let spec = FieldSpec::new(FieldType::Number);
        match default {
            Some(default) => spec.default_value(&default),
            None => spec,
        }
    });
    let boolean = prop::option::of(any::<bool>()).prop_map(|default| {
        let spec = FieldSpec::new(FieldType::Boolean);
        match default {
            Some(default) => spec.default_value(&default.to_string()),
            None => spec,
        }
    });
    let date = (
        prop::option::of(prop_oneof![
            Just(NOW_SENTINEL.to_string()),
            "[0-9]{4}-[0-9]{2}-[0-9]{2}",
            text_strategy().prop_filter("non-empty", |s| !s.is_empty()),
        ]),
        prop::option::of("[0-9]{4}-[0-9]{2}-[0-9]{2}"),
        prop::option::of(text_strategy().prop_filter("non-empty", |s| !s.is_empty())),
    )
        .prop_map(|(default, min, max)| {
            let mut spec = FieldSpec::new(FieldType::Date);
            if let Some(default) = default {
                spec = spec.default_value(&default);
            }
            if let Some(min) = min {
                spec = spec.min(&min);
            }
            if let Some(max) = max {
                spec = spec.max(&max);
            }
            spec
        });

    prop_oneof![string, number, boolean, date]
}

fn field_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z_$][A-Za-z0-9_$]{0,12}",
        "[A-Za-z0-9 \\-.:\"'\\\\名前é]{0,12}",
        any::<String>(),
    ]
}

fn table_info_strategy() -> impl Strategy<Value = TableInfo> {
    (
        prop::option::of("[a-z][a-z0-9_-]{0,10}"),
        "[A-Z][A-Za-z0-9]{0,12}",
        text_strategy(),
        prop::collection::vec((field_name_strategy(), field_strategy()), 0..8),
    )
        .prop_map(|(module, model, table, fields)| {
            let mut info = TableInfo::new(&model, &table);
            if let Some(module) = module {
                info = info.with_module(&module);
            }
            fields
                .into_iter()
                .fold(info, |info, (name, spec)| info.field(&name, spec))
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 512,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_literal_round_trip(info in table_info_strategy()) {
        let text = table_info_to_code_text(&info, &View::ALL);
        let decoded = text_to_table_info(&text);
        prop_assert!(decoded.is_ok(), "failed to decode {:?}: {:?}", text, decoded);
        prop_assert_eq!(decoded.unwrap(), info);
    }

    #[test]
    fn test_model_file_round_trip(info in table_info_strategy()) {
        let literal = table_info_to_code_text(&info, &[View::Model, View::Table, View::Property]);
        let file = model_file_text(&literal, &info.model);
        let decoded = extract_table_info(&file);
        prop_assert!(decoded.is_ok(), "failed to extract from {:?}: {:?}", file, decoded);

        let mut expected = info;
        expected.module = None;
        prop_assert_eq!(decoded.unwrap(), expected);
    }

    #[test]
    fn test_property_view_decodes_to_same_fields(info in table_info_strategy()) {
        let text = table_info_to_code_text(&info, &[View::Property]);
        let wrapped = format!("{{ model: 'M', table: 't', property: {} }}", text);
        let decoded = text_to_table_info(&wrapped);
        prop_assert!(decoded.is_ok(), "failed to decode {:?}: {:?}", wrapped, decoded);
        prop_assert_eq!(decoded.unwrap().property, info.property);
    }
}
