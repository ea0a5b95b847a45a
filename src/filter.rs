//! Deep locale filter over JSON-shaped values.

use std::borrow::Cow;
use std::sync::LazyLock;

use serde_json::Value;

use crate::detect::contains_chinese;
use crate::translate::Translator;
use crate::types::Locale;

static DEFAULT_FILTER: LazyLock<LocaleFilter> = LazyLock::new(LocaleFilter::default);

/// Filters `value` for `locale` with the builtin dictionary and default placeholders.
#[must_use]
pub fn filter_value(value: &Value, locale: Locale) -> Cow<'_, Value> {
    DEFAULT_FILTER.filter(value, locale)
}

/// Rewrites JSON trees so they contain no Chinese text outside the native locale.
#[derive(Debug, Clone, Default)]
pub struct LocaleFilter {
    translator: Translator,
}

impl LocaleFilter {
    #[must_use]
    pub const fn new(translator: Translator) -> Self {
        Self { translator }
    }

    /// Returns `value` itself for the native locale. Otherwise returns a copy
    /// of the same shape where every string containing Chinese text has been
    /// translated. Object keys, key order and array order are kept.
    ///
    /// A string's field hint is the key of its nearest enclosing object entry;
    /// array elements inherit the key of the array.
    #[must_use]
    pub fn filter<'a>(&self, value: &'a Value, locale: Locale) -> Cow<'a, Value> {
        if locale.is_native() {
            return Cow::Borrowed(value);
        }

        let mut translated = 0_usize;
        let filtered = self.filter_node("", value, &mut translated);
        tracing::trace!(translated, %locale, "Filtered value");

        Cow::Owned(filtered)
    }

    fn filter_node(&self, field: &str, value: &Value, translated: &mut usize) -> Value {
        match value {
            Value::String(text) if contains_chinese(text) => {
                *translated += 1;
                Value::String(self.translator.translate(field, text))
            }
            Value::Array(items) => Value::Array(
                items.iter().map(|item| self.filter_node(field, item, translated)).collect(),
            ),
            Value::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, item)| (key.clone(), self.filter_node(key, item, translated)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    /// Same keys, same array lengths, same nesting and same leaf kinds.
    fn same_shape(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Array(xs), Value::Array(ys)) => {
                xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| same_shape(x, y))
            }
            (Value::Object(xs), Value::Object(ys)) => {
                xs.keys().eq(ys.keys())
                    && xs.values().zip(ys.values()).all(|(x, y)| same_shape(x, y))
            }
            (Value::String(_), Value::String(_)) => true,
            _ => a == b,
        }
    }

    fn player_fixture() -> Value {
        json!({
            "name": "杨瀚森",
            "nameEn": "Yang Hansen",
            "team": "波特兰开拓者",
            "position": "中锋",
            "number": 16,
            "active": true,
            "agent": null,
            "birthDate": "2005年6月26日",
            "stats": {
                "season": "2024-25",
                "labels": ["场均得分", "场均篮板", "盖帽"],
                "values": [16.6, 10.9, 2.5]
            },
            "news": [
                { "title": "杨瀚森NBA选秀首轮第16顺位", "summary": "加油中国篮球" },
                { "title": "Summer League debut", "summary": "" }
            ]
        })
    }

    #[rstest]
    fn test_native_locale_is_borrowed_identity() {
        let value = player_fixture();

        let filtered = filter_value(&value, Locale::Zh);

        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert!(std::ptr::eq(filtered.as_ref(), &value));
    }

    #[rstest]
    fn test_english_preserves_shape() {
        let value = player_fixture();

        let filtered = filter_value(&value, Locale::En);

        assert_that!(same_shape(&value, &filtered), eq(true));
        assert_that!(filtered["number"].as_i64(), some(eq(16)));
        assert_eq!(filtered["stats"]["values"], value["stats"]["values"]);
    }

    #[rstest]
    fn test_english_preserves_key_order() {
        let value = player_fixture();

        let filtered = filter_value(&value, Locale::En);

        let original_keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        let filtered_keys: Vec<&String> = filtered.as_object().unwrap().keys().collect();
        assert_eq!(original_keys, filtered_keys);
    }

    #[rstest]
    fn test_english_removes_all_chinese() {
        let value = player_fixture();

        let filtered = filter_value(&value, Locale::En);

        let rendered = serde_json::to_string(filtered.as_ref()).unwrap();
        assert_that!(contains_chinese(&rendered), eq(false));
    }

    #[rstest]
    fn test_english_translates_leaves() {
        let filtered = filter_value(&player_fixture(), Locale::En).into_owned();

        assert_that!(filtered["name"].as_str(), some(eq("Yang Hansen")));
        assert_that!(filtered["team"].as_str(), some(eq("Portland Trail Blazers")));
        assert_that!(filtered["position"].as_str(), some(eq("Center")));
        assert_that!(filtered["birthDate"].as_str(), some(eq("2005626")));
        assert_that!(filtered["stats"]["labels"][0].as_str(), some(eq("Points Per Game")));
        assert_that!(filtered["news"][0]["summary"].as_str(), some(eq("[Chinese Content]")));
        assert_that!(filtered["news"][1]["title"].as_str(), some(eq("Summer League debut")));
    }

    #[rstest]
    fn test_english_is_idempotent() {
        let once = filter_value(&player_fixture(), Locale::En).into_owned();
        let twice = filter_value(&once, Locale::En).into_owned();

        assert_eq!(twice, once);
    }

    #[rstest]
    fn test_array_elements_inherit_field_hint() {
        let value = json!({ "teamNames": ["未知球队"], "teams": ["辽宁本钢"] });

        let filtered = filter_value(&value, Locale::En);

        assert_eq!(filtered.as_ref(), &json!({ "teamNames": ["Yang Hansen"], "teams": ["Team"] }));
    }

    #[rstest]
    fn test_keys_are_not_translated() {
        let value = json!({ "球队": "开拓者" });

        let filtered = filter_value(&value, Locale::En);

        assert_eq!(filtered.as_ref(), &json!({ "球队": "Trail Blazers" }));
    }

    #[rstest]
    #[case::team(json!({ "team": "波特兰开拓者" }), json!({ "team": "Portland Trail Blazers" }))]
    #[case::name(json!({ "name": "杨瀚森" }), json!({ "name": "Yang Hansen" }))]
    #[case::number(json!(42), json!(42))]
    #[case::null(json!(null), json!(null))]
    #[case::bare_string(json!("你好"), json!("[Chinese Content]"))]
    #[case::empty_array(json!([]), json!([]))]
    fn test_english_examples(#[case] input: Value, #[case] expected: Value) {
        let filtered = filter_value(&input, Locale::En);

        assert_eq!(filtered.as_ref(), &expected);
    }

    #[rstest]
    fn test_unknown_note_has_no_chinese() {
        let value = json!({ "note": "加油中国篮球" });

        let filtered = filter_value(&value, Locale::En);

        let note = filtered["note"].as_str().unwrap();
        assert_that!(contains_chinese(note), eq(false));
    }
}
