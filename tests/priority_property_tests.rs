use langcache::backends::MemoryBackend;
use langcache::{Backend, I18n, Translation};
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,7}(\\.[a-z][a-z0-9_]{0,7}){0,2}")
        .expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?]{1,30}").expect("valid value regex")
}

fn locale_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["en-US", "fr-FR", "de", "zh-CN"]).prop_map(str::to_string)
}

fn dataset_strategy() -> impl Strategy<Value = BTreeMap<(String, String), String>> {
    prop::collection::btree_map((locale_strategy(), key_strategy()), value_strategy(), 0..12)
}

fn backend(values: &BTreeMap<(String, String), String>) -> Arc<dyn Backend> {
    Arc::new(
        MemoryBackend::new().with_translations(values.iter().map(|((locale, key), value)| {
            Translation::new(locale.as_str(), key.as_str(), value.as_str())
        })),
    )
}

proptest! {
    #[test]
    fn prop_lowest_index_backend_wins(
        first in dataset_strategy(),
        second in dataset_strategy(),
        third in dataset_strategy(),
    ) {
        let i18n = I18n::new(vec![backend(&first), backend(&second), backend(&third)]).unwrap();

        let mut expected = third.clone();
        expected.extend(second.clone());
        expected.extend(first.clone());

        for ((locale, key), value) in &expected {
            let cached = i18n.cached(locale, key).expect("loaded entry");
            prop_assert_eq!(&cached.value, value);
        }

        let dump = i18n.dump_all().unwrap();
        let flattened: BTreeMap<(String, String), String> = dump
            .into_iter()
            .flat_map(|(locale, keys)| {
                keys.into_iter()
                    .map(move |(key, t)| ((locale.clone(), key), t.value))
            })
            .collect();
        prop_assert_eq!(flattened, expected);
    }

    #[test]
    fn prop_translate_twice_is_stable(
        data in dataset_strategy(),
        locale in locale_strategy(),
        key in key_strategy(),
    ) {
        let i18n = I18n::new(vec![backend(&data), Arc::new(MemoryBackend::new())]).unwrap();
        let first = i18n.translate(&locale, &key, &[]);
        let second = i18n.translate(&locale, &key, &[]);
        prop_assert_eq!(first, second);
    }
}
