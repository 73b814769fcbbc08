use std::collections::BTreeMap;

use langcache::TranslationMap;

/// Output formats for `langcache dump`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DumpFormat {
    #[default]
    Json,
    Yaml,
}

/// Renders a dump as `locale -> key -> value`.
pub fn render_dump(map: &TranslationMap, format: DumpFormat) -> Result<String, String> {
    let values: BTreeMap<&str, BTreeMap<&str, &str>> = map
        .iter()
        .map(|(locale, keys)| {
            let keys = keys
                .iter()
                .map(|(key, t)| (key.as_str(), t.value.as_str()))
                .collect();
            (locale.as_str(), keys)
        })
        .collect();

    match format {
        DumpFormat::Json => serde_json::to_string_pretty(&values).map_err(|e| e.to_string()),
        DumpFormat::Yaml => serde_yaml::to_string(&values).map_err(|e| e.to_string()),
    }
}
