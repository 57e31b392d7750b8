//! Settings file loading and merging with command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use resextract::{ExtractionSpec, ExtractorConfig, WritePolicy};
use serde::Deserialize;

use crate::{cli::Args, mapping::parse_mapping};

/// Contents of a `--config` file.
///
/// ```toml
/// input = "app/src/main/res"
/// output = "build/extracted"
/// output-file = "tile_labels.xml"
///
/// [extract]
/// mobile_data = "tile_label_mobile_data"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSettings {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub source_file: Option<String>,
    pub output_file: Option<String>,
    pub marker: Option<String>,
    pub prefix: Option<String>,
    pub on_write_error: Option<WritePolicy>,
    pub extract: IndexMap<String, String>,
}

impl FileSettings {
    // Relative paths in a settings file are relative to the file itself.
    fn resolve_relative_to(mut self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.input = self.input.map(resolve);
        self.output = self.output.map(resolve);
        self
    }
}

/// Loads a settings file, choosing the format by extension.
pub fn load_settings(path: &Path) -> Result<FileSettings, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;

    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let settings: FileSettings = match ext.as_str() {
        "toml" => toml::from_str(&text).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(&text).map_err(|e| e.to_string()),
        "yaml" | "yml" => serde_yaml::from_str(&text).map_err(|e| e.to_string()),
        _ => {
            return Err(format!(
                "Unsupported config format: '{}'. Expected: toml, json, yaml, yml",
                path.display()
            ));
        }
    }
    .map_err(|e| format!("Invalid config '{}': {}", path.display(), e))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(settings.resolve_relative_to(base))
}

/// Builds the run configuration. Flags override settings-file values and
/// `--map` entries are merged over the file's `extract` table.
pub fn build_config(args: &Args, settings: FileSettings) -> Result<ExtractorConfig, String> {
    let prefix = args.prefix.as_deref().or(settings.prefix.as_deref());

    let mut names = settings.extract;
    for raw in &args.map {
        let (source, target) = parse_mapping(raw, prefix)?;
        names.insert(source, target);
    }
    let spec = ExtractionSpec::new(names).map_err(|e| e.to_string())?;

    let input = args
        .input
        .clone()
        .or(settings.input)
        .unwrap_or_default();
    let mut config = ExtractorConfig::new(spec, input).map_err(|e| e.to_string())?;

    if let Some(output) = args.output.clone().or(settings.output) {
        config = config.with_output_root(output);
    }
    if let Some(name) = args.source_file.clone().or(settings.source_file) {
        config = config.with_source_filename(name).map_err(|e| e.to_string())?;
    }
    if let Some(name) = args.output_file.clone().or(settings.output_file) {
        config = config.with_output_filename(name).map_err(|e| e.to_string())?;
    }
    if let Some(marker) = args.marker.clone().or(settings.marker) {
        config = config.with_locale_marker(marker).map_err(|e| e.to_string())?;
    }

    let policy = if args.keep_going {
        WritePolicy::Continue
    } else {
        settings.on_write_error.unwrap_or_default()
    };
    Ok(config.with_write_policy(policy))
}
