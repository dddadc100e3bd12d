//! Core types for the converter module.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A single conversion option value.
///
/// Calibre flags are either bare switches (`--verbose`) or take a value
/// (`--base-font-size 12`). A boolean `true` encodes as a bare switch;
/// anything else is passed through as the next argument token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Text(String),
}

/// An ordered list of conversion options.
///
/// Some Calibre flags are order-sensitive, so the order in which callers
/// send options must survive all the way to the command line. A plain map
/// would lose it; this keeps entries in JSON document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions(Vec<(String, OptionValue)>);

impl ConvertOptions {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an option, keeping insertion order.
    pub fn push(&mut self, name: impl Into<String>, value: OptionValue) {
        self.0.push((name.into(), value));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Encodes the options as discrete command-line tokens.
    ///
    /// Each entry emits `--name`, followed by the value token unless the
    /// value is boolean `true`. Values are never joined or shell-quoted.
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.0.len() * 2);
        for (name, value) in &self.0 {
            args.push(format!("--{}", name));
            match value {
                OptionValue::Bool(true) => {}
                OptionValue::Bool(false) => args.push("false".to_string()),
                OptionValue::Text(text) => args.push(text.clone()),
            }
        }
        args
    }
}

impl<'de> Deserialize<'de> for ConvertOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = ConvertOptions;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of option names to string or boolean values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                // Collect into a Vec so document order is preserved.
                let mut entries = Vec::new();
                while let Some(entry) = map.next_entry::<String, OptionValue>()? {
                    entries.push(entry);
                }
                Ok(ConvertOptions(entries))
            }
        }

        deserializer.deserialize_map(OptionsVisitor)
    }
}

impl FromIterator<(String, OptionValue)> for ConvertOptions {
    fn from_iter<T: IntoIterator<Item = (String, OptionValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A request to convert one ebook file.
///
/// Both paths are relative to the configured library directory. Immutable
/// once built; empty paths are rejected before any filesystem or process
/// interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionRequest {
    pub source_path: String,
    pub target_path: String,
    #[serde(default)]
    pub options: ConvertOptions,
}

impl ConversionRequest {
    pub fn new(source_path: impl Into<String>, target_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            target_path: target_path.into(),
            options: ConvertOptions::new(),
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }
}

/// The outcome of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResult {
    /// Source path as supplied by the caller (relative to the library).
    pub source_path: String,
    /// Target path as supplied by the caller (relative to the library).
    pub target_path: String,
    /// Byte length of the produced file.
    pub file_size: u64,
    /// Wall-clock duration of the conversion.
    pub duration_ms: u64,
}

/// Input and output formats supported by the converter binary.
#[derive(Debug, Clone, Serialize)]
pub struct FormatList {
    pub input_formats: Vec<String>,
    pub output_formats: Vec<String>,
}
