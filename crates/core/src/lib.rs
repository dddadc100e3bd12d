pub mod config;
pub mod converter;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ServerConfig,
};
pub use converter::{
    CalibreConverter, ConversionRequest, ConversionResult, Converter, ConverterConfig,
    ConverterError, ConvertOptions, FormatList, OptionValue,
};
