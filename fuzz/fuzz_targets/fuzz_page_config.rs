#![no_main]

use folio_runtime::PageConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Whatever loads must already be valid.
    if let Ok(config) = PageConfig::from_json_str(text) {
        assert!(config.validate().is_empty(), "JSON loader admitted invalid config");
    }
    if let Ok(config) = PageConfig::from_toml_str(text) {
        assert!(config.validate().is_empty(), "TOML loader admitted invalid config");
        let round = config.to_toml_string().expect("valid config serializes");
        assert_eq!(PageConfig::from_toml_str(&round).ok(), Some(config));
    }
});
