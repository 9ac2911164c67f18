use serde::de::DeserializeOwned;

use crate::ui::{MenuConfig, Theme};

/// Read and parse a RON file. Logs a warning and returns the default on
/// any failure.
fn load_ron_or_default<T: DeserializeOwned + Default>(path: &str) -> T {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("failed to read {}: {}, using default config", path, e);
            return T::default();
        }
    };
    match ron::from_str::<T>(&content) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("failed to parse RON {}: {}, using default config", path, e);
            T::default()
        }
    }
}

/// Load layout metrics from a RON file.
pub fn load_theme(path: &str) -> Theme {
    load_ron_or_default(path)
}

/// Load menu geometry and column layout from a RON file.
pub fn load_menu_config(path: &str) -> MenuConfig {
    let config: MenuConfig = load_ron_or_default(path);
    if config.columns == 0 {
        log::warn!("{}: columns must be at least 1, using 1", path);
        return MenuConfig {
            columns: 1,
            ..config
        };
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_theme_from_file() {
        let theme = load_theme("data/theme.ron");
        assert_eq!(theme.scroll_step, 30.0);
        assert_eq!(theme.title_font_size, 18.0);
    }

    #[test]
    fn test_load_menu_config_from_file() {
        let config = load_menu_config("data/menu.ron");
        assert_eq!(config.columns, 1);
        assert!((config.width - 640.0).abs() < 0.01);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let theme = load_theme("nonexistent.ron");
        assert_eq!(theme.font_size, Theme::default().font_size);
        let config = load_menu_config("nonexistent.ron");
        assert_eq!(config.columns, 1);
    }

    #[test]
    fn test_zero_columns_clamped() {
        let path = std::env::temp_dir().join("framepack_zero_columns.ron");
        std::fs::write(&path, "(columns: 0)").expect("write temp file");
        let config = load_menu_config(path.to_str().expect("utf-8 path"));
        assert_eq!(config.columns, 1);
    }
}
