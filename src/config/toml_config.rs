use crate::config::ClientSettings;
use crate::domain::model::LatLng;
use crate::utils::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub api: Option<ApiSection>,
    pub maps: Option<MapsSection>,
    pub places: Option<PlacesSection>,
    pub auth: Option<AuthSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiSection {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapsSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub reference_lat: Option<f64>,
    pub reference_lng: Option<f64>,
    pub initial_zoom: Option<u8>,
    pub focus_zoom: Option<u8>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacesSection {
    pub radius: Option<u32>,
    pub r#type: Option<String>,
    pub page_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthSection {
    pub redirect_url: Option<String>,
    pub redirect_delay_ms: Option<u64>,
    pub storage_path: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${GOOGLE_MAPS_API_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 把檔案中有設定的欄位覆蓋到 settings 上
    pub fn apply_to(&self, settings: &mut ClientSettings) {
        if let Some(api) = &self.api {
            if let Some(base_url) = &api.base_url {
                settings.api_base_url = base_url.clone();
            }
        }

        if let Some(maps) = &self.maps {
            if let Some(base_url) = &maps.base_url {
                settings.maps_base_url = base_url.clone();
            }
            if let Some(api_key) = &maps.api_key {
                // 環境變數沒展開代表沒有 key
                if !api_key.starts_with("${") {
                    settings.maps_api_key = Some(api_key.clone());
                }
            }
            let reference = settings.reference_location;
            settings.reference_location = LatLng::new(
                maps.reference_lat.unwrap_or(reference.lat),
                maps.reference_lng.unwrap_or(reference.lng),
            );
            if let Some(zoom) = maps.initial_zoom {
                settings.initial_zoom = zoom;
            }
            if let Some(zoom) = maps.focus_zoom {
                settings.focus_zoom = zoom;
            }
        }

        if let Some(places) = &self.places {
            if let Some(radius) = places.radius {
                settings.places_radius = radius;
            }
            if let Some(place_type) = &places.r#type {
                settings.places_type = place_type.clone();
            }
            if let Some(delay) = places.page_delay_ms {
                settings.page_delay_ms = delay;
            }
        }

        if let Some(auth) = &self.auth {
            if let Some(url) = &auth.redirect_url {
                settings.redirect_url = url.clone();
            }
            if let Some(delay) = auth.redirect_delay_ms {
                settings.redirect_delay_ms = delay;
            }
            if let Some(path) = &auth.storage_path {
                settings.storage_path = path.clone();
            }
        }
    }

    pub fn into_settings(self) -> ClientSettings {
        let mut settings = ClientSettings::default();
        self.apply_to(&mut settings);
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::Validate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://api.cultech.example"

[maps]
api_key = "abc123"
reference_lat = 40.4093
reference_lng = 49.8671
focus_zoom = 16

[places]
radius = 1200
type = "art_gallery"
page_delay_ms = 2500

[auth]
redirect_url = "https://cultech.example/"
redirect_delay_ms = 1000
storage_path = "/tmp/cultech.json"
"#;

        let settings = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_settings();

        assert_eq!(settings.api_base_url, "https://api.cultech.example");
        assert_eq!(settings.maps_api_key.as_deref(), Some("abc123"));
        assert_eq!(settings.reference_location, LatLng::new(40.4093, 49.8671));
        assert_eq!(settings.initial_zoom, 12);
        assert_eq!(settings.focus_zoom, 16);
        assert_eq!(settings.places_type, "art_gallery");
        assert_eq!(settings.page_delay_ms, 2500);
        assert_eq!(settings.redirect_delay_ms, 1000);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("CULTECH_TEST_API_URL", "https://test.api.com");

        let toml_content = r#"
[api]
base_url = "${CULTECH_TEST_API_URL}"

[maps]
api_key = "${CULTECH_TEST_UNSET_KEY}"
"#;

        let settings = TomlConfig::from_toml_str(toml_content)
            .unwrap()
            .into_settings();
        assert_eq!(settings.api_base_url, "https://test.api.com");
        assert!(settings.maps_api_key.is_none());

        std::env::remove_var("CULTECH_TEST_API_URL");
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = TomlConfig::from_toml_str("").unwrap().into_settings();
        assert_eq!(settings, ClientSettings::default());
    }

    #[test]
    fn test_invalid_url_fails_validation() {
        let settings = TomlConfig::from_toml_str("[api]\nbase_url = \"invalid-url\"\n")
            .unwrap()
            .into_settings();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[places]\nradius = 800\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.into_settings().places_radius, 800);
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[api\nbase_url = 1"),
            Err(ClientError::ConfigValidationError { .. })
        ));
    }
}
