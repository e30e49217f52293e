use crate::error::{Dto2TsError, Result};
use crate::typesync::EmitterConfig;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use tracing::{debug, error, info, trace, warn};

/// Name of the configuration file searched for in the working directory
/// and its ancestors.
pub const CONFIG_FILE_NAME: &str = "dto2ts.toml";

/// Contents written by `dto2ts init`.
pub const STARTER_CONFIG: &str = r#"# dto2ts configuration

# Fully-qualified names of the classes to convert, in order.
classes = []

# Output file name: <output_folder>/<prefix><lowerFirst(Class)><suffix>.ts
output_folder = "generated"
prefix = ""
suffix = ""

# Replace files that already exist.
overwrite = true

# Wrap each class in `namespace <package> { ... }`.
add_namespace = false
# Overrides the package name used for the namespace.
# namespace = "Api"

# Emit fields that are not plainly public.
include_private = true

[source]
# Rust source tree scanned for struct definitions.
scan_path = "."
# Optional JSON file with class descriptors exported from another backend.
# descriptors = "classes.json"
"#;

/// Where class definitions are read from.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct SourceConfig {
    /// Root of a Rust source tree to scan for structs. Defaults to the
    /// directory holding the configuration file.
    #[serde(default)]
    pub scan_path: Option<String>,

    /// JSON file with class descriptors.
    #[serde(default)]
    pub descriptors: Option<String>,
}

/// Root configuration, read from `dto2ts.toml`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Dto2TsConfig {
    /// Fully-qualified class names, processed in this order.
    #[serde(default)]
    pub classes: Vec<String>,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub output_folder: String,
    #[serde(default = "default_true")]
    pub overwrite: bool,
    #[serde(default)]
    pub add_namespace: bool,
    #[serde(default = "default_true")]
    pub include_private: bool,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub source: SourceConfig,
    /// Directory relative paths are resolved against.
    #[serde(skip)]
    pub base_dir: PathBuf,
}

fn default_true() -> bool {
    true
}

/// Whitespace-only values count as unset; anything else is kept verbatim.
fn empty_if_blank(value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        value.to_string()
    }
}

impl Default for Dto2TsConfig {
    fn default() -> Self {
        Self {
            classes: Vec::new(),
            suffix: String::new(),
            prefix: String::new(),
            output_folder: String::new(),
            overwrite: true,
            add_namespace: false,
            include_private: true,
            namespace: None,
            source: SourceConfig::default(),
            base_dir: PathBuf::from("."),
        }
    }
}

impl Dto2TsConfig {
    /// Load configuration by searching for dto2ts.toml in the current
    /// directory and its ancestors.
    pub fn new() -> Result<Dto2TsConfig> {
        info!("Loading dto2ts configuration");
        let config_path = Self::find_config_file(&env::current_dir()?)?;
        info!("Found configuration file at: {:?}", config_path);
        Self::from_path(&config_path)
    }

    /// Load configuration from a specific file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Dto2TsConfig> {
        let path = path.as_ref();
        let base_dir = path.parent().unwrap_or(Path::new("")).to_path_buf();

        // A .env beside the config file wins; otherwise search from the cwd.
        if dotenv::from_path(base_dir.join(".env")).is_err() {
            dotenv::dotenv().ok();
        }
        debug!("Environment variables loaded from .env if present");

        let contents = fs::read_to_string(path).map_err(|e| {
            error!("Failed to read configuration file {:?}: {}", path, e);
            Dto2TsError::from(e)
        })?;
        debug!("Configuration file size: {} bytes", contents.len());

        Self::parse(&contents, base_dir)
    }

    /// Parses TOML content; relative paths resolve against `base_dir`.
    pub fn parse(contents: &str, base_dir: impl Into<PathBuf>) -> Result<Dto2TsConfig> {
        let mut config: Dto2TsConfig = toml::from_str(contents).inspect_err(|e| {
            error!("Failed to parse TOML configuration: {}", e);
        })?;
        config.base_dir = base_dir.into();

        debug!("Substituting environment variables in configuration");
        config.output_folder = Self::substitute_env_vars(&config.output_folder)?;
        config.prefix = Self::substitute_env_vars(&config.prefix)?;
        config.suffix = Self::substitute_env_vars(&config.suffix)?;
        config.namespace = config
            .namespace
            .as_deref()
            .map(Self::substitute_env_vars)
            .transpose()?;
        config.source.scan_path = config
            .source
            .scan_path
            .as_deref()
            .map(Self::substitute_env_vars)
            .transpose()?;
        config.source.descriptors = config
            .source
            .descriptors
            .as_deref()
            .map(Self::substitute_env_vars)
            .transpose()?;

        if config.classes.is_empty() {
            warn!("No classes configured; nothing will be generated");
        }

        debug!(
            "Configuration: {} classes, overwrite: {}, add_namespace: {}, include_private: {}",
            config.classes.len(),
            config.overwrite,
            config.add_namespace,
            config.include_private
        );

        Ok(config)
    }

    /// Searches for `dto2ts.toml` starting from `start_dir` and traversing
    /// up to the root.
    pub fn find_config_file(start_dir: &Path) -> Result<PathBuf> {
        debug!("Starting config file search from: {:?}", start_dir);

        for path in start_dir.ancestors() {
            let config_path = path.join(CONFIG_FILE_NAME);
            trace!("Checking for config at: {:?}", config_path);
            if config_path.is_file() {
                return Ok(config_path);
            }
        }

        error!("Configuration file '{}' not found in any parent directory.", CONFIG_FILE_NAME);
        Err(Dto2TsError::ConfigNotFound {
            search_start: start_dir.to_path_buf(),
        })
    }

    /// Resolves a configured path against the configuration directory.
    fn resolve(&self, value: &str) -> PathBuf {
        let path = Path::new(value);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }

    /// Root of the Rust source tree to scan.
    pub fn scan_root(&self) -> PathBuf {
        match self.source.scan_path.as_deref().filter(|p| !p.trim().is_empty()) {
            Some(scan_path) => self.resolve(scan_path),
            None => self.base_dir.clone(),
        }
    }

    /// JSON descriptor file, if one is configured.
    pub fn descriptor_file(&self) -> Option<PathBuf> {
        self.source
            .descriptors
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .map(|p| self.resolve(p))
    }

    /// Emitter settings derived from this configuration. A blank output
    /// folder stays blank so files land in the working directory.
    pub fn emitter_config(&self) -> EmitterConfig {
        let output_folder = if self.output_folder.trim().is_empty() {
            String::new()
        } else {
            self.resolve(&self.output_folder).to_string_lossy().into_owned()
        };

        EmitterConfig {
            output_folder,
            filename_prefix: empty_if_blank(&self.prefix),
            filename_suffix: empty_if_blank(&self.suffix),
            overwrite_existing: self.overwrite,
            wrap_in_namespace: self.add_namespace,
            include_non_public_fields: self.include_private,
            explicit_namespace: self.namespace.clone(),
        }
    }

    /// Substitute environment variables in config strings.
    /// Supports ${VAR_NAME:-default} syntax.
    fn substitute_env_vars(value: &str) -> Result<String> {
        trace!("Substituting environment variables in: {}", value);
        let mut result = value.to_string();

        let re = regex::Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")?;

        for cap in re.captures_iter(value) {
            let var_name = &cap[1];
            let default_value = cap.get(2).map(|m| m.as_str());

            let replacement = match env::var(var_name) {
                Ok(val) => {
                    debug!("Resolved environment variable: {}", var_name);
                    val
                }
                Err(_) => match default_value {
                    Some(default) => {
                        warn!(
                            "Environment variable {} not set, using default: {}",
                            var_name, default
                        );
                        default.to_string()
                    }
                    None => {
                        error!(
                            "Environment variable {} not set and no default provided",
                            var_name
                        );
                        return Err(Dto2TsError::EnvVarNotSet(var_name.to_string()));
                    }
                },
            };

            result = result.replace(&cap[0], &replacement);
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_for_absent_keys() {
        let config = Dto2TsConfig::parse("classes = [\"a.B\"]", ".").unwrap();
        assert_eq!(config.classes, vec!["a.B".to_string()]);
        assert_eq!(config.prefix, "");
        assert_eq!(config.suffix, "");
        assert_eq!(config.output_folder, "");
        assert!(config.overwrite);
        assert!(!config.add_namespace);
        assert!(config.include_private);
        assert!(config.namespace.is_none());
    }

    #[test]
    fn test_full_config() {
        let toml_str = r#"
            classes = ["com.example.UserDto", "com.example.OrderDto"]
            suffix = ".model"
            prefix = "api_"
            output_folder = "web/dto"
            overwrite = false
            add_namespace = true
            include_private = false
            namespace = "Api"

            [source]
            scan_path = "backend"
            descriptors = "classes.json"
        "#;

        let config = Dto2TsConfig::parse(toml_str, "/project").unwrap();
        assert_eq!(config.classes.len(), 2);
        assert_eq!(config.scan_root(), PathBuf::from("/project/backend"));
        assert_eq!(
            config.descriptor_file(),
            Some(PathBuf::from("/project/classes.json"))
        );

        let emitter = config.emitter_config();
        assert_eq!(emitter.output_folder, "/project/web/dto");
        assert_eq!(emitter.filename_prefix, "api_");
        assert_eq!(emitter.filename_suffix, ".model");
        assert!(!emitter.overwrite_existing);
        assert!(emitter.wrap_in_namespace);
        assert!(!emitter.include_non_public_fields);
        assert_eq!(emitter.explicit_namespace.as_deref(), Some("Api"));
    }

    #[test]
    fn test_blank_output_folder_stays_blank() {
        let config = Dto2TsConfig::parse("", "/project").unwrap();
        assert_eq!(config.emitter_config().output_folder, "");
        assert_eq!(config.scan_root(), PathBuf::from("/project"));
        assert!(config.descriptor_file().is_none());
    }

    #[test]
    fn test_blank_prefix_and_suffix_are_dropped() {
        let config = Dto2TsConfig::parse("prefix = \"  \"\nsuffix = \"\\t\"", "/project").unwrap();
        let emitter = config.emitter_config();
        assert_eq!(emitter.filename_prefix, "");
        assert_eq!(emitter.filename_suffix, "");
        assert_eq!(
            crate::typesync::output_path("UserDto", &emitter),
            PathBuf::from("userDto.ts")
        );

        let padded = Dto2TsConfig::parse("prefix = \" p\"", "/project").unwrap();
        assert_eq!(padded.emitter_config().filename_prefix, " p");
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let config = Dto2TsConfig::parse(
            "output_folder = \"/abs/out\"\n[source]\nscan_path = \"/abs/src\"\n",
            "/project",
        )
        .unwrap();
        assert_eq!(config.emitter_config().output_folder, "/abs/out");
        assert_eq!(config.scan_root(), PathBuf::from("/abs/src"));
    }

    #[test]
    fn test_invalid_toml_is_toml_error() {
        let result = Dto2TsConfig::parse("classes = [", ".");
        assert!(matches!(result, Err(Dto2TsError::Toml(_))));
    }

    #[test]
    fn test_starter_config_parses() {
        let config = Dto2TsConfig::parse(STARTER_CONFIG, ".").unwrap();
        assert!(config.classes.is_empty());
        assert_eq!(config.output_folder, "generated");
        assert_eq!(config.source.scan_path.as_deref(), Some("."));
    }

    // ==================== substitute_env_vars Tests ====================

    #[test]
    fn test_substitute_env_vars_basic() {
        temp_env::with_var("DTO2TS_TEST_VAR_BASIC", Some("hello"), || {
            let result = Dto2TsConfig::substitute_env_vars("${DTO2TS_TEST_VAR_BASIC}").unwrap();
            assert_eq!(result, "hello");
        });
    }

    #[test]
    fn test_substitute_env_vars_with_default() {
        temp_env::with_var_unset("DTO2TS_TEST_VAR_UNSET", || {
            let result =
                Dto2TsConfig::substitute_env_vars("out/${DTO2TS_TEST_VAR_UNSET:-dto}").unwrap();
            assert_eq!(result, "out/dto");
        });
    }

    #[test]
    fn test_substitute_env_vars_missing_returns_error() {
        temp_env::with_var_unset("DTO2TS_DEFINITELY_NOT_SET", || {
            let result = Dto2TsConfig::substitute_env_vars("${DTO2TS_DEFINITELY_NOT_SET}");
            assert!(matches!(result, Err(Dto2TsError::EnvVarNotSet(_))));
        });
    }

    #[test]
    fn test_substitute_env_vars_no_match() {
        let result = Dto2TsConfig::substitute_env_vars("no variables here").unwrap();
        assert_eq!(result, "no variables here");
    }

    #[test]
    fn test_parse_substitutes_in_namespace() {
        temp_env::with_var("DTO2TS_TEST_NS", Some("Generated"), || {
            let config = Dto2TsConfig::parse("namespace = \"${DTO2TS_TEST_NS}\"", ".").unwrap();
            assert_eq!(config.namespace.as_deref(), Some("Generated"));
        });
    }

    // ==================== find_config_file Tests ====================

    #[test]
    fn test_find_config_file_in_grandparent_dir() {
        let temp_dir = TempDir::new().unwrap();
        let grandchild = temp_dir.path().join("child").join("grandchild");
        fs::create_dir_all(&grandchild).unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "classes = []").unwrap();

        let found = Dto2TsConfig::find_config_file(&grandchild).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_find_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let result = Dto2TsConfig::find_config_file(temp_dir.path());
        // A dto2ts.toml somewhere above the temp dir would be found instead.
        if let Err(err) = result {
            assert!(err.to_string().contains("dto2ts.toml not found"));
        }
    }

    #[test]
    fn test_from_path_uses_file_directory_as_base() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "output_folder = \"out\"").unwrap();

        let config = Dto2TsConfig::from_path(&config_path).unwrap();
        assert_eq!(config.base_dir, temp_dir.path());
        assert_eq!(
            PathBuf::from(config.emitter_config().output_folder),
            temp_dir.path().join("out")
        );
    }
}
