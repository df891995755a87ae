use itemspec_core::config::{ConfigError, ConfigValue, SpecConfig};
use serial_test::serial;
use std::io::Write;

#[test]
fn empty_config() {
    let config = SpecConfig::empty();
    assert!(matches!(
        config.get::<String>("openapi.title"),
        Err(ConfigError::NotFound(_))
    ));
}

#[test]
fn set_and_get() {
    let mut config = SpecConfig::empty();
    config.set("openapi.title", ConfigValue::String("Items".into()));
    assert_eq!(config.get::<String>("openapi.title").unwrap(), "Items");
}

#[test]
fn get_or_default() {
    let config = SpecConfig::empty();
    assert_eq!(config.get_or("generator.depth", 3i64), 3);
}

#[test]
fn flatten_yaml() {
    let yaml = r#"
openapi:
  title: "Project API"
  version: "2.1.0"
  servers:
    - https://api.example.com
    - https://staging.example.com
generator:
  strict: yes
"#;
    let config = SpecConfig::from_yaml_str(yaml).unwrap();

    assert_eq!(config.get::<String>("openapi.title").unwrap(), "Project API");
    assert_eq!(
        config.get::<Vec<String>>("openapi.servers").unwrap(),
        vec!["https://api.example.com", "https://staging.example.com"]
    );
    assert!(config.get::<bool>("generator.strict").unwrap());
}

#[test]
fn type_mismatch() {
    let config = SpecConfig::from_yaml_str("openapi:\n  title: [a, b]\n").unwrap();
    let err = config.get::<String>("openapi.title").unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    assert!(err.to_string().contains("openapi.title"));
}

#[test]
fn null_is_absent_for_get_opt() {
    let config = SpecConfig::from_yaml_str("openapi:\n  description: ~\n").unwrap();
    assert_eq!(config.get_opt::<String>("openapi.description").unwrap(), None);
    assert_eq!(config.get_opt::<String>("openapi.missing").unwrap(), None);
}

#[test]
fn invalid_yaml_is_load_error() {
    let err = SpecConfig::from_yaml_str("openapi: [unclosed").unwrap_err();
    assert!(matches!(err, ConfigError::Load(_)));
}

#[test]
#[serial]
fn load_file_with_env_overlay() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "openapi:\n  title: From File\n  version: \"1.0.0\"").unwrap();

    std::env::set_var("ITEMSPEC_OPENAPI_VERSION", "9.9.9");
    std::env::set_var("ITEMSPEC_OPENAPI_PUBLIC_URL", "https://cms.example.com");
    let config = SpecConfig::load(file.path()).unwrap();
    std::env::remove_var("ITEMSPEC_OPENAPI_VERSION");
    std::env::remove_var("ITEMSPEC_OPENAPI_PUBLIC_URL");

    assert_eq!(config.get::<String>("openapi.title").unwrap(), "From File");
    assert_eq!(config.get::<String>("openapi.version").unwrap(), "9.9.9");
    assert_eq!(
        config.get::<String>("openapi.public_url").unwrap(),
        "https://cms.example.com"
    );
}

#[test]
#[serial]
fn load_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = SpecConfig::load(dir.path().join("absent.yaml")).unwrap();
    assert!(!config.contains_key("openapi.title"));
}

#[test]
#[serial]
fn env_list_is_comma_separated() {
    std::env::set_var("ITEMSPEC_OPENAPI_SERVERS", "https://a.example.com, https://b.example.com");
    let dir = tempfile::tempdir().unwrap();
    let config = SpecConfig::load(dir.path().join("absent.yaml")).unwrap();
    std::env::remove_var("ITEMSPEC_OPENAPI_SERVERS");

    assert_eq!(
        config.get::<Vec<String>>("openapi.servers").unwrap(),
        vec!["https://a.example.com", "https://b.example.com"]
    );
}

#[test]
fn keys_are_dotted_and_sorted() {
    let config =
        SpecConfig::from_yaml_str("openapi:\n  version: \"1\"\n  title: T\nlog: debug\n")
            .unwrap();
    let keys: Vec<&str> = config.keys().collect();
    assert_eq!(keys, vec!["log", "openapi.title", "openapi.version"]);
}

#[test]
fn integer_from_text() {
    let mut config = SpecConfig::empty();
    config.set("generator.depth", ConfigValue::String(" 4 ".into()));
    assert_eq!(config.get::<i64>("generator.depth").unwrap(), 4);
    config.set("generator.depth", ConfigValue::Bool(true));
    assert!(config.get::<i64>("generator.depth").is_err());
}
