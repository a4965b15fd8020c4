// SPDX-License-Identifier: MPL-2.0
use agri_advisor::config::{self, Config};
use agri_advisor::form::{self, FormInput};
use agri_advisor::i18n::fluent::I18n;
use agri_advisor::notifications::{Kind, Store};
use agri_advisor::recommendation::Service;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn test_language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let temp_config_file_path = dir.path().join("settings.toml");

    // 1. Initial config: en-US
    let mut initial_config = Config::default();
    initial_config.general.language = Some("en-US".to_string());
    config::save_to_path(&initial_config, &temp_config_file_path)
        .expect("Failed to write initial config file");

    let loaded_initial_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load initial config from path");
    let i18n_en = I18n::new(None, &loaded_initial_config);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    // 2. Change config to fr
    let mut french_config = Config::default();
    french_config.general.language = Some("fr".to_string());
    config::save_to_path(&french_config, &temp_config_file_path)
        .expect("Failed to write french config file");

    let loaded_french_config = config::load_from_path(&temp_config_file_path)
        .expect("Failed to load french config from path");
    let i18n_fr = I18n::new(None, &loaded_french_config);
    assert_eq!(i18n_fr.current_locale().to_string(), "fr");

    // 3. CLI language wins over config
    let i18n_cli = I18n::new(Some("en-US".to_string()), &loaded_french_config);
    assert_eq!(i18n_cli.current_locale().to_string(), "en-US");

    dir.close().expect("Failed to close temporary directory");
}

#[test]
fn test_validation_messages_follow_configured_language() {
    let mut french_config = Config::default();
    french_config.general.language = Some("fr".to_string());
    let i18n = I18n::new(None, &french_config);

    let input = Service::Fertilizer.default_input().with("Moisture", "5");
    let errors = form::validate(&input, Service::Fertilizer.schema(), &i18n);

    assert_eq!(errors.get("Moisture"), Some("Humidité du sol doit être compris entre 10 et 100"));
    assert_eq!(errors.get("Temparature"), Some("Température est obligatoire"));
    assert!(!errors.contains("SoilType"));
    assert!(!errors.contains("CropType"));
}

#[test]
fn test_every_form_field_has_a_translated_label() {
    for locale in ["en-US", "fr"] {
        let i18n = I18n::for_locale(locale);
        for service in Service::ALL {
            let schema = service.schema();
            let labels = schema
                .numeric
                .iter()
                .map(|rule| rule.label_key)
                .chain(schema.categorical.iter().map(|field| field.label_key));
            for key in labels {
                let label = i18n.tr(key);
                assert!(!label.starts_with("MISSING"), "{locale}: {key}");
            }
            assert!(!i18n.tr(service.name_key()).starts_with("MISSING"));
            let result = i18n.tr_with_args(service.result_key(), &[("result", "x")]);
            assert!(!result.starts_with("MISSING"), "{locale}: {result}");
            assert!(result.ends_with('x'), "{locale}: {result}");
        }
    }
}

#[test]
fn test_fertilizer_round_trip_input_is_valid() {
    let i18n = I18n::for_locale("en-US");
    let input: FormInput = [
        ("Temparature", "26"),
        ("Humidity", "52"),
        ("Moisture", "38"),
        ("SoilType", "Loamy"),
        ("CropType", "Oil seeds"),
        ("Nitrogen", "37"),
        ("Phosphorous", "0"),
        ("Potassium", "0"),
    ]
    .into_iter()
    .collect();

    assert!(form::validate(&input, Service::Fertilizer.schema(), &i18n).is_empty());
    let body = serde_json::to_value(Service::Fertilizer.prepare(&input, &i18n).unwrap()).unwrap();
    assert_eq!(body["Crop Type"], "Oil seeds");
    assert_eq!(body["Soil Type"], "Loamy");
}

#[tokio::test(start_paused = true)]
async fn test_store_built_from_config_honours_limits_and_delays() {
    let mut settings = Config::default();
    settings.notifications.limit = Some(2);
    settings.notifications.remove_delay_ms = Some(1_000);
    let store = Store::new(settings.store_settings());
    let driver = tokio::spawn({
        let store = store.clone();
        async move { store.run_timers().await }
    });

    let first = store.error("first", None);
    store.info("second", None);
    store.success("third", None);
    assert_eq!(store.len(), 2);
    assert!(store.get(first).is_none());

    store.dismiss(None);
    assert!(store.visible().is_empty());
    tokio::time::sleep(Duration::from_millis(999)).await;
    assert_eq!(store.len(), 2);
    tokio::time::sleep(Duration::from_millis(2)).await;
    assert!(store.is_empty());

    let warning = store.warning(load_error_text(), None);
    assert_eq!(store.get(warning).map(|n| n.kind()), Some(Kind::Warning));

    driver.abort();
}

fn load_error_text() -> String {
    I18n::for_locale("en-US").tr(config::LOAD_ERROR_KEY)
}
