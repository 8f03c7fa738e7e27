//! Calculator configuration loading.

use mortgage_core::config::CalculatorConfig;

#[test]
fn shipped_config_matches_defaults() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../data/calculator.json");
    let config = CalculatorConfig::load(path).expect("load shipped config");
    assert_eq!(config, CalculatorConfig::default());
}

#[test]
fn missing_keys_fall_back_to_defaults() {
    let config =
        CalculatorConfig::from_json(r#"{ "validation": { "max_term_years": 40 } }"#).unwrap();
    assert_eq!(config.validation.max_term_years, 40);
    assert_eq!(config.validation.min_amount, 50_000.0);
    assert_eq!(config.display.currency_symbol, "$");
}

#[test]
fn nonsensical_limits_are_rejected() {
    assert!(CalculatorConfig::from_json(r#"{ "validation": { "max_term_years": 0 } }"#).is_err());
    assert!(
        CalculatorConfig::from_json(r#"{ "validation": { "max_rate_percent": -5 } }"#).is_err()
    );
}

#[test]
fn term_and_rate_ceilings_are_enforced() {
    let err = CalculatorConfig::from_json(r#"{ "validation": { "max_term_years": 400000000 } }"#)
        .unwrap_err();
    assert!(err.to_string().contains("max_term_years"), "{err}");
    assert!(CalculatorConfig::from_json(r#"{ "validation": { "max_term_years": 101 } }"#).is_err());
    assert!(CalculatorConfig::from_json(r#"{ "validation": { "max_term_years": 100 } }"#).is_ok());

    assert!(
        CalculatorConfig::from_json(r#"{ "validation": { "max_rate_percent": 250 } }"#).is_err()
    );
}

#[test]
fn missing_file_names_the_path() {
    let err = CalculatorConfig::load("/nonexistent/calculator.json").unwrap_err();
    assert!(err.to_string().contains("/nonexistent/calculator.json"));
}
