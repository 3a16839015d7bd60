use anyhow::Context;
use creational_patterns::{
    error::SettingsError,
    logging,
    order::{DeepClone, Discount, Order, Product},
    report::{HtmlReportBuilder, ReportDirector, ReportFormat, TextReportBuilder},
    settings::SettingsStore,
};
use rust_decimal::Decimal;
use std::fs;

use tempfile::tempdir; // scratch dirs for settings files

#[test]
fn theme_is_stored_in_the_global_registry() -> anyhow::Result<()> {
    logging::init();

    let store = SettingsStore::instance();
    store.set("scenario.theme", "dark");

    let value = store
        .get("scenario.theme")
        .context("theme missing right after set")?;
    assert_eq!(value, "dark");

    // any later lookup of the global sees the same write
    assert_eq!(SettingsStore::instance().get("scenario.theme")?, "dark");

    Ok(())
}

#[test]
fn missing_key_can_be_handled_by_the_caller() {
    let store = SettingsStore::instance();

    let fallback = match store.get("scenario.never_set") {
        Ok(value) => value,
        Err(SettingsError::NotFound(_)) => "light".to_string(),
        Err(other) => panic!("unexpected error: {other}"),
    };

    assert_eq!(fallback, "light");
}

#[test]
fn settings_survive_save_and_load() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("settings.txt");

    let store = SettingsStore::new();
    store.set("theme", "dark");
    store.set("language", "en");
    store.set("font size", "14");
    store.set("connection", "host=localhost"); // '=' only in the value is fine

    let written = store.save_to_file(&path).context("Save failed: ")?;
    assert_eq!(written, 4);

    let fresh = SettingsStore::new();
    let read = fresh.load_from_file(&path).context("Load failed: ")?;
    assert_eq!(read, 4);
    assert_eq!(fresh.snapshot(), store.snapshot());

    Ok(())
}

#[test]
fn saved_file_is_plain_key_value_lines() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("settings.txt");

    let store = SettingsStore::new();
    store.set("b", "2");
    store.set("a", "1");
    store.save_to_file(&path)?;

    assert_eq!(fs::read_to_string(&path)?, "a=1\nb=2\n");

    Ok(())
}

#[test]
fn saving_a_line_break_leaves_the_file_untouched() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("settings.txt");
    fs::write(&path, "theme=dark\n")?;

    let store = SettingsStore::new();
    store.set("a", "x\nb=evil");
    match store.save_to_file(&path) {
        Err(SettingsError::Unrepresentable { key }) => assert_eq!(key, "a"),
        other => panic!("expected Unrepresentable, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&path)?, "theme=dark\n");

    // a trailing carriage return would be stripped on load, so it is refused as well
    store.set("a", "v\r");
    assert!(matches!(
        store.save_to_file(&path),
        Err(SettingsError::Unrepresentable { .. })
    ));

    Ok(())
}

#[test]
fn loading_a_missing_file_is_file_not_found() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("does_not_exist.txt");

    let store = SettingsStore::new();
    match store.load_from_file(&path) {
        Err(SettingsError::FileNotFound(missing)) => assert_eq!(missing, path),
        other => panic!("expected FileNotFound, got {other:?}"),
    }
    assert!(store.is_empty());

    Ok(())
}

#[test]
fn loading_a_malformed_file_is_a_parse_error() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("broken.txt");
    fs::write(&path, "theme=dark\n\nlanguage\n")?;

    let store = SettingsStore::new();
    match store.load_from_file(&path) {
        Err(SettingsError::Parse { line, content }) => {
            assert_eq!(line, 3);
            assert_eq!(content, "language");
        }
        other => panic!("expected Parse, got {other:?}"),
    }
    // nothing from the broken file was applied
    assert!(!store.contains("theme"));

    Ok(())
}

#[test]
fn loading_merges_into_existing_settings() -> anyhow::Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("settings.txt");
    fs::write(&path, "theme=dark\n")?;

    let store = SettingsStore::new();
    store.set("theme", "light");
    store.set("language", "en");
    store.load_from_file(&path)?;

    assert_eq!(store.get("theme")?, "dark");
    assert_eq!(store.get("language")?, "en");

    Ok(())
}

#[test]
fn director_drives_both_builders() -> anyhow::Result<()> {
    let director = ReportDirector::new();

    let text = director.construct(&mut TextReportBuilder::new())?;
    assert!(text.header().starts_with("TEXT HEADER: "));
    assert!(text.header().contains("Report 2026"));

    let html = director.construct(&mut HtmlReportBuilder::new())?;
    assert_eq!(html.header(), "<h1>Report 2026</h1>");

    // same director, formats picked at runtime
    for format in [ReportFormat::Text, ReportFormat::Html] {
        let mut builder = format.builder();
        let report = director.construct(builder.as_mut())?;
        assert!(report.content().contains("Sales grew 20%"));
        assert!(report.footer().contains("End of report"));
    }

    Ok(())
}

#[test]
fn cloned_order_diverges_from_original() -> anyhow::Result<()> {
    let original = Order::new()
        .with_product(Product::new("Phone", Decimal::from(500), 1)?)
        .set_delivery_cost(Decimal::from(25))
        .set_payment_method("Card");

    let mut copy = original.deep_clone();
    assert_eq!(copy, original);

    copy.products_mut()[0].set_name("Laptop");

    assert_eq!(original.products()[0].name(), "Phone");
    assert_eq!(copy.products()[0].name(), "Laptop");
    assert_eq!(copy.delivery_cost(), Decimal::from(25));
    assert_eq!(copy.payment_method(), "Card");

    Ok(())
}

#[test]
fn cloned_order_can_grow_independently() -> anyhow::Result<()> {
    let original = Order::new()
        .with_product(Product::new("Phone", Decimal::from(500), 1)?)
        .with_discount(Discount::new("Spring sale", Decimal::from(50)));

    let mut copy = original.deep_clone();
    copy.products_mut()
        .push(Product::new("Charger", Decimal::new(1999, 2), 2)?);
    copy.discounts_mut().clear();
    let copy = copy.set_payment_method("Cash");

    assert_eq!(original.products().len(), 1);
    assert_eq!(original.discounts().len(), 1);
    assert_eq!(original.payment_method(), "");
    assert_eq!(original.total()?, Decimal::from(450));
    assert_eq!(copy.total()?, Decimal::new(53998, 2));

    Ok(())
}
