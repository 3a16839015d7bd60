//! Walkthrough of the three patterns.
//!
//! Run with `RUST_LOG=debug` to see the library's events. The settings file is
//! written to `PATTERNS_SETTINGS_PATH` when set, otherwise to a temporary dir.

use anyhow::Context;
use creational_patterns::{
    logging,
    order::{DeepClone, Order, Product},
    report::{ReportDirector, ReportFormat},
    settings::SettingsStore,
};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::thread;
use tracing::info;

fn main() -> anyhow::Result<()> {
    logging::init();

    // two threads race on the first access of the shared registry
    let handles: Vec<_> = (0..2)
        .map(|_| {
            thread::spawn(|| {
                let store = SettingsStore::instance();
                store.set("theme", "dark");
                store as *const SettingsStore as usize
            })
        })
        .collect();
    for handle in handles {
        let addr = handle
            .join()
            .map_err(|_| anyhow::anyhow!("settings worker panicked"))?;
        info!("worker saw store at {addr:#x}");
    }

    let temp_dir = tempfile::tempdir()?;
    let path = std::env::var_os("PATTERNS_SETTINGS_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| temp_dir.path().join("settings.txt"));

    let store = SettingsStore::instance();
    store.save_to_file(&path).context("saving settings")?;
    let reloaded = SettingsStore::new();
    reloaded.load_from_file(&path).context("reloading settings")?;
    info!(theme = %reloaded.get("theme")?, path = %path.display(), "settings round trip");

    let director = ReportDirector::new();
    for format in [ReportFormat::Text, ReportFormat::Html] {
        let mut builder = format.builder();
        let report = director.construct(builder.as_mut())?;
        println!("{report}\n--------------");
    }

    let original = Order::new()
        .with_product(Product::new("Phone", Decimal::from(500), 1)?)
        .set_delivery_cost(Decimal::from(25))
        .set_payment_method("Card");
    let mut copy = original.deep_clone();
    copy.products_mut()[0].set_name("Laptop");

    for order in [&original, &copy] {
        for product in order.products() {
            println!(
                "{} {} x{}",
                product.name(),
                product.price(),
                product.quantity()
            );
        }
        println!(
            "Delivery: {}\nPayment: {}\n-----------",
            order.delivery_cost(),
            order.payment_method()
        );
    }

    Ok(())
}
