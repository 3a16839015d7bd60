use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::report::Section;

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Setting not found: {0}")]
    NotFound(String),
    #[error("Settings file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Malformed settings line {line}: expected `key=value`, got {content:?}")]
    Parse { line: usize, content: String },
    #[error("Setting {key:?} contains a line break and cannot be saved")]
    Unrepresentable { key: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum OrderError {
    #[error("Product {name:?} has a negative price: {price}")]
    NegativePrice { name: String, price: Decimal },
    #[error("Order {0} overflowed the decimal range")]
    TotalOverflow(&'static str),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("Report is missing its {0} section")]
    MissingSection(Section),
}
