//! Application constants and configuration

pub const APP_NAME: &str = "metrix";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const API_URL_ENV: &str = "METRIX_API_URL";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Button labels
pub const LABEL_CONVERT: &str = "Convert";
pub const LABEL_BATCH_CONVERT: &str = "Batch Convert";
pub const LABEL_CONVERTING: &str = "Converting...";
pub const LABEL_LOADING_UNITS: &str = "Loading units...";

// Validation messages
pub const MSG_EMPTY_VALUE: &str = "Please enter a value";
pub const MSG_INVALID_NUMBER: &str = "Please enter a valid number";
pub const MSG_NON_FINITE: &str = "Please enter a finite number";
pub const MSG_NO_FROM_UNIT: &str = "Please select a source unit";
pub const MSG_NO_TO_UNIT: &str = "Please select a target unit";

// Error prefixes and fallbacks
pub const PREFIX_UNITS_FAILED: &str = "Failed to load units";
pub const PREFIX_CONVERT_FAILED: &str = "Conversion failed";
pub const PREFIX_BATCH_FAILED: &str = "Batch conversion failed";
pub const FALLBACK_CONVERT: &str = "Conversion failed";
pub const FALLBACK_BATCH: &str = "Batch conversion failed";

// Batch panel text
pub const MSG_BATCH_EMPTY: &str = "No conversion results.";
pub const MSG_BATCH_WARNING: &str = "Warning: conversion failed for the following units";
