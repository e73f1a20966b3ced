//! Readings store: the key-value document a dashboard is rendered from.
//!
//! Two shapes are accepted. A JSON document:
//!
//! ```json
//! { "site": "galway-bay",
//!   "values": { "tide-now": "3.41", "tidal-status": "flood" },
//!   "labels": { "current-tide": "3.41 m" },
//!   "daily":  [ { "image": "chl/2024-05-03.png", "date": "03/05/2024" } ],
//!   "weekly": [ { "image": "chl/w18.png", "monday": "29/04/2024", "sunday": "05/05/2024" } ] }
//! ```
//!
//! or an HTML page in which every element carrying both `id` and `content`
//! is a reading (`<meta id="tide-now" content="3.41">`), `input` elements
//! with an `id` and `value` provide target labels, and composite images are
//! `img.daily-composite[data-date]` / `img.weekly-composite[data-monday][data-sunday]`.

use crate::carousel::{DailySlide, WeeklySlide};
use anyhow::{Context, Result, anyhow};
use rustc_hash::FxHashMap;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Default)]
pub struct Readings {
    pub site: Option<String>,
    values: FxHashMap<String, String>,
    labels: FxHashMap<String, String>,
    pub daily: Vec<DailySlide>,
    pub weekly: Vec<WeeklySlide>,
}

#[derive(Debug, Deserialize)]
struct ReadingsDocument {
    #[serde(default)]
    site: Option<String>,
    #[serde(default)]
    values: FxHashMap<String, Value>,
    #[serde(default)]
    labels: FxHashMap<String, String>,
    #[serde(default)]
    daily: Vec<DailySlide>,
    #[serde(default)]
    weekly: Vec<WeeklySlide>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingsFormat {
    Json,
    Html,
}

impl ReadingsFormat {
    pub fn from_path(path: &Path) -> Self {
        let is_html = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"));
        if is_html { Self::Html } else { Self::Json }
    }
}

impl Readings {
    /// Raw text stored under `key`, if the document has it.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Preset label of a target element.
    pub fn label(&self, target: &str) -> Option<&str> {
        self.labels.get(target).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn insert_label(&mut self, target: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(target.into(), label.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let document: ReadingsDocument =
            serde_json::from_str(text).context("failed to parse readings JSON")?;
        let values = document
            .values
            .into_iter()
            .map(|(key, value)| (key, value_text(value)))
            .collect();
        Ok(Self {
            site: document.site,
            values,
            labels: document.labels,
            daily: document.daily,
            weekly: document.weekly,
        })
    }

    pub fn from_html(text: &str) -> Result<Self> {
        let document = Html::parse_document(text);
        let reading_selector = selector("[id][content]")?;
        let label_selector = selector("input[id][value]")?;
        let site_selector = selector("meta[name=\"site\"][content]")?;
        let daily_selector = selector("img.daily-composite[src][data-date]")?;
        let weekly_selector = selector("img.weekly-composite[src][data-monday][data-sunday]")?;

        let mut readings = Self {
            site: document
                .select(&site_selector)
                .next()
                .and_then(|meta| meta.value().attr("content"))
                .map(|site| site.trim().to_string()),
            ..Self::default()
        };

        for element in document.select(&reading_selector) {
            if let (Some(id), Some(content)) = (attr(element, "id"), attr(element, "content")) {
                readings.insert(id, content);
            }
        }
        for element in document.select(&label_selector) {
            if let (Some(id), Some(value)) = (attr(element, "id"), attr(element, "value")) {
                readings.insert_label(id, value);
            }
        }
        readings.daily = document
            .select(&daily_selector)
            .filter_map(|img| {
                Some(DailySlide {
                    image: attr(img, "src")?.to_string(),
                    date: attr(img, "data-date")?.to_string(),
                })
            })
            .collect();
        readings.weekly = document
            .select(&weekly_selector)
            .filter_map(|img| {
                Some(WeeklySlide {
                    image: attr(img, "src")?.to_string(),
                    monday: attr(img, "data-monday")?.to_string(),
                    sunday: attr(img, "data-sunday")?.to_string(),
                })
            })
            .collect();

        Ok(readings)
    }

    pub fn parse(text: &str, format: ReadingsFormat) -> Result<Self> {
        match format {
            ReadingsFormat::Json => Self::from_json(text),
            ReadingsFormat::Html => Self::from_html(text),
        }
    }
}

pub async fn load_readings(path: &Path) -> Result<Readings> {
    let text = fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read readings from {}", path.display()))?;
    Readings::parse(&text, ReadingsFormat::from_path(path))
        .with_context(|| format!("invalid readings document {}", path.display()))
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|_| anyhow!("invalid selector {css}"))
}

fn attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name).map(str::trim)
}

// Published feeds mix quoted and bare numbers; flags may arrive as booleans.
fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        Value::Bool(flag) => String::from(if flag { "1" } else { "0" }),
        other => other.to_string(),
    }
}
