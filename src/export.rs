use crate::bands::Color;
use crate::dashboard::{DashboardView, Site};
use crate::metrics::Metric;
use crate::write_output_file;
use anyhow::{Context, Result};
use csv::Writer;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize)]
struct GaugeRecord<'a> {
    site: Site,
    target: &'a str,
    source: &'a str,
    metric: Metric,
    raw: Option<&'a str>,
    value: Option<f64>,
    level: &'a str,
    background: Color,
    text_color: Option<Color>,
    font_size_px: Option<u8>,
    text: &'a str,
}

pub fn serialize_gauges(view: &DashboardView) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    for gauge in &view.gauges {
        let style = gauge.result.style;
        let record = GaugeRecord {
            site: view.site,
            target: gauge.target,
            source: gauge.source,
            metric: gauge.metric,
            raw: gauge.raw.as_deref(),
            value: gauge.result.value,
            level: gauge.result.level,
            background: style.background,
            text_color: style.text,
            font_size_px: style.font_size_px,
            text: &gauge.text,
        };
        writer
            .serialize(record)
            .context("failed to serialize gauge record")?;
    }
    finalize_writer(writer, "gauge CSV writer")
}

fn finalize_writer(mut writer: Writer<Vec<u8>>, label: &str) -> Result<Vec<u8>> {
    writer
        .flush()
        .with_context(|| format!("failed to flush {label}"))?;
    writer
        .into_inner()
        .with_context(|| format!("failed to finalize {label}"))
}

fn gzip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(bytes)
        .context("failed to compress CSV output")?;
    encoder.finish().context("failed to finish CSV archive")
}

/// `gauges.csv` becomes `gauges.csv.gz`.
pub fn archive_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".gz");
    PathBuf::from(name)
}

/// Saves one CSV row per gauge and returns the path actually written.
pub async fn save_gauges_csv(view: &DashboardView, path: &Path, archive: bool) -> Result<PathBuf> {
    let serialized = serialize_gauges(view)?;
    if archive {
        let target = archive_path(path);
        write_output_file(&target, &gzip(&serialized)?).await?;
        Ok(target)
    } else {
        write_output_file(path, &serialized).await?;
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_view;
    use crate::readings::Readings;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn galway_view() -> DashboardView {
        let mut readings = Readings::default();
        readings.insert("tide-now", "6.0");
        readings.insert("tide-extreme-1", "DRY");
        build_view(Site::GalwayBay, &readings, String::new())
    }

    #[test]
    fn csv_has_one_row_per_gauge() {
        let view = galway_view();
        let bytes = serialize_gauges(&view).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("site,target,source,metric,raw,value,level,background,text_color,font_size_px,text")
        );
        assert_eq!(
            lines.next(),
            Some("galway-bay,current-tide,tide-now,tide,6.0,6.0,danger,#FF0000,#FFFFFF,,6.0 m")
        );
        assert_eq!(
            lines.next(),
            Some("galway-bay,next-tide-value-1,tide-extreme-1,tide,DRY,,no-data,#8B8000,#FFFFFF,11,DRY m")
        );
        assert_eq!(text.lines().count(), view.gauges.len() + 1);
    }

    #[test]
    fn archive_appends_gz_extension() {
        assert_eq!(
            archive_path(Path::new("out/gauges.csv")),
            PathBuf::from("out/gauges.csv.gz")
        );
    }

    #[test]
    fn gzip_round_trips_csv() {
        let plain = serialize_gauges(&galway_view()).unwrap();
        let packed = gzip(&plain).unwrap();
        let mut unpacked = Vec::new();
        GzDecoder::new(packed.as_slice())
            .read_to_end(&mut unpacked)
            .unwrap();
        assert_eq!(unpacked, plain);
    }
}
