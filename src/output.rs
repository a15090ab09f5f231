use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;

use crate::model::IpaMetadata;

/// Serialize the collected records as a pretty-printed JSON array named by
/// the current wall-clock time, e.g. `2026-08-25_14-03-59.json`.
pub fn write_results(results: &[IpaMetadata], output_dir: &Path) -> Result<PathBuf> {
    let fname = output_dir.join(format!("{}.json", Local::now().format("%Y-%m-%d_%H-%M-%S")));
    let mut f = File::create(&fname)?;
    writeln!(f, "{}", serde_json::to_string_pretty(results)?)?;
    Ok(fname)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn record(name: &str) -> IpaMetadata {
        IpaMetadata {
            name: name.to_string(),
            bundle_name: "Demo".to_string(),
            bundle_display_name: "Demo App".to_string(),
            bundle_version: "1.0".to_string(),
            bundle_identifier: "com.example.demo".to_string(),
            app_category: "Unknown".to_string(),
            app_icon_size: "9.0B".to_string(),
            app_icon_filename: "Payload/Demo.app/AppIcon.png".to_string(),
            ipa_file_size: "1.0KB".to_string(),
            app_description: json!("Empty"),
            app_screenshots: json!("Empty"),
            creation_date: "01-01-2026 00:00:00".to_string(),
            app_age: json!("Empty"),
            app_languages: json!("Empty"),
        }
    }

    #[test]
    fn writes_timestamped_json_array() {
        let dir = TempDir::new().unwrap();
        let path = write_results(&[record("a"), record("b")], dir.path()).unwrap();

        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        let re =
            regex::Regex::new(r"^\d{4}-\d{2}-\d{2}_\d{2}-\d{2}-\d{2}\.json$").unwrap();
        assert!(re.is_match(&name), "unexpected output name: {name}");

        let parsed: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let records = parsed.as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["bundle_identifier"], json!("com.example.demo"));
    }
}
