use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::Path;

use plist::Value as PlistValue;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use zip::ZipArchive;

use crate::appstore::{AppStoreClient, LookupField};
use crate::cli::Config;
use crate::model::IpaMetadata;
use crate::utils::{format_timestamp, sizeof_fmt};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not an IPA archive: {0}")]
    NotAnArchive(String),
    #[error("Info.plist not found in IPA archive")]
    ManifestNotFound,
    #[error("malformed Info.plist: {0}")]
    ManifestParse(#[from] plist::Error),
    #[error("Info.plist root is not a dictionary")]
    ManifestNotDict,
    #[error("app icon not found in IPA archive")]
    IconNotFound,
    #[error("app icon entry is empty")]
    EmptyIcon,
    #[error("archive read error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Extract one IPA file into a metadata record.
///
/// Opens the archive, parses `Payload/<App>.app/Info.plist`, resolves the app
/// icon, and writes the icon bytes to `<stem>_app_icon.png` under the
/// configured icon directory. When `fetch_appstore` is set, the four catalog
/// fields (and a missing category) are filled via the iTunes lookup endpoint;
/// otherwise they carry the "Empty" sentinel.
pub fn extract_ipa(ipa_path: &Path, config: &Config) -> Result<IpaMetadata, ExtractError> {
    let file = File::open(ipa_path).map_err(|e| ExtractError::NotAnArchive(e.to_string()))?;
    let mut archive =
        ZipArchive::new(file).map_err(|e| ExtractError::NotAnArchive(e.to_string()))?;
    let entry_names: Vec<String> = archive.file_names().map(str::to_owned).collect();

    let manifest_re = Regex::new(r"^Payload/[^/]+\.app/Info\.plist$").unwrap();
    let manifest_name = entry_names
        .iter()
        .find(|n| manifest_re.is_match(n))
        .ok_or(ExtractError::ManifestNotFound)?;
    let manifest_data = read_entry(&mut archive, manifest_name)?;
    let manifest = PlistValue::from_reader(Cursor::new(&manifest_data))?;
    let info = manifest
        .as_dictionary()
        .ok_or(ExtractError::ManifestNotDict)?;

    let plist_str = |key: &str| {
        info.get(key)
            .and_then(PlistValue::as_string)
            .unwrap_or("")
            .to_string()
    };
    let bundle_name = plist_str("CFBundleName");
    let bundle_display_name = plist_str("CFBundleDisplayName");
    let bundle_version = plist_str("CFBundleShortVersionString");
    let bundle_identifier = plist_str("CFBundleIdentifier");
    let mut app_category = info
        .get("LSApplicationCategoryType")
        .and_then(PlistValue::as_string)
        .unwrap_or("Unknown")
        .to_string();

    let (app_description, app_screenshots, app_age, app_languages) = if config.fetch_appstore {
        let client = AppStoreClient::new();
        if app_category == "Unknown" {
            app_category = client.lookup_string(&bundle_identifier, LookupField::Category);
        }
        (
            client.lookup(&bundle_identifier, LookupField::Description),
            client.lookup(&bundle_identifier, LookupField::Screenshots),
            client.lookup(&bundle_identifier, LookupField::Age),
            client.lookup(&bundle_identifier, LookupField::Languages),
        )
    } else {
        let empty = Value::String("Empty".to_string());
        (empty.clone(), empty.clone(), empty.clone(), empty)
    };

    let icon_entry = resolve_icon_entry(&mut archive, &entry_names, info)?;
    let icon_data = read_entry(&mut archive, &icon_entry)?;
    if icon_data.is_empty() {
        return Err(ExtractError::EmptyIcon);
    }

    let stem = ipa_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    fs::write(
        config.icon_dir.join(format!("{stem}_app_icon.png")),
        &icon_data,
    )?;

    let meta = fs::metadata(ipa_path)?;
    let created = meta.created().or_else(|_| meta.modified())?;

    Ok(IpaMetadata {
        name: stem,
        bundle_name,
        bundle_display_name,
        bundle_version,
        bundle_identifier,
        app_category,
        app_icon_size: sizeof_fmt(icon_data.len() as i64),
        app_icon_filename: icon_entry,
        ipa_file_size: sizeof_fmt(meta.len() as i64),
        app_description,
        app_screenshots,
        creation_date: format_timestamp(created),
        app_age,
        app_languages,
    })
}

/// Pick the in-archive path of the app icon.
///
/// The icon name comes from CFBundleIcons' primary icon, falling back to the
/// legacy CFBundleIconFiles list. Among entries ending in `<name>.png` the
/// largest uncompressed one wins (the high-resolution variant). If the
/// manifest names no icon or nothing matches, the first entry that looks like
/// `Payload/<App>.app/*icon*.png` is taken instead.
fn resolve_icon_entry(
    archive: &mut ZipArchive<File>,
    entry_names: &[String],
    info: &plist::Dictionary,
) -> Result<String, ExtractError> {
    let icon_name = info
        .get("CFBundleIcons")
        .and_then(PlistValue::as_dictionary)
        .and_then(|d| d.get("CFBundlePrimaryIcon"))
        .and_then(PlistValue::as_dictionary)
        .and_then(|d| d.get("CFBundleIconName"))
        .and_then(PlistValue::as_string)
        .map(str::to_owned)
        .or_else(|| {
            info.get("CFBundleIconFiles")
                .and_then(PlistValue::as_array)
                .and_then(|a| a.first())
                .and_then(PlistValue::as_string)
                .map(str::to_owned)
        });

    let mut icon_entry: Option<String> = None;
    if let Some(name) = icon_name {
        let suffix = format!("{name}.png");
        let mut max_size = 0u64;
        for entry_name in entry_names {
            if entry_name.ends_with(&suffix) {
                let size = archive.by_name(entry_name)?.size();
                if size > max_size {
                    icon_entry = Some(entry_name.clone());
                    max_size = size;
                }
            }
        }
    }

    if icon_entry.is_none() {
        let icon_re = Regex::new(r"^Payload/[^/]+\.app/.*[Ii]con.*\.png$").unwrap();
        icon_entry = entry_names.iter().find(|n| icon_re.is_match(n)).cloned();
    }

    icon_entry.ok_or(ExtractError::IconNotFound)
}

fn read_entry(archive: &mut ZipArchive<File>, name: &str) -> Result<Vec<u8>, ExtractError> {
    let mut entry = archive.by_name(name)?;
    let mut data = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut data)?;
    Ok(data)
}
