use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record per successfully processed IPA file. The App Store fields hold
/// either a string sentinel ("Empty", "Unknown", "Request Error") or the raw
/// lookup value, which for screenshots and languages is a JSON list.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IpaMetadata {
    pub name: String,
    pub bundle_name: String,
    pub bundle_display_name: String,
    pub bundle_version: String,
    pub bundle_identifier: String,
    pub app_category: String,
    pub app_icon_size: String,
    pub app_icon_filename: String,
    pub ipa_file_size: String,
    pub app_description: Value,
    pub app_screenshots: Value,
    pub creation_date: String,
    pub app_age: Value,
    pub app_languages: Value,
}
