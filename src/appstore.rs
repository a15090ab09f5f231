use serde_json::Value;

const LOOKUP_URL: &str = "https://itunes.apple.com/lookup?bundleId=";

/// Fields the iTunes Search API lookup can supply, keyed by their name in the
/// first `results` object of the response.
#[derive(Debug, Clone, Copy)]
pub enum LookupField {
    Category,
    Description,
    Screenshots,
    Age,
    Languages,
}

impl LookupField {
    fn key(self) -> &'static str {
        match self {
            LookupField::Category => "primaryGenreName",
            LookupField::Description => "description",
            LookupField::Screenshots => "screenshotUrls",
            LookupField::Age => "contentAdvisoryRating",
            LookupField::Languages => "languageCodesISO2A",
        }
    }
}

/// Client for the public iTunes lookup endpoint. Lookups never fail: network
/// or HTTP errors degrade to the "Request Error" sentinel and an empty result
/// set to "Unknown". One full round trip per field, no caching.
pub struct AppStoreClient {
    http: reqwest::blocking::Client,
}

impl AppStoreClient {
    pub fn new() -> Self {
        AppStoreClient {
            http: reqwest::blocking::Client::new(),
        }
    }

    pub fn lookup(&self, bundle_id: &str, field: LookupField) -> Value {
        let url = format!("{LOOKUP_URL}{bundle_id}");
        let resp = match self.http.get(&url).send() {
            Ok(resp) => resp,
            Err(_) => return Value::String("Request Error".to_string()),
        };
        if resp.status() != reqwest::StatusCode::OK {
            return Value::String("Request Error".to_string());
        }
        match resp.json::<Value>() {
            Ok(body) => extract_field(&body, field.key()),
            Err(_) => Value::String("Request Error".to_string()),
        }
    }

    /// Category is always a plain string in the catalog, so coerce the lookup
    /// result; a non-string value degrades to "Unknown".
    pub fn lookup_string(&self, bundle_id: &str, field: LookupField) -> String {
        match self.lookup(bundle_id, field) {
            Value::String(s) => s,
            _ => "Unknown".to_string(),
        }
    }
}

impl Default for AppStoreClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull `key` out of the first result of a lookup response body.
fn extract_field(body: &Value, key: &str) -> Value {
    let count = body.get("resultCount").and_then(Value::as_u64).unwrap_or(0);
    if count == 0 {
        return Value::String("Unknown".to_string());
    }
    body.get("results")
        .and_then(|r| r.get(0))
        .and_then(|first| first.get(key))
        .cloned()
        .unwrap_or_else(|| Value::String("Unknown".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zero_results_resolve_to_unknown() {
        let body = json!({"resultCount": 0, "results": []});
        assert_eq!(
            extract_field(&body, "primaryGenreName"),
            json!("Unknown")
        );
    }

    #[test]
    fn string_and_list_fields_are_returned_verbatim() {
        let body = json!({
            "resultCount": 1,
            "results": [{
                "primaryGenreName": "Games",
                "screenshotUrls": ["https://example.com/1.png", "https://example.com/2.png"],
            }]
        });
        assert_eq!(extract_field(&body, "primaryGenreName"), json!("Games"));
        assert_eq!(
            extract_field(&body, "screenshotUrls"),
            json!(["https://example.com/1.png", "https://example.com/2.png"])
        );
    }

    #[test]
    fn missing_field_resolves_to_unknown() {
        let body = json!({"resultCount": 1, "results": [{"description": "hi"}]});
        assert_eq!(
            extract_field(&body, "contentAdvisoryRating"),
            json!("Unknown")
        );
    }

    #[test]
    fn malformed_body_resolves_to_unknown() {
        let body = json!({"unexpected": true});
        assert_eq!(extract_field(&body, "description"), json!("Unknown"));
    }
}
