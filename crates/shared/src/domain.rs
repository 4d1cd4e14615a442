use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A student as returned by the record service lookup.
///
/// Values are carried verbatim; a JSON `null` is read as an empty string and
/// numeric ids are kept as their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StudentRecord {
    #[serde(deserialize_with = "string_or_null")]
    pub student_id: String,
    #[serde(deserialize_with = "string_or_null")]
    pub student_name: String,
    #[serde(deserialize_with = "string_or_null")]
    pub school_id: String,
    #[serde(deserialize_with = "string_or_null")]
    pub photo_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

impl UploadStatus {
    pub fn is_success(self) -> bool {
        self == UploadStatus::Success
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub filename: String,
    pub status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    #[serde(rename = "imageUrl", deserialize_with = "string_or_null")]
    pub image_url: String,
    #[serde(deserialize_with = "string_or_null")]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(json_kind(&other)),
            &"a string, number or null",
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        _ => "scalar",
    }
}
