//! Records as the GraphQL service returns them. Relations arrive pre-joined;
//! nothing here joins or filters.

use serde::{Deserialize, Deserializer, Serialize};

fn null_as_empty<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRef {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub course: Option<CourseRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    // Served as either a date string or an epoch number depending on the backend version.
    #[serde(default)]
    pub birthday: Option<serde_json::Value>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subjects: Vec<Subject>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub courses: Vec<CourseRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub dni: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub birthday: Option<serde_json::Value>,
    #[serde(default)]
    pub picture: Option<String>,
}

/// "name lastname", tolerating a missing last name.
pub fn full_name(name: &str, lastname: Option<&str>) -> String {
    match lastname.map(str::trim).filter(|s| !s.is_empty()) {
        Some(last) => format!("{} {}", name.trim(), last),
        None => name.trim().to_string(),
    }
}
