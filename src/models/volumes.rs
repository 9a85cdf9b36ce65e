use serde::Deserialize;

/// Body of a catalog volumes search. `items` is missing entirely when
/// nothing matched.
#[derive(Debug, Default, Deserialize)]
pub struct VolumesResponse {
    #[serde(rename = "totalItems", default)]
    pub total_items: u64,
    #[serde(default)]
    pub items: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Volume {
    pub volume_info: Option<VolumeInfo>,
    pub access_info: Option<AccessInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub industry_identifiers: Option<Vec<IndustryIdentifier>>,
    pub image_links: Option<ImageLinks>,
    pub published_date: Option<String>,
    pub average_rating: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct IndustryIdentifier {
    pub identifier: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessInfo {
    pub is_ebook: Option<bool>,
}
