use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Job {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub track: Option<String>,
    pub album: Option<String>,
    /// If true, ask for the title on the terminal before processing starts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask_title: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trim_names: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleanup: Option<bool>,
}

impl Job {
    pub fn load(path: Option<&str>) -> anyhow::Result<Option<Self>> {
        if let Some(path) = path {
            let contents = std::fs::read_to_string(path)?;
            let job: Job = serde_json::from_str(&contents)?;
            Ok(Some(job))
        } else {
            Ok(None)
        }
    }
}
