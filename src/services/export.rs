use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::models::{DetailTypeRecord, Entry, Story};
use crate::project::Project;
use crate::LorebookError;

/// Entry as written to an export document.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySpec {
    pub title: String,
    #[serde(rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub global: bool,
    pub description: Option<String>,
    /// Detail title -> value, in entry order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<DetailSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailSpec {
    pub title: String,
    pub value: String,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSpec {
    pub chapter: usize,
    pub number: usize,
    pub summary: Option<String>,
    pub text: Option<String>,
}

/// Human-readable snapshot of a whole project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldExport {
    pub entries: Vec<EntrySpec>,
    pub scenes: Vec<SceneSpec>,
    /// Non-empty style fields only.
    pub style: BTreeMap<String, String>,
    pub details: BTreeMap<String, DetailTypeRecord>,
}

fn non_empty(s: &str) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

impl From<&Entry> for EntrySpec {
    fn from(entry: &Entry) -> Self {
        EntrySpec {
            title: entry.title.clone(),
            entry_type: non_empty(&entry.entry_type),
            global: entry.is_global,
            description: non_empty(&entry.description),
            details: entry
                .details
                .iter()
                .map(|d| DetailSpec {
                    title: d.title.clone(),
                    value: d.value.clone(),
                })
                .collect(),
        }
    }
}

fn export_scenes(story: &Story) -> Vec<SceneSpec> {
    story
        .scenes()
        .map(|(coord, scene)| SceneSpec {
            chapter: coord.chapter + 1,
            number: coord.scene + 1,
            summary: non_empty(&scene.summary),
            text: non_empty(&scene.text),
        })
        .collect()
}

pub struct ExportService;

impl ExportService {
    pub fn export_world(project: &Project) -> WorldExport {
        let style = project
            .style
            .fields()
            .into_iter()
            .filter(|(_, v)| !v.trim().is_empty())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        WorldExport {
            entries: project.entries.iter().map(EntrySpec::from).collect(),
            scenes: export_scenes(&project.story),
            style,
            details: project.details.export(),
        }
    }

    /// Render the export as YAML with a comment header.
    pub fn to_yaml(export: &WorldExport) -> Result<String, LorebookError> {
        let yaml = serde_yaml_ng::to_string(export)?;
        let header = format!(
            "# Lorebook world export\n# Version: {}\n# Exported: {}\n",
            env!("CARGO_PKG_VERSION"),
            chrono::Utc::now().to_rfc3339()
        );
        Ok(format!("{}{}", header, yaml))
    }
}
