use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::config::LabelConfig;

/// What a page is tagged as.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Category {
    Index,
    #[serde(alias = "oa")]
    OriginalApplication,
    /// Annexure with a free-form number ("2", "10(1)", "A").
    Annexures {
        #[serde(default)]
        number: String,
    },
    Vakalath,
    Custom {
        #[serde(default)]
        name: String,
    },
}

impl Category {
    /// Display name of the kind itself, used when nothing more specific is set.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Category::Index => "Index",
            Category::OriginalApplication => "Original Application (OA)",
            Category::Annexures { .. } => "Annexures",
            Category::Vakalath => "Vakalath",
            Category::Custom { .. } => "Custom",
        }
    }
}

/// A page's category plus an optional display name that overrides it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    #[serde(flatten)]
    pub category: Category,
    #[serde(
        default,
        deserialize_with = "non_empty_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_name: Option<String>,
}

/// A blank custom name reads as no custom name.
fn non_empty_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|name| !name.is_empty()))
}

impl Assignment {
    pub fn new(category: Category) -> Self {
        Assignment {
            category,
            custom_name: None,
        }
    }

    pub fn index() -> Self {
        Self::new(Category::Index)
    }

    pub fn original_application() -> Self {
        Self::new(Category::OriginalApplication)
    }

    pub fn annexure(number: impl Into<String>) -> Self {
        Self::new(Category::Annexures {
            number: number.into(),
        })
    }

    pub fn vakalath() -> Self {
        Self::new(Category::Vakalath)
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self::new(Category::Custom { name: name.into() })
    }

    /// Override the displayed label. An empty name clears the override.
    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.custom_name = (!name.is_empty()).then_some(name);
        self
    }

    /// Resolve the label pages are grouped and bookmarked under.
    ///
    /// A non-empty custom name always wins. After that, custom categories use
    /// their name and numbered annexures get `annexure_prefix + number`; every
    /// other case falls back to the kind's display name.
    pub fn resolve(&self, config: &LabelConfig) -> String {
        if let Some(name) = self.custom_name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }

        match &self.category {
            Category::Custom { name } if !name.is_empty() => name.clone(),
            Category::Annexures { number } if !number.is_empty() => {
                format!("{}{}", config.annexure_prefix, number)
            }
            other => other.kind_name().to_string(),
        }
    }

    /// Resolve with the default naming.
    pub fn label(&self) -> String {
        self.resolve(&LabelConfig::default())
    }
}

impl Default for Assignment {
    /// Pages ahead of the first anchor are treated as Index.
    fn default() -> Self {
        Self::index()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
