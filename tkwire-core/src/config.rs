// tkwire-core/src/config.rs
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Flags;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config directory not found")]
    NoConfigDir,
    #[error("Unknown flag: {0}")]
    UnknownFlag(String),
}

/// A window description: title, geometry and the layout tree placed into
/// the main area
#[derive(Debug, Deserialize, Serialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub layout: Vec<Node>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct WindowConfig {
    #[serde(default = "default_title")]
    pub title: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub theme: Option<String>,
    /// Flags of the main area (`horizontal` lays the top level out in a row)
    #[serde(default)]
    pub flags: Vec<String>,
    /// Number of status bar fields
    #[serde(default)]
    pub status_fields: usize,
    /// Tool bar button captions
    #[serde(default)]
    pub toolbar: Vec<String>,
}

fn default_title() -> String {
    "tkwire".to_string()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: None,
            height: None,
            theme: None,
            flags: Vec::new(),
            status_fields: 0,
            toolbar: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Box {
        #[serde(default)]
        flags: Vec<String>,
        #[serde(default)]
        items: Vec<Node>,
    },
    Splitter {
        #[serde(default)]
        flags: Vec<String>,
        #[serde(default)]
        items: Vec<Node>,
    },
    Grid {
        columns: usize,
        #[serde(default)]
        flags: Vec<String>,
        #[serde(default)]
        items: Vec<Node>,
    },
    Notebook {
        #[serde(default)]
        flags: Vec<String>,
        #[serde(default)]
        tabs: Vec<TabConfig>,
    },
    Label {
        text: String,
        #[serde(default)]
        flags: Vec<String>,
    },
    Button {
        text: String,
        #[serde(default)]
        flags: Vec<String>,
    },
    Check {
        text: String,
        #[serde(default)]
        checked: bool,
        #[serde(default)]
        flags: Vec<String>,
    },
    Entry {
        #[serde(default)]
        text: String,
        #[serde(default)]
        flags: Vec<String>,
    },
    Listbox {
        #[serde(default)]
        values: Vec<String>,
        #[serde(default)]
        flags: Vec<String>,
    },
    Tree {
        #[serde(default)]
        flags: Vec<String>,
    },
    Table {
        #[serde(default)]
        columns: Vec<String>,
        #[serde(default)]
        rows: Vec<Vec<String>>,
        #[serde(default)]
        flags: Vec<String>,
    },
    Text {
        #[serde(default)]
        text: String,
        #[serde(default)]
        flags: Vec<String>,
    },
    Combobox {
        #[serde(default)]
        values: Vec<String>,
        #[serde(default)]
        flags: Vec<String>,
    },
    Image {
        name: String,
        #[serde(default)]
        flags: Vec<String>,
    },
    /// Empty grid cell
    Blank,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TabConfig {
    pub title: String,
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub items: Vec<Node>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        Self {
            window: WindowConfig {
                title: "tkwire demo".to_string(),
                width: Some(640),
                height: Some(480),
                status_fields: 2,
                toolbar: names(&["Open", "Save"]),
                ..WindowConfig::default()
            },
            layout: vec![Node::Splitter {
                flags: names(&["horizontal", "expand"]),
                items: vec![
                    Node::Listbox {
                        values: names(&["alpha", "beta", "gamma"]),
                        flags: names(&["scroll_y"]),
                    },
                    Node::Notebook {
                        flags: names(&["expand"]),
                        tabs: vec![
                            TabConfig {
                                title: "Form".to_string(),
                                flags: names(&["do_not_close"]),
                                items: vec![Node::Grid {
                                    columns: 2,
                                    flags: Vec::new(),
                                    items: vec![
                                        Node::Label {
                                            text: "Name".to_string(),
                                            flags: Vec::new(),
                                        },
                                        Node::Entry {
                                            text: String::new(),
                                            flags: names(&["expand"]),
                                        },
                                        Node::Blank,
                                        Node::Check {
                                            text: "Remember".to_string(),
                                            checked: true,
                                            flags: Vec::new(),
                                        },
                                    ],
                                }],
                            },
                            TabConfig {
                                title: "Notes".to_string(),
                                flags: Vec::new(),
                                items: vec![Node::Text {
                                    text: String::new(),
                                    flags: names(&["scroll_y"]),
                                }],
                            },
                        ],
                    },
                ],
            }],
        }
    }
}

impl ConfigFile {
    pub fn load() -> Result<Self, ConfigError> {
        // Priority: ./tkwire.toml -> ~/.config/tkwire/tkwire.toml -> default
        let paths = [
            std::env::current_dir()?.join("tkwire.toml"),
            dirs::config_dir()
                .ok_or(ConfigError::NoConfigDir)?
                .join("tkwire/tkwire.toml"),
        ];

        for path in paths {
            if path.exists() {
                return Self::from_path(&path);
            }
        }

        Ok(Self::default())
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }
}

impl Node {
    /// Flag names of this node; empty for blank cells
    pub fn flag_names(&self) -> &[String] {
        match self {
            Node::Box { flags, .. }
            | Node::Splitter { flags, .. }
            | Node::Grid { flags, .. }
            | Node::Notebook { flags, .. }
            | Node::Label { flags, .. }
            | Node::Button { flags, .. }
            | Node::Check { flags, .. }
            | Node::Entry { flags, .. }
            | Node::Listbox { flags, .. }
            | Node::Tree { flags }
            | Node::Table { flags, .. }
            | Node::Text { flags, .. }
            | Node::Combobox { flags, .. }
            | Node::Image { flags, .. } => flags.as_slice(),
            Node::Blank => &[],
        }
    }

    pub fn flags(&self) -> Result<Flags, ConfigError> {
        parse_flags(self.flag_names())
    }
}

/// Combine flag names into a flag set
pub fn parse_flags(names: &[String]) -> Result<Flags, ConfigError> {
    names.iter().try_fold(Flags::empty(), |acc, name| {
        Flags::parse_name(name)
            .map(|flag| acc | flag)
            .ok_or_else(|| ConfigError::UnknownFlag(name.clone()))
    })
}
