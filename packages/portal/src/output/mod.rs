//! Output generation: structured data files and the HTML portal.

mod html;
mod writer;

use std::fmt;

pub use html::{convert_bold, escape_html, render_html};
pub use writer::{load_json, save_data, to_json, to_yaml, write_atomic};

/// Serialization format of the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DataFormat {
    #[default]
    Json,
    Yaml,
}

impl DataFormat {
    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
