use std::{borrow::Cow, path::Path, string::FromUtf8Error};

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::tree::Entry;

const BUILTIN_FIXTURE: &str = include_str!("builtin.yaml");
const NAME_KEY: &str = "name";
const CHILDREN_KEY: &str = "children";

fn key(name: &str) -> Yaml<'_> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

/// Names written as bare numbers or booleans (`- 2024`, `name: true`) keep their source spelling.
fn scalar_name(node: &Yaml) -> Option<String> {
    match node {
        Yaml::Value(Scalar::String(name)) => Some(name.to_string()),
        Yaml::Value(Scalar::Integer(number)) => Some(number.to_string()),
        Yaml::Value(Scalar::FloatingPoint(number)) => Some(number.to_string()),
        Yaml::Value(Scalar::Boolean(flag)) => Some(flag.to_string()),
        _ => None,
    }
}

/// The tree the explorer starts from.
#[derive(Debug, Clone)]
pub struct Fixture {
    root: Entry,
}

impl Fixture {
    /// The sample tree shipped with the binary.
    pub fn builtin() -> Result<Self, FixtureError> {
        BUILTIN_FIXTURE.try_into()
    }

    pub async fn from_path(path: &Path) -> Result<Self, FixtureError> {
        debug!("Opening fixture file: {}", path.display());
        let bytes = compio::fs::read(path).await.context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Successfully read fixture file: {} bytes", bytes.len());

        let contents = String::from_utf8(bytes).context(EncodingSnafu {
            file_path: path.display().to_string(),
        })?;
        contents.as_str().try_into()
    }

    pub fn root(&self) -> &Entry {
        &self.root
    }

    pub fn into_root(self) -> Entry {
        self.root
    }

    fn parse_entry(node: &Yaml, parent: &str) -> Result<Entry, FixtureError> {
        if let Some(name) = scalar_name(node) {
            return Ok(Entry::file(name));
        }
        if let Some(folder) = node.as_mapping() {
            return Self::parse_folder(folder, parent);
        }
        debug!("Rejecting fixture entry {:?} under '{}'", node, parent);
        InvalidEntrySnafu { folder: parent }.fail()
    }

    fn parse_folder(folder: &LinkedHashMap<Yaml, Yaml>, parent: &str) -> Result<Entry, FixtureError> {
        let name = folder
            .get(&key(NAME_KEY))
            .and_then(scalar_name)
            .context(MissingNameSnafu { parent })?;

        let children = match folder.get(&key(CHILDREN_KEY)) {
            None | Some(Yaml::Value(Scalar::Null)) => Vec::new(),
            Some(value) => value
                .as_sequence()
                .context(ChildrenNotSequenceSnafu { folder: name.as_str() })?
                .iter()
                .map(|child| Self::parse_entry(child, &name))
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(Entry::folder(name, children))
    }
}

impl TryFrom<&str> for Fixture {
    type Error = FixtureError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedFixtureSnafu)?;
        let top_level = document.as_mapping().context(RootNotFolderSnafu)?;

        let root = Self::parse_folder(top_level, "<top level>")?;
        debug!("Loaded fixture with {} entries", root.size());
        Ok(Fixture { root })
    }
}

#[derive(Debug, Snafu)]
pub enum FixtureError {
    #[snafu(display("Failed to read the fixture file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("The fixture file {} is not valid UTF-8", file_path))]
    EncodingError {
        file_path: String,
        source: FromUtf8Error,
    },
    #[snafu(display("Failed to parse the fixture"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Fixture is empty"))]
    MalformedFixture,
    #[snafu(display("Top level of the fixture should be a folder mapping"))]
    RootNotFolder,
    #[snafu(display("A folder under '{}' has no name", parent))]
    MissingName { parent: String },
    #[snafu(display("Children of folder '{}' should be a sequence", folder))]
    ChildrenNotSequence { folder: String },
    #[snafu(display("Folder '{}' holds an entry that is neither a file nor a folder", folder))]
    InvalidEntry { folder: String },
}
