//! The words on the card: a return-address header, a message template and
//! the recipients' addresses. Each comes from a text file in an assets
//! directory, or a built-in default when the file is absent.
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::info;

use super::names::first_name;
use crate::errors::ContentError;

pub const HEADER_FILE: &str = "header.txt";
pub const MESSAGE_FILE: &str = "message.txt";
pub const ADDRESSES_FILE: &str = "addresses.txt";

/// Replaced with the recipient's first name in the message.
pub const FIRST_NAME_PLACEHOLDER: &str = "$FirstName$";

const DEFAULT_HEADER: &str = "Myself\nMy Place\nMy town, USA";
const DEFAULT_MESSAGE: &str = "\nDear $FirstName$,\n\nPlease enjoy this postcard!\n\nBest,\nMe\n";
const DEFAULT_ADDRESS: &str = "John Doe\n123 Main St\nAnytown, USA";

#[derive(Clone, Debug, PartialEq)]
pub struct Content {
    pub header: String,
    pub message: String,
    pub addresses: Vec<String>,
}

impl Default for Content {
    fn default() -> Self {
        Content {
            header: DEFAULT_HEADER.to_string(),
            message: DEFAULT_MESSAGE.to_string(),
            addresses: vec![DEFAULT_ADDRESS.to_string()],
        }
    }
}

/// Contents of `dir/name`, or None if there is no such file.
fn read_optional(dir: &Path, name: &str) -> Result<Option<String>, ContentError> {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!("No {} found, using the default", path.display());
            Ok(None)
        }
        Err(source) => Err(ContentError::Io { path, source }),
    }
}

/// Addresses are separated by one or more blank lines.
pub fn split_addresses(text: &str) -> Vec<String> {
    let mut addresses = vec![];
    let mut current: Vec<&str> = vec![];
    for line in text.lines().map(str::trim_end) {
        if line.trim().is_empty() {
            if !current.is_empty() {
                addresses.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        addresses.push(current.join("\n"));
    }
    addresses
}

impl Content {
    pub fn load(dir: impl AsRef<Path>) -> Result<Content, ContentError> {
        let dir = dir.as_ref();
        let defaults = Content::default();

        let header = read_optional(dir, HEADER_FILE)?
            .map(|text| text.trim_end().to_string())
            .unwrap_or(defaults.header);
        let message = read_optional(dir, MESSAGE_FILE)?.unwrap_or(defaults.message);
        let addresses = match read_optional(dir, ADDRESSES_FILE)?.map(|t| split_addresses(&t)) {
            Some(found) if !found.is_empty() => found,
            Some(_) => {
                info!("{} has no addresses, using the default", ADDRESSES_FILE);
                defaults.addresses
            }
            None => defaults.addresses,
        };
        info!("Loaded {} addresses from {}", addresses.len(), dir.display());

        Ok(Content {
            header,
            message,
            addresses,
        })
    }

    pub fn address(&self, index: usize) -> Result<&str, ContentError> {
        self.addresses
            .get(index)
            .map(String::as_str)
            .ok_or(ContentError::AddressOutOfRange {
                index,
                count: self.addresses.len(),
            })
    }

    /// The message with every placeholder replaced by the recipient's
    /// first name.
    pub fn message_for(&self, address: &str) -> Result<String, ContentError> {
        let name = first_name(address)?;
        Ok(self.message.replace(FIRST_NAME_PLACEHOLDER, name))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::errors::NameError;

    #[test]
    fn test_split_addresses() {
        let text = "Jane Smith\n1 Elm St\n\n\n  \nMr Alexander Hamilton\nThe Grange  \n";
        assert_eq!(
            split_addresses(text),
            vec![
                "Jane Smith\n1 Elm St".to_string(),
                "Mr Alexander Hamilton\nThe Grange".to_string()
            ]
        );
        assert!(split_addresses("\n\n").is_empty());
    }

    #[test]
    fn test_message_for() {
        let content = Content::default();
        let message = content.message_for("Mr Alexander Hamilton").unwrap();
        assert!(message.contains("Dear Alexander,"));
        assert!(!message.contains(FIRST_NAME_PLACEHOLDER));
        assert!(matches!(
            content.message_for(""),
            Err(ContentError::Name(NameError::NoName))
        ));
    }

    #[test]
    fn test_address_out_of_range() {
        let content = Content::default();
        assert!(content.address(0).unwrap().starts_with("John Doe"));
        assert!(matches!(
            content.address(3),
            Err(ContentError::AddressOutOfRange { index: 3, count: 1 })
        ));
    }

    #[test]
    fn test_load_empty_dir_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Content::load(dir.path()).unwrap(), Content::default());
    }

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(HEADER_FILE), "Me\nHere\n").unwrap();
        fs::write(dir.path().join(MESSAGE_FILE), "Hi $FirstName$!").unwrap();
        fs::write(
            dir.path().join(ADDRESSES_FILE),
            "Jane Smith\n1 Elm St\n\nBob Jones\n2 Oak Ave\n",
        )
        .unwrap();
        let content = Content::load(dir.path()).unwrap();
        assert_eq!(content.header, "Me\nHere");
        assert_eq!(content.addresses.len(), 2);
        let address = content.address(1).unwrap();
        assert_eq!(content.message_for(address).unwrap(), "Hi Bob!");
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where a file is expected cannot be read as text.
        fs::create_dir(dir.path().join(MESSAGE_FILE)).unwrap();
        assert!(matches!(
            Content::load(dir.path()),
            Err(ContentError::Io { .. })
        ));
    }
}
