use std::collections::HashMap;

/// Resolves message keys to localized text.
pub trait TextLookup {
	/// Translation for `key`, if one exists.
	fn lookup(&self, key: &str) -> Option<&str>;

	/// Translation for `key`, or `default` when none exists.
	fn text(&self, key: &str, default: &str) -> String {
		self.lookup(key).unwrap_or(default).to_owned()
	}
}

/// Key of the name shown in the header for diagram `id`.
pub fn diagram_name_key(id: &str, root: &str) -> String {
	if id == root {
		"diagram_root_name".to_owned()
	} else {
		format!("diagram_{id}_name")
	}
}

/// In-memory message table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageCatalog {
	messages: HashMap<String, String>,
}

impl MessageCatalog {
	/// Build from `(key, text)` pairs.
	pub fn new<K, V>(messages: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			messages: messages
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}

	/// Add or replace one message.
	pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
		self.messages.insert(key.into(), text.into());
	}
}

impl TextLookup for MessageCatalog {
	fn lookup(&self, key: &str) -> Option<&str> {
		self.messages.get(key).map(String::as_str)
	}
}
