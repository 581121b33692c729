use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::types::DiagramDefinition;

/// Problems found while assembling the registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// Two definitions share an id.
	#[error("diagram `{0}` is defined more than once")]
	DuplicateDiagram(String),
	/// Two nodes of one diagram share an id.
	#[error("diagram `{diagram}` defines node `{node}` more than once")]
	DuplicateNode {
		/// Diagram id.
		diagram: String,
		/// Repeated node id.
		node: String,
	},
	/// An edge references a node the diagram does not define.
	#[error("diagram `{diagram}` has an edge {source_id} -> {target_id} naming unknown node `{missing}`")]
	UnknownEdgeEndpoint {
		/// Diagram id.
		diagram: String,
		/// Edge source.
		source_id: String,
		/// Edge target.
		target_id: String,
		/// The endpoint that does not exist.
		missing: String,
	},
	/// A parent link references a node the diagram does not define.
	#[error("node `{node}` in diagram `{diagram}` names unknown parent `{parent}`")]
	UnknownParent {
		/// Diagram id.
		diagram: String,
		/// Child node id.
		node: String,
		/// Missing parent id.
		parent: String,
	},
	/// The configured root diagram is not registered.
	#[error("root diagram `{0}` is not registered")]
	MissingRoot(String),
}

/// Immutable map from diagram id to definition.
#[derive(Clone, Debug, Default)]
pub struct DiagramRegistry {
	diagrams: HashMap<String, DiagramDefinition>,
}

impl DiagramRegistry {
	/// Validate and index the given definitions.
	pub fn new(
		definitions: impl IntoIterator<Item = DiagramDefinition>,
	) -> Result<Self, RegistryError> {
		let mut diagrams = HashMap::new();
		for definition in definitions {
			validate(&definition)?;
			if diagrams.contains_key(&definition.id) {
				return Err(RegistryError::DuplicateDiagram(definition.id));
			}
			diagrams.insert(definition.id.clone(), definition);
		}
		Ok(Self { diagrams })
	}

	/// Definition registered under `id`. Absence is not an error: the id is
	/// simply not a navigable target.
	pub fn lookup(&self, id: &str) -> Option<&DiagramDefinition> {
		self.diagrams.get(id)
	}

	/// Whether `id` names a registered diagram.
	pub fn contains(&self, id: &str) -> bool {
		self.diagrams.contains_key(id)
	}

	/// Fail with [`RegistryError::MissingRoot`] unless `root` is registered.
	pub fn require_root(&self, root: &str) -> Result<(), RegistryError> {
		if self.contains(root) {
			Ok(())
		} else {
			Err(RegistryError::MissingRoot(root.to_owned()))
		}
	}

	/// Registered ids, in no particular order.
	pub fn ids(&self) -> impl Iterator<Item = &str> {
		self.diagrams.keys().map(String::as_str)
	}

	/// Number of registered diagrams.
	pub fn len(&self) -> usize {
		self.diagrams.len()
	}

	/// Whether the registry holds no diagrams.
	pub fn is_empty(&self) -> bool {
		self.diagrams.is_empty()
	}
}

fn validate(definition: &DiagramDefinition) -> Result<(), RegistryError> {
	let mut seen = HashSet::new();
	for node in &definition.nodes {
		if !seen.insert(node.id.as_str()) {
			return Err(RegistryError::DuplicateNode {
				diagram: definition.id.clone(),
				node: node.id.clone(),
			});
		}
	}

	for edge in &definition.edges {
		for endpoint in [&edge.source, &edge.target] {
			if !seen.contains(endpoint.as_str()) {
				return Err(RegistryError::UnknownEdgeEndpoint {
					diagram: definition.id.clone(),
					source_id: edge.source.clone(),
					target_id: edge.target.clone(),
					missing: endpoint.clone(),
				});
			}
		}
	}

	// Parent links are ignored for non-tree diagrams.
	if definition.is_tree() {
		for node in &definition.nodes {
			let Some(parent) = &node.parent else {
				continue;
			};
			if !seen.contains(parent.as_str()) {
				return Err(RegistryError::UnknownParent {
					diagram: definition.id.clone(),
					node: node.id.clone(),
					parent: parent.clone(),
				});
			}
		}
	}
	Ok(())
}
