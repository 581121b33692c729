use std::sync::Arc;

use super::types::TableData;

/// Active diagram and the table currently shown beneath it.
///
/// `table` and `table_title` are expected to be set and cleared together.
/// The independent setters do not enforce this; [`SelectionStore::clear_table`]
/// and [`SelectionStore::navigate_and_clear_table`] keep the pair in step.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionStore {
	active_diagram: String,
	table: Option<Arc<TableData>>,
	table_title: Option<String>,
}

impl SelectionStore {
	/// Start on `root` with no table open.
	pub fn new(root: impl Into<String>) -> Self {
		Self {
			active_diagram: root.into(),
			table: None,
			table_title: None,
		}
	}

	/// Id of the diagram being shown.
	pub fn active_diagram(&self) -> &str {
		&self.active_diagram
	}

	/// Switch diagrams. Leaves the table untouched.
	pub fn set_active_diagram(&mut self, id: impl Into<String>) {
		self.active_diagram = id.into();
	}

	/// The open table, if any.
	pub fn table(&self) -> Option<&Arc<TableData>> {
		self.table.as_ref()
	}

	/// Replace or clear the table payload.
	pub fn set_table(&mut self, table: Option<Arc<TableData>>) {
		self.table = table;
	}

	/// Title of the open table, if any.
	pub fn table_title(&self) -> Option<&str> {
		self.table_title.as_deref()
	}

	/// Replace or clear the table title.
	pub fn set_table_title(&mut self, title: Option<String>) {
		self.table_title = title;
	}

	/// Whether a table is showing.
	pub fn is_table_open(&self) -> bool {
		self.table.is_some()
	}

	/// True when table and title are both set or both unset.
	pub fn is_table_paired(&self) -> bool {
		self.table.is_some() == self.table_title.is_some()
	}

	/// Close the table, clearing payload and title.
	pub fn clear_table(&mut self) {
		self.table = None;
		self.table_title = None;
	}

	/// Switch diagrams and close the table in one step.
	pub fn navigate_and_clear_table(&mut self, id: impl Into<String>) {
		self.set_active_diagram(id);
		self.clear_table();
	}
}
