use std::sync::Arc;

use leptos::prelude::*;

use crate::components::diagram_view::DiagramView;
use crate::diagram::{
	DiagramDefinition, DiagramRegistry, DiagramSession, LayoutDirection, LayoutStrategy,
	MessageCatalog, NodeDescriptor, ROOT_DIAGRAM_ID, RegistryError, TableData, TreeConfig,
	ViewerConfig,
};

fn row(cells: &[&str]) -> Vec<String> {
	cells.iter().map(|cell| (*cell).to_owned()).collect()
}

/// Sample registry: an overview linking to a flow diagram, a tree and a
/// force-directed network.
fn sample_registry() -> Result<DiagramRegistry, RegistryError> {
	let revenue = Arc::new(TableData::new(
		["Year", "Revenue", "Growth"],
		[
			row(&["2022", "1.10M", "4.2%"]),
			row(&["2023", "1.24M", "12.7%"]),
			row(&["2024", "1.31M", "5.6%"]),
		],
	));
	let headcount = Arc::new(TableData::new(
		["Team", "Headcount"],
		[row(&["Platform", "12"]), row(&["Product", "9"])],
	));

	DiagramRegistry::new([
		DiagramDefinition::new(ROOT_DIAGRAM_ID)
			.node(
				NodeDescriptor::new("finance", "Finance")
					.with_description("Open the finance data flow"),
			)
			.node(
				NodeDescriptor::new("organisation", "Organisation")
					.with_description("Open the organisation chart"),
			)
			.node(
				NodeDescriptor::new("systems", "Systems")
					.with_description("Open the system landscape"),
			)
			.node(
				NodeDescriptor::new("revenue", "Revenue*")
					.with_clean_label("Revenue")
					.with_description("Yearly revenue figures")
					.with_table(Arc::clone(&revenue)),
			)
			.edge("finance", "revenue")
			.edge("organisation", "finance")
			.edge("systems", "finance"),
		DiagramDefinition::new("finance")
			.node(NodeDescriptor::new("ledger", "General ledger"))
			.node(NodeDescriptor::new("billing", "Billing"))
			.node(
				NodeDescriptor::new("reporting", "Reporting")
					.with_table(revenue)
					.with_description("Revenue as reported"),
			)
			.edge("billing", "ledger")
			.edge("ledger", "reporting"),
		DiagramDefinition::new("organisation")
			.with_tree(TreeConfig {
				direction: LayoutDirection::TopBottom,
			})
			.node(NodeDescriptor::new("board", "Board"))
			.node(NodeDescriptor::new("cto", "CTO").with_parent("board"))
			.node(NodeDescriptor::new("cfo", "CFO").with_parent("board"))
			.node(
				NodeDescriptor::new("engineering", "Engineering")
					.with_parent("cto")
					.with_table(headcount),
			)
			.node(NodeDescriptor::new("platform", "Platform").with_parent("cto"))
			.node(NodeDescriptor::new("controlling", "Controlling").with_parent("cfo")),
		DiagramDefinition::new("systems")
			.with_layout(LayoutStrategy::Force)
			.node(NodeDescriptor::new("erp", "ERP"))
			.node(NodeDescriptor::new("crm", "CRM"))
			.node(NodeDescriptor::new("warehouse", "Data warehouse"))
			.node(NodeDescriptor::new("bi", "BI dashboards"))
			.edge("erp", "warehouse")
			.edge("crm", "warehouse")
			.edge("warehouse", "bi"),
	])
}

fn sample_messages() -> MessageCatalog {
	MessageCatalog::new([
		("diagram_title", "Data overview"),
		("diagram_root_name", "Overview"),
		("diagram_finance_name", "Finance"),
		("diagram_organisation_name", "Organisation"),
		("diagram_systems_name", "Systems"),
	])
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let session = sample_registry()
		.and_then(|registry| DiagramSession::new(Arc::new(registry), ViewerConfig::default()));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<section class="section">
				<div class="container">
					{session
						.map(|session| {
							view! { <DiagramView session=session messages=sample_messages() /> }
						})}
				</div>
			</section>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn sample_registry_is_valid() {
		let registry = sample_registry().unwrap();
		assert_eq!(registry.len(), 4);
		assert!(registry.require_root(ROOT_DIAGRAM_ID).is_ok());
		// Every root node without a table navigates somewhere.
		let root = registry.lookup(ROOT_DIAGRAM_ID).unwrap();
		for node in root.nodes.iter().filter(|node| node.table.is_none()) {
			assert!(registry.contains(&node.id), "{} has no diagram", node.id);
		}
	}
}
