use std::sync::Arc;

use leptos::prelude::*;

use crate::diagram::TableData;

/// Table opened from a node, with a close button.
#[component]
pub fn TableView(table: Arc<TableData>, title: String, on_close: Callback<()>) -> impl IntoView {
	let header = table
		.columns
		.iter()
		.map(|column| view! { <th>{column.clone()}</th> })
		.collect_view();
	let rows = table
		.rows
		.iter()
		.map(|row| {
			let cells = row
				.iter()
				.map(|cell| view! { <td>{cell.clone()}</td> })
				.collect_view();
			view! { <tr>{cells}</tr> }
		})
		.collect_view();

	view! {
		<div class="box diagram-table">
			<div class="diagram-table-header">
				<p class="title is-5">{title}</p>
				<button
					type="button"
					class="delete"
					aria-label="close"
					on:click=move |_| on_close.run(())
				></button>
			</div>
			<div class="table-container">
				<table class="table is-striped is-fullwidth">
					<thead>
						<tr>{header}</tr>
					</thead>
					<tbody>{rows}</tbody>
				</table>
			</div>
		</div>
	}
}
