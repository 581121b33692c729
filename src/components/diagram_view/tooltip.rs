use leptos::prelude::*;

use crate::diagram::DiagramSession;

/// Node description shown next to the pointer.
#[component]
pub fn DiagramTooltip(session: RwSignal<DiagramSession>) -> impl IntoView {
	let offset = session.with_untracked(|s| s.config().tooltip_offset);
	let style = move || {
		session.with(|s| {
			let tooltip = s.tooltip();
			let shown = tooltip.visible && !tooltip.content.is_empty();
			format!(
				"position: fixed; pointer-events: none; display: {}; left: {}px; top: {}px;",
				if shown { "block" } else { "none" },
				tooltip.position.x + offset,
				tooltip.position.y + offset,
			)
		})
	};

	view! {
		<div class="diagram-tooltip" style=style>
			{move || session.with(|s| s.tooltip().content.clone())}
		</div>
	}
}
