use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::ContainerSize;
use super::visibility::VisibleGraph;
use crate::diagram::config::ViewerConfig;

const TICK: f32 = 0.016;
const SEED_RADIUS: f64 = 100.0;

/// Center of each visible node after a fixed number of simulation steps.
///
/// Nodes start on a circle, so the outcome is deterministic. The settled
/// positions are spread until no two centers are closer than a node box,
/// then shifted so the layout starts at the configured padding.
pub(super) fn place(
	graph: &VisibleGraph<'_>,
	size: ContainerSize,
	config: &ViewerConfig,
) -> Vec<(f64, f64)> {
	let count = graph.nodes.len();
	if count == 0 {
		return Vec::new();
	}

	let seeds: Vec<(f64, f64)> = (0..count)
		.map(|i| {
			let angle = (i as f64) * 2.0 * PI / count as f64;
			(
				size.width / 2.0 + SEED_RADIUS * angle.cos(),
				size.height / 2.0 + SEED_RADIUS * angle.sin(),
			)
		})
		.collect();

	let mut simulation = ForceGraph::<usize, ()>::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	});
	let mut id_to_idx = HashMap::new();
	for (slot, (node, &(x, y))) in graph.nodes.iter().zip(&seeds).enumerate() {
		let idx = simulation.add_node(NodeData {
			x: x as f32,
			y: y as f32,
			mass: 10.0,
			is_anchor: false,
			user_data: slot,
		});
		id_to_idx.insert(node.id.as_str(), idx);
	}
	for edge in &graph.edges {
		if edge.source == edge.target {
			continue;
		}
		if let (Some(&src), Some(&tgt)) = (id_to_idx.get(edge.source), id_to_idx.get(edge.target)) {
			simulation.add_edge(src, tgt, EdgeData::default());
		}
	}
	for _ in 0..config.force_iterations {
		simulation.update(TICK);
	}

	let mut positions = seeds.clone();
	simulation.visit_nodes(|node| {
		positions[node.data.user_data] = (node.x() as f64, node.y() as f64);
	});
	if positions.iter().any(|&(x, y)| !x.is_finite() || !y.is_finite()) {
		positions = seeds;
	}

	spread(&mut positions, config.node_width + config.node_gap);
	let min_x = positions.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
	let min_y = positions.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
	let (dx, dy) = (
		config.padding + config.node_width / 2.0 - min_x,
		config.padding + config.node_height / 2.0 - min_y,
	);
	for position in &mut positions {
		position.0 += dx;
		position.1 += dy;
	}
	positions
}

/// Scale about the origin so the closest pair is at least `min_distance` apart.
fn spread(positions: &mut [(f64, f64)], min_distance: f64) {
	let mut closest = f64::INFINITY;
	for (i, a) in positions.iter().enumerate() {
		for b in &positions[i + 1..] {
			closest = closest.min((a.0 - b.0).hypot(a.1 - b.1));
		}
	}
	if !closest.is_finite() || closest <= f64::EPSILON || closest >= min_distance {
		return;
	}
	let factor = min_distance / closest;
	for position in positions.iter_mut() {
		position.0 *= factor;
		position.1 *= factor;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::diagram::collapse::CollapseState;
	use crate::diagram::layout::visibility::visible_graph;
	use crate::diagram::types::{DiagramDefinition, LayoutStrategy, NodeDescriptor};

	#[test]
	fn spread_enforces_minimum_distance() {
		let mut positions = vec![(0.0, 0.0), (10.0, 0.0), (0.0, 40.0)];
		spread(&mut positions, 100.0);
		assert!((positions[1].0 - 100.0).abs() < 1e-9);
		assert!((positions[2].1 - 400.0).abs() < 1e-9);
	}

	#[test]
	fn places_every_node_inside_padding() {
		let config = ViewerConfig::default();
		let definition = DiagramDefinition::new("net")
			.with_layout(LayoutStrategy::Force)
			.node(NodeDescriptor::new("a", "A"))
			.node(NodeDescriptor::new("b", "B"))
			.node(NodeDescriptor::new("c", "C"))
			.edge("a", "b")
			.edge("b", "c");
		let collapse = CollapseState::new("net");
		let graph = visible_graph(&definition, &collapse);
		let size = ContainerSize::measured(800.0, 600.0).unwrap();
		let positions = place(&graph, size, &config);
		assert_eq!(positions.len(), 3);
		for &(x, y) in &positions {
			assert!(x.is_finite() && y.is_finite());
			assert!(x >= config.padding + config.node_width / 2.0 - 1e-6);
			assert!(y >= config.padding + config.node_height / 2.0 - 1e-6);
		}
	}
}
