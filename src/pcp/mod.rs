//! Prim Composition

use crate::{sdf, vt};
use std::collections::HashSet;
use std::sync::Arc;

/// The composition arc through which a site entered a prim index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcType {
	Root,
	Variant,
	Reference,
}

/// One site contributing opinions to a composed prim.
#[derive(Clone)]
pub struct Node {
	pub layer: Arc<sdf::Layer>,
	pub site_path: sdf::Path,
	/// Maps times authored at this site into root-layer time.
	pub retiming: sdf::Retiming,
	pub arc: ArcType,
}

/// The ordered set of sites contributing opinions to a prim, strongest
/// first: the local site, then its variant sites, then reference sites,
/// each expanded recursively.
pub struct PrimIndex {
	pub nodes: Vec<Node>,
}

impl PrimIndex {
	pub fn build(root_layer: Arc<sdf::Layer>, path: &sdf::Path) -> Self {
		if path.is_absolute_root() {
			return Self {
				nodes: vec![Node {
					layer: root_layer,
					site_path: path.clone(),
					retiming: sdf::Retiming::default(),
					arc: ArcType::Root,
				}],
			};
		}

		let parent = Self::build(root_layer, &path.parent_path());
		let name = path.name_token();

		let mut nodes = Vec::new();
		let mut visited = HashSet::new();
		for parent_node in &parent.nodes {
			let site = parent_node.site_path.append_child(&name);
			if parent_node.layer.has_spec(&site) {
				expand_site(
					&mut nodes,
					&mut visited,
					parent_node.layer.clone(),
					site,
					parent_node.retiming,
					parent_node.arc,
				);
			}
		}

		Self { nodes }
	}

	pub fn is_valid(&self) -> bool {
		!self.nodes.is_empty()
	}

	pub fn has_specs(&self) -> bool {
		!self.nodes.is_empty()
	}

	/// Return the variant selections that apply to this prim,
	/// strongest opinion per set.
	pub fn variant_selections(&self) -> std::collections::HashMap<String, String> {
		let mut selections = std::collections::HashMap::new();
		for node in &self.nodes {
			if let Some(dict) = node
				.layer
				.get(&node.site_path, &sdf::FIELD_KEYS.variant_selection)
				.and_then(|v| v.get::<vt::Dictionary>())
			{
				for (set, value) in dict {
					if let Some(selection) = value.get::<String>() {
						selections.entry(set).or_insert(selection);
					}
				}
			}
		}
		selections
	}
}

/// Push a site node, then its variant and reference expansions,
/// depth-first in strength order.
fn expand_site(
	nodes: &mut Vec<Node>,
	visited: &mut HashSet<(String, sdf::Path)>,
	layer: Arc<sdf::Layer>,
	site_path: sdf::Path,
	retiming: sdf::Retiming,
	arc: ArcType,
) {
	let key = (layer.identifier(), site_path.clone());
	if !visited.insert(key) {
		log::debug!(
			"already composed site {}<{}>",
			layer.identifier(),
			site_path
		);
		return;
	}

	nodes.push(Node {
		layer: layer.clone(),
		site_path: site_path.clone(),
		retiming,
		arc,
	});

	// Variant arcs. Set names and selections are read from this site.
	let set_names = layer
		.get(&site_path, &sdf::FIELD_KEYS.variant_set_names)
		.and_then(|v| v.get::<sdf::TokenListOp>())
		.map(|op| op.applied_items())
		.unwrap_or_default();
	if !set_names.is_empty() {
		let selections = layer
			.get(&site_path, &sdf::FIELD_KEYS.variant_selection)
			.and_then(|v| v.get::<vt::Dictionary>())
			.unwrap_or_default();
		for set in set_names {
			let selection = selections
				.get(set.as_str())
				.and_then(|v| v.get::<String>())
				.unwrap_or_default();
			if selection.is_empty() {
				continue;
			}
			let variant_site = site_path.append_variant_selection(set.as_str(), &selection);
			if layer.has_spec(&variant_site) {
				expand_site(
					nodes,
					visited,
					layer.clone(),
					variant_site,
					retiming,
					ArcType::Variant,
				);
			}
		}
	}

	// Reference arcs.
	let references = layer
		.get(&site_path, &sdf::FIELD_KEYS.references)
		.and_then(|v| v.get::<sdf::ReferenceListOp>())
		.map(|op| op.applied_items())
		.unwrap_or_default();
	for reference in references {
		let resolved = layer.resolve_path(&reference.asset_path);
		let target_layer = match sdf::Layer::find_or_open(&resolved) {
			Ok(target_layer) => target_layer,
			Err(err) => {
				// An unresolved target leaves the prim empty but valid.
				log::warn!(
					"unresolved reference {} from {}: {}",
					reference.asset_path,
					layer.identifier(),
					err
				);
				continue;
			}
		};
		let target_path = if reference.prim_path.is_empty() {
			target_layer.default_prim_as_path()
		} else {
			reference.prim_path.clone()
		};
		if target_path.is_empty() {
			log::warn!(
				"reference {} has no prim path and target has no defaultPrim",
				reference.asset_path
			);
			continue;
		}
		if !target_layer.has_spec(&target_path) {
			continue;
		}
		expand_site(
			nodes,
			visited,
			target_layer,
			target_path,
			retiming * reference.layer_offset,
			ArcType::Reference,
		);
	}
}
