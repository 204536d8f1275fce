use crate::{sdf, usd};
use std::sync::Arc;

/// Defines where authored scene description lands: a layer, plus an
/// optional path mapping that redirects edits into a variant.
#[derive(Clone)]
pub struct EditTarget {
	layer: Arc<sdf::Layer>,
	map_source: sdf::Path,
	map_target: sdf::Path,
}

impl EditTarget {
	/// An edit target writing directly into `layer`.
	pub fn new(layer: Arc<sdf::Layer>) -> Self {
		Self {
			layer,
			map_source: sdf::Path::empty_path(),
			map_target: sdf::Path::empty_path(),
		}
	}

	/// An edit target capturing edits under `prim_path` inside the named
	/// variant of `set`.
	pub fn for_variant(
		layer: Arc<sdf::Layer>,
		prim_path: &sdf::Path,
		set: &str,
		variant: &str,
	) -> Self {
		Self {
			layer,
			map_source: prim_path.clone(),
			map_target: prim_path.append_variant_selection(set, variant),
		}
	}

	pub fn layer(&self) -> &Arc<sdf::Layer> {
		&self.layer
	}

	/// Map a scenegraph path to the spec path edits should land on.
	pub fn map_to_spec_path(&self, path: &sdf::Path) -> sdf::Path {
		if self.map_source.is_empty() {
			path.clone()
		} else {
			path.replace_prefix(&self.map_source, &self.map_target)
		}
	}
}

/// Scoped switch of a stage's edit target; the previous target is
/// restored when the context drops, on all exit paths.
pub struct EditContext<'a> {
	stage: &'a usd::Stage,
	previous: Option<EditTarget>,
}

impl<'a> EditContext<'a> {
	pub fn new(stage: &'a usd::Stage, target: EditTarget) -> Self {
		let previous = stage.edit_target();
		stage.set_edit_target(target);
		Self {
			stage,
			previous: Some(previous),
		}
	}
}

impl<'a> Drop for EditContext<'a> {
	fn drop(&mut self) {
		if let Some(previous) = self.previous.take() {
			self.stage.set_edit_target(previous);
		}
	}
}
