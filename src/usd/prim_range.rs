use super::Prim;
use crate::{sdf, usd};

/// Depth-first iteration over the prims of a stage.
///
/// The default range matches `Stage::traverse`: active, defined prims.
/// [`PrimRange::all`] additionally yields inactive prims, but never their
/// children, which are not composed.
pub struct PrimRange<'a> {
	stage: &'a usd::Stage,
	stack: Vec<sdf::Path>,
	include_inactive: bool,
}

impl<'a> PrimRange<'a> {
	pub(crate) fn new(stage: &'a usd::Stage, root: &sdf::Path, include_inactive: bool) -> Self {
		let mut stack = Vec::new();
		for child in stage.compose_children(root).iter().rev() {
			stack.push(root.append_child(child));
		}
		Self {
			stage,
			stack,
			include_inactive,
		}
	}
}

impl<'a> Iterator for PrimRange<'a> {
	type Item = Prim<'a>;

	fn next(&mut self) -> Option<Self::Item> {
		while let Some(path) = self.stack.pop() {
			let prim = self.stage.prim_at_path(path.clone());
			if !prim.is_valid() {
				continue;
			}

			let active = prim.is_active();
			if active {
				for child in self.stage.compose_children(&path).iter().rev() {
					self.stack.push(path.append_child(child));
				}
			}

			if self.include_inactive {
				return Some(prim);
			}
			if !active || !prim.is_defined() {
				continue;
			}
			return Some(prim);
		}
		None
	}
}

/// Depth-first iteration visiting every prim twice, yielding the prim and
/// whether the visit is the post-order one.
pub struct PrePostVisitRange<'a> {
	stage: &'a usd::Stage,
	stack: Vec<(sdf::Path, bool)>,
}

impl<'a> PrePostVisitRange<'a> {
	/// Iterate the subtree rooted at `prim`, which is always visited even
	/// when it is the pseudo-root.
	pub fn new(prim: &Prim<'a>) -> Self {
		Self {
			stage: prim.stage(),
			stack: vec![(prim.path().clone(), false)],
		}
	}
}

impl<'a> Iterator for PrePostVisitRange<'a> {
	type Item = (Prim<'a>, bool);

	fn next(&mut self) -> Option<Self::Item> {
		let (path, is_post_visit) = self.stack.pop()?;
		let prim = self.stage.prim_at_path(path.clone());

		if !is_post_visit {
			self.stack.push((path.clone(), true));
			for child in self.stage.compose_children(&path).iter().rev() {
				let child_path = path.append_child(child);
				let child_prim = self.stage.prim_at_path(child_path.clone());
				if child_prim.is_valid() && child_prim.is_active() && child_prim.is_defined() {
					self.stack.push((child_path, false));
				}
			}
		}

		Some((prim, is_post_visit))
	}
}
