use super::{EditTarget, PrePostVisitRange, Prim, PrimRange};
use crate::{
	pcp,
	sdf::{self, CHILDREN_KEYS, FIELD_KEYS},
	tf, usda, vt, Error, Result,
};
use parking_lot::Mutex;
use std::path::Path as FsPath;
use std::sync::Arc;

/// The outermost container for scene description, which owns and presents
/// composed prims as a scenegraph, following the composition recipe
/// recursively described in its associated "root layer".
///
/// Edits flow through the stage's current [`EditTarget`]; by default that
/// is the root layer itself.
pub struct Stage {
	root_layer: Arc<sdf::Layer>,
	edit_target: Mutex<EditTarget>,
}

impl Stage {
	fn from_layer(root_layer: Arc<sdf::Layer>) -> Self {
		let edit_target = Mutex::new(EditTarget::new(root_layer.clone()));
		Self {
			root_layer,
			edit_target,
		}
	}

	/// Create a stage with a fresh root layer at `path`.
	/// Nothing is written to disk until [`Self::save`].
	pub fn create_new(path: impl AsRef<FsPath>) -> Result<Self> {
		Ok(Self::from_layer(sdf::Layer::create_new(path)?))
	}

	/// Create a stage backed by an anonymous in-memory layer.
	pub fn create_in_memory() -> Self {
		Self::from_layer(sdf::Layer::anonymous())
	}

	/// Open the stage rooted at the layer at `path`.
	pub fn open(path: impl AsRef<FsPath>) -> Result<Self> {
		Ok(Self::from_layer(sdf::Layer::find_or_open(path)?))
	}

	/// Open a stage over an already constructed layer.
	pub fn open_layer(root_layer: Arc<sdf::Layer>) -> Self {
		Self::from_layer(root_layer)
	}

	pub fn root_layer(&self) -> &Arc<sdf::Layer> {
		&self.root_layer
	}

	/// Save the root layer to its backing file.
	pub fn save(&self) -> Result<()> {
		self.root_layer.save()
	}

	pub fn pseudo_root(&self) -> Prim<'_> {
		Prim::new(self, sdf::Path::absolute_root_path())
	}

	pub fn prim_at_path(&self, path: impl Into<sdf::Path>) -> Prim<'_> {
		Prim::new(self, path.into())
	}
}

/// Stage metadata, authored on the root layer's pseudo-root.
impl Stage {
	pub fn set_default_prim(&self, prim: &Prim) {
		self.root_layer.set_default_prim(&prim.path().name_token());
	}

	pub fn default_prim(&self) -> Prim<'_> {
		Prim::new(self, self.root_layer.default_prim_as_path())
	}

	pub fn set_start_time_code(&self, time: f64) {
		self.set_metadata(&FIELD_KEYS.start_time_code, vt::Value::new(time));
	}

	pub fn start_time_code(&self) -> Option<f64> {
		self.layer_metadata(&FIELD_KEYS.start_time_code)
	}

	pub fn set_end_time_code(&self, time: f64) {
		self.set_metadata(&FIELD_KEYS.end_time_code, vt::Value::new(time));
	}

	pub fn end_time_code(&self) -> Option<f64> {
		self.layer_metadata(&FIELD_KEYS.end_time_code)
	}

	pub fn set_metadata(&self, key: &tf::Token, value: impl Into<vt::Value>) {
		self.root_layer
			.set(&sdf::Path::absolute_root_path(), key, value.into());
	}

	fn layer_metadata(&self, key: &tf::Token) -> Option<f64> {
		self.root_layer
			.get(&sdf::Path::absolute_root_path(), key)
			.and_then(|v| v.get::<f64>())
	}
}

/// The edit target.
impl Stage {
	pub fn edit_target(&self) -> EditTarget {
		self.edit_target.lock().clone()
	}

	pub fn set_edit_target(&self, target: EditTarget) {
		*self.edit_target.lock() = target;
	}
}

/// Authoring prims.
impl Stage {
	/// Author a defined, typed prim spec at `path` in the current edit
	/// target. Missing ancestors are created as overs.
	pub fn define_prim(
		&self,
		path: impl Into<sdf::Path>,
		type_name: &tf::Token,
	) -> Result<Prim<'_>> {
		let path = path.into();
		check_prim_path(&path)?;

		let target = self.edit_target();
		let spec_path = target.map_to_spec_path(&path);
		self.ensure_prim_spec(target.layer(), &spec_path, sdf::Specifier::Over)?;

		let layer = target.layer();
		layer.set(
			&spec_path,
			&FIELD_KEYS.specifier,
			vt::Value::new(sdf::Specifier::Def),
		);
		if !type_name.is_empty() {
			layer.set(
				&spec_path,
				&FIELD_KEYS.type_name,
				vt::Value::new(type_name.clone()),
			);
		}
		Ok(self.prim_at_path(path))
	}

	/// Author an override prim spec at `path` in the current edit target,
	/// expressing opinions without defining anything.
	pub fn override_prim(&self, path: impl Into<sdf::Path>) -> Result<Prim<'_>> {
		let path = path.into();
		check_prim_path(&path)?;

		let target = self.edit_target();
		let spec_path = target.map_to_spec_path(&path);
		self.ensure_prim_spec(target.layer(), &spec_path, sdf::Specifier::Over)?;
		Ok(self.prim_at_path(path))
	}
}

/// Traversal.
impl Stage {
	/// Traverse the active, defined prims on this stage depth-first.
	pub fn traverse(&self) -> PrimRange<'_> {
		PrimRange::new(self, &sdf::Path::absolute_root_path(), false)
	}

	/// Traverse all the prims on this stage depth-first, including
	/// inactive ones. Children of inactive prims are never composed.
	pub fn traverse_all(&self) -> PrimRange<'_> {
		PrimRange::new(self, &sdf::Path::absolute_root_path(), true)
	}

	/// Visit the subtree rooted at `prim` in pre- and post-order.
	pub fn pre_and_post_visit<'a>(&'a self, prim: &Prim<'a>) -> PrePostVisitRange<'a> {
		PrePostVisitRange::new(prim)
	}
}

/// Value resolution.
impl Stage {
	pub(crate) fn prim_index(&self, path: &sdf::Path) -> Option<pcp::PrimIndex> {
		let prim_path = if path.is_prim_property_path() {
			path.prim_path()
		} else {
			path.clone()
		};

		// Check parent for activity (pruning).
		if !prim_path.is_absolute_root() {
			let parent_path = prim_path.parent_path();
			if !parent_path.is_absolute_root() {
				// Ensure parent is valid and active.
				self.prim_index(&parent_path)?;
				if let Some(active) = self
					.resolve_value(&parent_path, &FIELD_KEYS.active)
					.and_then(|v| v.get::<bool>())
				{
					if !active {
						return None;
					}
				}
			}
		}

		let index = pcp::PrimIndex::build(self.root_layer.clone(), &prim_path);
		if index.is_valid() && index.has_specs() {
			Some(index)
		} else {
			None
		}
	}

	/// Return the strongest composed opinion for `field` at `path`,
	/// merging dictionaries and list ops across sites.
	pub(crate) fn resolve_value(&self, path: &sdf::Path, field: &tf::Token) -> Option<vt::Value> {
		let index = self.prim_index(path)?;

		let mut values = Vec::new();
		for node in &index.nodes {
			let actual_path = if path.is_prim_property_path() {
				node.site_path.append_property(&path.name_token())
			} else {
				node.site_path.clone()
			};
			if let Some(value) = node.layer.get(&actual_path, field) {
				values.push(value);
			}
		}

		if values.is_empty() {
			return None;
		}

		let strongest = values[0].clone();

		// Dictionary merging
		if let Some(mut strong_dict) = strongest.get::<vt::Dictionary>() {
			for weak_val in values.iter().skip(1) {
				if let Some(weak_dict) = weak_val.get::<vt::Dictionary>() {
					for (k, v) in weak_dict {
						strong_dict.entry(k).or_insert(v);
					}
				}
			}
			return Some(vt::Value::new(strong_dict));
		}

		// ListOp merging
		macro_rules! try_merge_list_op {
			($type:ty) => {
				if let Some(strong_op) = strongest.get::<$type>() {
					let mut merged = strong_op;
					for weak_val in values.iter().skip(1) {
						if let Some(weak_op) = weak_val.get::<$type>() {
							merged = merged.combined_with(&weak_op);
						}
					}
					return Some(vt::Value::new(merged));
				}
			};
		}

		try_merge_list_op!(sdf::TokenListOp);
		try_merge_list_op!(sdf::PathListOp);
		try_merge_list_op!(sdf::ReferenceListOp);

		Some(strongest)
	}

	/// Return the strongest time sample set authored for a property,
	/// with the retiming that maps its times into stage time.
	pub(crate) fn resolve_time_samples(
		&self,
		path: &sdf::Path,
	) -> Option<(sdf::TimeSampleMap, sdf::Retiming)> {
		let index = self.prim_index(path)?;
		let name = path.name_token();
		for node in &index.nodes {
			let property_path = node.site_path.append_property(&name);
			if let Some(samples) = node
				.layer
				.get(&property_path, &FIELD_KEYS.time_samples)
				.and_then(|v| v.get::<sdf::TimeSampleMap>())
			{
				return Some((samples, node.retiming));
			}
		}
		None
	}

	/// Resolve a property value at `time`: time samples win over the
	/// default, with linear interpolation between samples and held ends.
	pub(crate) fn resolve_value_at_time(
		&self,
		path: &sdf::Path,
		time: f64,
	) -> Option<vt::Value> {
		if let Some((samples, retiming)) = self.resolve_time_samples(path) {
			if !samples.is_empty() {
				let local_time = retiming.inv() * time;
				return Some(interpolate_samples(&samples, local_time));
			}
		}
		self.resolve_value(path, &FIELD_KEYS.default)
	}

	pub(crate) fn resolve_spec_type(&self, path: &sdf::Path) -> Option<sdf::SpecType> {
		let index = self.prim_index(path)?;
		let name = path.name_token();
		for node in &index.nodes {
			let property_path = node.site_path.append_property(&name);
			if let Some(spec_type) = node.layer.spec_type(&property_path) {
				return Some(spec_type);
			}
		}
		None
	}

	pub(crate) fn prim_is_defined(&self, path: &sdf::Path) -> bool {
		let Some(index) = self.prim_index(path) else {
			return false;
		};
		index.nodes.iter().any(|node| {
			node.layer
				.get(&node.site_path, &FIELD_KEYS.specifier)
				.and_then(|v| v.get::<sdf::Specifier>())
				== Some(sdf::Specifier::Def)
		})
	}

	pub(crate) fn compose_children(&self, path: &sdf::Path) -> vt::Array<tf::Token> {
		let Some(index) = self.prim_index(path) else {
			return vt::Array::new();
		};

		let mut ordered_children: Vec<tf::Token> = Vec::new();
		for node in &index.nodes {
			if let Some(children) = node
				.layer
				.get(&node.site_path, &CHILDREN_KEYS.prim_children)
				.and_then(|v| v.get::<vt::Array<tf::Token>>())
			{
				for child in children {
					if !ordered_children.contains(&child) {
						ordered_children.push(child);
					}
				}
			}
		}

		ordered_children
	}

	pub(crate) fn compose_properties(&self, path: &sdf::Path) -> vt::Array<tf::Token> {
		let Some(index) = self.prim_index(path) else {
			return vt::Array::new();
		};

		let mut properties: Vec<tf::Token> = Vec::new();
		for node in &index.nodes {
			if let Some(names) = node
				.layer
				.get(&node.site_path, &CHILDREN_KEYS.property_children)
				.and_then(|v| v.get::<vt::Array<tf::Token>>())
			{
				for name in names {
					if !properties.contains(&name) {
						properties.push(name);
					}
				}
			}
		}

		properties.sort_by(|a, b| a.as_str().cmp(b.as_str()));
		properties
	}
}

/// Authoring plumbing used by the object wrappers. Every entry point maps
/// the scenegraph path through the current edit target.
impl Stage {
	/// Create the prim spec chain for `spec_path` in `layer`.
	pub(crate) fn ensure_prim_spec(
		&self,
		layer: &Arc<sdf::Layer>,
		spec_path: &sdf::Path,
		specifier: sdf::Specifier,
	) -> Result<()> {
		if spec_path.is_absolute_root() || layer.has_spec(spec_path) {
			return Ok(());
		}

		let parent = spec_path.parent_path();
		self.ensure_prim_spec(layer, &parent, sdf::Specifier::Over)?;

		if spec_path.as_str().ends_with('}') {
			// A missing variant spec; carries no specifier.
			layer.create_spec(spec_path, sdf::SpecType::Variant);
			return Ok(());
		}

		layer.create_spec(spec_path, sdf::SpecType::Prim);
		layer.set(
			spec_path,
			&FIELD_KEYS.specifier,
			vt::Value::new(specifier),
		);
		layer.append_to_token_array(
			&parent,
			&CHILDREN_KEYS.prim_children,
			&spec_path.name_token(),
		);
		Ok(())
	}

	pub(crate) fn author_metadata(
		&self,
		path: &sdf::Path,
		key: &tf::Token,
		value: vt::Value,
	) -> Result<()> {
		let target = self.edit_target();
		let spec_path = target.map_to_spec_path(path);
		self.ensure_prim_spec(target.layer(), &spec_path, sdf::Specifier::Over)?;
		target.layer().set(&spec_path, key, value);
		Ok(())
	}

	/// Create an attribute spec with a declared type name.
	pub(crate) fn author_attribute_spec(
		&self,
		path: &sdf::Path,
		type_name: &tf::Token,
		variability: sdf::Variability,
	) -> Result<()> {
		let target = self.edit_target();
		let spec_path = target.map_to_spec_path(path);
		let layer = target.layer();

		self.ensure_prim_spec(layer, &spec_path.prim_path(), sdf::Specifier::Over)?;
		if layer.has_spec(&spec_path) {
			return Ok(());
		}

		layer.create_spec(&spec_path, sdf::SpecType::Attribute);
		layer.set(
			&spec_path,
			&FIELD_KEYS.type_name,
			vt::Value::new(type_name.clone()),
		);
		if variability == sdf::Variability::Uniform {
			layer.set(
				&spec_path,
				&FIELD_KEYS.variability,
				vt::Value::new(variability),
			);
		}
		layer.append_to_token_array(
			&spec_path.prim_path(),
			&CHILDREN_KEYS.property_children,
			&spec_path.name_token(),
		);
		Ok(())
	}

	pub(crate) fn author_attribute_value(
		&self,
		path: &sdf::Path,
		field: &tf::Token,
		value: vt::Value,
	) -> Result<()> {
		let target = self.edit_target();
		let spec_path = target.map_to_spec_path(path);
		let layer = target.layer();

		if !layer.has_spec(&spec_path) {
			// Prefer the type already declared somewhere across the
			// composed stage (e.g. by a referenced layer or a cleared
			// declaration) over inference from the value.
			let type_name = self
				.resolve_value(path, &FIELD_KEYS.type_name)
				.and_then(|v| v.get::<tf::Token>())
				.unwrap_or_else(|| {
					if field == &FIELD_KEYS.default {
						infer_type_name(&value)
					} else {
						tf::Token::new("token")
					}
				});
			self.author_attribute_spec_in(layer, &spec_path, &type_name)?;
		} else if field == &FIELD_KEYS.default {
			// Authoring a value of the wrong type is a schema violation.
			if let Some(declared) = layer
				.get(&spec_path, &FIELD_KEYS.type_name)
				.and_then(|v| v.get::<tf::Token>())
			{
				if !value_matches_type(declared.as_str(), &value) {
					return Err(Error::SchemaMismatch {
						path: path.to_string(),
						expected: declared.as_str().to_string(),
					});
				}
			}
		}

		layer.set(&spec_path, field, value);
		Ok(())
	}

	pub(crate) fn author_time_sample(
		&self,
		path: &sdf::Path,
		time: f64,
		value: vt::Value,
	) -> Result<()> {
		let target = self.edit_target();
		let spec_path = target.map_to_spec_path(path);
		let layer = target.layer();

		if !layer.has_spec(&spec_path) {
			let type_name = infer_type_name(&value);
			self.author_attribute_spec_in(layer, &spec_path, &type_name)?;
		}

		let mut samples = layer
			.get(&spec_path, &FIELD_KEYS.time_samples)
			.and_then(|v| v.get::<sdf::TimeSampleMap>())
			.unwrap_or_default();
		samples.retain(|(t, _)| *t != time);
		let insert_at = samples
			.iter()
			.position(|(t, _)| *t > time)
			.unwrap_or(samples.len());
		samples.insert(insert_at, (time, value));
		layer.set(
			&spec_path,
			&FIELD_KEYS.time_samples,
			vt::Value::new(samples),
		);
		Ok(())
	}

	/// Remove the authored value opinions for an attribute in the current
	/// edit target. The spec and its declared type survive, matching how
	/// clearing behaves in scene description.
	pub(crate) fn clear_attribute(&self, path: &sdf::Path) -> Result<()> {
		let target = self.edit_target();
		let spec_path = target.map_to_spec_path(path);
		let layer = target.layer();

		if !layer.has_spec(&spec_path) {
			return Ok(());
		}
		layer.erase(&spec_path, &FIELD_KEYS.default);
		layer.erase(&spec_path, &FIELD_KEYS.time_samples);
		layer.erase(&spec_path, &FIELD_KEYS.connection_paths);
		Ok(())
	}

	pub(crate) fn author_relationship_spec(&self, path: &sdf::Path) -> Result<()> {
		let target = self.edit_target();
		let spec_path = target.map_to_spec_path(path);
		let layer = target.layer();

		self.ensure_prim_spec(layer, &spec_path.prim_path(), sdf::Specifier::Over)?;
		if !layer.has_spec(&spec_path) {
			layer.create_spec(&spec_path, sdf::SpecType::Relationship);
			layer.append_to_token_array(
				&spec_path.prim_path(),
				&CHILDREN_KEYS.property_children,
				&spec_path.name_token(),
			);
		}
		Ok(())
	}

	pub(crate) fn author_relationship_targets(
		&self,
		path: &sdf::Path,
		targets: vt::Array<sdf::Path>,
	) -> Result<()> {
		self.author_relationship_spec(path)?;
		let target = self.edit_target();
		let spec_path = target.map_to_spec_path(path);
		target
			.layer()
			.set(&spec_path, &FIELD_KEYS.target_paths, vt::Value::new(targets));
		Ok(())
	}

	fn author_attribute_spec_in(
		&self,
		layer: &Arc<sdf::Layer>,
		spec_path: &sdf::Path,
		type_name: &tf::Token,
	) -> Result<()> {
		self.ensure_prim_spec(layer, &spec_path.prim_path(), sdf::Specifier::Over)?;
		layer.create_spec(spec_path, sdf::SpecType::Attribute);
		layer.set(
			spec_path,
			&FIELD_KEYS.type_name,
			vt::Value::new(type_name.clone()),
		);
		layer.append_to_token_array(
			&spec_path.prim_path(),
			&CHILDREN_KEYS.property_children,
			&spec_path.name_token(),
		);
		Ok(())
	}
}

/// Flattening.
impl Stage {
	/// Serialize the composed stage: every arc is evaluated and only the
	/// winning opinions remain in the output.
	pub fn export_to_string(&self) -> String {
		use sdf::AbstractData;

		let mut flat = sdf::SpecData::new();
		let root = sdf::Path::absolute_root_path();

		for key in [
			&FIELD_KEYS.comment,
			&FIELD_KEYS.documentation,
			&FIELD_KEYS.default_prim,
			&FIELD_KEYS.end_time_code,
			&FIELD_KEYS.start_time_code,
			&FIELD_KEYS.up_axis,
		] {
			if let Some(value) = self.root_layer.get(&root, key) {
				flat.set(&root, key, value);
			}
		}

		self.flatten_children_into(&mut flat, &root);
		usda::write(&flat)
	}

	fn flatten_children_into(&self, flat: &mut sdf::SpecData, path: &sdf::Path) {
		use sdf::AbstractData;

		for name in self.compose_children(path) {
			let child_path = path.append_child(&name);
			let prim = self.prim_at_path(child_path.clone());
			if !prim.is_valid() {
				continue;
			}

			flat.create_spec(&child_path, sdf::SpecType::Prim);
			let specifier = if prim.is_defined() {
				sdf::Specifier::Def
			} else {
				sdf::Specifier::Over
			};
			flat.set(&child_path, &FIELD_KEYS.specifier, vt::Value::new(specifier));

			let type_name = prim.type_name();
			if !type_name.is_empty() {
				flat.set(&child_path, &FIELD_KEYS.type_name, vt::Value::new(type_name));
			}
			for key in [&FIELD_KEYS.active, &FIELD_KEYS.kind, &FIELD_KEYS.api_schemas] {
				if let Some(value) = self.resolve_value(&child_path, key) {
					flat.set(&child_path, key, value);
				}
			}

			for property in self.compose_properties(&child_path) {
				let property_path = child_path.append_property(&property);
				self.flatten_property_into(flat, &property_path);
			}

			append_token(flat, path, &CHILDREN_KEYS.prim_children, &name);

			if prim.is_active() {
				self.flatten_children_into(flat, &child_path);
			}
		}
	}

	fn flatten_property_into(&self, flat: &mut sdf::SpecData, path: &sdf::Path) {
		use sdf::AbstractData;

		let prim_path = path.prim_path();
		let name = path.name_token();

		if self.resolve_spec_type(path) == Some(sdf::SpecType::Relationship) {
			flat.create_spec(path, sdf::SpecType::Relationship);
			if let Some(targets) = self.resolve_value(path, &FIELD_KEYS.target_paths) {
				flat.set(path, &FIELD_KEYS.target_paths, targets);
			}
			append_token(flat, &prim_path, &CHILDREN_KEYS.property_children, &name);
			return;
		}

		flat.create_spec(path, sdf::SpecType::Attribute);
		for key in [
			&FIELD_KEYS.type_name,
			&FIELD_KEYS.variability,
			&FIELD_KEYS.interpolation,
			&FIELD_KEYS.default,
			&FIELD_KEYS.connection_paths,
		] {
			if let Some(value) = self.resolve_value(path, key) {
				flat.set(path, key, value);
			}
		}
		if let Some((samples, retiming)) = self.resolve_time_samples(path) {
			let mapped: sdf::TimeSampleMap = samples
				.into_iter()
				.map(|(time, value)| (retiming * time, value))
				.collect();
			flat.set(path, &FIELD_KEYS.time_samples, vt::Value::new(mapped));
		}
		append_token(flat, &prim_path, &CHILDREN_KEYS.property_children, &name);
	}
}

fn check_prim_path(path: &sdf::Path) -> Result<()> {
	if path.is_prim_path() && path.as_str().starts_with('/') {
		Ok(())
	} else {
		Err(Error::InvalidPath(path.to_string()))
	}
}

fn interpolate_samples(samples: &sdf::TimeSampleMap, time: f64) -> vt::Value {
	let first = &samples[0];
	let last = &samples[samples.len() - 1];
	if time <= first.0 {
		return first.1.clone();
	}
	if time >= last.0 {
		return last.1.clone();
	}

	let mut lower = first;
	let mut upper = last;
	for pair in samples {
		if pair.0 <= time {
			lower = pair;
		} else {
			upper = pair;
			break;
		}
	}

	let alpha = (time - lower.0) / (upper.0 - lower.0);
	if let (Some(a), Some(b)) = (lower.1.get::<f64>(), upper.1.get::<f64>()) {
		return vt::Value::new(a + (b - a) * alpha);
	}
	if let (Some(a), Some(b)) = (lower.1.get::<f32>(), upper.1.get::<f32>()) {
		return vt::Value::new(a + (b - a) * alpha as f32);
	}
	// Held interpolation for non-numeric samples.
	lower.1.clone()
}

fn infer_type_name(value: &vt::Value) -> tf::Token {
	use vt::ValueStore::*;

	tf::Token::new(match value.store() {
		Bool(_) => "bool",
		Int(_) => "int",
		IntArray(_) => "int[]",
		Float(_) => "float",
		FloatArray(_) => "float[]",
		Double(_) => "double",
		DoubleArray(_) => "double[]",
		Vec2f(_) => "float2",
		Vec2fArray(_) => "float2[]",
		Vec3f(_) => "float3",
		Vec3fArray(_) => "float3[]",
		Vec3d(_) => "double3",
		Token(_) => "token",
		TokenArray(_) => "token[]",
		String(_) => "string",
		StringArray(_) => "string[]",
		AssetPath(_) => "asset",
		_ => "token",
	})
}

fn value_matches_type(type_name: &str, value: &vt::Value) -> bool {
	use vt::ValueStore::*;

	match type_name {
		"double" => matches!(value.store(), Double(_)),
		"float" => matches!(value.store(), Float(_)),
		"int" => matches!(value.store(), Int(_)),
		"bool" => matches!(value.store(), Bool(_)),
		"double3" => matches!(value.store(), Vec3d(_)),
		"float3" | "color3f" | "point3f" | "normal3f" => matches!(value.store(), Vec3f(_)),
		"float2" | "texCoord2f" => matches!(value.store(), Vec2f(_)),
		"int[]" => matches!(value.store(), IntArray(_)),
		"float3[]" | "color3f[]" | "point3f[]" | "normal3f[]" => {
			matches!(value.store(), Vec3fArray(_))
		}
		"float2[]" | "texCoord2f[]" => matches!(value.store(), Vec2fArray(_)),
		"token" => matches!(value.store(), Token(_)),
		"token[]" => matches!(value.store(), TokenArray(_)),
		"string" => matches!(value.store(), String(_)),
		"asset" => matches!(value.store(), AssetPath(_)),
		_ => true,
	}
}

fn append_token(
	data: &mut sdf::SpecData,
	path: &sdf::Path,
	field: &tf::Token,
	item: &tf::Token,
) {
	use sdf::AbstractData;
	let mut items = data
		.get(path, field)
		.and_then(|v| v.get::<vt::Array<tf::Token>>())
		.unwrap_or_default();
	if !items.contains(item) {
		items.push(item.clone());
		data.set(path, field, vt::Value::new(items));
	}
}
