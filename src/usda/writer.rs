use crate::{
	sdf::{self, CHILDREN_KEYS, FIELD_KEYS},
	tf, vt,
};

const INDENT: &str = "    ";

/// Serialize `data` to usda text.
///
/// Output is fully determined by the data: layer and prim metadata keys in a
/// fixed order, properties and variant names alphabetized, prim children in
/// `primChildren` order.
pub fn write(data: &dyn sdf::AbstractData) -> String {
	let mut out = String::from("#usda 1.0\n");
	let root = sdf::Path::absolute_root_path();

	let metadata = layer_metadata_lines(data, &root);
	if !metadata.is_empty() {
		out.push_str("(\n");
		for line in metadata {
			out.push_str(INDENT);
			out.push_str(&line);
			out.push('\n');
		}
		out.push_str(")\n");
	}

	for child in token_array(data, &root, &CHILDREN_KEYS.prim_children) {
		out.push('\n');
		write_prim(&mut out, data, &root.append_child(&child), 0);
	}

	out
}

fn layer_metadata_lines(data: &dyn sdf::AbstractData, root: &sdf::Path) -> Vec<String> {
	let mut lines = Vec::new();

	if let Some(comment) = get_string(data, root, &FIELD_KEYS.comment) {
		lines.push(quote(&comment));
	}
	if let Some(doc) = get_string(data, root, &FIELD_KEYS.documentation) {
		lines.push(format!("doc = {}", quote(&doc)));
	}
	if let Some(name) = get_token(data, root, &FIELD_KEYS.default_prim) {
		lines.push(format!("defaultPrim = {}", quote(name.as_str())));
	}
	if let Some(t) = get_double(data, root, &FIELD_KEYS.end_time_code) {
		lines.push(format!("endTimeCode = {}", format_double(t)));
	}
	if let Some(t) = get_double(data, root, &FIELD_KEYS.start_time_code) {
		lines.push(format!("startTimeCode = {}", format_double(t)));
	}
	if let Some(axis) = get_token(data, root, &FIELD_KEYS.up_axis) {
		lines.push(format!("upAxis = {}", quote(axis.as_str())));
	}

	lines
}

fn write_prim(out: &mut String, data: &dyn sdf::AbstractData, path: &sdf::Path, depth: usize) {
	let indent = INDENT.repeat(depth);

	let specifier = data
		.get(path, &FIELD_KEYS.specifier)
		.and_then(|v| v.get::<sdf::Specifier>())
		.unwrap_or(sdf::Specifier::Over);
	let type_name = data
		.get(path, &FIELD_KEYS.type_name)
		.and_then(|v| v.get::<tf::Token>())
		.unwrap_or_default();

	out.push_str(&indent);
	out.push_str(specifier.as_str());
	if !type_name.is_empty() {
		out.push(' ');
		out.push_str(type_name.as_str());
	}
	out.push_str(&format!(" {}", quote(path.name())));

	let metadata = prim_metadata_lines(data, path);
	if !metadata.is_empty() {
		out.push_str(" (\n");
		for line in metadata {
			for sub in line.split('\n') {
				out.push_str(&indent);
				out.push_str(INDENT);
				out.push_str(sub);
				out.push('\n');
			}
		}
		out.push_str(&indent);
		out.push(')');
	}
	out.push('\n');

	out.push_str(&indent);
	out.push_str("{\n");

	let mut sections = 0usize;

	let mut properties = token_array(data, path, &CHILDREN_KEYS.property_children);
	properties.sort();
	for name in &properties {
		write_property(out, data, path, name, depth + 1);
		sections += 1;
	}

	for set_name in variant_set_names(data, path) {
		if sections > 0 {
			out.push('\n');
		}
		write_variant_set(out, data, path, &set_name, depth + 1);
		sections += 1;
	}

	for child in token_array(data, path, &CHILDREN_KEYS.prim_children) {
		if sections > 0 {
			out.push('\n');
		}
		write_prim(out, data, &path.append_child(&child), depth + 1);
		sections += 1;
	}

	out.push_str(&indent);
	out.push_str("}\n");
}

fn prim_metadata_lines(data: &dyn sdf::AbstractData, path: &sdf::Path) -> Vec<String> {
	let mut lines = Vec::new();

	if let Some(comment) = get_string(data, path, &FIELD_KEYS.comment) {
		lines.push(quote(&comment));
	}
	if let Some(active) = data
		.get(path, &FIELD_KEYS.active)
		.and_then(|v| v.get::<bool>())
	{
		lines.push(format!("active = {}", active));
	}
	if let Some(op) = data
		.get(path, &FIELD_KEYS.api_schemas)
		.and_then(|v| v.get::<sdf::TokenListOp>())
	{
		for (keyword, items) in list_op_buckets(&op) {
			let quoted: Vec<String> = items.iter().map(|t| quote(t.as_str())).collect();
			lines.push(format!(
				"{}apiSchemas = [{}]",
				keyword,
				quoted.join(", ")
			));
		}
	}
	if let Some(kind) = get_token(data, path, &FIELD_KEYS.kind) {
		lines.push(format!("kind = {}", quote(kind.as_str())));
	}
	if let Some(op) = data
		.get(path, &FIELD_KEYS.references)
		.and_then(|v| v.get::<sdf::ReferenceListOp>())
	{
		for (keyword, items) in list_op_buckets(&op) {
			let texts: Vec<String> = items.iter().map(format_reference).collect();
			lines.push(format!(
				"{}references = {}",
				keyword,
				bare_or_bracketed(&texts)
			));
		}
	}
	if let Some(selections) = data
		.get(path, &FIELD_KEYS.variant_selection)
		.and_then(|v| v.get::<vt::Dictionary>())
	{
		let mut entries: Vec<(&String, String)> = selections
			.iter()
			.filter_map(|(k, v)| v.get::<String>().map(|s| (k, s)))
			.collect();
		entries.sort();
		let mut block = String::from("variants = {\n");
		for (set, selection) in entries {
			block.push_str(&format!(
				"{}string {} = {}\n",
				INDENT,
				set,
				quote(&selection)
			));
		}
		block.push('}');
		lines.push(block);
	}
	if let Some(op) = data
		.get(path, &FIELD_KEYS.variant_set_names)
		.and_then(|v| v.get::<sdf::TokenListOp>())
	{
		for (keyword, items) in list_op_buckets(&op) {
			let texts: Vec<String> = items.iter().map(|t| quote(t.as_str())).collect();
			lines.push(format!(
				"{}variantSets = {}",
				keyword,
				bare_or_bracketed(&texts)
			));
		}
	}

	lines
}

fn write_property(
	out: &mut String,
	data: &dyn sdf::AbstractData,
	prim_path: &sdf::Path,
	name: &tf::Token,
	depth: usize,
) {
	let indent = INDENT.repeat(depth);
	let path = prim_path.append_property(name);

	if data.spec_type(&path) == Some(sdf::SpecType::Relationship) {
		let targets = data
			.get(&path, &FIELD_KEYS.target_paths)
			.and_then(|v| v.get::<vt::Array<sdf::Path>>())
			.unwrap_or_default();
		out.push_str(&indent);
		if targets.is_empty() {
			out.push_str(&format!("rel {}\n", name));
		} else {
			let texts: Vec<String> = targets.iter().map(|p| format!("<{}>", p)).collect();
			out.push_str(&format!("rel {} = {}\n", name, bare_or_bracketed(&texts)));
		}
		return;
	}

	let type_name = data
		.get(&path, &FIELD_KEYS.type_name)
		.and_then(|v| v.get::<tf::Token>())
		.unwrap_or_else(|| tf::Token::new("token"));
	let uniform = matches!(
		data.get(&path, &FIELD_KEYS.variability)
			.and_then(|v| v.get::<sdf::Variability>()),
		Some(sdf::Variability::Uniform)
	);
	let declaration = format!(
		"{}{} {}",
		if uniform { "uniform " } else { "" },
		type_name,
		name
	);

	let mut wrote = false;

	if let Some(default) = data.get(&path, &FIELD_KEYS.default) {
		out.push_str(&indent);
		out.push_str(&declaration);
		out.push_str(&format!(" = {}", value_text(&default)));
		write_property_metadata(out, data, &path, depth);
		out.push('\n');
		wrote = true;
	}

	if let Some(samples) = data
		.get(&path, &FIELD_KEYS.time_samples)
		.and_then(|v| v.get::<sdf::TimeSampleMap>())
	{
		out.push_str(&indent);
		out.push_str(&declaration);
		out.push_str(".timeSamples = {\n");
		for (time, value) in &samples {
			out.push_str(&indent);
			out.push_str(INDENT);
			out.push_str(&format!("{}: {},\n", format_double(*time), value_text(value)));
		}
		out.push_str(&indent);
		out.push_str("}\n");
		wrote = true;
	}

	if let Some(op) = data
		.get(&path, &FIELD_KEYS.connection_paths)
		.and_then(|v| v.get::<sdf::PathListOp>())
	{
		let targets = op.applied_items();
		if !targets.is_empty() {
			let texts: Vec<String> = targets.iter().map(|p| format!("<{}>", p)).collect();
			out.push_str(&indent);
			out.push_str(&declaration);
			out.push_str(&format!(".connect = {}\n", bare_or_bracketed(&texts)));
			wrote = true;
		}
	}

	if !wrote {
		out.push_str(&indent);
		out.push_str(&declaration);
		write_property_metadata(out, data, &path, depth);
		out.push('\n');
	}
}

fn write_property_metadata(
	out: &mut String,
	data: &dyn sdf::AbstractData,
	path: &sdf::Path,
	depth: usize,
) {
	let indent = INDENT.repeat(depth);
	if let Some(interpolation) = get_token(data, path, &FIELD_KEYS.interpolation) {
		out.push_str(" (\n");
		out.push_str(&indent);
		out.push_str(INDENT);
		out.push_str(&format!("interpolation = {}\n", quote(interpolation.as_str())));
		out.push_str(&indent);
		out.push(')');
	}
}

fn write_variant_set(
	out: &mut String,
	data: &dyn sdf::AbstractData,
	prim_path: &sdf::Path,
	set_name: &tf::Token,
	depth: usize,
) {
	let indent = INDENT.repeat(depth);
	let set_path = prim_path.append_variant_selection(set_name.as_str(), "");

	let mut variants = token_array(data, &set_path, &CHILDREN_KEYS.variant_children);
	variants.sort();

	out.push_str(&indent);
	out.push_str(&format!("variantSet {} = {{\n", quote(set_name.as_str())));

	for variant in &variants {
		let variant_path =
			prim_path.append_variant_selection(set_name.as_str(), variant.as_str());

		out.push_str(&indent);
		out.push_str(INDENT);
		out.push_str(&format!("{} {{\n", quote(variant.as_str())));

		let mut properties = token_array(data, &variant_path, &CHILDREN_KEYS.property_children);
		properties.sort();
		for name in &properties {
			write_property(out, data, &variant_path, name, depth + 2);
		}
		for child in token_array(data, &variant_path, &CHILDREN_KEYS.prim_children) {
			write_prim(out, data, &variant_path.append_child(&child), depth + 2);
		}

		out.push_str(&indent);
		out.push_str(INDENT);
		out.push_str("}\n");
	}

	out.push_str(&indent);
	out.push_str("}\n");
}

fn variant_set_names(data: &dyn sdf::AbstractData, path: &sdf::Path) -> Vec<tf::Token> {
	data.get(path, &FIELD_KEYS.variant_set_names)
		.and_then(|v| v.get::<sdf::TokenListOp>())
		.map(|op| op.applied_items())
		.unwrap_or_default()
}

fn list_op_buckets<T: Clone>(op: &sdf::ListOp<T>) -> Vec<(&'static str, Vec<T>)> {
	let mut buckets = Vec::new();
	if op.is_explicit {
		buckets.push(("", op.explicit_items.clone()));
	}
	if !op.deleted_items.is_empty() {
		buckets.push(("delete ", op.deleted_items.clone()));
	}
	if !op.added_items.is_empty() {
		buckets.push(("add ", op.added_items.clone()));
	}
	if !op.prepended_items.is_empty() {
		buckets.push(("prepend ", op.prepended_items.clone()));
	}
	if !op.appended_items.is_empty() {
		buckets.push(("append ", op.appended_items.clone()));
	}
	buckets
}

fn format_reference(reference: &sdf::Reference) -> String {
	let mut text = format!("@{}@", reference.asset_path);
	if !reference.prim_path.is_empty() {
		text.push_str(&format!("<{}>", reference.prim_path));
	}
	let retiming = reference.layer_offset;
	if !retiming.is_identity() {
		let mut parts = Vec::new();
		if retiming.offset != 0.0 {
			parts.push(format!("offset = {}", format_double(retiming.offset)));
		}
		if retiming.scale != 1.0 {
			parts.push(format!("scale = {}", format_double(retiming.scale)));
		}
		text.push_str(&format!(" ({})", parts.join("; ")));
	}
	text
}

fn bare_or_bracketed(items: &[String]) -> String {
	if items.len() == 1 {
		items[0].clone()
	} else {
		format!("[{}]", items.join(", "))
	}
}

fn value_text(value: &vt::Value) -> String {
	use vt::ValueStore as Store;

	match value.store() {
		Store::Empty => "None".to_string(),
		Store::Bool(v) => v.to_string(),
		Store::Int(v) => v.to_string(),
		Store::IntArray(v) => bracketed(v.iter().map(|i| i.to_string())),
		Store::Float(v) => format_float(*v),
		Store::FloatArray(v) => bracketed(v.iter().map(|f| format_float(*f))),
		Store::Double(v) => format_double(*v),
		Store::DoubleArray(v) => bracketed(v.iter().map(|f| format_double(*f))),
		Store::Vec2f(v) => vec2f_text(v),
		Store::Vec2fArray(v) => bracketed(v.iter().map(vec2f_text)),
		Store::Vec3f(v) => vec3f_text(v),
		Store::Vec3fArray(v) => bracketed(v.iter().map(vec3f_text)),
		Store::Vec3d(v) => format!(
			"({}, {}, {})",
			format_double(v.x),
			format_double(v.y),
			format_double(v.z)
		),
		Store::Token(v) => quote(v.as_str()),
		Store::TokenArray(v) => bracketed(v.iter().map(|t| quote(t.as_str()))),
		Store::String(v) => quote(v),
		Store::StringArray(v) => bracketed(v.iter().map(|s| quote(s))),
		Store::AssetPath(v) => format!("@{}@", v.authored_path),
		Store::Path(v) => format!("<{}>", v),
		Store::PathArray(v) => bracketed(v.iter().map(|p| format!("<{}>", p))),
		other => format!("{:?}", other),
	}
}

fn vec2f_text(v: &crate::gf::Vec2f) -> String {
	format!("({}, {})", format_float(v.x), format_float(v.y))
}

fn vec3f_text(v: &crate::gf::Vec3f) -> String {
	format!(
		"({}, {}, {})",
		format_float(v.x),
		format_float(v.y),
		format_float(v.z)
	)
}

fn bracketed(items: impl Iterator<Item = String>) -> String {
	format!("[{}]", items.collect::<Vec<_>>().join(", "))
}

fn format_float(v: f32) -> String {
	if v == v.trunc() && v.abs() < 1e15 {
		format!("{}", v as i64)
	} else {
		format!("{}", v)
	}
}

fn format_double(v: f64) -> String {
	if v == v.trunc() && v.abs() < 1e15 {
		format!("{}", v as i64)
	} else {
		format!("{}", v)
	}
}

fn quote(s: &str) -> String {
	let mut out = String::with_capacity(s.len() + 2);
	out.push('"');
	for c in s.chars() {
		match c {
			'"' => out.push_str("\\\""),
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			_ => out.push(c),
		}
	}
	out.push('"');
	out
}

fn token_array(
	data: &dyn sdf::AbstractData,
	path: &sdf::Path,
	field: &tf::Token,
) -> Vec<tf::Token> {
	data.get(path, field)
		.and_then(|v| v.get::<vt::Array<tf::Token>>())
		.unwrap_or_default()
}

fn get_token(data: &dyn sdf::AbstractData, path: &sdf::Path, field: &tf::Token) -> Option<tf::Token> {
	data.get(path, field).and_then(|v| v.get::<tf::Token>())
}

fn get_string(data: &dyn sdf::AbstractData, path: &sdf::Path, field: &tf::Token) -> Option<String> {
	data.get(path, field).and_then(|v| v.get::<String>())
}

fn get_double(data: &dyn sdf::AbstractData, path: &sdf::Path, field: &tf::Token) -> Option<f64> {
	data.get(path, field).and_then(|v| v.get::<f64>())
}
