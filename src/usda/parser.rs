use crate::{
	gf,
	sdf::{self, CHILDREN_KEYS, FIELD_KEYS},
	tf, vt, Error, Result,
};

/// Parse usda text into a [`sdf::SpecData`].
///
/// Accepts the subset of the format written by [`super::write`].
pub fn parse(content: &str) -> Result<sdf::SpecData> {
	let mut cursor = Cursor::new(content);
	let mut data = sdf::SpecData::new();

	cursor.skip_ws();
	if !cursor.eat("#usda") {
		return Err(cursor.error("expected '#usda 1.0' header"));
	}
	cursor.skip_to_eol();

	cursor.skip_ws();
	if cursor.eat("(") {
		parse_layer_metadata(&mut cursor, &mut data)?;
	}

	let root = sdf::Path::absolute_root_path();
	loop {
		cursor.skip_ws();
		if cursor.at_end() {
			break;
		}
		parse_prim(&mut cursor, &mut data, &root)?;
	}

	Ok(data)
}

struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	line: usize,
}

impl<'a> Cursor<'a> {
	fn new(content: &'a str) -> Self {
		Self {
			bytes: content.as_bytes(),
			pos: 0,
			line: 1,
		}
	}

	fn at_end(&self) -> bool {
		self.pos >= self.bytes.len()
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn bump(&mut self) -> Option<u8> {
		let b = self.peek()?;
		self.pos += 1;
		if b == b'\n' {
			self.line += 1;
		}
		Some(b)
	}

	fn skip_ws(&mut self) {
		while let Some(b) = self.peek() {
			if b.is_ascii_whitespace() {
				self.bump();
			} else {
				break;
			}
		}
	}

	/// Skip spaces and tabs without crossing a line break.
	fn skip_inline_ws(&mut self) {
		while matches!(self.peek(), Some(b' ') | Some(b'\t')) {
			self.bump();
		}
	}

	fn skip_to_eol(&mut self) {
		while let Some(b) = self.peek() {
			self.bump();
			if b == b'\n' {
				break;
			}
		}
	}

	fn eat(&mut self, text: &str) -> bool {
		if self.bytes[self.pos..].starts_with(text.as_bytes()) {
			self.pos += text.len();
			true
		} else {
			false
		}
	}

	fn expect(&mut self, text: &str) -> Result<()> {
		self.skip_ws();
		if self.eat(text) {
			Ok(())
		} else {
			Err(self.error(format!("expected '{}'", text)))
		}
	}

	/// Read the next identifier without consuming it.
	fn peek_word(&self) -> &'a str {
		let mut probe = self.pos;
		while probe < self.bytes.len() && self.bytes[probe].is_ascii_whitespace() {
			probe += 1;
		}
		let start = probe;
		while probe < self.bytes.len() && is_ident_byte(self.bytes[probe]) {
			probe += 1;
		}
		std::str::from_utf8(&self.bytes[start..probe]).unwrap_or("")
	}

	fn ident(&mut self) -> Result<&'a str> {
		self.skip_ws();
		let start = self.pos;
		while let Some(b) = self.peek() {
			if is_ident_byte(b) {
				self.bump();
			} else {
				break;
			}
		}
		if start == self.pos {
			return Err(self.error("expected identifier"));
		}
		Ok(std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or(""))
	}

	fn quoted(&mut self) -> Result<String> {
		self.skip_ws();
		if self.peek() != Some(b'"') {
			return Err(self.error("expected string literal"));
		}
		self.bump();
		let mut out = String::new();
		loop {
			match self.bump() {
				None => return Err(self.error("unterminated string literal")),
				Some(b'"') => break,
				Some(b'\\') => match self.bump() {
					Some(b'n') => out.push('\n'),
					Some(b'"') => out.push('"'),
					Some(b'\\') => out.push('\\'),
					Some(other) => {
						out.push('\\');
						out.push(other as char);
					}
					None => return Err(self.error("unterminated escape")),
				},
				Some(b) => out.push(b as char),
			}
		}
		Ok(out)
	}

	fn number(&mut self) -> Result<f64> {
		self.skip_ws();
		let start = self.pos;
		while let Some(b) = self.peek() {
			if b.is_ascii_digit() || matches!(b, b'-' | b'+' | b'.' | b'e' | b'E') {
				self.bump();
			} else {
				break;
			}
		}
		let text = std::str::from_utf8(&self.bytes[start..self.pos]).unwrap_or("");
		text.parse::<f64>()
			.map_err(|_| self.error(format!("invalid number '{}'", text)))
	}

	/// Read a delimited run, e.g. the asset path between `@` markers.
	fn until(&mut self, terminator: u8) -> Result<String> {
		let start = self.pos;
		while let Some(b) = self.peek() {
			if b == terminator {
				let text = std::str::from_utf8(&self.bytes[start..self.pos])
					.unwrap_or("")
					.to_string();
				self.bump();
				return Ok(text);
			}
			self.bump();
		}
		Err(self.error("unterminated value"))
	}

	fn error(&self, message: impl Into<String>) -> Error {
		Error::parse(self.line, message)
	}
}

fn is_ident_byte(b: u8) -> bool {
	b.is_ascii_alphanumeric() || b == b'_' || b == b':'
}

fn parse_layer_metadata(cursor: &mut Cursor, data: &mut sdf::SpecData) -> Result<()> {
	use sdf::AbstractData;
	let root = sdf::Path::absolute_root_path();

	loop {
		cursor.skip_ws();
		if cursor.eat(")") {
			return Ok(());
		}
		if cursor.peek() == Some(b'"') {
			let comment = cursor.quoted()?;
			data.set(&root, &FIELD_KEYS.comment, vt::Value::new(comment));
			continue;
		}

		let key = cursor.ident()?.to_string();
		cursor.expect("=")?;
		match key.as_str() {
			"defaultPrim" => {
				let name = cursor.quoted()?;
				data.set(&root, &FIELD_KEYS.default_prim, vt::Value::new(tf::Token::new(name)));
			}
			"upAxis" => {
				let axis = cursor.quoted()?;
				data.set(&root, &FIELD_KEYS.up_axis, vt::Value::new(tf::Token::new(axis)));
			}
			"startTimeCode" => {
				let t = cursor.number()?;
				data.set(&root, &FIELD_KEYS.start_time_code, vt::Value::new(t));
			}
			"endTimeCode" => {
				let t = cursor.number()?;
				data.set(&root, &FIELD_KEYS.end_time_code, vt::Value::new(t));
			}
			"doc" => {
				let doc = cursor.quoted()?;
				data.set(&root, &FIELD_KEYS.documentation, vt::Value::new(doc));
			}
			_ => return Err(cursor.error(format!("unsupported layer metadata '{}'", key))),
		}
	}
}

fn parse_prim(cursor: &mut Cursor, data: &mut sdf::SpecData, parent: &sdf::Path) -> Result<()> {
	use sdf::AbstractData;

	let specifier = match cursor.ident()? {
		"def" => sdf::Specifier::Def,
		"over" => sdf::Specifier::Over,
		"class" => sdf::Specifier::Class,
		other => return Err(cursor.error(format!("expected prim specifier, found '{}'", other))),
	};

	cursor.skip_ws();
	let type_name = if cursor.peek() == Some(b'"') {
		None
	} else {
		Some(tf::Token::new(cursor.ident()?))
	};
	let name = tf::Token::new(cursor.quoted()?);

	let path = parent.append_child(&name);
	data.create_spec(&path, sdf::SpecType::Prim);
	data.set(&path, &FIELD_KEYS.specifier, vt::Value::new(specifier));
	if let Some(type_name) = type_name {
		data.set(&path, &FIELD_KEYS.type_name, vt::Value::new(type_name));
	}
	append_token(data, parent, &CHILDREN_KEYS.prim_children, &name);

	cursor.skip_ws();
	if cursor.eat("(") {
		parse_prim_metadata(cursor, data, &path)?;
	}

	cursor.expect("{")?;
	parse_prim_body(cursor, data, &path)
}

fn parse_prim_metadata(cursor: &mut Cursor, data: &mut sdf::SpecData, path: &sdf::Path) -> Result<()> {
	use sdf::AbstractData;

	loop {
		cursor.skip_ws();
		if cursor.eat(")") {
			return Ok(());
		}
		if cursor.peek() == Some(b'"') {
			let comment = cursor.quoted()?;
			data.set(path, &FIELD_KEYS.comment, vt::Value::new(comment));
			continue;
		}

		let mut key = cursor.ident()?.to_string();
		let bucket = match key.as_str() {
			"delete" | "add" | "prepend" | "append" => {
				let bucket = key;
				key = cursor.ident()?.to_string();
				bucket
			}
			_ => String::new(),
		};

		match key.as_str() {
			"active" => {
				cursor.expect("=")?;
				let value = parse_bool(cursor)?;
				data.set(path, &FIELD_KEYS.active, vt::Value::new(value));
			}
			"kind" => {
				cursor.expect("=")?;
				let kind = cursor.quoted()?;
				data.set(path, &FIELD_KEYS.kind, vt::Value::new(tf::Token::new(kind)));
			}
			"apiSchemas" => {
				cursor.expect("=")?;
				let items = parse_quoted_list(cursor)?;
				let tokens = items.into_iter().map(tf::Token::new).collect();
				let op = make_list_op(&bucket, tokens);
				data.set(path, &FIELD_KEYS.api_schemas, vt::Value::new(op));
			}
			"references" => {
				cursor.expect("=")?;
				let items = parse_reference_list(cursor)?;
				let op = make_list_op(&bucket, items);
				data.set(path, &FIELD_KEYS.references, vt::Value::new(op));
			}
			"variantSets" => {
				cursor.expect("=")?;
				let items = parse_quoted_list(cursor)?;
				let tokens = items.into_iter().map(tf::Token::new).collect();
				let op = make_list_op(&bucket, tokens);
				data.set(path, &FIELD_KEYS.variant_set_names, vt::Value::new(op));
			}
			"variants" => {
				cursor.expect("=")?;
				cursor.expect("{")?;
				let mut selections = vt::Dictionary::new();
				loop {
					cursor.skip_ws();
					if cursor.eat("}") {
						break;
					}
					let keyword = cursor.ident()?;
					if keyword != "string" {
						return Err(cursor.error("expected 'string' variant selection"));
					}
					let set = cursor.ident()?.to_string();
					cursor.expect("=")?;
					let selection = cursor.quoted()?;
					selections.insert(set, vt::Value::new(selection));
				}
				data.set(path, &FIELD_KEYS.variant_selection, vt::Value::new(selections));
			}
			other => return Err(cursor.error(format!("unsupported prim metadata '{}'", other))),
		}
	}
}

fn parse_prim_body(cursor: &mut Cursor, data: &mut sdf::SpecData, path: &sdf::Path) -> Result<()> {
	loop {
		cursor.skip_ws();
		if cursor.eat("}") {
			return Ok(());
		}
		if cursor.at_end() {
			return Err(cursor.error("unterminated prim body"));
		}

		match cursor.peek_word() {
			"variantSet" => parse_variant_set(cursor, data, path)?,
			"def" | "over" | "class" => parse_prim(cursor, data, path)?,
			"rel" => parse_relationship(cursor, data, path)?,
			_ => parse_attribute(cursor, data, path)?,
		}
	}
}

fn parse_variant_set(cursor: &mut Cursor, data: &mut sdf::SpecData, path: &sdf::Path) -> Result<()> {
	use sdf::AbstractData;

	let keyword = cursor.ident()?;
	debug_assert_eq!(keyword, "variantSet");
	let set_name = cursor.quoted()?;
	cursor.expect("=")?;
	cursor.expect("{")?;

	let set_path = path.append_variant_selection(&set_name, "");
	data.create_spec(&set_path, sdf::SpecType::VariantSet);

	loop {
		cursor.skip_ws();
		if cursor.eat("}") {
			return Ok(());
		}
		let variant = tf::Token::new(cursor.quoted()?);
		cursor.expect("{")?;

		let variant_path = path.append_variant_selection(&set_name, variant.as_str());
		data.create_spec(&variant_path, sdf::SpecType::Variant);
		append_token(data, &set_path, &CHILDREN_KEYS.variant_children, &variant);

		parse_prim_body(cursor, data, &variant_path)?;
	}
}

fn parse_relationship(cursor: &mut Cursor, data: &mut sdf::SpecData, path: &sdf::Path) -> Result<()> {
	use sdf::AbstractData;

	let keyword = cursor.ident()?;
	debug_assert_eq!(keyword, "rel");
	let name = tf::Token::new(cursor.ident()?);
	let property_path = path.append_property(&name);

	data.create_spec(&property_path, sdf::SpecType::Relationship);
	append_token(data, path, &CHILDREN_KEYS.property_children, &name);

	cursor.skip_inline_ws();
	if cursor.eat("=") {
		let targets = parse_path_list(cursor)?;
		data.set(
			&property_path,
			&FIELD_KEYS.target_paths,
			vt::Value::new(targets),
		);
	}
	Ok(())
}

fn parse_attribute(cursor: &mut Cursor, data: &mut sdf::SpecData, path: &sdf::Path) -> Result<()> {
	use sdf::AbstractData;

	let mut uniform = false;
	let mut type_name = cursor.ident()?.to_string();
	if type_name == "uniform" {
		uniform = true;
		type_name = cursor.ident()?.to_string();
	}
	if type_name == "custom" {
		type_name = cursor.ident()?.to_string();
	}
	if cursor.eat("[]") {
		type_name.push_str("[]");
	}

	let name = tf::Token::new(cursor.ident()?);
	let property_path = path.append_property(&name);

	data.create_spec(&property_path, sdf::SpecType::Attribute);
	data.set(
		&property_path,
		&FIELD_KEYS.type_name,
		vt::Value::new(tf::Token::new(&type_name)),
	);
	if uniform {
		data.set(
			&property_path,
			&FIELD_KEYS.variability,
			vt::Value::new(sdf::Variability::Uniform),
		);
	}
	append_token(data, path, &CHILDREN_KEYS.property_children, &name);

	if cursor.eat(".timeSamples") {
		cursor.expect("=")?;
		cursor.expect("{")?;
		let mut samples = sdf::TimeSampleMap::new();
		loop {
			cursor.skip_ws();
			if cursor.eat("}") {
				break;
			}
			let time = cursor.number()?;
			cursor.expect(":")?;
			let value = parse_typed_value(cursor, scalar_type(&type_name))?;
			samples.push((time, value));
			cursor.skip_ws();
			cursor.eat(",");
		}
		data.set(
			&property_path,
			&FIELD_KEYS.time_samples,
			vt::Value::new(samples),
		);
		return Ok(());
	}

	if cursor.eat(".connect") {
		cursor.expect("=")?;
		let targets = parse_path_list(cursor)?;
		data.set(
			&property_path,
			&FIELD_KEYS.connection_paths,
			vt::Value::new(sdf::PathListOp::explicit(targets)),
		);
		return Ok(());
	}

	cursor.skip_inline_ws();
	if cursor.eat("=") {
		let value = parse_typed_value(cursor, &type_name)?;
		data.set(&property_path, &FIELD_KEYS.default, value);
	}

	cursor.skip_inline_ws();
	if cursor.eat("(") {
		loop {
			cursor.skip_ws();
			if cursor.eat(")") {
				break;
			}
			let key = cursor.ident()?.to_string();
			cursor.expect("=")?;
			if key == "interpolation" {
				let interpolation = cursor.quoted()?;
				data.set(
					&property_path,
					&FIELD_KEYS.interpolation,
					vt::Value::new(tf::Token::new(interpolation)),
				);
			} else {
				return Err(cursor.error(format!("unsupported property metadata '{}'", key)));
			}
		}
	}

	Ok(())
}

fn scalar_type(type_name: &str) -> &str {
	type_name.strip_suffix("[]").unwrap_or(type_name)
}

fn parse_typed_value(cursor: &mut Cursor, type_name: &str) -> Result<vt::Value> {
	Ok(match type_name {
		"double" => vt::Value::new(cursor.number()?),
		"float" => vt::Value::new(cursor.number()? as f32),
		"int" => vt::Value::new(cursor.number()? as i32),
		"bool" => vt::Value::new(parse_bool(cursor)?),
		"token" => vt::Value::new(tf::Token::new(cursor.quoted()?)),
		"string" => vt::Value::new(cursor.quoted()?),
		"asset" => {
			cursor.expect("@")?;
			vt::Value::new(sdf::AssetPath::new(cursor.until(b'@')?))
		}
		"double3" => {
			let (x, y, z) = parse_tuple3(cursor)?;
			vt::Value::new(gf::Vec3d::new(x, y, z))
		}
		"float3" | "color3f" | "point3f" | "normal3f" | "vector3f" => {
			let (x, y, z) = parse_tuple3(cursor)?;
			vt::Value::new(gf::Vec3f::new(x as f32, y as f32, z as f32))
		}
		"float2" | "texCoord2f" => {
			let (x, y) = parse_tuple2(cursor)?;
			vt::Value::new(gf::Vec2f::new(x as f32, y as f32))
		}
		"int[]" => {
			let items = parse_number_list(cursor)?;
			vt::Value::new(items.into_iter().map(|n| n as i32).collect::<Vec<i32>>())
		}
		"float[]" => {
			let items = parse_number_list(cursor)?;
			vt::Value::new(items.into_iter().map(|n| n as f32).collect::<Vec<f32>>())
		}
		"double[]" => vt::Value::new(parse_number_list(cursor)?),
		"float3[]" | "color3f[]" | "point3f[]" | "normal3f[]" | "vector3f[]" => {
			let mut items = Vec::new();
			parse_bracketed(cursor, |cursor| {
				let (x, y, z) = parse_tuple3(cursor)?;
				items.push(gf::Vec3f::new(x as f32, y as f32, z as f32));
				Ok(())
			})?;
			vt::Value::new(items)
		}
		"float2[]" | "texCoord2f[]" => {
			let mut items = Vec::new();
			parse_bracketed(cursor, |cursor| {
				let (x, y) = parse_tuple2(cursor)?;
				items.push(gf::Vec2f::new(x as f32, y as f32));
				Ok(())
			})?;
			vt::Value::new(items)
		}
		"token[]" => {
			let items = parse_quoted_list(cursor)?;
			vt::Value::new(
				items
					.into_iter()
					.map(tf::Token::new)
					.collect::<Vec<tf::Token>>(),
			)
		}
		"string[]" => vt::Value::new(parse_quoted_list(cursor)?),
		other => return Err(cursor.error(format!("unsupported value type '{}'", other))),
	})
}

fn parse_bool(cursor: &mut Cursor) -> Result<bool> {
	match cursor.ident()? {
		"true" | "1" => Ok(true),
		"false" | "0" => Ok(false),
		other => Err(cursor.error(format!("expected boolean, found '{}'", other))),
	}
}

fn parse_tuple2(cursor: &mut Cursor) -> Result<(f64, f64)> {
	cursor.expect("(")?;
	let x = cursor.number()?;
	cursor.expect(",")?;
	let y = cursor.number()?;
	cursor.expect(")")?;
	Ok((x, y))
}

fn parse_tuple3(cursor: &mut Cursor) -> Result<(f64, f64, f64)> {
	cursor.expect("(")?;
	let x = cursor.number()?;
	cursor.expect(",")?;
	let y = cursor.number()?;
	cursor.expect(",")?;
	let z = cursor.number()?;
	cursor.expect(")")?;
	Ok((x, y, z))
}

/// Parse `[item, item, ...]`, calling `item` for each element.
fn parse_bracketed(
	cursor: &mut Cursor,
	mut item: impl FnMut(&mut Cursor) -> Result<()>,
) -> Result<()> {
	cursor.expect("[")?;
	loop {
		cursor.skip_ws();
		if cursor.eat("]") {
			return Ok(());
		}
		item(cursor)?;
		cursor.skip_ws();
		cursor.eat(",");
	}
}

fn parse_number_list(cursor: &mut Cursor) -> Result<Vec<f64>> {
	let mut items = Vec::new();
	parse_bracketed(cursor, |cursor| {
		items.push(cursor.number()?);
		Ok(())
	})?;
	Ok(items)
}

/// Parse either a bare quoted string or a bracketed list of them.
fn parse_quoted_list(cursor: &mut Cursor) -> Result<Vec<String>> {
	cursor.skip_ws();
	if cursor.peek() == Some(b'"') {
		return Ok(vec![cursor.quoted()?]);
	}
	let mut items = Vec::new();
	parse_bracketed(cursor, |cursor| {
		items.push(cursor.quoted()?);
		Ok(())
	})?;
	Ok(items)
}

/// Parse either a bare `<path>` or a bracketed list of them.
fn parse_path_list(cursor: &mut Cursor) -> Result<Vec<sdf::Path>> {
	cursor.skip_ws();
	if cursor.eat("<") {
		return Ok(vec![sdf::Path::from(cursor.until(b'>')?)]);
	}
	let mut items = Vec::new();
	parse_bracketed(cursor, |cursor| {
		cursor.expect("<")?;
		items.push(sdf::Path::from(cursor.until(b'>')?));
		Ok(())
	})?;
	Ok(items)
}

/// Parse either a bare reference or a bracketed list of them.
fn parse_reference_list(cursor: &mut Cursor) -> Result<Vec<sdf::Reference>> {
	cursor.skip_ws();
	if cursor.peek() == Some(b'@') {
		return Ok(vec![parse_reference(cursor)?]);
	}
	let mut items = Vec::new();
	parse_bracketed(cursor, |cursor| {
		items.push(parse_reference(cursor)?);
		Ok(())
	})?;
	Ok(items)
}

fn parse_reference(cursor: &mut Cursor) -> Result<sdf::Reference> {
	cursor.expect("@")?;
	let mut reference = sdf::Reference::new(cursor.until(b'@')?);

	cursor.skip_inline_ws();
	if cursor.eat("<") {
		reference.prim_path = sdf::Path::from(cursor.until(b'>')?);
	}

	cursor.skip_inline_ws();
	if cursor.eat("(") {
		let mut retiming = sdf::Retiming::default();
		loop {
			cursor.skip_ws();
			if cursor.eat(")") {
				break;
			}
			let key = cursor.ident()?.to_string();
			cursor.expect("=")?;
			let value = cursor.number()?;
			match key.as_str() {
				"offset" => retiming.offset = value,
				"scale" => retiming.scale = value,
				other => {
					return Err(cursor.error(format!("unsupported layer offset key '{}'", other)))
				}
			}
			cursor.skip_ws();
			cursor.eat(";");
			cursor.eat(",");
		}
		reference.layer_offset = retiming;
	}

	Ok(reference)
}

fn make_list_op<T: Clone + PartialEq>(bucket: &str, items: Vec<T>) -> sdf::ListOp<T> {
	let mut op = sdf::ListOp::<T>::default();
	match bucket {
		"delete" => op.deleted_items = items,
		"add" => op.added_items = items,
		"prepend" => op.prepended_items = items,
		"append" => op.appended_items = items,
		_ => {
			op.is_explicit = true;
			op.explicit_items = items;
		}
	}
	op
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
