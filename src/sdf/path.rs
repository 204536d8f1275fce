use crate::tf;

/// A path value used to locate objects in layers or scenegraphs.
///
/// Holds the normalized text form: absolute prim paths (`/a/b`), prim
/// property paths (`/a/b.prop`) and variant selection paths
/// (`/a{set=sel}b`). The empty path is the empty string.
#[derive(Debug, Default, Clone, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Path {
	text: String,
}

impl Path {
	/// The empty path value.
	pub const fn empty_path() -> Self {
		Self {
			text: String::new(),
		}
	}

	/// The absolute path representing the top of the namespace hierarchy.
	pub fn absolute_root_path() -> Self {
		Self {
			text: String::from("/"),
		}
	}

	pub fn as_str(&self) -> &str {
		&self.text
	}
}

/// Querying paths.
impl Path {
	/// Returns true if this path is the [`Self::empty_path`].
	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	/// Returns true if this path is the [`Self::absolute_root_path`].
	pub fn is_absolute_root(&self) -> bool {
		self.text == "/"
	}

	/// Returns whether the path identifies a prim or prim variant selection.
	pub fn is_prim_path(&self) -> bool {
		!self.is_empty() && !self.is_absolute_root() && !self.is_prim_property_path()
	}

	/// Returns whether the path identifies a property of a prim.
	pub fn is_prim_property_path(&self) -> bool {
		self.text.contains('.')
	}

	/// Returns whether the path contains a variant selection component.
	pub fn contains_variant_selection(&self) -> bool {
		self.text.contains('{')
	}

	/// Return the name of the last path component: the property name for
	/// property paths, the prim name otherwise.
	pub fn name(&self) -> &str {
		if let Some(dot) = self.text.rfind('.') {
			return &self.text[dot + 1..];
		}

		let (_, name) = self.split_last();
		name
	}

	pub fn name_token(&self) -> tf::Token {
		tf::Token::new(self.name())
	}

	/// Return the path that identifies this path's namespace parent.
	pub fn parent_path(&self) -> Self {
		if self.is_empty() || self.is_absolute_root() {
			return Self::empty_path();
		}

		// A property-like path trims the property part.
		if let Some(dot) = self.text.rfind('.') {
			return Self {
				text: self.text[..dot].to_string(),
			};
		}

		let (parent, _) = self.split_last();
		if parent.is_empty() {
			Self::absolute_root_path()
		} else {
			Self {
				text: parent.to_string(),
			}
		}
	}

	/// Return the prim part of a property path, or the path itself.
	pub fn prim_path(&self) -> Self {
		if let Some(dot) = self.text.rfind('.') {
			Self {
				text: self.text[..dot].to_string(),
			}
		} else {
			self.clone()
		}
	}

	/// Returns whether `prefix` is a component-wise prefix of this path.
	pub fn has_prefix(&self, prefix: &Path) -> bool {
		if prefix.is_empty() {
			return false;
		}
		if prefix.is_absolute_root() {
			return self.text.starts_with('/');
		}
		if !self.text.starts_with(&prefix.text) {
			return false;
		}
		match self.text.as_bytes().get(prefix.text.len()) {
			None => true,
			Some(b'/') | Some(b'.') | Some(b'{') => true,
			// A child name follows a variant selection directly.
			Some(_) => prefix.text.ends_with('}'),
		}
	}

	/// Split the text into (parent text, last component), assuming a
	/// non-root prim or variant selection path.
	fn split_last(&self) -> (&str, &str) {
		let text = &self.text;

		if text.ends_with('}') {
			// Variant selection: parent is everything before the brace.
			let open = text.rfind('{').unwrap_or(0);
			return (&text[..open], &text[open..]);
		}

		// Name starts after the last '/' or '}' separator.
		let start = text
			.rfind(|c| c == '/' || c == '}')
			.map(|i| i + 1)
			.unwrap_or(0);

		if start > 0 && text.as_bytes()[start - 1] == b'}' {
			(&text[..start], &text[start..])
		} else {
			// Strip the '/' separator itself from the parent.
			(&text[..start.saturating_sub(1)], &text[start..])
		}
	}
}

/// Creating paths by appending to existing ones.
impl Path {
	/// Return a path identifying the child prim `name` of this prim.
	pub fn append_child(&self, name: &tf::Token) -> Self {
		let text = if self.is_absolute_root() {
			format!("/{}", name)
		} else if self.text.ends_with('}') {
			format!("{}{}", self.text, name)
		} else {
			format!("{}/{}", self.text, name)
		};
		Self { text }
	}

	/// Return a path identifying the property `name` on this prim.
	pub fn append_property(&self, name: &tf::Token) -> Self {
		Self {
			text: format!("{}.{}", self.text, name),
		}
	}

	/// Return a path identifying the variant `variant` of variant set
	/// `set` on this prim. An empty variant names the variant set itself.
	pub fn append_variant_selection(&self, set: &str, variant: &str) -> Self {
		Self {
			text: format!("{}{{{}={}}}", self.text, set, variant),
		}
	}

	/// Rewrite `prefix` (a component-wise prefix of this path) to `target`.
	pub fn replace_prefix(&self, prefix: &Path, target: &Path) -> Self {
		if !self.has_prefix(prefix) {
			return self.clone();
		}
		Self {
			text: format!("{}{}", target.text, &self.text[prefix.text.len()..]),
		}
	}
}

impl From<&str> for Path {
	fn from(s: &str) -> Self {
		Self {
			text: s.to_string(),
		}
	}
}

impl From<String> for Path {
	fn from(s: String) -> Self {
		Self { text: s }
	}
}

impl std::fmt::Display for Path {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "{}", self.text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn path(s: &str) -> Path {
		Path::from(s)
	}

	#[test]
	fn parents_and_names() {
		assert_eq!(path("/hello/world").parent_path(), path("/hello"));
		assert_eq!(path("/hello").parent_path(), Path::absolute_root_path());
		assert_eq!(path("/hello/world").name(), "world");
		assert_eq!(
			path("/hello/world.radius").parent_path(),
			path("/hello/world")
		);
		assert_eq!(path("/hello/world.radius").name(), "radius");
	}

	#[test]
	fn variant_selection_components() {
		let variant = path("/hello").append_variant_selection("shadingVariant", "red");
		assert_eq!(variant.as_str(), "/hello{shadingVariant=red}");

		let child = variant.append_child(&tf::Token::new("world"));
		assert_eq!(child.as_str(), "/hello{shadingVariant=red}world");
		assert_eq!(child.parent_path(), variant);
		assert_eq!(child.name(), "world");
		assert_eq!(variant.parent_path(), path("/hello"));
	}

	#[test]
	fn prefixes() {
		assert!(path("/hello/world").has_prefix(&path("/hello")));
		assert!(!path("/hello2").has_prefix(&path("/hello")));
		assert!(path("/hello{s=v}world").has_prefix(&path("/hello{s=v}")));
		assert!(path("/hello.xformOpOrder").has_prefix(&path("/hello")));

		let mapped = path("/hello/world.primvars:displayColor")
			.replace_prefix(&path("/hello"), &path("/hello{shadingVariant=red}"));
		assert_eq!(
			mapped.as_str(),
			"/hello{shadingVariant=red}world.primvars:displayColor"
		);
	}
}
