use microusd::{gf, sdf, tf, tutorial, usd::Stage, usd_geom, vt};
use tempfile::tempdir;

fn run_variants_flow(dir: &std::path::Path) {
	tutorial::hello_world(dir).unwrap();
	tutorial::inspect_and_author_properties(dir).unwrap();
	tutorial::authoring_variants(dir).unwrap();
}

#[test]
fn final_selection_wins_without_a_direct_opinion() {
	let dir = tempdir().unwrap();
	run_variants_flow(dir.path());

	let stage = Stage::open(dir.path().join("HelloWorld.usda")).unwrap();

	// The composed color comes from the selected green variant.
	let color = stage
		.prim_at_path("/hello/world")
		.attribute(&usd_geom::TOKENS.display_color)
		.get::<vt::Array<gf::Vec3f>>();
	assert_eq!(color, vec![gf::Vec3f::new(0.0, 1.0, 0.0)]);

	// No direct opinion remains in the root layer.
	let direct = stage.root_layer().get(
		&sdf::Path::from("/hello/world.primvars:displayColor"),
		&sdf::FIELD_KEYS.default,
	);
	assert!(direct.is_none());

	let selections = stage.prim_at_path("/hello").variant_selections();
	assert_eq!(selections.get("shadingVariant").map(String::as_str), Some("green"));
}

#[test]
fn flattened_export_carries_only_the_selected_variant() {
	let dir = tempdir().unwrap();
	run_variants_flow(dir.path());

	let stage = Stage::open(dir.path().join("HelloWorld.usda")).unwrap();
	let flattened = stage.export_to_string();

	assert!(flattened.contains("primvars:displayColor = [(0, 1, 0)]"));
	assert!(!flattened.contains("variantSet"));
	assert!(!flattened.contains("[(1, 0, 0)]"));
}

#[test]
fn exported_variant_layer_is_written() {
	let dir = tempdir().unwrap();
	run_variants_flow(dir.path());

	let path = dir.path().join("HelloWorldWithVariants.usda");
	assert!(path.is_file());

	let text = std::fs::read_to_string(path).unwrap();
	assert!(text.contains("variantSet \"shadingVariant\""));
	assert!(text.contains("variants = {"));
	assert!(text.contains("string shadingVariant = \"green\""));
}

#[test]
fn selecting_an_unknown_variant_fails() {
	let stage = Stage::create_in_memory();
	let prim = stage
		.define_prim("/model", &tf::Token::new("Xform"))
		.unwrap();
	let vset = prim.variant_sets().add_variant_set("look").unwrap();
	vset.add_variant("worn").unwrap();

	assert!(vset.set_variant_selection("pristine").is_err());
	assert!(vset.set_variant_selection("worn").is_ok());
	assert_eq!(vset.variant_selection().as_deref(), Some("worn"));
}

#[test]
fn edit_context_scopes_opinions_to_the_variant() {
	let stage = Stage::create_in_memory();
	let prim = stage
		.define_prim("/model", &tf::Token::new("Xform"))
		.unwrap();
	let vset = prim.variant_sets().add_variant_set("look").unwrap();
	vset.add_variant("worn").unwrap();
	vset.set_variant_selection("worn").unwrap();

	let attr = prim
		.create_attribute(
			&tf::Token::new("weathering"),
			&tf::Token::new("double"),
			sdf::Variability::Varying,
		)
		.unwrap();

	{
		let _context = vset.variant_edit_context().unwrap();
		attr.set(0.75_f64).unwrap();
	}

	// The opinion landed inside the variant, not on the prim spec.
	let layer = stage.root_layer();
	let variant_spec =
		sdf::Path::from("/model{look=worn}").append_property(&tf::Token::new("weathering"));
	assert!(layer.get(&variant_spec, &sdf::FIELD_KEYS.default).is_some());

	// After the scope ends, edits land directly again.
	attr.set(0.25_f64).unwrap();
	let direct_spec = sdf::Path::from("/model.weathering");
	assert_eq!(
		layer
			.get(&direct_spec, &sdf::FIELD_KEYS.default)
			.and_then(|v| v.get::<f64>()),
		Some(0.25)
	);
}
