use microusd::{tf, tutorial, usd::Stage, usd_geom, vt};
use tempfile::tempdir;

fn op_order(stage: &Stage, path: &str) -> vt::Array<tf::Token> {
	let prim = stage.prim_at_path(path);
	usd_geom::Xformable::new(&prim).xform_op_order()
}

#[test]
fn op_order_records_the_authoring_sequence() {
	let dir = tempdir().unwrap();
	tutorial::transformations_and_animations(dir.path()).unwrap();

	let step4 = Stage::open(dir.path().join("Step4.usda")).unwrap();
	assert_eq!(
		op_order(&step4, "/Top"),
		vec![
			tf::Token::new("xformOp:rotateX:tilt"),
			tf::Token::new("xformOp:rotateZ:spin"),
		]
	);

	let step4a = Stage::open(dir.path().join("Step4A.usda")).unwrap();
	assert_eq!(
		op_order(&step4a, "/Top"),
		vec![
			tf::Token::new("xformOp:rotateZ:spin"),
			tf::Token::new("xformOp:rotateX:tilt"),
		]
	);

	let step5 = Stage::open(dir.path().join("Step5.usda")).unwrap();
	assert_eq!(
		op_order(&step5, "/Top"),
		vec![
			tf::Token::new("xformOp:rotateZ:precess"),
			tf::Token::new("xformOp:translate:offset"),
			tf::Token::new("xformOp:rotateX:tilt"),
			tf::Token::new("xformOp:rotateZ:spin"),
		]
	);
}

#[test]
fn step4_and_step4a_differ_only_in_order_and_comment() {
	let dir = tempdir().unwrap();
	tutorial::transformations_and_animations(dir.path()).unwrap();

	let step4 = std::fs::read_to_string(dir.path().join("Step4.usda")).unwrap();
	let step4a = std::fs::read_to_string(dir.path().join("Step4A.usda")).unwrap();
	assert_ne!(step4, step4a);

	for (line4, line4a) in step4.lines().zip(step4a.lines()) {
		if line4 != line4a {
			assert!(
				line4.contains("xformOpOrder") || line4.contains("Step 4"),
				"unexpected difference: {line4:?} vs {line4a:?}"
			);
		}
	}
}

#[test]
fn op_order_changes_the_composed_transform() {
	let dir = tempdir().unwrap();
	tutorial::transformations_and_animations(dir.path()).unwrap();

	let step4 = Stage::open(dir.path().join("Step4.usda")).unwrap();
	let step4a = Stage::open(dir.path().join("Step4A.usda")).unwrap();

	// Half-way through the range the spin is not a multiple of a full
	// turn, so tilt-then-spin and spin-then-tilt must disagree.
	let prim4 = step4.prim_at_path("/Top");
	let prim4a = step4a.prim_at_path("/Top");
	let m4 = usd_geom::Xformable::new(&prim4).local_transform_at(96.0);
	let m4a = usd_geom::Xformable::new(&prim4a).local_transform_at(96.0);

	let difference: f64 = m4
		.to_cols_array()
		.iter()
		.zip(m4a.to_cols_array().iter())
		.map(|(a, b)| (a - b).abs())
		.sum();
	assert!(difference > 1e-3);
}

#[test]
fn layer_offsets_shift_and_scale_the_animation() {
	let dir = tempdir().unwrap();
	tutorial::transformations_and_animations(dir.path()).unwrap();

	let step5 = Stage::open(dir.path().join("Step5.usda")).unwrap();
	let step6 = Stage::open(dir.path().join("Step6.usda")).unwrap();

	let spin_token = tf::Token::new("xformOp:rotateZ:spin");
	let base = |time: f64| -> f32 {
		step5
			.prim_at_path("/Top")
			.attribute(&spin_token)
			.get_at::<f32>(time)
			.unwrap()
	};
	let spin = |path: &str, time: f64| -> f32 {
		step6
			.prim_at_path(path)
			.attribute(&spin_token)
			.get_at::<f32>(time)
			.unwrap()
	};

	// No offset: times map straight through.
	assert_eq!(spin("/Left/Top", 192.0), 1440.0);

	// offset = 96 shifts the animation forward 96 frames.
	assert_eq!(spin("/Middle/Top", 97.0), base(1.0));
	assert_eq!(spin("/Middle/Top", 150.0), base(54.0));
	assert_eq!(spin("/Middle/Top", 288.0), base(192.0));

	// scale = 0.25 compresses the animation to a quarter duration.
	assert_eq!(spin("/Right/Top", 0.25), base(1.0));
	assert_eq!(spin("/Right/Top", 24.0), base(96.0));
	assert_eq!(spin("/Right/Top", 48.0), base(192.0));
}

#[test]
fn sibling_translations_author_double_precision_ops() {
	let dir = tempdir().unwrap();
	tutorial::transformations_and_animations(dir.path()).unwrap();

	let step6 = Stage::open(dir.path().join("Step6.usda")).unwrap();

	let translate = step6
		.prim_at_path("/Middle")
		.attribute(&tf::Token::new("xformOp:translate"));
	assert_eq!(translate.type_name().as_str(), "double3");
	assert_eq!(
		translate.get::<microusd::gf::Vec3d>(),
		microusd::gf::Vec3d::new(2.0, 0.0, 0.0)
	);

	assert_eq!(
		step6
			.prim_at_path("/Right")
			.attribute(&tf::Token::new("xformOp:translate"))
			.get::<microusd::gf::Vec3d>(),
		microusd::gf::Vec3d::new(4.0, 0.0, 0.0)
	);
}

#[test]
fn time_range_metadata_is_authored() {
	let dir = tempdir().unwrap();
	let stage = tutorial::make_initial_stage(dir.path().join("Range.usda")).unwrap();

	assert_eq!(stage.start_time_code(), Some(1.0));
	assert_eq!(stage.end_time_code(), Some(192.0));
	assert_eq!(usd_geom::stage_up_axis(&stage).as_str(), "Z");
}
