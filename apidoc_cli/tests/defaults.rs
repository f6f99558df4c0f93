mod common;

use apidoc_core::AnyEmptyResult;

#[test]
fn defaults_without_config_uses_builtin_values() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::apidoc_cmd()
		.arg("defaults")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("(none, using built-in defaults)"))
		.stdout(predicates::str::contains(
			"members, show-inheritance, undoc-members",
		))
		.stdout(predicates::str::is_match(r"max_depth\s+4")?);

	Ok(())
}

#[test]
fn defaults_reads_dot_config_apidoc_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(
		tmp.path().join(".config/apidoc.toml"),
		"apidoc_max_depth = 7\napidoc_module_first = true\n",
	)?;

	let expected_path = tmp.path().join(".config/apidoc.toml").display().to_string();

	common::apidoc_cmd()
		.arg("defaults")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Resolved config"))
		.stdout(predicates::str::contains(expected_path))
		.stdout(predicates::str::is_match(r"max_depth\s+7")?)
		.stdout(predicates::str::is_match(r"module_first\s+true")?);

	Ok(())
}

#[test]
fn defaults_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("apidoc.toml"),
		"apidoc_automodule_options = [\"members\", \"members\"]\n",
	)?;

	let output = common::apidoc_cmd()
		.arg("defaults")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(
		value["defaults"]["automodule_options"],
		serde_json::json!(["members"])
	);
	assert_eq!(value["defaults"]["max_depth"], serde_json::json!(4));
	assert_eq!(
		value["config_path"],
		serde_json::json!(tmp.path().join("apidoc.toml"))
	);

	Ok(())
}

#[test]
fn defaults_fails_on_mistyped_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("apidoc.toml"), "apidoc_max_depth = \"four\"\n")?;

	common::apidoc_cmd()
		.arg("defaults")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}
