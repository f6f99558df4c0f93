mod common;

use std::path::Path;

use apidoc_core::AnyEmptyResult;

fn touch(path: &Path) -> AnyEmptyResult {
	if let Some(parent) = path.parent() {
		std::fs::create_dir_all(parent)?;
	}
	std::fs::write(path, "")?;
	Ok(())
}

#[test]
fn prune_removes_files_missing_from_the_write_set() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dest = tmp.path().join("api");
	touch(&dest.join("pkg.rst"))?;
	touch(&dest.join("sub/pkg.sub.rst"))?;
	touch(&dest.join("pkg.gone.rst"))?;
	touch(&dest.join("conf.py"))?;

	common::apidoc_cmd()
		.arg("prune")
		.arg("--dest")
		.arg(&dest)
		.arg(dest.join("pkg.rst"))
		.arg(dest.join("sub/pkg.sub.rst"))
		.assert()
		.success()
		.stdout(predicates::str::contains("Removed"))
		.stdout(predicates::str::contains("pkg.gone.rst"))
		.stdout(predicates::str::contains("Removed 1 stale file(s)."));

	assert!(dest.join("pkg.rst").exists());
	assert!(dest.join("sub/pkg.sub.rst").exists());
	assert!(dest.join("conf.py").exists());
	assert!(!dest.join("pkg.gone.rst").exists());

	Ok(())
}

#[test]
fn prune_dry_run_does_not_delete() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	touch(&tmp.path().join("stale.rst"))?;

	common::apidoc_cmd()
		.arg("prune")
		.arg("--dry-run")
		.arg("--dest")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Would remove"))
		.stdout(predicates::str::contains("1 stale file(s) would be removed."));

	assert!(tmp.path().join("stale.rst").exists());

	Ok(())
}

#[test]
fn prune_reads_the_write_set_from_a_manifest() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dest = tmp.path().join("api");
	touch(&dest.join("kept.md"))?;
	touch(&dest.join("also_kept.md"))?;
	touch(&dest.join("stale.md"))?;
	touch(&dest.join("other.rst"))?;

	let manifest = tmp.path().join("written.txt");
	std::fs::write(
		&manifest,
		format!(
			"{}\n\n{}\n",
			dest.join("kept.md").display(),
			dest.join("also_kept.md").display()
		),
	)?;

	common::apidoc_cmd()
		.arg("prune")
		.arg("--dest")
		.arg(&dest)
		.arg("--suffix")
		.arg("md")
		.arg("--manifest")
		.arg(&manifest)
		.assert()
		.success();

	assert!(dest.join("kept.md").exists());
	assert!(dest.join("also_kept.md").exists());
	assert!(dest.join("other.rst").exists());
	assert!(!dest.join("stale.md").exists());

	Ok(())
}

#[test]
fn prune_reports_clean_tree() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	touch(&tmp.path().join("kept.rst"))?;

	common::apidoc_cmd()
		.arg("prune")
		.arg("--dest")
		.arg(tmp.path())
		.arg(tmp.path().join("kept.rst"))
		.assert()
		.success()
		.stdout(predicates::str::contains("No stale files found"));

	Ok(())
}

#[test]
fn prune_warns_and_succeeds_when_a_removal_fails() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	touch(&tmp.path().join("stale.rst"))?;
	std::fs::create_dir_all(tmp.path().join("blocked.rst"))?;

	common::apidoc_cmd()
		.arg("prune")
		.arg("--dest")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Removed 1 stale file(s)."))
		.stdout(predicates::str::contains("1 file(s) could not be removed."))
		.stderr(predicates::str::contains("Failed to remove"));

	assert!(!tmp.path().join("stale.rst").exists());
	assert!(tmp.path().join("blocked.rst").is_dir());

	Ok(())
}

#[test]
fn prune_rejects_dotted_suffix() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	touch(&tmp.path().join("stale.rst"))?;

	common::apidoc_cmd()
		.arg("prune")
		.arg("--dest")
		.arg(tmp.path())
		.arg("--suffix")
		.arg(".rst")
		.assert()
		.code(2)
		.stderr(predicates::str::contains("apidoc::invalid_option"));

	assert!(tmp.path().join("stale.rst").exists());

	Ok(())
}

#[test]
fn prune_fails_on_missing_manifest() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::apidoc_cmd()
		.arg("prune")
		.arg("--dest")
		.arg(tmp.path())
		.arg("--manifest")
		.arg(tmp.path().join("missing.txt"))
		.assert()
		.code(2)
		.stderr(predicates::str::contains("failed to read manifest"));

	Ok(())
}

#[test]
fn prune_matches_the_suffix_literally() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	touch(&tmp.path().join("a.txt"))?;
	touch(&tmp.path().join("b.rst"))?;

	common::apidoc_cmd()
		.arg("prune")
		.arg("--dest")
		.arg(tmp.path())
		.arg("--suffix")
		.arg("{rst,txt}")
		.assert()
		.success()
		.stdout(predicates::str::contains("No stale files found"));

	assert!(tmp.path().join("a.txt").exists());
	assert!(tmp.path().join("b.rst").exists());

	Ok(())
}
