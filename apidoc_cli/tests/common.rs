use assert_cmd::Command;

pub fn apidoc_cmd() -> Command {
	let mut cmd =
		Command::cargo_bin("apidoc").unwrap_or_else(|e| panic!("apidoc binary not built: {e}"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}
