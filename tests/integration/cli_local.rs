use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tempfile::TempDir;
use treeforge::tooling::{Cli, CliContext, CliError};
use treeforge::{Forest, Mode, Node};

fn fixture() -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("tree.json");
    let forest = vec![Node::folder("src", vec![Node::file_with_content("a.js", "let a;")])];
    fs::write(&data, serde_json::to_string(&forest).unwrap()).unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        "[logging]\nlevel = \"off\"\n\n[behavior]\nmissing_parent = \"fail\"\n",
    )
    .unwrap();
    (dir, data, config)
}

fn context(data: &Path, config: &Path) -> CliContext {
    let data = data.to_string_lossy().into_owned();
    let config = config.to_string_lossy().into_owned();
    let cli = Cli::parse_from(["treeforge", "--data", &data, "--config", &config, "--yes", "--no-color", "tree"]);
    CliContext::new(&cli).unwrap()
}

fn run(ctx: &CliContext, args: &[&str]) -> Result<String, CliError> {
    let mut argv = vec!["treeforge", "--data", "unused.json"];
    argv.extend_from_slice(args);
    let cli = Cli::parse_from(argv);
    ctx.execute(&cli.command)
}

fn stored(data: &Path) -> Forest {
    serde_json::from_str(&fs::read_to_string(data).unwrap()).unwrap()
}

#[test]
fn mutations_are_written_back() {
    let (_dir, data, config) = fixture();
    let ctx = context(&data, &config);
    assert_eq!(ctx.forge().mode(), Mode::Local);

    run(&ctx, &["new-file", "a.js", "--parent", "src"]).unwrap();
    run(&ctx, &["new-folder", "docs"]).unwrap();
    run(&ctx, &["rename", "src/a.js", "main.js"]).unwrap();

    let forest = stored(&data);
    assert_eq!(
        forest,
        vec![
            Node::folder(
                "src",
                vec![Node::file_with_content("main.js", "let a;"), Node::file("a(1).js")]
            ),
            Node::folder("docs", vec![]),
        ]
    );

    let listing = run(&ctx, &["tree", "--paths"]).unwrap();
    assert_eq!(listing, "src\nsrc/main.js\nsrc/a(1).js\ndocs");
}

#[test]
fn write_then_cat_round_trips() {
    let (_dir, data, config) = fixture();
    let ctx = context(&data, &config);

    run(&ctx, &["write", "src/a.js", "--content", "let b;"]).unwrap();
    assert_eq!(run(&ctx, &["cat", "src/a.js"]).unwrap(), "let b;");
    assert_eq!(stored(&data), vec![Node::folder("src", vec![Node::file_with_content("a.js", "let b;")])]);
}

#[test]
fn refusals_surface_as_rejected() {
    let (_dir, data, config) = fixture();
    let ctx = context(&data, &config);

    let missing_parent = run(&ctx, &["new-file", "x.js", "--parent", "nope"]);
    assert!(matches!(missing_parent, Err(CliError::Rejected(_))));
    let not_a_file = run(&ctx, &["cat", "src"]);
    assert!(matches!(not_a_file, Err(CliError::Rejected(_))));
    let bad_name = run(&ctx, &["rename", "src/a.js", "a/b"]);
    assert!(matches!(bad_name, Err(CliError::Rejected(_))));
}

#[test]
fn delete_with_yes_skips_prompt() {
    let (_dir, data, config) = fixture();
    let ctx = context(&data, &config);
    assert_eq!(run(&ctx, &["delete", "src"]).unwrap(), "Deleted src");
    assert!(stored(&data).is_empty());
}

#[test]
fn tree_renders_connectors() {
    let (_dir, data, config) = fixture();
    let ctx = context(&data, &config);
    let out = run(&ctx, &["tree", "--ascii"]).unwrap();
    assert!(out.contains("src"));
    assert!(out.contains("a.js"));
    assert_eq!(out.lines().count(), 2);
}

#[test]
fn missing_source_is_usage_error() {
    let cli = Cli::parse_from(["treeforge", "tree"]);
    assert!(matches!(CliContext::new(&cli), Err(CliError::Usage(_))));
}
