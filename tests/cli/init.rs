use anyhow::{Context, Result};
use insta::assert_snapshot;
use serde_json::Value;

use crate::CliTest;

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let run = test.run(&["init"])?;

    assert_eq!(run.code, Some(0));
    assert_snapshot!(run.stdout.trim_end(), @"✓ Created .trsyncrc.json");

    let content = test.read_file(".trsyncrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["sourceRoot"], "lib");
    assert_eq!(parsed["resourcesRoot"], "assets/translations");
    assert_eq!(parsed["referenceLocale"], "en");
    assert!(parsed["provider"]["apiKeyEnv"].is_string());
    assert!(content.contains("\n  \"sourceRoot\""), "2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_when_config_exists() -> Result<()> {
    let test = CliTest::with_file(".trsyncrc.json", "{}")?;

    let run = test.run(&["init"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains(".trsyncrc.json already exists"));
    assert_eq!(test.read_file(".trsyncrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_picked_up() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file("lib/main.dart", "Widget b() => Text('Hello world');\n")?;

    let run = test.run(&["scan"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("\"Hello world\""));

    Ok(())
}
