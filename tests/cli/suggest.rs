use anyhow::Result;

use crate::{CliTest, EN_JSON};

#[test]
fn test_suggest_keys_dry_run() -> Result<()> {
    let en = r#"{"common": {"yes": "Yes"}}"#;
    let test = CliTest::with_project("Widget b() => Text('Please Confirm');\n", en)?;

    let run = test.run(&["suggest-keys", "--dry-run"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("+ common.please_confirm: \"Please Confirm\""));
    assert!(run.stdout.contains("Would add 1 key(s) to assets/translations/en.json."));
    assert!(run.stdout.contains("Run without --dry-run to apply."));
    assert_eq!(test.read_file(EN_JSON)?, en);

    Ok(())
}

#[test]
fn test_suggest_keys_writes_reference() -> Result<()> {
    let test = CliTest::with_project(
        r#"Widget a() => Column(children: [
  Text('Please Confirm'),
  Text('Yes'),
  Text('Login failed'),
]);
"#,
        r#"{"common": {"yes": "Yes"}}"#,
    )?;

    let run = test.run(&["suggest-keys"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Added 2 key(s)"));
    assert!(run.stdout.contains("reused: 1 existing key(s)"));

    let en = test.read_json(EN_JSON)?;
    assert_eq!(en["common"]["yes"], "Yes");
    assert_eq!(en["common"]["please_confirm"], "Please Confirm");
    assert_eq!(en["error_messages"]["login_failed"], "Login failed");

    // Existing keys stay first, new ones follow in source order.
    let content = test.read_file(EN_JSON)?;
    let yes = content.find("\"yes\"").unwrap();
    let confirm = content.find("\"please_confirm\"").unwrap();
    assert!(yes < confirm);
    assert!(content.ends_with("}\n"));

    // Sources are left alone.
    assert!(test.read_file("lib/main.dart")?.contains("Text('Please Confirm')"));

    Ok(())
}

#[test]
fn test_suggest_keys_creates_reference() -> Result<()> {
    let test = CliTest::with_file("lib/main.dart", "Widget b() => Text('Welcome back');\n")?;

    let run = test.run(&["suggest-keys"])?;

    assert_eq!(run.code, Some(0));
    let en = test.read_json(EN_JSON)?;
    assert_eq!(en["common"]["welcome_back"], "Welcome back");

    Ok(())
}

#[test]
fn test_suggest_keys_is_idempotent() -> Result<()> {
    let test = CliTest::with_project(
        "Widget b() => Text('Please Confirm');\n",
        r#"{"common": {"yes": "Yes"}}"#,
    )?;

    test.run(&["suggest-keys"])?;
    let first = test.read_file(EN_JSON)?;
    let run = test.run(&["suggest-keys"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("No new keys needed (1 literal(s) reuse an existing key)."));
    assert_eq!(test.read_file(EN_JSON)?, first);

    Ok(())
}

#[test]
fn test_suggest_keys_collision_suffix() -> Result<()> {
    let test = CliTest::with_project(
        "Widget b() => Text('Hello there');\n",
        r#"{"common": {"hello_there": "Hello, there!"}}"#,
    )?;

    let run = test.run(&["suggest-keys"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("renamed: 1 key(s)"));
    let en = test.read_json(EN_JSON)?;
    assert_eq!(en["common"]["hello_there"], "Hello, there!");
    assert_eq!(en["common"]["hello_there_1"], "Hello there");

    Ok(())
}

#[test]
fn test_suggest_keys_sort_keys_config() -> Result<()> {
    let test = CliTest::with_project(
        "Widget b() => Text('Abort mission');\n",
        r#"{"common": {"yes": "Yes"}}"#,
    )?;
    test.write_file(".trsyncrc.json", r#"{ "sortKeys": true }"#)?;

    test.run(&["suggest-keys"])?;

    let content = test.read_file(EN_JSON)?;
    let abort = content.find("\"abort_mission\"").unwrap();
    let yes = content.find("\"yes\"").unwrap();
    assert!(abort < yes);

    Ok(())
}
