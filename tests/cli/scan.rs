use anyhow::Result;

use crate::CliTest;

#[test]
fn test_scan_reports_literals() -> Result<()> {
    let test = CliTest::with_project(
        r#"import 'package:flutter/material.dart';

Widget build() => Column(children: [
  Text('Please Confirm'),
  TextField(decoration: InputDecoration(hintText: 'Enter your name')),
]);
"#,
        r#"{"common": {"yes": "Yes"}}"#,
    )?;

    let run = test.run(&["scan"])?;

    // Findings are warnings: scan never fails the build.
    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("warning: \"Please Confirm\"  hardcoded"));
    assert!(run.stdout.contains("--> lib/main.dart:4:8"));
    assert!(run.stdout.contains("hint: new key 'common.please_confirm'"));
    assert!(run.stdout.contains("warning: \"Enter your name\"  hardcoded"));
    assert!(run.stdout.contains("2 problems (0 errors, 2 warnings)"));
    assert!(run.stdout.contains("Found 2 unlocalized literal(s) in 1 file(s)"));

    Ok(())
}

#[test]
fn test_scan_existing_key_hint() -> Result<()> {
    let test = CliTest::with_project(
        "Widget b() => Text('Yes');\n",
        r#"{"common": {"yes": "Yes"}}"#,
    )?;

    let run = test.run(&["scan"])?;

    assert!(run.stdout.contains("hint: existing key 'common.yes'"));
    assert!(run.stdout.contains("1 with an existing key, 0 need a new key"));

    Ok(())
}

#[test]
fn test_scan_skips_localized_and_disabled() -> Result<()> {
    let test = CliTest::with_project(
        r#"Widget a() => Text('common.yes'.tr());
// trsync-disable-next-line
Widget b() => Text('Debug Banner');
Widget c() => Text('OK');
"#,
        r#"{"common": {"yes": "Yes"}}"#,
    )?;

    let run = test.run(&["scan"])?;

    assert_eq!(run.code, Some(0));
    assert!(!run.stdout.contains("hardcoded"));
    assert!(
        run.stdout
            .contains("Checked 1 source file, 1 locale file - no issues found")
    );

    Ok(())
}

#[test]
fn test_scan_without_resources_dir() -> Result<()> {
    let test = CliTest::with_file("lib/main.dart", "Widget b() => Text('Welcome back');\n")?;

    let run = test.run(&["scan"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("hint: new key 'common.welcome_back'"));

    Ok(())
}

#[test]
fn test_scan_missing_source_dir() -> Result<()> {
    let test = CliTest::new()?;

    let run = test.run(&["scan"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("Source directory 'lib' does not exist"));

    Ok(())
}

#[test]
fn test_scan_source_root_override() -> Result<()> {
    let test = CliTest::with_file("app/lib/home.dart", "Widget b() => Text('Good morning');\n")?;

    let run = test.run(&["scan", "--source-root", "app/lib"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("app/lib/home.dart"));

    Ok(())
}
