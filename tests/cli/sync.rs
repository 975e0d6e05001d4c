use anyhow::Result;

use crate::{CliTest, EN_JSON};

const SOURCE: &str = r#"import 'package:flutter/material.dart';

class ConfirmPage extends StatelessWidget {
  @override
  Widget build(BuildContext context) {
    return Column(children: [
      const Text('Please Confirm'),
      ElevatedButton(onPressed: () {}, child: Text('Yes')),
    ]);
  }
}
"#;

#[test]
fn test_sync_end_to_end() -> Result<()> {
    let test = CliTest::with_project(SOURCE, r#"{"common": {"yes": "Yes"}}"#)?;

    let run = test.run(&["sync"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Added 1 key(s)"));
    assert!(run.stdout.contains("Rewrote 2 literal(s) in 1 file(s)."));

    let en = test.read_json(EN_JSON)?;
    assert_eq!(en["common"]["please_confirm"], "Please Confirm");

    let content = test.read_file("lib/main.dart")?;
    assert!(content.contains("      Text('common.please_confirm'.tr()),"));
    assert!(content.contains("child: Text('common.yes'.tr())"));
    assert!(content.contains("import 'package:easy_localization/easy_localization.dart';"));

    Ok(())
}

#[test]
fn test_sync_dry_run_writes_nothing() -> Result<()> {
    let en = r#"{"common": {"yes": "Yes"}}"#;
    let test = CliTest::with_project(SOURCE, en)?;

    let run = test.run(&["sync", "--dry-run"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Would add 1 key(s)"));
    assert!(run.stdout.contains("+ 'common.please_confirm'.tr()"));
    assert!(run.stdout.contains("Would rewrite 2 literal(s) in 1 file(s)."));
    assert_eq!(test.read_file(EN_JSON)?, en);
    assert_eq!(test.read_file("lib/main.dart")?, SOURCE);

    Ok(())
}

#[test]
fn test_sync_is_idempotent() -> Result<()> {
    let test = CliTest::with_project(SOURCE, r#"{"common": {"yes": "Yes"}}"#)?;

    test.run(&["sync"])?;
    let source = test.read_file("lib/main.dart")?;
    let en = test.read_file(EN_JSON)?;

    let run = test.run(&["sync"])?;

    assert_eq!(run.code, Some(0));
    assert!(!run.stdout.contains("Added"));
    assert!(!run.stdout.contains("Rewrote"));
    assert_eq!(test.read_file("lib/main.dart")?, source);
    assert_eq!(test.read_file(EN_JSON)?, en);

    Ok(())
}

#[test]
fn test_sync_reports_other_locales() -> Result<()> {
    let test = CliTest::with_project(SOURCE, r#"{"common": {"yes": "Yes"}}"#)?;
    test.write_file("assets/translations/de.json", r#"{"common": {"yes": "Ja"}}"#)?;

    let run = test.run(&["sync"])?;

    // New keys only land in the reference locale; the check flags the gap.
    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("error: \"common.please_confirm\"  missing-key"));
    assert!(run.stdout.contains("used: lib/main.dart:8:"));
    assert!(test.read_file("lib/main.dart")?.contains("'common.please_confirm'.tr()"));

    Ok(())
}

#[test]
fn test_sync_creates_reference_locale() -> Result<()> {
    let test = CliTest::with_file("lib/main.dart", SOURCE)?;

    let run = test.run(&["sync"])?;

    assert_eq!(run.code, Some(0));
    let en = test.read_json(EN_JSON)?;
    assert_eq!(en["common"]["please_confirm"], "Please Confirm");
    assert_eq!(en["common"]["yes"], "Yes");

    Ok(())
}
