use anyhow::Result;

use crate::CliTest;

const EN: &str = r#"{"common": {"yes": "Yes", "cancel": "Cancel"}}"#;

#[test]
fn test_rewrite_replaces_known_literals() -> Result<()> {
    let test = CliTest::with_project(
        r#"import 'package:flutter/material.dart';

Widget b() => Row(children: [Text('Yes'), Text("Cancel"), Text('No idea')]);
"#,
        EN,
    )?;

    let run = test.run(&["rewrite"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Rewrote 2 literal(s) in 1 file(s)."));
    assert!(run.stdout.contains("1 literal(s) have no key yet"));

    let content = test.read_file("lib/main.dart")?;
    assert_eq!(
        content,
        r#"import 'package:flutter/material.dart';
import 'package:easy_localization/easy_localization.dart';

Widget b() => Row(children: [Text('common.yes'.tr()), Text("common.cancel".tr()), Text('No idea')]);
"#
    );

    Ok(())
}

#[test]
fn test_rewrite_dry_run_preview() -> Result<()> {
    let source = "Widget b() => Text('Yes');\n";
    let test = CliTest::with_project(source, EN)?;

    let run = test.run(&["rewrite", "--dry-run"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("--> lib/main.dart:1"));
    assert!(run.stdout.contains("- 'Yes'"));
    assert!(run.stdout.contains("+ 'common.yes'.tr()"));
    assert!(
        run.stdout
            .contains("+ import 'package:easy_localization/easy_localization.dart';")
    );
    assert!(run.stdout.contains("Would rewrite 1 literal(s) in 1 file(s)."));
    assert_eq!(test.read_file("lib/main.dart")?, source);

    Ok(())
}

#[test]
fn test_rewrite_removes_const() -> Result<()> {
    let test = CliTest::with_project(
        "import 'package:flutter/material.dart';\n\nWidget b() => const Padding(padding: p, child: Text('Yes'));\n",
        EN,
    )?;

    let run = test.run(&["rewrite"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("const removed: 1"));
    let content = test.read_file("lib/main.dart")?;
    assert!(
        content.contains("Widget b() => Padding(padding: p, child: Text('common.yes'.tr()));")
    );

    Ok(())
}

#[test]
fn test_rewrite_is_idempotent() -> Result<()> {
    let test = CliTest::with_project("Widget b() => Text('Yes');\n", EN)?;

    test.run(&["rewrite"])?;
    let first = test.read_file("lib/main.dart")?;
    let run = test.run(&["rewrite"])?;

    assert_eq!(run.code, Some(0));
    assert!(!run.stdout.contains("Rewrote"));
    assert_eq!(test.read_file("lib/main.dart")?, first);
    assert_eq!(
        first.matches("package:easy_localization/easy_localization.dart").count(),
        1
    );

    Ok(())
}

#[test]
fn test_rewrite_single_file() -> Result<()> {
    let test = CliTest::with_project("Widget a() => Text('Yes');\n", EN)?;
    test.write_file("lib/other.dart", "Widget b() => Text('Cancel');\n")?;

    let run = test.run(&["rewrite", "--file", "lib/other.dart"])?;

    assert_eq!(run.code, Some(0));
    assert!(test.read_file("lib/other.dart")?.contains("'common.cancel'.tr()"));
    assert!(test.read_file("lib/main.dart")?.contains("Text('Yes')"));

    Ok(())
}

#[test]
fn test_rewrite_requires_reference() -> Result<()> {
    let test = CliTest::with_file("lib/main.dart", "Widget b() => Text('Yes');\n")?;
    test.write_file("assets/translations/de.json", r#"{"common": {"yes": "Ja"}}"#)?;

    let run = test.run(&["rewrite"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("Reference locale 'en' not found"));

    Ok(())
}

#[test]
fn test_rewrite_import_precedes_part_directive() -> Result<()> {
    let test = CliTest::with_project(
        "import 'package:flutter/material.dart';\n\npart 'main.g.dart';\n\nWidget b() => Text('Yes');\n",
        EN,
    )?;

    let run = test.run(&["rewrite"])?;

    assert_eq!(run.code, Some(0));
    assert_eq!(
        test.read_file("lib/main.dart")?,
        "import 'package:flutter/material.dart';\nimport 'package:easy_localization/easy_localization.dart';\n\npart 'main.g.dart';\n\nWidget b() => Text('common.yes'.tr());\n"
    );

    Ok(())
}

#[test]
fn test_rewrite_leaves_const_variable_alone() -> Result<()> {
    let source = "const yes = Text('Yes');\nWidget b() => Text('Cancel');\n";
    let test = CliTest::with_project(source, EN)?;

    let run = test.run(&["rewrite"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("Rewrote 1 literal(s) in 1 file(s)."));
    assert!(run.stdout.contains("1 literal(s) initialize a const variable"));
    let content = test.read_file("lib/main.dart")?;
    assert!(content.contains("const yes = Text('Yes');"));
    assert!(content.contains("Text('common.cancel'.tr())"));

    Ok(())
}
