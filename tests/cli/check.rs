use anyhow::Result;

use crate::CliTest;

const SOURCE: &str = "Widget b() => Text('common.yes'.tr());\n";

fn project(en: &str, de: &str) -> Result<CliTest> {
    let test = CliTest::with_project(SOURCE, en)?;
    test.write_file("assets/translations/de.json", de)?;
    Ok(test)
}

#[test]
fn test_check_consistent_locales() -> Result<()> {
    let test = project(
        r#"{"common": {"yes": "Yes", "no": "No"}}"#,
        r#"{"common": {"yes": "Ja", "no": "Nein"}}"#,
    )?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("locale    keys  missing  extra  identical"));
    assert!(run.stdout.contains("en           2        -      -          -  (reference)"));
    assert!(run.stdout.contains("de           2        0      0          0  ✓"));
    assert!(
        run.stdout
            .contains("Checked 1 source file, 2 locale files - no issues found")
    );

    Ok(())
}

#[test]
fn test_check_missing_key() -> Result<()> {
    let test = project(
        r#"{"common": {"yes": "Yes", "no": "No"}}"#,
        r#"{"common": {"no": "Nein"}}"#,
    )?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("error: \"common.yes\"  missing-key"));
    assert!(run.stdout.contains("missing in: de"));
    assert!(run.stdout.contains("used: lib/main.dart:1:20"));
    assert!(run.stdout.contains("de           1        1      0          0  ✘"));

    Ok(())
}

#[test]
fn test_check_extra_key() -> Result<()> {
    let test = project(
        r#"{"common": {"yes": "Yes"}}"#,
        r#"{"common": {"yes": "Ja", "old": "Alt"}}"#,
    )?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("error: \"common.old\"  extra-key"));
    assert!(run.stdout.contains("in de (\"Alt\")"));

    Ok(())
}

#[test]
fn test_check_unknown_key() -> Result<()> {
    let test = CliTest::with_project(
        "Widget b() => Text('auth.gone'.tr());\n",
        r#"{"common": {"yes": "Yes"}}"#,
    )?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("error: \"auth.gone\"  unknown-key"));
    assert!(run.stdout.contains("Only the reference locale 'en' exists (1 keys)."));

    Ok(())
}

#[test]
fn test_check_untranslated_is_warning() -> Result<()> {
    let test = project(
        r#"{"common": {"yes": "Yes", "brand": "CrowdWave", "ok": "Okay"}}"#,
        r#"{"common": {"yes": "Ja", "brand": "CrowdWave", "ok": "Okay"}}"#,
    )?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code, Some(0));
    assert!(run.stdout.contains("warning: \"common.ok\"  untranslated"));
    assert!(run.stdout.contains("identical in: de"));
    assert!(!run.stdout.contains("\"common.brand\""));

    Ok(())
}

#[test]
fn test_check_locale_parse_error() -> Result<()> {
    let test = project(r#"{"common": {"yes": "Yes"}}"#, "{ not json")?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("parse-error"));
    assert!(run.stdout.contains("assets/translations/de.json"));
    assert!(run.stderr.contains("1 locale file(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_check_reference_parse_error_is_fatal() -> Result<()> {
    let test = project("{ not json", r#"{"common": {"yes": "Ja"}}"#)?;

    let run = test.run(&["check"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("Reference locale 'en' could not be loaded"));
    assert!(run.stdout.is_empty());

    Ok(())
}

#[test]
fn test_check_reference_locale_override() -> Result<()> {
    let test = project(
        r#"{"common": {"yes": "Yes"}}"#,
        r#"{"common": {"yes": "Ja", "no": "Nein"}}"#,
    )?;

    let run = test.run(&["check", "--reference-locale", "de"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("error: \"common.no\"  missing-key"));
    assert!(run.stdout.contains("missing in: en"));

    Ok(())
}
