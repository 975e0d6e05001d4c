use anyhow::Result;

use crate::CliTest;

fn project() -> Result<CliTest> {
    let test = CliTest::with_project(
        "Widget b() => Text('common.yes'.tr());\n",
        r#"{"common": {"yes": "Yes", "no": "No", "count": "{count}"}}"#,
    )?;
    test.write_file("assets/translations/de.json", r#"{"common": {"yes": "Ja"}}"#)?;
    Ok(test)
}

#[test]
fn test_translate_dry_run() -> Result<()> {
    let test = project()?;

    let run = test.run(&["translate", "--dry-run"])?;

    // Dry run reports the gap and still runs the check.
    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("Would translate 2 key(s) missing in de"));
    assert!(run.stdout.contains("Run without --dry-run to apply."));
    assert!(run.stdout.contains("missing in: de"));

    Ok(())
}

#[test]
fn test_translate_dry_run_new_locale() -> Result<()> {
    let test = project()?;

    let run = test.run(&["translate", "--dry-run", "--locale", "fr"])?;

    assert!(run.stdout.contains("Would translate 3 key(s) missing in fr"));
    assert!(!test.root().join("assets/translations/fr.json").exists());

    Ok(())
}

#[test]
fn test_translate_requires_api_key() -> Result<()> {
    let test = project()?;

    let run = test.run(&["translate"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("GOOGLE_TRANSLATE_API_KEY is not set"));
    assert_eq!(
        test.read_file("assets/translations/de.json")?,
        r#"{"common": {"yes": "Ja"}}"#
    );

    Ok(())
}

#[test]
fn test_translate_rejects_reference_locale() -> Result<()> {
    let test = project()?;

    let run = test.run(&["translate", "--locale", "en"])?;

    assert_eq!(run.code, Some(1));
    assert!(run.stderr.contains("Cannot translate into the reference locale 'en'"));

    Ok(())
}

const API_KEY: &str = "SECRET-KEY-123";

/// Points the provider at a port nobody listens on, without retries.
fn offline_project() -> Result<CliTest> {
    let test = project()?;
    test.write_file(
        ".trsyncrc.json",
        r#"{"provider": {"endpoint": "http://127.0.0.1:9/translate", "maxRetries": 0, "minIntervalMs": 0}}"#,
    )?;
    Ok(test)
}

#[test]
fn test_translate_keeps_source_text_when_provider_fails() -> Result<()> {
    let test = offline_project()?;

    let run = test.run_with_env(&["translate"], &[("GOOGLE_TRANSLATE_API_KEY", API_KEY)])?;

    // Missing keys are filled with the reference text and the file is written.
    assert_eq!(run.code, Some(0));
    assert_eq!(
        test.read_json("assets/translations/de.json")?,
        serde_json::json!({"common": {"yes": "Ja", "no": "No", "count": "{count}"}})
    );
    assert!(
        run.stdout
            .contains("de: filled 2 key(s) (0 translated, 1 kept as is, 1 failed)")
    );
    assert!(run.stdout.contains("warning: de: 1 text(s) left untranslated"));
    // The follow-up check runs on the written file.
    assert!(!run.stdout.contains("missing in: de"));

    Ok(())
}

#[test]
fn test_translate_never_prints_api_key() -> Result<()> {
    let test = offline_project()?;

    let run = test.run_with_env(&["translate"], &[("GOOGLE_TRANSLATE_API_KEY", API_KEY)])?;

    assert!(run.stdout.contains("left untranslated"));
    assert!(!run.stdout.contains(API_KEY));
    assert!(!run.stderr.contains(API_KEY));

    Ok(())
}

#[test]
fn test_translate_skips_unparsable_locale() -> Result<()> {
    let test = offline_project()?;
    let broken = r#"{"common": {"yes": "Oui", "no": "Non",}}"#;
    test.write_file("assets/translations/fr.json", broken)?;

    let run = test.run_with_env(
        &["translate", "--locale", "fr"],
        &[("GOOGLE_TRANSLATE_API_KEY", API_KEY)],
    )?;

    assert_eq!(test.read_file("assets/translations/fr.json")?, broken);
    assert_eq!(run.code, Some(1));
    assert!(run.stdout.contains("parse-error"));

    Ok(())
}
