use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use skugen_core::{derive_sku, EditorState, Sku, SaveTrigger};
use skugen_store::{utc_now_rfc3339, HistoryStore, Settings};

use crate::effects::{AutoConfirm, EffectRunner, FormSnapshot, StdinPrompter};

#[derive(Serialize)]
struct DerivedRow<'a> {
    title: &'a str,
    sku: Option<String>,
}

#[derive(Serialize)]
struct HistoryRow<'a> {
    title: &'a str,
    sku: &'a str,
    recorded_at: &'a str,
}

pub fn derive(
    titles: &[String],
    json: bool,
    out: &mut dyn Write,
    err_out: &mut dyn Write,
) -> Result<()> {
    let mut failures = 0usize;
    let mut rows = Vec::with_capacity(titles.len());
    for title in titles {
        match derive_sku(title) {
            Ok(sku) => rows.push(DerivedRow {
                title,
                sku: Some(sku.into_string()),
            }),
            Err(err) => {
                failures += 1;
                writeln!(err_out, "cannot generate SKU: {err}")?;
                rows.push(DerivedRow { title, sku: None });
            }
        }
    }

    if json {
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
    } else {
        for row in rows.iter().filter(|row| row.sku.is_some()) {
            writeln!(out, "{}", row.sku.as_deref().unwrap_or_default())?;
        }
    }

    if failures > 0 {
        bail!("{failures} title(s) could not produce a SKU");
    }
    Ok(())
}

pub fn save(
    settings: &Settings,
    title: &str,
    sku: Option<&str>,
    trigger: SaveTrigger,
    assume_yes: bool,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let store = HistoryStore::new(&settings.history_path, settings.history_capacity);
    let clock = utc_now_rfc3339;
    let state = if settings.require_confirmation {
        EditorState::new()
    } else {
        EditorState::new().without_confirmation()
    };

    let form = if assume_yes {
        EffectRunner::new(AutoConfirm, &store, &clock).run_save(state, title, sku, trigger)
    } else {
        let prompter = StdinPrompter::new(io::stdin().lock(), io::stderr());
        EffectRunner::new(prompter, &store, &clock).run_save(state, title, sku, trigger)
    };

    print_form(&form, json, out)?;
    if !form.saved {
        bail!("product was not saved");
    }
    Ok(())
}

fn print_form(form: &FormSnapshot, json: bool, out: &mut dyn Write) -> Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut *out, form)?;
        writeln!(out)?;
        return Ok(());
    }
    for notice in &form.notices {
        writeln!(out, "{notice}")?;
    }
    writeln!(out, "title: {}", form.title.trim())?;
    writeln!(out, "sku:   {}", form.sku)?;
    if let Some(suggested) = &form.suggested_sku {
        writeln!(out, "suggested: {suggested}")?;
    }
    writeln!(out, "saved: {}", form.saved)?;
    Ok(())
}

pub fn history(
    settings: &Settings,
    limit: Option<usize>,
    title: Option<&str>,
    json: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let store = HistoryStore::new(&settings.history_path, settings.history_capacity);
    let history = store
        .load()
        .with_context(|| format!("reading history at {:?}", store.path()))?;
    let entries: Vec<_> = match title {
        Some(title) => history.latest_for_title(title).into_iter().collect(),
        None => history.recent(limit.unwrap_or(history.len())),
    };

    if json {
        let rows: Vec<HistoryRow<'_>> = entries
            .iter()
            .map(|entry| HistoryRow {
                title: &entry.title,
                sku: &entry.sku,
                recorded_at: &entry.recorded_at,
            })
            .collect();
        serde_json::to_writer_pretty(&mut *out, &rows)?;
        writeln!(out)?;
        return Ok(());
    }

    if entries.is_empty() {
        writeln!(out, "no SKUs generated yet")?;
    }
    for entry in entries {
        writeln!(out, "{}  {}  {}", entry.recorded_at, entry.sku, entry.title)?;
    }
    Ok(())
}

pub fn clear_history(settings: &Settings, out: &mut dyn Write) -> Result<()> {
    let store = HistoryStore::new(&settings.history_path, settings.history_capacity);
    store
        .clear()
        .with_context(|| format!("clearing history at {:?}", store.path()))?;
    writeln!(out, "history cleared")?;
    Ok(())
}

pub fn check(candidate: &str, out: &mut dyn Write) -> Result<()> {
    let sku: Sku = candidate.parse()?;
    writeln!(out, "{sku} is well-formed")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn settings_in(temp: &TempDir) -> Settings {
        Settings {
            history_path: temp.path().join("history.ron"),
            ..Settings::default()
        }
    }

    #[test]
    fn derive_prints_one_line_per_title() {
        let mut out = Vec::new();
        let mut err_out = Vec::new();
        derive(
            &["Blenko Vase 123".to_string(), "  Widget ".to_string()],
            false,
            &mut out,
            &mut err_out,
        )
        .unwrap();
        assert!(err_out.is_empty());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "GRFG-AGAV-FQD1\nDRF9-ESD6-BLG7\n"
        );
    }

    #[test]
    fn derive_fails_after_reporting_empty_titles() {
        let mut out = Vec::new();
        let mut err_out = Vec::new();
        let result = derive(
            &["  ".to_string(), "Widget".to_string()],
            true,
            &mut out,
            &mut err_out,
        );
        assert!(result.is_err());
        assert_eq!(
            String::from_utf8(err_out).unwrap(),
            "cannot generate SKU: title is empty\n"
        );
        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed[0]["sku"], serde_json::Value::Null);
        assert_eq!(printed[1]["sku"], "DRF9-ESD6-BLG7");
    }

    #[test]
    fn save_with_yes_then_history_lists_it() {
        let temp = TempDir::new().unwrap();
        let settings = settings_in(&temp);

        let mut out = Vec::new();
        save(
            &settings,
            "Blenko Vase 123",
            None,
            SaveTrigger::Click,
            true,
            true,
            &mut out,
        )
        .unwrap();
        let form: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(form["sku"], "GRFG-AGAV-FQD1");
        assert_eq!(form["saved"], true);

        let mut out = Vec::new();
        history(&settings, Some(5), None, false, &mut out).unwrap();
        let listing = String::from_utf8(out).unwrap();
        assert!(listing.contains("GRFG-AGAV-FQD1  Blenko Vase 123"), "{listing}");

        let mut out = Vec::new();
        save(&settings, "Widget", None, SaveTrigger::Click, true, false, &mut out).unwrap();
        let mut out = Vec::new();
        history(&settings, None, Some(" Blenko Vase 123 "), true, &mut out).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
        assert_eq!(rows[0]["sku"], "GRFG-AGAV-FQD1");

        let mut out = Vec::new();
        clear_history(&settings, &mut out).unwrap();
        let mut out = Vec::new();
        history(&settings, None, None, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "no SKUs generated yet\n");
    }

    #[test]
    fn save_with_empty_title_is_an_error() {
        let temp = TempDir::new().unwrap();
        let settings = settings_in(&temp);
        let mut out = Vec::new();
        let result = save(&settings, " ", None, SaveTrigger::Click, true, false, &mut out);
        assert!(result.is_err());
        assert!(String::from_utf8(out)
            .unwrap()
            .contains("cannot generate SKU: title is empty"));
    }

    #[test]
    fn check_validates_format() {
        let mut out = Vec::new();
        check("GRFG-AGAV-FQD1", &mut out).unwrap();
        assert!(check("GRFG-AGAV-FQDO", &mut out).is_err());
    }
}
