use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use grimoire_catalog::Spell;
use grimoire_db::SpellFilter;

use crate::CliError;

use super::{open_existing_db, truncate_str};

/// List spells matching the filters.
pub(crate) fn run_spells(
    db_path: &Path,
    classes: Vec<String>,
    levels: Vec<i64>,
    search: Option<String>,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };

    let filter = SpellFilter {
        classes,
        levels,
        search,
    };
    let spells = grimoire_db::search_spells(&conn, &filter)
        .map_err(|e| CliError::database(format!("Failed to search spells: {}", e)))?;

    if spells.is_empty() {
        log::info!("No spells found.");
        return Ok(());
    }

    for spell in &spells {
        log::info!(
            "  {:>5}  {}  {:<36} {}",
            spell.id.if_supports_color(Stdout, |t| t.dimmed()),
            level_label(spell.record.level),
            truncate_str(&spell.record.name, 36),
            spell.classes.join(", ").if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    crate::log_blank();
    log::info!("{} spell(s)", spells.len());

    Ok(())
}

/// Show one spell in full.
pub(crate) fn run_spell(db_path: &Path, id: i64) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };

    let spell = grimoire_db::spell_by_id(&conn, id)
        .map_err(|e| CliError::database(format!("Failed to load spell: {}", e)))?
        .ok_or_else(|| CliError::not_found(format!("spell {}", id)))?;

    print_spell(&spell);
    Ok(())
}

fn level_label(level: i64) -> String {
    if level == 0 {
        "tour de magie".to_string()
    } else {
        format!("niveau {}", level)
    }
}

fn print_spell(spell: &Spell) {
    let r = &spell.record;

    log::info!("{}", r.name.if_supports_color(Stdout, |t| t.bold()));
    let mut tags = vec![level_label(r.level), r.school.clone()];
    if r.ritual {
        tags.push("rituel".to_string());
    }
    if r.concentration {
        tags.push("concentration".to_string());
    }
    log::info!("  {}", tags.join(" · ").if_supports_color(Stdout, |t| t.dimmed()));
    if !spell.classes.is_empty() {
        log::info!("  Classes: {}", spell.classes.join(", "));
    }
    crate::log_blank();

    let casting_time = join_parts(&[
        r.casting_time_value.map(|v| v.to_string()),
        r.casting_time_unit.clone(),
        r.casting_time_condition.clone(),
    ]);
    let range = join_parts(&[
        r.range_type.clone(),
        r.range_value.map(|v| v.to_string()),
        r.range_unit.clone(),
        r.range_shape.clone(),
    ]);
    let duration = join_parts(&[
        r.duration_type.clone(),
        r.duration_value.map(|v| v.to_string()),
        r.duration_unit.clone(),
    ]);

    print_field("Incantation", &casting_time);
    print_field("Portée", &range);
    print_field("Durée", &duration);
    if let Some(components) = &r.components {
        match &r.materials {
            Some(m) => print_field("Composantes", &format!("{} ({})", components, m)),
            None => print_field("Composantes", components),
        }
    }
    if let Some(source) = &r.source {
        print_field("Source", source);
    }

    if let Some(description) = &r.description {
        crate::log_blank();
        log::info!("{}", description);
    }
    if let Some(higher) = &r.higher_levels {
        crate::log_blank();
        log::info!(
            "{} {}",
            "Aux niveaux supérieurs.".if_supports_color(Stdout, |t| t.bold()),
            higher,
        );
    }

    let scaling: Vec<String> = r
        .scaling
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.as_ref().map(|v| format!("{}: {}", i + 1, v)))
        .collect();
    if !scaling.is_empty() {
        crate::log_blank();
        log::info!("  Par niveau d'emplacement: {}", scaling.join(", "));
    }
}

fn join_parts(parts: &[Option<String>]) -> String {
    parts
        .iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_field(label: &str, value: &str) {
    if !value.is_empty() {
        log::info!("  {:<12} {}", format!("{}:", label), value);
    }
}
