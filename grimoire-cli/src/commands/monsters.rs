use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use grimoire_catalog::Monster;
use grimoire_db::MonsterFilter;

use crate::CliError;

use super::{open_existing_db, truncate_str};

const ABILITY_LABELS: [&str; 6] = ["FOR", "DEX", "CON", "INT", "SAG", "CHA"];

/// List monsters matching the filters.
pub(crate) fn run_monsters(
    db_path: &Path,
    types: Vec<String>,
    search: Option<String>,
) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };

    let filter = MonsterFilter { types, search };
    let monsters = grimoire_db::search_monsters(&conn, &filter)
        .map_err(|e| CliError::database(format!("Failed to search monsters: {}", e)))?;

    if monsters.is_empty() {
        log::info!("No monsters found.");
        return Ok(());
    }

    for monster in &monsters {
        log::info!(
            "  {:>5}  {:<40} {}",
            monster.id.if_supports_color(Stdout, |t| t.dimmed()),
            truncate_str(&monster.record.name, 40),
            monster
                .record
                .monster_type
                .if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    crate::log_blank();
    log::info!("{} monster(s)", monsters.len());

    Ok(())
}

/// Show one monster's stat block.
pub(crate) fn run_monster(db_path: &Path, id: i64) -> Result<(), CliError> {
    let Some(conn) = open_existing_db(db_path)? else {
        return Ok(());
    };

    let monster = grimoire_db::monster_by_id(&conn, id)
        .map_err(|e| CliError::database(format!("Failed to load monster: {}", e)))?
        .ok_or_else(|| CliError::not_found(format!("monster {}", id)))?;

    print_monster(&monster);
    Ok(())
}

fn print_monster(monster: &Monster) {
    let r = &monster.record;
    let content = monster.content();

    log::info!("{}", r.name.if_supports_color(Stdout, |t| t.bold()));
    if !r.monster_type.is_empty() {
        log::info!("  {}", r.monster_type.if_supports_color(Stdout, |t| t.dimmed()));
    }
    if !content.translations.is_empty() {
        log::info!("  [{}]", content.translations.join(", "));
    }
    crate::log_blank();

    for (label, value) in [
        ("Classe d'armure", &r.armor_class),
        ("Points de vie", &r.hit_points),
        ("Vitesse", &r.speed),
    ] {
        if let Some(value) = value {
            log::info!("  {:<16} {}", label, value);
        }
    }

    let scores = [
        (&r.scores.strength, &r.modifiers.strength),
        (&r.scores.dexterity, &r.modifiers.dexterity),
        (&r.scores.constitution, &r.modifiers.constitution),
        (&r.scores.intelligence, &r.modifiers.intelligence),
        (&r.scores.wisdom, &r.modifiers.wisdom),
        (&r.scores.charisma, &r.modifiers.charisma),
    ];
    if scores.iter().any(|(s, _)| s.is_some()) {
        let cells: Vec<String> = ABILITY_LABELS
            .iter()
            .zip(scores)
            .map(|(label, (score, modifier))| {
                let score = score.map(|s| s.to_string()).unwrap_or_else(|| "-".into());
                match modifier {
                    Some(m) => format!("{} {} {}", label, score, m),
                    None => format!("{} {}", label, score),
                }
            })
            .collect();
        crate::log_blank();
        log::info!("  {}", cells.join("  "));
    }

    if !content.details.is_empty() {
        crate::log_blank();
        for (key, value) in &content.details {
            log::info!("  {}: {}", key.if_supports_color(Stdout, |t| t.bold()), value);
        }
    }

    for section in &content.sections {
        crate::log_blank();
        log::info!("{}", section.title.if_supports_color(Stdout, |t| t.underline()));
        for entry in &section.entries {
            if entry.name.is_empty() {
                log::info!("  {}", entry.text);
            } else {
                log::info!(
                    "  {}. {}",
                    entry.name.if_supports_color(Stdout, |t| t.bold()),
                    entry.text,
                );
            }
        }
    }

    if content.sections.is_empty() {
        if let Some(text) = &r.description_text {
            crate::log_blank();
            log::info!("{}", text);
        }
    }

    if let Some(url) = &r.image_url {
        crate::log_blank();
        log::info!("  Image: {}", url.if_supports_color(Stdout, |t| t.cyan()));
    }
    for link in &content.links {
        log::info!("  Lien: {} ({})", link.text, link.href);
    }
}
