use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::api;
use crate::config::Config;
use crate::entity::{EntryDraft, Habit, HabitDraft, HabitEntry, HabitPatch, Tag, TagDraft, TagPatch};
use crate::error::{HabitualError, Result};
use crate::storage::{Database, HabitStore, TagStore};
use crate::workflow;

const MIN_ID_PREFIX_LENGTH: usize = 4;

/// Load configuration, letting `--db` / `HABITUAL_DB` override the database path.
pub fn load_config(path: Option<&Path>, db: Option<PathBuf>) -> Result<Config> {
    let mut config = Config::load(path)?;
    if let Some(db) = db {
        config.database.path = db;
    }
    config.validate()?;
    Ok(config)
}

fn open_stores(config: &Config) -> Result<(HabitStore, TagStore)> {
    let db = Database::open(&config.database)?;
    Ok((HabitStore::new(db.clone()), TagStore::new(db)))
}

fn short(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Match a full UUID or a unique prefix of one.
fn pick_by_prefix<T>(input: &str, candidates: Vec<T>, id_of: impl Fn(&T) -> Uuid) -> Result<T> {
    if input.len() < MIN_ID_PREFIX_LENGTH {
        return Err(HabitualError::EntityNotFound(input.to_string()));
    }
    let input = input.to_lowercase();
    let mut matches: Vec<T> = candidates
        .into_iter()
        .filter(|c| id_of(c).to_string().starts_with(&input))
        .collect();
    match matches.len() {
        0 => Err(HabitualError::EntityNotFound(input)),
        1 => Ok(matches.remove(0)),
        _ => Err(HabitualError::AmbiguousId(input)),
    }
}

fn resolve_habit(store: &HabitStore, input: &str) -> Result<Habit> {
    if let Ok(id) = Uuid::parse_str(input) {
        return workflow::require_habit(store, id);
    }
    pick_by_prefix(input, store.list()?, |h| h.id)
}

fn resolve_tag(store: &TagStore, input: &str) -> Result<Tag> {
    if let Ok(id) = Uuid::parse_str(input) {
        return workflow::require_tag(store, id);
    }
    pick_by_prefix(input, store.list()?, |t| t.id)
}

fn print_habit_line(h: &Habit) {
    let state = if h.is_active { "active" } else { "inactive" };
    println!(
        "  ({}) [{} x{}|{}] {}",
        short(&h.id),
        h.frequency,
        h.target_count,
        state,
        h.name
    );
}

fn print_habits(habits: &[Habit], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(habits)?);
    } else if habits.is_empty() {
        println!("No habits found.");
    } else {
        println!("Habits:\n");
        for h in habits {
            print_habit_line(h);
        }
    }
    Ok(())
}

fn print_tags(tags: &[Tag], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tags)?);
    } else if tags.is_empty() {
        println!("No tags found.");
    } else {
        println!("Tags:\n");
        for t in tags {
            if t.color.is_empty() {
                println!("  ({}) {}", short(&t.id), t.name);
            } else {
                println!("  ({}) {} {}", short(&t.id), t.name, t.color);
            }
        }
    }
    Ok(())
}

fn print_entry(verb: &str, habit: &Habit, entry: &HabitEntry, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    } else {
        println!(
            "{} {} ({}) at {}",
            verb,
            habit.name,
            short(&habit.id),
            entry.completed_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}

pub fn handle_serve(mut config: Config, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
        config.validate()?;
    }
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(api::serve(&config))
}

pub fn handle_habit_add(
    config: &Config,
    name: String,
    description: String,
    frequency: String,
    target: u32,
    inactive: bool,
    json: bool,
) -> Result<()> {
    let (habits, _) = open_stores(config)?;

    let habit = habits.create(HabitDraft {
        name,
        description,
        frequency,
        target_count: target,
        is_active: !inactive,
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&habit)?);
    } else {
        println!("Created habit ({}) - {}", short(&habit.id), habit.name);
    }
    Ok(())
}

pub fn handle_habit_list(config: &Config, tag: Option<String>, json: bool) -> Result<()> {
    let (habits, tags) = open_stores(config)?;

    let list = match tag {
        Some(tag) => {
            let tag = resolve_tag(&tags, &tag)?;
            habits.habits_by_tag(tag.id)?
        }
        None => habits.list()?,
    };
    print_habits(&list, json)
}

pub fn handle_habit_get(config: &Config, id: String, json: bool) -> Result<()> {
    let (habits, _) = open_stores(config)?;
    let habit = resolve_habit(&habits, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&habit)?);
        return Ok(());
    }

    let tags = habits.tags_for_habit(habit.id)?;
    let entries = habits.entries(habit.id)?;

    println!("{}", habit.name);
    println!("  id:          {}", habit.id);
    if !habit.description.is_empty() {
        println!("  description: {}", habit.description);
    }
    println!("  frequency:   {} (target {})", habit.frequency, habit.target_count);
    println!("  active:      {}", habit.is_active);
    if !tags.is_empty() {
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        println!("  tags:        {}", names.join(", "));
    }
    println!("  entries:     {}", entries.len());
    println!("  created:     {}", habit.created_at.to_rfc3339());
    println!("  updated:     {}", habit.updated_at.to_rfc3339());
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn handle_habit_update(
    config: &Config,
    id: String,
    name: Option<String>,
    description: Option<String>,
    frequency: Option<String>,
    target: Option<u32>,
    active: Option<bool>,
    json: bool,
) -> Result<()> {
    let (habits, _) = open_stores(config)?;
    let habit = resolve_habit(&habits, &id)?;

    let patch = HabitPatch {
        name,
        description,
        frequency,
        target_count: target,
        is_active: active,
    };
    if patch.is_empty() {
        eprintln!("Nothing to update.");
        return Ok(());
    }

    let updated = workflow::update_habit(&habits, habit.id, patch)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!("Updated habit ({}) - {}", short(&updated.id), updated.name);
    }
    Ok(())
}

pub fn handle_habit_delete(config: &Config, id: String) -> Result<()> {
    let (habits, _) = open_stores(config)?;
    let habit = resolve_habit(&habits, &id)?;

    habits.delete(habit.id)?;
    println!("Deleted habit ({}) - {}", short(&habit.id), habit.name);
    Ok(())
}

pub fn handle_habit_log(config: &Config, id: String, note: Option<String>, json: bool) -> Result<()> {
    let (habits, _) = open_stores(config)?;
    let habit = resolve_habit(&habits, &id)?;

    let entry = habits.log_completion(EntryDraft {
        habit_id: habit.id,
        note,
    })?;
    print_entry("Logged", &habit, &entry, json)
}

pub fn handle_habit_complete(
    config: &Config,
    id: String,
    note: Option<String>,
    json: bool,
) -> Result<()> {
    let (habits, _) = open_stores(config)?;
    let habit = resolve_habit(&habits, &id)?;

    let entry = workflow::complete_habit(&habits, habit.id, note)?;
    print_entry("Completed", &habit, &entry, json)
}

pub fn handle_habit_entries(config: &Config, id: String, json: bool) -> Result<()> {
    let (habits, _) = open_stores(config)?;
    let habit = resolve_habit(&habits, &id)?;
    let entries = habits.entries(habit.id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No entries for {}.", habit.name);
    } else {
        println!("Entries for {}:\n", habit.name);
        for e in &entries {
            match &e.note {
                Some(note) => println!(
                    "  {} - {}",
                    e.completed_at.format("%Y-%m-%d %H:%M:%S"),
                    note
                ),
                None => println!("  {}", e.completed_at.format("%Y-%m-%d %H:%M:%S")),
            }
        }
    }
    Ok(())
}

pub fn handle_habit_tag(config: &Config, id: String, tag: String) -> Result<()> {
    let (habits, tags) = open_stores(config)?;
    let habit = resolve_habit(&habits, &id)?;
    let tag = resolve_tag(&tags, &tag)?;

    habits.attach(habit.id, tag.id)?;
    println!("Tagged {} with {}", habit.name, tag.name);
    Ok(())
}

pub fn handle_habit_untag(config: &Config, id: String, tag: String) -> Result<()> {
    let (habits, tags) = open_stores(config)?;
    let habit = resolve_habit(&habits, &id)?;
    let tag = resolve_tag(&tags, &tag)?;

    habits.detach(habit.id, tag.id)?;
    println!("Removed tag {} from {}", tag.name, habit.name);
    Ok(())
}

pub fn handle_habit_tags(config: &Config, id: String, json: bool) -> Result<()> {
    let (habits, _) = open_stores(config)?;
    let habit = resolve_habit(&habits, &id)?;
    print_tags(&habits.tags_for_habit(habit.id)?, json)
}

pub fn handle_tag_add(config: &Config, name: String, color: String, json: bool) -> Result<()> {
    let (_, tags) = open_stores(config)?;
    let tag = tags.create(TagDraft { name, color })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tag)?);
    } else {
        println!("Created tag ({}) - {}", short(&tag.id), tag.name);
    }
    Ok(())
}

pub fn handle_tag_list(config: &Config, json: bool) -> Result<()> {
    let (_, tags) = open_stores(config)?;
    print_tags(&tags.list()?, json)
}

pub fn handle_tag_get(config: &Config, id: String, json: bool) -> Result<()> {
    let (_, tags) = open_stores(config)?;
    let tag = resolve_tag(&tags, &id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tag)?);
    } else {
        println!("{}", tag.name);
        println!("  id:      {}", tag.id);
        if !tag.color.is_empty() {
            println!("  color:   {}", tag.color);
        }
        println!("  created: {}", tag.created_at.to_rfc3339());
        println!("  updated: {}", tag.updated_at.to_rfc3339());
    }
    Ok(())
}

pub fn handle_tag_update(
    config: &Config,
    id: String,
    name: Option<String>,
    color: Option<String>,
    json: bool,
) -> Result<()> {
    let (_, tags) = open_stores(config)?;
    let tag = resolve_tag(&tags, &id)?;

    let patch = TagPatch { name, color };
    if patch.is_empty() {
        eprintln!("Nothing to update.");
        return Ok(());
    }

    let updated = workflow::update_tag(&tags, tag.id, patch)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&updated)?);
    } else {
        println!("Updated tag ({}) - {}", short(&updated.id), updated.name);
    }
    Ok(())
}

pub fn handle_tag_delete(config: &Config, id: String) -> Result<()> {
    let (_, tags) = open_stores(config)?;
    let tag = resolve_tag(&tags, &id)?;

    tags.delete(tag.id)?;
    println!("Deleted tag ({}) - {}", short(&tag.id), tag.name);
    Ok(())
}

pub fn handle_tag_habits(config: &Config, id: String, json: bool) -> Result<()> {
    let (habits, tags) = open_stores(config)?;
    let tag = resolve_tag(&tags, &id)?;
    print_habits(&habits.habits_by_tag(tag.id)?, json)
}
