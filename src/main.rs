use clap::Parser;
use habitual::cli::{
    handle_habit_add, handle_habit_complete, handle_habit_delete, handle_habit_entries,
    handle_habit_get, handle_habit_list, handle_habit_log, handle_habit_tag, handle_habit_tags,
    handle_habit_untag, handle_habit_update, handle_serve, handle_tag_add, handle_tag_delete,
    handle_tag_get, handle_tag_habits, handle_tag_list, handle_tag_update, load_config, Cli,
    Commands, HabitAction, TagAction,
};
use tracing_subscriber::EnvFilter;

fn init_tracing(serving: bool) {
    let default = if serving { "habitual=info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Serve { .. }));

    let config = match load_config(cli.config.as_deref(), cli.db) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Serve { bind } => handle_serve(config, bind),
        Commands::Habit(cmd) => match cmd.action {
            HabitAction::Add {
                name,
                description,
                frequency,
                target,
                inactive,
                json,
            } => handle_habit_add(&config, name, description, frequency, target, inactive, json),
            HabitAction::List { tag, json } => handle_habit_list(&config, tag, json),
            HabitAction::Get { id, json } => handle_habit_get(&config, id, json),
            HabitAction::Update {
                id,
                name,
                description,
                frequency,
                target,
                active,
                json,
            } => handle_habit_update(
                &config,
                id,
                name,
                description,
                frequency,
                target,
                active,
                json,
            ),
            HabitAction::Delete { id } => handle_habit_delete(&config, id),
            HabitAction::Log { id, note, json } => handle_habit_log(&config, id, note, json),
            HabitAction::Complete { id, note, json } => {
                handle_habit_complete(&config, id, note, json)
            }
            HabitAction::Entries { id, json } => handle_habit_entries(&config, id, json),
            HabitAction::Tag { id, tag } => handle_habit_tag(&config, id, tag),
            HabitAction::Untag { id, tag } => handle_habit_untag(&config, id, tag),
            HabitAction::Tags { id, json } => handle_habit_tags(&config, id, json),
        },
        Commands::Tag(cmd) => match cmd.action {
            TagAction::Add { name, color, json } => handle_tag_add(&config, name, color, json),
            TagAction::List { json } => handle_tag_list(&config, json),
            TagAction::Get { id, json } => handle_tag_get(&config, id, json),
            TagAction::Update {
                id,
                name,
                color,
                json,
            } => handle_tag_update(&config, id, name, color, json),
            TagAction::Delete { id } => handle_tag_delete(&config, id),
            TagAction::Habits { id, json } => handle_tag_habits(&config, id, json),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
