mod commands;
mod handlers;

pub use commands::{Cli, Commands, HabitAction, HabitCommand, TagAction, TagCommand};
pub use handlers::{
    handle_habit_add, handle_habit_complete, handle_habit_delete, handle_habit_entries,
    handle_habit_get, handle_habit_list, handle_habit_log, handle_habit_tag, handle_habit_tags,
    handle_habit_untag, handle_habit_update, handle_serve, handle_tag_add, handle_tag_delete,
    handle_tag_get, handle_tag_habits, handle_tag_list, handle_tag_update, load_config,
};
