use super::ARG_YES;
use clap::{builder::BoolishValueParser, Arg, ArgAction, Command};

pub const ARG_ID: &str = "id";
pub const ARG_TITLE: &str = "title";
pub const ARG_DESCRIPTION: &str = "description";
pub const ARG_GROUP: &str = "group";
pub const ARG_COMPLETED: &str = "completed";

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("Task id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

fn group_arg() -> Arg {
    Arg::new(ARG_GROUP)
        .short('g')
        .long("group")
        .help("Group id")
        .value_parser(clap::value_parser!(i64))
}

fn description_arg() -> Arg {
    Arg::new(ARG_DESCRIPTION)
        .short('d')
        .long("description")
        .help("Task description")
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new("tasks")
        .about("Manage tasks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("list")
                .about("List tasks")
                .arg(group_arg().help("Only tasks of this group"))
                .arg(
                    Arg::new(ARG_COMPLETED)
                        .short('c')
                        .long("completed")
                        .help("Only completed (true) or pending (false) tasks")
                        .value_parser(BoolishValueParser::new()),
                ),
        )
        .subcommand(
            Command::new("create")
                .about("Create a task")
                .arg(Arg::new(ARG_TITLE).help("Task title").required(true))
                .arg(group_arg().required(true))
                .arg(description_arg()),
        )
        .subcommand(
            Command::new("edit")
                .about("Change title, description or group of a task")
                .arg(id_arg())
                .arg(Arg::new(ARG_TITLE).short('t').long("title").help("New title"))
                .arg(description_arg().help("New description"))
                .arg(group_arg().help("Move to this group")),
        )
        .subcommand(
            Command::new("done")
                .about("Mark a task as completed")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("undo")
                .about("Mark a task as pending")
                .arg(id_arg()),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a task")
                .arg(id_arg())
                .arg(
                    Arg::new(ARG_YES)
                        .short('y')
                        .long("yes")
                        .help("Do not ask for confirmation")
                        .action(ArgAction::SetTrue),
                ),
        )
}
