use super::ARG_YES;
use clap::{Arg, ArgAction, Command};

pub const ARG_ID: &str = "id";
pub const ARG_NAME: &str = "name";

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("Group id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

#[must_use]
pub fn subcommand() -> Command {
    Command::new("groups")
        .about("Manage groups")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("list").about("List groups"))
        .subcommand(
            Command::new("create")
                .about("Create a group")
                .arg(Arg::new(ARG_NAME).help("Group name").required(true)),
        )
        .subcommand(
            Command::new("rename")
                .about("Rename a group")
                .arg(id_arg())
                .arg(Arg::new(ARG_NAME).help("New name").required(true)),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a group and all its tasks")
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
