use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, Command};

use crate::action::*;
use crate::core::get_version_string;

/// Build the `uemacs` argument parser.
pub(super) fn build_cli() -> Command {
    Command::new("uemacs")
        .about("open Unreal Engine projects and source files in Emacs")
        .version(get_version_string())
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand_value_name("subcommand")
        .disable_help_subcommand(true)
        .disable_version_flag(true)
        .args([build_accessor_arg(), build_project_arg()])
        .subcommands([
            get_goto_cmd(),
            get_list_cmd(),
            get_open_cmd(),
            get_save_cmd(),
            get_solution_cmd(),
            get_status_cmd(),
            Command::new(VERSION).about("show version info"),
        ])
}

fn build_accessor_arg() -> Arg {
    Arg::new("accessor")
        .long("accessor")
        .short('a')
        .global(true)
        .value_name("identifier")
        .help("the source code accessor to use instead of the configured one")
}

fn build_project_arg() -> Arg {
    Arg::new("project")
        .long("project")
        .short('p')
        .global(true)
        .value_name("file")
        .value_parser(value_parser!(PathBuf))
        .help("the .uproject file, instead of the first one in the working directory")
}

fn get_goto_cmd() -> Command {
    Command::new(GOTO)
        .about("open a file at a line and column")
        .arg_required_else_help(true)
        .arg(
            Arg::new("file")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("the file to open"),
        )
        .arg(
            Arg::new("line")
                .required(true)
                .value_parser(value_parser!(u32))
                .help("the line to move point to"),
        )
        .arg(
            Arg::new("column")
                .value_parser(value_parser!(u32))
                .help("the column to move point to, 0 if omitted"),
        )
        .visible_alias("g")
}

fn get_list_cmd() -> Command {
    Command::new(LIST)
        .about("list all known source code accessors")
        .visible_alias("l")
}

fn get_open_cmd() -> Command {
    Command::new(OPEN)
        .about("open one or more files")
        .arg_required_else_help(true)
        .arg(
            Arg::new("files")
                .num_args(1..)
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("the files to open"),
        )
        .visible_alias("o")
}

fn get_save_cmd() -> Command {
    Command::new(SAVE).about("save all open documents")
}

fn get_solution_cmd() -> Command {
    Command::new(SOLUTION)
        .about("open the project")
        .arg(
            Arg::new("path")
                .value_parser(value_parser!(PathBuf))
                .help("the project descriptor to open instead of the current project"),
        )
        .visible_alias("sln")
}

fn get_status_cmd() -> Command {
    Command::new(STATUS)
        .about("show whether and where the editor was found")
        .arg(
            Arg::new("json")
                .long("json")
                .help("print the status as JSON")
                .action(ArgAction::SetTrue),
        )
        .visible_alias("st")
}
