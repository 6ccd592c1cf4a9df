use std::path::PathBuf;

use super::datastructure::{Arguments, Column, File, Files, Json, Line, Subcommand};
use crate::action::*;

const ARGS_CONSISTENT: &str = "argument declaration and parsing must be consistent";

pub(super) fn parse(args: &clap::ArgMatches) -> Arguments {
    let (name, sub_args) = args.subcommand().expect("prevented by clap");

    let subcommand = match name {
        GOTO => Subcommand::Goto(
            File(get_one_arg(sub_args, "file")),
            Line(get_one_arg(sub_args, "line")),
            Column(sub_args.get_one::<u32>("column").copied()),
        ),
        LIST => Subcommand::List,
        OPEN => Subcommand::Open(get_files(sub_args)),
        SAVE => Subcommand::Save,
        SOLUTION => Subcommand::Solution(sub_args.get_one::<PathBuf>("path").cloned()),
        STATUS => Subcommand::Status(Json(get_one_arg(sub_args, "json"))),
        VERSION => Subcommand::Version,
        value => panic!("main subcommand was not matched: {value:?}"),
    };

    Arguments {
        accessor: get_global_arg(args, sub_args, "accessor"),
        project: get_global_arg(args, sub_args, "project"),
        subcommand,
    }
}

fn get_one_arg<T>(args: &clap::ArgMatches, id: &str) -> T
where
    T: std::any::Any + Clone + Sync + Send + 'static,
{
    args.get_one::<T>(id).expect(ARGS_CONSISTENT).to_owned()
}

/// Global arguments may be given before or after the subcommand.
fn get_global_arg<T>(args: &clap::ArgMatches, sub_args: &clap::ArgMatches, id: &str) -> Option<T>
where
    T: std::any::Any + Clone + Sync + Send + 'static,
{
    sub_args
        .get_one::<T>(id)
        .or_else(|| args.get_one::<T>(id))
        .cloned()
}

fn get_files(args: &clap::ArgMatches) -> Files {
    Files(
        args.get_many::<PathBuf>("files")
            .expect(ARGS_CONSISTENT)
            .cloned()
            .collect(),
    )
}
