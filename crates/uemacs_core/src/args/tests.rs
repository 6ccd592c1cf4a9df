use std::path::PathBuf;

use super::cli::build_cli;
use super::datastructure::*;
use super::parsing::parse;

use rstest::rstest;

fn subcommand(subcommand: Subcommand) -> Arguments {
    Arguments {
        accessor: None,
        project: None,
        subcommand,
    }
}

#[rstest]
#[case(vec!["uemacs", "list"], subcommand(Subcommand::List))]
#[case(vec!["uemacs", "l"], subcommand(Subcommand::List))]
#[case(vec!["uemacs", "version"], subcommand(Subcommand::Version))]
#[case(vec!["uemacs", "save"], subcommand(Subcommand::Save))]
#[case(vec!["uemacs", "status"], subcommand(Subcommand::Status(Json(false))))]
#[case(vec!["uemacs", "st", "--json"], subcommand(Subcommand::Status(Json(true))))]
#[case(vec!["uemacs", "solution"], subcommand(Subcommand::Solution(None)))]
#[case(vec!["uemacs", "sln", "/g/Game.uproject"],
       subcommand(Subcommand::Solution(Some(PathBuf::from("/g/Game.uproject")))))]
#[case(vec!["uemacs", "goto", "/a/b.cpp", "42", "7"],
       subcommand(Subcommand::Goto(File(PathBuf::from("/a/b.cpp")), Line(42), Column(Some(7)))))]
#[case(vec!["uemacs", "g", "/a/b.cpp", "42"],
       subcommand(Subcommand::Goto(File(PathBuf::from("/a/b.cpp")), Line(42), Column(None))))]
#[case(vec!["uemacs", "open", "/a.cpp", "/b.cpp"],
       subcommand(Subcommand::Open(Files(vec![PathBuf::from("/a.cpp"), PathBuf::from("/b.cpp")]))))]
fn arg_parsing(#[case] input: Vec<&str>, #[case] expected: Arguments) {
    let args = build_cli().get_matches_from(input);
    let parsed = parse(&args);

    assert_eq!(parsed, expected);
}

#[rstest]
#[case(vec!["uemacs", "--accessor", "UnrealEmacs", "-p", "Game.uproject", "save"])]
#[case(vec!["uemacs", "save", "--accessor", "UnrealEmacs", "--project", "Game.uproject"])]
fn global_args_before_or_after_subcommand(#[case] input: Vec<&str>) {
    let args = build_cli().get_matches_from(input);
    let parsed = parse(&args);

    assert_eq!(
        parsed,
        Arguments {
            accessor: Some("UnrealEmacs".to_string()),
            project: Some(PathBuf::from("Game.uproject")),
            subcommand: Subcommand::Save,
        }
    );
}

#[rstest]
#[should_panic]
#[case(vec!["uemacs", "goto", "/a/b.cpp"], "line missing")]
#[should_panic]
#[case(vec!["uemacs", "goto", "/a/b.cpp", "forty-two"], "line is not a number")]
#[should_panic]
#[case(vec!["uemacs", "open"], "files missing")]
#[should_panic]
#[case(vec!["uemacs"], "subcommand missing")]
fn arg_parsing_invalid(#[case] input: Vec<&str>, #[case] err_msg: &str) {
    build_cli().try_get_matches_from(input).expect(err_msg);
}

#[test]
fn cli_definition_is_consistent() {
    build_cli().debug_assert();
}
