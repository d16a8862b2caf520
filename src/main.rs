//! pathfit: shorten over-long paths for cloud sync, and undo it again
//!
//! `pathfit rename` walks a sync folder and renames every file or directory
//! whose full path is over budget, logging each rename to a CSV file.
//! `pathfit restore <log>` replays such a log to put the original names back.

use anyhow::Result;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::path::PathBuf;

use goobits_pathfit::commands::rename::{handle_rename_command, ConfigOverrides, RenameOptions};
use goobits_pathfit::commands::restore::{handle_restore_command, RestoreOptions};
use goobits_pathfit::restore::ReplayOrder;

fn build_cli() -> ClapCommand {
    ClapCommand::new("pathfit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Shortens paths that are too long for cloud sync clients")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            ClapCommand::new("rename")
                .about("Rename over-long files and directories and log every rename")
                .arg(
                    Arg::new("root")
                        .long("root")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .help("Tree to process (default: ~/OneDrive)"),
                )
                .arg(
                    Arg::new("max-path")
                        .long("max-path")
                        .value_name("BYTES")
                        .value_parser(value_parser!(usize))
                        .help("Full path budget in bytes (default: 980)"),
                )
                .arg(
                    Arg::new("max-name")
                        .long("max-name")
                        .value_name("BYTES")
                        .value_parser(value_parser!(usize))
                        .help("Single name budget in bytes, extension included (default: 240)"),
                )
                .arg(
                    Arg::new("max-attempts")
                        .long("max-attempts")
                        .value_name("N")
                        .value_parser(value_parser!(u32))
                        .help("Collision suffixes to try before giving up (default: 10000)"),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .value_name("FILE")
                        .value_parser(value_parser!(PathBuf))
                        .help("TOML file with any of root, max_full_path, max_name_bytes, illegal_chars, max_collision_attempts"),
                )
                .arg(
                    Arg::new("log-dir")
                        .long("log-dir")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .default_value(".")
                        .help("Directory for the rename_backup_<timestamp>.csv mapping log, outside the root"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Show what would be renamed without touching anything")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print a JSON summary instead of progress lines")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            ClapCommand::new("restore")
                .about("Put original names back using a mapping log")
                .arg(
                    Arg::new("log")
                        .value_name("LOG")
                        .value_parser(value_parser!(PathBuf))
                        .required(true)
                        .help("Mapping log written by `pathfit rename`"),
                )
                .arg(
                    Arg::new("forward-order")
                        .long("forward-order")
                        .help("Apply rows oldest first instead of newest first")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print a JSON summary instead of progress lines")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn rename_options(matches: &ArgMatches) -> RenameOptions {
    RenameOptions {
        overrides: ConfigOverrides {
            config_file: matches.get_one::<PathBuf>("config").cloned(),
            root: matches.get_one::<PathBuf>("root").cloned(),
            max_full_path: matches.get_one::<usize>("max-path").copied(),
            max_name_bytes: matches.get_one::<usize>("max-name").copied(),
            max_collision_attempts: matches.get_one::<u32>("max-attempts").copied(),
        },
        log_dir: matches
            .get_one::<PathBuf>("log-dir")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(".")),
        dry_run: matches.get_flag("dry-run"),
        json: matches.get_flag("json"),
    }
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("rename", sub)) => handle_rename_command(rename_options(sub)),
        Some(("restore", sub)) => {
            let log = sub
                .get_one::<PathBuf>("log")
                .cloned()
                .unwrap_or_default();
            let order = if sub.get_flag("forward-order") {
                ReplayOrder::Forward
            } else {
                ReplayOrder::Reverse
            };
            handle_restore_command(
                &log,
                RestoreOptions {
                    order,
                    json: sub.get_flag("json"),
                },
            )
        }
        _ => unreachable!("clap requires a subcommand"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_rename_flags_parse() {
        let matches = build_cli()
            .try_get_matches_from([
                "pathfit",
                "rename",
                "--root",
                "/data",
                "--max-path",
                "500",
                "--dry-run",
            ])
            .unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        let options = rename_options(sub);

        assert_eq!(options.overrides.root, Some(PathBuf::from("/data")));
        assert_eq!(options.overrides.max_full_path, Some(500));
        assert_eq!(options.overrides.max_name_bytes, None);
        assert_eq!(options.log_dir, PathBuf::from("."));
        assert!(options.dry_run);
        assert!(!options.json);
    }

    #[test]
    fn test_restore_requires_log() {
        assert!(build_cli()
            .try_get_matches_from(["pathfit", "restore"])
            .is_err());
    }
}
