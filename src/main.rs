use clap::{
    crate_authors, crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches,
    Command,
};
use colored::Colorize;
use paragen::{
    api::{self, RunOutcome},
    builder::BuildReport,
    config::ParaStructure,
};
use std::path::Path;

/// Exit code when the base validated but one or more entries still failed.
/// Clean runs and dry runs exit 0; fatal errors exit 1 via miette.
const EXIT_PARTIAL_FAILURE: i32 = 2;

/// Width of the decorative separators around the printed tree.
const SEPARATOR_WIDTH: usize = 60;

// The CLI layer should only parse inputs and forward them to library code.
fn main() -> miette::Result<()> {
    let matches = Command::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("create")
                .about("Generates the PARA structure under the base directory")
                .arg(
                    Arg::new("base")
                        .short('b')
                        .long("base")
                        .help("Base directory for generating the structure")
                        .default_value("."),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Load the structure definition from a TOML file instead of the embedded one"),
                )
                .arg(
                    Arg::new("dry-run")
                        .long("dry-run")
                        .help("Preview the tree without touching the filesystem")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .get_matches();

    let mut logger = env_logger::Builder::from_default_env();
    if matches.get_flag("verbose") {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    match matches.subcommand() {
        Some(("create", args)) => handle_create(args),
        _ => unreachable!(),
    }
}

fn handle_create(args: &ArgMatches) -> miette::Result<()> {
    let base = args.get_one::<String>("base").expect("base has a default");
    let preview_only = args.get_flag("dry-run");

    let structure = match args.get_one::<String>("config") {
        Some(path) => ParaStructure::from_file(path)?,
        None => ParaStructure::embedded()?,
    };

    if preview_only {
        println!("Previewing PARA structure for: {}", base);
    } else if base == "." {
        println!("Generating PARA structure in the current directory");
    } else {
        println!("Generating PARA structure in: {}", base);
    }

    match api::run(&structure, Path::new(base), preview_only)? {
        RunOutcome::Preview(tree) => {
            print_tree(&tree);

            println!("{}", "Dry run: nothing was created.".yellow());

            Ok(())
        }
        RunOutcome::Applied { report, tree } => {
            print_tree(&tree);
            print_summary(&report);

            if report.is_clean() {
                println!("{}", "PARA structure generated successfully!".green());

                Ok(())
            } else {
                std::process::exit(EXIT_PARTIAL_FAILURE);
            }
        }
    }
}

fn print_tree(tree: &str) {
    let separator = "=".repeat(SEPARATOR_WIDTH);

    println!("\n{}\n", separator);
    print!("{}", tree);
    println!("\n{}\n", separator);
}

fn print_summary(report: &BuildReport) {
    for (name, outcome) in report.iter() {
        match outcome {
            Ok(()) => println!("{} {}", "created".green(), name),
            Err(error) => println!("{} {}: {}", "failed".red(), name, error),
        }
    }
}
