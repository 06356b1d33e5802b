use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use git_release_tag::cli::{run_release_workflow, ReleaseOptions, ReleaseOutcome};
use git_release_tag::config;
use git_release_tag::domain::BumpLevel;
use git_release_tag::git::{Repository, SystemGit};
use git_release_tag::ui::{self, PresetAnswers, StdinAnswers};
use git_release_tag::ReleaseError;

#[derive(clap::Parser)]
#[command(
    name = "git-release-tag",
    version,
    about = "Bump the version from the latest git tag, check embedded versions, then commit and tag"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Bump level: major, minor or patch (or 1/2/3)")]
    bump: Option<String>,

    #[arg(short, long, help = "Commit message")]
    message: Option<String>,

    #[arg(short, long, help = "Continue without asking when the working tree is dirty")]
    yes: bool,

    #[arg(long, help = "Check everything but do not commit or tag")]
    dry_run: bool,

    #[arg(short, long, help = "Show the git commands being run")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    } else if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    if let Err(err) = run(args) {
        let code = match err.downcast_ref::<ReleaseError>() {
            Some(release_err) => {
                ui::display_error(&release_err.display_with_suggestions());
                release_err.exit_code()
            }
            None => {
                ui::display_error(&format!("{:#}", err));
                1
            }
        };
        std::process::exit(code);
    }
}

fn run(args: Args) -> Result<()> {
    let bump = args
        .bump
        .as_deref()
        .map(str::parse::<BumpLevel>)
        .transpose()?;

    let repo = SystemGit::discover(".")?;
    let config = config::load_config(args.config.as_deref(), repo.workdir())?;

    let mut answers = PresetAnswers::new(StdinAnswers::new())
        .bump(bump)
        .message(args.message)
        .assume_yes(args.yes);

    let options = ReleaseOptions {
        dry_run: args.dry_run,
    };

    match run_release_workflow(&repo, &config, &mut answers, options)? {
        ReleaseOutcome::Released(committed) => {
            println!("\nDone. Released {}.", committed.tag);
            ui::display_push_hint(&config.push_remote);
        }
        ReleaseOutcome::Planned { tag, .. } => {
            ui::display_status(&format!("Dry run complete; {} was not created", tag));
        }
        ReleaseOutcome::Cancelled => {}
    }

    Ok(())
}
