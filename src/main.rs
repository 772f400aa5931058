//! Craftops binary entry point.

use craftops::cli::{self, Args, CliCommand};
use craftops::runner::CommandRunner;
use craftops::{logging, remote, BackupJob, Config, ShellRunner};

#[tokio::main]
async fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.help {
        cli::print_help();
        return;
    }

    if args.version {
        cli::print_version();
        return;
    }

    if let Err(e) = run(args).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> craftops::Result<()> {
    let config = Config::load(&args)?;
    logging::init(config.log_filter());

    let Some(command) = args.command.clone() else {
        cli::print_help();
        return Ok(());
    };

    match command {
        CliCommand::Exec(words) => {
            let output = ShellRunner.run(&words.join(" ")).await?;
            print!("{}", output.stdout);
            if !output.stderr.is_empty() {
                eprint!("{}", output.stderr);
            }
        }
        CliCommand::Send(words) => {
            let mut console = remote::connect(&config.remote).await?;
            let response = console.send(&words.join(" ")).await?;
            println!("{}", response);
            console.close().await?;
        }
        CliCommand::Backup => {
            let job = BackupJob::new(config.backup.resolve()?);
            if args.dry_run {
                for line in job.dry_run_backup() {
                    println!("{}", line);
                }
            } else {
                job.backup(&ShellRunner).await?;
            }
        }
        CliCommand::Prune => {
            let job = BackupJob::new(config.backup.resolve()?);
            if args.dry_run {
                for line in job.dry_run_prune() {
                    println!("{}", line);
                }
            } else {
                job.prune(&ShellRunner).await?;
            }
        }
    }

    Ok(())
}
