// SPDX-License-Identifier: MPL-2.0
use mathlens::app::{self, config, paths, services, Flags};
use mathlens::application::history::HistoryStore;
use mathlens::application::search::{run_search, SearchOutcome};
use mathlens::domain::Query;
use mathlens::infrastructure::FileHistoryStorage;
use std::process::ExitCode;

const HELP: &str = "\
Mathlens: math questions answered with text and animation

USAGE:
  mathlens [OPTIONS]

OPTIONS:
  --lang <LOCALE>       UI language (e.g. en-US, fr)
  --config-dir <DIR>    Directory holding settings.toml
  --data-dir <DIR>      Directory holding the query history
  --i18n-dir <DIR>      Directory with extra or overriding .ftl files
  --query <TEXT>        Run one search without a window and print the result
  -h, --help            Print this help

ENVIRONMENT:
  MATHLENS_VIDEO_BASE_URL    Animation backend base URL
  MATHLENS_EXPLANATION_URL   Explanation endpoint
  MATHLENS_LLM_API_KEY       Credential for the completion endpoint
  RUST_LOG                   Log filter (default: info)
";

struct Args {
    flags: Flags,
    query: Option<String>,
}

fn parse_args(args: &mut pico_args::Arguments) -> Result<Args, pico_args::Error> {
    Ok(Args {
        flags: Flags {
            lang: args.opt_value_from_str("--lang")?,
            config_dir: args.opt_value_from_str("--config-dir")?,
            data_dir: args.opt_value_from_str("--data-dir")?,
            i18n_dir: args.opt_value_from_str("--i18n-dir")?,
        },
        query: args.opt_value_from_str("--query")?,
    })
}

fn main() -> ExitCode {
    mathlens::logging::init();

    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        print!("{HELP}");
        return ExitCode::SUCCESS;
    }

    let parsed = match parse_args(&mut args) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    let unused = args.finish();
    if !unused.is_empty() {
        tracing::warn!(?unused, "ignoring unrecognized arguments");
    }

    if let Some(query) = parsed.query {
        return headless(parsed.flags, &query);
    }

    match app::run(parsed.flags) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "application exited with an error");
            ExitCode::FAILURE
        }
    }
}

/// One search without a window. Fails when neither fetch produced anything.
fn headless(flags: Flags, raw: &str) -> ExitCode {
    paths::init_cli_overrides(flags.data_dir, flags.config_dir);

    let Some(query) = Query::parse(raw) else {
        eprintln!("error: the query is empty");
        return ExitCode::from(2);
    };

    let (config, config_warning) = config::load();
    if let Some(key) = config_warning {
        tracing::warn!(key = %key, "settings problem, using defaults where needed");
    }

    let services = match services::build(&config) {
        Ok(services) => services,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let (mut history, _) = HistoryStore::load(Box::new(FileHistoryStorage::new()));
    if let Some(key) = history.append(query.as_str()) {
        tracing::warn!(key = %key, "query not added to history");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = runtime.block_on(run_search(
        services.explanation.as_ref(),
        services.video.as_ref(),
        query,
    ));

    print_outcome(&outcome);

    if outcome.is_total_failure() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_outcome(outcome: &SearchOutcome) {
    println!("Question: {}", outcome.query);
    println!();
    match &outcome.result.explanation {
        Some(explanation) => println!("Explanation:\n{explanation}"),
        None => println!("Explanation: unavailable"),
    }
    println!();
    match &outcome.result.video_url {
        Some(url) => println!("Video: {url}"),
        None => println!("Video: unavailable"),
    }
    for error in &outcome.errors {
        eprintln!("{error}");
    }
}
