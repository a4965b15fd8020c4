// SPDX-License-Identifier: MPL-2.0
use agri_advisor::config::{self, Config};
use agri_advisor::error::{Error, Result};
use agri_advisor::form::FormInput;
use agri_advisor::i18n::fluent::I18n;
use agri_advisor::notifications::{Store, Toast};
use agri_advisor::recommendation::Service;
use agri_advisor::submission::{Controller, Phase, SubmissionOutcome};
use agri_advisor::transport::{CancelReason, CancelSignal, HttpTransport};
use agri_advisor::{logging, paths};
use std::process::ExitCode;
use std::sync::Arc;

const HELP: &str = "\
agri-advisor: crop and fertilizer recommendations

USAGE:
    agri-advisor [OPTIONS] crop Field=value...
    agri-advisor [OPTIONS] fertilizer Field=value...
    agri-advisor [OPTIONS] fields crop|fertilizer

OPTIONS:
    --lang <LOCALE>       Interface language (en-US, fr)
    --config-dir <DIR>    Directory holding settings.toml
    -v, --verbose         More log output, repeat for more
    -h, --help            Print this help
";

const EXIT_REJECTED: u8 = 2;

enum Command {
    Help,
    Fields(Service),
    Submit { service: Service, pairs: Vec<String> },
}

struct Args {
    lang: Option<String>,
    config_dir: Option<String>,
    verbosity: u8,
    command: Command,
}

fn parse_args() -> Result<Args> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(Args {
            lang: None,
            config_dir: None,
            verbosity: 0,
            command: Command::Help,
        });
    }

    let mut verbosity = 0u8;
    while args.contains(["-v", "--verbose"]) {
        verbosity = verbosity.saturating_add(1);
    }
    let lang = args.opt_value_from_str("--lang")?;
    let config_dir = args.opt_value_from_str("--config-dir")?;
    let subcommand = args.subcommand()?;

    let rest = args
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| Error::Cli(format!("argument is not valid UTF-8: {}", arg.to_string_lossy())))
        })
        .collect::<Result<Vec<_>>>()?;

    let service_named = |name: &str| {
        Service::from_name(name).ok_or_else(|| Error::Cli(format!("unknown form `{name}`, expected crop or fertilizer")))
    };

    let command = match subcommand.as_deref() {
        None => Command::Help,
        Some("fields") => {
            let name = rest
                .first()
                .ok_or_else(|| Error::Cli("`fields` needs crop or fertilizer".into()))?;
            Command::Fields(service_named(name)?)
        }
        Some(name) => Command::Submit {
            service: service_named(name)?,
            pairs: rest,
        },
    };

    Ok(Args {
        lang,
        config_dir,
        verbosity,
        command,
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}\n\n{HELP}");
            return ExitCode::from(EXIT_REJECTED);
        }
    };

    logging::init(args.verbosity);

    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "agri-advisor failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    if matches!(args.command, Command::Help) {
        print!("{HELP}");
        return Ok(ExitCode::SUCCESS);
    }

    paths::init_cli_overrides(args.config_dir);
    let (config, load_warning) = config::load();
    let i18n = Arc::new(I18n::new(args.lang, &config));

    let store = Store::new(config.store_settings());
    let _toasts = store.subscribe(Toast::printer(std::io::stderr()));
    if let Some(key) = load_warning {
        store.warning(i18n.tr(&key), None);
    }
    let timers = tokio::spawn({
        let store = store.clone();
        async move { store.run_timers().await }
    });

    let code = match args.command {
        Command::Help => ExitCode::SUCCESS,
        Command::Fields(service) => {
            print_fields(service, &i18n);
            ExitCode::SUCCESS
        }
        Command::Submit { service, pairs } => submit(service, &pairs, &config, &store, &i18n).await?,
    };

    timers.abort();
    Ok(code)
}

fn print_fields(service: Service, i18n: &I18n) {
    let schema = service.schema();
    let defaults = service.default_input();

    for rule in schema.numeric {
        let unit = if rule.unit.is_empty() {
            String::new()
        } else {
            format!(" {}", rule.unit)
        };
        println!(
            "{:<12} {} ({} - {}{unit})",
            rule.key,
            i18n.tr(rule.label_key),
            rule.min,
            rule.max
        );
    }
    for field in schema.categorical {
        let default = defaults.get(field.key).unwrap_or_default();
        println!(
            "{:<12} {} [{}] (default: {default})",
            field.key,
            i18n.tr(field.label_key),
            field.options.join(", ")
        );
    }
}

async fn submit(service: Service, pairs: &[String], config: &Config, store: &Store, i18n: &Arc<I18n>) -> Result<ExitCode> {
    let input = FormInput::from_pairs(pairs).map_err(|arg| Error::Cli(format!("expected Field=value, got `{arg}`")))?;

    let transport = HttpTransport::new(config.request_timeout())?;
    let mut controller = Controller::new(
        service,
        config.endpoint(service),
        transport,
        store.clone(),
        Arc::clone(i18n),
        config.timing_policy(),
    );
    let schema = service.schema();
    for (field, value) in input.iter() {
        if !schema.keys().any(|key| key == field) {
            tracing::warn!(field, "ignoring unknown field");
            continue;
        }
        controller.set_field(field, value);
    }

    let cancel = CancelSignal::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel(CancelReason::User);
            }
        }
    });

    let mut status = controller.watch_status();
    let progress = tokio::spawn({
        let i18n = Arc::clone(i18n);
        async move {
            let mut announced = false;
            let mut hinted = false;
            while status.changed().await.is_ok() {
                let current = *status.borrow_and_update();
                if current.phase == Phase::InFlight && !announced {
                    announced = true;
                    eprintln!("{}", i18n.tr("status-analyzing"));
                }
                if hinted {
                    continue;
                }
                if let Some(hint) = current.slow_warning_hint(&i18n) {
                    hinted = true;
                    eprintln!("{}\n{hint}", i18n.tr("status-waking"));
                }
            }
        }
    });

    let submitted = controller.submit_with(cancel).await;
    interrupt.abort();
    progress.abort();

    let state = controller.state();
    match submitted {
        Err(errors) => {
            for (_, message) in errors.iter() {
                eprintln!("{message}");
            }
            Ok(ExitCode::from(EXIT_REJECTED))
        }
        Ok(SubmissionOutcome::Success { result }) => {
            println!("{}", i18n.tr_with_args(service.result_key(), &[("result", &result)]));
            Ok(ExitCode::SUCCESS)
        }
        Ok(_) => {
            if let Some(result) = state.result().filter(|_| state.show_result()) {
                println!("{result}");
            }
            if let Some(message) = state.error_message() {
                eprintln!("{message}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
