// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use runtime::ContentRuntime;
use skilldeck_app::AppState;
use skilldeck_content::ContentPack;
use skilldeck_tui::UiOptions;
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `skilldeck --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let pack = match options.content_path.clone().or_else(|| config.pack_path()) {
        Some(path) => ContentPack::load(&path).with_context(|| {
            format!(
                "load content pack {} -- if this path is wrong, set [content].pack_path or SKILLDECK_PACK_PATH",
                path.display()
            )
        })?,
        None => ContentPack::builtin(),
    };

    let llm_client = if config.llm_enabled() {
        Some(
            skilldeck_llm::Client::new(
                config.llm_base_url(),
                config.llm_model(),
                config.llm_timeout()?,
            )
            .with_context(|| {
                format!(
                    "invalid [llm] config in {}; fix base_url/model/timeout values",
                    options.config_path.display()
                )
            })?,
        )
    } else {
        None
    };

    let ui_options = UiOptions {
        exit_clear_delay: config.exit_clear_delay()?,
        status_clear_delay: config.status_clear_delay()?,
    };
    if options.check_only {
        return Ok(());
    }

    let mut state = AppState::default();
    let mut runtime =
        ContentRuntime::with_llm_client_and_context(pack, llm_client, config.llm_extra_context());
    skilldeck_tui::run_app(&mut state, &mut runtime, ui_options)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    content_path: Option<PathBuf>,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        content_path: None,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--content" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--content requires a file path"))?;
                options.content_path = Some(PathBuf::from(value.as_ref()));
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("skilldeck");
    println!("  --config <path>          Use a specific config path");
    println!("  --content <path>         Load a content pack JSON instead of the built-in data");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config + content pack + startup dependencies");
    println!("  --help                   Show this help");
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, parse_cli_args};
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/skilldeck-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(Vec::<String>::new(), default_options_path())?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                content_path: None,
                print_config_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_content_pack_override() -> Result<()> {
        let options = parse_cli_args(vec!["--content", "/data/pack.json"], default_options_path())?;
        assert_eq!(options.content_path, Some(PathBuf::from("/data/pack.json")));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_config_value() {
        let error = parse_cli_args(vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_missing_content_value() {
        let error = parse_cli_args(vec!["--content"], default_options_path())
            .expect_err("missing content value should fail");
        assert!(error.to_string().contains("--content requires a file path"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("--help"));
    }

    #[test]
    fn parse_cli_args_sets_print_and_check_flags() -> Result<()> {
        let options = parse_cli_args(
            vec!["--print-config-path", "--print-example-config", "--check"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(!options.show_help);
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_help_flag_for_long_and_short_variants() -> Result<()> {
        let long = parse_cli_args(vec!["--help"], default_options_path())?;
        assert!(long.show_help);

        let short = parse_cli_args(vec!["-h"], default_options_path())?;
        assert!(short.show_help);
        Ok(())
    }
}
