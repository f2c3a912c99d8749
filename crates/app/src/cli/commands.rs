use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

/// Birth years accepted by `register`.
pub const BIRTH_YEARS: std::ops::RangeInclusive<i64> = 1900..=9999;

/// Maps the `-v` count to a default tracing filter.
pub const fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("freemate")
        .about("FreeMate registration and login client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to a YAML or JSON configuration file")
                .env("FREEMATE_CONFIG")
                .global(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
                .global(true)
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("send-mail")
                .about("Send a verification email")
                .arg(Arg::new("email").required(true).help("Address to verify")),
        )
        .subcommand(
            Command::new("check-username")
                .about("Check whether a username is already taken")
                .arg(Arg::new("username").required(true)),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account")
                .arg(Arg::new("username").long("username").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .env("FREEMATE_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                )
                .arg(Arg::new("nickname").long("nickname").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(
                    Arg::new("gender")
                        .long("gender")
                        .value_parser(["male", "female"])
                        .required(true),
                )
                .arg(
                    Arg::new("birth-year")
                        .long("birth-year")
                        .help("Four-digit birth year")
                        .required(true)
                        .value_parser(clap::value_parser!(i32).range(BIRTH_YEARS)),
                ),
        )
        .subcommand(
            Command::new("login")
                .about("Log in and show the resulting session")
                .arg(Arg::new("username").long("username").required(true))
                .arg(
                    Arg::new("password")
                        .long("password")
                        .env("FREEMATE_PASSWORD")
                        .hide_env_values(true)
                        .required(true),
                ),
        )
        .subcommand(Command::new("config").about("Print the resolved configuration"))
}
