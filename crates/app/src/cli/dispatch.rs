use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use freemate_domain::RegistrationForm;

use super::actions::{Action, Task};

fn required(matches: &clap::ArgMatches, name: &str) -> Result<String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: {name}"))
}

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let (name, sub_m) = matches.subcommand().context("no subcommand given")?;

    let task = match name {
        "send-mail" => Task::SendMail {
            email: required(sub_m, "email")?,
        },
        "check-username" => Task::CheckUsername {
            username: required(sub_m, "username")?,
        },
        "register" => Task::Register(RegistrationForm {
            username: required(sub_m, "username")?,
            password: required(sub_m, "password")?,
            nickname: required(sub_m, "nickname")?,
            email: required(sub_m, "email")?,
            gender: required(sub_m, "gender")?,
            birth_year: sub_m
                .get_one::<i32>("birth-year")
                .copied()
                .context("missing required argument: birth-year")?,
        }),
        "login" => Task::Login {
            username: required(sub_m, "username")?,
            password: required(sub_m, "password")?,
        },
        "config" => Task::ShowConfig,
        other => return Err(anyhow!("unknown subcommand: {other}")),
    };

    Ok(Action {
        config_path: sub_m
            .get_one::<PathBuf>("config")
            .or_else(|| matches.get_one::<PathBuf>("config"))
            .cloned(),
        task,
    })
}
