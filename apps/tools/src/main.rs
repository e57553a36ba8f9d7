use std::{fmt::Write as _, path::PathBuf};

use anyhow::{bail, Context, Result};
use catalog::CatalogService;
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::{
    domain::{sound_display_name, Catalog},
    protocol::{
        AckResponse, ExpressionRequest, MotionRequest, SoundRequest, EXPRESSION_ROUTE, PLAY_ROUTE,
        SOUND_ROUTE,
    },
};
use url::Url;

#[derive(Parser, Debug)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan a resources folder and print what each model offers.
    Catalog {
        #[arg(long, default_value = "public/Resources")]
        root: PathBuf,
        #[arg(long)]
        summary: bool,
    },
    /// Trigger a motion group on the running avatar.
    Play {
        #[arg(long, default_value = "http://127.0.0.1:7788")]
        server_url: Url,
        #[arg(long)]
        action: String,
        #[arg(long)]
        sound: Option<String>,
    },
    Expression {
        #[arg(long, default_value = "http://127.0.0.1:7788")]
        server_url: Url,
        #[arg(long)]
        name: String,
    },
    Sound {
        #[arg(long, default_value = "http://127.0.0.1:7788")]
        server_url: Url,
        #[arg(long)]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Catalog { root, summary } => {
            let catalog = CatalogService::new(root).list_resources();
            if summary {
                print!("{}", render_summary(&catalog));
            } else {
                println!("{}", serde_json::to_string_pretty(&catalog)?);
            }
        }
        Command::Play {
            server_url,
            action,
            sound,
        } => {
            let ack = post_action(&server_url, PLAY_ROUTE, &MotionRequest { action, sound }).await?;
            report(ack)?;
        }
        Command::Expression { server_url, name } => {
            let ack = post_action(
                &server_url,
                EXPRESSION_ROUTE,
                &ExpressionRequest { expression: name },
            )
            .await?;
            report(ack)?;
        }
        Command::Sound { server_url, path } => {
            let ack = post_action(&server_url, SOUND_ROUTE, &SoundRequest { sound: path }).await?;
            report(ack)?;
        }
    }

    Ok(())
}

async fn post_action<T: Serialize>(server_url: &Url, route: &str, body: &T) -> Result<AckResponse> {
    let url = server_url
        .join(route)
        .with_context(|| format!("invalid server url '{server_url}'"))?;
    let response = reqwest::Client::new()
        .post(url.clone())
        .json(body)
        .send()
        .await
        .with_context(|| format!("request to {url} failed"))?;
    let status = response.status();
    let ack: AckResponse = response
        .json()
        .await
        .with_context(|| format!("unexpected response from {url} ({status})"))?;
    Ok(ack)
}

fn report(ack: AckResponse) -> Result<()> {
    if !ack.success {
        bail!(
            "server rejected request: {}",
            ack.error.as_deref().unwrap_or("unknown error")
        );
    }
    if let Some(message) = ack.message {
        println!("{message}");
    }
    Ok(())
}

fn render_summary(catalog: &Catalog) -> String {
    let mut out = String::new();
    if catalog.models.is_empty() {
        out.push_str("no models installed\n");
        return out;
    }

    for model in &catalog.models {
        let _ = writeln!(out, "{model}");
        let Some(actions) = catalog.actions_for(model) else {
            out.push_str("  (no readable descriptor)\n");
            continue;
        };
        for (group, motions) in actions.motions_by_group() {
            let _ = writeln!(out, "  motion {group} x{}", motions.len());
        }
        for expression in &actions.expressions {
            let _ = writeln!(out, "  expression {}", expression.name);
        }
        for sound in &actions.sounds {
            let _ = writeln!(out, "  sound {} ({sound})", sound_display_name(sound));
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
