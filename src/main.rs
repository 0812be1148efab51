mod cli;
mod client;
mod credentials;
mod error;
mod payload;
mod types;

#[cfg(test)]
mod test_server;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Mode};
use client::GistClient;
use colored::*;
use credentials::{CredentialsProvider, GitConfig, Overridden, StaticCredentials};
use error::GystError;
use log::{debug, info, LevelFilter};
use payload::Assembler;
use types::{Credentials, Destination, GistId, InputSource};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    debug!(
        "options: read={:?} output={:?} extension={:?} private={} url={}",
        cli.read, cli.output, cli.extension, cli.private, cli.url
    );
    debug!("args: {:?}", cli.files);

    let mode = cli.mode().unwrap_or_else(|e| e.exit());
    let client = GistClient::new(&cli.url);

    let result = match mode {
        Mode::Read { id, destination } => read_gist(&client, &id, &destination).await,
        Mode::Publish {
            sources,
            extension,
            private,
        } => {
            let provider = credentials_provider(&cli);
            publish_gist(&client, provider.as_ref(), &sources, extension, private).await
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module(module_path!(), LevelFilter::Debug);
    }
    builder.init();
}

fn credentials_provider(cli: &Cli) -> Box<dyn CredentialsProvider> {
    match (cli.login.clone(), cli.token.clone()) {
        (Some(login), Some(token)) => Box::new(StaticCredentials(Credentials { login, token })),
        (login, token) => Box::new(Overridden::new(GitConfig::new(), login, token)),
    }
}

async fn read_gist(client: &GistClient, id: &GistId, destination: &Destination) -> anyhow::Result<()> {
    match client.fetch(id, destination).await {
        Ok(count) => {
            info!("Fetched {} lines of gist {}", count, id);
            Ok(())
        }
        // Empty body: report on stderr, exit 0.
        Err(e @ GystError::NotFound(_)) => {
            eprintln!("{}", e.to_string().red());
            Ok(())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to fetch gist {}", id)),
    }
}

async fn publish_gist(
    client: &GistClient,
    provider: &dyn CredentialsProvider,
    sources: &[InputSource],
    extension: Option<String>,
    private: bool,
) -> anyhow::Result<()> {
    let credentials = provider.credentials().context("Failed to resolve credentials")?;
    debug!("username: {}", credentials.login);

    let mut assembler = Assembler::new(extension);
    for source in sources {
        let reader = Assembler::open(source).await?;
        assembler.add_source(source, reader).await?;
    }

    let submission = assembler.finish(credentials, private)?;
    if private {
        debug!("Private gist");
    }
    debug!("Post data\n{:#?}", submission);

    let url = client
        .publish(&submission)
        .await
        .context("Failed to publish gist")?;
    println!("Here is your gist: {}", url.as_str().green().bold());
    Ok(())
}
