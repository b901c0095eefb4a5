#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! CLI for inspecting a Gmail mailbox the way the assertions do

use clap::{Parser, Subcommand};
use gmail_assert::{
    ContentType, GmailApi, GmailConfig, MailAssertions, Wait, email_from, get_content, get_header,
};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gmail-assert")]
#[command(about = "Inspect the newest messages of a Gmail mailbox")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the newest email
    Last {
        /// Only consider emails from this address
        #[arg(long)]
        from: Option<String>,

        /// Show the HTML part instead of plain text
        #[arg(long)]
        html: bool,
    },

    /// Print the matches of a regex against the newest email
    Grab {
        /// Regular expression to run against the plain text content
        regex: String,

        /// Only consider emails from this address
        #[arg(long)]
        from: Option<String>,
    },

    /// Wait until an email from an address arrives
    Wait {
        /// Sender address to wait for
        #[arg(long)]
        from: String,

        /// Seconds to wait before giving up
        #[arg(long, default_value = "10")]
        timeout: u64,

        /// Milliseconds between checks
        #[arg(long, default_value = "1000")]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = GmailConfig::from_env()?;
    let mailbox = MailAssertions::connect(&config).await?;

    let result = match &args.command {
        Command::Last { from, html } => cmd_last(&mailbox, from.as_deref(), *html).await,
        Command::Grab { regex, from } => cmd_grab(&mailbox, regex, from.as_deref()).await,
        Command::Wait {
            from,
            timeout,
            interval,
        } => cmd_wait(&mailbox, from, *timeout, *interval).await,
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) if e.is_assertion_failure() || matches!(e, gmail_assert::Error::Timeout { .. }) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

async fn cmd_last(
    mailbox: &MailAssertions<GmailApi>,
    from: Option<&str>,
    html: bool,
) -> gmail_assert::Result<()> {
    let email = mailbox.last_message(from).await?;
    let content_type = if html {
        ContentType::Html
    } else {
        ContentType::Plain
    };

    println!("ID:      {}", email.id);
    println!("From:    {}", get_header(&email, "From"));
    println!("Date:    {}", get_header(&email, "Date"));
    println!("Subject: {}", get_header(&email, "Subject"));
    println!("\n--- Body ({content_type}) ---\n");
    println!("{}", get_content(&email, content_type)?);

    Ok(())
}

async fn cmd_grab(
    mailbox: &MailAssertions<GmailApi>,
    regex: &str,
    from: Option<&str>,
) -> gmail_assert::Result<()> {
    let matches = match from {
        Some(address) => {
            mailbox
                .grab_matches_from_last_email_from(address, regex)
                .await?
        }
        None => mailbox.grab_matches_from_last_email(regex).await?,
    };

    for (index, group) in matches.iter().enumerate() {
        println!("{index}: {group}");
    }

    Ok(())
}

async fn cmd_wait(
    mailbox: &MailAssertions<GmailApi>,
    from: &str,
    timeout: u64,
    interval: u64,
) -> gmail_assert::Result<()> {
    Wait::new(Duration::from_secs(timeout), Duration::from_millis(interval))
        .until(mailbox.client(), &email_from(from))
        .await?;
    println!("Email from {from} received");
    Ok(())
}
