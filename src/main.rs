mod ops;
mod rolling_hash;
mod store;
mod string_set;
mod variants;
mod z_function;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::variants::Tally;

#[derive(Parser)]
#[command(
    name = "polyhash",
    about = "Polynomial hash applications: string set, duplicates, palindromes, Z-function"
)]
struct Cli {
    /// What to do with stdin
    #[arg(value_enum, default_value_t = Mode::Ops)]
    mode: Mode,
    /// Word store kept in sync with the set (ops mode only)
    #[arg(long, short = 'f')]
    store: Option<PathBuf>,
    /// Initial bucket count of the set, as a power of two
    #[arg(long, default_value_t = string_set::DEFAULT_CAPACITY_POW,
          value_parser = clap::value_parser!(u32).range(0..=30))]
    initial_pow: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// `+ w` add, `- w` remove, `? w` query, `p w` palindrome check, until `.`
    Ops,
    /// Print strings occurring more than once with their counts
    Groupdups,
    /// Print palindromic strings with their counts
    Palin,
    /// Print the Z-function of the first non-blank line
    Z,
}

async fn read_all_lines() -> Result<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut all = Vec::new();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        all.push(line);
    }
    Ok(all)
}

async fn write_tallies<W: AsyncWrite + Unpin>(out: &mut W, tallies: &[Tally]) -> Result<()> {
    for t in tallies {
        out.write_all(format!("{} {}\n", t.text, t.count).as_bytes())
            .await
            .context("Failed to write output")?;
    }
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if cli.store.is_some() && cli.mode != Mode::Ops {
        log::warn!("--store is only used in ops mode; ignoring it");
    }

    let mut stdout = tokio::io::stdout();
    match cli.mode {
        Mode::Ops => {
            let mut session = ops::Session::open(cli.initial_pow, cli.store).await?;
            let stdin = BufReader::new(tokio::io::stdin());
            let summary = session.run(stdin, &mut stdout).await?;
            log::info!(
                "{} commands applied, {} changed the set ({} words, {} buckets)",
                summary.commands,
                summary.changes,
                session.set().len(),
                session.set().capacity()
            );
        }
        Mode::Groupdups => {
            let lines = read_all_lines().await?;
            write_tallies(&mut stdout, &variants::group_duplicates(&lines)).await?;
        }
        Mode::Palin => {
            let lines = read_all_lines().await?;
            write_tallies(&mut stdout, &variants::palindromes(&lines)).await?;
        }
        Mode::Z => {
            let lines = read_all_lines().await?;
            if let Some(rendered) = variants::z_line(&lines) {
                stdout
                    .write_all(format!("{rendered}\n").as_bytes())
                    .await
                    .context("Failed to write output")?;
            }
        }
    }
    stdout.flush().await.context("Failed to flush stdout")?;

    Ok(())
}
