use clap::{Parser, Subcommand};
use folio::auth::AuthGate;
use folio::ingest::{self, ApplyOutcome, ImageSlot, IngestCompletion, IngestTicket};
use folio::session::EditSession;
use folio::store::ContentStore;
use folio::types::{CareerField, WorkField};
use folio::{config, output};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Content layer for a personal portfolio site")]
#[command(long_about = "\
Content layer for a personal portfolio site

Your content is one document: profile image, bio, career timeline, and a
gallery of works. It lives in a single local snapshot; editing happens in a
passphrase-gated session that commits or discards as a whole.

Edit session commands:

  show                          Render the working copy
  bio <text>                    Replace the biography
  profile <url>                 Set the profile image to an external URL
  profile-file <path>           Embed an image file as the profile image
  career <n> <field> <value>    Edit career row n (field: date|title|role)
  work <n> <field> <value>      Edit work n (field: title|img|url)
  work-file <n> <path>          Embed an image file into work n
  add                           Append an empty work entry
  rm <n>                        Remove work n
  save                          Commit and close the session
  quit                          Discard all edits and close the session

Rows are numbered as displayed by 'show' (001 = 1). File uploads are read in
the background; results apply to the session when they finish and are
discarded if the session closed first.

The edit passphrase is fixed at build time (FOLIO_ADMIN_SECRET). It is a
cosmetic gate, not a security boundary.")]
#[command(version)]
struct Cli {
    /// Site root (location of folio.toml and the snapshot directory)
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the committed content
    Show,
    /// Open a passphrase-gated interactive edit session
    Edit,
    /// Delete saved content and restore starter content
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Print a stock folio.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Show => {
            let (store, outcome) = ContentStore::open(&storage_dir(&cli.root)?);
            output::print_load_outcome(&outcome, store.snapshot_path());
            output::print_site(store.data());
        }
        Command::Edit => {
            let (mut store, outcome) = ContentStore::open(&storage_dir(&cli.root)?);
            output::print_load_outcome(&outcome, store.snapshot_path());
            edit(&mut store)?;
        }
        Command::Reset { yes } => {
            let (mut store, _) = ContentStore::open(&storage_dir(&cli.root)?);
            if yes || confirm_reset()? {
                store.reset()?;
                println!("Saved content deleted; starter content restored.");
            } else {
                println!("Reset aborted.");
            }
        }
        // Works even when an existing config file is broken.
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

/// Resolve the snapshot directory from the site root's config.
fn storage_dir(root: &std::path::Path) -> Result<PathBuf, config::ConfigError> {
    let config = config::load_config(root)?;
    Ok(root.join(config.storage.dir))
}

fn prompt(text: &str) -> io::Result<()> {
    print!("{text}");
    io::stdout().flush()
}

/// Ask for explicit confirmation before the irreversible reset.
fn confirm_reset() -> io::Result<bool> {
    prompt("This permanently deletes saved content. Type 'yes' to continue: ")?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(answer.trim() == "yes")
}

/// Run the gated interactive edit session against `store`.
fn edit(store: &mut ContentStore) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut gate = AuthGate::new();
    gate.trigger();
    loop {
        prompt("Passphrase: ")?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        if gate.verify(line?.trim()) {
            break;
        }
        println!("Passphrase incorrect.");
    }

    println!("Edit session open. 'save' commits, 'quit' discards, 'help' lists commands.");
    let mut session = EditSession::open(store.data());
    let mut pending: Vec<mpsc::Receiver<IngestCompletion>> = Vec::new();

    loop {
        drain_ready(&mut session, &mut pending);
        prompt("> ")?;
        let Some(line) = lines.next() else {
            // End of input discards, same as quit.
            session.cancel();
            gate.close();
            println!();
            println!("Changes discarded.");
            return Ok(());
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_whitespace().next().unwrap() {
            "save" => {
                drain_all(&mut session, pending);
                match session.commit(store) {
                    Ok(()) => {
                        gate.close();
                        println!("Saved.");
                        return Ok(());
                    }
                    Err(failed) => {
                        println!("Could not save: {}. Edits kept; try again.", failed.error);
                        session = failed.session;
                        pending = Vec::new();
                    }
                }
            }
            "quit" => {
                session.cancel();
                gate.close();
                println!("Changes discarded.");
                return Ok(());
            }
            _ => run_edit_command(line, &mut session, &mut pending),
        }
    }
}

/// Execute one non-terminal edit command. Bad input gets a message, never a
/// session change.
fn run_edit_command(
    line: &str,
    session: &mut EditSession,
    pending: &mut Vec<mpsc::Receiver<IngestCompletion>>,
) {
    let mut words = line.splitn(2, char::is_whitespace);
    let command = words.next().unwrap();
    let rest = words.next().unwrap_or("").trim();

    match command {
        "help" => print!("{HELP}"),
        "show" => output::print_site(session.data()),
        "bio" => session.set_bio(rest),
        "profile" => session.set_profile_image(&ingest::accept_url(rest)),
        "profile-file" => submit_upload(rest, ImageSlot::Profile, session, pending),
        "career" => match parse_indexed_edit::<CareerField>(rest) {
            Ok((index, field, value)) => {
                if let Err(e) = session.update_career_item(index, field, value) {
                    println!("{e}");
                }
            }
            Err(message) => println!("{message}"),
        },
        "work" => match parse_indexed_edit::<WorkField>(rest) {
            Ok((index, field, value)) => {
                let value = if field == WorkField::Img {
                    ingest::accept_url(value)
                } else {
                    value.to_string()
                };
                if let Err(e) = session.update_work_field(index, field, &value) {
                    println!("{e}");
                }
            }
            Err(message) => println!("{message}"),
        },
        "work-file" => {
            let mut parts = rest.splitn(2, char::is_whitespace);
            match (parts.next().and_then(parse_row), parts.next()) {
                (Some(index), Some(path)) => {
                    submit_upload(path.trim(), ImageSlot::Work(index), session, pending)
                }
                _ => println!("usage: work-file <n> <path>"),
            }
        }
        "add" => {
            let id = session.add_work();
            println!("Added work {} (id {}).", session.data().works.len(), id);
        }
        "rm" => match rest.split_whitespace().next().and_then(parse_row) {
            Some(index) => match session.remove_work(index) {
                Ok(removed) => println!("Removed work id {}.", removed.id),
                Err(e) => println!("{e}"),
            },
            None => println!("usage: rm <n>"),
        },
        other => println!("Unknown command '{other}'. 'help' lists commands."),
    }
}

const HELP: &str = "\
show | bio <text> | profile <url> | profile-file <path>
career <n> <date|title|role> <value> | work <n> <title|img|url> <value>
work-file <n> <path> | add | rm <n> | save | quit
";

/// Parse a displayed 1-based row number into an index.
fn parse_row(word: &str) -> Option<usize> {
    word.parse::<usize>().ok()?.checked_sub(1)
}

/// Parse `<n> <field> <value...>` for career and work edits.
fn parse_indexed_edit<F>(rest: &str) -> Result<(usize, F, &str), String>
where
    F: std::str::FromStr,
    F::Err: std::fmt::Display,
{
    let mut parts = rest.splitn(3, char::is_whitespace);
    let index = parts
        .next()
        .and_then(parse_row)
        .ok_or("expected a row number as displayed by 'show'")?;
    let field = parts
        .next()
        .ok_or("expected a field name")?
        .parse::<F>()
        .map_err(|e| e.to_string())?;
    let value = parts.next().unwrap_or("").trim();
    Ok((index, field, value))
}

/// Read a file and start a background embed for it.
fn submit_upload(
    path: &str,
    slot: ImageSlot,
    session: &EditSession,
    pending: &mut Vec<mpsc::Receiver<IngestCompletion>>,
) {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            println!("Could not read '{path}': {e}. Previous image kept.");
            return;
        }
    };
    let ticket = IngestTicket {
        slot,
        generation: session.generation(),
    };
    pending.push(ingest::spawn_encode(bytes, ticket));
    println!("Embedding '{path}' in the background...");
}

/// Apply every completion that has already arrived; keep waiting on the rest.
fn drain_ready(session: &mut EditSession, pending: &mut Vec<mpsc::Receiver<IngestCompletion>>) {
    pending.retain(|rx| match rx.try_recv() {
        Ok(completion) => {
            report_apply(ingest::apply(session, completion));
            false
        }
        Err(mpsc::TryRecvError::Empty) => true,
        Err(mpsc::TryRecvError::Disconnected) => false,
    });
}

/// Block until every outstanding upload has finished, applying each result.
/// Stale-generation checks still decide what actually lands.
fn drain_all(session: &mut EditSession, pending: Vec<mpsc::Receiver<IngestCompletion>>) {
    for rx in pending {
        if let Ok(completion) = rx.recv() {
            report_apply(ingest::apply(session, completion));
        }
    }
}

fn report_apply(outcome: ApplyOutcome) {
    match outcome {
        ApplyOutcome::Applied(ImageSlot::Profile) => {
            println!("Profile image updated from upload.");
        }
        ApplyOutcome::Applied(ImageSlot::Work(index)) => {
            println!("Work {} image updated from upload.", index + 1);
        }
        ApplyOutcome::Stale => {
            println!("Discarded an image upload from a closed session.");
        }
        ApplyOutcome::SlotGone(index) => {
            println!("Discarded an image upload for removed work {}.", index + 1);
        }
        ApplyOutcome::Failed(error) => {
            println!("Image upload failed: {error}. Previous image kept.");
        }
    }
}
