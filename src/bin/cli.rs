//! monokv CLI
//!
//! Command-line interface for inspecting and editing a monokv store file.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use monokv::{codec, Config, FileStore, Handler, MonoError, Purge, Reply};
use tracing_subscriber::{fmt, EnvFilter};

/// monokv CLI
#[derive(Parser, Debug)]
#[command(name = "monokv-cli")]
#[command(about = "CLI for the monokv key-multivalue store")]
#[command(version)]
struct Args {
    /// Store file
    #[arg(short, long, default_value = "./monokv.json")]
    file: PathBuf,

    /// Indentation used when rewriting the store file (0 = compact)
    #[arg(short, long, default_value = "4")]
    indent: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a record from sub-key/value pairs (replaces an existing record)
    Add {
        /// Record identifier
        identifier: String,

        /// Alternating sub-keys and values: sk1 v1 sk2 v2 ...
        #[arg(required = true, num_args = 2..)]
        pairs: Vec<String>,
    },

    /// Overwrite the value of an existing sub-key
    Set {
        identifier: String,
        sub_key: String,
        value: String,
    },

    /// List all identifiers
    Keys,

    /// List the values of a record
    Values {
        identifier: String,

        /// Print bare values without their sub-keys
        #[arg(long)]
        bare: bool,

        /// Print stored tokens instead of decoded values
        #[arg(long)]
        raw: bool,
    },

    /// Show a record by identifier
    Get {
        identifier: String,

        #[arg(long)]
        raw: bool,
    },

    /// Show a record by position in the file
    At {
        index: usize,

        #[arg(long)]
        raw: bool,
    },

    /// Rename a sub-key within a record
    RenameField {
        identifier: String,
        old: String,
        new: String,

        /// Fail instead of creating an empty field when OLD is missing
        #[arg(long)]
        strict: bool,
    },

    /// Rename a record identifier
    RenameKey { old: String, new: String },

    /// Delete a sub-key from a record
    DropField { identifier: String, sub_key: String },

    /// Delete a record
    Drop { identifier: String },

    /// Delete every record in the file
    Purge {
        /// Confirm the irreversible delete
        #[arg(long)]
        yes: bool,
    },

    /// Encode a string with the store codec
    Encode { text: String },

    /// Decode a codec token
    Decode { token: String },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,monokv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match Config::builder()
        .store_path(&args.file)
        .indent(args.indent)
        .build()
    {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            process::exit(2);
        }
    };

    if let Err(e) = run(config, args.command) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(config: Config, command: Commands) -> Result<(), MonoError> {
    let path = config.store_path.clone();
    let store = FileStore::new(config.clone());

    match command {
        Commands::Add { identifier, pairs } => {
            let mut args = vec![path.display().to_string(), identifier];
            args.extend(pairs);
            print_reply(Handler::new(config).handle_named("add_fields", &args))?;
        }
        Commands::Set {
            identifier,
            sub_key,
            value,
        } => {
            let previous = store.set_sub_value(&identifier, &sub_key, value.as_str())?;
            println!("{}.{}: {} -> {}", identifier, sub_key, codec::canonical_string(&previous), value);
        }
        Commands::Keys => {
            for key in store.list_keys()? {
                println!("{}", key);
            }
        }
        Commands::Values {
            identifier,
            bare,
            raw,
        } => {
            for item in store.list_values(&identifier, !bare, raw)? {
                println!("{}", item);
            }
        }
        Commands::Get { identifier, raw } => {
            println!("{}", store.load_by_key(&identifier, raw)?);
        }
        Commands::At { index, raw } => match store.load_by_index(index, raw)? {
            Some(record) => println!("{}", record),
            None => println!("(no record at index {})", index),
        },
        Commands::RenameField {
            identifier,
            old,
            new,
            strict,
        } => store.rename_sub_key(&identifier, &old, &new, !strict)?,
        Commands::RenameKey { old, new } => store.rename_top_key(&old, &new)?,
        Commands::DropField {
            identifier,
            sub_key,
        } => store.delete_sub_key(&identifier, &sub_key)?,
        Commands::Drop { identifier } => store.delete_key(&identifier)?,
        Commands::Purge { yes } => {
            if store.delete_all(yes)? == Purge::Refused {
                println!("Nothing deleted: pass --yes to delete all data in {}", path.display());
            }
        }
        Commands::Encode { text } => println!("{}", codec::encode(&text)?),
        Commands::Decode { token } => println!("{}", codec::decode_digits(&token)?),
    }

    Ok(())
}

fn print_reply(reply: Reply) -> Result<(), MonoError> {
    match reply {
        Reply::Error(message) => Err(MonoError::Protocol(message)),
        other => {
            println!("{}", other);
            Ok(())
        }
    }
}
