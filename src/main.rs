use clap::Subcommand;

mod cli_runtime;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// List connection profiles in registry order
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a connection profile
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        host: String,
        /// Defaults to 7681
        #[arg(long)]
        port: Option<String>,
    },

    /// Replace fields of a connection profile
    Edit {
        /// Id, unique id prefix, or exact name
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<String>,
    },

    /// Delete a connection profile
    Remove {
        /// Id, unique id prefix, or exact name
        id: String,
    },

    /// Print the session URL of a connection profile
    Url {
        /// Id, unique id prefix, or exact name
        id: String,
        /// Print the socket stream URL instead
        #[arg(long)]
        stream: bool,
    },

    /// Launch a session for a connection profile
    Open {
        /// Id, unique id prefix, or exact name
        id: String,
    },
}

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
