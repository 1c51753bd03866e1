use clap::{Parser, Subcommand, ValueEnum};

use ryusei_cli::commands::{config_ops, graph_ops, play_ops, vocab_ops};
use ryusei_cli::trace_init;
use ryusei_core::settings::KeyPolicy;

#[derive(Parser)]
#[command(name = "typetool", about = "Ryusei typing engine tool")]
struct Cli {
    /// Log engine events to stderr (requires --features trace)
    #[arg(long, global = true)]
    trace: bool,
    /// Custom kana table (TOML)
    #[arg(long, global = true)]
    kana: Option<String>,
    /// Custom settings (TOML)
    #[arg(long, global = true)]
    settings: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    Fifo,
    Latest,
}

impl From<Policy> for KeyPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Fifo => KeyPolicy::Fifo,
            Policy::Latest => KeyPolicy::Latest,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show the romaji graph of a reading
    Graph {
        /// Reading (hiragana)
        reading: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compile a TOML word list into a binary vocabulary
    Compile {
        /// Input word list (TOML)
        input_file: String,
        /// Output file
        output_file: String,
    },
    /// Show vocabulary info (TOML or compiled; embedded list if omitted)
    Info {
        /// Vocabulary file
        file: Option<String>,
    },
    /// Play a headless battle, one key per tick, printing JSON lines
    Play {
        /// Vocabulary file (TOML or compiled)
        #[arg(long)]
        vocab: Option<String>,
        /// Word selection seed
        #[arg(long, default_value = "0")]
        seed: u64,
        /// Key queueing policy (defaults to the settings value)
        #[arg(long, value_enum)]
        policy: Option<Policy>,
        /// Keys to type
        keys: String,
    },
    /// Export the default kana table as TOML
    KanaExport,
    /// Validate a custom kana table TOML file
    KanaValidate {
        /// Path to the TOML file
        file: String,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.trace {
        trace_init::init_tracing();
    }
    config_ops::install_overrides(cli.kana.as_deref(), cli.settings.as_deref());

    match cli.command {
        Command::Graph { reading, json } => graph_ops::graph(&reading, json),
        Command::Compile {
            input_file,
            output_file,
        } => vocab_ops::compile(&input_file, &output_file),
        Command::Info { file } => vocab_ops::info(file.as_deref()),
        Command::Play {
            vocab,
            seed,
            policy,
            keys,
        } => play_ops::play(vocab.as_deref(), seed, policy.map(KeyPolicy::from), &keys),
        Command::KanaExport => config_ops::kana_export(),
        Command::KanaValidate { file } => config_ops::kana_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
