// src/main.rs
// ─────────────────────────────────────────────────────────────────────────────
// Voicestage reference CLI
//
//  ❯ cargo run --release -- compile --demo
//  ❯ cargo run --release -- render --demo --out-dir outputs
// ─────────────────────────────────────────────────────────────────────────────

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use futures_util::StreamExt;
use tracing_subscriber::EnvFilter;

use voicestage::audio::{WavFileWriter, timestamped_path};
use voicestage::instruct::build_instruction;
use voicestage::prelude::*;

const DEMO_SCRIPT: &str = include_str!("../../../demos/cinematic_script.txt");
const DEMO_CHARACTERS: &str = include_str!("../../../demos/characters.json");

/// CLI switches.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a script and print its segments and instructions.
    Compile {
        #[command(flatten)]
        script: ScriptArgs,
    },
    /// Render a script to a WAV master using the built-in tone engine.
    Render {
        #[command(flatten)]
        script: ScriptArgs,

        /// Directory receiving the timestamped master track.
        #[arg(long, default_value = "outputs")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Dialect {
    Screenplay,
    TagStream,
}

#[derive(Args, Debug)]
struct ScriptArgs {
    /// Path to the script file. May be omitted with --demo.
    script: Option<PathBuf>,

    /// Use the bundled cinematic demo script and cast.
    #[arg(long)]
    demo: bool,

    #[arg(long, value_enum, default_value_t = Dialect::Screenplay)]
    dialect: Dialect,

    /// Character table JSON file (screenplay dialect).
    #[arg(long)]
    characters: Option<PathBuf>,

    /// Ambient voice identity (tag-stream dialect).
    #[arg(long, default_value = "A clear, neutral narrator voice")]
    identity: String,

    /// Synthesis language.
    #[arg(long, default_value = "Auto")]
    language: Language,
}

impl ScriptArgs {
    fn script_text(&self) -> Result<String> {
        match (&self.script, self.demo) {
            (Some(path), _) => {
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
            }
            (None, true) => Ok(DEMO_SCRIPT.to_string()),
            (None, false) => bail!("either a script path or --demo is required"),
        }
    }

    fn characters_json(&self) -> Result<String> {
        match &self.characters {
            Some(path) => {
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
            }
            None => Ok(DEMO_CHARACTERS.to_string()),
        }
    }

    fn input(&self) -> Result<ScriptInput> {
        Ok(match self.dialect {
            Dialect::Screenplay => ScriptInput::Screenplay {
                characters_json: self.characters_json()?,
            },
            Dialect::TagStream => ScriptInput::TagStream {
                identity: self.identity.clone(),
            },
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Cli::parse().command {
        Command::Compile { script } => run_compile(&script),
        Command::Render { script, out_dir } => run_render(&script, &out_dir).await,
    }
}

fn run_compile(args: &ScriptArgs) -> Result<()> {
    let text = args.script_text()?;
    let source = match args.input()? {
        ScriptInput::Screenplay { characters_json } => ScriptSource::Screenplay {
            characters: CharacterTable::from_json(&characters_json)?,
        },
        ScriptInput::TagStream { identity } => ScriptSource::TagStream { identity },
    };

    let segments = compile(&text, &source);
    if segments.is_empty() {
        bail!("script compiled to zero segments");
    }

    for (i, segment) in segments.iter().enumerate() {
        let mut flags = Vec::new();
        if segment.is_solo {
            flags.push("solo");
        }
        if segment.is_interrupted {
            flags.push("interrupted");
        }
        if segment.pause_after {
            flags.push("pause-after");
        }
        println!(
            "#{i:<3} {:<10} [{}]{}",
            segment.speaker_label(),
            segment.emotion,
            if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            }
        );
        println!("     text:     {}", segment.text);
        println!("     instruct: {}", build_instruction(segment));
    }
    println!("{} segment(s)", segments.len());
    Ok(())
}

async fn run_render(args: &ScriptArgs, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;

    let request = RenderRequest {
        script: args.script_text()?,
        input: args.input()?,
        language: args.language,
        output: timestamped_path(out_dir),
    };

    let renderer = Renderer::new(ToneSynthesizer::new(), WavFileWriter);
    let mut stream = renderer.render(request);

    let mut failed = None;
    while let Some(event) = stream.next().await {
        println!("{}", event.status);
        if event.is_terminal() && event.master.is_none() {
            failed = Some(event.status);
        }
    }
    if let Some(status) = failed {
        bail!("{status}");
    }
    Ok(())
}
