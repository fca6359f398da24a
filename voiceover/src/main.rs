use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use voiceover::{
    credentials::CREDENTIALS_ENV, generate_voiceover, AudioEncoding, Credentials, SsmlDocument,
    SynthesisConfig, TtsClient,
};

/// Generate a voiceover from SSML with Google Cloud Text-to-Speech
#[derive(Parser, Debug)]
#[command(name = "generate-voiceover")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    synth: SynthArgs,

    /// Override the API root (e.g. a regional endpoint)
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Debug)]
struct SynthArgs {
    /// SSML file to synthesize (defaults to the built-in script)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output audio file
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Voice name, e.g. en-US-Neural2-D
    #[arg(long)]
    voice: Option<String>,

    /// BCP-47 language code, e.g. en-US
    #[arg(long)]
    language: Option<String>,

    /// MP3, LINEAR16, OGG_OPUS, MULAW or ALAW
    #[arg(long)]
    encoding: Option<AudioEncoding>,

    #[arg(long, allow_negative_numbers = true)]
    speaking_rate: Option<f32>,

    #[arg(long, allow_negative_numbers = true)]
    pitch: Option<f32>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the voices offered by the API
    Voices {
        /// Only voices supporting this language code
        #[arg(short, long)]
        language: Option<String>,
    },
}

impl SynthArgs {
    fn apply(self, mut config: SynthesisConfig) -> SynthesisConfig {
        if let Some(encoding) = self.encoding {
            config.set_encoding(encoding);
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(voice) = self.voice {
            config.voice_name = voice;
        }
        if let Some(language) = self.language {
            config.language_code = language;
        }
        if let Some(rate) = self.speaking_rate {
            config.speaking_rate = rate;
        }
        if let Some(pitch) = self.pitch {
            config.pitch = pitch;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if !Credentials::credentials_env_set() {
        warn!("{CREDENTIALS_ENV} is not set.");
        warn!("Set it with: export {CREDENTIALS_ENV}='path/to/credentials.json'");
    }
    let credentials = Credentials::from_env().context("Failed to load Google Cloud credentials")?;

    let client = match cli.endpoint.as_deref() {
        Some(endpoint) => {
            let client = TtsClient::with_endpoint(credentials, endpoint);
            info!("Using Text-to-Speech endpoint {}", client.endpoint());
            client
        }
        None => TtsClient::new(credentials),
    };

    match cli.command {
        Some(Commands::Voices { language }) => list_voices(&client, language.as_deref()),
        None => synthesize(&client, cli.synth),
    }
}

fn synthesize(client: &TtsClient, args: SynthArgs) -> anyhow::Result<()> {
    let ssml = match args.input.as_deref() {
        Some(path) => SsmlDocument::from_file(path)
            .with_context(|| format!("Failed to read SSML from {}", path.display()))?,
        None => SsmlDocument::default(),
    };
    let config = args.apply(SynthesisConfig::from_env());

    println!("Generating audio with voice {}...", config.voice_name);
    let file = generate_voiceover(client, &ssml, &config).context("Voiceover generation failed")?;

    println!("Audio generated: {}", file.path.display());
    println!("Size: {file}");
    Ok(())
}

fn list_voices(client: &TtsClient, language: Option<&str>) -> anyhow::Result<()> {
    let mut voices = client.list_voices(language).context("Failed to list voices")?;
    voices.sort_by(|a, b| a.name.cmp(&b.name));

    for voice in &voices {
        println!(
            "{:<28} {:<18} {:<8} {}",
            voice.name,
            voice.language_codes.join(","),
            voice.ssml_gender.as_deref().unwrap_or("-"),
            voice
                .natural_sample_rate_hertz
                .map(|hz| format!("{hz} Hz"))
                .unwrap_or_default()
        );
    }
    println!("{} voice(s)", voices.len());
    Ok(())
}
