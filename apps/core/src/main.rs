// J.A.R.V.I.S entry point
// Wires the assistant actors to the HTTP bridge and serves it.

use anyhow::Context;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::{info, warn};

use jarvis_core::actors::{
    AssistantHandle, AssistantOptions, ConfirmationHandle, HttpSpeech, ShellSpeech, SilentSpeech,
    SpeechSynthesizer,
};
use jarvis_core::bridge::{self, AppState, ProcessRunner, Scripts};
use jarvis_core::codegen::{OpenAiCodeGenerator, RemoteCodeGenerator, ServiceCodeGenerator};
use jarvis_core::config::{Config, VoiceBackend};
use jarvis_core::logging;
use jarvis_core::utilities::{HostEvent, NoteBook};

fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let speech: Arc<dyn SpeechSynthesizer> = match config.voice {
        VoiceBackend::Shell => Arc::new(ShellSpeech::new()),
        VoiceBackend::Http => Arc::new(HttpSpeech::new(&config.speech_url)?),
        VoiceBackend::None => Arc::new(SilentSpeech),
    };

    let confirmations = ConfirmationHandle::new(config.confirmation_settings());
    let assistant = AssistantHandle::new(
        Arc::new(RemoteCodeGenerator::new(&config.codegen_url)?),
        speech,
        confirmations.clone(),
        AssistantOptions {
            locale: config.language,
            ..AssistantOptions::default()
        },
    );

    let model = config.openai_api_key.as_ref().map(|key| {
        OpenAiCodeGenerator::new(&config.openai_base_url, key.as_str(), &config.openai_model)
    });
    if model.is_none() {
        info!("OPENAI_API_KEY not set, code generation uses templates");
    }

    let notes = match &config.notes_path {
        Some(path) => NoteBook::open(path.clone()),
        None => NoteBook::new(),
    };

    Ok(AppState {
        assistant,
        confirmations,
        codegen: Arc::new(ServiceCodeGenerator::new(model)),
        speech_service: HttpSpeech::new(&config.speech_url)?,
        runner: Arc::new(ProcessRunner),
        scripts: Scripts::new(&config.scripts_dir),
        notes: Arc::new(Mutex::new(notes)),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;
    logging::init(config.log_format)?;

    let state = build_state(&config)?;
    let assistant = state.assistant.clone();

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("J.A.R.V.I.S bridge running on http://{}", address);

    if let Err(e) = assistant.host_event(HostEvent::Ready).await {
        warn!("Startup announcement failed: {}", e);
    }

    axum::serve(listener, bridge::router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("Shutting down");
    assistant.shutdown().await?;
    Ok(())
}
