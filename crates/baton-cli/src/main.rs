use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use baton_core::impls::{ClosureObserver, RecordingObserver, TracingObserver};
use baton_core::ports::{EndObserver, ProgressObserver, StartObserver};
use baton_core::{
    BuildError, LifecycleError, Notification, ParticipantId, SubjectBuilder, SubjectStatus,
};

/// Scenario file: which participants take part and how many steps to run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ScenarioConfig {
    participants: Vec<String>,
    steps: u64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            participants: vec!["A".into(), "B".into(), "C".into()],
            steps: 1,
        }
    }
}

impl ScenarioConfig {
    fn load(path: &Path) -> Result<Self, CliError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read scenario {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
}

#[derive(Debug, Serialize)]
struct Report {
    status: SubjectStatus,
    notifications: Vec<Notification>,
}

/// Subject と Observer をつなぎ、ライフサイクルを 1 回実行する
fn run(config: &ScenarioConfig) -> Result<Report, CliError> {
    // (A) Observer を用意（Subject は弱参照しか持たないので、ここで所有する）
    let recorder = Rc::new(RecordingObserver::new());
    let tracer = TracingObserver::new("demo");

    // (B) 記録と tracing 出力の両方をクロージャで束ねる
    let fan_out = Rc::new(
        ClosureObserver::new()
            .when_started({
                let recorder = Rc::clone(&recorder);
                let tracer = tracer.clone();
                move || {
                    recorder.on_start();
                    tracer.on_start();
                }
            })
            .when_progressed({
                let recorder = Rc::clone(&recorder);
                let tracer = tracer.clone();
                move |step: u64, leader: &ParticipantId| {
                    recorder.on_progress(step, leader);
                    tracer.on_progress(step, leader);
                }
            })
            .when_ended({
                let recorder = Rc::clone(&recorder);
                move |winner: &ParticipantId| {
                    recorder.on_end(winner);
                    tracer.on_end(winner);
                }
            }),
    );

    // (C) Subject を構築
    let mut subject = SubjectBuilder::new()
        .participants(config.participants.iter().map(String::as_str))
        .observer(&fan_out)
        .require_participants()
        .build()?;
    info!(subject = %subject.id(), participants = config.participants.len(), "subject built");

    // (D) Idle -> Running -> Ended
    subject.start()?;
    for _ in 0..config.steps {
        subject.advance()?;
    }
    let winner = subject.end()?;
    info!(subject = %subject.id(), %winner, "lifecycle ended");

    Ok(Report {
        status: subject.status(),
        notifications: recorder.log(),
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => match ScenarioConfig::load(Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => ScenarioConfig::default(),
    };

    match run(&config) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                error!("failed to encode report: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
