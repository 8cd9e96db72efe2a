//! Embedded PostgreSQL bootstrap for the diesel repository suite.
//!
//! `pg-embed-setup-unpriv` installs binaries and data under `/var/tmp` unless
//! `PG_RUNTIME_DIR` and `PG_DATA_DIR` say otherwise. When either is unset the
//! bootstrap points both at a fresh directory under the cargo target dir, with
//! the override held by an `env-lock` guard for the duration of the call.

use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use pg_embedded_setup_unpriv::TestCluster;
use uuid::Uuid;

static BOOTSTRAP: OnceLock<Mutex<()>> = OnceLock::new();

const ATTEMPTS: u32 = 3;
const BACKOFF: Duration = Duration::from_millis(500);

fn scratch_root() -> PathBuf {
    std::env::var_os("CARGO_TARGET_DIR").map_or_else(
        || {
            PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("..")
                .join("target")
        },
        PathBuf::from,
    )
    .join("pg-embed")
}

fn fresh_dirs() -> std::io::Result<(String, String)> {
    let base = scratch_root().join(format!("frontdesk-{}-{}", std::process::id(), Uuid::new_v4()));
    let runtime = base.join("install");
    let data = base.join("data");
    std::fs::create_dir_all(&runtime)?;
    std::fs::create_dir_all(&data)?;
    Ok((
        runtime.to_string_lossy().into_owned(),
        data.to_string_lossy().into_owned(),
    ))
}

/// Binary downloads fail intermittently when suites start clusters in parallel.
fn worth_retrying(message: &str) -> bool {
    let lowered = message.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "timed out",
        "timeout",
        "dns error",
        "temporarily unavailable",
    ]
    .iter()
    .any(|needle| lowered.contains(needle))
}

/// Start a cluster, retrying transient download failures with backoff.
pub fn test_cluster() -> Result<TestCluster, String> {
    let _serialised = BOOTSTRAP
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);

    let _dirs = if std::env::var_os("PG_RUNTIME_DIR").is_none()
        || std::env::var_os("PG_DATA_DIR").is_none()
    {
        let (runtime, data) = fresh_dirs().map_err(|err| err.to_string())?;
        Some(env_lock::lock_env([
            ("PG_RUNTIME_DIR", Some(runtime)),
            ("PG_DATA_DIR", Some(data)),
        ]))
    } else {
        None
    };

    let mut last = String::new();
    for attempt in 1..=ATTEMPTS {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last = format!("{err:?}");
                if attempt == ATTEMPTS || !worth_retrying(&last) {
                    break;
                }
                eprintln!("pg-embed: attempt {attempt}/{ATTEMPTS} failed, retrying: {last}");
                std::thread::sleep(BACKOFF * attempt);
            }
        }
    }
    Err(last)
}
