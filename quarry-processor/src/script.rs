//! Running a single script in a stock image
//!
//! The script (or the directory holding it) is uploaded next to the job's
//! inputs, mounted under [`CODE_CONTAINER_BASE_PATH`] and run with an
//! interpreter picked from its extension.

use async_trait::async_trait;
use quarry_core::ValidationError;
use quarry_core::domain::channel::{Channel, InputDescriptor};
use quarry_core::uri::{is_remote_uri, remote_uri};
use std::path::Path;
use tracing::info;

use crate::error::Result;
use crate::hook::{SubmissionHook, SubmissionPlan};
use crate::session::Session;

pub const CODE_CONTAINER_BASE_PATH: &str = "/code/";
pub const CODE_CONTAINER_INPUT_NAME: &str = "source";

/// Works out which file inside `source` is the script to run
///
/// # Errors
/// Fails when `source` is a local directory and no script name was given, or
/// when `source` is neither a remote URI nor an existing local path.
pub fn resolve_script_name(
    source: &str,
    script_name: Option<&str>,
) -> std::result::Result<String, ValidationError> {
    let remote = is_remote_uri(source);
    let path = Path::new(source);
    let is_dir = !remote && path.is_dir();

    if is_dir && script_name.is_none() {
        return Err(ValidationError::new(format!(
            "script_name is required when source '{}' is a directory",
            source
        )));
    }

    if let Some(name) = script_name.filter(|_| remote || is_dir) {
        return Ok(name.to_string());
    }

    if remote {
        return Ok(source
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(source)
            .to_string());
    }

    if let Some(name) = path.file_name().filter(|_| path.is_file()) {
        return Ok(name.to_string_lossy().into_owned());
    }

    Err(ValidationError::new(format!(
        "source '{}' is not a remote URI and the path does not exist",
        source
    )))
}

/// Interpreter used to run `script_name`
///
/// # Errors
/// Fails for anything that is not a `.py` or `.sh` script.
pub fn execution_program(
    script_name: &str,
    py_version: &str,
) -> std::result::Result<&'static str, ValidationError> {
    let extension = Path::new(script_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();

    match extension {
        "py" => Ok(match py_version {
            "py3" => "python3",
            "py2" => "python2",
            _ => "python",
        }),
        "sh" => Ok("bash"),
        _ => Err(ValidationError::new(format!(
            "script '{}' must be a .py or .sh file; use Processor with a custom entrypoint for other programs",
            script_name
        ))),
    }
}

/// Script name and the container entrypoint that runs it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub script_name: String,
    pub entrypoint: Vec<String>,
}

/// Resolves the script name and builds its entrypoint
pub fn resolve_script(
    source: &str,
    script_name: Option<&str>,
    py_version: &str,
) -> std::result::Result<ResolvedEntry, ValidationError> {
    let script_name = resolve_script_name(source, script_name)?;
    let program = execution_program(&script_name, py_version)?;

    let script_path = format!(
        "{}{}/{}",
        CODE_CONTAINER_BASE_PATH, CODE_CONTAINER_INPUT_NAME, script_name
    );

    Ok(ResolvedEntry {
        entrypoint: vec![program.to_string(), script_path],
        script_name,
    })
}

/// Hook that ships a script with the job and points the entrypoint at it
#[derive(Debug, Clone)]
pub struct ScriptSource {
    source: String,
    script_name: Option<String>,
    py_version: String,
}

impl ScriptSource {
    pub fn new(
        source: impl Into<String>,
        script_name: Option<String>,
        py_version: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            script_name,
            py_version: py_version.into(),
        }
    }
}

#[async_trait]
impl SubmissionHook for ScriptSource {
    /// A remote source is mounted as-is; only local sources are uploaded.
    async fn prepare(&self, session: &Session, plan: &mut SubmissionPlan) -> Result<()> {
        let entry = resolve_script(
            &self.source,
            self.script_name.as_deref(),
            &self.py_version,
        )?;

        let source_uri = if is_remote_uri(&self.source) {
            self.source.clone()
        } else {
            let bucket = session.default_bucket().await?;
            let desired_uri = remote_uri(&bucket, &[&plan.job_name, CODE_CONTAINER_INPUT_NAME]);
            info!(
                job_name = %plan.job_name,
                script = %entry.script_name,
                "Uploading script source to {}",
                desired_uri
            );
            session.upload(Path::new(&self.source), &desired_uri).await?
        };

        let destination = format!("{}{}", CODE_CONTAINER_BASE_PATH, CODE_CONTAINER_INPUT_NAME);
        plan.inputs.push(Channel::Descriptor(
            InputDescriptor::new(source_uri, destination).with_name(CODE_CONTAINER_INPUT_NAME),
        ));
        plan.entrypoint = Some(entry.entrypoint);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeService, fake_session};
    use std::fs;
    use tempfile::TempDir;

    fn plan() -> SubmissionPlan {
        SubmissionPlan {
            job_name: "script-job".to_string(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            entrypoint: None,
        }
    }

    #[test]
    fn test_directory_requires_script_name() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().to_str().unwrap();

        let err = resolve_script_name(source, None).unwrap_err();
        assert!(err.message().contains("script_name"));

        assert_eq!(resolve_script_name(source, Some("run.py")).unwrap(), "run.py");
    }

    #[test]
    fn test_existing_file_uses_its_name() {
        let dir = TempDir::new().unwrap();
        let script = dir.path().join("script.sh");
        fs::write(&script, "echo hello\n").unwrap();

        let entry = resolve_script(script.to_str().unwrap(), None, "py3").unwrap();
        assert_eq!(entry.script_name, "script.sh");
        assert_eq!(entry.entrypoint, vec!["bash", "/code/source/script.sh"]);
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.py");

        let err = resolve_script_name(missing.to_str().unwrap(), None).unwrap_err();
        assert!(err.message().contains("path does not exist"));
    }

    #[test]
    fn test_remote_source() {
        assert_eq!(
            resolve_script_name("s3://bucket/code/prep.py", None).unwrap(),
            "prep.py"
        );
        assert_eq!(
            resolve_script_name("s3://bucket/code/", Some("main.py")).unwrap(),
            "main.py"
        );
    }

    #[test]
    fn test_execution_program() {
        assert_eq!(execution_program("prep.py", "py3").unwrap(), "python3");
        assert_eq!(execution_program("prep.py", "py2").unwrap(), "python2");
        assert_eq!(execution_program("prep.py", "pypy").unwrap(), "python");
        assert_eq!(execution_program("run.sh", "py3").unwrap(), "bash");

        let err = execution_program("notes.txt", "py3").unwrap_err();
        assert!(err.message().contains("Processor"));
    }

    #[tokio::test]
    async fn test_hook_uploads_and_injects_source_channel() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("run.py"), "print('hi')\n").unwrap();
        let source = dir.path().to_str().unwrap().to_string();

        let (session, _, uploader) = fake_session(FakeService::new("bucket"));
        let hook = ScriptSource::new(source.clone(), Some("run.py".to_string()), "py3");
        let mut plan = plan();

        hook.prepare(&session, &mut plan).await.unwrap();

        assert_eq!(
            uploader.uploads(),
            vec![(dir.path().to_path_buf(), "s3://bucket/script-job/source".to_string())]
        );
        assert_eq!(plan.inputs.len(), 1);
        match &plan.inputs[0] {
            Channel::Descriptor(input) => {
                assert_eq!(input.name.as_deref(), Some("source"));
                assert_eq!(input.source, "s3://bucket/script-job/source");
                assert_eq!(input.destination, "/code/source");
            }
            Channel::Path(path) => panic!("unexpected bare path {path}"),
        }
        assert_eq!(
            plan.entrypoint,
            Some(vec!["python3".to_string(), "/code/source/run.py".to_string()])
        );
    }

    #[tokio::test]
    async fn test_hook_validates_before_uploading() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("notes.txt"), "todo\n").unwrap();
        let source = dir.path().join("notes.txt");

        let (session, service, uploader) = fake_session(FakeService::new("bucket"));
        let hook = ScriptSource::new(source.to_str().unwrap(), None, "py3");
        let mut plan = plan();

        let err = hook.prepare(&session, &mut plan).await.unwrap_err();
        assert!(err.is_validation());
        assert!(uploader.uploads().is_empty());
        assert_eq!(service.bucket_lookups(), 0);
        assert!(plan.inputs.is_empty());
    }

    #[tokio::test]
    async fn test_hook_keeps_remote_source() {
        let (session, _, uploader) = fake_session(FakeService::new("bucket"));
        let hook = ScriptSource::new("s3://code/prep.py", None, "py2");
        let mut plan = plan();

        hook.prepare(&session, &mut plan).await.unwrap();

        assert!(uploader.uploads().is_empty());
        assert_eq!(
            plan.entrypoint,
            Some(vec!["python2".to_string(), "/code/source/prep.py".to_string()])
        );
    }
}
