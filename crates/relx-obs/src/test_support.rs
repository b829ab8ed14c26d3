//! Scripted listers and command runners for tests.

use crate::lister::{BinaryLister, PackageLister};
use crate::{ObsError, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use relx_platform::{CommandOutput, CommandRunner, CommandSpec, OpContext, PlatformError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Handler = dyn Fn(&CommandSpec) -> relx_platform::Result<CommandOutput> + Send + Sync;

/// [`CommandRunner`] answering every call from a closure and recording the
/// commands it was asked to run.
pub struct ScriptedRunner {
    handler: Box<Handler>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&CommandSpec) -> relx_platform::Result<CommandOutput> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().clone()
    }
}

impl std::fmt::Debug for ScriptedRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedRunner").finish_non_exhaustive()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        ctx: &OpContext,
        spec: &CommandSpec,
    ) -> relx_platform::Result<CommandOutput> {
        if ctx.is_cancelled() {
            return Err(PlatformError::Cancelled {
                operation: spec.to_string(),
            });
        }
        self.calls.lock().push(spec.clone());
        (self.handler)(spec)
    }
}

enum Reply {
    Binaries(Vec<String>),
    Fail(String),
    Panic,
}

/// In-memory lister tracking how many lookups run at once.
///
/// Delays go through [`OpContext::bound`], so lookups honour the caller's
/// timeout and cancellation like the real client does.
#[derive(Default)]
pub struct StubLister {
    packages: Vec<String>,
    package_error: Option<String>,
    replies: HashMap<String, (String, Reply)>,
    delay: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    abandoned: AtomicUsize,
}

impl StubLister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_packages(mut self, packages: &[&str]) -> Self {
        self.packages = packages.iter().map(|p| (*p).to_string()).collect();
        self
    }

    pub fn with_package_error(mut self, message: &str) -> Self {
        self.package_error = Some(message.to_string());
        self
    }

    pub fn with_binaries<S: AsRef<str>>(
        mut self,
        package: &str,
        repository: &str,
        binaries: &[S],
    ) -> Self {
        let binaries = binaries.iter().map(|b| b.as_ref().to_string()).collect();
        self.replies.insert(
            package.to_string(),
            (repository.to_string(), Reply::Binaries(binaries)),
        );
        self
    }

    pub fn with_failure(mut self, package: &str, message: &str) -> Self {
        let repository = self.expected_repository(package);
        self.replies.insert(
            package.to_string(),
            (repository, Reply::Fail(message.to_string())),
        );
        self
    }

    pub fn with_panic(mut self, package: &str) -> Self {
        let repository = self.expected_repository(package);
        self.replies
            .insert(package.to_string(), (repository, Reply::Panic));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    /// Lookups dropped before they finished.
    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::SeqCst)
    }

    fn expected_repository(&self, package: &str) -> String {
        self.replies
            .get(package)
            .map(|(repo, _)| repo.clone())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for StubLister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubLister")
            .field("packages", &self.packages)
            .field("calls", &self.calls())
            .finish_non_exhaustive()
    }
}

struct InFlight<'a> {
    stub: &'a StubLister,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn enter(stub: &'a StubLister) -> Self {
        stub.calls.fetch_add(1, Ordering::SeqCst);
        let now = stub.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        stub.peak.fetch_max(now, Ordering::SeqCst);
        Self {
            stub,
            finished: false,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.stub.in_flight.fetch_sub(1, Ordering::SeqCst);
        if !self.finished {
            self.stub.abandoned.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[async_trait]
impl PackageLister for StubLister {
    async fn list_packages(&self, ctx: &OpContext, project: &str) -> Result<Vec<String>> {
        if let Some(message) = &self.package_error {
            return Err(ObsError::Backend(message.clone()));
        }
        if ctx.is_cancelled() {
            return Err(ObsError::Command {
                command: "stub ls".into(),
                subject: format!("project '{project}'"),
                source: PlatformError::Cancelled {
                    operation: format!("stub ls {project}"),
                },
            });
        }
        Ok(self.packages.clone())
    }
}

#[async_trait]
impl BinaryLister for StubLister {
    async fn list_binaries(
        &self,
        ctx: &OpContext,
        project: &str,
        package: &str,
        repository: &str,
    ) -> Result<Vec<String>> {
        let mut guard = InFlight::enter(self);

        if let Some(delay) = self.delay {
            let operation = format!("stub ls -b {project} {package}");
            ctx.bound(&operation, tokio::time::sleep(delay))
                .await
                .map_err(|source| ObsError::Command {
                    command: "stub ls -b".into(),
                    subject: format!("package '{package}'"),
                    source,
                })
                .inspect_err(|_| guard.finished = true)?;
        }
        guard.finished = true;

        match self.replies.get(package) {
            Some((expected, _)) if expected != repository => Err(ObsError::Backend(format!(
                "unexpected repository '{repository}' for {package}, wanted '{expected}'"
            ))),
            Some((_, Reply::Binaries(binaries))) => Ok(binaries.clone()),
            Some((_, Reply::Fail(message))) => Err(ObsError::Backend(message.clone())),
            Some((_, Reply::Panic)) => panic!("stub lister panicked for {package}"),
            None => Err(ObsError::Backend(format!("no reply scripted for {package}"))),
        }
    }
}
