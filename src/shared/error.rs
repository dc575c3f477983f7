use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes let scripts tell a broken lineage chain apart from a
/// misconfigured client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the result was resolved and presented
    Success = 0,
    /// The lineage of the result could not be resolved
    ResolutionFailed = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (kubeconfig, transport, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Picks the exit code for an error by looking for a `LineageError`
    /// anywhere in its cause chain.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.chain().any(|cause| cause.is::<LineageError>()) {
            ExitCode::ResolutionFailed
        } else {
            ExitCode::ApplicationError
        }
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::ResolutionFailed => write!(f, "Resolution Failed (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// The ownership hop that was being walked when an owner went missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerHop {
    /// CheckResult -> Scan
    Scan,
    /// Scan -> Suite
    Suite,
    /// Suite -> Binding
    Binding,
}

impl fmt::Display for OwnerHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OwnerHop::Scan => write!(f, "scan"),
            OwnerHop::Suite => write!(f, "suite"),
            OwnerHop::Binding => write!(f, "binding"),
        }
    }
}

/// Failures of result lineage resolution.
///
/// Every variant names the object involved so an operator can find it with
/// `kubectl get`. None of these are retried.
#[derive(Debug, Error)]
pub enum LineageError {
    #[error("{kind} '{namespace}/{name}' was not found")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    #[error("Malformed {kind} '{namespace}/{name}': {field} {problem}")]
    MalformedData {
        kind: String,
        namespace: String,
        name: String,
        field: String,
        problem: String,
    },

    #[error("Cannot get the {hop} that owns {kind} '{namespace}/{name}': the object has no controller owner\n\n💡 Hint: The object was never linked to a {hop}, or it was created by hand")]
    NoOwner {
        hop: OwnerHop,
        kind: String,
        namespace: String,
        name: String,
    },

    #[error("Didn't find a relevant profile in ScanSettingBinding '{namespace}/{binding}' for scan identity ({content_file}, {profile_id})")]
    NoRelevantProfile {
        namespace: String,
        binding: String,
        content_file: String,
        profile_id: String,
    },

    #[error("Didn't find a relevant rule for '{rule_ref}' in profile '{namespace}/{profile}'\n\n💡 Hint: The profile lists no rule with that name or XCCDF id")]
    NoRelevantRule {
        namespace: String,
        profile: String,
        rule_ref: String,
    },

    #[error("Got unknown type '{kind}' for profile '{name}' in parent object '{parent}'\n\n💡 Hint: Only Profile and TailoredProfile can be bound")]
    UnsupportedKind {
        kind: String,
        name: String,
        parent: String,
    },

    #[error("ScanSettingBinding '{namespace}/{binding}' has more than one profile matching the scan: {}\n\n💡 Hint: Drop --strict to take the first match in binding order", matches.join(", "))]
    AmbiguousProfile {
        namespace: String,
        binding: String,
        matches: Vec<String>,
    },
}

/// Errors raised outside the lineage core: files and configuration.
#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid manifest directory: {path}\nReason: {reason}\n\n💡 Hint: Point --from-dir at a directory of YAML or JSON manifests")]
    InvalidManifestDir { path: PathBuf, reason: String },

    #[error("Invalid kubeconfig: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    InvalidKubeconfig {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}
