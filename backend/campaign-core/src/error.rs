use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CampaignError {
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed json in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode campaign json: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("campaign source is not a json array")]
    NotAList,
    #[error("invalid campaign id: {0:?}")]
    InvalidId(String),
    #[error("campaign record has no usable id")]
    MissingId,
}

pub type CampaignResult<T> = Result<T, CampaignError>;

impl CampaignError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CampaignError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CampaignError::Parse {
            path: path.into(),
            source,
        }
    }

    /// Short, errno-style code reported to HTTP clients as `{"error": code}`.
    pub fn code(&self) -> &'static str {
        match self {
            CampaignError::Io { source, .. } => io_code(source),
            CampaignError::Parse { .. } | CampaignError::Encode(_) | CampaignError::NotAList => {
                "EPARSE"
            }
            CampaignError::InvalidId(_) | CampaignError::MissingId => "EINVAL",
        }
    }
}

fn io_code(err: &io::Error) -> &'static str {
    if let Some(code) = errno_code(err) {
        return code;
    }
    match err.kind() {
        io::ErrorKind::NotFound => "ENOENT",
        io::ErrorKind::PermissionDenied => "EACCES",
        io::ErrorKind::AlreadyExists => "EEXIST",
        io::ErrorKind::InvalidInput => "EINVAL",
        io::ErrorKind::Interrupted => "EINTR",
        io::ErrorKind::TimedOut => "ETIMEDOUT",
        io::ErrorKind::WouldBlock => "EAGAIN",
        _ => "EIO",
    }
}

// errno values below are shared by Linux and the BSDs
#[cfg(unix)]
fn errno_code(err: &io::Error) -> Option<&'static str> {
    let code = match err.raw_os_error()? {
        2 => "ENOENT",
        5 => "EIO",
        13 => "EACCES",
        17 => "EEXIST",
        20 => "ENOTDIR",
        21 => "EISDIR",
        24 => "EMFILE",
        28 => "ENOSPC",
        _ => return None,
    };
    Some(code)
}

#[cfg(not(unix))]
fn errno_code(_err: &io::Error) -> Option<&'static str> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_node_codes() {
        let missing = CampaignError::io("x.json", io::Error::from(io::ErrorKind::NotFound));
        assert_eq!(missing.code(), "ENOENT");

        let denied = CampaignError::io("x.json", io::Error::from(io::ErrorKind::PermissionDenied));
        assert_eq!(denied.code(), "EACCES");

        let other = CampaignError::io("x.json", io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(other.code(), "EIO");
    }

    #[test]
    fn non_io_errors_have_stable_codes() {
        assert_eq!(CampaignError::NotAList.code(), "EPARSE");
        assert_eq!(CampaignError::InvalidId("../x".into()).code(), "EINVAL");
        assert_eq!(CampaignError::MissingId.code(), "EINVAL");
    }
}
