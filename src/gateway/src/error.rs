use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no peer information in the call context")]
    PeerUnavailable,
    #[error("failed to resolve peer address {addr:?}")]
    AddressResolution { addr: String },
    #[error("route is required")]
    RouteRequired,
    #[error("failed to parse prefix {0:?}")]
    InvalidPrefix(String),
    #[error("failed to parse next hop {0:?}")]
    InvalidNextHop(String),
    #[error("engine rejected the mutation: {0}")]
    EngineRejected(String),
    #[error("engine is unreachable")]
    EngineUnreachable(#[source] tonic::transport::Error),
    #[error("timed out connecting to the engine")]
    ClientTimeout,
    #[error("config error")]
    Config(#[from] ConfigError),
    #[error("std::io::Error")]
    StdIoErr(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load")]
    FailedToLoad,
}

// Pre-engine failures abort the call before any mutation is attempted.
// Engine answers keep their text so the caller sees what the engine said.
impl From<Error> for tonic::Status {
    fn from(e: Error) -> Self {
        match e {
            Error::EngineRejected(_) => tonic::Status::internal(e.to_string()),
            Error::EngineUnreachable(_) | Error::ClientTimeout => {
                tonic::Status::unavailable(e.to_string())
            }
            _ => tonic::Status::aborted(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use rstest::rstest;
    use tonic::Code;

    #[rstest(
        input,
        expected,
        case(Error::PeerUnavailable, Code::Aborted),
        case(Error::AddressResolution { addr: "0.0.0.0:0".to_string() }, Code::Aborted),
        case(Error::RouteRequired, Code::Aborted),
        case(Error::InvalidPrefix("10.0.0.0/33".to_string()), Code::Aborted),
        case(Error::EngineRejected("malformed path".to_string()), Code::Internal),
        case(Error::ClientTimeout, Code::Unavailable),
    )]
    fn works_error_to_status(input: Error, expected: Code) {
        let status = tonic::Status::from(input);
        assert_eq!(status.code(), expected);
    }

    #[test]
    fn works_engine_rejected_keeps_the_engine_message() {
        let status = tonic::Status::from(Error::EngineRejected("shutting down".to_string()));
        assert!(status.message().contains("shutting down"));
    }
}
