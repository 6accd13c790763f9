use std::fmt;
use std::time::Duration;

use tonic::transport::Channel;

use crate::error::Error;
use crate::path::Path;
use pathd_proto::pathd::bgp_api_client::BgpApiClient;
use pathd_proto::pathd::{AddPathRequest, DeletePathRequest};

pub const DEFAULT_ENGINE_CONNECT_TIMEOUT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Add,
    Withdraw,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationKind::Add => write!(f, "add"),
            MutationKind::Withdraw => write!(f, "withdraw"),
        }
    }
}

/// The mutation capability the gateway needs from the routing engine.
///
/// Adding a duplicate path or withdrawing an unknown one is engine-defined
/// behavior: the gateway forwards the mutation verbatim and surfaces
/// whatever the engine answers, exactly once, without retry.
#[tonic::async_trait]
pub trait RouteEngine: Send + Sync + 'static {
    async fn mutate(&self, kind: MutationKind, path: &Path) -> Result<(), Error>;
}

/// Routing engine reached over its BgpApi gRPC endpoint.
#[derive(Debug, Clone)]
pub struct BgpEngine {
    endpoint: String,
    timeout: u64,
}

impl BgpEngine {
    pub fn new(endpoint: &str) -> BgpEngine {
        BgpEngine {
            endpoint: endpoint.to_string(),
            timeout: DEFAULT_ENGINE_CONNECT_TIMEOUT,
        }
    }
}

pub(crate) async fn connect_bgp(endpoint: &str) -> Result<BgpApiClient<Channel>, Error> {
    let endpoint_url = format!("http://{}", endpoint);
    BgpApiClient::connect(endpoint_url)
        .await
        .map_err(Error::EngineUnreachable)
}

#[tonic::async_trait]
impl RouteEngine for BgpEngine {
    async fn mutate(&self, kind: MutationKind, path: &Path) -> Result<(), Error> {
        let mut client = tokio::time::timeout(
            Duration::from_secs(self.timeout),
            connect_bgp(&self.endpoint),
        )
        .await
        .map_err(|_| Error::ClientTimeout)??;

        let res = match kind {
            MutationKind::Add => {
                client
                    .add_path(AddPathRequest {
                        path: Some(path.into()),
                    })
                    .await
            }
            MutationKind::Withdraw => {
                client
                    .delete_path(DeletePathRequest {
                        path: Some(path.into()),
                    })
                    .await
            }
        };
        res.map(|_| ())
            .map_err(|status| Error::EngineRejected(status.message().to_string()))
    }
}
