use std::net::{IpAddr, SocketAddr};

use tonic::{Request, Response, Status};

use crate::engine::{MutationKind, RouteEngine};
use crate::error::Error;
use crate::path::Path;
use pathd_proto::pathd::gateway_api_server::GatewayApi;
use pathd_proto::pathd::{AddRouteRequest, Route, WithdrawRouteRequest};

#[derive(Debug)]
pub struct GatewayServer<E> {
    engine: E,
}

impl<E: RouteEngine> GatewayServer<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    async fn mutate(
        &self,
        kind: MutationKind,
        origin: IpAddr,
        route: Option<&Route>,
    ) -> Result<Response<()>, Status> {
        let route = route.ok_or(Error::RouteRequired)?;
        let path = Path::from_route(route, origin)?;
        self.engine.mutate(kind, &path).await?;
        tracing::info!(kind=%kind, prefix=%path.prefix, origin=%path.origin, "forwarded the mutation to the engine");
        Ok(Response::new(()))
    }
}

/// Resolves the caller address reported by the transport. The payload never
/// participates here; an unusable transport address fails the call.
pub(crate) fn resolve_peer(remote: Option<SocketAddr>) -> Result<IpAddr, Error> {
    let addr = remote.ok_or(Error::PeerUnavailable)?;
    if addr.ip().is_unspecified() {
        return Err(Error::AddressResolution {
            addr: addr.to_string(),
        });
    }
    Ok(addr.ip())
}

#[tonic::async_trait]
impl<E: RouteEngine> GatewayApi for GatewayServer<E> {
    #[tracing::instrument(skip(self, req))]
    async fn add_route(&self, req: Request<AddRouteRequest>) -> Result<Response<()>, Status> {
        let origin = resolve_peer(req.remote_addr())?;
        self.mutate(MutationKind::Add, origin, req.get_ref().route.as_ref())
            .await
    }

    #[tracing::instrument(skip(self, req))]
    async fn withdraw_route(
        &self,
        req: Request<WithdrawRouteRequest>,
    ) -> Result<Response<()>, Status> {
        let origin = resolve_peer(req.remote_addr())?;
        self.mutate(MutationKind::Withdraw, origin, req.get_ref().route.as_ref())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_peer, GatewayServer};
    use crate::engine::{MutationKind, RouteEngine};
    use crate::error::Error;
    use crate::path::Path;
    use pathd_proto::pathd::gateway_api_server::GatewayApi;
    use pathd_proto::pathd::{AddRouteRequest, Route, WithdrawRouteRequest};
    use rstest::rstest;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use tonic::{Code, Request};

    #[derive(Debug, Default)]
    struct CountingEngine {
        calls: Arc<Mutex<usize>>,
    }

    #[tonic::async_trait]
    impl RouteEngine for CountingEngine {
        async fn mutate(&self, _kind: MutationKind, _path: &Path) -> Result<(), Error> {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            Ok(())
        }
    }

    #[rstest(
        input,
        expected,
        case("203.0.113.5:54321", "203.0.113.5"),
        case("[2001:db8::ff]:54321", "2001:db8::ff"),
    )]
    fn works_resolve_peer(input: &str, expected: &str) {
        let remote: SocketAddr = input.parse().unwrap();
        let peer = resolve_peer(Some(remote)).unwrap();
        assert_eq!(peer, expected.parse::<std::net::IpAddr>().unwrap());
    }

    #[test]
    fn failed_resolve_peer_without_peer_info() {
        match resolve_peer(None) {
            Err(Error::PeerUnavailable) => {}
            _ => unreachable!("peer must be unavailable"),
        }
    }

    #[rstest(input, case("0.0.0.0:54321"), case("[::]:54321"))]
    fn failed_resolve_peer_unspecified_address(input: &str) {
        let remote: SocketAddr = input.parse().unwrap();
        match resolve_peer(Some(remote)) {
            Err(Error::AddressResolution { addr }) => assert_eq!(addr, input),
            _ => unreachable!("address must not resolve"),
        }
    }

    // A request built without a transport carries no peer info, so both
    // handlers must refuse it before touching the engine.
    #[tokio::test]
    async fn failed_add_route_without_peer_info() {
        let calls = Arc::new(Mutex::new(0));
        let server = GatewayServer::new(CountingEngine {
            calls: calls.clone(),
        });
        let req = Request::new(AddRouteRequest {
            route: Some(Route {
                prefix: "10.0.0.0/24".to_string(),
                next_hop: String::new(),
                origin: String::new(),
            }),
        });
        let status = server.add_route(req).await.unwrap_err();
        assert_eq!(status.code(), Code::Aborted);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_withdraw_route_without_peer_info() {
        let calls = Arc::new(Mutex::new(0));
        let server = GatewayServer::new(CountingEngine {
            calls: calls.clone(),
        });
        let req = Request::new(WithdrawRouteRequest {
            route: Some(Route {
                prefix: "10.0.0.0/24".to_string(),
                next_hop: String::new(),
                origin: String::new(),
            }),
        });
        let status = server.withdraw_route(req).await.unwrap_err();
        assert_eq!(status.code(), Code::Aborted);
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}
