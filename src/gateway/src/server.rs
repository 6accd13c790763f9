use tonic::transport::{Identity, Server, ServerTlsConfig};

use pathd_proto::pathd::gateway_api_server::GatewayApiServer;
use pathd_trace::init::{prepare_tracing, TraceConfig};

use super::api_server::GatewayServer;
use super::config::Config;
use super::engine::BgpEngine;

pub fn start(config: Config, trace: TraceConfig) {
    let gateway = Gateway::new(config);
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(gateway.run(trace));
}

#[derive(Debug)]
pub struct Gateway {
    config: Config,
}

impl Gateway {
    pub fn new(config: Config) -> Gateway {
        Gateway { config }
    }

    pub async fn run(&self, trace_config: TraceConfig) {
        prepare_tracing(trace_config).await;

        let sock_addr = self.config.endpoint.parse().unwrap();
        let engine = BgpEngine::new(&self.config.engine_endpoint);

        let mut builder = Server::builder();
        if let Some(tls) = &self.config.tls {
            let cert = std::fs::read(&tls.cert).expect("cannot read the TLS certificate");
            let key = std::fs::read(&tls.key).expect("cannot read the TLS private key");
            builder = builder
                .tls_config(ServerTlsConfig::new().identity(Identity::from_pem(cert, key)))
                .unwrap();
            tracing::info!(cert = %tls.cert, key = %tls.key, "TLS is enabled");
        }

        tracing::info!(
            "Gateway API server is running at {}, engine at {}",
            self.config.endpoint,
            self.config.engine_endpoint
        );

        builder
            .add_service(GatewayApiServer::new(GatewayServer::new(engine)))
            .serve(sock_addr)
            .await
            .unwrap();
    }
}
