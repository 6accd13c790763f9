use clap::Parser;

#[derive(Debug, Clone, Parser)]
pub struct GatewayCmd {
    #[arg(short = 'f', long, help = "Config file path for the gateway")]
    pub file: Option<String>,

    #[arg(short, long, help = "Gateway listen address exp) 0.0.0.0:50051")]
    pub endpoint: Option<String>,

    #[arg(
        long = "engine",
        help = "BGP engine endpoint url(gRPC) exp) localhost:5000"
    )]
    pub engine_endpoint: Option<String>,

    #[arg(long = "tls-cert", help = "TLS certificate file path")]
    pub tls_cert: Option<String>,

    #[arg(long = "tls-key", help = "TLS private key file path")]
    pub tls_key: Option<String>,
}
