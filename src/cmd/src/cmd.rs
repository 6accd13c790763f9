use clap::{Parser, Subcommand, ValueEnum};

use pathd_gateway::config::{Config, Tls};
use pathd_gateway::server;
use pathd_trace::init::TraceConfig;

use crate::gateway::GatewayCmd;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cmd {
    #[arg(
        short,
        long,
        global = true,
        required = false,
        default_value = "info",
        help = "Log level(trace, debug, info, warn, error)"
    )]
    pub level: String,

    #[arg(
        value_enum,
        short = 'd',
        long,
        global = true,
        required = false,
        default_value = "plain",
        help = "Log display format"
    )]
    pub format: Format,

    #[arg(short = 'o', long = "log-file", help = "Log output file path")]
    pub log_file: Option<String>,

    #[clap(subcommand)]
    pub sub: SubCmd,
}

#[derive(Debug, Clone, Parser, ValueEnum)]
pub enum Format {
    Plain,
    Json,
}

impl ToString for Format {
    fn to_string(&self) -> String {
        match self {
            Format::Plain => "plain".to_string(),
            Format::Json => "json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum SubCmd {
    Gateway(GatewayCmd),
    Version,
}

pub fn run() {
    let command = Cmd::parse();

    let format = command.format;
    let level = command.level;
    let log_file = command.log_file;

    match command.sub {
        SubCmd::Version => println!("dev"),
        SubCmd::Gateway(g) => {
            let mut config = match g.file {
                Some(file) => Config::load(&file).unwrap(),
                None => Config::default(),
            };
            if let Some(endpoint) = g.endpoint {
                config.endpoint = endpoint;
            }
            if let Some(engine_endpoint) = g.engine_endpoint {
                config.engine_endpoint = engine_endpoint;
            }
            match (g.tls_cert, g.tls_key) {
                (Some(cert), Some(key)) => config.tls = Some(Tls { cert, key }),
                (None, None) => {}
                _ => panic!("Both --tls-cert and --tls-key are required to enable TLS"),
            }

            let trace_conf = TraceConfig {
                level,
                format: format.to_string(),
                file: log_file,
            };

            server::start(config, trace_conf);
        }
    }
}
