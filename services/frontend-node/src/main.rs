//! Front-end node
//!
//! Starts the reference RF info device behind a servant, connects an out
//! port to it and runs the commands given on the command line in order,
//! printing one JSON document per command.
//!
//! ```text
//! frontend-node [--config <path.toml>] [--json-logs] <command>...
//!   get-flow-id
//!   set-flow-id <id>
//!   get-info
//!   set-info <packet.json>
//! ```

use anyhow::{bail, Context, Result};
use frontend_core::{logging, Config};
use frontend_ports::{OutRfInfoPort, RfInfoDevice, Servant};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

const NODE_PROTOCOL_VERSION: u32 = 1;
const OUT_PORT_NAME: &str = "RFInfo_out";
const USAGE: &str =
    "usage: frontend-node [--config <path.toml>] [--json-logs] <get-flow-id | set-flow-id <id> | get-info | set-info <packet.json>>...";

#[derive(Debug, Serialize)]
struct NodeVersionHandshake {
    version: &'static str,
    protocol_version: u32,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    GetFlowId,
    SetFlowId(String),
    GetInfo,
    SetInfo(PathBuf),
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    json_logs: bool,
    version_json: bool,
    commands: Vec<Command>,
}

fn main() -> Result<()> {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&raw)?;

    if args.version_json {
        let handshake = NodeVersionHandshake {
            version: env!("CARGO_PKG_VERSION"),
            protocol_version: NODE_PROTOCOL_VERSION,
        };
        println!("{}", serde_json::to_string(&handshake)?);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default_config(),
    };
    if args.json_logs {
        config.logging.json = true;
    }
    logging::init_from_config(&config.logging);

    if args.commands.is_empty() {
        bail!("no command given\n{}", USAGE);
    }

    let device = RfInfoDevice::from_config(&config.device)
        .context("invalid [device] configuration")?;
    let (mut servant, client) = Servant::spawn(config.device.name.clone(), device, &config.servant)?;

    let port = OutRfInfoPort::new(OUT_PORT_NAME);
    port.connect(config.device.name.clone(), Arc::new(client));
    tracing::info!(device = %config.device.name, commands = args.commands.len(), "Node ready");

    for command in &args.commands {
        let output = run_command(&port, command)?;
        println!("{}", output);
    }

    servant.shutdown();
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => match iter.next() {
                Some(path) => parsed.config = Some(PathBuf::from(path)),
                None => bail!("--config was provided without a path"),
            },
            "--json-logs" => parsed.json_logs = true,
            "--version-json" => parsed.version_json = true,
            "get-flow-id" => parsed.commands.push(Command::GetFlowId),
            "get-info" => parsed.commands.push(Command::GetInfo),
            "set-flow-id" => match iter.next() {
                Some(id) => parsed.commands.push(Command::SetFlowId(id.clone())),
                None => bail!("set-flow-id requires an id"),
            },
            "set-info" => match iter.next() {
                Some(path) => parsed.commands.push(Command::SetInfo(PathBuf::from(path))),
                None => bail!("set-info requires a packet file"),
            },
            other => bail!("unknown argument {:?}\n{}", other, USAGE),
        }
    }

    Ok(parsed)
}

fn run_command(port: &OutRfInfoPort, command: &Command) -> Result<serde_json::Value> {
    let output = match command {
        Command::GetFlowId => {
            let id = port.rf_flow_id(None)?;
            json!({ "rf_flow_id": id })
        }
        Command::SetFlowId(id) => {
            port.set_rf_flow_id(id, None)?;
            json!({ "ok": true, "rf_flow_id": id })
        }
        Command::GetInfo => {
            let pkt = port.rf_info_pkt(None)?;
            serde_json::to_value(pkt)?
        }
        Command::SetInfo(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read packet {}", path.display()))?;
            let pkt = frontend_rf::decode(&bytes)
                .with_context(|| format!("failed to decode packet {}", path.display()))?;
            port.set_rf_info_pkt(&pkt, None)?;
            json!({ "ok": true, "rf_flow_id": pkt.rf_flow_id })
        }
    };
    Ok(output)
}
