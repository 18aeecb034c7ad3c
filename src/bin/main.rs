//! Nodewallet CLI - terminal front end for a wallet node
//!
//!   nodewallet endpoints                  → configured picker entries
//!   nodewallet probe <endpoint>           → {endpoint, outcome}
//!   nodewallet generate -e <endpoint>     → fresh key material
//!   nodewallet balance --address <addr>   → {amount, message}
//!   nodewallet console                    → interactive wallet form
//!   nodewallet serve --port 8080          → local dev node
//!
//! Configuration:
//!   --config <file> or <config dir>/nodewallet/config.json, then NODEWALLET_* env
//!
//! Output format:
//!   --json     Output raw JSON (default for non-tty)
//!   --pretty   Pretty-print JSON (default for tty)

use nodewallet::core::probe::probe;
use nodewallet::logging::init_logging;
use nodewallet::{
    local_spawner, AbortReason, ClientConfig, Control, DevNode, DevNodeConfig, Endpoint, Field, HandlerTable, HttpTransport,
    Operations, SelectOutcome, SubmitOutcome, Surface, TerminalSurface, WalletApp,
};
use serde_json::{json, Value};
use std::env;
use std::future::Future;
use std::io::{self, BufRead, IsTerminal, Write};
use std::rc::Rc;
use tracing::info;

fn main() {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let opts = ParsedArgs::parse(&args[1..]);

    if opts.help {
        print_usage();
        return;
    }

    if opts.version {
        println!("nodewallet {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let result = match opts.command.as_deref() {
        Some("endpoints") => cmd_endpoints(&opts),
        Some("probe") => cmd_probe(&opts),
        Some(cmd @ ("derive" | "generate" | "balance" | "history" | "send")) => cmd_operation(&opts, cmd),
        Some("console") | Some("repl") => cmd_console(&opts),
        Some("serve") => cmd_serve(&opts),
        Some(cmd) => Err(format!("Unknown command: {}", cmd)),
        None => {
            print_usage();
            return;
        }
    };

    let pretty = opts.pretty || (!opts.json && io::stdout().is_terminal());
    match result {
        Ok(Value::Null) => {}
        Ok(output) => println!("{}", render(&output, pretty)),
        Err(e) => {
            eprintln!("{}", render(&json!({"error": e}), pretty));
            std::process::exit(1);
        }
    }
}

fn render(value: &Value, pretty: bool) -> String {
    let text = if pretty { serde_json::to_string_pretty(value) } else { serde_json::to_string(value) };
    text.unwrap_or_else(|_| value.to_string())
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    target: Option<String>,
    // Client options
    config: Option<String>,
    endpoint: Option<String>,
    timeout_ms: Option<u64>,
    no_gate: bool,
    yes: bool,
    // Form fields
    private_key: Option<String>,
    public_key: Option<String>,
    address: Option<String>,
    balance: Option<String>,
    to: Option<String>,
    amount: Option<String>,
    // Dev node options
    port: Option<u16>,
    starting_balance: Option<f64>,
    // Output options
    json: bool,
    pretty: bool,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        // Load .env file if present
        if let Ok(contents) = std::fs::read_to_string(".env") {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let value = value.trim().trim_matches('"');
                    if !value.is_empty() && env::var(key.trim()).is_err() {
                        env::set_var(key.trim(), value);
                    }
                }
            }
        }

        let mut opts = ParsedArgs::default();
        let mut positional = Vec::new();
        let mut i = 0;

        while i < args.len() {
            let arg = &args[i];
            let value = args.get(i + 1).cloned();
            let mut took_value = true;
            match arg.as_str() {
                "--help" | "-h" => { opts.help = true; took_value = false; }
                "--version" | "-V" => { opts.version = true; took_value = false; }
                "--json" => { opts.json = true; took_value = false; }
                "--pretty" => { opts.pretty = true; took_value = false; }
                "--yes" | "-y" => { opts.yes = true; took_value = false; }
                "--no-gate" => { opts.no_gate = true; took_value = false; }
                "--config" | "-c" => opts.config = value,
                "--endpoint" | "-e" => opts.endpoint = value,
                "--timeout" => opts.timeout_ms = value.and_then(|v| v.parse().ok()),
                "--private-key" => opts.private_key = value,
                "--public-key" => opts.public_key = value,
                "--address" | "-a" => opts.address = value,
                "--balance" => opts.balance = value,
                "--to" => opts.to = value,
                "--amount" => opts.amount = value,
                "--port" | "-p" => opts.port = value.and_then(|v| v.parse().ok()),
                "--starting-balance" => opts.starting_balance = value.and_then(|v| v.parse().ok()),
                _ if !arg.starts_with('-') => { positional.push(arg.clone()); took_value = false; }
                _ => took_value = false, // Ignore unknown flags
            }
            i += if took_value { 2 } else { 1 };
        }

        // First positional is command, second is its target
        if !positional.is_empty() {
            opts.command = Some(positional.remove(0));
        }
        if !positional.is_empty() {
            opts.target = Some(positional.remove(0));
        }

        // Environment variables (lower priority than CLI args)
        if opts.endpoint.is_none() {
            opts.endpoint = env::var("NODEWALLET_ENDPOINT").ok().filter(|s| !s.is_empty());
        }
        if opts.port.is_none() {
            opts.port = env::var("NODEWALLET_PORT").ok().and_then(|s| s.parse().ok());
        }

        opts
    }
}

fn print_usage() {
    println!(
        r#"nodewallet - wallet client for a chain node

USAGE:
    nodewallet <command> [target] [options]

COMMANDS:
    endpoints                   List configured endpoints
    probe <endpoint>            Liveness check (GET /)
    derive                      Public key + address from --private-key
    generate                    New random wallet
    balance                     Balance of --address
    history                     Transactions of --address
    send                        Transfer --amount to --to (asks to confirm)
    console                     Interactive wallet form
    serve                       Start a local dev node

CLIENT OPTIONS:
    --endpoint, -e <value>      Endpoint selection (env: NODEWALLET_ENDPOINT)
    --config, -c <file>         JSON config file
    --timeout <ms>              Probe timeout (default: 5000)
    --no-gate                   Wire handlers even when the probe fails
    --yes, -y                   Answer yes to confirmations

FORM FIELDS:
    --private-key <hex>  --public-key <hex>  --address, -a <addr>
    --balance <n>        --to <addr>         --amount <n>

SERVER OPTIONS:
    --port, -p <port>           Dev node port (default: 8080, env: NODEWALLET_PORT)
    --starting-balance <n>      Balance of unseen addresses (default: 100)

OUTPUT OPTIONS:
    --json                      Raw JSON output
    --pretty                    Pretty-print JSON
    --version, -V               Print version

EXAMPLES:
    nodewallet serve --port 8080 &
    nodewallet probe http://127.0.0.1:8080
    nodewallet generate -e http://127.0.0.1:8080
    nodewallet send -e http://127.0.0.1:8080 --private-key <k> --public-key <p> \
        --address <a> --balance 100 --to <b> --amount 5 --yes
"#
    );
}

fn load_config(opts: &ParsedArgs) -> Result<ClientConfig, String> {
    let mut config = match opts.config.as_deref() {
        Some(path) => ClientConfig::load(std::path::Path::new(path)).map_err(|e| e.to_string())?.with_env(),
        None => ClientConfig::from_env().map_err(|e| e.to_string())?,
    };
    if let Some(ms) = opts.timeout_ms {
        config.probe_timeout_ms = ms;
    }
    if opts.no_gate {
        config.gate_on_probe = false;
    }
    Ok(config)
}

/// Explicit selection, else the first configured endpoint
fn pick_endpoint(config: &ClientConfig, selection: Option<&str>) -> Result<Endpoint, String> {
    let registry = config.registry();
    match selection {
        Some(value) => registry.resolve(value).cloned().ok_or_else(|| format!("Unknown endpoint: {}", value)),
        None => registry.endpoints().first().cloned().ok_or_else(|| "No endpoints configured".to_string()),
    }
}

/// Run `fut` on a fresh LocalSet; returns once it and everything it spawned finished
fn run_local<F: Future<Output = ()> + 'static>(rt: &tokio::runtime::Runtime, fut: F) {
    let local = tokio::task::LocalSet::new();
    local.spawn_local(fut);
    rt.block_on(local);
}

fn current_thread_runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create runtime: {}", e))
}

fn cmd_endpoints(opts: &ParsedArgs) -> Result<Value, String> {
    let config = load_config(opts)?;
    let endpoints: Vec<Value> = config
        .registry()
        .endpoints()
        .iter()
        .map(|e| json!({"id": e.id, "url": e.base_url}))
        .collect();
    Ok(json!({"endpoints": endpoints, "probe_timeout_ms": config.probe_timeout_ms, "gate_on_probe": config.gate_on_probe}))
}

fn cmd_probe(opts: &ParsedArgs) -> Result<Value, String> {
    let config = load_config(opts)?;
    let endpoint = pick_endpoint(&config, opts.target.as_deref().or(opts.endpoint.as_deref()))?;
    let rt = current_thread_runtime()?;
    let outcome = rt.block_on(probe(&HttpTransport::new(), &endpoint, config.probe_timeout()));
    Ok(json!({"endpoint": endpoint.base_url, "outcome": outcome.as_str()}))
}

fn prefilled_surface(opts: &ParsedArgs) -> TerminalSurface {
    let surface = TerminalSurface::new(opts.yes);
    let fields = [
        (Field::PrivateKey, &opts.private_key),
        (Field::PublicKey, &opts.public_key),
        (Field::Address, &opts.address),
        (Field::Balance, &opts.balance),
        (Field::RecipientAddress, &opts.to),
        (Field::Amount, &opts.amount),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            surface.set_field(field, value);
        }
    }
    surface
}

fn cmd_operation(opts: &ParsedArgs, command: &str) -> Result<Value, String> {
    let config = load_config(opts)?;
    let endpoint = pick_endpoint(&config, opts.endpoint.as_deref())?;
    let ops = Operations::new(Rc::new(prefilled_surface(opts)), Rc::new(HttpTransport::new()));
    let rt = current_thread_runtime()?;

    rt.block_on(async {
        match command {
            "derive" => ops.load_private_key(&endpoint).await.map(|k| json!(k)).map_err(|e| e.to_string()),
            "generate" => ops.load_random(&endpoint).await.map(|k| json!(k)).map_err(|e| e.to_string()),
            "balance" => ops.get_balance(&endpoint).await.map(|r| json!(r)).map_err(|e| e.to_string()),
            "history" => ops.list_transactions(&endpoint).await.map(|r| json!(r)).map_err(|e| e.to_string()),
            _ => match ops.submit_transaction(&endpoint).await {
                SubmitOutcome::Succeeded(echo) => Ok(json!({"status": "sent", "transaction": echo})),
                SubmitOutcome::Aborted(AbortReason::Declined) => Err("Cancelled".to_string()),
                SubmitOutcome::Aborted(AbortReason::Invalid(e)) | SubmitOutcome::Failed(e) => Err(e.to_string()),
            },
        }
    })
}

fn cmd_console(opts: &ParsedArgs) -> Result<Value, String> {
    println!("Nodewallet console - type 'help' or 'quit'\n");

    let config = load_config(opts)?;
    let rt = current_thread_runtime()?;
    let surface = Rc::new(prefilled_surface(opts));
    let table = HandlerTable::new();
    let app = Rc::new(WalletApp::new(config, surface.clone(), Rc::new(HttpTransport::new()), table.clone(), local_spawner()));

    if let Some(selection) = opts.endpoint.clone() {
        let app = app.clone();
        run_local(&rt, async move { report_selection(app.select(&selection).await) });
    }

    loop {
        print!("nodewallet> ");
        io::stdout().flush().ok();

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let parts: Vec<&str> = input.splitn(3, ' ').collect();

        match parts.first().copied() {
            Some("quit") | Some("exit") | Some("q") => break,
            Some("help") | Some("?") => {
                println!("Commands:");
                println!("  endpoints                  - List endpoints");
                println!("  select <endpoint>          - Probe and activate an endpoint");
                println!("  set <field> <value>        - Fill a form field");
                println!("  click <control> [...]      - Press buttons (fired together)");
                println!("  show                       - Print the form");
                println!("  quit                       - Exit");
                println!("Fields:   {}", field_names());
                println!("Controls: derive generate balance history submit");
            }
            Some("endpoints") => {
                for e in app.registry().endpoints() {
                    let marker = if app.session().endpoint().as_ref() == Some(e) { "*" } else { " " };
                    println!("{} {}", marker, e.id);
                }
            }
            Some("select") => match parts.get(1) {
                Some(selection) => {
                    let (app, selection) = (app.clone(), selection.to_string());
                    run_local(&rt, async move { report_selection(app.select(&selection).await) });
                }
                None => println!("Usage: select <endpoint>"),
            },
            Some("set") => match (parts.get(1).and_then(|f| Field::from_str(f)), parts.get(2)) {
                (Some(field), Some(value)) => surface.set_field(field, value),
                (Some(field), None) => surface.set_field(field, ""),
                _ => println!("Usage: set <field> <value>   fields: {}", field_names()),
            },
            Some("click") => {
                let controls: Vec<Control> = input.split_whitespace().skip(1).filter_map(Control::from_str).collect();
                if controls.is_empty() {
                    println!("Usage: click <control> [...]");
                    continue;
                }
                let table = table.clone();
                run_local(&rt, async move {
                    for control in controls {
                        if table.activate(control) == 0 {
                            println!("{} is not bound; select an endpoint first", control.as_str());
                        }
                    }
                });
            }
            Some("show") => {
                for (field, value) in surface.snapshot() {
                    println!("  {:<10} {}", field.as_str(), value);
                }
                if let Some(endpoint) = app.session().endpoint() {
                    println!("  endpoint   {}", endpoint.base_url);
                }
            }
            Some(cmd) => println!("Unknown: {}. Type 'help'.", cmd),
            None => {}
        }
    }

    println!("Goodbye!");
    Ok(Value::Null)
}

fn field_names() -> String {
    Field::ALL.iter().map(|f| f.as_str()).collect::<Vec<_>>().join(" ")
}

fn report_selection(outcome: SelectOutcome) {
    match outcome {
        SelectOutcome::Unknown => println!("Unknown endpoint"),
        SelectOutcome::Gated(probe) => println!("Not activated ({})", probe.as_str()),
        SelectOutcome::Superseded(_) => println!("Superseded by a newer selection"),
        SelectOutcome::Active { session, probe } => {
            println!("Active: {} ({})", session.endpoint.base_url, probe.as_str())
        }
    }
}

fn cmd_serve(opts: &ParsedArgs) -> Result<Value, String> {
    use nodewallet::install_signal_handlers;

    let mut config = DevNodeConfig::default().with_port(opts.port.unwrap_or(8080));
    if let Some(amount) = opts.starting_balance {
        config = config.with_starting_balance(amount);
    }

    let rt = tokio::runtime::Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e))?;

    rt.block_on(async {
        let shutdown = install_signal_handlers();
        let addr = format!("0.0.0.0:{}", config.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| format!("Failed to bind: {}", e))?;

        info!("Routes: GET /, POST /walletByPrivatekey /wallet /wallet/amount /transaction /ListTransaction");
        DevNode::new(config).serve(listener, shutdown).await.map_err(|e| format!("Server error: {}", e))
    })?;

    Ok(json!({"status": "stopped"}))
}
