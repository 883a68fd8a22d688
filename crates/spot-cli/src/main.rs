use chemspot_rust::config::CONFIG;
use chemspot_rust::logging;
use chemspot_rust::matrix::{GenerateRequest, MatrixService};
use chemspot_rust::source::BUNDLED_TABLE;
use serde_json::{json, Value};
use spot_domain::ReactionTable;
use spot_quiz::{QuizRequest, TutorContext};
use std::sync::Arc;

const USAGE: &str = "Uso:
  chemspot matrix [--n <N>] [--target <K>] [--attempts <A>] [--table <RUTA>]
  chemspot quiz [--mode pair-to-color|color-to-reactions] [--no-traps] [--table <RUTA>]
  chemspot facts --text <TXT> [--limit <L>] [--table <RUTA>]";

/// Opciones `--clave valor` y banderas sueltas, sin validar.
#[derive(Debug, Default)]
struct Args {
    command: Option<String>,
    options: Vec<(String, Option<String>)>,
}

impl Args {
    fn parse(raw: &[String]) -> Self {
        let mut args = Args { command: raw.first().cloned(),
                              ..Default::default() };
        let mut i = 1;
        while i < raw.len() {
            let key = raw[i].clone();
            let value = raw.get(i + 1).filter(|v| !v.starts_with("--")).cloned();
            if value.is_some() {
                i += 1;
            }
            args.options.push((key, value));
            i += 1;
        }
        args
    }

    fn value(&self, key: &str) -> Option<&str> {
        self.options.iter().find(|(k, _)| k == key).and_then(|(_, v)| v.as_deref())
    }

    fn flag(&self, key: &str) -> bool {
        self.options.iter().any(|(k, _)| k == key)
    }
}

/// Una ruta `--table` explícita debe poder leerse; sólo la ruta configurada
/// por defecto cae a la tabla incluida cuando no existe.
fn load_table(explicit: Option<&str>) -> Result<ReactionTable, String> {
    let raw = match explicit {
        Some(path) => std::fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?,
        None => {
            let configured = CONFIG.table_path.to_string_lossy().to_string();
            match std::fs::read_to_string(&configured) {
                Ok(raw) => raw,
                Err(e) => {
                    log::warn!("[chemspot] {configured}: {e}; se usa la tabla incluida");
                    BUNDLED_TABLE.to_string()
                }
            }
        }
    };
    let origin = explicit.unwrap_or("tabla por defecto");
    ReactionTable::from_json_str(&raw).map_err(|e| format!("{origin}: {e}"))
}

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("[chemspot] error de serialización: {e}"),
    }
}

fn run_matrix(args: &Args, service: &MatrixService) -> i32 {
    let body = json!({ "n": args.value("--n"), "targetColored": args.value("--target") });
    let request = GenerateRequest::from_json_with_default(&body, service.config().default_n);
    match service.generate(&request) {
        Ok(resp) => match serde_json::to_value(&resp) {
            Ok(v) => {
                print_json(&v);
                0
            }
            Err(e) => {
                eprintln!("[chemspot matrix] {e}");
                5
            }
        },
        Err(e) => {
            eprintln!("[chemspot matrix] {e}");
            5
        }
    }
}

fn run_quiz(args: &Args, service: &MatrixService) -> i32 {
    let mut request = QuizRequest::default();
    if let Some(mode) = args.value("--mode") {
        request.mode = mode.to_string();
    }
    request.traps = !args.flag("--no-traps");
    match service.quiz(&request) {
        Ok(q) => match serde_json::to_value(&q) {
            Ok(v) => {
                print_json(&v);
                0
            }
            Err(e) => {
                eprintln!("[chemspot quiz] {e}");
                5
            }
        },
        Err(e) if e.status() == 400 => {
            eprintln!("[chemspot quiz] {e}");
            2
        }
        Err(e) => {
            eprintln!("[chemspot quiz] {e}");
            5
        }
    }
}

fn run_facts(args: &Args, service: &MatrixService) -> i32 {
    let Some(text) = args.value("--text") else {
        eprintln!("{USAGE}");
        return 2;
    };
    let ctx = match args.value("--limit").and_then(|l| l.parse::<usize>().ok()) {
        Some(limit) => TutorContext::build_with_limit(service.table(), text, limit),
        None => service.tutor_context(text),
    };
    print_json(&json!({ "color": ctx.color, "facts": ctx.facts }));
    if ctx.color.is_some() {
        0
    } else {
        4
    }
}

fn main() {
    // Cargar .env si existe para CHEMSPOT_*
    let _ = dotenvy::dotenv();
    let _ = logging::init_from_env();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = Args::parse(&raw);
    let Some(command) = args.command.clone() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let table = match load_table(args.value("--table")) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("[chemspot] tabla inválida: {e}");
            std::process::exit(3);
        }
    };
    let mut config = CONFIG.generation;
    if let Some(attempts) = args.value("--attempts").and_then(|a| a.parse::<usize>().ok()) {
        config.search.max_attempts = attempts.max(1);
    }
    let service = MatrixService::new(Arc::new(table), config);

    let code = match command.as_str() {
        "matrix" => run_matrix(&args, &service),
        "quiz" => run_quiz(&args, &service),
        "facts" => run_facts(&args, &service),
        _ => {
            eprintln!("{USAGE}");
            2
        }
    };
    std::process::exit(code);
}
