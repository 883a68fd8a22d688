use chemspot_rust::config::CONFIG;
use chemspot_rust::matrix::{GenerateRequest, GenerateResponse, LabelMatrixRequest, MatrixService};
use chemspot_rust::source::{JsonFileTableSource, StaticTableSource, TableSource};
use chemspot_rust::{logging, spot_core::CellKind};
use spot_quiz::QuizRequest;

/// Imprime la matriz como tabla de texto: `·` ausente, `—` sin reacción.
fn print_grid(resp: &GenerateResponse) {
    let labels: Vec<&str> = resp.solutions.iter().map(|s| s.label()).collect();
    print!("{:>6}", "");
    for l in &labels {
        print!("{l:>14}");
    }
    println!();
    for (i, row) in resp.grid.rows().iter().enumerate() {
        print!("{:>6}", labels[i]);
        for cell in row {
            let text = match cell {
                None => "·".to_string(),
                Some(c) if c.kind == CellKind::NoReaction => "—".to_string(),
                Some(c) => format!("{}{}",
                                   c.color.as_deref().unwrap_or("?"),
                                   if c.kind == CellKind::Precipitate { "↓" } else { "" }),
            };
            print!("{text:>14}");
        }
        println!();
    }
}

async fn load_service() -> Result<MatrixService, String> {
    let file = JsonFileTableSource::new(CONFIG.table_path.clone());
    match MatrixService::from_source(&file, CONFIG.generation).await {
        Ok(svc) => Ok(svc),
        Err(e) => {
            log::warn!("[main] {} no disponible ({e}); se usa la tabla incluida", file.path().display());
            let bundled = StaticTableSource::bundled();
            log::info!("[main] origen alternativo: {}", bundled.get_name());
            MatrixService::from_source(&bundled, CONFIG.generation).await.map_err(|e| e.to_string())
        }
    }
}

#[tokio::main]
async fn main() {
    // Cargar variables de entorno desde .env si existe (antes de leer CONFIG)
    let _ = dotenvy::dotenv();
    if let Err(e) = logging::init_from_env() {
        eprintln!("[main] logger ya instalado: {e}");
    }

    let service = match load_service().await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("[main] no se pudo cargar la tabla: {e}");
            std::process::exit(1);
        }
    };

    println!("--- Demo: matriz por defecto ---");
    match service.generate(&GenerateRequest::new(CONFIG.generation.default_n, None)) {
        Ok(resp) => {
            for s in &resp.solutions {
                println!("  {s}");
            }
            print_grid(&resp);
            println!("coloreadas={} colores distintos={} intentos={}",
                     resp.stats.colored_count, resp.stats.distinct_color_buckets, resp.attempts);
            if let Some(note) = &resp.note {
                println!("nota: {note}");
            }
        }
        Err(e) => eprintln!("[main] Error: {e}"),
    }

    println!("--- Demo: petición JSON asíncrona ---");
    let reply = service.handle_async(r#"{"n": "9px", "targetColored": 10}"#.to_string()).await;
    println!("status={} soluciones={}",
             reply.status,
             reply.body["solutions"].as_array().map(|a| a.len()).unwrap_or(0));

    println!("--- Demo: lote paralelo n=5..9 ---");
    let requests: Vec<GenerateRequest> = (5..=9).map(|n| GenerateRequest::new(n, None)).collect();
    for (req, res) in requests.iter().zip(service.generate_batch(&requests)) {
        match res {
            Ok(r) => println!("  n={} coloreadas={} best-effort={}", req.n, r.stats.colored_count, r.note.is_some()),
            Err(e) => println!("  n={} error: {e}", req.n),
        }
    }

    println!("--- Demo: matriz de etiquetas ---");
    let labels = service.label_matrix(&LabelMatrixRequest::default());
    println!("  {}", labels.labels.join(" | "));

    println!("--- Demo: quiz ---");
    match service.quiz(&QuizRequest::default()) {
        Ok(q) => println!("  [{}] {}", q.mode(), q.prompt()),
        Err(e) => eprintln!("[quiz] Error: {e}"),
    }

    println!("--- Demo: contexto del tutor ---");
    let ctx = service.tutor_context("Which ions give a deep blue precipitate?");
    println!("  color detectado={:?} hechos={}", ctx.color, ctx.facts.len());
}
