//! # formkit CLI
//!
//! Usage:
//!   formkit layout form.json
//!   echo '{ ... }' | formkit layout -
//!   formkit parse person "citizen, john 01/02/1980"
//!   formkit parse vin 1HGCM82633A004352
//!   formkit --example > form.json
//!
//! Set `RUST_LOG=debug` (or `trace`) to follow the layout passes.

use std::env;
use std::fs;
use std::io::{self, Read};

use formkit::{FormKitError, QueryKind};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--example") {
        print!("{}", example_form_json());
        return;
    }

    if args.iter().any(|a| a == "--help" || a == "-h") || args.len() < 2 {
        print_usage();
        return;
    }

    let result = match args[1].as_str() {
        "layout" => run_layout(args.get(2).map(String::as_str)),
        "parse" => run_parse(&args[2..]),
        other => Err(FormKitError::Usage(format!("Unknown command '{}'.", other))),
    };

    if let Err(e) = result {
        match e {
            FormKitError::Query(ref query_error) => {
                eprintln!("✗ {}", query_error.user_message());
            }
            FormKitError::Usage(ref message) => {
                eprintln!("✗ {}", message);
                print_usage();
            }
            ref other => eprintln!("✗ {}", other),
        }
        std::process::exit(1);
    }
}

fn run_layout(path: Option<&str>) -> Result<(), FormKitError> {
    let input = match path {
        Some(path) if path != "-" => fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let snapshot = formkit::layout_json(&input)?;
    let json = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| FormKitError::Usage(format!("Failed to write layout: {}", e)))?;
    println!("{}", json);

    eprintln!(
        "✓ Laid out {} section(s), content {} x {}",
        snapshot.sections.len(),
        snapshot.content_size.width,
        snapshot.content_size.height
    );
    Ok(())
}

fn run_parse(args: &[String]) -> Result<(), FormKitError> {
    let (kind, words) = args
        .split_first()
        .ok_or_else(|| FormKitError::Usage("Missing query kind.".to_string()))?;
    let kind: QueryKind = kind.parse()?;
    let query = words.join(" ");

    let result = formkit::parse_query(kind, &query)?;
    for (key, value) in &result {
        println!("{}: {}", key, value);
    }
    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  formkit layout <form.json | ->");
    eprintln!("  formkit parse <person|search|licence|registration|vin|engine> <query>");
    eprintln!("  formkit --example");
}

fn example_form_json() -> &'static str {
    r##"{
  "viewportWidth": 768,
  "config": {
    "screenScale": 2,
    "distribution": "FillEqually",
    "itemLayoutMargins": { "top": 8, "left": 16, "bottom": 8, "right": 16 }
  },
  "form": {
    "globalHeaderHeight": 64,
    "sections": [
      {
        "headerHeight": 32,
        "minimumWidth": 360,
        "items": [
          { "minimumWidth": 140, "height": 44 },
          { "minimumWidth": 140, "height": 44 },
          { "minimumWidth": 300, "height": 44, "separatorStyle": "FullWidth" }
        ]
      },
      {
        "headerHeight": 32,
        "minimumWidth": 360,
        "distribution": "FillLast",
        "items": [
          { "minimumWidth": 120, "height": 44 },
          { "minimumWidth": 80, "height": 44 },
          { "minimumWidth": 200, "height": 88, "separatorStyle": "Hidden" }
        ]
      },
      {
        "inset": { "top": 12, "left": 24, "bottom": 12, "right": 24 },
        "headerHeight": 28,
        "footerHeight": 20,
        "items": [
          { "minimumWidth": 200, "height": 120 }
        ]
      }
    ]
  }
}
"##
}
