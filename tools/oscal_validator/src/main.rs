use gemara_oscal_core::validator::DocumentValidator;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: oscal_validator <path/to/oscal_document.json>");
        std::process::exit(2);
    }
    let path = std::path::Path::new(&args[1]);
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("cannot read {}: {}", path.display(), e);
            std::process::exit(2);
        }
    };

    let outcome = DocumentValidator::new_v1().and_then(|v| v.validate_json_str(&raw));
    match outcome {
        Ok(summary) => {
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("cannot render summary: {}", e),
            }
            if summary.passed() {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("validator error: {}", e);
            std::process::exit(1);
        }
    }
}
