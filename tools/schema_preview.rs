/// Schema Preview: sample a schema entry and print the draws.
///
/// Usage: schema_preview <schema_file> <entry> [--type int|float|bool|string] [--count <n>] [--seed <n>]
///
/// Set RUST_LOG=value_schema=debug to see how the schema is interpreted.

use std::path::Path;
use std::process;
use value_schema::core::scalar::Scalar;
use value_schema::{SchemaFactory, SchemaSet, SchemaSetError, SharedRng, ValueProducer};

#[derive(Clone, Copy)]
enum ValueKind {
    Int,
    Float,
    Bool,
    Text,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        process::exit(0);
    }

    let schema_path = &args[1];
    let entry = &args[2];
    let mut kind = ValueKind::Float;
    let mut count: usize = 10;
    let mut seed: Option<u64> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--type" if i + 1 < args.len() => {
                i += 1;
                kind = match args[i].as_str() {
                    "int" => ValueKind::Int,
                    "float" => ValueKind::Float,
                    "bool" => ValueKind::Bool,
                    "string" => ValueKind::Text,
                    other => {
                        eprintln!("ERROR: Unknown type '{}'", other);
                        process::exit(1);
                    }
                };
            }
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = args[i].parse().unwrap_or(10);
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().ok();
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let set = match SchemaSet::load(Path::new(schema_path)) {
        Ok(set) => set,
        Err(e) => {
            eprintln!("ERROR: Failed to load schema file: {}", e);
            process::exit(1);
        }
    };

    let factory = match seed {
        Some(seed) => SchemaFactory::with_rng(SharedRng::seeded(seed)),
        None => SchemaFactory::new(),
    };

    let result = match kind {
        ValueKind::Int => preview_numeric::<i32>(&set, entry, &factory, count),
        ValueKind::Float => preview_numeric::<f64>(&set, entry, &factory, count),
        ValueKind::Bool => preview_display::<bool>(&set, entry, &factory, count),
        ValueKind::Text => preview_display::<String>(&set, entry, &factory, count),
    };

    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        if let SchemaSetError::UnknownEntry(_) = e {
            eprintln!("Available entries: {}", set.names().join(", "));
        }
        process::exit(1);
    }
}

fn print_usage() {
    println!(
        "Usage: schema_preview <schema_file> <entry> [--type int|float|bool|string] [--count <n>] [--seed <n>]"
    );
}

fn draw<T: Scalar>(
    set: &SchemaSet,
    entry: &str,
    factory: &SchemaFactory,
    count: usize,
) -> Result<Vec<T>, SchemaSetError> {
    let producer = set.producer_with::<T>(entry, factory)?;
    producer
        .produce_many(count)
        .map_err(|source| SchemaSetError::Value {
            name: entry.to_string(),
            source,
        })
}

fn preview_display<T>(
    set: &SchemaSet,
    entry: &str,
    factory: &SchemaFactory,
    count: usize,
) -> Result<(), SchemaSetError>
where
    T: Scalar + std::fmt::Display,
{
    for value in draw::<T>(set, entry, factory, count)? {
        println!("{}", value);
    }
    Ok(())
}

fn preview_numeric<T>(
    set: &SchemaSet,
    entry: &str,
    factory: &SchemaFactory,
    count: usize,
) -> Result<(), SchemaSetError>
where
    T: Scalar + std::fmt::Display + Into<f64> + Copy,
{
    let values = draw::<T>(set, entry, factory, count)?;
    for value in &values {
        println!("{}", value);
    }

    if values.is_empty() {
        return Ok(());
    }
    let as_f64: Vec<f64> = values.iter().map(|v| (*v).into()).collect();
    let min = as_f64.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = as_f64.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let mean = as_f64.iter().sum::<f64>() / as_f64.len() as f64;

    println!("\n=== {} ({} samples) ===", entry, values.len());
    println!("min:  {}", min);
    println!("max:  {}", max);
    println!("mean: {:.4}", mean);
    Ok(())
}
