//! Calculator example
//!
//! This example drives a prompt-based calculator program through a
//! `Session`, resolving the operation by name.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example calculator -- --lhs 7 --op multiply --rhs 6
//! ```
//!
//! Without `--program`, a small `sh` script plays the calculator. Pass
//! `--program ./my-calc` to drive a real one that speaks the same prompts.

use std::env;

use ferrispawn::{Calculator, OperationTable, Session, SessionBuilder};

const DEMO_CALCULATOR: &str = r#"
while :; do
  printf 'Please enter the first number: '
  read a || exit 0
  printf 'Please enter the second number: '
  read b || exit 0
  printf 'Please enter the operation: '
  read op || exit 0
  case "$op" in
    +) echo "Result: $((a + b))" ;;
    -) echo "Result: $((a - b))" ;;
    '*') echo "Result: $((a * b))" ;;
    /) echo "Result: $((a / b))" ;;
  esac
done
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=trace to see every chunk and line)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    println!("=== Ferrispawn Calculator Example ===\n");

    let table = OperationTable::builtin();
    let op = match table.resolve(&args.op) {
        Ok(op) => op,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Known operations: {}", table.names().collect::<Vec<_>>().join(", "));
            std::process::exit(1);
        }
    };

    let builder = match &args.program {
        Some(program) => SessionBuilder::new(program),
        None => Session::builder("sh").arg("-c").arg(DEMO_CALCULATOR),
    };

    println!("Spawning {}...", builder.config().program);
    let mut session = builder.spawn()?;

    let result = Calculator::new(&mut session)
        .calculate(args.lhs, op, args.rhs)
        .await;

    match result {
        Ok(value) => println!("{} {} {} = {}", args.lhs, op.symbol(), args.rhs, value),
        Err(e) => eprintln!("Calculation failed: {}", e),
    }

    session.close().await?;
    println!("\nSession closed.");

    Ok(())
}

struct Args {
    program: Option<String>,
    lhs: i64,
    op: String,
    rhs: i64,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();

        let mut program = None;
        let mut lhs = 7i64;
        let mut op = "add".to_string();
        let mut rhs = 5i64;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--program" | "-p" => {
                    i += 1;
                    if i < args.len() {
                        program = Some(args[i].clone());
                    }
                }
                "--lhs" | "-a" => {
                    i += 1;
                    if i < args.len() {
                        lhs = args[i].parse().unwrap_or(7);
                    }
                }
                "--op" | "-o" => {
                    i += 1;
                    if i < args.len() {
                        op = args[i].clone();
                    }
                }
                "--rhs" | "-b" => {
                    i += 1;
                    if i < args.len() {
                        rhs = args[i].parse().unwrap_or(5);
                    }
                }
                "--help" | "-h" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {}
            }
            i += 1;
        }

        Self {
            program,
            lhs,
            op,
            rhs,
        }
    }

    fn print_help() {
        println!(
            r#"ferrispawn calculator example

Drives a prompt-based calculator through an interactive session.

USAGE:
    cargo run --example calculator -- [OPTIONS]

OPTIONS:
    -p, --program <PATH>     Calculator program [default: built-in sh script]
    -a, --lhs <N>            First operand [default: 7]
    -o, --op <NAME>          Operation name or symbol [default: add]
    -b, --rhs <N>            Second operand [default: 5]
    -h, --help               Print this help message
"#
        );
    }
}
